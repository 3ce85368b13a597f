//! API clients for external services
//!
//! - OMDb: title search and detail metadata
//! - YouTube: official trailer lookup

pub mod omdb;
pub mod youtube;

pub use omdb::{OmdbClient, OmdbError};
pub use youtube::YoutubeClient;
