//! Radarr integration: the library manager that owns the movie catalog.

mod client;
mod types;

pub use client::{RadarrClient, RadarrError};
pub use types::{RadarrImage, RadarrMovie};
