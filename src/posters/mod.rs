//! Poster resolution and download pipeline.
//!
//! [`PosterResolver`] turns a movie title into a poster URL (TTL cache in
//! front of the Radarr catalog); [`PosterDownloader`] turns a poster URL
//! into a stable local file under the poster cache directory.

mod downloader;
mod resolver;

pub use downloader::{cached_filename, DownloadError, PosterDownloader};
pub use resolver::{PosterResolver, ResolveError};
