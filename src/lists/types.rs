use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::radarr::RadarrMovie;

/// A movie as presented to end users and stored in list files.
///
/// `cached_poster`, when set, names a file in the poster cache directory; it
/// is the only field the poster pipeline ever writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    #[serde(default)]
    pub id: i64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tmdb_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imdb_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached_poster: Option<String>,
}

impl Movie {
    /// Map a Radarr catalog entry to a `Movie`, extracting the poster URL.
    pub fn from_radarr(movie: &RadarrMovie) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            year: movie.year,
            tmdb_id: movie.tmdb_id,
            imdb_id: movie.imdb_id.clone(),
            poster_url: movie.poster_url().map(String::from),
            cached_poster: None,
        }
    }
}

/// A named, ordered collection of movies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieList {
    pub name: String,
    #[serde(default)]
    pub movies: Vec<Movie>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MovieList {
    /// Create an empty list stamped with the current time.
    pub fn new(name: impl Into<String>, movies: Vec<Movie>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            movies,
            created_at: now,
            updated_at: now,
        }
    }
}
