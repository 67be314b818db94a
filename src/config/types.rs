use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub radarr: RadarrConfig,

    #[serde(default)]
    pub tvdb: TvdbConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub lists: ListsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

/// Connection settings for the Radarr instance that supplies the movie
/// catalog and library poster URLs.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RadarrConfig {
    #[serde(default = "default_radarr_url")]
    pub url: String,

    /// Value sent in the `X-Api-Key` header.
    #[serde(default)]
    pub api_key: String,
}

/// Connection settings for the TVDB v4 API.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TvdbConfig {
    #[serde(default = "default_tvdb_url")]
    pub base_url: String,

    /// API key exchanged for a bearer token at login.
    #[serde(default)]
    pub api_key: String,

    /// How long a login token is reused before re-authenticating. TVDB does
    /// not return an explicit expiry, so this is a local policy, not a
    /// guarantee from the provider.
    #[serde(default = "default_token_renewal_days")]
    pub token_renewal_days: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Root directory for the JSON response cache.
    #[serde(default = "default_cache_dir")]
    pub dir: PathBuf,

    /// Directory for downloaded poster images.
    #[serde(default = "default_poster_dir")]
    pub poster_dir: PathBuf,

    /// How long cached poster lookups stay fresh. Chosen locally; Radarr
    /// makes no promise about how long its poster URLs stay valid.
    #[serde(default = "default_poster_ttl_hours")]
    pub poster_ttl_hours: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListsConfig {
    /// Directory where movie list files are stored.
    #[serde(default = "default_lists_dir")]
    pub dir: PathBuf,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_radarr_url() -> String {
    "http://localhost:7878".to_string()
}
fn default_tvdb_url() -> String {
    "https://api4.thetvdb.com".to_string()
}
fn default_token_renewal_days() -> u32 {
    28
}
fn default_cache_dir() -> PathBuf {
    PathBuf::from("./cache")
}
fn default_poster_dir() -> PathBuf {
    PathBuf::from("./cache/posters")
}
fn default_poster_ttl_hours() -> u64 {
    24
}
fn default_lists_dir() -> PathBuf {
    PathBuf::from("./lists")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for RadarrConfig {
    fn default() -> Self {
        Self {
            url: default_radarr_url(),
            api_key: String::new(),
        }
    }
}

impl Default for TvdbConfig {
    fn default() -> Self {
        Self {
            base_url: default_tvdb_url(),
            api_key: String::new(),
            token_renewal_days: default_token_renewal_days(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: default_cache_dir(),
            poster_dir: default_poster_dir(),
            poster_ttl_hours: default_poster_ttl_hours(),
        }
    }
}

impl Default for ListsConfig {
    fn default() -> Self {
        Self {
            dir: default_lists_dir(),
        }
    }
}
