mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./config.toml",
        "./marquee.toml",
        "~/.config/marquee/config.toml",
        "/etc/marquee/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    // Return default config if no file found
    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.server.port == 0 {
        anyhow::bail!("Server port cannot be 0");
    }

    if config.radarr.url.is_empty() {
        anyhow::bail!("Radarr URL cannot be empty");
    }

    if config.tvdb.token_renewal_days == 0 {
        anyhow::bail!("TVDB token renewal window cannot be 0 days");
    }

    // Missing keys degrade the matching provider to errors at request time
    // rather than preventing startup; list browsing still works.
    if config.radarr.api_key.is_empty() {
        tracing::warn!("Radarr API key is not set; catalog and poster lookups will fail");
    }
    if config.tvdb.api_key.is_empty() {
        tracing::warn!("TVDB API key is not set; TVDB poster search will fail");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.cache.poster_ttl_hours, 24);
        assert_eq!(config.tvdb.token_renewal_days, 28);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [radarr]
            url = "http://radarr.local:7878"
            api_key = "secret"
            "#,
        )
        .unwrap();

        assert_eq!(config.radarr.url, "http://radarr.local:7878");
        assert_eq!(config.radarr.api_key, "secret");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.tvdb.base_url, "https://api4.thetvdb.com");
    }

    #[test]
    fn zero_port_is_rejected() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn empty_radarr_url_is_rejected() {
        let mut config = Config::default();
        config.radarr.url = String::new();
        assert!(validate_config(&config).is_err());
    }
}
