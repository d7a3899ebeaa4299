//! Environment-driven runtime settings.

use anyhow::{Context, Result};

/// Runtime settings for the API server, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Bind address for the HTTP listener.
    pub host: String,
    /// Bind port for the HTTP listener.
    pub port: u16,
    /// Base URL of the Meteostat point-data API.
    pub meteostat_base_url: String,
    /// Optional API key sent to Meteostat as `x-api-key`.
    pub meteostat_api_key: Option<String>,
    /// Base URL of the Open-Meteo forecast API.
    pub open_meteo_base_url: String,
    /// Timeout applied to every provider request, in seconds.
    pub http_timeout_secs: u64,
}

impl Settings {
    /// Loads settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads settings through an arbitrary lookup, so tests can inject an
    /// environment without touching process globals.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("OMBROS_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("invalid OMBROS_PORT: {raw}"))?,
            None => 8000,
        };
        let http_timeout_secs = match lookup("OMBROS_HTTP_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .with_context(|| format!("invalid OMBROS_HTTP_TIMEOUT_SECS: {raw}"))?,
            None => 10,
        };

        Ok(Self {
            host: lookup("OMBROS_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            meteostat_base_url: lookup("METEOSTAT_BASE_URL")
                .unwrap_or_else(|| "https://meteostat.p.rapidapi.com".to_string()),
            meteostat_api_key: lookup("METEOSTAT_API_KEY").filter(|k| !k.trim().is_empty()),
            open_meteo_base_url: lookup("OPEN_METEO_BASE_URL")
                .unwrap_or_else(|| "https://api.open-meteo.com".to_string()),
            http_timeout_secs,
        })
    }
}
