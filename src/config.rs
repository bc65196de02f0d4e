use crate::zone::ZoneStyle;
use reqwest::Url;
use std::env;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_SESSION_FILE: &str = ".permanence-session.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid api url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("{0}")]
    InvalidZoneStyle(String),
}

/// Configuration du client. Variables reconnues :
/// `PERMANENCE_API_URL`, `PERMANENCE_SESSION`, `PERMANENCE_ZONE_STYLE`.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub api_url: Url,
    pub session_file: PathBuf,
    pub zone_style: ZoneStyle,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: Url::parse(DEFAULT_API_URL).expect("default api url is valid"),
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            zone_style: ZoneStyle::default(),
        }
    }
}

impl ClientConfig {
    /// Lit l'environnement (et un éventuel `.env`), avec repli sur les valeurs par défaut.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(url) = lookup("PERMANENCE_API_URL") {
            config.api_url = parse_url(&url)?;
        }
        if let Some(path) = lookup("PERMANENCE_SESSION") {
            config.session_file = PathBuf::from(path);
        }
        if let Some(style) = lookup("PERMANENCE_ZONE_STYLE") {
            config.zone_style = style.parse().map_err(ConfigError::InvalidZoneStyle)?;
        }
        Ok(config)
    }

    pub fn with_api_url(mut self, url: &str) -> Result<Self, ConfigError> {
        self.api_url = parse_url(url)?;
        Ok(self)
    }
}

fn parse_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidUrl {
        url: raw.to_owned(),
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl {
            url: raw.to_owned(),
            reason: "not a base url".into(),
        });
    }
    Ok(url)
}
