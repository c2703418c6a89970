//! Runtime configuration, read from the environment after `.env` is loaded.

use dotenv::dotenv;
use retail_dash_core::RegionSelector;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_YEARS: &str = "2023,2024";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_LOG_FILE: &str = "dashboard.log";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a whole number of seconds greater than zero, got {value:?}")]
    InvalidTimeout { name: &'static str, value: String },
    #[error("{name} must be an http(s) URL, got {value:?}")]
    InvalidUrl { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_url: String,
    pub region: RegionSelector,
    pub years: Vec<String>,
    pub timeout: Duration,
    pub log_file: PathBuf,
    pub debug: bool,
}

impl AppConfig {
    /// Loads `.env`, then reads the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = lookup("DASHBOARD_API_URL")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl {
                name: "DASHBOARD_API_URL",
                value: api_url,
            });
        }

        let region = lookup("DASHBOARD_REGION")
            .map_or(RegionSelector::All, |value| RegionSelector::parse(value.trim()));

        let years = parse_years(
            &lookup("DASHBOARD_YEARS").unwrap_or_else(|| DEFAULT_YEARS.to_string()),
        );

        let timeout = match lookup("DASHBOARD_TIMEOUT_SECS") {
            Some(value) => parse_timeout(&value)?,
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let log_file = lookup("DASHBOARD_LOG_FILE")
            .map_or_else(|| PathBuf::from(DEFAULT_LOG_FILE), PathBuf::from);

        let debug = lookup("DEBUG").is_some_and(|value| !value.is_empty() && value != "0");

        Ok(Self {
            api_url,
            region,
            years,
            timeout,
            log_file,
            debug,
        })
    }
}

fn parse_years(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|year| !year.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_timeout(value: &str) -> Result<Duration, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout {
            name: "DASHBOARD_TIMEOUT_SECS",
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.region, RegionSelector::All);
        assert_eq!(config.years, ["2023", "2024"]);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.log_file, PathBuf::from("dashboard.log"));
        assert!(!config.debug);
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("DASHBOARD_API_URL", "https://metrics.example.com"),
            ("DASHBOARD_REGION", "Texas"),
            ("DASHBOARD_YEARS", " 2022, ,2023 "),
            ("DASHBOARD_TIMEOUT_SECS", "3"),
            ("DEBUG", "1"),
        ])
        .unwrap();
        assert_eq!(config.region, RegionSelector::parse("Texas"));
        assert_eq!(config.years, ["2022", "2023"]);
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert!(config.debug);
    }

    #[test]
    fn rejects_bad_timeout_and_url() {
        assert!(matches!(
            config_from(&[("DASHBOARD_TIMEOUT_SECS", "soon")]),
            Err(ConfigError::InvalidTimeout { .. })
        ));
        assert!(matches!(
            config_from(&[("DASHBOARD_TIMEOUT_SECS", "0")]),
            Err(ConfigError::InvalidTimeout { .. })
        ));
        assert!(matches!(
            config_from(&[("DASHBOARD_API_URL", "localhost:5000")]),
            Err(ConfigError::InvalidUrl { .. })
        ));
    }
}
