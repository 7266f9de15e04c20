// src/config.rs

use std::env;
use std::fmt::Display;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;
use std::path::PathBuf;

use dotenvy::dotenv;

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding one `<category>.csv` question bank per category.
    pub data_dir: PathBuf,
    pub host: IpAddr,
    pub port: u16,
    pub rust_log: String,
    pub log_dir: PathBuf,
    /// Allowed CORS origins for `/api/*`. Empty means any origin.
    pub cors_origins: Vec<String>,
    /// Problems found while reading the environment, logged once tracing is up.
    pub warnings: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let data_dir = env::var("QUIZ_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"));

        let mut warnings = Vec::new();

        let host = parse_or(
            "HOST",
            env::var("HOST").ok(),
            IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            &mut warnings,
        );

        let port = parse_or("PORT", env::var("PORT").ok(), 8000u16, &mut warnings);

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let log_dir = env::var("LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("logs"));

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|list| parse_origins(&list))
            .unwrap_or_default();

        Self {
            data_dir,
            host,
            port,
            rust_log,
            log_dir,
            cors_origins,
            warnings,
        }
    }

    /// Emits the warnings collected by [`Config::from_env`].
    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            tracing::warn!("{}", warning);
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8000,
            rust_log: "info".to_string(),
            log_dir: PathBuf::from("logs"),
            cors_origins: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

/// Parses `raw` or falls back to `default`, noting the fallback in `warnings`.
fn parse_or<T>(name: &str, raw: Option<String>, default: T, warnings: &mut Vec<String>) -> T
where
    T: FromStr + Display,
{
    let Some(raw) = raw else {
        return default;
    };
    match raw.parse() {
        Ok(value) => value,
        Err(_) => {
            warnings.push(format!(
                "Invalid {} value {:?}, using default {}",
                name, raw, default
            ));
            default
        }
    }
}

fn parse_origins(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
