use std::path::PathBuf;

use crate::database::OnCorrupt;

pub const DEFAULT_BIND: &str = "127.0.0.1:5000";
pub const DEFAULT_DATA_DIR: &str = "data/db";
pub const DEFAULT_DEMO_DOMAIN: &str = "glimmora.com";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Server settings, read from `REACH_*` environment variables.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub bind: String,
    pub data_dir: PathBuf,
    /// `None` turns off shared visibility within the demo domain.
    pub demo_domain: Option<String>,
    pub on_corrupt: OnCorrupt,
    pub seed: bool,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            bind: DEFAULT_BIND.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            demo_domain: Some(DEFAULT_DEMO_DOMAIN.to_string()),
            on_corrupt: OnCorrupt::default(),
            seed: true,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Config {
    /// Reads the process environment, after loading a `.env` file if one is
    /// present.
    pub fn from_env() -> (Config, Vec<String>) {
        // a missing .env file is normal
        let _ = dotenvy::dotenv();

        Config::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from `lookup`. Unusable values keep their default and
    /// produce a warning, returned alongside since logging may not be set up yet.
    pub fn from_lookup<F>(lookup: F) -> (Config, Vec<String>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        let mut warnings = vec![];

        if let Some(bind) = lookup("REACH_BIND") {
            if bind.trim().is_empty() {
                warnings.push(format!("REACH_BIND is empty, using {}", DEFAULT_BIND));
            } else {
                config.bind = bind.trim().to_string();
            }
        }

        if let Some(data_dir) = lookup("REACH_DATA_DIR") {
            if data_dir.trim().is_empty() {
                warnings.push(format!("REACH_DATA_DIR is empty, using {}", DEFAULT_DATA_DIR));
            } else {
                config.data_dir = PathBuf::from(data_dir.trim());
            }
        }

        if let Some(domain) = lookup("REACH_DEMO_DOMAIN") {
            let domain = domain.trim().trim_start_matches('@').to_string();
            config.demo_domain = if domain.is_empty() { None } else { Some(domain) };
        }

        if let Some(on_corrupt) = lookup("REACH_ON_CORRUPT") {
            match on_corrupt.parse() {
                Ok(on_corrupt) => config.on_corrupt = on_corrupt,
                Err(err) => warnings.push(format!("REACH_ON_CORRUPT: {}, using empty", err)),
            }
        }

        if let Some(seed) = lookup("REACH_SEED") {
            match parse_bool(&seed) {
                Some(seed) => config.seed = seed,
                None => warnings.push(format!("REACH_SEED: '{}' is not a boolean, using true", seed)),
            }
        }

        if let Some(log_level) = lookup("REACH_LOG_LEVEL") {
            if log_level.trim().is_empty() {
                warnings.push(format!("REACH_LOG_LEVEL is empty, using {}", DEFAULT_LOG_LEVEL));
            } else {
                config.log_level = log_level.trim().to_string();
            }
        }

        (config, warnings)
    }
}
