//! Runtime configuration from environment variables.
//!
//! `main` loads a `.env` file first (via `dotenv`), so any of these can live there:
//! - `SUBNET_IP_SEED` - u64 seed for reproducible addresses
//! - `SUBNET_IP_CLIPBOARD` - `off`, `false`, `no` or `0` disables copying
//! - `SUBNET_IP_CLIPBOARD_CMD` - clipboard command line, e.g. `xclip -selection clipboard`
//! - `SUBNET_IP_LOG_CONFIG` - log4rs YAML file, default `log4rs.yml`

use std::error::Error;

pub const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub seed: Option<u64>,
    pub clipboard: bool,
    pub clipboard_cmd: Option<String>,
    pub log_config: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            seed: None,
            clipboard: true,
            clipboard_cmd: None,
            log_config: DEFAULT_LOG_CONFIG.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Config, Box<dyn Error>> {
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Config, Box<dyn Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let mut cfg = Config::default();

        if let Some(seed) = get("SUBNET_IP_SEED") {
            cfg.seed = Some(
                seed.parse()
                    .map_err(|e| format!("SUBNET_IP_SEED={seed} is not a u64: {e}"))?,
            );
        }
        if let Some(flag) = get("SUBNET_IP_CLIPBOARD") {
            cfg.clipboard = parse_flag(&flag)
                .ok_or_else(|| format!("SUBNET_IP_CLIPBOARD={flag} is not on/off"))?;
        }
        cfg.clipboard_cmd = get("SUBNET_IP_CLIPBOARD_CMD");
        if let Some(path) = get("SUBNET_IP_LOG_CONFIG") {
            cfg.log_config = path;
        }

        log::debug!("config: {cfg:?}");
        Ok(cfg)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "on" | "true" | "yes" => Some(true),
        "0" | "off" | "false" | "no" => Some(false),
        _ => None,
    }
}
