//! Runtime configuration, read from the environment

use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    CONFIG_DIR_NAME, DATA_FILE_NAME, DEFAULT_TRANSITION_MS, ENV_API_URL, ENV_DATA_PATH,
    ENV_TRANSITION_MS,
};

#[derive(Clone, Debug)]
pub struct Config {
    /// Contact API base; `None` means deliveries are simulated
    pub api_url: Option<String>,
    pub data_path: PathBuf,
    pub transition: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: None,
            data_path: default_data_path(),
            transition: Duration::from_millis(DEFAULT_TRANSITION_MS),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Config::default();

        let transition = match get(ENV_TRANSITION_MS).map(|v| v.parse::<u64>()) {
            Some(Ok(ms)) => Duration::from_millis(ms),
            Some(Err(e)) => {
                tracing::warn!(error = %e, "Invalid {}, using default", ENV_TRANSITION_MS);
                defaults.transition
            }
            None => defaults.transition,
        };

        Config {
            api_url: get(ENV_API_URL),
            data_path: get(ENV_DATA_PATH).map(PathBuf::from).unwrap_or(defaults.data_path),
            transition,
        }
    }
}

fn default_data_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
        .join(DATA_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[]));
        assert!(config.api_url.is_none());
        assert!(config.data_path.ends_with(".gazette/portfolio.yaml"));
        assert_eq!(config.transition, Duration::from_millis(DEFAULT_TRANSITION_MS));
    }

    #[test]
    fn test_blank_api_url_means_simulated() {
        let config = Config::from_lookup(lookup(&[(ENV_API_URL, "   ")]));
        assert!(config.api_url.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            (ENV_API_URL, "https://api.example.com"),
            (ENV_DATA_PATH, "/tmp/paper.yaml"),
            (ENV_TRANSITION_MS, "50"),
        ]));
        assert_eq!(config.api_url.as_deref(), Some("https://api.example.com"));
        assert_eq!(config.data_path, PathBuf::from("/tmp/paper.yaml"));
        assert_eq!(config.transition, Duration::from_millis(50));
    }

    #[test]
    fn test_bad_transition_falls_back() {
        let config = Config::from_lookup(lookup(&[(ENV_TRANSITION_MS, "soon")]));
        assert_eq!(config.transition, Duration::from_millis(DEFAULT_TRANSITION_MS));
    }
}
