use std::env;
use std::path::PathBuf;

pub const DEFAULT_PREDICT_URL: &str = "http://127.0.0.1:8000/predict";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub predict_url: String,
    pub request_timeout_secs: u64,
    pub fighter_data_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            predict_url: DEFAULT_PREDICT_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            fighter_data_path: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            predict_url: env::var("PREDICT_URL")
                .ok()
                .map(|val| val.trim().to_string())
                .filter(|val| !val.is_empty())
                .unwrap_or_else(|| DEFAULT_PREDICT_URL.to_string()),
            request_timeout_secs: parse_timeout_secs(
                env::var("PREDICT_TIMEOUT_SECS").ok().as_deref(),
            ),
            fighter_data_path: env::var("FIGHTER_DATA_PATH")
                .ok()
                .filter(|val| !val.trim().is_empty())
                .map(PathBuf::from),
        }
    }
}

/// `.env.local` wins over `.env`; both are optional.
pub fn load_env_files() {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
}

pub fn parse_timeout_secs(raw: Option<&str>) -> u64 {
    raw.and_then(|val| val.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_TIMEOUT_SECS)
        .clamp(1, 120)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_defaults_and_clamps() {
        assert_eq!(parse_timeout_secs(None), DEFAULT_TIMEOUT_SECS);
        assert_eq!(parse_timeout_secs(Some("abc")), DEFAULT_TIMEOUT_SECS);
        assert_eq!(parse_timeout_secs(Some(" 30 ")), 30);
        assert_eq!(parse_timeout_secs(Some("0")), 1);
        assert_eq!(parse_timeout_secs(Some("500")), 120);
    }
}
