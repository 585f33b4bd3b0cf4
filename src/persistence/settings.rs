use std::time::Duration;

use log::info;
use serde::{
    Deserialize,
    Serialize,
};

use crate::core::review_table::DEFAULT_PAGE_SIZE;

pub const BACKEND_URL_ENV: &str = "TANGOCHO_BACKEND_URL";

const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// User settings, stored as `settings.json`. Missing fields take defaults so
/// older files keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub backend_url: String,
    pub page_size: usize,
    /// Upper bound on entries returned by document analysis. `None` lets the
    /// backend decide.
    pub analyze_limit: Option<usize>,
    pub request_timeout_secs: u64,
    pub dark_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            analyze_limit: None,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            dark_mode: true,
        }
    }
}

impl Settings {
    pub const FILE_NAME: &'static str = "settings.json";

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Applies an override for the backend URL, typically the value of
    /// [`BACKEND_URL_ENV`]. Blank values are ignored.
    pub fn with_backend_override(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()) {
            info!("Using backend URL from {}: {}", BACKEND_URL_ENV, url);
            self.backend_url = url;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_fills_in_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "page_size": 20 }"#).unwrap();
        assert_eq!(settings.page_size, 20);
        assert_eq!(settings.backend_url, DEFAULT_BACKEND_URL);
        assert_eq!(settings.request_timeout(), Duration::from_secs(120));
        assert_eq!(settings.analyze_limit, None);
    }

    #[test]
    fn zero_timeout_is_raised_to_one_second() {
        let settings = Settings { request_timeout_secs: 0, ..Settings::default() };
        assert_eq!(settings.request_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn backend_override_ignores_blank_values() {
        let settings = Settings::default().with_backend_override(Some("  ".to_string()));
        assert_eq!(settings.backend_url, DEFAULT_BACKEND_URL);

        let settings =
            Settings::default().with_backend_override(Some("http://vocab.local:9000".to_string()));
        assert_eq!(settings.backend_url, "http://vocab.local:9000");

        let settings = Settings::default().with_backend_override(None);
        assert_eq!(settings.backend_url, DEFAULT_BACKEND_URL);
    }
}
