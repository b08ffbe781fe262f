use serde::{Deserialize, Serialize};

pub const API_URL_ENV: &str = "PATI_API_URL";
pub const COUNTRY_CODE_ENV: &str = "PATI_COUNTRY_CODE";

/// Client settings. Configured once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend base URL, e.g. `https://api.example.com/api`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Country calling code used when turning national phone numbers into
    /// messaging links.
    #[serde(default = "default_country_code")]
    pub country_code: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            country_code: default_country_code(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Defaults overridden by `PATI_API_URL` / `PATI_COUNTRY_CODE` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                config.base_url = url;
            }
        }
        if let Ok(code) = std::env::var(COUNTRY_CODE_ENV) {
            let digits: String = code.chars().filter(char::is_ascii_digit).collect();
            if !digits.is_empty() {
                config.country_code = digits;
            }
        }
        config
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

fn default_country_code() -> String {
    "90".to_string()
}
