//! CLI configuration.
//!
//! Read from `$XDG_CONFIG_HOME/coderev/config.toml` (falling back to
//! `~/.config`). Every field is optional; a missing or unparseable file is
//! a soft failure that lands on the defaults — except the API key, which
//! the review command requires and can also take from `GEMINI_API_KEY`.

use std::path::PathBuf;

use coderev_core::client::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use coderev_core::prompt;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API key for the review service. `GEMINI_API_KEY` wins when set.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub temperature: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_owned(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            temperature: prompt::TEMPERATURE,
        }
    }
}

/// Returns the path to the coderev config file.
///
/// Prefers `$XDG_CONFIG_HOME/coderev/config.toml`; falls back to
/// `~/.config/coderev/config.toml` when the env var is absent.
fn config_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join(".config"))
        })
        .unwrap_or_else(|| PathBuf::from(".config"));
    base.join("coderev").join("config.toml")
}

impl Config {
    /// Loads the config file, or the defaults when it is missing or broken.
    ///
    /// Never fails — parse errors are printed to stderr and ignored, so a
    /// bad config file cannot block a review.
    pub fn load() -> Self {
        let path = config_path();
        let raw = match std::fs::read_to_string(&path) {
            Ok(s) => s,
            Err(_) => return Self::default(),
        };
        Self::from_toml(&raw).unwrap_or_else(|e| {
            eprintln!("coderev: config parse error in {}: {}", path.display(), e);
            Self::default()
        })
    }

    fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// The effective API key: `GEMINI_API_KEY` env var, else the config file.
    pub fn api_key(&self) -> Option<String> {
        std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .or_else(|| self.api_key.clone())
    }
}
