//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge built-in defaults + `docseek.toml` +
//! `docseek.<env>.toml` + `DOCSEEK_*` env vars. Every setting has a default, so
//! a run with no files and no variables uses the fixed retrieval policy.
//! Provides helpers to expand `~` and `${VAR}` in user-supplied paths.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use crate::error::SetupError;

/// Smallest writer heap tantivy accepts for one indexing thread.
pub const MIN_WRITER_HEAP_BYTES: usize = 15_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub index: IndexSettings,
    pub search: SearchSettings,
    pub extract: ExtractSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexSettings {
    pub writer_heap_bytes: usize,
    pub dir_prefix: String,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self { writer_heap_bytes: 50_000_000, dir_prefix: "index".to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub top_k: usize,
    pub hits_threshold: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self { top_k: 5, hits_threshold: 10 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractSettings {
    pub summary_chars: usize,
}

impl Default for ExtractSettings {
    fn default() -> Self {
        Self { summary_chars: 50 }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), SetupError> {
        let invalid = |msg: String| Err(SetupError::InvalidConfig(msg));
        if self.search.top_k == 0 {
            return invalid("search.top_k must be at least 1".to_string());
        }
        if self.search.hits_threshold < self.search.top_k {
            return invalid(format!(
                "search.hits_threshold ({}) must not be below search.top_k ({})",
                self.search.hits_threshold, self.search.top_k
            ));
        }
        if self.index.writer_heap_bytes < MIN_WRITER_HEAP_BYTES {
            return invalid(format!("index.writer_heap_bytes must be at least {}", MIN_WRITER_HEAP_BYTES));
        }
        if self.index.dir_prefix.is_empty() {
            return invalid("index.dir_prefix must not be empty".to_string());
        }
        if self.extract.summary_chars == 0 {
            return invalid("extract.summary_chars must be at least 1".to_string());
        }
        Ok(())
    }
}

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::from(Serialized::defaults(Settings::default())).merge(Toml::file("docseek.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("docseek.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("docseek.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("docseek.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("DOCSEEK_").split("__"));

        Ok(Self { figment })
    }

    pub fn from_figment(figment: Figment) -> Self {
        Self { figment }
    }

    pub fn settings(&self) -> anyhow::Result<Settings> {
        let settings: Settings = self
            .figment
            .extract()
            .map_err(|e| anyhow::anyhow!("Failed to read settings: {}", e))?;
        settings.validate()?;
        Ok(settings)
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    // Expand env vars first
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}
