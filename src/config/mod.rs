use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use toml_edit::{DocumentMut, Item};
use tracing::debug;

use crate::metrics::MetricsOptions;
use crate::reconcile::NO_REVISION_NEEDED;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to access config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config file: {0}")]
    Parse(#[from] toml_edit::TomlError),

    #[error("Invalid value for `{key}`: expected {expected}")]
    InvalidValue { key: String, expected: &'static str },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub top_words: usize,
    pub keyword_limit: usize,
    pub reading_wpm: usize,
    pub speaking_wpm: usize,
    pub no_revision_sentinel: String,
    pub log_level: String,
    pub log_path: PathBuf,
}

fn home_dir() -> PathBuf {
    PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
}

impl Default for Config {
    fn default() -> Self {
        let options = MetricsOptions::default();
        Self {
            top_words: options.top_words,
            keyword_limit: 10,
            reading_wpm: options.reading_wpm,
            speaking_wpm: options.speaking_wpm,
            no_revision_sentinel: NO_REVISION_NEEDED.to_string(),
            log_level: "info".to_string(),
            log_path: home_dir().join(".local/share/opengrammar/opengrammar.log"),
        }
    }
}

impl Config {
    pub fn default_path() -> PathBuf {
        home_dir().join(".config/opengrammar/config.toml")
    }

    /// Load from `path`, falling back to defaults when the file does not exist.
    /// Keys missing from the file keep their default values.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Config::default();
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(config);
        }

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let doc = contents.parse::<DocumentMut>()?;

        if let Some(value) = read_count(&doc, "metrics", "top_words")? {
            config.top_words = value;
        }
        if let Some(value) = read_count(&doc, "metrics", "keyword_limit")? {
            config.keyword_limit = value;
        }
        if let Some(value) = read_count(&doc, "metrics", "reading_wpm")? {
            config.reading_wpm = value;
        }
        if let Some(value) = read_count(&doc, "metrics", "speaking_wpm")? {
            config.speaking_wpm = value;
        }
        if let Some(value) = read_str(&doc, "corrections", "no_revision_sentinel")? {
            config.no_revision_sentinel = value;
        }
        if let Some(value) = read_str(&doc, "logging", "level")? {
            config.log_level = value;
        }
        if let Some(value) = read_str(&doc, "logging", "path")? {
            config.log_path = PathBuf::from(value);
        }

        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_error = |source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        fs::write(path, self.to_document().to_string()).map_err(io_error)?;
        Ok(())
    }

    pub fn metrics_options(&self) -> MetricsOptions {
        MetricsOptions {
            top_words: self.top_words,
            reading_wpm: self.reading_wpm,
            speaking_wpm: self.speaking_wpm,
        }
    }

    fn to_document(&self) -> DocumentMut {
        let mut doc = DocumentMut::new();
        doc["metrics"] = toml_edit::table();
        doc["metrics"]["top_words"] = toml_edit::value(self.top_words as i64);
        doc["metrics"]["keyword_limit"] = toml_edit::value(self.keyword_limit as i64);
        doc["metrics"]["reading_wpm"] = toml_edit::value(self.reading_wpm as i64);
        doc["metrics"]["speaking_wpm"] = toml_edit::value(self.speaking_wpm as i64);

        doc["corrections"] = toml_edit::table();
        doc["corrections"]["no_revision_sentinel"] =
            toml_edit::value(self.no_revision_sentinel.as_str());

        doc["logging"] = toml_edit::table();
        doc["logging"]["level"] = toml_edit::value(self.log_level.as_str());
        doc["logging"]["path"] = toml_edit::value(self.log_path.to_string_lossy().to_string());
        doc
    }
}

fn lookup<'a>(doc: &'a DocumentMut, table: &str, key: &str) -> Option<&'a Item> {
    doc.get(table).and_then(|t| t.get(key))
}

fn read_count(doc: &DocumentMut, table: &str, key: &str) -> Result<Option<usize>, ConfigError> {
    let Some(item) = lookup(doc, table, key) else {
        return Ok(None);
    };
    item.as_integer()
        .and_then(|v| usize::try_from(v).ok())
        .map(Some)
        .ok_or_else(|| ConfigError::InvalidValue {
            key: format!("{}.{}", table, key),
            expected: "a non-negative integer",
        })
}

fn read_str(doc: &DocumentMut, table: &str, key: &str) -> Result<Option<String>, ConfigError> {
    let Some(item) = lookup(doc, table, key) else {
        return Ok(None);
    };
    item.as_str()
        .map(|s| Some(s.to_string()))
        .ok_or_else(|| ConfigError::InvalidValue {
            key: format!("{}.{}", table, key),
            expected: "a string",
        })
}
