//! Run configuration
//!
//! Loaded from a TOML file; every key is optional and falls back to the
//! built-in defaults.
//!
//! ```toml
//! source_language = "en"
//! request_delay_ms = 10
//! files = ["mem-01-b.xml", "mem-02-ch.xml"]
//!
//! [[languages]]
//! code = "de"
//! provider_code = "de"
//!
//! [[languages]]
//! code = "zh-HK"
//! provider_code = "zh-TW"
//! substitutions = [["克林貢", "克林崗"]]
//! ```

use crate::dictionary::{Language, LanguageMap};
use crate::error::{Error, Result};
use crate::mt::translator::validate_locale;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Entry files of the dictionary; the header and footer files hold no entries
const DEFAULT_FILES: &[&str] = &[
    "mem-01-b.xml",
    "mem-02-ch.xml",
    "mem-03-D.xml",
    "mem-04-gh.xml",
    "mem-05-H.xml",
    "mem-06-j.xml",
    "mem-07-l.xml",
    "mem-08-m.xml",
    "mem-09-n.xml",
    "mem-10-ng.xml",
    "mem-11-p.xml",
    "mem-12-q.xml",
    "mem-13-Q.xml",
    "mem-14-r.xml",
    "mem-15-S.xml",
    "mem-16-t.xml",
    "mem-17-tlh.xml",
    "mem-18-v.xml",
    "mem-19-w.xml",
    "mem-20-y.xml",
    "mem-21-a.xml",
    "mem-22-e.xml",
    "mem-23-I.xml",
    "mem-24-o.xml",
    "mem-25-u.xml",
    "mem-26-suffixes.xml",
    "mem-27-extra.xml",
    "mem-28-examples.xml",
];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Language of the `definition` and `notes` fields
    pub source_language: String,
    /// Pause after every provider call
    pub request_delay_ms: u64,
    /// Files to rewrite, in order, when none are given on the command line
    pub files: Vec<PathBuf>,
    /// Supported target languages
    pub languages: Vec<Language>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: "en".to_string(),
            request_delay_ms: 10,
            files: DEFAULT_FILES.iter().map(PathBuf::from).collect(),
            languages: LanguageMap::default().languages().to_vec(),
        }
    }
}

impl Config {
    /// Looked up in the working directory when no `--config` is given
    pub const DEFAULT_FILE_NAME: &'static str = "mem-translate.toml";

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            Error::Config(msg) => Error::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// An explicit path must exist; otherwise use `mem-translate.toml` if present,
    /// else the defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            info!("Loading configuration from {}", path.display());
            return Self::from_file(path);
        }

        let default_path = Path::new(Self::DEFAULT_FILE_NAME);
        if default_path.exists() {
            info!("Loading configuration from {}", default_path.display());
            return Self::from_file(default_path);
        }

        debug!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    pub fn validate(&self) -> Result<()> {
        validate_locale(&self.source_language)
            .map_err(|e| Error::Config(format!("source_language: {}", e)))?;

        let mut seen = HashSet::new();
        for language in &self.languages {
            validate_locale(&language.code)
                .and_then(|_| validate_locale(&language.provider_code))
                .map_err(|e| Error::Config(format!("language '{}': {}", language.code, e)))?;
            if !seen.insert(language.code.as_str()) {
                return Err(Error::Config(format!(
                    "language '{}' is listed twice",
                    language.code
                )));
            }
            if language.substitutions.iter().any(|(from, _)| from.is_empty()) {
                return Err(Error::Config(format!(
                    "language '{}': substitution with an empty pattern",
                    language.code
                )));
            }
        }

        Ok(())
    }

    pub fn language_map(&self) -> LanguageMap {
        LanguageMap::new(self.languages.clone())
    }
}
