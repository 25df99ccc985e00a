//! TOML chain definitions.
//!
//! ```toml
//! aliases = ["and", "with"]
//! defaults = ["seed"]
//!
//! [words.foo]
//! arg = 0
//!
//! [words.color]
//! arg = "1.style"
//! updater = "merge_key"
//! key = "color"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use chainwords_core::updaters::{append, append_all, at_path, merge, merge_key, replace};
use chainwords_core::{Chain, ChainConfig, ChainWord, Function};
use chainwords_types::{Path, Value};
use serde::Deserialize;

use crate::error::ConfigError;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawChainDefinition {
    #[serde(default)]
    aliases: Vec<String>,
    defaults: Option<Vec<Value>>,
    #[serde(default)]
    words: BTreeMap<String, RawWord>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawWord {
    #[serde(default)]
    arg: RawPath,
    #[serde(default)]
    updater: UpdaterKind,
    key: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawPath {
    Index(i64),
    Dotted(String),
}

impl Default for RawPath {
    fn default() -> Self {
        RawPath::Index(0)
    }
}

impl From<RawPath> for Path {
    fn from(raw: RawPath) -> Self {
        match raw {
            RawPath::Index(index) => Path::from(index),
            RawPath::Dotted(dotted) => Path::from(dotted),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum UpdaterKind {
    #[default]
    Replace,
    Merge,
    Append,
    AppendAll,
    MergeKey,
}

/// The updater a configured word applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdaterSpec {
    Replace,
    Merge,
    Append,
    AppendAll,
    MergeKey(String),
}

impl UpdaterSpec {
    fn at(&self, path: Path) -> ChainWord {
        match self {
            UpdaterSpec::Replace => at_path(path, replace),
            UpdaterSpec::Merge => at_path(path, merge),
            UpdaterSpec::Append => at_path(path, append),
            UpdaterSpec::AppendAll => at_path(path, append_all),
            UpdaterSpec::MergeKey(key) => at_path(path, merge_key(key.clone())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordDefinition {
    pub arg: Path,
    pub updater: UpdaterSpec,
}

/// A validated chain definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainDefinition {
    pub aliases: Vec<String>,
    pub defaults: Option<Vec<Value>>,
    pub words: BTreeMap<String, WordDefinition>,
}

impl TryFrom<RawChainDefinition> for ChainDefinition {
    type Error = ConfigError;

    fn try_from(raw: RawChainDefinition) -> Result<Self, Self::Error> {
        let mut words = BTreeMap::new();
        for (name, word) in raw.words {
            let updater = match word.updater {
                UpdaterKind::Replace => UpdaterSpec::Replace,
                UpdaterKind::Merge => UpdaterSpec::Merge,
                UpdaterKind::Append => UpdaterSpec::Append,
                UpdaterKind::AppendAll => UpdaterSpec::AppendAll,
                UpdaterKind::MergeKey => match word.key {
                    Some(key) => UpdaterSpec::MergeKey(key),
                    None => return Err(ConfigError::MissingKey { word: name }),
                },
            };
            let arg = Path::from(word.arg);
            words.insert(name, WordDefinition { arg, updater });
        }
        Ok(Self {
            aliases: raw.aliases,
            defaults: raw.defaults,
            words,
        })
    }
}

impl ChainDefinition {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let raw: RawChainDefinition =
            toml::from_str(content).map_err(|source| ConfigError::Parse { path: None, source })?;
        Self::try_from(raw)
    }

    /// Read and validate the definition stored at `path`.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read chain definition at {:?}: {}", path, err);
                return Err(ConfigError::Read { path, source: err });
            }
        };

        let raw: RawChainDefinition = match toml::from_str(&content) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!("Failed to parse chain definition at {:?}: {}", path, err);
                return Err(ConfigError::Parse {
                    path: Some(path),
                    source: err,
                });
            }
        };

        match Self::try_from(raw) {
            Ok(definition) => {
                tracing::debug!(
                    path = %path.display(),
                    words = definition.words.len(),
                    aliases = definition.aliases.len(),
                    "Loaded chain definition"
                );
                Ok(definition)
            }
            Err(err) => {
                tracing::warn!("Invalid chain definition at {:?}: {}", path, err);
                Err(err)
            }
        }
    }

    #[must_use]
    pub fn into_config(self) -> ChainConfig {
        let mut config = self
            .words
            .into_iter()
            .fold(ChainConfig::new(), |config, (name, word)| {
                let chain_word = word.updater.at(word.arg);
                config.word(name, chain_word)
            })
            .aliases(self.aliases);
        if let Some(defaults) = self.defaults {
            config = config.with_defaults(defaults);
        }
        config
    }

    /// Wrap `function` in a chain described by this definition.
    #[must_use]
    pub fn into_chain<R>(self, function: Function<R>) -> Chain<R> {
        Chain::head(function, self.into_config())
    }
}
