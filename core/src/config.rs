//! Chain configuration.

use std::collections::BTreeMap;
use std::fmt;

use chainwords_types::Value;

use crate::updaters::ChainWord;

/// Chain-words, default arguments and language-chain aliases for one chain.
///
/// Defaults and aliases are separate fields, so neither can ever be mistaken for a
/// chain-word. A configuration is shared read-only by every node of a chain.
#[derive(Clone, Default)]
pub struct ChainConfig {
    words: BTreeMap<String, ChainWord>,
    defaults: Option<Vec<Value>>,
    aliases: Vec<String>,
}

impl ChainConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the chain-word `name`.
    #[must_use]
    pub fn word(mut self, name: impl Into<String>, word: ChainWord) -> Self {
        self.words.insert(name.into(), word);
        self
    }

    #[must_use]
    pub fn with_defaults(mut self, defaults: Vec<Value>) -> Self {
        self.defaults = Some(defaults);
        self
    }

    /// Append a language-chain alias. Duplicates are ignored.
    #[must_use]
    pub fn alias(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.aliases.contains(&name) {
            self.aliases.push(name);
        }
        self
    }

    #[must_use]
    pub fn aliases(self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        names.into_iter().fold(self, ChainConfig::alias)
    }

    /// Names of all chain-words, in order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.keys().map(String::as_str)
    }

    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&ChainWord> {
        self.words.get(name)
    }

    #[must_use]
    pub fn has_word(&self, name: &str) -> bool {
        self.words.contains_key(name)
    }

    #[must_use]
    pub fn defaults(&self) -> Option<&[Value]> {
        self.defaults.as_deref()
    }

    #[must_use]
    pub fn alias_names(&self) -> &[String] {
        &self.aliases
    }

    #[must_use]
    pub fn has_alias(&self, name: &str) -> bool {
        self.aliases.iter().any(|alias| alias == name)
    }
}

impl fmt::Debug for ChainConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainConfig")
            .field("words", &self.words.keys().collect::<Vec<_>>())
            .field("defaults", &self.defaults)
            .field("aliases", &self.aliases)
            .finish()
    }
}
