//! Sentence-style chain builder.
//!
//! ```
//! use chainwords_config::curry;
//! use chainwords_core::{ChainError, Function};
//! use chainwords_types::Value;
//!
//! # fn main() -> Result<(), ChainError> {
//! let pair = Function::new(2, |call| Value::List(call.into_args()));
//! let chain = curry(pair)
//!     .r#where()
//!     .arg(0).has().setter("foo").and()
//!     .arg(1).has().options(["bar", "bazz"])
//!     .language(["with", "and"])
//!     .done();
//!
//! let result = chain.word("foo", "!")?.alias("with")?.word("bar", 3)?.done();
//! assert_eq!(
//!     result,
//!     Value::list([Value::from("!"), Value::map([("bar", 3)])])
//! );
//! # Ok(())
//! # }
//! ```
//!
//! Connectives (`and`, `has`, `with`, `that`, `where`) only make the definition
//! read like a sentence; they return the builder unchanged.

use chainwords_core::updaters::{at_path, merge, merge_key, replace};
use chainwords_core::{CallableChain, Chain, ChainConfig, ChainWord, Function};
use chainwords_types::{Path, Value, set};

/// Start describing a chain around `function`.
#[must_use]
pub fn curry<R>(function: Function<R>) -> Literate<R> {
    Literate::new(function)
}

/// Wrap `function` directly with an already-built configuration.
#[must_use]
pub fn for_function<R>(function: Function<R>, config: ChainConfig) -> Chain<R> {
    Chain::head(function, config)
}

/// Builder for a `(Function, ChainConfig)` pair.
///
/// Every chain-word is attached to the argument path selected by the most recent
/// [`Literate::arg`]; words declared before any `arg` target argument 0.
pub struct Literate<R> {
    function: Function<R>,
    config: ChainConfig,
    current: Path,
    defaults: Value,
}

impl<R> Literate<R> {
    #[must_use]
    pub fn new(function: Function<R>) -> Self {
        Self {
            function,
            config: ChainConfig::new(),
            current: Path::from(0),
            defaults: Value::Unset,
        }
    }

    #[must_use]
    pub fn and(self) -> Self {
        self
    }

    #[must_use]
    pub fn has(self) -> Self {
        self
    }

    #[must_use]
    pub fn with(self) -> Self {
        self
    }

    #[must_use]
    pub fn that(self) -> Self {
        self
    }

    #[must_use]
    pub fn r#where(self) -> Self {
        self
    }

    /// Select the argument path later words act on.
    #[must_use]
    pub fn arg(mut self, index: impl Into<Path>) -> Self {
        self.current = index.into();
        self
    }

    /// Add a word that replaces the current argument.
    #[must_use]
    pub fn setter(self, name: impl Into<String>) -> Self {
        self.setter_with(name, replace)
    }

    /// Add a word that applies `updater` to the current argument.
    #[must_use]
    pub fn setter_with(
        self,
        name: impl Into<String>,
        updater: impl Fn(&Value, Value) -> Value + Send + Sync + 'static,
    ) -> Self {
        let word = at_path(self.current.clone(), updater);
        self.declare(name.into(), word)
    }

    /// Add a word that sets the key `name` on the current argument.
    #[must_use]
    pub fn option(self, name: impl Into<String>) -> Self {
        let name = name.into();
        let word = at_path(self.current.clone(), merge_key(name.clone()));
        self.declare(name, word)
    }

    #[must_use]
    pub fn options(self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        names.into_iter().fold(self, Literate::option)
    }

    /// Add a word that merges a whole map of options into the current argument.
    #[must_use]
    pub fn sink(self, name: impl Into<String>) -> Self {
        let word = at_path(self.current.clone(), merge);
        self.declare(name.into(), word)
    }

    /// Append language-chain aliases.
    #[must_use]
    pub fn language(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.config = self.config.aliases(names);
        self
    }

    /// Seed the default value of the current argument path.
    #[must_use]
    pub fn defaults_to(mut self, value: impl Into<Value>) -> Self {
        self.defaults = set(&self.defaults, &self.current, value.into());
        self
    }

    /// Finish the description without wrapping the function.
    #[must_use]
    pub fn build(self) -> (Function<R>, ChainConfig) {
        let config = match self.defaults {
            Value::Unset => self.config,
            Value::List(defaults) => self.config.with_defaults(defaults),
            other => {
                tracing::warn!(
                    defaults = ?other,
                    "Ignoring defaults that do not address argument positions"
                );
                self.config
            }
        };
        (self.function, config)
    }

    /// Build the head of a chain with a separate terminal `finalize`.
    #[must_use]
    pub fn done(self) -> Chain<R> {
        let (function, config) = self.build();
        Chain::head(function, config)
    }

    /// Build the head of a chain whose nodes are themselves callable.
    #[must_use]
    pub fn done_callable(self) -> CallableChain<R> {
        self.done().into()
    }

    fn declare(mut self, name: String, word: ChainWord) -> Self {
        if self.config.has_word(&name) {
            tracing::debug!(word = %name, "Redeclaring chain-word");
        }
        self.config = self.config.word(name, word);
        self
    }
}

impl<R> Clone for Literate<R> {
    fn clone(&self) -> Self {
        Self {
            function: self.function.clone(),
            config: self.config.clone(),
            current: self.current.clone(),
            defaults: self.defaults.clone(),
        }
    }
}
