//! Chain nodes.
//!
//! A [`Chain`] pairs the shared function and configuration with the node's own
//! argument snapshot. Invoking a chain-word looks the word up in the shared table,
//! applies it to this node's snapshot, and returns a new node; the receiver is
//! never modified. Nodes keep no reference to their parent, so long chains drop
//! without recursion.

use std::fmt;
use std::iter;
use std::sync::Arc;

use chainwords_types::Value;

use crate::config::ChainConfig;
use crate::error::ChainError;
use crate::finalizer::Finalizer;
use crate::function::Function;
use crate::snapshot::Snapshot;

/// The operations shared by both chain calling conventions.
pub trait ChainNode: Sized {
    type Output;

    fn snapshot(&self) -> &Snapshot;

    /// Apply the chain-word `word` to this node's snapshot.
    fn invoke<V: Into<Value>>(
        &self,
        word: &str,
        args: impl IntoIterator<Item = V>,
    ) -> Result<Self, ChainError>;

    /// Resolve the language-chain alias `name` on this node.
    fn alias(&self, name: &str) -> Result<Connective<'_, Self>, ChainError>;

    /// Call the wrapped function, filling unset positions from `args`.
    fn finalize<V: Into<Value>>(&self, args: impl IntoIterator<Item = V>) -> Self::Output;

    /// Invoke a chain-word with a single argument.
    fn word(&self, word: &str, value: impl Into<Value>) -> Result<Self, ChainError> {
        self.invoke(word, iter::once(value.into()))
    }

    /// Finalize without call-time arguments.
    fn done(&self) -> Self::Output {
        self.finalize(iter::empty::<Value>())
    }
}

/// What a language-chain alias resolves to.
///
/// An alias that shares its name with no chain-word passes straight through to the
/// node it was read from. An alias whose name is also a chain-word becomes a
/// namespace exposing only the chain-words, so `alias("with")?.word("with", ..)`
/// and `alias("with")?.word("other", ..)` both act on the original node.
pub enum Connective<'a, N> {
    Node(&'a N),
    Namespace(&'a N),
}

impl<'a, N: ChainNode> Connective<'a, N> {
    pub fn invoke<V: Into<Value>>(
        &self,
        word: &str,
        args: impl IntoIterator<Item = V>,
    ) -> Result<N, ChainError> {
        match *self {
            Connective::Node(node) | Connective::Namespace(node) => node.invoke(word, args),
        }
    }

    pub fn word(&self, word: &str, value: impl Into<Value>) -> Result<N, ChainError> {
        self.invoke(word, iter::once(value.into()))
    }

    /// Chain another alias; only pass-through aliases expose further aliases.
    pub fn alias(&self, name: &str) -> Result<Connective<'a, N>, ChainError> {
        match *self {
            Connective::Node(node) => node.alias(name),
            Connective::Namespace(_) => Err(ChainError::UnknownAlias {
                name: name.to_string(),
            }),
        }
    }

    /// Finalize the node behind a pass-through alias.
    pub fn finalize<V: Into<Value>>(
        &self,
        args: impl IntoIterator<Item = V>,
    ) -> Result<N::Output, ChainError> {
        match *self {
            Connective::Node(node) => Ok(node.finalize(args)),
            Connective::Namespace(_) => Err(ChainError::NamespaceNotTerminal),
        }
    }

    pub fn done(&self) -> Result<N::Output, ChainError> {
        self.finalize(iter::empty::<Value>())
    }

    /// The node behind a pass-through alias.
    #[must_use]
    pub fn node(&self) -> Option<&'a N> {
        match *self {
            Connective::Node(node) => Some(node),
            Connective::Namespace(_) => None,
        }
    }

    #[must_use]
    pub fn is_namespace(&self) -> bool {
        matches!(self, Connective::Namespace(_))
    }
}

struct Shared<R> {
    function: Function<R>,
    config: ChainConfig,
}

/// A chain node: chain-words plus a separate terminal [`Chain::finalize`].
pub struct Chain<R> {
    shared: Arc<Shared<R>>,
    snapshot: Snapshot,
}

impl<R> Chain<R> {
    /// Build the head of a chain.
    ///
    /// The head starts from the configured defaults, padded with unset positions up
    /// to the function's arity, or from `arity` unset positions.
    #[must_use]
    pub fn head(function: Function<R>, config: ChainConfig) -> Self {
        let snapshot = match config.defaults() {
            Some(defaults) => Snapshot::from_defaults(defaults, function.arity()),
            None => Snapshot::unset(function.arity()),
        };
        Self::with_snapshot(function, config, snapshot)
    }

    #[must_use]
    pub fn with_snapshot(function: Function<R>, config: ChainConfig, snapshot: Snapshot) -> Self {
        Self {
            shared: Arc::new(Shared { function, config }),
            snapshot,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    #[must_use]
    pub fn config(&self) -> &ChainConfig {
        &self.shared.config
    }

    #[must_use]
    pub fn function(&self) -> &Function<R> {
        &self.shared.function
    }

    /// Names of the chain-words this node exposes.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.shared.config.words()
    }

    pub fn invoke<V: Into<Value>>(
        &self,
        word: &str,
        args: impl IntoIterator<Item = V>,
    ) -> Result<Self, ChainError> {
        let Some(apply) = self.shared.config.lookup(word) else {
            tracing::warn!(word, "Unknown chain-word");
            return Err(ChainError::UnknownWord {
                word: word.to_string(),
            });
        };
        let args: Vec<Value> = args.into_iter().map(Into::into).collect();
        tracing::trace!(word, args = args.len(), "Invoking chain-word");
        Ok(self.advance(apply(&self.snapshot, &args)))
    }

    pub fn word(&self, word: &str, value: impl Into<Value>) -> Result<Self, ChainError> {
        self.invoke(word, iter::once(value.into()))
    }

    pub fn alias(&self, name: &str) -> Result<Connective<'_, Self>, ChainError> {
        let config = &self.shared.config;
        if !config.has_alias(name) {
            tracing::warn!(alias = name, "Unknown language chain");
            return Err(ChainError::UnknownAlias {
                name: name.to_string(),
            });
        }
        if config.has_word(name) {
            tracing::debug!(
                alias = name,
                "Language chain shares its name with a chain-word; exposing chain-words through it"
            );
            Ok(Connective::Namespace(self))
        } else {
            Ok(Connective::Node(self))
        }
    }

    #[must_use]
    pub fn finalizer(&self) -> Finalizer<R> {
        Finalizer::new(self.shared.function.clone(), self.snapshot.clone())
    }

    pub fn finalize<V: Into<Value>>(&self, args: impl IntoIterator<Item = V>) -> R {
        self.finalizer().call(args)
    }

    /// Finalize with `receiver` bound as the function's subject.
    pub fn finalize_with<V: Into<Value>>(
        &self,
        receiver: &mut Value,
        args: impl IntoIterator<Item = V>,
    ) -> R {
        self.finalizer().call_with(receiver, args)
    }

    pub fn done(&self) -> R {
        self.finalize(iter::empty::<Value>())
    }

    fn advance(&self, snapshot: Snapshot) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            snapshot,
        }
    }
}

impl<R> Clone for Chain<R> {
    fn clone(&self) -> Self {
        self.advance(self.snapshot.clone())
    }
}

impl<R> fmt::Debug for Chain<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("function", &self.shared.function)
            .field("config", &self.shared.config)
            .field("snapshot", &self.snapshot)
            .finish()
    }
}

impl<R> ChainNode for Chain<R> {
    type Output = R;

    fn snapshot(&self) -> &Snapshot {
        Chain::snapshot(self)
    }

    fn invoke<V: Into<Value>>(
        &self,
        word: &str,
        args: impl IntoIterator<Item = V>,
    ) -> Result<Self, ChainError> {
        Chain::invoke(self, word, args)
    }

    fn alias(&self, name: &str) -> Result<Connective<'_, Self>, ChainError> {
        Chain::alias(self, name)
    }

    fn finalize<V: Into<Value>>(&self, args: impl IntoIterator<Item = V>) -> R {
        Chain::finalize(self, args)
    }
}
