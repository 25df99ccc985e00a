//! Callable-chain calling convention.

use std::fmt;

use chainwords_types::Value;

use crate::chain::{Chain, ChainNode, Connective};
use crate::error::ChainError;
use crate::finalizer::Finalizer;
use crate::snapshot::Snapshot;

/// A chain node that is itself the terminal call.
///
/// Same state machine as [`Chain`]; the node carries its finalizer, so
/// `node.call(args)` plays the role of `chain.finalize(args)` and the node can be
/// handed to `Iterator::map` through [`CallableChain::unary`].
pub struct CallableChain<R> {
    chain: Chain<R>,
    finalizer: Finalizer<R>,
}

impl<R> CallableChain<R> {
    #[must_use]
    pub fn new(chain: Chain<R>) -> Self {
        let finalizer = chain.finalizer();
        Self { chain, finalizer }
    }

    #[must_use]
    pub fn as_chain(&self) -> &Chain<R> {
        &self.chain
    }

    #[must_use]
    pub fn into_chain(self) -> Chain<R> {
        self.chain
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.chain.words()
    }

    pub fn invoke<V: Into<Value>>(
        &self,
        word: &str,
        args: impl IntoIterator<Item = V>,
    ) -> Result<Self, ChainError> {
        self.chain.invoke(word, args).map(Self::new)
    }

    pub fn word(&self, word: &str, value: impl Into<Value>) -> Result<Self, ChainError> {
        self.chain.word(word, value).map(Self::new)
    }

    pub fn alias(&self, name: &str) -> Result<Connective<'_, Self>, ChainError> {
        Ok(match self.chain.alias(name)? {
            Connective::Node(_) => Connective::Node(self),
            Connective::Namespace(_) => Connective::Namespace(self),
        })
    }

    pub fn call<V: Into<Value>>(&self, args: impl IntoIterator<Item = V>) -> R {
        self.finalizer.call(args)
    }

    pub fn call_with<V: Into<Value>>(
        &self,
        receiver: &mut Value,
        args: impl IntoIterator<Item = V>,
    ) -> R {
        self.finalizer.call_with(receiver, args)
    }

    pub fn unary<V: Into<Value>>(&self) -> impl Fn(V) -> R + '_ {
        self.finalizer.unary()
    }
}

impl<R> From<Chain<R>> for CallableChain<R> {
    fn from(chain: Chain<R>) -> Self {
        Self::new(chain)
    }
}

impl<R> Clone for CallableChain<R> {
    fn clone(&self) -> Self {
        Self {
            chain: self.chain.clone(),
            finalizer: self.finalizer.clone(),
        }
    }
}

impl<R> fmt::Debug for CallableChain<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CallableChain").field(&self.chain).finish()
    }
}

impl<R> ChainNode for CallableChain<R> {
    type Output = R;

    fn snapshot(&self) -> &Snapshot {
        self.chain.snapshot()
    }

    fn invoke<V: Into<Value>>(
        &self,
        word: &str,
        args: impl IntoIterator<Item = V>,
    ) -> Result<Self, ChainError> {
        CallableChain::invoke(self, word, args)
    }

    fn alias(&self, name: &str) -> Result<Connective<'_, Self>, ChainError> {
        CallableChain::alias(self, name)
    }

    fn finalize<V: Into<Value>>(&self, args: impl IntoIterator<Item = V>) -> R {
        self.call(args)
    }
}
