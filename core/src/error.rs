use thiserror::Error;

/// Errors raised while navigating a chain.
///
/// Errors from the wrapped function itself are never wrapped here; they are part of
/// the function's own return type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("unknown chain-word `{word}`")]
    UnknownWord { word: String },
    #[error("`{name}` is not a configured language chain")]
    UnknownAlias { name: String },
    #[error("a language chain named after a chain-word exposes only chain-words")]
    NamespaceNotTerminal,
}
