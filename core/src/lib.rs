//! Chain-state engine for chainwords.
//!
//! Wraps an ordinary [`Function`] in an immutable chain of nodes. Each configured
//! chain-word applies an updater to the node's argument [`Snapshot`] and returns a
//! fresh node; finalizing fills the remaining gaps from call-time arguments and
//! invokes the function.
//!
//! ```
//! use chainwords_core::{Chain, ChainConfig, ChainError, Function, updaters};
//! use chainwords_types::Value;
//!
//! # fn main() -> Result<(), ChainError> {
//! let pair = Function::new(2, |call| Value::List(call.into_args()));
//! let config = ChainConfig::new()
//!     .word("foo", updaters::at_path(0, updaters::replace))
//!     .word("bar", updaters::at_path(1, updaters::replace))
//!     .alias("and");
//!
//! let head = Chain::head(pair, config);
//! let result = head.word("foo", 5)?.alias("and")?.word("bar", 10)?.done();
//! assert_eq!(result, Value::list([5, 10]));
//!
//! let partial = head.word("foo", 5)?;
//! assert_eq!(partial.alias("and")?.done()?, Value::list([Value::Int(5), Value::Unset]));
//! # Ok(())
//! # }
//! ```

mod callable;
mod chain;
mod config;
mod error;
mod finalizer;
mod function;
mod snapshot;
pub mod updaters;

pub use callable::CallableChain;
pub use chain::{Chain, ChainNode, Connective};
pub use config::ChainConfig;
pub use error::ChainError;
pub use finalizer::Finalizer;
pub use function::{Call, Function};
pub use snapshot::Snapshot;
pub use updaters::{ChainWord, Updater};
