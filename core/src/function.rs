//! The wrapped function and its call frame.

use std::fmt;
use std::sync::Arc;

use chainwords_types::{UNSET, Value};

type Body<R> = Arc<dyn Fn(Call<'_>) -> R + Send + Sync>;

/// An ordinary function with a declared arity.
///
/// The arity sizes the initial argument snapshot of a chain. The body may receive
/// more or fewer arguments than declared.
pub struct Function<R> {
    arity: usize,
    body: Body<R>,
}

impl<R> Function<R> {
    pub fn new(arity: usize, body: impl Fn(Call<'_>) -> R + Send + Sync + 'static) -> Self {
        Self {
            arity,
            body: Arc::new(body),
        }
    }

    #[must_use]
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Call the function without a receiver.
    pub fn call(&self, args: Vec<Value>) -> R {
        (self.body)(Call {
            receiver: None,
            args,
        })
    }

    /// Call the function with `receiver` bound as its subject.
    pub fn call_with(&self, receiver: &mut Value, args: Vec<Value>) -> R {
        (self.body)(Call {
            receiver: Some(receiver),
            args,
        })
    }
}

impl<R> Clone for Function<R> {
    fn clone(&self) -> Self {
        Self {
            arity: self.arity,
            body: Arc::clone(&self.body),
        }
    }
}

impl<R> fmt::Debug for Function<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// Arguments and optional receiver of a single function call.
#[derive(Debug)]
pub struct Call<'r> {
    receiver: Option<&'r mut Value>,
    args: Vec<Value>,
}

impl Call<'_> {
    #[must_use]
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Argument at `index`, or `Unset` if it was not passed.
    #[must_use]
    pub fn arg(&self, index: usize) -> &Value {
        self.args.get(index).unwrap_or(&UNSET)
    }

    /// The subject the caller bound for this call, if any.
    pub fn receiver(&mut self) -> Option<&mut Value> {
        self.receiver.as_deref_mut()
    }

    #[must_use]
    pub fn into_args(self) -> Vec<Value> {
        self.args
    }
}

#[cfg(test)]
mod tests {
    use chainwords_types::Value;

    use super::Function;

    #[test]
    fn call_passes_args_through() {
        let sum = Function::new(2, |call| {
            call.args().iter().filter_map(Value::as_i64).sum::<i64>()
        });
        assert_eq!(sum.arity(), 2);
        assert_eq!(sum.call(vec![3.into(), 4.into(), 5.into()]), 12);
    }

    #[test]
    fn missing_arg_reads_unset() {
        let second = Function::new(2, |call| call.arg(1).clone());
        assert!(second.call(vec![1.into()]).is_unset());
    }

    #[test]
    fn call_with_exposes_receiver() {
        let tag = Function::new(0, |mut call| {
            if let Some(receiver) = call.receiver() {
                *receiver = Value::from("tagged");
            }
        });
        let mut subject = Value::Null;
        tag.call_with(&mut subject, Vec::new());
        assert_eq!(subject, Value::from("tagged"));
    }

    #[test]
    fn call_without_receiver_sees_none() {
        let probe = Function::new(0, |mut call| call.receiver().is_some());
        assert!(!probe.call(Vec::new()));
    }
}
