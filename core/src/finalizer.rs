//! Terminal call of a chain.

use chainwords_types::Value;

use crate::function::Function;
use crate::snapshot::Snapshot;

/// Calls the wrapped function with a snapshot's arguments, filling its gaps.
///
/// Gap positions are recorded once, at construction. Call-time arguments fill those
/// gaps left to right; any surplus is appended after the snapshot's arguments.
/// Positions set before finalization are never overwritten.
pub struct Finalizer<R> {
    function: Function<R>,
    args: Snapshot,
    gaps: Vec<usize>,
}

impl<R> Finalizer<R> {
    #[must_use]
    pub fn new(function: Function<R>, args: Snapshot) -> Self {
        let gaps = args.gaps();
        Self {
            function,
            args,
            gaps,
        }
    }

    #[must_use]
    pub fn gaps(&self) -> &[usize] {
        &self.gaps
    }

    pub fn call<V: Into<Value>>(&self, args: impl IntoIterator<Item = V>) -> R {
        let args = self.complete(args);
        self.function.call(args)
    }

    /// Like [`Finalizer::call`], binding `receiver` as the function's subject.
    pub fn call_with<V: Into<Value>>(
        &self,
        receiver: &mut Value,
        args: impl IntoIterator<Item = V>,
    ) -> R {
        let args = self.complete(args);
        self.function.call_with(receiver, args)
    }

    /// Borrow the finalizer as a one-argument function, e.g. for `Iterator::map`.
    pub fn unary<V: Into<Value>>(&self) -> impl Fn(V) -> R + '_ {
        move |arg| self.call([arg])
    }

    fn complete<V: Into<Value>>(&self, args: impl IntoIterator<Item = V>) -> Vec<Value> {
        let mut supplied = args.into_iter().map(Into::into);
        let mut complete = self.args.args().to_vec();
        for &pos in &self.gaps {
            match supplied.next() {
                Some(arg) => complete[pos] = arg,
                None => break,
            }
        }
        complete.extend(supplied);
        tracing::trace!(
            gaps = self.gaps.len(),
            args = complete.len(),
            "Finalizing chain"
        );
        complete
    }
}

impl<R> Clone for Finalizer<R> {
    fn clone(&self) -> Self {
        Self {
            function: self.function.clone(),
            args: self.args.clone(),
            gaps: self.gaps.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chainwords_types::{Value, set};

    use super::Finalizer;
    use crate::function::Function;
    use crate::snapshot::Snapshot;

    fn echo() -> Function<Vec<Value>> {
        Function::new(2, |call| call.into_args())
    }

    #[test]
    fn fills_gaps_in_order() {
        let finalizer = Finalizer::new(
            echo(),
            Snapshot::new(vec![Value::Unset, 2.into(), Value::Unset]),
        );
        assert_eq!(finalizer.gaps(), &[0, 2]);
        assert_eq!(
            finalizer.call([1, 3]),
            vec![Value::Int(1), Value::Int(2), Value::Int(3)]
        );
    }

    #[test]
    fn surplus_args_are_appended() {
        let finalizer = Finalizer::new(echo(), Snapshot::new(vec![1.into(), Value::Unset]));
        assert_eq!(
            finalizer.call([2, 3, 4]),
            vec![Value::Int(1), Value::Int(2), Value::Int(3), Value::Int(4)]
        );
    }

    #[test]
    fn unfilled_gaps_stay_unset() {
        let finalizer = Finalizer::new(echo(), Snapshot::unset(2));
        assert_eq!(finalizer.call([1]), vec![Value::Int(1), Value::Unset]);
    }

    #[test]
    fn set_positions_are_never_overwritten() {
        let finalizer = Finalizer::new(echo(), Snapshot::new(vec![1.into(), 2.into()]));
        assert_eq!(
            finalizer.call([9]),
            vec![Value::Int(1), Value::Int(2), Value::Int(9)]
        );
    }

    #[test]
    fn explicit_null_is_not_a_gap() {
        let finalizer = Finalizer::new(echo(), Snapshot::new(vec![Value::Null, Value::Unset]));
        assert_eq!(finalizer.gaps(), &[1]);
    }

    #[test]
    fn unary_maps_over_values() {
        let sum = Function::new(2, |call| {
            call.args().iter().filter_map(Value::as_i64).sum::<i64>()
        });
        let finalizer = Finalizer::new(sum, Snapshot::new(vec![Value::Unset, 3.into()]));
        let mapped: Vec<i64> = [1, 2, 3].into_iter().map(finalizer.unary()).collect();
        assert_eq!(mapped, vec![4, 5, 6]);
    }

    #[test]
    fn receiver_is_forwarded() {
        let store = Function::new(2, |mut call| {
            let key = call.arg(0).as_str().map(ToString::to_string);
            let value = call.arg(1).clone();
            if let (Some(receiver), Some(key)) = (call.receiver(), key) {
                *receiver = set(receiver, key, value);
            }
        });
        let finalizer = Finalizer::new(store, Snapshot::new(vec!["foo".into(), Value::Unset]));
        let mut subject = Value::empty_map();
        finalizer.call_with(&mut subject, ["bar"]);
        assert_eq!(subject, Value::map([("foo", "bar")]));
    }
}
