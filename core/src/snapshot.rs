//! Immutable argument snapshots.

use chainwords_types::{Path, UNSET, Value, path};

/// The ordered arguments collected so far by a chain node.
///
/// Positions not yet filled hold [`Value::Unset`]. A snapshot is never changed in
/// place: [`Snapshot::update`] returns a successor and leaves `self` untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot(Vec<Value>);

impl Snapshot {
    #[must_use]
    pub fn new(args: Vec<Value>) -> Self {
        Self(args)
    }

    /// A snapshot of `arity` unset positions.
    #[must_use]
    pub fn unset(arity: usize) -> Self {
        Self(vec![Value::Unset; arity])
    }

    /// Start from `defaults`, padded with unset positions up to `arity`.
    #[must_use]
    pub fn from_defaults(defaults: &[Value], arity: usize) -> Self {
        let mut args = defaults.to_vec();
        if args.len() < arity {
            args.resize(arity, Value::Unset);
        }
        Self(args)
    }

    #[must_use]
    pub fn args(&self) -> &[Value] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn into_args(self) -> Vec<Value> {
        self.0
    }

    /// Positions still holding `Unset`, in order.
    #[must_use]
    pub fn gaps(&self) -> Vec<usize> {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(pos, arg)| arg.is_unset().then_some(pos))
            .collect()
    }

    /// Read the value at `index`; the first path component selects the argument.
    pub fn get(&self, index: impl Into<Path>) -> &Value {
        let index = index.into();
        let Some((head, rest)) = index.keys().split_first() else {
            return &UNSET;
        };
        match head.position(self.0.len()).and_then(|pos| self.0.get(pos)) {
            Some(slot) => path::get(slot, Path::new(rest.to_vec())),
            None => &UNSET,
        }
    }

    /// Return a successor with the value at `index` replaced by `updater(old)`.
    ///
    /// The first component of `index` must address an argument position; writing
    /// past the end extends the snapshot with unset positions, up to
    /// [`MAX_LIST_GAP`](path::MAX_LIST_GAP) of them. A path that names no such
    /// position leaves the snapshot unchanged.
    #[must_use]
    pub fn update(&self, index: &Path, updater: impl FnOnce(&Value) -> Value) -> Snapshot {
        let Some((head, rest)) = index.keys().split_first() else {
            tracing::warn!("Ignoring chain-word update with an empty path");
            return self.clone();
        };
        let Some(pos) = head.write_position(self.0.len()) else {
            tracing::warn!(path = %index, "Chain-word path does not address an argument position");
            return self.clone();
        };

        let rest = Path::new(rest.to_vec());
        let slot = self.0.get(pos).unwrap_or(&UNSET);
        let replacement = path::set(slot, &rest, updater(path::get(slot, &rest)));

        let mut args = self.0.clone();
        if pos >= args.len() {
            args.resize(pos + 1, Value::Unset);
        }
        args[pos] = replacement;
        Self(args)
    }
}

impl From<Vec<Value>> for Snapshot {
    fn from(args: Vec<Value>) -> Self {
        Self(args)
    }
}

impl From<Snapshot> for Value {
    fn from(snapshot: Snapshot) -> Self {
        Value::List(snapshot.0)
    }
}
