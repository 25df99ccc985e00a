//! Path addressing over nested values.
//!
//! A [`Path`] is a normalized sequence of [`Key`]s built from an integer, a dotted
//! string (`"1.x"`), or an explicit list of parts. Reads never fail: anything that
//! cannot be reached resolves to [`Value::Unset`]. Writes never mutate their input;
//! every level on the way down is copied and the missing ones are created.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use crate::value::{UNSET, Value};

const SEPARATOR: char = '.';

/// How many unset holes a write past the end of a list may open.
///
/// A write further out than this addresses no position, so it is handled like a
/// named key.
pub const MAX_LIST_GAP: usize = 1024;

/// One component of a [`Path`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Index(i64),
    Name(String),
}

impl Key {
    /// The key as a list position, if it is an integer or an integer-like name.
    #[must_use]
    pub fn as_index(&self) -> Option<i64> {
        match self {
            Key::Index(i) => Some(*i),
            Key::Name(name) => parse_index(name),
        }
    }

    /// The list position this key addresses in a sequence of `len` items.
    ///
    /// Negative indices wrap around from the end; keys that are not integer-like, or
    /// that wrap past the start, address no position.
    #[must_use]
    pub fn position(&self, len: usize) -> Option<usize> {
        self.as_index().and_then(|i| wrap(i, len))
    }

    /// The list position a write through this key may fill in a sequence of `len`
    /// items: a readable position, or one at most [`MAX_LIST_GAP`] holes past the end.
    #[must_use]
    pub fn write_position(&self, len: usize) -> Option<usize> {
        self.position(len)
            .filter(|&pos| pos.saturating_sub(len) <= MAX_LIST_GAP)
    }

    /// The key as a map key.
    #[must_use]
    pub fn as_name(&self) -> Cow<'_, str> {
        match self {
            Key::Index(i) => Cow::Owned(i.to_string()),
            Key::Name(name) => Cow::Borrowed(name),
        }
    }
}

fn parse_index(name: &str) -> Option<i64> {
    let digits = name.strip_prefix('-').unwrap_or(name);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    name.parse().ok()
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(i) => write!(f, "{i}"),
            Key::Name(name) => f.write_str(name),
        }
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Key::Index(value)
    }
}

impl From<i32> for Key {
    fn from(value: i32) -> Self {
        Key::Index(i64::from(value))
    }
}

impl From<usize> for Key {
    fn from(value: usize) -> Self {
        Key::Index(value as i64)
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Name(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Name(value)
    }
}

/// A normalized, possibly multi-component address into a nested value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path(Vec<Key>);

impl Path {
    #[must_use]
    pub fn new(keys: Vec<Key>) -> Self {
        Self(keys)
    }

    #[must_use]
    pub fn keys(&self) -> &[Key] {
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
    pub fn into_keys(self) -> Vec<Key> {
        self.0
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "{SEPARATOR}")?;
            }
            write!(f, "{key}")?;
        }
        Ok(())
    }
}

impl From<Key> for Path {
    fn from(key: Key) -> Self {
        Self(vec![key])
    }
}

impl From<i64> for Path {
    fn from(value: i64) -> Self {
        Key::from(value).into()
    }
}

impl From<i32> for Path {
    fn from(value: i32) -> Self {
        Key::from(value).into()
    }
}

impl From<usize> for Path {
    fn from(value: usize) -> Self {
        Key::from(value).into()
    }
}

impl From<&str> for Path {
    fn from(value: &str) -> Self {
        if value.contains(SEPARATOR) {
            Self(value.split(SEPARATOR).map(Key::from).collect())
        } else {
            Key::from(value).into()
        }
    }
}

impl From<String> for Path {
    fn from(value: String) -> Self {
        Path::from(value.as_str())
    }
}

impl From<&String> for Path {
    fn from(value: &String) -> Self {
        Path::from(value.as_str())
    }
}

impl From<&Path> for Path {
    fn from(value: &Path) -> Self {
        value.clone()
    }
}

impl From<Vec<Key>> for Path {
    fn from(keys: Vec<Key>) -> Self {
        Self(keys)
    }
}

impl<K: Into<Key>, const N: usize> From<[K; N]> for Path {
    fn from(parts: [K; N]) -> Self {
        Self(parts.into_iter().map(Into::into).collect())
    }
}

/// Convert an integer, dotted string, or list of parts into its path form.
pub fn normalize(index: impl Into<Path>) -> Path {
    index.into()
}

/// Resolve `index` against `container`, returning every value visited.
///
/// The first element is `container` itself and the last is the addressed value, so
/// the result always holds `path.len() + 1` entries. Once a step misses, every
/// remaining entry is `Unset`.
pub fn resolve_path(container: &Value, index: impl Into<Path>) -> Vec<&Value> {
    let path = index.into();
    walk(container, &path)
}

fn walk<'a>(container: &'a Value, path: &Path) -> Vec<&'a Value> {
    let mut visited = Vec::with_capacity(path.len() + 1);
    let mut current = container;
    visited.push(current);
    for key in path.keys() {
        current = member(current, key);
        visited.push(current);
    }
    visited
}

/// Read the value addressed by `index`, or `Unset` if it cannot be reached.
pub fn get(container: &Value, index: impl Into<Path>) -> &Value {
    let path = index.into();
    walk(container, &path).pop().unwrap_or(container)
}

/// Return a copy of `container` with the value at `index` replaced by `value`.
///
/// Every level along the path is copied, deepest first; levels that do not exist
/// are created as a list when their key is a writable position and as a map
/// otherwise. Writing more than [`MAX_LIST_GAP`] past the end of a list turns that
/// level into a map instead of growing it.
pub fn set(container: &Value, index: impl Into<Path>, value: Value) -> Value {
    let path = index.into();
    let visited = walk(container, &path);
    let mut replacement = value;
    for (pos, key) in path.keys().iter().enumerate().rev() {
        replacement = with_member(visited[pos], key, replacement);
    }
    replacement
}

/// Map a possibly negative index onto a position in a sequence of `len` items.
fn wrap(index: i64, len: usize) -> Option<usize> {
    if index >= 0 {
        return usize::try_from(index).ok();
    }
    let wrapped = len as i64 + index;
    usize::try_from(wrapped).ok()
}

fn member<'a>(current: &'a Value, key: &Key) -> &'a Value {
    match current {
        Value::List(items) => key
            .position(items.len())
            .and_then(|pos| items.get(pos))
            .unwrap_or(&UNSET),
        Value::Map(entries) => entries.get(key.as_name().as_ref()).unwrap_or(&UNSET),
        _ => &UNSET,
    }
}

fn with_member(original: &Value, key: &Key, member: Value) -> Value {
    match original {
        Value::List(items) => match key.write_position(items.len()) {
            Some(pos) => {
                let mut items = items.clone();
                if pos >= items.len() {
                    items.resize(pos + 1, Value::Unset);
                }
                items[pos] = member;
                Value::List(items)
            }
            // A key with no position in the list turns this level into a map.
            None => {
                let mut entries: BTreeMap<String, Value> = items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| (i.to_string(), item.clone()))
                    .collect();
                entries.insert(key.as_name().into_owned(), member);
                Value::Map(entries)
            }
        },
        Value::Map(entries) => {
            let mut entries = entries.clone();
            entries.insert(key.as_name().into_owned(), member);
            Value::Map(entries)
        }
        _ => {
            let fresh = if key.write_position(0).is_some() {
                Value::List(Vec::new())
            } else {
                Value::empty_map()
            };
            with_member(&fresh, key, member)
        }
    }
}
