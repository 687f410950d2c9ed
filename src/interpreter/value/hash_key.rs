use std::{collections::HashMap, rc::Rc};

use ordered_float::OrderedFloat;

use crate::{error::RuntimeError, interpreter::value::core::Value};

/// A normalized representation of a hashable value.
///
/// Only integers, floats, booleans and strings can be used as hash keys.
/// Floats are wrapped in [`OrderedFloat`] so the key type can implement `Eq`
/// and `Hash`. Equality is structural: two keys are equal exactly when the
/// values they were derived from compare equal as keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HashKey {
    /// An integer key such as `3`.
    Integer(i64),
    /// A float key such as `3.5`.
    Float(OrderedFloat<f64>),
    /// A boolean key.
    Bool(bool),
    /// A string key.
    Str(Rc<str>),
}

impl TryFrom<&Value> for HashKey {
    type Error = RuntimeError;

    /// Derives a key from a value, rejecting unhashable variants.
    ///
    /// # Errors
    /// Returns [`RuntimeError::UnusableHashKey`] for `null`, containers,
    /// functions and builtins.
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Integer(n) => Ok(Self::Integer(*n)),
            Value::Float(r) => Ok(Self::Float(OrderedFloat(*r))),
            Value::Bool(b) => Ok(Self::Bool(*b)),
            Value::Str(s) => Ok(Self::Str(Rc::clone(s))),
            other => Err(RuntimeError::UnusableHashKey { type_name: other.type_name(), }),
        }
    }
}

/// An insertion-ordered hash.
///
/// Entries keep the order in which their keys first appeared; inserting an
/// existing key again replaces the stored value without moving the entry.
/// Lookup goes through a side index from [`HashKey`] to entry position.
///
/// ## Example
/// ```
/// use simian::interpreter::value::{core::Value, hash_key::{HashKey, HashValue}};
///
/// let mut hash = HashValue::new();
/// hash.insert(HashKey::Integer(1), Value::Integer(1), Value::from("one"));
/// hash.insert(HashKey::Bool(true), Value::Bool(true), Value::from("yes"));
///
/// assert_eq!(hash.get(&HashKey::Bool(true)), Some(&Value::from("yes")));
/// assert_eq!(hash.get(&HashKey::Integer(2)), None);
/// assert_eq!(hash.to_string(), "{1: one, true: yes}");
/// ```
#[derive(Debug, Default)]
pub struct HashValue {
    entries: Vec<(Value, Value)>,
    index:   HashMap<HashKey, usize>,
}

impl HashValue {
    /// Creates an empty hash.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty hash with room for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: Vec::with_capacity(capacity),
               index:   HashMap::with_capacity(capacity), }
    }

    /// Inserts a key/value pair.
    ///
    /// `key` must have been derived from `key_value`; the original value is
    /// kept so the display form can show the key as written. A duplicate key
    /// overwrites the stored value in place.
    ///
    /// # Parameters
    /// - `key`: The normalized lookup key.
    /// - `key_value`: The value the key was derived from.
    /// - `value`: The stored value.
    pub fn insert(&mut self, key: HashKey, key_value: Value, value: Value) {
        match self.index.entry(key) {
            std::collections::hash_map::Entry::Occupied(entry) => {
                self.entries[*entry.get()].1 = value;
            },
            std::collections::hash_map::Entry::Vacant(entry) => {
                entry.insert(self.entries.len());
                self.entries.push((key_value, value));
            },
        }
    }

    /// Looks up the value stored under a key.
    #[must_use]
    pub fn get(&self, key: &HashKey) -> Option<&Value> {
        self.index.get(key).map(|&position| &self.entries[position].1)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the hash holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(key value, stored value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &(Value, Value)> {
        self.entries.iter()
    }
}

impl PartialEq for HashValue {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl std::fmt::Display for HashValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;

        for (index, (key, value)) in self.entries.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }

            write!(f, "{key}: {value}")?;
        }

        write!(f, "}}")
    }
}
