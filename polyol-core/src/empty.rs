//! Emptiness predicate shared by the copy engine and callers.
//!
//! Null, empty text, empty sequences and maps, and absent optionals are
//! empty. Whitespace is content: `" "` is not empty.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use indexmap::IndexMap;

use crate::value::{ByteString, Value};

/// Classifies a value as empty or not.
pub trait Emptiness {
    fn is_empty_value(&self) -> bool;
}

/// Returns true if `value` is null, empty text, an empty collection, or an
/// absent optional.
pub fn is_empty<T: Emptiness + ?Sized>(value: &T) -> bool {
    value.is_empty_value()
}

pub fn is_not_empty<T: Emptiness + ?Sized>(value: &T) -> bool {
    !value.is_empty_value()
}

impl Emptiness for Value {
    fn is_empty_value(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Text(s) => s.is_empty(),
            Value::Bytes(b) => b.as_bytes().is_empty(),
            Value::Seq(items) => items.is_empty(),
            Value::Map(map) => map.is_empty(),
            _ => false,
        }
    }
}

/// A present optional is never empty, whatever it holds.
impl<T> Emptiness for Option<T> {
    fn is_empty_value(&self) -> bool {
        self.is_none()
    }
}

impl Emptiness for str {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl Emptiness for String {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl Emptiness for ByteString {
    fn is_empty_value(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

impl<T> Emptiness for [T] {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T, const N: usize> Emptiness for [T; N] {
    fn is_empty_value(&self) -> bool {
        N == 0
    }
}

impl<T> Emptiness for Vec<T> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V, S> Emptiness for HashMap<K, V, S> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V> Emptiness for BTreeMap<K, V> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V, S> Emptiness for IndexMap<K, V, S> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T, S> Emptiness for HashSet<T, S> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Emptiness for BTreeSet<T> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Emptiness + ?Sized> Emptiness for &T {
    fn is_empty_value(&self) -> bool {
        (**self).is_empty_value()
    }
}
