//! Argument lists each key was registered with, per `(key type, base)` family.
//!
//! Registries for different argument tuples are unrelated types, so none of them can tell a
//! caller that `"Foo"` exists with other arguments. Every accepted registration is noted
//! here so `NotFound` can list the overloads that do exist.

use std::any::type_name;
use std::sync::{Mutex, PoisonError};

#[derive(Default)]
pub struct Overloads {
    entries: Mutex<Vec<(String, &'static str)>>,
}

crate::define_record_store!(#[allow(dead_code)] pub(crate) overloads, Overloads);

/// Names the record shared by every argument tuple of one `(K, B)` pair.
type Family<K, B> = fn(K) -> Box<B>;

fn family<K: 'static, B: ?Sized + 'static>() -> &'static str {
    type_name::<Family<K, B>>()
}

pub(crate) fn note<K: 'static, B: ?Sized + 'static>(key: String, args: &'static str) {
    overloads::entry(family::<K, B>())
        .entries
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push((key, args));
}

/// Argument lists `key` is registered with, other than `args`.
pub(crate) fn alternatives<K: 'static, B: ?Sized + 'static>(
    key: &str,
    args: &'static str,
) -> Vec<&'static str> {
    let Ok(record) = overloads::get(family::<K, B>()) else {
        return Vec::new();
    };
    let entries = record
        .entries
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    let mut found: Vec<_> = entries
        .iter()
        .filter(|(k, a)| k == key && *a != args)
        .map(|(_, a)| *a)
        .collect();
    found.sort_unstable();
    found
}
