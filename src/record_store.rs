//! Keyed singleton store: one lazily created record per name.
//!
//! This module provides the `RecordStore` trait with default implementations for
//! creating and looking up records. A store is declared once per record type, either
//! with [`define_record_store!`](crate::define_record_store) or by implementing the trait
//! by hand.
//!
//! Records are never removed. They are leaked into `&'static` references on creation and
//! live until the process exits, so callers only ever borrow them. Aggregation across
//! registrations therefore goes through interior mutability inside the record type.

use std::collections::HashMap;
use std::sync::{LazyLock, PoisonError, RwLock};

use crate::{RegistryError, SourceLocation};

/// Backing map of a record store.
pub type RecordStorage<R> = LazyLock<RwLock<HashMap<&'static str, &'static R>>>;

/// A type that names the record it contributes to.
///
/// Types sharing a `NAME` share one record.
pub trait Named {
    const NAME: &'static str;
}

/// Core trait defining record store behavior.
///
/// Only `storage` (and the `STORE` label) must be provided; everything else has a default
/// implementation.
///
/// # Thread Safety
///
/// Access is serialized through a `RwLock`, but the intended usage is to create records
/// during startup and only read them afterwards.
pub trait RecordStore {
    type Record: Default + Send + Sync + 'static;

    /// Label used in diagnostics.
    const STORE: &'static str;

    /// Access the storage static.
    fn storage() -> &'static RecordStorage<Self::Record>;

    /// Returns the record named by `T`, default-constructing it on first use.
    fn set<T: Named>(&self) -> &'static Self::Record {
        self.entry(T::NAME)
    }

    /// Returns the record called `name`, default-constructing it on first use.
    fn entry(&self, name: &'static str) -> &'static Self::Record {
        let existing = Self::storage()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .copied();
        if let Some(record) = existing {
            return record;
        }

        let mut map = Self::storage()
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *map.entry(name).or_insert_with(|| {
            tracing::trace!(store = Self::STORE, name, "creating record");
            Box::leak(Box::new(<Self::Record as Default>::default()))
        })
    }

    /// Looks up an existing record. Never creates one.
    ///
    /// # Errors
    ///
    /// [`RegistryError::RecordNotFound`] if nothing was created under `name`.
    #[track_caller]
    fn get(&self, name: &str) -> Result<&'static Self::Record, RegistryError> {
        let location = SourceLocation::caller();
        Self::storage()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .copied()
            .ok_or_else(|| RegistryError::RecordNotFound {
                name: name.to_string(),
                store: Self::STORE,
                location,
            })
    }

    fn contains(&self, name: &str) -> bool {
        Self::storage()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Names of all records, sorted.
    fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = Self::storage()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .copied()
            .collect();
        names.sort_unstable();
        names
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::{Named, RecordStorage, RecordStore};
    use crate::ErrorKind;

    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{LazyLock, RwLock};

    #[derive(Debug, Default)]
    struct Counter {
        hits: AtomicUsize,
    }

    static STORAGE: RecordStorage<Counter> = LazyLock::new(|| RwLock::new(HashMap::new()));

    struct Counters;

    impl RecordStore for Counters {
        type Record = Counter;
        const STORE: &'static str = "counters";

        fn storage() -> &'static RecordStorage<Counter> {
            &STORAGE
        }
    }

    const COUNTERS: Counters = Counters;

    struct Alpha;
    impl Named for Alpha {
        const NAME: &'static str = "alpha";
    }

    struct AlphaAlias;
    impl Named for AlphaAlias {
        const NAME: &'static str = "alpha";
    }

    #[test]
    fn test_set_is_idempotent_per_name() {
        let first = COUNTERS.set::<Alpha>();
        first.hits.fetch_add(1, Ordering::SeqCst);

        let again = COUNTERS.set::<Alpha>();
        let alias = COUNTERS.set::<AlphaAlias>();

        assert!(std::ptr::eq(first, again));
        assert!(std::ptr::eq(first, alias));
        assert!(again.hits.load(Ordering::SeqCst) >= 1);
    }

    #[test]
    fn test_get_never_creates() {
        let err = COUNTERS.get("missing-record").err().unwrap();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains("no record named `missing-record` in counters"));
        assert!(!COUNTERS.contains("missing-record"));
    }

    #[test]
    fn test_get_returns_entry_created_by_name() {
        let created = COUNTERS.entry("beta");
        created.hits.fetch_add(5, Ordering::SeqCst);

        let fetched = COUNTERS.get("beta").unwrap();
        assert!(std::ptr::eq(created, fetched));
        assert!(COUNTERS.names().contains(&"beta"));
    }

    #[test]
    fn test_error_location_is_the_caller() {
        let err = COUNTERS.get("nowhere").unwrap_err();
        assert!(err.location().file.ends_with("record_store.rs"));
        assert_eq!(err.location().line, line!() - 2);
    }
}
