//! Call-site facade over the typed registries.
//!
//! [`Factory<K, B>`] fixes the key and base types explicitly (so a `&str` literal is never
//! silently taken as the key type) and deduces the argument tuple from the arguments passed.
//!
//! # Examples
//!
//! ```
//! use factory_registry::{impl_upcast, Construct, Factory, FactoryRegistry};
//!
//! trait Animal {
//!     fn legs(&self) -> u32;
//! }
//!
//! struct Spider;
//!
//! impl Animal for Spider {
//!     fn legs(&self) -> u32 {
//!         8
//!     }
//! }
//!
//! impl Construct<()> for Spider {
//!     fn construct(_: ()) -> Self {
//!         Spider
//!     }
//! }
//!
//! impl_upcast!(dyn Animal => Spider);
//!
//! // Startup phase.
//! FactoryRegistry::<String, dyn Animal, ()>::instance()
//!     .register::<Spider>("spider".to_string())
//!     .unwrap();
//!
//! // Steady state.
//! assert!(Factory::<String, dyn Animal>::is_registered("spider", ()));
//! assert!(!Factory::<String, dyn Animal>::is_registered("spider", (8u32,)));
//!
//! let spider = Factory::<String, dyn Animal>::create("spider", ()).unwrap();
//! assert_eq!(spider.legs(), 8);
//! ```

use std::borrow::Borrow;
use std::fmt::Debug;
use std::hash::Hash;
use std::marker::PhantomData;
use std::ptr::NonNull;
use std::sync::Arc;

use crate::{FactoryRegistry, RegistryError};

/// Zero-sized entry point for the registries of one key type and one base type.
///
/// Every method picks the `FactoryRegistry<K, B, A>` whose `A` is the type of `args`.
pub struct Factory<K, B: ?Sized>(PhantomData<fn(K) -> Box<B>>);

impl<K, B> Factory<K, B>
where
    K: Eq + Hash + Debug + Send + Sync + 'static,
    B: ?Sized + 'static,
{
    /// Whether `key` is registered for the argument tuple type `A`.
    ///
    /// Only the *type* of `args` matters: it selects which registry is asked. The values
    /// are dropped unread, so `is_registered("Bar", (1,))` and `is_registered("Bar", (9,))`
    /// always agree.
    pub fn is_registered<Q, A>(key: &Q, _args: A) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
        A: 'static,
    {
        FactoryRegistry::<K, B, A>::instance().contains(key)
    }

    /// Builds the instance registered under `key` for `A`, owned by the caller.
    ///
    /// # Errors
    ///
    /// [`RegistryError::NotFound`] when `key` has no creator for this argument tuple.
    #[track_caller]
    pub fn create<Q, A>(key: &Q, args: A) -> Result<Box<B>, RegistryError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
        A: 'static,
    {
        FactoryRegistry::<K, B, A>::instance().create(key, args)
    }

    /// Builds the instance as a raw owning pointer.
    ///
    /// Release it with `Box::from_raw(ptr.as_ptr())`.
    ///
    /// # Errors
    ///
    /// Same as [`create`](Self::create).
    #[track_caller]
    pub fn create_raw<Q, A>(key: &Q, args: A) -> Result<NonNull<B>, RegistryError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
        A: 'static,
    {
        FactoryRegistry::<K, B, A>::instance().create_raw(key, args)
    }

    /// Builds the instance behind an `Arc`.
    ///
    /// # Errors
    ///
    /// Same as [`create`](Self::create).
    #[track_caller]
    pub fn create_shared<Q, A>(key: &Q, args: A) -> Result<Arc<B>, RegistryError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
        A: 'static,
    {
        FactoryRegistry::<K, B, A>::instance().create_shared(key, args)
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
