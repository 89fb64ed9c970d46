//! The typed factory registry.
//!
//! [`FactoryRegistry<K, B, A>`] maps keys of type `K` to creators that build a boxed `B`
//! (normally a `dyn Trait`) from an argument tuple `A`. The argument tuple is part of the
//! registry's type, so `"Bar"` registered for `(i32,)` and `"Bar"` registered for
//! `(i32, i32)` sit in two unrelated registries and never collide.
//!
//! # Storage Model
//!
//! One instance exists per distinct `(K, B, A)`. Instances are created on first access and
//! leaked, so [`FactoryRegistry::instance`] hands out `&'static` references that stay valid
//! until the process exits. A single `TypeId`-keyed index maps each monomorphization to its
//! instance.
//!
//! # Thread Safety
//!
//! Each map sits behind a `RwLock`, but the registry is designed for a "write during
//! startup, read-only thereafter" lifecycle. Registering while other threads already look
//! things up is not prevented; it is simply outside the intended use. The only invariant
//! enforced on write is that a key is never registered twice.

use std::any::{type_name, Any, TypeId};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::ptr::NonNull;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use crate::construct::construct_boxed;
use crate::registry_event::{emit_event, RegistryEvent};
use crate::{catalog, Construct, RegistryError, SourceLocation, Upcast};

/// A stored constructor: builds a boxed `B` from the argument tuple `A`.
pub type Creator<B, A> = fn(A) -> Box<B>;

type InstanceIndex = LazyLock<RwLock<HashMap<TypeId, &'static (dyn Any + Send + Sync)>>>;

/// Every registry instance ever created, keyed by `TypeId::of::<FactoryRegistry<K, B, A>>()`.
static INSTANCES: InstanceIndex = LazyLock::new(|| RwLock::new(HashMap::new()));

/// Key -> creator map for one `(K, B, A)` combination.
pub struct FactoryRegistry<K, B: ?Sized, A> {
    creators: RwLock<HashMap<K, Creator<B, A>>>,
}

impl<K, B, A> FactoryRegistry<K, B, A>
where
    K: Eq + Hash + Debug + Send + Sync + 'static,
    B: ?Sized + 'static,
    A: 'static,
{
    /// Returns the process-wide registry for this exact `(K, B, A)`.
    ///
    /// The first call creates it; every later call returns the same reference.
    pub fn instance() -> &'static Self {
        let id = TypeId::of::<Self>();

        let existing = INSTANCES
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .copied();
        let entry = match existing {
            Some(entry) => entry,
            None => *INSTANCES
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .entry(id)
                .or_insert_with(|| {
                    tracing::trace!(
                        base = type_name::<B>(),
                        args = type_name::<A>(),
                        "creating factory registry"
                    );
                    let leaked: &'static Self = Box::leak(Box::new(Self {
                        creators: RwLock::new(HashMap::new()),
                    }));
                    leaked as &'static (dyn Any + Send + Sync)
                }),
        };

        match entry.downcast_ref::<Self>() {
            Some(registry) => registry,
            None => unreachable!("factory registry index holds a foreign type under its TypeId"),
        }
    }

    /// Registers `D` under `key`.
    ///
    /// `D` must be constructible from `A` and be a subtype of `B`; both are checked at
    /// compile time.
    ///
    /// # Errors
    ///
    /// [`RegistryError::DuplicateRegistration`] if `key` is already present. The existing
    /// creator is kept.
    #[track_caller]
    pub fn register<D>(&self, key: K) -> Result<(), RegistryError>
    where
        D: Construct<A> + Upcast<B> + 'static,
    {
        self.insert(key, construct_boxed::<D, B, A>, SourceLocation::caller())
    }

    /// [`register`](Self::register) with an explicit source location.
    pub fn register_at<D>(&self, key: K, location: SourceLocation) -> Result<(), RegistryError>
    where
        D: Construct<A> + Upcast<B> + 'static,
    {
        self.insert(key, construct_boxed::<D, B, A>, location)
    }

    /// Registers a hand-written creator under `key`.
    ///
    /// Useful when the concrete type needs more than `Construct` offers, e.g. a builder.
    ///
    /// # Errors
    ///
    /// Same as [`register`](Self::register).
    #[track_caller]
    pub fn register_fn(&self, key: K, creator: Creator<B, A>) -> Result<(), RegistryError> {
        self.insert(key, creator, SourceLocation::caller())
    }

    fn insert(
        &self,
        key: K,
        creator: Creator<B, A>,
        location: SourceLocation,
    ) -> Result<(), RegistryError> {
        let rendered = format!("{key:?}");
        let accepted = {
            let mut creators = self
                .creators
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            if creators.contains_key(&key) {
                false
            } else {
                creators.insert(key, creator);
                catalog::note::<K, B>(rendered.clone(), type_name::<A>());
                true
            }
        };

        emit_event(RegistryEvent::Register {
            key: rendered.clone(),
            base: type_name::<B>(),
            args: type_name::<A>(),
            accepted,
        });

        if !accepted {
            let err = RegistryError::DuplicateRegistration {
                key: rendered,
                base: type_name::<B>(),
                args: type_name::<A>(),
                location,
            };
            tracing::error!(%err, "duplicate factory registration");
            return Err(err);
        }

        tracing::debug!(
            key = %rendered,
            base = type_name::<B>(),
            args = type_name::<A>(),
            %location,
            "registered factory"
        );
        Ok(())
    }

    /// Whether a creator exists for `key`.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        let found = self
            .creators
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key);

        emit_event(RegistryEvent::Contains {
            key: format!("{key:?}"),
            base: type_name::<B>(),
            args: type_name::<A>(),
            found,
        });
        found
    }

    /// Builds a new instance from the creator registered under `key`.
    ///
    /// The caller owns the result; the registry keeps nothing.
    ///
    /// # Errors
    ///
    /// [`RegistryError::NotFound`] if nothing is registered under `key` for this argument
    /// tuple. The error lists the argument tuples `key` *is* registered with.
    #[track_caller]
    pub fn create<Q>(&self, key: &Q, args: A) -> Result<Box<B>, RegistryError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        let creator = self.creator(key, SourceLocation::caller())?;
        Ok(creator(args))
    }

    /// Like [`create`](Self::create), but hands out a raw owning pointer.
    ///
    /// Release it with `Box::from_raw(ptr.as_ptr())`; until then the instance leaks.
    #[track_caller]
    pub fn create_raw<Q>(&self, key: &Q, args: A) -> Result<NonNull<B>, RegistryError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        let creator = self.creator(key, SourceLocation::caller())?;
        Ok(NonNull::from(Box::leak(creator(args))))
    }

    /// Like [`create`](Self::create), with shared ownership.
    #[track_caller]
    pub fn create_shared<Q>(&self, key: &Q, args: A) -> Result<Arc<B>, RegistryError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        let creator = self.creator(key, SourceLocation::caller())?;
        Ok(Arc::from(creator(args)))
    }

    /// Copies the creator out so it runs without holding the lock.
    fn creator<Q>(&self, key: &Q, location: SourceLocation) -> Result<Creator<B, A>, RegistryError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        let creator = self
            .creators
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .copied();
        let rendered = format!("{key:?}");

        emit_event(RegistryEvent::Create {
            key: rendered.clone(),
            base: type_name::<B>(),
            args: type_name::<A>(),
            found: creator.is_some(),
        });

        creator.ok_or_else(|| {
            let alternatives = catalog::alternatives::<K, B>(&rendered, type_name::<A>());
            tracing::debug!(
                key = %rendered,
                base = type_name::<B>(),
                args = type_name::<A>(),
                ?alternatives,
                "no factory registered"
            );
            RegistryError::NotFound {
                key: rendered,
                base: type_name::<B>(),
                args: type_name::<A>(),
                alternatives,
                location,
            }
        })
    }

    pub fn len(&self) -> usize {
        self.creators
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registered keys, in unspecified order.
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.creators
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
