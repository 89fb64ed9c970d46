//! # Factory Registry
//!
//! A type-checked factory registry: modules register constructors for subtypes of a common
//! base under a key, and code elsewhere builds the right concrete type from nothing but the
//! key and an argument tuple.
//!
//! Registration happens once, during startup. Lookups happen afterwards.
//!
//! ## Quick Start
//!
//! ```rust
//! use factory_registry::{impl_upcast, Construct, Factory, FactoryRegistry};
//!
//! trait Base {
//!     fn value(&self) -> i32;
//! }
//!
//! struct Bar(i32);
//!
//! impl Base for Bar {
//!     fn value(&self) -> i32 {
//!         self.0
//!     }
//! }
//!
//! impl Construct<(i32,)> for Bar {
//!     fn construct((v,): (i32,)) -> Self {
//!         Bar(v)
//!     }
//! }
//!
//! impl Construct<(i32, i32)> for Bar {
//!     fn construct((x, y): (i32, i32)) -> Self {
//!         Bar(x + y)
//!     }
//! }
//!
//! impl_upcast!(dyn Base => Bar);
//!
//! FactoryRegistry::<String, dyn Base, (i32,)>::instance()
//!     .register::<Bar>("Bar".to_string())
//!     .unwrap();
//! FactoryRegistry::<String, dyn Base, (i32, i32)>::instance()
//!     .register::<Bar>("Bar".to_string())
//!     .unwrap();
//!
//! type Bases = Factory<String, dyn Base>;
//!
//! assert_eq!(Bases::create("Bar", (1,)).unwrap().value(), 1);
//! assert_eq!(Bases::create("Bar", (1, 2)).unwrap().value(), 3);
//! assert!(!Bases::is_registered("Bar", ()));
//! ```
//!
//! ## Features
//!
//! - **Compile-time checked**: a type registers only if it implements [`Construct`] for the
//!   argument tuple and [`Upcast`] to the base
//! - **Overloads**: the argument tuple is part of the registry type, so one key can carry
//!   several constructors
//! - **Self-registration** (`self-register` feature, default): [`register_factory!`] units
//!   are collected at link time and run by [`init`]
//! - **Tracing support**: `tracing` output plus an optional callback for registry events
//!
//! ## Main Items
//!
//! - [`FactoryRegistry`] - the per-`(key, base, args)` registry
//! - [`Factory`] - call-site facade deducing the argument tuple
//! - [`RecordStore`] / [`define_record_store!`] - keyed singleton store
//! - [`init`] - run all self-registration units
//! - [`set_trace_callback`] - observe registry operations

mod catalog;
mod construct;
mod factory;
mod macros;
mod record_store;
mod registry;
mod registry_error;
mod registry_event;
#[cfg(feature = "self-register")]
mod startup;

#[cfg(feature = "self-register")]
#[doc(hidden)]
pub use inventory;

pub use construct::{Construct, Upcast};
pub use factory::{Creator, FactoryRegistry};
pub use record_store::{Named, RecordStorage, RecordStore};
pub use registry::Factory;
pub use registry_error::{ErrorKind, RegistryError, SourceLocation};
pub use registry_event::{clear_trace_callback, set_trace_callback, RegistryEvent, TraceCallback};
#[cfg(feature = "self-register")]
pub use startup::{init, is_initialized, registrations, Registration};
