//! Macros for declaring record stores and registering factories.

/// Creates a complete keyed singleton store with a single macro invocation.
///
/// The macro generates a module containing:
/// - Storage static (hidden)
/// - A `Store` struct that implements `RecordStore`
/// - Free functions delegating to it
///
/// The record type is resolved from the invoking module, so declare the store next to
/// (not inside a function body with) the record type.
///
/// # Examples
///
/// ```rust
/// use factory_registry::{define_record_store, Named};
/// use std::sync::Mutex;
///
/// #[derive(Default)]
/// pub struct Codecs {
///     pub formats: Mutex<Vec<&'static str>>,
/// }
///
/// define_record_store!(pub codecs, Codecs);
///
/// struct Audio;
/// impl Named for Audio {
///     const NAME: &'static str = "audio";
/// }
///
/// fn main() {
///     codecs::set::<Audio>().formats.lock().unwrap().push("flac");
///     codecs::set::<Audio>().formats.lock().unwrap().push("opus");
///
///     let audio = codecs::get("audio").unwrap();
///     assert_eq!(*audio.formats.lock().unwrap(), ["flac", "opus"]);
///     assert!(codecs::get("video").is_err());
/// }
/// ```
#[macro_export]
macro_rules! define_record_store {
    ($(#[$attr:meta])* $vis:vis $name:ident, $record:ty) => {
        $(#[$attr])*
        $vis mod $name {
            #[allow(unused_imports)]
            use super::*;

            static STORAGE: $crate::RecordStorage<$record> = ::std::sync::LazyLock::new(|| {
                ::std::sync::RwLock::new(::std::collections::HashMap::new())
            });

            /// Zero-sized type that implements the store API.
            pub struct Store;

            impl $crate::RecordStore for Store {
                type Record = $record;
                const STORE: &'static str = ::core::stringify!($name);

                fn storage() -> &'static $crate::RecordStorage<$record> {
                    &STORAGE
                }
            }

            /// Convenient constant for trait-based access.
            pub const STORE: Store = Store;

            /// Returns the record named by `T`, creating it on first use.
            pub fn set<T: $crate::Named>() -> &'static $record {
                use $crate::RecordStore;
                STORE.set::<T>()
            }

            /// Returns the record called `name`, creating it on first use.
            pub fn entry(name: &'static str) -> &'static $record {
                use $crate::RecordStore;
                STORE.entry(name)
            }

            /// Looks up an existing record.
            #[track_caller]
            pub fn get(name: &str) -> ::core::result::Result<&'static $record, $crate::RegistryError> {
                use $crate::RecordStore;
                STORE.get(name)
            }

            pub fn contains(name: &str) -> bool {
                use $crate::RecordStore;
                STORE.contains(name)
            }

            pub fn names() -> ::std::vec::Vec<&'static str> {
                use $crate::RecordStore;
                STORE.names()
            }
        }
    };
}

/// Submits one registration unit, run later by [`init`](crate::init).
///
/// `register_factory!(KeyType, key, Base, Derived, Args...)` registers `Derived` under `key`
/// in the registry for `(KeyType, Base, (Args...,))`. `Derived` must implement
/// `Construct<(Args...,)>` and `Upcast<Base>`; both are checked where the macro is used.
/// Each argument list is a separate unit against a separate registry.
///
/// ```rust
/// use factory_registry::{impl_upcast, register_factory, Construct, Factory};
///
/// pub trait Greeter {
///     fn greet(&self) -> String;
/// }
///
/// struct English(String);
///
/// impl Greeter for English {
///     fn greet(&self) -> String {
///         format!("hello {}", self.0)
///     }
/// }
///
/// impl Construct<(String,)> for English {
///     fn construct((who,): (String,)) -> Self {
///         English(who)
///     }
/// }
///
/// impl_upcast!(dyn Greeter => English);
/// register_factory!(String, "en", dyn Greeter, English, String);
///
/// factory_registry::init().unwrap();
/// let greeter = Factory::<String, dyn Greeter>::create("en", ("rust".to_string(),)).unwrap();
/// assert_eq!(greeter.greet(), "hello rust");
/// ```
#[cfg(feature = "self-register")]
#[macro_export]
macro_rules! register_factory {
    ($key_ty:ty, $key:expr, $base:ty, $derived:ty $(, $arg:ty)*) => {
        $crate::inventory::submit! {
            $crate::Registration::new(
                ::core::stringify!($derived),
                $crate::SourceLocation::new(::core::file!(), ::core::line!(), ::core::column!()),
                |location| {
                    $crate::FactoryRegistry::<$key_ty, $base, ($($arg,)*)>::instance()
                        .register_at::<$derived>(::core::convert::Into::<$key_ty>::into($key), location)
                },
            )
        }
    };
}
