use std::fmt;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

/// Events emitted by the factory registries during operations.
///
/// These events are passed to the tracing callback set via `set_trace_callback`.
/// The `Clone` derive allows callbacks to store or forward events if needed.
///
/// # Examples
///
/// ```rust
/// use factory_registry::RegistryEvent;
///
/// let event = RegistryEvent::Contains {
///     key: "\"circle\"".to_string(),
///     base: "dyn Shape",
///     args: "(f64,)",
///     found: false,
/// };
/// assert_eq!(
///     event.to_string(),
///     "contains { key: \"circle\", base: dyn Shape, args: (f64,), found: false }"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    /// A creator was offered to a registry.
    Register {
        /// `Debug` rendering of the key.
        key: String,
        /// Type name of the base (e.g. `dyn my_crate::Shape`).
        base: &'static str,
        /// Type name of the argument tuple (e.g. `(i32, i32)`).
        args: &'static str,
        /// `false` when the key was already taken.
        accepted: bool,
    },

    /// An existence check was performed.
    Contains {
        key: String,
        base: &'static str,
        args: &'static str,
        found: bool,
    },

    /// A construction was requested.
    Create {
        key: String,
        base: &'static str,
        args: &'static str,
        found: bool,
    },

    /// The startup registration pass finished.
    Init {
        /// Number of registration units that ran.
        units: usize,
        ok: bool,
    },
}

impl fmt::Display for RegistryEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryEvent::Register {
                key,
                base,
                args,
                accepted,
            } => write!(
                f,
                "register {{ key: {key}, base: {base}, args: {args}, accepted: {accepted} }}"
            ),
            RegistryEvent::Contains {
                key,
                base,
                args,
                found,
            } => write!(
                f,
                "contains {{ key: {key}, base: {base}, args: {args}, found: {found} }}"
            ),
            RegistryEvent::Create {
                key,
                base,
                args,
                found,
            } => write!(
                f,
                "create {{ key: {key}, base: {base}, args: {args}, found: {found} }}"
            ),
            RegistryEvent::Init { units, ok } => {
                write!(f, "init {{ units: {units}, ok: {ok} }}")
            }
        }
    }
}

// -------------------------------------------------------------------------------------------------
// Tracing callback support
// -------------------------------------------------------------------------------------------------

/// Type alias for the user-supplied tracing callback.
///
/// The callback receives a reference to a `RegistryEvent` every time any factory registry is
/// interacted with. It must be thread-safe because the registries are globally shared.
pub type TraceCallback = dyn Fn(&RegistryEvent) + Send + Sync + 'static;

static TRACE_CALLBACK: LazyLock<RwLock<Option<Arc<TraceCallback>>>> =
    LazyLock::new(|| RwLock::new(None));

/// Sets a tracing callback that will be invoked on every registry interaction.
///
/// # Example
/// ```rust
/// use factory_registry::set_trace_callback;
///
/// set_trace_callback(|event| println!("[factory-trace] {event}"));
/// # factory_registry::clear_trace_callback();
/// ```
pub fn set_trace_callback(callback: impl Fn(&RegistryEvent) + Send + Sync + 'static) {
    let mut guard = TRACE_CALLBACK
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    *guard = Some(Arc::new(callback));
}

/// Clears the tracing callback (disables registry tracing).
pub fn clear_trace_callback() {
    let mut guard = TRACE_CALLBACK
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    *guard = None;
}

/// Emits `event` to the current callback, if any.
///
/// The callback is cloned out of the lock first, so it may itself install or clear callbacks.
pub(crate) fn emit_event(event: RegistryEvent) {
    let callback = TRACE_CALLBACK
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone();
    if let Some(callback) = callback {
        callback(&event);
    }
}
