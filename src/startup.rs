//! Link-time collected registration units and the explicit startup pass that runs them.
//!
//! Each [`register_factory!`](crate::register_factory) invocation submits a [`Registration`]
//! through `inventory::submit!`. Nothing is registered until the entry point calls
//! [`init`], which gives the program one deterministic point after which lookups are valid.

use std::sync::OnceLock;

use crate::registry_event::{emit_event, RegistryEvent};
use crate::{RegistryError, SourceLocation};

/// One deferred `register` call, collected via `inventory`.
pub struct Registration {
    derived: &'static str,
    location: SourceLocation,
    run: fn(SourceLocation) -> Result<(), RegistryError>,
}

impl Registration {
    #[doc(hidden)]
    pub const fn new(
        derived: &'static str,
        location: SourceLocation,
        run: fn(SourceLocation) -> Result<(), RegistryError>,
    ) -> Self {
        Self {
            derived,
            location,
            run,
        }
    }

    /// Name of the registered type as written at the submission site.
    pub fn derived(&self) -> &'static str {
        self.derived
    }

    /// Where the unit was submitted.
    pub fn location(&self) -> SourceLocation {
        self.location
    }
}

inventory::collect!(Registration);

static STARTUP: OnceLock<Result<usize, RegistryError>> = OnceLock::new();

/// Runs every submitted registration unit exactly once.
///
/// Call it from the entry point before the first lookup. Later calls (from any thread) do
/// not run anything again and return the outcome of the first pass, so a
/// `DuplicateRegistration` keeps being reported.
///
/// Returns the number of units that ran.
///
/// # Errors
///
/// The first [`RegistryError::DuplicateRegistration`] raised by a unit. Units after it are
/// not run.
pub fn init() -> Result<usize, RegistryError> {
    STARTUP.get_or_init(run_registrations).clone()
}

/// Whether [`init`] has completed (successfully or not).
pub fn is_initialized() -> bool {
    STARTUP.get().is_some()
}

/// All units linked into this binary, in unspecified order.
pub fn registrations() -> impl Iterator<Item = &'static Registration> {
    inventory::iter::<Registration>.into_iter()
}

fn run_registrations() -> Result<usize, RegistryError> {
    let mut units = 0;
    for unit in registrations() {
        units += 1;
        if let Err(err) = (unit.run)(unit.location) {
            tracing::error!(derived = unit.derived, %err, "factory registration failed");
            emit_event(RegistryEvent::Init { units, ok: false });
            return Err(err);
        }
    }

    tracing::info!(units, "factory registrations complete");
    emit_event(RegistryEvent::Init { units, ok: true });
    Ok(units)
}
