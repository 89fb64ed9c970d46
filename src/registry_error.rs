use std::fmt;

/// Where a registration or lookup was issued from.
///
/// Captured with `#[track_caller]` for method calls and with
/// `file!()`/`line!()`/`column!()` inside [`register_factory!`](crate::register_factory).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub file: &'static str,
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub const fn new(file: &'static str, line: u32, column: u32) -> Self {
        Self { file, line, column }
    }

    /// Location of the (tracked) caller.
    #[track_caller]
    pub fn caller() -> Self {
        let location = std::panic::Location::caller();
        Self::new(location.file(), location.line(), location.column())
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// Coarse classification of a [`RegistryError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    DuplicateRegistration,
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A creator already exists for this key in the `(key, base, args)` registry.
    #[error("{location}: factory for key {key} with arguments {args} is already registered for {base}")]
    DuplicateRegistration {
        key: String,
        base: &'static str,
        args: &'static str,
        location: SourceLocation,
    },

    /// No creator exists for this key in the `(key, base, args)` registry.
    #[error(
        "{location}: cannot find registered factory for key {key} with arguments {args} for {base}{}",
        alternatives_hint(.alternatives)
    )]
    NotFound {
        key: String,
        base: &'static str,
        args: &'static str,
        /// Argument lists the same key *is* registered with.
        alternatives: Vec<&'static str>,
        location: SourceLocation,
    },

    /// A keyed singleton store has no record under this name.
    #[error("{location}: no record named `{name}` in {store}")]
    RecordNotFound {
        name: String,
        store: &'static str,
        location: SourceLocation,
    },
}

impl RegistryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::DuplicateRegistration { .. } => ErrorKind::DuplicateRegistration,
            RegistryError::NotFound { .. } | RegistryError::RecordNotFound { .. } => {
                ErrorKind::NotFound
            }
        }
    }

    pub fn location(&self) -> SourceLocation {
        match self {
            RegistryError::DuplicateRegistration { location, .. }
            | RegistryError::NotFound { location, .. }
            | RegistryError::RecordNotFound { location, .. } => *location,
        }
    }
}

fn alternatives_hint(alternatives: &[&'static str]) -> String {
    if alternatives.is_empty() {
        String::new()
    } else {
        format!(
            " (registered argument lists for this key: {})",
            alternatives.join(", ")
        )
    }
}
