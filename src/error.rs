use thiserror::Error;

use crate::registry::Kind;

/// Result type alias for registry operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors returned by the strict lookups and by registry loading.
///
/// Lenient lookups never produce these: an unregistered code is reported as
/// `None` (or simply left out of a decomposition), since partial input is the
/// normal case for a validator.
#[derive(Error, Debug)]
pub enum Error {
    /// The exact `(code, kind)` pair is not in the registry.
    #[error("'{code}' is not a registered {kind} subtag")]
    NotFound { code: String, kind: Kind },

    /// The caller asked for something the registry cannot answer,
    /// e.g. the members of a code that is not a macrolanguage.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A kind name that is not one of the registry's `Type` values.
    #[error("unknown subtag type '{0}'")]
    UnknownKind(String),

    #[error("failed to read registry: {0}")]
    Io(#[from] std::io::Error),

    /// `init` was called after the process-wide registry was installed.
    #[error("the language subtag registry is already initialized")]
    AlreadyInitialized,
}
