use crate::source::SourceError;
use std::fmt;
use thiserror::Error as ThisError;

///
/// Error
///
/// Structured error with a stable classification.
/// Every fallible catalog, query, and binding operation returns this type;
/// the caller decides whether to log, retry, or abort.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct Error {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,

    /// Optional structured error detail.
    pub detail: Option<ErrorDetail>,
}

impl Error {
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
            detail: None,
        }
    }

    /// Construct a catalog-origin not-found error for an unknown entity.
    pub fn entity_not_found(name: impl Into<String>) -> Self {
        let name = name.into();

        Self::new(
            ErrorClass::NotFound,
            ErrorOrigin::Catalog,
            format!("entity '{name}' not found in catalog"),
        )
    }

    /// Construct the canonical "entity has no declared key" error.
    pub fn no_key(table: impl Into<String>) -> Self {
        let err = NoKeyError {
            table: table.into(),
        };

        Self {
            class: ErrorClass::NoKey,
            origin: ErrorOrigin::Catalog,
            message: err.to_string(),
            detail: Some(ErrorDetail::NoKey(err)),
        }
    }

    /// Construct a query-origin unsupported error.
    pub(crate) fn query_unsupported(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Unsupported, ErrorOrigin::Query, message)
    }

    /// Construct a query-origin invariant violation.
    pub(crate) fn query_invariant(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::InvariantViolation, ErrorOrigin::Query, message)
    }

    /// Construct a predicate-origin invariant violation.
    pub(crate) fn predicate_invariant(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::InvariantViolation,
            ErrorOrigin::Predicate,
            message,
        )
    }

    /// Construct a dialect-origin internal error.
    pub(crate) fn dialect_internal(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Internal, ErrorOrigin::Dialect, message)
    }

    /// Construct a binding-origin invariant violation.
    pub(crate) fn binding_invariant(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::InvariantViolation,
            ErrorOrigin::Binding,
            message,
        )
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.class, ErrorClass::NotFound)
    }

    #[must_use]
    pub const fn is_no_key(&self) -> bool {
        matches!(self.detail, Some(ErrorDetail::NoKey(_)))
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

impl From<SourceError> for Error {
    fn from(err: SourceError) -> Self {
        Self {
            class: ErrorClass::Internal,
            origin: ErrorOrigin::Source,
            message: err.to_string(),
            detail: Some(ErrorDetail::Source(err)),
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self {
            class: ErrorClass::Config,
            origin: ErrorOrigin::Config,
            message: format!("invalid catalog config: {err}"),
            detail: Some(ErrorDetail::Config(err)),
        }
    }
}

///
/// ErrorDetail
///
/// Structured, origin-specific error detail carried by [`Error`].
///

#[derive(Debug, ThisError)]
pub enum ErrorDetail {
    #[error("{0}")]
    Source(SourceError),
    #[error("{0}")]
    NoKey(NoKeyError),
    #[error("{0}")]
    Config(toml::de::Error),
}

///
/// NoKeyError
///
/// Raised wherever an operation needs the single key field of an entity
/// that declares none.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("no key defined for table '{table}'")]
pub struct NoKeyError {
    pub table: String,
}

///
/// ErrorClass
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    NotFound,
    NoKey,
    Unsupported,
    InvariantViolation,
    Internal,
    Config,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NotFound => "not_found",
            Self::NoKey => "no_key",
            Self::Unsupported => "unsupported",
            Self::InvariantViolation => "invariant_violation",
            Self::Internal => "internal",
            Self::Config => "config",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Source,
    Dialect,
    Catalog,
    Predicate,
    Query,
    Binding,
    Config,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Source => "source",
            Self::Dialect => "dialect",
            Self::Catalog => "catalog",
            Self::Predicate => "predicate",
            Self::Query => "query",
            Self::Binding => "binding",
            Self::Config => "config",
        };
        write!(f, "{label}")
    }
}
