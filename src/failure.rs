//! The single error value used across all optic operations.
//!
//! Every fallible operation in this crate returns a [`Failure`]: a
//! human-readable message plus an optional wrapped cause. Absence of a
//! focus (missing key, wrong enum case, index past the end) is always
//! reported through a `Failure` rather than substituted with a default.
//!
//! Composition never re-labels a failure produced by an inner optic — the
//! original message survives unchanged up the chain, so a failure stays
//! attributable to the exact stage that produced it. The one place a
//! failure is wrapped rather than propagated is an effectful update, where
//! the effect's failure becomes the `cause` of the returned one.
//!
//! # Examples
//!
//! ```rust
//! use focal::failure::Failure;
//!
//! let failure = Failure::key_not_found("rust");
//! assert_eq!(failure.message(), "key not found: rust");
//! assert!(failure.cause().is_none());
//! ```

use std::error::Error;
use std::sync::Arc;

/// A failed optic operation: "focus not present" or "update rejected".
///
/// Immutable once constructed and cheap to clone. Equality compares
/// messages only, so a failure round-tripped through a composed optic
/// still compares equal to the leaf failure that produced it.
#[derive(Clone, Debug)]
pub struct Failure {
    message: String,
    cause: Option<Arc<dyn Error + Send + Sync + 'static>>,
}

impl Failure {
    /// Creates a failure with the given message and no cause.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use focal::failure::Failure;
    ///
    /// let failure = Failure::new("focus absent");
    /// assert_eq!(failure.message(), "focus absent");
    /// ```
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: None,
        }
    }

    /// Attaches a wrapped cause, keeping the message unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use focal::failure::Failure;
    ///
    /// let inner = Failure::new("case mismatch");
    /// let outer = Failure::new("effectful update failed").caused_by(inner);
    /// assert!(outer.cause().is_some());
    /// ```
    #[must_use]
    pub fn caused_by(mut self, cause: impl Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Arc::new(cause));
        self
    }

    /// The failure produced by a prism whose input is not the expected case.
    #[must_use]
    pub fn case_mismatch() -> Self {
        Self::new("case mismatch")
    }

    /// The failure produced by a key optic when the key is absent.
    ///
    /// The message identifies the missing key.
    pub fn key_not_found(key: impl std::fmt::Display) -> Self {
        Self::new(format!("key not found: {key}"))
    }

    /// The failure produced by an index optic when the index is outside
    /// `[0, len)`.
    #[must_use]
    pub fn index_out_of_bounds(index: usize, len: usize) -> Self {
        Self::new(format!("index out of bounds: {index} (len {len})"))
    }

    /// The failure produced by a traversal set whose replacement sequence
    /// length differs from the number of foci.
    #[must_use]
    pub fn size_mismatch(expected: usize, actual: usize) -> Self {
        Self::new(format!("size mismatch: expected {expected} foci, got {actual}"))
    }

    /// The configuration error produced at composition time when two optics
    /// carry incompatible effect flavors.
    pub fn flavor_mismatch(left: impl std::fmt::Display, right: impl std::fmt::Display) -> Self {
        Self::new(format!(
            "composition type error: cannot combine {left} optic with {right} optic"
        ))
    }

    /// The failure produced by a bound accessor whose container reported a
    /// conflict on every attempt permitted by its retry policy.
    #[must_use]
    pub fn retry_exhausted(attempts: usize) -> Self {
        Self::new(format!(
            "update conflict: retry budget exhausted after {attempts} attempts"
        ))
    }

    /// The human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The wrapped cause, if any.
    #[must_use]
    pub fn cause(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }
}

impl PartialEq for Failure {
    fn eq(&self, other: &Self) -> bool {
        self.message == other.message
    }
}

impl Eq for Failure {}

impl std::fmt::Display for Failure {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.cause {
            Some(cause) => write!(formatter, "{}: {cause}", self.message),
            None => write!(formatter, "{}", self.message),
        }
    }
}

impl Error for Failure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause
            .as_ref()
            .map(|cause| cause.as_ref() as &(dyn Error + 'static))
    }
}
