//! Value-level validation errors.

use thiserror::Error;

/// A field value that failed its constraint.
///
/// Every variant names the field it was produced for, so an aggregated
/// report still points at the exact offender.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    /// Scalar (or vector component) outside its declared bounds.
    #[error("{field}: value {value} out of range ({bound})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        bound: String,
    },

    /// Sequence with the wrong number of components for a fixed-arity field.
    #[error("{field}: expected {expected} component(s), got {actual}")]
    ArityMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Token outside a closed keyword set.
    #[error("{field}: invalid choice {value:?}, expected one of {expected:?}")]
    InvalidChoice {
        field: &'static str,
        value: String,
        expected: &'static [&'static str],
    },

    /// String that is not a usable XML identifier.
    #[error("{field}: invalid identifier {value:?} ({reason})")]
    InvalidIdentifier {
        field: &'static str,
        value: String,
        reason: &'static str,
    },
}

impl ValueError {
    /// The field the error was reported for.
    pub fn field(&self) -> &'static str {
        match self {
            ValueError::OutOfRange { field, .. }
            | ValueError::ArityMismatch { field, .. }
            | ValueError::InvalidChoice { field, .. }
            | ValueError::InvalidIdentifier { field, .. } => field,
        }
    }
}
