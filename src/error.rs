//! Error types for the TAGE predictor.
//!
//! Prediction and update are infallible per the spec: all arithmetic
//! saturates and all indices are computed modulo their table size. The only
//! recoverable failure mode is constructing a [`crate::TagePredictor`] from
//! an internally-inconsistent [`crate::TageConfig`].

use std::fmt;

/// Errors produced while validating a [`crate::TageConfig`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PredictorError {
    /// A per-table configuration vector's length didn't match `num_tables`.
    ConfigMismatch {
        /// Name of the mismatched field.
        field: &'static str,
        /// Expected length (`num_tables`).
        expected: usize,
        /// Actual length of the vector.
        actual: usize,
    },
    /// A tag width was too narrow to support the tag-minus-one CSR the
    /// update engine requires.
    InvalidTagWidth {
        /// The offending width, in bits.
        width: u32,
    },
    /// A table index width was zero, which would make the table
    /// unaddressable.
    InvalidIndexWidth {
        /// The offending width, in bits.
        width: u32,
    },
    /// `num_tables` exceeded the predictor's fixed scratch-buffer capacity.
    TooManyTables {
        /// The requested table count.
        requested: usize,
        /// The maximum supported table count.
        max: usize,
    },
}

impl fmt::Display for PredictorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictorError::ConfigMismatch {
                field,
                expected,
                actual,
            } => write!(
                f,
                "config field `{field}` has length {actual}, expected {expected} (num_tables)"
            ),
            PredictorError::InvalidTagWidth { width } => {
                write!(f, "tag width {width} is too narrow (must be >= 2 bits)")
            }
            PredictorError::InvalidIndexWidth { width } => {
                write!(f, "index width {width} is invalid (must be >= 1 bit)")
            }
            PredictorError::TooManyTables { requested, max } => write!(
                f,
                "num_tables {requested} exceeds the maximum supported table count {max}"
            ),
        }
    }
}

impl std::error::Error for PredictorError {}
