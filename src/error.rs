//! Error types shared by every reader

use std::fmt;

use thiserror::Error;

use crate::value::ElementType;

/// The matrix dimension an index or range refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Row,
    Column,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Row => write!(f, "row"),
            Dimension::Column => write!(f, "column"),
        }
    }
}

/// Structural violations detected while validating a compressed sparse column matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CscDefect {
    #[error("'i' slot should be integer")]
    INotInteger,

    #[error("'p' slot should be integer")]
    PNotInteger,

    #[error("'x' slot should match the declared element type")]
    XWrongType,

    #[error("'x' and 'i' slots should have the same length")]
    XILengthMismatch,

    #[error("length of 'p' slot should be equal to 'ncol+1'")]
    PWrongLength,

    #[error("first element of 'p' should be 0")]
    PFirstNonzero,

    #[error("last element of 'p' should be 'length(x)'")]
    PLastNotNnz,

    #[error("'p' slot should be sorted")]
    PNotSorted,

    #[error("'p' slot should contain non-negative values")]
    PNegative,

    /// Row indices within a column are not strictly increasing
    #[error("'i' in each column should be strictly increasing")]
    IWithinColumnNotSorted,

    #[error("'i' slot should contain elements in [0, nrow)")]
    IOutOfRange,
}

/// Violations detected while ingesting a coordinate-list matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CoordinateDefect {
    /// A row or column index lies outside `[1, nrow]` / `[1, ncol]`
    #[error("indices out of bounds")]
    IdxOutOfRange,

    #[error("incompatible row index, column index and value lengths")]
    TripleLengthMismatch,

    #[error("indices should be integer")]
    IndexNotInteger,

    #[error("'x' slot should match the declared element type")]
    XWrongType,

    /// The same `(row, col)` pair occurs more than once
    #[error("duplicate (row, column) indices")]
    DuplicateIndex,
}

/// Errors surfaced by readers, the factory and descriptor ingestion
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReaderError {
    #[error("{dim} index out of range ({index} >= {extent})")]
    DimIndexOutOfRange {
        dim: Dimension,
        index: usize,
        extent: usize,
    },

    #[error("{dim} start index is greater than {dim} end index ({first} > {last})")]
    RangeOutOfOrder {
        dim: Dimension,
        first: usize,
        last: usize,
    },

    #[error("{dim} end index out of range ({last} > {extent})")]
    RangeEndOutOfRange {
        dim: Dimension,
        last: usize,
        extent: usize,
    },

    #[error("{dim} indices are not strictly increasing (at position {position})")]
    IndicesNotStrictlyIncreasing { dim: Dimension, position: usize },

    #[error("malformed CSC matrix: {0}")]
    MalformedCsc(CscDefect),

    #[error("malformed coordinate matrix: {0}")]
    MalformedCoordinate(CoordinateDefect),

    #[error("dense buffer should hold {expected} values, found {found}")]
    MalformedDense { expected: usize, found: usize },

    #[error("expected {expected} values, found {found}")]
    ValueTypeMismatch {
        expected: ElementType,
        found: ElementType,
    },

    #[error("'{kind}' is not a recognized matrix representation")]
    UnrecognizedRepresentation { kind: String },

    #[error("'{kind}' descriptor is missing its '{slot}' slot")]
    MissingSlot { kind: String, slot: String },

    #[error("workspace holds {found} elements but {needed} are required")]
    WorkspaceTooSmall { needed: usize, found: usize },
}

/// Result type for reader operations
pub type Result<T> = std::result::Result<T, ReaderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_dimension() {
        let err = ReaderError::DimIndexOutOfRange {
            dim: Dimension::Row,
            index: 5,
            extent: 3,
        };
        assert!(err.to_string().starts_with("row index out of range"));

        let err = ReaderError::RangeOutOfOrder {
            dim: Dimension::Column,
            first: 2,
            last: 1,
        };
        assert!(err
            .to_string()
            .starts_with("column start index is greater than column end index"));
    }

    #[test]
    fn test_structural_messages_name_the_slot() {
        let err = ReaderError::MalformedCsc(CscDefect::PNotSorted);
        assert_eq!(err.to_string(), "malformed CSC matrix: 'p' slot should be sorted");

        let err = ReaderError::MalformedCoordinate(CoordinateDefect::IdxOutOfRange);
        assert_eq!(
            err.to_string(),
            "malformed coordinate matrix: indices out of bounds"
        );
    }

    #[test]
    fn test_defects_are_errors() {
        fn as_error(err: &dyn std::error::Error) -> String {
            err.to_string()
        }

        assert_eq!(
            as_error(&CscDefect::IWithinColumnNotSorted),
            "'i' in each column should be strictly increasing"
        );
        assert_eq!(
            as_error(&CoordinateDefect::XWrongType),
            "'x' slot should match the declared element type"
        );
    }
}
