//! Tagged descriptions of in-memory matrices handed to the factory
//!
//! A descriptor names its representation with a `kind` tag, declares an
//! element type, and carries named buffers ("slots"):
//!
//! | Kind | Slots |
//! |---|---|
//! | `dense` | `x`: column-major values |
//! | `csc` | `x`: values, `i`: integer row indices, `p`: integer column pointers |
//! | `coordinate` | `x`: values, `i`: integer 1-based rows, `j`: integer 1-based columns |

use std::collections::HashMap;

use crate::error::{ReaderError, Result};
use crate::value::{ElementType, Logical, MatrixValue};

pub const DENSE: &str = "dense";
pub const CSC: &str = "csc";
pub const COORDINATE: &str = "coordinate";

/// A typed buffer stored in a descriptor slot
#[derive(Debug, Clone, PartialEq)]
pub enum Vector {
    Integer(Vec<i32>),
    Double(Vec<f64>),
    Logical(Vec<Logical>),
}

impl Vector {
    pub fn element_type(&self) -> ElementType {
        match self {
            Vector::Integer(_) => ElementType::Integer,
            Vector::Double(_) => ElementType::Double,
            Vector::Logical(_) => ElementType::Logical,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Vector::Integer(v) => v.len(),
            Vector::Double(v) => v.len(),
            Vector::Logical(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<i32>> for Vector {
    fn from(values: Vec<i32>) -> Self {
        Vector::Integer(values)
    }
}

impl From<Vec<f64>> for Vector {
    fn from(values: Vec<f64>) -> Self {
        Vector::Double(values)
    }
}

impl From<Vec<Logical>> for Vector {
    fn from(values: Vec<Logical>) -> Self {
        Vector::Logical(values)
    }
}

/// An opaque matrix description: kind tag, element type, dimensions and slots
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixDescriptor {
    kind: String,
    element_type: ElementType,
    nrow: usize,
    ncol: usize,
    slots: HashMap<String, Vector>,
}

impl MatrixDescriptor {
    /// An empty descriptor; add buffers with `with_slot`
    pub fn new(
        kind: impl Into<String>,
        element_type: ElementType,
        nrow: usize,
        ncol: usize,
    ) -> Self {
        Self {
            kind: kind.into(),
            element_type,
            nrow,
            ncol,
            slots: HashMap::new(),
        }
    }

    /// A `dense` descriptor over a column-major buffer
    pub fn dense(nrow: usize, ncol: usize, x: impl Into<Vector>) -> Self {
        let x = x.into();
        Self::new(DENSE, x.element_type(), nrow, ncol).with_slot("x", x)
    }

    /// A `csc` descriptor over zero-based row indices and column pointers
    pub fn csc(nrow: usize, ncol: usize, x: impl Into<Vector>, i: Vec<i32>, p: Vec<i32>) -> Self {
        let x = x.into();
        Self::new(CSC, x.element_type(), nrow, ncol)
            .with_slot("x", x)
            .with_slot("i", Vector::Integer(i))
            .with_slot("p", Vector::Integer(p))
    }

    /// A `coordinate` descriptor over 1-based row and column indices
    pub fn coordinate(
        nrow: usize,
        ncol: usize,
        x: impl Into<Vector>,
        rows: Vec<i32>,
        cols: Vec<i32>,
    ) -> Self {
        let x = x.into();
        Self::new(COORDINATE, x.element_type(), nrow, ncol)
            .with_slot("x", x)
            .with_slot("i", Vector::Integer(rows))
            .with_slot("j", Vector::Integer(cols))
    }

    /// Set (or replace) a named buffer
    pub fn with_slot(mut self, name: impl Into<String>, vector: impl Into<Vector>) -> Self {
        self.slots.insert(name.into(), vector.into());
        self
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn element_type(&self) -> ElementType {
        self.element_type
    }

    pub fn nrow(&self) -> usize {
        self.nrow
    }

    pub fn ncol(&self) -> usize {
        self.ncol
    }

    pub fn slot(&self, name: &str) -> Option<&Vector> {
        self.slots.get(name)
    }

    /// Move a buffer out of the descriptor
    pub fn take_slot(&mut self, name: &str) -> Result<Vector> {
        self.slots
            .remove(name)
            .ok_or_else(|| ReaderError::MissingSlot {
                kind: self.kind.clone(),
                slot: name.to_string(),
            })
    }

    /// Check the declared element type against a reader's value type
    pub fn check_element_type<T: MatrixValue>(&self) -> Result<ElementType> {
        if self.element_type != T::ELEMENT_TYPE {
            return Err(ReaderError::ValueTypeMismatch {
                expected: T::ELEMENT_TYPE,
                found: self.element_type,
            });
        }
        Ok(self.element_type)
    }
}
