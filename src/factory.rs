//! Choosing a concrete reader for a descriptor
//!
//! | Kind tag | Reader |
//! |---|---|
//! | `dense` | `DenseReader` |
//! | `csc` | `CscReader` |
//! | `coordinate` | `CoordinateReader` |
//!
//! Anything else fails with `UnrecognizedRepresentation`.

use tracing::debug;

use crate::descriptor::{MatrixDescriptor, COORDINATE, CSC, DENSE};
use crate::error::{ReaderError, Result};
use crate::matrix::{CoordinateReader, CscReader, DenseReader};
use crate::reader::{Reader, SparseReader};
use crate::sparse_index::SparseIndex;
use crate::value::{ElementType, Logical, MatrixValue};

/// Any backend, dispatched by a central match
///
/// Cloning shares the underlying buffers; sparse clones start with a fresh
/// row cursor.
#[derive(Debug, Clone)]
pub enum AnyReader<T> {
    Dense(DenseReader<T>),
    Csc(CscReader<T>),
    Coordinate(CoordinateReader<T>),
}

impl<T: MatrixValue> AnyReader<T> {
    /// Whether the backend stores only non-zero elements
    pub fn is_sparse(&self) -> bool {
        !matches!(self, AnyReader::Dense(_))
    }

    /// Number of stored elements (`nrow * ncol` for dense backends)
    pub fn nnz(&self) -> usize {
        match self {
            AnyReader::Dense(reader) => reader.values().len(),
            AnyReader::Csc(reader) => reader.nnz(),
            AnyReader::Coordinate(reader) => reader.nnz(),
        }
    }
}

/// Build a reader for `descriptor` with element type `T`
///
/// # Errors
///
/// - `ValueTypeMismatch` if the declared element type is not `T`
/// - `UnrecognizedRepresentation` if the kind tag is unknown
/// - any construction error of the chosen backend
pub fn read_matrix<T: MatrixValue>(descriptor: MatrixDescriptor) -> Result<AnyReader<T>> {
    descriptor.check_element_type::<T>()?;

    debug!(
        kind = descriptor.kind(),
        nrow = descriptor.nrow(),
        ncol = descriptor.ncol(),
        "selecting matrix reader"
    );

    let kind = descriptor.kind().to_string();
    match kind.as_str() {
        DENSE => DenseReader::from_descriptor(descriptor).map(AnyReader::Dense),
        CSC => CscReader::from_descriptor(descriptor).map(AnyReader::Csc),
        COORDINATE => CoordinateReader::from_descriptor(descriptor).map(AnyReader::Coordinate),
        _ => Err(ReaderError::UnrecognizedRepresentation { kind }),
    }
}

/// Like `read_matrix`, but only sparse kinds are accepted
pub fn read_sparse_matrix<T: MatrixValue>(descriptor: MatrixDescriptor) -> Result<AnyReader<T>> {
    let kind = descriptor.kind().to_string();
    match kind.as_str() {
        CSC | COORDINATE => read_matrix(descriptor),
        _ => Err(ReaderError::UnrecognizedRepresentation { kind }),
    }
}

/// A reader whose element type is chosen at runtime
#[derive(Debug, Clone)]
pub enum DynReader {
    Integer(AnyReader<i32>),
    Double(AnyReader<f64>),
    Logical(AnyReader<Logical>),
}

impl DynReader {
    pub fn element_type(&self) -> ElementType {
        match self {
            DynReader::Integer(_) => ElementType::Integer,
            DynReader::Double(_) => ElementType::Double,
            DynReader::Logical(_) => ElementType::Logical,
        }
    }

    pub fn nrow(&self) -> usize {
        match self {
            DynReader::Integer(reader) => reader.nrow(),
            DynReader::Double(reader) => reader.nrow(),
            DynReader::Logical(reader) => reader.nrow(),
        }
    }

    pub fn ncol(&self) -> usize {
        match self {
            DynReader::Integer(reader) => reader.ncol(),
            DynReader::Double(reader) => reader.ncol(),
            DynReader::Logical(reader) => reader.ncol(),
        }
    }
}

/// Build a reader using the descriptor's declared element type
pub fn read_matrix_dyn(descriptor: MatrixDescriptor) -> Result<DynReader> {
    match descriptor.element_type() {
        ElementType::Integer => read_matrix(descriptor).map(DynReader::Integer),
        ElementType::Double => read_matrix(descriptor).map(DynReader::Double),
        ElementType::Logical => read_matrix(descriptor).map(DynReader::Logical),
    }
}

impl<T: MatrixValue> Reader<T> for AnyReader<T> {
    fn nrow(&self) -> usize {
        match self {
            AnyReader::Dense(reader) => reader.nrow(),
            AnyReader::Csc(reader) => reader.nrow(),
            AnyReader::Coordinate(reader) => reader.nrow(),
        }
    }

    fn ncol(&self) -> usize {
        match self {
            AnyReader::Dense(reader) => reader.ncol(),
            AnyReader::Csc(reader) => reader.ncol(),
            AnyReader::Coordinate(reader) => reader.ncol(),
        }
    }

    fn get_element(&self, r: usize, c: usize) -> Result<T> {
        match self {
            AnyReader::Dense(reader) => reader.get_element(r, c),
            AnyReader::Csc(reader) => reader.get_element(r, c),
            AnyReader::Coordinate(reader) => reader.get_element(r, c),
        }
    }

    fn get_col(&self, c: usize, out: &mut [T], first: usize, last: usize) -> Result<()> {
        match self {
            AnyReader::Dense(reader) => reader.get_col(c, out, first, last),
            AnyReader::Csc(reader) => reader.get_col(c, out, first, last),
            AnyReader::Coordinate(reader) => reader.get_col(c, out, first, last),
        }
    }

    fn get_row(&mut self, r: usize, out: &mut [T], first: usize, last: usize) -> Result<()> {
        match self {
            AnyReader::Dense(reader) => reader.get_row(r, out, first, last),
            AnyReader::Csc(reader) => reader.get_row(r, out, first, last),
            AnyReader::Coordinate(reader) => reader.get_row(r, out, first, last),
        }
    }

    fn get_col_slice<'a>(
        &'a self,
        c: usize,
        work: &'a mut [T],
        first: usize,
        last: usize,
    ) -> Result<&'a [T]> {
        match self {
            AnyReader::Dense(reader) => reader.get_col_slice(c, work, first, last),
            AnyReader::Csc(reader) => reader.get_col_slice(c, work, first, last),
            AnyReader::Coordinate(reader) => reader.get_col_slice(c, work, first, last),
        }
    }

    fn get_rows(&self, rows: &[usize], out: &mut [T], first: usize, last: usize) -> Result<()> {
        match self {
            AnyReader::Dense(reader) => reader.get_rows(rows, out, first, last),
            AnyReader::Csc(reader) => reader.get_rows(rows, out, first, last),
            AnyReader::Coordinate(reader) => reader.get_rows(rows, out, first, last),
        }
    }
}

impl<T: MatrixValue> SparseReader<T> for AnyReader<T> {
    fn get_col_sparse<'a>(
        &'a self,
        c: usize,
        work_x: &'a mut [T],
        work_i: &'a mut [usize],
        first: usize,
        last: usize,
    ) -> Result<SparseIndex<'a, T>> {
        match self {
            AnyReader::Dense(reader) => reader.get_col_sparse(c, work_x, work_i, first, last),
            AnyReader::Csc(reader) => reader.get_col_sparse(c, work_x, work_i, first, last),
            AnyReader::Coordinate(reader) => {
                reader.get_col_sparse(c, work_x, work_i, first, last)
            }
        }
    }

    fn get_row_sparse<'w>(
        &mut self,
        r: usize,
        work_x: &'w mut [T],
        work_i: &'w mut [usize],
        first: usize,
        last: usize,
    ) -> Result<SparseIndex<'w, T>> {
        match self {
            AnyReader::Dense(reader) => reader.get_row_sparse(r, work_x, work_i, first, last),
            AnyReader::Csc(reader) => reader.get_row_sparse(r, work_x, work_i, first, last),
            AnyReader::Coordinate(reader) => {
                reader.get_row_sparse(r, work_x, work_i, first, last)
            }
        }
    }
}
