//! Utilities for converting between our readers and external libraries

use ndarray::{Array2, ArrayView2, ShapeBuilder};
use num_traits::Num;
use sprs::CsMat;

use crate::error::{ReaderError, Result};
use crate::matrix::{CscReader, DenseReader};
use crate::reader::Reader;
use crate::value::MatrixValue;

/// Converts a CSC reader to sprs CsMat format (as CSC)
pub fn to_sprs_csc<T>(reader: &CscReader<T>) -> CsMat<T>
where
    T: MatrixValue + Num + Default,
{
    CsMat::new_csc(
        (reader.nrow(), reader.ncol()),
        reader.col_pointers().to_vec(),
        reader.row_indices().to_vec(),
        reader.values().to_vec(),
    )
}

/// Converts a sprs CsMat to a validated CSC reader
///
/// CSR input is converted to CSC first.
pub fn from_sprs_csc<T>(matrix: CsMat<T>) -> Result<CscReader<T>>
where
    T: MatrixValue + Num + Default,
{
    // Ensure matrix is in CSC format
    let matrix = if matrix.is_csc() {
        matrix
    } else {
        matrix.to_csc()
    };

    let (nrow, ncol) = matrix.shape();
    let (indptr, indices, data) = matrix.into_raw_storage();

    CscReader::new(nrow, ncol, data, &indices, &indptr)
}

/// Copies a dense reader into an ndarray in column-major layout
pub fn to_ndarray<T: MatrixValue>(reader: &DenseReader<T>) -> Result<Array2<T>> {
    let shape = (reader.nrow(), reader.ncol()).f();
    Array2::from_shape_vec(shape, reader.values().to_vec()).map_err(|_| {
        ReaderError::MalformedDense {
            expected: reader.nrow() * reader.ncol(),
            found: reader.values().len(),
        }
    })
}

/// Builds a dense reader from any ndarray view, whatever its memory order
pub fn from_ndarray<T: MatrixValue>(view: ArrayView2<'_, T>) -> Result<DenseReader<T>> {
    let (nrow, ncol) = view.dim();
    // Iterating the transpose in logical order walks the original column by column.
    let values = view.t().iter().copied().collect();
    DenseReader::new(nrow, ncol, values)
}

impl<T: MatrixValue> DenseReader<T> {
    /// See [`from_ndarray`]
    pub fn from_array(view: ArrayView2<'_, T>) -> Result<Self> {
        from_ndarray(view)
    }

    /// See [`to_ndarray`]
    pub fn to_array(&self) -> Result<Array2<T>> {
        to_ndarray(self)
    }
}

impl<T: MatrixValue + Num + Default> CscReader<T> {
    /// See [`from_sprs_csc`]
    pub fn from_sprs(matrix: CsMat<T>) -> Result<Self> {
        from_sprs_csc(matrix)
    }

    /// See [`to_sprs_csc`]
    pub fn to_sprs(&self) -> CsMat<T> {
        to_sprs_csc(self)
    }
}
