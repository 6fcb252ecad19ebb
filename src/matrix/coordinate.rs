//! Reader for coordinate-list (triplet) sparse matrices
//!
//! Triplets arrive with 1-based row and column indices. They are normalized
//! once into CSC form and then served by the same core as `CscReader`.

use num_traits::ToPrimitive;
use tracing::debug;

use crate::descriptor::{MatrixDescriptor, Vector};
use crate::error::{CoordinateDefect, ReaderError, Result};
use crate::matrix::csc::CscReader;
use crate::matrix::csc_core::{CscCore, CursorState};
use crate::reader::{Reader, SparseReader};
use crate::sparse_index::SparseIndex;
use crate::utils::exclusive_scan;
use crate::value::MatrixValue;

/// A coordinate-list matrix behind the reader façade
///
/// Extraction is served by the compressed `CscReader` built on ingestion.
#[derive(Debug, Clone)]
pub struct CoordinateReader<T> {
    inner: CscReader<T>,
}

impl<T: MatrixValue> CoordinateReader<T> {
    /// Creates a reader from parallel `(row, col, value)` triplets
    ///
    /// # Arguments
    ///
    /// * `nrow` - Number of rows
    /// * `ncol` - Number of columns
    /// * `values` - Value of each triplet
    /// * `rows` - 1-based row of each triplet, in `[1, nrow]`
    /// * `cols` - 1-based column of each triplet, in `[1, ncol]`
    ///
    /// Triplets already sorted by column then row are compressed in a single
    /// pass; anything else is sorted once. Duplicate `(row, col)` pairs are
    /// rejected.
    pub fn new<I: ToPrimitive>(
        nrow: usize,
        ncol: usize,
        values: Vec<T>,
        rows: &[I],
        cols: &[I],
    ) -> Result<Self> {
        let core = normalize(nrow, ncol, values, rows, cols)
            .map_err(ReaderError::MalformedCoordinate)?;

        Ok(Self {
            inner: CscReader::from_core(core),
        })
    }

    /// Creates a reader from a `coordinate` descriptor
    ///
    /// The descriptor must carry integer `i` (rows) and `j` (columns) slots and
    /// an `x` slot of the declared element type.
    pub fn from_descriptor(mut descriptor: MatrixDescriptor) -> Result<Self> {
        descriptor.check_element_type::<T>()?;

        let rows = match descriptor.take_slot("i")? {
            Vector::Integer(rows) => rows,
            _ => return Err(ReaderError::MalformedCoordinate(CoordinateDefect::IndexNotInteger)),
        };
        let cols = match descriptor.take_slot("j")? {
            Vector::Integer(cols) => cols,
            _ => return Err(ReaderError::MalformedCoordinate(CoordinateDefect::IndexNotInteger)),
        };
        let x = T::unwrap_vector(descriptor.take_slot("x")?)
            .map_err(|_| ReaderError::MalformedCoordinate(CoordinateDefect::XWrongType))?;

        Self::new(descriptor.nrow(), descriptor.ncol(), x, &rows, &cols)
    }

    /// Returns the number of non-zero elements in the matrix
    pub fn nnz(&self) -> usize {
        self.inner.nnz()
    }

    /// Non-zero values after compression, in column-major order
    pub fn values(&self) -> &[T] {
        self.inner.values()
    }

    /// Zero-based row index of each non-zero value after compression
    pub fn row_indices(&self) -> &[usize] {
        self.inner.row_indices()
    }

    /// Column pointers after compression (size: ncol + 1)
    pub fn col_pointers(&self) -> &[usize] {
        self.inner.col_pointers()
    }

    pub fn cursor_state(&self) -> CursorState {
        self.inner.cursor_state()
    }

    /// A CSC reader sharing this reader's compressed buffers
    pub fn to_csc(&self) -> CscReader<T> {
        self.inner.clone()
    }
}

/// Validate triplets and compress them into a CSC core
fn normalize<T: MatrixValue, I: ToPrimitive>(
    nrow: usize,
    ncol: usize,
    values: Vec<T>,
    rows: &[I],
    cols: &[I],
) -> std::result::Result<CscCore<T>, CoordinateDefect> {
    let nnz = values.len();
    if rows.len() != nnz || cols.len() != nnz {
        return Err(CoordinateDefect::TripleLengthMismatch);
    }

    let to_zero_based = |raw: &I, extent: usize| {
        raw.to_usize()
            .filter(|&idx| idx >= 1 && idx <= extent)
            .map(|idx| idx - 1)
            .ok_or(CoordinateDefect::IdxOutOfRange)
    };

    let mut row_indices = Vec::with_capacity(nnz);
    let mut col_indices = Vec::with_capacity(nnz);
    let mut col_counts = vec![0; ncol];
    let mut sorted = true;

    for (raw_row, raw_col) in rows.iter().zip(cols) {
        let r = to_zero_based(raw_row, nrow)?;
        let c = to_zero_based(raw_col, ncol)?;

        if sorted {
            if let (Some(&prev_r), Some(&prev_c)) = (row_indices.last(), col_indices.last()) {
                if prev_c > c || (prev_c == c && prev_r > r) {
                    sorted = false;
                } else if prev_c == c && prev_r == r {
                    return Err(CoordinateDefect::DuplicateIndex);
                }
            }
        }

        row_indices.push(r);
        col_indices.push(c);
        col_counts[c] += 1;
    }

    // Column counts do not depend on triplet order.
    let col_pointers = exclusive_scan(&col_counts);

    if sorted {
        return Ok(CscCore::new(nrow, ncol, values, row_indices, col_pointers));
    }

    debug!(nnz, "coordinate triplets are unsorted, sorting into column-major order");

    let mut triplets: Vec<(usize, usize, usize)> = col_indices
        .into_iter()
        .zip(row_indices)
        .enumerate()
        .map(|(position, (c, r))| (c, r, position))
        .collect();
    triplets.sort_unstable();

    if triplets
        .windows(2)
        .any(|pair| pair[0].0 == pair[1].0 && pair[0].1 == pair[1].1)
    {
        return Err(CoordinateDefect::DuplicateIndex);
    }

    let row_indices = triplets.iter().map(|&(_, r, _)| r).collect();
    let values = triplets.iter().map(|&(_, _, position)| values[position]).collect();

    Ok(CscCore::new(nrow, ncol, values, row_indices, col_pointers))
}

impl<T: MatrixValue> Reader<T> for CoordinateReader<T> {
    fn nrow(&self) -> usize {
        self.inner.nrow()
    }

    fn ncol(&self) -> usize {
        self.inner.ncol()
    }

    fn get_element(&self, r: usize, c: usize) -> Result<T> {
        self.inner.get_element(r, c)
    }

    fn get_col(&self, c: usize, out: &mut [T], first: usize, last: usize) -> Result<()> {
        self.inner.get_col(c, out, first, last)
    }

    fn get_row(&mut self, r: usize, out: &mut [T], first: usize, last: usize) -> Result<()> {
        self.inner.get_row(r, out, first, last)
    }
}

impl<T: MatrixValue> SparseReader<T> for CoordinateReader<T> {
    fn get_col_sparse<'a>(
        &'a self,
        c: usize,
        work_x: &'a mut [T],
        work_i: &'a mut [usize],
        first: usize,
        last: usize,
    ) -> Result<SparseIndex<'a, T>> {
        self.inner.get_col_sparse(c, work_x, work_i, first, last)
    }

    fn get_row_sparse<'w>(
        &mut self,
        r: usize,
        work_x: &'w mut [T],
        work_i: &'w mut [usize],
        first: usize,
        last: usize,
    ) -> Result<SparseIndex<'w, T>> {
        self.inner.get_row_sparse(r, work_x, work_i, first, last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_triplets_take_single_pass() {
        let reader =
            CoordinateReader::new(3, 2, vec![1, 2, 3], &[1, 3, 2], &[1, 1, 2]).unwrap();
        assert_eq!(reader.row_indices(), &[0, 2, 1]);
        assert_eq!(reader.values(), &[1, 2, 3]);
        assert_eq!(reader.col_pointers(), &[0, 2, 3]);
    }

    #[test]
    fn test_unsorted_triplets_are_sorted_stably() {
        let reader =
            CoordinateReader::new(3, 1, vec![10, 20, 30], &[3, 1, 2], &[1, 1, 1]).unwrap();
        assert_eq!(reader.values(), &[20, 30, 10]);
        assert_eq!(reader.row_indices(), &[0, 1, 2]);
        assert_eq!(reader.col_pointers(), &[0, 3]);
    }

    #[test]
    fn test_empty_columns_get_pointers() {
        let reader = CoordinateReader::new(2, 4, vec![5.0], &[2], &[3]).unwrap();
        assert_eq!(reader.col_pointers(), &[0, 0, 0, 1, 1]);
    }

    #[test]
    fn test_defects() {
        let err = CoordinateReader::new(2, 2, vec![1, 2], &[1], &[1, 2]).unwrap_err();
        assert_eq!(
            err,
            ReaderError::MalformedCoordinate(CoordinateDefect::TripleLengthMismatch)
        );

        let err = CoordinateReader::new(2, 2, vec![1], &[0], &[1]).unwrap_err();
        assert_eq!(err, ReaderError::MalformedCoordinate(CoordinateDefect::IdxOutOfRange));

        let err = CoordinateReader::new(2, 2, vec![1], &[1], &[3]).unwrap_err();
        assert_eq!(err, ReaderError::MalformedCoordinate(CoordinateDefect::IdxOutOfRange));
    }

    #[test]
    fn test_to_csc_shares_buffers_and_checks() {
        let mut reader =
            CoordinateReader::new(3, 2, vec![1, 2, 3], &[3, 1, 2], &[2, 1, 1]).unwrap();
        let mut csc = reader.to_csc();
        assert!(std::ptr::eq(reader.values(), csc.values()));
        assert!(std::ptr::eq(reader.row_indices(), csc.row_indices()));

        let mut from_coo = [0; 2];
        let mut from_csc = [0; 2];
        for r in 0..3 {
            reader.get_row(r, &mut from_coo, 0, 2).unwrap();
            csc.get_row(r, &mut from_csc, 0, 2).unwrap();
            assert_eq!(from_coo, from_csc);
        }
        assert_eq!(reader.get_element(2, 1), Ok(1));
        assert_eq!(reader.get_element(3, 0), csc.get_element(3, 0));
        assert!(reader.get_element(3, 0).is_err());
    }

    #[test]
    fn test_x_slot_type_checked() {
        let desc = MatrixDescriptor::coordinate(2, 2, vec![1, 2], vec![1, 2], vec![1, 2])
            .with_slot("x", vec![1.0, 2.0]);
        assert_eq!(
            CoordinateReader::<i32>::from_descriptor(desc).unwrap_err(),
            ReaderError::MalformedCoordinate(CoordinateDefect::XWrongType)
        );
    }

    #[test]
    fn test_duplicates_rejected_on_both_paths() {
        let sorted = CoordinateReader::new(2, 2, vec![1, 2], &[1, 1], &[2, 2]).unwrap_err();
        assert_eq!(
            sorted,
            ReaderError::MalformedCoordinate(CoordinateDefect::DuplicateIndex)
        );

        let unsorted =
            CoordinateReader::new(2, 2, vec![1, 2, 3], &[1, 2, 1], &[2, 1, 2]).unwrap_err();
        assert_eq!(
            unsorted,
            ReaderError::MalformedCoordinate(CoordinateDefect::DuplicateIndex)
        );
    }
}
