//! Reader for validated compressed sparse column (CSC) matrices

use num_traits::ToPrimitive;

use crate::descriptor::{MatrixDescriptor, Vector};
use crate::dims::{check_workspace, DimChecker};
use crate::error::{CscDefect, ReaderError, Result};
use crate::matrix::csc_core::{CscCore, CursorState};
use crate::reader::{Reader, SparseReader};
use crate::sparse_index::SparseIndex;
use crate::value::MatrixValue;

/// A CSC matrix behind the reader façade
///
/// Structural invariants are checked once, on construction:
/// - `col_pointers` has `ncol + 1` entries, starts at 0, ends at nnz and never decreases
/// - `values` and `row_indices` have the same length
/// - within each column, row indices are strictly increasing and lie in `[0, nrow)`
///
/// Every extraction is bounds-checked before it reaches the core.
#[derive(Debug, Clone)]
pub struct CscReader<T> {
    dims: DimChecker,
    core: CscCore<T>,
}

impl<T: MatrixValue> CscReader<T> {
    /// Creates a new CSC reader, validating the buffers
    ///
    /// # Arguments
    ///
    /// * `nrow` - Number of rows
    /// * `ncol` - Number of columns
    /// * `values` - Non-zero values
    /// * `row_indices` - Row of each non-zero value
    /// * `col_pointers` - Offset of the first non-zero of each column, plus nnz
    ///
    /// Indices may be any primitive integer; negative entries are rejected.
    pub fn new<I: ToPrimitive>(
        nrow: usize,
        ncol: usize,
        values: Vec<T>,
        row_indices: &[I],
        col_pointers: &[I],
    ) -> Result<Self> {
        let (row_indices, col_pointers) =
            validate_csc(nrow, ncol, values.len(), row_indices, col_pointers)
                .map_err(ReaderError::MalformedCsc)?;

        Ok(Self {
            dims: DimChecker::new(nrow, ncol),
            core: CscCore::new(nrow, ncol, values, row_indices, col_pointers),
        })
    }

    /// Creates a CSC reader from a `csc` descriptor
    ///
    /// The descriptor must carry integer `i` and `p` slots and an `x` slot of
    /// the declared element type.
    pub fn from_descriptor(mut descriptor: MatrixDescriptor) -> Result<Self> {
        descriptor.check_element_type::<T>()?;

        let i = match descriptor.take_slot("i")? {
            Vector::Integer(i) => i,
            _ => return Err(ReaderError::MalformedCsc(CscDefect::INotInteger)),
        };
        let p = match descriptor.take_slot("p")? {
            Vector::Integer(p) => p,
            _ => return Err(ReaderError::MalformedCsc(CscDefect::PNotInteger)),
        };
        let x = T::unwrap_vector(descriptor.take_slot("x")?)
            .map_err(|_| ReaderError::MalformedCsc(CscDefect::XWrongType))?;

        Self::new(descriptor.nrow(), descriptor.ncol(), x, &i, &p)
    }

    /// Returns the number of non-zero elements in the matrix
    pub fn nnz(&self) -> usize {
        self.core.nnz()
    }

    /// Non-zero values in column-major order
    pub fn values(&self) -> &[T] {
        self.core.values()
    }

    /// Zero-based row index of each non-zero value
    pub fn row_indices(&self) -> &[usize] {
        self.core.row_indices()
    }

    /// Column pointers (size: ncol + 1)
    pub fn col_pointers(&self) -> &[usize] {
        self.core.col_pointers()
    }

    pub fn cursor_state(&self) -> CursorState {
        self.core.cursor_state()
    }

    pub(crate) fn from_core(core: CscCore<T>) -> Self {
        Self {
            dims: DimChecker::new(core.nrow(), core.ncol()),
            core,
        }
    }
}

/// Check the CSC structural invariants, converting indices to `usize`
pub(crate) fn validate_csc<I: ToPrimitive>(
    nrow: usize,
    ncol: usize,
    nnz: usize,
    row_indices: &[I],
    col_pointers: &[I],
) -> std::result::Result<(Vec<usize>, Vec<usize>), CscDefect> {
    if row_indices.len() != nnz {
        return Err(CscDefect::XILengthMismatch);
    }
    if col_pointers.len() != ncol + 1 {
        return Err(CscDefect::PWrongLength);
    }
    if col_pointers[0].to_usize() != Some(0) {
        return Err(CscDefect::PFirstNonzero);
    }
    if col_pointers[ncol].to_usize() != Some(nnz) {
        return Err(CscDefect::PLastNotNnz);
    }

    let mut p = Vec::with_capacity(ncol + 1);
    for raw in col_pointers {
        let current = raw.to_usize().ok_or(CscDefect::PNegative)?;
        if p.last().is_some_and(|&previous| current < previous) {
            return Err(CscDefect::PNotSorted);
        }
        p.push(current);
    }

    let mut i = Vec::with_capacity(nnz);
    for raw in row_indices {
        i.push(raw.to_usize().ok_or(CscDefect::IOutOfRange)?);
    }

    for window in p.windows(2) {
        let column = &i[window[0]..window[1]];
        if column.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(CscDefect::IWithinColumnNotSorted);
        }
    }

    if i.iter().any(|&row| row >= nrow) {
        return Err(CscDefect::IOutOfRange);
    }

    Ok((i, p))
}

impl<T: MatrixValue> Reader<T> for CscReader<T> {
    fn nrow(&self) -> usize {
        self.dims.nrow()
    }

    fn ncol(&self) -> usize {
        self.dims.ncol()
    }

    fn get_element(&self, r: usize, c: usize) -> Result<T> {
        self.dims.check_element(r, c)?;
        Ok(self.core.get_element(r, c))
    }

    fn get_col(&self, c: usize, out: &mut [T], first: usize, last: usize) -> Result<()> {
        self.dims.check_colargs(c, first, last)?;
        check_workspace(out.len(), last - first)?;
        self.core.get_col_dense(c, out, first, last);
        Ok(())
    }

    fn get_row(&mut self, r: usize, out: &mut [T], first: usize, last: usize) -> Result<()> {
        self.dims.check_rowargs(r, first, last)?;
        check_workspace(out.len(), last - first)?;
        self.core.get_row_dense(r, out, first, last);
        Ok(())
    }
}

impl<T: MatrixValue> SparseReader<T> for CscReader<T> {
    fn get_col_sparse<'a>(
        &'a self,
        c: usize,
        _work_x: &'a mut [T],
        _work_i: &'a mut [usize],
        first: usize,
        last: usize,
    ) -> Result<SparseIndex<'a, T>> {
        self.dims.check_colargs(c, first, last)?;
        Ok(self.core.get_col(c, first, last))
    }

    fn get_row_sparse<'w>(
        &mut self,
        r: usize,
        work_x: &'w mut [T],
        work_i: &'w mut [usize],
        first: usize,
        last: usize,
    ) -> Result<SparseIndex<'w, T>> {
        self.dims.check_rowargs(r, first, last)?;
        check_workspace(work_x.len(), last - first)?;
        check_workspace(work_i.len(), last - first)?;
        Ok(self.core.get_row(r, work_x, work_i, first, last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_matrix() {
        let reader =
            CscReader::new(3, 3, vec![1, 4, 2, 3, 5], &[0, 2, 0, 1, 2], &[0, 2, 4, 5]).unwrap();

        assert_eq!(reader.nrow(), 3);
        assert_eq!(reader.ncol(), 3);
        assert_eq!(reader.nnz(), 5);
        assert_eq!(reader.col_pointers(), &[0, 2, 4, 5]);
    }

    #[test]
    fn test_structural_defects() {
        fn check(i: &[i32], p: &[i32], nnz: usize) -> Option<CscDefect> {
            validate_csc(3, 2, nnz, i, p).err()
        }

        assert_eq!(check(&[0, 1], &[0, 1, 2], 3), Some(CscDefect::XILengthMismatch));
        assert_eq!(check(&[0, 1], &[0, 2], 2), Some(CscDefect::PWrongLength));
        assert_eq!(check(&[0, 1], &[1, 1, 2], 2), Some(CscDefect::PFirstNonzero));
        assert_eq!(check(&[0, 1], &[0, 1, 3], 2), Some(CscDefect::PLastNotNnz));
        assert_eq!(check(&[0, 1, 2], &[0, -1, 3], 3), Some(CscDefect::PNegative));
        assert_eq!(check(&[0, 1, 2], &[0, 3, 3], 3), None);
        assert_eq!(check(&[0, -1], &[0, 1, 2], 2), Some(CscDefect::IOutOfRange));
        assert_eq!(check(&[0, 3], &[0, 1, 2], 2), Some(CscDefect::IOutOfRange));
        assert_eq!(check(&[1, 0], &[0, 2, 2], 2), Some(CscDefect::IWithinColumnNotSorted));
        assert_eq!(check(&[1, 1], &[0, 2, 2], 2), Some(CscDefect::IWithinColumnNotSorted));
        // Decreasing rows across a column boundary are fine.
        assert_eq!(check(&[2, 0], &[0, 1, 2], 2), None);
    }

    #[test]
    fn test_unsorted_pointers() {
        let err = CscReader::new(3, 2, vec![1.0, 2.0], &[0, 1], &[0, 2, 1]).unwrap_err();
        // The last pointer is checked against nnz before sortedness.
        assert_eq!(err, ReaderError::MalformedCsc(CscDefect::PLastNotNnz));

        let err = CscReader::new(3, 3, vec![1.0, 2.0], &[0, 1], &[0, 2, 1, 2]).unwrap_err();
        assert_eq!(err, ReaderError::MalformedCsc(CscDefect::PNotSorted));
    }

    #[test]
    fn test_column_order_checked_before_row_range() {
        // Row 5 is out of range for 3 rows, but the column is also unsorted.
        let err = CscReader::new(3, 1, vec![1.0, 2.0], &[5, 0], &[0, 2]).unwrap_err();
        assert_eq!(err, ReaderError::MalformedCsc(CscDefect::IWithinColumnNotSorted));

        let err = CscReader::new(3, 1, vec![1.0, 2.0], &[0, 5], &[0, 2]).unwrap_err();
        assert_eq!(err, ReaderError::MalformedCsc(CscDefect::IOutOfRange));
    }

    #[test]
    fn test_workspace_checked() {
        let mut reader = CscReader::new(2, 2, vec![1, 2], &[0, 1], &[0, 1, 2]).unwrap();
        let mut out = [0; 1];
        assert_eq!(
            reader.get_row(0, &mut out, 0, 2),
            Err(ReaderError::WorkspaceTooSmall { needed: 2, found: 1 })
        );
    }
}
