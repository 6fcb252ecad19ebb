//! The reader façade shared by every backend
//!
//! `Reader` covers dense extraction of rows, columns, elements and index
//! batches. `SparseReader` adds extraction of non-zero runs. Column access
//! takes `&self`; row access takes `&mut self` because sparse backends keep a
//! memoized per-column cursor between row queries.

use crate::dims::{check_workspace, DimChecker};
use crate::error::Result;
use crate::sparse_index::SparseIndex;
use crate::value::MatrixValue;

/// Uniform random access to a matrix of `T`
pub trait Reader<T: MatrixValue> {
    /// Number of rows
    fn nrow(&self) -> usize;

    /// Number of columns
    fn ncol(&self) -> usize;

    /// Get the element at row `r`, column `c`
    fn get_element(&self, r: usize, c: usize) -> Result<T>;

    /// Copy rows `[first, last)` of column `c` into `out`
    ///
    /// `out` must hold at least `last - first` elements; gaps in sparse
    /// storage are filled with the zero element.
    fn get_col(&self, c: usize, out: &mut [T], first: usize, last: usize) -> Result<()>;

    /// Copy columns `[first, last)` of row `r` into `out`
    ///
    /// `out` must hold at least `last - first` elements.
    fn get_row(&mut self, r: usize, out: &mut [T], first: usize, last: usize) -> Result<()>;

    /// Rows `[first, last)` of column `c`, either as a view or in `work`
    ///
    /// Backends with contiguous column storage return a slice of their own
    /// buffer and leave `work` untouched; the default copies into `work`.
    fn get_col_slice<'a>(
        &'a self,
        c: usize,
        work: &'a mut [T],
        first: usize,
        last: usize,
    ) -> Result<&'a [T]> {
        self.get_col(c, work, first, last)?;
        Ok(&work[..last - first])
    }

    /// Gather the selected rows over columns `[first, last)`
    ///
    /// `rows` must be strictly increasing. `out` is filled column-major: for
    /// each column, `rows.len()` consecutive values.
    fn get_rows(&self, rows: &[usize], out: &mut [T], first: usize, last: usize) -> Result<()> {
        DimChecker::new(self.nrow(), self.ncol()).check_row_batch(rows, first, last)?;
        let n = rows.len();
        check_workspace(out.len(), n * (last - first))?;
        if n == 0 {
            return Ok(());
        }

        // Only the span covering the selected rows is extracted per column.
        let lo = rows[0];
        let hi = rows[n - 1] + 1;
        let mut scratch = vec![T::zero(); hi - lo];
        for (c, chunk) in (first..last).zip(out.chunks_mut(n)) {
            let col = self.get_col_slice(c, &mut scratch, lo, hi)?;
            for (dst, &r) in chunk.iter_mut().zip(rows) {
                *dst = col[r - lo];
            }
        }
        Ok(())
    }

    /// Copy rows `[first, last)` of each selected column
    ///
    /// `cols` must be strictly increasing. `out` is filled column-major with
    /// `last - first` values per selected column.
    fn get_cols(&self, cols: &[usize], out: &mut [T], first: usize, last: usize) -> Result<()> {
        DimChecker::new(self.nrow(), self.ncol()).check_col_batch(cols, first, last)?;
        let len = last - first;
        check_workspace(out.len(), cols.len() * len)?;
        if len == 0 {
            return Ok(());
        }

        for (&c, chunk) in cols.iter().zip(out.chunks_mut(len)) {
            self.get_col(c, chunk, first, last)?;
        }
        Ok(())
    }

    /// Like `get_col`, converting values to another element type
    fn get_col_as<U: MatrixValue>(
        &self,
        c: usize,
        out: &mut [U],
        first: usize,
        last: usize,
    ) -> Result<()> {
        let len = last.saturating_sub(first);
        check_workspace(out.len(), len)?;
        let mut work = vec![T::zero(); len];
        let col = self.get_col_slice(c, &mut work, first, last)?;
        for (dst, &src) in out.iter_mut().zip(col) {
            *dst = U::from_f64(src.to_f64());
        }
        Ok(())
    }

    /// Like `get_row`, converting values to another element type
    fn get_row_as<U: MatrixValue>(
        &mut self,
        r: usize,
        out: &mut [U],
        first: usize,
        last: usize,
    ) -> Result<()> {
        let len = last.saturating_sub(first);
        check_workspace(out.len(), len)?;
        let mut work = vec![T::zero(); len];
        self.get_row(r, &mut work, first, last)?;
        for (dst, &src) in out.iter_mut().zip(&work) {
            *dst = U::from_f64(src.to_f64());
        }
        Ok(())
    }
}

/// Extraction of non-zero runs
///
/// Workspaces must hold at least `last - first` elements each.
pub trait SparseReader<T: MatrixValue>: Reader<T> {
    /// Non-zero elements of column `c` within rows `[first, last)`
    ///
    /// Native sparse backends return a view into their own buffers and leave
    /// the workspaces untouched; dense backends copy the non-zero values into
    /// the workspaces. Row indices are strictly increasing.
    fn get_col_sparse<'a>(
        &'a self,
        c: usize,
        work_x: &'a mut [T],
        work_i: &'a mut [usize],
        first: usize,
        last: usize,
    ) -> Result<SparseIndex<'a, T>>;

    /// Non-zero elements of row `r` within columns `[first, last)`
    ///
    /// Always copies into the workspaces. Indices are column positions,
    /// reported in column order.
    fn get_row_sparse<'w>(
        &mut self,
        r: usize,
        work_x: &'w mut [T],
        work_i: &'w mut [usize],
        first: usize,
        last: usize,
    ) -> Result<SparseIndex<'w, T>>;
}
