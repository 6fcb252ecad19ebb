//! Extraction engine for compressed sparse column (CSC) storage
//!
//! `CscCore` holds three read-only buffers:
//! - `values`: non-zero values in column-major order (size: nnz)
//! - `row_indices`: row of each non-zero, strictly increasing within a column (size: nnz)
//! - `col_pointers`: column `c` occupies `col_pointers[c]..col_pointers[c + 1]` (size: ncol + 1)
//!
//! Column extraction is a pair of binary searches into a column's slab.
//! Row extraction is accelerated by a memoized cursor holding, for every
//! column, the offset of the first non-zero whose row is not less than the
//! last requested row. Adjacent row queries then move each cursor by at most
//! one step instead of repeating the binary search.
//!
//! Buffers are shared behind `Arc`, so cloning a core is cheap. A clone starts
//! with an uninitialized cursor; give each thread its own clone for row access.

use std::sync::Arc;

use tracing::trace;

use crate::sparse_index::SparseIndex;
use crate::utils::lower_bound;
use crate::value::MatrixValue;

/// Lifecycle of the memoized row cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// No row has been requested yet; no cursor memory is allocated
    Uninitialized,
    /// Cursor points at the start of every column (row 0)
    Fresh,
    /// Cursor reflects the last `(row, first, last)` request
    Warm,
}

#[derive(Debug)]
struct RowCursor {
    state: CursorState,
    indices: Vec<usize>,
    current_row: usize,
    current_start: usize,
    current_end: usize,
}

impl RowCursor {
    fn new(ncol: usize) -> Self {
        Self {
            state: CursorState::Uninitialized,
            indices: Vec::new(),
            current_row: 0,
            current_start: 0,
            current_end: ncol,
        }
    }
}

/// Stateful reader over CSC buffers
///
/// Assumes the structural invariants have already been checked; callers go
/// through `CscReader` or `CoordinateReader`, which validate and bounds-check.
#[derive(Debug)]
pub struct CscCore<T> {
    nrow: usize,
    ncol: usize,
    values: Arc<[T]>,
    row_indices: Arc<[usize]>,
    col_pointers: Arc<[usize]>,
    cursor: RowCursor,
}

impl<T> Clone for CscCore<T> {
    fn clone(&self) -> Self {
        Self {
            nrow: self.nrow,
            ncol: self.ncol,
            values: Arc::clone(&self.values),
            row_indices: Arc::clone(&self.row_indices),
            col_pointers: Arc::clone(&self.col_pointers),
            cursor: RowCursor::new(self.ncol),
        }
    }
}

impl<T: MatrixValue> CscCore<T> {
    pub(crate) fn new(
        nrow: usize,
        ncol: usize,
        values: Vec<T>,
        row_indices: Vec<usize>,
        col_pointers: Vec<usize>,
    ) -> Self {
        debug_assert_eq!(col_pointers.len(), ncol + 1);
        debug_assert_eq!(values.len(), row_indices.len());
        debug_assert_eq!(col_pointers[ncol], values.len());

        Self {
            nrow,
            ncol,
            values: values.into(),
            row_indices: row_indices.into(),
            col_pointers: col_pointers.into(),
            cursor: RowCursor::new(ncol),
        }
    }

    pub fn nrow(&self) -> usize {
        self.nrow
    }

    pub fn ncol(&self) -> usize {
        self.ncol
    }

    /// Returns the number of non-zero elements in the matrix
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn row_indices(&self) -> &[usize] {
        &self.row_indices
    }

    pub fn col_pointers(&self) -> &[usize] {
        &self.col_pointers
    }

    pub fn cursor_state(&self) -> CursorState {
        self.cursor.state
    }

    /// Non-zero elements of column `c` with rows in `[first, last)`
    ///
    /// The returned view aliases this core's buffers. O(1) for a full column,
    /// otherwise O(log(column height)).
    pub fn get_col(&self, c: usize, first: usize, last: usize) -> SparseIndex<'_, T> {
        let mut start = self.col_pointers[c];
        let mut end = self.col_pointers[c + 1];

        if first > 0 {
            start += lower_bound(&self.row_indices[start..end], first);
        }
        if last < self.nrow {
            end = start + lower_bound(&self.row_indices[start..end], last);
        }

        SparseIndex::borrowed(&self.values[start..end], &self.row_indices[start..end])
    }

    /// Write rows `[first, last)` of column `c` into `work`, filling gaps with zero
    pub fn get_col_dense(&self, c: usize, work: &mut [T], first: usize, last: usize) {
        let work = &mut work[..last - first];
        work.fill(T::zero());

        let run = self.get_col(c, first, last);
        for (r, &x) in run.iter() {
            work[r - first] = x;
        }
    }

    /// The element at `(r, c)`, or zero if it is not stored
    pub fn get_element(&self, r: usize, c: usize) -> T {
        let run = self.get_col(c, r, r + 1);
        run.x.first().copied().unwrap_or_else(T::zero)
    }

    /// Write columns `[first, last)` of row `r` into `work`, filling gaps with zero
    pub fn get_row_dense(&mut self, r: usize, work: &mut [T], first: usize, last: usize) {
        self.update_cursor(r, first, last);

        let work = &mut work[..last - first];
        work.fill(T::zero());

        for (c, slot) in (first..last).zip(work.iter_mut()) {
            let idx = self.cursor.indices[c];
            if idx != self.col_pointers[c + 1] && self.row_indices[idx] == r {
                *slot = self.values[idx];
            }
        }
    }

    /// Copy the non-zero elements of row `r` within columns `[first, last)`
    ///
    /// Indices written to `work_i` are column positions in increasing order.
    pub fn get_row<'w>(
        &mut self,
        r: usize,
        work_x: &'w mut [T],
        work_i: &'w mut [usize],
        first: usize,
        last: usize,
    ) -> SparseIndex<'w, T> {
        self.update_cursor(r, first, last);

        let mut n = 0;
        for c in first..last {
            let idx = self.cursor.indices[c];
            if idx != self.col_pointers[c + 1] && self.row_indices[idx] == r {
                work_x[n] = self.values[idx];
                work_i[n] = c;
                n += 1;
            }
        }

        SparseIndex::workspace(work_x, work_i, n)
    }

    /// Move the cursor of every column in `[first, last)` to row `r`
    ///
    /// Afterwards `indices[c]` is the smallest offset in column `c` whose row
    /// is not less than `r`, or `col_pointers[c + 1]` if there is none.
    fn update_cursor(&mut self, r: usize, first: usize, last: usize) {
        let p = &self.col_pointers;
        let i = &self.row_indices;
        let cursor = &mut self.cursor;

        // No cursor memory until the first row request.
        if cursor.state == CursorState::Uninitialized {
            trace!(ncol = self.ncol, "allocating row cursor");
            cursor.indices = p[..self.ncol].to_vec();
            cursor.current_row = 0;
            cursor.state = CursorState::Fresh;
        }

        // A different column range invalidates everything; start over from row 0.
        if first != cursor.current_start || last != cursor.current_end {
            trace!(first, last, "resetting row cursor for new column range");
            cursor.indices.copy_from_slice(&p[..self.ncol]);
            cursor.current_row = 0;
            cursor.current_start = first;
            cursor.current_end = last;
            cursor.state = CursorState::Fresh;
        }

        let current = cursor.current_row;
        if r == current {
            // Nothing to move.
        } else if r == current + 1 {
            for c in first..last {
                let idx = &mut cursor.indices[c];
                if *idx != p[c + 1] && i[*idx] < r {
                    *idx += 1;
                }
            }
        } else if r + 1 == current {
            for c in first..last {
                let idx = &mut cursor.indices[c];
                if *idx != p[c] && i[*idx - 1] >= r {
                    *idx -= 1;
                }
            }
        } else if r > current {
            for c in first..last {
                let idx = &mut cursor.indices[c];
                *idx += lower_bound(&i[*idx..p[c + 1]], r);
            }
        } else {
            for c in first..last {
                let idx = &mut cursor.indices[c];
                *idx = p[c] + lower_bound(&i[p[c]..*idx], r);
            }
        }

        cursor.current_row = r;
        cursor.state = CursorState::Warm;
    }
}
