//! Reader for dense column-major matrices

use std::sync::Arc;

use crate::descriptor::MatrixDescriptor;
use crate::dims::{check_workspace, DimChecker};
use crate::error::{ReaderError, Result};
use crate::reader::{Reader, SparseReader};
use crate::sparse_index::SparseIndex;
use crate::value::MatrixValue;

/// A fully materialized matrix stored column by column
///
/// Element `(r, c)` lives at `values[c * nrow + r]`. Columns are contiguous,
/// so column slices are handed out without copying; rows are strided copies.
#[derive(Debug, Clone)]
pub struct DenseReader<T> {
    dims: DimChecker,
    values: Arc<[T]>,
}

impl<T: MatrixValue> DenseReader<T> {
    /// Creates a dense reader over a column-major buffer of `nrow * ncol` values
    pub fn new(nrow: usize, ncol: usize, values: Vec<T>) -> Result<Self> {
        let expected = nrow.checked_mul(ncol).unwrap_or(usize::MAX);
        if values.len() != expected {
            return Err(ReaderError::MalformedDense {
                expected,
                found: values.len(),
            });
        }

        Ok(Self {
            dims: DimChecker::new(nrow, ncol),
            values: values.into(),
        })
    }

    /// Creates a dense reader from a `dense` descriptor with an `x` slot
    pub fn from_descriptor(mut descriptor: MatrixDescriptor) -> Result<Self> {
        let declared = descriptor.check_element_type::<T>()?;
        let x = T::unwrap_vector(descriptor.take_slot("x")?).map_err(|found| {
            ReaderError::ValueTypeMismatch {
                expected: declared,
                found: found.element_type(),
            }
        })?;
        Self::new(descriptor.nrow(), descriptor.ncol(), x)
    }

    /// The whole column-major buffer
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Rows `[first, last)` of column `c` as a slice of the underlying buffer
    pub fn get_col_view(&self, c: usize, first: usize, last: usize) -> Result<&[T]> {
        self.dims.check_colargs(c, first, last)?;
        let offset = c * self.dims.nrow();
        Ok(&self.values[offset + first..offset + last])
    }
}

impl<T: MatrixValue> Reader<T> for DenseReader<T> {
    fn nrow(&self) -> usize {
        self.dims.nrow()
    }

    fn ncol(&self) -> usize {
        self.dims.ncol()
    }

    fn get_element(&self, r: usize, c: usize) -> Result<T> {
        self.dims.check_element(r, c)?;
        Ok(self.values[c * self.dims.nrow() + r])
    }

    fn get_col(&self, c: usize, out: &mut [T], first: usize, last: usize) -> Result<()> {
        let view = self.get_col_view(c, first, last)?;
        check_workspace(out.len(), view.len())?;
        out[..view.len()].copy_from_slice(view);
        Ok(())
    }

    fn get_row(&mut self, r: usize, out: &mut [T], first: usize, last: usize) -> Result<()> {
        self.dims.check_rowargs(r, first, last)?;
        check_workspace(out.len(), last - first)?;
        if first == last {
            return Ok(());
        }

        let nrow = self.dims.nrow();
        let strided = self.values[first * nrow + r..].iter().step_by(nrow);
        for (dst, &src) in out[..last - first].iter_mut().zip(strided) {
            *dst = src;
        }
        Ok(())
    }

    fn get_col_slice<'a>(
        &'a self,
        c: usize,
        _work: &'a mut [T],
        first: usize,
        last: usize,
    ) -> Result<&'a [T]> {
        self.get_col_view(c, first, last)
    }

    fn get_rows(&self, rows: &[usize], out: &mut [T], first: usize, last: usize) -> Result<()> {
        self.dims.check_row_batch(rows, first, last)?;
        let n = rows.len();
        check_workspace(out.len(), n * (last - first))?;
        if n == 0 {
            return Ok(());
        }

        let nrow = self.dims.nrow();
        for (c, chunk) in (first..last).zip(out.chunks_mut(n)) {
            let column = &self.values[c * nrow..(c + 1) * nrow];
            for (dst, &r) in chunk.iter_mut().zip(rows) {
                *dst = column[r];
            }
        }
        Ok(())
    }
}

impl<T: MatrixValue> SparseReader<T> for DenseReader<T> {
    fn get_col_sparse<'a>(
        &'a self,
        c: usize,
        work_x: &'a mut [T],
        work_i: &'a mut [usize],
        first: usize,
        last: usize,
    ) -> Result<SparseIndex<'a, T>> {
        let view = self.get_col_view(c, first, last)?;
        check_workspace(work_x.len(), view.len())?;
        check_workspace(work_i.len(), view.len())?;

        let mut n = 0;
        for (r, &x) in (first..last).zip(view) {
            if !x.is_zero() {
                work_x[n] = x;
                work_i[n] = r;
                n += 1;
            }
        }
        Ok(SparseIndex::workspace(work_x, work_i, n))
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

        let nrow = self.dims.nrow();
        let mut n = 0;
        for c in first..last {
            let x = self.values[c * nrow + r];
            if !x.is_zero() {
                work_x[n] = x;
                work_i[n] = c;
                n += 1;
            }
        }
        Ok(SparseIndex::workspace(work_x, work_i, n))
    }
}
