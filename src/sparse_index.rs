//! Lazy views over runs of non-zero elements

use crate::dims::check_workspace;
use crate::error::Result;
use crate::value::MatrixValue;

/// A run of non-zero elements from a single row or column
///
/// For extracted columns `i` holds row indices; for extracted rows it holds
/// column indices. Both slices have the same length.
///
/// A view either aliases storage owned by the reader (zero-copy) or points
/// into the caller's workspaces after a copy; `aliases_storage` tells which.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SparseIndex<'a, T> {
    /// Non-zero values
    pub x: &'a [T],
    /// Indices of the non-zero values
    pub i: &'a [usize],
    aliased: bool,
}

impl<'a, T> SparseIndex<'a, T> {
    /// A view into storage owned by a reader
    pub(crate) fn borrowed(x: &'a [T], i: &'a [usize]) -> Self {
        debug_assert_eq!(x.len(), i.len());
        Self { x, i, aliased: true }
    }

    /// A view over the leading `n` entries of the caller's workspaces
    pub(crate) fn workspace(x: &'a [T], i: &'a [usize], n: usize) -> Self {
        Self {
            x: &x[..n],
            i: &i[..n],
            aliased: false,
        }
    }

    /// An empty run
    pub fn empty() -> Self {
        Self {
            x: &[],
            i: &[],
            aliased: true,
        }
    }

    /// Number of non-zero elements in the run
    pub fn n(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Whether the view points into reader-owned storage rather than a workspace
    pub fn aliases_storage(&self) -> bool {
        self.aliased
    }

    /// Iterate over `(index, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (usize, &'a T)> + 'a {
        let i = self.i;
        let x = self.x;
        i.iter().copied().zip(x.iter())
    }
}

/// Copy a run into workspaces, converting values to another element type
///
/// Workspaces must hold at least `source.n()` elements.
pub fn transplant<'w, T, U>(
    source: SparseIndex<'_, T>,
    work_x: &'w mut [U],
    work_i: &'w mut [usize],
) -> Result<SparseIndex<'w, U>>
where
    T: MatrixValue,
    U: MatrixValue,
{
    let n = source.n();
    check_workspace(work_x.len(), n)?;
    check_workspace(work_i.len(), n)?;

    for (dst, &src) in work_x.iter_mut().zip(source.x) {
        *dst = U::from_f64(src.to_f64());
    }
    work_i[..n].copy_from_slice(source.i);

    Ok(SparseIndex::workspace(work_x, work_i, n))
}
