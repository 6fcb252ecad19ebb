//! Bounds checking shared by every reader
//!
//! All readers hold a `DimChecker` and run its checks in front of every
//! extraction, so the error taxonomy is identical across backends.

use crate::error::{Dimension, ReaderError, Result};

/// Check that a scalar index lies in `[0, extent)`
pub fn check_dim(index: usize, extent: usize, dim: Dimension) -> Result<()> {
    if index >= extent {
        return Err(ReaderError::DimIndexOutOfRange { dim, index, extent });
    }
    Ok(())
}

/// Check that `[first, last)` is a valid slice of a dimension of size `extent`
pub fn check_subset(first: usize, last: usize, extent: usize, dim: Dimension) -> Result<()> {
    if first > last {
        return Err(ReaderError::RangeOutOfOrder { dim, first, last });
    }
    if last > extent {
        return Err(ReaderError::RangeEndOutOfRange { dim, last, extent });
    }
    Ok(())
}

/// Check that every index is in range and the sequence is strictly increasing
pub fn check_indices(indices: &[usize], extent: usize, dim: Dimension) -> Result<()> {
    let mut previous: Option<usize> = None;
    for (position, &index) in indices.iter().enumerate() {
        check_dim(index, extent, dim)?;
        if previous.is_some_and(|p| index <= p) {
            return Err(ReaderError::IndicesNotStrictlyIncreasing { dim, position });
        }
        previous = Some(index);
    }
    Ok(())
}

/// Check that a caller workspace can hold `needed` elements
pub fn check_workspace(found: usize, needed: usize) -> Result<()> {
    if found < needed {
        return Err(ReaderError::WorkspaceTooSmall { needed, found });
    }
    Ok(())
}

/// Matrix dimensions plus the argument checks readers run before extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DimChecker {
    nrow: usize,
    ncol: usize,
}

impl DimChecker {
    pub fn new(nrow: usize, ncol: usize) -> Self {
        Self { nrow, ncol }
    }

    pub fn nrow(&self) -> usize {
        self.nrow
    }

    pub fn ncol(&self) -> usize {
        self.ncol
    }

    /// Row `r` over columns `[first, last)`
    pub fn check_rowargs(&self, r: usize, first: usize, last: usize) -> Result<()> {
        check_dim(r, self.nrow, Dimension::Row)?;
        check_subset(first, last, self.ncol, Dimension::Column)
    }

    /// Column `c` over rows `[first, last)`
    pub fn check_colargs(&self, c: usize, first: usize, last: usize) -> Result<()> {
        check_dim(c, self.ncol, Dimension::Column)?;
        check_subset(first, last, self.nrow, Dimension::Row)
    }

    pub fn check_element(&self, r: usize, c: usize) -> Result<()> {
        check_dim(r, self.nrow, Dimension::Row)?;
        check_dim(c, self.ncol, Dimension::Column)
    }

    /// Row batch over columns `[first, last)`
    pub fn check_row_batch(&self, rows: &[usize], first: usize, last: usize) -> Result<()> {
        check_subset(first, last, self.ncol, Dimension::Column)?;
        check_indices(rows, self.nrow, Dimension::Row)
    }

    /// Column batch over rows `[first, last)`
    pub fn check_col_batch(&self, cols: &[usize], first: usize, last: usize) -> Result<()> {
        check_subset(first, last, self.nrow, Dimension::Row)?;
        check_indices(cols, self.ncol, Dimension::Column)
    }
}
