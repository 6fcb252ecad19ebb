//! # matreader: uniform random access to in-memory matrices
//!
//! Matrices handed over as dense column-major buffers, compressed sparse
//! column (CSC) buffers or coordinate triplets are exposed behind one reader
//! interface for extracting rows, columns, elements and index batches.
//!
//! ## Overview
//!
//! - **Dense**: columns are contiguous, so column slices are zero-copy views.
//! - **CSC**: validated once on construction; columns are views into the
//!   stored buffers.
//! - **Coordinate**: triplets are normalized into CSC form once and then
//!   served by the same core.
//!
//! Row access on sparse storage uses a memoized per-column cursor. Scanning
//! rows in order (forward or backward) costs O(1) per column per step; random
//! jumps fall back to a binary search per column.
//!
//! ## Usage
//!
//! ```
//! use matreader::{read_matrix, MatrixDescriptor, Reader, SparseReader};
//!
//! // 3 x 2 matrix [[1, 0], [0, 3], [2, 0]]
//! let desc = MatrixDescriptor::csc(3, 2, vec![1.0, 2.0, 3.0], vec![0, 2, 1], vec![0, 2, 3]);
//! let mut reader = read_matrix::<f64>(desc).unwrap();
//!
//! let mut row = [0.0; 2];
//! reader.get_row(1, &mut row, 0, 2).unwrap();
//! assert_eq!(row, [0.0, 3.0]);
//!
//! let (mut work_x, mut work_i) = ([0.0; 3], [0; 3]);
//! let col = reader.get_col_sparse(0, &mut work_x, &mut work_i, 0, 3).unwrap();
//! assert_eq!(col.i, &[0, 2]);
//! ```
//!
//! Readers are cheap to clone. A clone shares the matrix buffers and gets its
//! own cursor, which is how [`par_map_rows`] reads rows from several threads.

pub mod config;
pub mod descriptor;
pub mod dims;
pub mod error;
pub mod factory;
pub mod matrix;
pub mod parallel;
pub mod reader;
pub mod sparse_index;
pub mod utils;
pub mod value;

// Re-export primary components
pub use config::ParallelConfig;
pub use descriptor::{MatrixDescriptor, Vector};
pub use dims::DimChecker;
pub use error::{CoordinateDefect, CscDefect, Dimension, ReaderError, Result};
pub use factory::{read_matrix, read_matrix_dyn, read_sparse_matrix, AnyReader, DynReader};
pub use matrix::{CoordinateReader, CscCore, CscReader, CursorState, DenseReader};
pub use parallel::{par_map_rows, par_map_rows_in};
pub use reader::{Reader, SparseReader};
pub use sparse_index::{transplant, SparseIndex};
pub use utils::{from_ndarray, from_sprs_csc, to_ndarray, to_sprs_csc};
pub use value::{ElementType, Logical, MatrixValue};

/// Version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
