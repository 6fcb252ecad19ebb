// Matrix backends and the shared CSC core

pub mod coordinate;
pub mod csc;
pub mod csc_core;
pub mod dense;

pub use coordinate::CoordinateReader;
pub use csc::CscReader;
pub use csc_core::{CscCore, CursorState};
pub use dense::DenseReader;
