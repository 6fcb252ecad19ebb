//! # Parallel row scans
//!
//! Row extraction from sparse backends mutates a per-column cursor, so a
//! reader cannot be shared between threads while rows are read. Each rayon
//! worker instead owns its own clone: clones share the matrix buffers and
//! start with a fresh cursor.

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::config::ParallelConfig;
use crate::dims::check_subset;
use crate::error::{Dimension, Result};
use crate::reader::Reader;
use crate::value::MatrixValue;

/// Applies `f` to columns `[first, last)` of every row, in parallel
///
/// Rows are handed out in contiguous runs of at least
/// `config.min_rows_per_task`, and each worker reads them in increasing
/// order. Results come back in row order.
///
/// The scan runs on the current rayon pool when its size equals
/// `config.n_threads`, which is the case for the default config on the global
/// pool. Any other size gets a pool built for this call; see
/// `par_map_rows_in` to reuse one.
///
/// # Arguments
///
/// * `reader` - The matrix to scan; cloned once per worker
/// * `first` - First column of the slice
/// * `last` - One past the last column of the slice
/// * `config` - Thread count and run length
/// * `f` - Called with the row index and the extracted row slice
///
/// # Examples
///
/// ```
/// use matreader::{par_map_rows, CscReader, ParallelConfig};
///
/// let reader = CscReader::new(2, 2, vec![1.0, 2.0], &[0, 1], &[0, 1, 2]).unwrap();
/// let config = ParallelConfig::default().with_threads(2);
/// let sums = par_map_rows(&reader, 0, 2, &config, |_, row: &[f64]| row.iter().sum::<f64>())
///     .unwrap();
///
/// assert_eq!(sums, vec![1.0, 2.0]);
/// ```
pub fn par_map_rows<T, R, U, F>(
    reader: &R,
    first: usize,
    last: usize,
    config: &ParallelConfig,
    f: F,
) -> Result<Vec<U>>
where
    T: MatrixValue,
    R: Reader<T> + Clone + Send + Sync,
    U: Send,
    F: Fn(usize, &[T]) -> U + Send + Sync,
{
    check_subset(first, last, reader.ncol(), Dimension::Column)?;

    if config.n_threads == rayon::current_num_threads() {
        debug!(n_threads = config.n_threads, "scanning rows on the current pool");
        return scan_rows(reader, first, last, config, &f);
    }

    match rayon::ThreadPoolBuilder::new()
        .num_threads(config.n_threads)
        .build()
    {
        Ok(pool) => {
            debug!(
                n_threads = config.n_threads,
                nrow = reader.nrow(),
                "scanning rows on a dedicated pool"
            );
            pool.install(|| scan_rows(reader, first, last, config, &f))
        }
        Err(err) => {
            warn!(%err, "could not build thread pool, scanning rows on the global pool");
            scan_rows(reader, first, last, config, &f)
        }
    }
}

/// Like `par_map_rows`, but runs on a caller-owned pool
///
/// `config.n_threads` is ignored; the pool decides the thread count. Reuse
/// one pool across many scans to avoid rebuilding it each time.
pub fn par_map_rows_in<T, R, U, F>(
    pool: &rayon::ThreadPool,
    reader: &R,
    first: usize,
    last: usize,
    config: &ParallelConfig,
    f: F,
) -> Result<Vec<U>>
where
    T: MatrixValue,
    R: Reader<T> + Clone + Send + Sync,
    U: Send,
    F: Fn(usize, &[T]) -> U + Send + Sync,
{
    check_subset(first, last, reader.ncol(), Dimension::Column)?;
    pool.install(|| scan_rows(reader, first, last, config, &f))
}

fn scan_rows<T, R, U, F>(
    reader: &R,
    first: usize,
    last: usize,
    config: &ParallelConfig,
    f: &F,
) -> Result<Vec<U>>
where
    T: MatrixValue,
    R: Reader<T> + Clone + Send + Sync,
    U: Send,
    F: Fn(usize, &[T]) -> U + Send + Sync,
{
    let width = last - first;
    let min_len = config.min_rows_per_task.max(1);

    (0..reader.nrow())
        .into_par_iter()
        .with_min_len(min_len)
        .map_init(
            || (reader.clone(), vec![T::zero(); width]),
            |(local, buffer), r| -> Result<U> {
                local.get_row(r, buffer, first, last)?;
                Ok(f(r, &buffer[..]))
            },
        )
        .collect()
}
