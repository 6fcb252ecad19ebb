//! Configuration for parallel row scans

/// Parameters controlling how rows are split across worker threads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Number of threads to use
    pub n_threads: usize,
    /// Smallest run of consecutive rows handed to one worker
    ///
    /// Longer runs let each worker's row cursor stay on its forward fast path.
    pub min_rows_per_task: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            n_threads: num_cpus::get(), // Use all available cores
            min_rows_per_task: 64,
        }
    }
}

impl ParallelConfig {
    /// Use exactly `n_threads` workers (at least one)
    pub fn with_threads(mut self, n_threads: usize) -> Self {
        self.n_threads = n_threads.max(1);
        self
    }

    /// Hand each worker at least `min_rows` consecutive rows (at least one)
    pub fn with_min_rows_per_task(mut self, min_rows: usize) -> Self {
        self.min_rows_per_task = min_rows.max(1);
        self
    }
}
