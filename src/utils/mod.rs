//! Utility functions and helpers

pub mod formats;

pub use formats::{from_ndarray, from_sprs_csc, to_ndarray, to_sprs_csc};

/// Computes an exclusive prefix sum (scan) for a vector
pub fn exclusive_scan(input: &[usize]) -> Vec<usize> {
    let mut result = Vec::with_capacity(input.len() + 1);
    let mut sum = 0;

    result.push(0); // First element is always 0

    for &val in input {
        sum += val;
        result.push(sum);
    }

    result
}

/// Offset of the first element in a sorted slice that is not less than `value`
pub fn lower_bound(sorted: &[usize], value: usize) -> usize {
    sorted.partition_point(|&x| x < value)
}
