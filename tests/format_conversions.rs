//! Integration tests for format conversions with external libraries

use matreader::utils::{from_ndarray, from_sprs_csc, to_ndarray, to_sprs_csc};
use matreader::{CscReader, DenseReader, Reader};
use ndarray::{array, Array2, ShapeBuilder};
use sprs::{CsMat, TriMat};

/// Creates a test matrix with a specific pattern:
/// [ 1.0  0.0  2.0  0.0  0.0 ]
/// [ 0.0  3.0  0.0  0.0  4.0 ]
/// [ 0.0  0.0  5.0  0.0  0.0 ]
/// [ 6.0  0.0  0.0  7.0  0.0 ]
/// [ 0.0  0.0  8.0  0.0  9.0 ]
fn create_test_matrix_csc() -> CscReader<f64> {
    CscReader::new(
        5,
        5,
        vec![1.0, 6.0, 3.0, 2.0, 5.0, 8.0, 7.0, 4.0, 9.0],
        &[0, 3, 1, 0, 2, 4, 3, 1, 4],
        &[0, 2, 3, 6, 7, 9],
    )
    .unwrap()
}

#[test]
fn test_sprs_round_trip() {
    let reader = create_test_matrix_csc();
    let sprs_mat = to_sprs_csc(&reader);

    assert!(sprs_mat.is_csc());
    assert_eq!(sprs_mat.shape(), (5, 5));
    assert_eq!(sprs_mat.nnz(), 9);
    assert_eq!(sprs_mat.get(3, 0), Some(&6.0));
    assert_eq!(sprs_mat.get(4, 2), Some(&8.0));

    let back = from_sprs_csc(sprs_mat).unwrap();
    assert_eq!(back.values(), reader.values());
    assert_eq!(back.row_indices(), reader.row_indices());
    assert_eq!(back.col_pointers(), reader.col_pointers());
}

#[test]
fn test_from_sprs_triplets() {
    let mut tri = TriMat::new((3, 3));
    tri.add_triplet(2, 0, 4.0);
    tri.add_triplet(0, 2, 1.0);
    tri.add_triplet(1, 1, 2.0);
    let csr: CsMat<f64> = tri.to_csr();

    let mut reader = CscReader::from_sprs(csr).unwrap();
    let mut out = [0.0; 3];
    reader.get_row(2, &mut out, 0, 3).unwrap();
    assert_eq!(out, [4.0, 0.0, 0.0]);
    reader.get_row(0, &mut out, 0, 3).unwrap();
    assert_eq!(out, [0.0, 0.0, 1.0]);

    assert_eq!(reader.to_sprs().get(1, 1), Some(&2.0));
}

#[test]
fn test_ndarray_round_trip() {
    let array = array![[1, 2, 3], [4, 5, 6]];
    let mut reader = from_ndarray(array.view()).unwrap();

    assert_eq!((reader.nrow(), reader.ncol()), (2, 3));
    let mut out = [0; 3];
    reader.get_row(1, &mut out, 0, 3).unwrap();
    assert_eq!(out, [4, 5, 6]);

    assert_eq!(to_ndarray(&reader).unwrap(), array);
}

#[test]
fn test_ndarray_column_major_input() {
    let array = Array2::from_shape_vec((2, 2).f(), vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    let reader = DenseReader::from_array(array.view()).unwrap();
    assert_eq!(reader.values(), &[1.0, 2.0, 3.0, 4.0]);
    assert_eq!(reader.get_element(0, 1), Ok(3.0));
    assert_eq!(reader.to_array().unwrap(), array);
}
