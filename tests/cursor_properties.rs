//! Property tests: row cursor output against a dense reference

use matreader::{CoordinateReader, CscReader, DenseReader, Reader, SparseReader};
use proptest::prelude::*;

/// A small matrix as (nrow, ncol, column-major values), mostly zeros
fn arb_matrix() -> impl Strategy<Value = (usize, usize, Vec<i32>)> {
    (1usize..9, 1usize..9).prop_flat_map(|(nrow, ncol)| {
        (
            Just(nrow),
            Just(ncol),
            prop::collection::vec(prop_oneof![3 => Just(0i32), 1 => 1i32..100], nrow * ncol),
        )
    })
}

/// Raw queries, reduced modulo the matrix shape by `to_query`
fn arb_queries() -> impl Strategy<Value = Vec<(usize, usize, usize)>> {
    prop::collection::vec((0usize..64, 0usize..64, 0usize..64), 1..40)
}

fn to_query(raw: (usize, usize, usize), nrow: usize, ncol: usize) -> (usize, usize, usize) {
    let (r, a, b) = raw;
    let first = a % (ncol + 1);
    let last = first + b % (ncol - first + 1);
    (r % nrow, first, last)
}

fn to_csc(nrow: usize, ncol: usize, dense: &[i32]) -> CscReader<i32> {
    let mut values = Vec::new();
    let mut rows = Vec::new();
    let mut pointers = vec![0usize];
    for c in 0..ncol {
        for r in 0..nrow {
            let x = dense[c * nrow + r];
            if x != 0 {
                values.push(x);
                rows.push(r);
            }
        }
        pointers.push(values.len());
    }
    CscReader::new(nrow, ncol, values, &rows, &pointers).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn row_queries_match_dense_reference(
        (nrow, ncol, dense) in arb_matrix(),
        raw in arb_queries(),
    ) {
        let mut reference = DenseReader::new(nrow, ncol, dense.clone()).unwrap();
        let mut reader = to_csc(nrow, ncol, &dense);
        let mut expected = vec![0; ncol];
        let mut actual = vec![0; ncol];

        for query in raw {
            let (r, first, last) = to_query(query, nrow, ncol);
            reference.get_row(r, &mut expected, first, last).unwrap();
            reader.get_row(r, &mut actual, first, last).unwrap();
            prop_assert_eq!(&actual[..last - first], &expected[..last - first]);
        }
    }

    #[test]
    fn sparse_rows_match_dense_reference(
        (nrow, ncol, dense) in arb_matrix(),
        raw in arb_queries(),
    ) {
        let mut reader = to_csc(nrow, ncol, &dense);
        let mut work_x = vec![0; ncol];
        let mut work_i = vec![0; ncol];

        for query in raw {
            let (r, first, last) = to_query(query, nrow, ncol);
            let expected: Vec<(usize, i32)> = (first..last)
                .map(|c| (c, dense[c * nrow + r]))
                .filter(|&(_, x)| x != 0)
                .collect();

            let run = reader.get_row_sparse(r, &mut work_x, &mut work_i, first, last).unwrap();
            let actual: Vec<(usize, i32)> = run.iter().map(|(c, &x)| (c, x)).collect();
            prop_assert_eq!(actual, expected);
        }
    }

    #[test]
    fn rows_and_columns_agree((nrow, ncol, dense) in arb_matrix()) {
        let mut reader = to_csc(nrow, ncol, &dense);
        let mut row = vec![0; ncol];
        let mut col = vec![0; nrow];

        // Scan rows backwards so the retreat path is exercised.
        for r in (0..nrow).rev() {
            reader.get_row(r, &mut row, 0, ncol).unwrap();
            for c in 0..ncol {
                reader.get_col(c, &mut col, 0, nrow).unwrap();
                prop_assert_eq!(row[c], col[r]);
                prop_assert_eq!(reader.get_element(r, c).unwrap(), row[c]);
            }
        }
    }

    #[test]
    fn coordinate_ingestion_matches_csc(
        (nrow, ncol, dense) in arb_matrix(),
        seed in any::<u64>(),
    ) {
        let csc = to_csc(nrow, ncol, &dense);

        // Emit the non-zeros as 1-based triplets in a scrambled order.
        let mut triplets: Vec<(i32, i32, i32)> = Vec::new();
        for c in 0..ncol {
            for r in 0..nrow {
                let x = dense[c * nrow + r];
                if x != 0 {
                    triplets.push((r as i32 + 1, c as i32 + 1, x));
                }
            }
        }
        let len = triplets.len();
        if len > 1 {
            let shift = (seed % len as u64) as usize;
            triplets.rotate_left(shift);
            if seed % 2 == 1 {
                triplets.reverse();
            }
        }

        let rows: Vec<i32> = triplets.iter().map(|t| t.0).collect();
        let cols: Vec<i32> = triplets.iter().map(|t| t.1).collect();
        let values: Vec<i32> = triplets.iter().map(|t| t.2).collect();
        let coo = CoordinateReader::new(nrow, ncol, values, &rows, &cols).unwrap();

        prop_assert_eq!(coo.values(), csc.values());
        prop_assert_eq!(coo.row_indices(), csc.row_indices());
        prop_assert_eq!(coo.col_pointers(), csc.col_pointers());

        // Exported buffers pass CSC validation and come back unchanged.
        let again = CscReader::new(
            nrow,
            ncol,
            coo.values().to_vec(),
            coo.row_indices(),
            coo.col_pointers(),
        )
        .unwrap();
        prop_assert_eq!(again.values(), coo.values());
        prop_assert_eq!(again.row_indices(), coo.row_indices());
        prop_assert_eq!(again.col_pointers(), coo.col_pointers());
    }
}
