use crate::models::AccumulatorMatrix;

#[test]
fn test_columns_padded_to_lane_width() {
    let acc = AccumulatorMatrix::new(3, 17, 16, 64);
    assert_eq!(acc.rows(), 3);
    assert_eq!(acc.cols(), 32);
    assert_eq!(acc.as_slice().len(), 96);
    for r in 0..acc.rows() {
        assert_eq!(acc.row(r).as_ptr() as usize % 64, 0, "row {} misaligned", r);
    }
}

#[test]
fn test_rows_mut_yields_disjoint_rows() {
    let mut acc = AccumulatorMatrix::new(4, 5, 8, 32);
    for (r, row) in acc.rows_mut().enumerate() {
        row.fill(r as f32);
    }
    for r in 0..4 {
        assert!(acc.row(r).iter().all(|&v| v == r as f32));
    }
    assert_eq!(acc.get(3, 7), 3.0);
}

#[test]
fn test_zero_clears_every_row() {
    let mut acc = AccumulatorMatrix::new(2, 3, 1, 16);
    acc.row_mut(1)[2] = 4.5;
    acc.zero();
    assert!(acc.as_slice().iter().all(|&v| v == 0.0));
}

#[test]
fn test_empty_matrix() {
    let mut acc = AccumulatorMatrix::new(4, 0, 16, 64);
    assert_eq!(acc.cols(), 0);
    assert_eq!(acc.rows_mut().count(), 0);
    acc.zero();

    let default = AccumulatorMatrix::default();
    assert_eq!(default.rows(), 0);
    assert!(default.as_slice().is_empty());
}

#[test]
#[should_panic(expected = "out of range")]
fn test_row_out_of_range() {
    let acc = AccumulatorMatrix::new(2, 4, 1, 16);
    let _ = acc.row(2);
}
