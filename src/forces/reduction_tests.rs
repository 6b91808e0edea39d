use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::ThreadPoolBuilder;

use crate::forces::{reduce_accelerations, reduce_rows};
use crate::models::{AccumulatorMatrix, BodyStore};
use crate::simd::PolicyKind;

fn filled_matrix(rows: usize, bodies: usize, lane_width: usize) -> AccumulatorMatrix {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let mut acc = AccumulatorMatrix::new(rows, bodies, lane_width, 64);
    for v in acc.as_mut_slice() {
        *v = rng.random_range(-1.0..1.0);
    }
    acc
}

fn sequential_sum(acc: &AccumulatorMatrix) -> Vec<f32> {
    let mut total = acc.row(0).to_vec();
    for r in 1..acc.rows() {
        for (t, v) in total.iter_mut().zip(acc.row(r)) {
            *t += *v;
        }
    }
    total
}

#[test]
fn test_reduction_matches_sequential_sum_for_any_thread_count() {
    let original = filled_matrix(8, 1003, 16);
    let expected = sequential_sum(&original);

    for threads in [1, 2, 8] {
        let pool = ThreadPoolBuilder::new().num_threads(threads).build().unwrap();
        let mut acc = original.clone();
        pool.install(|| reduce_rows(&mut acc));
        assert_eq!(acc.row(0), &expected[..], "{} threads", threads);
        // only row 0 is written
        for r in 1..acc.rows() {
            assert_eq!(acc.row(r), original.row(r));
        }
    }
}

#[test]
fn test_short_last_chunk_is_fully_summed() {
    // 7 columns on 2 threads: chunks of 4 and 3
    let mut acc = AccumulatorMatrix::new(3, 7, 1, 16);
    for r in 0..3 {
        acc.row_mut(r).copy_from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, r as f32]);
    }
    let pool = ThreadPoolBuilder::new().num_threads(2).build().unwrap();
    pool.install(|| reduce_rows(&mut acc));
    assert_eq!(acc.row(0), &[3.0, 6.0, 9.0, 12.0, 15.0, 18.0, 3.0]);
}

#[test]
fn test_single_row_is_untouched() {
    let original = filled_matrix(1, 10, 1);
    let mut acc = original.clone();
    reduce_rows(&mut acc);
    assert_eq!(acc, original);
}

#[test]
fn test_reduce_accelerations_sums_both_axes() {
    let mut store = BodyStore::new(3, 2, PolicyKind::Narrow);
    {
        let (acc_x, acc_y) = store.accumulators_mut();
        acc_x.row_mut(0)[..3].copy_from_slice(&[1.0, 2.0, 3.0]);
        acc_x.row_mut(1)[..3].copy_from_slice(&[0.5, 0.5, 0.5]);
        acc_y.row_mut(1)[..3].copy_from_slice(&[-1.0, 0.0, 1.0]);
    }
    reduce_accelerations(&mut store);
    assert_eq!(&store.acc_x().row(0)[..3], &[1.5, 2.5, 3.5]);
    assert_eq!(&store.acc_y().row(0)[..3], &[-1.0, 0.0, 1.0]);
}
