use rayon::prelude::*;

use crate::models::{AccumulatorMatrix, BodyStore};
use crate::utils::chunk_len;

/// Sums every row of `acc` into row 0, column by column.
///
/// Columns are split into lane-aligned ranges and reduced in parallel on the current
/// rayon pool. Within a column the rows are always added in order `0, 1, 2, ...`, so
/// the result does not depend on how many threads did the work.
///
/// # Examples
///
/// ```
/// use rs_nbody::forces::reduce_rows;
/// use rs_nbody::models::AccumulatorMatrix;
///
/// let mut acc = AccumulatorMatrix::new(3, 2, 1, 16);
/// for r in 0..3 {
///     acc.row_mut(r).copy_from_slice(&[1.0, r as f32]);
/// }
/// reduce_rows(&mut acc);
/// assert_eq!(acc.row(0), &[3.0, 3.0]);
/// ```
pub fn reduce_rows(acc: &mut AccumulatorMatrix) {
    let rows = acc.rows();
    let cols = acc.cols();
    if rows < 2 || cols == 0 {
        return;
    }

    let chunk = chunk_len(cols, rayon::current_num_threads(), acc.lane_width());
    let (head, rest) = acc.as_mut_slice().split_at_mut(cols);
    let rest: &[f32] = rest;

    head.par_chunks_mut(chunk)
        .enumerate()
        .for_each(|(c, out)| {
            let start = c * chunk;
            let len = out.len();
            for row in rest.chunks_exact(cols) {
                for (total, partial) in out.iter_mut().zip(&row[start..start + len]) {
                    *total += *partial;
                }
            }
        });
}

/// Reduces both acceleration matrices of `store` into their row 0.
pub fn reduce_accelerations(store: &mut BodyStore) {
    if store.is_empty() {
        return;
    }
    let (acc_x, acc_y) = store.accumulators_mut();
    rayon::join(|| reduce_rows(acc_x), || reduce_rows(acc_y));
}
