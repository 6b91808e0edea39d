use rayon::prelude::*;

use crate::utils::{round_up_to_multiple, AlignedBuffer};

/// Row-major `rows × cols` matrix of per-worker partial accelerations.
///
/// `cols` is the body count rounded up to the lane width, so every row starts on an
/// aligned address and supports full-width vector access up to its end. Row `r`
/// belongs to force-phase worker `r`; after reduction row 0 holds the totals.
#[derive(Debug, Clone, PartialEq)]
pub struct AccumulatorMatrix {
    data: AlignedBuffer,
    rows: usize,
    cols: usize,
    lane_width: usize,
}

impl AccumulatorMatrix {
    /// Allocates a zeroed matrix with one row per worker.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_nbody::models::AccumulatorMatrix;
    ///
    /// let acc = AccumulatorMatrix::new(4, 17, 8, 32);
    /// assert_eq!(acc.rows(), 4);
    /// assert_eq!(acc.cols(), 24);
    /// assert_eq!(acc.row(2).as_ptr() as usize % 32, 0);
    /// ```
    pub fn new(rows: usize, body_count: usize, lane_width: usize, alignment: usize) -> Self {
        let lane_width = lane_width.max(1);
        let cols = round_up_to_multiple(body_count, lane_width);
        let cells = rows
            .checked_mul(cols)
            .expect("accumulator matrix size overflows usize");
        Self {
            data: AlignedBuffer::zeroed(cells, alignment),
            rows,
            cols,
            lane_width,
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn lane_width(&self) -> usize {
        self.lane_width
    }

    #[inline]
    pub fn alignment(&self) -> usize {
        self.data.alignment()
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.row(row)[col]
    }

    #[inline]
    pub fn row(&self, row: usize) -> &[f32] {
        assert!(row < self.rows, "row {} out of range for {} rows", row, self.rows);
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    #[inline]
    pub fn row_mut(&mut self, row: usize) -> &mut [f32] {
        assert!(row < self.rows, "row {} out of range for {} rows", row, self.rows);
        let cols = self.cols;
        &mut self.data[row * cols..(row + 1) * cols]
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Rows as disjoint mutable slices, for handing one to each worker.
    pub fn rows_mut(&mut self) -> std::slice::ChunksExactMut<'_, f32> {
        // an empty matrix has no cells, so any non-zero chunk size yields no rows
        let cols = self.cols.max(1);
        self.data.chunks_exact_mut(cols)
    }

    /// Parallel version of [`AccumulatorMatrix::rows_mut`].
    pub fn par_rows_mut(&mut self) -> rayon::slice::ChunksExactMut<'_, f32> {
        let cols = self.cols.max(1);
        self.data.par_chunks_exact_mut(cols)
    }

    /// Zeroes every row in parallel.
    pub fn zero(&mut self) {
        self.par_rows_mut().for_each(|row| row.fill(0.0));
    }
}

impl Default for AccumulatorMatrix {
    fn default() -> Self {
        Self::new(0, 0, 1, std::mem::align_of::<f32>())
    }
}
