/// Rounds a byte count up to the next multiple of `alignment`.
///
/// `alignment` must be a power of two.
///
/// ```
/// use rs_nbody::utils::aligned_size;
///
/// assert_eq!(aligned_size(0, 32), 0);
/// assert_eq!(aligned_size(4, 32), 32);
/// assert_eq!(aligned_size(64, 32), 64);
/// assert_eq!(aligned_size(65, 64), 128);
/// ```
#[inline]
pub fn aligned_size(size: usize, alignment: usize) -> usize {
    debug_assert!(alignment.is_power_of_two());
    (size + alignment - 1) & !(alignment - 1)
}

/// Rounds `n` up to the next multiple of `multiple`. A multiple of zero returns `n`.
///
/// ```
/// use rs_nbody::utils::round_up_to_multiple;
///
/// assert_eq!(round_up_to_multiple(17, 8), 24);
/// assert_eq!(round_up_to_multiple(16, 8), 16);
/// assert_eq!(round_up_to_multiple(5, 1), 5);
/// ```
#[inline]
pub fn round_up_to_multiple(n: usize, multiple: usize) -> usize {
    if multiple == 0 {
        return n;
    }
    n.div_ceil(multiple) * multiple
}

/// Splits `len` items into at most `parts` contiguous chunks whose length is a multiple of `lane`.
/// Returns the chunk length, never zero.
#[inline]
pub fn chunk_len(len: usize, parts: usize, lane: usize) -> usize {
    let parts = parts.max(1);
    round_up_to_multiple(len.div_ceil(parts), lane.max(1)).max(lane.max(1))
}
