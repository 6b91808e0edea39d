//! Single-lane fallback policy.
//!
//! Also used by the wider policies for the scalar head and tail of each body's
//! interaction loop, so every pair is computed with the same formula whatever the
//! vector width.

use super::{PolicyKind, SimdPolicy};

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

/// One float per "vector".
#[derive(Debug, Clone, Copy, Default)]
pub struct Scalar;

impl SimdPolicy for Scalar {
    type Vector = f32;

    const KIND: PolicyKind = PolicyKind::Scalar;
    const WIDTH: usize = 1;
    const ALIGNMENT: usize = 16;

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> f32 {
        *ptr
    }

    #[inline(always)]
    unsafe fn store(ptr: *mut f32, v: f32) {
        *ptr = v;
    }

    #[inline(always)]
    unsafe fn broadcast(value: f32) -> f32 {
        value
    }

    #[inline(always)]
    unsafe fn zero() -> f32 {
        0.0
    }

    #[inline(always)]
    unsafe fn add(a: f32, b: f32) -> f32 {
        a + b
    }

    #[inline(always)]
    unsafe fn sub(a: f32, b: f32) -> f32 {
        a - b
    }

    #[inline(always)]
    unsafe fn mul(a: f32, b: f32) -> f32 {
        a * b
    }

    #[inline(always)]
    unsafe fn rsqrt_estimate(d2: f32) -> f32 {
        // SSE is part of the x86_64 baseline.
        #[cfg(target_arch = "x86_64")]
        {
            _mm_cvtss_f32(_mm_rsqrt_ss(_mm_set_ss(d2)))
        }
        #[cfg(not(target_arch = "x86_64"))]
        {
            1.0 / d2.sqrt()
        }
    }

    #[inline(always)]
    unsafe fn horizontal_sum(v: f32) -> f32 {
        v
    }
}

/// Refined reciprocal square root of a single float, identical to what every
/// policy computes per lane.
///
/// # Examples
///
/// ```
/// use rs_nbody::simd::reciprocal_sqrt;
///
/// let r = reciprocal_sqrt(4.0);
/// assert!((r - 0.5).abs() < 1e-6);
/// ```
#[inline(always)]
pub fn reciprocal_sqrt(d2: f32) -> f32 {
    // SAFETY: the scalar policy only needs baseline instructions.
    unsafe { Scalar::reciprocal_sqrt(d2) }
}
