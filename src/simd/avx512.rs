//! 16-lane policy on 512-bit AVX-512F registers.
//!
//! Compiled only with the `avx512-simd` feature. `_mm512_rsqrt14_ps` gives a
//! 14-bit estimate, slightly better than AVX2's, before the shared refinement step.

use super::{PolicyKind, SimdPolicy};
use std::arch::x86_64::*;

#[derive(Debug, Clone, Copy, Default)]
pub struct Wide;

impl SimdPolicy for Wide {
    type Vector = __m512;

    const KIND: PolicyKind = PolicyKind::Wide;
    const WIDTH: usize = 16;
    const ALIGNMENT: usize = 64;

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> __m512 {
        _mm512_load_ps(ptr)
    }

    #[inline(always)]
    unsafe fn store(ptr: *mut f32, v: __m512) {
        _mm512_store_ps(ptr, v)
    }

    #[inline(always)]
    unsafe fn broadcast(value: f32) -> __m512 {
        _mm512_set1_ps(value)
    }

    #[inline(always)]
    unsafe fn zero() -> __m512 {
        _mm512_setzero_ps()
    }

    #[inline(always)]
    unsafe fn add(a: __m512, b: __m512) -> __m512 {
        _mm512_add_ps(a, b)
    }

    #[inline(always)]
    unsafe fn sub(a: __m512, b: __m512) -> __m512 {
        _mm512_sub_ps(a, b)
    }

    #[inline(always)]
    unsafe fn mul(a: __m512, b: __m512) -> __m512 {
        _mm512_mul_ps(a, b)
    }

    #[inline(always)]
    unsafe fn rsqrt_estimate(d2: __m512) -> __m512 {
        _mm512_rsqrt14_ps(d2)
    }

    #[inline(always)]
    unsafe fn horizontal_sum(v: __m512) -> f32 {
        _mm512_reduce_add_ps(v)
    }
}
