//! 8-lane policy on 256-bit AVX registers.
//!
//! Selected when the host reports AVX2 support.

use super::{PolicyKind, SimdPolicy};
use std::arch::x86_64::*;

#[derive(Debug, Clone, Copy, Default)]
pub struct Narrow;

impl SimdPolicy for Narrow {
    type Vector = __m256;

    const KIND: PolicyKind = PolicyKind::Narrow;
    const WIDTH: usize = 8;
    const ALIGNMENT: usize = 32;

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> __m256 {
        _mm256_load_ps(ptr)
    }

    #[inline(always)]
    unsafe fn store(ptr: *mut f32, v: __m256) {
        _mm256_store_ps(ptr, v)
    }

    #[inline(always)]
    unsafe fn broadcast(value: f32) -> __m256 {
        _mm256_set1_ps(value)
    }

    #[inline(always)]
    unsafe fn zero() -> __m256 {
        _mm256_setzero_ps()
    }

    #[inline(always)]
    unsafe fn add(a: __m256, b: __m256) -> __m256 {
        _mm256_add_ps(a, b)
    }

    #[inline(always)]
    unsafe fn sub(a: __m256, b: __m256) -> __m256 {
        _mm256_sub_ps(a, b)
    }

    #[inline(always)]
    unsafe fn mul(a: __m256, b: __m256) -> __m256 {
        _mm256_mul_ps(a, b)
    }

    #[inline(always)]
    unsafe fn rsqrt_estimate(d2: __m256) -> __m256 {
        _mm256_rsqrt_ps(d2)
    }

    #[inline(always)]
    unsafe fn horizontal_sum(v: __m256) -> f32 {
        let low = _mm256_castps256_ps128(v);
        let high = _mm256_extractf128_ps(v, 1);
        let v128 = _mm_add_ps(low, high);

        let shuf = _mm_movehl_ps(v128, v128);
        let v64 = _mm_add_ps(v128, shuf);

        let swiz = _mm_shuffle_ps(v64, v64, 0b01_01_01_01);
        let v32 = _mm_add_ss(v64, swiz);

        _mm_cvtss_f32(v32)
    }
}
