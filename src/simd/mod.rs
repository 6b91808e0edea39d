//! Portable SIMD policies for the force kernel.
//!
//! A [`SimdPolicy`] is a zero-sized type exposing the handful of vector primitives the
//! force kernel needs. The kernel is written once, generic over the policy, and
//! monomorphized per width:
//!
//! - [`Wide`]: 16 lanes, AVX-512F (behind the `avx512-simd` feature)
//! - [`Narrow`]: 8 lanes, AVX2
//! - [`Scalar`]: 1 lane, always available
//!
//! Every policy computes the reciprocal square root the same way: a hardware (or
//! portable) estimate followed by exactly one Newton-Raphson step. Only the estimate
//! differs between policies, so results agree to within the refined estimate's error.
//!
//! The policy used by a simulation is chosen once, at construction, from
//! [`PolicyKind::detect`].

mod dispatch;
mod scalar;

#[cfg(target_arch = "x86_64")]
mod avx2;

#[cfg(all(target_arch = "x86_64", feature = "avx512-simd"))]
mod avx512;

pub use dispatch::PolicyKind;
pub use scalar::{reciprocal_sqrt, Scalar};

#[cfg(target_arch = "x86_64")]
pub use avx2::Narrow;

#[cfg(all(target_arch = "x86_64", feature = "avx512-simd"))]
pub use avx512::Wide;

/// Uniform vector interface over one hardware register type.
///
/// # Safety
///
/// Every method is `unsafe`: callers must ensure the host supports the policy's
/// instruction set (see [`PolicyKind::is_supported`]). `load` and `store` additionally
/// require `ptr` to be aligned to [`SimdPolicy::ALIGNMENT`] bytes with `WIDTH`
/// addressable floats behind it.
pub trait SimdPolicy: Copy + Send + Sync + 'static {
    /// Register type holding `WIDTH` floats.
    type Vector: Copy;

    const KIND: PolicyKind;
    /// Number of `f32` lanes.
    const WIDTH: usize;
    /// Required byte alignment for `load` and `store`.
    const ALIGNMENT: usize;

    unsafe fn load(ptr: *const f32) -> Self::Vector;
    unsafe fn store(ptr: *mut f32, v: Self::Vector);
    unsafe fn broadcast(value: f32) -> Self::Vector;
    unsafe fn zero() -> Self::Vector;

    unsafe fn add(a: Self::Vector, b: Self::Vector) -> Self::Vector;
    unsafe fn sub(a: Self::Vector, b: Self::Vector) -> Self::Vector;
    unsafe fn mul(a: Self::Vector, b: Self::Vector) -> Self::Vector;

    /// Raw approximation of `1/sqrt(d2)`, roughly 12 to 14 bits.
    unsafe fn rsqrt_estimate(d2: Self::Vector) -> Self::Vector;

    /// `1/sqrt(d2)` refined by one Newton-Raphson step: `r * (1.5 - 0.5 * d2 * r * r)`.
    #[inline(always)]
    unsafe fn reciprocal_sqrt(d2: Self::Vector) -> Self::Vector {
        let r = Self::rsqrt_estimate(d2);
        let half_d2 = Self::mul(Self::broadcast(0.5), d2);
        Self::mul(
            r,
            Self::sub(Self::broadcast(1.5), Self::mul(Self::mul(half_d2, r), r)),
        )
    }

    /// Sum of all lanes.
    unsafe fn horizontal_sum(v: Self::Vector) -> f32;
}
