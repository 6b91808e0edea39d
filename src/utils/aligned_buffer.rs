//! Owning, aligned `f32` storage.
//!
//! Every array in the body store lives in an [`AlignedBuffer`]. The allocation is
//! rounded up to the buffer's alignment so a full vector load starting at any
//! aligned index inside the buffer stays inside the allocation.
use std::alloc::{self, Layout};
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;

use crate::utils::aligned_size;

/// A fixed-length, zero-initialized `f32` buffer whose first element sits on an
/// `alignment`-byte boundary.
///
/// Cloning copies the contents into a fresh allocation with the same alignment.
/// `std::mem::take` moves the allocation out and leaves an empty buffer behind.
///
/// # Examples
///
/// ```
/// use rs_nbody::utils::AlignedBuffer;
///
/// let mut buffer = AlignedBuffer::zeroed(10, 32);
/// assert_eq!(buffer.len(), 10);
/// assert_eq!(buffer.as_ptr() as usize % 32, 0);
///
/// buffer[3] = 1.5;
/// let copy = buffer.clone();
/// assert_eq!(copy[3], 1.5);
/// ```
pub struct AlignedBuffer {
    ptr: NonNull<f32>,
    len: usize,
    alignment: usize,
    layout: Option<Layout>,
}

// The buffer uniquely owns its allocation, like a `Vec<f32>`.
unsafe impl Send for AlignedBuffer {}
unsafe impl Sync for AlignedBuffer {}

impl AlignedBuffer {
    /// Allocates `len` zeroed floats aligned to `alignment` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `alignment` is not a power of two at least as large as `f32`'s
    /// alignment, or if the rounded byte size overflows. Aborts through
    /// [`alloc::handle_alloc_error`] if the allocator fails.
    pub fn zeroed(len: usize, alignment: usize) -> Self {
        assert!(
            alignment.is_power_of_two() && alignment >= std::mem::align_of::<f32>(),
            "alignment must be a power of two no smaller than 4, got {}",
            alignment
        );

        if len == 0 {
            return Self::empty(alignment);
        }

        let bytes = len
            .checked_mul(std::mem::size_of::<f32>())
            .map(|b| aligned_size(b, alignment))
            .expect("aligned buffer size overflows usize");
        let layout = Layout::from_size_align(bytes, alignment)
            .expect("aligned buffer layout exceeds isize::MAX");

        // SAFETY: `layout` has a non-zero size.
        let raw = unsafe { alloc::alloc_zeroed(layout) } as *mut f32;
        let ptr = match NonNull::new(raw) {
            Some(ptr) => ptr,
            None => alloc::handle_alloc_error(layout),
        };

        Self {
            ptr,
            len,
            alignment,
            layout: Some(layout),
        }
    }

    /// Allocates a buffer holding a copy of `values`.
    pub fn from_slice(values: &[f32], alignment: usize) -> Self {
        let mut buffer = Self::zeroed(values.len(), alignment);
        buffer.copy_from_slice(values);
        buffer
    }

    fn empty(alignment: usize) -> Self {
        Self {
            ptr: NonNull::dangling(),
            len: 0,
            alignment,
            layout: None,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Byte boundary of the first element.
    #[inline]
    pub fn alignment(&self) -> usize {
        self.alignment
    }

    #[inline]
    pub fn as_ptr(&self) -> *const f32 {
        self.ptr.as_ptr()
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut f32 {
        self.ptr.as_ptr()
    }

    /// Sets every element to zero.
    pub fn fill_zero(&mut self) {
        self.fill(0.0);
    }
}

impl Default for AlignedBuffer {
    fn default() -> Self {
        Self::empty(std::mem::align_of::<f32>())
    }
}

impl Deref for AlignedBuffer {
    type Target = [f32];

    #[inline]
    fn deref(&self) -> &[f32] {
        // SAFETY: `ptr` is valid for `len` initialized floats, or dangling with `len == 0`.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl DerefMut for AlignedBuffer {
    #[inline]
    fn deref_mut(&mut self) -> &mut [f32] {
        // SAFETY: as in `deref`, and `&mut self` guarantees exclusive access.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl Clone for AlignedBuffer {
    fn clone(&self) -> Self {
        Self::from_slice(self, self.alignment)
    }
}

impl Drop for AlignedBuffer {
    fn drop(&mut self) {
        if let Some(layout) = self.layout.take() {
            // SAFETY: the pointer was returned by `alloc_zeroed` with this exact layout.
            unsafe { alloc::dealloc(self.ptr.as_ptr() as *mut u8, layout) }
        }
    }
}

impl fmt::Debug for AlignedBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlignedBuffer")
            .field("len", &self.len)
            .field("alignment", &self.alignment)
            .field("data", &self.deref())
            .finish()
    }
}

impl PartialEq for AlignedBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.deref() == other.deref()
    }
}
