use core::{
    mem::{self, MaybeUninit},
    ptr, slice,
};

use crate::allocator::ElementAllocator;
use crate::storage::Staging;

/// Fixed-capacity element storage embedded in the container itself.
///
/// Slots `[0, len)` hold live values, slots `[len, N)` are raw memory.
/// Typed pointers are always re-derived from `data`, never stored.
///
/// Destruction normally goes through the owning container's allocator,
/// which empties the buffer first. `Drop` only cleans up what is left.
pub(crate) struct InlineBuf<T, const N: usize> {
    data: [MaybeUninit<T>; N],
    len: usize,
}

impl<T, const N: usize> Drop for InlineBuf<T, N> {
    fn drop(&mut self) {
        if self.len > 0 {
            // SAFETY: `[0, len)` is initialized.
            unsafe {
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.as_mut_ptr(), self.len));
            }
        }
    }
}

impl<T, const N: usize> InlineBuf<T, N> {
    #[inline]
    pub(crate) const fn new() -> Self {
        Self {
            // SAFETY: An array of `MaybeUninit` needs no initialization.
            data: unsafe { MaybeUninit::<[MaybeUninit<T>; N]>::uninit().assume_init() },
            len: 0,
        }
    }

    #[inline(always)]
    pub(crate) const fn as_ptr(&self) -> *const T {
        &raw const self.data as *const T
    }

    #[inline(always)]
    pub(crate) const fn as_mut_ptr(&mut self) -> *mut T {
        &raw mut self.data as *mut T
    }

    #[inline(always)]
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// # Safety
    /// `new_len <= N`, and `[0, new_len)` must be initialized afterwards.
    #[inline(always)]
    pub(crate) const unsafe fn set_len(&mut self, new_len: usize) {
        debug_assert!(new_len <= N);
        self.len = new_len;
    }

    #[inline(always)]
    pub(crate) const fn as_slice(&self) -> &[T] {
        // SAFETY: `[0, len)` is initialized.
        unsafe { slice::from_raw_parts(self.as_ptr(), self.len) }
    }

    #[inline(always)]
    pub(crate) const fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: `[0, len)` is initialized.
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr(), self.len) }
    }

    /// Clones `src` element by element through `alloc`.
    ///
    /// A panicking clone destroys the values built so far and leaves `src` untouched.
    ///
    /// # Panics
    /// Panics if `src.len() > N`.
    pub(crate) fn clone_from_slice_in<A: ElementAllocator>(src: &[T], alloc: &A) -> Self
    where
        T: Clone,
    {
        assert!(src.len() <= N, "source length should be <= inline capacity");
        let mut buf = Self::new();
        // SAFETY: `N` slots are available and `src.len() <= N`.
        let mut staging = unsafe { Staging::new(buf.as_mut_ptr(), src.len(), alloc) };
        for item in src {
            staging.construct(item.clone());
        }
        let built = staging.commit();
        // SAFETY: `built` values were written from the start of the buffer.
        unsafe { buf.set_len(built) };
        buf
    }

    /// Relocates `len` values starting at `src` into a fresh buffer.
    ///
    /// # Safety
    /// `src` must point at `len <= N` live values that the caller will forget.
    pub(crate) unsafe fn relocate_from(src: *const T, len: usize) -> Self {
        debug_assert!(len <= N);
        let mut buf = Self::new();
        // SAFETY: guaranteed by the caller.
        unsafe {
            ptr::copy_nonoverlapping(src, buf.as_mut_ptr(), len);
            buf.set_len(len);
        }
        buf
    }

    /// Exchanges contents with `other`.
    ///
    /// Values at common indices are swapped pairwise, the longer tail is moved
    /// across, then the counts trade places.
    pub(crate) fn swap_with(&mut self, other: &mut Self) {
        let (short, long) = if self.len <= other.len {
            (self, other)
        } else {
            (other, self)
        };
        let common = short.len;
        let excess = long.len - common;
        // SAFETY: both buffers hold `common` live values, `long` holds `excess`
        // more, and `short` has room for them since `long.len <= N`.
        unsafe {
            ptr::swap_nonoverlapping(short.as_mut_ptr(), long.as_mut_ptr(), common);
            ptr::copy_nonoverlapping(
                long.as_ptr().add(common),
                short.as_mut_ptr().add(common),
                excess,
            );
        }
        mem::swap(&mut short.len, &mut long.len);
    }
}
