//! Storage state and the transitions between inline and heap storage.
//!
//! Every transition builds its replacement off to the side and commits by a
//! single assignment. Values that may fail to materialize (clones, user
//! closures, allocator hooks) are staged before any live value is relocated,
//! so a panic unwinds only what was staged.
use alloc::vec::Vec;
use core::{mem, ptr, slice};

use crate::allocator::ElementAllocator;
use crate::inline_buf::InlineBuf;
use crate::utils::trace_transition;

/// Values written past the live range, destroyed through the allocator
/// unless [`commit`](Staging::commit) is reached.
pub(crate) struct Staging<'a, T, A: ElementAllocator> {
    dst: *mut T,
    room: usize,
    built: usize,
    alloc: &'a A,
}

impl<'a, T, A: ElementAllocator> Staging<'a, T, A> {
    /// # Safety
    /// `dst` must be valid for writing `room` values and hold no live value.
    #[inline]
    pub(crate) unsafe fn new(dst: *mut T, room: usize, alloc: &'a A) -> Self {
        Self {
            dst,
            room,
            built: 0,
            alloc,
        }
    }

    /// # Panics
    /// Panics if every slot is already taken.
    #[inline]
    pub(crate) fn construct(&mut self, value: T) {
        assert!(self.built < self.room, "staging area is full");
        // SAFETY: `built < room` and slot `built` is still raw.
        unsafe { self.alloc.construct(self.dst.add(self.built), value) };
        self.built += 1;
    }

    /// Hands the staged values over to the caller.
    #[inline]
    pub(crate) fn commit(self) -> usize {
        let built = self.built;
        mem::forget(self);
        built
    }
}

impl<T, A: ElementAllocator> Drop for Staging<'_, T, A> {
    fn drop(&mut self) {
        if self.built > 0 {
            // SAFETY: `[0, built)` was constructed and never handed out.
            unsafe {
                self.alloc
                    .destroy(ptr::slice_from_raw_parts_mut(self.dst, self.built));
            }
        }
    }
}

/// The active storage of a container.
///
/// `Recovering` only exists while a failed reassignment unwinds. Queries
/// see it as an empty inline buffer and mutators reset it first.
pub(crate) enum Storage<T, const N: usize> {
    Inline(InlineBuf<T, N>),
    Heap(Vec<T>),
    Recovering,
}

impl<T, const N: usize> Storage<T, N> {
    #[inline]
    pub(crate) const fn new() -> Self {
        Self::Inline(InlineBuf::new())
    }

    #[inline]
    pub(crate) const fn is_recovering(&self) -> bool {
        matches!(self, Self::Recovering)
    }

    #[inline]
    pub(crate) const fn is_inline(&self) -> bool {
        !matches!(self, Self::Heap(_))
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        match self {
            Self::Inline(buf) => buf.len(),
            Self::Heap(vec) => vec.len(),
            Self::Recovering => 0,
        }
    }

    /// Room available without a transition. `N` unless on the heap.
    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        match self {
            Self::Heap(vec) => vec.capacity(),
            Self::Inline(_) | Self::Recovering => N,
        }
    }

    #[inline]
    pub(crate) fn as_ptr(&self) -> *const T {
        match self {
            Self::Inline(buf) => buf.as_ptr(),
            Self::Heap(vec) => vec.as_ptr(),
            Self::Recovering => ptr::NonNull::dangling().as_ptr(),
        }
    }

    #[inline]
    pub(crate) fn as_mut_ptr(&mut self) -> *mut T {
        match self {
            Self::Inline(buf) => buf.as_mut_ptr(),
            Self::Heap(vec) => vec.as_mut_ptr(),
            Self::Recovering => ptr::NonNull::dangling().as_ptr(),
        }
    }

    #[inline]
    pub(crate) fn as_slice(&self) -> &[T] {
        match self {
            Self::Inline(buf) => buf.as_slice(),
            Self::Heap(vec) => vec.as_slice(),
            Self::Recovering => &[],
        }
    }

    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        match self {
            Self::Inline(buf) => buf.as_mut_slice(),
            Self::Heap(vec) => vec.as_mut_slice(),
            Self::Recovering => &mut [],
        }
    }

    /// # Safety
    /// `new_len <= capacity()` and `[0, new_len)` must be initialized afterwards.
    #[inline]
    pub(crate) unsafe fn set_len(&mut self, new_len: usize) {
        match self {
            // SAFETY: guaranteed by the caller.
            Self::Inline(buf) => unsafe { buf.set_len(new_len) },
            Self::Heap(vec) => unsafe { vec.set_len(new_len) },
            Self::Recovering => debug_assert_eq!(new_len, 0),
        }
    }

    #[cold]
    pub(crate) fn reset(&mut self) {
        trace_transition!("recovered to empty inline storage");
        *self = Self::new();
    }

    /// Writes `value` into the first spare slot.
    ///
    /// # Safety
    /// `len() < capacity()`.
    #[inline]
    pub(crate) unsafe fn construct_back<A: ElementAllocator>(&mut self, value: T, alloc: &A) -> *mut T {
        let len = self.len();
        debug_assert!(len < self.capacity());
        // SAFETY: slot `len` is in bounds and raw.
        unsafe {
            let slot = self.as_mut_ptr().add(len);
            alloc.construct(slot, value);
            self.set_len(len + 1);
            slot
        }
    }

    /// Opens `count` slots at `index` in place.
    ///
    /// `fill` stages values into the spare tail first and receives the base of
    /// the untouched buffer, then the staged run is rotated into position.
    ///
    /// # Safety
    /// `index <= len()` and `len() + count <= capacity()`.
    pub(crate) unsafe fn insert_staged<A, F>(&mut self, index: usize, count: usize, fill: F, alloc: &A)
    where
        A: ElementAllocator,
        F: FnOnce(&mut Staging<'_, T, A>, *const T),
    {
        let len = self.len();
        debug_assert!(index <= len && len + count <= self.capacity());
        let base = self.as_mut_ptr();
        // SAFETY: `[len, len + count)` is spare capacity.
        let mut staging = unsafe { Staging::new(base.add(len), count, alloc) };
        fill(&mut staging, base);
        let built = staging.commit();
        // SAFETY: `[index, len + built)` is initialized.
        unsafe {
            if built > 0 && index < len {
                slice::from_raw_parts_mut(base.add(index), len + built - index).rotate_right(built);
            }
            self.set_len(len + built);
        }
    }

    /// Rebuilds into `fresh` with `count` slots opened at `index`, then
    /// switches to heap storage.
    ///
    /// `fill` runs first, writing straight into `fresh`. If it panics, `fresh`
    /// is discarded and `self` is untouched.
    pub(crate) fn rebuild_into<A, F>(&mut self, mut fresh: Vec<T>, index: usize, count: usize, fill: F, alloc: &A)
    where
        A: ElementAllocator,
        F: FnOnce(&mut Staging<'_, T, A>, *const T),
    {
        let len = self.len();
        assert!(fresh.is_empty() && fresh.capacity() >= len + count);
        debug_assert!(index <= len);
        let src = self.as_ptr();
        let dst = fresh.as_mut_ptr();
        // SAFETY: `fresh` has room for `len + count` values.
        let mut staging = unsafe { Staging::new(dst.add(index), count, alloc) };
        fill(&mut staging, src);
        let built = staging.commit();
        // SAFETY: both ranges fit `fresh`, and the originals are forgotten
        // before `fresh` claims them.
        unsafe {
            ptr::copy_nonoverlapping(src, dst, index);
            ptr::copy_nonoverlapping(src.add(index), dst.add(index + built), len - index);
            self.set_len(0);
            fresh.set_len(len + built);
        }
        trace_transition!(
            len = fresh.len(),
            capacity = fresh.capacity(),
            from_inline = self.is_inline(),
            "rebuilt into heap storage"
        );
        *self = Self::Heap(fresh);
    }

    /// Moves heap contents back into an inline buffer.
    ///
    /// # Panics
    /// Panics if the contents do not fit inline.
    pub(crate) fn shrink_to_inline(&mut self) {
        if let Self::Heap(vec) = self {
            let len = vec.len();
            assert!(len <= N, "length should be <= inline capacity");
            // SAFETY: the values are forgotten by `vec` right after.
            let buf = unsafe { InlineBuf::relocate_from(vec.as_ptr(), len) };
            unsafe { vec.set_len(0) };
            trace_transition!(len, capacity = N, "shrunk into inline storage");
            *self = Self::Inline(buf);
        }
    }

    /// Clones `src` into storage sized for it.
    pub(crate) fn clone_from_slice_in<A: ElementAllocator>(src: &[T], alloc: &A) -> Self
    where
        T: Clone,
    {
        if src.len() <= N {
            return Self::Inline(InlineBuf::clone_from_slice_in(src, alloc));
        }
        let mut vec = Vec::with_capacity(src.len());
        // SAFETY: `vec` has room for `src.len()` values.
        let mut staging = unsafe { Staging::new(vec.as_mut_ptr(), src.len(), alloc) };
        for item in src {
            staging.construct(item.clone());
        }
        let built = staging.commit();
        unsafe { vec.set_len(built) };
        Self::Heap(vec)
    }

    /// Moves every value of `source` into fresh storage built under `alloc`,
    /// leaving `source` empty.
    ///
    /// Each value passes through `alloc`'s construct hook. If the hook panics,
    /// the values already moved are destroyed and `source` keeps the rest.
    pub(crate) fn relocate_from<A: ElementAllocator>(source: &mut Self, alloc: &A) -> Self {
        struct Remaining<'a, T, const N: usize> {
            source: &'a mut Storage<T, N>,
            next: usize,
            len: usize,
        }

        impl<T, const N: usize> Drop for Remaining<'_, T, N> {
            fn drop(&mut self) {
                let left = self.len - self.next;
                // SAFETY: `[next, len)` is still live; `[0, next)` was moved out.
                unsafe {
                    let base = self.source.as_mut_ptr();
                    ptr::copy(base.add(self.next), base, left);
                    self.source.set_len(left);
                }
            }
        }

        let len = source.len();
        let mut fresh = if len <= N {
            Self::new()
        } else {
            Self::Heap(Vec::with_capacity(len))
        };
        let src = source.as_ptr();
        // SAFETY: the moved values are outside the live range before they leave.
        unsafe { source.set_len(0) };
        let mut remaining = Remaining { source, next: 0, len };
        // SAFETY: `fresh` has room for `len` values.
        let mut staging = unsafe { Staging::new(fresh.as_mut_ptr(), len, alloc) };
        for i in 0..len {
            // SAFETY: `i < len` is live and read exactly once.
            let value = unsafe { ptr::read(src.add(i)) };
            remaining.next = i + 1;
            staging.construct(value);
        }
        let built = staging.commit();
        drop(remaining);
        // SAFETY: `built` values were constructed from the start of `fresh`.
        unsafe { fresh.set_len(built) };
        fresh
    }

    /// Destroys `[start, end)` and closes the gap.
    ///
    /// The survivors are shifted down even if a destructor panics.
    pub(crate) fn erase_range<A: ElementAllocator>(&mut self, start: usize, end: usize, alloc: &A) {
        let old_len = self.len();
        debug_assert!(start <= end && end <= old_len);
        if start == end {
            return;
        }

        struct CloseGap<'a, T, const N: usize> {
            storage: &'a mut Storage<T, N>,
            start: usize,
            end: usize,
            old_len: usize,
        }

        impl<T, const N: usize> Drop for CloseGap<'_, T, N> {
            fn drop(&mut self) {
                let tail = self.old_len - self.end;
                // SAFETY: `[end, old_len)` is still live and lands on destroyed slots.
                unsafe {
                    let base = self.storage.as_mut_ptr();
                    ptr::copy(base.add(self.end), base.add(self.start), tail);
                    self.storage.set_len(self.start + tail);
                }
            }
        }

        let base = self.as_mut_ptr();
        // SAFETY: the erased values are outside the live range before they drop.
        unsafe { self.set_len(start) };
        let guard = CloseGap {
            storage: self,
            start,
            end,
            old_len,
        };
        // SAFETY: `[start, end)` is live and no longer reachable.
        unsafe { alloc.destroy(ptr::slice_from_raw_parts_mut(base.add(start), end - start)) };
        drop(guard);
    }

    /// Destroys everything from `new_len` on.
    pub(crate) fn truncate_in<A: ElementAllocator>(&mut self, new_len: usize, alloc: &A) {
        let len = self.len();
        if new_len >= len {
            return;
        }
        let base = self.as_mut_ptr();
        // SAFETY: the tail is forgotten before it drops.
        unsafe {
            self.set_len(new_len);
            alloc.destroy(ptr::slice_from_raw_parts_mut(base.add(new_len), len - new_len));
        }
    }

    /// # Safety
    /// `index < len()`.
    pub(crate) unsafe fn take_at(&mut self, index: usize) -> T {
        let len = self.len();
        debug_assert!(index < len);
        // SAFETY: guaranteed by the caller.
        unsafe {
            let base = self.as_mut_ptr();
            let value = ptr::read(base.add(index));
            ptr::copy(base.add(index + 1), base.add(index), len - index - 1);
            self.set_len(len - 1);
            value
        }
    }

    #[inline]
    pub(crate) fn pop_back(&mut self) -> Option<T> {
        let len = self.len();
        if len == 0 {
            return None;
        }
        // SAFETY: `len - 1` is live and becomes unreachable.
        unsafe {
            self.set_len(len - 1);
            Some(ptr::read(self.as_ptr().add(len - 1)))
        }
    }
}
