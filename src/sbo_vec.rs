//! The small-buffer-optimized vector.
//!
//! [`SboVec`] keeps up to `N` elements inside its own footprint and spills to
//! a heap [`Vec`] on overflow. It goes back only on an explicit
//! [`shrink_to_fit`](SboVec::shrink_to_fit).
//!
//! # Invalidation
//!
//! Any `&mut self` method may relocate every element: spilling, shrinking
//! and heap growth all move the whole buffer. The borrow checker enforces
//! this for references. Raw pointers from [`as_ptr`](SboVec::as_ptr) must be
//! treated the same way.
//!
//! # Panic safety
//!
//! Spilling, shrinking, reserving, every insertion and growth by `resize`
//! are strongly panic safe: if a clone, a user closure or the allocator's
//! construct hook panics, the vector is left exactly as it was.
//! Reassignment ([`Clone::clone_from`], [`move_assign`](SboVec::move_assign))
//! clears first; a panic there leaves an empty inline vector.
//!
//! [`Vec`]: alloc::vec::Vec
use alloc::vec::Vec;
use core::{
    cmp, fmt,
    iter::FusedIterator,
    mem::{self, ManuallyDrop},
    ops::RangeBounds,
    ptr,
};

use crate::allocator::{ElementAllocator, StdAlloc, interchangeable};
use crate::error::Error;
use crate::storage::{Staging, Storage};
use crate::utils::{capacity_overflow, checked_range};

/// A vector that stores up to `N` elements inline before moving to the heap.
///
/// Every element is created and dropped through the allocator `A`, which
/// also decides what happens to it on [`clone_from`](Clone::clone_from),
/// [`move_assign`](SboVec::move_assign) and [`swap`](SboVec::swap).
///
/// # Examples
///
/// ```
/// use sbovec::SboVec;
///
/// let mut vec: SboVec<i32, 4> = SboVec::new();
/// vec.extend([1, 2, 3, 4]);
/// assert!(vec.is_inline());
/// assert_eq!(vec.capacity(), 4);
///
/// vec.push(5);
/// assert!(!vec.is_inline());
/// assert_eq!(vec, [1, 2, 3, 4, 5]);
///
/// vec.truncate(2);
/// vec.shrink_to_fit();
/// assert!(vec.is_inline());
/// assert_eq!(vec, [1, 2]);
/// ```
pub struct SboVec<T, const N: usize, A: ElementAllocator = StdAlloc> {
    storage: Storage<T, N>,
    alloc: A,
}

/// Creates a [`SboVec`] containing the arguments.
///
/// The syntax mirrors [`vec!`](alloc::vec!). The inline capacity comes from
/// the annotated type.
///
/// # Examples
///
/// ```
/// # use sbovec::{sbovec, SboVec};
/// let empty: SboVec<String, 4> = sbovec![];
/// let fives: SboVec<i64, 4> = sbovec![5; 3];
/// let listed: SboVec<_, 4> = sbovec![1, 2, 3, 4, 5, 6];
/// assert!(empty.is_empty());
/// assert_eq!(fives, [5, 5, 5]);
/// assert!(!listed.is_inline());
/// ```
#[macro_export]
macro_rules! sbovec {
    [] => { $crate::SboVec::new() };
    [$elem:expr; $n:expr] => { $crate::SboVec::from_elem($elem, $n) };
    [$($item:expr),+ $(,)?] => { $crate::SboVec::from([ $($item),+ ]) };
}

impl<T, const N: usize> SboVec<T, N> {
    /// Constructs a new, empty `SboVec` using inline storage.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sbovec::SboVec;
    /// let vec: SboVec<u8, 16> = SboVec::new();
    /// assert_eq!(vec.capacity(), 16);
    /// ```
    #[inline]
    pub const fn new() -> Self {
        Self::new_in(StdAlloc)
    }

    /// Constructs an empty `SboVec` able to hold `capacity` elements without
    /// a transition. Stays inline while `capacity <= N`.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_in(capacity, StdAlloc)
    }
}

impl<T: Clone, const N: usize> SboVec<T, N> {
    /// Creates a vector holding `n` clones of `elem`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sbovec::SboVec;
    /// let vec: SboVec<char, 2> = SboVec::from_elem('x', 3);
    /// assert_eq!(vec, ['x', 'x', 'x']);
    /// assert!(!vec.is_inline());
    /// ```
    pub fn from_elem(elem: T, n: usize) -> Self {
        Self::from_elem_in(elem, n, StdAlloc)
    }
}

impl<T, const N: usize, A: ElementAllocator> SboVec<T, N, A> {
    /// The number of elements held without touching the heap.
    pub const INLINE_CAPACITY: usize = N;

    /// Transitions and insertions leave the vector unchanged when they panic.
    pub const STRONG_GUARANTEE: bool = true;

    /// Constructs a new, empty `SboVec` with the given allocator.
    #[inline]
    pub const fn new_in(alloc: A) -> Self {
        const { assert!(N > 0, "inline capacity should be > 0") };
        Self {
            storage: Storage::new(),
            alloc,
        }
    }

    /// Constructs an empty `SboVec` with room for `capacity` elements.
    pub fn with_capacity_in(capacity: usize, alloc: A) -> Self {
        let mut vec = Self::new_in(alloc);
        if capacity > N {
            vec.storage = Storage::Heap(Vec::with_capacity(capacity));
        }
        vec
    }

    /// Collects `iter` into a vector that uses `alloc`.
    pub fn from_iter_in<I: IntoIterator<Item = T>>(iter: I, alloc: A) -> Self {
        let mut vec = Self::new_in(alloc);
        vec.extend(iter);
        vec
    }

    /// Takes over the buffer of `vec` as heap storage.
    ///
    /// The elements enter without passing through the allocator's hooks.
    pub fn from_vec_in(vec: Vec<T>, alloc: A) -> Self {
        let mut out = Self::new_in(alloc);
        out.storage = Storage::Heap(vec);
        out
    }

    /// Moves the contents under a new allocator.
    ///
    /// Storage is adopted as is when the two allocators are interchangeable,
    /// otherwise each element is moved into storage owned by `alloc` through
    /// its construct hook.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sbovec::{sbovec, SboVec, StdAlloc};
    /// let vec: SboVec<i32, 2> = sbovec![1, 2, 3];
    /// let moved = vec.move_in(StdAlloc);
    /// assert_eq!(moved, [1, 2, 3]);
    /// ```
    pub fn move_in(self, alloc: A) -> Self {
        let mut source = self;
        let mut vec = Self::new_in(alloc);
        source.recover();
        vec.take_contents(&mut source);
        vec
    }

    /// Returns a reference to the allocator.
    #[inline]
    pub const fn allocator(&self) -> &A {
        &self.alloc
    }

    /// The number of elements held without touching the heap.
    #[inline(always)]
    pub const fn inline_capacity() -> usize {
        N
    }

    /// Returns `true` if the elements live inside the vector itself.
    #[inline]
    pub const fn is_inline(&self) -> bool {
        self.storage.is_inline()
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Returns `true` if there are no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of elements the vector can hold without a transition.
    ///
    /// This is exactly `N` while inline.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// The largest length the allocator allows.
    #[inline]
    pub fn max_size(&self) -> usize {
        self.alloc.max_size::<T>()
    }

    /// Returns a raw pointer to the active buffer.
    ///
    /// The pointer is invalidated by any method taking `&mut self`, and also
    /// by moving the vector while it is inline.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.storage.as_ptr()
    }

    /// Returns a raw mutable pointer to the active buffer.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.storage.as_mut_ptr()
    }

    /// Extracts a slice of the whole vector.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.storage.as_slice()
    }

    /// Extracts a mutable slice of the whole vector.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.storage.as_mut_slice()
    }

    /// Returns `true` if `ptr` points at one of the live elements.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sbovec::{sbovec, SboVec};
    /// let vec: SboVec<i32, 4> = sbovec![1, 2, 3];
    /// let outside = 2;
    /// assert!(vec.contains_ptr(&vec[1]));
    /// assert!(!vec.contains_ptr(&outside));
    /// ```
    #[inline]
    pub fn contains_ptr(&self, ptr: *const T) -> bool {
        self.as_slice().as_ptr_range().contains(&ptr)
    }

    /// Returns the element at `index`, or [`Error::OutOfRange`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use sbovec::{sbovec, Error, SboVec};
    /// let vec: SboVec<i32, 4> = sbovec![10, 20];
    /// assert_eq!(vec.at(1), Ok(&20));
    /// assert_eq!(vec.at(2), Err(Error::OutOfRange { index: 2, len: 2 }));
    /// ```
    #[inline]
    pub fn at(&self, index: usize) -> Result<&T, Error> {
        let len = self.len();
        self.as_slice()
            .get(index)
            .ok_or(Error::OutOfRange { index, len })
    }

    /// Returns the element at `index` mutably, or [`Error::OutOfRange`].
    #[inline]
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, Error> {
        let len = self.len();
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(Error::OutOfRange { index, len })
    }

    /// Returns the first element, or `None` if empty.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// Returns the last element, or `None` if empty.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.as_slice().last()
    }

    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().first_mut()
    }

    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    /// Reserves room for at least `additional` more elements.
    ///
    /// Spills to the heap if the result no longer fits inline.
    ///
    /// # Panics
    /// Panics if the new capacity overflows `usize`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sbovec::{sbovec, SboVec};
    /// let mut vec: SboVec<i32, 4> = sbovec![1, 2];
    /// vec.reserve(2);
    /// assert!(vec.is_inline());
    /// vec.reserve(3);
    /// assert!(!vec.is_inline());
    /// assert!(vec.capacity() >= 5);
    /// ```
    pub fn reserve(&mut self, additional: usize) {
        self.recover();
        let len = self.len();
        match &mut self.storage {
            Storage::Heap(vec) => vec.reserve(additional),
            Storage::Inline(_) => {
                let Some(required) = len.checked_add(additional) else {
                    capacity_overflow()
                };
                if required > N {
                    let fresh = Vec::with_capacity(required);
                    self.storage.rebuild_into(fresh, len, 0, |_, _| {}, &self.alloc);
                }
            }
            Storage::Recovering => unreachable!(),
        }
    }

    /// Tries to reserve room for at least `additional` more elements.
    ///
    /// On failure the vector is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sbovec::{Error, SboVec};
    /// let mut vec: SboVec<u64, 4> = SboVec::new();
    /// assert!(vec.try_reserve(10).is_ok());
    /// assert_eq!(vec.try_reserve(usize::MAX), Err(Error::CapacityOverflow));
    /// assert_eq!(vec.len(), 0);
    /// ```
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), Error> {
        self.recover();
        let len = self.len();
        let required = len.checked_add(additional).ok_or(Error::CapacityOverflow)?;
        if required > self.max_size() {
            return Err(Error::CapacityOverflow);
        }
        match &mut self.storage {
            Storage::Heap(vec) => vec.try_reserve(additional)?,
            Storage::Inline(_) if required > N => {
                let mut fresh = Vec::new();
                fresh.try_reserve_exact(required)?;
                self.storage.rebuild_into(fresh, len, 0, |_, _| {}, &self.alloc);
            }
            _ => {}
        }
        Ok(())
    }

    /// Shrinks the capacity as much as possible.
    ///
    /// A heap vector whose contents fit inline moves back inline,
    /// otherwise the heap buffer is shrunk. Inline vectors are unaffected.
    pub fn shrink_to_fit(&mut self) {
        self.recover();
        if let Storage::Heap(vec) = &mut self.storage {
            if vec.len() <= N {
                self.storage.shrink_to_inline();
            } else {
                vec.shrink_to_fit();
            }
        }
    }

    /// Drops every element from `len` on. Capacity and storage are unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sbovec::{sbovec, SboVec};
    /// let mut vec: SboVec<i32, 2> = sbovec![1, 2, 3, 4];
    /// vec.truncate(1);
    /// assert_eq!(vec, [1]);
    /// assert!(!vec.is_inline());
    /// ```
    pub fn truncate(&mut self, len: usize) {
        self.recover();
        self.storage.truncate_in(len, &self.alloc);
    }

    /// Drops every element. Never releases capacity and never changes storage.
    #[inline]
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Appends an element.
    ///
    /// A full inline buffer spills to a heap buffer of
    /// `max(2 * N, len + len / 2 + 1)` elements.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sbovec::{sbovec, SboVec};
    /// let mut vec: SboVec<i32, 2> = sbovec![1, 2];
    /// vec.push(3);
    /// assert_eq!(vec, [1, 2, 3]);
    /// assert_eq!(vec.capacity(), 4);
    /// ```
    #[inline]
    pub fn push(&mut self, value: T) {
        self.recover();
        if self.storage.len() == self.storage.capacity() {
            match &mut self.storage {
                Storage::Heap(vec) => vec.reserve(1),
                _ => return self.spill_push(value),
            }
        }
        // SAFETY: there is a spare slot.
        unsafe { self.storage.construct_back(value, &self.alloc) };
    }

    #[cold]
    #[inline(never)]
    fn spill_push(&mut self, value: T) {
        let len = self.len();
        self.insert_with(len, 1, move |staging, _| staging.construct(value));
    }

    /// Appends the value returned by `f` and returns a reference to it.
    ///
    /// Grows like [`push`](Self::push). The value is built before anything is
    /// committed, so if `f` panics the vector is left as it was.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sbovec::SboVec;
    /// let mut vec: SboVec<String, 2> = SboVec::new();
    /// vec.emplace(|| "a".into()).push('!');
    /// assert_eq!(vec, ["a!"]);
    /// ```
    pub fn emplace<F: FnOnce() -> T>(&mut self, f: F) -> &mut T {
        let len = self.len();
        self.insert_with(len, 1, move |staging, _| staging.construct(f()));
        // SAFETY: the slot at `len` was just filled.
        unsafe { &mut *self.as_mut_ptr().add(len) }
    }

    /// Removes the last element and returns it, or `None` if empty.
    ///
    /// Never moves heap storage back inline.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        self.recover();
        self.storage.pop_back()
    }

    /// Inserts an element at `index`, shifting everything after it right.
    ///
    /// # Panics
    /// Panics if `index > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sbovec::{sbovec, SboVec};
    /// let mut vec: SboVec<char, 3> = sbovec!['a', 'c', 'd'];
    /// vec.insert(1, 'b');
    /// assert_eq!(vec, ['a', 'b', 'c', 'd']);
    /// vec.insert(4, 'e');
    /// assert_eq!(vec, ['a', 'b', 'c', 'd', 'e']);
    /// ```
    pub fn insert(&mut self, index: usize, value: T) {
        self.insert_with(index, 1, move |staging, _| staging.construct(value));
    }

    /// Removes and returns the element at `index`, shifting everything after it left.
    ///
    /// # Panics
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> T {
        self.recover();
        let len = self.len();
        assert!(index < len, "removal index should be < len");
        // SAFETY: `index < len`.
        unsafe { self.storage.take_at(index) }
    }

    /// Drops the elements in `range` and closes the gap.
    ///
    /// If a destructor panics, the remaining elements of the range are still
    /// dropped and the survivors are kept in order.
    ///
    /// # Panics
    /// Panics if the range is decreasing or ends past `len`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sbovec::{sbovec, SboVec};
    /// let mut vec: SboVec<i32, 8> = sbovec![0, 1, 2, 3, 4, 5];
    /// vec.erase(1..3);
    /// assert_eq!(vec, [0, 3, 4, 5]);
    /// vec.erase(2..);
    /// assert_eq!(vec, [0, 3]);
    /// ```
    pub fn erase<R: RangeBounds<usize>>(&mut self, range: R) {
        self.recover();
        let (start, end) = checked_range(&range, self.len());
        self.storage.erase_range(start, end, &self.alloc);
    }

    /// Resizes in place, filling new slots with values returned by `f`.
    ///
    /// Growth is all or nothing: if `f` panics, the vector keeps its old contents.
    pub fn resize_with<F: FnMut() -> T>(&mut self, new_len: usize, mut f: F) {
        let len = self.len();
        if new_len <= len {
            return self.truncate(new_len);
        }
        let count = new_len - len;
        self.insert_with(len, count, |staging, _| {
            for _ in 0..count {
                staging.construct(f());
            }
        });
    }

    /// Swaps contents with `other`, exchanging allocators if `A` propagates on swap.
    ///
    /// Two inline vectors swap element by element, two heap vectors swap buffers,
    /// and mixed pairs exchange their storage wholesale.
    ///
    /// Swapping non-propagating allocators that differ is a logic error
    /// caught only by a debug assertion.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sbovec::{sbovec, SboVec};
    /// let mut a: SboVec<i32, 2> = sbovec![1];
    /// let mut b: SboVec<i32, 2> = sbovec![2, 3, 4];
    /// a.swap(&mut b);
    /// assert_eq!(a, [2, 3, 4]);
    /// assert_eq!(b, [1]);
    /// assert!(b.is_inline());
    /// ```
    pub fn swap(&mut self, other: &mut Self) {
        self.recover();
        other.recover();
        if A::PROPAGATE_ON_SWAP {
            mem::swap(&mut self.alloc, &mut other.alloc);
        } else {
            debug_assert!(
                interchangeable(&self.alloc, &other.alloc),
                "swapping vectors with unequal allocators"
            );
        }
        match (&mut self.storage, &mut other.storage) {
            (Storage::Inline(a), Storage::Inline(b)) => a.swap_with(b),
            (Storage::Heap(a), Storage::Heap(b)) => mem::swap(a, b),
            (a, b) => mem::swap(a, b),
        }
    }

    /// Replaces the contents with those of `source`, leaving `source` empty.
    ///
    /// The storage is taken over when `A` propagates on move or the two
    /// allocators are interchangeable. Otherwise each element is moved into
    /// storage built under this vector's allocator, through its construct
    /// hook. If the hook panics, this vector is left empty and `source` keeps
    /// the elements not yet moved.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sbovec::{sbovec, SboVec};
    /// let mut dst: SboVec<i32, 2> = sbovec![9];
    /// let mut src: SboVec<i32, 2> = sbovec![1, 2, 3];
    /// dst.move_assign(&mut src);
    /// assert_eq!(dst, [1, 2, 3]);
    /// assert!(src.is_empty() && src.is_inline());
    /// ```
    pub fn move_assign(&mut self, source: &mut Self) {
        self.recover();
        source.recover();
        self.discard_contents();
        if A::PROPAGATE_ON_MOVE_ASSIGN {
            self.alloc = source.alloc.clone();
        }
        self.take_contents(source);
    }

    /// Converts into a [`Vec`], keeping the heap buffer if there is one.
    ///
    /// The elements leave without passing through the allocator's hooks.
    pub fn into_vec(self) -> Vec<T> {
        let mut out = match &self.storage {
            Storage::Inline(buf) => Vec::with_capacity(buf.len()),
            _ => Vec::new(),
        };
        let (mut storage, _) = self.into_parts();
        match storage {
            Storage::Heap(vec) => vec,
            _ => {
                let len = storage.len();
                // SAFETY: `out` has room for `len`, and `storage` forgets the values.
                unsafe {
                    ptr::copy_nonoverlapping(storage.as_ptr(), out.as_mut_ptr(), len);
                    storage.set_len(0);
                    out.set_len(len);
                }
                out
            }
        }
    }

    /// Resolves a leftover failed reassignment to an empty inline buffer.
    #[inline(always)]
    fn recover(&mut self) {
        if self.storage.is_recovering() {
            self.storage.reset();
        }
    }

    /// Opens `count` slots at `index` and lets `fill` populate them.
    ///
    /// `fill` receives the base of the pre-mutation buffer, so it can clone
    /// from the vector's own elements. Nothing is relocated before it returns.
    fn insert_with<F>(&mut self, index: usize, count: usize, fill: F)
    where
        F: FnOnce(&mut Staging<'_, T, A>, *const T),
    {
        self.recover();
        let len = self.len();
        assert!(index <= len, "insertion index should be <= len");
        let Some(required) = len.checked_add(count) else {
            capacity_overflow()
        };
        if required <= self.storage.capacity() {
            // SAFETY: `index <= len` and the slots fit.
            unsafe { self.storage.insert_staged(index, count, fill, &self.alloc) };
        } else {
            let fresh = Vec::with_capacity(self.grown_capacity(required));
            self.storage.rebuild_into(fresh, index, count, fill, &self.alloc);
        }
    }

    /// Capacity of the buffer built once `required` no longer fits.
    fn grown_capacity(&self, required: usize) -> usize {
        let grown = match &self.storage {
            Storage::Heap(vec) => vec.capacity().saturating_mul(2),
            _ => {
                let len = self.len();
                cmp::max(N.saturating_mul(2), len + len / 2 + 1)
            }
        };
        cmp::max(grown, required)
    }

    /// Destroys the contents through the allocator and releases any heap buffer.
    ///
    /// Leaves the vector recovering; the caller installs the new storage.
    fn discard_contents(&mut self) {
        let mut old = mem::replace(&mut self.storage, Storage::Recovering);
        old.truncate_in(0, &self.alloc);
    }

    /// Takes the elements of `source` into this empty vector.
    fn take_contents(&mut self, source: &mut Self) {
        debug_assert!(self.is_empty());
        self.storage = if interchangeable(&self.alloc, &source.alloc) {
            mem::replace(&mut source.storage, Storage::new())
        } else {
            Storage::relocate_from(&mut source.storage, &self.alloc)
        };
    }

    fn into_parts(self) -> (Storage<T, N>, A) {
        let this = ManuallyDrop::new(self);
        // SAFETY: `this` is never dropped, so each field is read exactly once.
        unsafe { (ptr::read(&this.storage), ptr::read(&this.alloc)) }
    }
}

impl<T: Clone, const N: usize, A: ElementAllocator> SboVec<T, N, A> {
    /// Creates a vector holding `n` clones of `elem`, using `alloc`.
    pub fn from_elem_in(elem: T, n: usize, alloc: A) -> Self {
        let mut vec = Self::new_in(alloc);
        vec.resize(n, elem);
        vec
    }

    /// Clones the vector under a chosen allocator.
    ///
    /// If a clone panics, the values cloned so far are dropped and nothing leaks.
    pub fn clone_in(&self, alloc: A) -> Self {
        let storage = Storage::clone_from_slice_in(self.as_slice(), &alloc);
        Self { storage, alloc }
    }

    /// Resizes in place, filling new slots with clones of `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sbovec::{sbovec, SboVec};
    /// let mut vec: SboVec<&str, 2> = sbovec!["hi"];
    /// vec.resize(3, "yo");
    /// assert_eq!(vec, ["hi", "yo", "yo"]);
    /// vec.resize(1, "");
    /// assert_eq!(vec, ["hi"]);
    /// ```
    pub fn resize(&mut self, new_len: usize, value: T) {
        let len = self.len();
        if new_len <= len {
            return self.truncate(new_len);
        }
        let count = new_len - len;
        self.insert_with(len, count, move |staging, _| {
            for _ in 1..count {
                staging.construct(value.clone());
            }
            staging.construct(value);
        });
    }

    /// Inserts clones of `other` at `index`.
    ///
    /// # Panics
    /// Panics if `index > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sbovec::{sbovec, SboVec};
    /// let mut vec: SboVec<i32, 4> = sbovec![1, 5];
    /// vec.insert_from_slice(1, &[2, 3, 4]);
    /// assert_eq!(vec, [1, 2, 3, 4, 5]);
    /// ```
    pub fn insert_from_slice(&mut self, index: usize, other: &[T]) {
        self.insert_with(index, other.len(), |staging, _| {
            for item in other {
                staging.construct(item.clone());
            }
        });
    }

    /// Inserts clones of the vector's own elements in `src` at `index`.
    ///
    /// The clones are taken from the buffer as it was before the call.
    ///
    /// # Panics
    /// Panics if `index > len` or `src` is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sbovec::{sbovec, SboVec};
    /// let mut vec: SboVec<i32, 3> = sbovec![1, 2, 3];
    /// vec.insert_from_within(1, 0..1);
    /// assert_eq!(vec, [1, 1, 2, 3]);
    /// vec.insert_from_within(0, 2..);
    /// assert_eq!(vec, [2, 3, 1, 1, 2, 3]);
    /// ```
    pub fn insert_from_within<R: RangeBounds<usize>>(&mut self, index: usize, src: R) {
        let (start, end) = checked_range(&src, self.len());
        self.insert_with(index, end - start, |staging, base| {
            for i in start..end {
                // SAFETY: `i < len`, and live values are not moved while `fill` runs.
                let item = unsafe { &*base.add(i) };
                staging.construct(item.clone());
            }
        });
    }

    /// Appends clones of `other`.
    #[inline]
    pub fn extend_from_slice(&mut self, other: &[T]) {
        let len = self.len();
        self.insert_from_slice(len, other);
    }

    /// Appends clones of the elements in `src`.
    #[inline]
    pub fn extend_from_within<R: RangeBounds<usize>>(&mut self, src: R) {
        let len = self.len();
        self.insert_from_within(len, src);
    }
}

impl<T: Default, const N: usize, A: ElementAllocator> SboVec<T, N, A> {
    /// Resizes in place, filling new slots with `T::default()`.
    #[inline]
    pub fn resize_default(&mut self, new_len: usize) {
        self.resize_with(new_len, T::default);
    }
}

impl<T, const N: usize, A: ElementAllocator> Drop for SboVec<T, N, A> {
    fn drop(&mut self) {
        self.storage.truncate_in(0, &self.alloc);
    }
}

impl<T: Clone, const N: usize, A: ElementAllocator> Clone for SboVec<T, N, A> {
    /// Clones under the allocator picked by [`ElementAllocator::select_on_copy`].
    fn clone(&self) -> Self {
        self.clone_in(self.alloc.select_on_copy())
    }

    /// Clears, adopts `source`'s allocator if `A` propagates on copy, then clones.
    ///
    /// Old elements are always dropped through the allocator that built them.
    fn clone_from(&mut self, source: &Self) {
        self.recover();
        self.discard_contents();
        if A::PROPAGATE_ON_COPY_ASSIGN {
            self.alloc = source.alloc.clone();
        }
        self.storage = Storage::clone_from_slice_in(source.as_slice(), &self.alloc);
    }
}

/// An owning iterator over the elements of a [`SboVec`].
///
/// Elements not yielded are dropped through the vector's allocator.
pub struct IntoIter<T, const N: usize, A: ElementAllocator = StdAlloc> {
    // Length forced to zero; `[head, tail)` is still live.
    storage: Storage<T, N>,
    head: usize,
    tail: usize,
    alloc: A,
}

impl<T, const N: usize, A: ElementAllocator> IntoIterator for SboVec<T, N, A> {
    type Item = T;
    type IntoIter = IntoIter<T, N, A>;

    fn into_iter(self) -> Self::IntoIter {
        let (mut storage, alloc) = self.into_parts();
        let tail = storage.len();
        // SAFETY: the iterator takes over `[0, tail)`.
        unsafe { storage.set_len(0) };
        IntoIter {
            storage,
            head: 0,
            tail,
            alloc,
        }
    }
}

impl<T, const N: usize, A: ElementAllocator> IntoIter<T, N, A> {
    /// Returns the remaining elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `[head, tail)` is live.
        unsafe { core::slice::from_raw_parts(self.storage.as_ptr().add(self.head), self.tail - self.head) }
    }

    /// Returns the remaining elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: `[head, tail)` is live.
        unsafe {
            core::slice::from_raw_parts_mut(self.storage.as_mut_ptr().add(self.head), self.tail - self.head)
        }
    }
}

impl<T, const N: usize, A: ElementAllocator> Iterator for IntoIter<T, N, A> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.head == self.tail {
            return None;
        }
        let index = self.head;
        self.head += 1;
        // SAFETY: `index` was live and is now outside `[head, tail)`.
        Some(unsafe { ptr::read(self.storage.as_ptr().add(index)) })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.tail - self.head;
        (len, Some(len))
    }
}

impl<T, const N: usize, A: ElementAllocator> DoubleEndedIterator for IntoIter<T, N, A> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        if self.head == self.tail {
            return None;
        }
        self.tail -= 1;
        // SAFETY: `tail` was live and is now outside `[head, tail)`.
        Some(unsafe { ptr::read(self.storage.as_ptr().add(self.tail)) })
    }
}

impl<T, const N: usize, A: ElementAllocator> ExactSizeIterator for IntoIter<T, N, A> {}

impl<T, const N: usize, A: ElementAllocator> FusedIterator for IntoIter<T, N, A> {}

impl<T, const N: usize, A: ElementAllocator> Drop for IntoIter<T, N, A> {
    fn drop(&mut self) {
        let remaining = ptr::slice_from_raw_parts_mut(
            // SAFETY: `head <= tail` stays within the buffer.
            unsafe { self.storage.as_mut_ptr().add(self.head) },
            self.tail - self.head,
        );
        self.head = self.tail;
        // SAFETY: the remaining values are live and unreachable from now on.
        unsafe { self.alloc.destroy(remaining) };
    }
}

impl<T: fmt::Debug, const N: usize, A: ElementAllocator> fmt::Debug for IntoIter<T, N, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}
