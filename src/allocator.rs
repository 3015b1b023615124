//! Element construction hooks and allocator propagation rules.
//!
//! Stable Rust has no allocator-parameterized [`Vec`], so an [`ElementAllocator`]
//! does not hand out raw memory. It owns everything else a container-aware
//! allocator decides:
//!
//! - how an element is written into a slot ([`construct`](ElementAllocator::construct)),
//! - how live elements are torn down ([`destroy`](ElementAllocator::destroy)),
//! - whether two instances are interchangeable (`PartialEq` and [`IS_ALWAYS_EQUAL`]),
//! - whether the instance follows the contents on copy, move and swap.
//!
//! [`SboVec`](crate::SboVec) routes every element it creates or drops through these hooks.
//! Relocating a live element within one allocator is a bitwise move and runs no hook.
//! Moving elements across unequal allocators goes through the receiver's
//! [`construct`](ElementAllocator::construct).
//!
//! [`Vec`]: alloc::vec::Vec
//! [`IS_ALWAYS_EQUAL`]: ElementAllocator::IS_ALWAYS_EQUAL
use core::{mem, ptr};

/// A stateful element allocator for [`SboVec`](crate::SboVec).
///
/// All hooks have defaults, so a marker type only needs `Clone + PartialEq`
/// and an empty impl block.
///
/// # Examples
///
/// ```
/// use core::cell::Cell;
/// use std::rc::Rc;
/// use sbovec::{ElementAllocator, SboVec};
///
/// #[derive(Clone, PartialEq)]
/// struct Counting(Rc<Cell<usize>>);
///
/// impl ElementAllocator for Counting {
///     const PROPAGATE_ON_MOVE_ASSIGN: bool = true;
///
///     unsafe fn construct<T>(&self, dst: *mut T, value: T) {
///         self.0.set(self.0.get() + 1);
///         unsafe { dst.write(value) };
///     }
/// }
///
/// let made = Rc::new(Cell::new(0));
/// let mut vec: SboVec<i32, 2, Counting> = SboVec::new_in(Counting(made.clone()));
/// vec.push(1);
/// vec.push(2);
/// vec.push(3);
/// assert_eq!(made.get(), 3);
/// ```
pub trait ElementAllocator: Clone + PartialEq {
    /// Copy-assignment adopts the source's allocator.
    const PROPAGATE_ON_COPY_ASSIGN: bool = false;
    /// Move-assignment adopts the source's allocator.
    const PROPAGATE_ON_MOVE_ASSIGN: bool = false;
    /// Swapping two containers exchanges their allocators.
    const PROPAGATE_ON_SWAP: bool = false;
    /// Every instance of this type compares equal.
    const IS_ALWAYS_EQUAL: bool = false;

    /// Writes `value` into `dst`.
    ///
    /// # Safety
    ///
    /// `dst` must be valid for writes and must not hold a live value.
    /// A panic must leave `dst` uninitialized.
    #[inline(always)]
    unsafe fn construct<T>(&self, dst: *mut T, value: T) {
        // SAFETY: guaranteed by the caller.
        unsafe { ptr::write(dst, value) }
    }

    /// Drops every element of `elems` in place.
    ///
    /// # Safety
    ///
    /// Every element of `elems` must be live and must not be used afterwards.
    #[inline(always)]
    unsafe fn destroy<T>(&self, elems: *mut [T]) {
        // SAFETY: guaranteed by the caller.
        unsafe { ptr::drop_in_place(elems) }
    }

    /// The allocator handed to a plain [`Clone::clone`] of a container.
    #[inline]
    fn select_on_copy(&self) -> Self {
        self.clone()
    }

    /// The largest element count a container could ever reach.
    #[inline]
    fn max_size<T>(&self) -> usize {
        match mem::size_of::<T>() {
            0 => usize::MAX,
            size => isize::MAX as usize / size,
        }
    }
}

/// Whether storage built under `a` can be handed to `b` without a rebuild.
#[inline]
pub(crate) fn interchangeable<A: ElementAllocator>(a: &A, b: &A) -> bool {
    A::IS_ALWAYS_EQUAL || a == b
}

/// The default allocator: the global heap and plain `ptr::write` / `drop_in_place`.
///
/// Every instance is equal, so move-assignment and swap never rebuild.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StdAlloc;

impl ElementAllocator for StdAlloc {
    const IS_ALWAYS_EQUAL: bool = true;
}
