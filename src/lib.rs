//! ## Intro
//!
//! A vector that keeps small collections inside its own footprint and moves
//! to the heap only when they outgrow it.
//!
//! [`SboVec<T, N>`] stores up to `N` elements inline. The push that would
//! exceed `N` moves every element into a heap [`Vec`] in a single pass. The
//! vector stays there until [`shrink_to_fit`](SboVec::shrink_to_fit) is called
//! with `len <= N`.
//!
//! ```
//! # use sbovec::{sbovec, SboVec};
//! let mut vec: SboVec<i32, 4> = sbovec![1, 2, 3];
//! assert!(vec.is_inline());
//!
//! vec.extend([4, 5]);
//! assert!(!vec.is_inline());
//! assert_eq!(vec, [1, 2, 3, 4, 5]);
//!
//! vec.truncate(3);
//! vec.shrink_to_fit();
//! assert!(vec.is_inline());
//! assert_eq!(vec.capacity(), 4);
//! ```
//!
//! ## Allocators
//!
//! The third type parameter is an [`ElementAllocator`]. It constructs and
//! destroys every element the vector owns and decides whether it follows the
//! contents on [`clone_from`](Clone::clone_from),
//! [`move_assign`](SboVec::move_assign) and [`swap`](SboVec::swap). The
//! default, [`StdAlloc`], is stateless and always equal.
//!
//! ## Panic safety
//!
//! Nothing escapes half-built. A clone, closure or allocator hook that panics
//! during a spill, shrink, reserve, insert or growing resize leaves the vector
//! as it was. Dropping a panicking element during `erase` or `truncate`
//! still keeps the survivors.
//!
//! ## Invalidation
//!
//! Unlike a plain [`Vec`], *every* element moves when the storage changes
//! shape. Any method that may spill, shrink or grow invalidates all raw
//! pointers into the vector, not only those past the mutation point.
//!
//! ### Alias
//!
//! - [`TinyVec<T>`] = `SboVec<T, 4>`
//! - [`SmallBuf<T>`] = `SboVec<T, 16>`
//!
//! ## `no_std` support
//!
//! This crate requires only `core` and `alloc`.
//!
//! ## Optional features
//!
//! ### `tracing`
//!
//! Emits TRACE-level [`tracing`](https://docs.rs/tracing) events whenever the
//! storage changes shape (spill, heap rebuild, shrink, recovery).
//!
//! [`Vec`]: alloc::vec::Vec
#![no_std]

extern crate alloc;

mod utils;

mod error;
#[doc(inline)]
pub use error::Error;

pub mod allocator;
#[doc(inline)]
pub use allocator::{ElementAllocator, StdAlloc};

mod inline_buf;
mod storage;

pub mod sbo_vec;
#[doc(inline)]
pub use sbo_vec::{IntoIter, SboVec};

mod impls;

/// A [`SboVec`] holding up to 4 elements inline.
///
/// # Examples
///
/// ```
/// # use sbovec::TinyVec;
/// let mut vec: TinyVec<u8> = TinyVec::new();
/// vec.extend_from_slice(b"abcd");
/// assert!(vec.is_inline());
/// vec.push(b'e');
/// assert!(!vec.is_inline());
/// ```
pub type TinyVec<T> = SboVec<T, 4>;

/// A [`SboVec`] holding up to 16 elements inline.
///
/// A balanced default for collections that are usually small.
pub type SmallBuf<T> = SboVec<T, 16>;
