#![allow(dead_code)]

use std::cell::Cell;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::ptr;
use std::rc::Rc;

use sbovec::ElementAllocator;

/// Runs `f`, turning a panic into `Err`.
pub fn catch<R>(f: impl FnOnce() -> R) -> std::thread::Result<R> {
    panic::catch_unwind(AssertUnwindSafe(f))
}

/// Counts live [`Tracked`]s and arms failures.
#[derive(Default)]
pub struct Ledger {
    live: Cell<isize>,
    clone_budget: Cell<Option<usize>>,
    panic_on_drop: Cell<Option<i32>>,
}

impl Ledger {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn make(self: &Rc<Self>, value: i32) -> Tracked {
        self.live.set(self.live.get() + 1);
        Tracked {
            value,
            ledger: self.clone(),
        }
    }

    pub fn make_all(self: &Rc<Self>, values: impl IntoIterator<Item = i32>) -> Vec<Tracked> {
        values.into_iter().map(|v| self.make(v)).collect()
    }

    pub fn live(&self) -> isize {
        self.live.get()
    }

    /// The next `n` clones succeed, the one after panics.
    pub fn allow_clones(&self, n: usize) {
        self.clone_budget.set(Some(n));
    }

    pub fn unlimited_clones(&self) {
        self.clone_budget.set(None);
    }

    /// Dropping the tracked value holding `value` panics once.
    pub fn panic_on_drop(&self, value: i32) {
        self.panic_on_drop.set(Some(value));
    }
}

/// An element that reports its lifetime to a [`Ledger`].
pub struct Tracked {
    pub value: i32,
    ledger: Rc<Ledger>,
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        if let Some(left) = self.ledger.clone_budget.get() {
            if left == 0 {
                panic!("clone budget exhausted");
            }
            self.ledger.clone_budget.set(Some(left - 1));
        }
        self.ledger.make(self.value)
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.ledger.live.set(self.ledger.live.get() - 1);
        if self.ledger.panic_on_drop.get() == Some(self.value) && !std::thread::panicking() {
            self.ledger.panic_on_drop.set(None);
            panic!("drop of {}", self.value);
        }
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl PartialEq<i32> for Tracked {
    fn eq(&self, other: &i32) -> bool {
        self.value == *other
    }
}

impl fmt::Debug for Tracked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.value, f)
    }
}

/// Hook counters shared by every clone of a [`TestAlloc`].
#[derive(Default)]
pub struct AllocStats {
    pub constructs: Cell<usize>,
    pub destroys: Cell<usize>,
    construct_budget: Cell<Option<usize>>,
}

impl AllocStats {
    /// The next `n` constructions succeed, the one after panics.
    pub fn allow_constructs(&self, n: usize) {
        self.construct_budget.set(Some(n));
    }

    pub fn unlimited_constructs(&self) {
        self.construct_budget.set(None);
    }
}

/// A stateful allocator identified by `id`, with propagation picked per test.
#[derive(Clone)]
pub struct TestAlloc<const COPY: bool = false, const MOVE: bool = true, const SWAP: bool = false> {
    pub id: u32,
    pub stats: Rc<AllocStats>,
}

impl<const COPY: bool, const MOVE: bool, const SWAP: bool> TestAlloc<COPY, MOVE, SWAP> {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            stats: Rc::new(AllocStats::default()),
        }
    }

    pub fn constructs(&self) -> usize {
        self.stats.constructs.get()
    }

    pub fn destroys(&self) -> usize {
        self.stats.destroys.get()
    }
}

impl<const COPY: bool, const MOVE: bool, const SWAP: bool> PartialEq for TestAlloc<COPY, MOVE, SWAP> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<const COPY: bool, const MOVE: bool, const SWAP: bool> fmt::Debug for TestAlloc<COPY, MOVE, SWAP> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TestAlloc({})", self.id)
    }
}

impl<const COPY: bool, const MOVE: bool, const SWAP: bool> ElementAllocator for TestAlloc<COPY, MOVE, SWAP> {
    const PROPAGATE_ON_COPY_ASSIGN: bool = COPY;
    const PROPAGATE_ON_MOVE_ASSIGN: bool = MOVE;
    const PROPAGATE_ON_SWAP: bool = SWAP;

    unsafe fn construct<T>(&self, dst: *mut T, value: T) {
        if let Some(left) = self.stats.construct_budget.get() {
            if left == 0 {
                panic!("construct budget exhausted");
            }
            self.stats.construct_budget.set(Some(left - 1));
        }
        self.stats.constructs.set(self.stats.constructs.get() + 1);
        unsafe { ptr::write(dst, value) }
    }

    unsafe fn destroy<T>(&self, elems: *mut [T]) {
        self.stats.destroys.set(self.stats.destroys.get() + elems.len());
        unsafe { ptr::drop_in_place(elems) }
    }
}
