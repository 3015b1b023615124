#[inline(always)]
#[track_caller]
pub(crate) fn split_range_bound(
    src: &impl core::ops::RangeBounds<usize>,
    len: usize,
) -> (usize, usize) {
    let start = match src.start_bound() {
        core::ops::Bound::Included(&i) => i,
        core::ops::Bound::Excluded(&i) => i.checked_add(1).unwrap_or_else(|| range_overflow()),
        core::ops::Bound::Unbounded => 0,
    };

    let end = match src.end_bound() {
        core::ops::Bound::Included(&i) => i.checked_add(1).unwrap_or_else(|| range_overflow()),
        core::ops::Bound::Excluded(&i) => i,
        core::ops::Bound::Unbounded => len,
    };
    (start, end)
}

/// Resolves a caller-supplied range and checks it against `len`.
#[inline]
#[track_caller]
pub(crate) fn checked_range(src: &impl core::ops::RangeBounds<usize>, len: usize) -> (usize, usize) {
    let (start, end) = split_range_bound(src, len);
    assert!(start <= end, "range start should be <= range end");
    assert!(end <= len, "range end should be <= len");
    (start, end)
}

#[cold]
#[inline(never)]
#[track_caller]
pub(crate) fn capacity_overflow() -> ! {
    panic!("capacity overflow")
}

#[cold]
#[inline(never)]
#[track_caller]
fn range_overflow() -> ! {
    panic!("range bound should be < usize::MAX")
}

/// Emits a `tracing` event at TRACE level when the `tracing` feature is on.
///
/// The arguments are not evaluated otherwise.
macro_rules! trace_transition {
    ($($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        ::tracing::trace!($($arg)+);
    };
}

pub(crate) use trace_transition;
