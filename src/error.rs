use alloc::collections::TryReserveError;
use thiserror::Error;

/// Errors reported by the checked and fallible operations of [`SboVec`](crate::SboVec).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A checked accessor was given an index past the end.
    #[error("index {index} out of range for length {len}")]
    OutOfRange { index: usize, len: usize },
    /// The requested length overflows `usize` or exceeds `max_size`.
    #[error("capacity overflow")]
    CapacityOverflow,
    /// The heap refused a reservation.
    #[error("heap reservation failed: {0}")]
    Reserve(TryReserveError),
}

impl From<TryReserveError> for Error {
    #[inline]
    fn from(err: TryReserveError) -> Self {
        Self::Reserve(err)
    }
}
