//! Error types surfaced by the arena allocator and its typed views.
//!
//! Every variant corresponds to one row of the error table: a "fatal to
//! caller" kind means the call returns `Err` and leaves the arena (or
//! view/sequence) in its prior, still-usable state. The arena itself is
//! never corrupted by a bad call.

use thiserror::Error;

/// Errors raised by `arena-mem`'s allocator, views, and sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArenaError {
    /// Arena construction was asked for a non-power-of-two alignment.
    /// Fatal: the arena could not be produced.
    #[error("arena alignment {0} is not a power of two")]
    InvalidAlignment(usize),

    /// The system allocator could not satisfy the requested block.
    /// Raised by `Arena::new` (fatal construction failure); `allocate`
    /// reports the equivalent condition by returning `None` instead,
    /// per spec, so this variant is reserved for construction.
    #[error("out of memory: failed to allocate {requested} bytes")]
    OutOfMemory { requested: usize },

    /// A view or sequence was constructed over a non-plain-data type.
    /// Unreachable in practice: the `T: bytemuck::Pod` bound on
    /// [`crate::view::ArenaView`] and [`crate::sequence::ArenaSequence`]
    /// rejects this at compile time. Kept for API completeness against
    /// any future dynamically-typed entry point.
    #[error("type is not a valid plain-data arena element")]
    InvalidElementType,

    /// A view was constructed with a length of zero.
    #[error("view length must be at least 1, got {0}")]
    InvalidLength(usize),

    /// The backing arena returned `None` for the view/sequence's
    /// backing allocation.
    #[error("allocation of {requested} bytes (align {alignment}) failed")]
    AllocationFailed { requested: usize, alignment: usize },

    /// An index was out of the valid `[0, bound)` range.
    #[error("index {index} out of range (bound {bound})")]
    IndexOutOfRange { index: usize, bound: usize },

    /// A sequence mutation would exceed its fixed capacity.
    #[error("sequence capacity {capacity} exceeded")]
    CapacityExceeded { capacity: usize },

    /// `remove_at` was called on an empty sequence.
    #[error("cannot remove from an empty sequence")]
    EmptyRemove,

    /// `copy_from`/`copy_to` were called with mismatched lengths.
    #[error("length mismatch: view has {view_len}, buffer has {buf_len}")]
    LengthMismatch { view_len: usize, buf_len: usize },
}

/// Convenience alias used throughout the crate.
pub type ArenaResult<T> = Result<T, ArenaError>;
