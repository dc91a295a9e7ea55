//! A bump-pointer memory arena with typed views, a fixed-capacity typed
//! sequence, and an allocation-tracking monitor.
//!
//! An [`Arena`] owns one contiguous, aligned byte block and hands out
//! aligned sub-ranges from it by advancing an offset; individual
//! allocations are never freed, only the arena as a whole is `reset`
//! (rewound) or `dispose`d (released to the system). [`ArenaView`] and
//! [`ArenaSequence`] are the typed windows built on top of that raw
//! capability — the former fixed-length, the latter a growable-up-to-
//! capacity sequence with insert/remove semantics.
//!
//! # Module map
//!
//! - [`align`] — power-of-two alignment arithmetic.
//! - [`arena`] — the bump-pointer allocator itself.
//! - [`view`] — `ArenaView<T>`, a fixed-length typed window.
//! - [`sequence`] — `ArenaSequence<T>`, a fixed-capacity typed sequence.
//! - [`monitor`] — process-wide per-allocation tracking and waste reports.
//! - [`config`] — a process-global, read-only configuration snapshot.
//! - [`sysalloc`] — the system allocator seam (`SystemAllocator` trait).
//! - [`error`] — `ArenaError`, the single error type for this crate.

pub mod align;
pub mod arena;
pub mod config;
pub mod error;
pub mod monitor;
pub mod sequence;
pub mod sysalloc;
pub mod view;

pub use align::{is_power_of_two, next_pow2_clamped, MAX_SMART_ALIGNMENT};
pub use arena::Arena;
pub use config::ArenaConfig;
pub use error::{ArenaError, ArenaResult};
pub use monitor::{global_monitor, AllocationRecord, ArenaMonitor, ArenaWasteReport, LiveArenaInfo};
pub use sequence::ArenaSequence;
pub use sysalloc::{AllocKind, StdSystemAllocator, SystemAllocator};
pub use view::ArenaView;

