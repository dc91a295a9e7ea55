//! The bump-pointer arena allocator.
//!
//! An `Arena` owns one contiguous, `arena_alignment`-aligned byte block and
//! hands out aligned sub-ranges from it by advancing an offset. Individual
//! allocations are never freed; the arena is `reset` (rewound) or
//! `dispose`d (released to the system) as a whole.
//!
//! # Concurrency
//!
//! `allocate`/`reset` use atomics for their counters (the same idiom the
//! teacher's `GlobalArena` uses for `current_chunk`/`total_allocated`) so
//! an `&Arena` can be shared with a parallel worker pool that writes to
//! disjoint indices of a single, already-allocated [`crate::view::ArenaView`]
//! — the one cross-thread pattern the design supports. Concurrent
//! `allocate` calls on the *same* arena are still a data race on intent
//! (two callers could each believe they won disjoint neighboring ranges);
//! the type does not attempt to serialize them past what the atomics do
//! for free. Callers serialize access to a single arena's mutators, per
//! design.
//!
//! `dispose` takes `&mut self`: the borrow checker then refuses to compile
//! a call to `dispose` while any [`crate::view::ArenaView`] or
//! [`crate::sequence::ArenaSequence`] (which hold `&Arena`) are still in
//! scope, enforcing "dispose invalidates every outstanding view" at
//! compile time. `reset` does not free memory and takes `&self`; it is
//! instead guarded at runtime, in debug builds only, by a generation
//! counter (see module docs on [`crate::view`]).

use std::alloc::Layout;
use std::ptr::NonNull;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::align::{is_power_of_two, next_pow2_clamped};
use crate::config;
use crate::error::{ArenaError, ArenaResult};
use crate::monitor::{self, AllocationRecord, LiveArenaInfo};
use crate::sysalloc::{AllocKind, StdSystemAllocator, SystemAllocator};

/// The bump-pointer arena. Generic over the system allocator so tests
/// (and embedders) can swap in a fake; defaults to
/// [`StdSystemAllocator`].
pub struct Arena<S: SystemAllocator = StdSystemAllocator> {
    id: u64,
    base: NonNull<u8>,
    layout: Layout,
    capacity: usize,
    offset: AtomicUsize,
    waste: AtomicUsize,
    arena_alignment: usize,
    system_tag: AllocKind,
    system: S,
    live: AtomicBool,
    #[cfg(debug_assertions)]
    generation: AtomicUsize,
}

// SAFETY: all mutable state (`offset`, `waste`, `live`, `generation`) is
// behind atomics; `base`/`layout`/`capacity`/`arena_alignment`/
// `system_tag` are set once at construction and never mutated. The one
// genuinely unsynchronized operation is concurrent `allocate`, which is
// documented above as the caller's responsibility to serialize (spec
// non-goal), not something this impl claims to make race-free.
unsafe impl<S: SystemAllocator + Send> Send for Arena<S> {}
unsafe impl<S: SystemAllocator + Sync> Sync for Arena<S> {}

impl Arena<StdSystemAllocator> {
    /// Creates a new arena backed by the standard system allocator.
    ///
    /// `arena_alignment` must be a power of two (default recommendation:
    /// 64); an invalid alignment is a fatal construction error. `capacity`
    /// bytes aligned to `arena_alignment` are requested from the system
    /// allocator; failure is a fatal `OutOfMemory`.
    pub fn new(
        id: u64,
        capacity: usize,
        system_tag: AllocKind,
        arena_alignment: usize,
    ) -> ArenaResult<Self> {
        Self::with_allocator(id, capacity, system_tag, arena_alignment, StdSystemAllocator)
    }
}

impl<S: SystemAllocator> Arena<S> {
    /// Creates a new arena using a caller-supplied system allocator.
    pub fn with_allocator(
        id: u64,
        capacity: usize,
        system_tag: AllocKind,
        arena_alignment: usize,
        system: S,
    ) -> ArenaResult<Self> {
        if !is_power_of_two(arena_alignment) {
            return Err(ArenaError::InvalidAlignment(arena_alignment));
        }

        let layout = Layout::from_size_align(capacity, arena_alignment)
            .map_err(|_| ArenaError::OutOfMemory { requested: capacity })?;

        let base = system
            .aligned_alloc(capacity, arena_alignment, system_tag)
            .ok_or(ArenaError::OutOfMemory { requested: capacity })?;

        let arena = Arena {
            id,
            base,
            layout,
            capacity,
            offset: AtomicUsize::new(0),
            waste: AtomicUsize::new(0),
            arena_alignment,
            system_tag,
            system,
            live: AtomicBool::new(true),
            #[cfg(debug_assertions)]
            generation: AtomicUsize::new(0),
        };

        if config::get().enable_logging {
            arena_log::success!(
                "arena#{id}: constructed ({capacity} bytes, align {arena_alignment})"
            );
        }

        Ok(arena)
    }

    /// This arena's caller-assigned id.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Total byte capacity, fixed for the arena's lifetime.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The next free byte index.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset.load(Ordering::Acquire)
    }

    /// Cumulative bytes skipped for alignment padding since the last
    /// reset or creation.
    #[must_use]
    pub fn waste(&self) -> usize {
        self.waste.load(Ordering::Acquire)
    }

    /// `true` between successful construction and `dispose`.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    /// The debug-only generation counter, bumped on every `reset`. Views
    /// and sequences capture this at construction and recheck it on every
    /// access to detect use-after-reset in debug builds. Always `0` (and
    /// the check always passes) in release builds.
    #[cfg(debug_assertions)]
    #[must_use]
    pub(crate) fn generation(&self) -> usize {
        self.generation.load(Ordering::Acquire)
    }

    #[cfg(not(debug_assertions))]
    #[must_use]
    pub(crate) fn generation(&self) -> usize {
        0
    }

    /// Returns the raw address of this arena's backing block, without any
    /// bounds or liveness checking. Used internally by views/sequences
    /// once they already hold a validated sub-range.
    pub(crate) fn base_ptr(&self) -> NonNull<u8> {
        self.base
    }

    /// Allocates `size` bytes aligned to `alignment`, tagged `tag` for the
    /// monitor. Returns `None` (not an error) on either a non-power-of-two
    /// `alignment` (logged as a warning, arena state unchanged — a bad
    /// caller does not poison the arena) or insufficient remaining
    /// capacity (logged as an error, arena state unchanged). No partial
    /// updates occur on a rejected call.
    pub fn allocate(&self, size: usize, alignment: usize, tag: &'static str) -> Option<NonNull<u8>> {
        if !is_power_of_two(alignment) {
            if config::get().enable_logging {
                arena_log::warn!(
                    "arena#{}: allocate rejected, alignment {alignment} is not a power of two",
                    self.id
                );
            }
            return None;
        }

        let offset = self.offset.load(Ordering::Acquire);
        let aligned_offset = (offset + alignment - 1) & !(alignment - 1);
        let end = aligned_offset.checked_add(size)?;
        if end > self.capacity {
            if config::get().enable_logging {
                arena_log::error!(
                    "arena#{}: out of memory, requested {size} bytes at offset {aligned_offset}, capacity {}",
                    self.id,
                    self.capacity
                );
            }
            return None;
        }

        let padding = aligned_offset - offset;
        self.offset.store(end, Ordering::Release);

        let cfg = config::get();
        if cfg.track_alignment_loss {
            self.waste.fetch_add(padding, Ordering::AcqRel);
        }
        if cfg.track_allocations {
            monitor::global_monitor().record(AllocationRecord {
                arena_id: self.id,
                offset: aligned_offset,
                size,
                alignment,
                padding,
                tag,
            });
        }

        if cfg.enable_logging {
            arena_log::info!(
                "arena#{}: allocated {size} bytes at offset {aligned_offset} (tag {tag:?})",
                self.id
            );
        }

        // SAFETY: aligned_offset + size <= capacity (checked above), so
        // this lands strictly within [base, base + capacity).
        let ptr = unsafe { self.base.as_ptr().add(aligned_offset) };
        NonNull::new(ptr)
    }

    /// Allocates `size_of::<T>()` bytes aligned to
    /// `next_pow2_clamped(size_of::<T>())`.
    pub fn smart_allocate<T: bytemuck::Pod>(&self, tag: &'static str) -> Option<NonNull<T>> {
        let size = std::mem::size_of::<T>();
        let align = next_pow2_clamped(size);
        self.allocate(size, align, tag).map(NonNull::cast)
    }

    /// Allocates `n * size_of::<T>()` bytes aligned to
    /// `next_pow2_clamped(size_of::<T>())`.
    pub fn smart_allocate_n<T: bytemuck::Pod>(&self, n: usize, tag: &'static str) -> Option<NonNull<T>> {
        let size = std::mem::size_of::<T>().checked_mul(n)?;
        let align = next_pow2_clamped(std::mem::size_of::<T>());
        self.allocate(size, align, tag).map(NonNull::cast)
    }

    /// Rewinds `offset` and `waste` to zero and clears this arena's
    /// monitor rows. Does not zero the backing bytes. Every outstanding
    /// view/sequence rooted in this arena is logically invalidated (and,
    /// in debug builds, will fail its generation check on next access).
    pub fn reset(&self) {
        self.offset.store(0, Ordering::Release);
        self.waste.store(0, Ordering::Release);
        monitor::global_monitor().clear(self.id);
        #[cfg(debug_assertions)]
        self.generation.fetch_add(1, Ordering::AcqRel);

        if config::get().enable_logging {
            arena_log::success!("arena#{}: reset", self.id);
        }
    }

    /// Current waste/record snapshot, for [`crate::monitor::ArenaMonitor::summary`].
    #[must_use]
    pub fn live_info(&self) -> LiveArenaInfo {
        LiveArenaInfo {
            arena_id: self.id,
            capacity: self.capacity,
            waste: self.waste(),
        }
    }

    /// Releases the backing block to the system allocator and marks this
    /// arena disposed. Idempotent: a second call is a no-op. Requires
    /// `&mut self`, so the borrow checker refuses to compile a `dispose`
    /// call while any view/sequence still borrows this arena.
    pub fn dispose(&mut self) {
        if !self.live.swap(false, Ordering::AcqRel) {
            return;
        }

        // SAFETY: `base`/`layout` were returned together by `system` at
        // construction and have not been freed (guarded by the `live`
        // swap above).
        unsafe { self.system.free(self.base, self.layout, self.system_tag) };
        monitor::global_monitor().clear(self.id);

        if config::get().enable_logging {
            arena_log::success!("arena#{}: disposed", self.id);
        }
    }
}

impl<S: SystemAllocator> Drop for Arena<S> {
    fn drop(&mut self) {
        self.dispose();
    }
}
