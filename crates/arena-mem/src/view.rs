//! A fixed-length typed window onto an arena sub-range.
//!
//! `ArenaView<'a, T>` borrows (never owns) `length * size_of::<T>()` bytes
//! carved out of an [`Arena`] by [`Arena::smart_allocate_n`]. `T` must be
//! [`bytemuck::Pod`] — plain, bit-copyable data with no destructor and no
//! embedded references — which is the pack's established idiom for typed
//! arena/bump views (`bump-scope`, `radiance::graph::arena`, and the
//! sibling `oroboros_core` memory module all gate their typed views on
//! `Pod`/`Zeroable`). That compile-time bound is strictly stronger than
//! the spec's runtime `InvalidElementType` check, so that error variant
//! is unreachable through this API.
//!
//! # Validity and use-after-reset
//!
//! A view's validity is tied to its parent arena's `Live` state and to the
//! absence of an intervening [`Arena::reset`]. In release builds this is
//! entirely caller discipline, same as the source design. In debug builds,
//! each view captures the arena's generation counter at construction and
//! rechecks it on every access, panicking with a clear message instead of
//! silently reading stale or aliased memory — recommended, not required,
//! by the design notes; it compiles to nothing in release.

use std::marker::PhantomData;
use std::ops::{Index, IndexMut};
use std::ptr::NonNull;

use crate::arena::Arena;
use crate::error::{ArenaError, ArenaResult};

/// A fixed-length typed view into arena memory. See the module docs.
pub struct ArenaView<'a, T: bytemuck::Pod> {
    arena: &'a Arena,
    base: NonNull<T>,
    length: usize,
    generation: usize,
    _marker: PhantomData<&'a mut [T]>,
}

// SAFETY: `base` points into the parent arena's backing block, which is
// exclusively owned by that `Arena` for the view's validity window; the
// view itself holds no thread-local state. Mirrors `arena.rs`'s
// `unsafe impl Send`/`Sync for Arena<S>` for the identical reason: the
// one supported cross-thread pattern (spec §5) is a single view shared
// with a parallel worker pool where each worker writes a disjoint index
// via `set_unchecked`, which requires `&ArenaView` to be `Sync` (and the
// view to be `Send` to hand to `thread::spawn` in the first place).
unsafe impl<'a, T: bytemuck::Pod + Send> Send for ArenaView<'a, T> {}
unsafe impl<'a, T: bytemuck::Pod + Sync> Sync for ArenaView<'a, T> {}

impl<'a, T: bytemuck::Pod> ArenaView<'a, T> {
    /// Allocates a new view of `length` elements from `arena`, tagged
    /// `tag` for the allocation monitor.
    ///
    /// Fails with [`ArenaError::InvalidLength`] if `length == 0`, or
    /// [`ArenaError::AllocationFailed`] if the arena has no room.
    pub fn new(arena: &'a Arena, length: usize, tag: &'static str) -> ArenaResult<Self> {
        if length == 0 {
            return Err(ArenaError::InvalidLength(length));
        }

        let base = arena
            .smart_allocate_n::<T>(length, tag)
            .ok_or(ArenaError::AllocationFailed {
                requested: length * std::mem::size_of::<T>(),
                alignment: crate::align::next_pow2_clamped(std::mem::size_of::<T>()),
            })?;

        Ok(ArenaView {
            arena,
            base,
            length,
            generation: arena.generation(),
            _marker: PhantomData,
        })
    }

    /// Number of elements in this view.
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    /// The raw backing address, as a typed pointer. Does not imply any
    /// lifetime or liveness guarantee beyond this view's own contract.
    #[must_use]
    pub fn raw_base(&self) -> NonNull<T> {
        self.base
    }

    #[cfg(debug_assertions)]
    fn check_generation(&self) {
        assert_eq!(
            self.generation,
            self.arena.generation(),
            "arena-mem: use of ArenaView after its parent arena was reset"
        );
        assert!(
            self.arena.is_live(),
            "arena-mem: use of ArenaView after its parent arena was disposed"
        );
    }

    #[cfg(not(debug_assertions))]
    fn check_generation(&self) {}

    /// Bounds-checked read of element `i`.
    pub fn get(&self, i: usize) -> ArenaResult<T> {
        self.check_generation();
        if i >= self.length {
            return Err(ArenaError::IndexOutOfRange {
                index: i,
                bound: self.length,
            });
        }
        // SAFETY: i < length, checked above; base is valid for `length`
        // elements of T for the view's validity window.
        Ok(unsafe { self.base.as_ptr().add(i).read() })
    }

    /// Bounds-checked write of element `i`.
    pub fn set(&mut self, i: usize, value: T) -> ArenaResult<()> {
        self.check_generation();
        if i >= self.length {
            return Err(ArenaError::IndexOutOfRange {
                index: i,
                bound: self.length,
            });
        }
        // SAFETY: i < length, checked above.
        unsafe { self.base.as_ptr().add(i).write(value) };
        Ok(())
    }

    /// Writes `i` without a bounds or generation check.
    ///
    /// Intended for the one supported cross-thread pattern (spec §5): a
    /// single already-allocated view handed to a parallel worker pool
    /// where each worker owns a disjoint set of indices and only a shared
    /// `&ArenaView` is available.
    ///
    /// # Safety
    ///
    /// `i < self.length()`, the arena has not been reset or disposed
    /// since this view was constructed, and no other thread concurrently
    /// accesses slot `i`.
    pub unsafe fn set_unchecked(&self, i: usize, value: T) {
        // SAFETY: forwarded to the caller via this function's contract.
        unsafe { self.base.as_ptr().add(i).write(value) };
    }

    /// Copies `src` into this view element-wise. Fails with
    /// [`ArenaError::LengthMismatch`] if the lengths differ; no partial
    /// copy occurs on failure.
    pub fn copy_from(&mut self, src: &[T]) -> ArenaResult<()> {
        self.check_generation();
        if src.len() != self.length {
            return Err(ArenaError::LengthMismatch {
                view_len: self.length,
                buf_len: src.len(),
            });
        }
        // SAFETY: lengths match; src and the view's backing memory are
        // disjoint allocations.
        unsafe { std::ptr::copy_nonoverlapping(src.as_ptr(), self.base.as_ptr(), self.length) };
        Ok(())
    }

    /// Copies this view element-wise into `dst`. Fails with
    /// [`ArenaError::LengthMismatch`] if the lengths differ.
    pub fn copy_to(&self, dst: &mut [T]) -> ArenaResult<()> {
        self.check_generation();
        if dst.len() != self.length {
            return Err(ArenaError::LengthMismatch {
                view_len: self.length,
                buf_len: dst.len(),
            });
        }
        // SAFETY: lengths match; disjoint allocations.
        unsafe { std::ptr::copy_nonoverlapping(self.base.as_ptr(), dst.as_mut_ptr(), self.length) };
        Ok(())
    }

    /// Views the backing bytes as an immutable slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        self.check_generation();
        // SAFETY: base is valid for `length` initialized elements of T.
        unsafe { std::slice::from_raw_parts(self.base.as_ptr(), self.length) }
    }

    /// Views the backing bytes as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.check_generation();
        // SAFETY: base is valid for `length` initialized elements of T;
        // `&mut self` guarantees exclusive access to this view.
        unsafe { std::slice::from_raw_parts_mut(self.base.as_ptr(), self.length) }
    }

    /// A restartable, finite iterator over this view's elements.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }
}

impl<'a, T: bytemuck::Pod> Index<usize> for ArenaView<'a, T> {
    type Output = T;

    fn index(&self, i: usize) -> &T {
        self.check_generation();
        assert!(
            i < self.length,
            "arena-mem: index {i} out of range for view of length {}",
            self.length
        );
        // SAFETY: i < length, asserted above.
        unsafe { &*self.base.as_ptr().add(i) }
    }
}

impl<'a, T: bytemuck::Pod> IndexMut<usize> for ArenaView<'a, T> {
    fn index_mut(&mut self, i: usize) -> &mut T {
        self.check_generation();
        assert!(
            i < self.length,
            "arena-mem: index {i} out of range for view of length {}",
            self.length
        );
        // SAFETY: i < length, asserted above.
        unsafe { &mut *self.base.as_ptr().add(i) }
    }
}

impl<'a, 'b, T: bytemuck::Pod> IntoIterator for &'b ArenaView<'a, T> {
    type Item = &'b T;
    type IntoIter = std::slice::Iter<'b, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sysalloc::AllocKind;

    fn arena(id: u64, capacity: usize) -> Arena {
        Arena::new(id, capacity, AllocKind::Transient, 64).unwrap()
    }

    #[test]
    fn round_trip_copy_from_copy_to() {
        let arena = arena(100, 4096);
        let mut view: ArenaView<u32> = ArenaView::new(&arena, 4, "view").unwrap();
        let a = [1u32, 2, 3, 4];
        view.copy_from(&a).unwrap();
        let mut b = [0u32; 4];
        view.copy_to(&mut b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn copy_from_rejects_length_mismatch() {
        let arena = arena(101, 4096);
        let mut view: ArenaView<u32> = ArenaView::new(&arena, 4, "view").unwrap();
        let err = view.copy_from(&[1u32, 2]).unwrap_err();
        assert_eq!(
            err,
            ArenaError::LengthMismatch {
                view_len: 4,
                buf_len: 2
            }
        );
    }

    #[test]
    fn indexing_bounds_checked() {
        let arena = arena(102, 4096);
        let mut view: ArenaView<u32> = ArenaView::new(&arena, 2, "view").unwrap();
        view.set(0, 10).unwrap();
        view.set(1, 20).unwrap();
        assert_eq!(view.get(0).unwrap(), 10);
        assert_eq!(
            view.get(5).unwrap_err(),
            ArenaError::IndexOutOfRange { index: 5, bound: 2 }
        );
    }

    #[test]
    fn index_operator_matches_get() {
        let arena = arena(103, 4096);
        let mut view: ArenaView<u32> = ArenaView::new(&arena, 2, "view").unwrap();
        view[0] = 7;
        assert_eq!(view[0], 7);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn index_operator_panics_out_of_range() {
        let arena = arena(104, 4096);
        let view: ArenaView<u32> = ArenaView::new(&arena, 2, "view").unwrap();
        let _ = view[10];
    }

    #[test]
    fn zero_length_view_is_rejected() {
        let arena = arena(105, 4096);
        let err = ArenaView::<u32>::new(&arena, 0, "view").unwrap_err();
        assert_eq!(err, ArenaError::InvalidLength(0));
    }

    #[test]
    fn iteration_is_restartable() {
        let arena = arena(106, 4096);
        let mut view: ArenaView<u32> = ArenaView::new(&arena, 3, "view").unwrap();
        view.copy_from(&[1, 2, 3]).unwrap();
        let first: Vec<u32> = view.iter().copied().collect();
        let second: Vec<u32> = view.iter().copied().collect();
        assert_eq!(first, second);
        assert_eq!(first, vec![1, 2, 3]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "after its parent arena was reset")]
    fn use_after_reset_panics_in_debug() {
        let arena = arena(107, 4096);
        let view: ArenaView<u32> = ArenaView::new(&arena, 2, "view").unwrap();
        arena.reset();
        let _ = view.get(0);
    }
}
