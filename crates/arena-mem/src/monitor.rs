//! Process-wide registry of per-arena allocation records.
//!
//! Purely observational: no operation here ever affects allocator state
//! or panics for the caller's benefit. Mirrors the teacher's
//! `GlobalArena` singleton shape (`OnceLock` + `Mutex<Vec<_>>`) but keyed
//! by arena id instead of holding chunk pointers.

use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

/// One row recorded for a successful, tracked allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationRecord {
    pub arena_id: u64,
    pub offset: usize,
    pub size: usize,
    pub alignment: usize,
    pub padding: usize,
    pub tag: &'static str,
}

/// Per-arena waste summary, as returned by [`ArenaMonitor::summary`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArenaWasteReport {
    pub arena_id: u64,
    pub capacity: usize,
    pub total_waste: usize,
    /// `total_waste as f64 / capacity as f64`, computed by the caller
    /// from the integer fields above if a floating ratio is wanted; kept
    /// out of this struct so the monitor never does float arithmetic
    /// (`records` and `capacity` are enough to derive it exactly).
    pub records: Vec<AllocationRecord>,
}

impl ArenaWasteReport {
    /// `waste / capacity`, computed on demand.
    #[must_use]
    pub fn waste_ratio(&self) -> f64 {
        if self.capacity == 0 {
            0.0
        } else {
            self.total_waste as f64 / self.capacity as f64
        }
    }
}

/// A live arena's identity and capacity, as supplied by the caller to
/// [`ArenaMonitor::summary`] (the monitor itself holds no arena state).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveArenaInfo {
    pub arena_id: u64,
    pub capacity: usize,
    pub waste: usize,
}

/// The process-wide allocation-tracking monitor.
#[derive(Debug, Default)]
pub struct ArenaMonitor {
    rows: Mutex<HashMap<u64, Vec<AllocationRecord>>>,
}

impl ArenaMonitor {
    const fn new() -> Self {
        ArenaMonitor {
            rows: Mutex::new(HashMap::new()),
        }
    }

    /// Appends a row for `arena_id`. Call sites gate this on
    /// `config::get().track_allocations`; the monitor itself does not
    /// re-check the config, since it has no opinion on policy.
    pub fn record(&self, record: AllocationRecord) {
        let mut rows = self.rows.lock().expect("arena monitor lock poisoned");
        rows.entry(record.arena_id).or_default().push(record);
    }

    /// Removes every row recorded for `arena_id`.
    pub fn clear(&self, arena_id: u64) {
        let mut rows = self.rows.lock().expect("arena monitor lock poisoned");
        rows.remove(&arena_id);
    }

    /// Returns a snapshot of the rows recorded for `arena_id`, in
    /// allocation order.
    #[must_use]
    pub fn records(&self, arena_id: u64) -> Vec<AllocationRecord> {
        let rows = self.rows.lock().expect("arena monitor lock poisoned");
        rows.get(&arena_id).cloned().unwrap_or_default()
    }

    /// Builds a waste/allocation report for each of `live_arenas`. Used
    /// by debug/test paths only, never consulted by allocation logic.
    #[must_use]
    pub fn summary(&self, live_arenas: &[LiveArenaInfo]) -> Vec<ArenaWasteReport> {
        let rows = self.rows.lock().expect("arena monitor lock poisoned");
        live_arenas
            .iter()
            .map(|info| ArenaWasteReport {
                arena_id: info.arena_id,
                capacity: info.capacity,
                total_waste: info.waste,
                records: rows.get(&info.arena_id).cloned().unwrap_or_default(),
            })
            .collect()
    }
}

/// Returns the process-wide monitor singleton.
#[must_use]
pub fn global_monitor() -> &'static ArenaMonitor {
    static MONITOR: OnceLock<ArenaMonitor> = OnceLock::new();
    MONITOR.get_or_init(ArenaMonitor::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(arena_id: u64, offset: usize) -> AllocationRecord {
        AllocationRecord {
            arena_id,
            offset,
            size: 8,
            alignment: 8,
            padding: 0,
            tag: "test",
        }
    }

    #[test]
    fn record_and_read_back_in_order() {
        let monitor = ArenaMonitor::new();
        monitor.record(sample(1, 0));
        monitor.record(sample(1, 8));
        let rows = monitor.records(1);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].offset, 0);
        assert_eq!(rows[1].offset, 8);
    }

    #[test]
    fn clear_only_affects_its_arena() {
        let monitor = ArenaMonitor::new();
        monitor.record(sample(1, 0));
        monitor.record(sample(2, 0));
        monitor.clear(1);
        assert!(monitor.records(1).is_empty());
        assert_eq!(monitor.records(2).len(), 1);
    }

    #[test]
    fn summary_reports_waste_ratio() {
        let monitor = ArenaMonitor::new();
        monitor.record(sample(1, 0));
        let info = LiveArenaInfo {
            arena_id: 1,
            capacity: 100,
            waste: 25,
        };
        let report = monitor.summary(&[info]);
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].records.len(), 1);
        assert!((report[0].waste_ratio() - 0.25).abs() < f64::EPSILON);
    }
}
