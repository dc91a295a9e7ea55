//! Process-global, read-only configuration snapshot.
//!
//! The core never parses an on-disk config file itself (that is the
//! driver's job, out of scope per the allocator's purpose); it only reads
//! a small in-memory snapshot that an embedding application populates
//! with [`set`]. Every allocator operation reads [`get`] fresh rather than
//! caching a copy, so a toggle takes effect on the very next call.

use std::sync::{OnceLock, RwLock};

/// Recognized, process-global configuration options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Silences the log sink entirely when `false`.
    pub enable_logging: bool,
    /// Monitor `record`/`clear` become no-ops when `false`.
    pub track_allocations: bool,
    /// `waste` stops accumulating when `false` (aligned-offset math is
    /// unaffected either way).
    pub track_alignment_loss: bool,
    /// Advisory path for external log persistence. The core never writes
    /// to this path itself.
    pub log_output_path: Option<String>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        ArenaConfig {
            enable_logging: true,
            track_allocations: true,
            track_alignment_loss: true,
            log_output_path: None,
        }
    }
}

static CONFIG: OnceLock<RwLock<ArenaConfig>> = OnceLock::new();

fn cell() -> &'static RwLock<ArenaConfig> {
    CONFIG.get_or_init(|| RwLock::new(ArenaConfig::default()))
}

/// Returns a snapshot of the current configuration.
#[must_use]
pub fn get() -> ArenaConfig {
    cell().read().expect("arena config lock poisoned").clone()
}

/// Replaces the process-global configuration snapshot.
pub fn set(config: ArenaConfig) {
    *cell().write().expect("arena config lock poisoned") = config;
}
