//! Bookkeeping of renderer-side geometry resources

use std::collections::HashSet;

/// Opaque handle of one allocated geometry buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryHandle(u64);

impl GeometryHandle {
    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Counts allocations and releases so leaks and double frees are observable
#[derive(Debug, Default)]
pub struct ResourceLedger {
    next: u64,
    live: HashSet<GeometryHandle>,
    allocated: u64,
    released: u64,
}

impl ResourceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> GeometryHandle {
        self.next += 1;
        let handle = GeometryHandle(self.next);
        self.live.insert(handle);
        self.allocated += 1;
        handle
    }

    /// Release a handle. Returns false if it was not live.
    pub fn release(&mut self, handle: GeometryHandle) -> bool {
        if self.live.remove(&handle) {
            self.released += 1;
            true
        } else {
            tracing::warn!("Release of unknown geometry handle {}", handle.0);
            false
        }
    }

    pub fn is_live(&self, handle: GeometryHandle) -> bool {
        self.live.contains(&handle)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Total allocations so far
    pub fn allocated(&self) -> u64 {
        self.allocated
    }

    /// Total releases so far
    pub fn released(&self) -> u64 {
        self.released
    }
}
