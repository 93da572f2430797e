use crate::domain::ports::KioskAttendanceCache;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-process kiosk attendance-count cache, injected wherever eviction is
/// needed instead of living as ambient global state.
pub struct InMemoryKioskCache {
    counts: Mutex<HashMap<String, i64>>,
}

impl InMemoryKioskCache {
    pub fn new() -> Self {
        Self {
            counts: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryKioskCache {
    fn default() -> Self {
        Self::new()
    }
}

impl KioskAttendanceCache for InMemoryKioskCache {
    fn get(&self, location_id: &str) -> Option<i64> {
        self.counts.lock().ok()?.get(location_id).copied()
    }

    fn insert(&self, location_id: &str, count: i64) {
        if let Ok(mut counts) = self.counts.lock() {
            counts.insert(location_id.to_string(), count);
        }
    }

    fn evict(&self, location_id: &str) {
        if let Ok(mut counts) = self.counts.lock() {
            counts.remove(location_id);
        }
    }
}
