//! Running statistics for a single path key.

/// Aggregated timings of every completed visit to one path key.
///
/// Times are in raw clock units; conversion happens at export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocatedStats {
    /// Completed push/pop cycles
    pub visit_count: u64,

    /// Sum of all elapsed times
    pub total_time: i64,

    /// Longest single visit
    pub max_time: i64,

    /// Shortest single visit
    pub min_time: i64,
}

impl Default for LocatedStats {
    fn default() -> Self {
        Self {
            visit_count: 0,
            total_time: 0,
            max_time: i64::MIN,
            min_time: i64::MAX,
        }
    }
}

impl LocatedStats {
    /// Fold one completed visit into the record
    pub fn record(&mut self, elapsed: i64) {
        self.total_time = self.total_time.saturating_add(elapsed);
        self.visit_count += 1;
        self.max_time = self.max_time.max(elapsed);
        self.min_time = self.min_time.min(elapsed);
    }

    /// Mean visit time in raw clock units, `None` if never visited
    pub fn average(&self) -> Option<f64> {
        if self.visit_count == 0 {
            return None;
        }
        Some(self.total_time as f64 / self.visit_count as f64)
    }
}
