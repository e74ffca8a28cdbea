//! Statistics gathered by enumerator runs.

use std::ops::AddAssign;
use std::time::Duration;

/// Statistics from one or more enumerator runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStatistics {
    /// Candidate placements tested against the attack rules.
    pub placements_tried: u64,
    /// Solutions delivered to the sink at the boundary level.
    pub solutions_found: u64,
    /// Wall time spent inside the enumerator.
    pub elapsed_time: Duration,
}

impl SearchStatistics {
    /// Fraction of tested placements that survived the attack check and
    /// reached the boundary level (0.0 when nothing was tried).
    pub fn hit_rate(&self) -> f64 {
        if self.placements_tried == 0 {
            0.0
        } else {
            self.solutions_found as f64 / self.placements_tried as f64
        }
    }
}

impl AddAssign for SearchStatistics {
    fn add_assign(&mut self, other: Self) {
        self.placements_tried += other.placements_tried;
        self.solutions_found += other.solutions_found;
        self.elapsed_time += other.elapsed_time;
    }
}
