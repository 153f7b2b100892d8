use crate::any::{HitResult, HitStatistics};

/// Aggregation for a score's current state on an osu!taiko map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaikoScoreState {
    /// Maximum combo that the score has had so far.
    pub max_combo: u32,
    /// Amount of current 300s.
    pub n300: u32,
    /// Amount of current 100s.
    pub n100: u32,
    /// Amount of current misses.
    pub misses: u32,
}

impl TaikoScoreState {
    /// Return the total amount of hits by adding everything up.
    pub const fn total_hits(&self) -> u32 {
        self.total_successful_hits().saturating_add(self.misses)
    }

    /// Amount of hits that were not misses.
    pub const fn total_successful_hits(&self) -> u32 {
        self.n300.saturating_add(self.n100)
    }
}

impl From<&HitStatistics> for TaikoScoreState {
    fn from(statistics: &HitStatistics) -> Self {
        Self {
            max_combo: statistics.max_combo,
            n300: statistics.get(HitResult::Great),
            n100: statistics.get(HitResult::Ok),
            misses: statistics.get(HitResult::Miss),
        }
    }
}
