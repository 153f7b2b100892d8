use crate::any::{HitResult, HitStatistics};

/// Aggregation for a score's current state on an osu!standard map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OsuScoreState {
    /// Maximum combo that the score has had so far.
    pub max_combo: u32,
    /// Amount of hit slider ticks and repeats, or slider heads on scores
    /// without slider accuracy.
    pub large_tick_hits: u32,
    /// Amount of missed slider ticks and repeats.
    pub large_tick_misses: u32,
    /// Amount of hit slider tails on scores with slider accuracy.
    pub slider_end_hits: u32,
    /// Amount of current 300s.
    pub n300: u32,
    /// Amount of current 100s.
    pub n100: u32,
    /// Amount of current 50s.
    pub n50: u32,
    /// Amount of current misses.
    pub misses: u32,
}

impl OsuScoreState {
    /// Return the total amount of hits by adding everything up.
    pub const fn total_hits(&self) -> u32 {
        self.total_successful_hits().saturating_add(self.misses)
    }

    /// Amount of hits that were not misses.
    pub const fn total_successful_hits(&self) -> u32 {
        self.n300.saturating_add(self.n100).saturating_add(self.n50)
    }

    /// Amount of judgements that were not 300s.
    pub const fn total_imperfect_hits(&self) -> u32 {
        self.n100.saturating_add(self.n50).saturating_add(self.misses)
    }
}

impl From<&HitStatistics> for OsuScoreState {
    fn from(statistics: &HitStatistics) -> Self {
        Self {
            max_combo: statistics.max_combo,
            large_tick_hits: statistics.get(HitResult::LargeTickHit),
            large_tick_misses: statistics.get(HitResult::LargeTickMiss),
            slider_end_hits: statistics.get(HitResult::SliderTailHit),
            n300: statistics.get(HitResult::Great),
            n100: statistics.get(HitResult::Ok),
            n50: statistics.get(HitResult::Meh),
            misses: statistics.get(HitResult::Miss),
        }
    }
}
