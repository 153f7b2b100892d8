use crate::any::{HitResult, HitStatistics};

/// Aggregation for a score's current state on an osu!mania map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ManiaScoreState {
    /// Amount of current 320s.
    pub n320: u32,
    /// Amount of current 300s.
    pub n300: u32,
    /// Amount of current 200s.
    pub n200: u32,
    /// Amount of current 100s.
    pub n100: u32,
    /// Amount of current 50s.
    pub n50: u32,
    /// Amount of current misses.
    pub misses: u32,
}

impl ManiaScoreState {
    /// Return the total amount of hits by adding everything up.
    pub const fn total_hits(&self) -> u32 {
        self.n320
            .saturating_add(self.n300)
            .saturating_add(self.n200)
            .saturating_add(self.n100)
            .saturating_add(self.n50)
            .saturating_add(self.misses)
    }

    /// Accuracy between `0.0` and `1.0` that weighs 320s above 300s.
    pub fn custom_accuracy(&self) -> f64 {
        let total_hits = self.total_hits();

        if total_hits == 0 {
            return 0.0;
        }

        let numerator = f64::from(self.n320) * 32.0
            + f64::from(self.n300) * 30.0
            + f64::from(self.n200) * 20.0
            + f64::from(self.n100) * 10.0
            + f64::from(self.n50) * 5.0;

        (numerator / (f64::from(total_hits) * 32.0)).min(1.0)
    }
}

impl From<&HitStatistics> for ManiaScoreState {
    fn from(statistics: &HitStatistics) -> Self {
        Self {
            n320: statistics.get(HitResult::Perfect),
            n300: statistics.get(HitResult::Great),
            n200: statistics.get(HitResult::Good),
            n100: statistics.get(HitResult::Ok),
            n50: statistics.get(HitResult::Meh),
            misses: statistics.get(HitResult::Miss),
        }
    }
}
