use crate::any::{HitResult, HitStatistics};

/// Aggregation for a score's current state on an osu!catch map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CatchScoreState {
    /// Maximum combo that the score has had so far.
    pub max_combo: u32,
    /// Amount of current fruits (300s).
    pub fruits: u32,
    /// Amount of current droplets (100s).
    pub droplets: u32,
    /// Amount of current tiny droplets (50s).
    pub tiny_droplets: u32,
    /// Amount of current tiny droplet misses (katus).
    pub tiny_droplet_misses: u32,
    /// Amount of current misses (fruits and droplets).
    pub misses: u32,
}

impl CatchScoreState {
    /// Return the total amount of hits by adding everything up.
    pub const fn total_hits(&self) -> u32 {
        self.fruits
            .saturating_add(self.droplets)
            .saturating_add(self.tiny_droplets)
            .saturating_add(self.tiny_droplet_misses)
            .saturating_add(self.misses)
    }

    /// Calculate the accuracy between `0.0` and `1.0` for this state.
    pub fn accuracy(&self) -> f64 {
        let total_hits = self.total_hits();

        if total_hits == 0 {
            return 1.0;
        }

        let numerator =
            f64::from(self.fruits) + f64::from(self.droplets) + f64::from(self.tiny_droplets);

        (numerator / f64::from(total_hits)).min(1.0)
    }
}

impl From<&HitStatistics> for CatchScoreState {
    fn from(statistics: &HitStatistics) -> Self {
        Self {
            max_combo: statistics.max_combo,
            fruits: statistics.get(HitResult::Great),
            droplets: statistics.get(HitResult::LargeTickHit),
            tiny_droplets: statistics.get(HitResult::SmallTickHit),
            tiny_droplet_misses: statistics.get(HitResult::SmallTickMiss),
            misses: statistics.sum(&[HitResult::Miss, HitResult::LargeTickMiss]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statistics_mapping() {
        let statistics = HitStatistics::new()
            .with(HitResult::Great, 500)
            .with(HitResult::LargeTickHit, 40)
            .with(HitResult::LargeTickMiss, 2)
            .with(HitResult::SmallTickHit, 200)
            .with(HitResult::SmallTickMiss, 8)
            .with(HitResult::Miss, 3);

        let state = CatchScoreState::from(&statistics);

        assert_eq!(state.fruits, 500);
        assert_eq!(state.droplets, 40);
        assert_eq!(state.tiny_droplets, 200);
        assert_eq!(state.tiny_droplet_misses, 8);
        assert_eq!(state.misses, 5);
        assert!((state.accuracy() - 740.0 / 753.0).abs() < 1e-12);
    }

    #[test]
    fn empty_accuracy() {
        assert!((CatchScoreState::default().accuracy() - 1.0).abs() < f64::EPSILON);
    }
}
