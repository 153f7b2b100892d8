use crate::any::{ComputePerformance, HitStatistics, ScoreAggregate};

pub use self::{
    attributes::OsuPerformanceAttributes,
    performance::PERFORMANCE_BASE_MULTIPLIER,
    score_state::OsuScoreState,
};

mod attributes;
mod performance;
mod score_state;

/// Marker type for [`GameMode::Osu`].
///
/// [`GameMode::Osu`]: rosu_map::section::general::GameMode::Osu
pub struct Osu;

impl ComputePerformance for Osu {
    type Attributes = OsuPerformanceAttributes;

    fn compute(aggregate: &ScoreAggregate, statistics: &HitStatistics) -> Self::Attributes {
        performance::calculate(aggregate, statistics)
    }
}
