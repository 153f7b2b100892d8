use crate::any::{ComputePerformance, HitStatistics, ScoreAggregate};

pub use self::{attributes::ManiaPerformanceAttributes, score_state::ManiaScoreState};

mod attributes;
mod performance;
mod score_state;

/// Marker type for [`GameMode::Mania`].
///
/// [`GameMode::Mania`]: rosu_map::section::general::GameMode::Mania
pub struct Mania;

impl ComputePerformance for Mania {
    type Attributes = ManiaPerformanceAttributes;

    fn compute(aggregate: &ScoreAggregate, statistics: &HitStatistics) -> Self::Attributes {
        performance::calculate(aggregate, statistics)
    }
}
