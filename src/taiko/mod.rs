use crate::any::{ComputePerformance, HitStatistics, ScoreAggregate};

pub use self::{attributes::TaikoPerformanceAttributes, score_state::TaikoScoreState};

mod attributes;
mod performance;
mod score_state;

/// Marker type for [`GameMode::Taiko`].
///
/// [`GameMode::Taiko`]: rosu_map::section::general::GameMode::Taiko
pub struct Taiko;

impl ComputePerformance for Taiko {
    type Attributes = TaikoPerformanceAttributes;

    fn compute(aggregate: &ScoreAggregate, statistics: &HitStatistics) -> Self::Attributes {
        performance::calculate(aggregate, statistics)
    }
}
