use crate::any::{ComputePerformance, HitStatistics, ScoreAggregate};

pub use self::{attributes::CatchPerformanceAttributes, score_state::CatchScoreState};

mod attributes;
mod performance;
mod score_state;

/// Marker type for [`GameMode::Catch`].
///
/// [`GameMode::Catch`]: rosu_map::section::general::GameMode::Catch
pub struct Catch;

impl ComputePerformance for Catch {
    type Attributes = CatchPerformanceAttributes;

    fn compute(aggregate: &ScoreAggregate, statistics: &HitStatistics) -> Self::Attributes {
        performance::calculate(aggregate, statistics)
    }
}
