use rosu_map::section::general::GameMode;

use self::calculator::CatchPerformanceCalculator;

use crate::any::{finite_or_zero, HitStatistics, ScoreAggregate};

use super::{CatchPerformanceAttributes, CatchScoreState};

mod calculator;

pub(super) fn calculate(
    aggregate: &ScoreAggregate,
    statistics: &HitStatistics,
) -> CatchPerformanceAttributes {
    let state = CatchScoreState::from(statistics);

    let mut attrs = CatchPerformanceCalculator::new(aggregate, state).calculate();
    attrs.pp = finite_or_zero(attrs.pp, GameMode::Catch);

    attrs
}
