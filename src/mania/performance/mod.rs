use rosu_map::section::general::GameMode;

use self::calculator::ManiaPerformanceCalculator;

use crate::any::{finite_or_zero, HitStatistics, ScoreAggregate};

use super::{ManiaPerformanceAttributes, ManiaScoreState};

mod calculator;

pub(super) fn calculate(
    aggregate: &ScoreAggregate,
    statistics: &HitStatistics,
) -> ManiaPerformanceAttributes {
    let state = ManiaScoreState::from(statistics);

    let mut attrs = ManiaPerformanceCalculator::new(aggregate, state).calculate();
    attrs.pp = finite_or_zero(attrs.pp, GameMode::Mania);

    attrs
}
