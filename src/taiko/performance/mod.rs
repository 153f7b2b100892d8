use rosu_map::section::general::GameMode;

use self::calculator::TaikoPerformanceCalculator;

use crate::any::{finite_or_zero, HitStatistics, ScoreAggregate};

use super::{TaikoPerformanceAttributes, TaikoScoreState};

mod calculator;

pub(super) fn calculate(
    aggregate: &ScoreAggregate,
    statistics: &HitStatistics,
) -> TaikoPerformanceAttributes {
    let state = TaikoScoreState::from(statistics);

    let mut attrs = TaikoPerformanceCalculator::new(aggregate, state).calculate();
    attrs.pp = finite_or_zero(attrs.pp, GameMode::Taiko);

    attrs
}
