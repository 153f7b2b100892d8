use std::borrow::Cow;

use rosu_map::section::general::GameMode;

use crate::{catch::Catch, mania::Mania, osu::Osu, taiko::Taiko, util::ruleset_ext::RulesetExt};

use super::{HitStatistics, PerformanceAttributes, ScoreAggregate};

/// Performance calculation of a single ruleset.
pub trait ComputePerformance {
    /// The ruleset's performance attributes.
    type Attributes: Into<PerformanceAttributes>;

    /// Calculate the performance of the given statistics on the aggregate's
    /// beatmap and mods.
    fn compute(aggregate: &ScoreAggregate, statistics: &HitStatistics) -> Self::Attributes;
}

/// Performance calculator on any ruleset.
///
/// The calculation dispatches on the ruleset of the [`ScoreAggregate`].
///
/// # Example
///
/// ```
/// use inspector_pp::any::{HitResult, HitStatistics, ScoreAggregate};
///
/// let score = r#"{
///     "ruleset_id": 1,
///     "statistics": { "great": 900, "ok": 80, "miss": 20 },
///     "max_combo": 400,
///     "beatmap": { "accuracy": 6, "max_combo": 1000 }
/// }"#;
///
/// let aggregate = ScoreAggregate::from_json(score, Some(r#"{ "star_rating": 5.2 }"#)).unwrap();
///
/// let actual = aggregate.performance().calculate();
///
/// let if_fc = aggregate
///     .performance()
///     .statistics(*aggregate.full_combo_statistics())
///     .calculate();
///
/// assert!(if_fc.pp() > actual.pp());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub struct Performance<'a> {
    aggregate: &'a ScoreAggregate,
    statistics: Option<HitStatistics>,
    combo: Option<u32>,
    lazer: Option<bool>,
}

impl<'a> Performance<'a> {
    /// Create a new performance calculator for the given score.
    pub const fn new(aggregate: &'a ScoreAggregate) -> Self {
        Self {
            aggregate,
            statistics: None,
            combo: None,
            lazer: None,
        }
    }

    /// Use the given statistics instead of the score's.
    pub const fn statistics(mut self, statistics: HitStatistics) -> Self {
        self.statistics = Some(statistics);

        self
    }

    /// Specify the max combo of the play.
    pub const fn combo(mut self, combo: u32) -> Self {
        self.combo = Some(combo);

        self
    }

    /// Whether the score should be considered as set on osu!lazer or
    /// osu!stable.
    ///
    /// Defaults to the score's origin.
    pub const fn lazer(mut self, lazer: bool) -> Self {
        self.lazer = Some(lazer);

        self
    }

    /// Calculate all performance related values.
    pub fn calculate(self) -> PerformanceAttributes {
        let aggregate = match self.lazer {
            Some(lazer) if lazer != self.aggregate.is_lazer() => {
                Cow::Owned(self.aggregate.with_lazer(lazer))
            }
            _ => Cow::Borrowed(self.aggregate),
        };

        let mut statistics = self
            .statistics
            .unwrap_or_else(|| *aggregate.statistics());

        if let Some(combo) = self.combo {
            statistics.max_combo = combo;
        }

        match aggregate.mode() {
            GameMode::Osu => calculate::<Osu>(&aggregate, &statistics),
            GameMode::Taiko => calculate::<Taiko>(&aggregate, &statistics),
            GameMode::Catch => calculate::<Catch>(&aggregate, &statistics),
            GameMode::Mania => calculate::<Mania>(&aggregate, &statistics),
        }
    }
}

fn calculate<R: ComputePerformance>(
    aggregate: &ScoreAggregate,
    statistics: &HitStatistics,
) -> PerformanceAttributes {
    R::compute(aggregate, statistics).into()
}

/// Replace a non-finite pp value with `0.0`.
pub(crate) fn finite_or_zero(pp: f64, mode: GameMode) -> f64 {
    if pp.is_finite() {
        pp
    } else {
        tracing::warn!(ruleset = mode.short_name(), pp, "Non-finite pp value, using zero");

        0.0
    }
}

impl<'a> From<&'a ScoreAggregate> for Performance<'a> {
    fn from(aggregate: &'a ScoreAggregate) -> Self {
        Self::new(aggregate)
    }
}
