use rosu_map::section::general::GameMode;

use self::calculator::OsuPerformanceCalculator;
pub use self::calculator::PERFORMANCE_BASE_MULTIPLIER;

use crate::{
    any::{finite_or_zero, HitStatistics, ScoreAggregate},
    model::beatmap::Beatmap,
};

use super::{OsuPerformanceAttributes, OsuScoreState};

mod calculator;

pub(super) fn calculate(
    aggregate: &ScoreAggregate,
    statistics: &HitStatistics,
) -> OsuPerformanceAttributes {
    let state = OsuScoreState::from(statistics);
    let map = aggregate.map();
    let max_combo = aggregate.max_combo();
    let using_classic_slider_acc = aggregate.no_slider_head_acc();

    let effective_miss_count =
        effective_miss_count(map, max_combo, &state, using_classic_slider_acc);

    let acc = statistics.accuracy(aggregate.maximum_statistics());

    let mut attrs = OsuPerformanceCalculator::new(
        aggregate,
        acc,
        state,
        effective_miss_count,
        using_classic_slider_acc,
    )
    .calculate();

    attrs.pp = finite_or_zero(attrs.pp, GameMode::Osu);

    attrs
}

/// Misses plus an estimation of combo breaks that did not show up as misses.
fn effective_miss_count(
    map: &Beatmap,
    max_combo: u32,
    state: &OsuScoreState,
    using_classic_slider_acc: bool,
) -> f64 {
    let mut effective_miss_count = f64::from(state.misses);

    if map.n_sliders > 0 {
        if using_classic_slider_acc {
            // * Consider that full combo is maximum combo minus dropped slider tails since they don't contribute to combo but also don't break it
            // * In classic scores we can't know the amount of dropped sliders so we estimate to 10% of all sliders on the map
            let full_combo_threshold = f64::from(max_combo) - 0.1 * f64::from(map.n_sliders);

            if f64::from(state.max_combo) < full_combo_threshold {
                effective_miss_count = full_combo_threshold / f64::from(state.max_combo).max(1.0);
            }

            // * In classic scores there can't be more misses than a sum of all non-perfect judgements
            effective_miss_count =
                effective_miss_count.min(f64::from(state.total_imperfect_hits()));
        } else {
            let full_combo_threshold =
                f64::from(max_combo.saturating_sub(n_slider_ends_dropped(map, state)));

            if f64::from(state.max_combo) < full_combo_threshold {
                effective_miss_count = full_combo_threshold / f64::from(state.max_combo).max(1.0);
            }

            // * Combine regular misses with tick misses since tick misses break combo as well
            effective_miss_count =
                effective_miss_count.min(f64::from(state.large_tick_misses.saturating_add(state.misses)));
        }
    }

    effective_miss_count
        .max(f64::from(state.misses))
        .min(f64::from(state.total_hits()))
}

const fn n_slider_ends_dropped(map: &Beatmap, state: &OsuScoreState) -> u32 {
    map.n_sliders.saturating_sub(state.slider_end_hits)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::any::HitResult;

    use super::*;

    fn map() -> Beatmap {
        Beatmap {
            n_circles: 300,
            n_sliders: 100,
            max_combo: 600,
            ..Beatmap::default()
        }
    }

    fn state(max_combo: u32, n100: u32, misses: u32) -> OsuScoreState {
        OsuScoreState {
            max_combo,
            slider_end_hits: 100,
            n300: 400 - n100 - misses,
            n100,
            misses,
            ..OsuScoreState::default()
        }
    }

    #[test]
    fn full_combo_has_no_effective_misses() {
        let count = effective_miss_count(&map(), 600, &state(600, 5, 0), false);

        assert!(count.abs() < f64::EPSILON);
    }

    #[test]
    fn classic_combo_breaks_count_as_misses() {
        // Threshold is 600 - 10 = 590 and combo 295 gives 2 breaks
        let count = effective_miss_count(&map(), 600, &state(295, 5, 0), true);

        assert!((count - 2.0).abs() < 1e-12);
    }

    #[test]
    fn classic_capped_by_imperfect_hits() {
        let count = effective_miss_count(&map(), 600, &state(10, 3, 1), true);

        assert!((count - 4.0).abs() < 1e-12);
    }

    #[test]
    fn lazer_capped_by_tick_misses() {
        let mut state = state(100, 0, 1);
        state.large_tick_misses = 2;

        let count = effective_miss_count(&map(), 600, &state, false);

        assert!((count - 3.0).abs() < 1e-12);
    }

    #[test]
    fn no_sliders_uses_misses() {
        let map = Beatmap {
            n_sliders: 0,
            ..map()
        };

        let count = effective_miss_count(&map, 600, &state(1, 10, 3), true);

        assert!((count - 3.0).abs() < 1e-12);
    }

    fn aggregate(statistics: &str) -> ScoreAggregate {
        let score = format!(
            r#"{{
                "ruleset_id": 0,
                "statistics": {statistics},
                "max_combo": 1000,
                "build_id": 7500,
                "beatmap": {{ "ar": 9, "cs": 4, "accuracy": 8, "drain": 5, "count_sliders": 200, "max_combo": 1000 }}
            }}"#
        );

        let attrs = r#"{ "star_rating": 6.0, "aim_difficulty": 3.0, "speed_difficulty": 3.0 }"#;

        ScoreAggregate::from_json(&score, Some(attrs)).unwrap()
    }

    #[test]
    fn single_miss_without_strain_counts() {
        let aggregate = aggregate(r#"{ "great": 995, "ok": 5 }"#);
        let clean = calculate(&aggregate, aggregate.statistics());

        let missed = aggregate
            .statistics()
            .with(HitResult::Ok, 4)
            .with(HitResult::Miss, 1);
        let missed = calculate(&aggregate, &missed);

        assert!(missed.pp < clean.pp);
        assert!(missed.pp_aim > 0.0);
        assert!(missed.pp_speed > 0.0);

        // Only the base miss penalty applies to aim
        assert!(missed.pp_aim >= clean.pp_aim * 0.96 * 0.9);
    }

    #[test]
    fn huge_counts_do_not_overflow() {
        let aggregate = aggregate(r#"{ "great": 4294967295, "miss": 1 }"#);
        let attrs = calculate(&aggregate, aggregate.statistics());

        assert!(attrs.pp.is_finite());
        assert!(attrs.pp >= 0.0);
        assert!(attrs.effective_miss_count >= 1.0);
    }

    proptest! {
        #[test]
        fn bounded_by_misses_and_total(
            combo in 0_u32..=600,
            n100 in 0_u32..100,
            misses in 0_u32..100,
            classic: bool,
        ) {
            let state = state(combo, n100, misses);
            let count = effective_miss_count(&map(), 600, &state, classic);

            prop_assert!(count >= f64::from(misses));
            prop_assert!(count <= f64::from(state.total_hits()));
        }
    }
}
