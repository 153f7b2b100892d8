use crate::{
    any::{DifficultyAttributes, ScoreAggregate},
    model::mods::ModState,
    taiko::{TaikoPerformanceAttributes, TaikoScoreState},
    util::{
        difficulty::{norm, wilson_lower_bound},
        special_functions::{erf, erf_inv},
    },
};

pub(super) struct TaikoPerformanceCalculator<'a> {
    attrs: &'a DifficultyAttributes,
    mods: &'a ModState,
    max_combo: u32,
    great_hit_window: f64,
    is_convert: bool,
    state: TaikoScoreState,
}

impl<'a> TaikoPerformanceCalculator<'a> {
    pub fn new(aggregate: &'a ScoreAggregate, state: TaikoScoreState) -> Self {
        Self {
            attrs: aggregate.difficulty(),
            mods: aggregate.mods(),
            max_combo: aggregate.max_combo(),
            great_hit_window: aggregate.map_attributes().hit_windows.od_great,
            is_convert: aggregate.is_convert(),
            state,
        }
    }
}

impl TaikoPerformanceCalculator<'_> {
    pub fn calculate(self) -> TaikoPerformanceAttributes {
        if self.state.total_hits() == 0 {
            return TaikoPerformanceAttributes {
                stars: self.attrs.stars,
                ..Default::default()
            };
        }

        // * The effectiveMissCount is calculated by gaining a ratio for totalSuccessfulHits
        // * and increasing the miss penalty for shorter object counts lower than 1000.
        let total_successful_hits = self.state.total_successful_hits();

        let estimated_unstable_rate = self.compute_deviation_upper_bound().map(|v| v * 10.0);

        let misses = f64::from(self.state.misses);

        let effective_miss_count = if total_successful_hits > 0 {
            (1000.0 / f64::from(total_successful_hits)).max(1.0) * misses
        } else {
            misses
        };

        let effective_miss_count = effective_miss_count
            .max(misses)
            .min(f64::from(self.state.total_hits()));

        let mut multiplier = 1.13;

        if self.mods.hd() && !self.is_convert {
            multiplier *= 1.075;
        }

        if self.mods.ez() {
            multiplier *= 0.95;
        }

        let diff_value =
            self.compute_difficulty_value(effective_miss_count, estimated_unstable_rate);
        let acc_value = self.compute_accuracy_value(estimated_unstable_rate);

        let pp = norm(1.1, [diff_value, acc_value]) * multiplier;

        tracing::trace!(
            pp,
            difficulty = diff_value,
            acc = acc_value,
            effective_miss_count,
            "Calculated osu!taiko performance",
        );

        TaikoPerformanceAttributes {
            stars: self.attrs.stars,
            pp,
            pp_acc: acc_value,
            pp_difficulty: diff_value,
            effective_miss_count,
            estimated_unstable_rate,
        }
    }

    fn compute_difficulty_value(
        &self,
        effective_miss_count: f64,
        estimated_unstable_rate: Option<f64>,
    ) -> f64 {
        let Some(estimated_unstable_rate) = estimated_unstable_rate else {
            return 0.0;
        };

        let base_difficulty = 5.0 * f64::max(1.0, self.attrs.stars / 0.110) - 4.0;

        let mut difficulty_value = f64::min(
            f64::powf(base_difficulty, 3.0) / 69_052.51,
            f64::powf(base_difficulty, 2.25) / 1250.0,
        );

        difficulty_value *= 1.0 + 0.10 * f64::max(0.0, self.attrs.stars - 10.0);

        let length_bonus = 1.0 + 0.1 * f64::min(1.0, f64::from(self.max_combo) / 1500.0);
        difficulty_value *= length_bonus;

        difficulty_value *= f64::powf(0.986, effective_miss_count);

        if self.mods.ez() {
            difficulty_value *= 0.9;
        }

        if self.mods.hd() {
            difficulty_value *= 1.025;
        }

        if self.mods.fl() {
            difficulty_value *= f64::max(
                1.0,
                1.05 - f64::min(self.attrs.mono_stamina_factor / 50.0, 1.0) * length_bonus,
            );
        }

        // * Scale accuracy more harshly on nearly-completely mono (single coloured) speed maps.
        let acc_scaling_exp = 2.0 + self.attrs.mono_stamina_factor;
        let acc_scaling_shift = 500.0 - 100.0 * (self.attrs.mono_stamina_factor * 3.0);

        difficulty_value
            * (erf(acc_scaling_shift / (f64::sqrt(2.0) * estimated_unstable_rate)))
                .powf(acc_scaling_exp)
    }

    fn compute_accuracy_value(&self, estimated_unstable_rate: Option<f64>) -> f64 {
        let Some(estimated_unstable_rate) = estimated_unstable_rate else {
            return 0.0;
        };

        let mut acc_value = f64::powf(70.0 / estimated_unstable_rate, 1.1)
            * f64::powf(self.attrs.stars, 0.4)
            * 100.0;

        let length_bonus = f64::min(1.15, f64::powf(self.total_hits() / 1500.0, 0.3));

        // * Slight HDFL Bonus for accuracy. A clamp is used to prevent against negative values.
        if self.mods.hd() && self.mods.fl() && !self.is_convert {
            acc_value *= f64::max(1.0, 1.05 * length_bonus);
        }

        acc_value
    }

    // * Computes an upper bound on the player's tap deviation based on the OD, number of circles and sliders,
    // * and the hit judgements, assuming the player's mean hit error is 0. The estimation is consistent in that
    // * two SS scores on the same map with the same settings will always return the same deviation.
    fn compute_deviation_upper_bound(&self) -> Option<f64> {
        if self.state.n300 == 0 || self.great_hit_window <= 0.0 {
            return None;
        }

        let n = self.total_hits();

        // * Proportion of greats hit.
        let p = f64::from(self.state.n300) / n;

        // * We can be 99% confident that p is at least this value.
        let p_lower_bound = wilson_lower_bound(n, p);

        if p_lower_bound <= 0.0 {
            return None;
        }

        // * We can be 99% confident that the deviation is not higher than:
        Some(self.great_hit_window / (f64::sqrt(2.0) * erf_inv(p_lower_bound)))
    }

    fn total_hits(&self) -> f64 {
        f64::from(self.state.total_hits())
    }
}
