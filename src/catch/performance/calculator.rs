use crate::{
    any::ScoreAggregate,
    catch::{CatchPerformanceAttributes, CatchScoreState},
    model::mods::ModState,
};

pub(super) struct CatchPerformanceCalculator<'a> {
    stars: f64,
    max_combo: u32,
    preempt: f64,
    mods: &'a ModState,
    state: CatchScoreState,
}

impl<'a> CatchPerformanceCalculator<'a> {
    pub fn new(aggregate: &'a ScoreAggregate, state: CatchScoreState) -> Self {
        Self {
            stars: aggregate.difficulty().stars,
            max_combo: aggregate.max_combo(),
            preempt: aggregate.map_attributes().hit_windows.ar,
            mods: aggregate.mods(),
            state,
        }
    }
}

impl CatchPerformanceCalculator<'_> {
    pub fn calculate(self) -> CatchPerformanceAttributes {
        if self.state.total_hits() == 0 {
            return CatchPerformanceAttributes {
                stars: self.stars,
                pp: 0.0,
            };
        }

        let max_combo = self.max_combo;

        // Relying heavily on aim
        let mut pp = (5.0 * (self.stars / 0.0049).max(1.0) - 4.0).powf(2.0) / 100_000.0;

        let mut combo_hits = self.combo_hits();

        if combo_hits == 0 {
            combo_hits = max_combo;
        }

        // Longer maps are worth more
        let mut len_bonus = 0.95 + 0.3 * (f64::from(combo_hits) / 2500.0).min(1.0);

        if combo_hits > 2500 {
            len_bonus += (f64::from(combo_hits) / 2500.0).log10() * 0.475;
        }

        pp *= len_bonus;

        // Penalize misses exponentially
        pp *= 0.97_f64.powf(f64::from(self.state.misses));

        // Combo scaling
        if self.state.max_combo > 0 && max_combo > 0 {
            pp *= (f64::from(self.state.max_combo).powf(0.35) / f64::from(max_combo).powf(0.35))
                .min(1.0);
        }

        // AR scaling
        let ar = self.approach_rate();

        let mut ar_factor = 1.0;

        if ar > 9.0 {
            ar_factor += 0.1 * (ar - 9.0) + f64::from(u8::from(ar > 10.0)) * 0.1 * (ar - 10.0);
        } else if ar < 8.0 {
            ar_factor += 0.025 * (8.0 - ar);
        }

        pp *= ar_factor;

        // HD bonus
        if self.mods.hd() {
            if ar <= 10.0 {
                pp *= 1.05 + 0.075 * (10.0 - ar);
            } else {
                pp *= 1.01 + 0.04 * (11.0 - ar.min(11.0));
            }
        }

        // FL bonus
        if self.mods.fl() {
            pp *= 1.35 * len_bonus;
        }

        // Accuracy scaling
        pp *= self.state.accuracy().powf(5.5);

        // NF penalty
        if self.mods.nf() {
            pp *= (1.0 - 0.02 * f64::from(self.state.misses)).max(0.9);
        }

        tracing::trace!(pp, ar, len_bonus, "Calculated osu!catch performance");

        CatchPerformanceAttributes {
            stars: self.stars,
            pp,
        }
    }

    /// The approach rate as perceived with the clock rate.
    fn approach_rate(&self) -> f64 {
        if self.preempt > 1200.0 {
            -(self.preempt - 1800.0) / 120.0
        } else {
            -(self.preempt - 1200.0) / 150.0 + 5.0
        }
    }

    const fn combo_hits(&self) -> u32 {
        self.state
            .fruits
            .saturating_add(self.state.droplets)
            .saturating_add(self.state.misses)
    }
}
