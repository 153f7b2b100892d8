use crate::{
    any::ScoreAggregate,
    mania::{ManiaPerformanceAttributes, ManiaScoreState},
    model::mods::ModState,
};

pub(super) struct ManiaPerformanceCalculator<'a> {
    stars: f64,
    mods: &'a ModState,
    state: ManiaScoreState,
}

impl<'a> ManiaPerformanceCalculator<'a> {
    pub fn new(aggregate: &'a ScoreAggregate, state: ManiaScoreState) -> Self {
        Self {
            stars: aggregate.difficulty().stars,
            mods: aggregate.mods(),
            state,
        }
    }
}

impl ManiaPerformanceCalculator<'_> {
    pub fn calculate(self) -> ManiaPerformanceAttributes {
        if self.state.total_hits() == 0 {
            return ManiaPerformanceAttributes {
                stars: self.stars,
                ..Default::default()
            };
        }

        let mut multiplier = 1.0;

        if self.mods.nf() {
            multiplier *= 0.75;
        }

        if self.mods.ez() {
            multiplier *= 0.5;
        }

        let difficulty_value = self.compute_difficulty_value();
        let pp = difficulty_value * multiplier;

        tracing::trace!(pp, difficulty = difficulty_value, "Calculated osu!mania performance");

        ManiaPerformanceAttributes {
            stars: self.stars,
            pp,
            pp_difficulty: difficulty_value,
        }
    }

    fn compute_difficulty_value(&self) -> f64 {
        // * Star rating to pp curve
        8.0 * f64::powf(f64::max(self.stars - 0.15, 0.05), 2.2)
             // * From 80% accuracy, 1/20th of total pp is awarded per additional 1% accuracy
             * f64::max(0.0, 5.0 * self.state.custom_accuracy() - 4.0)
             // * Length bonus, capped at 1500 notes
             * (1.0 + 0.1 * f64::min(1.0, self.total_hits() / 1500.0))
    }

    fn total_hits(&self) -> f64 {
        f64::from(self.state.total_hits())
    }
}

#[cfg(test)]
mod tests {
    use crate::any::{RawDifficultyAttributes, RawMod, RawScore};

    use super::*;

    fn calculate(statistics: &[(&str, u32)], mods: &[&str]) -> ManiaPerformanceAttributes {
        let score = RawScore {
            ruleset_id: 3,
            mods: mods
                .iter()
                .map(|acronym| RawMod::Acronym((*acronym).to_owned()))
                .collect(),
            statistics: statistics
                .iter()
                .map(|(key, count)| ((*key).to_owned(), *count))
                .collect(),
            build_id: Some(1),
            ..RawScore::default()
        };

        let attrs = RawDifficultyAttributes {
            star_rating: Some(4.0),
            ..RawDifficultyAttributes::default()
        };

        let aggregate = ScoreAggregate::new(&score, Some(&attrs)).unwrap();
        let state = ManiaScoreState::from(aggregate.statistics());

        ManiaPerformanceCalculator::new(&aggregate, state).calculate()
    }

    #[test]
    fn perfect_play() {
        let attrs = calculate(&[("perfect", 1500)], &[]);
        let expected = 8.0 * 3.85_f64.powf(2.2) * 1.1;

        assert!((attrs.pp - expected).abs() < 1e-9);
        assert!((attrs.pp_difficulty - expected).abs() < 1e-9);
    }

    #[test]
    fn low_accuracy_awards_nothing() {
        let attrs = calculate(&[("perfect", 500), ("miss", 500)], &[]);

        assert!(attrs.pp.abs() < f64::EPSILON);
    }

    #[test]
    fn huge_counts_do_not_overflow() {
        let attrs = calculate(&[("perfect", u32::MAX), ("great", 1), ("miss", 1)], &[]);

        assert!(attrs.pp.is_finite());
        assert!(attrs.pp > 0.0);
    }

    #[test]
    fn mod_multipliers() {
        let statistics = [("perfect", 900), ("great", 100)];

        let nomod = calculate(&statistics, &[]);
        let nofail = calculate(&statistics, &["NF"]);
        let easy = calculate(&statistics, &["EZ"]);

        assert!((nofail.pp / nomod.pp - 0.75).abs() < 1e-12);
        assert!((easy.pp / nomod.pp - 0.5).abs() < 1e-12);
        assert!((easy.pp_difficulty - nomod.pp_difficulty).abs() < 1e-12);
    }
}
