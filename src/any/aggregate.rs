use rosu_map::section::general::GameMode;

use crate::{
    model::{
        beatmap::{Beatmap, BeatmapAttributes},
        mods::{ModEntry, ModState},
    },
    util::ruleset_ext::RulesetExt,
    PerformanceError,
};

use super::{
    DifficultyAttributes, HitResult, HitStatistics, Performance, RawBeatmap,
    RawDifficultyAttributes, RawMod, RawScore,
};

/// Judgements that make up an object's main result.
const BASIC_RESULTS: [HitResult; 6] = [
    HitResult::Miss,
    HitResult::Meh,
    HitResult::Ok,
    HitResult::Good,
    HitResult::Great,
    HitResult::Perfect,
];

/// Everything a performance calculation needs to know about a score.
///
/// Built once from an upstream [`RawScore`] and immutable afterwards.
///
/// ```
/// use inspector_pp::any::{RawDifficultyAttributes, ScoreAggregate};
///
/// let score = r#"{
///     "ruleset_id": 0,
///     "mods": ["HD"],
///     "statistics": { "great": 995, "ok": 5 },
///     "max_combo": 1000,
///     "beatmap": { "ar": 9, "cs": 4, "accuracy": 8, "drain": 5, "count_sliders": 200, "max_combo": 1000 }
/// }"#;
///
/// let attrs = r#"{ "star_rating": 6.0, "aim_difficulty": 3.0, "speed_difficulty": 3.0 }"#;
///
/// let aggregate = ScoreAggregate::from_json(score, Some(attrs)).unwrap();
/// let pp = aggregate.performance().calculate().pp();
///
/// assert!(pp > 0.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreAggregate {
    mode: GameMode,
    mods: ModState,
    map: Beatmap,
    map_attrs: BeatmapAttributes,
    difficulty: DifficultyAttributes,
    statistics: HitStatistics,
    maximum_statistics: HitStatistics,
    full_combo_statistics: HitStatistics,
    lazer: bool,
}

impl ScoreAggregate {
    /// Combine an upstream score with the provider's difficulty attributes.
    ///
    /// Missing difficulty attributes are treated as zeros.
    pub fn new(
        score: &RawScore,
        attrs: Option<&RawDifficultyAttributes>,
    ) -> Result<Self, PerformanceError> {
        let mode = GameMode::from_ruleset_id(score.ruleset_id)?;

        let mods = score
            .mods
            .iter()
            .map(|raw| {
                let entry = ModEntry::new(raw.acronym())?;

                Ok(match raw {
                    RawMod::Acronym(_) => entry,
                    RawMod::Detailed { settings, .. } => entry.with_settings(settings.clone()),
                })
            })
            .collect::<Result<ModState, PerformanceError>>()?;

        // Stable scores carry a legacy id but no build id
        let lazer = score.build_id.is_some() || score.legacy_score_id.is_none();

        let difficulty = DifficultyAttributes::from_raw(attrs);

        let statistics = HitStatistics::from_counts(
            score
                .statistics
                .iter()
                .map(|(key, count)| (key.as_str(), *count)),
        )
        .with_max_combo(score.max_combo);

        let raw_maximum = HitStatistics::from_counts(
            score
                .maximum_statistics
                .iter()
                .map(|(key, count)| (key.as_str(), *count)),
        );

        let counts = if raw_maximum.is_empty() {
            &statistics
        } else {
            &raw_maximum
        };

        let mut map = beatmap(&score.beatmap, mode, counts);

        if map.max_combo == 0 {
            map.max_combo = difficulty.max_combo;
        }

        let maximum_statistics = if raw_maximum.is_empty() {
            fallback_maximum(mode, &statistics, &map)
        } else {
            raw_maximum
        }
        .with_max_combo(max_combo(&difficulty, &map));

        let map_attrs = map.attributes().mode(mode).mods(mods.clone()).build();

        let mut aggregate = Self {
            mode,
            mods,
            map,
            map_attrs,
            difficulty,
            statistics,
            maximum_statistics,
            full_combo_statistics: statistics,
            lazer,
        };

        aggregate.full_combo_statistics = aggregate.derive_full_combo();

        tracing::debug!(
            ruleset = mode.short_name(),
            mods = %aggregate.mods,
            lazer,
            stars = aggregate.difficulty.stars,
            "Built score aggregate",
        );

        Ok(aggregate)
    }

    /// Deserialize an upstream score and, if available, the provider's
    /// difficulty attributes.
    pub fn from_json(score: &str, attrs: Option<&str>) -> Result<Self, PerformanceError> {
        let score = RawScore::from_json(score)?;

        let attrs = attrs
            .map(RawDifficultyAttributes::from_json)
            .transpose()?;

        Self::new(&score, attrs.as_ref())
    }

    /// The same score as if it was set with different mods.
    ///
    /// The difficulty attributes are kept as is so they should already
    /// account for the new mods.
    #[must_use]
    pub fn with_mods(&self, mods: ModState) -> Self {
        let map_attrs = self
            .map
            .attributes()
            .mode(self.mode)
            .mods(mods.clone())
            .build();

        let mut aggregate = Self {
            mods,
            map_attrs,
            ..self.clone()
        };

        aggregate.full_combo_statistics = aggregate.derive_full_combo();

        aggregate
    }

    /// The same score as if it was set on osu!lazer or osu!stable.
    #[must_use]
    pub fn with_lazer(&self, lazer: bool) -> Self {
        let mut aggregate = Self {
            lazer,
            ..self.clone()
        };

        aggregate.full_combo_statistics = aggregate.derive_full_combo();

        aggregate
    }

    /// Returns a builder for performance calculation.
    pub const fn performance(&self) -> Performance<'_> {
        Performance::new(self)
    }

    /// The score's ruleset.
    pub const fn mode(&self) -> GameMode {
        self.mode
    }

    /// The applied mods.
    pub const fn mods(&self) -> &ModState {
        &self.mods
    }

    /// The beatmap's base values.
    pub const fn map(&self) -> &Beatmap {
        &self.map
    }

    /// The beatmap's mod-adjusted values.
    pub const fn map_attributes(&self) -> &BeatmapAttributes {
        &self.map_attrs
    }

    /// The precomputed difficulty attributes.
    pub const fn difficulty(&self) -> &DifficultyAttributes {
        &self.difficulty
    }

    /// The judgements of the score.
    pub const fn statistics(&self) -> &HitStatistics {
        &self.statistics
    }

    /// The judgements of a perfect play.
    pub const fn maximum_statistics(&self) -> &HitStatistics {
        &self.maximum_statistics
    }

    /// The judgements of the score if it had no misses.
    pub const fn full_combo_statistics(&self) -> &HitStatistics {
        &self.full_combo_statistics
    }

    /// Whether the score was set on osu!lazer.
    pub const fn is_lazer(&self) -> bool {
        self.lazer
    }

    /// Whether the beatmap is played as a convert.
    pub fn is_convert(&self) -> bool {
        self.map.is_convert(self.mode)
    }

    /// The maximum achievable combo.
    pub fn max_combo(&self) -> u32 {
        max_combo(&self.difficulty, &self.map)
    }

    /// Accuracy of the score between `0.0` and `1.0`.
    pub fn accuracy(&self) -> f64 {
        self.statistics.accuracy(&self.maximum_statistics)
    }

    /// Accuracy of the full combo variant between `0.0` and `1.0`.
    pub fn full_combo_accuracy(&self) -> f64 {
        self.full_combo_statistics
            .accuracy(&self.maximum_statistics)
    }

    /// Whether slider heads are judged like circles.
    pub fn no_slider_head_acc(&self) -> bool {
        self.mods.no_slider_head_acc(self.lazer)
    }

    fn derive_full_combo(&self) -> HitStatistics {
        let mut full_combo = self.statistics;

        match self.mode {
            GameMode::Osu => {
                let misses = full_combo.get(HitResult::Miss);
                full_combo.add(HitResult::Great, misses);
                full_combo.set(HitResult::Miss, 0);

                if !self.no_slider_head_acc() {
                    full_combo.set(HitResult::SliderTailHit, self.map.n_sliders);
                }
            }
            GameMode::Taiko => {
                let misses = full_combo.get(HitResult::Miss);
                full_combo.add(HitResult::Great, misses);
                full_combo.set(HitResult::Miss, 0);
            }
            GameMode::Catch | GameMode::Mania => {}
        }

        full_combo.with_max_combo(self.max_combo())
    }
}

fn max_combo(difficulty: &DifficultyAttributes, map: &Beatmap) -> u32 {
    if difficulty.max_combo > 0 {
        difficulty.max_combo
    } else {
        map.max_combo
    }
}

fn beatmap(raw: &RawBeatmap, mode: GameMode, counts: &HitStatistics) -> Beatmap {
    let n_sliders = raw.count_sliders;
    let n_spinners = raw.count_spinners;

    let n_circles = raw.count_circles.unwrap_or_else(|| {
        counts
            .sum(&BASIC_RESULTS)
            .saturating_sub(n_sliders)
            .saturating_sub(n_spinners)
    });

    Beatmap {
        mode: raw
            .mode
            .as_deref()
            .and_then(GameMode::from_short_name)
            .unwrap_or(mode),
        ar: raw.ar,
        cs: raw.cs,
        od: raw.accuracy,
        hp: raw.drain,
        n_circles,
        n_sliders,
        n_spinners,
        max_combo: raw.max_combo.unwrap_or(0),
    }
}

fn fallback_maximum(mode: GameMode, statistics: &HitStatistics, map: &Beatmap) -> HitStatistics {
    let mut maximum = HitStatistics::new();

    let perfect = if mode == GameMode::Mania {
        HitResult::Perfect
    } else {
        HitResult::Great
    };

    maximum.set(perfect, statistics.sum(&BASIC_RESULTS));

    maximum.set(
        HitResult::LargeTickHit,
        statistics.sum(&[HitResult::LargeTickHit, HitResult::LargeTickMiss]),
    );

    maximum.set(
        HitResult::SmallTickHit,
        statistics.sum(&[HitResult::SmallTickHit, HitResult::SmallTickMiss]),
    );

    if statistics.get(HitResult::SliderTailHit) > 0 {
        maximum.set(
            HitResult::SliderTailHit,
            map.n_sliders.max(statistics.get(HitResult::SliderTailHit)),
        );
    }

    for bonus in [HitResult::SmallBonus, HitResult::LargeBonus] {
        maximum.set(bonus, statistics.get(bonus));
    }

    maximum
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(ruleset_id: u32, statistics: &[(&str, u32)]) -> RawScore {
        RawScore {
            ruleset_id,
            statistics: statistics
                .iter()
                .map(|(key, count)| ((*key).to_owned(), *count))
                .collect(),
            max_combo: 80,
            build_id: Some(1),
            beatmap: RawBeatmap {
                count_sliders: 20,
                max_combo: Some(120),
                ..RawBeatmap::default()
            },
            ..RawScore::default()
        }
    }

    #[test]
    fn unsupported_ruleset() {
        let err = ScoreAggregate::new(&score(4, &[]), None).unwrap_err();

        assert!(matches!(err, PerformanceError::UnsupportedRuleset(4)));
    }

    #[test]
    fn invalid_acronym() {
        let mut score = score(0, &[]);
        score.mods.push(RawMod::Acronym("HIDDEN".to_owned()));

        let err = ScoreAggregate::new(&score, None).unwrap_err();

        assert!(matches!(err, PerformanceError::InvalidAcronym(_)));
    }

    #[test]
    fn full_combo_moves_misses() {
        let aggregate =
            ScoreAggregate::new(&score(0, &[("great", 95), ("miss", 5)]), None).unwrap();

        let full_combo = aggregate.full_combo_statistics();

        assert_eq!(full_combo.get(HitResult::Great), 100);
        assert_eq!(full_combo.get(HitResult::Miss), 0);
        assert_eq!(full_combo.get(HitResult::SliderTailHit), 20);
        assert_eq!(full_combo.max_combo, 120);

        assert_eq!(aggregate.statistics().get(HitResult::Miss), 5);
    }

    #[test]
    fn full_combo_classic_keeps_slider_tails() {
        let mut score = score(0, &[("great", 95), ("miss", 5)]);
        score.build_id = None;
        score.legacy_score_id = Some(123);

        let aggregate = ScoreAggregate::new(&score, None).unwrap();

        assert!(!aggregate.is_lazer());
        assert_eq!(
            aggregate
                .full_combo_statistics()
                .get(HitResult::SliderTailHit),
            0
        );
    }

    #[test]
    fn full_combo_taiko_and_mania() {
        let taiko = ScoreAggregate::new(&score(1, &[("great", 95), ("miss", 5)]), None).unwrap();
        assert_eq!(taiko.full_combo_statistics().get(HitResult::Great), 100);

        let mania = ScoreAggregate::new(&score(3, &[("perfect", 95), ("miss", 5)]), None).unwrap();
        assert_eq!(mania.full_combo_statistics().get(HitResult::Miss), 5);
        assert_eq!(mania.maximum_statistics().get(HitResult::Perfect), 100);
    }

    #[test]
    fn fallback_counts() {
        let aggregate = ScoreAggregate::new(
            &score(0, &[("great", 90), ("ok", 10), ("large_tick_hit", 7), ("large_tick_miss", 1)]),
            None,
        )
        .unwrap();

        assert_eq!(aggregate.map().n_circles, 80);
        assert_eq!(aggregate.maximum_statistics().get(HitResult::Great), 100);
        assert_eq!(aggregate.maximum_statistics().get(HitResult::LargeTickHit), 8);
        assert_eq!(aggregate.max_combo(), 120);
    }

    #[test]
    fn with_mods_updates_attributes() {
        let aggregate = ScoreAggregate::new(&score(0, &[("great", 100)]), None).unwrap();
        let dt = aggregate.with_mods(ModState::from_acronyms(&["DT"]).unwrap());

        assert_eq!(dt.map_attributes().clock_rate, 1.5);
        assert_eq!(aggregate.map_attributes().clock_rate, 1.0);
        assert_eq!(dt.statistics(), aggregate.statistics());
    }
}
