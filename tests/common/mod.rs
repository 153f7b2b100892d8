#![allow(dead_code)]

use inspector_pp::{
    any::{RawDifficultyAttributes, RawScore},
    ModState, PerformanceAttributes, ScoreAggregate,
};

pub const OSU_SCORE: &str = r#"{
    "ruleset_id": 0,
    "mods": [],
    "statistics": {
        "great": 780,
        "ok": 15,
        "meh": 2,
        "miss": 3,
        "slider_tail_hit": 190,
        "large_tick_hit": 55,
        "large_tick_miss": 2
    },
    "maximum_statistics": {
        "great": 800,
        "slider_tail_hit": 200,
        "large_tick_hit": 57
    },
    "max_combo": 650,
    "build_id": 7500,
    "beatmap": {
        "mode": "osu",
        "ar": 9,
        "cs": 4,
        "accuracy": 8,
        "drain": 6,
        "count_circles": 600,
        "count_sliders": 200,
        "count_spinners": 0,
        "max_combo": 1000
    }
}"#;

pub const OSU_ATTRS: &str = r#"{
    "attributes": {
        "star_rating": 6.5,
        "max_combo": 1000,
        "aim_difficulty": 3.2,
        "speed_difficulty": 3.0,
        "flashlight_difficulty": 2.5,
        "slider_factor": 0.98,
        "speed_note_count": 420.0,
        "aim_difficult_slider_count": 40.0,
        "aim_difficult_strain_count": 120.0,
        "speed_difficult_strain_count": 100.0
    }
}"#;

pub const TAIKO_SCORE: &str = r#"{
    "ruleset_id": 1,
    "statistics": { "great": 1100, "ok": 80, "miss": 20 },
    "max_combo": 600,
    "build_id": 7500,
    "beatmap": { "mode": "taiko", "accuracy": 5, "drain": 5, "max_combo": 1200 }
}"#;

pub const TAIKO_ATTRS: &str = r#"{
    "star_rating": 4.8,
    "max_combo": 1200,
    "mono_stamina_factor": 0.05
}"#;

pub const CATCH_SCORE: &str = r#"{
    "ruleset_id": 2,
    "statistics": {
        "great": 1000,
        "large_tick_hit": 200,
        "small_tick_hit": 300,
        "small_tick_miss": 10,
        "miss": 5
    },
    "max_combo": 900,
    "build_id": 7500,
    "beatmap": { "ar": 9, "cs": 4, "accuracy": 8, "drain": 5, "max_combo": 1210 }
}"#;

pub const CATCH_ATTRS: &str = r#"{ "star_rating": 5.0, "max_combo": 1210 }"#;

pub const MANIA_SCORE: &str = r#"{
    "ruleset_id": 3,
    "statistics": {
        "perfect": 1200,
        "great": 200,
        "good": 50,
        "ok": 20,
        "meh": 10,
        "miss": 20
    },
    "max_combo": 700,
    "build_id": 7500,
    "beatmap": { "mode": "mania", "accuracy": 8, "drain": 8 }
}"#;

pub const MANIA_ATTRS: &str = r#"{ "star_rating": 5.0 }"#;

pub fn aggregate(score: &str, attrs: &str) -> ScoreAggregate {
    ScoreAggregate::from_json(score, Some(attrs)).unwrap()
}

/// The fixture score with its statistics replaced.
pub fn with_statistics(score: &str, attrs: &str, statistics: &[(&str, u32)]) -> ScoreAggregate {
    let mut score = RawScore::from_json(score).unwrap();

    score.statistics = statistics
        .iter()
        .map(|(key, count)| ((*key).to_owned(), *count))
        .collect();

    let attrs = RawDifficultyAttributes::from_json(attrs).unwrap();

    ScoreAggregate::new(&score, Some(&attrs)).unwrap()
}

/// Mods from acronyms where `NM` stands for no mods.
pub fn mods(acronyms: &[&str]) -> ModState {
    let acronyms: Vec<_> = acronyms
        .iter()
        .copied()
        .filter(|acronym| *acronym != "NM")
        .collect();

    ModState::from_acronyms(&acronyms).unwrap()
}

pub trait AssertEq {
    fn assert_eq(&self, expected: &Self);
}

impl AssertEq for PerformanceAttributes {
    fn assert_eq(&self, expected: &Self) {
        assert_eq!(self.mode(), expected.mode());

        for ((name, actual), (_, expected)) in self.components().into_iter().zip(expected.components()) {
            assert_eq_float_named(name, actual, expected);
        }

        assert_eq_float_named("pp", self.pp(), expected.pp());
    }
}

pub fn assert_eq_float(actual: f64, expected: f64) {
    assert_eq_float_named("value", actual, expected);
}

fn assert_eq_float_named(name: &str, actual: f64, expected: f64) {
    let tolerance = 1e-10 * expected.abs().max(1.0);

    assert!(
        (actual - expected).abs() < tolerance,
        "{name}: expected {expected}, got {actual}",
    );
}
