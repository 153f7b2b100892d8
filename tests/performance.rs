use std::panic::{self, UnwindSafe};

use inspector_pp::{
    any::{HitResult, HitStatistics},
    catch::CatchPerformanceAttributes,
    mania::ManiaPerformanceAttributes,
    osu::PERFORMANCE_BASE_MULTIPLIER,
    PerformanceAttributes, PerformanceError, ScoreAggregate,
};
use proptest::prelude::*;

use self::common::*;

mod common;

macro_rules! test_cases {
    ( $mode:ident: $score:ident, $attrs:ident {
        $( $( $mods:ident )+ => {
            $( $key:ident: $value:expr $( , )? )*
        } ;)*
    } ) => {
        let aggregate = common::aggregate(common::$score, common::$attrs);

        $(
            let acronyms = [$( stringify!($mods) ),+];
            let expected = test_cases!(@$mode { $( $key: $value, )* });
            let actual = aggregate.with_mods(mods(&acronyms)).performance().calculate();
            run(&actual, &expected, &acronyms);
        )*
    };
    ( @Catch {
        pp: $pp:expr,
    }) => {
        PerformanceAttributes::Catch(CatchPerformanceAttributes {
            pp: $pp,
            ..Default::default()
        })
    };
    ( @Mania {
        pp: $pp:expr,
        pp_difficulty: $pp_difficulty:expr,
    }) => {
        PerformanceAttributes::Mania(ManiaPerformanceAttributes {
            pp: $pp,
            pp_difficulty: $pp_difficulty,
            ..Default::default()
        })
    };
}

fn run<A>(actual: &A, expected: &A, mods: &[&str])
where
    A: AssertEq,
    for<'a> &'a A: UnwindSafe,
{
    if panic::catch_unwind(|| actual.assert_eq(expected)).is_err() {
        panic!("Mods: {mods:?}");
    }
}

#[test]
fn basic_catch() {
    let base = (5.0 * (5.0_f64 / 0.0049) - 4.0).powf(2.0) / 100_000.0;
    let len_bonus = 0.95 + 0.3 * (1205.0 / 2500.0);
    let combo_scaling = 900.0_f64.powf(0.35) / 1210.0_f64.powf(0.35);
    let acc_scaling = (1500.0_f64 / 1515.0).powf(5.5);
    let nm = base * len_bonus * 0.97_f64.powf(5.0) * combo_scaling * acc_scaling;

    // Clock rate shortens the preempt to 400ms
    let dt_ar = 800.0 / 150.0 + 5.0;
    let dt_ar_factor = 1.0 + 0.1 * (dt_ar - 9.0) + 0.1 * (dt_ar - 10.0);

    test_cases! {
        Catch: CATCH_SCORE, CATCH_ATTRS {
            NM => { pp: nm };
            HD => { pp: nm * 1.125 };
            HD HR => { pp: nm * 1.1 * 1.05 };
            DT => { pp: nm * dt_ar_factor };
            FL => { pp: nm * 1.35 * len_bonus };
            NF => { pp: nm * 0.9 };
        }
    };
}

#[test]
fn basic_mania() {
    let custom_acc = 45_650.0 / 48_000.0;
    let nm = 8.0 * 4.85_f64.powf(2.2) * (5.0 * custom_acc - 4.0) * 1.1;

    test_cases! {
        Mania: MANIA_SCORE, MANIA_ATTRS {
            NM => { pp: nm, pp_difficulty: nm };
            NF => { pp: nm * 0.75, pp_difficulty: nm };
            EZ => { pp: nm * 0.5, pp_difficulty: nm };
            NF EZ => { pp: nm * 0.375, pp_difficulty: nm };
            DT => { pp: nm, pp_difficulty: nm };
        }
    };
}

#[test]
fn osu_components_add_up() {
    let aggregate = aggregate(OSU_SCORE, OSU_ATTRS);

    let mod_sets: [&[&str]; 5] = [&["NM"], &["HD"], &["HR"], &["DT"], &["HD", "FL"]];

    for acronyms in mod_sets {
        let attrs = aggregate.with_mods(mods(acronyms)).performance().calculate();

        let PerformanceAttributes::Osu(ref osu) = attrs else {
            panic!("expected osu!standard attributes");
        };

        let expected = (osu.pp_aim.powf(1.1)
            + osu.pp_speed.powf(1.1)
            + osu.pp_acc.powf(1.1)
            + osu.pp_flashlight.powf(1.1))
        .powf(1.0 / 1.1)
            * PERFORMANCE_BASE_MULTIPLIER;

        assert!(osu.pp > 0.0, "{acronyms:?}");
        assert!(osu.pp.is_finite(), "{acronyms:?}");
        assert_eq_float(osu.pp, expected);
        assert_eq!(osu.pp_flashlight > 0.0, acronyms.contains(&"FL"));
        assert!(osu.speed_deviation.is_some_and(|deviation| deviation > 0.0));
    }
}

#[test]
fn osu_effective_miss_count() {
    let attrs = aggregate(OSU_SCORE, OSU_ATTRS).performance().calculate();

    let PerformanceAttributes::Osu(osu) = attrs else {
        panic!("expected osu!standard attributes");
    };

    // Combo breaks are capped by misses plus large tick misses
    assert_eq_float(osu.effective_miss_count, 3.0);
}

#[test]
fn osu_ok_turned_miss_loses_pp() {
    let aggregate = aggregate(OSU_SCORE, OSU_ATTRS);

    let worse = aggregate
        .statistics()
        .with(HitResult::Ok, 14)
        .with(HitResult::Miss, 4);

    let actual = aggregate.performance().calculate();
    let with_miss = aggregate.performance().statistics(worse).calculate();

    assert!(with_miss.pp() < actual.pp());
}

#[test]
fn osu_end_to_end() {
    let score = r#"{
        "ruleset_id": 0,
        "statistics": { "great": 995, "ok": 5, "meh": 0, "miss": 0 },
        "max_combo": 1000,
        "build_id": 7500,
        "beatmap": { "ar": 9, "cs": 4, "accuracy": 8, "drain": 5, "count_sliders": 200, "max_combo": 1000 }
    }"#;

    let attrs = r#"{ "star_rating": 6.0, "aim_difficulty": 3.0, "speed_difficulty": 3.0 }"#;

    let aggregate = ScoreAggregate::from_json(score, Some(attrs)).unwrap();
    let actual = aggregate.performance().calculate().pp();

    assert!(actual > 0.0);
    assert!(actual.is_finite());

    let misses = aggregate
        .statistics()
        .with(HitResult::Ok, 0)
        .with(HitResult::Miss, 5);

    let with_misses = aggregate.performance().statistics(misses).calculate().pp();

    assert!(with_misses < actual);
}

#[test]
fn osu_full_combo() {
    let aggregate = with_statistics(
        OSU_SCORE,
        OSU_ATTRS,
        &[("great", 95), ("miss", 5)],
    );

    let full_combo = aggregate.full_combo_statistics();

    assert_eq!(full_combo.get(HitResult::Great), 100);
    assert_eq!(full_combo.get(HitResult::Miss), 0);
    assert_eq!(full_combo.get(HitResult::SliderTailHit), 200);
    assert_eq!(full_combo.max_combo, 1000);

    let actual = aggregate.performance().calculate();
    let if_fc = aggregate.performance().statistics(*full_combo).calculate();

    assert!(if_fc.pp() > actual.pp());
}

#[test]
fn osu_mods_toggle_components() {
    let aggregate = aggregate(OSU_SCORE, OSU_ATTRS);

    let components = |acronyms: &[&str]| {
        aggregate
            .with_mods(mods(acronyms))
            .performance()
            .calculate()
            .components()
    };

    let relax = components(&["RX"][..]);
    assert_eq_float(relax[1].1, 0.0);
    assert_eq_float(relax[2].1, 0.0);

    let autopilot = components(&["AP"][..]);
    assert_eq_float(autopilot[0].1, 0.0);

    let nomod = aggregate.performance().calculate().pp();
    let hidden = aggregate.with_mods(mods(&["HD"])).performance().calculate().pp();

    assert!(hidden > nomod);
}

#[test]
fn osu_lazer_override() {
    let aggregate = aggregate(OSU_SCORE, OSU_ATTRS);

    let lazer = aggregate.performance().calculate();
    let stable = aggregate.performance().lazer(false).calculate();

    assert!(aggregate.is_lazer());
    assert_ne!(lazer, stable);
}

#[test]
fn osu_combo_override() {
    let aggregate = aggregate(OSU_SCORE, OSU_ATTRS);

    let broken = aggregate.performance().combo(100).calculate();
    let actual = aggregate.performance().calculate();

    assert!(broken.pp() < actual.pp());
}

#[test]
fn perfect_accuracy() {
    let aggregate = with_statistics(
        OSU_SCORE,
        OSU_ATTRS,
        &[("great", 800), ("slider_tail_hit", 200), ("large_tick_hit", 57)],
    );

    assert_eq_float(aggregate.accuracy(), 1.0);
}

#[test]
fn taiko_unstable_rate() {
    let aggregate = aggregate(TAIKO_SCORE, TAIKO_ATTRS);

    let unstable_rate = |acronyms: &[&str]| {
        let attrs = aggregate.with_mods(mods(acronyms)).performance().calculate();

        let PerformanceAttributes::Taiko(taiko) = attrs else {
            panic!("expected osu!taiko attributes");
        };

        taiko.estimated_unstable_rate.unwrap()
    };

    let nomod = unstable_rate(&["NM"][..]);

    assert!(unstable_rate(&["HR"][..]) < nomod);
    assert_eq_float(unstable_rate(&["DT"][..]), nomod / 1.5);
    assert_eq_float(unstable_rate(&["HD"][..]), nomod);
}

#[test]
fn taiko_hidden_on_converts() {
    let native = aggregate(TAIKO_SCORE, TAIKO_ATTRS).with_mods(mods(&["HD"]));
    let convert = aggregate(&TAIKO_SCORE.replace(r#""taiko""#, r#""osu""#), TAIKO_ATTRS)
        .with_mods(mods(&["HD"]));

    assert!(!native.is_convert());
    assert!(convert.is_convert());

    let native = native.performance().calculate().pp();
    let convert = convert.performance().calculate().pp();

    assert_eq_float(native / convert, 1.075);
}

#[test]
fn custom_clock_rate() {
    let score = OSU_SCORE.replace(
        r#""mods": []"#,
        r#""mods": [{ "acronym": "DT", "settings": { "speed_change": 1.3 } }]"#,
    );

    let aggregate = aggregate(&score, OSU_ATTRS);

    assert_eq_float(aggregate.map_attributes().clock_rate, 1.3);
    assert!(aggregate.map_attributes().rate_adjusted_ar() > 9.0);
}

#[test]
fn unsupported_ruleset() {
    let score = OSU_SCORE.replace(r#""ruleset_id": 0"#, r#""ruleset_id": 7"#);

    let err = ScoreAggregate::from_json(&score, Some(OSU_ATTRS)).unwrap_err();

    assert!(matches!(err, PerformanceError::UnsupportedRuleset(7)));
}

#[test]
fn missing_attributes_yield_zero_stars() {
    let aggregate = ScoreAggregate::from_json(MANIA_SCORE, None).unwrap();

    assert_eq_float(aggregate.difficulty().stars, 0.0);

    let pp = aggregate.performance().calculate().pp();

    assert!(pp.is_finite());
    assert!(pp >= 0.0);
}

#[test]
fn serialize_attributes() {
    let attrs = aggregate(MANIA_SCORE, MANIA_ATTRS).performance().calculate();
    let value = serde_json::to_value(&attrs).unwrap();

    assert_eq!(value["ruleset"], "mania");
    assert!(value["pp"].as_f64().is_some_and(|pp| pp > 0.0));
}

fn fixtures() -> [(&'static str, &'static str); 4] {
    [
        (OSU_SCORE, OSU_ATTRS),
        (TAIKO_SCORE, TAIKO_ATTRS),
        (CATCH_SCORE, CATCH_ATTRS),
        (MANIA_SCORE, MANIA_ATTRS),
    ]
}

proptest! {
    #[test]
    fn no_hits_no_pp(
        ruleset in 0_usize..4,
        combo in 0_u32..2000,
        hidden: bool,
        hard_rock: bool,
    ) {
        let (score, attrs) = fixtures()[ruleset];
        let aggregate = with_statistics(score, attrs, &[]);

        let mut acronyms = vec!["NM"];

        if hidden {
            acronyms.push("HD");
        }

        if hard_rock {
            acronyms.push("HR");
        }

        let statistics = HitStatistics::new().with_max_combo(combo);

        let attrs = aggregate
            .with_mods(mods(&acronyms))
            .performance()
            .statistics(statistics)
            .calculate();

        prop_assert_eq!(attrs.pp(), 0.0);
    }

    #[test]
    fn osu_fewer_misses_never_lose_pp(misses in 0_u32..60, recovered in 0_u32..60) {
        let recovered = recovered.min(misses);
        let aggregate = aggregate(OSU_SCORE, OSU_ATTRS);

        let statistics = |misses: u32| {
            aggregate
                .statistics()
                .with(HitResult::Great, 797 - misses)
                .with(HitResult::Meh, 0)
                .with(HitResult::Ok, 0)
                .with(HitResult::Miss, misses)
        };

        let before = aggregate.performance().statistics(statistics(misses)).calculate();
        let after = aggregate
            .performance()
            .statistics(statistics(misses - recovered))
            .calculate();

        prop_assert!(after.pp() >= before.pp() - 1e-9);
    }

    #[test]
    fn taiko_fewer_misses_never_lose_pp(misses in 0_u32..200, recovered in 0_u32..200) {
        let recovered = recovered.min(misses);
        let aggregate = aggregate(TAIKO_SCORE, TAIKO_ATTRS);

        let statistics = |misses: u32| {
            aggregate
                .statistics()
                .with(HitResult::Great, 1120 - misses)
                .with(HitResult::Miss, misses)
        };

        let before = aggregate.performance().statistics(statistics(misses)).calculate();
        let after = aggregate
            .performance()
            .statistics(statistics(misses - recovered))
            .calculate();

        prop_assert!(after.pp() >= before.pp() - 1e-9);
    }

    #[test]
    fn pp_is_finite_and_non_negative(
        ruleset in 0_usize..4,
        great in 0_u32..1500,
        ok in 0_u32..300,
        miss in 0_u32..300,
        combo in 0_u32..1500,
    ) {
        let (score, attrs) = fixtures()[ruleset];
        let aggregate = aggregate(score, attrs);

        let statistics = HitStatistics::new()
            .with(HitResult::Great, great)
            .with(HitResult::Ok, ok)
            .with(HitResult::Miss, miss)
            .with_max_combo(combo);

        let pp = aggregate.performance().statistics(statistics).calculate().pp();

        prop_assert!(pp.is_finite());
        prop_assert!(pp >= 0.0);
    }
}
