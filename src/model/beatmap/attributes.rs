use rosu_map::section::general::GameMode;

use crate::{
    model::mods::ModState,
    util::difficulty::{difficulty_range, inverse_difficulty_range},
};

use super::Beatmap;

/// Summary struct for a [`Beatmap`]'s mod-adjusted attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct BeatmapAttributes {
    /// The approach rate.
    pub ar: f64,
    /// The overall difficulty.
    pub od: f64,
    /// The circle size.
    pub cs: f64,
    /// The health drain rate
    pub hp: f64,
    /// The clock rate with respect to mods.
    pub clock_rate: f64,
    /// The hit windows for approach rate and overall difficulty.
    pub hit_windows: HitWindows,
    mode: GameMode,
}

/// AR and OD hit windows in milliseconds, adjusted by the clock rate.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HitWindows {
    /// Hit window for approach rate i.e. `TimePreempt`.
    pub ar: f64,
    /// Time to hit a 300 ("Great").
    pub od_great: f64,
    /// Time to hit a 100 ("Ok").
    pub od_ok: f64,
    /// Time to hit a 50 ("Meh").
    ///
    /// `None` for osu!taiko.
    pub od_meh: Option<f64>,
}

impl BeatmapAttributes {
    /// The approach rate as perceived with the clock rate, recovered from the
    /// preempt time.
    pub fn rate_adjusted_ar(&self) -> f64 {
        inverse_difficulty_range(
            self.hit_windows.ar,
            BeatmapAttributesBuilder::PREEMPT_MIN,
            BeatmapAttributesBuilder::PREEMPT_MID,
            BeatmapAttributesBuilder::PREEMPT_MAX,
        )
    }

    /// The overall difficulty as perceived with the clock rate, recovered from
    /// the great hit window.
    ///
    /// For osu!catch and osu!mania the clock rate does not affect the value.
    pub fn rate_adjusted_od(&self) -> f64 {
        match self.mode {
            GameMode::Osu => inverse_difficulty_range(
                self.hit_windows.od_great,
                BeatmapAttributesBuilder::OSU_GREAT_MIN,
                BeatmapAttributesBuilder::OSU_GREAT_MID,
                BeatmapAttributesBuilder::OSU_GREAT_MAX,
            ),
            GameMode::Taiko => inverse_difficulty_range(
                self.hit_windows.od_great,
                BeatmapAttributesBuilder::TAIKO_GREAT_MIN,
                BeatmapAttributesBuilder::TAIKO_GREAT_MID,
                BeatmapAttributesBuilder::TAIKO_GREAT_MAX,
            ),
            GameMode::Catch | GameMode::Mania => self.od,
        }
    }
}

/// A builder for [`BeatmapAttributes`] and [`HitWindows`].
///
/// Base values are never modified in place so building twice yields the same
/// attributes.
///
/// ```
/// use inspector_pp::model::{beatmap::BeatmapAttributesBuilder, mods::ModState};
///
/// let attrs = BeatmapAttributesBuilder::new()
///     .ar(9.0)
///     .mods(ModState::from_acronyms(&["HR"]).unwrap())
///     .build();
///
/// assert_eq!(attrs.ar, 10.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub struct BeatmapAttributesBuilder {
    mode: GameMode,
    ar: f32,
    od: f32,
    cs: f32,
    hp: f32,
    mods: ModState,
    clock_rate: Option<f64>,
}

impl BeatmapAttributesBuilder {
    const PREEMPT_MIN: f64 = 1800.0;
    const PREEMPT_MID: f64 = 1200.0;
    const PREEMPT_MAX: f64 = 450.0;

    const OSU_GREAT_MIN: f64 = 80.0;
    const OSU_GREAT_MID: f64 = 50.0;
    const OSU_GREAT_MAX: f64 = 20.0;

    const OSU_OK: [f64; 3] = [140.0, 100.0, 60.0];
    const OSU_MEH: [f64; 3] = [200.0, 150.0, 100.0];

    const TAIKO_GREAT_MIN: f64 = 50.0;
    const TAIKO_GREAT_MID: f64 = 35.0;
    const TAIKO_GREAT_MAX: f64 = 20.0;

    const TAIKO_OK: [f64; 3] = [120.0, 80.0, 50.0];

    /// Create a new [`BeatmapAttributesBuilder`].
    ///
    /// The mode will be `GameMode::Osu` and attributes are set to `5.0`.
    pub const fn new() -> Self {
        Self {
            mode: GameMode::Osu,
            ar: 5.0,
            od: 5.0,
            cs: 5.0,
            hp: 5.0,
            mods: ModState::new(),
            clock_rate: None,
        }
    }

    /// Use the given [`Beatmap`]'s attributes and mode.
    pub fn map(self, map: &Beatmap) -> Self {
        Self {
            mode: map.mode,
            ar: map.ar,
            od: map.od,
            cs: map.cs,
            hp: map.hp,
            ..self
        }
    }

    /// Specify the base approach rate.
    pub fn ar(self, ar: f32) -> Self {
        Self { ar, ..self }
    }

    /// Specify the base overall difficulty.
    pub fn od(self, od: f32) -> Self {
        Self { od, ..self }
    }

    /// Specify the base circle size.
    pub fn cs(self, cs: f32) -> Self {
        Self { cs, ..self }
    }

    /// Specify the base drain rate.
    pub fn hp(self, hp: f32) -> Self {
        Self { hp, ..self }
    }

    /// Specify the mods.
    pub fn mods(self, mods: ModState) -> Self {
        Self { mods, ..self }
    }

    /// Specify a custom clock rate.
    ///
    /// If none is specified, the clock rate of the mods is used.
    pub fn clock_rate(self, clock_rate: f64) -> Self {
        Self {
            clock_rate: Some(clock_rate),
            ..self
        }
    }

    /// Specify the [`GameMode`] whose hit windows should be used.
    pub fn mode(self, mode: GameMode) -> Self {
        Self { mode, ..self }
    }

    /// Calculate the AR and OD hit windows.
    pub fn hit_windows(&self) -> HitWindows {
        let Adjusted { ar, od, .. } = self.adjusted();

        self.hit_windows_for(ar, od, self.effective_clock_rate())
    }

    /// Calculate the [`BeatmapAttributes`].
    pub fn build(&self) -> BeatmapAttributes {
        let Adjusted { ar, od, cs, hp } = self.adjusted();
        let clock_rate = self.effective_clock_rate();

        BeatmapAttributes {
            ar,
            od,
            cs,
            hp,
            clock_rate,
            hit_windows: self.hit_windows_for(ar, od, clock_rate),
            mode: self.mode,
        }
    }

    fn hit_windows_for(&self, ar: f64, od: f64, clock_rate: f64) -> HitWindows {
        let preempt = difficulty_range(
            ar,
            Self::PREEMPT_MIN,
            Self::PREEMPT_MID,
            Self::PREEMPT_MAX,
        );

        let (great, ok, meh) = match self.mode {
            GameMode::Taiko => {
                let [ok_min, ok_mid, ok_max] = Self::TAIKO_OK;

                (
                    difficulty_range(
                        od,
                        Self::TAIKO_GREAT_MIN,
                        Self::TAIKO_GREAT_MID,
                        Self::TAIKO_GREAT_MAX,
                    ),
                    difficulty_range(od, ok_min, ok_mid, ok_max),
                    None,
                )
            }
            GameMode::Osu | GameMode::Catch | GameMode::Mania => {
                let [ok_min, ok_mid, ok_max] = Self::OSU_OK;
                let [meh_min, meh_mid, meh_max] = Self::OSU_MEH;

                (
                    difficulty_range(
                        od,
                        Self::OSU_GREAT_MIN,
                        Self::OSU_GREAT_MID,
                        Self::OSU_GREAT_MAX,
                    ),
                    difficulty_range(od, ok_min, ok_mid, ok_max),
                    Some(difficulty_range(od, meh_min, meh_mid, meh_max)),
                )
            }
        };

        HitWindows {
            ar: preempt / clock_rate,
            od_great: great / clock_rate,
            od_ok: ok / clock_rate,
            od_meh: meh.map(|meh| meh / clock_rate),
        }
    }

    fn adjusted(&self) -> Adjusted {
        let mods = &self.mods;

        let base = |value: f32, custom: Option<f64>| custom.unwrap_or(f64::from(value));

        let mut ar = base(self.ar, mods.custom_ar());
        let mut od = base(self.od, mods.custom_od());
        let mut cs = base(self.cs, mods.custom_cs());
        let mut hp = base(self.hp, mods.custom_hp());

        if mods.hr() {
            ar = (ar * 1.4).min(10.0);
            od = (od * 1.4).min(10.0);
            hp *= 1.4;
            cs *= 1.3;
        }

        if mods.ez() {
            ar *= 0.5;
            od *= 0.5;
            hp *= 0.5;
            cs *= 0.5;
        }

        Adjusted {
            ar,
            od,
            cs: cs.min(10.0),
            hp: hp.min(10.0),
        }
    }

    fn effective_clock_rate(&self) -> f64 {
        let clock_rate = self.clock_rate.unwrap_or_else(|| self.mods.clock_rate());

        if clock_rate.is_finite() && clock_rate > 0.0 {
            clock_rate
        } else {
            tracing::debug!(clock_rate, "Ignoring invalid clock rate");

            1.0
        }
    }
}

struct Adjusted {
    ar: f64,
    od: f64,
    cs: f64,
    hp: f64,
}

impl From<&Beatmap> for BeatmapAttributesBuilder {
    fn from(map: &Beatmap) -> Self {
        Self::new().map(map)
    }
}

impl Default for BeatmapAttributesBuilder {
    fn default() -> Self {
        Self::new()
    }
}
