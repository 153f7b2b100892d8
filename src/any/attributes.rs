use rosu_map::section::general::GameMode;
use serde::Serialize;

use crate::{
    catch::CatchPerformanceAttributes, mania::ManiaPerformanceAttributes,
    osu::OsuPerformanceAttributes, taiko::TaikoPerformanceAttributes,
};

use super::RawDifficultyAttributes;

/// Precomputed difficulty attributes of a beatmap.
///
/// Only the fields of the score's ruleset are relevant, all others stay `0`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DifficultyAttributes {
    /// The final star rating.
    pub stars: f64,
    /// The maximum combo.
    pub max_combo: u32,
    /// The difficulty of the aim skill.
    pub aim: f64,
    /// The difficulty of the speed skill.
    pub speed: f64,
    /// The difficulty of the flashlight skill.
    pub flashlight: f64,
    /// The ratio of the aim strain with and without considering sliders
    pub slider_factor: f64,
    /// The number of clickable objects weighted by difficulty.
    pub speed_note_count: f64,
    /// The amount of sliders weighted by difficulty.
    pub aim_difficult_slider_count: f64,
    /// Weighted sum of aim strains.
    pub aim_difficult_strain_count: f64,
    /// Weighted sum of speed strains.
    pub speed_difficult_strain_count: f64,
    /// The ratio of stamina difficulty from mono-color streams to total
    /// stamina difficulty.
    pub mono_stamina_factor: f64,
}

impl DifficultyAttributes {
    /// Use the provider's attributes, logging a warning if there are none.
    pub fn from_raw(raw: Option<&RawDifficultyAttributes>) -> Self {
        let Some(raw) = raw else {
            tracing::warn!("Missing difficulty attributes, using zeros");

            return Self::default();
        };

        if raw.star_rating.is_none() {
            tracing::warn!("Missing star rating in difficulty attributes, using zero");
        }

        Self {
            stars: raw.star_rating.unwrap_or(0.0),
            max_combo: raw.max_combo.unwrap_or(0),
            aim: raw.aim_difficulty.unwrap_or(0.0),
            speed: raw.speed_difficulty.unwrap_or(0.0),
            flashlight: raw.flashlight_difficulty.unwrap_or(0.0),
            slider_factor: raw.slider_factor.unwrap_or(0.0),
            speed_note_count: raw.speed_note_count.unwrap_or(0.0),
            aim_difficult_slider_count: raw.aim_difficult_slider_count.unwrap_or(0.0),
            aim_difficult_strain_count: raw.aim_difficult_strain_count.unwrap_or(0.0),
            speed_difficult_strain_count: raw.speed_difficult_strain_count.unwrap_or(0.0),
            mono_stamina_factor: raw.mono_stamina_factor.unwrap_or(0.0),
        }
    }
}

/// The result of a performance calculation.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "ruleset", rename_all = "lowercase")]
pub enum PerformanceAttributes {
    /// osu!standard performance attributes
    Osu(OsuPerformanceAttributes),
    /// osu!taiko performance attributes
    Taiko(TaikoPerformanceAttributes),
    /// osu!catch performance attributes
    Catch(CatchPerformanceAttributes),
    /// osu!mania performance attributes
    Mania(ManiaPerformanceAttributes),
}

impl PerformanceAttributes {
    /// The pp value.
    pub const fn pp(&self) -> f64 {
        match self {
            Self::Osu(attrs) => attrs.pp,
            Self::Taiko(attrs) => attrs.pp,
            Self::Catch(attrs) => attrs.pp,
            Self::Mania(attrs) => attrs.pp,
        }
    }

    /// The ruleset of the calculation.
    pub const fn mode(&self) -> GameMode {
        match self {
            Self::Osu(_) => GameMode::Osu,
            Self::Taiko(_) => GameMode::Taiko,
            Self::Catch(_) => GameMode::Catch,
            Self::Mania(_) => GameMode::Mania,
        }
    }

    /// The named portions of the total pp value.
    pub fn components(&self) -> Vec<(&'static str, f64)> {
        match self {
            Self::Osu(attrs) => vec![
                ("aim", attrs.pp_aim),
                ("speed", attrs.pp_speed),
                ("accuracy", attrs.pp_acc),
                ("flashlight", attrs.pp_flashlight),
            ],
            Self::Taiko(attrs) => vec![
                ("difficulty", attrs.pp_difficulty),
                ("accuracy", attrs.pp_acc),
            ],
            Self::Catch(attrs) => vec![("total", attrs.pp)],
            Self::Mania(attrs) => vec![("difficulty", attrs.pp_difficulty)],
        }
    }
}

impl From<OsuPerformanceAttributes> for PerformanceAttributes {
    fn from(attributes: OsuPerformanceAttributes) -> Self {
        Self::Osu(attributes)
    }
}

impl From<TaikoPerformanceAttributes> for PerformanceAttributes {
    fn from(attributes: TaikoPerformanceAttributes) -> Self {
        Self::Taiko(attributes)
    }
}

impl From<CatchPerformanceAttributes> for PerformanceAttributes {
    fn from(attributes: CatchPerformanceAttributes) -> Self {
        Self::Catch(attributes)
    }
}

impl From<ManiaPerformanceAttributes> for PerformanceAttributes {
    fn from(attributes: ManiaPerformanceAttributes) -> Self {
        Self::Mania(attributes)
    }
}
