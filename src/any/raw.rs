use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{model::mods::ModSettings, PerformanceError};

/// A score record as delivered by upstream.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawScore {
    pub ruleset_id: u32,
    #[serde(default)]
    pub mods: Vec<RawMod>,
    #[serde(default)]
    pub statistics: BTreeMap<String, u32>,
    #[serde(default)]
    pub maximum_statistics: BTreeMap<String, u32>,
    #[serde(default)]
    pub max_combo: u32,
    #[serde(default)]
    pub accuracy: Option<f64>,
    #[serde(default)]
    pub build_id: Option<u32>,
    #[serde(default)]
    pub legacy_score_id: Option<u64>,
    #[serde(default)]
    pub beatmap: RawBeatmap,
}

/// A mod as delivered by upstream, either a bare acronym or an acronym with
/// settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawMod {
    Acronym(String),
    Detailed {
        acronym: String,
        #[serde(default)]
        settings: ModSettings,
    },
}

impl RawMod {
    pub fn acronym(&self) -> &str {
        match self {
            Self::Acronym(acronym) | Self::Detailed { acronym, .. } => acronym,
        }
    }
}

/// The beatmap reference of a [`RawScore`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawBeatmap {
    /// Short name of the ruleset the beatmap was created for.
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default = "default_attribute")]
    pub ar: f32,
    #[serde(default = "default_attribute")]
    pub cs: f32,
    /// The overall difficulty.
    #[serde(default = "default_attribute")]
    pub accuracy: f32,
    /// The health drain rate.
    #[serde(default = "default_attribute")]
    pub drain: f32,
    #[serde(default)]
    pub count_circles: Option<u32>,
    #[serde(default)]
    pub count_sliders: u32,
    #[serde(default)]
    pub count_spinners: u32,
    #[serde(default)]
    pub max_combo: Option<u32>,
}

const fn default_attribute() -> f32 {
    5.0
}

impl Default for RawBeatmap {
    fn default() -> Self {
        Self {
            mode: None,
            ar: default_attribute(),
            cs: default_attribute(),
            accuracy: default_attribute(),
            drain: default_attribute(),
            count_circles: None,
            count_sliders: 0,
            count_spinners: 0,
            max_combo: None,
        }
    }
}

/// Precomputed difficulty attributes as delivered by an external provider.
///
/// Every field is optional, missing values are treated as `0`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDifficultyAttributes {
    pub star_rating: Option<f64>,
    pub max_combo: Option<u32>,
    pub aim_difficulty: Option<f64>,
    pub speed_difficulty: Option<f64>,
    pub speed_note_count: Option<f64>,
    pub flashlight_difficulty: Option<f64>,
    pub slider_factor: Option<f64>,
    pub aim_difficult_slider_count: Option<f64>,
    pub aim_difficult_strain_count: Option<f64>,
    pub speed_difficult_strain_count: Option<f64>,
    pub mono_stamina_factor: Option<f64>,
}

impl RawScore {
    /// Deserialize a score record.
    pub fn from_json(json: &str) -> Result<Self, PerformanceError> {
        serde_json::from_str(json).map_err(PerformanceError::from)
    }
}

impl RawDifficultyAttributes {
    /// Deserialize difficulty attributes.
    ///
    /// Accepts both the bare attributes and an object wrapping them in an
    /// `attributes` field.
    pub fn from_json(json: &str) -> Result<Self, PerformanceError> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Payload {
            Wrapped { attributes: RawDifficultyAttributes },
            Bare(RawDifficultyAttributes),
        }

        match serde_json::from_str(json)? {
            Payload::Wrapped { attributes } | Payload::Bare(attributes) => Ok(attributes),
        }
    }
}
