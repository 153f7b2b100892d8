use rosu_map::section::general::GameMode;

pub use self::attributes::{BeatmapAttributes, BeatmapAttributesBuilder, HitWindows};

mod attributes;

/// Base difficulty values and object counts of a beatmap.
///
/// Values are the ones set by the mapper, i.e. without any mods applied.
#[derive(Clone, Debug, PartialEq)]
pub struct Beatmap {
    /// The ruleset the beatmap was created for.
    pub mode: GameMode,
    /// The approach rate.
    pub ar: f32,
    /// The circle size.
    pub cs: f32,
    /// The overall difficulty.
    pub od: f32,
    /// The health drain rate.
    pub hp: f32,
    /// The amount of circles.
    pub n_circles: u32,
    /// The amount of sliders.
    pub n_sliders: u32,
    /// The amount of spinners.
    pub n_spinners: u32,
    /// The maximum achievable combo.
    pub max_combo: u32,
}

impl Beatmap {
    /// The amount of hitobjects.
    pub const fn n_objects(&self) -> u32 {
        self.n_circles
            .saturating_add(self.n_sliders)
            .saturating_add(self.n_spinners)
    }

    /// Whether the beatmap is played as a convert in the given ruleset.
    pub fn is_convert(&self, mode: GameMode) -> bool {
        self.mode != mode
    }

    /// A [`BeatmapAttributesBuilder`] to calculate mod-adjusted values.
    pub fn attributes(&self) -> BeatmapAttributesBuilder {
        BeatmapAttributesBuilder::new().map(self)
    }
}

impl Default for Beatmap {
    fn default() -> Self {
        Self {
            mode: GameMode::Osu,
            ar: 5.0,
            cs: 5.0,
            od: 5.0,
            hp: 5.0,
            n_circles: 0,
            n_sliders: 0,
            n_spinners: 0,
            max_combo: 0,
        }
    }
}
