use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter, Result as FmtResult},
};

use rosu_mods::Acronym;
use serde::{Deserialize, Serialize};

use crate::PerformanceError;

pub use self::{
    cache::ModTableCache,
    table::{
        is_mod_compatible, ModCategory, ModDefinition, ModSettingDefinition, ModSettingKind,
        ModTable, RulesetMods,
    },
};

mod cache;
mod table;

/// Setting name of rate adjusting mods.
pub const SPEED_CHANGE: &str = "speed_change";

/// Value of a single mod setting.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModSettingValue {
    Bool(bool),
    Number(f64),
    String(String),
}

impl ModSettingValue {
    /// Returns the value if it's a boolean.
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            Self::Number(_) | Self::String(_) => None,
        }
    }

    /// Returns the value if it's a number.
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Bool(_) | Self::String(_) => None,
        }
    }

    /// Returns the value if it's a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value.as_str()),
            Self::Bool(_) | Self::Number(_) => None,
        }
    }
}

impl From<bool> for ModSettingValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for ModSettingValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for ModSettingValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for ModSettingValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// Settings of a mod, keyed by setting name.
pub type ModSettings = BTreeMap<String, ModSettingValue>;

/// A single applied mod.
#[derive(Clone, Debug, PartialEq)]
pub struct ModEntry {
    acronym: Acronym,
    settings: ModSettings,
}

impl ModEntry {
    /// Create a mod without settings.
    ///
    /// The acronym is case-insensitive and must consist of two or three
    /// characters.
    pub fn new(acronym: &str) -> Result<Self, PerformanceError> {
        let trimmed = acronym.trim();

        let valid = (2..=3).contains(&trimmed.len())
            && trimmed.bytes().all(|byte| byte.is_ascii_alphanumeric());

        if !valid {
            return Err(PerformanceError::InvalidAcronym(acronym.to_owned()));
        }

        let parsed = trimmed
            .to_ascii_uppercase()
            .parse::<Acronym>()
            .map_err(|_| PerformanceError::InvalidAcronym(acronym.to_owned()))?;

        Ok(Self {
            acronym: parsed,
            settings: ModSettings::new(),
        })
    }

    /// Specify a setting.
    #[must_use]
    pub fn with_setting(
        mut self,
        name: impl Into<String>,
        value: impl Into<ModSettingValue>,
    ) -> Self {
        self.settings.insert(name.into(), value.into());

        self
    }

    /// Specify all settings at once.
    #[must_use]
    pub fn with_settings(mut self, settings: ModSettings) -> Self {
        self.settings = settings;

        self
    }

    /// The mod's acronym.
    pub fn acronym(&self) -> &str {
        self.acronym.as_str()
    }

    /// All settings of the mod.
    pub const fn settings(&self) -> &ModSettings {
        &self.settings
    }

    /// The value of a setting, if specified.
    pub fn setting(&self, name: &str) -> Option<&ModSettingValue> {
        self.settings.get(name)
    }

    fn is(&self, acronym: &str) -> bool {
        self.acronym.as_str().eq_ignore_ascii_case(acronym.trim())
    }
}

/// The set of mods applied to a score.
///
/// Acronyms are unique within a [`ModState`] and keep their insertion order.
/// Every mutation re-derives the clock rate.
///
/// # Example
///
/// ```
/// use inspector_pp::model::mods::{ModEntry, ModState};
///
/// let mut mods = ModState::from_acronyms(&["HD", "DT"]).unwrap();
/// assert_eq!(mods.clock_rate(), 1.5);
///
/// mods.set_setting("DT", "speed_change", 1.25);
/// assert_eq!(mods.clock_rate(), 1.25);
///
/// mods.remove_mod("DT");
/// mods.add_mod(ModEntry::new("HT").unwrap());
/// assert_eq!(mods.clock_rate(), 0.75);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ModState {
    mods: Vec<ModEntry>,
    speed_multiplier: f64,
}

impl ModState {
    /// An empty state, i.e. nomod.
    pub const fn new() -> Self {
        Self {
            mods: Vec::new(),
            speed_multiplier: 1.0,
        }
    }

    /// Create a state from mods without settings.
    pub fn from_acronyms(acronyms: &[&str]) -> Result<Self, PerformanceError> {
        acronyms
            .iter()
            .map(|acronym| ModEntry::new(acronym))
            .collect()
    }

    /// Amount of applied mods.
    pub fn len(&self) -> usize {
        self.mods.len()
    }

    /// Whether no mods are applied.
    pub fn is_empty(&self) -> bool {
        self.mods.is_empty()
    }

    /// Iterate over all applied mods.
    pub fn iter(&self) -> impl Iterator<Item = &ModEntry> {
        self.mods.iter()
    }

    /// Iterate over the acronyms of all applied mods.
    pub fn acronyms(&self) -> impl Iterator<Item = &str> {
        self.mods.iter().map(ModEntry::acronym)
    }

    /// The applied mod with the given acronym.
    pub fn get(&self, acronym: &str) -> Option<&ModEntry> {
        self.mods.iter().find(|entry| entry.is(acronym))
    }

    /// Whether the mod is applied.
    pub fn has_mod(&self, acronym: &str) -> bool {
        self.get(acronym).is_some()
    }

    /// Whether all given mods are applied.
    pub fn has_mods(&self, acronyms: &[&str]) -> bool {
        acronyms.iter().all(|acronym| self.has_mod(acronym))
    }

    /// Whether exactly the given mods are applied, ignoring order and
    /// duplicates.
    pub fn has_exact_mods(&self, acronyms: &[&str]) -> bool {
        self.has_mods(acronyms)
            && self.mods.iter().all(|entry| {
                acronyms
                    .iter()
                    .any(|acronym| entry.is(acronym))
            })
    }

    /// Apply a mod.
    ///
    /// Returns `false` and keeps the state unchanged if the acronym was
    /// already applied.
    pub fn add_mod(&mut self, entry: ModEntry) -> bool {
        if self.has_mod(entry.acronym()) {
            return false;
        }

        self.mods.push(entry);
        self.update_speed_multiplier();

        true
    }

    /// Remove a mod, returning it if it was applied.
    pub fn remove_mod(&mut self, acronym: &str) -> Option<ModEntry> {
        let idx = self.mods.iter().position(|entry| entry.is(acronym))?;
        let entry = self.mods.remove(idx);
        self.update_speed_multiplier();

        Some(entry)
    }

    /// Remove the mod if it's applied, otherwise apply it without settings.
    ///
    /// Returns whether the mod is applied afterwards.
    pub fn toggle_mod(&mut self, acronym: &str) -> Result<bool, PerformanceError> {
        if self.remove_mod(acronym).is_some() {
            return Ok(false);
        }

        self.add_mod(ModEntry::new(acronym)?);

        Ok(true)
    }

    /// The value of a mod's setting, if the mod is applied and the setting
    /// specified.
    pub fn setting(&self, acronym: &str, name: &str) -> Option<&ModSettingValue> {
        self.get(acronym).and_then(|entry| entry.setting(name))
    }

    /// Specify a setting of an applied mod.
    ///
    /// Returns `false` if the mod is not applied.
    pub fn set_setting(
        &mut self,
        acronym: &str,
        name: impl Into<String>,
        value: impl Into<ModSettingValue>,
    ) -> bool {
        let Some(entry) = self.mods.iter_mut().find(|entry| entry.is(acronym)) else {
            return false;
        };

        entry.settings.insert(name.into(), value.into());
        self.update_speed_multiplier();

        true
    }

    /// The clock rate of the applied mods.
    ///
    /// 1.5 for DT and NC, 0.75 for HT and DC, unless their `speed_change`
    /// setting specifies otherwise, and 1.0 without rate adjusting mods.
    pub const fn clock_rate(&self) -> f64 {
        self.speed_multiplier
    }

    /// Whether slider heads are judged like regular circles, i.e. whether the
    /// score uses classic slider accuracy.
    pub(crate) fn no_slider_head_acc(&self, lazer: bool) -> bool {
        match self.get("CL") {
            Some(classic) => classic
                .setting("no_slider_head_accuracy")
                .and_then(ModSettingValue::as_bool)
                .unwrap_or(true),
            None => !lazer,
        }
    }

    fn update_speed_multiplier(&mut self) {
        self.speed_multiplier = self
            .mods
            .iter()
            .find_map(|entry| {
                let default = match entry.acronym() {
                    "DT" | "NC" => 1.5,
                    "HT" | "DC" => 0.75,
                    _ => return None,
                };

                let speed_change = entry
                    .setting(SPEED_CHANGE)
                    .and_then(ModSettingValue::as_f64)
                    .filter(|rate| rate.is_finite() && *rate > 0.0);

                Some(speed_change.unwrap_or(default))
            })
            .unwrap_or(1.0);
    }
}

macro_rules! impl_map_attr {
    ( $( $fn:ident: $setting:literal ;)* ) => {
        impl ModState {
            $(
                #[doc = "Check whether the mods specify a custom `"]
                #[doc = $setting]
                #[doc = "` value through difficulty adjust."]
                pub(crate) fn $fn(&self) -> Option<f64> {
                    self.setting("DA", $setting).and_then(ModSettingValue::as_f64)
                }
            )*
        }
    };
}

impl_map_attr! {
    custom_ar: "approach_rate";
    custom_cs: "circle_size";
    custom_hp: "drain_rate";
    custom_od: "overall_difficulty";
}

macro_rules! impl_has_mod {
    ( $( $fn:ident: $acronym:literal [ $s:literal ], )* ) => {
        impl ModState {
            $(
                #[doc = "Check whether [`ModState`] contains `"]
                #[doc = $s]
                #[doc = "`."]
                pub fn $fn(&self) -> bool {
                    self.has_mod($acronym)
                }
            )*
        }
    };
}

impl_has_mod! {
    nf: "NF" ["NoFail"],
    ez: "EZ" ["Easy"],
    td: "TD" ["TouchDevice"],
    hd: "HD" ["Hidden"],
    hr: "HR" ["HardRock"],
    dt: "DT" ["DoubleTime"],
    nc: "NC" ["Nightcore"],
    ht: "HT" ["HalfTime"],
    dc: "DC" ["Daycore"],
    rx: "RX" ["Relax"],
    fl: "FL" ["Flashlight"],
    so: "SO" ["SpunOut"],
    ap: "AP" ["Autopilot"],
    bl: "BL" ["Blinds"],
    tc: "TC" ["Traceable"],
    cl: "CL" ["Classic"],
    da: "DA" ["DifficultyAdjust"],
}

impl Default for ModState {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<ModEntry> for ModState {
    fn from_iter<I: IntoIterator<Item = ModEntry>>(iter: I) -> Self {
        let mut state = Self::new();

        for entry in iter {
            if !state.has_mod(entry.acronym()) {
                state.mods.push(entry);
            }
        }

        state.update_speed_multiplier();

        state
    }
}

impl Display for ModState {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.is_empty() {
            return f.write_str("NM");
        }

        for acronym in self.acronyms() {
            f.write_str(acronym)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_rate_defaults() {
        assert_eq!(ModState::new().clock_rate(), 1.0);
        assert_eq!(ModState::from_acronyms(&["HD", "HR"]).unwrap().clock_rate(), 1.0);
        assert_eq!(ModState::from_acronyms(&["DT"]).unwrap().clock_rate(), 1.5);
        assert_eq!(ModState::from_acronyms(&["NC"]).unwrap().clock_rate(), 1.5);
        assert_eq!(ModState::from_acronyms(&["HT"]).unwrap().clock_rate(), 0.75);
        assert_eq!(ModState::from_acronyms(&["DC"]).unwrap().clock_rate(), 0.75);
    }

    #[test]
    fn clock_rate_follows_mutations() {
        let mut mods = ModState::new();

        assert!(mods.add_mod(ModEntry::new("DT").unwrap()));
        assert_eq!(mods.clock_rate(), 1.5);

        assert!(mods.set_setting("DT", SPEED_CHANGE, 1.25));
        assert_eq!(mods.clock_rate(), 1.25);

        assert!(mods.remove_mod("dt").is_some());
        assert_eq!(mods.clock_rate(), 1.0);

        assert!(mods.toggle_mod("HT").unwrap());
        assert_eq!(mods.clock_rate(), 0.75);

        assert!(!mods.toggle_mod("HT").unwrap());
        assert_eq!(mods.clock_rate(), 1.0);
    }

    #[test]
    fn speed_change_from_construction() {
        let entry = ModEntry::new("HT").unwrap().with_setting(SPEED_CHANGE, 0.6);
        let mods: ModState = [entry].into_iter().collect();

        assert_eq!(mods.clock_rate(), 0.6);
    }

    #[test]
    fn acronyms_stay_unique() {
        let mut mods = ModState::from_acronyms(&["HD", "hd", "DT"]).unwrap();
        assert_eq!(mods.len(), 2);

        assert!(!mods.add_mod(ModEntry::new("DT").unwrap()));
        assert_eq!(mods.len(), 2);
        assert_eq!(mods.to_string(), "HDDT");
    }

    #[test]
    fn queries() {
        let mods = ModState::from_acronyms(&["HD", "DT", "FL"]).unwrap();

        assert!(mods.has_mod("fl"));
        assert!(!mods.has_mod("HR"));
        assert!(mods.has_mods(&["HD", "DT"]));
        assert!(!mods.has_mods(&["HD", "HR"]));
        assert!(mods.has_exact_mods(&["FL", "DT", "HD"]));
        assert!(mods.has_exact_mods(&["FL", "DT", "HD", "DT"]));
        assert!(!mods.has_exact_mods(&["DT", "HD"]));
        assert!(!mods.has_exact_mods(&["DT", "HD", "FL", "HR"]));
        assert!(ModState::new().has_exact_mods(&[]));
    }

    #[test]
    fn settings() {
        let mut mods = ModState::from_acronyms(&["DA"]).unwrap();

        assert!(mods.set_setting("DA", "approach_rate", 9.5));
        assert!(!mods.set_setting("HR", "approach_rate", 9.5));

        assert_eq!(
            mods.setting("DA", "approach_rate"),
            Some(&ModSettingValue::Number(9.5))
        );
        assert_eq!(mods.custom_ar(), Some(9.5));
        assert_eq!(mods.custom_od(), None);
    }

    #[test]
    fn classic_slider_acc() {
        assert!(!ModState::new().no_slider_head_acc(true));
        assert!(ModState::new().no_slider_head_acc(false));

        let mut classic = ModState::from_acronyms(&["CL"]).unwrap();
        assert!(classic.no_slider_head_acc(true));

        classic.set_setting("CL", "no_slider_head_accuracy", false);
        assert!(!classic.no_slider_head_acc(true));
    }

    #[test]
    fn invalid_acronym() {
        assert!(matches!(
            ModEntry::new("TOOLONG"),
            Err(PerformanceError::InvalidAcronym(_))
        ));
    }
}
