use rosu_map::section::general::GameMode;
use serde::{Deserialize, Serialize};

use crate::{
    error::InvalidModCombination, util::ruleset_ext::RulesetExt, PerformanceError,
};

use super::{ModSettingValue, ModState};

/// Point-in-time snapshot of all mod definitions, grouped by ruleset.
///
/// Deserializes from the upstream mods definition document, an array of
/// rulesets each listing their mods.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModTable {
    rulesets: Vec<RulesetMods>,
}

/// All mod definitions of a single ruleset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RulesetMods {
    pub name: String,
    #[serde(rename = "RulesetID")]
    pub ruleset_id: u32,
    #[serde(default)]
    pub mods: Vec<ModDefinition>,
}

/// Definition of a single mod.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModDefinition {
    pub acronym: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "Type", default)]
    pub kind: ModCategory,
    #[serde(default = "default_true")]
    pub user_playable: bool,
    #[serde(default)]
    pub incompatible_mods: Vec<String>,
    #[serde(default)]
    pub settings: Vec<ModSettingDefinition>,
}

/// Category of a mod.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModCategory {
    DifficultyReduction,
    DifficultyIncrease,
    Conversion,
    Automation,
    Fun,
    System,
    #[default]
    #[serde(other)]
    Other,
}

/// Definition of a configurable mod setting.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModSettingDefinition {
    pub name: String,
    #[serde(rename = "Type", default)]
    pub kind: ModSettingKind,
    #[serde(default, alias = "Min")]
    pub min_value: Option<f64>,
    #[serde(default, alias = "Max")]
    pub max_value: Option<f64>,
}

/// Value type of a mod setting.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModSettingKind {
    Boolean,
    Number,
    String,
    #[default]
    #[serde(other)]
    Other,
}

const fn default_true() -> bool {
    true
}

impl ModTable {
    /// Parse the upstream mods definition document.
    pub fn from_json(json: &str) -> Result<Self, PerformanceError> {
        serde_json::from_str(json).map_err(PerformanceError::from)
    }

    /// Parse the upstream mods definition document from bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, PerformanceError> {
        serde_json::from_slice(bytes).map_err(PerformanceError::from)
    }

    /// Build a table from its rulesets.
    pub const fn new(rulesets: Vec<RulesetMods>) -> Self {
        Self { rulesets }
    }

    /// The definitions of a ruleset.
    pub fn ruleset(&self, mode: GameMode) -> Option<&RulesetMods> {
        self.rulesets
            .iter()
            .find(|ruleset| ruleset.ruleset_id == mode.ruleset_id())
            .or_else(|| {
                self.rulesets
                    .iter()
                    .find(|ruleset| ruleset.name == mode.short_name())
            })
    }

    /// The definition of a mod within a ruleset.
    pub fn definition(&self, mode: GameMode, acronym: &str) -> Option<&ModDefinition> {
        self.ruleset(mode)?
            .mods
            .iter()
            .find(|definition| definition.acronym.eq_ignore_ascii_case(acronym.trim()))
    }

    /// Mods that can be selected by users.
    pub fn user_playable(&self, mode: GameMode) -> impl Iterator<Item = &ModDefinition> {
        self.ruleset(mode)
            .into_iter()
            .flat_map(|ruleset| ruleset.mods.iter())
            .filter(|definition| definition.user_playable)
    }

    /// Whether `candidate` can be added to `mods`.
    ///
    /// Always `true` if `mods` is empty or already contains `candidate`.
    /// Acronyms without definition are considered compatible.
    pub fn is_mod_compatible(&self, mods: &ModState, mode: GameMode, candidate: &str) -> bool {
        if mods.is_empty() || mods.has_mod(candidate) {
            return true;
        }

        self.conflict(mods.acronyms(), mode, candidate).is_none()
    }

    /// Check all pairs of mods for incompatibilities and report the first
    /// conflict.
    pub fn validate(&self, mods: &ModState, mode: GameMode) -> Result<(), InvalidModCombination> {
        for (i, candidate) in mods.acronyms().enumerate() {
            let preceding = mods.acronyms().take(i);

            if let Some(conflict) = self.conflict(preceding, mode, candidate) {
                return Err(InvalidModCombination {
                    candidate: candidate.to_owned(),
                    conflict: conflict.to_owned(),
                });
            }
        }

        Ok(())
    }

    fn conflict<'m>(
        &self,
        mut present: impl Iterator<Item = &'m str>,
        mode: GameMode,
        candidate: &str,
    ) -> Option<&'m str> {
        let candidate_definition = self.definition(mode, candidate);

        present.find(|acronym| {
            if acronym.eq_ignore_ascii_case(candidate) {
                return false;
            }

            let excluded_by_candidate = candidate_definition
                .is_some_and(|definition| definition.is_incompatible_with(acronym));

            let excludes_candidate = self
                .definition(mode, acronym)
                .is_some_and(|definition| definition.is_incompatible_with(candidate));

            excluded_by_candidate || excludes_candidate
        })
    }
}

impl ModDefinition {
    /// Whether this mod is mutually exclusive with the given acronym.
    pub fn is_incompatible_with(&self, acronym: &str) -> bool {
        self.incompatible_mods
            .iter()
            .any(|incompatible| incompatible.eq_ignore_ascii_case(acronym.trim()))
    }

    /// The definition of a setting.
    pub fn setting(&self, name: &str) -> Option<&ModSettingDefinition> {
        self.settings.iter().find(|setting| setting.name == name)
    }
}

impl ModSettingDefinition {
    /// Whether the value has the right type and lies within the bounds.
    pub fn accepts(&self, value: &ModSettingValue) -> bool {
        match (self.kind, value) {
            (ModSettingKind::Boolean, ModSettingValue::Bool(_))
            | (ModSettingKind::String, ModSettingValue::String(_))
            | (ModSettingKind::Other, _) => true,
            (ModSettingKind::Number, ModSettingValue::Number(number)) => {
                self.min_value.is_none_or(|min| *number >= min)
                    && self.max_value.is_none_or(|max| *number <= max)
            }
            _ => false,
        }
    }
}

/// Whether `candidate` can be added to `mods` according to `table`.
///
/// See [`ModTable::is_mod_compatible`].
pub fn is_mod_compatible(
    mods: &ModState,
    mode: GameMode,
    candidate: &str,
    table: &ModTable,
) -> bool {
    table.is_mod_compatible(mods, mode, candidate)
}
