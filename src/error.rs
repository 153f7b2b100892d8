use thiserror::Error;

/// Errors that can occur while building a [`ScoreAggregate`].
///
/// [`ScoreAggregate`]: crate::any::ScoreAggregate
#[derive(Debug, Error)]
pub enum PerformanceError {
    /// The ruleset id is none of osu!standard, osu!taiko, osu!catch, or
    /// osu!mania.
    #[error("unsupported ruleset id {0}")]
    UnsupportedRuleset(u32),
    /// A mod acronym could not be parsed.
    #[error("invalid mod acronym `{0}`")]
    InvalidAcronym(String),
    /// The upstream payload was malformed.
    #[error("failed to deserialize upstream data")]
    Json(#[from] serde_json::Error),
}

/// A mod conflicts with another mod of the same [`ModState`].
///
/// Only reported by [`ModTable::validate`], calculators accept any mod
/// combination.
///
/// [`ModState`]: crate::model::mods::ModState
/// [`ModTable::validate`]: crate::model::mods::ModTable::validate
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("mod `{candidate}` is incompatible with `{conflict}`")]
pub struct InvalidModCombination {
    /// The acronym that was checked.
    pub candidate: String,
    /// The acronym it conflicts with.
    pub conflict: String,
}
