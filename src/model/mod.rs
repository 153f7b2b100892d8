/// Base beatmap values and their mod-adjusted counterparts.
pub mod beatmap;

/// Applied mods and the upstream mod definitions.
pub mod mods;
