pub use self::{
    aggregate::ScoreAggregate,
    attributes::{DifficultyAttributes, PerformanceAttributes},
    hit_result::{HitResult, UnknownHitResult},
    performance::{ComputePerformance, Performance},
    raw::{RawBeatmap, RawDifficultyAttributes, RawMod, RawScore},
    statistics::HitStatistics,
};

pub(crate) use self::performance::finite_or_zero;

mod aggregate;
mod attributes;
mod hit_result;
mod performance;
mod raw;
mod statistics;
