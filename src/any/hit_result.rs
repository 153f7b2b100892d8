use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use thiserror::Error;

/// Judgement kinds as tracked by osu!lazer score statistics.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HitResult {
    None,
    Miss,
    Meh,
    Ok,
    Good,
    Great,
    Perfect,
    SmallTickMiss,
    SmallTickHit,
    LargeTickMiss,
    LargeTickHit,
    SmallBonus,
    LargeBonus,
    IgnoreMiss,
    IgnoreHit,
    ComboBreak,
    SliderTailHit,
    LegacyComboIncrease,
}

impl HitResult {
    /// The amount of variants.
    pub const COUNT: usize = 18;

    /// All variants in declaration order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::None,
        Self::Miss,
        Self::Meh,
        Self::Ok,
        Self::Good,
        Self::Great,
        Self::Perfect,
        Self::SmallTickMiss,
        Self::SmallTickHit,
        Self::LargeTickMiss,
        Self::LargeTickHit,
        Self::SmallBonus,
        Self::LargeBonus,
        Self::IgnoreMiss,
        Self::IgnoreHit,
        Self::ComboBreak,
        Self::SliderTailHit,
        Self::LegacyComboIncrease,
    ];

    /// The score awarded for a single judgement of this kind.
    pub const fn base_score(self) -> u32 {
        match self {
            Self::SmallTickHit => 10,
            Self::LargeTickHit => 30,
            Self::SliderTailHit => 150,
            Self::Meh => 50,
            Self::Ok => 100,
            Self::Good => 200,
            // * Perfect doesn't actually give more score / accuracy directly
            Self::Great | Self::Perfect => 300,
            Self::SmallBonus => 10,
            Self::LargeBonus => 50,
            _ => 0,
        }
    }

    /// Whether the judgement is considered for accuracy.
    ///
    /// Combo-only, bonus, and ignored kinds are not.
    pub const fn affects_accuracy(self) -> bool {
        matches!(
            self,
            Self::Miss
                | Self::Meh
                | Self::Ok
                | Self::Good
                | Self::Great
                | Self::Perfect
                | Self::SmallTickMiss
                | Self::SmallTickHit
                | Self::LargeTickMiss
                | Self::LargeTickHit
                | Self::SliderTailHit
        )
    }

    /// Whether the judgement is a bonus.
    pub const fn is_bonus(self) -> bool {
        matches!(self, Self::SmallBonus | Self::LargeBonus)
    }

    /// The name as used by upstream score statistics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Miss => "miss",
            Self::Meh => "meh",
            Self::Ok => "ok",
            Self::Good => "good",
            Self::Great => "great",
            Self::Perfect => "perfect",
            Self::SmallTickMiss => "small_tick_miss",
            Self::SmallTickHit => "small_tick_hit",
            Self::LargeTickMiss => "large_tick_miss",
            Self::LargeTickHit => "large_tick_hit",
            Self::SmallBonus => "small_bonus",
            Self::LargeBonus => "large_bonus",
            Self::IgnoreMiss => "ignore_miss",
            Self::IgnoreHit => "ignore_hit",
            Self::ComboBreak => "combo_break",
            Self::SliderTailHit => "slider_tail_hit",
            Self::LegacyComboIncrease => "legacy_combo_increase",
        }
    }

    pub(crate) const fn idx(self) -> usize {
        self as usize
    }
}

/// A statistics key that is no known [`HitResult`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown hit result `{0}`")]
pub struct UnknownHitResult(pub String);

impl FromStr for HitResult {
    type Err = UnknownHitResult;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|result| result.as_str() == s)
            .ok_or_else(|| UnknownHitResult(s.to_owned()))
    }
}

impl Display for HitResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}
