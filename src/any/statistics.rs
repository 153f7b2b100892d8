use std::fmt::{Debug, Formatter, Result as FmtResult};

use super::HitResult;

/// Amount of judgements per [`HitResult`] and the achieved combo.
///
/// Kinds that were never set count as `0`.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct HitStatistics {
    counts: [u32; HitResult::COUNT],
    /// The achieved maximum combo.
    pub max_combo: u32,
}

impl HitStatistics {
    /// Statistics without any judgements.
    pub const fn new() -> Self {
        Self {
            counts: [0; HitResult::COUNT],
            max_combo: 0,
        }
    }

    /// The amount of judgements of the given kind.
    pub const fn get(&self, result: HitResult) -> u32 {
        self.counts[result.idx()]
    }

    /// Overwrite the amount of judgements of the given kind.
    pub fn set(&mut self, result: HitResult, count: u32) {
        self.counts[result.idx()] = count;
    }

    /// Add to the amount of judgements of the given kind.
    pub fn add(&mut self, result: HitResult, count: u32) {
        let current = &mut self.counts[result.idx()];
        *current = current.saturating_add(count);
    }

    /// Specify the amount of judgements of the given kind.
    #[must_use]
    pub fn with(mut self, result: HitResult, count: u32) -> Self {
        self.set(result, count);

        self
    }

    /// Specify the achieved maximum combo.
    #[must_use]
    pub const fn with_max_combo(mut self, max_combo: u32) -> Self {
        self.max_combo = max_combo;

        self
    }

    /// Iterate over all kinds with a non-zero amount.
    pub fn iter(&self) -> impl Iterator<Item = (HitResult, u32)> + '_ {
        HitResult::ALL
            .into_iter()
            .map(|result| (result, self.get(result)))
            .filter(|(_, count)| *count > 0)
    }

    /// Whether no judgements are set.
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|count| *count == 0)
    }

    /// Sum of the amounts of the given kinds.
    pub fn sum(&self, results: &[HitResult]) -> u32 {
        results
            .iter()
            .fold(0_u32, |sum, result| sum.saturating_add(self.get(*result)))
    }

    /// Accuracy between `0.0` and `1.0` with respect to the maximum
    /// achievable statistics.
    ///
    /// Returns `1.0` if `maximum` awards no accuracy-relevant score.
    pub fn accuracy(&self, maximum: &Self) -> f64 {
        let score = |statistics: &Self| {
            HitResult::ALL
                .into_iter()
                .filter(|result| result.affects_accuracy())
                .map(|result| f64::from(statistics.get(result)) * f64::from(result.base_score()))
                .sum::<f64>()
        };

        let max_base_score = score(maximum);

        if max_base_score <= 0.0 {
            return 1.0;
        }

        (score(self) / max_base_score).min(1.0)
    }

    pub(crate) fn from_counts<'a, I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, u32)>,
    {
        let mut statistics = Self::new();

        for (key, count) in counts {
            match key.parse::<HitResult>() {
                Ok(result) => statistics.add(result, count),
                Err(err) => tracing::debug!(%err, count, "Ignoring statistics entry"),
            }
        }

        statistics
    }
}

impl Debug for HitStatistics {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let mut map = f.debug_map();

        for (result, count) in self.iter() {
            map.entry(&result.as_str(), &count);
        }

        map.entry(&"max_combo", &self.max_combo).finish()
    }
}

impl FromIterator<(HitResult, u32)> for HitStatistics {
    fn from_iter<T: IntoIterator<Item = (HitResult, u32)>>(iter: T) -> Self {
        let mut statistics = Self::new();

        for (result, count) in iter {
            statistics.add(result, count);
        }

        statistics
    }
}
