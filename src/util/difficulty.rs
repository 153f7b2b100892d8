pub fn reverse_lerp(x: f64, start: f64, end: f64) -> f64 {
    f64::clamp((x - start) / (end - start), 0.0, 1.0)
}

pub fn norm<const N: usize>(p: f64, values: [f64; N]) -> f64 {
    values
        .into_iter()
        .map(|x| f64::powf(x, p))
        .sum::<f64>()
        .powf(p.recip())
}

/// Maps a difficulty value onto the range `min..max` with `mid` at 5.
pub fn difficulty_range(difficulty: f64, min: f64, mid: f64, max: f64) -> f64 {
    if difficulty > 5.0 {
        mid + (max - mid) * (difficulty - 5.0) / 5.0
    } else if difficulty < 5.0 {
        mid - (mid - min) * (5.0 - difficulty) / 5.0
    } else {
        mid
    }
}

/// Inverse of [`difficulty_range`] for ranges that decrease with difficulty.
pub fn inverse_difficulty_range(value: f64, min: f64, mid: f64, max: f64) -> f64 {
    if value < mid {
        5.0 + 5.0 * (mid - value) / (mid - max)
    } else {
        5.0 - 5.0 * (value - mid) / (min - mid)
    }
}

/// The skill curve shared by osu!standard's aim and speed skills.
pub fn difficulty_to_performance(difficulty: f64) -> f64 {
    f64::powf(5.0 * f64::max(1.0, difficulty / 0.0675) - 4.0, 3.0) / 100_000.0
}

/// A one-sided 99% lower confidence bound on the proportion `p` of `n` trials
/// through the Wilson score interval.
pub fn wilson_lower_bound(n: f64, p: f64) -> f64 {
    // * 99% critical value for the normal distribution (one-tailed).
    const Z: f64 = 2.326_347_874_04;

    (n * p + Z * Z / 2.0) / (n + Z * Z)
        - Z / (n + Z * Z) * f64::sqrt(n * p * (1.0 - p) + Z * Z / 4.0)
}
