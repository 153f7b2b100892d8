use serde::Serialize;

/// The result of a performance calculation on an osu!taiko map.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TaikoPerformanceAttributes {
    /// The final star rating.
    pub stars: f64,
    /// The final performance points.
    pub pp: f64,
    /// The accuracy portion of the final pp.
    pub pp_acc: f64,
    /// The strain portion of the final pp.
    pub pp_difficulty: f64,
    /// Scaled miss count based on total hits.
    pub effective_miss_count: f64,
    /// Upper bound on the player's tap deviation.
    pub estimated_unstable_rate: Option<f64>,
}

impl TaikoPerformanceAttributes {
    /// Return the star value.
    pub const fn stars(&self) -> f64 {
        self.stars
    }

    /// Return the performance point value.
    pub const fn pp(&self) -> f64 {
        self.pp
    }
}
