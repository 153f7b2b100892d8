use serde::Serialize;

/// The result of a performance calculation on an osu!mania map.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ManiaPerformanceAttributes {
    /// The final star rating.
    pub stars: f64,
    /// The final performance points.
    pub pp: f64,
    /// The difficulty portion of the final pp.
    pub pp_difficulty: f64,
}

impl ManiaPerformanceAttributes {
    /// Return the star value.
    pub const fn stars(&self) -> f64 {
        self.stars
    }

    /// Return the performance point value.
    pub const fn pp(&self) -> f64 {
        self.pp
    }
}
