use serde::Serialize;

/// The result of a performance calculation on an osu!catch map.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CatchPerformanceAttributes {
    /// The final star rating.
    pub stars: f64,
    /// The final performance points.
    pub pp: f64,
}

impl CatchPerformanceAttributes {
    /// Return the star value.
    pub const fn stars(&self) -> f64 {
        self.stars
    }

    /// Return the performance point value.
    pub const fn pp(&self) -> f64 {
        self.pp
    }
}
