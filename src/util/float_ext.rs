/// Comparisons and interpolation on floats.
pub trait FloatExt: Sized {
    /// Whether `self` and `other` differ by less than machine epsilon.
    fn eq(self, other: Self) -> bool;

    /// Whether `self` and `other` differ by less than `tolerance`.
    fn almost_eq(self, other: Self, tolerance: Self) -> bool;

    /// Linear interpolation from `start` towards `end`.
    fn lerp(start: Self, end: Self, amount: Self) -> Self;
}

impl FloatExt for f64 {
    fn eq(self, other: Self) -> bool {
        self.almost_eq(other, f64::EPSILON)
    }

    fn almost_eq(self, other: Self, tolerance: Self) -> bool {
        (self - other).abs() < tolerance
    }

    fn lerp(start: Self, end: Self, amount: Self) -> Self {
        start + (end - start) * amount
    }
}
