use std::fmt;

/// Whole-number percentage, always within `0..=100`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Percent(u8);

impl Percent {
    /// 0%.
    pub const ZERO: Self = Self(0);
    /// 100%.
    pub const FULL: Self = Self(100);

    /// Returns `None` when `value` is above 100.
    pub fn new(value: u8) -> Option<Self> {
        (value <= 100).then_some(Self(value))
    }

    /// Clamps `value` into range.
    pub fn saturating(value: u8) -> Self {
        Self(value.min(100))
    }

    /// Percentage of `part` in `whole`, rounded to the nearest integer.
    ///
    /// A zero `whole` yields [`Percent::ZERO`].
    pub fn from_ratio(part: u64, whole: u64) -> Self {
        if whole == 0 {
            return Self::ZERO;
        }
        let part = u128::from(part.min(whole));
        let whole = u128::from(whole);
        let rounded = (part * 100 + whole / 2) / whole;
        Self(rounded.min(100) as u8)
    }

    /// Raw value in `0..=100`.
    pub fn value(self) -> u8 {
        self.0
    }

    /// `floor(width * self / 100)`. Never exceeds `width`.
    pub fn of(self, width: u32) -> u32 {
        (u64::from(width) * u64::from(self.0) / 100) as u32
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
