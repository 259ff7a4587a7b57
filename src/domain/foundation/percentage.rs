//! Percentage value object (0-100 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A value between 0 and 100 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(u8);

impl Percentage {
    /// Zero percent.
    pub const ZERO: Self = Self(0);

    /// One hundred percent.
    pub const HUNDRED: Self = Self(100);

    /// Creates a new Percentage, clamping to valid range.
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// Share of `part` in `whole`, rounded to the nearest whole percent.
    ///
    /// Returns `None` when `whole` is zero, since the share is undefined.
    pub fn from_ratio(part: u64, whole: u64) -> Option<Self> {
        if whole == 0 {
            return None;
        }
        let part = u128::from(part.min(whole));
        let whole = u128::from(whole);
        let rounded = (part * 200 + whole) / (whole * 2);
        Some(Self::new(u8::try_from(rounded).unwrap_or(100)))
    }

    /// Returns the value as u8.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn percentage_new_clamps_to_100() {
        assert_eq!(Percentage::new(101).value(), 100);
        assert_eq!(Percentage::new(255).value(), 100);
    }

    #[test]
    fn from_ratio_is_undefined_for_empty_whole() {
        assert_eq!(Percentage::from_ratio(0, 0), None);
    }

    #[test]
    fn from_ratio_rounds_to_nearest() {
        assert_eq!(Percentage::from_ratio(15, 18), Some(Percentage::new(83)));
        assert_eq!(Percentage::from_ratio(8, 20), Some(Percentage::new(40)));
        assert_eq!(Percentage::from_ratio(1, 3), Some(Percentage::new(33)));
        assert_eq!(Percentage::from_ratio(2, 3), Some(Percentage::new(67)));
        assert_eq!(Percentage::from_ratio(5, 5), Some(Percentage::HUNDRED));
    }

    #[test]
    fn percentage_displays_with_percent_sign() {
        assert_eq!(format!("{}", Percentage::new(75)), "75%");
    }

    proptest! {
        #[test]
        fn from_ratio_stays_in_range(part in 0u64..u64::MAX, whole in 1u64..u64::MAX) {
            let pct = Percentage::from_ratio(part, whole).unwrap();
            prop_assert!(pct.value() <= 100);
        }
    }
}
