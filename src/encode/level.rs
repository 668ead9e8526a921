//! Four-level opacity quantization.

/// A 2-bit opacity class. `Transparent` is the darkest input, `Opaque` the
/// brightest.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Level {
    Transparent = 0,
    Low = 1,
    High = 2,
    Opaque = 3,
}

impl Level {
    pub const ALL: [Level; 4] = [Level::Transparent, Level::Low, Level::High, Level::Opaque];

    /// Quantizes an 8-bit intensity: `>= 192` is 3, `>= 128` is 2, `>= 64` is 1.
    #[inline]
    pub fn from_intensity(v: u8) -> Self {
        match v {
            192..=255 => Level::Opaque,
            128..=191 => Level::High,
            64..=127 => Level::Low,
            _ => Level::Transparent,
        }
    }

    /// Numeric value in `0..=3`.
    #[inline]
    pub fn value(self) -> u8 {
        self as u8
    }

    /// The two opacity bits in stream order: high bit first, then low bit.
    #[inline]
    pub fn pattern(self) -> [bool; 2] {
        let v = self.value();
        [v & 0b10 != 0, v & 0b01 != 0]
    }

    /// Inverse of [`Level::pattern`].
    #[inline]
    pub fn from_pattern(high: bool, low: bool) -> Self {
        match (high, low) {
            (true, true) => Level::Opaque,
            (true, false) => Level::High,
            (false, true) => Level::Low,
            (false, false) => Level::Transparent,
        }
    }

    /// An intensity that quantizes back to this level.
    pub fn intensity(self) -> u8 {
        self.value() * 85
    }
}

impl TryFrom<u8> for Level {
    type Error = u8;

    fn try_from(v: u8) -> Result<Self, u8> {
        match v {
            0 => Ok(Level::Transparent),
            1 => Ok(Level::Low),
            2 => Ok(Level::High),
            3 => Ok(Level::Opaque),
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds() {
        assert_eq!(Level::from_intensity(0), Level::Transparent);
        assert_eq!(Level::from_intensity(63), Level::Transparent);
        assert_eq!(Level::from_intensity(64), Level::Low);
        assert_eq!(Level::from_intensity(127), Level::Low);
        assert_eq!(Level::from_intensity(128), Level::High);
        assert_eq!(Level::from_intensity(191), Level::High);
        assert_eq!(Level::from_intensity(192), Level::Opaque);
        assert_eq!(Level::from_intensity(255), Level::Opaque);
    }

    #[test]
    fn test_total_over_all_intensities() {
        for v in 0..=255u8 {
            let expected = v / 64;
            assert_eq!(Level::from_intensity(v).value(), expected, "intensity {}", v);
        }
    }

    #[test]
    fn test_patterns() {
        assert_eq!(Level::Opaque.pattern(), [true, true]);
        assert_eq!(Level::High.pattern(), [true, false]);
        assert_eq!(Level::Low.pattern(), [false, true]);
        assert_eq!(Level::Transparent.pattern(), [false, false]);
        for level in Level::ALL {
            let [h, l] = level.pattern();
            assert_eq!(Level::from_pattern(h, l), level);
        }
    }

    #[test]
    fn test_intensity_quantizes_back() {
        for level in Level::ALL {
            assert_eq!(Level::from_intensity(level.intensity()), level);
            assert_eq!(Level::try_from(level.value()), Ok(level));
        }
        assert_eq!(Level::try_from(4), Err(4));
    }
}
