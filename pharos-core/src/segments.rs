//! Seven-segment digit patterns
//!
//! Each pattern lists the segment states in the order the display board is
//! wired to the shift register outputs: `b, a, f, g, dp, c, d, e`. Bit *i*
//! of a [`SegmentPattern`] is position *i* of that sequence.

use core::fmt;

/// Number of segment positions per digit
pub const SEGMENT_COUNT: usize = 8;

/// Position of the decimal point in the wiring order
pub const DECIMAL_POINT_BIT: usize = 4;

/// Index of the blank glyph
pub const BLANK: u8 = 16;

/// Error for a glyph index outside 0-16
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidGlyph(pub u8);

impl fmt::Display for InvalidGlyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "glyph {} out of range 0-16", self.0)
    }
}

/// Segment states for one digit, in wiring order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SegmentPattern(u8);

impl SegmentPattern {
    /// All segments off
    pub const BLANK: SegmentPattern = SegmentPattern(0);

    /// Build a pattern from the wiring-order sequence
    pub const fn from_sequence(seq: [u8; SEGMENT_COUNT]) -> Self {
        let mut bits = 0u8;
        let mut i = 0;
        while i < SEGMENT_COUNT {
            if seq[i] != 0 {
                bits |= 1 << i;
            }
            i += 1;
        }
        Self(bits)
    }

    /// State of position `i` (0-7); positions past the end read as off
    pub const fn bit(self, i: usize) -> bool {
        i < SEGMENT_COUNT && (self.0 >> i) & 1 == 1
    }

    /// Segment states in wiring order
    pub fn bits(self) -> impl Iterator<Item = bool> {
        (0..SEGMENT_COUNT).map(move |i| self.bit(i))
    }

    /// Raw packed value
    pub const fn raw(self) -> u8 {
        self.0
    }
}

/// A displayable symbol: hex digits 0-F or blank (16)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Glyph(u8);

impl Glyph {
    /// The all-off glyph
    pub const BLANK: Glyph = Glyph(BLANK);

    /// Create a glyph, rejecting indices above 16
    pub const fn new(index: u8) -> Result<Self, InvalidGlyph> {
        if index <= BLANK {
            Ok(Self(index))
        } else {
            Err(InvalidGlyph(index))
        }
    }

    /// Table index (0-16)
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Split `value` into (units, tens) decimal digits
    ///
    /// Values above 99 keep only their last two digits.
    pub const fn decimal_pair(value: u8) -> (Glyph, Glyph) {
        let value = value % 100;
        (Glyph(value % 10), Glyph(value / 10))
    }
}

impl TryFrom<u8> for Glyph {
    type Error = InvalidGlyph;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::new(index)
    }
}

const PATTERNS: [SegmentPattern; 17] = [
    SegmentPattern::from_sequence([1, 1, 1, 0, 0, 1, 1, 1]), // 0
    SegmentPattern::from_sequence([1, 0, 0, 0, 0, 1, 0, 0]), // 1
    SegmentPattern::from_sequence([1, 1, 0, 1, 0, 0, 1, 1]), // 2
    SegmentPattern::from_sequence([1, 1, 0, 1, 0, 1, 1, 0]), // 3
    SegmentPattern::from_sequence([1, 0, 1, 1, 0, 1, 0, 0]), // 4
    SegmentPattern::from_sequence([0, 1, 1, 1, 0, 1, 1, 0]), // 5
    SegmentPattern::from_sequence([0, 1, 1, 1, 0, 1, 1, 1]), // 6
    SegmentPattern::from_sequence([1, 1, 0, 0, 0, 1, 0, 0]), // 7
    SegmentPattern::from_sequence([1, 1, 1, 1, 0, 1, 1, 1]), // 8
    SegmentPattern::from_sequence([1, 1, 1, 1, 0, 1, 1, 0]), // 9
    SegmentPattern::from_sequence([1, 1, 1, 1, 0, 1, 0, 1]), // A
    SegmentPattern::from_sequence([0, 0, 1, 1, 0, 1, 1, 1]), // b
    SegmentPattern::from_sequence([0, 1, 1, 0, 0, 0, 1, 1]), // C
    SegmentPattern::from_sequence([1, 0, 0, 1, 0, 1, 1, 1]), // d
    SegmentPattern::from_sequence([0, 1, 1, 1, 0, 0, 1, 1]), // E
    SegmentPattern::from_sequence([0, 1, 1, 1, 0, 0, 0, 1]), // F
    SegmentPattern::BLANK,
];

/// Segment pattern for a glyph
pub const fn pattern_for(glyph: Glyph) -> SegmentPattern {
    PATTERNS[glyph.0 as usize]
}
