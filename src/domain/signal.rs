//! Discrete trading stance for a single period.

use std::fmt;

/// Position held for one period: long (+1), flat (0), or short (-1).
/// A signal series has the same length and index alignment as the price
/// series it was derived from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Position {
    Long,
    #[default]
    Flat,
    Short,
}

impl Position {
    pub fn value(self) -> f64 {
        match self {
            Position::Long => 1.0,
            Position::Flat => 0.0,
            Position::Short => -1.0,
        }
    }

    pub fn as_i8(self) -> i8 {
        match self {
            Position::Long => 1,
            Position::Flat => 0,
            Position::Short => -1,
        }
    }

    pub fn is_flat(self) -> bool {
        self == Position::Flat
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i8())
    }
}
