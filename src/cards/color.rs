//! Color symbols and color sets.
//!
//! Cards carry two color sets: the colors they are cast with and their
//! color identity. Both are stored as a `ColorSet` bitset so containment
//! checks are a single mask operation.
//!
//! ## Symbols
//!
//! On the wire colors are single-letter symbols: `W`, `U`, `B`, `R`, `G`.
//! The colorless symbol `C` is accepted on input and contributes nothing.

use std::fmt;

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One of the five colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    White,
    Blue,
    Black,
    Red,
    Green,
}

impl Color {
    /// All colors in canonical WUBRG order.
    pub const ALL: [Color; 5] = [
        Color::White,
        Color::Blue,
        Color::Black,
        Color::Red,
        Color::Green,
    ];

    /// Single-letter symbol for this color.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Color::White => 'W',
            Color::Blue => 'U',
            Color::Black => 'B',
            Color::Red => 'R',
            Color::Green => 'G',
        }
    }

    /// Parse a single-letter color symbol.
    ///
    /// Returns `None` for anything that isn't one of `WUBRG`, including
    /// the colorless symbol `C`.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol.trim() {
            "W" | "w" => Some(Color::White),
            "U" | "u" => Some(Color::Blue),
            "B" | "b" => Some(Color::Black),
            "R" | "r" => Some(Color::Red),
            "G" | "g" => Some(Color::Green),
            _ => None,
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Color::White => 1 << 0,
            Color::Blue => 1 << 1,
            Color::Black => 1 << 2,
            Color::Red => 1 << 3,
            Color::Green => 1 << 4,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A set of colors stored as bitflags.
///
/// The empty set is colorless.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct ColorSet(u8);

impl ColorSet {
    pub const COLORLESS: Self = Self(0);
    pub const WHITE: Self = Self(Color::White.bit());
    pub const BLUE: Self = Self(Color::Blue.bit());
    pub const BLACK: Self = Self(Color::Black.bit());
    pub const RED: Self = Self(Color::Red.bit());
    pub const GREEN: Self = Self(Color::Green.bit());

    /// Create an empty (colorless) set.
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    /// True if the set has no colors.
    #[must_use]
    pub const fn is_colorless(self) -> bool {
        self.0 == 0
    }

    /// True if the set holds `color`.
    #[must_use]
    pub const fn contains(self, color: Color) -> bool {
        self.0 & color.bit() != 0
    }

    /// True if every color in `other` is also in `self`.
    ///
    /// An empty `other` is contained in every set.
    #[must_use]
    pub const fn contains_all(self, other: ColorSet) -> bool {
        self.0 & other.0 == other.0
    }

    #[must_use]
    pub const fn union(self, other: ColorSet) -> Self {
        Self(self.0 | other.0)
    }

    /// Number of colors in the set.
    #[must_use]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Add a color, returning the new set.
    #[must_use]
    pub const fn with(self, color: Color) -> Self {
        Self(self.0 | color.bit())
    }

    /// Iterate the colors in WUBRG order.
    pub fn iter(self) -> impl Iterator<Item = Color> {
        Color::ALL.into_iter().filter(move |c| self.contains(*c))
    }

    /// Parse a list of symbols, rejecting anything unknown.
    ///
    /// `C` is accepted and ignored.
    pub fn from_symbols<I, S>(symbols: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        symbols.into_iter().try_fold(ColorSet::COLORLESS, |set, s| {
            let s = s.as_ref();
            if s.trim().eq_ignore_ascii_case("c") {
                return Ok(set);
            }
            Color::from_symbol(s)
                .map(|color| set.with(color))
                .ok_or_else(|| format!("unknown color symbol {s:?}"))
        })
    }
}

impl From<Color> for ColorSet {
    fn from(color: Color) -> Self {
        Self(color.bit())
    }
}

impl FromIterator<Color> for ColorSet {
    fn from_iter<T: IntoIterator<Item = Color>>(iter: T) -> Self {
        iter.into_iter()
            .fold(ColorSet::COLORLESS, |set, color| set.with(color))
    }
}

impl fmt::Display for ColorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_colorless() {
            return write!(f, "C");
        }
        for color in self.iter() {
            write!(f, "{color}")?;
        }
        Ok(())
    }
}

impl Serialize for ColorSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.count() as usize))?;
        for color in self.iter() {
            seq.serialize_element(&color.symbol().to_string())?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for ColorSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SymbolsVisitor;

        impl<'de> Visitor<'de> for SymbolsVisitor {
            type Value = ColorSet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a list of color symbols")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<ColorSet, A::Error> {
                let mut symbols = Vec::new();
                while let Some(symbol) = seq.next_element::<String>()? {
                    symbols.push(symbol);
                }
                ColorSet::from_symbols(&symbols).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_seq(SymbolsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colorless_set() {
        let set = ColorSet::new();
        assert!(set.is_colorless());
        assert_eq!(set.count(), 0);
        assert_eq!(set.to_string(), "C");
    }

    #[test]
    fn test_contains_all() {
        let simic = ColorSet::GREEN.union(ColorSet::BLUE);
        assert!(simic.contains_all(ColorSet::GREEN));
        assert!(simic.contains_all(ColorSet::COLORLESS));
        assert!(!ColorSet::GREEN.contains_all(simic));
        assert!(!ColorSet::COLORLESS.contains_all(ColorSet::RED));
    }

    #[test]
    fn test_from_symbols() {
        let set = ColorSet::from_symbols(["G", "U", "C"]).unwrap();
        assert_eq!(set, ColorSet::GREEN.union(ColorSet::BLUE));
        assert!(ColorSet::from_symbols(["X"]).is_err());
    }

    #[test]
    fn test_display_is_wubrg_order() {
        let set: ColorSet = [Color::Green, Color::White, Color::Black].into_iter().collect();
        assert_eq!(set.to_string(), "WBG");
    }

    #[test]
    fn test_serde_symbols() {
        let set = ColorSet::RED.union(ColorSet::WHITE);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["W","R"]"#);

        let parsed: ColorSet = serde_json::from_str(r#"["R","W"]"#).unwrap();
        assert_eq!(parsed, set);

        assert!(serde_json::from_str::<ColorSet>(r#"["P"]"#).is_err());
    }
}
