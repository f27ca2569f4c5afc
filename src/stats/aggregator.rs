//! Derived deck statistics.
//!
//! `compute_stats` is a pure function of the commander and the mainboard.
//! It is re-run after every mutation; nothing here is edited by hand.
//!
//! ## Counting rules
//!
//! - Every statistic counts copies: an entry with `count = 3` contributes 3.
//! - A multicolor card contributes to each of its colors, so the color
//!   breakdown can sum past the card total.
//! - Lands are part of the average mana value.
//! - The commander adds 1 to the total but sits in its own bucket of the
//!   type breakdown and takes no part in curve, colors, or average.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::classify::TypeBucket;
use crate::cards::Color;
use crate::deck::{Board, DeckEntry};
use crate::rules::Commander;

/// Mana value -> copies at that value.
///
/// Keys are the floor of each entry's mana value. Values with no cards
/// are absent; there is no 7+ folding.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManaCurve(BTreeMap<u32, u32>);

impl ManaCurve {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies at a mana value (0 if none).
    #[must_use]
    pub fn at(&self, mana_value: u32) -> u32 {
        self.0.get(&mana_value).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn add(&mut self, mana_value: f64, copies: u32) {
        // Mana values are validated non-negative at the catalog boundary.
        let bucket = mana_value.max(0.0).floor() as u32;
        let slot = self.0.entry(bucket).or_insert(0);
        *slot = slot.saturating_add(copies);
    }
}

impl FromIterator<(u32, u32)> for ManaCurve {
    fn from_iter<T: IntoIterator<Item = (u32, u32)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Copies per color symbol, plus colorless.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorBreakdown {
    #[serde(rename = "W", default)]
    pub white: u32,
    #[serde(rename = "U", default)]
    pub blue: u32,
    #[serde(rename = "B", default)]
    pub black: u32,
    #[serde(rename = "R", default)]
    pub red: u32,
    #[serde(rename = "G", default)]
    pub green: u32,
    #[serde(rename = "C", alias = "Colorless", default)]
    pub colorless: u32,
}

impl ColorBreakdown {
    /// Copies containing `color`.
    #[must_use]
    pub fn count(&self, color: Color) -> u32 {
        match color {
            Color::White => self.white,
            Color::Blue => self.blue,
            Color::Black => self.black,
            Color::Red => self.red,
            Color::Green => self.green,
        }
    }

    /// Sum over all five colors and colorless.
    #[must_use]
    pub fn sum(&self) -> u32 {
        [self.white, self.blue, self.black, self.red, self.green, self.colorless]
            .into_iter()
            .fold(0u32, u32::saturating_add)
    }

    fn add(&mut self, entry: &DeckEntry) {
        if entry.colors.is_colorless() {
            self.colorless = self.colorless.saturating_add(entry.count);
            return;
        }
        for color in entry.colors.iter() {
            let slot = match color {
                Color::White => &mut self.white,
                Color::Blue => &mut self.blue,
                Color::Black => &mut self.black,
                Color::Red => &mut self.red,
                Color::Green => &mut self.green,
            };
            *slot = slot.saturating_add(entry.count);
        }
    }
}

/// Mainboard partitioned by type, plus the commander on its own.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeBreakdown {
    #[serde(default)]
    pub commander: Option<Commander>,

    #[serde(default)]
    groups: BTreeMap<TypeBucket, Vec<DeckEntry>>,
}

impl TypeBreakdown {
    /// Entries in a bucket, sorted by name.
    #[must_use]
    pub fn bucket(&self, bucket: TypeBucket) -> &[DeckEntry] {
        self.groups.get(&bucket).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Non-commander buckets in display order, empty ones included.
    pub fn iter(&self) -> impl Iterator<Item = (TypeBucket, &[DeckEntry])> + '_ {
        TypeBucket::ALL.into_iter().map(move |b| (b, self.bucket(b)))
    }

    /// Copies in a bucket.
    #[must_use]
    pub fn copies(&self, bucket: TypeBucket) -> u32 {
        self.bucket(bucket)
            .iter()
            .fold(0u32, |total, e| total.saturating_add(e.count))
    }
}

/// Statistics for a deck.
///
/// Also the shape the persistence collaborator returns after a save; the
/// `serde` aliases accept its field names.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeckStats {
    /// Mainboard copies plus one for a commander.
    #[serde(alias = "total", alias = "cardCount")]
    pub total_cards: u32,

    /// Count-weighted mean mana value over the mainboard; 0 when empty.
    #[serde(alias = "avgCmc", alias = "averageCmc")]
    pub avg_mana_value: f64,

    pub mana_curve: ManaCurve,

    pub color_breakdown: ColorBreakdown,

    pub type_breakdown: TypeBreakdown,
}

/// Compute statistics for a commander and mainboard.
#[must_use]
pub fn compute_stats(commander: Option<&Commander>, mainboard: &Board) -> DeckStats {
    let mut mana_curve = ManaCurve::new();
    let mut color_breakdown = ColorBreakdown::default();
    let mut groups: BTreeMap<TypeBucket, Vec<DeckEntry>> =
        TypeBucket::ALL.into_iter().map(|b| (b, Vec::new())).collect();

    let mut copies = 0u32;
    let mut mana_sum = 0.0f64;

    for entry in mainboard.iter() {
        copies = copies.saturating_add(entry.count);
        mana_sum += entry.mana_value * f64::from(entry.count);
        mana_curve.add(entry.mana_value, entry.count);
        color_breakdown.add(entry);
        groups
            .entry(TypeBucket::classify(&entry.type_line))
            .or_default()
            .push(entry.clone());
    }

    for entries in groups.values_mut() {
        entries.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.id.cmp(&b.id))
        });
    }

    let avg_mana_value = if copies == 0 {
        0.0
    } else {
        mana_sum / f64::from(copies)
    };

    DeckStats {
        total_cards: copies.saturating_add(u32::from(commander.is_some())),
        avg_mana_value,
        mana_curve,
        color_breakdown,
        type_breakdown: TypeBreakdown {
            commander: commander.cloned(),
            groups,
        },
    }
}
