//! Deck statistics: mana curve, color breakdown, type partition.
//!
//! - `TypeBucket`: ordered first-match type classification
//! - `DeckStats`: everything derived from commander + mainboard
//! - `compute_stats`: the pure aggregation

pub mod aggregator;
pub mod classify;

pub use aggregator::{compute_stats, ColorBreakdown, DeckStats, ManaCurve, TypeBreakdown};
pub use classify::TypeBucket;
