//! Type-line classification into display buckets.
//!
//! Every card lands in exactly one bucket. Buckets are tested in a fixed
//! priority order against the lower-cased type line and the first match
//! wins, so an `Artifact Creature` is a Creature and never an Artifact.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Display bucket for a mainboard card.
///
/// Variant order is the priority order and the display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TypeBucket {
    Creature,
    Instant,
    Sorcery,
    Artifact,
    Enchantment,
    Planeswalker,
    Land,
    Other,
}

/// (keyword, bucket) pairs, evaluated top to bottom.
const CLASSIFICATION: [(&str, TypeBucket); 7] = [
    ("creature", TypeBucket::Creature),
    ("instant", TypeBucket::Instant),
    ("sorcery", TypeBucket::Sorcery),
    ("artifact", TypeBucket::Artifact),
    ("enchantment", TypeBucket::Enchantment),
    ("planeswalker", TypeBucket::Planeswalker),
    ("land", TypeBucket::Land),
];

impl TypeBucket {
    /// All buckets in display order.
    pub const ALL: [TypeBucket; 8] = [
        TypeBucket::Creature,
        TypeBucket::Instant,
        TypeBucket::Sorcery,
        TypeBucket::Artifact,
        TypeBucket::Enchantment,
        TypeBucket::Planeswalker,
        TypeBucket::Land,
        TypeBucket::Other,
    ];

    /// Classify a type line. Unmatched lines go to `Other`.
    #[must_use]
    pub fn classify(type_line: &str) -> TypeBucket {
        let lowered = type_line.to_lowercase();
        CLASSIFICATION
            .iter()
            .find(|(keyword, _)| lowered.contains(keyword))
            .map_or(TypeBucket::Other, |(_, bucket)| *bucket)
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            TypeBucket::Creature => "Creature",
            TypeBucket::Instant => "Instant",
            TypeBucket::Sorcery => "Sorcery",
            TypeBucket::Artifact => "Artifact",
            TypeBucket::Enchantment => "Enchantment",
            TypeBucket::Planeswalker => "Planeswalker",
            TypeBucket::Land => "Land",
            TypeBucket::Other => "Other",
        }
    }
}

impl fmt::Display for TypeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
