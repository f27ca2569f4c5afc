//! Card records as delivered by the card catalog.
//!
//! `CardRecord` is the immutable shape of a catalog card. The engine never
//! mutates a record; deck entries and commanders copy the fields they need
//! at selection time.
//!
//! Records are validated while deserializing: required fields must be
//! present, optional ones (oracle text, images, faces, set) are modelled as
//! `Option`/empty collections rather than checked for truthiness later.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use super::color::ColorSet;

/// Catalog identifier of a card printing.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw ID value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Image URLs for a card or card face.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUris {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large: Option<String>,
}

impl ImageUris {
    /// Best display image: `normal`, then `large`, then `small`.
    #[must_use]
    pub fn preferred(&self) -> Option<&str> {
        self.normal
            .as_deref()
            .or(self.large.as_deref())
            .or(self.small.as_deref())
    }
}

/// One face of a multi-faced card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardFace {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_line: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oracle_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<ColorSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uris: Option<ImageUris>,
}

/// Format name -> legality status (`legal`, `banned`, `not_legal`, ...).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Legalities(FxHashMap<String, String>);

impl Legalities {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Status for a format, if the catalog reported one.
    #[must_use]
    pub fn status(&self, format: &str) -> Option<&str> {
        self.0.get(format).map(String::as_str)
    }

    /// Set the status for a format.
    pub fn set(&mut self, format: impl Into<String>, status: impl Into<String>) {
        self.0.insert(format.into(), status.into());
    }
}

/// Why a catalog payload could not become a `CardRecord`.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum RecordError {
    #[error("card record has an empty id")]
    EmptyId,

    #[error("card record {id} has an empty name")]
    EmptyName { id: String },

    #[error("card {name} has invalid mana value {value}")]
    InvalidManaValue { name: String, value: f64 },
}

/// Immutable catalog card.
///
/// ## Example
///
/// ```
/// use commander_deck::cards::{CardRecord, ColorSet};
///
/// let forest = CardRecord::new("f-1", "Forest", "Basic Land — Forest")
///     .with_identity(ColorSet::GREEN)
///     .with_legality("commander", "legal");
///
/// assert!(forest.is_basic_land());
/// assert_eq!(forest.legalities.status("commander"), Some("legal"));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCardRecord")]
pub struct CardRecord {
    /// Catalog id, unique per printing.
    pub id: CardId,

    pub name: String,

    /// Free text such as `Legendary Creature — Elf Druid`.
    pub type_line: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub oracle_text: Option<String>,

    /// Mana value (converted mana cost). Never negative.
    pub cmc: f64,

    /// Casting colors.
    pub colors: ColorSet,

    /// Color identity; a superset of `colors`.
    pub color_identity: ColorSet,

    /// Printing/set code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_uris: Option<ImageUris>,

    #[serde(skip_serializing_if = "SmallVec::is_empty")]
    pub card_faces: SmallVec<[CardFace; 2]>,

    pub legalities: Legalities,
}

impl CardRecord {
    /// Create a colorless, zero-cost record with no legalities.
    ///
    /// Mostly useful for tests and fixtures; real records come from the
    /// catalog.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, type_line: impl Into<String>) -> Self {
        Self {
            id: CardId::new(id),
            name: name.into(),
            type_line: type_line.into(),
            oracle_text: None,
            cmc: 0.0,
            colors: ColorSet::COLORLESS,
            color_identity: ColorSet::COLORLESS,
            set: None,
            image_uris: None,
            card_faces: SmallVec::new(),
            legalities: Legalities::new(),
        }
    }

    #[must_use]
    pub fn with_mana_value(mut self, cmc: f64) -> Self {
        self.cmc = cmc;
        self
    }

    /// Set casting colors. Identity is widened to include them.
    #[must_use]
    pub fn with_colors(mut self, colors: ColorSet) -> Self {
        self.colors = colors;
        self.color_identity = self.color_identity.union(colors);
        self
    }

    #[must_use]
    pub fn with_identity(mut self, identity: ColorSet) -> Self {
        self.color_identity = identity;
        self
    }

    #[must_use]
    pub fn with_oracle_text(mut self, text: impl Into<String>) -> Self {
        self.oracle_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_set(mut self, set: impl Into<String>) -> Self {
        self.set = Some(set.into());
        self
    }

    #[must_use]
    pub fn with_image(mut self, normal: impl Into<String>) -> Self {
        self.image_uris = Some(ImageUris {
            normal: Some(normal.into()),
            ..ImageUris::default()
        });
        self
    }

    #[must_use]
    pub fn with_face(mut self, face: CardFace) -> Self {
        self.card_faces.push(face);
        self
    }

    #[must_use]
    pub fn with_legality(mut self, format: &str, status: &str) -> Self {
        self.legalities.set(format, status);
        self
    }

    /// True if the type line marks this as a basic land.
    #[must_use]
    pub fn is_basic_land(&self) -> bool {
        is_basic_land(&self.type_line)
    }

    /// Primary display image.
    ///
    /// Falls back to the first face for multi-faced cards.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.image_uris
            .as_ref()
            .and_then(ImageUris::preferred)
            .or_else(|| self.face_images().next())
    }

    /// Images of each face that has one, in face order.
    pub fn face_images(&self) -> impl Iterator<Item = &str> {
        self.card_faces
            .iter()
            .filter_map(|face| face.image_uris.as_ref().and_then(ImageUris::preferred))
    }

    /// Oracle text, or the joined face texts for multi-faced cards.
    #[must_use]
    pub fn rules_text(&self) -> Option<String> {
        if let Some(text) = &self.oracle_text {
            return Some(text.clone());
        }
        let faces: Vec<&str> = self
            .card_faces
            .iter()
            .filter_map(|f| f.oracle_text.as_deref())
            .collect();
        (!faces.is_empty()).then(|| faces.join("\n//\n"))
    }
}

/// Basic-land test shared by records and deck entries.
#[must_use]
pub fn is_basic_land(type_line: &str) -> bool {
    type_line.contains("Basic Land")
}

/// Catalog payload before validation.
#[derive(Deserialize)]
struct RawCardRecord {
    id: String,
    name: String,
    #[serde(default)]
    type_line: Option<String>,
    #[serde(default)]
    oracle_text: Option<String>,
    #[serde(default, alias = "mana_value")]
    cmc: Option<f64>,
    #[serde(default)]
    colors: Option<ColorSet>,
    #[serde(default)]
    color_identity: ColorSet,
    #[serde(default)]
    set: Option<String>,
    #[serde(default)]
    image_uris: Option<ImageUris>,
    #[serde(default)]
    card_faces: SmallVec<[CardFace; 2]>,
    #[serde(default)]
    legalities: Legalities,
}

impl TryFrom<RawCardRecord> for CardRecord {
    type Error = RecordError;

    fn try_from(raw: RawCardRecord) -> Result<Self, Self::Error> {
        if raw.id.trim().is_empty() {
            return Err(RecordError::EmptyId);
        }
        if raw.name.trim().is_empty() {
            return Err(RecordError::EmptyName { id: raw.id });
        }
        let cmc = raw.cmc.unwrap_or(0.0);
        if !cmc.is_finite() || cmc < 0.0 {
            return Err(RecordError::InvalidManaValue { name: raw.name, value: cmc });
        }

        // Multi-faced cards report colors per face.
        let colors = raw.colors.unwrap_or_else(|| {
            raw.card_faces
                .iter()
                .filter_map(|f| f.colors)
                .fold(ColorSet::COLORLESS, ColorSet::union)
        });

        let type_line = raw.type_line.unwrap_or_else(|| {
            raw.card_faces
                .iter()
                .filter_map(|f| f.type_line.as_deref())
                .collect::<Vec<_>>()
                .join(" // ")
        });

        Ok(CardRecord {
            id: CardId(raw.id),
            name: raw.name,
            type_line,
            oracle_text: raw.oracle_text,
            cmc,
            colors,
            color_identity: raw.color_identity,
            set: raw.set,
            image_uris: raw.image_uris,
            card_faces: raw.card_faces,
            legalities: raw.legalities,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOL_RING: &str = r#"{
        "id": "sr-1",
        "name": "Sol Ring",
        "type_line": "Artifact",
        "oracle_text": "{T}: Add {C}{C}.",
        "cmc": 1.0,
        "colors": [],
        "color_identity": [],
        "set": "cmm",
        "image_uris": { "normal": "https://img/sol-ring.jpg" },
        "legalities": { "commander": "legal", "vintage": "restricted" }
    }"#;

    const BACKSIDE_ONLY: &str = r#"{
        "id": "dfc-1",
        "name": "Delver of Secrets // Insectile Aberration",
        "cmc": 1,
        "color_identity": ["U"],
        "card_faces": [
            { "name": "Delver of Secrets", "type_line": "Creature — Human Wizard",
              "colors": ["U"], "image_uris": { "normal": "https://img/front.jpg" } },
            { "name": "Insectile Aberration", "type_line": "Creature — Human Insect",
              "colors": ["U"], "image_uris": { "normal": "https://img/back.jpg" } }
        ],
        "legalities": { "commander": "legal" }
    }"#;

    #[test]
    fn test_card_id() {
        let id = CardId::new("abc");
        assert_eq!(id.as_str(), "abc");
        assert_eq!(format!("{}", id), "abc");
    }

    #[test]
    fn test_deserialize_single_faced() {
        let card: CardRecord = serde_json::from_str(SOL_RING).unwrap();
        assert_eq!(card.name, "Sol Ring");
        assert_eq!(card.cmc, 1.0);
        assert!(card.colors.is_colorless());
        assert_eq!(card.set.as_deref(), Some("cmm"));
        assert_eq!(card.primary_image(), Some("https://img/sol-ring.jpg"));
        assert_eq!(card.legalities.status("commander"), Some("legal"));
        assert_eq!(card.legalities.status("modern"), None);
    }

    #[test]
    fn test_deserialize_multi_faced() {
        let card: CardRecord = serde_json::from_str(BACKSIDE_ONLY).unwrap();
        assert_eq!(card.colors, ColorSet::BLUE);
        assert_eq!(card.type_line, "Creature — Human Wizard // Creature — Human Insect");
        assert_eq!(card.primary_image(), Some("https://img/front.jpg"));
        assert_eq!(card.face_images().count(), 2);
        assert!(card.image_uris.is_none());
    }

    #[test]
    fn test_rejects_negative_mana_value() {
        let json = r#"{ "id": "x", "name": "Bad", "cmc": -1, "color_identity": [] }"#;
        let err = serde_json::from_str::<CardRecord>(json).unwrap_err();
        assert!(err.to_string().contains("invalid mana value"));
    }

    #[test]
    fn test_rejects_empty_id() {
        let json = r#"{ "id": " ", "name": "Nameless" }"#;
        assert!(serde_json::from_str::<CardRecord>(json).is_err());
    }

    #[test]
    fn test_builder_widens_identity() {
        let card = CardRecord::new("1", "Bolt", "Instant").with_colors(ColorSet::RED);
        assert_eq!(card.color_identity, ColorSet::RED);
        assert!(card.primary_image().is_none());
    }

    #[test]
    fn test_basic_land_detection() {
        assert!(is_basic_land("Basic Land — Forest"));
        assert!(!is_basic_land("Basic Snow Land — Island"));
        assert!(!is_basic_land("Land — Forest Island"));
    }

    #[test]
    fn test_rules_text_from_faces() {
        let card = CardRecord::new("1", "Split", "Instant // Instant")
            .with_face(CardFace {
                name: "Fire".into(),
                type_line: None,
                oracle_text: Some("Fire deals 2 damage.".into()),
                colors: None,
                image_uris: None,
            })
            .with_face(CardFace {
                name: "Ice".into(),
                type_line: None,
                oracle_text: Some("Tap target permanent.".into()),
                colors: None,
                image_uris: None,
            });
        assert_eq!(
            card.rules_text().as_deref(),
            Some("Fire deals 2 damage.\n//\nTap target permanent.")
        );
    }

    #[test]
    fn test_serialization_round_trip() {
        let card: CardRecord = serde_json::from_str(SOL_RING).unwrap();
        let json = serde_json::to_string(&card).unwrap();
        let back: CardRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(card, back);
    }
}
