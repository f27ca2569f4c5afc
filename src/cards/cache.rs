//! Card cache for records already fetched from the catalog.
//!
//! The `CardCache` keeps catalog records by `CardId` with a secondary
//! case-insensitive name index, so deck loading can reuse records a
//! search already returned instead of asking the catalog again.

use rustc_hash::FxHashMap;

use super::record::{CardId, CardRecord};

/// Records keyed by id, with lookup by name.
///
/// ## Example
///
/// ```
/// use commander_deck::cards::{CardCache, CardId, CardRecord};
///
/// let mut cache = CardCache::new();
/// cache.insert(CardRecord::new("sr-1", "Sol Ring", "Artifact"));
///
/// assert!(cache.get(&CardId::new("sr-1")).is_some());
/// assert_eq!(cache.get_by_name("sol ring").unwrap().id, CardId::new("sr-1"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCache {
    cards: FxHashMap<CardId, CardRecord>,
    by_name: FxHashMap<String, CardId>,
}

impl CardCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a record, replacing any earlier copy with the same id.
    ///
    /// The name index points at the most recently inserted printing. A
    /// replaced record's old name stops resolving to this id.
    /// Returns the replaced record, if any.
    pub fn insert(&mut self, card: CardRecord) -> Option<CardRecord> {
        let key = name_key(&card.name);
        self.by_name.insert(key.clone(), card.id.clone());
        let previous = self.cards.insert(card.id.clone(), card)?;

        let old_key = name_key(&previous.name);
        if old_key != key && self.by_name.get(&old_key) == Some(&previous.id) {
            self.by_name.remove(&old_key);
        }
        Some(previous)
    }

    /// Get a record by id.
    #[must_use]
    pub fn get(&self, id: &CardId) -> Option<&CardRecord> {
        self.cards.get(id)
    }

    /// Get a record by name, ignoring case.
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<&CardRecord> {
        self.by_name
            .get(&name_key(name))
            .and_then(|id| self.cards.get(id))
    }

    #[must_use]
    pub fn contains(&self, id: &CardId) -> bool {
        self.cards.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all cached records.
    pub fn iter(&self) -> impl Iterator<Item = &CardRecord> {
        self.cards.values()
    }
}

impl Extend<CardRecord> for CardCache {
    fn extend<T: IntoIterator<Item = CardRecord>>(&mut self, iter: T) {
        for card in iter {
            self.insert(card);
        }
    }
}

fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut cache = CardCache::new();
        assert!(cache.insert(CardRecord::new("1", "Test Card", "Artifact")).is_none());

        assert_eq!(cache.get(&CardId::new("1")).unwrap().name, "Test Card");
        assert!(cache.get(&CardId::new("99")).is_none());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_replace_returns_previous() {
        let mut cache = CardCache::new();
        cache.insert(CardRecord::new("1", "Old", "Artifact"));
        let old = cache.insert(CardRecord::new("1", "New", "Artifact"));

        assert_eq!(old.unwrap().name, "Old");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_renamed_record_drops_old_name() {
        let mut cache = CardCache::new();
        cache.insert(CardRecord::new("1", "Old", "Artifact"));
        cache.insert(CardRecord::new("1", "New", "Artifact"));

        assert!(cache.get_by_name("old").is_none());
        assert_eq!(cache.get_by_name("new").unwrap().name, "New");
    }

    #[test]
    fn test_rename_keeps_other_printing_name() {
        let mut cache = CardCache::new();
        cache.insert(CardRecord::new("a", "Forest", "Basic Land — Forest"));
        cache.insert(CardRecord::new("b", "Forest", "Basic Land — Forest"));
        cache.insert(CardRecord::new("a", "Island", "Basic Land — Island"));

        assert_eq!(cache.get_by_name("forest").unwrap().id, CardId::new("b"));
        assert_eq!(cache.get_by_name("island").unwrap().id, CardId::new("a"));
    }

    #[test]
    fn test_name_lookup_tracks_latest_printing() {
        let mut cache = CardCache::new();
        cache.extend([
            CardRecord::new("a", "Forest", "Basic Land — Forest").with_set("m21"),
            CardRecord::new("b", "Forest", "Basic Land — Forest").with_set("neo"),
        ]);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get_by_name("  FOREST ").unwrap().id, CardId::new("b"));
    }

    #[test]
    fn test_contains_and_iter() {
        let mut cache = CardCache::new();
        cache.insert(CardRecord::new("1", "A", "Instant"));
        cache.insert(CardRecord::new("2", "B", "Sorcery"));

        assert!(cache.contains(&CardId::new("1")));
        assert!(!cache.is_empty());
        let mut names: Vec<_> = cache.iter().map(|c| c.name.as_str()).collect();
        names.sort();
        assert_eq!(names, vec!["A", "B"]);
    }
}
