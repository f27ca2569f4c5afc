//! Deck statistics tests.
//!
//! Mana curve, average mana value, color breakdown and the type partition,
//! computed over mainboards built directly and through the composer.

use commander_deck::cards::{CardId, CardRecord, Color, ColorSet};
use commander_deck::deck::{Board, DeckComposer, DeckEntry};
use commander_deck::rules::Commander;
use commander_deck::stats::{compute_stats, DeckStats, TypeBucket};
use proptest::prelude::*;

// =============================================================================
// Helpers
// =============================================================================

fn entry(id: &str, type_line: &str, mana_value: f64, colors: ColorSet, count: u32) -> DeckEntry {
    DeckEntry {
        id: CardId::new(id),
        name: id.to_string(),
        count,
        image: None,
        mana_value,
        colors,
        color_identity: colors,
        type_line: type_line.to_string(),
    }
}

fn commander() -> Commander {
    Commander {
        id: CardId::new("cmd"),
        name: "Kenrith, the Returned King".into(),
        image: None,
        color_identity: ColorSet::new()
            .with(Color::White)
            .with(Color::Blue)
            .with(Color::Black)
            .with(Color::Red)
            .with(Color::Green),
    }
}

// =============================================================================
// Scenarios
// =============================================================================

/// Test mana curve, average and color counts together.
#[test]
fn test_curve_average_and_colors() {
    let board: Board = vec![
        entry("a", "Creature — Elf", 2.0, ColorSet::GREEN, 2),
        entry("b", "Artifact", 4.0, ColorSet::COLORLESS, 1),
    ]
    .into();

    let stats = compute_stats(None, &board);

    assert_eq!(stats.mana_curve.at(2), 2);
    assert_eq!(stats.mana_curve.at(4), 1);
    assert_eq!(stats.mana_curve.len(), 2);
    assert!((stats.avg_mana_value - 8.0 / 3.0).abs() < 1e-9);
    assert_eq!(stats.color_breakdown.green, 2);
    assert_eq!(stats.color_breakdown.colorless, 1);
    assert_eq!(stats.total_cards, 3);
}

/// Test that the commander counts toward the total but is not bucketed.
#[test]
fn test_commander_counted_and_kept_apart() {
    let board: Board = vec![entry("a", "Instant", 1.0, ColorSet::BLUE, 1)].into();
    let commander = commander();

    let stats = compute_stats(Some(&commander), &board);

    assert_eq!(stats.total_cards, 2);
    assert_eq!(stats.type_breakdown.commander.as_ref(), Some(&commander));
    let listed: u32 = stats.type_breakdown.iter().map(|(_, e)| e.len() as u32).sum();
    assert_eq!(listed, 1);
}

/// Test multicolor cards counted under every color.
#[test]
fn test_multicolor_counts_once_per_color() {
    let gold = ColorSet::WHITE.union(ColorSet::BLUE).union(ColorSet::BLACK);
    let board: Board = vec![entry("a", "Creature — Sphinx", 5.0, gold, 1)].into();

    let stats = compute_stats(None, &board);

    assert_eq!(stats.color_breakdown.count(Color::White), 1);
    assert_eq!(stats.color_breakdown.count(Color::Blue), 1);
    assert_eq!(stats.color_breakdown.count(Color::Black), 1);
    assert_eq!(stats.color_breakdown.sum(), 3);
    assert!(stats.color_breakdown.sum() > stats.total_cards);
}

/// Test type bucket priority for multi-type cards.
#[test]
fn test_type_priority() {
    let board: Board = vec![
        entry("golem", "Artifact Creature — Golem", 3.0, ColorSet::COLORLESS, 1),
        entry("dryad", "Land Creature — Forest Dryad", 3.0, ColorSet::GREEN, 1),
        entry("saga", "Enchantment — Saga", 3.0, ColorSet::GREEN, 1),
        entry("battle", "Battle — Siege", 3.0, ColorSet::RED, 1),
        entry("tribal", "Kindred Instant — Elf", 1.0, ColorSet::GREEN, 1),
    ]
    .into();

    let stats = compute_stats(None, &board);
    let names = |bucket| -> Vec<String> {
        stats
            .type_breakdown
            .bucket(bucket)
            .iter()
            .map(|e| e.name.clone())
            .collect()
    };

    assert_eq!(names(TypeBucket::Creature), ["dryad", "golem"]);
    assert!(names(TypeBucket::Artifact).is_empty());
    assert!(names(TypeBucket::Land).is_empty());
    assert_eq!(names(TypeBucket::Enchantment), ["saga"]);
    assert_eq!(names(TypeBucket::Instant), ["tribal"]);
    assert_eq!(names(TypeBucket::Other), ["battle"]);
}

/// Test bucket ordering by name, ignoring case.
#[test]
fn test_bucket_sort_ignores_case() {
    let board: Board = vec![
        entry("zebra", "Creature — Horse", 1.0, ColorSet::WHITE, 1),
        entry("Aardvark", "Creature — Beast", 1.0, ColorSet::GREEN, 1),
        entry("mole", "Creature — Mole", 1.0, ColorSet::BLACK, 1),
    ]
    .into();

    let stats = compute_stats(None, &board);
    let names: Vec<_> = stats
        .type_breakdown
        .bucket(TypeBucket::Creature)
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(names, ["Aardvark", "mole", "zebra"]);
}

/// Test stats for an empty mainboard.
#[test]
fn test_empty_board() {
    let stats = compute_stats(None, &Board::new());
    assert_eq!(stats.total_cards, 0);
    assert_eq!(stats.avg_mana_value, 0.0);
    assert!(stats.mana_curve.is_empty());
    assert_eq!(stats.color_breakdown.sum(), 0);
}

/// Test composer stats after adds and removes.
#[test]
fn test_composer_stats_follow_mutations() {
    let mut composer = DeckComposer::new();
    composer.set_commander(Some(commander()));
    let island = CardRecord::new("island", "Island", "Basic Land — Island")
        .with_colors(ColorSet::COLORLESS)
        .with_legality("commander", "legal");

    for _ in 0..3 {
        composer.add_card(&island).unwrap();
    }
    assert_eq!(composer.stats().total_cards, 4);
    assert_eq!(composer.stats().type_breakdown.copies(TypeBucket::Land), 3);

    composer.remove_card(&CardId::new("island"), true);
    assert_eq!(composer.stats().total_cards, 1);
}

/// Test reading stats in the backend shape.
#[test]
fn test_server_stats_shape() {
    let json = r#"{
        "totalCards": 100,
        "avgCmc": 3.1,
        "manaCurve": { "1": 10, "2": 15 },
        "colorBreakdown": { "W": 0, "U": 20, "B": 0, "R": 0, "G": 30, "Colorless": 12 }
    }"#;
    let stats: DeckStats = serde_json::from_str(json).unwrap();

    assert_eq!(stats.total_cards, 100);
    assert_eq!(stats.mana_curve.at(2), 15);
    assert_eq!(stats.color_breakdown.colorless, 12);
    assert!(stats.type_breakdown.commander.is_none());
}

// =============================================================================
// Properties
// =============================================================================

const TYPE_LINES: [&str; 9] = [
    "Creature — Elf",
    "Artifact Creature — Golem",
    "Instant",
    "Sorcery",
    "Artifact — Equipment",
    "Enchantment — Aura",
    "Legendary Planeswalker — Nissa",
    "Basic Land — Forest",
    "Battle — Siege",
];

fn board_strategy() -> impl Strategy<Value = Board> {
    prop::collection::vec((0usize..TYPE_LINES.len(), 0u8..32, 1u32..5, 0u32..9), 0..30).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (t, bits, count, mv))| {
                let colors: ColorSet = Color::ALL
                    .iter()
                    .enumerate()
                    .filter(|(b, _)| bits & (1 << b) != 0)
                    .map(|(_, c)| *c)
                    .collect();
                entry(&format!("card-{i}"), TYPE_LINES[t], f64::from(mv), colors, count)
            })
            .collect()
    })
}

proptest! {
    /// Test every entry lands in exactly one bucket.
    #[test]
    fn prop_type_partition_is_exact(board in board_strategy()) {
        let stats = compute_stats(None, &board);

        let mut seen: Vec<CardId> = stats
            .type_breakdown
            .iter()
            .flat_map(|(_, entries)| entries.iter().map(|e| e.id.clone()))
            .collect();
        let listed = seen.len();
        seen.sort();
        seen.dedup();

        prop_assert_eq!(listed, board.len());
        prop_assert_eq!(seen.len(), board.len());
        prop_assert!(stats.type_breakdown.bucket(TypeBucket::Artifact)
            .iter()
            .all(|e| !e.type_line.to_lowercase().contains("creature")));
    }

    /// Test color and curve sums against the entries.
    #[test]
    fn prop_color_sums_match_entries(board in board_strategy()) {
        let stats = compute_stats(None, &board);

        for color in Color::ALL {
            let expected: u32 = board
                .iter()
                .filter(|e| e.colors.contains(color))
                .map(|e| e.count)
                .sum();
            prop_assert_eq!(stats.color_breakdown.count(color), expected);
        }
        let colorless: u32 = board
            .iter()
            .filter(|e| e.colors.is_colorless())
            .map(|e| e.count)
            .sum();
        prop_assert_eq!(stats.color_breakdown.colorless, colorless);
        prop_assert_eq!(stats.mana_curve.iter().map(|(_, n)| n).sum::<u32>(), stats.total_cards);
    }
}
