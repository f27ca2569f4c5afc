//! Commander format rules checked locally.
//!
//! - Color identity containment and Commander legality (`identity`)
//! - Commander eligibility and the commander snapshot (`commander`)
//! - The `ValidationError` taxonomy shared with the deck composer
//!
//! Nothing here is the full comprehensive rules: only the checks the deck
//! builder enforces before a mutation.

pub mod commander;
pub mod error;
pub mod identity;

pub use commander::{can_be_commander, has_commander_type, Commander};
pub use error::{ValidationError, ValidationResult};
pub use identity::{
    commander_status, is_commander_format_legal, is_within_identity, COMMANDER_FORMAT, LEGAL,
    NOT_LEGAL,
};
