//! Deck construction failures.

use thiserror::Error;

/// A rejected commander selection or deck mutation.
///
/// Always recoverable: the deck is left exactly as it was before the call,
/// and the `Display` text is the message shown to the player.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select a commander first.")]
    NoCommanderSelected,

    #[error("\"{name}\" cannot be your commander: only legendary creatures or specific planeswalkers can be commanders.")]
    NotEligibleType { name: String },

    /// `status` is the catalog's legality status for the commander format.
    #[error("Card \"{name}\" is {status} in Commander format.")]
    IllegalInFormat { name: String, status: String },

    #[error("Card \"{name}\" is outside commander's color identity.")]
    OutsideColorIdentity { name: String },

    #[error("Only one copy of \"{name}\" allowed (excluding basic lands).")]
    DuplicateNonBasic { name: String },
}

/// Result alias for rule checks.
pub type ValidationResult<T> = Result<T, ValidationError>;

impl ValidationError {
    /// Short stable name of the failure, for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::NoCommanderSelected => "no_commander_selected",
            ValidationError::NotEligibleType { .. } => "not_eligible_type",
            ValidationError::IllegalInFormat { .. } => "illegal_in_format",
            ValidationError::OutsideColorIdentity { .. } => "outside_color_identity",
            ValidationError::DuplicateNonBasic { .. } => "duplicate_non_basic",
        }
    }
}
