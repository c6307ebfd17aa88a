//! The Card entity - the ownership boundary for benefits.

use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

use super::ids::CardId;

/// A user-owned credit card. Benefits belong to exactly one card and are
/// cascade-deleted with it, ledger entries included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub card_id: CardId,
    pub name: String,
    #[serde(default)]
    pub issuer: Option<String>,
    pub created_at: DateTime,
}
