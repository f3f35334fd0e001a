//! Action model: the follow-up step recommended for a purchase.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The next step the billing collaborator should perform.
///
/// Produced fresh on each decision and consumed immediately by the caller.
/// Serialized as SCREAMING_SNAKE_CASE: CONSUME / ACKNOWLEDGE / NONE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PurchaseAction {
    /// Finalize a consumable purchase so it can be bought again.
    Consume,

    /// Confirm a non-consumable purchase exactly once.
    Acknowledge,

    /// Nothing to do.
    None,
}

impl PurchaseAction {
    /// Whether this action implies a call against the billing API.
    pub fn requires_billing_call(self) -> bool {
        !matches!(self, PurchaseAction::None)
    }
}

impl fmt::Display for PurchaseAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PurchaseAction::Consume => "CONSUME",
            PurchaseAction::Acknowledge => "ACKNOWLEDGE",
            PurchaseAction::None => "NONE",
        };
        f.write_str(s)
    }
}
