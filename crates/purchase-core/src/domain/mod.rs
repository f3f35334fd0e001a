//! Domain model (states, actions, purchase records, the decision itself).

pub mod action;
pub mod decision;
pub mod errors;
pub mod ids;
pub mod purchase;
pub mod state;

pub use action::PurchaseAction;
pub use decision::{decide, decide_platform};
pub use errors::BillingError;
pub use ids::UpdateId;
pub use purchase::PlatformPurchase;
pub use state::{PurchaseStage, PurchaseState};
