//! Decision model: which follow-up action a purchase needs.
//!
//! The decider is a pure function: given the consumable flag and a read-only
//! view of the purchase, it returns the next action without side effects.
//! Executing that action (consume / acknowledge against the billing API) is
//! handled by `app::PurchaseUpdateHandler`.

use super::action::PurchaseAction;
use super::purchase::PlatformPurchase;
use crate::impls::PurchaseDetailsAdapter;
use crate::ports::PurchaseDetails;

/// Decide the follow-up action for a purchase.
///
/// Evaluated in order, first match wins:
/// 1. no purchase -> `None`
/// 2. state is not `Purchased` (pending, unspecified) -> `None`
/// 3. consumable -> `Consume`, whatever the acknowledgement state
/// 4. already acknowledged -> `None`
/// 5. otherwise -> `Acknowledge`
pub fn decide<P: PurchaseDetails + ?Sized>(
    is_consumable: bool,
    purchase: Option<&P>,
) -> PurchaseAction {
    let Some(purchase) = purchase else {
        return PurchaseAction::None;
    };
    if !purchase.purchase_state().is_purchased() {
        return PurchaseAction::None;
    }
    if is_consumable {
        return PurchaseAction::Consume;
    }
    if purchase.is_acknowledged() {
        return PurchaseAction::None;
    }
    PurchaseAction::Acknowledge
}

/// Same as [`decide`], for the platform record.
pub fn decide_platform(is_consumable: bool, purchase: Option<&PlatformPurchase>) -> PurchaseAction {
    let adapter = purchase.map(PurchaseDetailsAdapter::new);
    decide(is_consumable, adapter.as_ref())
}
