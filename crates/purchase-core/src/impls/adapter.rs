//! PurchaseDetailsAdapter - PlatformPurchase を PurchaseDetails に変換
//!
//! 生の state code を `PurchaseState` に変換するだけの薄い adapter です。

use crate::domain::{PlatformPurchase, PurchaseState};
use crate::ports::PurchaseDetails;

/// PurchaseDetailsAdapter は PlatformPurchase を借用して読み取り専用ビューを提供
#[derive(Debug, Clone, Copy)]
pub struct PurchaseDetailsAdapter<'a> {
    purchase: &'a PlatformPurchase,
}

impl<'a> PurchaseDetailsAdapter<'a> {
    pub fn new(purchase: &'a PlatformPurchase) -> Self {
        Self { purchase }
    }
}

impl PurchaseDetails for PurchaseDetailsAdapter<'_> {
    fn purchase_state(&self) -> PurchaseState {
        PurchaseState::from_code(self.purchase.purchase_state)
    }

    fn is_acknowledged(&self) -> bool {
        self.purchase.acknowledged
    }
}
