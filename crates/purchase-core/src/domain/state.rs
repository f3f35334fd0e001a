//! State - 購入の状態
//!
//! billing client が報告する購入のライフサイクル段階。
//! decider にとって意味があるのは `Purchased` だけで、それ以外は
//! すべて「未購入」として扱います。

use serde::{Deserialize, Serialize};

/// PurchaseState は billing client が報告する購入状態
///
/// # プラットフォームのコード
/// - 0: UNSPECIFIED_STATE
/// - 1: PURCHASED
/// - 2: PENDING
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PurchaseState {
    Unspecified,
    Purchased,
    Pending,
}

impl PurchaseState {
    pub const UNSPECIFIED_CODE: i32 = 0;
    pub const PURCHASED_CODE: i32 = 1;
    pub const PENDING_CODE: i32 = 2;

    /// Map a platform state code to a `PurchaseState`.
    ///
    /// Unknown codes become `Unspecified`; they are "not purchased", never an error.
    pub fn from_code(code: i32) -> Self {
        match code {
            Self::PURCHASED_CODE => PurchaseState::Purchased,
            Self::PENDING_CODE => PurchaseState::Pending,
            _ => PurchaseState::Unspecified,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            PurchaseState::Unspecified => Self::UNSPECIFIED_CODE,
            PurchaseState::Purchased => Self::PURCHASED_CODE,
            PurchaseState::Pending => Self::PENDING_CODE,
        }
    }

    pub fn is_purchased(self) -> bool {
        self == PurchaseState::Purchased
    }
}

/// PurchaseStage は購入の記述的な段階（ログ・テスト用）
///
/// decider はこの型を使いません。遷移も持ちません。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseStage {
    NoPurchase,
    Pending,
    PurchasedUnacknowledged,
    PurchasedAcknowledged,
}

impl PurchaseStage {
    /// Classify an optional purchase. Anything not `Purchased` is `Pending`.
    pub fn of<P: crate::ports::PurchaseDetails + ?Sized>(purchase: Option<&P>) -> Self {
        match purchase {
            None => PurchaseStage::NoPurchase,
            Some(p) if !p.purchase_state().is_purchased() => PurchaseStage::Pending,
            Some(p) if p.is_acknowledged() => PurchaseStage::PurchasedAcknowledged,
            Some(_) => PurchaseStage::PurchasedUnacknowledged,
        }
    }
}
