//! PurchaseDetails port - 購入レコードの読み取り専用ビュー
//!
//! decider を具体的なプラットフォームの購入型から切り離すための
//! 狭いインターフェースです。テストでは fake を実装して使います。

use crate::domain::PurchaseState;

/// PurchaseDetails は decider が必要とする 2 つの事実だけを公開
///
/// # 設計原則
/// - 読み取り専用（decider はレコードを変更しない）
/// - 実装は薄い adapter（`impls::PurchaseDetailsAdapter`）
pub trait PurchaseDetails {
    fn purchase_state(&self) -> PurchaseState;
    fn is_acknowledged(&self) -> bool;
}
