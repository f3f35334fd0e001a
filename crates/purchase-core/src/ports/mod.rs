//! Ports - 抽象化レイヤー
//!
//! 外部システム（プラットフォームの billing client と購入レコード）への
//! インターフェースを定義し、実装の詳細を隠蔽します。

pub mod billing;
pub mod purchase_details;

pub use self::billing::BillingClient;
pub use self::purchase_details::PurchaseDetails;
