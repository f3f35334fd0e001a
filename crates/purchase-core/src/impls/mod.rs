//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **PurchaseDetailsAdapter**: PlatformPurchase 用の読み取り専用ビュー
//! - **InMemoryBillingClient**: 開発・テスト用の billing client
//!
//! 本番のプラットフォーム billing client はホスト側で `BillingClient` を実装します。

pub mod adapter;
pub mod inmem_billing;

pub use self::adapter::PurchaseDetailsAdapter;
pub use self::inmem_billing::{BillingCall, InMemoryBillingClient};
