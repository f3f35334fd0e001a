//! purchase-core
//!
//! In-app purchase のフォローアップ action（consume / acknowledge / none）を決める
//! 純粋関数と、それを billing client で実行するための部品。
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（state, action, purchase, decision, errors, ids）
//! - **ports**: 抽象化レイヤー（PurchaseDetails, BillingClient）
//! - **impls**: 実装（PurchaseDetailsAdapter, InMemoryBillingClient）
//! - **app**: アプリケーションロジック（builder, config, handler）

pub mod app;
pub mod domain;
pub mod impls;
pub mod ports;

pub use domain::{PurchaseAction, PurchaseState, decide, decide_platform};
pub use ports::PurchaseDetails;
