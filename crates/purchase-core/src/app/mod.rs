//! App - purchase update の処理
//!
//! # 含まれるもの
//! - **builder**: HandlerBuilder（Fail-fast な構築）
//! - **config**: HandlerConfig（JSON 設定）
//! - **handler**: PurchaseUpdateHandler（decide → billing 実行）

pub mod builder;
pub mod config;
pub mod handler;

pub use self::builder::{BuildError, HandlerBuilder};
pub use self::config::{ConfigError, HandlerConfig};
pub use self::handler::{
    Execution, HandledPurchase, HandlerError, PurchaseUpdate, PurchaseUpdateHandler,
};
