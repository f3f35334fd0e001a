//! Errors - billing 呼び出しのエラー
//!
//! decider 自体は失敗しません。ここにあるのは action を実行したときに
//! billing client が返すエラーだけです。

use thiserror::Error;

/// BillingError は billing client が報告する失敗
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BillingError {
    #[error("billing service unavailable")]
    ServiceUnavailable,

    #[error("item not owned for purchase_token={token}")]
    ItemNotOwned { token: String },

    #[error("developer error: {0}")]
    DeveloperError(String),

    #[error("{0}")]
    Other(String),
}
