//! BillingClient port - プラットフォーム billing API の抽象化
//!
//! decider が返した action を実際に実行する外部協力者です。
//! 本番ではプラットフォームの billing client をラップし、
//! 開発・テストでは `impls::InMemoryBillingClient` を使います。

use async_trait::async_trait;

use crate::domain::BillingError;

/// BillingClient は consume / acknowledge を実行
///
/// # 契約
/// - どちらも purchase token 単位の 1 回の呼び出し
/// - 失敗は `BillingError` で返す（リトライは呼び出し側の責務外）
#[async_trait]
pub trait BillingClient: Send + Sync {
    async fn consume(&self, purchase_token: &str) -> Result<(), BillingError>;

    async fn acknowledge(&self, purchase_token: &str) -> Result<(), BillingError>;
}
