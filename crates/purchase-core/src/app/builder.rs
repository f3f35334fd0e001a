//! HandlerBuilder - PurchaseUpdateHandler の構築とワイヤリング
//!
//! # 学習ポイント
//! - Builder パターンの実装
//! - 起動時検証（Fail-fast 設計）

use std::sync::Arc;

use super::config::HandlerConfig;
use super::handler::PurchaseUpdateHandler;
use crate::ports::BillingClient;

/// HandlerBuilder は PurchaseUpdateHandler を構築
///
/// # 使用例
/// ```ignore
/// let handler = HandlerBuilder::new()
///     .billing_client(Arc::new(InMemoryBillingClient::new()))
///     .config(HandlerConfig::default())
///     .build()?;
/// ```
///
/// # Fail-fast 設計
/// - billing client が未設定なら build() で BuildError を返す
/// - config は省略可能（デフォルト値）
pub struct HandlerBuilder {
    billing: Option<Arc<dyn BillingClient>>,
    config: HandlerConfig,
}

/// BuildError は handler 構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("No billing client was set. Call billing_client() before build().")]
    MissingBillingClient,
}

impl HandlerBuilder {
    pub fn new() -> Self {
        Self {
            billing: None,
            config: HandlerConfig::default(),
        }
    }

    pub fn billing_client<B: BillingClient + 'static>(mut self, client: Arc<B>) -> Self {
        let client: Arc<dyn BillingClient> = client;
        self.billing = Some(client);
        self
    }

    pub fn config(mut self, config: HandlerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<PurchaseUpdateHandler, BuildError> {
        let billing = self.billing.ok_or(BuildError::MissingBillingClient)?;
        Ok(PurchaseUpdateHandler::new(billing, self.config))
    }
}

impl Default for HandlerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
