//! InMemoryBillingClient - 開発用の billing client
//!
//! # 学習ポイント
//! - tokio::sync::Mutex による async context での排他制御
//! - 呼び出し履歴の記録（テストでの検証用）
//! - 失敗の注入（エラー経路のテスト用）

use std::collections::HashSet;

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::domain::{BillingError, PurchaseAction};
use crate::ports::BillingClient;

/// BillingCall は billing client への 1 回の呼び出し
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BillingCall {
    pub action: PurchaseAction,
    pub token: String,
}

#[derive(Debug, Default)]
struct Inner {
    calls: Vec<BillingCall>,
    acknowledged: HashSet<String>,
    consumed: HashSet<String>,
    next_failure: Option<BillingError>,
}

/// InMemoryBillingClient は呼び出しを記録するだけの billing client
///
/// # 実装詳細
/// - 成功・失敗に関わらず全ての呼び出しを順番に記録
/// - 同じ token への 2 回目の acknowledge / consume は `ItemNotOwned`
/// - `fail_next()` で次の 1 回だけ任意のエラーを返す
///
/// # 使用例
/// ```ignore
/// let billing = InMemoryBillingClient::new();
/// billing.acknowledge("tok-1").await?;
/// assert_eq!(billing.calls().await.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryBillingClient {
    inner: Mutex<Inner>,
}

impl InMemoryBillingClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// 次の 1 回の呼び出しを `error` で失敗させる
    pub async fn fail_next(&self, error: BillingError) {
        self.inner.lock().await.next_failure = Some(error);
    }

    /// 記録された呼び出し（呼び出し順）
    pub async fn calls(&self) -> Vec<BillingCall> {
        self.inner.lock().await.calls.clone()
    }

    pub async fn is_acknowledged(&self, token: &str) -> bool {
        self.inner.lock().await.acknowledged.contains(token)
    }

    pub async fn is_consumed(&self, token: &str) -> bool {
        self.inner.lock().await.consumed.contains(token)
    }

    async fn record(&self, action: PurchaseAction, token: &str) -> Result<(), BillingError> {
        let mut inner = self.inner.lock().await;
        inner.calls.push(BillingCall {
            action,
            token: token.to_string(),
        });

        if let Some(error) = inner.next_failure.take() {
            return Err(error);
        }

        let done = if action == PurchaseAction::Consume {
            &mut inner.consumed
        } else {
            &mut inner.acknowledged
        };
        let fresh = done.insert(token.to_string());
        if !fresh {
            return Err(BillingError::ItemNotOwned {
                token: token.to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl BillingClient for InMemoryBillingClient {
    async fn consume(&self, purchase_token: &str) -> Result<(), BillingError> {
        self.record(PurchaseAction::Consume, purchase_token).await
    }

    async fn acknowledge(&self, purchase_token: &str) -> Result<(), BillingError> {
        self.record(PurchaseAction::Acknowledge, purchase_token).await
    }
}
