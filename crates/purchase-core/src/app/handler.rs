//! PurchaseUpdateHandler - purchase update を受けて action を実行
//!
//! # 処理フロー
//! 1. consumable かどうかを決める（update の明示フラグ、なければ設定の product id 一覧）
//! 2. decider で action を決める（純粋関数）
//! 3. action を BillingClient で実行（NONE は何もしない）
//!
//! リトライはしません。billing の失敗はそのまま呼び出し側に返します。

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::config::HandlerConfig;
use crate::domain::{
    BillingError, PlatformPurchase, PurchaseAction, PurchaseStage, UpdateId, decide_platform,
};
use crate::impls::PurchaseDetailsAdapter;
use crate::ports::BillingClient;

/// PurchaseUpdate は purchase listener から届く 1 件の更新
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseUpdate {
    pub purchase: PlatformPurchase,

    /// 呼び出し側が知っている場合の consumable フラグ
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_consumable: Option<bool>,
}

impl PurchaseUpdate {
    pub fn new(purchase: PlatformPurchase) -> Self {
        Self {
            purchase,
            is_consumable: None,
        }
    }

    pub fn consumable(mut self, is_consumable: bool) -> Self {
        self.is_consumable = Some(is_consumable);
        self
    }
}

/// How the decided action was carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Execution {
    /// The billing call was made and succeeded.
    Executed,
    /// The decision was NONE.
    Skipped,
    /// ACKNOWLEDGE with auto-acknowledge disabled; left to the host.
    Deferred,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandledPurchase {
    pub id: UpdateId,
    pub purchase_token: String,
    pub product_ids: Vec<String>,
    pub action: PurchaseAction,
    pub execution: Execution,
}

/// HandlerError は action 実行時のエラー
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error("{action} failed for purchase_token={token}: {source}")]
    Billing {
        action: PurchaseAction,
        token: String,
        #[source]
        source: BillingError,
    },

    #[error("purchase has an empty purchase_token")]
    EmptyPurchaseToken,
}

/// PurchaseUpdateHandler は decider と BillingClient をつなぐ接着剤
///
/// `HandlerBuilder` で構築します。
pub struct PurchaseUpdateHandler {
    billing: Arc<dyn BillingClient>,
    config: HandlerConfig,
}

impl PurchaseUpdateHandler {
    pub(crate) fn new(billing: Arc<dyn BillingClient>, config: HandlerConfig) -> Self {
        Self { billing, config }
    }

    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    /// 明示フラグを優先し、なければ設定の product id 一覧で判定
    pub fn resolve_consumable(&self, update: &PurchaseUpdate) -> bool {
        update.is_consumable.unwrap_or_else(|| {
            update
                .purchase
                .product_ids
                .iter()
                .any(|id| self.config.is_consumable_product(id))
        })
    }

    pub async fn handle(&self, update: &PurchaseUpdate) -> Result<HandledPurchase, HandlerError> {
        let id = UpdateId::new();
        let purchase = &update.purchase;
        let is_consumable = self.resolve_consumable(update);
        let action = decide_platform(is_consumable, Some(purchase));

        debug!(
            update_id = %id,
            token = %purchase.purchase_token,
            products = ?purchase.product_ids,
            purchased_at = ?purchase.purchase_time(),
            stage = ?PurchaseStage::of(Some(&PurchaseDetailsAdapter::new(purchase))),
            is_consumable,
            %action,
            "purchase decided"
        );

        let execution = if !action.requires_billing_call() {
            Execution::Skipped
        } else if action == PurchaseAction::Acknowledge && !self.config.auto_acknowledge_purchases {
            info!(update_id = %id, token = %purchase.purchase_token, "acknowledge deferred to host");
            Execution::Deferred
        } else {
            self.execute(action, &purchase.purchase_token).await?;
            info!(update_id = %id, token = %purchase.purchase_token, %action, "billing call done");
            Execution::Executed
        };

        Ok(HandledPurchase {
            id,
            purchase_token: purchase.purchase_token.clone(),
            product_ids: purchase.product_ids.clone(),
            action,
            execution,
        })
    }

    /// 順番に処理し、update ごとに 1 つの結果を返す
    pub async fn handle_all(
        &self,
        updates: &[PurchaseUpdate],
    ) -> Vec<Result<HandledPurchase, HandlerError>> {
        let mut results = Vec::with_capacity(updates.len());
        for update in updates {
            results.push(self.handle(update).await);
        }
        results
    }

    /// auto-acknowledge 無効時に、ホストが後から acknowledge するための入口
    pub async fn acknowledge_purchase(&self, purchase_token: &str) -> Result<(), HandlerError> {
        self.execute(PurchaseAction::Acknowledge, purchase_token)
            .await?;
        info!(token = %purchase_token, "purchase acknowledged manually");
        Ok(())
    }

    async fn execute(&self, action: PurchaseAction, token: &str) -> Result<(), HandlerError> {
        if token.is_empty() {
            return Err(HandlerError::EmptyPurchaseToken);
        }
        let result = match action {
            PurchaseAction::Consume => self.billing.consume(token).await,
            PurchaseAction::Acknowledge => self.billing.acknowledge(token).await,
            PurchaseAction::None => return Ok(()),
        };
        result.map_err(|source| {
            warn!(token = %token, %action, error = %source, "billing call failed");
            HandlerError::Billing {
                action,
                token: token.to_string(),
                source,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::HandlerBuilder;
    use crate::domain::PurchaseState;
    use crate::impls::InMemoryBillingClient;

    fn handler_with(
        config: HandlerConfig,
    ) -> (PurchaseUpdateHandler, Arc<InMemoryBillingClient>) {
        let billing = Arc::new(InMemoryBillingClient::new());
        let handler = HandlerBuilder::new()
            .billing_client(billing.clone())
            .config(config)
            .build()
            .unwrap();
        (handler, billing)
    }

    fn purchased(token: &str, product: &str) -> PlatformPurchase {
        PlatformPurchase::new(token, PurchaseState::Purchased).with_product(product)
    }

    #[tokio::test]
    async fn consumable_purchase_is_consumed() {
        let (handler, billing) = handler_with(HandlerConfig::default());
        let update = PurchaseUpdate::new(purchased("tok-1", "coins_100")).consumable(true);

        let handled = handler.handle(&update).await.unwrap();

        assert_eq!(handled.action, PurchaseAction::Consume);
        assert_eq!(handled.execution, Execution::Executed);
        assert!(billing.is_consumed("tok-1").await);
    }

    #[tokio::test]
    async fn entitlement_is_acknowledged_once() {
        let (handler, billing) = handler_with(HandlerConfig::default());
        let update = PurchaseUpdate::new(purchased("tok-2", "remove_ads")).consumable(false);

        let handled = handler.handle(&update).await.unwrap();
        assert_eq!(handled.action, PurchaseAction::Acknowledge);
        assert!(billing.is_acknowledged("tok-2").await);

        let acked = PurchaseUpdate::new(purchased("tok-2", "remove_ads").acknowledged(true));
        let handled = handler.handle(&acked).await.unwrap();
        assert_eq!(handled.action, PurchaseAction::None);
        assert_eq!(handled.execution, Execution::Skipped);
        assert_eq!(billing.calls().await.len(), 1);
    }

    #[tokio::test]
    async fn pending_purchase_makes_no_billing_call() {
        let (handler, billing) = handler_with(HandlerConfig::default());
        let update = PurchaseUpdate::new(
            PlatformPurchase::new("tok-3", PurchaseState::Pending).with_product("coins_100"),
        )
        .consumable(true);

        let handled = handler.handle(&update).await.unwrap();
        assert_eq!(handled.action, PurchaseAction::None);
        assert!(billing.calls().await.is_empty());
    }

    #[tokio::test]
    async fn consumability_falls_back_to_config() {
        let config = HandlerConfig::default().with_consumable_product("coins_100");
        let (handler, _billing) = handler_with(config);

        let coins = PurchaseUpdate::new(purchased("a", "coins_100"));
        let ads = PurchaseUpdate::new(purchased("b", "remove_ads"));
        let forced = PurchaseUpdate::new(purchased("c", "coins_100")).consumable(false);

        assert!(handler.resolve_consumable(&coins));
        assert!(!handler.resolve_consumable(&ads));
        assert!(!handler.resolve_consumable(&forced));
    }

    #[tokio::test]
    async fn acknowledge_is_deferred_when_auto_acknowledge_is_off() {
        let (handler, billing) = handler_with(HandlerConfig::default().with_auto_acknowledge(false));
        let update = PurchaseUpdate::new(purchased("tok-4", "remove_ads"));

        let handled = handler.handle(&update).await.unwrap();
        assert_eq!(handled.action, PurchaseAction::Acknowledge);
        assert_eq!(handled.execution, Execution::Deferred);
        assert!(billing.calls().await.is_empty());

        handler.acknowledge_purchase("tok-4").await.unwrap();
        assert!(billing.is_acknowledged("tok-4").await);
    }

    #[tokio::test]
    async fn auto_acknowledge_off_still_consumes() {
        let (handler, billing) = handler_with(HandlerConfig::default().with_auto_acknowledge(false));
        let update = PurchaseUpdate::new(purchased("tok-5", "coins_100")).consumable(true);

        let handled = handler.handle(&update).await.unwrap();
        assert_eq!(handled.execution, Execution::Executed);
        assert!(billing.is_consumed("tok-5").await);
    }

    #[tokio::test]
    async fn billing_failure_is_returned() {
        let (handler, billing) = handler_with(HandlerConfig::default());
        billing.fail_next(BillingError::ServiceUnavailable).await;
        let update = PurchaseUpdate::new(purchased("tok-6", "remove_ads"));

        let err = handler.handle(&update).await.unwrap_err();
        assert!(matches!(
            err,
            HandlerError::Billing {
                action: PurchaseAction::Acknowledge,
                ref token,
                source: BillingError::ServiceUnavailable,
            } if token == "tok-6"
        ));
        assert_eq!(
            err.to_string(),
            "ACKNOWLEDGE failed for purchase_token=tok-6: billing service unavailable"
        );
    }

    #[tokio::test]
    async fn redelivered_consumable_reports_item_not_owned() {
        let (handler, billing) = handler_with(HandlerConfig::default());
        let update = PurchaseUpdate::new(purchased("tok-7", "coins_100")).consumable(true);

        handler.handle(&update).await.unwrap();
        let err = handler.handle(&update).await.unwrap_err();
        assert!(matches!(
            err,
            HandlerError::Billing {
                action: PurchaseAction::Consume,
                source: BillingError::ItemNotOwned { ref token },
                ..
            } if token == "tok-7"
        ));
        assert_eq!(billing.calls().await.len(), 2);
    }

    #[tokio::test]
    async fn empty_token_is_rejected_before_billing() {
        let (handler, billing) = handler_with(HandlerConfig::default());
        let update = PurchaseUpdate::new(purchased("", "coins_100")).consumable(true);

        let err = handler.handle(&update).await.unwrap_err();
        assert!(matches!(err, HandlerError::EmptyPurchaseToken));
        assert!(billing.calls().await.is_empty());

        let err = handler.acknowledge_purchase("").await.unwrap_err();
        assert!(matches!(err, HandlerError::EmptyPurchaseToken));
    }

    #[tokio::test]
    async fn empty_token_is_fine_when_nothing_to_do() {
        let (handler, _billing) = handler_with(HandlerConfig::default());
        let update = PurchaseUpdate::new(PlatformPurchase::new("", PurchaseState::Pending));

        let handled = handler.handle(&update).await.unwrap();
        assert_eq!(handled.execution, Execution::Skipped);
    }

    #[tokio::test]
    async fn handle_all_keeps_order_and_isolates_failures() {
        let (handler, billing) = handler_with(HandlerConfig::default());
        let updates = vec![
            PurchaseUpdate::new(purchased("a", "coins_100")).consumable(true),
            PurchaseUpdate::new(purchased("", "remove_ads")),
            PurchaseUpdate::new(purchased("c", "remove_ads")),
        ];

        let results = handler.handle_all(&updates).await;
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().purchase_token, "a");
        assert!(results[1].is_err());
        assert_eq!(
            results[2].as_ref().unwrap().action,
            PurchaseAction::Acknowledge
        );
        assert_eq!(billing.calls().await.len(), 2);
    }

    #[test]
    fn update_decodes_from_listener_json() {
        let update: PurchaseUpdate = serde_json::from_value(serde_json::json!({
            "purchase": {"purchaseState": 1, "purchaseToken": "t", "productIds": ["x"]},
            "isConsumable": true
        }))
        .unwrap();
        assert_eq!(update.is_consumable, Some(true));
        assert_eq!(update.purchase.purchase_token, "t");
    }
}
