use std::error::Error;
use std::sync::Arc;

use purchase_core::app::{HandlerBuilder, HandlerConfig, PurchaseUpdate};
use purchase_core::domain::{PlatformPurchase, PurchaseState};
use purchase_core::impls::InMemoryBillingClient;

/// RUST_LOG で詳細度を制御（例: RUST_LOG=purchase_core=debug）
fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr)
        .init();
}

/// 引数がないときのサンプル：全ての分岐を 1 回ずつ通る
fn sample_updates() -> Vec<PurchaseUpdate> {
    vec![
        PurchaseUpdate::new(
            PlatformPurchase::new("tok-coins", PurchaseState::Purchased)
                .with_product("coins_100")
                .with_order_id("GPA.0001"),
        ),
        PurchaseUpdate::new(
            PlatformPurchase::new("tok-coins-again", PurchaseState::Purchased)
                .with_product("coins_100")
                .acknowledged(true),
        )
        .consumable(true),
        PurchaseUpdate::new(
            PlatformPurchase::new("tok-ads", PurchaseState::Purchased).with_product("remove_ads"),
        ),
        PurchaseUpdate::new(
            PlatformPurchase::new("tok-ads-old", PurchaseState::Purchased)
                .with_product("remove_ads")
                .acknowledged(true),
        ),
        PurchaseUpdate::new(
            PlatformPurchase::new("tok-pending", PurchaseState::Pending).with_product("coins_100"),
        ),
    ]
}

/// 1 件ずつ decode して処理し、JSON 行を返す
///
/// decode できない要素はその行だけエラーにして、残りは処理を続ける。
async fn run(
    records: Vec<serde_json::Value>,
    config: HandlerConfig,
    billing: Arc<InMemoryBillingClient>,
) -> Result<Vec<String>, Box<dyn Error>> {
    let handler = HandlerBuilder::new()
        .billing_client(billing.clone())
        .config(config)
        .build()?;

    let mut lines = Vec::with_capacity(records.len() + 1);
    for (index, record) in records.into_iter().enumerate() {
        let line = match serde_json::from_value::<PurchaseUpdate>(record) {
            Ok(update) => match handler.handle(&update).await {
                Ok(handled) => serde_json::to_string(&handled)?,
                Err(e) => serde_json::json!({ "index": index, "error": e.to_string() }).to_string(),
            },
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping undecodable update");
                serde_json::json!({ "index": index, "error": format!("invalid update: {e}") })
                    .to_string()
            }
        };
        lines.push(line);
    }

    lines.push(serde_json::json!({ "billingCalls": billing.calls().await }).to_string());
    Ok(lines)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    setup_tracing();

    // (A) 入力：<updates.json> [config.json]、なければサンプル
    let mut args = std::env::args().skip(1);
    let (records, config) = match args.next() {
        Some(path) => {
            let records: Vec<serde_json::Value> =
                serde_json::from_str(&std::fs::read_to_string(&path)?)?;
            let config = match args.next() {
                Some(cfg_path) => {
                    HandlerConfig::from_json_str(&std::fs::read_to_string(&cfg_path)?)?
                }
                None => HandlerConfig::default(),
            };
            (records, config)
        }
        None => (
            sample_updates()
                .iter()
                .map(serde_json::to_value)
                .collect::<Result<Vec<_>, _>>()?,
            HandlerConfig::default().with_consumable_product("coins_100"),
        ),
    };
    tracing::info!(updates = records.len(), ?config, "starting");

    // (B) billing は in-memory、(C) 1 件ずつ処理して JSON 行で出力
    let billing = Arc::new(InMemoryBillingClient::new());
    for line in run(records, config, billing).await? {
        println!("{line}");
    }
    Ok(())
}
