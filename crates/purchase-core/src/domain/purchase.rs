//! Purchase record as reported by the platform billing client.
//!
//! This module only defines the "shape" of the record. Deciding what to do
//! with it lives in `decision`, and the read-only view the decider needs is
//! provided by `impls::adapter`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::state::PurchaseState;

/// A purchase record from the billing client's purchase listener.
///
/// `purchase_state` keeps the raw platform code on purpose: records from
/// newer billing libraries may carry codes we do not know yet. An absent or
/// malformed code decodes as `UNSPECIFIED_CODE`, so the record decides NONE.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformPurchase {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,

    #[serde(default)]
    pub package_name: String,

    #[serde(default)]
    pub product_ids: Vec<String>,

    /// Epoch milliseconds.
    #[serde(default)]
    pub purchase_time: i64,

    #[serde(default, deserialize_with = "lenient_state_code")]
    pub purchase_state: i32,

    pub purchase_token: String,

    #[serde(default)]
    pub acknowledged: bool,

    #[serde(default)]
    pub auto_renewing: bool,

    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawStateCode {
    Code(i64),
    Other(serde::de::IgnoredAny),
}

/// Non-integer (`"PENDING"`, `null`, ...) or out-of-range codes become `UNSPECIFIED_CODE`.
fn lenient_state_code<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    let code = match RawStateCode::deserialize(deserializer)? {
        RawStateCode::Code(n) => i32::try_from(n).unwrap_or(PurchaseState::UNSPECIFIED_CODE),
        RawStateCode::Other(_) => PurchaseState::UNSPECIFIED_CODE,
    };
    Ok(code)
}

impl PlatformPurchase {
    pub fn new(purchase_token: impl Into<String>, state: PurchaseState) -> Self {
        Self {
            order_id: None,
            package_name: String::new(),
            product_ids: Vec::new(),
            purchase_time: 0,
            purchase_state: state.code(),
            purchase_token: purchase_token.into(),
            acknowledged: false,
            auto_renewing: false,
            quantity: default_quantity(),
        }
    }

    pub fn with_product(mut self, product_id: impl Into<String>) -> Self {
        self.product_ids.push(product_id.into());
        self
    }

    pub fn with_order_id(mut self, order_id: impl Into<String>) -> Self {
        self.order_id = Some(order_id.into());
        self
    }

    pub fn with_purchase_time(mut self, epoch_millis: i64) -> Self {
        self.purchase_time = epoch_millis;
        self
    }

    pub fn acknowledged(mut self, acknowledged: bool) -> Self {
        self.acknowledged = acknowledged;
        self
    }

    /// Purchase time as a UTC timestamp; `None` if the millis are out of range.
    pub fn purchase_time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.purchase_time)
    }
}
