//! HandlerConfig - purchase update handler の設定
//!
//! ホストアプリから JSON で渡される設定です。全フィールドにデフォルト値があり、
//! 空の `{}` でも有効な設定になります。

use serde::{Deserialize, Serialize};

/// ConfigError は設定の読み込みエラー
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid handler config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HandlerConfig {
    /// `false` のとき ACKNOWLEDGE は実行せず Deferred として返す。
    /// ホストは後で `acknowledge_purchase` を呼ぶ。
    pub auto_acknowledge_purchases: bool,

    /// update が consumable かどうかを明示しないときに使う product id の一覧
    pub consumable_product_ids: Vec<String>,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            auto_acknowledge_purchases: true,
            consumable_product_ids: Vec::new(),
        }
    }
}

impl HandlerConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn with_auto_acknowledge(mut self, enabled: bool) -> Self {
        self.auto_acknowledge_purchases = enabled;
        self
    }

    pub fn with_consumable_product(mut self, product_id: impl Into<String>) -> Self {
        self.consumable_product_ids.push(product_id.into());
        self
    }

    pub fn is_consumable_product(&self, product_id: &str) -> bool {
        self.consumable_product_ids.iter().any(|p| p == product_id)
    }
}
