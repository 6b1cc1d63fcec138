use inv_core::Sale;

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

pub const SALE_RECORDED_TITLE: &str = "Sale Recorded";

/// Notification pushed to subscribed clients. Serialized with a `type` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BroadcastEvent {
    NewSale(SaleEvent),
}

impl BroadcastEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::NewSale(_) => "new_sale",
        }
    }
}

impl From<SaleEvent> for BroadcastEvent {
    fn from(event: SaleEvent) -> Self {
        Self::NewSale(event)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleEvent {
    pub sale_id: i64,
    pub product_name: String,
    pub quantity: i64,
    pub total_price: f64,
    pub currency: String,
    pub seller_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub branch_name: String,
    pub title: String,
    pub message: String,
    /// RFC 3339, seconds precision
    pub created_at: String,
}

impl SaleEvent {
    /// Describe a persisted sale. Seller details are display-only and may be empty.
    pub fn from_sale(sale: &Sale, seller_name: &str, branch_name: Option<&str>) -> Self {
        Self {
            sale_id: sale.id,
            product_name: sale.product_name.clone(),
            quantity: sale.quantity,
            total_price: sale.total_price,
            currency: sale.currency.clone(),
            seller_name: seller_name.to_string(),
            branch_name: branch_name.unwrap_or_default().to_string(),
            title: String::from(SALE_RECORDED_TITLE),
            message: format!(
                "Recorded sale of {} units of {} for {} {:.2}",
                sale.quantity, sale.product_name, sale.currency, sale.total_price
            ),
            created_at: sale.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}
