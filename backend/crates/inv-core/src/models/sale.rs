use crate::{PaymentStatus, UserId};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A recorded sale as persisted and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub product_attributes: Map<String, Value>,
    pub quantity: i64,
    pub unit_price: f64,
    /// Delivery charges and similar costs on top of the unit price
    pub extra_costs: f64,
    pub total_price: f64,
    pub currency: String,
    pub seller_id: UserId,
    pub payment_status: PaymentStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_location: Option<String>,

    // Audit
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
