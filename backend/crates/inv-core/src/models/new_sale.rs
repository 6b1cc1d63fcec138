use crate::{CoreError, ErrorLocation, PaymentStatus, Result as CoreErrorResult};

use std::panic::Location;

use serde::Deserialize;
use serde_json::{Map, Value};

/// Request body for recording a sale.
///
/// `totalPrice` is taken as given so the client can override the computed
/// total. A `sellerId` sent by the client is ignored; the seller is always the
/// authenticated user.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSale {
    pub product_id: i64,
    pub product_name: String,
    #[serde(default)]
    pub product_attributes: Map<String, Value>,
    pub quantity: i64,
    pub unit_price: f64,
    #[serde(default)]
    pub extra_costs: f64,
    pub total_price: f64,
    pub currency: String,
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub buyer_name: Option<String>,
    #[serde(default)]
    pub buyer_contact: Option<String>,
    #[serde(default)]
    pub buyer_location: Option<String>,
}

impl NewSale {
    #[track_caller]
    pub fn validate(&self) -> CoreErrorResult<()> {
        if self.product_name.trim().is_empty() {
            return Err(Self::invalid("productName", "productName is required"));
        }
        if self.quantity <= 0 {
            return Err(Self::invalid("quantity", "quantity must be greater than zero"));
        }
        if !is_amount(self.unit_price) {
            return Err(Self::invalid("unitPrice", "unitPrice must be a non-negative number"));
        }
        if !is_amount(self.extra_costs) {
            return Err(Self::invalid("extraCosts", "extraCosts must be a non-negative number"));
        }
        if !is_amount(self.total_price) {
            return Err(Self::invalid("totalPrice", "totalPrice must be a non-negative number"));
        }
        if self.currency.trim().is_empty() {
            return Err(Self::invalid("currency", "currency is required"));
        }

        Ok(())
    }

    #[track_caller]
    fn invalid(field: &str, message: &str) -> CoreError {
        CoreError::Validation {
            message: message.to_string(),
            field: Some(field.to_string()),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

fn is_amount(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
