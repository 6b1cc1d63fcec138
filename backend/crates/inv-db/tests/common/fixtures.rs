use inv_core::{NewSale, PaymentStatus};

use serde_json::{Map, Value};

/// A valid sale of 3 units at 50.00 USD
pub fn create_test_new_sale() -> NewSale {
    let mut attributes = Map::new();
    attributes.insert(String::from("color"), Value::from("red"));

    NewSale {
        product_id: 11,
        product_name: String::from("Widget"),
        product_attributes: attributes,
        quantity: 3,
        unit_price: 50.0,
        extra_costs: 0.0,
        total_price: 150.0,
        currency: String::from("USD"),
        payment_status: PaymentStatus::Credit,
        buyer_name: Some(String::from("Jane Buyer")),
        buyer_contact: None,
        buyer_location: None,
    }
}
