use serde::{Deserialize, Serialize};

use super::lenient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "Option<String>", into = "String")]
pub enum OrderType {
    DineIn,
    Delivery,
    TakeAway,
    #[default]
    Unrecognized,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DineIn => "dine_in",
            Self::Delivery => "delivery",
            Self::TakeAway => "take_away",
            Self::Unrecognized => "unknown",
        }
    }

    /// Badge text. Anything that is neither dine-in nor delivery reads as
    /// take-away.
    pub fn label(&self) -> &'static str {
        match self {
            Self::DineIn => "Dine In",
            Self::Delivery => "Delivery",
            Self::TakeAway | Self::Unrecognized => "Take Away",
        }
    }
}

impl From<Option<String>> for OrderType {
    fn from(value: Option<String>) -> Self {
        match value.as_deref() {
            Some("dine_in") => Self::DineIn,
            Some("delivery") => Self::Delivery,
            Some("take_away") => Self::TakeAway,
            _ => Self::Unrecognized,
        }
    }
}

impl From<OrderType> for String {
    fn from(value: OrderType) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Invoice {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub invoice_number: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub table_number: Option<String>,
    #[serde(default)]
    pub order_type: OrderType,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub subtotal: Option<f64>,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub tax: Option<f64>,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub total: Option<f64>,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvoiceLineItem {
    #[serde(default)]
    pub menu_item_id: String,
    #[serde(default)]
    pub menu_item_name: String,
    #[serde(default, deserialize_with = "lenient::count")]
    pub quantity: Option<u32>,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub unit_price: Option<f64>,
    /// Stored line total; display always recomputes from quantity and price.
    #[serde(default, deserialize_with = "lenient::amount")]
    pub total: Option<f64>,
}

impl InvoiceLineItem {
    pub fn line_total(&self) -> f64 {
        f64::from(self.quantity.unwrap_or(0)) * self.unit_price.unwrap_or(0.0)
    }
}

/// An invoice together with its items, as stored in an invoice JSON file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvoiceDocument {
    pub invoice: Invoice,
    #[serde(default)]
    pub items: Vec<InvoiceLineItem>,
}
