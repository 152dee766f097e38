use serde::{Deserialize, Serialize};
use std::fmt;

use super::lenient;

/// How a KOT was settled. Values outside the known four are kept verbatim so
/// the aggregator can report them instead of dropping them silently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "Option<String>", into = "String")]
pub enum PaymentMethod {
    Cash,
    Upi,
    Card,
    Split,
    Unrecognized(String),
    #[default]
    Missing,
}

impl From<Option<String>> for PaymentMethod {
    fn from(value: Option<String>) -> Self {
        match value.as_deref() {
            None => Self::Missing,
            Some("cash") => Self::Cash,
            Some("upi") => Self::Upi,
            Some("card") => Self::Card,
            Some("split") => Self::Split,
            Some(other) => Self::Unrecognized(other.to_string()),
        }
    }
}

impl From<PaymentMethod> for String {
    fn from(value: PaymentMethod) -> Self {
        value.to_string()
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cash => write!(f, "cash"),
            Self::Upi => write!(f, "upi"),
            Self::Card => write!(f, "card"),
            Self::Split => write!(f, "split"),
            Self::Unrecognized(raw) => write!(f, "{raw}"),
            Self::Missing => Ok(()),
        }
    }
}

/// Kitchen status of a KOT.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum KotStatus {
    Served,
    Ready,
    Preparing,
    Other(String),
}

/// Statuses that count towards collections. Everything else (cancelled,
/// pending, ...) is left out of the report.
pub const REPORTABLE_STATUSES: [KotStatus; 3] =
    [KotStatus::Served, KotStatus::Ready, KotStatus::Preparing];

impl KotStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Served => "served",
            Self::Ready => "ready",
            Self::Preparing => "preparing",
            Self::Other(raw) => raw,
        }
    }

    pub fn is_reportable(&self) -> bool {
        REPORTABLE_STATUSES.contains(self)
    }
}

impl From<String> for KotStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "served" => Self::Served,
            "ready" => Self::Ready,
            "preparing" => Self::Preparing,
            _ => Self::Other(value),
        }
    }
}

impl From<KotStatus> for String {
    fn from(value: KotStatus) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KotItem {
    #[serde(default, deserialize_with = "lenient::amount")]
    pub quantity: Option<f64>,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub unit_price: Option<f64>,
}

impl KotItem {
    pub fn line_total(&self) -> f64 {
        self.quantity.unwrap_or(0.0) * self.unit_price.unwrap_or(0.0)
    }
}

/// A kitchen order ticket as returned by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KotRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub cash_amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub upi_amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub card_amount: Option<f64>,
    #[serde(default)]
    pub kot_items: Option<Vec<KotItem>>,
    #[serde(default)]
    pub status: Option<KotStatus>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl KotRecord {
    /// Sum of quantity × unit price over the ticket's items.
    pub fn items_total(&self) -> f64 {
        self.kot_items
            .as_deref()
            .map(|items| items.iter().map(KotItem::line_total).sum())
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_methods_and_statuses_parse() {
        let rec: KotRecord = serde_json::from_str(
            r#"{"payment_method":"upi","status":"ready","kot_items":[{"quantity":2,"unit_price":"45.5"}]}"#,
        )
        .unwrap();
        assert_eq!(rec.payment_method, PaymentMethod::Upi);
        assert_eq!(rec.status, Some(KotStatus::Ready));
        assert_eq!(rec.items_total(), 91.0);
    }

    #[test]
    fn unknown_and_missing_methods_are_explicit() {
        let rec: KotRecord =
            serde_json::from_str(r#"{"payment_method":"wallet","status":"cancelled"}"#).unwrap();
        assert_eq!(rec.payment_method, PaymentMethod::Unrecognized("wallet".into()));
        assert_eq!(rec.status, Some(KotStatus::Other("cancelled".into())));
        assert!(!rec.status.unwrap().is_reportable());

        let rec: KotRecord = serde_json::from_str(r#"{"payment_method":null}"#).unwrap();
        assert_eq!(rec.payment_method, PaymentMethod::Missing);
        let rec: KotRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(rec.payment_method, PaymentMethod::Missing);
    }

    #[test]
    fn missing_items_total_zero() {
        let rec: KotRecord =
            serde_json::from_str(r#"{"payment_method":"cash","kot_items":null}"#).unwrap();
        assert_eq!(rec.items_total(), 0.0);

        let rec: KotRecord = serde_json::from_str(
            r#"{"payment_method":"cash","kot_items":[{"quantity":3},{"unit_price":10}]}"#,
        )
        .unwrap();
        assert_eq!(rec.items_total(), 0.0);
    }
}
