use chrono::NaiveDateTime;

use crate::collection::DateRange;
use crate::format::local_instant;
use crate::model::{KotStatus, REPORTABLE_STATUSES};

/// Columns fetched for each ticket, with the nested item rows.
pub const KOT_SELECT: &str =
    "id,payment_method,cash_amount,upi_amount,card_amount,status,created_at,kot_items(quantity,unit_price)";

/// Local wall-clock bound plus the local UTC offset.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Filter set for the collection report: tickets created inside the range
/// whose kitchen status is reportable.
#[derive(Debug, Clone, PartialEq)]
pub struct KotQuery {
    pub created_from: NaiveDateTime,
    pub created_to: NaiveDateTime,
    pub statuses: Vec<KotStatus>,
}

impl KotQuery {
    pub fn for_range(range: &DateRange) -> Self {
        Self {
            created_from: range.start_bound(),
            created_to: range.end_bound(),
            statuses: REPORTABLE_STATUSES.to_vec(),
        }
    }

    pub fn matches(&self, created_at: &NaiveDateTime, status: &KotStatus) -> bool {
        *created_at >= self.created_from
            && *created_at <= self.created_to
            && self.statuses.contains(status)
    }

    /// PostgREST query parameters, in request order.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let statuses: Vec<&str> = self.statuses.iter().map(KotStatus::as_str).collect();
        vec![
            ("select", KOT_SELECT.to_string()),
            (
                "created_at",
                format!("gte.{}", local_instant(&self.created_from).format(TIMESTAMP_FORMAT)),
            ),
            (
                "created_at",
                format!("lte.{}", local_instant(&self.created_to).format(TIMESTAMP_FORMAT)),
            ),
            ("status", format!("in.({})", statuses.join(","))),
        ]
    }
}
