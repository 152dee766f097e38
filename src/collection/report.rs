use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use super::{DateRange, PaymentSummary, Tender};
use crate::format::{format_day, format_inr};

/// One of the four headline figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryTile {
    pub tag: String,
    pub value: f64,
    pub amount: String,
    /// "Direct: X | Split: Y" when part of the amount came from split tickets
    pub detail: Option<String>,
}

/// A row of the detailed breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownRow {
    pub heading: String,
    pub detail: String,
    pub value: f64,
    pub amount: String,
}

/// Everything needed to display or print a collection report.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionReport {
    pub business_name: String,
    pub start: String,
    pub end: String,
    pub range_label: String,
    pub generated_at: String,
    pub summary: PaymentSummary,
    pub tiles: Vec<SummaryTile>,
    pub breakdown: Vec<BreakdownRow>,
}

fn direct_split(summary: &PaymentSummary, tender: Tender) -> String {
    format!(
        "Direct: {} | Split: {}",
        format_inr(summary.direct(tender)),
        format_inr(summary.split(tender))
    )
}

pub fn tiles(summary: &PaymentSummary) -> Vec<SummaryTile> {
    let mut tiles: Vec<SummaryTile> = Tender::ALL
        .iter()
        .map(|&tender| SummaryTile {
            tag: tender.tag().to_string(),
            value: summary.total(tender),
            amount: format_inr(summary.total(tender)),
            detail: (summary.split(tender) > 0.0).then(|| direct_split(summary, tender)),
        })
        .collect();

    tiles.push(SummaryTile {
        tag: "TOTAL".to_string(),
        value: summary.grand_total(),
        amount: format_inr(summary.grand_total()),
        detail: Some("All Payment Methods".to_string()),
    });
    tiles
}

pub fn breakdown(summary: &PaymentSummary, range: &DateRange) -> Vec<BreakdownRow> {
    let mut rows: Vec<BreakdownRow> = Tender::ALL
        .iter()
        .map(|&tender| BreakdownRow {
            heading: tender.heading().to_string(),
            detail: direct_split(summary, tender),
            value: summary.total(tender),
            amount: format_inr(summary.total(tender)),
        })
        .collect();

    rows.push(BreakdownRow {
        heading: "Total Collections".to_string(),
        detail: range.label(),
        value: summary.grand_total(),
        amount: format_inr(summary.grand_total()),
    });
    rows
}

impl CollectionReport {
    pub fn new(business_name: &str, range: &DateRange, summary: &PaymentSummary) -> Self {
        Self {
            business_name: business_name.to_string(),
            start: format_day(&range.start),
            end: format_day(&range.end),
            range_label: range.label(),
            generated_at: chrono::Local::now().format("%d/%m/%Y %H:%M").to_string(),
            summary: *summary,
            tiles: tiles(summary),
            breakdown: breakdown(summary, range),
        }
    }

    /// Terminal rendering: headline tiles, then the breakdown table.
    pub fn to_text(&self) -> String {
        #[derive(Tabled)]
        struct TileRow {
            #[tabled(rename = "METHOD")]
            tag: String,
            #[tabled(rename = "AMOUNT")]
            amount: String,
            #[tabled(rename = "NOTE")]
            detail: String,
        }

        #[derive(Tabled)]
        struct DetailRow {
            #[tabled(rename = "PAYMENTS")]
            heading: String,
            #[tabled(rename = "DETAIL")]
            detail: String,
            #[tabled(rename = "AMOUNT")]
            amount: String,
        }

        let tile_rows: Vec<TileRow> = self
            .tiles
            .iter()
            .map(|t| TileRow {
                tag: t.tag.clone(),
                amount: t.amount.clone(),
                detail: t.detail.clone().unwrap_or_default(),
            })
            .collect();
        let detail_rows: Vec<DetailRow> = self
            .breakdown
            .iter()
            .map(|r| DetailRow {
                heading: r.heading.clone(),
                detail: r.detail.clone(),
                amount: r.amount.clone(),
            })
            .collect();

        let mut out = String::new();
        out.push_str("Collection Report\n");
        out.push_str(&format!("{}\n\n", self.range_label));
        out.push_str(&Table::new(tile_rows).with(Style::rounded()).to_string());
        out.push_str("\n\nPayment Breakdown\n");
        out.push_str(&Table::new(detail_rows).with(Style::rounded()).to_string());

        if self.summary.unrecognized > 0 {
            out.push_str(&format!(
                "\n\n{} ticket(s) with an unrecognized payment method were not counted.",
                self.summary.unrecognized
            ));
        }
        out
    }
}
