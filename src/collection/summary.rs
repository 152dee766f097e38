use serde::Serialize;
use tracing::{debug, warn};

use crate::model::{KotRecord, PaymentMethod};

/// Running totals per payment method. Direct amounts come from item totals of
/// single-method tickets; split amounts come from the explicit sub-amounts of
/// split tickets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PaymentSummary {
    pub total_cash: f64,
    pub total_upi: f64,
    pub total_card: f64,
    pub total_split_cash: f64,
    pub total_split_upi: f64,
    pub total_split_card: f64,
    /// Tickets that contributed to any accumulator
    pub tickets: usize,
    /// Tickets skipped because their payment method is not one of the four
    pub unrecognized: usize,
}

impl PaymentSummary {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a KotRecord>,
    {
        let mut summary = Self::default();
        for record in records {
            summary.add(record);
        }
        summary
    }

    pub fn add(&mut self, record: &KotRecord) {
        match &record.payment_method {
            PaymentMethod::Cash => self.total_cash += record.items_total(),
            PaymentMethod::Upi => self.total_upi += record.items_total(),
            PaymentMethod::Card => self.total_card += record.items_total(),
            PaymentMethod::Split => {
                // split tickets count their tender amounts, never their items
                self.total_split_cash += record.cash_amount.unwrap_or(0.0);
                self.total_split_upi += record.upi_amount.unwrap_or(0.0);
                self.total_split_card += record.card_amount.unwrap_or(0.0);
            }
            PaymentMethod::Unrecognized(method) => {
                warn!(kot = ?record.id, %method, "skipping ticket with unrecognized payment method");
                self.unrecognized += 1;
                return;
            }
            PaymentMethod::Missing => {
                debug!(kot = ?record.id, "skipping ticket without payment method");
                self.unrecognized += 1;
                return;
            }
        }
        self.tickets += 1;
    }

    pub fn direct(&self, tender: Tender) -> f64 {
        match tender {
            Tender::Cash => self.total_cash,
            Tender::Upi => self.total_upi,
            Tender::Card => self.total_card,
        }
    }

    pub fn split(&self, tender: Tender) -> f64 {
        match tender {
            Tender::Cash => self.total_split_cash,
            Tender::Upi => self.total_split_upi,
            Tender::Card => self.total_split_card,
        }
    }

    /// Direct plus split for one tender.
    pub fn total(&self, tender: Tender) -> f64 {
        self.direct(tender) + self.split(tender)
    }

    pub fn cash_total(&self) -> f64 {
        self.total(Tender::Cash)
    }

    pub fn upi_total(&self) -> f64 {
        self.total(Tender::Upi)
    }

    pub fn card_total(&self) -> f64 {
        self.total(Tender::Card)
    }

    pub fn grand_total(&self) -> f64 {
        Tender::ALL.iter().map(|t| self.total(*t)).sum()
    }
}

/// The three ways money is collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tender {
    Cash,
    Upi,
    Card,
}

impl Tender {
    pub const ALL: [Tender; 3] = [Tender::Cash, Tender::Upi, Tender::Card];

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Cash => "CASH",
            Self::Upi => "UPI",
            Self::Card => "CARD",
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            Self::Cash => "Cash Payments",
            Self::Upi => "UPI Payments",
            Self::Card => "Card Payments",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::KotItem;

    fn item(quantity: f64, unit_price: f64) -> KotItem {
        KotItem {
            quantity: Some(quantity),
            unit_price: Some(unit_price),
        }
    }

    fn ticket(method: PaymentMethod, items: Vec<KotItem>) -> KotRecord {
        KotRecord {
            payment_method: method,
            kot_items: Some(items),
            ..Default::default()
        }
    }

    fn split(cash: Option<f64>, upi: Option<f64>, card: Option<f64>) -> KotRecord {
        KotRecord {
            payment_method: PaymentMethod::Split,
            cash_amount: cash,
            upi_amount: upi,
            card_amount: card,
            // must never be counted
            kot_items: Some(vec![item(10.0, 1000.0)]),
            ..Default::default()
        }
    }

    #[test]
    fn cash_and_split_example() {
        let records = vec![
            ticket(PaymentMethod::Cash, vec![item(2.0, 100.0)]),
            split(Some(50.0), Some(30.0), Some(20.0)),
        ];
        let summary = PaymentSummary::from_records(&records);

        assert_eq!(summary.cash_total(), 250.0);
        assert_eq!(summary.upi_total(), 30.0);
        assert_eq!(summary.card_total(), 20.0);
        assert_eq!(summary.grand_total(), 300.0);
        assert_eq!(summary.direct(Tender::Cash), 200.0);
        assert_eq!(summary.split(Tender::Cash), 50.0);
        assert_eq!(summary.tickets, 2);
    }

    #[test]
    fn direct_accumulators_sum_item_totals() {
        let records = vec![
            ticket(PaymentMethod::Upi, vec![item(1.0, 80.0), item(3.0, 20.0)]),
            ticket(PaymentMethod::Upi, vec![item(1.0, 15.5)]),
            ticket(PaymentMethod::Card, vec![item(4.0, 25.0)]),
            ticket(PaymentMethod::Cash, vec![]),
        ];
        let summary = PaymentSummary::from_records(&records);

        assert_eq!(summary.total_upi, 155.5);
        assert_eq!(summary.total_card, 100.0);
        assert_eq!(summary.total_cash, 0.0);
        assert_eq!(summary.total_split_upi, 0.0);
    }

    #[test]
    fn split_uses_sub_amounts_only() {
        let records = vec![split(Some(100.0), None, None), split(None, Some(40.0), Some(60.0))];
        let summary = PaymentSummary::from_records(&records);

        assert_eq!(summary.total_cash + summary.total_upi + summary.total_card, 0.0);
        assert_eq!(summary.total_split_cash, 100.0);
        assert_eq!(summary.total_split_upi, 40.0);
        assert_eq!(summary.total_split_card, 60.0);
        assert_eq!(summary.grand_total(), 200.0);
    }

    #[test]
    fn unrecognized_methods_are_counted_not_summed() {
        let records = vec![
            ticket(PaymentMethod::Unrecognized("wallet".into()), vec![item(1.0, 500.0)]),
            ticket(PaymentMethod::Missing, vec![item(1.0, 500.0)]),
            ticket(PaymentMethod::Card, vec![item(1.0, 10.0)]),
        ];
        let summary = PaymentSummary::from_records(&records);

        assert_eq!(summary.grand_total(), 10.0);
        assert_eq!(summary.unrecognized, 2);
        assert_eq!(summary.tickets, 1);
    }

    #[test]
    fn empty_input_is_all_zero() {
        let summary = PaymentSummary::from_records(&Vec::<KotRecord>::new());
        assert_eq!(summary, PaymentSummary::default());
        assert_eq!(summary.grand_total(), 0.0);
    }

    #[test]
    fn grand_total_is_sum_of_tender_totals() {
        let records = vec![
            ticket(PaymentMethod::Cash, vec![item(1.0, 12.25)]),
            ticket(PaymentMethod::Card, vec![item(2.0, 7.5)]),
            split(Some(1.0), Some(2.0), Some(3.0)),
        ];
        let summary = PaymentSummary::from_records(&records);
        let by_tender: f64 = Tender::ALL.iter().map(|t| summary.total(*t)).sum();
        assert_eq!(summary.grand_total(), by_tender);
        assert_eq!(
            summary.grand_total(),
            summary.cash_total() + summary.upi_total() + summary.card_total()
        );
    }
}
