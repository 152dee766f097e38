use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};
use tracing::{debug, warn};

use crate::config::Business;
use crate::format::{format_date, format_rupees, format_time, parse_timestamp};
use crate::model::{InvoiceDocument, OrderType};

pub const WALK_IN_CUSTOMER: &str = "Walk-in Customer";
pub const TAX_LABEL: &str = "Tax (5%)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeStyle {
    Blue,
    Green,
    Purple,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderBadge {
    pub label: String,
    pub style: BadgeStyle,
}

impl From<OrderType> for OrderBadge {
    fn from(order_type: OrderType) -> Self {
        let style = match order_type {
            OrderType::DineIn => BadgeStyle::Blue,
            OrderType::Delivery => BadgeStyle::Green,
            OrderType::TakeAway | OrderType::Unrecognized => BadgeStyle::Purple,
        };
        Self {
            label: order_type.label().to_string(),
            style,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceRowView {
    pub name: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
}

/// Display-ready invoice: every string is final, every amount formatted.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceView {
    pub business_name: String,
    pub invoice_number: String,
    pub date: String,
    pub time: String,
    pub bill_to: String,
    pub phone: Option<String>,
    pub table: Option<String>,
    pub badge: OrderBadge,
    pub rows: Vec<InvoiceRowView>,
    pub item_count: usize,
    pub subtotal: String,
    pub tax_label: String,
    pub tax: String,
    pub total: String,
    pub footer: String,
    pub contact: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl InvoiceView {
    pub fn build(business: &Business, doc: &InvoiceDocument) -> Self {
        let invoice = &doc.invoice;

        let (date, time) = match parse_timestamp(&invoice.created_at) {
            Some(ts) => (format_date(&ts), format_time(&ts)),
            None => {
                warn!(invoice = %invoice.id, created_at = %invoice.created_at, "unreadable invoice timestamp");
                ("-".to_string(), "-".to_string())
            }
        };

        let rows = doc
            .items
            .iter()
            .map(|item| {
                let line_total = item.line_total();
                if let Some(stored) = item.total {
                    if (stored - line_total).abs() > 0.005 {
                        debug!(
                            item = %item.menu_item_id,
                            stored,
                            computed = line_total,
                            "stored line total differs, showing computed value"
                        );
                    }
                }
                InvoiceRowView {
                    name: item.menu_item_name.clone(),
                    quantity: item.quantity.unwrap_or(0),
                    unit_price: format_rupees(item.unit_price.unwrap_or(0.0)),
                    line_total: format_rupees(line_total),
                }
            })
            .collect();

        Self {
            business_name: business.name.clone(),
            invoice_number: non_blank(&invoice.invoice_number).unwrap_or_else(|| "N/A".to_string()),
            date,
            time,
            bill_to: non_blank(&invoice.customer_name)
                .unwrap_or_else(|| WALK_IN_CUSTOMER.to_string()),
            phone: non_blank(&invoice.customer_phone),
            table: non_blank(&invoice.table_number),
            badge: OrderBadge::from(invoice.order_type),
            rows,
            item_count: doc.items.len(),
            subtotal: format_rupees(invoice.subtotal.unwrap_or(0.0)),
            tax_label: TAX_LABEL.to_string(),
            tax: format_rupees(invoice.tax.unwrap_or(0.0)),
            total: format_rupees(invoice.total.unwrap_or(0.0)),
            footer: business.footer.clone(),
            contact: business
                .contact_phone
                .as_ref()
                .map(|phone| format!("For any queries, please contact: {phone}")),
        }
    }

    /// Terminal rendering of the on-screen preview, including the footer.
    pub fn to_text(&self) -> String {
        #[derive(Tabled)]
        struct ItemRow {
            #[tabled(rename = "ITEM")]
            name: String,
            #[tabled(rename = "QTY")]
            quantity: u32,
            #[tabled(rename = "PRICE")]
            price: String,
            #[tabled(rename = "TOTAL")]
            total: String,
        }

        let mut out = String::new();
        out.push_str(&format!("INVOICE  {}\n", self.business_name));
        out.push_str(&format!("Invoice #: {}\n", self.invoice_number));
        out.push_str(&format!("Date: {}  Time: {}\n\n", self.date, self.time));

        out.push_str("Bill To:\n");
        out.push_str(&format!("  {}\n", self.bill_to));
        if let Some(phone) = &self.phone {
            out.push_str(&format!("  Phone: {phone}\n"));
        }
        if let Some(table) = &self.table {
            out.push_str(&format!("  Table: {table}\n"));
        }
        out.push_str(&format!("  [{}]\n\n", self.badge.label));

        let rows: Vec<ItemRow> = self
            .rows
            .iter()
            .map(|r| ItemRow {
                name: r.name.clone(),
                quantity: r.quantity,
                price: r.unit_price.clone(),
                total: r.line_total.clone(),
            })
            .collect();
        out.push_str(&Table::new(rows).with(Style::rounded()).to_string());
        out.push_str("\n\n");

        out.push_str(&format!("Items: {}\n", self.item_count));
        out.push_str(&format!("Subtotal: {}\n", self.subtotal));
        out.push_str(&format!("{}: {}\n", self.tax_label, self.tax));
        out.push_str(&format!("Total: {}\n\n", self.total));

        out.push_str(&self.footer);
        if let Some(contact) = &self.contact {
            out.push('\n');
            out.push_str(contact);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_FOOTER;
    use crate::model::{Invoice, InvoiceLineItem};

    fn business() -> Business {
        Business {
            name: "Badshah Pizza Hub".into(),
            contact_phone: Some("+91 1234567890".into()),
            footer: DEFAULT_FOOTER.into(),
        }
    }

    fn item(name: &str, quantity: u32, unit_price: f64, stored: f64) -> InvoiceLineItem {
        InvoiceLineItem {
            menu_item_id: name.to_lowercase(),
            menu_item_name: name.into(),
            quantity: Some(quantity),
            unit_price: Some(unit_price),
            total: Some(stored),
        }
    }

    fn doc() -> InvoiceDocument {
        InvoiceDocument {
            invoice: Invoice {
                id: "inv-1".into(),
                invoice_number: Some("INV-0042".into()),
                customer_name: Some("Asha".into()),
                customer_phone: Some("98765 43210".into()),
                table_number: Some("7".into()),
                order_type: OrderType::DineIn,
                subtotal: Some(460.0),
                tax: Some(23.0),
                total: Some(483.0),
                created_at: "2026-10-19T19:05:00".into(),
            },
            items: vec![item("Margherita", 2, 180.0, 999.0), item("Garlic Bread", 1, 100.0, 100.0)],
        }
    }

    #[test]
    fn line_totals_ignore_stored_values() {
        let view = InvoiceView::build(&business(), &doc());
        assert_eq!(view.rows[0].line_total, "₹360.00");
        assert_eq!(view.rows[0].unit_price, "₹180.00");
        assert_eq!(view.rows[1].line_total, "₹100.00");
        assert_eq!(view.item_count, 2);
    }

    #[test]
    fn header_and_totals_are_formatted() {
        let view = InvoiceView::build(&business(), &doc());
        assert_eq!(view.invoice_number, "INV-0042");
        assert_eq!(view.date, "19/10/2026");
        assert_eq!(view.time, "19:05");
        assert_eq!(view.subtotal, "₹460.00");
        assert_eq!(view.tax_label, "Tax (5%)");
        assert_eq!(view.tax, "₹23.00");
        assert_eq!(view.total, "₹483.00");
        assert_eq!(view.badge.style, BadgeStyle::Blue);
        assert_eq!(view.table.as_deref(), Some("7"));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let mut doc = doc();
        doc.invoice = Invoice {
            order_type: OrderType::TakeAway,
            customer_name: Some("  ".into()),
            created_at: "garbage".into(),
            ..Default::default()
        };
        doc.items = vec![InvoiceLineItem {
            menu_item_name: "Coke".into(),
            ..Default::default()
        }];

        let view = InvoiceView::build(&business(), &doc);
        assert_eq!(view.bill_to, WALK_IN_CUSTOMER);
        assert_eq!(view.invoice_number, "N/A");
        assert_eq!(view.phone, None);
        assert_eq!(view.table, None);
        assert_eq!(view.subtotal, "₹0.00");
        assert_eq!(view.total, "₹0.00");
        assert_eq!(view.date, "-");
        assert_eq!(view.rows[0].line_total, "₹0.00");
        assert_eq!(view.badge.label, "Take Away");
        assert_eq!(view.badge.style, BadgeStyle::Purple);
    }

    #[test]
    fn badges_are_mutually_exclusive() {
        let styles: Vec<BadgeStyle> = [
            OrderType::DineIn,
            OrderType::Delivery,
            OrderType::TakeAway,
            OrderType::Unrecognized,
        ]
        .into_iter()
        .map(|t| OrderBadge::from(t).style)
        .collect();
        assert_eq!(
            styles,
            vec![BadgeStyle::Blue, BadgeStyle::Green, BadgeStyle::Purple, BadgeStyle::Purple]
        );
    }

    #[test]
    fn unknown_order_type_falls_back_to_take_away() {
        let badge = OrderBadge::from(OrderType::from(Some("drive_thru".to_string())));
        assert_eq!(badge.label, "Take Away");
        assert_eq!(badge.style, BadgeStyle::Purple);

        let badge = OrderBadge::from(OrderType::from(None));
        assert_eq!(badge.label, "Take Away");
    }

    #[test]
    fn text_preview_lists_items_and_footer() {
        let text = InvoiceView::build(&business(), &doc()).to_text();
        assert!(text.contains("Badshah Pizza Hub"));
        assert!(text.contains("Margherita"));
        assert!(text.contains("[Dine In]"));
        assert!(text.contains("Phone: 98765 43210"));
        assert!(text.contains("Thank you for dining with us!"));
        assert!(text.contains("For any queries, please contact: +91 1234567890"));
    }
}
