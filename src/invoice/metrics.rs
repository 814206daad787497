use serde::Serialize;

use crate::invoice::record::{InvoiceRecord, InvoiceStatus};

/// A summary card derived from the invoice list. Recomputed on every call,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricCard {
    pub title: &'static str,
    pub description: &'static str,
    pub value: f64,
    pub quantity: u32,
}

impl MetricCard {
    fn new(title: &'static str, description: &'static str) -> Self {
        MetricCard {
            title,
            description,
            value: 0.0,
            quantity: 0,
        }
    }

    fn add(&mut self, value: f64) {
        self.value += value;
        self.quantity += 1;
    }
}

/// Compute the five summary cards. Categories are independent; a record may
/// contribute to several cards. Empty input yields all-zero cards.
pub fn compute_cards(invoices: &[InvoiceRecord]) -> Vec<MetricCard> {
    let mut total_issued = MetricCard::new(
        "Total Issued Invoices",
        "Gain insight into the company's financial performance by tracking the total value of invoices issued.",
    );
    let mut issued_without_charges = MetricCard::new(
        "Issued Invoices without Charges",
        "Evaluate billing efficiency by examining the total value of invoices issued without associated charges.",
    );
    let mut overdue = MetricCard::new(
        "Overdue Invoices - Delinquency",
        "Identify and address financial risks by monitoring the total value of overdue invoices, reflecting delinquency status.",
    );
    let mut to_be_paid = MetricCard::new(
        "Invoices to be Paid",
        "Effectively plan and manage upcoming payments with insights into the total value of invoices awaiting settlement.",
    );
    let mut paid = MetricCard::new(
        "Paid Invoices",
        "Celebrate financial achievements by tracking the total value of invoices that have been successfully paid.",
    );

    for record in invoices {
        total_issued.add(record.value);
        if record.billing_date.is_none() {
            issued_without_charges.add(record.value);
        }
        match record.status {
            InvoiceStatus::ChargeMade => to_be_paid.add(record.value),
            InvoiceStatus::PaymentOverdue => overdue.add(record.value),
            InvoiceStatus::PaymentMade => paid.add(record.value),
            InvoiceStatus::Issued => {}
        }
    }

    vec![total_issued, issued_without_charges, overdue, to_be_paid, paid]
}
