use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DashboardError, Result};

/// Invoice lifecycle status. Serialized with the display labels used in the
/// invoices.json documents ("Charge made", not "chargeMade").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum InvoiceStatus {
    Issued,
    #[serde(rename = "Charge made")]
    ChargeMade,
    #[serde(rename = "Payment overdue")]
    PaymentOverdue,
    #[serde(rename = "Payment made")]
    PaymentMade,
}

impl InvoiceStatus {
    pub const ALL: [InvoiceStatus; 4] = [
        InvoiceStatus::Issued,
        InvoiceStatus::ChargeMade,
        InvoiceStatus::PaymentOverdue,
        InvoiceStatus::PaymentMade,
    ];

    /// Human-readable label, as shown in tables and stored in JSON.
    pub fn label(&self) -> &'static str {
        match self {
            InvoiceStatus::Issued => "Issued",
            InvoiceStatus::ChargeMade => "Charge made",
            InvoiceStatus::PaymentOverdue => "Payment overdue",
            InvoiceStatus::PaymentMade => "Payment made",
        }
    }

    /// camelCase key form of the label (lowercased, spaces and apostrophes
    /// removed), used for filter values and query parameters.
    pub fn key(&self) -> &'static str {
        match self {
            InvoiceStatus::Issued => "issued",
            InvoiceStatus::ChargeMade => "chargeMade",
            InvoiceStatus::PaymentOverdue => "paymentOverdue",
            InvoiceStatus::PaymentMade => "paymentMade",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for InvoiceStatus {
    type Err = DashboardError;

    /// Accepts the key form ("paymentMade") or the display label
    /// ("Payment made").
    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .find(|status| status.key() == s || status.label() == s)
            .copied()
            .ok_or_else(|| DashboardError::UnknownStatus(s.to_string()))
    }
}

/// A single invoice record from invoices.json.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRecord {
    pub id: String,
    pub issue_date: NaiveDate,
    pub billing_date: Option<NaiveDate>,
    pub payment_date: Option<NaiveDate>,
    pub status: InvoiceStatus,
    pub value: f64,
}

impl InvoiceRecord {
    /// Validate the record invariants after deserialization.
    pub fn validate(&self) -> Result<()> {
        if !self.value.is_finite() || self.value < 0.0 {
            return Err(DashboardError::InvalidRecord {
                id: self.id.clone(),
                reason: format!("value must be a non-negative number, got {}", self.value),
            });
        }
        Ok(())
    }
}

/// Validate a whole invoice list, failing on the first bad record.
pub fn validate_records(records: &[InvoiceRecord]) -> Result<()> {
    for record in records {
        record.validate()?;
    }
    Ok(())
}
