use chrono::{Datelike, Months, NaiveDate};
use std::fmt;
use std::str::FromStr;

use crate::error::{DashboardError, Result};
use crate::invoice::record::{InvoiceRecord, InvoiceStatus};

/// The filter dimensions offered by the dashboard. The month kinds match a
/// single date field textually; `Year`/`Trimester`/`Month` match any of the
/// record's date fields against a calendar window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    IssueMonth,
    BillingMonth,
    PaymentMonth,
    Status,
    Year,
    Trimester,
    Month,
}

impl FilterKind {
    pub const ALL: [FilterKind; 7] = [
        FilterKind::IssueMonth,
        FilterKind::BillingMonth,
        FilterKind::PaymentMonth,
        FilterKind::Status,
        FilterKind::Year,
        FilterKind::Trimester,
        FilterKind::Month,
    ];

    /// camelCase key used on the CLI and in query parameters.
    pub fn key(&self) -> &'static str {
        match self {
            FilterKind::IssueMonth => "issueMonth",
            FilterKind::BillingMonth => "billingMonth",
            FilterKind::PaymentMonth => "paymentMonth",
            FilterKind::Status => "status",
            FilterKind::Year => "year",
            FilterKind::Trimester => "trimester",
            FilterKind::Month => "month",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FilterKind {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .find(|kind| kind.key() == s)
            .copied()
            .ok_or_else(|| DashboardError::UnknownFilterKind(s.to_string()))
    }
}

/// A validated filter value. Which variant applies is determined by the
/// filter kind at parse time.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// Textual fragment matched against a date formatted as YYYY-MM
    /// ("2024-03" matches one month, "2024" a whole year).
    MonthFragment(String),
    Status(InvoiceStatus),
    Year(i32),
    /// Anchor date for trimester/month windows.
    Anchor(NaiveDate),
}

/// The active filter: a kind plus a value validated for that kind.
/// "No filter" is represented by the caller as `Option::None`.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterDescriptor {
    pub kind: FilterKind,
    pub value: FilterValue,
}

impl FilterDescriptor {
    /// Parse and validate a raw value for the given kind. Invalid dates fail
    /// here rather than propagating into the engine.
    pub fn parse(kind: FilterKind, raw: &str) -> Result<Self> {
        let value = match kind {
            FilterKind::IssueMonth | FilterKind::BillingMonth | FilterKind::PaymentMonth => {
                validate_month_fragment(kind, raw)?;
                FilterValue::MonthFragment(raw.to_string())
            }
            FilterKind::Status => FilterValue::Status(raw.parse()?),
            FilterKind::Year => {
                let year = raw.parse::<i32>().map_err(|_| invalid_value(
                    kind,
                    raw,
                    "expected a calendar year (e.g. 2024)",
                ))?;
                FilterValue::Year(year)
            }
            FilterKind::Trimester | FilterKind::Month => {
                FilterValue::Anchor(parse_anchor_date(kind, raw)?)
            }
        };
        Ok(FilterDescriptor { kind, value })
    }

    /// Default descriptor for a kind when no explicit value is supplied:
    /// the current date for date kinds, the first status option for status.
    pub fn with_default(kind: FilterKind, today: NaiveDate) -> Self {
        let value = match kind {
            FilterKind::IssueMonth | FilterKind::BillingMonth | FilterKind::PaymentMonth => {
                FilterValue::MonthFragment(today.format("%Y-%m").to_string())
            }
            FilterKind::Status => FilterValue::Status(InvoiceStatus::Issued),
            FilterKind::Year => FilterValue::Year(today.year()),
            FilterKind::Trimester | FilterKind::Month => FilterValue::Anchor(today),
        };
        FilterDescriptor { kind, value }
    }

    /// Canonical string form of the value, as encoded in query parameters.
    /// Anchor dates normalize to their YYYY-MM month.
    pub fn value_string(&self) -> String {
        match &self.value {
            FilterValue::MonthFragment(fragment) => fragment.clone(),
            FilterValue::Status(status) => status.key().to_string(),
            FilterValue::Year(year) => year.to_string(),
            FilterValue::Anchor(date) => date.format("%Y-%m").to_string(),
        }
    }

    /// Whether a single record satisfies the filter. Null date fields never
    /// match; a record may qualify through any one of its date fields.
    pub fn matches(&self, record: &InvoiceRecord) -> bool {
        let dates = [
            Some(record.issue_date),
            record.billing_date,
            record.payment_date,
        ];
        match (&self.kind, &self.value) {
            (FilterKind::IssueMonth, FilterValue::MonthFragment(fragment)) => {
                fragment_matches(Some(record.issue_date), fragment)
            }
            (FilterKind::BillingMonth, FilterValue::MonthFragment(fragment)) => {
                fragment_matches(record.billing_date, fragment)
            }
            (FilterKind::PaymentMonth, FilterValue::MonthFragment(fragment)) => {
                fragment_matches(record.payment_date, fragment)
            }
            (FilterKind::Status, FilterValue::Status(status)) => record.status == *status,
            (FilterKind::Year, FilterValue::Year(year)) => dates
                .iter()
                .flatten()
                .any(|date| date.year() == *year),
            (FilterKind::Trimester, FilterValue::Anchor(anchor)) => {
                let (start, end) = trimester_window(*anchor);
                dates
                    .iter()
                    .flatten()
                    .any(|date| *date >= start && *date < end)
            }
            (FilterKind::Month, FilterValue::Anchor(anchor)) => dates.iter().flatten().any(|date| {
                date.year() == anchor.year() && date.month() == anchor.month()
            }),
            // Mismatched kind/value pairs cannot be built through parse or
            // with_default; they never match.
            _ => false,
        }
    }

    /// Filter an invoice list, preserving input order.
    pub fn apply(&self, invoices: &[InvoiceRecord]) -> Vec<InvoiceRecord> {
        invoices
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect()
    }
}

/// Resolve a filter selection against an invoice list. `None` descriptor
/// means "no filtering" and yields `None`, letting the caller fall back to
/// the unfiltered list.
pub fn resolve_filter(
    invoices: &[InvoiceRecord],
    descriptor: Option<&FilterDescriptor>,
) -> Option<Vec<InvoiceRecord>> {
    descriptor.map(|d| d.apply(invoices))
}

/// First day of the given date's month.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

/// The 3-calendar-month window anchored at the given date's month start.
/// Returns (start, end) with `end` exclusive.
pub fn trimester_window(anchor: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = month_start(anchor);
    (start, start + Months::new(3))
}

/// Number of days in the given date's month.
pub fn days_in_month(date: NaiveDate) -> u32 {
    (month_start(date) + Months::new(1))
        .pred_opt()
        .map_or(28, |last| last.day())
}

fn fragment_matches(date: Option<NaiveDate>, fragment: &str) -> bool {
    date.is_some_and(|d| d.format("%Y-%m").to_string().contains(fragment))
}

fn invalid_value(kind: FilterKind, raw: &str, reason: &str) -> DashboardError {
    DashboardError::InvalidFilterValue {
        kind: kind.key().to_string(),
        value: raw.to_string(),
        reason: reason.to_string(),
    }
}

/// Month fragments must be a year ("2024") or a year-month ("2024-03").
fn validate_month_fragment(kind: FilterKind, raw: &str) -> Result<()> {
    if raw.len() == 4 && raw.parse::<i32>().is_ok() {
        return Ok(());
    }
    if NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d").is_ok() {
        return Ok(());
    }
    Err(invalid_value(kind, raw, "expected YYYY or YYYY-MM"))
}

/// Anchor dates accept YYYY-MM-DD or YYYY-MM (first of that month).
fn parse_anchor_date(kind: FilterKind, raw: &str) -> Result<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d")
        .map_err(|_| invalid_value(kind, raw, "expected YYYY-MM or YYYY-MM-DD"))
}
