use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::invoice::filter::{days_in_month, trimester_window, FilterDescriptor, FilterKind, FilterValue};
use crate::invoice::record::{InvoiceRecord, InvoiceStatus};

pub const PAID_DATASET_LABEL: &str = "Paid Invoices";
pub const DELINQUENCY_DATASET_LABEL: &str = "Delinquency amount";

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// One chart dataset. Buckets with no contributing records stay `None`
/// rather than zero so renderers can span gaps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<Option<f64>>,
}

/// Chart-ready series: chronological labels plus the paid/delinquency
/// dataset pair aligned to them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// Bucket invoice values into a paid/delinquency series. Granularity follows
/// the filter kind: months of a year, days of a trimester window, days of a
/// month, or (with no filter) one day per calendar day across the issue-date
/// range.
pub fn compute_series(
    invoices: &[InvoiceRecord],
    descriptor: Option<&FilterDescriptor>,
) -> ChartSeries {
    match descriptor.map(|d| (d.kind, &d.value)) {
        Some((FilterKind::Year, FilterValue::Year(year))) => year_series(invoices, *year),
        Some((FilterKind::Trimester, FilterValue::Anchor(anchor))) => {
            trimester_series(invoices, *anchor)
        }
        Some((FilterKind::Month, FilterValue::Anchor(anchor))) => month_series(invoices, *anchor),
        _ => default_series(invoices),
    }
}

/// Twelve fixed month buckets; payments outside the target year are dropped.
fn year_series(invoices: &[InvoiceRecord], year: i32) -> ChartSeries {
    let labels = MONTH_NAMES.iter().map(|name| name.to_string()).collect();
    bucketize(invoices, labels, |record| {
        let date = record.payment_date?;
        if date.year() != year {
            return None;
        }
        Some(date.month0() as usize)
    })
}

/// Daily buckets across the 3-month trimester window.
fn trimester_series(invoices: &[InvoiceRecord], anchor: NaiveDate) -> ChartSeries {
    let (start, end) = trimester_window(anchor);
    let labels = start
        .iter_days()
        .take_while(|day| *day < end)
        .map(|day| day.format("%b %d").to_string())
        .collect();
    bucketize(invoices, labels, move |record| {
        let date = record.payment_date?;
        if date < start || date >= end {
            return None;
        }
        usize::try_from((date - start).num_days()).ok()
    })
}

/// Day-of-month buckets; payments are matched by calendar year.
fn month_series(invoices: &[InvoiceRecord], anchor: NaiveDate) -> ChartSeries {
    let labels = (1..=days_in_month(anchor)).map(|day| day.to_string()).collect();
    bucketize(invoices, labels, move |record| {
        let date = record.payment_date?;
        if date.year() != anchor.year() {
            return None;
        }
        Some(date.day0() as usize)
    })
}

/// With no filter, one bucket per calendar day spanning the issue-date range
/// (inclusive), keyed by issue date rather than payment date.
fn default_series(invoices: &[InvoiceRecord]) -> ChartSeries {
    let earliest = invoices.iter().map(|record| record.issue_date).min();
    let latest = invoices.iter().map(|record| record.issue_date).max();
    let (Some(earliest), Some(latest)) = (earliest, latest) else {
        return bucketize(invoices, Vec::new(), |_| None);
    };

    let labels = earliest
        .iter_days()
        .take_while(|day| *day <= latest)
        .map(|day| day.format("%Y-%m-%d").to_string())
        .collect();
    bucketize(invoices, labels, move |record| {
        usize::try_from((record.issue_date - earliest).num_days()).ok()
    })
}

fn bucketize(
    invoices: &[InvoiceRecord],
    labels: Vec<String>,
    index_of: impl Fn(&InvoiceRecord) -> Option<usize>,
) -> ChartSeries {
    let mut paid = vec![None; labels.len()];
    let mut delinquency = vec![None; labels.len()];

    for record in invoices {
        let Some(index) = index_of(record) else {
            continue;
        };
        if index >= labels.len() {
            continue;
        }
        match record.status {
            InvoiceStatus::PaymentMade => accumulate(&mut paid[index], record.value),
            InvoiceStatus::PaymentOverdue => accumulate(&mut delinquency[index], record.value),
            _ => {}
        }
    }

    ChartSeries {
        labels,
        datasets: vec![
            Dataset {
                label: PAID_DATASET_LABEL.to_string(),
                data: paid,
            },
            Dataset {
                label: DELINQUENCY_DATASET_LABEL.to_string(),
                data: delinquency,
            },
        ],
    }
}

fn accumulate(slot: &mut Option<f64>, value: f64) {
    *slot = Some(slot.unwrap_or(0.0) + value);
}
