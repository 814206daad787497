mod filter;
mod metrics;
mod query;
mod record;
mod series;

pub use filter::{
    days_in_month, month_start, resolve_filter, trimester_window, FilterDescriptor, FilterKind,
    FilterValue,
};
pub use metrics::{compute_cards, MetricCard};
pub use query::{decode_query, encode_query, QueryScope};
pub use record::{validate_records, InvoiceRecord, InvoiceStatus};
pub use series::{
    compute_series, ChartSeries, Dataset, DELINQUENCY_DATASET_LABEL, PAID_DATASET_LABEL,
};
