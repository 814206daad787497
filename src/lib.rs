pub mod config;
pub mod data;
pub mod error;
pub mod invoice;
pub mod profile;

pub use config::{load_settings, Locale, Settings};
pub use error::{DashboardError, Result};
pub use invoice::{
    compute_cards, compute_series, decode_query, encode_query, resolve_filter, ChartSeries,
    FilterDescriptor, FilterKind, FilterValue, InvoiceRecord, InvoiceStatus, MetricCard,
    QueryScope,
};
pub use profile::Profile;
