use crate::error::Result;
use crate::invoice::filter::{FilterDescriptor, FilterKind};

/// Which pair of query-parameter keys a filter is encoded under. The invoice
/// table and the metrics view carry independent filter state in the same
/// query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryScope {
    Table,
    Metrics,
}

impl QueryScope {
    pub fn by_key(&self) -> &'static str {
        match self {
            QueryScope::Table => "filter_by",
            QueryScope::Metrics => "filter_metrics_by",
        }
    }

    pub fn value_key(&self) -> &'static str {
        match self {
            QueryScope::Table => "filter_value",
            QueryScope::Metrics => "filter_metrics_value",
        }
    }
}

/// Encode a filter as a shareable query string, e.g.
/// `filter_by=status&filter_value=paymentOverdue`. Values are canonical
/// (anchor dates normalize to YYYY-MM) so encode/decode round-trips.
pub fn encode_query(scope: QueryScope, descriptor: &FilterDescriptor) -> String {
    format!(
        "{}={}&{}={}",
        scope.by_key(),
        descriptor.kind.key(),
        scope.value_key(),
        descriptor.value_string()
    )
}

/// Decode a query string back into a filter. Returns `Ok(None)` when either
/// key is absent or the filter kind is unrecognized (treated as "no
/// filter"); an invalid value for a known kind is an error.
pub fn decode_query(scope: QueryScope, query: &str) -> Result<Option<FilterDescriptor>> {
    let query = query.strip_prefix('?').unwrap_or(query);

    let mut filter_by = None;
    let mut filter_value = None;
    for pair in query.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        if key == scope.by_key() {
            filter_by = Some(value);
        } else if key == scope.value_key() {
            filter_value = Some(value);
        }
    }

    let (Some(by), Some(value)) = (filter_by, filter_value) else {
        return Ok(None);
    };
    let Ok(kind) = by.parse::<FilterKind>() else {
        return Ok(None);
    };
    FilterDescriptor::parse(kind, value).map(Some)
}
