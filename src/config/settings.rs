use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};

#[derive(Debug, Deserialize, Serialize)]
pub struct Settings {
    pub data: DataSettings,
    pub display: DisplaySettings,
}

/// Where the data documents come from. Each source is either an http(s) URL
/// or a filesystem path; relative paths resolve against the config dir.
#[derive(Debug, Deserialize, Serialize)]
pub struct DataSettings {
    pub invoices: String,
    pub profile: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct DisplaySettings {
    #[serde(default = "default_location")]
    pub location: String,
}

fn default_location() -> String {
    "pt-br".to_string()
}

/// Currency and locale derived from a supported location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locale {
    pub currency: &'static str,
    pub symbol: &'static str,
}

const LOCATIONS: [(&str, Locale); 2] = [
    (
        "pt-br",
        Locale {
            currency: "BRL",
            symbol: "R$",
        },
    ),
    (
        "en-us",
        Locale {
            currency: "USD",
            symbol: "$",
        },
    ),
];

impl DisplaySettings {
    /// Resolve the configured location to its currency/locale pair.
    /// Unsupported locations are a configuration error.
    pub fn locale(&self) -> Result<Locale> {
        LOCATIONS
            .iter()
            .find(|(tag, _)| *tag == self.location)
            .map(|(_, locale)| *locale)
            .ok_or_else(|| DashboardError::InvalidLocation {
                location: self.location.clone(),
                permitted: LOCATIONS
                    .iter()
                    .map(|(tag, _)| format!("'{tag}'"))
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}
