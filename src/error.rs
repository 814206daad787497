use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Config directory not found at {0}. Run 'invoice-dashboard init' to create it.")]
    ConfigNotFound(PathBuf),

    #[error("Config file not found: {0}")]
    ConfigFileNotFound(PathBuf),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Invalid location value '{location}'. Permitted locations are: {permitted}.")]
    InvalidLocation { location: String, permitted: String },

    #[error("Failed to fetch data from '{src}': {reason}")]
    Fetch { src: String, reason: String },

    #[error("Failed to parse data file {path}: {source}")]
    DataParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid invoice record '{id}': {reason}")]
    InvalidRecord { id: String, reason: String },

    #[error("Unknown filter kind '{0}'. Use one of: issueMonth, billingMonth, paymentMonth, status, year, trimester, month.")]
    UnknownFilterKind(String),

    #[error("Unknown invoice status '{0}'. Use one of: issued, chargeMade, paymentOverdue, paymentMade.")]
    UnknownStatus(String),

    #[error("Invalid value '{value}' for filter '{kind}': {reason}")]
    InvalidFilterValue {
        kind: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
