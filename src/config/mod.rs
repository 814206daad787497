mod settings;

pub use settings::{DataSettings, DisplaySettings, Locale, Settings};

use crate::error::{DashboardError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.invoice-dashboard or XDG config)
pub fn config_dir() -> Result<PathBuf> {
    // First try XDG-style directories
    if let Some(proj_dirs) = ProjectDirs::from("", "", "invoice-dashboard") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    // Fallback to ~/.invoice-dashboard/
    let home = dirs_home().ok_or_else(|| {
        DashboardError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".invoice-dashboard"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Expand ~ in paths
pub fn expand_path(path: &str) -> PathBuf {
    if path.starts_with("~/") {
        if let Some(home) = dirs_home() {
            return home.join(&path[2..]);
        }
    }
    PathBuf::from(path)
}

/// Resolve a file data source: ~ expands, relative paths are taken against
/// the config directory.
pub fn resolve_source_path(source: &str, config_dir: &Path) -> PathBuf {
    let path = expand_path(source);
    if path.is_relative() {
        config_dir.join(path)
    } else {
        path
    }
}

/// Load the main config.toml
pub fn load_settings(config_dir: &Path) -> Result<Settings> {
    let path = config_dir.join("config.toml");
    if !path.exists() {
        return Err(DashboardError::ConfigFileNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| DashboardError::ConfigParse { path, source: e })
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"# Data sources may be http(s) URLs or file paths.
# Relative paths resolve against this config directory.
[data]
invoices = "sample/invoices.json"
profile = "sample/profile.json"

[display]
location = "pt-br"  # pt-br (BRL) or en-us (USD)
"#;

/// Sample invoice data written by 'init' so the dashboard works offline.
pub const INVOICES_TEMPLATE: &str = r#"[
  { "id": "INV-0001", "issueDate": "2024-01-02", "billingDate": "2024-01-05", "paymentDate": "2024-01-12", "status": "Payment made", "value": 1250.0 },
  { "id": "INV-0002", "issueDate": "2024-01-08", "billingDate": null, "paymentDate": null, "status": "Issued", "value": 840.5 },
  { "id": "INV-0003", "issueDate": "2024-01-15", "billingDate": "2024-01-18", "paymentDate": null, "status": "Charge made", "value": 2100.0 },
  { "id": "INV-0004", "issueDate": "2024-02-01", "billingDate": "2024-02-04", "paymentDate": "2024-02-20", "status": "Payment overdue", "value": 560.75 },
  { "id": "INV-0005", "issueDate": "2024-02-10", "billingDate": "2024-02-12", "paymentDate": "2024-02-25", "status": "Payment made", "value": 3300.0 },
  { "id": "INV-0006", "issueDate": "2024-03-03", "billingDate": null, "paymentDate": null, "status": "Issued", "value": 975.25 },
  { "id": "INV-0007", "issueDate": "2024-03-09", "billingDate": "2024-03-11", "paymentDate": "2024-03-28", "status": "Payment overdue", "value": 1480.0 },
  { "id": "INV-0008", "issueDate": "2024-03-21", "billingDate": "2024-03-22", "paymentDate": "2024-04-02", "status": "Payment made", "value": 720.0 }
]
"#;

/// Sample profile data written by 'init'.
pub const PROFILE_TEMPLATE: &str = r#"{
  "name": "Jane Doe",
  "role": "Financial Analyst",
  "image": {
    "src": "images/profile.png",
    "alt": "Profile picture of Jane Doe"
  }
}
"#;
