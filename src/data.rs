use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::{resolve_source_path, Settings};
use crate::error::{DashboardError, Result};
use crate::invoice::{validate_records, InvoiceRecord};
use crate::profile::Profile;

pub const INVOICES_CACHE_FILE: &str = "invoices.json";
pub const PROFILE_CACHE_FILE: &str = "profile.json";

/// Directory holding the cached data documents.
pub fn cache_dir(config_dir: &Path) -> PathBuf {
    config_dir.join("cache")
}

/// Load the invoice list: cached copy if present, otherwise fetched from the
/// configured source and cached for subsequent loads.
pub fn load_invoices(config_dir: &Path, settings: &Settings) -> Result<Vec<InvoiceRecord>> {
    let records: Vec<InvoiceRecord> =
        load_document(config_dir, &settings.data.invoices, INVOICES_CACHE_FILE)?;
    validate_records(&records)?;
    Ok(records)
}

/// Load the profile document, cache-first like the invoice list.
pub fn load_profile(config_dir: &Path, settings: &Settings) -> Result<Profile> {
    load_document(config_dir, &settings.data.profile, PROFILE_CACHE_FILE)
}

/// Re-fetch both data sources, overwriting the cache. Fetched documents are
/// parsed and validated before they replace the cached copies.
pub fn refresh(config_dir: &Path, settings: &Settings) -> Result<(Vec<InvoiceRecord>, Profile)> {
    let invoices_body = fetch_source(config_dir, &settings.data.invoices)?;
    let profile_body = fetch_source(config_dir, &settings.data.profile)?;

    let records: Vec<InvoiceRecord> = parse_document(&invoices_body, INVOICES_CACHE_FILE)?;
    validate_records(&records)?;
    let profile: Profile = parse_document(&profile_body, PROFILE_CACHE_FILE)?;

    let dir = cache_dir(config_dir);
    fs::create_dir_all(&dir)?;
    fs::write(dir.join(INVOICES_CACHE_FILE), invoices_body)?;
    fs::write(dir.join(PROFILE_CACHE_FILE), profile_body)?;

    Ok((records, profile))
}

/// Drop the cached documents so the next load fetches fresh data.
pub fn clear_cache(config_dir: &Path) -> Result<()> {
    let dir = cache_dir(config_dir);
    if dir.exists() {
        fs::remove_dir_all(&dir)?;
    }
    Ok(())
}

fn load_document<T: DeserializeOwned>(
    config_dir: &Path,
    source: &str,
    cache_file: &str,
) -> Result<T> {
    let cache_path = cache_dir(config_dir).join(cache_file);

    // A present-but-corrupt cache entry is a parse error, not a refetch
    // trigger; only a missing entry falls through to the source.
    let body = if cache_path.exists() {
        fs::read_to_string(&cache_path)?
    } else {
        let body = fetch_source(config_dir, source)?;
        fs::create_dir_all(cache_dir(config_dir))?;
        fs::write(&cache_path, &body)?;
        body
    };

    serde_json::from_str(&body).map_err(|e| DashboardError::DataParse {
        path: cache_path,
        source: e,
    })
}

fn parse_document<T: DeserializeOwned>(body: &str, cache_file: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| DashboardError::DataParse {
        path: PathBuf::from(cache_file),
        source: e,
    })
}

/// Read a data source: http(s) URLs over the network, anything else from the
/// filesystem.
fn fetch_source(config_dir: &Path, source: &str) -> Result<String> {
    if source.starts_with("http://") || source.starts_with("https://") {
        return fetch_url(source);
    }

    let path = resolve_source_path(source, config_dir);
    fs::read_to_string(&path).map_err(|e| DashboardError::Fetch {
        src: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn fetch_url(url: &str) -> Result<String> {
    use ureq::Agent;

    let agent: Agent = Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(3)))
        .build()
        .into();

    let fetch_err = |reason: String| DashboardError::Fetch {
        src: url.to_string(),
        reason,
    };

    agent
        .get(url)
        .call()
        .map_err(|e| fetch_err(e.to_string()))?
        .body_mut()
        .read_to_string()
        .map_err(|e| fetch_err(e.to_string()))
}
