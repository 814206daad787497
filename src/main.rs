use chrono::Local;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};

use invoice_dashboard::config::{
    self, load_settings, Settings, CONFIG_TEMPLATE, INVOICES_TEMPLATE, PROFILE_TEMPLATE,
};
use invoice_dashboard::data;
use invoice_dashboard::error::{DashboardError, Result};
use invoice_dashboard::invoice::{
    compute_cards, compute_series, decode_query, encode_query, resolve_filter, FilterDescriptor,
    FilterKind, InvoiceRecord, QueryScope,
};

#[derive(Parser)]
#[command(name = "invoice-dashboard")]
#[command(version, about = "Invoice metrics and filtering dashboard", long_about = None)]
struct Cli {
    /// Path to config directory (default: ~/.invoice-dashboard or XDG config)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct FilterArgs {
    /// Filter dimension: issueMonth, billingMonth, paymentMonth, status,
    /// year, trimester or month
    #[arg(long, value_name = "KIND")]
    filter_by: Option<String>,

    /// Filter value; omitting it derives a default (current date, or the
    /// first status option)
    #[arg(long, value_name = "VALUE")]
    value: Option<String>,

    /// Apply a shared query string instead of --filter-by/--value
    #[arg(long, value_name = "QUERY", conflicts_with_all = ["filter_by", "value"])]
    query: Option<String>,

    /// Print the shareable query string for the active filter and exit
    #[arg(long)]
    link: bool,

    /// Output machine-readable JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with a template config and sample data
    Init,

    /// Re-fetch the data sources, overwriting the cache
    Refresh,

    /// Drop cached data so the next load fetches fresh documents
    ClearCache,

    /// Show the dashboard profile
    Profile,

    /// List invoices, optionally filtered
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show the five summary metric cards
    Metrics {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show the paid/delinquency chart series
    Chart {
        #[command(flatten)]
        filter: FilterArgs,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Determine config directory
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config::config_dir()?,
    };

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Refresh => cmd_refresh(&cfg_dir),
        Commands::ClearCache => cmd_clear_cache(&cfg_dir),
        Commands::Profile => cmd_profile(&cfg_dir),
        Commands::List { filter } => cmd_list(&cfg_dir, &filter),
        Commands::Metrics { filter } => cmd_metrics(&cfg_dir, &filter),
        Commands::Chart { filter } => cmd_chart(&cfg_dir, &filter),
    }
}

/// Initialize config directory with template files
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    use std::fs;

    if cfg_dir.exists() {
        return Err(DashboardError::AlreadyInitialized(cfg_dir.to_path_buf()));
    }

    fs::create_dir_all(cfg_dir)?;
    fs::create_dir_all(cfg_dir.join("sample"))?;

    fs::write(cfg_dir.join("config.toml"), CONFIG_TEMPLATE)?;
    fs::write(cfg_dir.join("sample/invoices.json"), INVOICES_TEMPLATE)?;
    fs::write(cfg_dir.join("sample/profile.json"), PROFILE_TEMPLATE)?;

    println!("Initialized invoice-dashboard config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Point the data sources at your documents:  $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!(
        "  2. Or start from the bundled sample data:     {}/sample/",
        cfg_dir.display()
    );
    println!();
    println!("Then view your dashboard:");
    println!("  invoice-dashboard metrics");
    println!("  invoice-dashboard list --filter-by status --value paymentOverdue");

    Ok(())
}

// Table row structs for tabled
#[derive(Tabled)]
struct InvoiceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "ISSUE DATE")]
    issue_date: String,
    #[tabled(rename = "BILLING DATE")]
    billing_date: String,
    #[tabled(rename = "PAYMENT DATE")]
    payment_date: String,
    #[tabled(rename = "STATUS")]
    status: String,
    #[tabled(rename = "VALUE")]
    value: String,
}

#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "METRIC")]
    title: String,
    #[tabled(rename = "VALUE")]
    value: String,
    #[tabled(rename = "COUNT")]
    quantity: u32,
}

#[derive(Tabled)]
struct ChartRow {
    #[tabled(rename = "LABEL")]
    label: String,
    #[tabled(rename = "PAID")]
    paid: String,
    #[tabled(rename = "DELINQUENCY")]
    delinquency: String,
}

fn ensure_initialized(cfg_dir: &Path) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(DashboardError::ConfigNotFound(cfg_dir.to_path_buf()));
    }
    Ok(())
}

/// Build the active filter from CLI flags or a shared query string.
fn build_descriptor(scope: QueryScope, args: &FilterArgs) -> Result<Option<FilterDescriptor>> {
    if let Some(query) = &args.query {
        return decode_query(scope, query);
    }

    let Some(kind_str) = &args.filter_by else {
        return Ok(None);
    };
    let kind: FilterKind = kind_str.parse()?;

    let descriptor = match &args.value {
        Some(raw) => FilterDescriptor::parse(kind, raw)?,
        None => FilterDescriptor::with_default(kind, Local::now().date_naive()),
    };
    Ok(Some(descriptor))
}

/// Load invoices, degrading to the empty prior state on fetch failure.
fn load_invoices_or_empty(cfg_dir: &Path, settings: &Settings) -> Result<Vec<InvoiceRecord>> {
    match data::load_invoices(cfg_dir, settings) {
        Ok(records) => Ok(records),
        Err(e @ DashboardError::Fetch { .. }) => {
            eprintln!("Warning: {e}");
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}

fn print_link(scope: QueryScope, descriptor: Option<&FilterDescriptor>) {
    match descriptor {
        Some(d) => println!("{}", encode_query(scope, d)),
        None => println!("No active filter."),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| {
        DashboardError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            e.to_string(),
        ))
    })
}

/// List invoices, optionally filtered
fn cmd_list(cfg_dir: &Path, args: &FilterArgs) -> Result<()> {
    ensure_initialized(cfg_dir)?;

    let settings = load_settings(cfg_dir)?;
    let locale = settings.display.locale()?;
    let descriptor = build_descriptor(QueryScope::Table, args)?;

    if args.link {
        print_link(QueryScope::Table, descriptor.as_ref());
        return Ok(());
    }

    let invoices = load_invoices_or_empty(cfg_dir, &settings)?;
    let shown = resolve_filter(&invoices, descriptor.as_ref()).unwrap_or(invoices);

    if args.json {
        println!("{}", to_json(&shown)?);
        return Ok(());
    }

    if shown.is_empty() {
        println!("No invoices to display.");
        return Ok(());
    }

    let rows: Vec<InvoiceRow> = shown
        .iter()
        .map(|record| InvoiceRow {
            id: record.id.clone(),
            issue_date: record.issue_date.to_string(),
            billing_date: format_optional_date(record.billing_date),
            payment_date: format_optional_date(record.payment_date),
            status: record.status.to_string(),
            value: format_currency(record.value, locale.symbol),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");
    println!();
    println!("Total: {} invoices", shown.len());

    Ok(())
}

/// Show the five summary metric cards
fn cmd_metrics(cfg_dir: &Path, args: &FilterArgs) -> Result<()> {
    ensure_initialized(cfg_dir)?;

    let settings = load_settings(cfg_dir)?;
    let locale = settings.display.locale()?;
    let descriptor = build_descriptor(QueryScope::Metrics, args)?;

    if args.link {
        print_link(QueryScope::Metrics, descriptor.as_ref());
        return Ok(());
    }

    let invoices = load_invoices_or_empty(cfg_dir, &settings)?;
    let shown = resolve_filter(&invoices, descriptor.as_ref()).unwrap_or(invoices);
    let cards = compute_cards(&shown);

    if args.json {
        println!("{}", to_json(&cards)?);
        return Ok(());
    }

    let rows: Vec<MetricRow> = cards
        .iter()
        .map(|card| MetricRow {
            title: card.title.to_string(),
            value: format_currency(card.value, locale.symbol),
            quantity: card.quantity,
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}

/// Show the paid/delinquency chart series
fn cmd_chart(cfg_dir: &Path, args: &FilterArgs) -> Result<()> {
    ensure_initialized(cfg_dir)?;

    let settings = load_settings(cfg_dir)?;
    let locale = settings.display.locale()?;
    let descriptor = build_descriptor(QueryScope::Metrics, args)?;

    if args.link {
        print_link(QueryScope::Metrics, descriptor.as_ref());
        return Ok(());
    }

    let invoices = load_invoices_or_empty(cfg_dir, &settings)?;
    let series = compute_series(&invoices, descriptor.as_ref());

    if args.json {
        println!("{}", to_json(&series)?);
        return Ok(());
    }

    if series.labels.is_empty() {
        println!("No data to chart.");
        return Ok(());
    }

    // Absent buckets render as "-", never as zero.
    let format_bucket = |slot: Option<f64>| match slot {
        Some(value) => format_currency(value, locale.symbol),
        None => "-".to_string(),
    };

    let rows: Vec<ChartRow> = series
        .labels
        .iter()
        .enumerate()
        .map(|(idx, label)| ChartRow {
            label: label.clone(),
            paid: format_bucket(series.datasets[0].data[idx]),
            delinquency: format_bucket(series.datasets[1].data[idx]),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}

/// Show the dashboard profile
fn cmd_profile(cfg_dir: &Path) -> Result<()> {
    ensure_initialized(cfg_dir)?;

    let settings = load_settings(cfg_dir)?;
    match data::load_profile(cfg_dir, &settings) {
        Ok(profile) => {
            println!("Profile");
            println!("{}", "-".repeat(50));
            println!("Name:  {}", profile.name);
            println!("Role:  {}", profile.role);
            println!("Image: {} ({})", profile.image.src, profile.image.alt);
            Ok(())
        }
        Err(e @ DashboardError::Fetch { .. }) => {
            eprintln!("Warning: {e}");
            println!("No profile data available.");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

/// Re-fetch the data sources, overwriting the cache
fn cmd_refresh(cfg_dir: &Path) -> Result<()> {
    ensure_initialized(cfg_dir)?;

    let settings = load_settings(cfg_dir)?;
    let (records, profile) = data::refresh(cfg_dir, &settings)?;

    println!("Refreshed data cache at {}", data::cache_dir(cfg_dir).display());
    println!("  Invoices: {} records", records.len());
    println!("  Profile:  {}", profile.name);

    Ok(())
}

/// Drop cached data
fn cmd_clear_cache(cfg_dir: &Path) -> Result<()> {
    ensure_initialized(cfg_dir)?;

    let dir = data::cache_dir(cfg_dir);
    let existed = dir.exists();
    data::clear_cache(cfg_dir)?;

    if existed {
        println!("Cleared cached data at {}", dir.display());
    } else {
        println!("No cached data to clear.");
    }

    Ok(())
}

fn format_optional_date(date: Option<chrono::NaiveDate>) -> String {
    match date {
        Some(d) => d.to_string(),
        None => "-".to_string(),
    }
}

/// Format a money amount with two decimal places and thousands separators
fn format_currency(value: f64, currency_symbol: &str) -> String {
    let rounded = format!("{:.2}", value);
    let (whole, frac) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));

    let negative = whole.starts_with('-');
    let digits = if negative { &whole[1..] } else { whole };
    let grouped = format_grouped_int(digits.parse::<i64>().unwrap_or(0));

    if negative {
        format!("-{currency_symbol}{grouped}.{frac}")
    } else {
        format!("{currency_symbol}{grouped}.{frac}")
    }
}

fn format_grouped_int(value: i64) -> String {
    let negative = value < 0;
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    let mut grouped: String = out.chars().rev().collect();
    if negative {
        grouped.insert(0, '-');
    }
    grouped
}
