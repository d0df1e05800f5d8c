pub mod pages;
pub mod shared;

use anyhow::{anyhow, Context};
use chrono::NaiveDate;
use clap::Parser;
use contracts::enums::Sector;
use contracts::shared::list_state::{DateBucket, ListState, SortDirection};
use std::path::PathBuf;

use pages::PageContext;
use shared::config::load_config;
use shared::logger::init_logging;

#[derive(Parser, Debug)]
#[command(name = "dashboard")]
#[command(about = "Evaluates one sector listing page over a JSON fixture")]
struct Cli {
    /// billing, healthcare, fleet, inventory, tax, law or staffing
    #[arg(long)]
    sector: String,

    /// Fixture file: a JSON array of records ({"doctors", "appointments"} for healthcare)
    #[arg(long)]
    data: PathBuf,

    /// Free-text search over the page's text fields
    #[arg(long, default_value = "")]
    search: String,

    /// Exact filter, repeatable; `field=all` leaves the field unconstrained
    #[arg(long = "filter", value_parser = parse_filter)]
    filters: Vec<(String, String)>,

    /// all, today or tomorrow
    #[arg(long, default_value = "all", value_parser = parse_bucket)]
    date_bucket: DateBucket,

    #[arg(long)]
    sort: Option<String>,

    /// Sort descending
    #[arg(long)]
    desc: bool,

    /// Zero-based page
    #[arg(long, default_value_t = 0)]
    page: usize,

    /// Defaults to [display] page_size
    #[arg(long)]
    page_size: Option<usize>,

    /// "Today" for date buckets (defaults to the local date)
    #[arg(long)]
    reference_date: Option<NaiveDate>,

    /// Config file (defaults to config.toml next to the executable)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((field, value)) if !field.trim().is_empty() => {
            Ok((field.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected field=value, got `{raw}`")),
    }
}

fn parse_bucket(raw: &str) -> Result<DateBucket, String> {
    DateBucket::from_code(raw).ok_or_else(|| format!("expected all, today or tomorrow, got `{raw}`"))
}

impl Cli {
    fn list_state(&self) -> ListState {
        let mut state = ListState::default()
            .with_search(self.search.clone())
            .with_date_bucket(self.date_bucket);
        for (field, value) in &self.filters {
            state = state.with_filter(field.clone(), value.clone());
        }
        if let Some(field) = &self.sort {
            let direction = SortDirection::from_ascending(!self.desc);
            state = state.with_sort(field.clone(), direction);
        }
        state.with_page(self.page, self.page_size)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (config, source) = load_config(cli.config.as_deref())?;
    let log_file = init_logging(&config.logging)?;
    tracing::info!(config = %source, log = %log_file.display(), "dashboard starting");

    let sector = Sector::from_code(&cli.sector).ok_or_else(|| {
        let known: Vec<&str> = Sector::all().iter().map(|s| s.code()).collect();
        anyhow!("unknown sector `{}` (expected one of: {})", cli.sector, known.join(", "))
    })?;

    let data = std::fs::read_to_string(&cli.data)
        .with_context(|| format!("failed to read fixture {}", cli.data.display()))?;
    tracing::info!(sector = sector.code(), fixture = %cli.data.display(), "fixture loaded");

    let reference = cli
        .reference_date
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let ctx = PageContext::new(config, reference);
    let state = cli.list_state();

    let summary = pages::run(sector, &data, &state, &ctx)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_to_list_state() {
        let cli = Cli::parse_from([
            "dashboard",
            "--sector",
            "tax",
            "--data",
            "fixtures/tax.json",
            "--search",
            "north",
            "--filter",
            "status=paid",
            "--filter",
            "tax_type=all",
            "--date-bucket",
            "tomorrow",
            "--sort",
            "amount",
            "--desc",
            "--page",
            "2",
            "--reference-date",
            "2024-03-15",
        ]);
        assert_eq!(cli.reference_date, NaiveDate::from_ymd_opt(2024, 3, 15));

        let state = cli.list_state();
        assert_eq!(state.search, "north");
        assert_eq!(state.filters.get("status").map(String::as_str), Some("paid"));
        assert_eq!(state.filters.get("tax_type").map(String::as_str), Some("all"));
        assert_eq!(state.date_bucket, DateBucket::Tomorrow);
        assert_eq!(state.sort_field.as_deref(), Some("amount"));
        assert_eq!(state.sort_direction(), SortDirection::Desc);
        assert_eq!(state.page, 2);
        assert_eq!(state.page_size, None);
    }

    #[test]
    fn test_parse_filter() {
        assert_eq!(
            parse_filter("status = overdue"),
            Ok(("status".to_string(), "overdue".to_string()))
        );
        assert!(parse_filter("status").is_err());
        assert!(parse_filter("=paid").is_err());
    }

    #[test]
    fn test_bad_bucket_is_rejected() {
        let result = Cli::try_parse_from([
            "dashboard", "--sector", "law", "--data", "x.json", "--date-bucket", "yesterday",
        ]);
        assert!(result.is_err());
    }
}
