use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use fifa_scraping::api::FifaClient;
use fifa_scraping::config::Config;
use fifa_scraping::export::{self, ExportFormat};
use fifa_scraping::schema::Category;
use log::warn;

/// Resolves one ranking snapshot and exports its visible items.
#[derive(Parser)]
struct Opts {
    #[arg(default_value_t = Category::Men)]
    category: Category,
    #[arg(long, default_value = "en")]
    lang: String,
    #[arg(long)]
    limit: Option<usize>,
    /// Snapshot id to export; defaults to the newest one.
    #[arg(long)]
    date_id: Option<String>,
    #[arg(long = "format", default_values_t = [ExportFormat::Json])]
    formats: Vec<ExportFormat>,
    /// Target file; per-format default names are derived from the snapshot
    /// date when omitted.
    #[arg(long)]
    output: Option<PathBuf>,
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let opts = Opts::parse();
    let config = match &opts.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let client = FifaClient::with_config(config)?;

    let ids = client.ranking_ids(opts.category)?;
    let id = match &opts.date_id {
        Some(value) => ids
            .iter()
            .find(|id| id.value() == value)
            .with_context(|| format!("Snapshot id {value:?} is not in the {} listing.", opts.category))?,
        None => ids.first().context("The snapshot id listing is empty.")?,
    };
    let ranking = client.ranking(id.clone(), &opts.lang, opts.limit)?;

    // A failed write must not abort the remaining exports.
    let mut failures = 0;
    for &format in &opts.formats {
        match export::export(&ranking, format, opts.output.as_deref()) {
            Ok(path) => println!("Exported {format} to {path:?}"),
            Err(e) => {
                warn!("{e}");
                failures += 1;
            }
        }
    }
    if failures > 0 {
        bail!("{failures} of {} exports failed", opts.formats.len());
    }
    Ok(())
}
