use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use fifa_scraping::api::FifaClient;
use fifa_scraping::config::Config;
use fifa_scraping::schema::Category;

#[derive(Parser)]
struct Opts {
    #[arg(default_value_t = Category::Men)]
    category: Category,
    #[arg(long, default_value = "en")]
    lang: String,
    #[arg(long)]
    limit: Option<usize>,
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
    let latest = ids.first().context("The snapshot id listing is empty.")?;
    println!(
        "Found {} {} ranking snapshots; latest is from {}.",
        ids.len(),
        opts.category,
        latest.date()
    );

    let ranking = client.ranking(latest.clone(), &opts.lang, opts.limit)?;
    for item in ranking.items() {
        println!(
            "{:>4}  {} ({})  {} points",
            item.rank(),
            item.name(),
            item.confederation(),
            item.total_points()
        );
    }
    Ok(())
}
