use std::path::PathBuf;

use clap::Parser;
use fifa_scraping::dates_parser;
use scraper::Html;

#[derive(Parser)]
struct Opts {
    input_file: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();
    let html = Html::parse_document(&fs_err::read_to_string(opts.input_file)?);
    let ids = dates_parser::parse(&html)?;
    for id in &ids {
        println!("{} ({})", id.value(), id.date());
    }
    Ok(())
}
