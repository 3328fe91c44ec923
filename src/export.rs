use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::info;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::{Error, Result};
use crate::ranking::Ranking;

#[derive(Clone, Copy, PartialEq, Eq, Debug, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(Error::InvalidArgument(format!(
                "unknown export format {s:?}, expected \"json\" or \"csv\""
            ))),
        }
    }
}

pub const CSV_HEADER: [&str; 7] = [
    "Rank",
    "Team",
    "Total Points",
    "Previous Points",
    "Country Code",
    "Confederation",
    "Flag",
];

/// Writes the ranking's visible window to a file in the given format and
/// returns the path actually written. With no path, the file name is derived
/// from the snapshot date.
pub fn export(ranking: &Ranking, format: ExportFormat, path: Option<&Path>) -> Result<PathBuf> {
    match format {
        ExportFormat::Json => export_json(ranking, path),
        ExportFormat::Csv => export_csv(ranking, path),
    }
}

fn default_path(ranking: &Ranking, format: ExportFormat) -> PathBuf {
    PathBuf::from(format!("fifa_ranking_{}.{format}", ranking.id().date()))
}

fn export_io(path: &Path) -> impl FnOnce(io::Error) -> Error + '_ {
    move |source| Error::ExportIo {
        path: path.to_path_buf(),
        source,
    }
}

/// The raw payload, with `rankings` truncated to the visible window, as
/// 4-space-indented json. Non-ASCII text is written as-is (UTF-8).
pub fn export_json(ranking: &Ranking, path: Option<&Path>) -> Result<PathBuf> {
    let path = path.map_or_else(
        || default_path(ranking, ExportFormat::Json),
        Path::to_path_buf,
    );
    let mut truncated = ranking.data().clone();
    truncated.rankings.truncate(ranking.visible().len());
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    truncated.serialize(&mut serializer).map_err(|e| Error::ExportIo {
        path: path.clone(),
        source: io::Error::new(io::ErrorKind::InvalidData, e),
    })?;
    fs_err::write(&path, &buf).map_err(export_io(&path))?;
    info!("Exported {} items as json to {path:?}", ranking.visible().len());
    Ok(path)
}

/// One header line plus one line per visible item, comma-separated; the flag
/// is rendered as its source url. A missing `.csv` extension is appended.
pub fn export_csv(ranking: &Ranking, path: Option<&Path>) -> Result<PathBuf> {
    let mut path = path.map_or_else(
        || default_path(ranking, ExportFormat::Csv),
        Path::to_path_buf,
    );
    if path.extension().map_or(true, |ext| ext != "csv") {
        let mut raw = path.into_os_string();
        raw.push(".csv");
        path = PathBuf::from(raw);
    }
    render_csv(ranking)
        .and_then(|rows| fs_err::write(&path, rows))
        .map_err(export_io(&path))?;
    info!("Exported {} items as csv to {path:?}", ranking.visible().len());
    Ok(path)
}

fn render_csv(ranking: &Ranking) -> io::Result<Vec<u8>> {
    let into_io = |e: csv::Error| io::Error::new(io::ErrorKind::InvalidData, e);
    let mut buf = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buf);
        writer.write_record(CSV_HEADER).map_err(into_io)?;
        for item in ranking.items() {
            writer
                .write_record([
                    item.rank().to_string(),
                    item.name().clone(),
                    item.total_points().to_string(),
                    item.previous_points().to_string(),
                    item.country_code().clone(),
                    item.confederation().clone(),
                    item.flag().src().clone(),
                ])
                .map_err(into_io)?;
        }
        writer.flush()?;
    }
    Ok(buf)
}
