use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDate;
use getset::{CopyGetters, Getters};
use serde::{Deserialize, Deserializer, Serialize};
use typed_builder::TypedBuilder;

use crate::error::{Error, Result};

/// Ranking cohort. The upstream API knows exactly these two.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, strum::Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Men,
    Women,
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "men" => Ok(Self::Men),
            "women" => Ok(Self::Women),
            _ => Err(Error::InvalidArgument(format!(
                "unknown category {s:?}, expected \"men\" or \"women\""
            ))),
        }
    }
}

/// Identifies one published, dated ranking snapshot.
///
/// The upstream listing spells dates like "7 Sept 2021"; they are normalized
/// and stored as proper calendar dates, so an id with an unparseable date
/// cannot be constructed.
#[derive(Clone, PartialEq, Eq, Debug, Getters, CopyGetters, Serialize, Deserialize)]
pub struct RankingSnapshotId {
    #[getset(get = "pub")]
    #[serde(alias = "id")]
    value: String,
    #[getset(get_copy = "pub")]
    #[serde(alias = "text", deserialize_with = "deserialize_snapshot_date")]
    date: NaiveDate,
}

impl RankingSnapshotId {
    pub fn new(value: impl Into<String>, date_text: &str) -> Result<Self> {
        Ok(Self {
            value: value.into(),
            date: parse_snapshot_date(date_text)?,
        })
    }
}

impl Display for RankingSnapshotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RankingSnapshotId(date={})", self.date)
    }
}

/// The upstream abbreviates September as "Sept", which no strftime-style
/// parser accepts.
fn parse_snapshot_date(text: &str) -> Result<NaiveDate> {
    let normalized = text.replace("Sept", "Sep");
    NaiveDate::parse_from_str(&normalized, "%d %b %Y")
        .or_else(|_| NaiveDate::parse_from_str(&normalized, "%Y-%m-%d"))
        .map_err(|e| Error::ParseFailure(format!("unparseable snapshot date {text:?}: {e}")))
}

fn deserialize_snapshot_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<NaiveDate, D::Error> {
    let text = String::deserialize(deserializer)?;
    parse_snapshot_date(&text).map_err(serde::de::Error::custom)
}

/// A team's flag image.
#[derive(Clone, PartialEq, Eq, Debug, TypedBuilder, Getters, Serialize, Deserialize)]
pub struct Flag {
    #[getset(get = "pub")]
    src: String,
    #[getset(get = "pub")]
    title: String,
}

/// One team entry of a ranking, materialized from the raw payload.
#[derive(Clone, PartialEq, Eq, Debug, TypedBuilder, Getters, CopyGetters, Serialize)]
pub struct RankingItem {
    #[getset(get_copy = "pub")]
    #[builder(default)]
    rank: u32,
    #[getset(get = "pub")]
    #[builder(default = unknown())]
    name: String,
    #[getset(get_copy = "pub")]
    #[builder(default)]
    total_points: i64,
    #[getset(get_copy = "pub")]
    #[builder(default)]
    previous_points: i64,
    #[getset(get = "pub")]
    #[builder(default = unknown())]
    country_code: String,
    #[getset(get = "pub")]
    #[builder(default = unknown())]
    confederation: String,
    #[getset(get = "pub")]
    flag: Flag,
}

impl RankingItem {
    pub(crate) fn from_entry(entry: &RankingEntry) -> Self {
        Self::builder()
            .rank(entry.ranking_item.rank)
            .name(entry.ranking_item.name.clone())
            .total_points(entry.ranking_item.total_points)
            .previous_points(entry.previous_points)
            .country_code(entry.ranking_item.country_code.clone())
            .confederation(entry.tag.as_ref().map_or_else(unknown, |tag| tag.id.clone()))
            .flag(entry.ranking_item.flag.clone())
            .build()
    }
}

fn unknown() -> String {
    "Unknown".to_owned()
}

/// The ranking payload as returned by the API. Fields we do not model are
/// kept in the flattened maps so that the raw data survives a cache or
/// export round trip.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RankingPayload {
    pub rankings: Vec<RankingEntry>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RankingEntry {
    #[serde(rename = "rankingItem")]
    pub ranking_item: RawRankingItem,
    #[serde(rename = "previousPoints", default)]
    pub previous_points: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<ConfederationTag>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConfederationTag {
    #[serde(default = "unknown")]
    pub id: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Per-team fields nested under `rankingItem`. The flag is the one field the
/// payload must provide; every scalar falls back to a default when absent.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RawRankingItem {
    #[serde(default)]
    pub rank: u32,
    #[serde(default = "unknown")]
    pub name: String,
    #[serde(rename = "totalPoints", default)]
    pub total_points: i64,
    #[serde(rename = "countryCode", default = "unknown")]
    pub country_code: String,
    pub flag: Flag,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_date_is_normalized() {
        let id = RankingSnapshotId::new("id1", "7 Sept 2021").unwrap();
        assert_eq!(id.value(), "id1");
        assert_eq!(id.date().to_string(), "2021-09-07");
    }

    #[test]
    fn unparseable_date_fails_construction() {
        assert!(matches!(
            RankingSnapshotId::new("id1", "sometime in autumn"),
            Err(Error::ParseFailure(_))
        ));
    }

    #[test]
    fn cached_id_accepts_upstream_and_iso_spellings() {
        let from_upstream: RankingSnapshotId =
            serde_json::from_str(r#"{"id": "id1", "date": "07 Sep 2021"}"#).unwrap();
        assert_eq!(from_upstream.value(), "id1");
        assert_eq!(from_upstream.date().to_string(), "2021-09-07");

        let round_tripped: RankingSnapshotId =
            serde_json::from_str(&serde_json::to_string(&from_upstream).unwrap()).unwrap();
        assert_eq!(round_tripped, from_upstream);
    }

    #[test]
    fn category_parsing() {
        assert_eq!("men".parse::<Category>().unwrap(), Category::Men);
        assert_eq!("women".parse::<Category>().unwrap(), Category::Women);
        assert!(matches!(
            "robots".parse::<Category>(),
            Err(Error::InvalidArgument(_))
        ));
        assert_eq!(Category::Women.to_string(), "women");
    }

    #[test]
    fn missing_scalar_fields_fall_back_to_defaults() {
        let payload = test_fixtures::payload();
        let item = RankingItem::from_entry(&payload.rankings[2]);
        assert_eq!(item.rank(), 0);
        assert_eq!(item.name(), "Unknown");
        assert_eq!(item.total_points(), 0);
        assert_eq!(item.previous_points(), 0);
        assert_eq!(item.country_code(), "Unknown");
        assert_eq!(item.confederation(), "Unknown");
        assert_eq!(item.flag().title(), "Sao Tome e Principe");
    }

    #[test]
    fn missing_flag_is_a_parse_error() {
        let result: std::result::Result<RankingPayload, serde_json::Error> =
            serde_json::from_str(r#"{"rankings": [{"rankingItem": {"rank": 1}}]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn full_entry_maps_through() {
        let payload = test_fixtures::payload();
        let item = RankingItem::from_entry(&payload.rankings[0]);
        assert_eq!(item.rank(), 1);
        assert_eq!(item.name(), "Belgium");
        assert_eq!(item.total_points(), 1832);
        assert_eq!(item.previous_points(), 1822);
        assert_eq!(item.country_code(), "BEL");
        assert_eq!(item.confederation(), "UEFA");
        assert_eq!(item.flag().src(), "https://img.example/bel.png");
    }
}
