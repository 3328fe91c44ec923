use itertools::Itertools;
use scraper::Html;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::schema::RankingSnapshotId;
use crate::selector;

// The overview page embeds its data as a json blob inside a script element.
// Only the path down to the date listing is modeled; the ids come out in
// upstream order, newest first.
#[derive(Deserialize)]
struct EmbeddedPageData {
    props: Props,
}
#[derive(Deserialize)]
struct Props {
    #[serde(rename = "pageProps")]
    page_props: PageProps,
}
#[derive(Deserialize)]
struct PageProps {
    #[serde(rename = "pageData")]
    page_data: PageData,
}
#[derive(Deserialize)]
struct PageData {
    ranking: RankingDates,
}
#[derive(Deserialize)]
struct RankingDates {
    dates: Vec<DateGroup>,
}
#[derive(Deserialize)]
struct DateGroup {
    dates: Vec<DateEntry>,
}
#[derive(Deserialize)]
struct DateEntry {
    id: String,
    text: String,
}

/// Extracts every ranking snapshot id from the overview page.
pub fn parse(html: &Html) -> Result<Vec<RankingSnapshotId>> {
    let script = html
        .select(selector!("script"))
        .map(|element| element.text().collect::<String>())
        .filter(|text| text.contains("dates"))
        .last()
        .ok_or_else(|| {
            Error::ParseFailure("no script element with ranking dates found".to_owned())
        })?;
    let data: EmbeddedPageData = serde_json::from_str(&script)
        .map_err(|e| Error::ParseFailure(format!("embedded page data is not valid json: {e}")))?;
    data.props
        .page_props
        .page_data
        .ranking
        .dates
        .iter()
        .flat_map(|group| &group.dates)
        .map(|entry| RankingSnapshotId::new(entry.id.clone(), &entry.text))
        .try_collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING_PAGE: &str = r#"<html><head>
        <script>window.analytics = {};</script>
        </head><body><div id="root"></div>
        <script id="__NEXT_DATA__" type="application/json">{
            "props": {"pageProps": {"pageData": {"ranking": {"dates": [
                {"dates": [
                    {"id": "id13869", "text": "7 Sept 2023"},
                    {"id": "id13792", "text": "20 Jul 2023"}
                ]},
                {"dates": [
                    {"id": "id13603", "text": "22 Dec 2022"}
                ]}
            ]}}}}
        }</script>
        </body></html>"#;

    #[test]
    fn parses_groups_in_source_order() {
        let ids = parse(&Html::parse_document(LISTING_PAGE)).unwrap();
        assert_eq!(
            ids.iter().map(|id| id.value().as_str()).collect::<Vec<_>>(),
            ["id13869", "id13792", "id13603"]
        );
        assert_eq!(ids[0].date().to_string(), "2023-09-07");
        assert_eq!(ids[2].date().to_string(), "2022-12-22");
    }

    #[test]
    fn page_without_dates_script_is_a_parse_failure() {
        let html = Html::parse_document("<html><script>var x = 1;</script></html>");
        assert!(matches!(parse(&html), Err(Error::ParseFailure(_))));
    }

    #[test]
    fn malformed_embedded_json_is_a_parse_failure() {
        let html = Html::parse_document(r#"<html><script>{"dates": oops}</script></html>"#);
        assert!(matches!(parse(&html), Err(Error::ParseFailure(_))));
    }
}
