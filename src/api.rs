use log::{debug, info};
use scraper::Html;

use crate::cache::{self, CacheStore};
use crate::config::Config;
use crate::dates_parser;
use crate::error::{Error, Result};
use crate::ranking::Ranking;
use crate::schema::{Category, RankingPayload, RankingSnapshotId};

/// Blocking client for the ranking API, with cache-first semantics for both
/// the snapshot-id listing and the per-snapshot payloads. Every network call
/// is a single GET with no retry; a failure propagates to the caller.
pub struct FifaClient {
    client: reqwest::blocking::Client,
    cache: CacheStore,
    config: Config,
}

pub fn reqwest_client() -> reqwest::Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .user_agent(concat!("fifa-scraping/", env!("CARGO_PKG_VERSION")))
        .build()
}

impl FifaClient {
    pub fn new() -> anyhow::Result<Self> {
        Self::with_config(Config::default())
    }

    /// Opens the cache directory (created if absent) and builds the HTTP
    /// client. This is the one-time process bootstrap; all later operations
    /// only return [`Error`](crate::error::Error) values.
    pub fn with_config(config: Config) -> anyhow::Result<Self> {
        Ok(Self {
            client: reqwest_client()?,
            cache: CacheStore::open(&config.cache_dir)?,
            config,
        })
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn fetch(&self, url: &str) -> Result<String> {
        info!("Fetching {url}");
        let upstream_err = |source| Error::UpstreamUnavailable {
            url: url.to_owned(),
            source,
        };
        let response = self
            .client
            .get(url)
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(|e| upstream_err(Some(e)))?;
        let body = response.text().map_err(|e| upstream_err(Some(e)))?;
        if body.is_empty() {
            return Err(upstream_err(None));
        }
        Ok(body)
    }

    /// All snapshot ids published for `category`, newest first (upstream
    /// order is preserved). Served from cache when the listing was resolved
    /// before; the cache never expires on its own.
    pub fn ranking_ids(&self, category: Category) -> Result<Vec<RankingSnapshotId>> {
        let key = cache::ranking_ids_key(category);
        if self.cache.exists(&key) {
            debug!("Snapshot id listing for {category} found in cache.");
            return self.cache.load(&key);
        }
        let url = format!(
            "{}/ranking-overview-page?locale=en_US&category={category}",
            self.config.api_base
        );
        let body = self.fetch(&url)?;
        let ids = dates_parser::parse(&Html::parse_document(&body))?;
        self.cache.save(&key, &ids)?;
        Ok(ids)
    }

    /// Resolves a ranking for the given snapshot id and language,
    /// cache-first. `limit` caps how many entries `items()` exposes.
    pub fn ranking(
        &self,
        id: RankingSnapshotId,
        lang: impl Into<String>,
        limit: Option<usize>,
    ) -> Result<Ranking> {
        let lang = lang.into();
        let data = self.ranking_data(&id, &lang)?;
        Ok(Ranking::new(id, lang, limit, data))
    }

    /// Re-resolves `ranking` against its current id and lang, replacing the
    /// raw payload. This is the only operation that brings a mutated ranking
    /// back in sync.
    pub fn refresh(&self, ranking: &mut Ranking) -> Result<()> {
        let data = self.ranking_data(ranking.id(), ranking.lang())?;
        ranking.replace_data(data);
        Ok(())
    }

    fn ranking_data(&self, id: &RankingSnapshotId, lang: &str) -> Result<RankingPayload> {
        let key = cache::ranking_key(id.value(), lang);
        if self.cache.exists(&key) {
            debug!("Ranking {} ({lang}) found in cache.", id.value());
            return self.cache.load(&key);
        }
        let url = format!(
            "{}/ranking-overview?locale={lang}&dateId={}",
            self.config.api_base,
            id.value()
        );
        let body = self.fetch(&url)?;
        let data: RankingPayload = serde_json::from_str(&body)
            .map_err(|e| Error::ParseFailure(format!("ranking payload is not valid json: {e}")))?;
        if data.rankings.is_empty() {
            return Err(Error::ParseFailure(format!(
                "ranking payload for {} ({lang}) contains no entries",
                id.value()
            )));
        }
        self.cache.save(&key, &data)?;
        Ok(data)
    }
}
