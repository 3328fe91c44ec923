use getset::{CopyGetters, Getters, Setters};

use crate::schema::{RankingEntry, RankingItem, RankingPayload, RankingSnapshotId};

/// A resolved ranking snapshot: the raw payload plus the parameters it was
/// resolved with and an optional cap on how many entries are visible.
///
/// The setters only record the new value. Nothing is refetched until
/// [`FifaClient::refresh`](crate::api::FifaClient::refresh) is called, so a
/// ranking whose id or lang was changed is out of sync until then.
#[derive(Debug, Getters, CopyGetters, Setters)]
pub struct Ranking {
    #[getset(get = "pub", set = "pub")]
    id: RankingSnapshotId,
    #[getset(get = "pub", set = "pub")]
    lang: String,
    #[getset(get_copy = "pub", set = "pub")]
    limit: Option<usize>,
    #[getset(get = "pub")]
    data: RankingPayload,
}

impl Ranking {
    pub(crate) fn new(
        id: RankingSnapshotId,
        lang: String,
        limit: Option<usize>,
        data: RankingPayload,
    ) -> Self {
        Self {
            id,
            lang,
            limit,
            data,
        }
    }

    pub(crate) fn replace_data(&mut self, data: RankingPayload) {
        self.data = data;
    }

    /// The raw entries within the visible window: the first `limit` of them,
    /// or all when no limit is set. A limit beyond the end is not an error.
    pub fn visible(&self) -> &[RankingEntry] {
        let len = self.data.rankings.len();
        &self.data.rankings[..self.limit.unwrap_or(len).min(len)]
    }

    /// Materializes the visible entries as typed records. Built fresh on
    /// every call; the raw payload is left untouched.
    pub fn items(&self) -> Vec<RankingItem> {
        self.visible().iter().map(RankingItem::from_entry).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::test_fixtures;

    fn ranking(limit: Option<usize>) -> Ranking {
        let id = RankingSnapshotId::new("id1", "16 Sept 2021").unwrap();
        Ranking::new(id, "en".to_owned(), limit, test_fixtures::payload())
    }

    #[test]
    fn no_limit_yields_all_items() {
        assert_eq!(ranking(None).items().len(), 3);
    }

    #[test]
    fn limit_caps_the_item_count() {
        let items = ranking(Some(2)).items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name(), "Belgium");
        assert_eq!(items[1].name(), "Brazil");
    }

    #[test]
    fn oversized_limit_yields_everything() {
        assert_eq!(ranking(Some(100)).items().len(), 3);
    }

    #[test]
    fn zero_limit_yields_nothing() {
        assert!(ranking(Some(0)).items().is_empty());
    }

    #[test]
    fn setters_do_not_touch_the_data() {
        let mut ranking = ranking(None);
        ranking.set_lang("fr".to_owned());
        ranking.set_limit(Some(1));
        assert_eq!(ranking.lang(), "fr");
        assert_eq!(ranking.data().rankings.len(), 3);
        assert_eq!(ranking.items().len(), 1);
    }
}
