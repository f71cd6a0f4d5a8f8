//! In-memory record store, the reference `RecordStore` the SQL stores are checked against

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::{DomainResult, ListOrder, ListedRecord, RecordStore, SearchFilter};

/// DashMap-backed `RecordStore` over any `ListedRecord`.
pub struct InMemoryRecordStore<R: ListedRecord> {
    records: DashMap<String, R>,
    order: ListOrder,
    scope: Option<fn(&R) -> bool>,
}

impl<R: ListedRecord> InMemoryRecordStore<R> {
    pub fn new(order: ListOrder) -> Self {
        Self {
            records: DashMap::new(),
            order,
            scope: None,
        }
    }

    /// Restricts every read to records accepted by `scope`.
    pub fn scoped(mut self, scope: fn(&R) -> bool) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn insert(&self, record: R) {
        self.records.insert(record.id().to_string(), record);
    }

    fn matching(&self, filter: &SearchFilter) -> Vec<R> {
        self.records
            .iter()
            .filter(|entry| self.scope.map_or(true, |accept| accept(entry.value())))
            .filter(|entry| filter.matches(&entry.value().search_fields()))
            .map(|entry| entry.value().clone())
            .collect()
    }
}

impl<R: ListedRecord> FromIterator<R> for InMemoryRecordStore<R> {
    /// Newest-first store pre-filled with `iter`.
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        let store = Self::new(ListOrder::NewestFirst);
        for record in iter {
            store.insert(record);
        }
        store
    }
}

#[async_trait]
impl<R: ListedRecord> RecordStore for InMemoryRecordStore<R> {
    type Record = R;

    fn default_order(&self) -> ListOrder {
        self.order
    }

    async fn find_many(
        &self,
        filter: &SearchFilter,
        order: ListOrder,
        skip: u64,
        take: Option<u64>,
    ) -> DomainResult<Vec<R>> {
        let mut rows = self.matching(filter);
        match order {
            // id breaks ties so equal timestamps page deterministically
            ListOrder::NewestFirst => rows.sort_by(|a, b| {
                b.created_at()
                    .cmp(&a.created_at())
                    .then_with(|| b.id().cmp(a.id()))
            }),
            ListOrder::LabelAscending => {
                rows.sort_by(|a, b| a.cmp_label(b).then_with(|| a.id().cmp(b.id())))
            }
        }

        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        let take = take
            .and_then(|t| usize::try_from(t).ok())
            .unwrap_or(usize::MAX);
        Ok(rows.into_iter().skip(skip).take(take).collect())
    }

    async fn count(&self, filter: &SearchFilter) -> DomainResult<u64> {
        Ok(self.matching(filter).len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::floor::{Floor, FloorDraft};
    use chrono::{Duration, Utc};

    fn floor(n: i32, minutes_ago: i64) -> Floor {
        Floor::new(
            FloorDraft { floor_number: n },
            "a@b.c",
            Utc::now() - Duration::minutes(minutes_ago),
        )
    }

    #[tokio::test]
    async fn newest_first_with_window() {
        let store: InMemoryRecordStore<Floor> =
            (1..=5).map(|n| floor(n, 10 - n as i64)).collect();

        let rows = store
            .find_many(&SearchFilter::All, ListOrder::NewestFirst, 1, Some(2))
            .await
            .unwrap();
        let numbers: Vec<i32> = rows.iter().map(|f| f.floor_number).collect();
        assert_eq!(numbers, vec![4, 3]);
    }

    #[tokio::test]
    async fn label_order_is_numeric_for_floors() {
        let store = InMemoryRecordStore::new(ListOrder::LabelAscending);
        for n in [10, 2, 1] {
            store.insert(floor(n, 0));
        }
        let rows = store
            .find_many(&SearchFilter::All, store.default_order(), 0, None)
            .await
            .unwrap();
        let numbers: Vec<i32> = rows.iter().map(|f| f.floor_number).collect();
        assert_eq!(numbers, vec![1, 2, 10]);
    }

    #[tokio::test]
    async fn scope_and_filter_apply_to_count() {
        let store: InMemoryRecordStore<Floor> = [1, 11, 12, 21].map(|n| floor(n, 0)).into_iter().collect();
        let store = store.scoped(|f| f.floor_number > 10);

        assert_eq!(store.count(&SearchFilter::All).await.unwrap(), 3);
        assert_eq!(
            store.count(&SearchFilter::from_query("1")).await.unwrap(),
            3
        );
        assert_eq!(
            store.count(&SearchFilter::from_query("2")).await.unwrap(),
            2
        );
    }

    #[tokio::test]
    async fn skip_past_end_is_empty() {
        let store: InMemoryRecordStore<Floor> = (1..=3).map(|n| floor(n, 0)).collect();
        let rows = store
            .find_many(&SearchFilter::All, ListOrder::NewestFirst, 10, Some(10))
            .await
            .unwrap();
        assert!(rows.is_empty());
    }
}
