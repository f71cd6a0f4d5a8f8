//! Outbound ports used by the paginated lister.
//!
//! `RecordStore` is the read side every list endpoint goes through;
//! `AccessGuard` resolves who is asking.

use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::principal::Principal;
use crate::shared::DomainResult;

/// Free-text filter applied to a record type's searchable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchFilter {
    All,
    /// Lowercased, trimmed needle.
    Contains(String),
}

impl SearchFilter {
    pub fn from_query(query: &str) -> Self {
        let needle = query.trim();
        if needle.is_empty() {
            SearchFilter::All
        } else {
            SearchFilter::Contains(needle.to_lowercase())
        }
    }

    /// Case-insensitive substring match against any of `fields`.
    pub fn matches<S: AsRef<str>>(&self, fields: &[S]) -> bool {
        match self {
            SearchFilter::All => true,
            SearchFilter::Contains(needle) => fields
                .iter()
                .any(|f| f.as_ref().to_lowercase().contains(needle.as_str())),
        }
    }
}

/// Fixed per record type; callers never choose it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOrder {
    NewestFirst,
    LabelAscending,
}

/// Read port: filtered, ordered, windowed reads plus counts.
#[async_trait]
pub trait RecordStore: Send + Sync {
    type Record: Send + Sync;

    fn default_order(&self) -> ListOrder;

    /// `take = None` means no limit.
    async fn find_many(
        &self,
        filter: &SearchFilter,
        order: ListOrder,
        skip: u64,
        take: Option<u64>,
    ) -> DomainResult<Vec<Self::Record>>;

    async fn count(&self, filter: &SearchFilter) -> DomainResult<u64>;
}

/// Resolves the authenticated principal for the current call, if any.
#[async_trait]
pub trait AccessGuard: Send + Sync {
    async fn principal(&self) -> Option<Principal>;
}

#[async_trait]
impl AccessGuard for Option<Principal> {
    async fn principal(&self) -> Option<Principal> {
        self.clone()
    }
}

/// A domain record that can live in the in-memory store.
pub trait ListedRecord: Clone + Send + Sync + 'static {
    fn id(&self) -> &str;

    fn created_at(&self) -> DateTime<Utc>;

    /// Display label, also the sort key for `LabelAscending`.
    fn label(&self) -> String;

    fn search_fields(&self) -> Vec<String> {
        vec![self.label()]
    }

    fn cmp_label(&self, other: &Self) -> Ordering {
        self.label().cmp(&other.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_query_is_all() {
        assert_eq!(SearchFilter::from_query(""), SearchFilter::All);
        assert_eq!(SearchFilter::from_query("   "), SearchFilter::All);
    }

    #[test]
    fn needle_is_normalised() {
        assert_eq!(
            SearchFilter::from_query(" Deluxe "),
            SearchFilter::Contains("deluxe".into())
        );
    }

    #[test]
    fn matches_any_field_case_insensitively() {
        let filter = SearchFilter::from_query("ROOM");
        assert!(filter.matches(&["101", "Family Room"]));
        assert!(!filter.matches(&["101", "Suite"]));
        assert!(SearchFilter::All.matches::<&str>(&[]));
    }
}
