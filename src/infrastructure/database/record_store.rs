//! Generic SeaORM adapter for the list read port
//!
//! Every listable table implements [`ListableEntity`] once; the same
//! [`SeaOrmRecordStore`] then serves filtered, ordered, windowed reads and
//! counts for all of them.

use std::marker::PhantomData;

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, LikeExpr, SimpleExpr};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select,
};

use crate::domain::{ListOrder, RecordStore, SearchFilter};
use crate::shared::{DomainError, DomainResult};

/// A table the paginated lister can read from.
#[async_trait]
pub trait ListableEntity: EntityTrait + Send + Sync {
    type Record: Send + Sync + 'static;

    /// Fixed list order of this record type.
    const ORDER: ListOrder;

    fn id_column() -> Self::Column;

    fn created_at_column() -> Self::Column;

    fn label_column() -> Self::Column;

    /// Sort key for `LabelAscending`.
    fn label_order() -> SimpleExpr {
        Expr::col((Self::default(), Self::label_column())).into()
    }

    /// Match of `needle` (already folded) against the row's `search_key`
    /// and, through sub-queries, the keys of related rows.
    fn search_condition(needle: &str) -> Condition;

    fn into_record(model: Self::Model) -> Result<Self::Record, DbErr>;

    /// Fills in names of linked rows after a page has been read.
    async fn attach_related(
        _db: &DatabaseConnection,
        records: Vec<Self::Record>,
    ) -> Result<Vec<Self::Record>, DbErr> {
        Ok(records)
    }
}

/// `%needle%` with LIKE wildcards in the needle escaped.
pub fn like_pattern(needle: &str) -> LikeExpr {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    LikeExpr::new(escaped).escape('\\')
}

/// Separates folded fields so a needle cannot match across two of them.
const KEY_SEPARATOR: &str = "\u{1f}";

/// Value of a table's `search_key` column: the searchable fields folded with
/// the same Unicode lowercasing as [`SearchFilter::from_query`]. SQLite
/// `LOWER()` only folds ASCII, so folding happens here, on write.
pub fn search_key<S: AsRef<str>>(fields: &[S]) -> String {
    fields
        .iter()
        .map(|f| f.as_ref().to_lowercase())
        .collect::<Vec<_>>()
        .join(KEY_SEPARATOR)
}

/// `table.search_key LIKE '%needle%'`, needle already folded.
pub fn key_contains<C: ColumnTrait>(key_col: C, needle: &str) -> SimpleExpr {
    Expr::col((key_col.entity_name(), key_col)).like(like_pattern(needle))
}

pub struct SeaOrmRecordStore<E: ListableEntity> {
    db: DatabaseConnection,
    /// Fixed `column = value` restriction, e.g. one catalog kind.
    scope: Option<(E::Column, String)>,
    _entity: PhantomData<E>,
}

impl<E: ListableEntity> SeaOrmRecordStore<E> {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            scope: None,
            _entity: PhantomData,
        }
    }

    /// Restricts every read to rows where `column = value`.
    pub fn scoped(mut self, column: E::Column, value: impl Into<String>) -> Self {
        self.scope = Some((column, value.into()));
        self
    }

    fn select(&self, filter: &SearchFilter) -> Select<E> {
        let mut select = E::find();
        if let Some((column, value)) = &self.scope {
            select = select.filter(column.eq(value.clone()));
        }
        if let SearchFilter::Contains(needle) = filter {
            select = select.filter(E::search_condition(needle));
        }
        select
    }
}

fn db_err(e: DbErr) -> DomainError {
    DomainError::Database(e.to_string())
}

#[async_trait]
impl<E: ListableEntity> RecordStore for SeaOrmRecordStore<E>
where
    E::Model: Sync,
{
    type Record = E::Record;

    fn default_order(&self) -> ListOrder {
        E::ORDER
    }

    async fn find_many(
        &self,
        filter: &SearchFilter,
        order: ListOrder,
        skip: u64,
        take: Option<u64>,
    ) -> DomainResult<Vec<E::Record>> {
        let mut select = self.select(filter);
        select = match order {
            ListOrder::NewestFirst => select
                .order_by_desc(E::created_at_column())
                .order_by_desc(E::id_column()),
            ListOrder::LabelAscending => select
                .order_by(E::label_order(), Order::Asc)
                .order_by_asc(E::id_column()),
        };
        // SQLite rejects OFFSET without LIMIT
        if skip > 0 {
            select = select.offset(skip);
        }
        if let Some(take) = take {
            select = select.limit(take);
        }

        let models = select.all(&self.db).await.map_err(db_err)?;
        let records = models
            .into_iter()
            .map(E::into_record)
            .collect::<Result<Vec<_>, _>>()
            .map_err(db_err)?;
        E::attach_related(&self.db, records).await.map_err(db_err)
    }

    async fn count(&self, filter: &SearchFilter) -> DomainResult<u64> {
        self.select(filter).count(&self.db).await.map_err(db_err)
    }
}
