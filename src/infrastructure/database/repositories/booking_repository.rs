//! SeaORM implementation of BookingRepository
//!
//! Add-on lines are stored in `booking_addons` and replaced wholesale on
//! update.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Query, SimpleExpr, SubQueryStatement};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::debug;

use super::{db_err, from_cents, to_cents, write_err};
use crate::domain::booking::{Booking, BookingAddon, BookingRelations, BookingRepository};
use crate::domain::catalog::CatalogKind;
use crate::domain::{Audit, DomainError, DomainResult, ListOrder};
use crate::infrastructure::database::entities::{booking, booking_addon, catalog_entry, room, user};
use crate::infrastructure::database::record_store::{key_contains, ListableEntity};

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(model: booking::Model) -> Booking {
    Booking {
        id: model.id,
        guest_id: model.guest_id,
        room_id: model.room_id,
        payment_status_id: model.payment_status_id,
        check_in: model.check_in,
        check_out: model.check_out,
        num_adults: model.num_adults,
        num_children: model.num_children,
        booking_amount: from_cents(model.booking_amount_cents),
        add_ons: Vec::new(),
        related: BookingRelations::default(),
        audit: Audit {
            created_at: model.created_at,
            updated_at: model.updated_at,
            created_by: model.created_by,
            updated_by: model.updated_by,
        },
    }
}

fn domain_to_active(b: &Booking) -> DomainResult<booking::ActiveModel> {
    Ok(booking::ActiveModel {
        id: Set(b.id.clone()),
        guest_id: Set(b.guest_id.clone()),
        room_id: Set(b.room_id.clone()),
        payment_status_id: Set(b.payment_status_id.clone()),
        check_in: Set(b.check_in),
        check_out: Set(b.check_out),
        num_adults: Set(b.num_adults),
        num_children: Set(b.num_children),
        booking_amount_cents: Set(to_cents(b.booking_amount)?),
        created_at: Set(b.audit.created_at),
        updated_at: Set(b.audit.updated_at),
        created_by: Set(b.audit.created_by.clone()),
        updated_by: Set(b.audit.updated_by.clone()),
    })
}

fn addon_lines(b: &Booking) -> DomainResult<Vec<booking_addon::ActiveModel>> {
    b.add_ons
        .iter()
        .enumerate()
        .map(|(i, line)| {
            Ok(booking_addon::ActiveModel {
                id: Set(uuid::Uuid::new_v4().to_string()),
                booking_id: Set(b.id.clone()),
                name: Set(line.name.clone()),
                price_cents: Set(to_cents(line.price)?),
                position: Set(i as i32),
            })
        })
        .collect()
}

fn unique_ids<'a>(ids: impl Iterator<Item = &'a String>) -> Vec<String> {
    ids.cloned().collect::<HashSet<_>>().into_iter().collect()
}

/// Loads add-on lines plus room number, guest name and payment status.
pub(crate) async fn hydrate<C: ConnectionTrait>(
    db: &C,
    mut bookings: Vec<Booking>,
) -> Result<Vec<Booking>, DbErr> {
    if bookings.is_empty() {
        return Ok(bookings);
    }

    let mut lines: HashMap<String, Vec<BookingAddon>> = HashMap::new();
    for line in booking_addon::Entity::find()
        .filter(booking_addon::Column::BookingId.is_in(unique_ids(bookings.iter().map(|b| &b.id))))
        .order_by_asc(booking_addon::Column::Position)
        .all(db)
        .await?
    {
        lines.entry(line.booking_id).or_default().push(BookingAddon {
            name: line.name,
            price: from_cents(line.price_cents),
        });
    }

    let room_numbers: HashMap<String, String> = room::Entity::find()
        .filter(room::Column::Id.is_in(unique_ids(bookings.iter().map(|b| &b.room_id))))
        .all(db)
        .await?
        .into_iter()
        .map(|m| (m.id, m.room_number))
        .collect();

    let guest_names: HashMap<String, String> = user::Entity::find()
        .filter(user::Column::Id.is_in(unique_ids(bookings.iter().map(|b| &b.guest_id))))
        .all(db)
        .await?
        .into_iter()
        .map(|m| (m.id, m.name))
        .collect();

    let payment_statuses: HashMap<String, String> = catalog_entry::Entity::find()
        .filter(catalog_entry::Column::Kind.eq(CatalogKind::PaymentStatus.as_str()))
        .filter(
            catalog_entry::Column::Id
                .is_in(unique_ids(bookings.iter().map(|b| &b.payment_status_id))),
        )
        .all(db)
        .await?
        .into_iter()
        .map(|m| (m.id, m.name))
        .collect();

    for b in &mut bookings {
        b.add_ons = lines.remove(&b.id).unwrap_or_default();
        b.related = BookingRelations {
            room_number: room_numbers.get(&b.room_id).cloned(),
            guest_name: guest_names.get(&b.guest_id).cloned(),
            payment_status_name: payment_statuses.get(&b.payment_status_id).cloned(),
        };
    }
    Ok(bookings)
}

#[async_trait]
impl ListableEntity for booking::Entity {
    type Record = Booking;

    const ORDER: ListOrder = ListOrder::NewestFirst;

    fn id_column() -> Self::Column {
        booking::Column::Id
    }

    fn created_at_column() -> Self::Column {
        booking::Column::CreatedAt
    }

    fn label_column() -> Self::Column {
        booking::Column::RoomId
    }

    /// Bookings are labelled by their room's number.
    fn label_order() -> SimpleExpr {
        let number = Query::select()
            .column(room::Column::RoomNumber)
            .from(room::Entity)
            .and_where(
                Expr::col((room::Entity, room::Column::Id))
                    .equals((booking::Entity, booking::Column::RoomId)),
            )
            .to_owned();
        SimpleExpr::SubQuery(None, Box::new(SubQueryStatement::SelectStatement(number)))
    }

    /// Room number or guest name.
    fn search_condition(needle: &str) -> Condition {
        let rooms = Query::select()
            .column(room::Column::Id)
            .from(room::Entity)
            .and_where(key_contains(room::Column::SearchKey, needle))
            .to_owned();
        let guests = Query::select()
            .column(user::Column::Id)
            .from(user::Entity)
            .and_where(key_contains(user::Column::SearchKey, needle))
            .to_owned();

        Condition::any()
            .add(booking::Column::RoomId.in_subquery(rooms))
            .add(booking::Column::GuestId.in_subquery(guests))
    }

    fn into_record(model: booking::Model) -> Result<Booking, DbErr> {
        Ok(model_to_domain(model))
    }

    async fn attach_related(
        db: &DatabaseConnection,
        records: Vec<Booking>,
    ) -> Result<Vec<Booking>, DbErr> {
        hydrate(db, records).await
    }
}

// ── SeaOrmBookingRepository ─────────────────────────────────────

pub struct SeaOrmBookingRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn write(&self, b: &Booking, insert: bool) -> DomainResult<()> {
        let active = domain_to_active(b)?;
        let lines = addon_lines(b)?;

        let txn = self.db.begin().await.map_err(db_err)?;
        if insert {
            active.insert(&txn).await.map_err(write_err("Booking"))?;
        } else {
            active.update(&txn).await.map_err(write_err("Booking"))?;
            booking_addon::Entity::delete_many()
                .filter(booking_addon::Column::BookingId.eq(b.id.as_str()))
                .exec(&txn)
                .await
                .map_err(db_err)?;
        }
        if !lines.is_empty() {
            booking_addon::Entity::insert_many(lines)
                .exec_without_returning(&txn)
                .await
                .map_err(db_err)?;
        }
        txn.commit().await.map_err(db_err)
    }
}

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Booking>> {
        let Some(model) = booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };
        let mut hydrated = hydrate(&self.db, vec![model_to_domain(model)])
            .await
            .map_err(db_err)?;
        Ok(hydrated.pop())
    }

    async fn save(&self, b: Booking) -> DomainResult<Booking> {
        self.write(&b, true).await?;
        debug!(id = %b.id, add_ons = b.add_ons.len(), "booking inserted");
        self.find_by_id(&b.id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", b.id))
    }

    async fn update(&self, b: Booking) -> DomainResult<Booking> {
        let exists = booking::Entity::find_by_id(b.id.as_str())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .is_some();
        if !exists {
            return Err(DomainError::not_found("Booking", b.id));
        }
        self.write(&b, false).await?;
        self.find_by_id(&b.id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", b.id))
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let txn = self.db.begin().await.map_err(db_err)?;
        booking_addon::Entity::delete_many()
            .filter(booking_addon::Column::BookingId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err)?;
        let result = booking::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            txn.rollback().await.map_err(db_err)?;
            return Err(DomainError::not_found("Booking", id));
        }
        txn.commit().await.map_err(db_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, Utc};
    use rust_decimal::Decimal;

    use crate::domain::booking::BookingDraft;
    use crate::domain::{RecordStore, SearchFilter};
    use crate::infrastructure::database::{test_database, SeaOrmRecordStore};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 6, d).unwrap()
    }

    fn booking(room_id: &str, guest_id: &str, add_ons: &[(&str, i64)], offset: i64) -> Booking {
        Booking::new(
            BookingDraft {
                guest_id: guest_id.into(),
                room_id: room_id.into(),
                payment_status_id: "ps".into(),
                check_in: date(1),
                check_out: date(4),
                num_adults: 2,
                num_children: 0,
                booking_amount: Decimal::new(45_000, 2),
                add_ons: add_ons
                    .iter()
                    .map(|(name, cents)| BookingAddon {
                        name: name.to_string(),
                        price: Decimal::new(*cents, 2),
                    })
                    .collect(),
            },
            "a@b.c",
            Utc::now() + Duration::seconds(offset),
        )
    }

    #[tokio::test]
    async fn add_ons_round_trip_and_are_replaced() {
        let repo = SeaOrmBookingRepository::new(test_database().await);
        let saved = repo
            .save(booking("r-1", "g-1", &[("Breakfast", 1_500), ("Parking", 800)], 0))
            .await
            .unwrap();
        assert_eq!(saved.add_ons.len(), 2);
        assert_eq!(saved.add_ons[0].name, "Breakfast");
        assert_eq!(saved.add_ons[1].price, Decimal::new(800, 2));
        assert_eq!(saved.nights(), 3);

        let mut changed = saved.clone();
        changed.add_ons = vec![BookingAddon {
            name: "Spa".into(),
            price: Decimal::new(5_000, 2),
        }];
        let updated = repo.update(changed).await.unwrap();
        assert_eq!(updated.add_ons.len(), 1);
        assert_eq!(updated.add_ons[0].name, "Spa");
    }

    #[tokio::test]
    async fn search_by_room_number_and_guest_name() {
        use crate::domain::room::{Room, RoomDraft, RoomRepository};
        use crate::domain::user::{User, UserDraft, UserRepository, UserRole};
        use crate::infrastructure::database::repositories::{
            SeaOrmRoomRepository, SeaOrmUserRepository,
        };

        let db = test_database().await;
        let now = Utc::now();
        let room = SeaOrmRoomRepository::new(db.clone())
            .save(Room::new(
                RoomDraft {
                    room_number: "512".into(),
                    room_class_id: "rc".into(),
                    floor_id: "fl".into(),
                    room_status_id: "rs".into(),
                    images: vec![],
                },
                "a@b.c",
                now,
            ))
            .await
            .unwrap();
        let guest = SeaOrmUserRepository::new(db.clone())
            .save(User::new(
                UserDraft {
                    name: "Ada Lovelace".into(),
                    email: "ada@example.com".into(),
                    password: None,
                    role: UserRole::Guest,
                    bio: None,
                    avatar_urls: vec![],
                },
                "hash".into(),
                "a@b.c",
                now,
            ))
            .await
            .unwrap();

        let repo = SeaOrmBookingRepository::new(db.clone());
        repo.save(booking(&room.id, &guest.id, &[], 0)).await.unwrap();
        repo.save(booking("other-room", "other-guest", &[], 1))
            .await
            .unwrap();

        let store = SeaOrmRecordStore::<booking::Entity>::new(db);
        for query in ["51", "LOVELACE"] {
            let found = store
                .find_many(&SearchFilter::from_query(query), ListOrder::NewestFirst, 0, Some(10))
                .await
                .unwrap();
            assert_eq!(found.len(), 1, "query {}", query);
            assert_eq!(found[0].related.room_number.as_deref(), Some("512"));
            assert_eq!(found[0].related.guest_name.as_deref(), Some("Ada Lovelace"));
        }

        let by_room = store
            .find_many(&SearchFilter::All, ListOrder::LabelAscending, 0, None)
            .await
            .unwrap();
        assert_eq!(by_room.len(), 2);
    }

    #[tokio::test]
    async fn delete_removes_lines() {
        let db = test_database().await;
        let repo = SeaOrmBookingRepository::new(db.clone());
        let saved = repo
            .save(booking("r", "g", &[("Late checkout", 2_000)], 0))
            .await
            .unwrap();
        repo.delete(&saved.id).await.unwrap();

        assert!(repo.find_by_id(&saved.id).await.unwrap().is_none());
        assert!(booking_addon::Entity::find().all(&db).await.unwrap().is_empty());
    }
}
