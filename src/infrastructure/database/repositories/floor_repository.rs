//! SeaORM implementation of FloorRepository

use async_trait::async_trait;
use sea_orm::sea_query::{Alias, Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, Set,
};

use super::{db_err, write_err};
use crate::domain::floor::{Floor, FloorRepository};
use crate::domain::{Audit, DomainError, DomainResult, ListOrder};
use crate::infrastructure::database::entities::floor;
use crate::infrastructure::database::record_store::{like_pattern, ListableEntity};

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(model: floor::Model) -> Floor {
    Floor {
        id: model.id,
        floor_number: model.floor_number,
        audit: Audit {
            created_at: model.created_at,
            updated_at: model.updated_at,
            created_by: model.created_by,
            updated_by: model.updated_by,
        },
    }
}

fn domain_to_active(f: Floor) -> floor::ActiveModel {
    floor::ActiveModel {
        id: Set(f.id),
        floor_number: Set(f.floor_number),
        created_at: Set(f.audit.created_at),
        updated_at: Set(f.audit.updated_at),
        created_by: Set(f.audit.created_by),
        updated_by: Set(f.audit.updated_by),
    }
}

impl ListableEntity for floor::Entity {
    type Record = Floor;

    const ORDER: ListOrder = ListOrder::NewestFirst;

    fn id_column() -> Self::Column {
        floor::Column::Id
    }

    fn created_at_column() -> Self::Column {
        floor::Column::CreatedAt
    }

    fn label_column() -> Self::Column {
        floor::Column::FloorNumber
    }

    /// The number is matched as text, so "1" finds floors 1, 10 and 21.
    fn search_condition(needle: &str) -> Condition {
        let as_text = Func::cast_as(
            Expr::col((floor::Entity, floor::Column::FloorNumber)),
            Alias::new("TEXT"),
        );
        Condition::all().add(Expr::expr(as_text).like(like_pattern(needle)))
    }

    fn into_record(model: floor::Model) -> Result<Floor, DbErr> {
        Ok(model_to_domain(model))
    }
}

// ── SeaOrmFloorRepository ───────────────────────────────────────

pub struct SeaOrmFloorRepository {
    db: DatabaseConnection,
}

impl SeaOrmFloorRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FloorRepository for SeaOrmFloorRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Floor>> {
        let model = floor::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_number(&self, floor_number: i32) -> DomainResult<Option<Floor>> {
        let model = floor::Entity::find()
            .filter(floor::Column::FloorNumber.eq(floor_number))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn save(&self, f: Floor) -> DomainResult<Floor> {
        let model = domain_to_active(f)
            .insert(&self.db)
            .await
            .map_err(write_err("Floor"))?;
        Ok(model_to_domain(model))
    }

    async fn update(&self, f: Floor) -> DomainResult<Floor> {
        if self.find_by_id(&f.id).await?.is_none() {
            return Err(DomainError::not_found("Floor", f.id));
        }
        let model = domain_to_active(f)
            .update(&self.db)
            .await
            .map_err(write_err("Floor"))?;
        Ok(model_to_domain(model))
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let result = floor::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Floor", id));
        }
        Ok(())
    }
}
