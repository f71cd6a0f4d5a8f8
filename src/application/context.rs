//! Builds every service from one database connection and the app config.

use std::collections::HashMap;
use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::application::lister::{ListSettings, Lister};
use crate::application::services::{
    AddonService, BookingService, CatalogService, DefaultAdmin, FloorService, MediaService,
    RoomClassService, RoomService, UserService,
};
use crate::config::{AppConfig, SecurityConfig};
use crate::domain::catalog::CatalogKind;
use crate::domain::user::UserRole;
use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::database::entities::{
    addon, booking, catalog_entry, floor, media, room, room_class, user,
};
use crate::infrastructure::database::{ListableEntity, SeaOrmRecordStore, SeaOrmRepositoryProvider};
use crate::infrastructure::storage::LocalUploadStorage;

pub struct AppServices {
    pub catalog: HashMap<CatalogKind, Arc<CatalogService>>,
    pub addons: Arc<AddonService>,
    pub floors: Arc<FloorService>,
    pub room_classes: Arc<RoomClassService>,
    pub rooms: Arc<RoomService>,
    pub bookings: Arc<BookingService>,
    pub users: Arc<UserService>,
    pub media: Arc<MediaService>,
    pub jwt: JwtConfig,
}

fn lister<E: ListableEntity>(store: SeaOrmRecordStore<E>, settings: ListSettings) -> Lister<E::Record>
where
    E::Model: Sync,
{
    Lister::new(Arc::new(store), settings)
}

impl AppServices {
    pub fn from_database(db: DatabaseConnection, config: &AppConfig) -> Self {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
        let pagination = &config.pagination;
        let jwt = JwtConfig::from(&config.security);

        let catalog = CatalogKind::ALL
            .into_iter()
            .map(|kind| {
                let store = SeaOrmRecordStore::<catalog_entry::Entity>::new(db.clone())
                    .scoped(catalog_entry::Column::Kind, kind.as_str());
                let settings = pagination.list_settings(kind.resource());
                let service = CatalogService::new(kind, repos.clone(), lister(store, settings));
                (kind, Arc::new(service))
            })
            .collect();

        let users = UserService::new(
            repos.clone(),
            lister(
                SeaOrmRecordStore::<user::Entity>::new(db.clone()),
                pagination.list_settings("users"),
            ),
            lister(
                SeaOrmRecordStore::<user::Entity>::new(db.clone())
                    .scoped(user::Column::Role, UserRole::Guest.as_str()),
                pagination.list_settings("guests"),
            ),
            jwt.clone(),
        )
        .with_password_cost(config.security.bcrypt_cost);

        Self {
            catalog,
            addons: Arc::new(AddonService::new(
                repos.clone(),
                lister(
                    SeaOrmRecordStore::<addon::Entity>::new(db.clone()),
                    pagination.list_settings("addons"),
                ),
            )),
            floors: Arc::new(FloorService::new(
                repos.clone(),
                lister(
                    SeaOrmRecordStore::<floor::Entity>::new(db.clone()),
                    pagination.list_settings("floors"),
                ),
            )),
            room_classes: Arc::new(RoomClassService::new(
                repos.clone(),
                lister(
                    SeaOrmRecordStore::<room_class::Entity>::new(db.clone()),
                    pagination.list_settings("room-classes"),
                ),
            )),
            rooms: Arc::new(RoomService::new(
                repos.clone(),
                lister(
                    SeaOrmRecordStore::<room::Entity>::new(db.clone()),
                    pagination.list_settings("rooms"),
                ),
            )),
            bookings: Arc::new(BookingService::new(
                repos.clone(),
                lister(
                    SeaOrmRecordStore::<booking::Entity>::new(db.clone()),
                    pagination.list_settings("bookings"),
                ),
            )),
            users: Arc::new(users),
            media: Arc::new(MediaService::new(
                repos,
                lister(
                    SeaOrmRecordStore::<media::Entity>::new(db),
                    pagination.list_settings("media"),
                ),
                LocalUploadStorage::from_config(&config.media),
            )),
            jwt,
        }
    }

    /// Service for one catalog kind. All kinds are registered at construction.
    pub fn catalog(&self, kind: CatalogKind) -> Option<Arc<CatalogService>> {
        self.catalog.get(&kind).cloned()
    }
}

impl From<&SecurityConfig> for DefaultAdmin {
    fn from(cfg: &SecurityConfig) -> Self {
        Self {
            email: cfg.admin_email.clone(),
            name: cfg.admin_name.clone(),
            password: cfg.admin_password.clone(),
        }
    }
}
