//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{DefaultBodyLimit, FromRef},
    middleware,
    routing::{get, post},
    Extension, Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::AppServices;
use crate::config::MediaConfig;
use crate::domain::catalog::CatalogKind;
use crate::interfaces::http::common::{ApiResponse, PaginatedResponse};
use crate::interfaces::http::middleware::{optional_auth_middleware, AuthState};
use crate::interfaces::http::modules::{
    addons, auth, bookings, catalog, floors, health, media, metrics, request_id, room_classes,
    rooms, users,
};

/// Shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<AppServices>,
    pub db: DatabaseConnection,
    pub started_at: Arc<Instant>,
    pub max_upload_bytes: usize,
    pub media: MediaConfig,
}

impl AppState {
    pub fn new(services: AppServices, db: DatabaseConnection, media: &MediaConfig) -> Self {
        Self {
            services: Arc::new(services),
            db,
            started_at: Arc::new(Instant::now()),
            max_upload_bytes: media.max_upload_bytes,
            media: media.clone(),
        }
    }
}

impl FromRef<AppState> for health::HealthState {
    fn from_ref(s: &AppState) -> Self {
        health::HealthState {
            db: s.db.clone(),
            upload_dir: s.media.upload_dir.clone(),
            started_at: s.started_at.clone(),
        }
    }
}

impl FromRef<AppState> for AuthState {
    fn from_ref(s: &AppState) -> Self {
        AuthState {
            jwt_config: s.services.jwt.clone(),
        }
    }
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT from /api/v1/auth/login"))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::get_current_user,
        catalog::list_entries,
        catalog::entry_options,
        catalog::get_entry,
        catalog::create_entry,
        catalog::update_entry,
        catalog::delete_entry,
        addons::list_addons,
        addons::addon_options,
        addons::get_addon,
        addons::create_addon,
        addons::update_addon,
        addons::delete_addon,
        floors::list_floors,
        floors::floor_options,
        floors::get_floor,
        floors::create_floor,
        floors::update_floor,
        floors::delete_floor,
        room_classes::list_room_classes,
        room_classes::room_class_options,
        room_classes::get_room_class,
        room_classes::create_room_class,
        room_classes::update_room_class,
        room_classes::delete_room_class,
        rooms::list_rooms,
        rooms::room_options,
        rooms::get_room,
        rooms::create_room,
        rooms::update_room,
        rooms::delete_room,
        rooms::reorder_room_images,
        bookings::list_bookings,
        bookings::booking_options,
        bookings::get_booking,
        bookings::create_booking,
        bookings::update_booking,
        bookings::delete_booking,
        users::list_users,
        users::list_guests,
        users::user_options,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        media::list_media,
        media::media_options,
        media::get_media,
        media::upload_media,
        media::update_media,
        media::delete_media,
        media::next_media,
        media::previous_media,
    ),
    components(
        schemas(
            ApiResponse<String>,
            PaginatedResponse<catalog::CatalogEntryDto>,
            health::HealthResponse,
            health::ComponentHealth,
            auth::LoginRequest,
            auth::LoginResponse,
            auth::PrincipalDto,
            catalog::CatalogEntryDto,
            catalog::CatalogRequest,
            addons::AddonDto,
            addons::AddonRequest,
            floors::FloorDto,
            floors::FloorRequest,
            room_classes::RoomClassDto,
            room_classes::RoomClassRequest,
            room_classes::BedTypeLineDto,
            rooms::RoomDto,
            rooms::RoomRequest,
            rooms::ReorderImagesRequest,
            bookings::BookingDto,
            bookings::BookingRequest,
            bookings::BookingAddonDto,
            users::UserDto,
            users::UserRequest,
            media::MediaDto,
            media::MediaMetadataRequest,
            media::UploadForm,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness and database reachability"),
        (name = "Authentication", description = "JWT login and current principal"),
        (name = "Catalog", description = "Lookup tables: bed-types, features, payment-statuses, room-statuses"),
        (name = "Add-ons", description = "Priced extras offered with bookings"),
        (name = "Floors", description = "Hotel floors"),
        (name = "Room Classes", description = "Room classes with features and bed configuration"),
        (name = "Rooms", description = "Individual rooms"),
        (name = "Bookings", description = "Guest bookings"),
        (name = "Users", description = "Staff accounts and guests"),
        (name = "Media", description = "Uploaded images and their metadata"),
    ),
    info(
        title = "Hotel Admin API",
        version = "0.1.0",
        description = "Back-office REST API for hotel rooms, bookings and guests. List endpoints return an empty page to anonymous callers.",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

fn catalog_routes(kind: CatalogKind) -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::list_entries).post(catalog::create_entry))
        .route("/options", get(catalog::entry_options))
        .route(
            "/{id}",
            get(catalog::get_entry)
                .put(catalog::update_entry)
                .delete(catalog::delete_entry),
        )
        .layer(Extension(kind))
}

fn api_routes(state: &AppState) -> Router<AppState> {
    let auth_routes = Router::new()
        .route("/login", post(auth::login))
        .route("/me", get(auth::get_current_user));

    let addon_routes = Router::new()
        .route("/", get(addons::list_addons).post(addons::create_addon))
        .route("/options", get(addons::addon_options))
        .route(
            "/{id}",
            get(addons::get_addon)
                .put(addons::update_addon)
                .delete(addons::delete_addon),
        );

    let floor_routes = Router::new()
        .route("/", get(floors::list_floors).post(floors::create_floor))
        .route("/options", get(floors::floor_options))
        .route(
            "/{id}",
            get(floors::get_floor)
                .put(floors::update_floor)
                .delete(floors::delete_floor),
        );

    let room_class_routes = Router::new()
        .route(
            "/",
            get(room_classes::list_room_classes).post(room_classes::create_room_class),
        )
        .route("/options", get(room_classes::room_class_options))
        .route(
            "/{id}",
            get(room_classes::get_room_class)
                .put(room_classes::update_room_class)
                .delete(room_classes::delete_room_class),
        );

    let room_routes = Router::new()
        .route("/", get(rooms::list_rooms).post(rooms::create_room))
        .route("/options", get(rooms::room_options))
        .route(
            "/{id}",
            get(rooms::get_room)
                .put(rooms::update_room)
                .delete(rooms::delete_room),
        )
        .route("/{id}/images/reorder", post(rooms::reorder_room_images));

    let booking_routes = Router::new()
        .route("/", get(bookings::list_bookings).post(bookings::create_booking))
        .route("/options", get(bookings::booking_options))
        .route(
            "/{id}",
            get(bookings::get_booking)
                .put(bookings::update_booking)
                .delete(bookings::delete_booking),
        );

    let user_routes = Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route("/guests", get(users::list_guests))
        .route("/options", get(users::user_options))
        .route(
            "/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        );

    // multipart framing on top of the file itself
    let body_limit = state.max_upload_bytes.saturating_add(64 * 1024);
    let media_routes = Router::new()
        .route("/", get(media::list_media).post(media::upload_media))
        .route("/options", get(media::media_options))
        .route(
            "/{id}",
            get(media::get_media)
                .put(media::update_media)
                .delete(media::delete_media),
        )
        .route("/{id}/next", get(media::next_media))
        .route("/{id}/previous", get(media::previous_media))
        .layer(DefaultBodyLimit::max(body_limit));

    let mut api = Router::new()
        .nest("/auth", auth_routes)
        .nest("/addons", addon_routes)
        .nest("/floors", floor_routes)
        .nest("/room-classes", room_class_routes)
        .nest("/rooms", room_routes)
        .nest("/bookings", booking_routes)
        .nest("/users", user_routes)
        .nest("/media", media_routes);
    for kind in CatalogKind::ALL {
        api = api.nest(&format!("/{}", kind.resource()), catalog_routes(kind));
    }

    api.layer(middleware::from_fn_with_state(
        AuthState::from_ref(state),
        optional_auth_middleware,
    ))
}

/// Builds the whole HTTP surface. `/metrics` is only mounted when a
/// Prometheus handle is supplied.
pub fn create_api_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());
    let uploads_prefix = state.media.public_prefix.trim_end_matches('/').to_string();
    let upload_dir = state.media.upload_dir.clone();

    let mut router = Router::new()
        .merge(swagger)
        .route("/health", get(health::health_check))
        .nest("/api/v1", api_routes(&state));
    if !uploads_prefix.is_empty() {
        router = router.nest_service(&uploads_prefix, ServeDir::new(upload_dir));
    }
    let mut router = router.with_state(state);

    if let Some(handle) = metrics_handle {
        router = router.route(
            "/metrics",
            get(metrics::prometheus_metrics).with_state(metrics::MetricsState { handle }),
        );
    }

    router
        .layer(middleware::from_fn(metrics::http_metrics_middleware))
        .layer(middleware::from_fn(request_id::request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::application::services::DefaultAdmin;
    use crate::config::AppConfig;
    use crate::infrastructure::database::test_database;

    const ADMIN_EMAIL: &str = "admin@hotel.local";
    const ADMIN_PASSWORD: &str = "admin12345";

    struct TestApp {
        router: Router,
        _uploads: tempfile::TempDir,
    }

    async fn app() -> TestApp {
        let uploads = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.security.bcrypt_cost = 4;
        config.media.upload_dir = uploads.path().to_path_buf();

        let db = test_database().await;
        let services = AppServices::from_database(db.clone(), &config);
        services
            .users
            .ensure_default_admin(&DefaultAdmin::from(&config.security))
            .await
            .unwrap();

        let state = AppState::new(services, db, &config.media);
        TestApp {
            router: create_api_router(state, None),
            _uploads: uploads,
        }
    }

    impl TestApp {
        async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
            let response = self.router.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let body = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap_or(Value::Null)
            };
            (status, body)
        }

        async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
            let mut builder = Request::builder().uri(uri);
            if let Some(t) = token {
                builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", t));
            }
            self.send(builder.body(Body::empty()).unwrap()).await
        }

        async fn json(
            &self,
            method: &str,
            uri: &str,
            token: Option<&str>,
            body: Value,
        ) -> (StatusCode, Value) {
            let mut builder = Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json");
            if let Some(t) = token {
                builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", t));
            }
            self.send(builder.body(Body::from(body.to_string())).unwrap())
                .await
        }

        async fn login(&self) -> String {
            let (status, body) = self
                .json(
                    "POST",
                    "/api/v1/auth/login",
                    None,
                    json!({"email": ADMIN_EMAIL, "password": ADMIN_PASSWORD}),
                )
                .await;
            assert_eq!(status, StatusCode::OK, "{}", body);
            body["data"]["token"].as_str().unwrap().to_string()
        }
    }

    #[tokio::test]
    async fn health_reports_database() {
        let app = app().await;
        let (status, body) = app.get("/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"]["status"], "ok");
        assert_eq!(body["uploads"]["status"], "ok");
    }

    #[tokio::test]
    async fn missing_upload_dir_degrades_health() {
        let mut config = AppConfig::default();
        config.media.upload_dir = std::path::PathBuf::from("/nonexistent/hotel-admin-uploads");
        let db = test_database().await;
        let state = AppState::new(AppServices::from_database(db.clone(), &config), db, &config.media);
        let router = create_api_router(state, None);

        let response = router
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let app = app().await;
        let (status, body) = app.get("/api-doc/openapi.json", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/api/v1/rooms/{id}/images/reorder"].is_object());
    }

    #[tokio::test]
    async fn anonymous_list_is_an_empty_page() {
        let app = app().await;
        let (status, body) = app.get("/api/v1/users", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["items"], json!([]));
        assert_eq!(body["total"], 0);
        assert_eq!(body["total_pages"], 1);
        assert_eq!(body["showing"], Value::Null);
        assert_eq!(body["page_label"], "Page 1 of 1");
    }

    #[tokio::test]
    async fn anonymous_mutation_is_unauthorized() {
        let app = app().await;
        let (status, body) = app
            .json("POST", "/api/v1/floors", None, json!({"floor_number": 1}))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn login_and_current_principal() {
        let app = app().await;
        let (status, _) = app
            .json(
                "POST",
                "/api/v1/auth/login",
                None,
                json!({"email": ADMIN_EMAIL, "password": "not-the-password"}),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let token = app.login().await;
        let (status, body) = app.get("/api/v1/auth/me", Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["email"], ADMIN_EMAIL);
        assert_eq!(body["data"]["role"], "admin");

        let (status, _) = app.get("/api/v1/auth/me", Some("garbage")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn floors_paginate_with_labels() {
        let app = app().await;
        let token = app.login().await;
        for n in 1..=25 {
            let (status, _) = app
                .json("POST", "/api/v1/floors", Some(&token), json!({"floor_number": n}))
                .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, body) = app.get("/api/v1/floors?page=abc", Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["items"].as_array().unwrap().len(), 10);
        assert_eq!(body["total"], 25);
        assert_eq!(body["total_pages"], 3);
        assert_eq!(body["showing"], "1–10 of 25");
        assert_eq!(body["page_label"], "Page 1 of 3");

        let (_, body) = app.get("/api/v1/floors?page=3", Some(&token)).await;
        assert_eq!(body["items"].as_array().unwrap().len(), 5);
        assert_eq!(body["showing"], "21–25 of 25");

        let (status, body) = app.get("/api/v1/floors?page=9", Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["items"], json!([]));
        assert_eq!(body["showing"], Value::Null);

        let (status, _) = app
            .json("POST", "/api/v1/floors", Some(&token), json!({"floor_number": 7}))
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn catalog_tables_are_separate() {
        let app = app().await;
        let token = app.login().await;

        let (status, body) = app
            .json("POST", "/api/v1/bed-types", Some(&token), json!({"name": "King Size"}))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["kind"], "bed_type");
        assert_eq!(body["data"]["slug"], "king-size");

        let (status, body) = app
            .json("POST", "/api/v1/bed-types", Some(&token), json!({"name": "king size"}))
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Bed type already exists");

        let (status, _) = app
            .json("POST", "/api/v1/features", Some(&token), json!({"name": "King Size"}))
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, body) = app.get("/api/v1/bed-types/options", Some(&token)).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        let (_, body) = app.get("/api/v1/features?query=KING", Some(&token)).await;
        assert_eq!(body["total"], 1);
    }

    #[tokio::test]
    async fn invalid_body_is_unprocessable() {
        let app = app().await;
        let token = app.login().await;
        let (status, body) = app
            .json("POST", "/api/v1/addons", Some(&token), json!({"name": "", "price": "5.00"}))
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["success"], false);

        let (status, _) = app
            .json(
                "POST",
                "/api/v1/users",
                Some(&token),
                json!({"name": "Eve", "email": "eve@hotel.local", "password": "password1", "role": "owner"}),
            )
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn missing_records_are_not_found() {
        let app = app().await;
        let token = app.login().await;
        let (status, _) = app.get("/api/v1/rooms/nope", Some(&token)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let request = Request::builder()
            .method("DELETE")
            .uri("/api/v1/addons/nope")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();
        let (status, _) = app.send(request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn guests_endpoint_filters_by_role() {
        let app = app().await;
        let token = app.login().await;
        for (name, email, role) in [
            ("Guest One", "one@example.com", "guest"),
            ("Desk", "desk@example.com", "stuff"),
        ] {
            let (status, body) = app
                .json(
                    "POST",
                    "/api/v1/users",
                    Some(&token),
                    json!({"name": name, "email": email, "password": "password1", "role": role}),
                )
                .await;
            assert_eq!(status, StatusCode::CREATED, "{}", body);
            assert!(body["data"].get("password_hash").is_none());
        }

        let (_, body) = app.get("/api/v1/users/guests", Some(&token)).await;
        assert_eq!(body["total"], 1);
        assert_eq!(body["items"][0]["email"], "one@example.com");
        let (_, body) = app.get("/api/v1/users", Some(&token)).await;
        assert_eq!(body["total"], 3);
    }

    #[tokio::test]
    async fn request_id_is_echoed() {
        let app = app().await;
        let request = Request::builder()
            .uri("/health")
            .header("x-request-id", "req-42")
            .body(Body::empty())
            .unwrap();
        let response = app.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.headers()["x-request-id"], "req-42");
    }

    #[tokio::test]
    async fn multipart_upload_round_trip() {
        let app = app().await;
        let token = app.login().await;

        let boundary = "hotel-admin-test-boundary";
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"lobby.png\"\r\n\
             Content-Type: image/png\r\n\r\nnot-really-a-png\r\n--{b}--\r\n",
            b = boundary
        );
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/media")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", boundary),
            )
            .body(Body::from(body))
            .unwrap();
        let (status, body) = app.send(request).await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        assert_eq!(body["data"]["file_type"], "image/png");
        let file_name = body["data"]["file_name"].as_str().unwrap().to_string();
        assert!(file_name.ends_with("-lobby.png"));
        let id = body["data"]["id"].as_str().unwrap().to_string();

        let (status, served) = {
            let response = app
                .router
                .clone()
                .oneshot(
                    Request::builder()
                        .uri(format!("/uploads/{}", file_name))
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            let status = response.status();
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            (status, bytes)
        };
        assert_eq!(status, StatusCode::OK);
        assert_eq!(&served[..], b"not-really-a-png");

        let (status, body) = app
            .get(&format!("/api/v1/media/{}/next", id), Some(&token))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], Value::Null);

        let (status, body) = app
            .json(
                "PUT",
                &format!("/api/v1/media/{}", id),
                Some(&token),
                json!({"alt_text": "Lobby"}),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["alt_text"], "Lobby");
    }

    #[tokio::test]
    async fn metrics_endpoint_renders_when_enabled() {
        let uploads = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.media.upload_dir = uploads.path().to_path_buf();
        let db = test_database().await;
        let state = AppState::new(AppServices::from_database(db.clone(), &config), db, &config.media);
        let handle = metrics_exporter_prometheus::PrometheusBuilder::new()
            .build_recorder()
            .handle();

        let router = create_api_router(state, Some(handle));
        let response = router
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
