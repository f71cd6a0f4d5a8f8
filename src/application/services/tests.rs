//! Service tests against a migrated in-memory database.

use std::str::FromStr;

use chrono::{Duration, Utc};
use rust_decimal::Decimal;

use super::*;
use crate::application::AppServices;
use crate::config::AppConfig;
use crate::domain::booking::{BookingAddon, BookingDraft};
use crate::domain::catalog::{CatalogDraft, CatalogKind};
use crate::domain::floor::FloorDraft;
use crate::domain::media::MediaMetadata;
use crate::domain::room::RoomDraft;
use crate::domain::room_class::{BedTypeLine, RoomClassDraft};
use crate::domain::user::{UserDraft, UserRole};
use crate::domain::{DomainError, Principal};
use crate::infrastructure::crypto::password::verify_password;
use crate::infrastructure::database::test_database;

struct Harness {
    services: AppServices,
    admin: Option<Principal>,
    uploads: tempfile::TempDir,
}

async fn harness() -> Harness {
    harness_with(|_| {}).await
}

async fn harness_with(tweak: impl FnOnce(&mut AppConfig)) -> Harness {
    let uploads = tempfile::tempdir().unwrap();
    let mut config = AppConfig::default();
    config.security.bcrypt_cost = 4;
    config.media.upload_dir = uploads.path().to_path_buf();
    tweak(&mut config);

    let services = AppServices::from_database(test_database().await, &config);
    services
        .users
        .ensure_default_admin(&DefaultAdmin::from(&config.security))
        .await
        .unwrap();
    let login = services
        .users
        .login(&config.security.admin_email, &config.security.admin_password)
        .await
        .unwrap();

    Harness {
        admin: Some(principal_of(&login.user)),
        services,
        uploads,
    }
}

fn anonymous() -> Option<Principal> {
    None
}

fn catalog(h: &Harness, kind: CatalogKind) -> std::sync::Arc<CatalogService> {
    h.services.catalog(kind).unwrap()
}

async fn add_catalog(h: &Harness, kind: CatalogKind, name: &str) -> String {
    catalog(h, kind)
        .create(&h.admin, CatalogDraft { name: name.into() })
        .await
        .unwrap()
        .id
}

// ── Lister through the services ─────────────────────────────────

#[tokio::test]
async fn twenty_five_floors_paginate_by_ten() {
    let h = harness().await;
    for n in 1..=25 {
        h.services
            .floors
            .create(&h.admin, FloorDraft { floor_number: n })
            .await
            .unwrap();
    }

    let first = h.services.floors.list(&h.admin, "", 1).await.unwrap();
    assert_eq!(first.items.len(), 10);
    assert_eq!(first.total_matching, 25);
    assert_eq!(first.page_count, 3);
    assert_eq!(first.range().unwrap().to_string(), "1–10 of 25");

    let last = h.services.floors.list(&h.admin, "", 3).await.unwrap();
    assert_eq!(last.items.len(), 5);
    assert_eq!(last.range().unwrap().to_string(), "21–25 of 25");

    let beyond = h.services.floors.list(&h.admin, "", 9).await.unwrap();
    assert!(beyond.items.is_empty());
    assert!(beyond.range().is_none());
}

#[tokio::test]
async fn anonymous_list_is_empty_not_an_error() {
    let h = harness().await;
    add_catalog(&h, CatalogKind::BedType, "Queen").await;

    let page = catalog(&h, CatalogKind::BedType)
        .list(&anonymous(), "", 1)
        .await
        .unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total_matching, 0);
    assert_eq!(page.page_count, 1);
    assert!(catalog(&h, CatalogKind::BedType)
        .options(&anonymous())
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn filtered_total_is_page_local_by_default() {
    let h = harness().await;
    for n in 1..=12 {
        h.services
            .addons
            .create(
                &h.admin,
                crate::domain::addon::AddonDraft {
                    name: format!("Extra towel {}", n),
                    price: Decimal::new(500, 2),
                },
            )
            .await
            .unwrap();
    }

    let page = h.services.addons.list(&h.admin, "TOWEL", 1).await.unwrap();
    assert_eq!(page.items.len(), 10);
    assert_eq!(page.total_matching, 10);
    assert_eq!(page.page_count, 1);

    let none = h.services.addons.list(&h.admin, "sauna", 1).await.unwrap();
    assert!(none.items.is_empty());
    assert_eq!(none.total_matching, 0);
}

#[tokio::test]
async fn filtered_total_can_be_global() {
    let h = harness_with(|cfg| cfg.pagination.count_matches_globally = true).await;
    for n in 1..=12 {
        h.services
            .floors
            .create(&h.admin, FloorDraft { floor_number: 100 + n })
            .await
            .unwrap();
    }

    let page = h.services.floors.list(&h.admin, "10", 1).await.unwrap();
    // 101..=109 and 110
    assert_eq!(page.total_matching, 10);
    let page = h.services.floors.list(&h.admin, "1", 2).await.unwrap();
    assert_eq!(page.total_matching, 12);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.page_count, 2);
}

#[tokio::test]
async fn lookup_tables_list_newest_first_with_named_options() {
    let h = harness().await;
    for kind in [CatalogKind::PaymentStatus, CatalogKind::BedType, CatalogKind::RoomStatus] {
        for name in ["Pending", "Paid", "Refunded"] {
            add_catalog(&h, kind, name).await;
        }
        let page = catalog(&h, kind).list(&h.admin, "", 1).await.unwrap();
        let listed: Vec<&str> = page.items.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(listed, vec!["Refunded", "Paid", "Pending"], "{kind}");

        let options = catalog(&h, kind).options(&h.admin).await.unwrap();
        let named: Vec<&str> = options.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(named, vec!["Paid", "Pending", "Refunded"], "{kind}");
    }
}

// ── Catalog and simple entities ─────────────────────────────────

#[tokio::test]
async fn catalog_conflicts_and_not_found() {
    let h = harness().await;
    let service = catalog(&h, CatalogKind::RoomStatus);
    let id = add_catalog(&h, CatalogKind::RoomStatus, "Available").await;

    let err = service
        .create(&h.admin, CatalogDraft { name: "available".into() })
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Already exists: Room status already exists");

    let renamed = service
        .update(&h.admin, &id, CatalogDraft { name: "Ready".into() })
        .await
        .unwrap();
    assert_eq!(renamed.slug, "ready");

    service.delete(&h.admin, &id).await.unwrap();
    assert!(matches!(
        service.delete(&h.admin, &id).await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(matches!(
        service
            .update(&h.admin, &id, CatalogDraft { name: "Again".into() })
            .await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn mutations_require_a_principal() {
    let h = harness().await;
    let err = h
        .services
        .floors
        .create(&anonymous(), FloorDraft { floor_number: 1 })
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Unauthorized(_)));
}

#[tokio::test]
async fn floor_options_are_numeric_ascending() {
    let h = harness().await;
    for n in [10, 2, -1, 7] {
        h.services
            .floors
            .create(&h.admin, FloorDraft { floor_number: n })
            .await
            .unwrap();
    }
    let numbers: Vec<i32> = h
        .services
        .floors
        .options(&h.admin)
        .await
        .unwrap()
        .iter()
        .map(|f| f.floor_number)
        .collect();
    assert_eq!(numbers, vec![-1, 2, 7, 10]);
}

// ── Rooms and room classes ──────────────────────────────────────

struct RoomRefs {
    class_id: String,
    floor_id: String,
    status_id: String,
}

async fn room_refs(h: &Harness) -> RoomRefs {
    let feature = add_catalog(h, CatalogKind::Feature, "Wifi").await;
    let bed = add_catalog(h, CatalogKind::BedType, "Double").await;
    let status_id = add_catalog(h, CatalogKind::RoomStatus, "Available").await;
    let class = h
        .services
        .room_classes
        .create(
            &h.admin,
            RoomClassDraft {
                class_name: "Standard".into(),
                base_price: Decimal::from_str("89.90").unwrap(),
                images: vec![],
                description: None,
                features: vec![feature],
                bed_types: vec![BedTypeLine {
                    bed_type_id: bed,
                    num_beds: 1,
                }],
            },
        )
        .await
        .unwrap();
    let floor = h
        .services
        .floors
        .create(&h.admin, FloorDraft { floor_number: 1 })
        .await
        .unwrap();
    RoomRefs {
        class_id: class.id,
        floor_id: floor.id,
        status_id,
    }
}

fn room_draft(refs: &RoomRefs, number: &str, images: &[&str]) -> RoomDraft {
    RoomDraft {
        room_number: number.into(),
        room_class_id: refs.class_id.clone(),
        floor_id: refs.floor_id.clone(),
        room_status_id: refs.status_id.clone(),
        images: images.iter().map(|s| s.to_string()).collect(),
    }
}

#[tokio::test]
async fn room_class_rejects_unknown_feature() {
    let h = harness().await;
    let err = h
        .services
        .room_classes
        .create(
            &h.admin,
            RoomClassDraft {
                class_name: "Suite".into(),
                base_price: Decimal::new(300, 0),
                images: vec![],
                description: None,
                features: vec!["missing".into()],
                bed_types: vec![],
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)), "{:?}", err);
}

#[tokio::test]
async fn room_lifecycle_with_image_reordering() {
    let h = harness().await;
    let refs = room_refs(&h).await;
    let room = h
        .services
        .rooms
        .create(&h.admin, room_draft(&refs, "101", &["a", "b", "c"]))
        .await
        .unwrap();
    assert_eq!(room.related.room_class_name.as_deref(), Some("Standard"));

    let reordered = h
        .services
        .rooms
        .reorder_images(&h.admin, &room.id, 2, 0)
        .await
        .unwrap();
    assert_eq!(reordered.images, vec!["c", "a", "b"]);
    assert!(matches!(
        h.services.rooms.reorder_images(&h.admin, &room.id, 0, 5).await,
        Err(DomainError::Validation(_))
    ));

    let err = h
        .services
        .rooms
        .create(&h.admin, room_draft(&refs, "101", &[]))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)));

    let found = h.services.rooms.list(&h.admin, "standard", 1).await.unwrap();
    assert_eq!(found.items.len(), 1);
    let found = h.services.rooms.list(&h.admin, "available", 1).await.unwrap();
    assert_eq!(found.items.len(), 1);
}

#[tokio::test]
async fn room_with_unknown_floor_is_rejected() {
    let h = harness().await;
    let refs = room_refs(&h).await;
    let mut draft = room_draft(&refs, "102", &[]);
    draft.floor_id = "nowhere".into();
    let err = h.services.rooms.create(&h.admin, draft).await.unwrap_err();
    assert_eq!(err.to_string(), "Validation: Unknown floor");
}

// ── Bookings ────────────────────────────────────────────────────

#[tokio::test]
async fn booking_checks_dates_and_references() {
    let h = harness().await;
    let refs = room_refs(&h).await;
    let room = h
        .services
        .rooms
        .create(&h.admin, room_draft(&refs, "201", &[]))
        .await
        .unwrap();
    let paid = add_catalog(&h, CatalogKind::PaymentStatus, "Paid").await;
    let guest = h
        .services
        .users
        .create(
            &h.admin,
            UserDraft {
                name: "Grace Hopper".into(),
                email: "grace@example.com".into(),
                password: Some("cobol-rules".into()),
                role: UserRole::Guest,
                bio: None,
                avatar_urls: vec![],
            },
        )
        .await
        .unwrap();

    let today = Utc::now().date_naive();
    let draft = BookingDraft {
        guest_id: guest.id.clone(),
        room_id: room.id.clone(),
        payment_status_id: paid,
        check_in: today + Duration::days(1),
        check_out: today + Duration::days(3),
        num_adults: 2,
        num_children: 1,
        booking_amount: Decimal::new(35_000, 2),
        add_ons: vec![BookingAddon {
            name: "Breakfast".into(),
            price: Decimal::new(1_200, 2),
        }],
    };

    let booking = h.services.bookings.create(&h.admin, draft.clone()).await.unwrap();
    assert_eq!(booking.related.guest_name.as_deref(), Some("Grace Hopper"));
    assert_eq!(booking.related.payment_status_name.as_deref(), Some("Paid"));
    assert_eq!(booking.add_ons.len(), 1);

    let found = h.services.bookings.list(&h.admin, "hopper", 1).await.unwrap();
    assert_eq!(found.items.len(), 1);

    let mut past = draft.clone();
    past.check_in = today - Duration::days(1);
    assert_eq!(
        h.services.bookings.create(&h.admin, past).await.unwrap_err().to_string(),
        "Validation: Past date not allowed"
    );

    let mut unknown = draft;
    unknown.guest_id = "ghost".into();
    assert_eq!(
        h.services
            .bookings
            .create(&h.admin, unknown)
            .await
            .unwrap_err()
            .to_string(),
        "Validation: Unknown guest"
    );
}

// ── Users and authentication ────────────────────────────────────

fn user_draft(name: &str, email: &str, role: UserRole) -> UserDraft {
    UserDraft {
        name: name.into(),
        email: email.into(),
        password: Some("password123".into()),
        role,
        bio: None,
        avatar_urls: vec![],
    }
}

#[tokio::test]
async fn default_admin_is_seeded_once() {
    let h = harness().await;
    let admin = DefaultAdmin::from(&AppConfig::default().security);
    assert!(!h.services.users.ensure_default_admin(&admin).await.unwrap());
}

#[tokio::test]
async fn login_rejects_bad_password_and_normalises_email() {
    let h = harness().await;
    h.services
        .users
        .create(&h.admin, user_draft("Sam", "Sam@Example.com", UserRole::Staff))
        .await
        .unwrap();

    let ok = h
        .services
        .users
        .login("  SAM@example.com ", "password123")
        .await
        .unwrap();
    assert_eq!(ok.user.email, "sam@example.com");
    assert_eq!(ok.token_type, "Bearer");

    assert!(matches!(
        h.services.users.login("sam@example.com", "wrong-pass").await,
        Err(DomainError::Unauthorized(_))
    ));
}

#[tokio::test]
async fn unknown_email_fails_like_a_wrong_password() {
    let h = harness().await;

    let err = h
        .services
        .users
        .login("nobody@example.com", "password123")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Unauthorized: Invalid credentials");

    let decoy = h.services.users.decoy_hash();
    assert!(decoy.starts_with("$2b$04$"), "decoy hash: {decoy}");
    assert!(!verify_password("password123", decoy).unwrap());
}

#[tokio::test]
async fn non_admins_edit_only_themselves() {
    let h = harness().await;
    let staff = h
        .services
        .users
        .create(&h.admin, user_draft("Sam", "sam@example.com", UserRole::Staff))
        .await
        .unwrap();
    let other = h
        .services
        .users
        .create(&h.admin, user_draft("Kim", "kim@example.com", UserRole::Guest))
        .await
        .unwrap();
    let as_staff = Some(principal_of(&staff));

    let mut own = user_draft("Samuel", "sam@example.com", UserRole::Staff);
    own.password = None;
    let updated = h.services.users.update(&as_staff, &staff.id, own).await.unwrap();
    assert_eq!(updated.name, "Samuel");

    let promote = user_draft("Samuel", "sam@example.com", UserRole::Admin);
    assert!(matches!(
        h.services.users.update(&as_staff, &staff.id, promote).await,
        Err(DomainError::Forbidden(_))
    ));
    let foreign = user_draft("Kim", "kim@example.com", UserRole::Guest);
    assert!(matches!(
        h.services.users.update(&as_staff, &other.id, foreign).await,
        Err(DomainError::Forbidden(_))
    ));
    assert!(matches!(
        h.services.users.delete(&as_staff, &other.id).await,
        Err(DomainError::Forbidden(_))
    ));
}

#[tokio::test]
async fn guests_list_only_guest_role() {
    let h = harness().await;
    for (name, email, role) in [
        ("Ann", "ann@example.com", UserRole::Guest),
        ("Bob", "bob@example.com", UserRole::Guest),
        ("Cid", "cid@example.com", UserRole::Manager),
    ] {
        h.services
            .users
            .create(&h.admin, user_draft(name, email, role))
            .await
            .unwrap();
    }
    let guests = h.services.users.guests(&h.admin, "", 1).await.unwrap();
    assert_eq!(guests.total_matching, 2);
    let everyone = h.services.users.list(&h.admin, "", 1).await.unwrap();
    assert_eq!(everyone.total_matching, 4);
}

#[tokio::test]
async fn duplicate_email_is_conflict() {
    let h = harness().await;
    let err = h
        .services
        .users
        .create(&h.admin, user_draft("Dup", "ADMIN@hotel.local", UserRole::Staff))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Already exists: Email already exists");
}

// ── Media ───────────────────────────────────────────────────────

fn upload(name: &str) -> Upload {
    Upload {
        file_name: name.into(),
        content_type: "image/png".into(),
        bytes: vec![0x89, b'P', b'N', b'G'],
    }
}

#[tokio::test]
async fn media_upload_browse_and_delete() {
    let h = harness().await;
    let media = &h.services.media;
    let first = media.upload(&h.admin, upload("lobby.png")).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = media.upload(&h.admin, upload("pool.png")).await.unwrap();

    assert!(first.file_url.starts_with("/uploads/"));
    assert!(first.file_name.ends_with("-lobby.png"));
    let on_disk = h.uploads.path().join(&first.file_name);
    assert!(on_disk.exists());

    assert_eq!(
        media.next(&h.admin, &second.id).await.unwrap().map(|m| m.id),
        Some(first.id.clone())
    );
    assert_eq!(
        media.previous(&h.admin, &first.id).await.unwrap().map(|m| m.id),
        Some(second.id.clone())
    );

    let tagged = media
        .update_metadata(
            &h.admin,
            &first.id,
            MediaMetadata {
                alt_text: Some("Hotel lobby at night".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(tagged.alt_text.as_deref(), Some("Hotel lobby at night"));
    let found = media.list(&h.admin, "NIGHT", 1).await.unwrap();
    assert_eq!(found.items.len(), 1);

    media.delete(&h.admin, &first.id).await.unwrap();
    assert!(!on_disk.exists());
    assert!(matches!(
        media.get(&h.admin, &first.id).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn media_delete_tolerates_missing_file() {
    let h = harness().await;
    let item = h.services.media.upload(&h.admin, upload("gone.png")).await.unwrap();
    std::fs::remove_file(h.uploads.path().join(&item.file_name)).unwrap();
    h.services.media.delete(&h.admin, &item.id).await.unwrap();
}

#[tokio::test]
async fn empty_upload_is_rejected() {
    let h = harness().await;
    let mut empty = upload("empty.png");
    empty.bytes.clear();
    assert!(matches!(
        h.services.media.upload(&h.admin, empty).await,
        Err(DomainError::Validation(_))
    ));
}
