use chrono::NaiveDate;
use migration::MigratorTrait;
use sea_orm::Database;

use engine::{
    AccessScope, Engine, EngineError, OrderDraft, OrderListFilter, OrderStatus, users,
};

async fn test_engine() -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Engine::builder().database(db).build()
}

async fn active_user(engine: &Engine, username: &str) -> users::Model {
    let user = engine.create_user(username, "secret1").await.unwrap();
    engine.activate_user(user.id).await.unwrap();
    engine.find_by_id(user.id).await.unwrap().unwrap()
}

fn draft(no: &str) -> OrderDraft {
    OrderDraft {
        no: Some(no.to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn create_order_fills_defaults() {
    let engine = test_engine().await;
    let alice = active_user(&engine, "alice").await;

    let order = engine
        .create_order(
            alice.id,
            OrderDraft {
                nama: Some("Budi".to_string()),
                terima_tgl: NaiveDate::from_ymd_opt(2026, 1, 15),
                order_amount: Some(3),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(order.user_id, alice.id);
    assert_eq!(order.status, "received");
    // required text columns default to empty strings, not NULL
    assert_eq!(order.no, "");
    assert_eq!(order.bram_karat1, "");
    assert_eq!(order.bram_karat10, "");
    assert!(order.telpon.is_none());
    assert_eq!(order.created_at, order.updated_at);
}

#[tokio::test]
async fn create_order_rejects_deleted_status() {
    let engine = test_engine().await;
    let alice = active_user(&engine, "alice").await;

    let err = engine
        .create_order(
            alice.id,
            OrderDraft {
                status: Some(OrderStatus::Deleted),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));
}

#[tokio::test]
async fn owned_scope_hides_foreign_orders() {
    let engine = test_engine().await;
    let alice = active_user(&engine, "alice").await;
    let bob = active_user(&engine, "bob").await;

    let alice_order = engine.create_order(alice.id, draft("A-1")).await.unwrap();
    engine.create_order(bob.id, draft("B-1")).await.unwrap();

    // same error for foreign and missing rows
    let err = engine
        .order_detail(AccessScope::Owned(bob.id), alice_order.id)
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("order not exists".to_string()));
    let err = engine
        .order_detail(AccessScope::Owned(bob.id), 9999)
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("order not exists".to_string()));

    let visible = engine
        .list_orders(AccessScope::Owned(bob.id), &OrderListFilter::default())
        .await
        .unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].order.no, "B-1");

    let all = engine
        .list_orders(AccessScope::Unrestricted, &OrderListFilter::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn scoped_update_and_delete_do_not_reach_foreign_rows() {
    let engine = test_engine().await;
    let alice = active_user(&engine, "alice").await;
    let bob = active_user(&engine, "bob").await;
    let order = engine.create_order(alice.id, draft("A-1")).await.unwrap();

    let err = engine
        .update_order(AccessScope::Owned(bob.id), order.id, draft("hijack"))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));

    let err = engine
        .delete_order(AccessScope::Owned(bob.id), order.id)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));

    // the row is untouched
    let detail = engine
        .order_detail(AccessScope::Owned(alice.id), order.id)
        .await
        .unwrap();
    assert_eq!(detail.order.no, "A-1");
}

#[tokio::test]
async fn order_detail_joins_the_owner_profile() {
    let engine = test_engine().await;
    let alice = active_user(&engine, "alice").await;
    let order = engine.create_order(alice.id, draft("A-1")).await.unwrap();

    let detail = engine
        .order_detail(AccessScope::Unrestricted, order.id)
        .await
        .unwrap();
    let owner = detail.owner.unwrap();
    assert_eq!(owner.user_id, alice.id);
    assert_eq!(owner.username, "alice");
}

#[tokio::test]
async fn update_order_overwrites_and_keeps_status_when_absent() {
    let engine = test_engine().await;
    let alice = active_user(&engine, "alice").await;
    let order = engine
        .create_order(
            alice.id,
            OrderDraft {
                no: Some("A-1".to_string()),
                toko: Some("Mas Jaya".to_string()),
                status: Some(OrderStatus::Processing),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let updated = engine
        .update_order(
            AccessScope::Owned(alice.id),
            order.id,
            OrderDraft {
                no: Some("A-1".to_string()),
                nama: Some("Budi".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.nama, "Budi");
    // absent status keeps the stored one
    assert_eq!(updated.status, "processing");
    // overwrite semantics: absent optional fields are cleared and
    // absent process-stage fields become empty strings
    assert!(updated.toko.is_none());
    assert_eq!(updated.bram_karat1, "");
    assert_eq!(updated.bram_karat10, "");
    assert!(updated.updated_at >= order.updated_at);
}

#[tokio::test]
async fn update_order_rejects_deleted_status() {
    let engine = test_engine().await;
    let alice = active_user(&engine, "alice").await;
    let order = engine.create_order(alice.id, draft("A-1")).await.unwrap();

    let err = engine
        .update_order(
            AccessScope::Owned(alice.id),
            order.id,
            OrderDraft {
                status: Some(OrderStatus::Deleted),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));
}

#[tokio::test]
async fn status_update_changes_only_the_status() {
    let engine = test_engine().await;
    let alice = active_user(&engine, "alice").await;
    let order = engine
        .create_order(
            alice.id,
            OrderDraft {
                no: Some("A-1".to_string()),
                toko: Some("Mas Jaya".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    engine
        .update_order_status(AccessScope::Owned(alice.id), order.id, OrderStatus::Shipped)
        .await
        .unwrap();

    let detail = engine
        .order_detail(AccessScope::Owned(alice.id), order.id)
        .await
        .unwrap();
    assert_eq!(detail.order.status, "shipped");
    assert_eq!(detail.order.toko.as_deref(), Some("Mas Jaya"));
}

#[tokio::test]
async fn status_deleted_hard_deletes_the_row() {
    let engine = test_engine().await;
    let alice = active_user(&engine, "alice").await;
    let order = engine.create_order(alice.id, draft("A-1")).await.unwrap();

    engine
        .update_order_status(AccessScope::Owned(alice.id), order.id, OrderStatus::Deleted)
        .await
        .unwrap();

    let err = engine
        .order_detail(AccessScope::Unrestricted, order.id)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
    let total = engine
        .count_orders(AccessScope::Unrestricted, &OrderListFilter::default())
        .await
        .unwrap();
    assert_eq!(total, 0);
}

#[tokio::test]
async fn pagination_is_stable_newest_first() {
    let engine = test_engine().await;
    let alice = active_user(&engine, "alice").await;
    for i in 0..25 {
        engine
            .create_order(alice.id, draft(&format!("SO-{i:03}")))
            .await
            .unwrap();
    }

    let scope = AccessScope::Owned(alice.id);
    let total = engine
        .count_orders(scope, &OrderListFilter::default())
        .await
        .unwrap();
    assert_eq!(total, 25);

    let mut seen = Vec::new();
    for page in 1..=3 {
        let filter = OrderListFilter {
            page,
            page_size: 10,
            ..Default::default()
        };
        let rows = engine.list_orders(scope, &filter).await.unwrap();
        assert_eq!(rows.len(), if page < 3 { 10 } else { 5 });
        seen.extend(rows.into_iter().map(|detail| detail.order.no));
    }

    // newest first, no duplicates or gaps across pages
    let expected: Vec<String> = (0..25).rev().map(|i| format!("SO-{i:03}")).collect();
    assert_eq!(seen, expected);
}

#[tokio::test]
async fn list_rejects_zero_page_and_page_size() {
    let engine = test_engine().await;
    let alice = active_user(&engine, "alice").await;
    let scope = AccessScope::Owned(alice.id);

    let err = engine
        .list_orders(
            scope,
            &OrderListFilter {
                page: 0,
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));

    let err = engine
        .list_orders(
            scope,
            &OrderListFilter {
                page_size: 0,
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));
}

#[tokio::test]
async fn search_matches_number_name_store_and_code() {
    let engine = test_engine().await;
    let alice = active_user(&engine, "alice").await;
    let scope = AccessScope::Owned(alice.id);

    engine
        .create_order(
            alice.id,
            OrderDraft {
                no: Some("SO-1".to_string()),
                nama: Some("Budi".to_string()),
                toko: Some("Mas Jaya".to_string()),
                kode: Some("RING-18K".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    engine
        .create_order(
            alice.id,
            OrderDraft {
                no: Some("SO-2".to_string()),
                nama: Some("Citra".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    for term in ["SO-1", "Budi", "Jaya", "RING"] {
        let filter = OrderListFilter {
            search: Some(term.to_string()),
            ..Default::default()
        };
        let rows = engine.list_orders(scope, &filter).await.unwrap();
        assert_eq!(rows.len(), 1, "term {term:?}");
        assert_eq!(rows[0].order.no, "SO-1");
    }

    // blank search terms are ignored
    let filter = OrderListFilter {
        search: Some("   ".to_string()),
        ..Default::default()
    };
    let rows = engine.list_orders(scope, &filter).await.unwrap();
    assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn status_filter_composes_with_scope_and_count() {
    let engine = test_engine().await;
    let alice = active_user(&engine, "alice").await;
    let bob = active_user(&engine, "bob").await;

    let shipped = engine.create_order(alice.id, draft("A-1")).await.unwrap();
    engine.create_order(alice.id, draft("A-2")).await.unwrap();
    let foreign = engine.create_order(bob.id, draft("B-1")).await.unwrap();

    engine
        .update_order_status(AccessScope::Owned(alice.id), shipped.id, OrderStatus::Shipped)
        .await
        .unwrap();
    engine
        .update_order_status(AccessScope::Owned(bob.id), foreign.id, OrderStatus::Shipped)
        .await
        .unwrap();

    let filter = OrderListFilter {
        status: Some(OrderStatus::Shipped),
        ..Default::default()
    };
    let rows = engine
        .list_orders(AccessScope::Owned(alice.id), &filter)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].order.no, "A-1");

    let count = engine
        .count_orders(AccessScope::Owned(alice.id), &filter)
        .await
        .unwrap();
    assert_eq!(count, 1);
    let count = engine
        .count_orders(AccessScope::Unrestricted, &filter)
        .await
        .unwrap();
    assert_eq!(count, 2);
}

#[tokio::test]
async fn image_bytes_roundtrip_through_the_order() {
    let engine = test_engine().await;
    let alice = active_user(&engine, "alice").await;

    let image = vec![0xff, 0xd8, 0x01, 0x02];
    let order = engine
        .create_order(
            alice.id,
            OrderDraft {
                image_data: Some(image.clone()),
                image_content_type: Some("image/jpeg".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let detail = engine
        .order_detail(AccessScope::Owned(alice.id), order.id)
        .await
        .unwrap();
    assert_eq!(detail.order.image_data, Some(image));
    assert_eq!(detail.order.image_content_type.as_deref(), Some("image/jpeg"));
}
