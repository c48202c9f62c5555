//! SurrealDB 存储测试
//!
//! 使用内存引擎验证嵌入式存储实现的快照语义与状态迁移约束。

use std::sync::Arc;

use booking_server::db::{DbService, ReservationStore, SurrealReservationStore};
use shared::{ReservationDraft, ReservationStatus, SortOrder};

fn draft(slot_id: &str) -> ReservationDraft {
    ReservationDraft {
        guardian_name: "Hong Gildong".into(),
        phone: "010-1234-5678".into(),
        child_name: "Kim Choco".into(),
        child_age: 9,
        class_id: "chewy-cookie".into(),
        slot_id: slot_id.into(),
        note: "nut allergy".into(),
        depositor_name: "Hong Gildong".into(),
        agreed: true,
    }
}

async fn memory_store() -> Arc<dyn ReservationStore> {
    let db = DbService::new(":memory:").await.unwrap();
    Arc::new(SurrealReservationStore::new(db.db, 16))
}

#[tokio::test]
async fn append_assigns_id_and_pending_status() {
    let store = memory_store().await;
    let created = store.append(draft("0228-1100")).await.unwrap();

    assert_eq!(created.status, ReservationStatus::Pending);
    assert_eq!(created.slot_id, "0228-1100");
    assert_eq!(created.note, "nut allergy");
    let id = created.id.expect("store assigns an id");
    assert!(id.starts_with("kids_class_reservations:"));
}

#[tokio::test]
async fn subscriber_sees_initial_then_mutations() {
    let store = memory_store().await;
    store.append(draft("0228-1100")).await.unwrap();

    let mut sub = store.subscribe().await.unwrap();
    assert_eq!(sub.initial.len(), 1);

    store.append(draft("0301-1100")).await.unwrap();
    let snapshot = sub.receiver.recv().await.unwrap();
    // Full record set, not a delta
    assert_eq!(snapshot.len(), 2);
}

#[tokio::test]
async fn status_update_is_broadcast_and_persisted() {
    let store = memory_store().await;
    let created = store.append(draft("0228-1100")).await.unwrap();
    let id = created.id.unwrap();

    let mut sub = store.subscribe().await.unwrap();
    let updated = store
        .update_status(&id, ReservationStatus::Confirmed)
        .await
        .unwrap();
    assert_eq!(updated.status, ReservationStatus::Confirmed);

    let snapshot = sub.receiver.recv().await.unwrap();
    assert_eq!(snapshot[0].status, ReservationStatus::Confirmed);

    // The record survives with its new status on a one-shot read
    let all = store.query_once(SortOrder::Desc).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].status, ReservationStatus::Confirmed);
}

#[tokio::test]
async fn illegal_transition_is_rejected_without_broadcast() {
    let store = memory_store().await;
    let created = store.append(draft("0228-1100")).await.unwrap();
    let id = created.id.unwrap();
    store
        .update_status(&id, ReservationStatus::Cancelled)
        .await
        .unwrap();

    let mut sub = store.subscribe().await.unwrap();
    let err = store
        .update_status(&id, ReservationStatus::Confirmed)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Cannot change reservation"));

    // Nothing was mutated, so nothing was pushed
    assert!(matches!(
        sub.receiver.try_recv(),
        Err(tokio::sync::broadcast::error::TryRecvError::Empty)
    ));
}

#[tokio::test]
async fn listing_orders_by_creation_time() {
    let store = memory_store().await;
    store.append(draft("0228-1100")).await.unwrap();
    store.append(draft("0301-1100")).await.unwrap();
    store.append(draft("0302-1100")).await.unwrap();

    let asc = store.query_once(SortOrder::Asc).await.unwrap();
    let desc = store.query_once(SortOrder::Desc).await.unwrap();
    assert_eq!(asc.len(), 3);
    assert_eq!(asc[0].slot_id, "0228-1100");
    assert_eq!(desc[0].slot_id, "0302-1100");
}
