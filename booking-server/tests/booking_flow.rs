//! 预约全流程测试
//!
//! 使用内存存储实现跑通 提交 -> 快照 -> 余量 -> 准入 的闭环，
//! 包括容量上限、覆盖容量、取消释放与存储故障路径。

use std::sync::Arc;

use booking_server::booking::{AvailabilityService, ReservationService, SubmissionError};
use booking_server::catalog::ClassCatalog;
use booking_server::db::{MemoryReservationStore, ReservationStore};
use shared::{ReservationDraft, ReservationStatus, SortOrder, SubmitReservationRequest};

fn request(slot_id: &str) -> SubmitReservationRequest {
    SubmitReservationRequest {
        class_id: Some("chewy-cookie".into()),
        slot_id: Some(slot_id.into()),
        agreed: true,
        guardian_name: "Hong Gildong".into(),
        phone: "010-1234-5678".into(),
        child_name: "Kim Choco".into(),
        child_age: "9".into(),
        note: String::new(),
        depositor_name: "Hong Gildong".into(),
    }
}

async fn started_service(
    catalog: ClassCatalog,
) -> (ReservationService, Arc<MemoryReservationStore>) {
    let memory = Arc::new(MemoryReservationStore::new());
    let store: Arc<dyn ReservationStore> = memory.clone();
    let catalog = Arc::new(catalog);
    let availability = AvailabilityService::new(catalog.clone());
    availability.start(&store).await.unwrap();
    (
        ReservationService::new(store, catalog, availability),
        memory,
    )
}

#[tokio::test]
async fn slot_fills_to_capacity_then_rejects() {
    let (service, store) = started_service(ClassCatalog::default()).await;

    for _ in 0..6 {
        service.submit(request("0228-1100")).await.unwrap();
        // Each append broadcasts a fresh snapshot; let the
        // availability task fold it before the next submission.
        tokio::task::yield_now().await;
    }

    let err = service.submit(request("0228-1100")).await.unwrap_err();
    assert!(matches!(err, SubmissionError::SlotFull { .. }));

    // Exactly six records landed; the rejection wrote nothing.
    let all = store.query_once(SortOrder::Asc).await.unwrap();
    assert_eq!(all.len(), 6);
    assert!(all.iter().all(|r| r.status == ReservationStatus::Pending));

    // Another slot of the same class is unaffected
    service.submit(request("0301-1100")).await.unwrap();
}

#[tokio::test]
async fn override_capacity_limits_a_single_slot() {
    let mut catalog = ClassCatalog::default();
    catalog.capacity_overrides.insert("0228-1100".into(), 2);
    let (service, store) = started_service(catalog).await;

    service.submit(request("0228-1100")).await.unwrap();
    tokio::task::yield_now().await;
    service.submit(request("0228-1100")).await.unwrap();
    tokio::task::yield_now().await;

    let err = service.submit(request("0228-1100")).await.unwrap_err();
    assert!(matches!(err, SubmissionError::SlotFull { .. }));
    assert_eq!(store.query_once(SortOrder::Asc).await.unwrap().len(), 2);

    // The uniform capacity still applies to slots without an override
    for _ in 0..6 {
        service.submit(request("0301-1100")).await.unwrap();
        tokio::task::yield_now().await;
    }
    assert!(matches!(
        service.submit(request("0301-1100")).await.unwrap_err(),
        SubmissionError::SlotFull { .. }
    ));
}

#[tokio::test]
async fn rejected_submissions_write_nothing() {
    let (service, store) = started_service(ClassCatalog::default()).await;

    let mut too_young = request("0228-1100");
    too_young.child_age = "5".into();
    let mut no_consent = request("0228-1100");
    no_consent.agreed = false;
    let mut no_slot = request("0228-1100");
    no_slot.slot_id = None;

    for req in [too_young, no_consent, no_slot] {
        assert!(service.submit(req).await.is_err());
    }
    assert!(store.query_once(SortOrder::Asc).await.unwrap().is_empty());
}

#[tokio::test]
async fn cancellation_reopens_a_full_slot() {
    let (service, store) = started_service(ClassCatalog::default()).await;

    let mut first_id = None;
    for i in 0..6 {
        let r = service.submit(request("0228-1100")).await.unwrap();
        if i == 0 {
            first_id = r.id;
        }
        tokio::task::yield_now().await;
    }
    assert!(service.submit(request("0228-1100")).await.is_err());

    service
        .update_status(first_id.as_deref().unwrap(), ReservationStatus::Cancelled)
        .await
        .unwrap();
    tokio::task::yield_now().await;

    // The cancelled record stays in the collection but frees the seat
    service.submit(request("0228-1100")).await.unwrap();
    assert_eq!(store.query_once(SortOrder::Asc).await.unwrap().len(), 7);
}

#[tokio::test]
async fn confirmation_keeps_the_seat_occupied() {
    let (service, _store) = started_service(ClassCatalog::default()).await;

    for _ in 0..5 {
        service.submit(request("0302-1100")).await.unwrap();
        tokio::task::yield_now().await;
    }
    let r = service.submit(request("0302-1100")).await.unwrap();
    tokio::task::yield_now().await;

    service
        .update_status(r.id.as_deref().unwrap(), ReservationStatus::Confirmed)
        .await
        .unwrap();
    tokio::task::yield_now().await;

    // Confirmed counts as active, so the slot stays full
    assert!(matches!(
        service.submit(request("0302-1100")).await.unwrap_err(),
        SubmissionError::SlotFull { .. }
    ));
}

#[tokio::test]
async fn stale_tally_admits_past_capacity() {
    // The capacity check is advisory: it runs against the tally the
    // submitter captured, not the store's true state. With the
    // availability task never started, the tally stays empty and a
    // seventh submission is admitted. Reconciliation is the admin's
    // job, not the guard's.
    let memory = Arc::new(MemoryReservationStore::new());
    let store: Arc<dyn ReservationStore> = memory.clone();
    let catalog = Arc::new(ClassCatalog::default());
    let availability = AvailabilityService::new(catalog.clone());
    let service = ReservationService::new(store.clone(), catalog, availability);

    let draft = ReservationDraft {
        guardian_name: "Hong Gildong".into(),
        phone: "010-1234-5678".into(),
        child_name: "Kim Choco".into(),
        child_age: 9,
        class_id: "chewy-cookie".into(),
        slot_id: "0228-1100".into(),
        note: String::new(),
        depositor_name: "Hong Gildong".into(),
        agreed: true,
    };
    for _ in 0..6 {
        store.append(draft.clone()).await.unwrap();
    }

    let admitted = service.submit(request("0228-1100")).await.unwrap();
    assert_eq!(admitted.status, ReservationStatus::Pending);
    assert_eq!(store.query_once(SortOrder::Asc).await.unwrap().len(), 7);
}

#[tokio::test]
async fn store_failure_rejects_without_side_effects() {
    let (service, store) = started_service(ClassCatalog::default()).await;

    store.set_fail_appends(true);
    let err = service.submit(request("0228-1100")).await.unwrap_err();
    assert!(matches!(err, SubmissionError::Store(_)));
    assert!(!err.clears_selected_slot());
    assert!(store.query_once(SortOrder::Asc).await.unwrap().is_empty());

    // The same submission succeeds once the store recovers
    store.set_fail_appends(false);
    service.submit(request("0228-1100")).await.unwrap();
    assert_eq!(store.query_once(SortOrder::Asc).await.unwrap().len(), 1);
}
