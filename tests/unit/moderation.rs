use crate::common::{FailingStore, spot};
use banca::config::SpamLimits;
use banca::moderation::{ModerationFlagger, ReportOutcome};
use banca::store::{DocumentStore, MemoryStore, ReportReason, ReportStatus, TargetKind};
use std::sync::Arc;

fn flagger(store: Arc<MemoryStore>) -> ModerationFlagger {
    ModerationFlagger::new(store, &SpamLimits::default())
}

async fn report(
    flagger: &ModerationFlagger,
    reporter: &str,
    target: TargetKind,
    target_id: &str,
) -> ReportOutcome {
    flagger
        .report_content(
            reporter,
            "Reporter Name",
            target,
            target_id,
            ReportReason::Spam,
            "Looks like spam",
        )
        .await
}

#[tokio::test]
async fn third_report_flags_the_target() {
    let store = Arc::new(MemoryStore::new());
    store.insert_spot(spot("s1", "owner", "Rocky Point", 11.0, 125.0));
    let flagger = flagger(store.clone());

    let first = report(&flagger, "r1", TargetKind::Spot, "s1").await;
    assert_eq!(first, ReportOutcome::Submitted);
    assert_eq!(
        first.message(),
        "Report submitted successfully. Our team will review it."
    );
    let state = store
        .moderation_state(TargetKind::Spot, "s1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(state.flag_count, 1);
    assert!(!state.is_flagged);

    let second = report(&flagger, "r2", TargetKind::Spot, "s1").await;
    assert_eq!(second, ReportOutcome::Submitted);

    let third = report(&flagger, "r3", TargetKind::Spot, "s1").await;
    assert_eq!(third, ReportOutcome::Flagged);
    assert_eq!(
        third.message(),
        "Report submitted. Content has been flagged for review."
    );

    let state = store
        .moderation_state(TargetKind::Spot, "s1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(state.flag_count, 3);
    assert_eq!(state.report_ids.len(), 3);
    assert!(state.is_flagged);
}

#[tokio::test]
async fn reports_past_the_threshold_stay_flagged() {
    let store = Arc::new(MemoryStore::new());
    store.insert_spot(spot("s1", "owner", "Rocky Point", 11.0, 125.0));
    let flagger = flagger(store.clone());
    for i in 0..4 {
        report(&flagger, &format!("r{i}"), TargetKind::Spot, "s1").await;
    }
    let state = store
        .moderation_state(TargetKind::Spot, "s1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(state.flag_count, 4);
    assert_eq!(state.report_ids.len(), 4);
    assert!(state.is_flagged);
}

#[tokio::test]
async fn catch_report_targets_are_flagged_too() {
    let store = Arc::new(MemoryStore::new());
    store.put_moderation_state(TargetKind::CatchReport, "c1", Default::default());
    let flagger = flagger(store.clone());
    for i in 0..3 {
        report(&flagger, &format!("r{i}"), TargetKind::CatchReport, "c1").await;
    }
    let state = store
        .moderation_state(TargetKind::CatchReport, "c1")
        .await
        .unwrap()
        .unwrap();
    assert!(state.is_flagged);
}

#[tokio::test]
async fn reporting_a_user_bumps_their_received_counter() {
    let store = Arc::new(MemoryStore::new());
    let flagger = flagger(store.clone());
    let outcome = report(&flagger, "r1", TargetKind::User, "u9").await;
    assert_eq!(outcome, ReportOutcome::Submitted);
    let activity = store.get_user_activity("u9").await.unwrap().unwrap();
    assert_eq!(activity.total_reports, 1);

    report(&flagger, "r2", TargetKind::User, "u9").await;
    let activity = store.get_user_activity("u9").await.unwrap().unwrap();
    assert_eq!(activity.total_reports, 2);
}

#[tokio::test]
async fn report_record_is_stored_pending_with_assigned_fields() {
    let store = Arc::new(MemoryStore::with_clock(crate::common::fixed_clock(
        "2026-08-23T12:00:00Z",
    )));
    store.insert_spot(spot("s1", "owner", "Rocky Point", 11.0, 125.0));
    let flagger = flagger(store.clone());
    report(&flagger, "r1", TargetKind::Spot, "s1").await;

    assert_eq!(store.report_count(), 1);
    let state = store
        .moderation_state(TargetKind::Spot, "s1")
        .await
        .unwrap()
        .unwrap();
    let stored = store.report(&state.report_ids[0]).unwrap();
    assert_eq!(stored.status, ReportStatus::Pending);
    assert_eq!(stored.reporter_id, "r1");
    assert_eq!(stored.target, TargetKind::Spot);
    assert_eq!(stored.created_at, crate::common::instant("2026-08-23T12:00:00Z"));
}

#[tokio::test]
async fn missing_target_still_records_the_report() {
    let store = Arc::new(MemoryStore::new());
    let flagger = flagger(store.clone());
    let outcome = report(&flagger, "r1", TargetKind::Spot, "gone").await;
    assert_eq!(outcome, ReportOutcome::Submitted);
    assert!(outcome.success());
    assert_eq!(store.report_count(), 1);
}

#[tokio::test]
async fn store_errors_fail_closed() {
    let flagger = ModerationFlagger::new(Arc::new(FailingStore), &SpamLimits::default());
    let outcome = report(&flagger, "r1", TargetKind::Spot, "s1").await;
    assert_eq!(outcome, ReportOutcome::Failed);
    assert!(!outcome.success());
    assert_eq!(outcome.message(), "Failed to submit report. Please try again.");
}

#[tokio::test]
async fn threshold_is_configurable() {
    let store = Arc::new(MemoryStore::new());
    store.insert_spot(spot("s1", "owner", "Rocky Point", 11.0, 125.0));
    let limits = SpamLimits {
        auto_flag_threshold: 1,
        ..SpamLimits::default()
    };
    let flagger = ModerationFlagger::new(store.clone(), &limits);
    let outcome = report(&flagger, "r1", TargetKind::Spot, "s1").await;
    assert_eq!(outcome, ReportOutcome::Flagged);
}
