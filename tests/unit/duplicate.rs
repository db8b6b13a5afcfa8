use crate::common::{FailingStore, spot};
use banca::config::SpamLimits;
use banca::duplicate::{DuplicateCheck, DuplicateDetector, DuplicateReason};
use banca::geo::GeoPoint;
use banca::store::MemoryStore;
use std::sync::Arc;

fn detector(store: Arc<MemoryStore>) -> DuplicateDetector {
    DuplicateDetector::new(store, &SpamLimits::default())
}

#[tokio::test]
async fn no_existing_spots_is_unique() {
    let store = Arc::new(MemoryStore::new());
    let check = detector(store)
        .check_spot("u1", "Rocky Point", GeoPoint::new(11.0, 125.0))
        .await;
    assert_eq!(check, DuplicateCheck::Unique);
}

#[tokio::test]
async fn same_name_by_same_owner_is_duplicate() {
    let store = Arc::new(MemoryStore::new());
    store.insert_spot(spot("s1", "u1", "Rocky Point", 11.0, 125.0));
    let check = detector(store)
        .check_spot("u1", "Rocky Point", GeoPoint::new(12.0, 126.0))
        .await;
    assert_eq!(check, DuplicateCheck::Duplicate(DuplicateReason::Name));
    assert_eq!(
        check.reason().unwrap().to_string(),
        "You already have a spot with this name"
    );
}

#[tokio::test]
async fn another_owners_spot_does_not_conflict() {
    let store = Arc::new(MemoryStore::new());
    store.insert_spot(spot("s1", "u2", "Rocky Point", 11.0, 125.0));
    let check = detector(store)
        .check_spot("u1", "Rocky Point", GeoPoint::new(11.0, 125.0))
        .await;
    assert_eq!(check, DuplicateCheck::Unique);
}

#[tokio::test]
async fn identical_coordinates_are_duplicate() {
    let store = Arc::new(MemoryStore::new());
    store.insert_spot(spot("s1", "u1", "Rocky Point", 11.0, 125.0));
    let check = detector(store)
        .check_spot("u1", "Another Name", GeoPoint::new(11.0, 125.0))
        .await;
    assert_eq!(check, DuplicateCheck::Duplicate(DuplicateReason::Location));
    assert_eq!(
        check.reason().unwrap().to_string(),
        "You already have a spot at this location"
    );
}

#[tokio::test]
async fn nearby_spot_inside_radius_is_duplicate() {
    let store = Arc::new(MemoryStore::new());
    store.insert_spot(spot("s1", "u1", "Rocky Point", 11.0, 125.0));
    // About 55 m north of the existing spot.
    let check = detector(store)
        .check_spot("u1", "North Ledge", GeoPoint::new(11.0005, 125.0))
        .await;
    assert_eq!(check, DuplicateCheck::Duplicate(DuplicateReason::Location));
}

#[tokio::test]
async fn spot_outside_radius_is_unique() {
    let store = Arc::new(MemoryStore::new());
    store.insert_spot(spot("s1", "u1", "Rocky Point", 11.0, 125.0));
    // About 1.1 km away.
    let check = detector(store)
        .check_spot("u1", "Far Ledge", GeoPoint::new(11.01, 125.0))
        .await;
    assert_eq!(check, DuplicateCheck::Unique);
}

#[tokio::test]
async fn query_errors_fail_open() {
    let detector = DuplicateDetector::new(Arc::new(FailingStore), &SpamLimits::default());
    let check = detector
        .check_spot("u1", "Rocky Point", GeoPoint::new(11.0, 125.0))
        .await;
    assert_eq!(check, DuplicateCheck::Unique);
    assert!(!check.is_duplicate());
}
