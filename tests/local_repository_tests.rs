mod support;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use mesa_rust::db::repositories::LocalRepository;
use mesa_rust::db::repository::{BookingRepository, RepositoryError};
use mesa_rust::models::{Booking, BookingStatus, NewBooking};

use support::{seed_basic, table, tz};

fn utc(h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 22, h, m, 0).unwrap()
}

fn new_booking(id: &str, table_ids: &[&str], start: DateTime<Utc>, end: DateTime<Utc>) -> NewBooking {
    NewBooking {
        id: id.to_string(),
        restaurant_id: "R1".to_string(),
        sector_id: "S1".to_string(),
        party_size: 4,
        start,
        end,
        duration_minutes: 60,
        table_ids: table_ids.iter().map(|s| s.to_string()).collect(),
    }
}

fn confirmed_booking(id: &str, table_ids: &[&str], start: DateTime<Utc>, end: DateTime<Utc>) -> Booking {
    Booking {
        id: id.to_string(),
        restaurant_id: "R1".to_string(),
        sector_id: "S1".to_string(),
        party_size: 4,
        start,
        end,
        duration_minutes: 60,
        status: BookingStatus::Confirmed,
        table_ids: table_ids.iter().map(|s| s.to_string()).collect(),
        created_at: start,
        updated_at: start,
    }
}

#[tokio::test]
async fn test_free_tables_excludes_overlapping_confirmed_booking() {
    let repo = seed_basic();
    repo.add_booking(confirmed_booking("BK_1", &["T1"], utc(10, 30), utc(11, 30)));

    let free = repo
        .find_free_tables("R1", "S1", utc(10, 0), utc(11, 0))
        .await
        .unwrap();
    assert!(free.is_empty());
}

#[tokio::test]
async fn test_free_tables_half_open_boundary() {
    let repo = seed_basic();
    repo.add_booking(confirmed_booking("BK_1", &["T1"], utc(10, 0), utc(11, 0)));

    // booking ends exactly where the query starts: not a conflict
    let after = repo
        .find_free_tables("R1", "S1", utc(11, 0), utc(12, 0))
        .await
        .unwrap();
    assert_eq!(after.len(), 1);

    // and symmetrically for a query ending at the booking start
    let before = repo
        .find_free_tables("R1", "S1", utc(9, 0), utc(10, 0))
        .await
        .unwrap();
    assert_eq!(before.len(), 1);
}

#[tokio::test]
async fn test_free_tables_ignores_cancelled_bookings() {
    let repo = seed_basic();
    let mut booking = confirmed_booking("BK_1", &["T1"], utc(10, 0), utc(11, 0));
    booking.status = BookingStatus::Cancelled;
    repo.add_booking(booking);

    let free = repo
        .find_free_tables("R1", "S1", utc(10, 0), utc(11, 0))
        .await
        .unwrap();
    assert_eq!(free.len(), 1);
}

#[tokio::test]
async fn test_free_tables_unknown_sector_is_empty() {
    let repo = seed_basic();
    let free = repo
        .find_free_tables("R1", "S2", utc(10, 0), utc(11, 0))
        .await
        .unwrap();
    assert!(free.is_empty());

    // sector belonging to a different restaurant is not visible either
    let free = repo
        .find_free_tables("R2", "S1", utc(10, 0), utc(11, 0))
        .await
        .unwrap();
    assert!(free.is_empty());
}

#[tokio::test]
async fn test_insert_booking_commits_atomically() {
    let repo = seed_basic();

    let booking = repo
        .insert_booking(&new_booking("BK_1", &["T1"], utc(10, 0), utc(11, 0)))
        .await
        .unwrap();

    assert_eq!(booking.status, BookingStatus::Confirmed);
    assert_eq!(repo.booking_count(), 1);
    assert_eq!(repo.get_booking("BK_1").unwrap().table_ids, vec!["T1"]);
}

#[tokio::test]
async fn test_insert_booking_unknown_table_leaves_no_partial_state() {
    let repo = seed_basic();

    let err = repo
        .insert_booking(&new_booking("BK_1", &["T1", "T9"], utc(10, 0), utc(11, 0)))
        .await
        .unwrap_err();

    assert!(matches!(err, RepositoryError::ValidationError(_)));
    assert_eq!(repo.booking_count(), 0);

    // T1 must still be bookable: nothing about it was written
    let free = repo
        .find_free_tables("R1", "S1", utc(10, 0), utc(11, 0))
        .await
        .unwrap();
    assert_eq!(free.len(), 1);
}

#[tokio::test]
async fn test_insert_booking_busy_table_is_conflict() {
    let repo = seed_basic();
    repo.add_booking(confirmed_booking("BK_1", &["T1"], utc(10, 0), utc(11, 0)));

    let err = repo
        .insert_booking(&new_booking("BK_2", &["T1"], utc(10, 30), utc(11, 30)))
        .await
        .unwrap_err();

    assert!(matches!(err, RepositoryError::Conflict(_)));
    assert_eq!(repo.booking_count(), 1);
}

#[tokio::test]
async fn test_insert_booking_duplicate_id_is_conflict() {
    let repo = seed_basic();
    repo.add_table(table("T2", "S1", 2, 4));
    repo.insert_booking(&new_booking("BK_1", &["T1"], utc(10, 0), utc(11, 0)))
        .await
        .unwrap();

    let err = repo
        .insert_booking(&new_booking("BK_1", &["T2"], utc(10, 0), utc(11, 0)))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::Conflict(_)));
}

#[tokio::test]
async fn test_cancel_booking_frees_the_table() {
    let repo = seed_basic();
    repo.insert_booking(&new_booking("BK_1", &["T1"], utc(10, 0), utc(11, 0)))
        .await
        .unwrap();

    repo.cancel_booking("BK_1").await.unwrap();

    let stored = repo.get_booking("BK_1").unwrap();
    assert_eq!(stored.status, BookingStatus::Cancelled);

    let free = repo
        .find_free_tables("R1", "S1", utc(10, 0), utc(11, 0))
        .await
        .unwrap();
    assert_eq!(free.len(), 1);
}

#[tokio::test]
async fn test_cancel_unknown_booking_is_not_found() {
    let repo = seed_basic();
    let err = repo.cancel_booking("BK_NOPE").await.unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound(_)));
}

#[tokio::test]
async fn test_booking_exists() {
    let repo = seed_basic();
    assert!(!repo.booking_exists("BK_1").await.unwrap());

    repo.insert_booking(&new_booking("BK_1", &["T1"], utc(10, 0), utc(11, 0)))
        .await
        .unwrap();
    assert!(repo.booking_exists("BK_1").await.unwrap());
}

#[tokio::test]
async fn test_bookings_for_day_sorted_and_filtered() {
    let repo = seed_basic();
    repo.add_table(table("T2", "S1", 2, 4));
    repo.add_booking(confirmed_booking("BK_LATE", &["T1"], utc(20, 0), utc(21, 0)));
    repo.add_booking(confirmed_booking("BK_EARLY", &["T2"], utc(10, 0), utc(11, 0)));
    // different day, must not appear
    repo.add_booking(confirmed_booking(
        "BK_OTHER",
        &["T1"],
        Utc.with_ymd_and_hms(2025, 10, 23, 10, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2025, 10, 23, 11, 0, 0).unwrap(),
    ));

    let date = NaiveDate::from_ymd_opt(2025, 10, 22).unwrap();
    let day = repo.bookings_for_day("R1", "S1", date).await.unwrap();

    let ids: Vec<&str> = day.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec!["BK_EARLY", "BK_LATE"]);
}

#[tokio::test]
async fn test_bookings_for_day_uses_restaurant_timezone() {
    let repo = LocalRepository::new();
    repo.add_restaurant("R1", Some(tz("America/Argentina/Buenos_Aires")));
    repo.add_sector("S1", "R1");
    repo.add_table(table("T1", "S1", 2, 4));
    // 2025-10-23T01:00Z is still 2025-10-22 22:00 in Buenos Aires
    repo.add_booking(confirmed_booking(
        "BK_1",
        &["T1"],
        Utc.with_ymd_and_hms(2025, 10, 23, 1, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2025, 10, 23, 2, 0, 0).unwrap(),
    ));

    let local_day = NaiveDate::from_ymd_opt(2025, 10, 22).unwrap();
    let day = repo.bookings_for_day("R1", "S1", local_day).await.unwrap();
    assert_eq!(day.len(), 1);

    let utc_day = NaiveDate::from_ymd_opt(2025, 10, 23).unwrap();
    let day = repo.bookings_for_day("R1", "S1", utc_day).await.unwrap();
    assert!(day.is_empty());
}

#[tokio::test]
async fn test_unhealthy_repository_refuses_queries() {
    let repo = seed_basic();
    repo.set_healthy(false);

    assert!(!repo.health_check().await.unwrap());
    let err = repo
        .find_free_tables("R1", "S1", utc(10, 0), utc(11, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::ConnectionError(_)));
}

#[tokio::test]
async fn test_default_timezone_is_utc() {
    let repo = seed_basic();
    let zone = repo.get_timezone("R1").await.unwrap();
    assert_eq!(zone, chrono_tz::Tz::UTC);
}
