//! Behavior-driven tests for the local conversion store
//!
//! The warehouse keeps conversion history and favorite pairs on disk. These
//! tests check what survives a restart and how bad input is reported.

use fxlens_core::{
    ConversionStore, Warehouse, WarehouseConfig, WarehouseError, DEFAULT_HISTORY_LIMIT,
};
use fxlens_tests::pair;
use tempfile::tempdir;

#[test]
fn history_survives_reopening_the_database() {
    // Given: A conversion recorded through the store contract
    let temp = tempdir().expect("tempdir");
    let config = WarehouseConfig::in_home(temp.path().join("home"));
    {
        let warehouse = Warehouse::open(config.clone()).expect("open");
        let store: &dyn ConversionStore = &warehouse;
        store
            .add_conversion("dana", &pair("CHF", "USD"), 10.0, 11.1)
            .expect("record");
    }

    // When: The database is opened again
    let warehouse = Warehouse::open(config).expect("reopen");

    // Then: The conversion is still there with its fields intact
    let history = warehouse
        .conversion_history("dana", DEFAULT_HISTORY_LIMIT)
        .expect("history");
    assert_eq!(history.len(), 1);
    let record = &history[0];
    assert_eq!(record.from_currency, "CHF");
    assert_eq!(record.to_currency, "USD");
    assert_eq!(record.amount, 10.0);
    assert_eq!(record.result, 11.1);
    assert!(!record.id.is_empty());
}

#[test]
fn history_is_capped_at_the_requested_limit() {
    let temp = tempdir().expect("tempdir");
    let warehouse = Warehouse::open(WarehouseConfig::in_home(temp.path())).expect("open");

    for step in 0..12 {
        let amount = f64::from(step);
        warehouse
            .add_conversion("erin", "USD", "EUR", amount, amount * 0.92)
            .expect("record");
    }

    let default_page = warehouse
        .conversion_history("erin", DEFAULT_HISTORY_LIMIT)
        .expect("history");
    assert_eq!(default_page.len(), 10);
    assert_eq!(default_page[0].amount, 11.0);
    assert_eq!(default_page[9].amount, 2.0);
}

#[test]
fn store_errors_surface_as_persistence_errors() {
    let temp = tempdir().expect("tempdir");
    let warehouse = Warehouse::open(WarehouseConfig::in_home(temp.path())).expect("open");
    let store: &dyn ConversionStore = &warehouse;

    let error = store
        .conversion_history("erin", 0)
        .expect_err("zero limit is rejected");

    assert!(error.message().contains("limit"));
}

#[test]
fn favorites_round_trip_per_user() {
    // Given: Two users saving pairs
    let temp = tempdir().expect("tempdir");
    let warehouse = Warehouse::open(WarehouseConfig::in_home(temp.path())).expect("open");
    let saved = warehouse.add_favorite("frank", "USD", "JPY").expect("save");
    warehouse.add_favorite("grace", "EUR", "GBP").expect("save");

    // When: Frank lists and removes his favorite
    let listed = warehouse.favorites("frank").expect("list");
    let removed = warehouse.remove_favorite("frank", &saved.id).expect("remove");

    // Then: Only his pair was visible and it is gone afterwards
    assert_eq!(listed, vec![saved]);
    assert!(removed);
    assert!(warehouse.favorites("frank").expect("list").is_empty());
    assert_eq!(warehouse.favorites("grace").expect("list").len(), 1);
}

#[test]
fn identical_codes_cannot_be_saved_as_favorite() {
    let temp = tempdir().expect("tempdir");
    let warehouse = Warehouse::open(WarehouseConfig::in_home(temp.path())).expect("open");

    let error = warehouse
        .add_favorite("henry", "USD", "usd")
        .expect_err("same code twice");

    assert!(matches!(error, WarehouseError::Rejected(_)));
}
