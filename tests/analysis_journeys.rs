//! Behavior-driven tests for analysis journeys
//!
//! An analysis resolves a rate and its history, reduces the history to
//! statistics and optionally records the conversion. These tests check what
//! the caller gets back, including when collaborators fail.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use approx::assert_relative_eq;
use fxlens_core::{
    AnalysisRequest, Analyzer, ApiStatus, ConversionRecord, ConversionStore, CoreError,
    CurrencyPair, Period, PersistenceError, Provenance, ResolverConfig, StatsState,
    ValidationError, Warehouse, WarehouseConfig,
};
use tempfile::tempdir;

// =============================================================================
// Test doubles
// =============================================================================

#[derive(Default)]
struct RecordingStore {
    records: Mutex<Vec<(String, String, f64, f64)>>,
}

impl ConversionStore for RecordingStore {
    fn add_conversion(
        &self,
        user_id: &str,
        pair: &CurrencyPair,
        amount: f64,
        result: f64,
    ) -> Result<String, PersistenceError> {
        let mut records = self.records.lock().expect("records lock");
        records.push((user_id.to_string(), pair.key(), amount, result));
        Ok(format!("record-{}", records.len()))
    }

    fn conversion_history(
        &self,
        _user_id: &str,
        _limit: usize,
    ) -> Result<Vec<ConversionRecord>, PersistenceError> {
        Ok(Vec::new())
    }
}

#[derive(Default)]
struct BrokenStore {
    attempts: AtomicUsize,
}

impl ConversionStore for BrokenStore {
    fn add_conversion(
        &self,
        _user_id: &str,
        _pair: &CurrencyPair,
        _amount: f64,
        _result: f64,
    ) -> Result<String, PersistenceError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(PersistenceError::new("disk full"))
    }

    fn conversion_history(
        &self,
        _user_id: &str,
        _limit: usize,
    ) -> Result<Vec<ConversionRecord>, PersistenceError> {
        Err(PersistenceError::new("disk full"))
    }
}

fn offline_builder() -> fxlens_core::AnalyzerBuilder {
    Analyzer::builder()
        .with_config(ResolverConfig::default())
        .with_offline(true)
        .with_seed(2024)
}

// =============================================================================
// Journeys
// =============================================================================

#[tokio::test]
async fn offline_usd_eur_analysis_uses_fallback_table() {
    // Given: No network access
    let analyzer = offline_builder().build();

    // When: The user analyzes 100 USD to EUR over a week
    let analysis = analyzer
        .analyze(AnalysisRequest::new("usd", "eur", 100.0, Period::WEEK))
        .await
        .expect("analysis succeeds");

    // Then: The fallback rate drives the conversion
    assert_eq!(analysis.quote.rate, 0.92);
    assert_eq!(analysis.quote.provenance, Provenance::FallbackTable);
    assert_eq!(analysis.converted_amount, 92.0);

    // And: Statistics cover the full week and bracket the current rate
    let StatsState::Ready(stats) = analysis.statistics else {
        panic!("a week of data must produce statistics");
    };
    assert_eq!(stats.count, 7);
    assert!(stats.min <= 0.92 && 0.92 <= stats.max);
    assert_relative_eq!(stats.endpoint_delta, 0.92 - analysis.series.rates()[0]);
    assert!(analysis.warnings.is_empty());
    assert!(analysis.conversion_id.is_none());
}

#[tokio::test]
async fn equal_currencies_are_rejected_as_input_error() {
    let analyzer = offline_builder().build();

    let error = analyzer
        .analyze(AnalysisRequest::new("GBP", "gbp", 10.0, Period::WEEK))
        .await
        .expect_err("equal pair is invalid");

    assert!(matches!(
        error,
        CoreError::Validation(ValidationError::InvalidPair { .. })
    ));
}

#[tokio::test]
async fn conversion_is_recorded_for_signed_in_user() {
    // Given: A store and a signed-in user
    let store = Arc::new(RecordingStore::default());
    let analyzer = offline_builder().with_store(store.clone()).build();

    // When: They analyze a conversion
    let analysis = analyzer
        .analyze(AnalysisRequest::new("GBP", "USD", 50.0, Period::MONTH).with_user("alice"))
        .await
        .expect("analysis succeeds");

    // Then: Exactly that conversion is stored
    let records = store.records.lock().expect("records lock").clone();
    assert_eq!(
        records,
        vec![(String::from("alice"), String::from("GBP_USD"), 50.0, 63.5)]
    );
    assert_eq!(analysis.conversion_id.as_deref(), Some("record-1"));
    assert_eq!(analysis.series.len(), 30);
}

#[tokio::test]
async fn anonymous_analysis_does_not_touch_the_store() {
    let store = Arc::new(BrokenStore::default());
    let analyzer = offline_builder().with_store(store.clone()).build();

    analyzer
        .analyze(AnalysisRequest::new("USD", "JPY", 3.0, Period::WEEK))
        .await
        .expect("analysis succeeds");

    assert_eq!(store.attempts.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn store_failure_does_not_fail_the_analysis() {
    // Given: A store that rejects every write
    let store = Arc::new(BrokenStore::default());
    let analyzer = offline_builder().with_store(store.clone()).build();

    // When: A signed-in user runs an analysis
    let analysis = analyzer
        .analyze(AnalysisRequest::new("EUR", "USD", 10.0, Period::WEEK).with_user("bob"))
        .await
        .expect("analysis still succeeds");

    // Then: The result is intact and the failure is reported as a warning
    assert_eq!(store.attempts.load(Ordering::SeqCst), 1);
    assert_eq!(analysis.converted_amount, 10.9);
    assert!(analysis.conversion_id.is_none());
    assert_eq!(analysis.warnings.len(), 1);
    assert!(analysis.warnings[0].contains("disk full"));
}

#[tokio::test]
async fn analysis_records_into_the_warehouse() {
    // Given: A real warehouse in a temporary home
    let temp = tempdir().expect("tempdir");
    let warehouse = Warehouse::open(WarehouseConfig::in_home(temp.path())).expect("warehouse");
    let warehouse = Arc::new(warehouse);
    let analyzer = offline_builder().with_store(warehouse.clone()).build();

    // When: Two conversions are analyzed
    for amount in [1.0, 2.0] {
        analyzer
            .analyze(AnalysisRequest::new("USD", "EUR", amount, Period::WEEK).with_user("carol"))
            .await
            .expect("analysis succeeds");
    }

    // Then: History lists them newest first
    let history = ConversionStore::conversion_history(warehouse.as_ref(), "carol", 10)
        .expect("history");
    let results: Vec<f64> = history.iter().map(|record| record.result).collect();
    assert_eq!(results, vec![1.84, 0.92]);
    assert!(history.iter().all(|record| record.from_currency == "USD"));
}

#[tokio::test]
async fn analysis_report_serializes_provenance_and_state() {
    let analyzer = offline_builder().build();
    let analysis = analyzer
        .analyze(AnalysisRequest::new(
            "USD",
            "EUR",
            1.0,
            Period::new(1).expect("one day"),
        ))
        .await
        .expect("analysis succeeds");

    let json = serde_json::to_value(&analysis).expect("serializes");

    assert_eq!(json["quote"]["provenance"], "fallback-table");
    assert_eq!(json["statistics"]["state"], "insufficient_data");
    assert_eq!(json["series"]["points"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn offline_probe_reports_degraded() {
    let analyzer = offline_builder().build();

    let status = analyzer.probe().await;

    assert!(matches!(status, ApiStatus::Degraded { reason } if reason.contains("offline")));
}
