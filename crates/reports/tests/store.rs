//! Behavior of the in-memory report store

use std::time::Duration;

use chrono::NaiveDate;
use reports::error::StoreError;
use reports::memory::MemoryReportStore;
use reports::report::NewReport;
use reports::store::ReportStore;
use serde_json::json;
use uuid::Uuid;

fn report_for(company: &str, embedding: Option<Vec<f32>>) -> NewReport {
  NewReport {
    company_id: company.to_string(),
    template_id: "monthly-sales".to_string(),
    period_start: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
    period_end: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
    metrics_json: json!({"revenue": 120_000, "growth": 0.07}),
    final_text: "Revenue grew 7% over the previous period.".to_string(),
    embedding,
    file_url: None,
  }
}

fn assert_close(actual: f32, expected: f32) {
  assert!((actual - expected).abs() < 1e-3, "expected {expected}, got {actual}");
}

#[tokio::test]
async fn create_then_find_by_id_round_trips_all_fields() {
  let store = MemoryReportStore::new();

  let mut input = report_for("acme", Some(vec![0.1, 0.2, 0.3]));
  input.file_url = Some("https://files.example/report.hwpx".to_string());

  let created = store.create(input.clone()).await.unwrap();
  let found = store.find_by_id(created.id).await.unwrap().expect("report should exist");

  assert_eq!(found.company_id, input.company_id);
  assert_eq!(found.template_id, input.template_id);
  assert_eq!(found.period_start, input.period_start);
  assert_eq!(found.period_end, input.period_end);
  assert_eq!(found.metrics_json, input.metrics_json);
  assert_eq!(found.final_text, input.final_text);
  assert_eq!(found.file_url, input.file_url);
  assert_eq!(found.created_at, created.created_at);

  let stored = found.embedding.expect("embedding should be stored");
  let supplied = input.embedding.unwrap();
  assert_eq!(stored.len(), supplied.len());
  for (s, e) in stored.iter().zip(supplied.iter()) {
    assert_close(*s, *e);
  }
}

#[tokio::test]
async fn find_by_id_absence_is_not_an_error() {
  let store = MemoryReportStore::new();
  let found = store.find_by_id(Uuid::new_v4()).await.unwrap();
  assert!(found.is_none());
}

#[tokio::test]
async fn similarity_never_crosses_tenants() {
  let store = MemoryReportStore::new();

  for _ in 0..3 {
    store.create(report_for("acme", Some(vec![1.0, 0.0]))).await.unwrap();
    store.create(report_for("globex", Some(vec![1.0, 0.0]))).await.unwrap();
  }

  let results = store.find_similar(&[1.0, 0.0], "acme", 10).await.unwrap();

  assert_eq!(results.len(), 3);
  for result in results {
    assert_eq!(result.report.company_id, "acme");
  }
}

#[tokio::test]
async fn results_come_back_in_non_increasing_similarity_order() {
  let store = MemoryReportStore::new();

  // Unit vectors whose cosine against [1, 0] is exactly the first component
  store.create(report_for("acme", Some(vec![0.5, 0.866_025_4]))).await.unwrap();
  store.create(report_for("acme", Some(vec![0.1, 0.994_987_4]))).await.unwrap();
  store.create(report_for("acme", Some(vec![0.9, 0.435_889_9]))).await.unwrap();

  let results = store.find_similar(&[1.0, 0.0], "acme", 5).await.unwrap();

  assert_eq!(results.len(), 3);
  assert_close(results[0].similarity, 0.9);
  assert_close(results[1].similarity, 0.5);
  assert_close(results[2].similarity, 0.1);
}

#[tokio::test]
async fn reports_without_embedding_are_excluded_until_backfilled() {
  let store = MemoryReportStore::new();

  let bare = store.create(report_for("acme", None)).await.unwrap();
  store.create(report_for("acme", Some(vec![0.0, 1.0]))).await.unwrap();

  let results = store.find_similar(&[1.0, 0.0], "acme", 10).await.unwrap();
  assert_eq!(results.len(), 1);
  assert!(results.iter().all(|r| r.report.id != bare.id));

  store.update_embedding(bare.id, vec![1.0, 0.0]).await.unwrap();

  let results = store.find_similar(&[1.0, 0.0], "acme", 10).await.unwrap();
  assert_eq!(results.len(), 2);
  assert_eq!(results[0].report.id, bare.id);
  assert_close(results[0].similarity, 1.0);
}

#[tokio::test]
async fn limit_truncates_to_the_best_matches() {
  let store = MemoryReportStore::new();

  for i in 0..10 {
    let x = i as f32 / 10.0;
    let y = (1.0 - x * x).sqrt();
    store.create(report_for("acme", Some(vec![x, y]))).await.unwrap();
  }

  let results = store.find_similar(&[1.0, 0.0], "acme", 3).await.unwrap();

  assert_eq!(results.len(), 3);
  assert_close(results[0].similarity, 0.9);
  assert_close(results[1].similarity, 0.8);
  assert_close(results[2].similarity, 0.7);
}

#[tokio::test]
async fn zero_limit_is_rejected() {
  let store = MemoryReportStore::new();
  let result = store.find_similar(&[1.0, 0.0], "acme", 0).await;
  assert!(matches!(result, Err(StoreError::Validation { .. })));
}

#[tokio::test]
async fn query_dimension_must_match_the_tenant() {
  let store = MemoryReportStore::new();
  store.create(report_for("acme", Some(vec![1.0, 0.0, 0.0]))).await.unwrap();

  let result = store.find_similar(&[1.0, 0.0], "acme", 5).await;
  assert!(matches!(result, Err(StoreError::DimensionMismatch { expected: 3, actual: 2 })));
}

#[tokio::test]
async fn stored_dimensions_stay_consistent_per_tenant() {
  let store = MemoryReportStore::new();
  store.create(report_for("acme", Some(vec![1.0, 0.0, 0.0]))).await.unwrap();

  let result = store.create(report_for("acme", Some(vec![1.0, 0.0]))).await;
  assert!(matches!(result, Err(StoreError::DimensionMismatch { .. })));

  // A different tenant is free to use another model's width
  assert!(store.create(report_for("globex", Some(vec![1.0, 0.0]))).await.is_ok());

  let embedded = store.create(report_for("acme", None)).await.unwrap();
  let result = store.update_embedding(embedded.id, vec![1.0, 0.0]).await;
  assert!(matches!(result, Err(StoreError::DimensionMismatch { .. })));
}

#[tokio::test]
async fn update_embedding_on_unknown_id_is_an_error() {
  let store = MemoryReportStore::new();
  let result = store.update_embedding(Uuid::new_v4(), vec![1.0, 0.0]).await;
  assert!(matches!(result, Err(StoreError::NotFound { .. })));
}

#[tokio::test]
async fn delete_is_idempotent() {
  let store = MemoryReportStore::new();
  let created = store.create(report_for("acme", None)).await.unwrap();

  store.delete(created.id).await.unwrap();
  assert!(store.find_by_id(created.id).await.unwrap().is_none());

  // Deleting again is a clean no-op
  store.delete(created.id).await.unwrap();
}

#[tokio::test]
async fn company_listing_is_newest_first() {
  let store = MemoryReportStore::new();

  let first = store.create(report_for("acme", None)).await.unwrap();
  tokio::time::sleep(Duration::from_millis(5)).await;
  let second = store.create(report_for("acme", None)).await.unwrap();
  tokio::time::sleep(Duration::from_millis(5)).await;
  let third = store.create(report_for("acme", None)).await.unwrap();
  store.create(report_for("globex", None)).await.unwrap();

  let listed = store.find_by_company("acme").await.unwrap();

  assert_eq!(listed.len(), 3);
  assert_eq!(listed[0].id, third.id);
  assert_eq!(listed[1].id, second.id);
  assert_eq!(listed[2].id, first.id);
}

#[tokio::test]
async fn template_listing_spans_tenants() {
  let store = MemoryReportStore::new();

  store.create(report_for("acme", None)).await.unwrap();
  tokio::time::sleep(Duration::from_millis(5)).await;
  store.create(report_for("globex", None)).await.unwrap();

  let listed = store.find_by_template("monthly-sales").await.unwrap();

  // No tenant filter on this operation; newest first across tenants
  assert_eq!(listed.len(), 2);
  assert_eq!(listed[0].company_id, "globex");
  assert_eq!(listed[1].company_id, "acme");
}

#[tokio::test]
async fn empty_embedding_on_create_counts_as_absent() {
  let store = MemoryReportStore::new();

  let created = store.create(report_for("acme", Some(vec![]))).await.unwrap();
  assert!(created.embedding.is_none());

  let results = store
    .find_similar(&[1.0, 0.0], "acme", 5)
    .await
    .unwrap();
  assert!(results.is_empty());
}
