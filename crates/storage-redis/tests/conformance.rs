//! Runs the shared note backend conformance suite against `RedisBackend`
//! over an in-process `FakeRedis`.

#![allow(clippy::expect_used)]

use std::sync::Arc;

use note_api_storage::conformance;
use note_api_storage_redis::{testutil::fake_backend, RedisBackend};

fn backend() -> RedisBackend {
    fake_backend("notes:").1
}

#[tokio::test]
async fn crud_get_missing_is_not_found() {
    conformance::crud_get_missing_is_not_found(&backend()).await;
}

#[tokio::test]
async fn crud_set_then_get_returns_note() {
    conformance::crud_set_then_get_returns_note(&backend()).await;
}

#[tokio::test]
async fn crud_all_fields_round_trip() {
    conformance::crud_all_fields_round_trip(&backend()).await;
}

#[tokio::test]
async fn crud_set_overwrites_existing() {
    conformance::crud_set_overwrites_existing(&backend()).await;
}

#[tokio::test]
async fn crud_set_is_idempotent() {
    conformance::crud_set_is_idempotent(&backend()).await;
}

#[tokio::test]
async fn crud_unusual_ids_round_trip() {
    conformance::crud_unusual_ids_round_trip(&backend()).await;
}

#[tokio::test]
async fn crud_large_note_round_trip() {
    conformance::crud_large_note_round_trip(&backend()).await;
}

#[tokio::test]
async fn keys_empty_on_fresh_backend() {
    conformance::keys_empty_on_fresh_backend(&backend()).await;
}

#[tokio::test]
async fn keys_returns_exactly_stored_ids() {
    conformance::keys_returns_exactly_stored_ids(&backend()).await;
}

#[tokio::test]
async fn keys_have_no_duplicates() {
    conformance::keys_have_no_duplicates(&backend()).await;
}

#[tokio::test]
async fn list_follows_keys_order() {
    conformance::list_follows_keys_order(&backend()).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_sets_to_different_ids() {
    conformance::concurrent_sets_to_different_ids(Arc::new(backend())).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_reads_return_consistent_note() {
    conformance::concurrent_reads_return_consistent_note(Arc::new(backend())).await;
}

#[tokio::test]
async fn run_all_with_prefix() {
    conformance::run_all(Arc::new(backend())).await;
}

#[tokio::test]
async fn run_all_without_prefix() {
    conformance::run_all(Arc::new(fake_backend("").1)).await;
}
