use axum::http::StatusCode;
use fake::{faker::company::en::CompanyName, Fake};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};

use crate::test_utils::TestContext;

#[test_log::test(tokio::test)]
async fn test_add_operator_success() {
    let ctx = TestContext::new();
    let name: String = CompanyName().fake();

    let response = ctx
        .server
        .post("/operator/add")
        .json(&json!({ "name": name }))
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["sCode"], 200);
    assert_eq!(body["message"], "Operator successfully added");

    let operator_id = body["operator_id"].as_str().unwrap();
    assert_eq!(operator_id.len(), 24);
    assert!(operator_id.chars().all(|c| c.is_ascii_digit()));
}

#[test_log::test(tokio::test)]
async fn test_add_operator_generates_distinct_ids() {
    let ctx = TestContext::new();

    let first = ctx.register_operator("Alpha Rentals").await;
    let second = ctx.register_operator("Beta Rentals").await;

    assert_ne!(first, second);
}

#[rstest]
#[case("Harbor Tours")]
#[case("  Harbor Tours  ")]
#[tokio::test]
async fn test_add_operator_duplicate_name(#[case] duplicate: &str) {
    let ctx = TestContext::new();
    ctx.register_operator("Harbor Tours").await;

    let response = ctx
        .server
        .post("/operator/add")
        .json(&json!({ "name": duplicate }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["sCode"], 400);
    assert_eq!(body["message"], "Operator already exists");
}

#[rstest]
#[case(json!({ "name": "" }))]
#[case(json!({ "name": "    " }))]
#[case(json!({ "name": "x".repeat(226) }))]
#[case(json!({ "title": "No Name Field" }))]
#[case(json!({ "name": 42 }))]
#[tokio::test]
async fn test_add_operator_invalid_payload(#[case] payload: Value) {
    let ctx = TestContext::new();

    let response = ctx.server.post("/operator/add").json(&payload).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["sCode"], 400);
}

#[tokio::test]
async fn test_health_and_version() {
    let ctx = TestContext::new();

    let health = ctx.server.get("/health").await;
    health.assert_status_ok();
    assert_eq!(health.json::<Value>()["sCode"], 200);

    let version = ctx.server.get("/version").await;
    version.assert_status_ok();
    assert_eq!(
        version.json::<Value>()["version"],
        env!("CARGO_PKG_VERSION")
    );
}
