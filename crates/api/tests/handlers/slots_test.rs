use axum::http::StatusCode;
use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::Value;

use crate::test_utils::{TestContext, PAST_DATE};

#[tokio::test]
async fn test_free_slots_without_bookings() {
    let ctx = TestContext::new();
    let operator_id = ctx.register_operator("Idle Operator").await;

    assert_eq!(
        ctx.slots(&operator_id, PAST_DATE, false).await,
        vec!["00:00:00-24:00:00"]
    );
    assert_eq!(
        ctx.slots(&operator_id, PAST_DATE, true).await,
        Vec::<String>::new()
    );
}

#[tokio::test]
async fn test_free_slots_around_a_booking() {
    let ctx = TestContext::new();
    let operator_id = ctx.register_operator("Morning Shift").await;
    ctx.book_ok(&operator_id, PAST_DATE, "09:00:00", "10:00:00").await;

    assert_eq!(
        ctx.slots(&operator_id, PAST_DATE, false).await,
        vec!["00:00:00-09:00:00", "10:00:00-24:00:00"]
    );
    assert_eq!(
        ctx.slots(&operator_id, PAST_DATE, true).await,
        vec!["09:00:00-10:00:00"]
    );
}

#[tokio::test]
async fn test_booked_slots_are_ordered_by_start() {
    let ctx = TestContext::new();
    let operator_id = ctx.register_operator("Ordered Bookings").await;
    ctx.book_ok(&operator_id, PAST_DATE, "23:00:00", "00:00:00").await;
    ctx.book_ok(&operator_id, PAST_DATE, "00:00:00", "01:00:00").await;
    ctx.book_ok(&operator_id, PAST_DATE, "12:00:00", "13:00:00").await;

    assert_eq!(
        ctx.slots(&operator_id, PAST_DATE, true).await,
        vec![
            "00:00:00-01:00:00",
            "12:00:00-13:00:00",
            "23:00:00-00:00:00",
        ]
    );
    assert_eq!(
        ctx.slots(&operator_id, PAST_DATE, false).await,
        vec!["01:00:00-12:00:00", "13:00:00-23:00:00"]
    );
}

#[tokio::test]
async fn test_unaligned_booking_blocks_overlapping_slots() {
    let ctx = TestContext::new();
    let operator_id = ctx.register_operator("Half Past").await;
    ctx.book_ok(&operator_id, PAST_DATE, "09:30:00", "10:30:00").await;

    assert_eq!(
        ctx.slots(&operator_id, PAST_DATE, false).await,
        vec!["00:00:00-09:00:00", "11:00:00-24:00:00"]
    );
}

#[tokio::test]
async fn test_cancelled_bookings_do_not_occupy_slots() {
    let ctx = TestContext::new();
    let operator_id = ctx.register_operator("Freed Up").await;
    let booking_id = ctx.book_ok(&operator_id, PAST_DATE, "09:00:00", "10:00:00").await;
    ctx.server
        .delete(&format!("/cancel_booking/{booking_id}"))
        .await
        .assert_status_ok();

    assert_eq!(
        ctx.slots(&operator_id, PAST_DATE, false).await,
        vec!["00:00:00-24:00:00"]
    );
}

#[tokio::test]
async fn test_view_slots_is_idempotent() {
    let ctx = TestContext::new();
    let operator_id = ctx.register_operator("Repeat Viewer").await;
    ctx.book_ok(&operator_id, PAST_DATE, "15:00:00", "16:00:00").await;

    let first = ctx.slots(&operator_id, PAST_DATE, false).await;
    let second = ctx.slots(&operator_id, PAST_DATE, false).await;

    assert_eq!(first, second);
    assert_eq!(ctx.store.booking_count().await, 1);
}

#[tokio::test]
async fn test_view_slots_envelope() {
    let ctx = TestContext::new();
    let operator_id = ctx.register_operator("Envelope Check").await;

    let response = ctx
        .server
        .get("/slot_booking")
        .add_query_param("operator_id", &operator_id)
        .add_query_param("booking_date", PAST_DATE)
        .add_query_param("view_booked_slots", false)
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["sCode"], 200);
    assert_eq!(
        body["message"],
        format!("Bookings for {PAST_DATE} for {operator_id}")
    );
    assert_eq!(body["booking_date"], PAST_DATE);
}

#[tokio::test]
async fn test_view_slots_defaults_to_today() {
    let ctx = TestContext::new();
    let operator_id = ctx.register_operator("Today Only").await;

    let response = ctx
        .server
        .get("/slot_booking")
        .add_query_param("operator_id", &operator_id)
        .add_query_param("view_booked_slots", false)
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    let today = Utc::now().date_naive().to_string();
    assert_eq!(body["booking_date"], today.as_str());
}

#[tokio::test]
async fn test_view_slots_future_date() {
    let ctx = TestContext::new();
    let operator_id = ctx.register_operator("Time Traveller").await;
    let tomorrow = (Utc::now().date_naive() + Duration::days(2)).to_string();

    let response = ctx
        .server
        .get("/slot_booking")
        .add_query_param("operator_id", &operator_id)
        .add_query_param("booking_date", &tomorrow)
        .add_query_param("view_booked_slots", false)
        .await;

    response.assert_status(StatusCode::PRECONDITION_FAILED);
    let body = response.json::<Value>();
    assert_eq!(body["sCode"], 412);
    assert_eq!(body["message"], "Future date not allowed");
}

#[tokio::test]
async fn test_view_slots_unknown_operator() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get("/slot_booking")
        .add_query_param("operator_id", "31337")
        .add_query_param("booking_date", PAST_DATE)
        .add_query_param("view_booked_slots", true)
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["message"], "Operator not registered");
}

#[tokio::test]
async fn test_view_slots_missing_parameters() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get("/slot_booking")
        .add_query_param("booking_date", PAST_DATE)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["sCode"], 400);
}

#[rstest]
#[case("True", vec!["09:00:00-10:00:00"])]
#[case("1", vec!["09:00:00-10:00:00"])]
#[case("0", vec!["00:00:00-09:00:00", "10:00:00-24:00:00"])]
#[case("False", vec!["00:00:00-09:00:00", "10:00:00-24:00:00"])]
#[tokio::test]
async fn test_view_booked_slots_flag_spellings(#[case] flag: &str, #[case] expected: Vec<&str>) {
    let ctx = TestContext::new();
    let operator_id = ctx.register_operator("Flag Reader").await;
    ctx.book_ok(&operator_id, PAST_DATE, "09:00:00", "10:00:00").await;

    let response = ctx
        .server
        .get("/slot_booking")
        .add_query_param("operator_id", &operator_id)
        .add_query_param("booking_date", PAST_DATE)
        .add_query_param("view_booked_slots", flag)
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["slots"], serde_json::json!(expected));
}

#[tokio::test]
async fn test_view_booked_slots_unknown_flag() {
    let ctx = TestContext::new();
    let operator_id = ctx.register_operator("Flag Confusion").await;

    let response = ctx
        .server
        .get("/slot_booking")
        .add_query_param("operator_id", &operator_id)
        .add_query_param("view_booked_slots", "sometimes")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}
