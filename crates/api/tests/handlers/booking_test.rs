use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};

use crate::test_utils::{TestContext, PAST_DATE};

#[tokio::test]
async fn test_create_booking_success() {
    let ctx = TestContext::new();
    let operator_id = ctx.register_operator("Northside Clinic").await;

    let response = ctx
        .server
        .post("/slot_booking")
        .json(&json!({
            "operator_id": operator_id,
            "start_time": "09:00:00",
            "end_time": "10:00:00",
            "booking_date": PAST_DATE,
        }))
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["sCode"], 200);
    assert_eq!(body["message"], "Booking successfully created");
    assert_eq!(body["booking_id"].as_str().unwrap().len(), 24);
    assert_eq!(ctx.store.booking_count().await, 1);
}

#[tokio::test]
async fn test_create_booking_unknown_operator() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/slot_booking")
        .json(&json!({
            "operator_id": "123456789012345678901234",
            "start_time": "09:00:00",
            "end_time": "10:00:00",
            "booking_date": "2024-01-01",
        }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body = response.json::<Value>();
    assert_eq!(body["sCode"], 404);
    assert_eq!(body["message"], "Operator not registered");
}

#[rstest]
#[case("10:00:00", "10:30:00", 422)]
#[case("09:00:00", "11:00:00", 422)]
#[case("10:00:00", "09:00:00", 412)]
#[case("10:00:00", "10:00:00", 412)]
#[case("23:00:00", "00:00:00", 200)]
#[case("00:00:00", "01:00:00", 200)]
#[tokio::test]
async fn test_create_booking_window_rules(
    #[case] start: &str,
    #[case] end: &str,
    #[case] expected: u16,
) {
    let ctx = TestContext::new();
    let operator_id = ctx.register_operator("Window Rules Ltd").await;

    let response = ctx
        .server
        .post("/slot_booking")
        .json(&json!({
            "operator_id": operator_id,
            "start_time": start,
            "end_time": end,
            "booking_date": PAST_DATE,
        }))
        .await;

    assert_eq!(response.status_code().as_u16(), expected);
    assert_eq!(response.json::<Value>()["sCode"], expected);
}

#[tokio::test]
async fn test_create_booking_rejects_fractional_seconds() {
    let ctx = TestContext::new();
    let operator_id = ctx.register_operator("Half Second Late").await;

    let fractional = ctx
        .book(&operator_id, PAST_DATE, "09:00:00.5", "10:00:00.5")
        .await;
    assert_eq!(fractional["sCode"], 400);

    ctx.book_ok(&operator_id, PAST_DATE, "09:00:00", "10:00:00").await;

    assert_eq!(
        ctx.slots(&operator_id, PAST_DATE, true).await,
        vec!["09:00:00-10:00:00"]
    );
    assert_eq!(
        ctx.slots(&operator_id, PAST_DATE, false).await,
        vec!["00:00:00-09:00:00", "10:00:00-24:00:00"]
    );
    assert_eq!(ctx.store.booking_count().await, 1);
}

#[tokio::test]
async fn test_create_booking_twice_conflicts() {
    let ctx = TestContext::new();
    let operator_id = ctx.register_operator("Double Booker").await;

    ctx.book_ok(&operator_id, PAST_DATE, "14:00:00", "15:00:00").await;
    let second = ctx.book(&operator_id, PAST_DATE, "14:00:00", "15:00:00").await;

    assert_eq!(second["sCode"], 400);
    assert_eq!(
        second["message"],
        "Booking already exists, please select some other slot or date"
    );
    assert_eq!(ctx.store.booking_count().await, 1);
}

#[tokio::test]
async fn test_same_window_for_other_operator_or_date_is_free() {
    let ctx = TestContext::new();
    let first = ctx.register_operator("First Operator").await;
    let second = ctx.register_operator("Second Operator").await;

    ctx.book_ok(&first, PAST_DATE, "14:00:00", "15:00:00").await;
    ctx.book_ok(&second, PAST_DATE, "14:00:00", "15:00:00").await;
    ctx.book_ok(&first, "2024-01-02", "14:00:00", "15:00:00").await;

    assert_eq!(ctx.store.booking_count().await, 3);
}

#[tokio::test]
async fn test_cancelled_slot_can_be_rebooked() {
    let ctx = TestContext::new();
    let operator_id = ctx.register_operator("Rebook Studio").await;
    let booking_id = ctx.book_ok(&operator_id, PAST_DATE, "08:00:00", "09:00:00").await;

    ctx.server
        .delete(&format!("/cancel_booking/{booking_id}"))
        .await
        .assert_status_ok();

    ctx.book_ok(&operator_id, PAST_DATE, "08:00:00", "09:00:00").await;
}

#[rstest]
#[case(json!({ "start_time": "09:00:00", "end_time": "10:00:00", "booking_date": "2024-01-01" }))]
#[case(json!({ "operator_id": "1", "start_time": "9 o'clock", "end_time": "10:00:00", "booking_date": "2024-01-01" }))]
#[case(json!({ "operator_id": "1", "start_time": "09:00:00", "end_time": "10:00:00", "booking_date": "01/01/2024" }))]
#[case(json!({ "operator_id": "bad id!", "start_time": "09:00:00", "end_time": "10:00:00", "booking_date": "2024-01-01" }))]
#[tokio::test]
async fn test_create_booking_malformed_body(#[case] body: Value) {
    let ctx = TestContext::new();

    let response = ctx.server.post("/slot_booking").json(&body).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["sCode"], 400);
    assert!(!body["message"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_reschedule_booking_success() {
    let ctx = TestContext::new();
    let operator_id = ctx.register_operator("Mover & Co").await;
    let booking_id = ctx.book_ok(&operator_id, PAST_DATE, "09:00:00", "10:00:00").await;

    let response = ctx
        .server
        .patch("/slot_booking")
        .json(&json!({
            "booking_id": booking_id,
            "start_time": "23:00:00",
            "end_time": "00:00:00",
            "booking_date": "2024-01-02",
        }))
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["message"], "Booking rescheduled successfully");
    assert_eq!(body["booking"]["booking_id"], booking_id.as_str());
    assert_eq!(body["booking"]["operator_id"], operator_id.as_str());
    assert_eq!(body["booking"]["booking_date"], "2024-01-02");
    assert_eq!(body["booking"]["start_time"], "23:00:00");
    assert_eq!(body["booking"]["is_rescheduled"], true);
    assert_eq!(body["booking"]["status"], "booked");

    assert_eq!(
        ctx.slots(&operator_id, PAST_DATE, true).await,
        Vec::<String>::new()
    );
    assert_eq!(
        ctx.slots(&operator_id, "2024-01-02", true).await,
        vec!["23:00:00-00:00:00"]
    );
}

#[tokio::test]
async fn test_reschedule_unknown_booking() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .patch("/slot_booking")
        .json(&json!({
            "booking_id": "999",
            "start_time": "09:00:00",
            "end_time": "10:00:00",
            "booking_date": PAST_DATE,
        }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["message"], "Booking does not exist");
}

#[tokio::test]
async fn test_reschedule_cancelled_booking_is_not_found() {
    let ctx = TestContext::new();
    let operator_id = ctx.register_operator("Gone Away").await;
    let booking_id = ctx.book_ok(&operator_id, PAST_DATE, "09:00:00", "10:00:00").await;
    ctx.server
        .delete(&format!("/cancel_booking/{booking_id}"))
        .await
        .assert_status_ok();

    let response = ctx
        .server
        .patch("/slot_booking")
        .json(&json!({
            "booking_id": booking_id,
            "start_time": "11:00:00",
            "end_time": "12:00:00",
            "booking_date": PAST_DATE,
        }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reschedule_into_taken_slot_conflicts() {
    let ctx = TestContext::new();
    let operator_id = ctx.register_operator("Busy Bee").await;
    let booking_id = ctx.book_ok(&operator_id, PAST_DATE, "09:00:00", "10:00:00").await;
    ctx.book_ok(&operator_id, PAST_DATE, "11:00:00", "12:00:00").await;

    let response = ctx
        .server
        .patch("/slot_booking")
        .json(&json!({
            "booking_id": booking_id,
            "start_time": "11:00:00",
            "end_time": "12:00:00",
            "booking_date": PAST_DATE,
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["message"],
        "Please select some other slot or date"
    );
}

#[rstest]
#[case("11:00:00", "10:00:00", StatusCode::PRECONDITION_FAILED)]
#[case("11:00:00", "11:45:00", StatusCode::UNPROCESSABLE_ENTITY)]
#[tokio::test]
async fn test_reschedule_window_rules(
    #[case] start: &str,
    #[case] end: &str,
    #[case] expected: StatusCode,
) {
    let ctx = TestContext::new();
    let operator_id = ctx.register_operator("Strict Hours").await;
    let booking_id = ctx.book_ok(&operator_id, PAST_DATE, "09:00:00", "10:00:00").await;

    let response = ctx
        .server
        .patch("/slot_booking")
        .json(&json!({
            "booking_id": booking_id,
            "start_time": start,
            "end_time": end,
            "booking_date": PAST_DATE,
        }))
        .await;

    response.assert_status(expected);
}

#[tokio::test]
async fn test_cancel_booking_twice() {
    let ctx = TestContext::new();
    let operator_id = ctx.register_operator("Cancel Twice").await;
    let booking_id = ctx.book_ok(&operator_id, PAST_DATE, "09:00:00", "10:00:00").await;

    let first = ctx
        .server
        .delete(&format!("/cancel_booking/{booking_id}"))
        .await;
    first.assert_status_ok();
    assert_eq!(first.json::<Value>()["message"], "Booking cancelled successfully");

    let second = ctx
        .server
        .delete(&format!("/cancel_booking/{booking_id}"))
        .await;
    second.assert_status(StatusCode::PRECONDITION_FAILED);
    let body = second.json::<Value>();
    assert_eq!(body["sCode"], 412);
    assert_eq!(body["message"], "Booking already cancelled");
}

#[tokio::test]
async fn test_cancel_unknown_booking() {
    let ctx = TestContext::new();

    let response = ctx.server.delete("/cancel_booking/424242").await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["sCode"], 404);
}

#[tokio::test]
async fn test_cancel_with_invalid_id() {
    let ctx = TestContext::new();

    let response = ctx.server.delete("/cancel_booking/not%20an%20id").await;

    response.assert_status(StatusCode::BAD_REQUEST);
}
