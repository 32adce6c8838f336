//! # Booking Handlers
//!
//! HTTP entry points for the booking lifecycle. Each handler unpacks its
//! extractor (turning rejections into 400 responses), delegates to
//! [`crate::service::BookingService`], and wraps the result in the
//! standard response envelope.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use slotbook_core::models::{
    booking::{
        CreateBookingRequest, CreateBookingResponse, RescheduleBookingRequest,
        RescheduleBookingResponse, ViewSlotsQuery, ViewSlotsResponse,
    },
    ids::BookingId,
    response::{ApiResponse, NoData},
};
use std::sync::Arc;

use crate::{middleware::error_handling::AppError, ApiState};

/// `POST /slot_booking`
#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<CreateBookingRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<CreateBookingResponse>>, AppError> {
    let Json(payload) = payload?;

    let booking_id = state
        .service
        .create_booking(
            &payload.operator_id,
            payload.booking_date,
            payload.start_time,
            payload.end_time,
        )
        .await?;

    Ok(Json(ApiResponse::ok(
        "Booking successfully created",
        CreateBookingResponse { booking_id },
    )))
}

/// `PATCH /slot_booking`
#[axum::debug_handler]
pub async fn reschedule_booking(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<RescheduleBookingRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<RescheduleBookingResponse>>, AppError> {
    let Json(payload) = payload?;

    let booking = state
        .service
        .reschedule_booking(
            &payload.booking_id,
            payload.booking_date,
            payload.start_time,
            payload.end_time,
        )
        .await?;

    Ok(Json(ApiResponse::ok(
        "Booking rescheduled successfully",
        RescheduleBookingResponse { booking },
    )))
}

/// `GET /slot_booking?operator_id=..&booking_date=..&view_booked_slots=..`
#[axum::debug_handler]
pub async fn view_slots(
    State(state): State<Arc<ApiState>>,
    query: Result<Query<ViewSlotsQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<ViewSlotsResponse>>, AppError> {
    let Query(query) = query?;

    let view = state
        .service
        .view_slots(&query.operator_id, query.booking_date, query.view_booked_slots)
        .await?;

    let message = format!("Bookings for {} for {}", view.booking_date, query.operator_id);
    Ok(Json(ApiResponse::ok(message, view)))
}

/// `DELETE /cancel_booking/:booking_id`
#[axum::debug_handler]
pub async fn cancel_booking(
    State(state): State<Arc<ApiState>>,
    booking_id: Result<Path<BookingId>, PathRejection>,
) -> Result<Json<ApiResponse<NoData>>, AppError> {
    let Path(booking_id) = booking_id?;

    state.service.cancel_booking(&booking_id).await?;

    Ok(Json(ApiResponse::ok(
        "Booking cancelled successfully",
        NoData::default(),
    )))
}
