use axum::{
    routing::{delete, get},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/slot_booking",
            get(handlers::booking::view_slots)
                .post(handlers::booking::create_booking)
                .patch(handlers::booking::reschedule_booking),
        )
        .route(
            "/cancel_booking/:booking_id",
            delete(handlers::booking::cancel_booking),
        )
}
