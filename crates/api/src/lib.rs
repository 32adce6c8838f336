//! # Slotbook API
//!
//! The API crate provides the web server for the Slotbook booking service.
//! Operators are registered once and then take hour-long bookings that can
//! be rescheduled, cancelled, and listed per day.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Unpack requests and shape responses
//! - **Service**: Booking rules and lifecycle, over the repository traits
//! - **Middleware**: Error-to-response mapping
//! - **Config**: Handle environment and application configuration
//!
//! The API uses Axum as the web framework and SQLx for database interactions.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Error mapping shared by all handlers
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;
/// Booking rules and lifecycle
pub mod service;

use std::{sync::Arc, time::Duration};

use axum::{
    error_handling::HandleErrorLayer,
    http::{header, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    BoxError, Json, Router,
};
use eyre::Result;
use serde_json::json;
use slotbook_db::repositories::{
    BookingRepository, OperatorRepository, PgBookingRepository, PgOperatorRepository,
};
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

use crate::service::BookingService;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Booking rules over the configured repositories
    pub service: BookingService,
}

impl ApiState {
    /// State backed by PostgreSQL repositories sharing one pool.
    pub fn from_pool(db_pool: PgPool) -> Self {
        Self::with_repositories(
            Arc::new(PgOperatorRepository::new(db_pool.clone())),
            Arc::new(PgBookingRepository::new(db_pool)),
        )
    }

    /// State over arbitrary repository implementations.
    pub fn with_repositories(
        operators: Arc<dyn OperatorRepository>,
        bookings: Arc<dyn BookingRepository>,
    ) -> Self {
        Self {
            service: BookingService::new(operators, bookings),
        }
    }
}

/// Builds the application router with all routes attached to `state`.
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Operator registration endpoints
        .merge(routes::operator::routes())
        // Booking and slot endpoints
        .merge(routes::booking::routes())
        // Attach shared state to all routes
        .with_state(state)
}

async fn handle_middleware_error(err: BoxError) -> impl IntoResponse {
    let status = if err.is::<tower::timeout::error::Elapsed>() {
        StatusCode::REQUEST_TIMEOUT
    } else {
        tracing::error!("Unhandled middleware error: {}", err);
        StatusCode::INTERNAL_SERVER_ERROR
    };

    let message = if status == StatusCode::REQUEST_TIMEOUT {
        "Request timed out"
    } else {
        "Internal server error"
    };

    (
        status,
        Json(json!({ "sCode": status.as_u16(), "message": message })),
    )
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(origins)
}

/// Starts the API server with the provided configuration and database connection
///
/// Installs the tracing subscriber, wires the routes with CORS, tracing and
/// timeout layers, and serves until the listener fails.
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState::from_pool(db_pool));
    let app = app(state);

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)),
        None => app,
    };

    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(HandleErrorLayer::new(handle_middleware_error))
            .timeout(Duration::from_secs(config.request_timeout)),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
