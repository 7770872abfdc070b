//! REST API for contacts

pub mod requester;

use std::net::SocketAddr;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;

use self::requester::RequesterId;
use crate::domain::contact::{Contact, ContactId, ContactPayload};
use crate::domain::service::{ContactService, Deleted};
use crate::errors::AppError;

#[derive(Clone)]
pub struct ApiState {
    pub contacts: ContactService,
}

/// Create the REST API router
pub fn create_router(contacts: ContactService) -> Router {
    Router::new()
        .route("/api/contacts", post(create_contact))
        .route("/api/contacts/:id", put(update_contact).delete(delete_contact))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(ApiState { contacts })
}

/// Serve `app` on `addr` until Ctrl-C.
pub async fn serve(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Starting HTTP server on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

// Generated ids start at 1, so 0 matches no row
fn parse_contact_id(raw: &str) -> ContactId {
    raw.parse().unwrap_or(0)
}

fn payload_or_empty(payload: Result<Json<ContactPayload>, JsonRejection>) -> ContactPayload {
    match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            tracing::debug!("Unreadable contact body: {}", rejection);
            ContactPayload::default()
        }
    }
}

async fn create_contact(
    State(state): State<ApiState>,
    RequesterId(requester): RequesterId,
    payload: Result<Json<ContactPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Contact>), AppError> {
    let contact = state
        .contacts
        .create_contact(requester, payload_or_empty(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(contact)))
}

async fn update_contact(
    State(state): State<ApiState>,
    RequesterId(requester): RequesterId,
    Path(id): Path<String>,
    payload: Result<Json<ContactPayload>, JsonRejection>,
) -> Result<Json<Contact>, AppError> {
    let contact = state
        .contacts
        .update_contact(requester, parse_contact_id(&id), payload_or_empty(payload))
        .await?;

    Ok(Json(contact))
}

async fn delete_contact(
    State(state): State<ApiState>,
    RequesterId(requester): RequesterId,
    Path(id): Path<String>,
) -> Result<Json<Deleted>, AppError> {
    let deleted = state
        .contacts
        .delete_contact(requester, parse_contact_id(&id))
        .await?;

    Ok(Json(deleted))
}

async fn health_check(State(state): State<ApiState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "rolodex-api",
        "storage": state.contacts.store().get_medium(),
    }))
}
