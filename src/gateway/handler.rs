//! HTTP handlers for the user API.
//!
//! Routes:
//! - `GET /api/user/{id}` - fetch a user
//! - `POST /api/user` - create a user from `{name, gender}`
//! - `GET /healthz` - liveness

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use mall_client::proto::{IdRequest, UserRequest, UserResponse};
use mall_client::ClientError;
use serde::{Deserialize, Serialize};
use tonic::Code;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use super::errmsg;
use super::svc::GatewayContext;
use crate::error::Error;

/// JSON view of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserReply {
    pub id: String,
    pub name: String,
    pub gender: String,
}

impl From<UserResponse> for UserReply {
    fn from(r: UserResponse) -> Self {
        Self {
            id: r.id,
            name: r.name,
            gender: r.gender,
        }
    }
}

/// Body of `POST /api/user`.
#[derive(Debug, Deserialize)]
pub struct SaveUserBody {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub gender: String,
}

/// Error body: `{code, message}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: u16,
    pub message: String,
}

/// A failed gateway request, rendered as a sanitized JSON error.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        ApiError(Error::Transport(err))
    }
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match &self.0 {
            Error::Validation { reason } => (StatusCode::BAD_REQUEST, reason.clone()),
            Error::Transport(e) if e.is_deadline_exceeded() => {
                (StatusCode::GATEWAY_TIMEOUT, errmsg::DEADLINE_EXCEEDED.to_string())
            }
            Error::Transport(e) if e.is_connection_error() => (
                StatusCode::SERVICE_UNAVAILABLE,
                errmsg::SERVICE_UNAVAILABLE.to_string(),
            ),
            Error::Transport(e) => match e.code() {
                Some(Code::InvalidArgument) => (StatusCode::BAD_REQUEST, e.message()),
                Some(Code::NotFound) => (StatusCode::NOT_FOUND, e.message()),
                Some(Code::FailedPrecondition) => {
                    (StatusCode::CONFLICT, errmsg::CONFLICT.to_string())
                }
                Some(Code::Unimplemented) => {
                    (StatusCode::NOT_IMPLEMENTED, errmsg::INTERNAL_ERROR.to_string())
                }
                _ => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    errmsg::INTERNAL_ERROR.to_string(),
                ),
            },
            Error::Storage(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                errmsg::INTERNAL_ERROR.to_string(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            warn!(status = status.as_u16(), error = %self.0, "Request failed");
        } else {
            debug!(status = status.as_u16(), error = %self.0, "Request rejected");
        }

        let body = ErrorBody {
            code: status.as_u16(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

/// Routes user API requests to the user RPC service.
pub struct UserHandler {
    ctx: Arc<GatewayContext>,
}

impl UserHandler {
    pub fn new(ctx: Arc<GatewayContext>) -> Self {
        Self { ctx }
    }

    /// Build the axum router (separated for testing).
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .route("/api/user/{id}", get(get_user))
            .route("/api/user", post(save_user))
            .route("/healthz", get(health))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .with_state(Arc::clone(&self.ctx))
    }
}

// ============================================================================
// Handlers
// ============================================================================

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn get_user(
    State(ctx): State<Arc<GatewayContext>>,
    Path(id): Path<String>,
) -> Result<Json<UserReply>, ApiError> {
    let response = ctx.user_rpc.get_user(IdRequest { id }).await?;
    Ok(Json(response.into()))
}

async fn save_user(
    State(ctx): State<Arc<GatewayContext>>,
    body: Result<Json<SaveUserBody>, JsonRejection>,
) -> Result<Json<UserReply>, ApiError> {
    let Json(body) = body.map_err(|e| {
        debug!(error = %e, "Rejected request body");
        Error::validation(errmsg::MALFORMED_BODY)
    })?;
    if body.name.is_empty() {
        return Err(Error::validation(errmsg::NAME_REQUIRED).into());
    }

    let response = ctx
        .user_rpc
        .save_user(UserRequest {
            name: body.name,
            gender: body.gender,
        })
        .await?;
    Ok(Json(response.into()))
}
