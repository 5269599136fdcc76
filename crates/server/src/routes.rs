//! HTTP routes for the car recommendation chat API.
//!
//! JSON endpoints:
//! - `GET  /`     — welcome payload
//! - `POST /chat` — run one chat message through the recommendation pipeline
//!
//! Unknown paths fall through to a JSON `404`. `/chat` is rate limited per
//! client key before any input validation runs.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use showroom_chat::ChatRuntime;
use tracing::{error, info};
use uuid::Uuid;

use crate::limiter::{RateDecision, RateLimiter};

const WELCOME_MESSAGE: &str = "Welcome to the Car Recommendation Chatbot API";
const MESSAGE_REQUIRED_ERROR: &str = "Invalid request. 'message' field is required.";
const MESSAGE_INVALID_ERROR: &str =
    "Invalid input. Message must be a string no longer than 500 characters.";
const RATE_LIMITED_ERROR: &str = "Too many requests. Please try again later.";
const NOT_FOUND_ERROR: &str = "Not found";
const INTERNAL_ERROR: &str = "Internal server error";

/// Message length cap, counted in characters rather than bytes.
const MAX_MESSAGE_CHARS: usize = 500;

#[derive(Clone)]
pub struct ChatState {
    runtime: ChatRuntime,
    limiter: RateLimiter,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WelcomeResponse {
    pub message: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn router(runtime: ChatRuntime, limiter: RateLimiter) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/chat", post(chat))
        .fallback(not_found)
        .with_state(ChatState { runtime, limiter })
}

async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse { message: WELCOME_MESSAGE })
}

async fn not_found() -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::NOT_FOUND, Json(ErrorResponse { error: NOT_FOUND_ERROR.to_string() }))
}

async fn chat(
    State(state): State<ChatState>,
    headers: HeaderMap,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let client = client_key(&headers);
    if let RateDecision::Limited { retry_after_secs } = state.limiter.check(&client).await {
        return (
            StatusCode::TOO_MANY_REQUESTS,
            [(header::RETRY_AFTER, retry_after_secs.to_string())],
            Json(ErrorResponse { error: RATE_LIMITED_ERROR.to_string() }),
        )
            .into_response();
    }

    let Ok(Json(payload)) = payload else {
        return bad_request(MESSAGE_REQUIRED_ERROR);
    };
    let Some(message_value) = payload.get("message") else {
        return bad_request(MESSAGE_REQUIRED_ERROR);
    };
    let Some(message) = message_value.as_str() else {
        return bad_request(MESSAGE_INVALID_ERROR);
    };
    if message.chars().count() > MAX_MESSAGE_CHARS {
        return bad_request(MESSAGE_INVALID_ERROR);
    }

    let correlation_id = correlation_id();
    info!(
        event_name = "chat.request.received",
        correlation_id = %correlation_id,
        message_chars = message.chars().count(),
        "chat message accepted"
    );

    match state.runtime.handle_message(message).await {
        Ok(reply) => {
            info!(
                event_name = "chat.request.completed",
                correlation_id = %correlation_id,
                reply_chars = reply.chars().count(),
                "chat reply rendered"
            );
            Json(ChatResponse { response: reply }).into_response()
        }
        Err(failure) => {
            let interface = failure.into_interface(correlation_id.clone());
            error!(
                event_name = "chat.request.failed",
                correlation_id = %correlation_id,
                error = %interface,
                "chat pipeline failed"
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse { error: INTERNAL_ERROR.to_string() }),
            )
                .into_response()
        }
    }
}

/// First `x-forwarded-for` hop when present; otherwise every caller shares
/// one anonymous bucket.
fn client_key(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .unwrap_or("anonymous")
        .to_string()
}

fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: message.to_string() })).into_response()
}

fn correlation_id() -> String {
    Uuid::new_v4().simple().to_string()
}
