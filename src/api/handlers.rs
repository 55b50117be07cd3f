//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Json};
use tracing::{error, info};

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::duration::{compose, describe, snap_dial};
use crate::worker::WorkerMessage;

use super::responses::{
    ApiResponse, DialRequest, HealthResponse, SetTimeRequest, StatusResponse,
};

/// Map a state operation result into an HTTP response.
///
/// Invalid durations come back as a 400 with the transient user-facing
/// message; lock failures are a 500.
fn respond(
    result: Result<crate::state::TimerState, AppError>,
    message: impl FnOnce(&crate::state::TimerState) -> String,
    state: &AppState,
) -> Result<Json<ApiResponse>, (StatusCode, Json<ApiResponse>)> {
    match result {
        Ok(timer) => {
            let msg = message(&timer);
            Ok(Json(ApiResponse::ok(msg, timer)))
        }
        Err(e @ AppError::InvalidDuration(_)) => {
            let timer = state.timer_snapshot().unwrap_or_default();
            Err((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(e.to_string(), timer)),
            ))
        }
        Err(e) => {
            error!("State operation failed: {}", e);
            let timer = state.timer_snapshot().unwrap_or_default();
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(e.to_string(), timer)),
            ))
        }
    }
}

/// Handle POST /timer/set - configure the countdown from minutes/seconds
/// fields. Direct field entry never snaps.
pub async fn set_time_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SetTimeRequest>,
) -> Result<Json<ApiResponse>, (StatusCode, Json<ApiResponse>)> {
    let total = compose(body.minutes, body.seconds);
    respond(
        state.set_time(total),
        |timer| format!("Timer set for {}.", describe(timer.start_time)),
        &state,
    )
}

/// Handle POST /timer/dial - configure the countdown from a raw rotary
/// dial value, which is clamped and snapped to 5-minute boundaries
pub async fn dial_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<DialRequest>,
) -> Result<Json<ApiResponse>, (StatusCode, Json<ApiResponse>)> {
    let snapped = snap_dial(body.seconds);
    info!("Dial value {} encoded as {} seconds", body.seconds, snapped);
    respond(
        state.set_time(snapped),
        |timer| format!("Timer set for {}.", describe(timer.start_time)),
        &state,
    )
}

/// Handle POST /timer/start - begin the countdown
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, (StatusCode, Json<ApiResponse>)> {
    respond(
        state.start_timer(),
        |timer| {
            if timer.is_running() {
                "Countdown started.".to_string()
            } else {
                "No time set, countdown not started.".to_string()
            }
        },
        &state,
    )
}

/// Handle POST /timer/pause - suspend the countdown
pub async fn pause_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, (StatusCode, Json<ApiResponse>)> {
    respond(
        state.pause_timer(),
        |_| "Countdown paused.".to_string(),
        &state,
    )
}

/// Handle POST /timer/resume - resume a paused countdown
pub async fn resume_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, (StatusCode, Json<ApiResponse>)> {
    respond(
        state.resume_timer(),
        |_| "Countdown resumed.".to_string(),
        &state,
    )
}

/// Handle POST /timer/reset - restore the configured duration
pub async fn reset_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, (StatusCode, Json<ApiResponse>)> {
    respond(
        state.reset_timer(),
        |_| "Countdown reset.".to_string(),
        &state,
    )
}

/// Handle POST /timer/new - discard progress and wait for a fresh
/// configuration
pub async fn new_timer_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, (StatusCode, Json<ApiResponse>)> {
    respond(
        state.new_timer(),
        |_| "Timer stopped, set a new time.".to_string(),
        &state,
    )
}

/// Handle POST /respond - user acknowledges the completed laundry.
///
/// Clears the response flag; the coordinator task translates that into a
/// stop message for the reminder worker and a forced timer reset.
pub async fn respond_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, (StatusCode, Json<ApiResponse>)> {
    state.acknowledge();
    let timer = state.timer_snapshot().unwrap_or_default();
    info!("Respond endpoint called - reminders will stop");
    Ok(Json(ApiResponse::ok(
        "Thank you for responding!".to_string(),
        timer,
    )))
}

/// Handle POST /notify/test - fire a one-off test notification through
/// the reminder worker
pub async fn test_notification_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, (StatusCode, Json<ApiResponse>)> {
    info!("Initiating a test notification");
    state.post_worker(WorkerMessage::Test);
    let timer = state.timer_snapshot().unwrap_or_default();
    Ok(Json(ApiResponse::ok(
        "Test notification requested.".to_string(),
        timer,
    )))
}

/// Handle GET /status - return the current timer and reminder status
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.timer_snapshot() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse::build(
        timer,
        state.needs_response(),
        state.get_uptime(),
        state.port,
        state.host.clone(),
        last_action,
        last_action_time,
    )))
}

/// Handle GET /health - health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
