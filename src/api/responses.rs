//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::TimerState;
use crate::utils::duration::format_clock;

/// Request body for POST /timer/set: independent minutes/seconds fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetTimeRequest {
    #[serde(default)]
    pub minutes: i64,
    #[serde(default)]
    pub seconds: i64,
}

/// Request body for POST /timer/dial: a raw rotary dial value in seconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialRequest {
    pub seconds: i64,
}

/// API response structure for timer action endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerState,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, timer: TimerState) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            timer,
        }
    }

    /// Create an ok response
    pub fn ok(message: String, timer: TimerState) -> Self {
        Self::new("ok".to_string(), message, timer)
    }

    /// Create an error response
    pub fn error(message: String, timer: TimerState) -> Self {
        Self::new("error".to_string(), message, timer)
    }
}

/// Full status response with timer and reminder information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerState,
    /// Remaining time formatted as m:ss
    pub display: String,
    /// True while a completed countdown awaits acknowledgment
    pub needs_response: bool,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

impl StatusResponse {
    pub fn build(
        timer: TimerState,
        needs_response: bool,
        uptime: String,
        port: u16,
        host: String,
        last_action: Option<String>,
        last_action_time: Option<DateTime<Utc>>,
    ) -> Self {
        let display = format_clock(timer.time_left);
        Self {
            timer,
            display,
            needs_response,
            uptime,
            port,
            host,
            last_action,
            last_action_time,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
