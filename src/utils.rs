// src/utils.rs
use chrono::{Local, Utc};
use reqwest::StatusCode;
use std::fmt;

#[derive(Debug)]
pub enum FetchError {
    Transport(reqwest::Error),
    Status(StatusCode),
    Decode(serde_json::Error),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) if e.is_timeout() => write!(f, "Upstream timed out: {}", e),
            Self::Transport(e) => write!(f, "Upstream request failed: {}", e),
            Self::Status(status) => write!(f, "Upstream returned {}", status),
            Self::Decode(e) => write!(f, "Upstream sent invalid JSON: {}", e),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(e) => Some(e),
            Self::Status(_) => None,
            Self::Decode(e) => Some(e),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e)
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e)
    }
}

/// Wall-clock time of day in the `3:04:05 PM` form browsers print.
pub fn local_time_string() -> String {
    Local::now().format("%-I:%M:%S %p").to_string()
}

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
