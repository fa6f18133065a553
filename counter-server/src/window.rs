//! Date-window resolution
//!
//! A counting request is always scoped to a creation-date window: either a
//! literal fixed pair of timestamps, or a rolling "now minus N days" to
//! "now". Inbound query parameters can replace either bound.

use chrono::{DateTime, Duration, SecondsFormat, Utc};

const DEFAULT_WINDOW_DAYS: i64 = 14;

/// How the default window is derived
#[derive(Debug, Clone, PartialEq)]
pub enum WindowConfig {
    /// Literal RFC 3339 pair (env: CREATED_AT_MIN + CREATED_AT_MAX)
    Fixed { min: String, max: String },
    /// `now - days` to `now` (env: WINDOW_DAYS)
    Rolling { days: i64 },
}

impl WindowConfig {
    pub fn rolling(days: i64) -> Self {
        Self::Rolling { days }
    }

    /// Fixed pair wins only when both bounds are present.
    pub fn from_env() -> Self {
        let min = std::env::var("CREATED_AT_MIN").ok().filter(|s| !s.is_empty());
        let max = std::env::var("CREATED_AT_MAX").ok().filter(|s| !s.is_empty());
        match (min, max) {
            (Some(min), Some(max)) => Self::Fixed { min, max },
            _ => Self::Rolling {
                days: std::env::var("WINDOW_DAYS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_WINDOW_DAYS),
            },
        }
    }

    /// Resolve to concrete bounds as of `now`.
    pub fn resolve(&self, now: DateTime<Utc>) -> Window {
        match self {
            Self::Fixed { min, max } => Window {
                created_at_min: min.clone(),
                created_at_max: max.clone(),
            },
            Self::Rolling { days } => Window {
                created_at_min: (now - Duration::days(*days))
                    .to_rfc3339_opts(SecondsFormat::Secs, true),
                created_at_max: now.to_rfc3339_opts(SecondsFormat::Secs, true),
            },
        }
    }
}

/// Concrete window bounds, RFC 3339 strings at the wire level
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    pub created_at_min: String,
    pub created_at_max: String,
}

impl Window {
    /// Replace bounds with inbound overrides. Values pass through as given;
    /// malformed timestamps surface as mirrored upstream 4xx responses.
    pub fn apply_overrides(&mut self, min: Option<&str>, max: Option<&str>) {
        if let Some(min) = min {
            self.created_at_min = min.to_string();
        }
        if let Some(max) = max {
            self.created_at_max = max.to_string();
        }
    }
}
