//! Tagged result of a best-effort operation.

use serde::Serialize;

/// Either the real result, or the documented fallback plus the reason it was used.
///
/// `value()` always yields something usable, so callers that only want the old
/// "safe default" behavior can ignore the tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome<T> {
    Success {
        result: T,
    },
    Degraded {
        result: T,
        cause: String,
    },
}

impl<T> Outcome<T> {
    pub fn success(result: T) -> Self {
        Outcome::Success { result }
    }

    pub fn degraded(fallback: T, cause: impl Into<String>) -> Self {
        Outcome::Degraded {
            result: fallback,
            cause: cause.into(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Outcome::Degraded { .. })
    }

    pub fn value(&self) -> &T {
        match self {
            Outcome::Success { result } | Outcome::Degraded { result, .. } => result,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Outcome::Success { result } | Outcome::Degraded { result, .. } => result,
        }
    }

    pub fn cause(&self) -> Option<&str> {
        match self {
            Outcome::Success { .. } => None,
            Outcome::Degraded { cause, .. } => Some(cause),
        }
    }
}
