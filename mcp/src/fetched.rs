//! Live-or-degraded results

use serde::Serialize;

/// Outcome of a call that may fall back to synthesized data.
///
/// Degraded data must never be mistaken for authoritative data, so the
/// payload is only reachable through [`Fetched::live`] (live only) or the
/// explicit [`Fetched::into_parts`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum Fetched<T> {
    /// Returned by the backend
    Live { data: T },

    /// Synthesized locally because the backend call failed
    Degraded { data: T, reason: String },
}

impl<T> Fetched<T> {
    pub fn live_data(data: T) -> Self {
        Fetched::Live { data }
    }

    pub fn degraded(data: T, reason: impl Into<String>) -> Self {
        Fetched::Degraded {
            data,
            reason: reason.into(),
        }
    }

    /// Whether the data was synthesized
    pub fn is_mock(&self) -> bool {
        matches!(self, Fetched::Degraded { .. })
    }

    /// Why the live call was abandoned
    pub fn reason(&self) -> Option<&str> {
        match self {
            Fetched::Live { .. } => None,
            Fetched::Degraded { reason, .. } => Some(reason),
        }
    }

    /// The data if it came from the backend
    pub fn live(self) -> Option<T> {
        match self {
            Fetched::Live { data } => Some(data),
            Fetched::Degraded { .. } => None,
        }
    }

    /// Explicitly accept either kind: the data plus the degradation reason
    pub fn into_parts(self) -> (T, Option<String>) {
        match self {
            Fetched::Live { data } => (data, None),
            Fetched::Degraded { data, reason } => (data, Some(reason)),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Fetched<U> {
        match self {
            Fetched::Live { data } => Fetched::Live { data: f(data) },
            Fetched::Degraded { data, reason } => Fetched::Degraded {
                data: f(data),
                reason,
            },
        }
    }
}
