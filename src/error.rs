//! Failure taxonomy for a single popup flow.
//!
//! DESIGN
//! ======
//! Every failure is terminal for the flow that produced it. Lower layers keep
//! their own error types (`HostError`, `TransportError`, `KeyError`) and are
//! mapped into [`FailureReason`] at the component boundary, so the presenter
//! normalizes exactly one shape.

/// Why a flow ended without a rendered result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FailureReason {
    /// The document could not be scripted or read at all.
    #[error("Failed to get text: {0}")]
    ExtractionFailed(String),

    /// Extraction succeeded but produced no text.
    #[error("no text selected")]
    NoSelection,

    /// The request never completed (`status` is `None`) or the server
    /// answered with a non-2xx status.
    #[error("{detail}")]
    NetworkOrServerError { status: Option<u16>, detail: String },

    /// The payload is absent or is not a JSON object.
    #[error("malformed analysis response")]
    MalformedResponse,
}

impl FailureReason {
    /// Failure before any HTTP status was observed.
    pub(crate) fn network(detail: impl Into<String>) -> Self {
        Self::NetworkOrServerError { status: None, detail: detail.into() }
    }

    /// Failure carrying a non-2xx HTTP status.
    pub(crate) fn server(status: u16, detail: impl Into<String>) -> Self {
        Self::NetworkOrServerError { status: Some(status), detail: detail.into() }
    }

    /// HTTP status attached to this failure, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NetworkOrServerError { status, .. } => *status,
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;
