//! Failure to user-facing message.
//!
//! Two substitutions sit on top of the underlying message: extraction
//! failures get a manual-copy workaround, and rate limiting gets a
//! wait-a-minute hint. An HTTP 429 always gets the hint whatever its detail
//! says; otherwise the workaround check runs first. Anything else is shown
//! verbatim; marking it as an error is left to the view.

use crate::error::FailureReason;

pub const NO_SELECTION_MESSAGE: &str = "Please select some text first.";
pub const COPY_WORKAROUND_MESSAGE: &str =
    "Could not read the selected text on this page. Copy it manually (Ctrl+C / Cmd+C) and try again.";
pub const RATE_LIMIT_MESSAGE: &str = "Too many requests. Please wait a minute and try again.";
pub const MALFORMED_RESPONSE_MESSAGE: &str = "The analysis service returned an unexpected response.";

const EXTRACTION_FAILURE_INDICATOR: &str = "failed to get text";
const RATE_LIMIT_STATUS: u16 = 429;

/// Message to display for `failure`.
#[must_use]
pub fn present(failure: &FailureReason) -> String {
    if matches!(failure, FailureReason::NoSelection) {
        return NO_SELECTION_MESSAGE.to_owned();
    }

    if failure.status() == Some(RATE_LIMIT_STATUS) {
        return RATE_LIMIT_MESSAGE.to_owned();
    }

    let message = failure.to_string();
    let lowered = message.to_ascii_lowercase();
    if lowered.contains(EXTRACTION_FAILURE_INDICATOR) {
        return COPY_WORKAROUND_MESSAGE.to_owned();
    }
    if mentions_rate_limit(&lowered) {
        return RATE_LIMIT_MESSAGE.to_owned();
    }

    match failure {
        FailureReason::MalformedResponse => MALFORMED_RESPONSE_MESSAGE.to_owned(),
        _ => message,
    }
}

fn mentions_rate_limit(lowered: &str) -> bool {
    lowered.contains("too many requests")
        || lowered.contains("rate limit")
        || lowered
            .split(|c: char| !c.is_ascii_alphanumeric())
            .any(|token| token == "429")
}

#[cfg(test)]
#[path = "present_test.rs"]
mod present_test;
