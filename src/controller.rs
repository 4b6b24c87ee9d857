//! Popup flow: extract, analyze, render, display.
//!
//! DESIGN
//! ======
//! [`Controller`] owns both the visibility state and the view handles it
//! drives; nothing reaches for global UI elements. One controller serves one
//! popup open and runs at most one flow. States only move forward:
//!
//! ```text
//! Idle ──► Loading ──► Result
//!   │         │
//!   └─────────┴──────► Error
//! ```
//!
//! Failures found before transport (nothing selected, document unreadable)
//! go straight from `Idle` to `Error` without a network call.

use crate::api::{AnalysisClient, KeyResolver, Transport};
use crate::error::FailureReason;
use crate::extract::{DocumentHost, Extractor};
use crate::present::present;
use crate::render::{Markup, render};

/// Where the popup is in its single flow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UiState {
    #[default]
    Idle,
    Loading,
    Result,
    Error,
}

impl UiState {
    #[must_use]
    pub fn can_transition_to(self, next: UiState) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Loading | Self::Error) | (Self::Loading, Self::Result | Self::Error)
        )
    }

    /// Which view is shown. At most one flag is set; `Idle` shows none.
    #[must_use]
    pub fn visibility(self) -> Visibility {
        Visibility {
            loading: self == Self::Loading,
            result: self == Self::Result,
            error: self == Self::Error,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Visibility {
    pub loading: bool,
    pub result: bool,
    pub error: bool,
}

/// The popup's loading, result, and error elements.
pub trait PopupView {
    fn show(&mut self, visibility: Visibility);
    fn set_result(&mut self, markup: Markup);
    fn set_error(&mut self, message: String);
}

pub struct Controller<V> {
    view: V,
    state: UiState,
    extractor: Extractor,
}

impl<V: PopupView> Controller<V> {
    pub fn new(view: V, extractor: Extractor) -> Self {
        Self { view, state: UiState::Idle, extractor }
    }

    #[must_use]
    pub fn state(&self) -> UiState {
        self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    /// Run the popup flow once and return the final state.
    ///
    /// Every failure ends in [`UiState::Error`] with a presented message; none
    /// escapes to the caller. A controller that already ran is left untouched.
    pub async fn run<T, K>(&mut self, document: &dyn DocumentHost, client: &AnalysisClient<T, K>) -> UiState
    where
        T: Transport,
        K: KeyResolver,
    {
        if self.state != UiState::Idle {
            tracing::warn!(state = ?self.state, "popup flow already ran; ignoring");
            return self.state;
        }

        match self.flow(document, client).await {
            Ok(markup) => self.show_result(markup),
            Err(failure) => self.show_error(&failure),
        }
        self.state
    }

    async fn flow<T, K>(
        &mut self,
        document: &dyn DocumentHost,
        client: &AnalysisClient<T, K>,
    ) -> Result<Markup, FailureReason>
    where
        T: Transport,
        K: KeyResolver,
    {
        let text = self.extractor.extract(document).await?;
        if text.is_empty() {
            return Err(FailureReason::NoSelection);
        }

        self.transition(UiState::Loading);
        let payload = client.analyze(&text).await?;
        render(payload.as_ref())
    }

    fn show_result(&mut self, markup: Markup) {
        if self.state.can_transition_to(UiState::Result) {
            self.view.set_result(markup);
            self.transition(UiState::Result);
        }
    }

    fn show_error(&mut self, failure: &FailureReason) {
        tracing::info!(%failure, "popup flow ended with failure");
        if self.state.can_transition_to(UiState::Error) {
            self.view.set_error(present(failure));
            self.transition(UiState::Error);
        }
    }

    fn transition(&mut self, next: UiState) {
        if !self.state.can_transition_to(next) {
            tracing::warn!(from = ?self.state, to = ?next, "ignoring invalid UI transition");
            return;
        }
        tracing::debug!(from = ?self.state, to = ?next, "ui transition");
        self.state = next;
        self.view.show(next.visibility());
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;
