use leptos::prelude::*;
use moodlens::render::Markup;
use moodlens::{PopupView, Visibility};

/// What the popup shows: one visible panel plus its content.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PopupState {
    pub visibility: Visibility,
    pub result_html: String,
    pub error_message: String,
}

impl PopupState {
    /// True while no flow has produced anything to show.
    pub fn is_blank(&self) -> bool {
        self.visibility == Visibility::default()
    }
}

impl PopupView for PopupState {
    fn show(&mut self, visibility: Visibility) {
        self.visibility = visibility;
    }

    fn set_result(&mut self, markup: Markup) {
        self.result_html = markup.into_string();
    }

    fn set_error(&mut self, message: String) {
        self.error_message = message;
    }
}

/// Drives a signal-held [`PopupState`] so components re-render on each step.
#[derive(Clone, Copy)]
pub struct SignalView(pub RwSignal<PopupState>);

impl PopupView for SignalView {
    fn show(&mut self, visibility: Visibility) {
        self.0.update(|state| state.show(visibility));
    }

    fn set_result(&mut self, markup: Markup) {
        self.0.update(|state| state.set_result(markup));
    }

    fn set_error(&mut self, message: String) {
        self.0.update(|state| state.set_error(message));
    }
}

#[cfg(test)]
#[path = "popup_test.rs"]
mod popup_test;
