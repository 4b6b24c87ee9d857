use std::cell::RefCell;
use std::time::Duration;

use moodlens::api::{HttpReply, StaticKey, TransportError};
use moodlens::extract::{DocumentIdentity, HostError};
use moodlens::{AnalysisClient, Controller, DocumentHost, Extractor, Transport, UiState};

use super::*;

struct Page(&'static str);

#[async_trait::async_trait(?Send)]
impl DocumentHost for Page {
    async fn identity(&self) -> Result<DocumentIdentity, HostError> {
        Ok(DocumentIdentity::new("example.com"))
    }

    async fn live_selection(&self) -> Result<String, HostError> {
        Ok(self.0.to_owned())
    }

    async fn editor_surface_text(&self) -> Result<Option<String>, HostError> {
        Ok(None)
    }

    async fn trigger_copy(&self) -> Result<(), HostError> {
        Err(HostError("no copy".into()))
    }

    async fn read_clipboard(&self) -> Result<String, HostError> {
        Err(HostError("no clipboard".into()))
    }

    async fn sleep(&self, _duration: Duration) {}
}

struct Canned {
    reply: Result<HttpReply, TransportError>,
    sent: RefCell<usize>,
}

impl Canned {
    fn new(reply: Result<HttpReply, TransportError>) -> Self {
        Self { reply, sent: RefCell::new(0) }
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for Canned {
    async fn post_json(&self, _url: &str, _api_key: &str, _body: String) -> Result<HttpReply, TransportError> {
        *self.sent.borrow_mut() += 1;
        self.reply.clone()
    }
}

fn client(reply: Result<HttpReply, TransportError>) -> AnalysisClient<Canned, StaticKey> {
    AnalysisClient::new(Canned::new(reply), StaticKey("k".into()), "http://localhost:8000/analyze")
}

// =============================================================
// PopupState
// =============================================================

#[test]
fn default_state_is_blank() {
    let state = PopupState::default();
    assert!(state.is_blank());
    assert!(state.result_html.is_empty());
    assert!(state.error_message.is_empty());
}

#[test]
fn show_replaces_visibility() {
    let mut state = PopupState::default();
    state.show(UiState::Loading.visibility());
    assert!(state.visibility.loading);
    state.show(UiState::Error.visibility());
    assert!(!state.visibility.loading);
    assert!(state.visibility.error);
    assert!(!state.is_blank());
}

// =============================================================
// Controller driving PopupState
// =============================================================

#[tokio::test]
async fn successful_flow_fills_result_panel() {
    let api = client(Ok(HttpReply {
        status: 200,
        body: r#"{"primary_emotion":{"label":"joy","score":0.91}}"#.into(),
    }));
    let mut controller = Controller::new(PopupState::default(), Extractor::default());

    assert_eq!(controller.run(&Page("What a day"), &api).await, UiState::Result);

    let state = controller.into_view();
    assert!(state.visibility.result);
    assert!(!state.visibility.loading);
    assert!(state.result_html.contains("joy"));
    assert!(state.error_message.is_empty());
}

#[tokio::test]
async fn empty_selection_shows_error_without_request() {
    let api = client(Ok(HttpReply { status: 200, body: "{}".into() }));
    let mut controller = Controller::new(PopupState::default(), Extractor::default());

    assert_eq!(controller.run(&Page("   "), &api).await, UiState::Error);

    assert_eq!(*api.transport().sent.borrow(), 0);
    let state = controller.into_view();
    assert!(state.visibility.error);
    assert_eq!(state.error_message, "Please select some text first.");
    assert!(state.result_html.is_empty());
}

#[tokio::test]
async fn rate_limited_flow_shows_friendly_message() {
    let api = client(Ok(HttpReply { status: 429, body: r#"{"detail":"slow down"}"#.into() }));
    let mut controller = Controller::new(PopupState::default(), Extractor::default());

    assert_eq!(controller.run(&Page("hello"), &api).await, UiState::Error);

    let state = controller.into_view();
    assert_eq!(state.error_message, "Too many requests. Please wait a minute and try again.");
}
