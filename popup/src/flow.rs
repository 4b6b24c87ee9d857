//! One popup open: wire the browser collaborators into the controller.

use leptos::prelude::*;
use moodlens::{AnalysisClient, ClientConfig, Controller, Extractor};

use crate::host::active_tab::ActiveTab;
use crate::net::fetch::FetchTransport;
use crate::state::popup::{PopupState, SignalView};
use crate::util::api_key::StoredKey;

/// Analyze the active tab's selection and drive `state` through the flow.
pub async fn analyze_active_tab(state: RwSignal<PopupState>) {
    let config = ClientConfig::default();
    let client = AnalysisClient::new(FetchTransport::new(config.timeouts), StoredKey, &config.endpoint);
    let mut controller = Controller::new(SignalView(state), Extractor::from_config(&config));

    let outcome = controller.run(&ActiveTab, &client).await;
    tracing::info!(?outcome, endpoint = client.endpoint(), "popup flow finished");
}
