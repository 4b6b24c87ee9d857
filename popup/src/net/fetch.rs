//! `fetch`-backed [`Transport`] for the popup.
//!
//! `gloo-net` has no request timeout, so the send races a `gloo-timers`
//! sleep. A request that loses the race is abandoned, not aborted; the
//! browser drops it when the popup closes.

use std::pin::pin;
use std::time::Duration;

use futures::future::{Either, select};
use gloo_net::http::Request;
use moodlens::api::{API_KEY_HEADER, HttpReply, TransportError};
use moodlens::config::Timeouts;
use moodlens::Transport;

pub struct FetchTransport {
    timeout: Duration,
}

impl FetchTransport {
    pub fn new(timeouts: Timeouts) -> Self {
        Self { timeout: Duration::from_secs(timeouts.request_secs) }
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for FetchTransport {
    async fn post_json(&self, url: &str, api_key: &str, body: String) -> Result<HttpReply, TransportError> {
        let request = Request::post(url)
            .header("Content-Type", "application/json")
            .header(API_KEY_HEADER, api_key)
            .body(body)
            .map_err(|error| TransportError::Request(error.to_string()))?;

        let exchange = pin!(async move {
            let response = request.send().await?;
            let status = response.status();
            let body = response.text().await?;
            Ok::<_, gloo_net::Error>(HttpReply { status, body })
        });
        let deadline = pin!(gloo_timers::future::sleep(self.timeout));

        match select(exchange, deadline).await {
            Either::Left((Ok(reply), _)) => Ok(reply),
            Either::Left((Err(error), _)) => Err(TransportError::Request(error.to_string())),
            Either::Right(((), _)) => {
                tracing::warn!(timeout = ?self.timeout, "analysis request timed out");
                Err(TransportError::Timeout)
            }
        }
    }
}
