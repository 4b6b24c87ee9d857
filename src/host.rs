//! Native document host over caller-supplied text.

use std::time::Duration;

use crate::extract::{DocumentHost, DocumentIdentity, HostError};

const LOCAL_HOST: &str = "localhost";

/// A document whose whole selection is known up front (CLI input, stdin).
///
/// It never matches a rich-editor host, so the clipboard is never touched.
#[derive(Debug, Clone)]
pub struct TextDocument {
    text: String,
}

impl TextDocument {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait::async_trait(?Send)]
impl DocumentHost for TextDocument {
    async fn identity(&self) -> Result<DocumentIdentity, HostError> {
        Ok(DocumentIdentity::new(LOCAL_HOST))
    }

    async fn live_selection(&self) -> Result<String, HostError> {
        Ok(self.text.clone())
    }

    async fn editor_surface_text(&self) -> Result<Option<String>, HostError> {
        Ok(None)
    }

    async fn trigger_copy(&self) -> Result<(), HostError> {
        Err(HostError("text documents have no copy action".into()))
    }

    async fn read_clipboard(&self) -> Result<String, HostError> {
        Err(HostError("text documents have no clipboard".into()))
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[cfg(test)]
#[path = "host_test.rs"]
mod host_test;
