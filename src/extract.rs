//! Selected-text extraction across document contexts.
//!
//! DESIGN
//! ======
//! The document's host picks one [`ExtractionStrategy`] per invocation.
//! Plain pages expose a live selection. Rich editors that paint their text
//! onto a custom surface do not, so they are read through the editor's own
//! rendering surface and, failing that, through the clipboard after
//! triggering a copy.
//!
//! CLIPBOARD RACE
//! ==============
//! The copy action completes outside this process and nothing signals when
//! it lands. We snapshot the clipboard, trigger the copy, then poll until the
//! clipboard changes or the policy timeout elapses. If it never changes, the
//! unchanged text is returned with a warning: either the user copied the same
//! text earlier or the copy has not landed yet, and the two cannot be told
//! apart. Rich-editor extraction is best-effort; test it as such.

use std::time::Duration;

use crate::config::{ClientConfig, ClipboardPolicy};
use crate::error::FailureReason;

/// Error raised by a [`DocumentHost`] capability.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct HostError(pub String);

/// What the adapter knows about the document before reading it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentIdentity {
    /// Host name of the document URL, e.g. `docs.google.com`.
    pub host: String,
}

impl DocumentIdentity {
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }
}

/// Capabilities the host environment provides over the active document.
#[async_trait::async_trait(?Send)]
pub trait DocumentHost {
    /// Identify the document. Fails when the document cannot be scripted.
    async fn identity(&self) -> Result<DocumentIdentity, HostError>;

    /// Text of the document's live selection.
    async fn live_selection(&self) -> Result<String, HostError>;

    /// Selected text read from a rich editor's rendering surface, if the
    /// surface exists.
    async fn editor_surface_text(&self) -> Result<Option<String>, HostError>;

    /// Ask the document to copy its selection to the clipboard.
    async fn trigger_copy(&self) -> Result<(), HostError>;

    async fn read_clipboard(&self) -> Result<String, HostError>;

    async fn sleep(&self, duration: Duration);
}

/// How selected text is read from a given document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStrategy {
    DefaultSelection,
    RichEditorSelection,
}

impl ExtractionStrategy {
    /// Pick the strategy for `identity`. Host matching ignores ASCII case.
    #[must_use]
    pub fn for_document(identity: &DocumentIdentity, rich_editor_hosts: &[String]) -> Self {
        let host = identity.host.trim();
        if rich_editor_hosts.iter().any(|h| h.eq_ignore_ascii_case(host)) {
            Self::RichEditorSelection
        } else {
            Self::DefaultSelection
        }
    }
}

/// Extraction adapter. Produces trimmed selected text, possibly empty.
#[derive(Debug, Clone)]
pub struct Extractor {
    rich_editor_hosts: Vec<String>,
    clipboard: ClipboardPolicy,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::from_config(&ClientConfig::default())
    }
}

impl Extractor {
    #[must_use]
    pub fn new(rich_editor_hosts: Vec<String>, clipboard: ClipboardPolicy) -> Self {
        Self { rich_editor_hosts, clipboard }
    }

    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.rich_editor_hosts.clone(), config.clipboard)
    }

    /// Read the selected text of `document`.
    ///
    /// An empty string is a successful extraction with nothing selected.
    ///
    /// # Errors
    ///
    /// Returns [`FailureReason::ExtractionFailed`] for any host error.
    pub async fn extract(&self, document: &dyn DocumentHost) -> Result<String, FailureReason> {
        self.read_selection(document).await.map_err(|error| {
            tracing::warn!(%error, "text extraction failed");
            FailureReason::ExtractionFailed(error.0)
        })
    }

    async fn read_selection(&self, document: &dyn DocumentHost) -> Result<String, HostError> {
        let identity = document.identity().await?;
        let strategy = ExtractionStrategy::for_document(&identity, &self.rich_editor_hosts);
        tracing::debug!(host = %identity.host, ?strategy, "extracting selection");

        match strategy {
            ExtractionStrategy::DefaultSelection => Ok(document.live_selection().await?.trim().to_owned()),
            ExtractionStrategy::RichEditorSelection => self.rich_editor_selection(document).await,
        }
    }

    async fn rich_editor_selection(&self, document: &dyn DocumentHost) -> Result<String, HostError> {
        if let Some(text) = document.editor_surface_text().await? {
            let text = text.trim();
            if !text.is_empty() {
                return Ok(text.to_owned());
            }
        }
        if !self.clipboard.enabled {
            return Err(HostError(
                "editor surface is empty and clipboard fallback is disabled; unsupported document".into(),
            ));
        }
        self.clipboard_selection(document).await
    }

    async fn clipboard_selection(&self, document: &dyn DocumentHost) -> Result<String, HostError> {
        let baseline = match document.read_clipboard().await {
            Ok(text) => Some(text.trim().to_owned()),
            Err(error) => {
                tracing::debug!(%error, "clipboard snapshot unavailable");
                None
            }
        };

        document.trigger_copy().await?;

        let step = self.clipboard.poll_interval.max(Duration::from_millis(1));
        let mut waited = Duration::ZERO;
        loop {
            let current = document.read_clipboard().await?.trim().to_owned();
            if !current.is_empty() && baseline.as_deref() != Some(current.as_str()) {
                tracing::debug!(?waited, "clipboard picked up copied selection");
                return Ok(current);
            }
            if waited >= self.clipboard.timeout {
                if !current.is_empty() {
                    tracing::warn!(
                        ?waited,
                        "clipboard unchanged after copy; selection may be stale"
                    );
                }
                return Ok(current);
            }
            document.sleep(step).await;
            waited += step;
        }
    }
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod extract_test;
