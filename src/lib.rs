//! # moodlens
//!
//! Emotion analysis for selected text. Reads the user's selection from the
//! active document, sends it to a remote classifier service, and renders the
//! structured answer as popup markup. No analysis happens here.
//!
//! The pipeline is host-agnostic: documents, transports, key storage, and
//! views are traits implemented by the native CLI (this crate, `native`
//! feature) and by the browser popup (`popup/`).

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod extract;
#[cfg(feature = "native")]
pub mod host;
pub mod present;
pub mod render;
pub mod types;

pub use api::{AnalysisClient, KeyResolver, Transport};
pub use config::ClientConfig;
pub use controller::{Controller, PopupView, UiState, Visibility};
pub use error::FailureReason;
pub use extract::{DocumentHost, ExtractionStrategy, Extractor};
pub use present::present;
pub use render::{Markup, render};
pub use types::{AnalysisRequest, AnalysisResponse};
