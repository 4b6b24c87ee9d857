//! # moodlens-popup
//!
//! Leptos + WASM browser-extension popup for `moodlens`. Opening the popup
//! reads the selection in the active tab, sends it for analysis, and shows
//! the rendered result or a friendly error.
//!
//! Browser collaborators (active-tab scripting, `fetch`, timers) are behind
//! the `csr` feature; state and key handling build and test natively.

pub mod app;
#[cfg(feature = "csr")]
pub mod flow;
pub mod host;
pub mod net;
pub mod state;
pub mod util;
