//! Popup view state.
//!
//! DESIGN
//! ======
//! `PopupState` is a plain struct so the controller can drive it in native
//! tests; components read it through an `RwSignal` provided as context.

pub mod popup;
