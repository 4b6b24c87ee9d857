//! Document hosts for the popup.

#[cfg(feature = "csr")]
pub mod active_tab;
pub mod scripts;

/// Convert a tab id as reported by `chrome.tabs` (a JS number) to the `i32`
/// that `chrome.scripting` targets take.
///
/// Ids are non-negative integers; anything else is rejected rather than
/// truncated.
#[allow(clippy::cast_possible_truncation)]
pub fn tab_id_from(raw: f64) -> Option<i32> {
    let in_range = (0.0..=f64::from(i32::MAX)).contains(&raw);
    (in_range && raw.fract() == 0.0).then(|| raw as i32)
}
