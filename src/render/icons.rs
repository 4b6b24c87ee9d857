//! Emotion label to decorative marker.

/// Marker for any label outside the known set.
pub const FALLBACK_ICON: &str = "🎭";

/// Marker for `label`, matched case-insensitively. Never empty.
#[must_use]
pub fn emotion_icon(label: &str) -> &'static str {
    match label.trim().to_ascii_lowercase().as_str() {
        "joy" => "😊",
        "sadness" => "😢",
        "anger" => "😠",
        "fear" => "😨",
        "surprise" => "😲",
        "disgust" => "🤢",
        "neutral" => "😐",
        "love" => "❤️",
        "optimism" => "🌤️",
        "trust" => "🤝",
        "anticipation" => "⏳",
        _ => FALLBACK_ICON,
    }
}
