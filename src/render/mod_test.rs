use super::icons::{FALLBACK_ICON, emotion_icon};
use super::*;
use serde_json::json;

fn full_payload() -> Value {
    json!({
        "sentiment": { "label": "POSITIVE", "score": 0.9987 },
        "primary_emotion": { "label": "joy", "score": 0.92, "intensity": "very high" },
        "secondary_emotions": [
            { "label": "surprise", "score": 0.05 },
            { "label": "neutral", "score": 0.021 }
        ],
        "emotional_complexity": { "is_mixed": true, "diversity_score": 0.2857 },
        "keyword_insights": { "key_phrases": ["thrilled", "big news"], "emotional_triggers": ["thrilled"] },
        "academic_sources": [
            {
                "title": "Joy in Language",
                "authors": ["Ada Author", "Bo Author"],
                "year": 2021,
                "url": "https://example.org/joy",
                "citationCount": 12
            },
            { "title": "Second Paper", "url": "#", "year": "", "citationCount": 1 }
        ],
        "full_breakdown": { "joy": 0.92, "surprise": 0.05, "neutral": 0.021 }
    })
}

fn rendered(payload: &Value) -> String {
    render(Some(payload)).unwrap().into_string()
}

const ALL_BLOCKS: [&str; 7] = [
    "result-block--primary",
    "result-block--secondary",
    "result-block--sentiment",
    "result-block--complexity",
    "result-block--keywords",
    "result-block--sources",
    "result-block--breakdown",
];

// =============================================================
// Payload validation
// =============================================================

#[test]
fn absent_payload_is_malformed() {
    assert_eq!(render(None), Err(FailureReason::MalformedResponse));
}

#[test]
fn non_object_payload_is_malformed() {
    assert_eq!(render(Some(&json!([]))), Err(FailureReason::MalformedResponse));
    assert_eq!(render(Some(&json!("joy"))), Err(FailureReason::MalformedResponse));
    assert_eq!(render(Some(&json!(null))), Err(FailureReason::MalformedResponse));
}

// =============================================================
// Block presence
// =============================================================

#[test]
fn full_payload_renders_every_block() {
    let html = rendered(&full_payload());
    for block in ALL_BLOCKS {
        assert!(html.contains(block), "missing {block}");
    }
}

#[test]
fn empty_object_renders_only_placeholder_blocks() {
    let html = rendered(&json!({}));
    assert!(html.contains("result-block--primary"));
    assert!(html.contains("result-block--sentiment"));
    assert!(html.contains("<span class=\"emotion__label\">Unknown</span>"));
    assert!(html.contains("<span class=\"sentiment__label\">Neutral</span>"));
    assert_eq!(html.matches("0.000").count(), 2);
    for block in &ALL_BLOCKS[..] {
        if *block != "result-block--primary" && *block != "result-block--sentiment" {
            assert!(!html.contains(block), "unexpected {block}");
        }
    }
}

#[test]
fn each_optional_block_is_omitted_only_when_its_field_is_absent() {
    let optional = [
        ("secondary_emotions", "result-block--secondary"),
        ("emotional_complexity", "result-block--complexity"),
        ("keyword_insights", "result-block--keywords"),
        ("academic_sources", "result-block--sources"),
        ("full_breakdown", "result-block--breakdown"),
    ];
    for (field, block) in optional {
        let mut payload = full_payload();
        payload.as_object_mut().unwrap().remove(field);
        let html = rendered(&payload);
        assert!(!html.contains(block), "{field} removed but {block} rendered");
        for (_, other) in optional.iter().filter(|(f, _)| *f != field) {
            assert!(html.contains(other), "{field} removed but {other} missing");
        }
    }
}

#[test]
fn thrilled_scenario_renders_primary_without_secondary_or_sources() {
    let html = rendered(&json!({ "primary_emotion": { "label": "Joy", "score": 0.92 } }));
    assert!(html.contains("<span class=\"emotion__label\">Joy</span>"));
    assert!(html.contains("<span class=\"emotion__score\">0.920</span>"));
    assert!(html.contains("😊"));
    assert!(!html.contains("result-block--secondary"));
    assert!(!html.contains("result-block--sources"));
    assert!(!html.contains("emotion__intensity"));
}

#[test]
fn keyword_block_renders_only_non_empty_lists() {
    let html = rendered(&json!({ "keyword_insights": { "key_phrases": ["calm"], "emotional_triggers": [] } }));
    assert!(html.contains("keywords--phrase"));
    assert!(!html.contains("keywords--trigger"));
}

#[test]
fn malformed_primary_emotion_falls_back_to_placeholder() {
    let html = rendered(&json!({ "primary_emotion": ["joy"], "sentiment": { "label": 3 } }));
    assert!(html.contains("<span class=\"emotion__label\">Unknown</span>"));
    assert!(html.contains("<span class=\"sentiment__label\">Neutral</span>"));
}

#[test]
fn positional_arrays_render_as_placeholders() {
    let html = rendered(&json!({ "primary_emotion": ["Joy", 0.9], "sentiment": ["POSITIVE", 0.8] }));
    assert!(html.contains("<span class=\"emotion__label\">Unknown</span>"));
    assert!(html.contains("<span class=\"sentiment__label\">Neutral</span>"));
    assert!(!html.contains("0.900"));
}

// =============================================================
// Icons
// =============================================================

#[test]
fn known_labels_map_case_insensitively() {
    assert_eq!(emotion_icon("JOY"), "😊");
    assert_eq!(emotion_icon(" sadness "), "😢");
    assert_eq!(emotion_icon("Anger"), "😠");
}

#[test]
fn unknown_labels_use_fallback_marker() {
    for label in ["", "melancholy", "schadenfreude", "🙂"] {
        let icon = emotion_icon(label);
        assert_eq!(icon, FALLBACK_ICON);
        assert!(!icon.is_empty());
    }
}

#[test]
fn unknown_label_renders_fallback_marker() {
    let html = rendered(&json!({ "secondary_emotions": [{ "label": "awe", "score": 0.4 }] }));
    assert!(html.contains(&format!("<span class=\"emotion__icon\">{FALLBACK_ICON}</span><span class=\"emotion__label\">awe</span>")));
}

// =============================================================
// Numeric formatting
// =============================================================

#[test]
fn scores_are_fixed_to_three_decimals() {
    assert_eq!(format_score(Some(0.92)), "0.920");
    assert_eq!(format_score(Some(0.99876)), "0.999");
    assert_eq!(format_score(Some(1.0)), "1.000");
    assert_eq!(format_score(None), "0.000");
    assert_eq!(format_score(Some(f64::NAN)), "0.000");
}

#[test]
fn missing_secondary_score_renders_zero() {
    let html = rendered(&json!({ "secondary_emotions": [{ "label": "fear" }] }));
    assert!(html.contains("<li class=\"emotion\"><span class=\"emotion__icon\">😨</span><span class=\"emotion__label\">fear</span><span class=\"emotion__score\">0.000</span></li>"));
}

#[test]
fn breakdown_bar_width_tracks_score() {
    let html = rendered(&json!({ "full_breakdown": { "joy": 0.92, "anger": 1.7, "fear": null } }));
    assert!(html.contains("width: 92.0%"));
    assert!(html.contains("width: 100.0%"));
    assert!(html.contains("width: 0.0%"));
    assert!(html.contains("<span class=\"breakdown__score\">1.700</span>"));
}

// =============================================================
// Ordering
// =============================================================

#[test]
fn lists_keep_payload_order() {
    let html = rendered(&json!({
        "secondary_emotions": [
            { "label": "neutral", "score": 0.01 },
            { "label": "anger", "score": 0.3 }
        ],
        "full_breakdown": { "sadness": 0.1, "joy": 0.8 },
        "keyword_insights": { "key_phrases": ["zebra", "apple"] }
    }));
    assert!(html.find(">neutral<").unwrap() < html.find(">anger<").unwrap());
    assert!(html.find(">sadness<").unwrap() < html.find(">joy<").unwrap());
    assert!(html.find(">zebra<").unwrap() < html.find(">apple<").unwrap());
}

// =============================================================
// Sources
// =============================================================

#[test]
fn source_with_http_url_links_and_lists_meta() {
    let html = rendered(&full_payload());
    assert!(html.contains(
        "<a class=\"source__title\" href=\"https://example.org/joy\" target=\"_blank\" rel=\"noopener noreferrer\">Joy in Language</a>"
    ));
    assert!(html.contains("<div class=\"source__meta\">2021 · 12 citations</div>"));
    assert!(html.contains("<div class=\"source__authors\">Ada Author, Bo Author</div>"));
}

#[test]
fn source_without_http_url_renders_plain_title() {
    let html = rendered(&full_payload());
    assert!(html.contains("<span class=\"source__title\">Second Paper</span>"));
    assert!(html.contains("<div class=\"source__meta\">1 citation</div>"));
}

#[test]
fn source_without_title_is_untitled() {
    let html = rendered(&json!({ "academic_sources": [{ "url": "javascript:alert(1)" }] }));
    assert!(html.contains("<span class=\"source__title\">Untitled</span>"));
    assert!(!html.contains("javascript:"));
}

// =============================================================
// Escaping
// =============================================================

#[test]
fn payload_text_is_escaped() {
    let html = rendered(&json!({
        "primary_emotion": { "label": "<script>alert(1)</script>", "score": 0.5 },
        "keyword_insights": { "key_phrases": ["a & b"] },
        "academic_sources": [{ "title": "T", "url": "https://x.test/?a=\"b\"" }]
    }));
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
    assert!(html.contains("a &amp; b"));
    assert!(!html.contains("?a=\"b\""));
}
