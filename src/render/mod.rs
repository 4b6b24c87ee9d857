//! Analysis payload to popup markup.
//!
//! DESIGN
//! ======
//! Each block is an independent projection of one [`AnalysisResponse`] field
//! and returns `None` when its data is absent, so absent blocks leave no empty
//! shell behind. Primary emotion and sentiment are the exceptions: they
//! always render, falling back to `"Unknown"` / `"Neutral"` and `0.000`.
//!
//! Scores are formatted to three decimals here and nowhere else; the payload
//! values themselves are never rounded. List order is payload order.
//!
//! SAFETY
//! ======
//! Every payload string is HTML-escaped. Source links are emitted only for
//! `http(s)` URLs.

pub mod icons;

use std::fmt;

use html_escape::{encode_double_quoted_attribute, encode_text};
use serde_json::Value;

use crate::error::FailureReason;
use crate::types::{
    AcademicSource, AnalysisResponse, EmotionalComplexity, KeywordInsights, LabeledScore, PrimaryEmotion,
};
use icons::emotion_icon;

const UNKNOWN_LABEL: &str = "Unknown";
const NEUTRAL_LABEL: &str = "Neutral";
const UNTITLED_SOURCE: &str = "Untitled";

/// Rendered HTML fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup(String);

impl Markup {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Render a raw payload.
///
/// # Errors
///
/// Returns [`FailureReason::MalformedResponse`] when `payload` is absent or
/// is not a JSON object. Any object renders.
pub fn render(payload: Option<&Value>) -> Result<Markup, FailureReason> {
    let response = payload
        .and_then(AnalysisResponse::from_value)
        .ok_or(FailureReason::MalformedResponse)?;
    Ok(render_response(&response))
}

/// Render an already projected response.
#[must_use]
pub fn render_response(response: &AnalysisResponse) -> Markup {
    let blocks = [
        Some(primary_emotion_block(response.primary_emotion.as_ref())),
        response.secondary_emotions.as_deref().and_then(secondary_emotions_block),
        Some(sentiment_block(response.sentiment.as_ref())),
        response.emotional_complexity.as_ref().map(complexity_block),
        response.keyword_insights.as_ref().and_then(keyword_block),
        response.academic_sources.as_deref().and_then(sources_block),
        response.full_breakdown.as_deref().and_then(breakdown_block),
    ];
    Markup(blocks.into_iter().flatten().collect::<Vec<_>>().join("\n"))
}

/// Fixed three-decimal display of a score; absent or non-finite is `0.000`.
#[must_use]
pub fn format_score(score: Option<f64>) -> String {
    format!("{:.3}", score.filter(|s| s.is_finite()).unwrap_or(0.0))
}

fn section(modifier: &str, title: &str, body: &str) -> String {
    format!(
        "<section class=\"result-block result-block--{modifier}\">\
         <h3 class=\"result-block__title\">{title}</h3>{body}</section>"
    )
}

fn emotion_row(tag: &str, label: Option<&str>, score: Option<f64>) -> String {
    let label = label.map(str::trim).filter(|l| !l.is_empty()).unwrap_or(UNKNOWN_LABEL);
    format!(
        "<{tag} class=\"emotion\">\
         <span class=\"emotion__icon\">{icon}</span>\
         <span class=\"emotion__label\">{label}</span>\
         <span class=\"emotion__score\">{score}</span></{tag}>",
        icon = emotion_icon(label),
        label = encode_text(label),
        score = format_score(score),
    )
}

fn primary_emotion_block(primary: Option<&PrimaryEmotion>) -> String {
    let fallback = PrimaryEmotion::default();
    let primary = primary.unwrap_or(&fallback);
    let mut body = emotion_row("div", primary.label.as_deref(), primary.score);
    if let Some(intensity) = primary.intensity.as_deref().map(str::trim).filter(|i| !i.is_empty()) {
        body.push_str(&format!(
            "<div class=\"emotion__intensity\">Intensity: {}</div>",
            encode_text(intensity)
        ));
    }
    section("primary", "Primary Emotion", &body)
}

fn secondary_emotions_block(secondary: &[LabeledScore]) -> Option<String> {
    if secondary.is_empty() {
        return None;
    }
    let items: String = secondary
        .iter()
        .map(|emotion| emotion_row("li", emotion.label.as_deref(), emotion.score))
        .collect();
    Some(section("secondary", "Secondary Emotions", &format!("<ul class=\"emotion-list\">{items}</ul>")))
}

fn sentiment_block(sentiment: Option<&LabeledScore>) -> String {
    let label = sentiment
        .and_then(|s| s.label.as_deref())
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(NEUTRAL_LABEL);
    let score = sentiment.and_then(|s| s.score);
    let modifier = match label.to_ascii_lowercase().as_str() {
        "positive" => "positive",
        "negative" => "negative",
        "neutral" => "neutral",
        _ => "other",
    };
    let body = format!(
        "<div class=\"sentiment sentiment--{modifier}\">\
         <span class=\"sentiment__label\">{label}</span>\
         <span class=\"sentiment__score\">{score}</span></div>",
        label = encode_text(label),
        score = format_score(score),
    );
    section("sentiment", "Sentiment", &body)
}

fn complexity_block(complexity: &EmotionalComplexity) -> String {
    let mixed = if complexity.is_mixed.unwrap_or(false) { "Yes" } else { "No" };
    let body = format!(
        "<dl class=\"complexity\">\
         <dt>Mixed emotions</dt><dd class=\"complexity__mixed\">{mixed}</dd>\
         <dt>Diversity score</dt><dd class=\"complexity__diversity\">{diversity}</dd></dl>",
        diversity = format_score(complexity.diversity_score),
    );
    section("complexity", "Emotional Complexity", &body)
}

fn tag_list(heading: &str, modifier: &str, tags: &[String]) -> Option<String> {
    if tags.is_empty() {
        return None;
    }
    let items: String = tags
        .iter()
        .map(|tag| format!("<li class=\"tag tag--{modifier}\">{}</li>", encode_text(tag)))
        .collect();
    Some(format!(
        "<div class=\"keywords keywords--{modifier}\"><h4>{heading}</h4><ul class=\"tag-list\">{items}</ul></div>"
    ))
}

fn keyword_block(insights: &KeywordInsights) -> Option<String> {
    let body: String = [
        tag_list("Key Phrases", "phrase", &insights.key_phrases),
        tag_list("Emotional Triggers", "trigger", &insights.emotional_triggers),
    ]
    .into_iter()
    .flatten()
    .collect();
    (!body.is_empty()).then(|| section("keywords", "Keyword Insights", &body))
}

fn sources_block(sources: &[AcademicSource]) -> Option<String> {
    if sources.is_empty() {
        return None;
    }
    let items: String = sources.iter().map(source_item).collect();
    Some(section("sources", "Academic Sources", &format!("<ol class=\"source-list\">{items}</ol>")))
}

fn source_item(source: &AcademicSource) -> String {
    let title = source
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(UNTITLED_SOURCE);
    let title = match source.url.as_deref().map(str::trim).filter(|u| is_http_url(u)) {
        Some(url) => format!(
            "<a class=\"source__title\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
            encode_double_quoted_attribute(url),
            encode_text(title),
        ),
        None => format!("<span class=\"source__title\">{}</span>", encode_text(title)),
    };

    let mut meta = Vec::new();
    if let Some(year) = source.year.as_ref().and_then(display_scalar) {
        meta.push(encode_text(&year).into_owned());
    }
    if let Some(count) = source.citation_count.as_ref().and_then(Value::as_f64).filter(|c| *c >= 0.0) {
        let noun = if (count - 1.0).abs() < f64::EPSILON { "citation" } else { "citations" };
        meta.push(format!("{count:.0} {noun}"));
    }
    let meta = if meta.is_empty() {
        String::new()
    } else {
        format!("<div class=\"source__meta\">{}</div>", meta.join(" · "))
    };

    let authors = if source.authors.is_empty() {
        String::new()
    } else {
        format!("<div class=\"source__authors\">{}</div>", encode_text(&source.authors.join(", ")))
    };

    format!("<li class=\"source\">{title}{meta}{authors}</li>")
}

fn breakdown_block(breakdown: &[(String, Option<f64>)]) -> Option<String> {
    if breakdown.is_empty() {
        return None;
    }
    let rows: String = breakdown
        .iter()
        .map(|(label, score)| {
            let width = (score.filter(|s| s.is_finite()).unwrap_or(0.0) * 100.0).clamp(0.0, 100.0);
            format!(
                "<li class=\"breakdown__row\">\
                 <span class=\"breakdown__icon\">{icon}</span>\
                 <span class=\"breakdown__label\">{label}</span>\
                 <span class=\"breakdown__bar\"><span class=\"breakdown__fill\" style=\"width: {width:.1}%\"></span></span>\
                 <span class=\"breakdown__score\">{score}</span></li>",
                icon = emotion_icon(label),
                label = encode_text(label),
                score = format_score(*score),
            )
        })
        .collect();
    Some(section("breakdown", "Full Breakdown", &format!("<ul class=\"breakdown\">{rows}</ul>")))
}

fn is_http_url(url: &str) -> bool {
    let lowered = url.to_ascii_lowercase();
    ["http://", "https://"]
        .iter()
        .any(|scheme| lowered.strip_prefix(scheme).is_some_and(|rest| !rest.is_empty()))
}

/// Numbers and non-blank strings; everything else is treated as absent.
fn display_scalar(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_owned()),
        _ => None,
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;
