//! Wire types for the analysis service.
//!
//! DESIGN
//! ======
//! The response schema belongs to an external service and every field is
//! optional. [`AnalysisResponse::from_value`] projects each top-level field
//! independently: a field that is missing, `null`, or shaped unexpectedly
//! becomes `None` without affecting its siblings. List fields drop malformed
//! items and collapse to `None` when nothing usable remains.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Request body for `POST <endpoint>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnalysisRequest<'a> {
    pub text: &'a str,
    pub find_sources: bool,
}

impl<'a> AnalysisRequest<'a> {
    /// Build a request for `text`. Source lookup is always requested.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self { text, find_sources: true }
    }
}

/// Dominant emotion of the analyzed text.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PrimaryEmotion {
    pub label: Option<String>,
    pub score: Option<f64>,
    /// One of `"very high"`, `"high"`, `"moderate"`, `"low"` when supplied.
    pub intensity: Option<String>,
}

/// A `{ label, score }` pair, used for secondary emotions and sentiment.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LabeledScore {
    pub label: Option<String>,
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EmotionalComplexity {
    pub is_mixed: Option<bool>,
    pub diversity_score: Option<f64>,
}

impl EmotionalComplexity {
    /// True when neither field was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.is_mixed.is_none() && self.diversity_score.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct KeywordInsights {
    #[serde(deserialize_with = "deserialize_string_list")]
    pub key_phrases: Vec<String>,
    #[serde(deserialize_with = "deserialize_string_list")]
    pub emotional_triggers: Vec<String>,
}

impl KeywordInsights {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.key_phrases.is_empty() && self.emotional_triggers.is_empty()
    }
}

/// A paper suggested by the service's literature lookup.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AcademicSource {
    pub title: Option<String>,
    pub url: Option<String>,
    /// Number or string; the service sends `""` when unknown.
    pub year: Option<Value>,
    #[serde(rename = "citationCount")]
    pub citation_count: Option<Value>,
    #[serde(deserialize_with = "deserialize_string_list")]
    pub authors: Vec<String>,
}

/// Fully optional projection of the service response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisResponse {
    pub primary_emotion: Option<PrimaryEmotion>,
    pub secondary_emotions: Option<Vec<LabeledScore>>,
    pub sentiment: Option<LabeledScore>,
    pub emotional_complexity: Option<EmotionalComplexity>,
    pub keyword_insights: Option<KeywordInsights>,
    pub academic_sources: Option<Vec<AcademicSource>>,
    /// Emotion name to score, in payload order. Non-numeric scores are `None`.
    pub full_breakdown: Option<Vec<(String, Option<f64>)>>,
}

impl AnalysisResponse {
    /// Project a JSON payload. Returns `None` only when `value` is not an object.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        Some(Self {
            primary_emotion: project(object, "primary_emotion"),
            secondary_emotions: project_list(object, "secondary_emotions"),
            sentiment: project(object, "sentiment"),
            emotional_complexity: project::<EmotionalComplexity>(object, "emotional_complexity")
                .filter(|c| !c.is_empty()),
            keyword_insights: project::<KeywordInsights>(object, "keyword_insights").filter(|k| !k.is_empty()),
            academic_sources: project_list(object, "academic_sources"),
            full_breakdown: project_breakdown(object),
        })
    }
}

fn project<T: DeserializeOwned>(object: &Map<String, Value>, key: &str) -> Option<T> {
    let value = object.get(key).filter(|v| !v.is_null())?;
    if !value.is_object() {
        tracing::debug!(field = key, "dropping non-object payload field");
        return None;
    }
    match T::deserialize(value) {
        Ok(projected) => Some(projected),
        Err(error) => {
            tracing::debug!(field = key, %error, "dropping malformed payload field");
            None
        }
    }
}

fn project_list<T: DeserializeOwned>(object: &Map<String, Value>, key: &str) -> Option<Vec<T>> {
    let items = object.get(key)?.as_array()?;
    let projected: Vec<T> = items
        .iter()
        .filter(|item| item.is_object())
        .filter_map(|item| match T::deserialize(item) {
            Ok(projected) => Some(projected),
            Err(error) => {
                tracing::debug!(field = key, %error, "dropping malformed list item");
                None
            }
        })
        .collect();
    (!projected.is_empty()).then_some(projected)
}

fn project_breakdown(object: &Map<String, Value>) -> Option<Vec<(String, Option<f64>)>> {
    let entries = object.get("full_breakdown")?.as_object()?;
    let projected: Vec<_> = entries
        .iter()
        .map(|(label, score)| (label.clone(), score.as_f64()))
        .collect();
    (!projected.is_empty()).then_some(projected)
}

/// Accept any JSON value and keep only the string items of an array.
fn deserialize_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(text) if !text.trim().is_empty() => Some(text),
            _ => None,
        })
        .collect())
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
