//! Turns an untrusted model reply into a [`SummaryResult`] of guaranteed shape.
//!
//! Decoding happens in two stages. The cleaned reply must first parse as a
//! JSON object; if it does not, the whole result is replaced by a fixed
//! fallback. Once it does, every field is checked on its own and only the
//! broken ones are replaced, so a mostly-correct reply is kept.

use serde_json::{Map, Value};

use nb_core::{Sentiment, SummaryResult};

use crate::metadata::ArticleMetadata;

pub const PARSE_FAILURE_POINTS: [&str; 2] = [
    "Unable to parse AI response",
    "Please try again with a different article",
];
pub const PARSE_FAILURE_KEYWORDS: [&str; 2] = ["error", "parsing"];
pub const MISSING_POINTS: &str = "Summary generation failed";

const FENCE: &str = "```";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    /// The reply was a JSON object. `repaired` names the fields that had to
    /// be replaced by defaults.
    Parsed {
        summary: SummaryResult,
        repaired: Vec<&'static str>,
    },
    /// The reply could not be parsed at all.
    Fallback(SummaryResult),
}

impl Normalized {
    pub fn summary(&self) -> &SummaryResult {
        match self {
            Normalized::Parsed { summary, .. } | Normalized::Fallback(summary) => summary,
        }
    }

    pub fn into_summary(self) -> SummaryResult {
        match self {
            Normalized::Parsed { summary, .. } | Normalized::Fallback(summary) => summary,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Normalized::Fallback(_))
    }

    /// True when the model reply was used as-is.
    pub fn is_clean(&self) -> bool {
        matches!(self, Normalized::Parsed { repaired, .. } if repaired.is_empty())
    }
}

/// Remove a leading fence (with optional language tag), a trailing fence
/// and surrounding whitespace.
pub fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix(FENCE) {
        text = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    }
    if let Some(rest) = text.trim_end().strip_suffix(FENCE) {
        text = rest;
    }
    text.trim()
}

pub fn normalize_reply(raw: &str, metadata: &ArticleMetadata) -> Normalized {
    let cleaned = strip_code_fences(raw);
    let fields = match serde_json::from_str::<Value>(cleaned) {
        Ok(Value::Object(fields)) => fields,
        Ok(_) => {
            tracing::warn!("Model reply is valid JSON but not an object");
            tracing::debug!(reply = %raw, "Unusable model reply");
            return Normalized::Fallback(fallback_summary(metadata));
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to parse model reply");
            tracing::debug!(reply = %raw, "Unusable model reply");
            return Normalized::Fallback(fallback_summary(metadata));
        }
    };

    let (summary, repaired) = repair_fields(&fields, metadata);
    Normalized::Parsed { summary, repaired }
}

/// The fixed result used when a reply cannot be parsed.
pub fn fallback_summary(metadata: &ArticleMetadata) -> SummaryResult {
    SummaryResult {
        title: metadata.fallback_title.clone(),
        summary_points: PARSE_FAILURE_POINTS.iter().map(|s| s.to_string()).collect(),
        sentiment: Sentiment::Neutral,
        keywords: PARSE_FAILURE_KEYWORDS.iter().map(|s| s.to_string()).collect(),
        word_count: metadata.word_count,
        reading_time_minutes: metadata.reading_time_minutes,
    }
}

fn repair_fields(
    fields: &Map<String, Value>,
    metadata: &ArticleMetadata,
) -> (SummaryResult, Vec<&'static str>) {
    let mut repaired = Vec::new();

    let title = match fields.get("title") {
        Some(Value::String(title)) if !title.trim().is_empty() => title.clone(),
        _ => {
            repaired.push("title");
            metadata.fallback_title.clone()
        }
    };

    let summary_points = match string_items(fields.get("summaryPoints")) {
        Some((points, dropped)) if !points.is_empty() => {
            if dropped > 0 {
                repaired.push("summaryPoints");
            }
            points
        }
        _ => {
            repaired.push("summaryPoints");
            vec![MISSING_POINTS.to_string()]
        }
    };

    let sentiment = match fields
        .get("sentiment")
        .and_then(Value::as_str)
        .and_then(Sentiment::from_label)
    {
        Some(sentiment) => sentiment,
        None => {
            repaired.push("sentiment");
            Sentiment::Neutral
        }
    };

    let keywords = match string_items(fields.get("keywords")) {
        Some((keywords, dropped)) => {
            if dropped > 0 {
                repaired.push("keywords");
            }
            keywords
        }
        None => {
            repaired.push("keywords");
            Vec::new()
        }
    };

    let summary = SummaryResult {
        title,
        summary_points,
        sentiment,
        keywords,
        word_count: metadata.word_count,
        reading_time_minutes: metadata.reading_time_minutes,
    };
    (summary, repaired)
}

/// Non-blank string items of an array, plus how many items were dropped.
/// `None` when the value is not an array.
fn string_items(value: Option<&Value>) -> Option<(Vec<String>, usize)> {
    let items = value?.as_array()?;
    let kept: Vec<String> = items
        .iter()
        .filter_map(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
        .collect();
    let dropped = items.len() - kept.len();
    Some((kept, dropped))
}
