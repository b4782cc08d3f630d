use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use serde_json::json;

use nb_core::{GenerativeModel, Result};

use crate::metadata::fallback_title;
use crate::prompt::article_from_prompt;

const MAX_POINTS: usize = 5;
const MAX_KEYWORDS: usize = 7;
const MIN_KEYWORD_CHARS: usize = 4;

const STOP_WORDS: &[&str] = &[
    "about", "after", "also", "been", "before", "being", "between", "both", "could", "during",
    "each", "even", "from", "have", "into", "just", "more", "most", "much", "only", "other",
    "over", "said", "says", "should", "some", "such", "than", "that", "their", "them", "then",
    "there", "these", "they", "this", "those", "through", "under", "very", "were", "what",
    "when", "where", "which", "while", "will", "with", "would", "your",
];

/// Offline extractive model. Reads the article back out of the prompt and
/// answers in the same JSON shape a real model would.
pub struct DummyModel;

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").finish()
    }
}

impl Default for DummyModel {
    fn default() -> Self {
        Self::new()
    }
}

impl DummyModel {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl GenerativeModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let article = article_from_prompt(prompt).unwrap_or(prompt);
        let reply = json!({
            "title": fallback_title(article),
            "summaryPoints": leading_sentences(article, MAX_POINTS),
            "sentiment": "neutral",
            "keywords": top_keywords(article, MAX_KEYWORDS),
        });
        Ok(reply.to_string())
    }
}

/// First sentences of the body, skipping a headline-only first line.
fn leading_sentences(article: &str, limit: usize) -> Vec<String> {
    let mut lines = article.lines();
    let first_line = lines.next().unwrap_or_default();
    let body = if first_line.contains('.') {
        article.to_string()
    } else {
        lines.collect::<Vec<_>>().join("\n")
    };

    body.split_inclusive(['.', '!', '?'])
        .map(|s| s.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|s| s.split_whitespace().count() > 2)
        .take(limit)
        .collect()
}

/// Most frequent words, ties broken by first appearance.
fn top_keywords(article: &str, limit: usize) -> Vec<String> {
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    for (position, word) in article.split_whitespace().enumerate() {
        let word: String = word
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        if word.chars().count() < MIN_KEYWORD_CHARS || STOP_WORDS.contains(&word.as_str()) {
            continue;
        }
        counts.entry(word).or_insert((0, position)).0 += 1;
    }

    let mut ranked: Vec<(String, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));
    ranked.into_iter().take(limit).map(|(word, _)| word).collect()
}
