//! Deterministic article metadata that never depends on the model.

/// Average reading speed used for reading-time estimates.
pub const WORDS_PER_MINUTE: usize = 200;
pub const UNTITLED_ARTICLE: &str = "Untitled Article";

const MIN_LINE_TITLE_CHARS: usize = 6;
const MAX_LINE_TITLE_CHARS: usize = 199;
const MAX_SENTENCE_TITLE_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleMetadata {
    pub word_count: usize,
    pub reading_time_minutes: usize,
    pub fallback_title: String,
}

impl ArticleMetadata {
    pub fn extract(text: &str) -> Self {
        let word_count = word_count(text);
        Self {
            word_count,
            reading_time_minutes: reading_time_minutes(word_count),
            fallback_title: fallback_title(text),
        }
    }
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn reading_time_minutes(word_count: usize) -> usize {
    word_count.div_ceil(WORDS_PER_MINUTE).max(1)
}

/// Heuristic title: a plausible first line, else the first sentence, else
/// [`UNTITLED_ARTICLE`].
pub fn fallback_title(text: &str) -> String {
    let text = text.trim();
    let first_line = text.lines().next().unwrap_or_default().trim();
    let line_len = first_line.chars().count();
    if (MIN_LINE_TITLE_CHARS..=MAX_LINE_TITLE_CHARS).contains(&line_len) {
        return first_line.to_string();
    }

    let first_sentence: String = text
        .split('.')
        .next()
        .unwrap_or_default()
        .chars()
        .take(MAX_SENTENCE_TITLE_CHARS)
        .collect();
    if !first_sentence.trim().is_empty() {
        return first_sentence;
    }

    UNTITLED_ARTICLE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count_splits_on_whitespace_runs() {
        assert_eq!(word_count("one  two\n\nthree\tfour "), 4);
        assert_eq!(word_count(""), 0);
    }

    #[test]
    fn test_reading_time_rounds_up_with_minimum() {
        assert_eq!(reading_time_minutes(0), 1);
        assert_eq!(reading_time_minutes(1), 1);
        assert_eq!(reading_time_minutes(200), 1);
        assert_eq!(reading_time_minutes(201), 2);
        assert_eq!(reading_time_minutes(400), 2);
        assert_eq!(reading_time_minutes(401), 3);
        for words in 1..1_000 {
            let expected = (words as f64 / WORDS_PER_MINUTE as f64).ceil() as usize;
            assert_eq!(reading_time_minutes(words), expected);
        }
    }

    #[test]
    fn test_title_from_first_line() {
        let text = "Quantum Breakthrough\nResearchers announced a new processor today. It is fast.";
        assert_eq!(fallback_title(text), "Quantum Breakthrough");
    }

    #[test]
    fn test_title_from_first_sentence() {
        // A single line too long to be a headline, with a period at index 30.
        let text = format!("{}. {}", "a".repeat(30), "filler words ".repeat(20));
        assert!(text.chars().count() > MAX_LINE_TITLE_CHARS);
        assert_eq!(fallback_title(&text), "a".repeat(30));
    }

    #[test]
    fn test_first_sentence_is_truncated() {
        let text = format!("{}. rest", "x".repeat(250));
        assert_eq!(fallback_title(&text), "x".repeat(MAX_SENTENCE_TITLE_CHARS));
    }

    #[test]
    fn test_short_first_line_falls_through() {
        let text = "Hi\nThe committee met on Tuesday. Nothing was decided.";
        assert_eq!(fallback_title(text), "Hi\nThe committee met on Tuesday");
    }

    #[test]
    fn test_first_sentence_keeps_inner_whitespace() {
        let text = format!("Breaking  news:\tthe city council votes. {}", "filler ".repeat(40));
        assert_eq!(fallback_title(&text), "Breaking  news:\tthe city council votes");
    }

    #[test]
    fn test_untitled_article() {
        let text = format!(".{}", "y".repeat(250));
        assert_eq!(fallback_title(&text), UNTITLED_ARTICLE);
    }

    #[test]
    fn test_extract_combines_everything() {
        let text = format!("Markets Rally\n{}", "word ".repeat(450));
        let meta = ArticleMetadata::extract(text.trim());
        assert_eq!(meta.word_count, 452);
        assert_eq!(meta.reading_time_minutes, 3);
        assert_eq!(meta.fallback_title, "Markets Rally");
    }
}
