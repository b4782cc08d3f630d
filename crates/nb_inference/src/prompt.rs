/// Line that introduces the article at the end of every prompt.
pub const ARTICLE_MARKER: &str = "Article:\n";

const INSTRUCTIONS: &str = r#"Analyze the following news article and return ONLY a valid JSON object (no markdown, no code blocks, just raw JSON) with this exact structure:

{
  "title": "A clear, concise title for the article (max 100 chars)",
  "summaryPoints": ["bullet point 1", "bullet point 2", "bullet point 3", "bullet point 4", "bullet point 5"],
  "sentiment": "positive or negative or neutral",
  "keywords": ["keyword1", "keyword2", "keyword3", "keyword4", "keyword5", "keyword6", "keyword7"]
}

Requirements:
- summaryPoints: Exactly 3-5 concise bullet points (each 10-25 words) capturing the most important information
- sentiment: Analyze the overall tone and classify as "positive", "negative", or "neutral"
- keywords: Extract 5-7 relevant keywords or short phrases that best represent the article's main topics
- Return ONLY valid JSON, no additional text or formatting
"#;

pub fn build_prompt(article: &str) -> String {
    format!("{}\n{}{}", INSTRUCTIONS, ARTICLE_MARKER, article)
}

/// Recover the article embedded by [`build_prompt`].
pub fn article_from_prompt(prompt: &str) -> Option<&str> {
    prompt
        .strip_prefix(INSTRUCTIONS)
        .and_then(|rest| rest.strip_prefix('\n'))
        .and_then(|rest| rest.strip_prefix(ARTICLE_MARKER))
}
