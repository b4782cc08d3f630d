use std::fmt::Write;

use nb_core::{HistoryEntry, Sentiment, SummaryResult};

fn sentiment_badge(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "🟢 positive",
        Sentiment::Negative => "🔴 negative",
        Sentiment::Neutral => "⚪ neutral",
    }
}

pub fn render_summary(summary: &SummaryResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "📰 {}", summary.title);
    let _ = writeln!(
        out,
        "   {} words · {} min read · {}",
        summary.word_count,
        summary.reading_time_minutes,
        sentiment_badge(summary.sentiment)
    );
    out.push('\n');
    for point in &summary.summary_points {
        let _ = writeln!(out, "  • {}", point);
    }
    if !summary.keywords.is_empty() {
        out.push('\n');
        let tags: Vec<String> = summary.keywords.iter().map(|k| format!("#{}", k)).collect();
        let _ = writeln!(out, "  {}", tags.join(" "));
    }
    out
}

pub fn render_history(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return "Your summarization history will appear here\n".to_string();
    }

    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(
            out,
            "{}  {}  {}",
            entry.timestamp.format("%Y-%m-%d"),
            entry.id,
            entry.title
        );
        for point in &entry.preview_points {
            let _ = writeln!(out, "    • {}", point);
        }
    }
    out
}
