//! Text rendering of backend records for agent consumption.

use crate::model::{EntryAnalysis, JournalEntry, Page, UserProfile, WeeklyReview, WritingStyle};

/// Scores strictly above this are positive.
pub const POSITIVE_THRESHOLD: f64 = 0.3;
/// Scores strictly below this are negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.3;
/// Number of content characters shown in search previews.
pub const PREVIEW_CHARS: usize = 150;

/// Label a sentiment score. Both thresholds are exclusive.
pub fn sentiment_label(score: f64) -> &'static str {
    if score > POSITIVE_THRESHOLD {
        "Positive"
    } else if score < NEGATIVE_THRESHOLD {
        "Negative"
    } else {
        "Neutral"
    }
}

/// First [`PREVIEW_CHARS`] characters of `content` followed by an ellipsis.
///
/// The ellipsis is appended even when nothing was cut.
pub fn content_preview(content: &str) -> String {
    let mut preview: String = content.chars().take(PREVIEW_CHARS).collect();
    preview.push_str("...");
    preview
}

/// "Sentiment: Positive (0.52)", or a placeholder when no score exists.
pub fn sentiment_line(analysis: &EntryAnalysis) -> String {
    match analysis.sentiment_score {
        Some(score) => format!("Sentiment: {} ({:.2})", sentiment_label(score), score),
        None => "Sentiment: not available".to_string(),
    }
}

fn join_or(items: &[String], empty: &str) -> String {
    if items.is_empty() {
        empty.to_string()
    } else {
        items.join(", ")
    }
}

fn bullets(lines: &mut Vec<String>, items: &[String]) {
    lines.extend(items.iter().map(|item| format!("- {}", item)));
}

fn display_title(entry: &JournalEntry) -> &str {
    if entry.title.trim().is_empty() {
        "(untitled)"
    } else {
        &entry.title
    }
}

/// Two-line summary of an entry inside a numbered list.
fn entry_list_item(index: usize, entry: &JournalEntry) -> Vec<String> {
    let mut meta = format!(
        "   ID: {} | Date: {} | Status: {}",
        entry.id, entry.date, entry.status
    );
    if let Some(mood) = &entry.mood {
        meta.push_str(&format!(" | Mood: {}", mood));
    }

    let mut lines = vec![format!("{}. {}", index, display_title(entry)), meta];
    if !entry.tags.is_empty() {
        lines.push(format!("   Tags: {}", entry.tags.join(", ")));
    }
    lines
}

/// Rendered page of entries with totals and a next-offset hint.
pub fn entry_page(page: &Page<JournalEntry>) -> String {
    if page.items.is_empty() {
        return if page.pagination.total > 0 {
            format!(
                "No entries at offset {} ({} entries in total).",
                page.pagination.offset, page.pagination.total
            )
        } else {
            "No journal entries found.".to_string()
        };
    }

    let mut lines = vec![format!(
        "Found {} entries (showing {}):",
        page.pagination.total,
        page.items.len()
    )];
    let start = page.pagination.offset as usize;
    for (i, entry) in page.items.iter().enumerate() {
        lines.push(String::new());
        lines.extend(entry_list_item(start + i + 1, entry));
    }
    if page.has_more() {
        lines.push(String::new());
        lines.push(format!(
            "More entries available. Use offset={} to see the next page.",
            page.next_offset()
        ));
    }
    lines.join("\n")
}

/// Rendered search results with content previews.
pub fn search_results(query: &str, page: &Page<JournalEntry>) -> String {
    if page.items.is_empty() {
        return format!("No entries found matching \"{}\".", query);
    }

    let mut header = format!(
        "Found {} entries matching \"{}\"",
        page.items.len(),
        query
    );
    if page.pagination.total > page.items.len() as u64 {
        header.push_str(&format!(" ({} total matches)", page.pagination.total));
    }
    header.push(':');

    let mut lines = vec![header];
    for (i, entry) in page.items.iter().enumerate() {
        lines.push(String::new());
        lines.push(format!(
            "{}. {} ({}) - ID: {}",
            i + 1,
            display_title(entry),
            entry.date,
            entry.id
        ));
        lines.push(format!("   {}", content_preview(&entry.content)));
    }
    lines.join("\n")
}

/// Full entry with content and, when present, its analysis.
pub fn entry_detail(entry: &JournalEntry, include_analysis: bool) -> String {
    let mut lines = vec![
        format!("# {}", display_title(entry)),
        String::new(),
        format!("ID: {}", entry.id),
        format!("Date: {}", entry.date),
        format!("Status: {}", entry.status),
    ];
    if let Some(mood) = &entry.mood {
        lines.push(format!("Mood: {}", mood));
    }
    if !entry.tags.is_empty() {
        lines.push(format!("Tags: {}", entry.tags.join(", ")));
    }
    if let Some(created) = &entry.created_at {
        lines.push(format!("Created: {}", created));
    }
    if let Some(updated) = &entry.updated_at {
        lines.push(format!("Updated: {}", updated));
    }
    lines.push(String::new());
    lines.push(entry.content.clone());

    if include_analysis {
        lines.push(String::new());
        lines.push("## Analysis".to_string());
        match &entry.analysis {
            Some(analysis) => {
                lines.push(sentiment_line(analysis));
                lines.push(format!("Themes: {}", join_or(&analysis.themes, "none")));
                if !analysis.insights.is_empty() {
                    lines.push("Insights:".to_string());
                    bullets(&mut lines, &analysis.insights);
                }
            }
            None => lines.push(
                "No analysis yet. Finalize the entry to generate one.".to_string(),
            ),
        }
    }
    lines.join("\n")
}

/// Confirmation for a finalized entry, leading with its key insight.
pub fn finalized_entry(entry: &JournalEntry) -> String {
    let mut lines = vec![
        "Entry finalized.".to_string(),
        String::new(),
        format!("ID: {}", entry.id),
        format!("Title: {}", display_title(entry)),
        format!("Status: {}", entry.status),
    ];

    let analysis = entry.analysis.clone().unwrap_or_default();
    lines.push(sentiment_line(&analysis));
    lines.push(format!("Themes: {}", join_or(&analysis.themes, "none")));
    if let Some((key, rest)) = analysis.insights.split_first() {
        lines.push(format!("Key insight: {}", key));
        if !rest.is_empty() {
            lines.push("Additional insights:".to_string());
            bullets(&mut lines, rest);
        }
    }
    lines.join("\n")
}

/// Confirmation for a newly created entry.
pub fn created_entry(entry: &JournalEntry) -> String {
    let mut lines = vec![
        "Journal entry created.".to_string(),
        String::new(),
        format!("ID: {}", entry.id),
        format!("Title: {}", display_title(entry)),
        format!("Status: {}", entry.status),
        format!("Date: {}", entry.date),
    ];
    if let Some(mood) = &entry.mood {
        lines.push(format!("Mood: {}", mood));
    }
    if !entry.tags.is_empty() {
        lines.push(format!("Tags: {}", entry.tags.join(", ")));
    }
    lines.join("\n")
}

/// A weekly review.
pub fn weekly_review(review: &WeeklyReview) -> String {
    let mut lines = vec![
        format!("# Weekly Review: {} to {}", review.week_start, review.week_end),
        String::new(),
        format!("ID: {}", review.id),
        format!("Entries: {}", review.entry_count),
        String::new(),
        "## Summary".to_string(),
        review.summary.clone(),
    ];
    if let Some(trend) = &review.emotional_trend {
        lines.push(String::new());
        lines.push("## Emotional Trend".to_string());
        lines.push(trend.clone());
    }
    if !review.themes.is_empty() {
        lines.push(String::new());
        lines.push("## Themes".to_string());
        bullets(&mut lines, &review.themes);
    }
    if !review.insights.is_empty() {
        lines.push(String::new());
        lines.push("## Insights".to_string());
        bullets(&mut lines, &review.insights);
    }
    lines.join("\n")
}

/// A page of weekly reviews.
pub fn review_page(page: &Page<WeeklyReview>) -> String {
    if page.items.is_empty() {
        return "No weekly reviews found.".to_string();
    }

    let mut lines = vec![format!(
        "Found {} weekly reviews (showing {}):",
        page.pagination.total,
        page.items.len()
    )];
    lines.push(String::new());
    for review in &page.items {
        lines.push(format!(
            "- {} to {} ({} entries) - ID: {}",
            review.week_start, review.week_end, review.entry_count, review.id
        ));
    }
    if page.has_more() {
        lines.push(String::new());
        lines.push(format!(
            "More reviews available. Use offset={} to see the next page.",
            page.next_offset()
        ));
    }
    lines.join("\n")
}

/// The user's writing style.
pub fn writing_style(style: &WritingStyle) -> String {
    let mut lines = vec![format!("# Writing Style: {}", style.current_style)];
    if let Some(description) = &style.description {
        lines.push(String::new());
        lines.push(description.clone());
    }
    if let Some(tone) = &style.voice_tone {
        lines.push(String::new());
        lines.push(format!("Voice tone: {}", tone));
    }
    if !style.suggestions.is_empty() {
        lines.push(String::new());
        lines.push("## Suggestions".to_string());
        bullets(&mut lines, &style.suggestions);
    }
    lines.join("\n")
}

/// Profile summary used as agent context.
pub fn profile(profile: &UserProfile) -> String {
    let mut lines = vec![
        format!("# Journal Profile: {}", profile.username),
        String::new(),
        format!("User ID: {}", profile.id),
    ];
    if let Some(email) = &profile.email {
        lines.push(format!("Email: {}", email));
    }
    if let Some(tz) = &profile.timezone {
        lines.push(format!("Timezone: {}", tz));
    }
    if let Some(since) = &profile.journaling_since {
        lines.push(format!("Journaling since: {}", since));
    }
    lines.push(format!("Total entries: {}", profile.total_entries));
    lines.push(format!("Current streak: {} days", profile.current_streak));
    if let Some(style) = &profile.preferred_writing_style {
        lines.push(format!("Preferred writing style: {}", style));
    }
    lines.join("\n")
}

/// Summary of the most recent entries used as agent context.
pub fn recent_entries(page: &Page<JournalEntry>) -> String {
    if page.items.is_empty() {
        return "# Recent Entries\n\nNo journal entries yet.".to_string();
    }

    let mut lines = vec!["# Recent Entries".to_string()];
    for (i, entry) in page.items.iter().enumerate() {
        lines.push(String::new());
        lines.extend(entry_list_item(i + 1, entry));
    }
    lines.push(String::new());
    lines.push(format!(
        "Showing {} of {} entries.",
        page.items.len(),
        page.pagination.total
    ));
    lines.join("\n")
}
