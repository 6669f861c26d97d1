//! Text helpers applied to prompts and generated clauses.

/// Character the generator uses to mark emphasis in clause text.
pub const EMPHASIS_MARKER: char = '*';

/// Maximum number of characters shown for a prompt in the history list.
pub const HISTORY_PREVIEW_CHARS: usize = 50;

const ELLIPSIS: &str = "...";

/// Remove every emphasis marker from a generated clause.
pub fn strip_emphasis(clause: &str) -> String {
    clause.chars().filter(|c| *c != EMPHASIS_MARKER).collect()
}

/// Shorten a prompt for display, appending an ellipsis when it was cut.
pub fn truncate_preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}

/// Local part of an email address, used when no display name is set.
pub fn email_local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}
