//! # Limits Module
//!
//! Context window sizes per model family.
//!
//! Resolution order:
//! 1. exact (case-sensitive) match against a table key
//! 2. prefix match of the lower-cased model id, longest key first
//! 3. [`DEFAULT_CONTEXT_TOKENS`]

use once_cell::sync::Lazy;

/// Fallback context window when no table key matches.
pub const DEFAULT_CONTEXT_TOKENS: u64 = 200_000;

/// Context window for models running with the extended `[1m]` context.
pub const EXTENDED_CONTEXT_TOKENS: u64 = 1_000_000;

const EXTENDED_CONTEXT_TAG: &str = "[1m]";

// Keys must be lower-case.
const KNOWN_LIMITS: &[(&str, u64)] = &[
    ("claude-3-opus", 200_000),
    ("claude-3-sonnet", 200_000),
    ("claude-3-haiku", 200_000),
    ("claude-3-5-sonnet", 200_000),
    ("claude-3-5-haiku", 200_000),
    ("claude-3-5-opus", 200_000),
    ("claude-3-7-sonnet", 200_000),
    ("claude-sonnet-4", 200_000),
    ("claude-sonnet-4-5", 200_000),
    ("claude-opus-4", 200_000),
    ("claude-opus-4-1", 200_000),
    ("claude-haiku-4-5", 200_000),
    ("claude-2.1", 200_000),
    ("claude-2", 100_000),
    ("claude-instant-1.2", 100_000),
    ("claude-instant-1", 100_000),
];

/// Table sorted longest key first so overlapping prefixes such as
/// `claude-2` / `claude-2.1` resolve to the more specific entry.
static MODEL_LIMITS: Lazy<Vec<(&'static str, u64)>> = Lazy::new(|| {
    let mut table = KNOWN_LIMITS.to_vec();
    table.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(b.0)));
    table
});

/// Context window (tokens) for `model_id`. Never fails and never returns zero.
pub fn resolve_limit(model_id: &str) -> u64 {
    if let Some((_, limit)) = MODEL_LIMITS.iter().find(|(key, _)| *key == model_id) {
        return *limit;
    }
    let lower = model_id.to_lowercase();
    MODEL_LIMITS
        .iter()
        .find(|(key, _)| lower.starts_with(key))
        .map(|(_, limit)| *limit)
        .unwrap_or(DEFAULT_CONTEXT_TOKENS)
}

/// Like [`resolve_limit`], but honours the `[1m]` extended-context tag Claude
/// Code puts on the model id or display name.
pub fn context_limit_for_model_display(model_id: &str, display_name: &str) -> u64 {
    if has_extended_context_tag(model_id) || has_extended_context_tag(display_name) {
        return EXTENDED_CONTEXT_TOKENS;
    }
    resolve_limit(model_id)
}

fn has_extended_context_tag(s: &str) -> bool {
    s.to_lowercase().contains(EXTENDED_CONTEXT_TAG)
}
