pub mod contracts;
pub mod events;
pub mod favorites;
pub mod messages;
pub mod search;
pub mod services;
pub mod vendors;

/// Trimmed value, or `None` when blank.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
