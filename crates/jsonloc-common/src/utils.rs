//! Shared string helpers used when logging request data.

/// Removes control characters so header values can be logged on one line.
pub fn sanitize_header_value(input: &str) -> String {
    input.chars().filter(|c| !c.is_control()).collect()
}

/// Truncates a string to a maximum number of characters with ellipsis.
pub fn truncate_string(input: &str, max_length: usize) -> String {
    if input.chars().count() <= max_length {
        input.to_string()
    } else {
        let kept: String = input.chars().take(max_length.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Prepares an untrusted header value for a log field.
pub fn loggable_header(input: &str) -> String {
    truncate_string(&sanitize_header_value(input), 64)
}
