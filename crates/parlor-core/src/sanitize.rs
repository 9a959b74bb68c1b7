//! Input sanitization for user-entered chat text.

/// Maximum number of characters accepted in a single chat message.
pub const MAX_MESSAGE_CHARS: usize = 2000;

/// Trims surrounding whitespace, keeps at most [`MAX_MESSAGE_CHARS`]
/// characters and removes NUL characters, in that order.
///
/// Never fails. NUL removal happens after truncation, so the result may be
/// shorter than the limit even when the input was longer.
pub fn sanitize(input: &str) -> String {
    input
        .trim()
        .chars()
        .take(MAX_MESSAGE_CHARS)
        .filter(|c| *c != '\0')
        .collect()
}

/// Returns true when the trimmed input holds between 1 and
/// [`MAX_MESSAGE_CHARS`] characters.
///
/// NUL characters count towards the length, so input made only of NULs is
/// valid here yet sanitizes to an empty string; check the sanitized result.
pub fn is_valid_message(input: &str) -> bool {
    let len = input.trim().chars().count();
    (1..=MAX_MESSAGE_CHARS).contains(&len)
}
