/// Restore basic punctuation and capitalization to caption text:
/// capitalize the first word of each sentence and make sure the text
/// ends with a sentence terminator.
///
/// Already-clean text passes through unchanged, so running this twice
/// is harmless.
#[must_use]
pub fn restore_punctuation(text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        return String::new();
    }

    let mut result = String::with_capacity(text.len() + 1);
    let mut at_sentence_start = true;

    for c in text.chars() {
        if at_sentence_start && c.is_alphabetic() {
            result.extend(c.to_uppercase());
            at_sentence_start = false;
            continue;
        }

        if matches!(c, '.' | '!' | '?') {
            at_sentence_start = true;
        }

        result.push(c);
    }

    if !result.ends_with(['.', '!', '?']) {
        result.push('.');
    }

    result
}
