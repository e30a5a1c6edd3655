//! Soft post-validation of single-line responses.
//!
//! The prompt instructs the model to emit bare dialogue with no speaker
//! prefix and no quotation marks; this pass repairs the common cases
//! where it ignores that instruction instead of failing the call.

/// Tidy a raw single-line completion: trim, strip a leading
/// `{speaker_name}:` prefix, and drop stray double quotes.
pub fn tidy_dialogue_line(raw: &str, speaker_name: &str) -> String {
    let mut text = raw.trim();

    let prefix = format!("{speaker_name}:");
    if let Some(head) = text.get(..prefix.len())
        && head.eq_ignore_ascii_case(&prefix)
    {
        text = text[prefix.len()..].trim_start();
    }

    text.replace(['"', '\u{201c}', '\u{201d}'], "")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_line_passes_through() {
        assert_eq!(
            tidy_dialogue_line("I need to know the truth, Professor.", "Harry Potter"),
            "I need to know the truth, Professor."
        );
    }

    #[test]
    fn test_strips_wrapping_quotes() {
        assert_eq!(
            tidy_dialogue_line("\"I need to know the truth.\"", "Harry Potter"),
            "I need to know the truth."
        );
        assert_eq!(
            tidy_dialogue_line("\u{201c}Curly quotes too.\u{201d}", "Harry Potter"),
            "Curly quotes too."
        );
    }

    #[test]
    fn test_strips_speaker_prefix_case_insensitive() {
        assert_eq!(
            tidy_dialogue_line("HARRY POTTER: Leave me alone.", "Harry Potter"),
            "Leave me alone."
        );
    }

    #[test]
    fn test_strips_prefix_and_quotes_together() {
        assert_eq!(
            tidy_dialogue_line("Harry Potter: \"Leave me alone.\"", "Harry Potter"),
            "Leave me alone."
        );
    }

    #[test]
    fn test_preserves_apostrophes() {
        assert_eq!(
            tidy_dialogue_line("It's not that simple, isn't it?", "X"),
            "It's not that simple, isn't it?"
        );
    }

    #[test]
    fn test_whitespace_only_becomes_empty() {
        assert_eq!(tidy_dialogue_line("   \n ", "X"), "");
    }
}
