//! Helpers for fitting generated text into Discord messages.

/// Split `text` into pieces of at most `limit` characters, in order.
///
/// Discord counts characters, not bytes, so the split walks `char`s and
/// can never land inside a multi-byte sequence.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    if text.len() <= limit {
        // Byte length bounds character count, so this always fits.
        return vec![text.to_string()];
    }
    text.chars()
        .collect::<Vec<_>>()
        .chunks(limit)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_messages_pass_through_whole() {
        let chunks = split_message("a quiet evening in London", 2000);
        assert_eq!(chunks, vec!["a quiet evening in London".to_string()]);
    }

    #[test]
    fn long_messages_split_in_order() {
        let text = "a".repeat(4500);
        let chunks = split_message(&text, 2000);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].chars().count(), 2000);
        assert_eq!(chunks[1].chars().count(), 2000);
        assert_eq!(chunks[2].chars().count(), 500);
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn multibyte_text_never_splits_inside_a_character() {
        let text = "⚙".repeat(2500);
        let chunks = split_message(&text, 2000);
        assert_eq!(chunks.len(), 2);
        assert!(chunks.iter().all(|c| c.chars().count() <= 2000));
        assert_eq!(chunks.concat(), text);
    }
}
