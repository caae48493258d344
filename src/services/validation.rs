use crate::dtos::rpc::FieldErrors;

pub const MAX_CONTENT_CHARS: usize = 280;

pub const EMPTY_CONTENT: &str = "String must contain at least 1 character(s)";
pub const CONTENT_TOO_LONG: &str = "String must contain at most 280 character(s)";
pub const ONLY_EMOJIS: &str = "Only emojis are allowed";

/// Checks `posts.create` input. All problems are reported under `content`.
pub fn validate_content(content: &str) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if content.is_empty() {
        errors.push("content", EMPTY_CONTENT);
        return Err(errors);
    }
    if !content.chars().all(is_emoji_char) {
        errors.push("content", ONLY_EMOJIS);
    }
    if content.chars().count() > MAX_CONTENT_CHARS {
        errors.push("content", CONTENT_TOO_LONG);
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Pictographic code points plus the components used to build emoji
/// sequences (ZWJ, variation selector, keycap, tags, skin tones, flags).
pub fn is_emoji_char(c: char) -> bool {
    matches!(c, '0'..='9' | '#' | '*')
        || matches!(
            c as u32,
            0x00A9
                | 0x00AE
                | 0x200D
                | 0x203C
                | 0x2049
                | 0x20E3
                | 0x2122
                | 0x2139
                | 0x2194..=0x2199
                | 0x21A9..=0x21AA
                | 0x231A..=0x231B
                | 0x2328
                | 0x2388
                | 0x23CF
                | 0x23E9..=0x23F3
                | 0x23F8..=0x23FA
                | 0x24C2
                | 0x25AA..=0x25AB
                | 0x25B6
                | 0x25C0
                | 0x25FB..=0x25FE
                | 0x2600..=0x27BF
                | 0x2934..=0x2935
                | 0x2B05..=0x2B07
                | 0x2B1B..=0x2B1C
                | 0x2B50
                | 0x2B55
                | 0x3030
                | 0x303D
                | 0x3297
                | 0x3299
                | 0xFE0F
                | 0x1F000..=0x1FAFF
                | 0x1FC00..=0x1FFFD
                | 0xE0020..=0xE007F
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content_errors(input: &str) -> Vec<String> {
        validate_content(input).unwrap_err().get("content").to_vec()
    }

    #[test]
    fn accepts_emoji_sequences() {
        assert!(validate_content("🎉").is_ok());
        assert!(validate_content("👩‍👩‍👧‍👦").is_ok());
        assert!(validate_content("🇳🇱❤️👍🏽").is_ok());
        assert!(validate_content("#️⃣").is_ok());
    }

    #[test]
    fn rejects_plain_text() {
        assert_eq!(content_errors("hello 🎉"), vec![ONLY_EMOJIS]);
    }

    #[test]
    fn empty_reports_only_minimum_length() {
        assert_eq!(content_errors(""), vec![EMPTY_CONTENT]);
    }

    #[test]
    fn long_content_is_rejected_at_281_chars() {
        assert!(validate_content(&"😀".repeat(280)).is_ok());
        assert_eq!(content_errors(&"😀".repeat(281)), vec![CONTENT_TOO_LONG]);
    }

    #[test]
    fn text_and_length_problems_are_both_reported() {
        assert_eq!(
            content_errors(&"a".repeat(300)),
            vec![ONLY_EMOJIS, CONTENT_TOO_LONG]
        );
    }
}
