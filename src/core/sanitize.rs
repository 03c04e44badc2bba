/// Input sanitizer for free-text parameters (phrase and seed).

/// Maximum phrase length, in UTF-16 code units.
pub const MAX_PHRASE_LEN: usize = 40;
/// Maximum seed text length, in UTF-16 code units.
pub const MAX_SEED_LEN: usize = 40;

/// Trim, clamp to `max_len` UTF-16 code units and drop `<` / `>`.
///
/// A surrogate pair straddling the limit is dropped whole. The result is
/// trimmed again so that `sanitize(sanitize(x, n), n) == sanitize(x, n)`.
pub fn sanitize(text: &str, max_len: usize) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let mut units = 0;
    let mut clamped = String::with_capacity(trimmed.len());
    for ch in trimmed.chars() {
        units += ch.len_utf16();
        if units > max_len {
            break;
        }
        if ch != '<' && ch != '>' {
            clamped.push(ch);
        }
    }

    clamped.trim().to_string()
}

/// Sanitize an optional input; `None` and blank strings both become `None`.
pub fn sanitize_opt(text: Option<&str>, max_len: usize) -> Option<String> {
    text.map(|t| sanitize(t, max_len)).filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input() {
        assert_eq!(sanitize("", 40), "");
        assert_eq!(sanitize("   ", 40), "");
        assert_eq!(sanitize_opt(None, 40), None);
        assert_eq!(sanitize_opt(Some("  "), 40), None);
    }

    #[test]
    fn trims_and_truncates() {
        assert_eq!(sanitize("  やめて  ", 40), "やめて");
        assert_eq!(sanitize("abcdef", 3), "abc");
        assert_eq!(sanitize("ab cd", 3), "ab");
    }

    #[test]
    fn strips_angle_brackets() {
        assert_eq!(sanitize("<b>たすけ</b>", 40), "bたすけ/b");
        assert_eq!(sanitize("<script>", 40), "script");
    }

    #[test]
    fn truncation_counts_before_stripping() {
        // The limit applies to the trimmed input, brackets included
        assert_eq!(sanitize("<<<<abc", 5), "a");
    }

    #[test]
    fn surrogate_pair_is_not_split() {
        assert_eq!(sanitize("a😀b", 2), "a");
        assert_eq!(sanitize("a😀b", 3), "a😀");
    }

    #[test]
    fn idempotent_on_inner_whitespace() {
        let once = sanitize("< a", 40);
        assert_eq!(once, "a");
        assert_eq!(sanitize(&once, 40), once);
    }

    #[test]
    fn zero_length_limit() {
        assert_eq!(sanitize("abc", 0), "");
    }
}
