//! Whitespace normalization and word wrapping.

/// Collapses every whitespace run to a single space and trims both ends.
pub fn normalize(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_ws = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            in_ws = true;
            continue;
        }
        if in_ws && !out.is_empty() {
            out.push(' ');
        }
        in_ws = false;
        out.push(ch);
    }
    out
}

pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Truncates to at most `max` characters.
pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Greedy word wrap. A chunk exceeds `width` only when it is a single word
/// longer than `width`; words are never split.
pub fn wrap_words(s: &str, width: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;
    for word in s.split_whitespace() {
        let word_len = char_len(word);
        if !line.is_empty() && line_len + 1 + word_len > width {
            chunks.push(std::mem::take(&mut line));
            line_len = 0;
        }
        if !line.is_empty() {
            line.push(' ');
            line_len += 1;
        }
        line.push_str(word);
        line_len += word_len;
    }
    if !line.is_empty() {
        chunks.push(line);
    }
    chunks
}

/// Strings of at most `threshold` characters pass through as-is; longer ones
/// are wrapped to `width`.
pub fn display_lines(s: &str, threshold: usize, width: usize) -> Vec<String> {
    if char_len(s) <= threshold {
        vec![s.to_string()]
    } else {
        wrap_words(s, width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn collapses_runs_and_trims() {
        assert_eq!(normalize("  Hello \n\t world  "), "Hello world");
        assert_eq!(normalize("a\u{a0}\u{a0}b"), "a b");
        assert_eq!(normalize(" \n "), "");
    }

    #[test]
    fn wraps_at_word_boundaries() {
        let text = "alpha beta gamma delta";
        assert_eq!(wrap_words(text, 10), vec!["alpha beta", "gamma", "delta"]);
    }

    #[test]
    fn overlong_word_is_kept_whole() {
        let word = "x".repeat(30);
        let text = format!("a {word} b");
        assert_eq!(wrap_words(&text, 10), vec!["a".to_string(), word, "b".to_string()]);
    }

    #[test]
    fn short_lines_are_not_wrapped() {
        let text = "word ".repeat(30);
        let text = normalize(&text);
        assert_eq!(char_len(&text), 149);
        assert_eq!(display_lines(&text, 150, 120), vec![text.clone()]);

        let longer = format!("{text} more");
        let lines = display_lines(&longer, 150, 120);
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| char_len(l) <= 120));
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(s in "\\PC*") {
            let once = normalize(&s);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn wrapping_preserves_word_sequence(s in "[a-z ]{0,400}", width in 5usize..130) {
            let chunks = wrap_words(&s, width);
            let rejoined = chunks.join(" ");
            let original: Vec<&str> = s.split_whitespace().collect();
            let words: Vec<&str> = rejoined.split_whitespace().collect();
            prop_assert_eq!(words, original);
            for chunk in &chunks {
                prop_assert!(char_len(chunk) <= width || !chunk.contains(' '));
            }
        }
    }
}
