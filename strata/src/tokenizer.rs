//! Placeholder token scanning.
//!
//! Tokens are the text enclosed by a start and an end delimiter, for example
//! `db.host` in `${db.host}`. Delimiters may be multi-character strings.
//! Nested groups are always descended to the innermost start, so
//! `${${${TOKEN}}}` yields `TOKEN`.
//!
//! # Examples
//!
//! ```
//! use strata::tokenizer;
//!
//! assert_eq!(tokenizer::first_token("aaa${abcd}aaa${efgh}", "${", "}"), Some("abcd"));
//! assert_eq!(
//!     tokenizer::all_tokens("__${A}__${B}__${A}", "${", "}", true),
//!     vec!["A", "B"],
//! );
//! ```

use indexmap::IndexSet;

/// Returns true if `input` holds a start delimiter with an end delimiter
/// somewhere at or after it.
///
/// This is a cheap pre-check; it says nothing about nesting being balanced.
#[must_use]
pub fn has_tokens(input: &str, start: &str, end: &str) -> bool {
    if start.is_empty() || end.is_empty() {
        return false;
    }
    match (input.find(start), input.rfind(end)) {
        (Some(first_start), Some(last_end)) => last_end >= first_start,
        _ => false,
    }
}

/// Byte range of the innermost token of the leftmost placeholder group.
///
/// The window is narrowed to the text after each start delimiter and cut at
/// the first end delimiter following it, until no start delimiter is left
/// inside the window.
fn first_token_span(input: &str, start: &str, end: &str) -> Option<(usize, usize)> {
    if !has_tokens(input, start, end) {
        return None;
    }

    let mut lo = 0;
    let mut hi = input.len();
    while let Some(offset) = input[lo..hi].find(start) {
        lo += offset + start.len();
        if let Some(cut) = input[lo..hi].find(end) {
            hi = lo + cut;
        }
    }
    Some((lo, hi))
}

/// Returns the innermost token of the first (leftmost) placeholder group.
///
/// # Examples
///
/// ```
/// use strata::tokenizer::first_token;
///
/// assert_eq!(first_token("abcd", "${", "}"), None);
/// assert_eq!(first_token("${abcd}", "${", "}"), Some("abcd"));
/// assert_eq!(first_token("${${${abcd}}}", "${", "}"), Some("abcd"));
/// ```
#[must_use]
pub fn first_token<'a>(input: &'a str, start: &str, end: &str) -> Option<&'a str> {
    first_token_span(input, start, end).map(|(lo, hi)| &input[lo..hi])
}

/// Returns every token in `input`, left to right.
///
/// After each token the scan resumes past the token and its end delimiter.
/// With `distinct` set, repeated tokens are dropped, keeping the first
/// occurrence's position.
#[must_use]
pub fn all_tokens<'a>(input: &'a str, start: &str, end: &str, distinct: bool) -> Vec<&'a str> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while let Some((lo, hi)) = first_token_span(&input[pos..], start, end) {
        tokens.push(&input[pos + lo..pos + hi]);
        pos = (pos + hi + end.len()).min(input.len());
    }

    if distinct {
        let unique: IndexSet<&str> = tokens.into_iter().collect();
        return unique.into_iter().collect();
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: &str = "${";
    const END: &str = "}";

    #[test]
    fn test_has_tokens() {
        assert!(has_tokens("${a}", START, END));
        assert!(has_tokens("x ${a} y", START, END));
        assert!(!has_tokens("plain", START, END));
        assert!(!has_tokens("${unterminated", START, END));
        assert!(!has_tokens("}${", START, END));
        assert!(!has_tokens("", START, END));
    }

    #[test]
    fn test_first_token() {
        assert_eq!(first_token("abdc", START, END), None);
        assert_eq!(first_token("${abcd}", START, END), Some("abcd"));
        assert_eq!(first_token("${${${abcd}}}", START, END), Some("abcd"));
        assert_eq!(first_token("aaa${abcd}aaa${efgh}", START, END), Some("abcd"));
    }

    #[test]
    fn test_first_token_descends_into_leftmost_group() {
        assert_eq!(first_token("${a${b}}${c}", START, END), Some("b"));
        assert_eq!(first_token("${${key.2}}", START, END), Some("key.2"));
    }

    #[test]
    fn test_all_tokens() {
        assert!(all_tokens("abcd", START, END, false).is_empty());
        assert_eq!(all_tokens("${abcd}", START, END, false), vec!["abcd"]);
        assert_eq!(all_tokens("${${${TOKEN}}}", START, END, false), vec!["TOKEN"]);
        assert_eq!(
            all_tokens("aaa${abcd}aaa${efgh}", START, END, false),
            vec!["abcd", "efgh"]
        );
    }

    #[test]
    fn test_all_tokens_distinct() {
        assert_eq!(
            all_tokens("__${A}__${B}__${A}", START, END, false),
            vec!["A", "B", "A"]
        );
        assert_eq!(
            all_tokens("__${A}__${B}__${A}", START, END, true),
            vec!["A", "B"]
        );
        assert_eq!(
            all_tokens("${${${abcd}${abcd}}}", START, END, true),
            vec!["abcd"]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(all_tokens("", START, END, true).is_empty());
        assert_eq!(first_token("", START, END), None);
    }

    #[test]
    fn test_unbalanced_delimiters_yield_nothing() {
        assert_eq!(all_tokens("${a}${b", START, END, false), vec!["a"]);
        assert!(all_tokens("a}b${c", START, END, false).is_empty());
    }

    #[test]
    fn test_empty_token() {
        assert_eq!(all_tokens("${}", START, END, false), vec![""]);
    }

    #[test]
    fn test_multi_character_delimiters() {
        assert_eq!(
            all_tokens("<<a>> and <<<<b>>>>", "<<", ">>", false),
            vec!["a", "b"]
        );
        assert_eq!(first_token("%{x}%", "%{", "}%"), Some("x"));
    }

    #[test]
    fn test_empty_delimiters_never_match() {
        assert!(!has_tokens("abc", "", "}"));
        assert!(all_tokens("${a}", "${", "", false).is_empty());
    }

    #[test]
    fn test_non_ascii_text() {
        assert_eq!(
            all_tokens("héllo ${wörld} ${ключ}", START, END, false),
            vec!["wörld", "ключ"]
        );
    }
}
