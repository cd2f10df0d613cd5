//! Text escaping for quoted SQL literals.
//!
//! The policy is narrow: double quotes become the HTML entity `&quot;` and
//! every other character passes through. Backslashes, single quotes and
//! control characters are left alone, so the output is only safe inside the
//! literal delimiters this crate emits and is not general-purpose SQL
//! injection protection.

/// Replacement for a literal `"`.
pub const QUOTE_ENTITY: &str = "&quot;";

/// Escape one text field.
///
/// Returns a freshly allocated string; escaping the result again leaves it
/// unchanged because the entity contains no quote.
///
/// # Examples
/// ```
/// use osc2sql_core::escape_text;
///
/// assert_eq!(escape_text(r#"5"7""#), "5&quot;7&quot;");
/// assert_eq!(escape_text("residential"), "residential");
/// ```
#[must_use]
pub fn escape_text(text: &str) -> String {
    let quotes = text.matches('"').count();
    if quotes == 0 {
        return text.to_owned();
    }
    let mut escaped = String::with_capacity(text.len() + quotes * (QUOTE_ENTITY.len() - 1));
    for ch in text.chars() {
        if ch == '"' {
            escaped.push_str(QUOTE_ENTITY);
        } else {
            escaped.push(ch);
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "")]
    #[case("plain", "plain")]
    #[case("\"", "&quot;")]
    #[case("say \"hi\"", "say &quot;hi&quot;")]
    #[case("it's", "it's")]
    #[case("back\\slash", "back\\slash")]
    #[case("Straße \"Süd\"", "Straße &quot;Süd&quot;")]
    fn escapes_only_double_quotes(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(escape_text(input), expected);
    }

    #[rstest]
    fn entity_is_not_escaped_twice() {
        let once = escape_text("\"");
        assert_eq!(escape_text(&once), once);
    }

    proptest! {
        #[test]
        fn output_never_contains_a_quote(input in ".*") {
            let escaped = escape_text(&input);
            prop_assert!(!escaped.contains('"'));
        }

        #[test]
        fn unquoted_text_is_unchanged(input in "[^\"]*") {
            prop_assert_eq!(escape_text(&input), input);
        }

        #[test]
        fn growth_matches_quote_count(input in ".*") {
            let quotes = input.matches('"').count();
            let escaped = escape_text(&input);
            prop_assert_eq!(escaped.len(), input.len() + quotes * 5);
        }
    }
}
