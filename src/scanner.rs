/// Replace every optional group `{...}` in `pattern` with whatever `resolve`
/// returns for the group body. The braces themselves are dropped.
///
/// Grammar, single pass, left to right:
/// - `{` opens a candidate group; the first `}` after it closes the group.
/// - if another `{` shows up before the closing `}`, the earlier `{` is
///   literal text and the newer one becomes the candidate (no nesting).
/// - an unclosed `{` and an unmatched `}` are literal text.
///
/// Text produced by `resolve` is never rescanned.
pub fn replace_groups<F>(pattern: &str, mut resolve: F) -> String
where
    F: FnMut(&str) -> String,
{
    let mut out = String::with_capacity(pattern.len());
    let mut rest = pattern;

    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        match after.find(|c: char| c == '{' || c == '}') {
            Some(i) if after.as_bytes()[i] == b'}' => {
                out.push_str(&rest[..open]);
                out.push_str(&resolve(&after[..i]));
                rest = &after[i + 1..];
            }
            Some(i) => {
                // keep the stray '{' and restart from the inner one
                out.push_str(&rest[..open + 1 + i]);
                rest = &after[i..];
            }
            None => break,
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upper(body: &str) -> String {
        body.to_uppercase()
    }

    #[test]
    fn groups_are_resolved_and_braces_dropped() {
        assert_eq!(replace_groups("a{bc}d{e}", upper), "aBCdE");
    }

    #[test]
    fn empty_group_yields_nothing() {
        assert_eq!(replace_groups("x{}y", upper), "xy");
    }

    #[test]
    fn unclosed_brace_is_literal() {
        assert_eq!(replace_groups("a{bc", upper), "a{bc");
        assert_eq!(replace_groups("{a}{b", upper), "A{b");
    }

    #[test]
    fn unmatched_closing_brace_is_literal() {
        assert_eq!(replace_groups("a}b{c}", upper), "a}bC");
    }

    #[test]
    fn nested_braces_only_resolve_innermost_pair() {
        assert_eq!(replace_groups("{a{b}c}", upper), "{aBc}");
    }

    #[test]
    fn resolved_text_is_not_rescanned() {
        let out = replace_groups("{x}", |_| "{y}".to_string());
        assert_eq!(out, "{y}");
    }

    #[test]
    fn multibyte_text_survives() {
        assert_eq!(replace_groups("é{ü}ß", |b| format!("[{}]", b)), "é[ü]ß");
    }
}
