//! Lexical slicing of bracketed literals out of raw script text.
//!
//! This is a single-bracket-kind balanced scan, not a tokenizer: only the
//! bracket kind found at the anchor is tracked, and bracket characters
//! inside single-, double-, or back-quoted strings (with backslash
//! escapes) are skipped. The sliced text is not validated as data syntax;
//! that is the evaluator's job.

use regex::Regex;

/// Returns the substring from `start` (which must point at `[` or `{`)
/// through its matching closing bracket, or `None` if the text ends before
/// the bracket balances.
pub fn slice_literal(src: &str, start: usize) -> Option<&str> {
    let bytes = src.as_bytes();
    let open = *bytes.get(start)?;
    let close = match open {
        b'[' => b']',
        b'{' => b'}',
        _ => return None,
    };

    let mut depth = 0usize;
    let mut in_str = false;
    let mut quote = 0u8;
    let mut escaped = false;

    let mut i = start;
    while i < bytes.len() {
        let ch = bytes[i];
        if in_str {
            if escaped {
                escaped = false;
            } else if ch == b'\\' {
                escaped = true;
            } else if ch == quote {
                in_str = false;
            }
        } else if ch == b'"' || ch == b'\'' || ch == b'`' {
            in_str = true;
            quote = ch;
        } else if ch == open {
            depth += 1;
        } else if ch == close {
            depth -= 1;
            if depth == 0 {
                // `i` sits on an ASCII bracket, so the boundary is valid.
                return Some(&src[start..=i]);
            }
        }
        i += 1;
    }
    None
}

/// Finds the bracketed literal bound to the first top-level declaration or
/// assignment of `var_name` (`var X = [...]`, `let X = {...}`, bare
/// `X = [...]`). Returns `None` when the name is never assigned a literal,
/// or when the first real assignment is not followed by `[` or `{`.
pub fn find_var_literal<'a>(src: &'a str, var_name: &str) -> Option<&'a str> {
    let start = locate_literal_start(src, var_name)?;
    slice_literal(src, start)
}

fn locate_literal_start(src: &str, var_name: &str) -> Option<usize> {
    let pattern = format!(
        r"(?:\b(var|let|const)\s+)?\b({})\s*=",
        regex::escape(var_name)
    );
    let re = Regex::new(&pattern).ok()?;

    for caps in re.captures_iter(src) {
        let whole = caps.get(0)?;
        let has_keyword = caps.get(1).is_some();

        // A bare `X =` must not be a property access (`tpl.X =`) or an
        // identifier tail (`a$X =`); `\b` already excludes [0-9A-Za-z_].
        if !has_keyword {
            if let Some(prev) = src[..whole.start()].chars().next_back() {
                if prev == '.' || prev == '$' {
                    continue;
                }
            }
        }

        // `X == y` is a comparison, not an assignment.
        if src[whole.end()..].starts_with('=') {
            continue;
        }

        // Only the first real declaration counts: skip whitespace and
        // require the next character to open a literal.
        let rest = &src[whole.end()..];
        let offset = rest
            .char_indices()
            .find(|(_, c)| !c.is_whitespace())
            .map(|(i, _)| i)?;
        let ch = rest[offset..].chars().next()?;
        if ch == '[' || ch == '{' {
            return Some(whole.end() + offset);
        }
        return None;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn slices_flat_array() {
        let src = "var Q = [1, 2, 3]; other();";
        assert_eq!(slice_literal(src, 8), Some("[1, 2, 3]"));
    }

    #[test]
    fn tracks_only_the_anchor_bracket_kind() {
        let src = "{a: [1, {b: 2}]}";
        assert_eq!(slice_literal(src, 0), Some("{a: [1, {b: 2}]}"));
        assert_eq!(slice_literal(src, 4), Some("[1, {b: 2}]"));
    }

    #[test]
    fn skips_brackets_inside_strings() {
        let src = r#"[ "a ] b", 'c } d', `e ] f` ]"#;
        assert_eq!(slice_literal(src, 0), Some(src));
    }

    #[test]
    fn honors_backslash_escapes_in_strings() {
        let src = r#"[ "quote \" then ] inside" ]"#;
        assert_eq!(slice_literal(src, 0), Some(src));
    }

    #[test]
    fn unbalanced_literal_is_not_found() {
        assert_eq!(slice_literal("var Q = [1, 2,", 8), None);
        assert_eq!(slice_literal("[ \"unterminated", 0), None);
    }

    #[test]
    fn non_bracket_anchor_is_rejected() {
        assert_eq!(slice_literal("abc", 0), None);
        assert_eq!(slice_literal("", 0), None);
    }

    #[test]
    fn finds_declared_variable_literal() {
        let src = "const WT = {stress: {q1: {a: 1}}};\nvar Q = [{key: 'q1'}];";
        assert_eq!(find_var_literal(src, "Q"), Some("[{key: 'q1'}]"));
        assert_eq!(find_var_literal(src, "WT"), Some("{stress: {q1: {a: 1}}}"));
    }

    #[test]
    fn finds_bare_assignment() {
        let src = "Q = [1];";
        assert_eq!(find_var_literal(src, "Q"), Some("[1]"));
    }

    #[test]
    fn ignores_property_assignments() {
        let src = "tpl.Q = [1]; var Q = [2];";
        assert_eq!(find_var_literal(src, "Q"), Some("[2]"));
    }

    #[test]
    fn ignores_comparisons() {
        let src = "if (Q == null) {}\nvar Q = [3];";
        assert_eq!(find_var_literal(src, "Q"), Some("[3]"));
    }

    #[test]
    fn first_declaration_wins() {
        let src = "var Q = [1]; var Q = [2];";
        assert_eq!(find_var_literal(src, "Q"), Some("[1]"));
    }

    #[test]
    fn non_literal_assignment_is_not_found() {
        assert_eq!(find_var_literal("var Q = loadQuestions();", "Q"), None);
        assert_eq!(find_var_literal("var Q = 42;", "Q"), None);
        assert_eq!(find_var_literal("no assignment here", "Q"), None);
    }

    #[test]
    fn multibyte_text_around_the_literal_is_handled() {
        let src = "// 问卷数据\nvar Q = [[\"a\", \"很严重\"]];";
        assert_eq!(find_var_literal(src, "Q"), Some("[[\"a\", \"很严重\"]]"));
    }

    proptest! {
        /// Any serde_json-rendered array or object is sliced back exactly,
        /// regardless of nested strings carrying bracket characters.
        #[test]
        fn slices_arbitrary_json_containers(value in prop::collection::vec(
            prop_oneof![
                Just(serde_json::json!({"label": "a ] b } c"})),
                Just(serde_json::json!([1, "x{", null])),
                Just(serde_json::json!("plain \" quoted")),
                Just(serde_json::json!(3.5)),
            ],
            0..8,
        )) {
            let rendered = serde_json::to_string(&value).unwrap();
            let padded = format!("var Q = {rendered}; trailing();");
            prop_assert_eq!(slice_literal(&padded, 8), Some(rendered.as_str()));
        }
    }
}
