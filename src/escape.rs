//! Escaping of literal input.
//!
//! A character means different things inside and outside of a character
//! class, so there are two passes. Both first collapse every run of
//! backslashes into a single one: a backslash supplied by the caller is
//! taken as an escape they meant to write.

/// Collapses each run of one or more backslashes into a single backslash.
pub fn remove_double_escapes(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_run = false;
    for c in value.chars() {
        if c == '\\' {
            if !in_run {
                out.push('\\');
            }
            in_run = true;
        } else {
            in_run = false;
            out.push(c);
        }
    }
    out
}

/// Escapes free-standing literal text for the pattern body.
pub fn sanitize(value: &str) -> String {
    escape_with(value, is_pattern_meta)
}

/// Escapes text that ends up inside a character class.
///
/// Besides `] - \`, this escapes `[`, `&`, `~` and `^`: the engine reads
/// `[` as a nested class, `&&`/`~~`/`--` as set operations and a leading
/// `^` as negation. Escaping them keeps every class body literal.
pub fn escape_chars_for_literals(value: &str) -> String {
    escape_with(value, is_class_meta)
}

fn escape_with(value: &str, is_meta: fn(char) -> bool) -> String {
    let collapsed = remove_double_escapes(value);
    let mut out = String::with_capacity(collapsed.len() * 2);
    for c in collapsed.chars() {
        if is_meta(c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn is_pattern_meta(c: char) -> bool {
    matches!(
        c,
        '.' | '[' | ']' | '|' | '*' | '?' | '+' | '(' | ')' | '{' | '}' | '^' | '$' | '\\' | ':' | '='
    )
}

fn is_class_meta(c: char) -> bool {
    matches!(c, ']' | '-' | '\\' | '[' | '&' | '~' | '^')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn collapses_backslash_runs() {
        assert_eq!(remove_double_escapes(r"a\\\b\c"), r"a\b\c");
        assert_eq!(remove_double_escapes("plain"), "plain");
        assert_eq!(remove_double_escapes(r"\\\\"), r"\");
    }

    #[test]
    fn sanitize_escapes_metacharacters() {
        assert_eq!(sanitize("a.b*c"), r"a\.b\*c");
        assert_eq!(sanitize("(x|y)"), r"\(x\|y\)");
        assert_eq!(sanitize("key=value:1"), r"key\=value\:1");
        assert_eq!(sanitize("^[a]{2}$"), r"\^\[a\]\{2\}\$");
        assert_eq!(sanitize("a?+"), r"a\?\+");
    }

    #[test]
    fn sanitize_escapes_the_collapsed_backslash_once() {
        assert_eq!(sanitize(r"a\\\\b"), r"a\\b");
    }

    #[test]
    fn sanitize_leaves_plain_text_alone() {
        assert_eq!(sanitize("hello world-_"), "hello world-_");
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn class_escaping_touches_only_class_metacharacters() {
        assert_eq!(escape_chars_for_literals("a-z]"), r"a\-z\]");
        assert_eq!(escape_chars_for_literals(".*?"), ".*?");
        assert_eq!(escape_chars_for_literals(r"\\"), r"\\");
    }

    #[test]
    fn class_escaping_neutralizes_set_syntax() {
        assert_eq!(escape_chars_for_literals("[("), r"\[(");
        assert_eq!(escape_chars_for_literals("a&&b~~c"), r"a\&\&b\~\~c");
        assert_eq!(escape_chars_for_literals("^a"), r"\^a");
    }
}
