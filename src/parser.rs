use crate::error::{Error, Result};

/// A pattern literal split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternLiteral {
    pub source: String,
    pub flags: String,
}

/// Parser for slash-delimited pattern literals such as `/^a[/]b$/gi`.
///
/// The `Parser` struct holds the literal and the current byte position.
pub struct Parser<'a> {
    pub literal: &'a str,
    pub pos: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given literal.
    pub fn new(literal: &'a str) -> Self {
        Self { literal, pos: 0 }
    }

    /// Peek at the next character without advancing.
    fn peek(&self) -> Option<char> {
        self.literal[self.pos..].chars().next()
    }

    /// Advance the parser by one character and return it.
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    /// Expect a specific character and advance if it matches.
    fn expect(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn error(&self, reason: &'static str) -> Error {
        Error::InvalidLiteral {
            literal: self.literal.to_owned(),
            reason,
        }
    }

    /// Entry point.
    ///
    /// Example:
    /// - Literal: `/a+/g` → PatternLiteral { source: "a+", flags: "g" }
    pub fn parse(&mut self) -> Result<PatternLiteral> {
        if !self.expect('/') {
            return Err(self.error("expected an opening `/`"));
        }
        let source = self.parse_source()?;
        if !self.expect('/') {
            return Err(self.error("missing closing `/`"));
        }
        let flags = self.parse_flags()?;
        Ok(PatternLiteral { source, flags })
    }

    /// Parse the pattern body up to the closing slash.
    ///
    /// A slash closes the body unless it is escaped or sits inside a
    /// character class:
    /// - Literal: `/a\/b/` → source `a\/b`
    /// - Literal: `/[/]/`  → source `[/]`
    fn parse_source(&mut self) -> Result<String> {
        let start = self.pos;
        let mut in_class = false;
        while let Some(ch) = self.peek() {
            match ch {
                '/' if !in_class => break,
                '\\' => {
                    self.advance();
                    if self.advance().is_none() {
                        return Err(self.error("trailing backslash"));
                    }
                    continue;
                }
                '[' => in_class = true,
                ']' => in_class = false,
                '\n' | '\r' => return Err(self.error("line break inside literal")),
                _ => {}
            }
            self.advance();
        }
        Ok(self.literal[start..self.pos].to_owned())
    }

    /// Parse the trailing flags. Each flag must be a letter and appear once.
    fn parse_flags(&mut self) -> Result<String> {
        let mut flags = String::new();
        while let Some(ch) = self.advance() {
            if !ch.is_ascii_alphabetic() {
                return Err(self.error("flags must be letters"));
            }
            if flags.contains(ch) {
                return Err(self.error("repeated flag"));
            }
            flags.push(ch);
        }
        Ok(flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(literal: &str) -> Result<PatternLiteral> {
        Parser::new(literal).parse()
    }

    #[test]
    fn splits_source_and_flags() {
        assert_eq!(
            parse("/^test_expr$/gm").unwrap(),
            PatternLiteral {
                source: "^test_expr$".into(),
                flags: "gm".into(),
            }
        );
        assert_eq!(parse("/./").unwrap().flags, "");
    }

    #[test]
    fn escaped_and_class_slashes_stay_in_source() {
        assert_eq!(parse(r"/a\/b/").unwrap().source, r"a\/b");
        assert_eq!(parse("/[/]x/i").unwrap().source, "[/]x");
        assert_eq!(parse("//").unwrap().source, "");
    }

    #[test]
    fn rejects_malformed_literals() {
        assert!(matches!(parse("abc"), Err(Error::InvalidLiteral { .. })));
        assert!(matches!(parse("/abc"), Err(Error::InvalidLiteral { .. })));
        assert!(matches!(parse(r"/abc\"), Err(Error::InvalidLiteral { .. })));
        assert!(matches!(parse("/a/g1"), Err(Error::InvalidLiteral { .. })));
        assert!(matches!(parse("/a/gg"), Err(Error::InvalidLiteral { .. })));
    }
}
