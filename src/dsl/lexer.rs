//! Lexer (tokenizer) for the board description language.

use crate::error::{CircuitError, Result};

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The token's text
    pub text: String,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

/// Token types in the description language.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// An identifier (kind keyword, component id, parameter name)
    Identifier,
    /// A number (integer or floating point, possibly with suffix)
    Number,
    /// A directive (starts with '.')
    Directive,
    /// Equals sign '='
    Equals,
    /// Double-quoted text, quotes and escapes removed
    Str,
    /// Newline
    Newline,
    /// End of file
    Eof,
}

/// Lexer for tokenizing board descriptions.
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    /// Get the next token.
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace_and_comments();

        let line = self.line;
        let column = self.column;
        let make = |kind, text| Token {
            kind,
            text,
            line,
            column,
        };

        let Some(&ch) = self.chars.peek() else {
            return Ok(make(TokenKind::Eof, String::new()));
        };

        let token = match ch {
            '\n' => {
                self.advance();
                make(TokenKind::Newline, "\n".to_string())
            }
            '.' => {
                self.advance();
                let text = self.read_identifier();
                if text.is_empty() {
                    return Err(CircuitError::lexer(line, column, "expected directive name after '.'"));
                }
                make(TokenKind::Directive, format!(".{}", text))
            }
            '=' => {
                self.advance();
                make(TokenKind::Equals, "=".to_string())
            }
            '"' => {
                self.advance();
                make(TokenKind::Str, self.read_quoted(line, column)?)
            }
            '-' | '+' | '0'..='9' => make(TokenKind::Number, self.read_number()),
            _ if ch.is_alphabetic() || ch == '_' => make(TokenKind::Identifier, self.read_identifier()),
            _ => {
                return Err(CircuitError::lexer(
                    line,
                    column,
                    format!("unexpected character '{}'", ch),
                ));
            }
        };

        Ok(token)
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(&ch) = self.chars.peek() {
            if ch == ' ' || ch == '\t' || ch == '\r' {
                self.advance();
            } else if ch == '#' || ch == ';' {
                // Skip comment until end of line
                while let Some(&c) = self.chars.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.advance();
                }
            } else {
                break;
            }
        }
    }

    /// Identifiers may contain '-' after the first character so editor
    /// ids like `battery-1` lex as one token.
    fn read_identifier(&mut self) -> String {
        let mut text = String::new();
        while let Some(&ch) = self.chars.peek() {
            if ch.is_alphanumeric() || ch == '_' || (ch == '-' && !text.is_empty()) {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        text
    }

    /// Read up to the closing quote. `\"` and `\\` escape a quote and a
    /// backslash; the text may not span lines.
    fn read_quoted(&mut self, line: usize, column: usize) -> Result<String> {
        let mut text = String::new();
        loop {
            match self.chars.peek().copied() {
                Some('"') => {
                    self.advance();
                    return Ok(text);
                }
                Some('\\') => {
                    self.advance();
                    match self.advance() {
                        Some(c @ ('"' | '\\')) => text.push(c),
                        _ => return Err(CircuitError::lexer(line, column, "invalid escape in quoted text")),
                    }
                }
                Some('\n') | None => {
                    return Err(CircuitError::lexer(line, column, "unterminated quoted text"));
                }
                Some(c) => {
                    text.push(c);
                    self.advance();
                }
            }
        }
    }

    fn read_number(&mut self) -> String {
        let mut text = String::new();

        // Optional sign
        if let Some(&ch) = self.chars.peek() {
            if ch == '-' || ch == '+' {
                text.push(ch);
                self.advance();
            }
        }

        self.read_digits(&mut text);

        // Decimal part
        if let Some(&'.') = self.chars.peek() {
            text.push('.');
            self.advance();
            self.read_digits(&mut text);
        }

        // Exponent part
        if let Some(&ch) = self.chars.peek() {
            if ch == 'e' || ch == 'E' {
                text.push(ch);
                self.advance();
                if let Some(&sign) = self.chars.peek() {
                    if sign == '-' || sign == '+' {
                        text.push(sign);
                        self.advance();
                    }
                }
                self.read_digits(&mut text);
            }
        }

        // Unit suffix (p, n, u, µ, m, k, M, G)
        if let Some(&ch) = self.chars.peek() {
            if matches!(ch, 'p' | 'n' | 'u' | 'µ' | 'm' | 'k' | 'K' | 'M' | 'G') {
                text.push(ch);
                self.advance();
            }
        }

        text
    }

    fn read_digits(&mut self, text: &mut String) {
        while let Some(&ch) = self.chars.peek() {
            if ch.is_ascii_digit() {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }
    }
}

/// Parse a number string with optional unit suffix.
pub fn parse_value(text: &str) -> Option<f64> {
    let text = text.trim();
    let last = text.chars().last()?;

    let multiplier = match last {
        'p' => 1e-12,
        'n' => 1e-9,
        'u' | 'µ' => 1e-6,
        'm' => 1e-3,
        'k' | 'K' => 1e3,
        'M' => 1e6,
        'G' => 1e9,
        _ => 1.0,
    };
    let num_str = if multiplier != 1.0 {
        &text[..text.len() - last.len_utf8()]
    } else {
        text
    };

    num_str.parse::<f64>().ok().map(|v| v * multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: Option<f64>, b: Option<f64>) -> bool {
        match (a, b) {
            (Some(x), Some(y)) => (x - y).abs() < x.abs() * 1e-10 + 1e-15,
            (None, None) => true,
            _ => false,
        }
    }

    #[test]
    fn test_parse_value() {
        assert!(approx_eq(parse_value("10k"), Some(10_000.0)));
        assert!(approx_eq(parse_value("47u"), Some(47e-6)));
        assert!(approx_eq(parse_value("100µ"), Some(100e-6)));
        assert!(approx_eq(parse_value("2.2"), Some(2.2)));
        assert!(approx_eq(parse_value("1e-9"), Some(1e-9)));
        assert!(approx_eq(parse_value(""), None));
        assert!(approx_eq(parse_value("k"), None));
    }

    #[test]
    fn test_lexer_dashed_identifier() {
        let mut lexer = Lexer::new("wire e1 battery-1 switch-1");
        let kinds: Vec<_> = std::iter::from_fn(|| {
            let tok = lexer.next_token().unwrap();
            (tok.kind != TokenKind::Eof).then_some(tok.text)
        })
        .collect();
        assert_eq!(kinds, vec!["wire", "e1", "battery-1", "switch-1"]);
    }

    #[test]
    fn test_lexer_negative_number_and_param() {
        let mut lexer = Lexer::new("x=-40");
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Identifier);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Equals);
        let tok = lexer.next_token().unwrap();
        assert_eq!(tok.kind, TokenKind::Number);
        assert_eq!(tok.text, "-40");
    }

    #[test]
    fn test_lexer_quoted_text() {
        let mut lexer = Lexer::new(r#"wire e4 a b "Return \"path\"""#);
        for _ in 0..4 {
            lexer.next_token().unwrap();
        }
        let tok = lexer.next_token().unwrap();
        assert_eq!(tok.kind, TokenKind::Str);
        assert_eq!(tok.text, r#"Return "path""#);

        let err = Lexer::new("\"open\nend").next_token().unwrap_err();
        assert!(matches!(err, CircuitError::LexerError { line: 1, column: 1, .. }));
    }

    #[test]
    fn test_lexer_rejects_stray_character() {
        let mut lexer = Lexer::new("battery B1 9\n  @");
        for _ in 0..4 {
            lexer.next_token().unwrap();
        }
        let err = lexer.next_token().unwrap_err();
        assert!(matches!(err, CircuitError::LexerError { line: 2, column: 3, .. }));
    }
}
