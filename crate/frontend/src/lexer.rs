use ferrolite_error::ErrorCode;
use ferrolite_ir::{SourceLocation, Span};
use ferrolite_shared::DiagnosticEngine;

use crate::token::{Token, TokenKind};

/// Scans `source` into a token stream, terminated by exactly one `Eof` (`§4.2`,
/// invariant 1 in `§8`). Any lexical problem is reported into `diagnostics` and
/// represented in-stream as an `Error` token — the lexer never aborts, matching
/// the "report, don't raise" policy (`§7`).
pub fn tokenize(source: &str, diagnostics: &mut DiagnosticEngine) -> Vec<Token> {
    let mut lexer = Lexer::new(source);
    lexer.run(diagnostics);
    lexer.tokens
}

struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Lexer { source, chars: source.char_indices().peekable(), line: 1, column: 1, tokens: Vec::new() }
    }

    fn loc(&self, position: usize) -> SourceLocation {
        SourceLocation::new(position, self.line, self.column)
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    fn peek_at(&mut self, offset: usize) -> Option<char> {
        self.chars.clone().nth(offset).map(|(_, c)| c)
    }

    fn advance(&mut self) -> Option<(usize, char)> {
        let next = self.chars.next();
        if let Some((_, c)) = next {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        next
    }

    fn push(&mut self, kind: TokenKind, lexeme: impl Into<String>, start: SourceLocation, len: usize) {
        self.tokens.push(Token::new(kind, lexeme, Span::new(start, len)));
    }

    fn run(&mut self, diagnostics: &mut DiagnosticEngine) {
        while let Some(&(byte_pos, c)) = self.chars.peek() {
            let start = self.loc(byte_pos);

            if c.is_whitespace() {
                self.advance();
                continue;
            }

            if c == '/' && self.peek_at(1) == Some('/') {
                self.scan_line_comment();
                continue;
            }
            if c == '/' && self.peek_at(1) == Some('*') {
                self.scan_block_comment(start, diagnostics);
                continue;
            }

            if c == '_' && !self.peek_at(1).is_some_and(|n| n.is_alphanumeric() || n == '_') {
                self.advance();
                self.push(TokenKind::Underscore, "_", start, 1);
                continue;
            }

            if c.is_alphabetic() || c == '_' {
                self.scan_identifier(start);
                continue;
            }
            if c.is_ascii_digit() {
                self.scan_number(start);
                continue;
            }
            if c == '"' {
                self.scan_string(start, diagnostics);
                continue;
            }
            if c == '\'' {
                self.scan_char(start, diagnostics);
                continue;
            }

            self.scan_operator(start, diagnostics);
        }

        let eof_pos = self.source.len();
        self.push(TokenKind::Eof, "", self.loc(eof_pos), 0);
    }

    fn scan_line_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }

    /// Non-nestable: the first `*/` encountered closes the comment, matching
    /// the reference lexer this system was distilled from (`§4.2`).
    fn scan_block_comment(&mut self, start: SourceLocation, diagnostics: &mut DiagnosticEngine) {
        self.advance(); // '/'
        self.advance(); // '*'
        loop {
            match self.peek() {
                None => {
                    diagnostics.emit_error(
                        ErrorCode::MalformedComment,
                        "unterminated block comment",
                        Span::point(start),
                    );
                    return;
                }
                Some('*') if self.peek_at(1) == Some('/') => {
                    self.advance();
                    self.advance();
                    return;
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    fn scan_identifier(&mut self, start: SourceLocation) {
        let mut lexeme = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                lexeme.push(c);
                self.advance();
            } else {
                break;
            }
        }
        let kind = TokenKind::keyword_from_str(&lexeme).unwrap_or(TokenKind::Identifier);
        let len = lexeme.len();
        self.push(kind, lexeme, start, len);
    }

    fn scan_number(&mut self, start: SourceLocation) {
        let mut lexeme = String::new();
        let mut is_float = false;

        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                lexeme.push(c);
                self.advance();
            } else if c == '.' && !is_float && self.peek_at(1).is_some_and(|n| n.is_ascii_digit()) {
                is_float = true;
                lexeme.push(c);
                self.advance();
            } else if (c == 'e' || c == 'E')
                && self.peek_at(1).is_some_and(|n| n.is_ascii_digit() || n == '+' || n == '-')
            {
                is_float = true;
                lexeme.push(c);
                self.advance();
                if let Some(sign @ ('+' | '-')) = self.peek() {
                    lexeme.push(sign);
                    self.advance();
                }
            } else {
                break;
            }
        }

        let kind = if is_float { TokenKind::FloatLiteral } else { TokenKind::IntegerLiteral };
        let len = lexeme.len();
        self.push(kind, lexeme, start, len);
    }

    fn scan_string(&mut self, start: SourceLocation, diagnostics: &mut DiagnosticEngine) {
        self.advance(); // opening quote
        let mut lexeme = String::new();
        loop {
            match self.peek() {
                None => {
                    diagnostics.emit_error(
                        ErrorCode::UnterminatedString,
                        "unterminated string",
                        Span::point(start),
                    );
                    let len = lexeme.len() + 1;
                    self.push(TokenKind::Error, lexeme, start, len);
                    return;
                }
                Some('"') => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    lexeme.push('\\');
                    self.advance();
                    if let Some((_, escaped)) = self.advance() {
                        lexeme.push(escaped);
                    }
                }
                Some(c) => {
                    lexeme.push(c);
                    self.advance();
                }
            }
        }
        let len = lexeme.len() + 2;
        self.push(TokenKind::StringLiteral, lexeme, start, len);
    }

    fn scan_char(&mut self, start: SourceLocation, diagnostics: &mut DiagnosticEngine) {
        self.advance(); // opening quote
        let mut lexeme = String::new();

        match self.peek() {
            Some('\\') => {
                lexeme.push('\\');
                self.advance();
                if let Some((_, escaped)) = self.advance() {
                    lexeme.push(escaped);
                }
            }
            Some(c) => {
                lexeme.push(c);
                self.advance();
            }
            None => {}
        }

        if self.peek() == Some('\'') {
            self.advance();
            let len = lexeme.len() + 2;
            self.push(TokenKind::CharLiteral, lexeme, start, len);
        } else {
            diagnostics.emit_error(ErrorCode::UnterminatedChar, "unterminated character literal", Span::point(start));
            let len = lexeme.len() + 1;
            self.push(TokenKind::Error, lexeme, start, len);
        }
    }

    /// Two-character operators are matched before their one-character
    /// prefixes (`§4.2`): `==`, `!=`, `<=`, `>=`, `+=`, `-=`, `*=`, `/=`, `%=`,
    /// `&&`, `||`, `->`, `=>`, `<<`, `>>`, `..`.
    fn scan_operator(&mut self, start: SourceLocation, diagnostics: &mut DiagnosticEngine) {
        let (_, c) = self.advance().expect("caller already peeked a char");
        let next = self.peek();

        macro_rules! two_char {
            ($expected:expr, $kind:expr, $lexeme:expr) => {
                if next == Some($expected) {
                    self.advance();
                    self.push($kind, $lexeme, start, 2);
                    return;
                }
            };
        }

        match c {
            '=' => {
                two_char!('=', TokenKind::EqualEqual, "==");
                two_char!('>', TokenKind::FatArrow, "=>");
                self.push(TokenKind::Equal, "=", start, 1);
            }
            '!' => {
                two_char!('=', TokenKind::NotEqual, "!=");
                self.push(TokenKind::Not, "!", start, 1);
            }
            '<' => {
                two_char!('=', TokenKind::LessEqual, "<=");
                two_char!('<', TokenKind::ShiftLeft, "<<");
                self.push(TokenKind::Less, "<", start, 1);
            }
            '>' => {
                two_char!('=', TokenKind::GreaterEqual, ">=");
                two_char!('>', TokenKind::ShiftRight, ">>");
                self.push(TokenKind::Greater, ">", start, 1);
            }
            '+' => {
                two_char!('=', TokenKind::PlusEqual, "+=");
                self.push(TokenKind::Plus, "+", start, 1);
            }
            '-' => {
                two_char!('=', TokenKind::MinusEqual, "-=");
                two_char!('>', TokenKind::Arrow, "->");
                self.push(TokenKind::Minus, "-", start, 1);
            }
            '*' => {
                two_char!('=', TokenKind::StarEqual, "*=");
                self.push(TokenKind::Star, "*", start, 1);
            }
            '/' => {
                two_char!('=', TokenKind::SlashEqual, "/=");
                self.push(TokenKind::Slash, "/", start, 1);
            }
            '%' => {
                two_char!('=', TokenKind::PercentEqual, "%=");
                self.push(TokenKind::Percent, "%", start, 1);
            }
            '&' => {
                two_char!('&', TokenKind::And, "&&");
                self.push(TokenKind::Ampersand, "&", start, 1);
            }
            '|' => {
                two_char!('|', TokenKind::Or, "||");
                self.push(TokenKind::Pipe, "|", start, 1);
            }
            '.' => {
                two_char!('.', TokenKind::DotDot, "..");
                self.push(TokenKind::Dot, ".", start, 1);
            }
            '^' => self.push(TokenKind::Caret, "^", start, 1),
            ':' => self.push(TokenKind::Colon, ":", start, 1),
            ';' => self.push(TokenKind::Semicolon, ";", start, 1),
            ',' => self.push(TokenKind::Comma, ",", start, 1),
            '{' => self.push(TokenKind::LeftBrace, "{", start, 1),
            '}' => self.push(TokenKind::RightBrace, "}", start, 1),
            '(' => self.push(TokenKind::LeftParen, "(", start, 1),
            ')' => self.push(TokenKind::RightParen, ")", start, 1),
            '[' => self.push(TokenKind::LeftBracket, "[", start, 1),
            ']' => self.push(TokenKind::RightBracket, "]", start, 1),
            _ => {
                diagnostics.emit_error(ErrorCode::InvalidToken, format!("unrecognized character '{c}'"), Span::point(start));
                self.push(TokenKind::Error, c.to_string(), start, c.len_utf8());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<Token> {
        let mut diagnostics = DiagnosticEngine::new();
        tokenize(source, &mut diagnostics)
    }

    #[test]
    fn terminates_with_single_eof() {
        let tokens = lex("let x = 1;");
        assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
        assert_eq!(tokens.iter().filter(|t| t.kind == TokenKind::Eof).count(), 1);
    }

    #[test]
    fn empty_input_still_terminates() {
        let tokens = lex("");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
    }

    #[test]
    fn two_character_operators_take_priority() {
        let tokens = lex("a == b && c");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert!(kinds.contains(&TokenKind::EqualEqual));
        assert!(kinds.contains(&TokenKind::And));
    }

    #[test]
    fn float_literal_with_exponent() {
        let tokens = lex("1.5e-3");
        assert_eq!(tokens[0].kind, TokenKind::FloatLiteral);
        assert_eq!(tokens[0].lexeme, "1.5e-3");
    }

    #[test]
    fn block_comment_is_not_nestable() {
        let tokens = lex("/* a /* b */ c */ 1");
        // the inner "/*" is just text; the first "*/" closes the comment, so
        // "c */ 1" is left as source.
        assert!(tokens.iter().any(|t| t.kind == TokenKind::Identifier && t.lexeme == "c"));
    }

    #[test]
    fn unterminated_string_reports_error_token() {
        let mut diagnostics = DiagnosticEngine::new();
        let tokens = tokenize("\"abc", &mut diagnostics);
        assert_eq!(tokens[0].kind, TokenKind::Error);
        assert!(diagnostics.has_errors());
    }

    #[test]
    fn token_span_monotonicity() {
        let tokens = lex("let x = 1 + 2;");
        for pair in tokens.windows(2) {
            assert!(pair[0].span.start.position <= pair[1].span.start.position);
        }
    }
}
