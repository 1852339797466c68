use colored::Colorize;

use crate::token::{Token, TokenKind};

/// Pretty-prints a token stream for the `print-tokens` debug feature.
pub struct TokenPrinter;

impl Default for TokenPrinter {
    fn default() -> Self {
        TokenPrinter::new()
    }
}

impl TokenPrinter {
    pub fn new() -> Self {
        TokenPrinter
    }

    pub fn print(&self, tokens: &[Token]) {
        println!("{}", "=== TOKENS ===".bright_cyan().bold());
        for (i, token) in tokens.iter().enumerate() {
            self.print_token(i, token);
        }
        println!("{}", "=== END TOKENS ===".bright_cyan().bold());
    }

    fn print_token(&self, index: usize, token: &Token) {
        let kind_str = self.format_kind(token.kind);
        let lexeme_str = self.format_lexeme(&token.lexeme, token.kind);
        let position_str = format!("{}:{}", token.span.start.line, token.span.start.column).dimmed();
        println!("{:4}: {:24} {} ({})", index.to_string().bright_black(), kind_str, lexeme_str, position_str);
    }

    fn format_kind(&self, kind: TokenKind) -> String {
        let text = format!("{kind:?}");
        match kind {
            TokenKind::Let
            | TokenKind::Mut
            | TokenKind::Fn
            | TokenKind::Return
            | TokenKind::If
            | TokenKind::Else
            | TokenKind::While
            | TokenKind::For
            | TokenKind::In
            | TokenKind::Break
            | TokenKind::Continue
            | TokenKind::Struct
            | TokenKind::Enum
            | TokenKind::Impl => text.blue().bold().to_string(),
            TokenKind::IntegerLiteral
            | TokenKind::FloatLiteral
            | TokenKind::StringLiteral
            | TokenKind::CharLiteral
            | TokenKind::BooleanLiteral => text.green().to_string(),
            TokenKind::Identifier => text.cyan().to_string(),
            TokenKind::Error => text.red().bold().to_string(),
            TokenKind::Eof => text.bright_purple().to_string(),
            _ => text.yellow().to_string(),
        }
    }

    fn format_lexeme(&self, lexeme: &str, kind: TokenKind) -> String {
        match kind {
            TokenKind::StringLiteral => format!("\"{lexeme}\"").green().to_string(),
            TokenKind::Error => format!("'{lexeme}'").red().to_string(),
            TokenKind::Eof => "<eof>".bright_purple().to_string(),
            _ if lexeme.is_empty() => "<empty>".dimmed().to_string(),
            _ => format!("'{lexeme}'"),
        }
    }
}
