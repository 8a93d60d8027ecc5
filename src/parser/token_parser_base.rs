//! Base token parser providing the cursor and helpers shared by the CQL
//! statement parsers.
//!
//! Scripts are tokenized once with the sqlparser tokenizer (generic dialect)
//! and split into statements on `;`. Each statement is then handed to a
//! `TokenParser`, which drops whitespace and comments up front so the
//! statement parsers only ever look at significant tokens.

use sqlparser::dialect::GenericDialect;
use sqlparser::tokenizer::{Location, Token, TokenWithSpan, Tokenizer};

use crate::error::{ConvertError, Result};
use crate::model::Identifier;

/// Tokenize a whole CQL script, keeping source locations.
pub fn tokenize(script: &str) -> Result<Vec<TokenWithSpan>> {
    let dialect = GenericDialect {};
    Tokenizer::new(&dialect, script)
        .tokenize_with_location()
        .map_err(|e| ConvertError::Parse {
            line: e.location.line,
            column: e.location.column,
            message: e.message,
        })
}

/// Token cursor over a single statement.
pub struct TokenParser {
    tokens: Vec<TokenWithSpan>,
    pos: usize,
    end_location: Location,
}

impl TokenParser {
    /// Create a new TokenParser from a CQL string.
    pub fn new(cql: &str) -> Result<Self> {
        Ok(Self::from_tokens(tokenize(cql)?))
    }

    /// Create a TokenParser over pre-tokenized input, dropping whitespace and comments.
    pub fn from_tokens(tokens: Vec<TokenWithSpan>) -> Self {
        let end_location = tokens
            .last()
            .map(|t| t.span.end)
            .unwrap_or(Location { line: 1, column: 1 });
        let tokens = tokens
            .into_iter()
            .filter(|t| !matches!(t.token, Token::Whitespace(_)))
            .collect();

        Self {
            tokens,
            pos: 0,
            end_location,
        }
    }

    // ========================================================================
    // Position and state
    // ========================================================================

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    #[inline]
    pub fn current_token(&self) -> Option<&TokenWithSpan> {
        self.tokens.get(self.pos)
    }

    #[inline]
    pub fn peek(&self, offset: usize) -> Option<&TokenWithSpan> {
        self.tokens.get(self.pos + offset)
    }

    #[inline]
    pub fn advance(&mut self) {
        if !self.is_at_end() {
            self.pos += 1;
        }
    }

    // ========================================================================
    // Token checks
    // ========================================================================

    /// Check if the current token is an unquoted word matching (case-insensitive).
    #[inline]
    pub fn check_word_ci(&self, word: &str) -> bool {
        self.peek_word_ci(0, word)
    }

    /// Check if the token at `offset` is an unquoted word matching (case-insensitive).
    pub fn peek_word_ci(&self, offset: usize, word: &str) -> bool {
        matches!(
            self.peek(offset).map(|t| &t.token),
            Some(Token::Word(w)) if w.quote_style.is_none() && w.value.eq_ignore_ascii_case(word)
        )
    }

    /// Check if the current token matches a token type (by discriminant).
    #[inline]
    pub fn check_token(&self, expected: &Token) -> bool {
        self.peek_token(0, expected)
    }

    pub fn peek_token(&self, offset: usize, expected: &Token) -> bool {
        self.peek(offset).is_some_and(|t| {
            std::mem::discriminant(&t.token) == std::mem::discriminant(expected)
        })
    }

    // ========================================================================
    // Consume / expect
    // ========================================================================

    /// Advance past a word if present.
    pub fn consume_word_ci(&mut self, word: &str) -> bool {
        if self.check_word_ci(word) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Advance past a token if present.
    pub fn consume_token(&mut self, expected: &Token) -> bool {
        if self.check_token(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Advance past a sequence of words, all or nothing.
    pub fn consume_words_ci(&mut self, words: &[&str]) -> bool {
        let matched = words
            .iter()
            .enumerate()
            .all(|(offset, word)| self.peek_word_ci(offset, word));
        if matched {
            self.pos += words.len();
        }
        matched
    }

    pub fn expect_word_ci(&mut self, word: &str) -> Result<()> {
        if self.consume_word_ci(word) {
            Ok(())
        } else {
            Err(self.unexpected(&word.to_uppercase()))
        }
    }

    pub fn expect_token(&mut self, expected: &Token) -> Result<()> {
        if self.consume_token(expected) {
            Ok(())
        } else {
            Err(self.unexpected(&format!("'{}'", expected)))
        }
    }

    /// Consume a closing `>` of a type parameter list.
    ///
    /// The tokenizer reads `>>` as a single shift operator, so nested types
    /// like `list<frozen<int>>` need the token split in two.
    pub fn expect_closing_angle(&mut self) -> Result<()> {
        match self.current_token().map(|t| &t.token) {
            Some(Token::Gt) => {
                self.advance();
                Ok(())
            }
            Some(Token::ShiftRight) => {
                self.tokens[self.pos].token = Token::Gt;
                Ok(())
            }
            _ => Err(self.unexpected("'>'")),
        }
    }

    /// Fail unless every token of the statement has been consumed.
    pub fn expect_end(&self) -> Result<()> {
        if self.is_at_end() {
            Ok(())
        } else {
            Err(self.unexpected("end of statement"))
        }
    }

    // ========================================================================
    // Identifiers and constants
    // ========================================================================

    /// Parse an identifier; double-quoted identifiers keep their case.
    pub fn parse_identifier(&mut self) -> Result<Identifier> {
        let identifier = match self.current_token().map(|t| &t.token) {
            Some(Token::Word(w)) if w.quote_style == Some('"') => Identifier::quoted(&w.value),
            Some(Token::Word(w)) if w.quote_style.is_none() => Identifier::unquoted(&w.value),
            _ => return Err(self.unexpected("identifier")),
        };
        self.advance();
        Ok(identifier)
    }

    /// Parse `name` or `keyspace.name`.
    pub fn parse_qualified_name(&mut self) -> Result<(Option<Identifier>, Identifier)> {
        let first = self.parse_identifier()?;
        if self.consume_token(&Token::Period) {
            let second = self.parse_identifier()?;
            Ok((Some(first), second))
        } else {
            Ok((None, first))
        }
    }

    /// Parse a constant (string, number, boolean or bare word) as its text.
    pub fn parse_constant(&mut self) -> Result<String> {
        let negative = self.consume_token(&Token::Minus);
        let text = match self.current_token().map(|t| &t.token) {
            Some(Token::SingleQuotedString(s)) if !negative => s.clone(),
            Some(Token::Number(n, _)) if negative => format!("-{}", n),
            Some(Token::Number(n, _)) => n.clone(),
            Some(Token::Word(w)) if w.quote_style.is_none() && !negative => w.value.clone(),
            _ => return Err(self.unexpected("constant")),
        };
        self.advance();
        Ok(text)
    }

    /// Parse a single-quoted string constant.
    pub fn parse_string(&mut self) -> Result<String> {
        match self.current_token().map(|t| &t.token) {
            Some(Token::SingleQuotedString(s)) => {
                let s = s.clone();
                self.advance();
                Ok(s)
            }
            _ => Err(self.unexpected("string constant")),
        }
    }

    // ========================================================================
    // Errors
    // ========================================================================

    /// Location of the current token, or of the end of the statement.
    pub fn location(&self) -> Location {
        self.current_token()
            .map(|t| t.span.start)
            .unwrap_or(self.end_location)
    }

    /// Build a parse error at the current position.
    pub fn error(&self, message: impl Into<String>) -> ConvertError {
        let location = self.location();
        ConvertError::Parse {
            line: location.line,
            column: location.column,
            message: message.into(),
        }
    }

    /// Build an "expected X" parse error describing the current token.
    pub fn unexpected(&self, expected: &str) -> ConvertError {
        match self.current_token() {
            Some(token) => self.error(format!("expected {} but found '{}'", expected, token.token)),
            None => self.error(format!("expected {} but reached end of statement", expected)),
        }
    }
}
