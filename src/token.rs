//! SQL tokens: the atomic pieces each statement is assembled from.
//!
//! Statements are built clause-by-clause as token streams and flattened to
//! text at the end, so quoting and ordering can be unit tested per clause
//! instead of only on the final string.

use crate::quote::QuoteHandler;

/// Atomic SQL output element.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // === Keywords ===
    Insert,
    Into,
    Values,
    Update,
    Set,
    Select,
    From,
    On,
    Conflict,
    Do,
    Nothing,
    Duplicate,
    Key,
    Merge,
    Using,
    Table,
    As,
    When,
    Matched,
    Not,
    Then,
    And,
    Matching,

    // === Punctuation / operators ===
    Comma,
    Dot,
    LParen,
    RParen,
    Semicolon,
    Eq,
    Space,

    /// Positional bind placeholder.
    Placeholder,
    /// Identifier, quoted on demand by the statement's [`QuoteHandler`].
    Ident(String),
    /// `qualifier.identifier` — the qualifier is emitted verbatim, the name
    /// is quoted on demand.
    Qualified {
        qualifier: &'static str,
        name: String,
    },
    /// Fully-qualified table text, emitted verbatim (already resolved by the
    /// caller's metadata layer).
    TableName(String),
    /// Raw SQL fragment (hints, dialect one-offs, value expressions).
    /// Never built from untrusted data values.
    Raw(String),
}

impl Token {
    /// Serialize this token, consulting the quote handler for identifiers.
    pub fn serialize(&self, quoter: &dyn QuoteHandler) -> String {
        match self {
            Token::Insert => "INSERT".into(),
            Token::Into => "INTO".into(),
            Token::Values => "VALUES".into(),
            Token::Update => "UPDATE".into(),
            Token::Set => "SET".into(),
            Token::Select => "SELECT".into(),
            Token::From => "FROM".into(),
            Token::On => "ON".into(),
            Token::Conflict => "CONFLICT".into(),
            Token::Do => "DO".into(),
            Token::Nothing => "NOTHING".into(),
            Token::Duplicate => "DUPLICATE".into(),
            Token::Key => "KEY".into(),
            Token::Merge => "MERGE".into(),
            Token::Using => "USING".into(),
            Token::Table => "TABLE".into(),
            Token::As => "AS".into(),
            Token::When => "WHEN".into(),
            Token::Matched => "MATCHED".into(),
            Token::Not => "NOT".into(),
            Token::Then => "THEN".into(),
            Token::And => "AND".into(),
            Token::Matching => "MATCHING".into(),

            Token::Comma => ",".into(),
            Token::Dot => ".".into(),
            Token::LParen => "(".into(),
            Token::RParen => ")".into(),
            Token::Semicolon => ";".into(),
            Token::Eq => "=".into(),
            Token::Space => " ".into(),

            Token::Placeholder => "?".into(),
            Token::Ident(name) => quoter.quote_if_needed(name),
            Token::Qualified { qualifier, name } => {
                format!("{qualifier}.{}", quoter.quote_if_needed(name))
            }
            Token::TableName(table) => table.clone(),
            Token::Raw(text) => text.clone(),
        }
    }
}

/// A stream of tokens that flattens to a SQL string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    pub fn new() -> Self {
        Self { tokens: vec![] }
    }

    pub fn push(&mut self, token: Token) -> &mut Self {
        self.tokens.push(token);
        self
    }

    pub fn append(&mut self, other: &TokenStream) -> &mut Self {
        self.tokens.extend(other.tokens.iter().cloned());
        self
    }

    /// Flatten to SQL text.
    pub fn serialize(&self, quoter: &dyn QuoteHandler) -> String {
        self.tokens.iter().map(|t| t.serialize(quoter)).collect()
    }

    // Convenience methods for common tokens
    pub fn space(&mut self) -> &mut Self {
        self.push(Token::Space)
    }
    pub fn comma(&mut self) -> &mut Self {
        self.push(Token::Comma)
    }
    pub fn lparen(&mut self) -> &mut Self {
        self.push(Token::LParen)
    }
    pub fn rparen(&mut self) -> &mut Self {
        self.push(Token::RParen)
    }
    pub fn ident(&mut self, name: impl Into<String>) -> &mut Self {
        self.push(Token::Ident(name.into()))
    }
    pub fn qualified(&mut self, qualifier: &'static str, name: impl Into<String>) -> &mut Self {
        self.push(Token::Qualified {
            qualifier,
            name: name.into(),
        })
    }
    pub fn raw(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(Token::Raw(text.into()))
    }
}
