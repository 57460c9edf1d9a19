//! Rendered declarations as token sequences.
//!
//! A [`Markup`] is the syntax of one declaration broken into typed
//! [`Token`]s. Tokens compare by `(kind, text, reference)`; the diff engine
//! relies on nothing else.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::api::ApiId;
use crate::error::TypeError;

/// Classification of a markup token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    Keyword,
    Punctuation,
    LiteralString,
    LiteralNumber,
    Space,
    LineBreak,
    Reference,
}

impl TokenKind {
    fn tag(&self) -> u8 {
        match self {
            Self::Keyword => 0,
            Self::Punctuation => 1,
            Self::LiteralString => 2,
            Self::LiteralNumber => 3,
            Self::Space => 4,
            Self::LineBreak => 5,
            Self::Reference => 6,
        }
    }

    /// Returns `true` for tokens that only carry layout.
    pub fn is_whitespace(&self) -> bool {
        matches!(self, Self::Space | Self::LineBreak)
    }
}

/// A single token of rendered markup.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// The API this token names, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<ApiId>,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            reference: None,
        }
    }

    pub fn keyword(text: impl Into<String>) -> Self {
        Self::new(TokenKind::Keyword, text)
    }

    pub fn punctuation(text: impl Into<String>) -> Self {
        Self::new(TokenKind::Punctuation, text)
    }

    pub fn space() -> Self {
        Self::new(TokenKind::Space, " ")
    }

    pub fn line_break() -> Self {
        Self::new(TokenKind::LineBreak, "\n")
    }

    pub fn string_literal(text: impl Into<String>) -> Self {
        Self::new(TokenKind::LiteralString, text)
    }

    pub fn number_literal(text: impl Into<String>) -> Self {
        Self::new(TokenKind::LiteralNumber, text)
    }

    /// A reference token, optionally linked to the API it names.
    pub fn reference(text: impl Into<String>, target: Option<ApiId>) -> Self {
        Self {
            kind: TokenKind::Reference,
            text: text.into(),
            reference: target,
        }
    }
}

/// The rendered form of one declaration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Markup {
    tokens: Vec<Token>,
}

impl Markup {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Content-addressed identity of this markup.
    pub fn id(&self) -> MarkupId {
        MarkupId::of(self)
    }
}

impl From<Vec<Token>> for Markup {
    fn from(tokens: Vec<Token>) -> Self {
        Self::new(tokens)
    }
}

impl FromIterator<Token> for Markup {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            f.write_str(&token.text)?;
        }
        Ok(())
    }
}

/// BLAKE3 digest of a markup's canonical encoding.
///
/// Two declarations whose markup is token-for-token identical share a
/// `MarkupId`, which lets the tree diff classify a node as changed or
/// unchanged without running the token diff.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MarkupId([u8; 32]);

impl MarkupId {
    /// Compute the id of a markup.
    pub fn of(markup: &Markup) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"apicat-markup-v1:");
        for token in &markup.tokens {
            hasher.update(&[token.kind.tag()]);
            hasher.update(&(token.text.len() as u64).to_le_bytes());
            hasher.update(token.text.as_bytes());
            match &token.reference {
                Some(id) => {
                    hasher.update(&[1]);
                    hasher.update(id.as_uuid().as_bytes());
                }
                None => {
                    hasher.update(&[0]);
                }
            }
        }
        Self(*hasher.finalize().as_bytes())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short hex representation (first 8 characters).
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }

    /// Parse from a hex string.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.len() != 32 {
            return Err(TypeError::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for MarkupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MarkupId({})", self.short_hex())
    }
}

impl fmt::Display for MarkupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
