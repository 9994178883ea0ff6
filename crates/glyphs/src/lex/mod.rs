//! # Tokens and their display styles
//!
//! Offsets and lengths of a [`Token`] are counted in chars of the
//! reconstructed text, line breaks included.
use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

use crate::color::Color;

pub mod words;

pub use words::WordTokenizer;

/// The category of a token
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TokenType {
    /// Anything without a more specific category
    Default,
    /// Spaces, tabs and line breaks
    Whitespace,
    /// A reserved word of the language
    Keyword,
    /// A name
    Identifier,
    /// A numeric literal
    Number,
    /// A quoted string or character literal
    StringLiteral,
    /// A comment
    Comment,
    /// An operator
    Operator,
    /// Brackets, commas and the like
    Separator,
    /// Text the classifier could not make sense of
    Error,
}

impl TokenType {
    /// All token types
    pub const ALL: [TokenType; 10] = [
        TokenType::Default,
        TokenType::Whitespace,
        TokenType::Keyword,
        TokenType::Identifier,
        TokenType::Number,
        TokenType::StringLiteral,
        TokenType::Comment,
        TokenType::Operator,
        TokenType::Separator,
        TokenType::Error,
    ];

    /// The built-in style (as `0xRRGGBB`)
    pub const fn default_style(self) -> u32 {
        match self {
            Self::Default | Self::Whitespace | Self::Identifier | Self::Separator => 0x000000,
            Self::Keyword => 0x0033B3,
            Self::Number => 0x1750EB,
            Self::StringLiteral => 0x067D17,
            Self::Comment => 0x8C8C8C,
            Self::Operator => 0x871094,
            Self::Error => 0xF50000,
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A classified span of the reconstructed text
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The category
    pub kind: TokenType,
    /// The offset of the first char
    pub start: usize,
    /// The number of chars
    pub len: usize,
}

impl Token {
    /// Create a new token
    pub const fn new(kind: TokenType, start: usize, len: usize) -> Self {
        Self { kind, start, len }
    }

    /// The offset after the last char
    ///
    /// Saturates at `usize::MAX`, which is never inside a text.
    pub const fn end(&self) -> usize {
        self.start.saturating_add(self.len)
    }
}

/// A token classifier
///
/// Implementations must return tokens in text order that cover every char
/// of `text` exactly once. Gaps are returned as [`TokenType::Default`] or
/// [`TokenType::Whitespace`] tokens.
pub trait Tokenizer {
    /// Split `text` into tokens
    fn tokenize(&self, text: &str) -> Vec<Token>;
}

/// A tokenizer that classifies the whole text as [`TokenType::Default`]
///
/// Used for rendering without highlighting.
#[derive(Debug, Default, Copy, Clone)]
pub struct PlainTokenizer;

impl Tokenizer for PlainTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let len = text.chars().count();
        if len == 0 {
            return Vec::new();
        }
        vec![Token::new(TokenType::Default, 0, len)]
    }
}

/// The color of every token type
///
/// Deserializes from a (possibly partial) map of overrides on top of the
/// built-in styles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<TokenType, Color>",
    into = "BTreeMap<TokenType, Color>"
)]
pub struct Theme {
    styles: BTreeMap<TokenType, Color>,
}

impl Default for Theme {
    fn default() -> Self {
        let styles = TokenType::ALL
            .iter()
            .map(|&kind| (kind, Color::from_rgb(kind.default_style())))
            .collect();
        Self { styles }
    }
}

impl From<BTreeMap<TokenType, Color>> for Theme {
    fn from(overrides: BTreeMap<TokenType, Color>) -> Self {
        let mut theme = Theme::default();
        theme.styles.extend(overrides);
        theme
    }
}

impl From<Theme> for BTreeMap<TokenType, Color> {
    fn from(theme: Theme) -> Self {
        theme.styles
    }
}

impl Theme {
    /// The color of a token type
    pub fn color(&self, kind: TokenType) -> Color {
        self.styles
            .get(&kind)
            .or_else(|| self.styles.get(&TokenType::Default))
            .copied()
            .unwrap_or(Color::BLACK)
    }

    /// Change the color of a token type
    pub fn set(&mut self, kind: TokenType, color: Color) {
        self.styles.insert(kind, color);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::{PlainTokenizer, Theme, Token, TokenType, Tokenizer};
    use crate::color::Color;

    #[test]
    fn test_plain() {
        assert_eq!(
            PlainTokenizer.tokenize("ab\nc"),
            vec![Token::new(TokenType::Default, 0, 4)]
        );
        assert_eq!(PlainTokenizer.tokenize(""), vec![]);
    }

    #[test]
    fn test_token_end_saturates() {
        assert_eq!(Token::new(TokenType::Default, 3, 4).end(), 7);
        assert_eq!(Token::new(TokenType::Default, usize::MAX, 2).end(), usize::MAX);
    }

    #[test]
    fn test_theme_overrides() {
        let theme: Theme = ron::from_str(r##"{ Keyword: "#0000FF" }"##).unwrap();
        assert_eq!(theme.color(TokenType::Keyword), Color::from_rgb(0x0000FF));
        assert_eq!(
            theme.color(TokenType::Comment),
            Color::from_rgb(TokenType::Comment.default_style())
        );
    }

    #[test]
    fn test_theme_fallback() {
        let theme = Theme::from(BTreeMap::new());
        assert_eq!(theme.color(TokenType::Error), Color::from_rgb(0xF50000));
    }
}
