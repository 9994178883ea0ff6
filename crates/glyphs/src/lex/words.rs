//! # A word-level classifier
//!
//! This is not a parser. It splits the text into runs (words, numbers,
//! strings, comments, whitespace, operators) and looks words up in the
//! keyword list of a [`LanguageDef`]. That is enough to color recognized
//! source, which may not even be syntactically valid.
use std::collections::HashSet;

use super::{Token, TokenType, Tokenizer};
use crate::lang::LanguageDef;

/// A tokenizer driven by a [`LanguageDef`]
#[derive(Debug, Clone)]
pub struct WordTokenizer {
    keywords: HashSet<String>,
    line_comment: Option<Vec<char>>,
    block_comment: Option<(Vec<char>, Vec<char>)>,
    quotes: Vec<char>,
    operators: Vec<char>,
    separators: Vec<char>,
}

impl WordTokenizer {
    /// Create a tokenizer for a language
    pub fn new(def: &LanguageDef) -> Self {
        let chars = |s: &str| s.chars().collect::<Vec<_>>();
        Self {
            keywords: def.keywords.iter().cloned().collect(),
            line_comment: def
                .line_comment
                .as_deref()
                .filter(|s| !s.is_empty())
                .map(chars),
            block_comment: def
                .block_comment
                .as_ref()
                .filter(|(open, close)| !open.is_empty() && !close.is_empty())
                .map(|(open, close)| (chars(open.as_str()), chars(close.as_str()))),
            quotes: chars(def.quotes.as_str()),
            operators: chars(def.operators.as_str()),
            separators: chars(def.separators.as_str()),
        }
    }

    /// Classify the run starting at `start`, return its type and end
    fn scan(&self, text: &[char], start: usize) -> (TokenType, usize) {
        let c = text[start];
        let run = |pred: &dyn Fn(char) -> bool| {
            text[start..]
                .iter()
                .position(|&c| !pred(c))
                .map_or(text.len(), |n| start + n)
        };

        if c.is_whitespace() {
            return (TokenType::Whitespace, run(&|c: char| c.is_whitespace()));
        }
        if let Some(prefix) = &self.line_comment {
            if text[start..].starts_with(prefix) {
                return (TokenType::Comment, run(&|c: char| c != '\n'));
            }
        }
        if let Some((open, close)) = &self.block_comment {
            if text[start..].starts_with(open) {
                let body = start + open.len();
                return match find(&text[body..], close) {
                    Some(n) => (TokenType::Comment, body + n + close.len()),
                    None => (TokenType::Error, text.len()),
                };
            }
        }
        if self.quotes.contains(&c) {
            return self.scan_string(text, start, c);
        }
        if c.is_ascii_digit() {
            return (
                TokenType::Number,
                run(&|c: char| c.is_alphanumeric() || c == '_' || c == '.'),
            );
        }
        if c.is_alphabetic() || c == '_' || c == '$' {
            let end = run(&|c: char| c.is_alphanumeric() || c == '_' || c == '$');
            let word: String = text[start..end].iter().collect();
            let kind = if self.keywords.contains(&word) {
                TokenType::Keyword
            } else {
                TokenType::Identifier
            };
            return (kind, end);
        }
        if self.operators.contains(&c) {
            if self.separators.is_empty() && self.quotes.is_empty() {
                // every command is significant on its own
                return (TokenType::Operator, start + 1);
            }
            return (TokenType::Operator, run(&|c: char| self.operators.contains(&c)));
        }
        if self.separators.contains(&c) {
            return (TokenType::Separator, start + 1);
        }
        (TokenType::Default, start + 1)
    }

    /// A string runs to the closing quote, but never past the line end
    fn scan_string(&self, text: &[char], start: usize, quote: char) -> (TokenType, usize) {
        let mut i = start + 1;
        while i < text.len() {
            match text[i] {
                '\\' if i + 1 < text.len() && text[i + 1] != '\n' => i += 2,
                '\n' => return (TokenType::Error, i),
                c if c == quote => return (TokenType::StringLiteral, i + 1),
                _ => i += 1,
            }
        }
        (TokenType::Error, text.len())
    }
}

fn find(haystack: &[char], needle: &[char]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let chars: Vec<char> = text.chars().collect();
        let mut tokens: Vec<Token> = Vec::with_capacity(chars.len() / 4);
        let mut start = 0;
        while start < chars.len() {
            let (kind, end) = self.scan(&chars, start);
            let end = end.max(start + 1).min(chars.len());
            // merge runs of unclassified chars
            let merge = kind == TokenType::Default
                && matches!(tokens.last(), Some(t) if t.kind == TokenType::Default && t.end() == start);
            match tokens.last_mut() {
                Some(last) if merge => last.len += end - start,
                _ => tokens.push(Token::new(kind, start, end - start)),
            }
            start = end;
        }
        tokens
    }
}
