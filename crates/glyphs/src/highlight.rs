//! # Mapping tokens back onto glyphs
//!
//! Every char covered by a token gets the color of that token's type. Line
//! breaks are skipped, all other offsets are resolved through
//! [`ScannedImage::letter_at_mut`].
use displaydoc::Display;
use log::debug;
use thiserror::Error;

use crate::{
    grid::scan::{OffsetError, ScannedImage},
    lex::{Theme, Token, Tokenizer},
};

/// The text and the grid of an image disagree
///
/// The highlighting of the whole image is unreliable if this happens.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum AlignmentError {
    /// text has {text_chars} chars (without line breaks) but the grid has {glyphs} glyphs, first unmatched offset {offset}
    LengthMismatch {
        /// The first text offset without a glyph, or the text length if
        /// glyphs are left over
        offset: usize,
        /// Number of non-line-break chars in the text
        text_chars: usize,
        /// Number of glyphs in the grid
        glyphs: usize,
    },
    /// char {text:?} at offset {offset} was recognized as {glyph:?}
    CharMismatch {
        /// The offset in the text
        offset: usize,
        /// The char in the text
        text: char,
        /// The letter of the corresponding glyph
        glyph: char,
    },
    /// glyph {col} of row {row} (text offset {offset}) is a line break
    LineBreakGlyph {
        /// The text offset the glyph lines up with
        offset: usize,
        /// The row key of the glyph
        row: u32,
        /// The index in the row
        col: usize,
    },
    /// token {start}+{len} ends beyond the text ({text_len} chars)
    TokenOutOfRange {
        /// Start of the token
        start: usize,
        /// Length of the token
        len: usize,
        /// Length of the text
        text_len: usize,
    },
    /// no glyph for offset {offset}: {source}
    Offset {
        /// The offset that could not be resolved
        offset: usize,
        /// The lookup failure
        source: OffsetError,
    },
}

impl AlignmentError {
    /// The text offset where the misalignment was detected
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::LengthMismatch { offset, .. }
            | Self::CharMismatch { offset, .. }
            | Self::LineBreakGlyph { offset, .. }
            | Self::Offset { offset, .. } => Some(*offset),
            Self::TokenOutOfRange { start, .. } => Some(*start),
        }
    }
}

/// Stamp the color of each token onto the glyphs it covers
///
/// All tokens are checked against the text before any glyph is touched, so
/// a failed pass leaves the grid unchanged. Returns the number of glyphs
/// that were colored.
pub fn highlight(
    image: &mut ScannedImage,
    tokens: &[Token],
    theme: &Theme,
) -> Result<usize, AlignmentError> {
    let text_len = image.char_count();
    let out_of_range = |t: &&Token| {
        t.start
            .checked_add(t.len)
            .map_or(true, |end| end > text_len)
    };
    if let Some(t) = tokens.iter().find(out_of_range) {
        return Err(AlignmentError::TokenOutOfRange {
            start: t.start,
            len: t.len,
            text_len,
        });
    }

    let mut stamped = 0;
    for token in tokens {
        let color = theme.color(token.kind);
        for offset in token.start..token.end() {
            if image.char_at(offset) == Some('\n') {
                continue;
            }
            let glyph = image
                .letter_at_mut(offset)
                .map_err(|source| AlignmentError::Offset { offset, source })?;
            glyph.color = Some(color);
            stamped += 1;
        }
    }
    debug!(
        "Stamped {} glyph(s) from {} token(s)",
        stamped,
        tokens.len()
    );
    Ok(stamped)
}

/// Tokenize the reconstructed text and [`highlight`] the result
pub fn highlight_with<T: Tokenizer + ?Sized>(
    image: &mut ScannedImage,
    tokenizer: &T,
    theme: &Theme,
) -> Result<usize, AlignmentError> {
    let tokens = tokenizer.tokenize(image.pretty_string());
    highlight(image, &tokens, theme)
}

#[cfg(test)]
mod tests {
    use super::{highlight, highlight_with, AlignmentError};
    use crate::{
        color::Color,
        grid::{scan::ScannedImage, GlyphGrid, GlyphRecord},
        lang::LanguageDef,
        lex::{Theme, Token, TokenType, WordTokenizer},
    };

    fn image(rows: &[&str]) -> ScannedImage {
        let mut grid = GlyphGrid::new();
        for (r, text) in rows.iter().enumerate() {
            for (c, letter) in text.chars().enumerate() {
                grid.push(r as u32, GlyphRecord::new(letter, c as u32 * 6, r as u32 * 12, 5, 10));
            }
        }
        ScannedImage::from_grid(grid).unwrap()
    }

    fn colors(image: &ScannedImage) -> Vec<Option<Color>> {
        image.grid().glyphs().map(|g| g.color).collect()
    }

    #[test]
    fn test_single_keyword() {
        let mut image = image(&["H"]);
        let mut theme = Theme::default();
        let blue = Color::from_rgb(0x0000FF);
        theme.set(TokenType::Keyword, blue);
        let tokens = [Token::new(TokenType::Keyword, 0, 1)];
        assert_eq!(highlight(&mut image, &tokens, &theme), Ok(1));
        assert_eq!(colors(&image), vec![Some(blue)]);
    }

    #[test]
    fn test_line_break_offsets() {
        let mut image = image(&["ab", "cd"]);
        let theme = Theme::default();
        let tokens = [
            Token::new(TokenType::Keyword, 0, 2),
            Token::new(TokenType::Whitespace, 2, 1),
            Token::new(TokenType::Comment, 3, 2),
        ];
        assert_eq!(highlight(&mut image, &tokens, &theme), Ok(4));
        let kw = Some(theme.color(TokenType::Keyword));
        let cm = Some(theme.color(TokenType::Comment));
        assert_eq!(colors(&image), vec![kw, kw, cm, cm]);
    }

    #[test]
    fn test_idempotent() {
        let mut once = image(&["if x", "  y"]);
        let lexer = WordTokenizer::new(&LanguageDef::python());
        let theme = Theme::default();
        highlight_with(&mut once, &lexer, &theme).unwrap();
        let mut twice = once.clone();
        highlight_with(&mut twice, &lexer, &theme).unwrap();
        assert_eq!(colors(&once), colors(&twice));
        assert_eq!(colors(&once)[0], Some(theme.color(TokenType::Keyword)));
        assert_eq!(colors(&once)[3], Some(theme.color(TokenType::Identifier)));
    }

    #[test]
    fn test_token_out_of_range_leaves_grid() {
        let mut image = image(&["ab"]);
        let tokens = [
            Token::new(TokenType::Keyword, 0, 1),
            Token::new(TokenType::Keyword, 1, 5),
        ];
        let err = highlight(&mut image, &tokens, &Theme::default()).unwrap_err();
        assert_eq!(
            err,
            AlignmentError::TokenOutOfRange {
                start: 1,
                len: 5,
                text_len: 2
            }
        );
        assert_eq!(err.offset(), Some(1));
        assert_eq!(colors(&image), vec![None, None]);
    }

    #[test]
    fn test_overflowing_token_is_rejected() {
        let mut image = image(&["ab"]);
        let tokens = [
            Token::new(TokenType::Keyword, 0, 1),
            Token::new(TokenType::Keyword, usize::MAX, 2),
        ];
        let err = highlight(&mut image, &tokens, &Theme::default()).unwrap_err();
        assert_eq!(
            err,
            AlignmentError::TokenOutOfRange {
                start: usize::MAX,
                len: 2,
                text_len: 2
            }
        );
        assert_eq!(colors(&image), vec![None, None]);
    }

    #[test]
    fn test_empty_token_list() {
        let mut image = image(&["ab"]);
        assert_eq!(highlight(&mut image, &[], &Theme::default()), Ok(0));
        assert_eq!(colors(&image), vec![None, None]);
    }
}
