//! # Glyph pixel masks
use std::fmt;

use serde::{
    de::{Error, SeqAccess, Visitor},
    ser::SerializeSeq,
    Deserialize, Deserializer, Serialize, Serializer,
};

/// A binary pixel mask of a single glyph
///
/// `true` is a foreground (ink) pixel. The mask is stored row by row and
/// is always rectangular.
#[derive(Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

/// A mask could not be built because its rows differ in length
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("mask row {row} has {actual} columns, expected {expected}")]
pub struct RaggedMaskError {
    /// The index of the offending row
    pub row: usize,
    /// The width of the first row
    pub expected: usize,
    /// The width of the offending row
    pub actual: usize,
}

impl Mask {
    /// Create an empty (all blank) mask
    pub fn new(width: u32, height: u32) -> Self {
        Mask {
            width,
            height,
            bits: vec![false; (width as usize) * (height as usize)],
        }
    }

    /// Build a mask from a list of rows
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self, RaggedMaskError> {
        let expected = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut bits = Vec::with_capacity(expected * rows.len());
        for (row, r) in rows.iter().enumerate() {
            let r = r.as_ref();
            if r.len() != expected {
                return Err(RaggedMaskError {
                    row,
                    expected,
                    actual: r.len(),
                });
            }
            bits.extend_from_slice(r);
        }
        Ok(Mask {
            width: expected as u32,
            height: rows.len() as u32,
            bits,
        })
    }

    /// Parse a mask from text rows, `#`, `X` or `1` mark ink
    pub fn from_text_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, RaggedMaskError> {
        let rows: Vec<Vec<bool>> = rows
            .iter()
            .map(|r| r.as_ref().chars().map(is_ink_char).collect())
            .collect();
        Self::from_rows(&rows)
    }

    /// Number of columns
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The value at column `x` of row `y`, `None` if outside the mask
    pub fn get(&self, x: u32, y: u32) -> Option<bool> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.bits
            .get((y as usize) * (self.width as usize) + x as usize)
            .copied()
    }

    /// Set the value at column `x` of row `y`
    ///
    /// Returns `false` if the position is outside the mask.
    pub fn set(&mut self, x: u32, y: u32, ink: bool) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.bits[(y as usize) * (self.width as usize) + x as usize] = ink;
        true
    }

    /// Iterate over the rows of the mask
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        // `chunks_exact(0)` panics
        let w = (self.width as usize).max(1);
        self.bits.chunks_exact(w)
    }

    /// The number of ink pixels
    pub fn ink_count(&self) -> usize {
        self.bits.iter().filter(|b| **b).count()
    }
}

fn is_ink_char(c: char) -> bool {
    matches!(c, '#' | 'X' | 'x' | '1' | '@')
}

impl fmt::Debug for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mask({}x{})", self.width, self.height)
    }
}

impl fmt::Display for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let border = |f: &mut fmt::Formatter| {
            write!(f, "+")?;
            for _ in 0..self.width {
                write!(f, "-")?;
            }
            writeln!(f, "+")
        };
        border(f)?;
        if self.width > 0 {
            for row in self.rows() {
                write!(f, "|")?;
                for &ink in row {
                    f.write_str(if ink { "#" } else { " " })?;
                }
                writeln!(f, "|")?;
            }
        }
        border(f)
    }
}

impl Serialize for Mask {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.height as usize))?;
        if self.width > 0 {
            for row in self.rows() {
                let line: String = row.iter().map(|&b| if b { '#' } else { '.' }).collect();
                seq.serialize_element(&line)?;
            }
        } else {
            for _ in 0..self.height {
                seq.serialize_element("")?;
            }
        }
        seq.end()
    }
}

struct MaskVisitor;

impl<'de> Visitor<'de> for MaskVisitor {
    type Value = Mask;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a list of equally long row strings")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut rows: Vec<String> = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(row) = seq.next_element::<String>()? {
            rows.push(row);
        }
        Mask::from_text_rows(&rows).map_err(A::Error::custom)
    }
}

impl<'de> Deserialize<'de> for Mask {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(MaskVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::{Mask, RaggedMaskError};

    #[test]
    fn test_from_text_rows() {
        let mask = Mask::from_text_rows(&["#.", ".#", "##"]).unwrap();
        assert_eq!((mask.width(), mask.height()), (2, 3));
        assert_eq!(mask.get(0, 0), Some(true));
        assert_eq!(mask.get(1, 0), Some(false));
        assert_eq!(mask.get(1, 1), Some(true));
        assert_eq!(mask.get(2, 0), None);
        assert_eq!(mask.get(0, 3), None);
        assert_eq!(mask.ink_count(), 4);
    }

    #[test]
    fn test_new_and_set() {
        let mut mask = Mask::new(3, 2);
        assert_eq!(mask.ink_count(), 0);
        assert!(mask.set(2, 1, true));
        assert!(!mask.set(3, 0, true));
        assert!(!mask.set(0, 2, true));
        assert_eq!(mask.get(2, 1), Some(true));
        assert_eq!(mask.ink_count(), 1);
        assert_eq!(mask.to_string(), "+---+\n|   |\n|  #|\n+---+\n");
    }

    #[test]
    fn test_ragged() {
        assert_eq!(
            Mask::from_text_rows(&["##", "#"]),
            Err(RaggedMaskError {
                row: 1,
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_display() {
        let mask = Mask::from_text_rows(&["#.", ".#"]).unwrap();
        assert_eq!(mask.to_string(), "+--+\n|# |\n| #|\n+--+\n");
    }

    #[test]
    fn test_ron() {
        let mask: Mask = ron::from_str(r##"["#..", ".#.", "..#"]"##).unwrap();
        assert_eq!(mask.ink_count(), 3);
        assert_eq!(mask.get(2, 2), Some(true));
        let err = ron::from_str::<Mask>(r##"["#..", ".#"]"##);
        assert!(err.is_err());
    }
}
