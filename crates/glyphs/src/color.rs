//! # Display colors
use std::{fmt, str::FromStr};

use displaydoc::Display;
use serde::{
    de::{Error, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};
use thiserror::Error;

/// A 32-bit ARGB color (not premultiplied)
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Color(u32);

impl Color {
    /// Opaque white, the canvas background
    pub const WHITE: Color = Color(0xFFFF_FFFF);
    /// Opaque black
    pub const BLACK: Color = Color(0xFF00_0000);
    /// Fully transparent
    pub const TRANSPARENT: Color = Color(0x0000_0000);

    /// Create an opaque color from a `0xRRGGBB` value
    ///
    /// Any bits above the low 24 are ignored and alpha is forced to `0xFF`.
    pub const fn from_rgb(rgb: u32) -> Self {
        Color(0xFF00_0000 | (rgb & 0x00FF_FFFF))
    }

    /// Create a color from a `0xAARRGGBB` value
    pub const fn from_argb(argb: u32) -> Self {
        Color(argb)
    }

    /// The raw `0xAARRGGBB` value
    pub const fn argb(self) -> u32 {
        self.0
    }

    /// The alpha channel
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// The red channel
    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// The green channel
    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// The blue channel
    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// The channels in RGBA byte order
    pub const fn to_rgba(self) -> [u8; 4] {
        [self.red(), self.green(), self.blue(), self.alpha()]
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.alpha() == 0xFF {
            write!(f, "#{:06X}", self.0 & 0x00FF_FFFF)
        } else {
            write!(f, "#{:08X}", self.0)
        }
    }
}

/// Failed to parse a color
#[derive(Debug, Display, Error, PartialEq, Eq)]
pub enum ColorParseError {
    /// color must start with `#`
    MissingHash,
    /// expected 6 or 8 hex digits, got {0}
    BadLength(usize),
    /// invalid hex digits in color
    BadDigits,
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').ok_or(ColorParseError::MissingHash)?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorParseError::BadDigits);
        }
        let value = match hex.len() {
            6 | 8 => u32::from_str_radix(hex, 16).map_err(|_| ColorParseError::BadDigits)?,
            n => return Err(ColorParseError::BadLength(n)),
        };
        Ok(if hex.len() == 6 {
            Color::from_rgb(value)
        } else {
            Color::from_argb(value)
        })
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct ColorVisitor;

impl<'de> Visitor<'de> for ColorVisitor {
    type Value = Color;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a color string like \"#RRGGBB\" or \"#AARRGGBB\"")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: Error,
    {
        v.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(ColorVisitor)
    }
}
