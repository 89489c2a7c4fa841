//! Textual forms of [`Colour`], [`Point`] and [`Size`].
//!
//! These parsers are independent of the command-line layer: `clap` reaches them through
//! [`FromStr`], serde through the string impls at the bottom of this file.

use std::{fmt, str::FromStr};

use crate::foundation::{
    core::{Colour, Point, Size},
    error::{OverlayError, OverlayResult},
};

/// Parse `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA`.
///
/// The short forms take each hex digit as its nibble value (`#F00` is red `15`, not `255`).
/// Forms without an alpha digit are opaque.
pub fn parse_colour(text: &str) -> OverlayResult<Colour> {
    let invalid = || {
        OverlayError::invalid_format(format!(
            "invalid colour '{text}': expected #RGB, #RGBA, #RRGGBB or #RRGGBBAA"
        ))
    };

    let hex = text.strip_prefix('#').ok_or_else(invalid)?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let digits = match hex.len() {
        3 | 4 => 1,
        6 | 8 => 2,
        _ => return Err(invalid()),
    };

    let mut channels = [255u8; 4];
    for (slot, chunk) in channels.iter_mut().zip(hex.as_bytes().chunks(digits)) {
        // ascii-only, checked above
        let s = std::str::from_utf8(chunk).map_err(|_| invalid())?;
        *slot = u8::from_str_radix(s, 16).map_err(|_| invalid())?;
    }

    let [r, g, b, a] = channels;
    let colour = Colour::rgba(r, g, b, a);
    tracing::debug!(red = r, green = g, blue = b, alpha = a, "parsed colour");
    Ok(colour)
}

/// Parse `"<x>,<y>"` where both sides are base-10 `i32` values.
pub fn parse_point(text: &str) -> OverlayResult<Point> {
    let (x, y) = parse_pair(text)?;
    Ok(Point::new(x, y))
}

/// Parse `"<width>,<height>"`; same grammar as [`parse_point`] but non-negative.
pub fn parse_size(text: &str) -> OverlayResult<Size> {
    let (w, h) = parse_pair(text)?;
    let width = u32::try_from(w).map_err(|_| {
        OverlayError::invalid_format(format!("invalid size '{text}': width must be >= 0"))
    })?;
    let height = u32::try_from(h).map_err(|_| {
        OverlayError::invalid_format(format!("invalid size '{text}': height must be >= 0"))
    })?;
    Ok(Size::new(width, height))
}

fn parse_pair(text: &str) -> OverlayResult<(i32, i32)> {
    let parts: Vec<&str> = text.split(',').collect();
    let &[x, y] = parts.as_slice() else {
        return Err(OverlayError::invalid_format(format!(
            "invalid pair '{text}': expected two numbers separated by a ,"
        )));
    };

    let num = |s: &str| -> OverlayResult<i32> {
        s.parse::<i32>().map_err(|e| {
            OverlayError::invalid_format(format!("invalid pair '{text}': '{s}': {e}"))
        })
    };
    Ok((num(x)?, num(y)?))
}

impl FromStr for Colour {
    type Err = OverlayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_colour(s)
    }
}

impl FromStr for Point {
    type Err = OverlayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_point(s)
    }
}

impl FromStr for Size {
    type Err = OverlayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_size(s)
    }
}

/// Serializes as `#RRGGBB`; alpha is not part of the textual form.
impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.width, self.height)
    }
}

macro_rules! serde_via_str {
    ($ty:ty) => {
        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

serde_via_str!(Colour);
serde_via_str!(Point);
serde_via_str!(Size);

#[cfg(test)]
#[path = "../../tests/unit/foundation/parse.rs"]
mod tests;
