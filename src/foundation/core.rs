use crate::foundation::error::{OverlayError, OverlayResult};

/// Premultiplied RGBA8 pixel (r,g,b already multiplied by a).
pub type PremulRgba8 = [u8; 4];

/// Integer pixel offset. Components may be negative so placements can start off-canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    /// Horizontal offset, growing to the right.
    pub x: i32,
    /// Vertical offset, growing downwards.
    pub y: i32,
}

impl Point {
    /// The canvas origin.
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    /// Construct a point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Width/height pair in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Construct a size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of bytes in a tightly packed RGBA8 buffer of this size.
    pub fn rgba8_len(self) -> OverlayResult<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| {
                OverlayError::config(format!(
                    "image size {}x{} overflows the pixel buffer",
                    self.width, self.height
                ))
            })
    }
}

/// Straight (non-premultiplied) RGBA8 colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Colour {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Colour {
    /// Opaque black, the default text and square colour.
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);
    /// Opaque white, the default canvas colour.
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);

    /// Construct a colour from its four channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// The same colour in premultiplied form.
    pub fn to_premul(self) -> PremulRgba8 {
        premultiply([self.r, self.g, self.b, self.a])
    }
}

impl Default for Colour {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Premultiply one straight RGBA8 pixel.
pub fn premultiply(px: [u8; 4]) -> PremulRgba8 {
    let a = u16::from(px[3]);
    if a == 0 {
        return [0, 0, 0, 0];
    }
    let premul = |c: u8| -> u8 { ((u16::from(c) * a + 127) / 255) as u8 };
    [premul(px[0]), premul(px[1]), premul(px[2]), px[3]]
}

/// Recover straight RGBA8 from one premultiplied pixel.
pub fn unpremultiply(px: PremulRgba8) -> [u8; 4] {
    let a = u32::from(px[3]);
    match a {
        0 => [0, 0, 0, 0],
        255 => px,
        _ => {
            let un = |c: u8| -> u8 { ((u32::from(c) * 255 + a / 2) / a).min(255) as u8 };
            [un(px[0]), un(px[1]), un(px[2]), px[3]]
        }
    }
}

/// Raster image held as premultiplied RGBA8, row-major, tightly packed.
///
/// Both decoded inputs and compositing canvases use this type; the encoder converts back to
/// straight alpha on the way out.
#[derive(Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl std::fmt::Debug for RasterImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("data_len", &self.data.len())
            .finish()
    }
}

impl RasterImage {
    /// Allocate a fully transparent image.
    pub fn new(size: Size) -> OverlayResult<Self> {
        let len = size.rgba8_len()?;
        Ok(Self {
            width: size.width,
            height: size.height,
            data: vec![0; len],
        })
    }

    /// Wrap an existing premultiplied buffer, checking its length.
    pub fn from_premul_rgba8(width: u32, height: u32, data: Vec<u8>) -> OverlayResult<Self> {
        let expected = Size::new(width, height).rgba8_len()?;
        if data.len() != expected {
            return Err(OverlayError::config(format!(
                "rgba8 buffer has {} bytes, expected {expected} for {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wrap a straight-alpha buffer, premultiplying it in place.
    pub fn from_straight_rgba8(width: u32, height: u32, mut data: Vec<u8>) -> OverlayResult<Self> {
        for px in data.chunks_exact_mut(4) {
            let p = premultiply([px[0], px[1], px[2], px[3]]);
            px.copy_from_slice(&p);
        }
        Self::from_premul_rgba8(width, height, data)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bounds of the image.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Premultiplied pixel bytes.
    pub fn as_premul_rgba8(&self) -> &[u8] {
        &self.data
    }

    /// Mutable premultiplied pixel bytes.
    pub fn as_premul_rgba8_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Premultiplied pixel at `(x, y)`, or `None` outside the bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<PremulRgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Copy out the pixels as straight-alpha RGBA8.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let p = unpremultiply([px[0], px[1], px[2], px[3]]);
            px.copy_from_slice(&p);
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
