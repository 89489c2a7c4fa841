use std::{fmt, io::Cursor, path::Path, str::FromStr};

use anyhow::Context as _;

use crate::foundation::{
    core::RasterImage,
    error::{OverlayError, OverlayResult},
};

/// Output encodings supported by the `image` crate backends we ship.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Format {
    /// JPEG; alpha is flattened over black.
    Jpeg,
    /// PNG, the default when writing to standard output.
    #[default]
    Png,
    /// GIF, palette-quantized by the encoder.
    Gif,
    /// Windows bitmap.
    Bmp,
}

impl Format {
    /// Every supported format, in help-text order.
    pub const ALL: [Format; 4] = [Format::Jpeg, Format::Png, Format::Gif, Format::Bmp];

    /// Infer the format from a file extension (`.jpg`, `.jpeg`, `.png`, `.gif`, `.bmp`).
    ///
    /// Matching is case-insensitive. Anything else is a configuration error.
    pub fn from_path(path: &Path) -> OverlayResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("jpg" | "jpeg") => Ok(Self::Jpeg),
            Some("png") => Ok(Self::Png),
            Some("gif") => Ok(Self::Gif),
            Some("bmp") => Ok(Self::Bmp),
            Some(other) => Err(OverlayError::config(format!(
                "unsupported output file type: .{other} ('{}')",
                path.display()
            ))),
            None => Err(OverlayError::config(format!(
                "unsupported output file type: '{}' has no extension",
                path.display()
            ))),
        }
    }

    fn image_format(self) -> image::ImageFormat {
        match self {
            Self::Jpeg => image::ImageFormat::Jpeg,
            Self::Png => image::ImageFormat::Png,
            Self::Gif => image::ImageFormat::Gif,
            Self::Bmp => image::ImageFormat::Bmp,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
        })
    }
}

impl FromStr for Format {
    type Err = OverlayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            "gif" => Ok(Self::Gif),
            "bmp" => Ok(Self::Bmp),
            _ => Err(OverlayError::unsupported_format(format!(
                "{s} (expected one of jpeg, jpg, png, gif, bmp)"
            ))),
        }
    }
}

/// Encode `img` into an in-memory buffer.
///
/// Pixels are converted back to straight alpha. JPEG has no alpha channel, so the premultiplied
/// colour is written directly, which is the same as flattening over black.
pub fn encode_image(img: &RasterImage, format: Format) -> OverlayResult<Vec<u8>> {
    let (width, height) = (img.width(), img.height());
    let dyn_img = match format {
        Format::Jpeg => {
            let rgb = premul_to_rgb8(img.as_premul_rgba8());
            let buf = image::RgbImage::from_raw(width, height, rgb)
                .ok_or_else(|| OverlayError::config("rgb8 buffer does not match image size"))?;
            image::DynamicImage::ImageRgb8(buf)
        }
        Format::Png | Format::Gif | Format::Bmp => {
            let buf = image::RgbaImage::from_raw(width, height, img.to_straight_rgba8())
                .ok_or_else(|| OverlayError::config("rgba8 buffer does not match image size"))?;
            image::DynamicImage::ImageRgba8(buf)
        }
    };

    let mut out = Cursor::new(Vec::new());
    dyn_img
        .write_to(&mut out, format.image_format())
        .with_context(|| format!("encode {width}x{height} image as {format}"))?;
    tracing::debug!(%format, bytes = out.get_ref().len(), "image encoded");
    Ok(out.into_inner())
}

fn premul_to_rgb8(rgba8_premul: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(rgba8_premul.len() / 4 * 3);
    for px in rgba8_premul.chunks_exact(4) {
        out.extend_from_slice(&px[..3]);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/assets/encode.rs"]
mod tests;
