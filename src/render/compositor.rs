use std::path::{Path, PathBuf};

use crate::{
    foundation::{
        core::{Point, RasterImage},
        error::{OverlayError, OverlayResult},
    },
    render::{
        composite::over_at,
        text::{TextRasterizer, TextSpec},
    },
};

/// What gets blended onto the underlay.
#[derive(Clone, Debug, PartialEq)]
pub enum OverlaySpec {
    /// Rasterized text.
    Text(TextSpec),
    /// A decoded image with its top-left corner at `at`.
    Image {
        /// The overlay pixels.
        image: RasterImage,
        /// Placement of the overlay's top-left corner.
        at: Point,
    },
}

/// Which overlay the user asked for, before any overlay data is loaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OverlaySelection {
    /// Draw this string.
    Text(String),
    /// Superimpose the image at this path.
    Image(PathBuf),
}

impl OverlaySelection {
    /// Enforce that exactly one of `text` and `image` is given.
    ///
    /// An empty string counts as absent.
    pub fn resolve(text: Option<&str>, image: Option<&Path>) -> OverlayResult<Self> {
        let text = text.filter(|t| !t.is_empty());
        match (text, image) {
            (Some(_), Some(_)) => Err(OverlayError::ConflictingOverlay),
            (None, None) => Err(OverlayError::MissingOverlay),
            (Some(t), None) => Ok(Self::Text(t.to_string())),
            (None, Some(p)) => Ok(Self::Image(p.to_path_buf())),
        }
    }
}

/// Blend one overlay onto a copy of `underlay`.
///
/// `underlay` is only read. Image overlays wider or taller than the underlay are rejected
/// wherever they are placed; smaller ones are clipped to the canvas.
#[tracing::instrument(skip_all, fields(width = underlay.width(), height = underlay.height()))]
pub fn composite(underlay: &RasterImage, overlay: &OverlaySpec) -> OverlayResult<RasterImage> {
    let mut dst = underlay.clone();
    tracing::debug!("image copied to destination context");

    match overlay {
        OverlaySpec::Image { image, at } => {
            if image.width() > underlay.width() || image.height() > underlay.height() {
                return Err(OverlayError::OverlayTooLarge {
                    overlay_width: image.width(),
                    overlay_height: image.height(),
                    underlay_width: underlay.width(),
                    underlay_height: underlay.height(),
                });
            }
            over_at(&mut dst, image, *at);
            tracing::debug!(point = %at, width = image.width(), height = image.height(), "image overlaid on the image");
        }
        OverlaySpec::Text(spec) => {
            TextRasterizer::new().draw(&mut dst, spec)?;
        }
    }

    Ok(dst)
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
