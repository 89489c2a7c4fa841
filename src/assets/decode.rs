use anyhow::Context;

use crate::foundation::{
    core::RasterImage,
    error::{OverlayError, OverlayResult},
};

/// Largest SVG raster we are willing to allocate, per side.
const SVG_MAX_DIM: u32 = 16_384;

/// Decode an image by sniffing its content, never its file name.
///
/// Raster formats go through the `image` decoders. Data none of them recognise is tried as
/// SVG and rasterized at its intrinsic size. The result is premultiplied.
pub fn decode_image(bytes: &[u8]) -> OverlayResult<RasterImage> {
    if image::guess_format(bytes).is_err() {
        match parse_svg(bytes) {
            Ok(tree) => return rasterize_svg(&tree),
            Err(e) => tracing::debug!(error = %e, "data is neither a known raster format nor svg"),
        }
    }

    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    tracing::debug!(width, height, "raster image decoded");

    RasterImage::from_straight_rgba8(width, height, rgba.into_raw())
}

fn parse_svg(bytes: &[u8]) -> OverlayResult<usvg::Tree> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;
    Ok(tree)
}

fn rasterize_svg(tree: &usvg::Tree) -> OverlayResult<RasterImage> {
    fn to_px(v: f32) -> OverlayResult<u32> {
        if !v.is_finite() || v <= 0.0 {
            return Err(OverlayError::config("svg has invalid width/height"));
        }
        Ok((v.ceil() as u32).max(1))
    }

    let size = tree.size();
    let width = to_px(size.width())?;
    let height = to_px(size.height())?;
    if width > SVG_MAX_DIM || height > SVG_MAX_DIM {
        return Err(OverlayError::config(format!(
            "svg raster size too large: {width}x{height} (max {SVG_MAX_DIM}x{SVG_MAX_DIM})"
        )));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| OverlayError::config("failed to allocate svg pixmap"))?;
    resvg::render(
        tree,
        resvg::tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    );
    tracing::debug!(width, height, "svg image rasterized");

    // tiny-skia pixmaps are already premultiplied RGBA8
    RasterImage::from_premul_rgba8(width, height, pixmap.take())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
