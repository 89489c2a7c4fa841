use crate::{
    foundation::{
        core::{Colour, Point, RasterImage, Size},
        error::OverlayResult,
    },
    render::composite::{clip_region, over},
};

/// How a solid fill combines with what is already on the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FillMode {
    /// Replace the covered pixels with the colour, alpha included.
    Src,
    /// Composite the colour over the covered pixels.
    #[default]
    Over,
}

/// Fill `[at, at + size)` of `canvas` with `colour`, clipped to the canvas.
pub fn fill_rect(canvas: &mut RasterImage, at: Point, size: Size, colour: Colour, mode: FillMode) {
    let Some(region) = clip_region(canvas.size(), at, size) else {
        return;
    };

    let premul = colour.to_premul();
    let stride = canvas.width() as usize * 4;
    let row_len = region.width as usize * 4;
    let data = canvas.as_premul_rgba8_mut();

    for row in 0..region.height as usize {
        let d0 = (region.dst_y as usize + row) * stride + region.dst_x as usize * 4;
        for d in data[d0..d0 + row_len].chunks_exact_mut(4) {
            let out = match mode {
                FillMode::Src => premul,
                FillMode::Over => over([d[0], d[1], d[2], d[3]], premul),
            };
            d.copy_from_slice(&out);
        }
    }
}

/// Allocate a canvas of `size` filled with `colour`.
pub fn new_canvas(size: Size, colour: Colour) -> OverlayResult<RasterImage> {
    let mut canvas = RasterImage::new(size)?;
    fill_rect(&mut canvas, Point::ORIGIN, size, colour, FillMode::Src);
    Ok(canvas)
}

#[cfg(test)]
#[path = "../../tests/unit/render/fill.rs"]
mod tests;
