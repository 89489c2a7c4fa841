use crate::foundation::core::{Point, PremulRgba8, RasterImage, Size};

/// Porter-Duff "over" on premultiplied RGBA8.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let sa = src[3];
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255(u16::from(dst[3]), inv));
    for i in 0..3 {
        out[i] = add_sat_u8(src[i], mul_div255(u16::from(dst[i]), inv));
    }
    out
}

/// Overlap between a placed source rectangle and the canvas, in both coordinate spaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Region {
    pub dst_x: u32,
    pub dst_y: u32,
    pub src_x: u32,
    pub src_y: u32,
    pub width: u32,
    pub height: u32,
}

/// Intersect `[at, at + size)` with `[0, canvas)`. `None` when nothing overlaps.
pub(crate) fn clip_region(canvas: Size, at: Point, size: Size) -> Option<Region> {
    let (ax, ay) = (i64::from(at.x), i64::from(at.y));
    let x0 = ax.max(0);
    let y0 = ay.max(0);
    let x1 = (ax + i64::from(size.width)).min(i64::from(canvas.width));
    let y1 = (ay + i64::from(size.height)).min(i64::from(canvas.height));
    if x0 >= x1 || y0 >= y1 {
        return None;
    }

    Some(Region {
        dst_x: x0 as u32,
        dst_y: y0 as u32,
        src_x: (x0 - ax) as u32,
        src_y: (y0 - ay) as u32,
        width: (x1 - x0) as u32,
        height: (y1 - y0) as u32,
    })
}

/// Composite `src` over `dst` with its top-left corner at `at`, clipped to `dst`.
///
/// Pixels of `dst` outside the placed rectangle are not touched.
pub fn over_at(dst: &mut RasterImage, src: &RasterImage, at: Point) {
    let Some(region) = clip_region(dst.size(), at, src.size()) else {
        return;
    };

    let dst_stride = dst.width() as usize * 4;
    let src_stride = src.width() as usize * 4;
    let row_len = region.width as usize * 4;
    let src_data = src.as_premul_rgba8();
    let dst_data = dst.as_premul_rgba8_mut();

    for row in 0..region.height as usize {
        let d0 = (region.dst_y as usize + row) * dst_stride + region.dst_x as usize * 4;
        let s0 = (region.src_y as usize + row) * src_stride + region.src_x as usize * 4;
        let d_row = &mut dst_data[d0..d0 + row_len];
        let s_row = &src_data[s0..s0 + row_len];
        for (d, s) in d_row.chunks_exact_mut(4).zip(s_row.chunks_exact(4)) {
            let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
            d.copy_from_slice(&out);
        }
    }
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
