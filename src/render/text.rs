use crate::{
    assets::font::FontSource,
    foundation::{
        core::{Colour, Point, RasterImage, Size},
        error::{OverlayError, OverlayResult},
    },
    render::composite::over_at,
};

/// Points per inch; font sizes are given in points.
const POINTS_PER_INCH: f64 = 72.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush colour used by Parley text layout.
pub struct TextBrush {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl From<Colour> for TextBrush {
    fn from(c: Colour) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// A run of text to draw, with the style bundle that goes with it.
#[derive(Clone, Debug, PartialEq)]
pub struct TextSpec {
    /// The string to draw.
    pub content: String,
    /// Font face to shape with.
    pub font: FontSource,
    /// Nominal size in points.
    pub size: f64,
    /// Resolution used to turn points into pixels.
    pub dpi: f64,
    /// Fill colour of the glyphs.
    pub colour: Colour,
    /// Baseline origin of the first line.
    pub anchor: Point,
}

impl TextSpec {
    /// Text with the defaults of the `text` command: embedded font, 12pt at 72 DPI, black.
    pub fn new(content: impl Into<String>, anchor: Point) -> Self {
        Self {
            content: content.into(),
            font: FontSource::Embedded,
            size: 12.0,
            dpi: 72.0,
            colour: Colour::BLACK,
            anchor,
        }
    }

    /// Pixel size handed to the shaper.
    pub fn size_px(&self) -> f32 {
        (self.size * self.dpi / POINTS_PER_INCH) as f32
    }
}

/// Shapes text with Parley and rasterizes the glyphs with `vello_cpu`.
pub struct TextRasterizer {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrush>,
}

impl Default for TextRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRasterizer {
    /// Construct a rasterizer with fresh Parley contexts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Register font bytes and return the primary family name.
    pub fn register_font(&mut self, font_bytes: &[u8]) -> OverlayResult<String> {
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| OverlayError::font("font data could not be parsed"))?;

        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| OverlayError::font("registered font family has no name"))?
            .to_string();
        Ok(family_name)
    }

    /// Shape `text` without a wrap width. Explicit newlines still start new lines.
    pub fn layout(
        &mut self,
        text: &str,
        family_name: String,
        size_px: f32,
        brush: TextBrush,
    ) -> parley::Layout<TextBrush> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrush> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }

    /// Draw `spec` onto `canvas` with the first baseline at `spec.anchor`.
    ///
    /// Glyphs are rasterized into a layer covering only the laid-out text box (clipped to the
    /// canvas), which is then composited with "over". Font errors are reported even when
    /// there is nothing to draw. An empty string or a non-positive pixel size leaves the
    /// canvas untouched.
    pub fn draw(&mut self, canvas: &mut RasterImage, spec: &TextSpec) -> OverlayResult<()> {
        let font_bytes = spec.font.bytes();
        let family_name = self.register_font(font_bytes)?;
        tracing::debug!(family = %family_name, "font parsed");

        let size_px = spec.size_px();
        if spec.content.is_empty() || canvas.size().is_empty() {
            return Ok(());
        }
        if !size_px.is_finite() || size_px <= 0.0 {
            tracing::debug!(size = spec.size, dpi = spec.dpi, "font size yields no glyphs");
            return Ok(());
        }

        let layout = self.layout(&spec.content, family_name, size_px, spec.colour.into());
        let baseline = layout
            .lines()
            .next()
            .map(|line| f64::from(line.metrics().baseline))
            .unwrap_or(0.0);

        // layout space -> canvas space
        let origin_x = f64::from(spec.anchor.x);
        let origin_y = f64::from(spec.anchor.y) - baseline;

        let Some(bounds) = layer_bounds(
            canvas.size(),
            origin_x,
            origin_y,
            f64::from(layout.width()),
            f64::from(layout.height()),
            f64::from(size_px),
        ) else {
            tracing::debug!(point = %spec.anchor, "text lies outside the canvas");
            return Ok(());
        };

        let width: u16 = bounds
            .width
            .try_into()
            .map_err(|_| OverlayError::config("text box width exceeds u16 for text rendering"))?;
        let height: u16 = bounds
            .height
            .try_into()
            .map_err(|_| OverlayError::config("text box height exceeds u16 for text rendering"))?;

        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(font_bytes.to_vec()),
            0,
        );

        let mut ctx = vello_cpu::RenderContext::new(width, height);
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            origin_x - f64::from(bounds.x),
            origin_y - f64::from(bounds.y),
        )));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));

                // positioned glyphs carry the run advance and the line baseline
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.render_to_pixmap(&mut pixmap);

        let layer = RasterImage::from_premul_rgba8(
            bounds.width,
            bounds.height,
            pixmap.data_as_u8_slice().to_vec(),
        )?;
        let at = Point::new(
            i32::try_from(bounds.x)
                .map_err(|_| OverlayError::config("text layer origin exceeds i32"))?,
            i32::try_from(bounds.y)
                .map_err(|_| OverlayError::config("text layer origin exceeds i32"))?,
        );
        over_at(canvas, &layer, at);
        tracing::debug!(
            text = %spec.content,
            point = %spec.anchor,
            layer_width = bounds.width,
            layer_height = bounds.height,
            "text overlaid on the image"
        );
        Ok(())
    }
}

/// Canvas-space rectangle a text layer is rendered into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct LayerBounds {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

/// The laid-out box at `(origin_x, origin_y)`, padded for glyph overhang and clipped to
/// `canvas`. `None` when nothing of it is visible.
fn layer_bounds(
    canvas: Size,
    origin_x: f64,
    origin_y: f64,
    box_width: f64,
    box_height: f64,
    size_px: f64,
) -> Option<LayerBounds> {
    let pad = (size_px / 2.0).ceil() + 1.0;
    let x0 = (origin_x - pad).floor().max(0.0);
    let y0 = (origin_y - pad).floor().max(0.0);
    let x1 = (origin_x + box_width + pad)
        .ceil()
        .min(f64::from(canvas.width));
    let y1 = (origin_y + box_height + pad)
        .ceil()
        .min(f64::from(canvas.height));
    if !(x0 < x1 && y0 < y1) {
        return None;
    }

    // all four values are clamped to [0, canvas side]
    Some(LayerBounds {
        x: x0 as u32,
        y: y0 as u32,
        width: (x1 - x0) as u32,
        height: (y1 - y0) as u32,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
