//! `overlay` superimposes text or a second image onto a raster image.
//!
//! One invocation is one pass through a short pipeline:
//!
//! 1. **Read**: pull the underlay bytes from a file or stdin ([`InputSource`]).
//! 2. **Decode**: sniff the container and decode into premultiplied RGBA8 ([`decode_image`]).
//! 3. **Composite**: blend one [`OverlaySpec`] onto a copy of the underlay ([`composite`]),
//!    or fill a rectangle ([`fill_rect`]).
//! 4. **Encode**: write PNG, JPEG, GIF or BMP ([`encode_image`]) to a file or stdout
//!    ([`OutputTarget`]).
//!
//! Pixels are **premultiplied** RGBA8 inside the crate; [`Colour`] values are straight
//! alpha and are premultiplied when drawn.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;
mod render;

pub use assets::decode::decode_image;
pub use assets::encode::{Format, encode_image};
pub use assets::font::FontSource;
pub use assets::stream::{InputSource, OutputTarget, STDIO_SENTINEL};
pub use foundation::core::{
    Colour, Point, PremulRgba8, RasterImage, Size, premultiply, unpremultiply,
};
pub use foundation::error::{OverlayError, OverlayResult};
pub use foundation::parse::{parse_colour, parse_point, parse_size};
pub use render::composite::{over, over_at};
pub use render::compositor::{OverlaySelection, OverlaySpec, composite};
pub use render::fill::{FillMode, fill_rect, new_canvas};
pub use render::text::{TextBrush, TextRasterizer, TextSpec};
