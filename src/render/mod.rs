//! Pixel operations: the "over" operator, rectangle fills, text rasterization and the
//! single-overlay compositor built from them.

pub(crate) mod composite;
pub(crate) mod compositor;
pub(crate) mod fill;
pub(crate) mod text;
