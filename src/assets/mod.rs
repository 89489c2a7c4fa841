//! Everything that touches bytes: streams, fonts and the image codecs.

pub(crate) mod decode;
pub(crate) mod encode;
pub(crate) mod font;
pub(crate) mod stream;
