use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::OverlayResult;

/// Font reference carried by a text overlay.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum FontSource {
    /// The monospace face bundled into the binary (Hack Regular).
    #[default]
    Embedded,
    /// OpenType/TrueType bytes supplied by the caller.
    Bytes(Vec<u8>),
}

impl FontSource {
    /// Load a font file, or fall back to the embedded face when no path is given.
    pub fn load(path: Option<&Path>) -> OverlayResult<Self> {
        let Some(path) = path else {
            tracing::debug!("using default font");
            return Ok(Self::Embedded);
        };
        let bytes =
            std::fs::read(path).with_context(|| format!("read font file '{}'", path.display()))?;
        tracing::debug!(filename = %path.display(), bytes = bytes.len(), "font data read");
        Ok(Self::Bytes(bytes))
    }

    /// Raw font bytes.
    pub fn bytes(&self) -> &[u8] {
        match self {
            Self::Embedded => epaint_default_fonts::HACK_REGULAR,
            Self::Bytes(b) => b,
        }
    }
}

impl std::fmt::Debug for FontSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Embedded => f.write_str("Embedded"),
            Self::Bytes(b) => f.debug_struct("Bytes").field("len", &b.len()).finish(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/font.rs"]
mod tests;
