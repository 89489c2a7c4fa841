/// Convenience result type used across overlay.
pub type OverlayResult<T> = Result<T, OverlayError>;

/// Top-level error taxonomy used by the compositing APIs and the CLI.
#[derive(thiserror::Error, Debug)]
pub enum OverlayError {
    /// A textual value (colour, point, size) did not match its grammar.
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    /// Invalid combination of options or unusable output target.
    #[error("configuration error: {0}")]
    Config(String),

    /// Both a text run and an overlay image were requested.
    #[error("configuration error: both text and image specified to overlay on the image")]
    ConflictingOverlay,

    /// Neither a text run nor an overlay image was requested.
    #[error("configuration error: no text or image specified to overlay on the image")]
    MissingOverlay,

    /// The overlay image does not fit inside the underlay in at least one dimension.
    #[error(
        "overlay image ({overlay_width}x{overlay_height}) is larger than the underlay image ({underlay_width}x{underlay_height})"
    )]
    OverlayTooLarge {
        /// Overlay width in pixels.
        overlay_width: u32,
        /// Overlay height in pixels.
        overlay_height: u32,
        /// Underlay width in pixels.
        underlay_width: u32,
        /// Underlay height in pixels.
        underlay_height: u32,
    },

    /// Font data could not be parsed or used for shaping.
    #[error("font error: {0}")]
    Font(String),

    /// The requested output format is not one of the supported encoders.
    #[error("unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// I/O and codec failures, carried with their context chain.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl OverlayError {
    /// Build an [`OverlayError::InvalidFormat`].
    pub fn invalid_format(msg: impl Into<String>) -> Self {
        Self::InvalidFormat(msg.into())
    }

    /// Build an [`OverlayError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build an [`OverlayError::Font`].
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build an [`OverlayError::UnsupportedFormat`].
    pub fn unsupported_format(msg: impl Into<String>) -> Self {
        Self::UnsupportedFormat(msg.into())
    }

    /// True for errors caused by the option surface rather than by data or I/O.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::InvalidFormat(_)
                | Self::Config(_)
                | Self::ConflictingOverlay
                | Self::MissingOverlay
                | Self::UnsupportedFormat(_)
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
