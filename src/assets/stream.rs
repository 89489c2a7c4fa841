use std::{
    fmt,
    fs::File,
    io::{Read, Write},
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::{
    assets::encode::Format,
    foundation::error::OverlayResult,
};

/// Command-line sentinel for standard input/output.
pub const STDIO_SENTINEL: &str = "-";

/// Where the underlay image comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputSource {
    /// Standard input.
    Stdin,
    /// A file on disk.
    File(PathBuf),
}

impl InputSource {
    /// Map `-` to [`InputSource::Stdin`] and anything else to a path.
    pub fn from_arg(arg: &str) -> Self {
        if arg == STDIO_SENTINEL {
            Self::Stdin
        } else {
            Self::File(PathBuf::from(arg))
        }
    }

    /// Read the whole stream. File handles are closed before returning.
    pub fn read_all(&self) -> OverlayResult<Vec<u8>> {
        let mut buf = Vec::new();
        match self {
            Self::Stdin => {
                tracing::debug!("reading input from STDIN");
                std::io::stdin()
                    .lock()
                    .read_to_end(&mut buf)
                    .context("read image from STDIN")?;
            }
            Self::File(path) => {
                tracing::debug!(name = %path.display(), "reading input from file");
                let mut f = File::open(path)
                    .with_context(|| format!("open input file '{}'", path.display()))?;
                f.read_to_end(&mut buf)
                    .with_context(|| format!("read input file '{}'", path.display()))?;
            }
        }
        Ok(buf)
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdin => f.write_str("STDIN"),
            Self::File(p) => write!(f, "{}", p.display()),
        }
    }
}

/// Where the composited image goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputTarget {
    /// Standard output.
    Stdout,
    /// A file on disk, created or truncated on write.
    File(PathBuf),
}

impl OutputTarget {
    /// Map `-` to [`OutputTarget::Stdout`] and anything else to a path.
    pub fn from_arg(arg: &str) -> Self {
        if arg == STDIO_SENTINEL {
            Self::Stdout
        } else {
            Self::File(PathBuf::from(arg))
        }
    }

    /// Pick the encoding for this target.
    ///
    /// A file's extension always wins over `requested`; standard output uses `requested`.
    pub fn resolve_format(&self, requested: Format) -> OverlayResult<Format> {
        match self {
            Self::Stdout => Ok(requested),
            Self::File(path) => {
                let format = Format::from_path(path)?;
                if format != requested {
                    tracing::debug!(
                        name = %path.display(),
                        %requested,
                        %format,
                        "output extension overrides requested format"
                    );
                }
                Ok(format)
            }
        }
    }

    /// Write `bytes` to the target. File handles are flushed and closed before returning.
    pub fn write_all(&self, bytes: &[u8]) -> OverlayResult<()> {
        match self {
            Self::Stdout => {
                tracing::debug!(bytes = bytes.len(), "writing image to STDOUT");
                let mut out = std::io::stdout().lock();
                out.write_all(bytes).context("write image to STDOUT")?;
                out.flush().context("flush STDOUT")?;
            }
            Self::File(path) => {
                tracing::debug!(name = %path.display(), bytes = bytes.len(), "writing output to file");
                let mut f = File::create(path)
                    .with_context(|| format!("create output file '{}'", path.display()))?;
                f.write_all(bytes)
                    .with_context(|| format!("write output file '{}'", path.display()))?;
                f.flush()
                    .with_context(|| format!("flush output file '{}'", path.display()))?;
            }
        }
        Ok(())
    }

    /// The file path, if this target is a file.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Stdout => None,
            Self::File(p) => Some(p),
        }
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("STDOUT"),
            Self::File(p) => write!(f, "{}", p.display()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/stream.rs"]
mod tests;
