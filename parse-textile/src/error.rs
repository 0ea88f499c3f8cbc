//! Error type shared by the parser and the renderer.

use thiserror::Error;

/// The ways a Textile document can fail to convert.
#[derive(Debug, Error)]
pub enum Error {
    /// The grammar rejected the input. The payload is a short excerpt
    /// starting at the position where parsing stopped.
    #[error("malformed textile near {0:?}")]
    Malformed(String),

    /// The block grammar succeeded but stopped before the end of the
    /// input.
    #[error("unparsed input remains: {0:?}")]
    Trailing(String),
}
