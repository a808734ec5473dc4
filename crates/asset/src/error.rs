//! Loader errors, typed so callers can tell the failure kinds apart.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A failed model load. Every variant aborts the whole load; the caller
/// never receives partial buffers. Line numbers are 1-based.
#[derive(Debug, Error)]
pub enum ObjError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A record field failed to parse, or an index referenced data that
    /// does not exist.
    #[error("malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// An `f` line with fewer than 3 vertex references.
    #[error("degenerate face on line {line}: {found} vertex references, need at least 3")]
    DegenerateFace { line: usize, found: usize },

    /// A `v` record never named by any face, so no texcoord/normal pair
    /// can be resolved for it.
    #[error("position {index} is not referenced by any face")]
    UnresolvedPositionIndex { index: usize },
}

pub type ObjResult<T> = Result<T, ObjError>;
