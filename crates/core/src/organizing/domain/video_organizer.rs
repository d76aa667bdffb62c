use std::path::{Path, PathBuf};

use thiserror::Error;

use super::organized_video::OrganizedVideo;

#[derive(Error, Debug)]
pub enum OrganizeError {
    #[error("source video not found: {0}")]
    SourceMissing(PathBuf),
    #[error("video file has no usable name: {0}")]
    InvalidName(PathBuf),
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to move {from} to {to}: {source}")]
    Move {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Domain interface for relocating a source video into its output
/// directory.
pub trait VideoOrganizer: Send {
    /// Move `source` into a directory under `output_root` named after the
    /// file stem, returning the resulting layout.
    fn organize(&self, source: &Path, output_root: &Path)
        -> Result<OrganizedVideo, OrganizeError>;
}
