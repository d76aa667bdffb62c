use std::fs;
use std::io;
use std::path::Path;

use crate::organizing::domain::organized_video::OrganizedVideo;
use crate::organizing::domain::video_organizer::{OrganizeError, VideoOrganizer};

/// Filesystem organizer: creates the per-video directory idempotently and
/// moves the source into it, rename-first with a copy+remove fallback for
/// cross-device moves.
///
/// Re-running against an already-organized video (source gone, target
/// present) returns the existing layout so a failed batch can be resumed
/// without manual cleanup.
pub struct FsVideoOrganizer;

impl VideoOrganizer for FsVideoOrganizer {
    fn organize(
        &self,
        source: &Path,
        output_root: &Path,
    ) -> Result<OrganizedVideo, OrganizeError> {
        let file_name = source
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| OrganizeError::InvalidName(source.to_path_buf()))?;
        let base_name = source
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| OrganizeError::InvalidName(source.to_path_buf()))?;

        let directory = output_root.join(base_name);
        let target = directory.join(file_name);

        if !source.exists() {
            if target.exists() {
                log::info!("Already organized: {}", target.display());
                return Ok(OrganizedVideo::new(
                    base_name.to_string(),
                    directory,
                    target,
                ));
            }
            return Err(OrganizeError::SourceMissing(source.to_path_buf()));
        }

        fs::create_dir_all(&directory).map_err(|e| OrganizeError::CreateDir {
            path: directory.clone(),
            source: e,
        })?;

        move_file(source, &target).map_err(|e| OrganizeError::Move {
            from: source.to_path_buf(),
            to: target.clone(),
            source: e,
        })?;

        Ok(OrganizedVideo::new(
            base_name.to_string(),
            directory,
            target,
        ))
    }
}

/// Rename when possible, otherwise copy and remove the original.
fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(_) => {
            fs::copy(from, to)?;
            fs::remove_file(from)
        }
    }
}
