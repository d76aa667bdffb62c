use std::path::{Path, PathBuf};

use crate::shared::constants::WORD_SCRIPT_SUFFIX;

/// Output layout for one organized video: a dedicated directory named
/// after the file stem, holding the relocated video and every artifact
/// emitted for it.
#[derive(Clone, Debug, PartialEq)]
pub struct OrganizedVideo {
    base_name: String,
    directory: PathBuf,
    video_path: PathBuf,
}

impl OrganizedVideo {
    pub fn new(base_name: String, directory: PathBuf, video_path: PathBuf) -> Self {
        Self {
            base_name,
            directory,
            video_path,
        }
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn video_path(&self) -> &Path {
        &self.video_path
    }

    pub fn transcript_path(&self) -> PathBuf {
        self.directory.join(format!("{}.txt", self.base_name))
    }

    pub fn sentence_script_path(&self) -> PathBuf {
        self.directory.join(format!("{}.jsx", self.base_name))
    }

    pub fn word_script_path(&self) -> PathBuf {
        self.directory
            .join(format!("{}{}.jsx", self.base_name, WORD_SCRIPT_SUFFIX))
    }
}
