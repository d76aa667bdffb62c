use std::path::{Path, PathBuf};

/// Outcome of one video's pipeline run.
#[derive(Debug)]
pub enum FileOutcome {
    Processed { video: PathBuf, segments: usize },
    Failed { video: PathBuf, reason: String },
}

impl FileOutcome {
    pub fn video(&self) -> &Path {
        match self {
            FileOutcome::Processed { video, .. } => video,
            FileOutcome::Failed { video, .. } => video,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, FileOutcome::Failed { .. })
    }
}

/// Collected outcomes of a batch run. One file's failure never erases the
/// outcomes of the others.
#[derive(Debug, Default)]
pub struct BatchReport {
    outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn push(&mut self, outcome: FileOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn outcomes(&self) -> &[FileOutcome] {
        &self.outcomes
    }

    pub fn processed(&self) -> usize {
        self.outcomes.len() - self.failed()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failure()).count()
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    /// Human-readable run summary, one line per failed file.
    pub fn summary_string(&self) -> String {
        let mut lines = vec![format!(
            "Batch complete: {} processed, {} failed",
            self.processed(),
            self.failed()
        )];
        for outcome in &self.outcomes {
            if let FileOutcome::Failed { video, reason } = outcome {
                lines.push(format!("  {}: {reason}", video.display()));
            }
        }
        lines.join("\n")
    }
}
