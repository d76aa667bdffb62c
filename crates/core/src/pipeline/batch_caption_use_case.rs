use std::path::{Path, PathBuf};

use crate::pipeline::batch_report::{BatchReport, FileOutcome};
use crate::pipeline::caption_video_use_case::CaptionVideoUseCase;
use crate::pipeline::pipeline_logger::PipelineLogger;

/// Runs the per-video pipeline over a batch of files sequentially,
/// isolating each file's failure from the rest of the run.
pub struct BatchCaptionUseCase {
    use_case: CaptionVideoUseCase,
    fail_fast: bool,
}

impl BatchCaptionUseCase {
    pub fn new(use_case: CaptionVideoUseCase, fail_fast: bool) -> Self {
        Self {
            use_case,
            fail_fast,
        }
    }

    pub fn execute(
        &self,
        videos: &[PathBuf],
        output_root: &Path,
        logger: &mut dyn PipelineLogger,
    ) -> Result<BatchReport, Box<dyn std::error::Error>> {
        let mut report = BatchReport::default();
        let total = videos.len();

        for (idx, video) in videos.iter().enumerate() {
            logger.progress(idx + 1, total);
            logger.info(&format!("Processing: {}", video.display()));

            match self.use_case.execute(video, output_root, logger) {
                Ok(segments) => {
                    report.push(FileOutcome::Processed {
                        video: video.clone(),
                        segments,
                    });
                }
                Err(e) => {
                    logger.info(&format!("Failed: {} ({e})", video.display()));
                    report.push(FileOutcome::Failed {
                        video: video.clone(),
                        reason: e.to_string(),
                    });
                    if self.fail_fast {
                        return Err(e);
                    }
                }
            }
        }

        logger.summary();
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::domain::audio_reader::AudioReader;
    use crate::audio::domain::audio_segment::AudioSegment;
    use crate::organizing::domain::organized_video::OrganizedVideo;
    use crate::organizing::domain::video_organizer::{OrganizeError, VideoOrganizer};
    use crate::pipeline::pipeline_logger::NullPipelineLogger;
    use crate::script::domain::layout::{SentenceLayout, WordLayout};
    use crate::script::domain::sentence_script::SentenceScriptGenerator;
    use crate::script::domain::word_script::WordScriptGenerator;
    use crate::transcript::domain::segment::Segment;
    use crate::transcript::domain::speech_recognizer::SpeechRecognizer;
    use std::fs;
    use tempfile::TempDir;

    // Organizer that rejects any file whose name contains "bad"
    struct PickyOrganizer;

    impl VideoOrganizer for PickyOrganizer {
        fn organize(
            &self,
            source: &Path,
            output_root: &Path,
        ) -> Result<OrganizedVideo, OrganizeError> {
            if source.to_string_lossy().contains("bad") {
                return Err(OrganizeError::SourceMissing(source.to_path_buf()));
            }
            let base = source.file_stem().unwrap().to_str().unwrap().to_string();
            let directory = output_root.join(&base);
            fs::create_dir_all(&directory).unwrap();
            let video_path = directory.join(source.file_name().unwrap());
            Ok(OrganizedVideo::new(base, directory, video_path))
        }
    }

    struct NoAudioReader;

    impl AudioReader for NoAudioReader {
        fn read_audio(
            &self,
            _: &Path,
            _: u32,
        ) -> Result<Option<AudioSegment>, Box<dyn std::error::Error>> {
            Ok(None)
        }
    }

    struct UnusedRecognizer;

    impl SpeechRecognizer for UnusedRecognizer {
        fn transcribe(
            &self,
            _: &AudioSegment,
        ) -> Result<Vec<Segment>, Box<dyn std::error::Error>> {
            unreachable!("no audio is ever decoded in these tests")
        }
    }

    fn batch(fail_fast: bool) -> BatchCaptionUseCase {
        let uc = CaptionVideoUseCase::new(
            Box::new(PickyOrganizer),
            Box::new(NoAudioReader),
            Box::new(UnusedRecognizer),
            SentenceScriptGenerator::new(SentenceLayout::default()),
            WordScriptGenerator::new(WordLayout::default()),
        );
        BatchCaptionUseCase::new(uc, fail_fast)
    }

    #[test]
    fn test_one_failure_does_not_stop_the_batch() {
        let tmp = TempDir::new().unwrap();
        let videos = vec![
            PathBuf::from("good.mp4"),
            PathBuf::from("bad.mp4"),
            PathBuf::from("fine.mp4"),
        ];

        let report = batch(false)
            .execute(&videos, tmp.path(), &mut NullPipelineLogger)
            .unwrap();

        assert_eq!(report.processed(), 2);
        assert_eq!(report.failed(), 1);
        assert!(report.outcomes()[1].is_failure());
        // The files after the failure were still processed
        assert!(tmp.path().join("fine").join("fine.txt").exists());
    }

    #[test]
    fn test_fail_fast_aborts_on_first_failure() {
        let tmp = TempDir::new().unwrap();
        let videos = vec![PathBuf::from("bad.mp4"), PathBuf::from("fine.mp4")];

        let result = batch(true).execute(&videos, tmp.path(), &mut NullPipelineLogger);

        assert!(result.is_err());
        assert!(!tmp.path().join("fine").exists());
    }

    #[test]
    fn test_empty_batch_produces_empty_report() {
        let tmp = TempDir::new().unwrap();
        let report = batch(false)
            .execute(&[], tmp.path(), &mut NullPipelineLogger)
            .unwrap();
        assert_eq!(report.outcomes().len(), 0);
        assert!(!report.has_failures());
    }
}
