use std::fs;
use std::path::Path;
use std::time::Instant;

use crate::audio::domain::audio_reader::AudioReader;
use crate::organizing::domain::video_organizer::VideoOrganizer;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::script::domain::sentence_script::SentenceScriptGenerator;
use crate::script::domain::word_script::WordScriptGenerator;
use crate::shared::constants::WHISPER_SAMPLE_RATE;
use crate::transcript::domain::plain_transcript;
use crate::transcript::domain::segment::Segment;
use crate::transcript::domain::speech_recognizer::SpeechRecognizer;

/// Per-video orchestration: organize the file, decode its audio,
/// transcribe, then write the transcript and both caption scripts into
/// the video's output directory.
pub struct CaptionVideoUseCase {
    organizer: Box<dyn VideoOrganizer>,
    audio_reader: Box<dyn AudioReader>,
    recognizer: Box<dyn SpeechRecognizer>,
    sentence_generator: SentenceScriptGenerator,
    word_generator: WordScriptGenerator,
}

impl CaptionVideoUseCase {
    pub fn new(
        organizer: Box<dyn VideoOrganizer>,
        audio_reader: Box<dyn AudioReader>,
        recognizer: Box<dyn SpeechRecognizer>,
        sentence_generator: SentenceScriptGenerator,
        word_generator: WordScriptGenerator,
    ) -> Self {
        Self {
            organizer,
            audio_reader,
            recognizer,
            sentence_generator,
            word_generator,
        }
    }

    /// Returns the number of transcribed segments.
    pub fn execute(
        &self,
        source: &Path,
        output_root: &Path,
        logger: &mut dyn PipelineLogger,
    ) -> Result<usize, Box<dyn std::error::Error>> {
        // 1. Move the video into its own output directory
        let started = Instant::now();
        let organized = self.organizer.organize(source, output_root)?;
        logger.timing("organize", elapsed_ms(started));

        // 2. Decode the audio track
        let started = Instant::now();
        let audio = self
            .audio_reader
            .read_audio(organized.video_path(), WHISPER_SAMPLE_RATE)?;
        logger.timing("decode", elapsed_ms(started));

        // 3. Transcribe; a video without an audio track yields no segments
        let started = Instant::now();
        let segments: Vec<Segment> = match audio {
            Some(audio) => self.recognizer.transcribe(&audio)?,
            None => {
                logger.info(&format!(
                    "No audio track in {}",
                    organized.video_path().display()
                ));
                Vec::new()
            }
        };
        logger.timing("transcribe", elapsed_ms(started));

        // 4. Write the transcript and both scripts
        let started = Instant::now();
        fs::write(
            organized.transcript_path(),
            plain_transcript::render(&segments),
        )?;
        fs::write(
            organized.sentence_script_path(),
            self.sentence_generator.generate(&segments).render(),
        )?;
        fs::write(
            organized.word_script_path(),
            self.word_generator.generate(&segments).render(),
        )?;
        logger.timing("emit", elapsed_ms(started));

        Ok(segments.len())
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}
