use crate::audio::domain::audio_segment::AudioSegment;

use super::segment::Segment;

/// Domain interface for speech-to-text transcription.
///
/// Implementations run inference on audio to produce timed segments with
/// word-level timestamps.
pub trait SpeechRecognizer: Send {
    fn transcribe(
        &self,
        audio: &AudioSegment,
    ) -> Result<Vec<Segment>, Box<dyn std::error::Error>>;
}
