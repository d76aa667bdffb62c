use std::path::Path;

use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::audio::domain::audio_segment::AudioSegment;
use crate::transcript::domain::segment::{Segment, TranscriptWord};
use crate::transcript::domain::speech_recognizer::SpeechRecognizer;

/// Speech recognizer using whisper.cpp via whisper-rs.
///
/// The model is loaded once and reused for every file in the run. Word
/// timings are assembled from token-level timestamps; segment text and
/// bounds come straight from the model.
pub struct WhisperRecognizer {
    ctx: WhisperContext,
}

impl std::fmt::Debug for WhisperRecognizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhisperRecognizer").finish_non_exhaustive()
    }
}

impl WhisperRecognizer {
    /// Load the model, preferring GPU inference when `prefer_gpu` is set.
    /// A failed GPU initialization downgrades to CPU instead of failing
    /// the run.
    pub fn new(model_path: &Path, prefer_gpu: bool) -> Result<Self, Box<dyn std::error::Error>> {
        if !model_path.exists() {
            return Err(format!("Whisper model not found at: {}", model_path.display()).into());
        }
        let path = model_path.to_str().ok_or("Invalid model path")?;

        let ctx = match load_context(path, prefer_gpu) {
            Ok(ctx) => {
                if prefer_gpu {
                    log::info!("Using GPU inference");
                }
                ctx
            }
            Err(e) if prefer_gpu => {
                log::warn!("GPU initialization failed ({e}), falling back to CPU");
                load_context(path, false)
                    .map_err(|e| format!("Failed to load Whisper model: {e}"))?
            }
            Err(e) => return Err(format!("Failed to load Whisper model: {e}").into()),
        };

        Ok(Self { ctx })
    }
}

fn load_context(
    path: &str,
    use_gpu: bool,
) -> Result<WhisperContext, whisper_rs::WhisperError> {
    let mut ctx_params = WhisperContextParameters::default();
    ctx_params.use_gpu(use_gpu);
    WhisperContext::new_with_params(path, ctx_params)
}

impl SpeechRecognizer for WhisperRecognizer {
    fn transcribe(
        &self,
        audio: &AudioSegment,
    ) -> Result<Vec<Segment>, Box<dyn std::error::Error>> {
        let mut state = self
            .ctx
            .create_state()
            .map_err(|e| format!("Failed to create Whisper state: {e}"))?;

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 0 });
        params.set_language(Some("auto"));
        params.set_translate(false);
        params.set_token_timestamps(true);
        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);
        params.set_n_threads(num_cpus().min(4) as i32);

        state
            .full(params, audio.samples())
            .map_err(|e| format!("Whisper inference failed: {e}"))?;

        let mut segments = Vec::new();
        let num_segments = state.full_n_segments();

        for seg_idx in 0..num_segments {
            let segment = match state.get_segment(seg_idx) {
                Some(s) => s,
                None => continue,
            };

            let text = match segment.to_str() {
                Ok(t) => t.to_string(),
                Err(_) => continue,
            };

            // Segment timestamps are in centiseconds (10ms units)
            let start = segment.start_timestamp() as f64 / 100.0;
            let end = segment.end_timestamp() as f64 / 100.0;

            let mut words = Vec::new();
            let mut builder: Option<WordBuilder> = None;

            let n_tokens = segment.n_tokens();
            for tok_idx in 0..n_tokens {
                let token = match segment.get_token(tok_idx) {
                    Some(t) => t,
                    None => continue,
                };

                let token_text = match token.to_str() {
                    Ok(t) => t,
                    Err(_) => continue,
                };

                // Skip special tokens ([_BEG_], <|endoftext|>, ...)
                let trimmed = token_text.trim();
                if trimmed.is_empty() || trimmed.starts_with('[') || trimmed.starts_with('<') {
                    continue;
                }

                let token_data = token.token_data();
                let t0 = token_data.t0 as f64 / 100.0;
                let t1 = token_data.t1 as f64 / 100.0;

                // Skip tokens with invalid timestamps
                if t1 <= t0 {
                    continue;
                }

                let prob = token.token_probability();

                // A leading space marks a word boundary; other tokens are
                // sub-word continuations of the current word.
                if token_text.starts_with(char::is_whitespace) || builder.is_none() {
                    if let Some(done) = builder.take() {
                        words.push(done.finish());
                    }
                    builder = Some(WordBuilder::start(trimmed, t0, t1, prob));
                } else if let Some(current) = builder.as_mut() {
                    current.push(trimmed, t1, prob);
                }
            }
            if let Some(done) = builder.take() {
                words.push(done.finish());
            }

            segments.push(Segment {
                start,
                end,
                text,
                words,
            });
        }

        Ok(segments)
    }
}

/// Accumulates sub-word tokens into one timed word.
struct WordBuilder {
    text: String,
    start: f64,
    end: f64,
    prob_sum: f32,
    tokens: u32,
}

impl WordBuilder {
    fn start(text: &str, t0: f64, t1: f64, prob: f32) -> Self {
        Self {
            text: text.to_string(),
            start: t0,
            end: t1,
            prob_sum: prob,
            tokens: 1,
        }
    }

    fn push(&mut self, text: &str, t1: f64, prob: f32) {
        self.text.push_str(text);
        self.end = t1;
        self.prob_sum += prob;
        self.tokens += 1;
    }

    fn finish(self) -> TranscriptWord {
        TranscriptWord {
            word: self.text,
            start_time: self.start,
            end_time: self.end,
            confidence: self.prob_sum / self.tokens as f32,
        }
    }
}

fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
