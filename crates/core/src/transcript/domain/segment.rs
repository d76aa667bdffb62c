/// One recognized word within a segment, with its own timing.
#[derive(Clone, Debug, PartialEq)]
pub struct TranscriptWord {
    pub word: String,
    pub start_time: f64,
    pub end_time: f64,
    pub confidence: f32,
}

impl TranscriptWord {
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }
}

/// One contiguous span of recognized speech.
///
/// Words are time-ordered and non-overlapping by construction of the model;
/// the list is empty when no word-level timestamps were produced for the span.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub text: String,
    pub words: Vec<TranscriptWord>,
}

impl Segment {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    pub fn has_words(&self) -> bool {
        !self.words.is_empty()
    }
}
