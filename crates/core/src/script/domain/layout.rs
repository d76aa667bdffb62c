/// Layout constants for the sentence-mode caption script.
///
/// The fade duration is expressed in source frames and divided by the
/// composition frame rate on the host side.
#[derive(Clone, Debug)]
pub struct SentenceLayout {
    pub fade_frames: u32,
    pub bg_opacity: u32,
    pub font_size: u32,
    /// Vertical caption position as a fraction of the frame height.
    pub y_fraction: f64,
    pub margin: u32,
    pub text_color: [f64; 3],
    pub bg_color: [f64; 3],
}

impl Default for SentenceLayout {
    fn default() -> Self {
        Self {
            fade_frames: 15,
            bg_opacity: 80,
            font_size: 80,
            y_fraction: 0.85,
            margin: 40,
            text_color: [1.0, 1.0, 1.0],
            bg_color: [0.0, 0.0, 0.0],
        }
    }
}

/// Layout constants for the word-by-word caption script.
///
/// The background width is a pixels-per-character heuristic capped at the
/// composition width; no text metrics are consulted.
#[derive(Clone, Debug)]
pub struct WordLayout {
    pub fade_frames: u32,
    pub bg_opacity: u32,
    pub font_size: u32,
    /// Vertical position of the first caption row, in pixels.
    pub y_start: f64,
    pub margin: u32,
    /// Horizontal distance between the centers of adjacent words.
    pub word_spacing: u32,
    pub px_per_char: u32,
    pub bg_padding_px: u32,
    pub text_color: [f64; 3],
    pub bg_color: [f64; 3],
}

impl WordLayout {
    /// Background height for one caption row.
    pub fn bg_height(&self) -> u32 {
        (self.font_size as f64 * 1.8) as u32
    }

    /// Vertical advance applied after each emitted row.
    pub fn y_step(&self) -> f64 {
        (self.font_size + self.margin) as f64
    }
}

impl Default for WordLayout {
    fn default() -> Self {
        Self {
            fade_frames: 10,
            bg_opacity: 80,
            font_size: 80,
            y_start: 200.0,
            margin: 40,
            word_spacing: 60,
            px_per_char: 60,
            bg_padding_px: 100,
            text_color: [1.0, 1.0, 1.0],
            bg_color: [0.0, 0.0, 0.0],
        }
    }
}
