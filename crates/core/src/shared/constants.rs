/// Container extensions accepted when scanning a source directory.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi", "mkv"];

/// Whisper expects 16 kHz mono input.
pub const WHISPER_SAMPLE_RATE: u32 = 16000;

/// Suffix appended to the base name for the word-by-word script file.
pub const WORD_SCRIPT_SUFFIX: &str = "_word";
