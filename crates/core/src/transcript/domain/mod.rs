pub mod model_size;
pub mod plain_transcript;
pub mod segment;
pub mod speech_recognizer;
