pub mod audio;
pub mod organizing;
pub mod pipeline;
pub mod script;
pub mod shared;
pub mod transcript;
