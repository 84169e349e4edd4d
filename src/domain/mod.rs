pub mod ecosystem;
pub mod monitor;
pub mod tts;
