pub mod tts;

// Re-export commonly used types for convenience
pub use tts::{
    AudioFormatTag, HealthStatus, OpenAITTS, SynthesisOptions, SynthesisResult, TTSError,
    TTSResult,
};
