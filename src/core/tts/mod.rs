mod base;
pub mod openai;

pub use base::{
    AudioChunkStream, AudioFormatTag, HealthStatus, PCM_BYTES_PER_SAMPLE, PCM_CHANNELS,
    PCM_SAMPLE_RATE, SynthesisOptions, SynthesisResult, TTSError, TTSResult,
};
pub use openai::{
    OPENAI_TTS_URL, OpenAITTS, OpenAITTSModel, OpenAIVoice, SpeechRequest, VOICE_CATALOG,
    VoiceCatalogEntry,
};
