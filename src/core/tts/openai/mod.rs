//! OpenAI TTS provider module.
//!
//! This module provides text-to-speech functionality using OpenAI's Audio Speech API.
//!
//! # Supported Models
//!
//! - `gpt-4o-mini-tts` - Default, steerable with free-text instructions
//! - `tts-1` - Standard quality, lower latency
//! - `tts-1-hd` - High definition quality, higher latency
//!
//! # Supported Voices
//!
//! alloy, ash, ballad, cedar, coral, echo, fable, marin, nova, onyx, sage, shimmer, verse
//!
//! # Audio Format
//!
//! Always raw PCM (24kHz 16-bit mono little-endian). A caller-requested
//! output format other than PCM is logged and ignored.

mod config;
mod messages;
mod provider;

pub use config::{AudioOutputFormat, OpenAITTSModel, OpenAIVoice, VOICE_CATALOG, VoiceCatalogEntry};
pub use messages::SpeechRequest;
pub use provider::{
    HEALTH_CHECK_TIMEOUT, OPENAI_TTS_URL, OpenAITTS, SYNTHESIS_TIMEOUT, decode_pcm, pcm_duration_ms,
};
