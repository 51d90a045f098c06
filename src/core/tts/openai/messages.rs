//! Wire types for the OpenAI Audio Speech API.
//!
//! API Reference: https://platform.openai.com/docs/api-reference/audio/createSpeech

use serde::{Deserialize, Serialize};

/// JSON body of `POST /v1/audio/speech`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechRequest {
    /// Model id
    pub model: String,

    /// Text to synthesize
    pub input: String,

    /// Voice id
    pub voice: String,

    /// Always "pcm" for this provider
    pub response_format: String,

    /// Speaking speed
    pub speed: f32,

    /// Style instructions, omitted unless the model supports them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}
