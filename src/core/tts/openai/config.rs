//! Configuration types for OpenAI TTS API.
//!
//! This module contains the fixed catalogs the provider validates against:
//! - Model selection (gpt-4o-mini-tts, tts-1, tts-1-hd)
//! - Voice catalog (13 voices)
//! - Audio output formats the API understands

use serde::{Deserialize, Serialize};

// =============================================================================
// OpenAI TTS Models
// =============================================================================

/// Supported OpenAI TTS models.
///
/// - `gpt-4o-mini-tts`: Latest model, accepts free-text style instructions
/// - `tts-1`: Standard quality, lower latency
/// - `tts-1-hd`: High definition quality, higher latency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OpenAITTSModel {
    /// GPT-4o mini TTS model - steerable with instructions
    #[default]
    #[serde(rename = "gpt-4o-mini-tts")]
    Gpt4oMiniTts,
    /// Standard quality TTS model
    #[serde(rename = "tts-1")]
    Tts1,
    /// High definition TTS model
    #[serde(rename = "tts-1-hd")]
    Tts1Hd,
}

impl OpenAITTSModel {
    /// Convert to the API parameter value.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gpt4oMiniTts => "gpt-4o-mini-tts",
            Self::Tts1 => "tts-1",
            Self::Tts1Hd => "tts-1-hd",
        }
    }

    /// Exact lookup by API id. Unknown ids yield `None`.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().iter().copied().find(|m| m.as_str() == id)
    }

    /// Whether the model honours the `instructions` field.
    #[inline]
    pub fn supports_instructions(&self) -> bool {
        matches!(self, Self::Gpt4oMiniTts)
    }

    /// Get all available models.
    pub fn all() -> &'static [OpenAITTSModel] {
        &[Self::Gpt4oMiniTts, Self::Tts1, Self::Tts1Hd]
    }

    /// Comma separated list of valid model ids, for error messages.
    pub fn valid_ids() -> String {
        Self::all()
            .iter()
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for OpenAITTSModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// OpenAI TTS Voices
// =============================================================================

/// Available voices for OpenAI TTS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenAIVoice {
    Alloy,
    Ash,
    Ballad,
    Cedar,
    #[default]
    Coral,
    Echo,
    Fable,
    Marin,
    Nova,
    Onyx,
    Sage,
    Shimmer,
    Verse,
}

impl OpenAIVoice {
    /// Convert to the API parameter value.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        self.entry().id
    }

    /// Exact lookup by API id. Unknown ids yield `None`.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().iter().copied().find(|v| v.as_str() == id)
    }

    /// Get all available voices.
    pub fn all() -> &'static [OpenAIVoice] {
        &[
            Self::Alloy,
            Self::Ash,
            Self::Ballad,
            Self::Cedar,
            Self::Coral,
            Self::Echo,
            Self::Fable,
            Self::Marin,
            Self::Nova,
            Self::Onyx,
            Self::Sage,
            Self::Shimmer,
            Self::Verse,
        ]
    }

    /// Catalog entry describing this voice.
    pub fn entry(&self) -> &'static VoiceCatalogEntry {
        let idx = match self {
            Self::Alloy => 0,
            Self::Ash => 1,
            Self::Ballad => 2,
            Self::Cedar => 3,
            Self::Coral => 4,
            Self::Echo => 5,
            Self::Fable => 6,
            Self::Marin => 7,
            Self::Nova => 8,
            Self::Onyx => 9,
            Self::Sage => 10,
            Self::Shimmer => 11,
            Self::Verse => 12,
        };
        &VOICE_CATALOG[idx]
    }

    /// Comma separated list of valid voice ids, for error messages.
    pub fn valid_ids() -> String {
        VOICE_CATALOG
            .iter()
            .map(|v| v.id)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for OpenAIVoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A selectable voice as listed to hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VoiceCatalogEntry {
    pub id: &'static str,
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
}

/// The static voice catalog, ordered to match `OpenAIVoice::all()`.
pub static VOICE_CATALOG: [VoiceCatalogEntry; 13] = [
    VoiceCatalogEntry {
        id: "alloy",
        name: "Alloy",
        gender: Some("neutral"),
        description: Some("Balanced and versatile"),
    },
    VoiceCatalogEntry {
        id: "ash",
        name: "Ash",
        gender: Some("male"),
        description: Some("Clear and articulate"),
    },
    VoiceCatalogEntry {
        id: "ballad",
        name: "Ballad",
        gender: Some("male"),
        description: Some("Smooth and melodic"),
    },
    VoiceCatalogEntry {
        id: "cedar",
        name: "Cedar",
        gender: Some("male"),
        description: Some("Grounded and natural"),
    },
    VoiceCatalogEntry {
        id: "coral",
        name: "Coral",
        gender: Some("female"),
        description: Some("Warm and friendly"),
    },
    VoiceCatalogEntry {
        id: "echo",
        name: "Echo",
        gender: Some("male"),
        description: Some("Resonant and calm"),
    },
    VoiceCatalogEntry {
        id: "fable",
        name: "Fable",
        gender: Some("neutral"),
        description: Some("Expressive storyteller"),
    },
    VoiceCatalogEntry {
        id: "marin",
        name: "Marin",
        gender: Some("female"),
        description: Some("Bright and natural"),
    },
    VoiceCatalogEntry {
        id: "nova",
        name: "Nova",
        gender: Some("female"),
        description: Some("Energetic and youthful"),
    },
    VoiceCatalogEntry {
        id: "onyx",
        name: "Onyx",
        gender: Some("male"),
        description: Some("Deep and authoritative"),
    },
    VoiceCatalogEntry {
        id: "sage",
        name: "Sage",
        gender: Some("female"),
        description: Some("Calm and thoughtful"),
    },
    VoiceCatalogEntry {
        id: "shimmer",
        name: "Shimmer",
        gender: Some("female"),
        description: Some("Soft and gentle"),
    },
    VoiceCatalogEntry {
        id: "verse",
        name: "Verse",
        gender: Some("male"),
        description: Some("Dynamic and engaging"),
    },
];

// =============================================================================
// Audio Output Format
// =============================================================================

/// Audio output formats understood by the OpenAI speech endpoint.
///
/// Only `Pcm` is ever requested; the others are recognised so a caller's
/// requested format can be reported when it gets substituted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioOutputFormat {
    Mp3,
    Opus,
    Aac,
    Flac,
    Wav,
    /// Raw PCM format (24kHz 16-bit mono little-endian)
    #[default]
    Pcm,
}

impl AudioOutputFormat {
    /// Convert to the API parameter value.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Opus => "opus",
            Self::Aac => "aac",
            Self::Flac => "flac",
            Self::Wav => "wav",
            Self::Pcm => "pcm",
        }
    }

    /// Parse a caller-supplied format name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "mp3" | "mpeg" => Some(Self::Mp3),
            "opus" => Some(Self::Opus),
            "aac" => Some(Self::Aac),
            "flac" => Some(Self::Flac),
            "wav" => Some(Self::Wav),
            "pcm" | "linear16" | "raw" | "pcm_s16le" => Some(Self::Pcm),
            _ => None,
        }
    }
}

impl std::fmt::Display for AudioOutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
