//! Built-in plugins shipped with this crate.

mod openai;

pub use openai::{OPENAI_PLUGIN_ID, OPENAI_PROVIDER_ID, OpenAITTSPlugin, openai_tts_metadata};
