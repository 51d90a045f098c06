use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, bail};
use bytes::Bytes;
use clap::{Parser, Subcommand};
use futures::StreamExt;
use tracing::{info, warn};

use waav_openai_tts::core::tts::openai::VOICE_CATALOG;
use waav_openai_tts::core::tts::{PCM_BYTES_PER_SAMPLE, PCM_CHANNELS, PCM_SAMPLE_RATE};
use waav_openai_tts::plugin::{OPENAI_PLUGIN_ID, OPENAI_PROVIDER_ID};
use waav_openai_tts::{
    OpenAITTSPlugin, PluginContext, PluginLifecycle, PluginRegistry, PluginState,
    ProviderOverrides, SynthesisOptions, TTSCapability,
};

/// WaaV OpenAI TTS - synthesize speech with the OpenAI Audio Speech API
#[derive(Parser, Debug)]
#[command(name = "waav-openai-tts")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Model id (gpt-4o-mini-tts, tts-1, tts-1-hd)
    #[arg(short = 'm', long = "model", global = true)]
    model: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Synthesize text to an audio file
    Speak {
        /// Text to synthesize
        text: String,

        /// Voice id
        #[arg(short = 'v', long = "voice")]
        voice: Option<String>,

        /// Speaking speed (0.25 - 4.0)
        #[arg(short = 's', long = "speed")]
        speed: Option<f32>,

        /// Style instructions (gpt-4o-mini-tts only)
        #[arg(short = 'i', long = "instructions")]
        instructions: Option<String>,

        /// Output file path
        #[arg(short = 'o', long = "output", default_value = "speech.pcm")]
        output: PathBuf,

        /// Wrap the PCM samples in a WAV container
        #[arg(long = "wav")]
        wav: bool,

        /// Consume audio through the streaming interface
        #[arg(long = "stream")]
        stream: bool,
    },

    /// List available voices
    Voices {
        /// Print the catalog as JSON
        #[arg(long = "json")]
        json: bool,
    },

    /// Check that the OpenAI API is reachable
    Health,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists (must be done before config loading)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let mut overrides = match &cli.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            ProviderOverrides::from_yaml_file(path).map_err(|e| anyhow!(e.to_string()))?
        }
        None => ProviderOverrides::default(),
    };
    overrides = overrides.merge(ProviderOverrides {
        model: cli.model.clone(),
        ..Default::default()
    });

    match cli.command {
        Commands::Voices { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&VOICE_CATALOG[..])?);
            } else {
                for voice in VOICE_CATALOG.iter() {
                    println!(
                        "{:<10} {:<8} {}",
                        voice.id,
                        voice.gender.unwrap_or("-"),
                        voice.description.unwrap_or("")
                    );
                }
            }
        }
        Commands::Health => {
            let (mut plugin, tts) = start_plugin(overrides)?;
            let status = tts.health_check().await;
            println!("{status}");
            plugin.shutdown();
            if !status.is_reachable() {
                bail!("OpenAI API is not reachable");
            }
        }
        Commands::Speak {
            text,
            voice,
            speed,
            instructions,
            output,
            wav,
            stream,
        } => {
            overrides = overrides.merge(ProviderOverrides {
                voice,
                speed,
                instructions,
                ..Default::default()
            });
            let (mut plugin, tts) = start_plugin(overrides)?;

            let audio = if stream {
                let mut chunks = tts.stream_synthesize(&text, SynthesisOptions::default());
                let mut audio = Vec::new();
                while let Some(chunk) = chunks.next().await {
                    audio.extend_from_slice(&chunk?);
                }
                Bytes::from(audio)
            } else {
                let result = tts.synthesize(&text, &SynthesisOptions::default()).await?;
                info!(
                    bytes = result.audio.len(),
                    duration_ms = result.duration_ms,
                    "Synthesis complete"
                );
                result.audio
            };

            if wav {
                write_wav(&output, &audio)?;
            } else {
                std::fs::write(&output, &audio)
                    .map_err(|e| anyhow!("Failed to write to {}: {}", output.display(), e))?;
            }
            println!("Audio written to {}", output.display());

            plugin.shutdown();
        }
    }

    Ok(())
}

/// Initialize the plugin against a private registry and fetch its capability.
fn start_plugin(
    overrides: ProviderOverrides,
) -> anyhow::Result<(OpenAITTSPlugin, Arc<dyn TTSCapability>)> {
    let registry = Arc::new(PluginRegistry::new());
    let ctx = PluginContext::new(
        registry.clone(),
        OPENAI_PLUGIN_ID,
        serde_json::to_value(&overrides)?,
    );

    let mut plugin = OpenAITTSPlugin::new();
    if plugin.init(&ctx) != PluginState::Active {
        bail!(
            "{}",
            plugin.last_error().unwrap_or("plugin failed to initialize")
        );
    }

    let tts = registry.require_tts(OPENAI_PROVIDER_ID)?;
    Ok((plugin, tts))
}

fn write_wav(path: &Path, audio: &[u8]) -> anyhow::Result<()> {
    let spec = hound::WavSpec {
        channels: PCM_CHANNELS,
        sample_rate: PCM_SAMPLE_RATE,
        bits_per_sample: (PCM_BYTES_PER_SAMPLE * 8) as u16,
        sample_format: hound::SampleFormat::Int,
    };

    let trailing = audio.len() % PCM_BYTES_PER_SAMPLE as usize;
    if trailing != 0 {
        warn!(
            bytes = audio.len(),
            dropped = trailing,
            "PCM payload is not a whole number of samples, dropping trailing bytes"
        );
    }

    let mut writer = hound::WavWriter::create(path, spec)
        .map_err(|e| anyhow!("Failed to create {}: {}", path.display(), e))?;
    for sample in audio.chunks_exact(PCM_BYTES_PER_SAMPLE as usize) {
        writer.write_sample(i16::from_le_bytes([sample[0], sample[1]]))?;
    }
    writer.finalize()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_wav_frames_samples() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("speech.wav");
        let audio: Vec<u8> = [1i16, -2, 300, i16::MIN]
            .iter()
            .flat_map(|s| s.to_le_bytes())
            .collect();

        write_wav(&path, &audio).unwrap();

        let mut reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().sample_rate, 24000);
        assert_eq!(reader.spec().channels, 1);
        let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(samples, vec![1, -2, 300, i16::MIN]);
    }

    #[test]
    fn test_write_wav_drops_odd_trailing_byte() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("odd.wav");

        write_wav(&path, &[0x10, 0x00, 0x20, 0x00, 0x7f]).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.len(), 2);
    }
}
