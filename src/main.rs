mod cli;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use chapterize_core::{ApiKey, SegmentationRun};
use chapterize_engine::{digest, load_transcript, Segmenter, SegmenterConfig};
use chapterize_llm::{AnthropicClient, AnthropicDetector};

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays clean for piped JSON output.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Segment {
            transcript,
            output,
            segments,
            window_size,
            overlap,
            model,
        } => {
            let selection = segments
                .as_deref()
                .map(cli::parse_selection)
                .transpose()
                .map_err(|e| anyhow::anyhow!(e))?;

            let messages = load_transcript(&transcript)?;
            tracing::info!(total = messages.len(), "transcript loaded");

            let client = AnthropicClient::new(api_key_from_env()?, model);
            let detector = Arc::new(AnthropicDetector::new(client));
            let engine = Segmenter::new(detector, SegmenterConfig { window_size, overlap })?;

            let mut result = engine.segment(&messages).await?;
            if let Some(ids) = selection {
                result.retain(|s| ids.binary_search(&s.segment_id).is_ok());
            }

            let run = SegmentationRun::new(
                transcript.display().to_string(),
                messages.len(),
                result,
            );
            let json = serde_json::to_string_pretty(&run)?;
            write_output(output.as_deref(), &json)?;
        }
        Command::Digest {
            transcript,
            output,
            chunk_size,
            model,
        } => {
            let messages = load_transcript(&transcript)?;
            tracing::info!(total = messages.len(), "transcript loaded");

            let client = AnthropicClient::new(api_key_from_env()?, model);
            let summary = digest::summarize(&messages, &client, chunk_size).await?;
            write_output(output.as_deref(), &summary)?;
        }
    }

    Ok(())
}

fn api_key_from_env() -> anyhow::Result<ApiKey> {
    let key = std::env::var("ANTHROPIC_API_KEY")
        .context("ANTHROPIC_API_KEY is not set")?;
    Ok(ApiKey::new(key))
}

fn write_output(path: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "output written");
        }
        None => println!("{content}"),
    }
    Ok(())
}
