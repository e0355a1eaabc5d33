use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "chapterize", about = "Split chat transcripts into topic segments", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Segment a transcript into topic-labelled chapters.
    Segment {
        /// Path to a JSON transcript file.
        transcript: PathBuf,
        /// Output file (default: print to stdout).
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Only emit the given segment ids, e.g. "1,3-5".
        #[arg(long)]
        segments: Option<String>,
        /// Messages per analysis window.
        #[arg(long, default_value_t = 80)]
        window_size: usize,
        /// Messages shared between adjacent windows.
        #[arg(long, default_value_t = 10)]
        overlap: usize,
        #[arg(long, default_value = chapterize_llm::DEFAULT_MODEL)]
        model: String,
    },
    /// Produce a keyword-driven context summary of a transcript.
    Digest {
        /// Path to a JSON transcript file.
        transcript: PathBuf,
        /// Output file (default: print to stdout).
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Messages per keyword-extraction chunk.
        #[arg(long, default_value_t = chapterize_engine::digest::DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,
        #[arg(long, default_value = chapterize_llm::DEFAULT_MODEL)]
        model: String,
    },
}

/// Parse a segment selection like `1,3-5` into a sorted, deduplicated
/// id list.
pub fn parse_selection(spec: &str) -> Result<Vec<u32>, String> {
    let mut ids = Vec::new();

    for part in spec.split(',') {
        let part = part.trim();
        if part.is_empty() {
            return Err(format!("empty entry in selection: {spec:?}"));
        }

        if let Some((low, high)) = part.split_once('-') {
            let start: u32 = low
                .trim()
                .parse()
                .map_err(|_| format!("invalid segment id: {low:?}"))?;
            let end: u32 = high
                .trim()
                .parse()
                .map_err(|_| format!("invalid segment id: {high:?}"))?;
            if start == 0 || end < start {
                return Err(format!("invalid range: {part:?}"));
            }
            ids.extend(start..=end);
        } else {
            let id: u32 = part
                .parse()
                .map_err(|_| format!("invalid segment id: {part:?}"))?;
            if id == 0 {
                return Err("segment ids are 1-based".into());
            }
            ids.push(id);
        }
    }

    ids.sort_unstable();
    ids.dedup();
    Ok(ids)
}
