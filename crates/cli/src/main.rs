use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use capscribe_core::audio::infrastructure::ffmpeg_audio_reader::FfmpegAudioReader;
use capscribe_core::organizing::infrastructure::fs_video_organizer::FsVideoOrganizer;
use capscribe_core::pipeline::batch_caption_use_case::BatchCaptionUseCase;
use capscribe_core::pipeline::caption_video_use_case::CaptionVideoUseCase;
use capscribe_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use capscribe_core::script::domain::layout::{SentenceLayout, WordLayout};
use capscribe_core::script::domain::sentence_script::SentenceScriptGenerator;
use capscribe_core::script::domain::word_script::WordScriptGenerator;
use capscribe_core::shared::constants::VIDEO_EXTENSIONS;
use capscribe_core::shared::model_resolver;
use capscribe_core::transcript::domain::model_size::ModelSize;
use capscribe_core::transcript::infrastructure::whisper_recognizer::WhisperRecognizer;

/// Batch transcription and caption script generation for videos.
#[derive(Parser)]
#[command(name = "capscribe")]
struct Cli {
    /// Directory containing source videos.
    #[arg(default_value = "videos")]
    source: PathBuf,

    /// Root directory for per-video output folders.
    #[arg(long, default_value = "output")]
    output: PathBuf,

    /// Whisper model size: tiny, base, small, medium or large.
    #[arg(long, default_value = "base")]
    model_size: String,

    /// Prefer GPU inference (falls back to CPU when unavailable).
    #[arg(long)]
    gpu: bool,

    /// Abort the batch on the first failed video.
    #[arg(long)]
    fail_fast: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let model_size: ModelSize = cli.model_size.parse()?;

    let videos = scan_source_dir(&cli.source)?;
    if videos.is_empty() {
        log::info!("No videos found in {}", cli.source.display());
        return Ok(());
    }
    log::info!("Found {} video(s) in {}", videos.len(), cli.source.display());

    log::info!("Resolving Whisper model: {model_size}");
    let model_path = model_resolver::resolve(model_size, Some(Box::new(download_progress)))?;
    eprintln!();

    let recognizer = WhisperRecognizer::new(&model_path, cli.gpu)?;

    let use_case = CaptionVideoUseCase::new(
        Box::new(FsVideoOrganizer),
        Box::new(FfmpegAudioReader),
        Box::new(recognizer),
        SentenceScriptGenerator::new(SentenceLayout::default()),
        WordScriptGenerator::new(WordLayout::default()),
    );
    let batch = BatchCaptionUseCase::new(use_case, cli.fail_fast);

    let mut logger = StdoutPipelineLogger::new();
    let report = batch.execute(&videos, &cli.output, &mut logger)?;

    println!("{}", report.summary_string());
    if report.has_failures() {
        return Err(format!("{} video(s) failed", report.failed()).into());
    }
    Ok(())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.source.is_dir() {
        return Err(format!("Source directory not found: {}", cli.source.display()).into());
    }
    if let Err(e) = cli.model_size.parse::<ModelSize>() {
        return Err(e.into());
    }
    Ok(())
}

fn scan_source_dir(dir: &Path) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let mut videos: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_video(path))
        .collect();
    videos.sort();
    Ok(videos)
}

fn is_video(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| VIDEO_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading Whisper model... {pct}%");
    } else {
        eprint!("\rDownloading Whisper model... {downloaded} bytes");
    }
}
