//! dropzone-sim: run the upload lifecycle on local files from the terminal.
//!
//! Feeds each file through the same acceptance filter, simulated
//! transfer and completion step the web app uses, then prints what the
//! file list would show. Useful for:
//!
//! - Checking which files a configuration accepts, and why others are rejected
//! - Reproducing a transfer with `--seed`
//! - Deleting files mid-upload and confirming they stay gone
//!
//! # Usage
//!
//! ```text
//! cargo run --bin dropzone-sim -- [OPTIONS] <FILES>...
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::fmt::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use dropzone_core::{
    Completion, ConfigError, FileHandle, FileId, FileMeta, InMemoryStore, PreviewVariant, Progress,
    Session, SimulatedProgress, StepRange, TickOutcome, UploadConfig, UploadTask, format_file_size,
    select_preview, validate_meta,
};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Upload lifecycle simulator for dropzone.
///
/// Validates, "uploads" and previews the given files exactly as the
/// browser portal would, without a browser.
#[derive(Parser)]
#[command(name = "dropzone-sim", version)]
struct Cli {
    /// Files to select, in order.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Seed for the simulated transfer speed. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Largest accepted file, in bytes.
    #[arg(long, default_value_t = UploadConfig::DEFAULT_MAX_FILE_SIZE)]
    max_file_size: u64,

    /// Delay between progress ticks, in milliseconds.
    #[arg(
        long,
        default_value_t = UploadConfig::DEFAULT_TICK_INTERVAL_MS,
        value_parser = clap::value_parser!(u32).range(1..),
    )]
    tick_ms: u32,

    /// Sleep one tick interval between rounds instead of running flat out.
    #[arg(long)]
    realtime: bool,

    /// Delete the file with this name (repeatable).
    #[arg(long = "delete", value_name = "NAME")]
    delete: Vec<String>,

    /// Number of tick rounds to run before applying `--delete`.
    #[arg(long, default_value_t = 0)]
    delete_after_ticks: u32,

    /// Output the report as JSON instead of human-readable lines.
    #[arg(long)]
    json: bool,

    /// Full upload config as a JSON string.
    ///
    /// When provided, `--max-file-size` and `--tick-ms` are ignored.
    /// The JSON must be a valid `UploadConfig` serialization; missing
    /// fields take their defaults.
    #[arg(long)]
    config_json: Option<String>,
}

/// Build an [`UploadConfig`] from CLI arguments.
///
/// If `--config-json` is provided, the JSON is parsed directly and the
/// individual flags are ignored.
fn config_from_cli(cli: &Cli) -> Result<UploadConfig, String> {
    if let Some(ref json) = cli.config_json {
        return serde_json::from_str(json).map_err(|e| format!("Error parsing --config-json: {e}"));
    }

    Ok(UploadConfig {
        max_file_size: cli.max_file_size,
        tick_interval_ms: cli.tick_ms,
        ..UploadConfig::default()
    })
}

/// Everything [`simulate`] needs besides the files themselves.
struct Plan {
    config: UploadConfig,
    seed: Option<u64>,
    delete: Vec<String>,
    delete_after_ticks: u32,
    realtime: bool,
}

/// Final state of one selected file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum Status {
    /// Rejected by the acceptance filter; never tracked.
    Rejected,
    /// Deleted before the run ended.
    Deleted,
    /// Still tracked when the run ended.
    Uploaded,
}

/// One line of the report.
#[derive(Debug, Serialize)]
struct FileReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<FileId>,
    name: String,
    size: u64,
    media_type: String,
    status: Status,
    progress: Progress,
    ticks: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    preview: Option<PreviewVariant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl FileReport {
    fn new(handle: &FileHandle) -> Self {
        Self {
            id: None,
            name: handle.name.clone(),
            size: handle.size,
            media_type: handle.media_type.to_string(),
            status: Status::Rejected,
            progress: Progress::ZERO,
            ticks: 0,
            preview: None,
            error: None,
        }
    }

    /// One human-readable line.
    fn describe(&self) -> String {
        let id = self.id.map_or_else(|| "-".to_owned(), |id| id.to_string());
        let mut line = format!(
            "{id:<8} {:<24} {:>10}  {:<24} ",
            self.name,
            format_file_size(self.size),
            self.media_type,
        );
        let (progress, ticks) = (self.progress, self.ticks);
        match self.status {
            Status::Rejected => {
                line.push_str("rejected: ");
                line.push_str(self.error.as_deref().unwrap_or("unknown reason"));
            }
            Status::Deleted => {
                let _ = write!(line, "deleted at {progress} after {ticks} ticks");
            }
            Status::Uploaded => {
                let _ = write!(line, "{progress} in {ticks} ticks");
                if let Some(ref preview) = self.preview {
                    let _ = write!(line, "  preview: {}", preview_summary(preview));
                }
            }
        }
        line
    }
}

/// Longest text excerpt shown in human output, in characters.
const EXCERPT_CHARS: usize = 40;

fn preview_summary(preview: &PreviewVariant) -> String {
    match preview {
        PreviewVariant::Image { url, .. } => format!("image {url}"),
        PreviewVariant::Document { url, .. } => format!("document {url}"),
        PreviewVariant::Text { content } => {
            let excerpt: String = content.chars().take(EXCERPT_CHARS).collect();
            let ellipsis = if content.chars().count() > EXCERPT_CHARS {
                "..."
            } else {
                ""
            };
            format!("text {excerpt:?}{ellipsis}")
        }
        PreviewVariant::Unsupported { .. } => "unsupported".to_owned(),
    }
}

/// An accepted file's task plus its slot in the report.
struct Running {
    report: usize,
    task: UploadTask<SimulatedProgress>,
}

fn source_for(steps: StepRange, seed: Option<u64>, id: FileId) -> SimulatedProgress {
    seed.map_or_else(
        || SimulatedProgress::from_entropy(steps),
        |seed| SimulatedProgress::seeded(steps, seed ^ id.get()),
    )
}

/// Select `handles` one at a time, tick every accepted upload in
/// round-robin until all have finished or been deleted, and report the
/// final state of each file.
fn simulate(handles: Vec<FileHandle>, plan: &Plan) -> Result<Vec<FileReport>, ConfigError> {
    let steps = StepRange::from_config(&plan.config)?;
    let mut session = Session::new(plan.config.clone(), InMemoryStore::new())?;
    let mut reports = Vec::with_capacity(handles.len());
    let mut running = Vec::new();
    let seed = plan.seed;

    for handle in handles {
        let mut report = FileReport::new(&handle);
        let mut tasks = session.select_files_with(vec![handle], |id| source_for(steps, seed, id));
        if let Some(task) = tasks.pop() {
            report.id = Some(task.id());
            report.status = Status::Uploaded;
            running.push(Running {
                report: reports.len(),
                task,
            });
        } else {
            report.error = session.error().map(|e| e.message.clone());
            session.dismiss_error();
        }
        reports.push(report);
    }

    let mut round = 0;
    let mut deletes_applied = plan.delete.is_empty();
    loop {
        // Deletes due after the last upload finished still apply.
        if !deletes_applied && (round >= plan.delete_after_ticks || running.is_empty()) {
            apply_deletes(&mut session, &reports, &plan.delete);
            deletes_applied = true;
        }
        if running.is_empty() {
            break;
        }

        round += 1;
        if plan.realtime {
            std::thread::sleep(plan.config.tick_interval());
        }

        let mut still = Vec::with_capacity(running.len());
        for mut entry in running {
            let report = &mut reports[entry.report];
            report.ticks += 1;
            match entry.task.tick(&mut session) {
                TickOutcome::InFlight(progress) => {
                    report.progress = progress;
                    still.push(entry);
                }
                TickOutcome::Finished => {
                    let completion = entry.task.complete(&mut session);
                    if completion == Completion::Completed {
                        report.progress = Progress::COMPLETE;
                    }
                    debug!(file = %report.name, ?completion, "upload finished");
                }
                TickOutcome::Orphaned => {}
            }
        }
        running = still;
    }
    info!(rounds = round, "simulation finished");

    for report in &mut reports {
        let Some(id) = report.id else { continue };
        match session.file(id) {
            Some(entity) => {
                report.progress = entity.progress();
                report.preview = entity.is_complete().then(|| select_preview(entity));
            }
            None => report.status = Status::Deleted,
        }
    }
    Ok(reports)
}

fn apply_deletes(session: &mut Session<InMemoryStore>, reports: &[FileReport], names: &[String]) {
    for report in reports {
        if let Some(id) = report.id
            && names.contains(&report.name)
            && session.delete_file(id)
        {
            info!(%id, file = %report.name, "deleted");
        }
    }
}

/// Read one file for selection.
///
/// The file's metadata is checked first. A file that `config` rejects
/// is never read: its handle keeps the on-disk size but carries no
/// bytes, and the session records the rejection.
fn read_handle(path: &Path, config: &UploadConfig) -> std::io::Result<FileHandle> {
    let name = match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => path.display().to_string(),
    };
    let meta = FileMeta::new(name, std::fs::metadata(path)?.len(), None);
    if let Err(err) = validate_meta(&meta, config) {
        debug!(file = %meta.name, error = %err, "not reading rejected file");
        return Ok(meta.into_handle(Vec::new()));
    }
    let payload = std::fs::read(path)?;
    Ok(meta.into_handle(payload))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match config_from_cli(&cli) {
        Ok(c) => c,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    let mut handles = Vec::with_capacity(cli.files.len());
    for path in &cli.files {
        match read_handle(path, &config) {
            Ok(handle) => handles.push(handle),
            Err(e) => {
                eprintln!("Error reading {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        }
    }

    let plan = Plan {
        config,
        seed: cli.seed,
        delete: cli.delete,
        delete_after_ticks: cli.delete_after_ticks,
        realtime: cli.realtime,
    };

    let reports = match simulate(handles, &plan) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Invalid config: {e}");
            return ExitCode::FAILURE;
        }
    };

    if cli.json {
        match serde_json::to_string_pretty(&reports) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error serializing report: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        for report in &reports {
            println!("{}", report.describe());
        }
    }

    ExitCode::SUCCESS
}
