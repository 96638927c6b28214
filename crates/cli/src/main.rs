use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use emojify_core::drawing::domain::drawing_surface::DrawingSurface;
use emojify_core::drawing::infrastructure::display_list::DisplayList;
use emojify_core::drawing::infrastructure::raster_surface::RasterSurface;
use emojify_core::emoji::domain::debug_toggle::DEBUG_TOGGLE_KEY;
use emojify_core::pipeline::emojify_session::EmojifySession;
use emojify_core::pipeline::face_to_emoji_renderer::FaceToEmojiRenderer;
use emojify_core::tracking::infrastructure::replay_tracker::{ReplayTracker, TrackingRecording};

/// Render a recorded face tracking session as emoji frames.
#[derive(Parser)]
#[command(name = "emojify")]
struct Cli {
    /// Tracking recording (JSON).
    recording: PathBuf,

    /// Directory to write frames into (created if missing).
    output_dir: PathBuf,

    /// Surface width in pixels (defaults to the recording's).
    #[arg(long)]
    width: Option<u32>,

    /// Surface height in pixels (defaults to the recording's).
    #[arg(long)]
    height: Option<u32>,

    /// Draw the debug overlay: match score and landmark markers.
    #[arg(long)]
    debug: bool,

    /// Output format: png or json.
    #[arg(long, default_value = "png")]
    format: String,

    /// Frames to render; the recording loops if this exceeds its length.
    #[arg(long)]
    frames: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Png,
    Json,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Json => "json",
        }
    }
}

struct RenderJob {
    output_dir: PathBuf,
    width: u32,
    height: u32,
    debug: bool,
    frames: usize,
    format: OutputFormat,
}

#[derive(Debug, Default, PartialEq, Eq)]
struct RenderSummary {
    frames: usize,
    faces: usize,
    open_mouths: usize,
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

    let recording = TrackingRecording::load(&cli.recording)?;
    log::info!(
        "Loaded {} frames from {}",
        recording.len(),
        cli.recording.display()
    );

    let job = RenderJob {
        output_dir: cli.output_dir,
        width: cli.width.unwrap_or(recording.width),
        height: cli.height.unwrap_or(recording.height),
        debug: cli.debug,
        frames: cli.frames.unwrap_or(recording.len()),
        format: parse_format(&cli.format),
    };
    let looping = job.frames > recording.len();
    let tracker = ReplayTracker::new(recording).with_looping(looping);

    fs::create_dir_all(&job.output_dir)?;
    let summary = match job.format {
        OutputFormat::Png => render_frames(tracker, RasterSurface::new(), &job, |surface, path| {
            surface.save(path).map_err(Into::into)
        })?,
        OutputFormat::Json => {
            render_frames(tracker, DisplayList::new(), &job, write_display_list)?
        }
    };

    log::info!(
        "Rendered {} frames ({} with a face, {} with the mouth open) to {}",
        summary.frames,
        summary.faces,
        summary.open_mouths,
        job.output_dir.display()
    );
    Ok(())
}

fn render_frames<S, F>(
    tracker: ReplayTracker,
    surface: S,
    job: &RenderJob,
    mut export: F,
) -> Result<RenderSummary, Box<dyn std::error::Error>>
where
    S: DrawingSurface,
    F: FnMut(&S, &Path) -> Result<(), Box<dyn std::error::Error>>,
{
    let mut session = EmojifySession::new(FaceToEmojiRenderer::new(tracker, surface));
    session.on_stream_ready(job.width, job.height);
    session.start_tracking();
    if job.debug {
        session.renderer_mut().key_pressed(DEBUG_TOGGLE_KEY);
    }

    let mut summary = RenderSummary::default();
    for index in 0..job.frames {
        if let Some(metrics) = session.renderer_mut().draw_frame() {
            summary.faces += 1;
            if metrics.mouth_state.is_open() {
                summary.open_mouths += 1;
            }
        }
        let path = job
            .output_dir
            .join(format!("frame_{index:05}.{}", job.format.extension()));
        export(session.renderer().surface(), &path)?;
        summary.frames += 1;
        eprint!("\rRendering frame {}/{}", index + 1, job.frames);
    }
    eprintln!();

    session.stop_tracking();
    Ok(summary)
}

fn write_display_list(list: &DisplayList, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(list.commands())?;
    fs::write(path, json)?;
    Ok(())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.recording.exists() {
        return Err(format!("Recording not found: {}", cli.recording.display()).into());
    }
    if cli.format != "png" && cli.format != "json" {
        return Err(format!("Format must be 'png' or 'json', got '{}'", cli.format).into());
    }
    if cli.width == Some(0) || cli.height == Some(0) {
        return Err("Width and height must be positive".into());
    }
    if cli.frames == Some(0) {
        return Err("Frame count must be positive".into());
    }
    Ok(())
}

fn parse_format(format: &str) -> OutputFormat {
    if format == "json" {
        OutputFormat::Json
    } else {
        OutputFormat::Png
    }
}
