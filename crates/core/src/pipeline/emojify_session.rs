//! Application-level coordinator between the video source, the tracker and
//! the emoji renderer.

use thiserror::Error;

use crate::drawing::domain::drawing_surface::DrawingSurface;
use crate::pipeline::face_to_emoji_renderer::FaceToEmojiRenderer;
use crate::tracking::domain::face_tracker::{FaceTracker, TrackerLifecycle};
use crate::tracking::infrastructure::replay_tracker::RecordingError;

/// Failures reported by whatever supplies the video stream.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    #[error("permission to use the camera was denied")]
    PermissionDenied,
    #[error("video capture is not supported")]
    Unsupported,
    #[error("stream error: {0}")]
    Other(String),
}

impl StreamError {
    /// Classifies an upstream error by name, e.g. `PermissionDeniedError`.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "permissiondeniederror" | "notallowederror" => StreamError::PermissionDenied,
            "notsupportederror" => StreamError::Unsupported,
            _ => StreamError::Other(name.to_string()),
        }
    }

    /// Message to show the user in place of the emoji.
    pub fn user_message(&self) -> &'static str {
        match self {
            StreamError::PermissionDenied => "This app needs permission to use your webcam.",
            StreamError::Unsupported => "Unfortunately, this system doesn't support webcam feeds :(",
            StreamError::Other(_) => "Error getting webcam feed!",
        }
    }
}

impl From<&RecordingError> for StreamError {
    fn from(err: &RecordingError) -> Self {
        match err {
            RecordingError::Io { source, .. }
                if source.kind() == std::io::ErrorKind::PermissionDenied =>
            {
                StreamError::PermissionDenied
            }
            other => StreamError::Other(other.to_string()),
        }
    }
}

/// Logs a stream failure and returns the message to display.
pub fn report_stream_error(err: &StreamError) -> &'static str {
    log::error!("Error: {err}");
    err.user_message()
}

/// Owns the renderer and the "stream started" flag.
///
/// Tracking may only start once the stream has reported its dimensions,
/// because the tracker needs a sized source. Stopping resets the tracker
/// and blanks the surface so no stale emoji remains.
pub struct EmojifySession<T, S> {
    renderer: FaceToEmojiRenderer<T, S>,
    stream_started: bool,
}

impl<T, S> EmojifySession<T, S>
where
    T: FaceTracker + TrackerLifecycle,
    S: DrawingSurface,
{
    pub fn new(renderer: FaceToEmojiRenderer<T, S>) -> Self {
        Self {
            renderer,
            stream_started: false,
        }
    }

    /// The stream knows its size: create the emoji surface to match.
    pub fn on_stream_ready(&mut self, width: u32, height: u32) {
        self.stream_started = true;
        self.renderer.start(width, height);
        log::info!("Stream ready ({width}x{height})");
    }

    pub fn is_stream_started(&self) -> bool {
        self.stream_started
    }

    /// Starts the tracker. Ignored until the stream is ready; returns whether
    /// tracking started.
    pub fn start_tracking(&mut self) -> bool {
        if !self.stream_started {
            log::warn!("Start ignored: stream not ready");
            return false;
        }
        self.renderer.tracker_mut().start();
        log::info!("Tracking started");
        true
    }

    pub fn stop_tracking(&mut self) {
        let tracker = self.renderer.tracker_mut();
        tracker.reset();
        tracker.stop();
        self.renderer.clear();
        log::info!("Tracking stopped");
    }

    pub fn on_stream_error(&self, err: &StreamError) -> &'static str {
        report_stream_error(err)
    }

    pub fn renderer(&self) -> &FaceToEmojiRenderer<T, S> {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut FaceToEmojiRenderer<T, S> {
        &mut self.renderer
    }
}
