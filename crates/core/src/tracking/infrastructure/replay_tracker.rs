//! Tracker that plays back a recorded tracking session.
//!
//! Recording format (JSON):
//!
//! ```json
//! {
//!   "width": 640,
//!   "height": 480,
//!   "frames": [
//!     { "landmarks": [[x, y], ...71 points...], "score": 0.87 },
//!     { "landmarks": null }
//!   ]
//! }
//! ```
//!
//! `width`/`height` default to 640x480 and `score` to 0.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::shared::constants::{DEFAULT_FRAME_HEIGHT, DEFAULT_FRAME_WIDTH};
use crate::shared::point::Point;
use crate::tracking::domain::face_tracker::{FaceTracker, TrackerLifecycle};
use crate::tracking::domain::landmark_set::{LandmarkError, LandmarkSet};
use crate::tracking::domain::tracking_sample::TrackingSample;

#[derive(Error, Debug)]
pub enum RecordingError {
    #[error("failed to read recording {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid recording JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("frame {frame}: {source}")]
    Landmarks {
        frame: usize,
        #[source]
        source: LandmarkError,
    },
    #[error("recording has no frames")]
    Empty,
}

#[derive(Deserialize)]
struct RawRecording {
    width: Option<u32>,
    height: Option<u32>,
    frames: Vec<RawFrame>,
}

#[derive(Deserialize)]
struct RawFrame {
    landmarks: Option<Vec<Point>>,
    #[serde(default)]
    score: f64,
}

/// A validated recording: every present landmark list is complete.
#[derive(Clone, Debug)]
pub struct TrackingRecording {
    pub width: u32,
    pub height: u32,
    pub samples: Vec<TrackingSample>,
}

impl TrackingRecording {
    pub fn load(path: &Path) -> Result<Self, RecordingError> {
        let json = fs::read_to_string(path).map_err(|source| RecordingError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, RecordingError> {
        let raw: RawRecording = serde_json::from_str(json)?;
        if raw.frames.is_empty() {
            return Err(RecordingError::Empty);
        }

        let samples = raw
            .frames
            .into_iter()
            .enumerate()
            .map(|(frame, f)| -> Result<TrackingSample, RecordingError> {
                let Some(points) = f.landmarks else {
                    return Ok(TrackingSample::no_face());
                };
                let landmarks = LandmarkSet::try_from(points)
                    .map_err(|source| RecordingError::Landmarks { frame, source })?;
                Ok(TrackingSample::detected(landmarks, f.score))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            width: raw.width.unwrap_or(DEFAULT_FRAME_WIDTH),
            height: raw.height.unwrap_or(DEFAULT_FRAME_HEIGHT),
            samples,
        })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Replays a [`TrackingRecording`] one frame per landmark poll.
///
/// Reports no face while stopped. Once the recording is exhausted it either
/// wraps around (looping) or keeps reporting no face.
pub struct ReplayTracker {
    samples: Vec<TrackingSample>,
    cursor: usize,
    current: Option<usize>,
    running: bool,
    looping: bool,
}

impl ReplayTracker {
    pub fn new(recording: TrackingRecording) -> Self {
        Self {
            samples: recording.samples,
            cursor: 0,
            current: None,
            running: false,
            looping: false,
        }
    }

    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Index of the frame last returned by a poll.
    pub fn current_frame(&self) -> Option<usize> {
        self.current
    }

    pub fn is_finished(&self) -> bool {
        !self.looping && self.cursor >= self.samples.len()
    }
}

impl FaceTracker for ReplayTracker {
    fn current_landmarks(&mut self) -> Option<LandmarkSet> {
        if !self.running || self.samples.is_empty() {
            return None;
        }
        if self.cursor >= self.samples.len() {
            if !self.looping {
                self.current = None;
                return None;
            }
            self.cursor = 0;
        }
        let index = self.cursor;
        self.cursor += 1;
        self.current = Some(index);
        self.samples[index].landmarks.clone()
    }

    fn confidence_score(&self) -> f64 {
        self.current
            .map(|i| self.samples[i].score)
            .unwrap_or(0.0)
    }
}

impl TrackerLifecycle for ReplayTracker {
    fn start(&mut self) {
        self.running = true;
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn reset(&mut self) {
        self.cursor = 0;
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::domain::landmark_set::{LANDMARK_COUNT, NOSE_CENTER};
    use approx::assert_relative_eq;
    use std::io::Write;

    fn points_json(offset: f64) -> String {
        let pts: Vec<String> = (0..LANDMARK_COUNT)
            .map(|i| format!("[{}, {}]", i as f64 + offset, i as f64))
            .collect();
        format!("[{}]", pts.join(","))
    }

    fn three_frame_json() -> String {
        format!(
            r#"{{ "width": 320, "height": 240, "frames": [
                {{ "landmarks": {}, "score": 0.9 }},
                {{ "landmarks": null }},
                {{ "landmarks": {}, "score": 0.5 }}
            ] }}"#,
            points_json(0.0),
            points_json(100.0)
        )
    }

    fn started(json: &str) -> ReplayTracker {
        let mut tracker = ReplayTracker::new(TrackingRecording::from_json(json).unwrap());
        tracker.start();
        tracker
    }

    // ── parsing ─────────────────────────────────────────────────────

    #[test]
    fn test_parses_dimensions_and_frames() {
        let rec = TrackingRecording::from_json(&three_frame_json()).unwrap();
        assert_eq!((rec.width, rec.height), (320, 240));
        assert_eq!(rec.len(), 3);
        assert!(rec.samples[0].has_face());
        assert!(!rec.samples[1].has_face());
        assert_relative_eq!(rec.samples[1].score, 0.0);
    }

    #[test]
    fn test_score_of_faceless_frame_is_dropped() {
        let json = r#"{ "frames": [ { "landmarks": null, "score": 0.7 } ] }"#;
        let rec = TrackingRecording::from_json(json).unwrap();
        assert_eq!(rec.samples[0], TrackingSample::no_face());
    }

    #[test]
    fn test_detected_frame_keeps_score() {
        let json = format!(r#"{{ "frames": [ {{ "landmarks": {}, "score": 0.25 }} ] }}"#, points_json(0.0));
        let rec = TrackingRecording::from_json(&json).unwrap();
        assert!(rec.samples[0].has_face());
        assert_relative_eq!(rec.samples[0].score, 0.25);
    }

    #[test]
    fn test_default_dimensions() {
        let json = r#"{ "frames": [ { "landmarks": null } ] }"#;
        let rec = TrackingRecording::from_json(json).unwrap();
        assert_eq!((rec.width, rec.height), (DEFAULT_FRAME_WIDTH, DEFAULT_FRAME_HEIGHT));
    }

    #[test]
    fn test_short_landmark_list_is_rejected() {
        let json = r#"{ "frames": [ { "landmarks": null }, { "landmarks": [[1, 2]] } ] }"#;
        let err = TrackingRecording::from_json(json).unwrap_err();
        assert!(matches!(err, RecordingError::Landmarks { frame: 1, .. }));
    }

    #[test]
    fn test_empty_recording_is_rejected() {
        let err = TrackingRecording::from_json(r#"{ "frames": [] }"#).unwrap_err();
        assert!(matches!(err, RecordingError::Empty));
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        let err = TrackingRecording::from_json("{ frames: ").unwrap_err();
        assert!(matches!(err, RecordingError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(three_frame_json().as_bytes()).unwrap();
        let rec = TrackingRecording::load(file.path()).unwrap();
        assert_eq!(rec.len(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = TrackingRecording::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, RecordingError::Io { .. }));
    }

    // ── playback ────────────────────────────────────────────────────

    #[test]
    fn test_stopped_tracker_reports_no_face() {
        let mut tracker =
            ReplayTracker::new(TrackingRecording::from_json(&three_frame_json()).unwrap());
        assert!(tracker.current_landmarks().is_none());
        assert_eq!(tracker.current_frame(), None);
    }

    #[test]
    fn test_plays_frames_in_order() {
        let mut tracker = started(&three_frame_json());

        let first = tracker.current_landmarks().unwrap();
        assert_relative_eq!(first[NOSE_CENTER].x, 41.0);
        assert_relative_eq!(tracker.confidence_score(), 0.9);

        assert!(tracker.current_landmarks().is_none());
        assert_eq!(tracker.current_frame(), Some(1));

        let third = tracker.current_landmarks().unwrap();
        assert_relative_eq!(third[NOSE_CENTER].x, 141.0);
        assert_relative_eq!(tracker.confidence_score(), 0.5);
    }

    #[test]
    fn test_exhausted_without_looping() {
        let mut tracker = started(&three_frame_json());
        for _ in 0..3 {
            tracker.current_landmarks();
        }
        assert!(tracker.is_finished());
        assert!(tracker.current_landmarks().is_none());
        assert_relative_eq!(tracker.confidence_score(), 0.0);
    }

    #[test]
    fn test_looping_wraps_around() {
        let mut tracker = started(&three_frame_json()).with_looping(true);
        for _ in 0..3 {
            tracker.current_landmarks();
        }
        assert!(!tracker.is_finished());
        assert!(tracker.current_landmarks().is_some());
        assert_eq!(tracker.current_frame(), Some(0));
    }

    #[test]
    fn test_reset_rewinds() {
        let mut tracker = started(&three_frame_json());
        tracker.current_landmarks();
        tracker.current_landmarks();
        tracker.reset();
        assert_eq!(tracker.current_frame(), None);
        tracker.current_landmarks();
        assert_eq!(tracker.current_frame(), Some(0));
    }

    #[test]
    fn test_stop_pauses_playback() {
        let mut tracker = started(&three_frame_json());
        tracker.current_landmarks();
        tracker.stop();
        assert!(!tracker.is_running());
        assert!(tracker.current_landmarks().is_none());
        tracker.start();
        tracker.current_landmarks();
        assert_eq!(tracker.current_frame(), Some(1));
    }
}
