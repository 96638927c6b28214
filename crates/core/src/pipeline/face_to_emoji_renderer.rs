use crate::drawing::domain::draw_command::{DrawCommand, Stroke};
use crate::drawing::domain::drawing_surface::DrawingSurface;
use crate::emoji::domain::debug_toggle::DebugToggle;
use crate::emoji::domain::face_metrics::{FaceMetrics, MouthState};
use crate::shared::color::{BLACK, FEATURE_BROWN, SKIN_TONE, WHITE};
use crate::shared::constants::DEFAULT_TEXT_SIZE;
use crate::shared::point::Point;
use crate::tracking::domain::face_tracker::FaceTracker;
use crate::tracking::domain::landmark_set::{
    LandmarkSet, LEFT_EYE_CENTER, MOUTH_LEFT_CORNER, MOUTH_RIGHT_CORNER, MOUTH_TOP, NOSE_CENTER,
    RIGHT_EYE_CENTER,
};

pub const CLOSED_MOUTH_STROKE_WIDTH: f64 = 10.0;
pub const DEBUG_TEXT_POSITION: Point = Point::new(10.0, 40.0);
pub const LANDMARK_MARKER_DIAMETER: f64 = 4.0;
pub const LANDMARK_MARKER_STROKE_WIDTH: f64 = 1.0;

/// Debug overlay caption for a tracker match score in `[0, 1]`.
pub fn face_match_label(score: f64) -> String {
    format!("Face Match: {}%", (score * 100.0).round() as i64)
}

/// Draws an emoji face over the tracked face, once per animation frame.
///
/// Owns both collaborators: the tracker it polls and the surface it draws
/// on. The host drives it with [`draw_frame`](Self::draw_frame) on every
/// tick and [`key_pressed`](Self::key_pressed) on every key event; both run
/// on the same loop, so the debug toggle needs no synchronization.
pub struct FaceToEmojiRenderer<T, S> {
    tracker: T,
    surface: S,
    debug: DebugToggle,
    started: bool,
    last_mouth_state: Option<MouthState>,
}

impl<T: FaceTracker, S: DrawingSurface> FaceToEmojiRenderer<T, S> {
    pub fn new(tracker: T, surface: S) -> Self {
        Self {
            tracker,
            surface,
            debug: DebugToggle::default(),
            started: false,
            last_mouth_state: None,
        }
    }

    /// Sets the surface up at the given size and begins accepting frames.
    pub fn start(&mut self, width: u32, height: u32) {
        self.surface.setup(width, height);
        self.started = true;
        log::info!("Emoji surface started ({width}x{height})");
    }

    /// Blanks the surface. No-op until started.
    pub fn clear(&mut self) {
        if self.started {
            self.surface.clear();
        }
    }

    /// Renders one frame. Returns the measurements used, or `None` when no
    /// face was tracked (the surface is left blank) or before `start`.
    pub fn draw_frame(&mut self) -> Option<FaceMetrics> {
        if !self.started {
            return None;
        }
        self.surface.clear();

        let landmarks = self.tracker.current_landmarks()?;
        let metrics = FaceMetrics::from_landmarks(&landmarks);
        self.note_mouth_state(metrics.mouth_state);

        // Head first so eyes and mouth land on top of it.
        self.draw_head(&landmarks, &metrics);
        self.draw_eyes(&landmarks, &metrics);
        self.draw_mouth(&landmarks, &metrics);

        if self.debug.is_on() {
            let score = self.tracker.confidence_score();
            self.draw_debug(&landmarks, score);
        }
        Some(metrics)
    }

    pub fn key_pressed(&mut self, key: &str) {
        if self.debug.handle_key(key) {
            let state = if self.debug.is_on() { "on" } else { "off" };
            log::info!("Debug overlay {state}");
        }
    }

    pub fn debug_enabled(&self) -> bool {
        self.debug.is_on()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn tracker(&self) -> &T {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut T {
        &mut self.tracker
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    fn draw_head(&mut self, landmarks: &LandmarkSet, metrics: &FaceMetrics) {
        self.surface.draw(&DrawCommand::Circle {
            center: landmarks[NOSE_CENTER],
            diameter: metrics.face_diameter,
            fill: Some(SKIN_TONE),
            stroke: None,
        });
    }

    fn draw_eyes(&mut self, landmarks: &LandmarkSet, metrics: &FaceMetrics) {
        let eyes = [landmarks[LEFT_EYE_CENTER], landmarks[RIGHT_EYE_CENTER]];
        for (diameter, color) in [
            (metrics.eye_diameter, WHITE),
            (metrics.iris_diameter, FEATURE_BROWN),
        ] {
            for center in eyes {
                self.surface.draw(&DrawCommand::Circle {
                    center,
                    diameter,
                    fill: Some(color),
                    stroke: None,
                });
            }
        }
    }

    fn draw_mouth(&mut self, landmarks: &LandmarkSet, metrics: &FaceMetrics) {
        let command = match metrics.mouth_state {
            MouthState::Closed => DrawCommand::Line {
                from: landmarks[MOUTH_LEFT_CORNER],
                to: landmarks[MOUTH_RIGHT_CORNER],
                stroke: Stroke::new(FEATURE_BROWN, CLOSED_MOUTH_STROKE_WIDTH),
            },
            // Rotated so the flat edge follows the line between the corners.
            MouthState::Open => DrawCommand::HalfDisc {
                center: landmarks[MOUTH_TOP],
                diameter: metrics.mouth_size,
                rotation: metrics.mouth_angle,
                fill: FEATURE_BROWN,
            },
        };
        self.surface.draw(&command);
    }

    fn draw_debug(&mut self, landmarks: &LandmarkSet, score: f64) {
        self.surface.draw(&DrawCommand::Text {
            content: face_match_label(score),
            position: DEBUG_TEXT_POSITION,
            size: DEFAULT_TEXT_SIZE,
            fill: WHITE,
        });
        let marker_stroke = Stroke::new(BLACK, LANDMARK_MARKER_STROKE_WIDTH);
        for &center in landmarks.iter() {
            self.surface.draw(&DrawCommand::Circle {
                center,
                diameter: LANDMARK_MARKER_DIAMETER,
                fill: Some(WHITE),
                stroke: Some(marker_stroke),
            });
        }
    }

    fn note_mouth_state(&mut self, state: MouthState) {
        if self.last_mouth_state != Some(state) {
            log::debug!("Mouth {state}");
            self.last_mouth_state = Some(state);
        }
    }
}
