//! Per-frame measurements that size and shape the emoji.
//!
//! Everything scales off the face diameter (twice the nose-to-chin
//! distance), so the emoji follows the face as it moves toward or away
//! from the camera.

use crate::emoji::domain::geometry::{angle, distance, midpoint};
use crate::shared::point::Point;
use crate::tracking::domain::landmark_set::{
    LandmarkSet, CHIN, LOWER_LIP_TOP, MOUTH_LEFT_CORNER, MOUTH_RIGHT_CORNER, NOSE_CENTER,
    UPPER_LIP_BOTTOM,
};

/// Lip gap, relative to mouth width, above which the mouth counts as open.
pub const MOUTH_OPEN_THRESHOLD: f64 = 0.2;

/// Eye (sclera) diameter as a fraction of the face diameter.
pub const EYE_SCALE: f64 = 0.3;
/// Iris diameter as a fraction of the eye diameter.
pub const IRIS_SCALE: f64 = 0.5;
/// Open-mouth diameter as a fraction of the face diameter.
pub const MOUTH_SCALE: f64 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouthState {
    Open,
    Closed,
}

impl MouthState {
    /// Open only when strictly above the threshold. A NaN ratio (zero-width
    /// mouth with closed lips) compares false and stays closed.
    pub fn classify(normalized_lip_gap: f64) -> Self {
        if normalized_lip_gap > MOUTH_OPEN_THRESHOLD {
            MouthState::Open
        } else {
            MouthState::Closed
        }
    }

    pub fn is_open(self) -> bool {
        self == MouthState::Open
    }
}

impl std::fmt::Display for MouthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MouthState::Open => write!(f, "open"),
            MouthState::Closed => write!(f, "closed"),
        }
    }
}

/// Lip gap divided by mouth width.
pub fn normalized_lip_gap(
    mouth_left: Point,
    mouth_right: Point,
    upper_lip_bottom: Point,
    lower_lip_top: Point,
) -> f64 {
    distance(upper_lip_bottom, lower_lip_top) / distance(mouth_left, mouth_right)
}

/// Open/closed decision from the two mouth corners and the inner lip edges.
pub fn mouth_state_from_points(
    mouth_left: Point,
    mouth_right: Point,
    upper_lip_bottom: Point,
    lower_lip_top: Point,
) -> MouthState {
    MouthState::classify(normalized_lip_gap(
        mouth_left,
        mouth_right,
        upper_lip_bottom,
        lower_lip_top,
    ))
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceMetrics {
    pub face_diameter: f64,
    pub eye_diameter: f64,
    pub iris_diameter: f64,
    pub mouth_width: f64,
    /// Angle of the left-to-right mouth corner line, radians.
    pub mouth_angle: f64,
    /// Midpoint of the mouth corners. Not used for drawing.
    pub mouth_center: Point,
    /// Diameter of the open-mouth half disc.
    pub mouth_size: f64,
    pub normalized_lip_gap: f64,
    pub mouth_state: MouthState,
}

impl FaceMetrics {
    pub fn from_landmarks(landmarks: &LandmarkSet) -> Self {
        let face_diameter = 2.0 * distance(landmarks[NOSE_CENTER], landmarks[CHIN]);
        let eye_diameter = face_diameter * EYE_SCALE;

        let mouth_left = landmarks[MOUTH_LEFT_CORNER];
        let mouth_right = landmarks[MOUTH_RIGHT_CORNER];
        let lip_gap = normalized_lip_gap(
            mouth_left,
            mouth_right,
            landmarks[UPPER_LIP_BOTTOM],
            landmarks[LOWER_LIP_TOP],
        );

        Self {
            face_diameter,
            eye_diameter,
            iris_diameter: eye_diameter * IRIS_SCALE,
            mouth_width: distance(mouth_left, mouth_right),
            mouth_angle: angle(mouth_left, mouth_right),
            mouth_center: midpoint(mouth_left, mouth_right),
            mouth_size: face_diameter * MOUTH_SCALE,
            normalized_lip_gap: lip_gap,
            mouth_state: MouthState::classify(lip_gap),
        }
    }
}
