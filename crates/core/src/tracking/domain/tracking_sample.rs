use crate::tracking::domain::landmark_set::LandmarkSet;

/// One frame of tracker output.
///
/// `score` is how well the detected face matches the tracker's face model,
/// in `[0, 1]`. It is only meaningful when `landmarks` is present.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackingSample {
    pub landmarks: Option<LandmarkSet>,
    pub score: f64,
}

impl TrackingSample {
    pub fn detected(landmarks: LandmarkSet, score: f64) -> Self {
        Self {
            landmarks: Some(landmarks),
            score,
        }
    }

    pub fn no_face() -> Self {
        Self {
            landmarks: None,
            score: 0.0,
        }
    }

    pub fn has_face(&self) -> bool {
        self.landmarks.is_some()
    }
}
