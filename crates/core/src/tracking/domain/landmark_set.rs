//! Landmark layout of the 71-point clmtrackr face model.
//!
//! Index meaning is fixed by the tracker's point ordering. Only the points
//! the emoji mapping reads are named here; the rest are carried through for
//! the debug overlay.

use std::ops::Index;

use thiserror::Error;

use crate::shared::point::Point;

pub const LANDMARK_COUNT: usize = 71;

/// Bottom of the jaw line.
pub const CHIN: usize = 7;
/// Center of the left eye (viewer's left).
pub const LEFT_EYE_CENTER: usize = 27;
/// Center of the right eye (viewer's right).
pub const RIGHT_EYE_CENTER: usize = 32;
/// Nose tip; the face-center reference the head is drawn around.
pub const NOSE_CENTER: usize = 41;
/// Left corner of the mouth.
pub const MOUTH_LEFT_CORNER: usize = 44;
/// Top of the upper lip, midline.
pub const MOUTH_TOP: usize = 47;
/// Right corner of the mouth.
pub const MOUTH_RIGHT_CORNER: usize = 50;
/// Inner edge of the lower lip, midline.
pub const LOWER_LIP_TOP: usize = 57;
/// Inner edge of the upper lip, midline.
pub const UPPER_LIP_BOTTOM: usize = 60;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LandmarkError {
    #[error("expected {expected} landmarks, got {actual}")]
    WrongCount { expected: usize, actual: usize },
}

/// A complete set of tracked landmarks for one frame.
///
/// The tracker reports either every point or none, so a partial set cannot
/// be constructed.
#[derive(Clone, Debug, PartialEq)]
pub struct LandmarkSet {
    points: [Point; LANDMARK_COUNT],
}

impl LandmarkSet {
    pub fn new(points: [Point; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        LANDMARK_COUNT
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Index<usize> for LandmarkSet {
    type Output = Point;

    fn index(&self, index: usize) -> &Point {
        &self.points[index]
    }
}

impl TryFrom<Vec<Point>> for LandmarkSet {
    type Error = LandmarkError;

    fn try_from(points: Vec<Point>) -> Result<Self, Self::Error> {
        let actual = points.len();
        let points: [Point; LANDMARK_COUNT] =
            points.try_into().map_err(|_| LandmarkError::WrongCount {
                expected: LANDMARK_COUNT,
                actual,
            })?;
        Ok(Self { points })
    }
}
