use crate::tracking::domain::landmark_set::LandmarkSet;

/// Domain interface for the face tracker the emoji follows.
///
/// Polled once per animation frame. `&mut self` because polling may advance
/// the tracker's notion of the current frame.
pub trait FaceTracker {
    /// Landmarks for the current frame, or `None` when no face is detected.
    fn current_landmarks(&mut self) -> Option<LandmarkSet>;

    /// Match score of the current frame in `[0, 1]`.
    fn confidence_score(&self) -> f64;
}

/// Start/stop control of a tracker, driven by the application coordinator.
pub trait TrackerLifecycle {
    fn start(&mut self);
    fn stop(&mut self);
    /// Forget any tracked state so the next start begins fresh.
    fn reset(&mut self);
}
