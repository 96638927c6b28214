use crate::drawing::domain::draw_command::DrawCommand;

/// Domain interface for the 2D surface the emoji is drawn on.
///
/// Implementations paint commands in call order, so later commands end up
/// on top.
pub trait DrawingSurface {
    /// Create or resize the backing surface. Called once before drawing.
    fn setup(&mut self, width: u32, height: u32);

    /// Blank the whole surface to transparent.
    fn clear(&mut self);

    fn draw(&mut self, command: &DrawCommand);
}
