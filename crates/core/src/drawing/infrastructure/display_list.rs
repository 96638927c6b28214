use crate::drawing::domain::draw_command::DrawCommand;
use crate::drawing::domain::drawing_surface::DrawingSurface;

/// Surface that keeps the commands of the current frame instead of
/// painting them.
///
/// Backends that own their own paint loop (the desktop canvas) replay the
/// list; the CLI dumps it as JSON.
#[derive(Clone, Debug, Default)]
pub struct DisplayList {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
    clear_count: usize,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// How many times the surface has been cleared since creation.
    pub fn clear_count(&self) -> usize {
        self.clear_count
    }
}

impl DrawingSurface for DisplayList {
    fn setup(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.commands.clear();
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.clear_count += 1;
    }

    fn draw(&mut self, command: &DrawCommand) {
        self.commands.push(command.clone());
    }
}
