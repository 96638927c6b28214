/// Surface size used when a recording does not state its own.
pub const DEFAULT_FRAME_WIDTH: u32 = 640;
pub const DEFAULT_FRAME_HEIGHT: u32 = 480;

/// Default text size set once when the surface is created.
pub const DEFAULT_TEXT_SIZE: f64 = 32.0;
