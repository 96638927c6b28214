use serde::{Deserialize, Serialize};

use crate::shared::color::Color;
use crate::shared::point::Point;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

impl Stroke {
    pub fn new(color: Color, width: f64) -> Self {
        Self { color, width }
    }
}

/// One shape issued to a [`DrawingSurface`](super::drawing_surface::DrawingSurface).
///
/// Sizes are diameters, matching how the emoji features are measured.
/// `None` for a fill or stroke means that part is not painted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    Circle {
        center: Point,
        diameter: f64,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    },
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    /// Filled half disc: the arc from `rotation` to `rotation + π` closed by
    /// its chord. With zero rotation the flat edge is horizontal and the
    /// curve hangs below `center`.
    HalfDisc {
        center: Point,
        diameter: f64,
        rotation: f64,
        fill: Color,
    },
    /// Text anchored at its baseline-left `position`.
    Text {
        content: String,
        position: Point,
        size: f64,
        fill: Color,
    },
}

impl DrawCommand {
    pub fn kind(&self) -> &'static str {
        match self {
            DrawCommand::Circle { .. } => "circle",
            DrawCommand::Line { .. } => "line",
            DrawCommand::HalfDisc { .. } => "half_disc",
            DrawCommand::Text { .. } => "text",
        }
    }
}
