use std::f32::consts::PI;

use iced::widget::canvas::{self, path, Frame, Geometry, Path, Stroke};
use iced::{alignment, mouse, Color, Pixels, Point, Radians, Rectangle, Renderer, Theme};

use emojify_core::drawing::domain::draw_command::{self, DrawCommand};
use emojify_core::shared::color;
use emojify_core::shared::point;

/// Replays one frame's display list onto an iced canvas.
pub struct EmojiCanvas<'a> {
    commands: &'a [DrawCommand],
}

impl<'a> EmojiCanvas<'a> {
    pub fn new(commands: &'a [DrawCommand]) -> Self {
        Self { commands }
    }
}

impl<Message> canvas::Program<Message> for EmojiCanvas<'_> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        for command in self.commands {
            paint(&mut frame, command);
        }
        vec![frame.into_geometry()]
    }
}

fn paint(frame: &mut Frame, command: &DrawCommand) {
    match command {
        DrawCommand::Circle {
            center,
            diameter,
            fill,
            stroke,
        } => {
            let circle = Path::circle(to_point(*center), *diameter as f32 / 2.0);
            if let Some(c) = fill {
                frame.fill(&circle, to_color(*c));
            }
            if let Some(s) = stroke {
                frame.stroke(&circle, to_stroke(*s));
            }
        }
        DrawCommand::Line { from, to, stroke } => {
            let line = Path::line(to_point(*from), to_point(*to));
            frame.stroke(&line, to_stroke(*stroke).with_line_cap(canvas::LineCap::Round));
        }
        DrawCommand::HalfDisc {
            center,
            diameter,
            rotation,
            fill,
        } => {
            let start = *rotation as f32;
            let half_disc = Path::new(|b| {
                b.arc(path::Arc {
                    center: to_point(*center),
                    radius: *diameter as f32 / 2.0,
                    start_angle: Radians(start),
                    end_angle: Radians(start + PI),
                });
                b.close();
            });
            frame.fill(&half_disc, to_color(*fill));
        }
        DrawCommand::Text {
            content,
            position,
            size,
            fill,
        } => {
            frame.fill_text(to_text(content, *position, *size, *fill));
        }
    }
}

fn to_point(p: point::Point) -> Point {
    Point::new(p.x as f32, p.y as f32)
}

fn to_color(c: color::Color) -> Color {
    Color::from_rgba8(c.r, c.g, c.b, c.a as f32 / 255.0)
}

/// Text commands are anchored at the baseline, not the top of the line box.
fn to_text(content: &str, position: point::Point, size: f64, fill: color::Color) -> canvas::Text {
    canvas::Text {
        content: content.to_string(),
        position: to_point(position),
        color: to_color(fill),
        size: Pixels(size as f32),
        align_y: alignment::Vertical::Bottom,
        ..canvas::Text::default()
    }
}

fn to_stroke(s: draw_command::Stroke) -> Stroke<'static> {
    Stroke::default()
        .with_color(to_color(s.color))
        .with_width(s.width as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use emojify_core::shared::color::WHITE;

    #[test]
    fn test_text_anchored_at_baseline() {
        let text = to_text("Face Match: 50%", point::Point::new(10.0, 40.0), 32.0, WHITE);
        assert_eq!(text.position, Point::new(10.0, 40.0));
        assert_eq!(text.align_y, alignment::Vertical::Bottom);
        assert_eq!(text.size, Pixels(32.0));
    }

    #[test]
    fn test_color_alpha_is_normalized() {
        let c = to_color(color::Color::rgba(255, 0, 0, 0));
        assert_eq!(c, Color::from_rgba8(255, 0, 0, 0.0));
        assert_eq!(to_color(WHITE), Color::WHITE);
    }
}
