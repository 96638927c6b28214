//! CPU rasterizer for the emoji's draw commands.
//!
//! Shapes are scan-converted by testing each pixel center inside the
//! shape's bounding box, then composited source-over. No anti-aliasing.

use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use thiserror::Error;

use crate::drawing::domain::draw_command::{DrawCommand, Stroke};
use crate::drawing::domain::drawing_surface::DrawingSurface;
use crate::shared::color::Color;
use crate::shared::point::Point;

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

#[derive(Error, Debug)]
pub enum RasterError {
    #[error("surface has not been set up")]
    NotSetUp,
    #[error("failed to write frame to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Axis-aligned pixel-space bounds: `[min_x, min_y, max_x, max_y]`.
type Bounds = [f64; 4];

pub struct RasterSurface {
    image: RgbaImage,
}

impl RasterSurface {
    pub fn new() -> Self {
        Self {
            image: RgbaImage::new(0, 0),
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Writes the current frame; format follows the file extension.
    pub fn save(&self, path: &Path) -> Result<(), RasterError> {
        if self.image.width() == 0 || self.image.height() == 0 {
            return Err(RasterError::NotSetUp);
        }
        self.image.save(path).map_err(|source| RasterError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    fn fill_where(&mut self, bounds: Bounds, color: Color, inside: impl Fn(f64, f64) -> bool) {
        let (w, h) = self.image.dimensions();
        let x0 = bounds[0].floor().max(0.0) as u32;
        let y0 = bounds[1].floor().max(0.0) as u32;
        let x1 = (bounds[2].ceil().max(0.0) as u32).min(w);
        let y1 = (bounds[3].ceil().max(0.0) as u32).min(h);

        for y in y0..y1 {
            for x in x0..x1 {
                if inside(x as f64 + 0.5, y as f64 + 0.5) {
                    blend(self.image.get_pixel_mut(x, y), color);
                }
            }
        }
    }

    fn circle(&mut self, center: Point, diameter: f64, fill: Option<Color>, stroke: Option<Stroke>) {
        let r = diameter / 2.0;
        if let Some(color) = fill {
            self.fill_where(square_around(center, r), color, |x, y| {
                dist_sq(x, y, center) <= r * r
            });
        }
        if let Some(s) = stroke {
            let half = s.width / 2.0;
            self.fill_where(square_around(center, r + half), s.color, |x, y| {
                (dist_sq(x, y, center).sqrt() - r).abs() <= half
            });
        }
    }

    fn line(&mut self, from: Point, to: Point, stroke: Stroke) {
        let half = stroke.width / 2.0;
        let bounds = [
            from.x.min(to.x) - half,
            from.y.min(to.y) - half,
            from.x.max(to.x) + half,
            from.y.max(to.y) + half,
        ];
        self.fill_where(bounds, stroke.color, |x, y| {
            segment_distance(Point::new(x, y), from, to) <= half
        });
    }

    fn half_disc(&mut self, center: Point, diameter: f64, rotation: f64, fill: Color) {
        let r = diameter / 2.0;
        let (sin, cos) = rotation.sin_cos();
        self.fill_where(square_around(center, r), fill, |x, y| {
            let dx = x - center.x;
            let dy = y - center.y;
            // Component along the rotated +y axis; the disc keeps that side.
            let local_y = -dx * sin + dy * cos;
            dx * dx + dy * dy <= r * r && local_y >= 0.0
        });
    }
}

impl Default for RasterSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawingSurface for RasterSurface {
    fn setup(&mut self, width: u32, height: u32) {
        self.image = RgbaImage::from_pixel(width, height, TRANSPARENT);
    }

    fn clear(&mut self) {
        for pixel in self.image.pixels_mut() {
            *pixel = TRANSPARENT;
        }
    }

    fn draw(&mut self, command: &DrawCommand) {
        match command {
            DrawCommand::Circle {
                center,
                diameter,
                fill,
                stroke,
            } => self.circle(*center, *diameter, *fill, *stroke),
            DrawCommand::Line { from, to, stroke } => self.line(*from, *to, *stroke),
            DrawCommand::HalfDisc {
                center,
                diameter,
                rotation,
                fill,
            } => self.half_disc(*center, *diameter, *rotation, *fill),
            DrawCommand::Text { content, .. } => {
                log::debug!("Raster surface skips text: {content}");
            }
        }
    }
}

fn square_around(center: Point, r: f64) -> Bounds {
    [center.x - r, center.y - r, center.x + r, center.y + r]
}

fn dist_sq(x: f64, y: f64, p: Point) -> f64 {
    (x - p.x).powi(2) + (y - p.y).powi(2)
}

fn segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let abx = b.x - a.x;
    let aby = b.y - a.y;
    let len_sq = abx * abx + aby * aby;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((p.x - a.x) * abx + (p.y - a.y) * aby) / len_sq).clamp(0.0, 1.0)
    };
    dist_sq(p.x, p.y, Point::new(a.x + t * abx, a.y + t * aby)).sqrt()
}

/// Source-over compositing of `src` onto `dst`.
fn blend(dst: &mut Rgba<u8>, src: Color) {
    if src.a == 0xff {
        *dst = Rgba(src.to_array());
        return;
    }
    let sa = src.a as f64 / 255.0;
    let da = dst.0[3] as f64 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        *dst = TRANSPARENT;
        return;
    }
    let s = [src.r, src.g, src.b];
    for (i, sc) in s.iter().enumerate() {
        let c = (*sc as f64 * sa + dst.0[i] as f64 * da * (1.0 - sa)) / out_a;
        dst.0[i] = c.round() as u8;
    }
    dst.0[3] = (out_a * 255.0).round() as u8;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::color::{BLACK, FEATURE_BROWN, SKIN_TONE, WHITE};
    use rstest::rstest;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn surface() -> RasterSurface {
        let mut s = RasterSurface::new();
        s.setup(100, 100);
        s
    }

    fn px(s: &RasterSurface, x: u32, y: u32) -> [u8; 4] {
        s.image().get_pixel(x, y).0
    }

    #[test]
    fn test_setup_is_transparent() {
        let s = surface();
        assert_eq!(s.image().dimensions(), (100, 100));
        assert_eq!(px(&s, 0, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn test_filled_circle() {
        let mut s = surface();
        s.draw(&DrawCommand::Circle {
            center: Point::new(50.0, 50.0),
            diameter: 20.0,
            fill: Some(SKIN_TONE),
            stroke: None,
        });
        assert_eq!(px(&s, 50, 50), SKIN_TONE.to_array());
        assert_eq!(px(&s, 5, 5), [0, 0, 0, 0]);
    }

    #[test]
    fn test_stroked_circle_outline_over_fill() {
        let mut s = surface();
        s.draw(&DrawCommand::Circle {
            center: Point::new(50.0, 50.0),
            diameter: 20.0,
            fill: Some(WHITE),
            stroke: Some(Stroke::new(BLACK, 2.0)),
        });
        assert_eq!(px(&s, 50, 50), WHITE.to_array());
        assert_eq!(px(&s, 59, 50), BLACK.to_array());
    }

    #[test]
    fn test_thick_line() {
        let mut s = surface();
        s.draw(&DrawCommand::Line {
            from: Point::new(10.0, 50.0),
            to: Point::new(90.0, 50.0),
            stroke: Stroke::new(FEATURE_BROWN, 10.0),
        });
        assert_eq!(px(&s, 50, 46), FEATURE_BROWN.to_array());
        assert_eq!(px(&s, 50, 53), FEATURE_BROWN.to_array());
        assert_eq!(px(&s, 50, 60), [0, 0, 0, 0]);
    }

    #[test]
    fn test_half_disc_hangs_below_center() {
        let mut s = surface();
        s.draw(&DrawCommand::HalfDisc {
            center: Point::new(50.0, 50.0),
            diameter: 40.0,
            rotation: 0.0,
            fill: FEATURE_BROWN,
        });
        assert_eq!(px(&s, 50, 60), FEATURE_BROWN.to_array());
        assert_eq!(px(&s, 50, 40), [0, 0, 0, 0]);
    }

    #[test]
    fn test_half_disc_rotated_half_turn_flips() {
        let mut s = surface();
        s.draw(&DrawCommand::HalfDisc {
            center: Point::new(50.0, 50.0),
            diameter: 40.0,
            rotation: PI,
            fill: FEATURE_BROWN,
        });
        assert_eq!(px(&s, 50, 40), FEATURE_BROWN.to_array());
        assert_eq!(px(&s, 50, 60), [0, 0, 0, 0]);
    }

    // Positive rotation turns clockwise on the y-down surface.
    #[rstest]
    #[case::quarter_turn(FRAC_PI_2, (40, 50), (60, 50))]
    #[case::negative_quarter_turn(-FRAC_PI_2, (60, 50), (40, 50))]
    fn test_half_disc_rotation_direction(
        #[case] rotation: f64,
        #[case] filled: (u32, u32),
        #[case] empty: (u32, u32),
    ) {
        let mut s = surface();
        s.draw(&DrawCommand::HalfDisc {
            center: Point::new(50.0, 50.0),
            diameter: 40.0,
            rotation,
            fill: FEATURE_BROWN,
        });
        assert_eq!(px(&s, filled.0, filled.1), FEATURE_BROWN.to_array());
        assert_eq!(px(&s, empty.0, empty.1), [0, 0, 0, 0]);
    }

    #[test]
    fn test_shapes_outside_surface_are_clipped() {
        let mut s = surface();
        s.draw(&DrawCommand::Circle {
            center: Point::new(-30.0, 150.0),
            diameter: 40.0,
            fill: Some(WHITE),
            stroke: None,
        });
        assert!(s.image().pixels().all(|p| p.0 == [0, 0, 0, 0]));
    }

    #[test]
    fn test_clear_resets_pixels() {
        let mut s = surface();
        s.draw(&DrawCommand::Circle {
            center: Point::new(50.0, 50.0),
            diameter: 20.0,
            fill: Some(WHITE),
            stroke: None,
        });
        s.clear();
        assert_eq!(px(&s, 50, 50), [0, 0, 0, 0]);
    }

    #[test]
    fn test_translucent_blend_over_opaque() {
        let mut dst = Rgba([0, 0, 0, 255]);
        blend(&mut dst, Color::rgba(255, 255, 255, 128));
        assert_eq!(dst.0[3], 255);
        assert_eq!(dst.0[0], 128);
    }

    #[test]
    fn test_save_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        let mut s = surface();
        s.draw(&DrawCommand::Circle {
            center: Point::new(50.0, 50.0),
            diameter: 20.0,
            fill: Some(SKIN_TONE),
            stroke: None,
        });
        s.save(&path).unwrap();

        let loaded = image::open(&path).unwrap().into_rgba8();
        assert_eq!(loaded.dimensions(), (100, 100));
        assert_eq!(loaded.get_pixel(50, 50).0, SKIN_TONE.to_array());
    }

    #[test]
    fn test_save_before_setup_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = RasterSurface::new().save(&dir.path().join("x.png"));
        assert!(matches!(result, Err(RasterError::NotSetUp)));
    }
}
