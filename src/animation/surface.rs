//! Drawable surfaces for the animation renderer.
//!
//! `Surface` is the minimal 2D contract the renderer needs: clear, a
//! full-surface linear gradient, filled circles and filled rects.
//! Coordinates are surface-local pixels with the origin at the top-left.
//!
//! `Canvas` records draw commands into a display list. The renderer writes
//! into it from the frame loop; the card widget replays the current list
//! into an egui painter.

use eframe::egui::{self, Color32, Mesh, Painter, Pos2, Rect, Shape, Vec2};

pub trait Surface {
    /// Pixel size of the surface
    fn size(&self) -> Vec2;

    /// Erase everything drawn so far.
    fn clear(&mut self);

    /// Fill the whole surface with a linear gradient running from `from`
    /// (color `start`) to `to` (color `end`).
    fn fill_linear_gradient(&mut self, from: Pos2, to: Pos2, start: Color32, end: Color32);

    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32);

    fn fill_rect(&mut self, rect: Rect, color: Color32);
}

/// Interpolate premultiplied colors.
pub fn lerp_color(a: Color32, b: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let [ar, ag, ab, aa] = a.to_array();
    let [br, bg, bb, ba] = b.to_array();
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    Color32::from_rgba_premultiplied(mix(ar, br), mix(ag, bg), mix(ab, bb), mix(aa, ba))
}

/// Position of `p` along the gradient axis, 0 at `from` and 1 at `to`.
pub fn gradient_t(p: Pos2, from: Pos2, to: Pos2) -> f32 {
    let axis = to - from;
    let len_sq = axis.length_sq();
    if len_sq <= f32::EPSILON {
        return 0.0;
    }
    ((p - from).dot(axis) / len_sq).clamp(0.0, 1.0)
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCmd {
    Gradient { from: Pos2, to: Pos2, start: Color32, end: Color32 },
    Circle { center: Pos2, radius: f32, color: Color32 },
    Rect { rect: Rect, color: Color32 },
}

/// Display-list surface.
#[derive(Clone, Debug, Default)]
pub struct Canvas {
    size: Vec2,
    commands: Vec<DrawCmd>,
}

impl Canvas {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCmd] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Replay the display list with the canvas origin at `rect.min`.
    ///
    /// Output is clipped to `rect`; the canvas is not rescaled if `rect`
    /// differs from the size it was created with.
    pub fn paint(&self, painter: &Painter, rect: Rect) {
        let painter = painter.with_clip_rect(rect.intersect(painter.clip_rect()));
        let origin = rect.min.to_vec2();
        let area = Rect::from_min_size(rect.min, self.size);

        for cmd in &self.commands {
            match *cmd {
                DrawCmd::Gradient { from, to, start, end } => {
                    painter.add(gradient_mesh(area, from + origin, to + origin, start, end));
                }
                DrawCmd::Circle { center, radius, color } => {
                    painter.circle_filled(center + origin, radius, color);
                }
                DrawCmd::Rect { rect: r, color } => {
                    painter.rect_filled(r.translate(origin), 0.0, color);
                }
            }
        }
    }
}

impl Surface for Canvas {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self) {
        self.commands.clear();
    }

    fn fill_linear_gradient(&mut self, from: Pos2, to: Pos2, start: Color32, end: Color32) {
        self.commands.push(DrawCmd::Gradient { from, to, start, end });
    }

    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32) {
        self.commands.push(DrawCmd::Circle { center, radius, color });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color32) {
        self.commands.push(DrawCmd::Rect { rect, color });
    }
}

/// Four-vertex mesh covering `area`. A linear gradient is affine in
/// position, so per-vertex colors interpolate it exactly.
fn gradient_mesh(area: Rect, from: Pos2, to: Pos2, start: Color32, end: Color32) -> Shape {
    let mut mesh = Mesh::default();
    for corner in [area.left_top(), area.right_top(), area.right_bottom(), area.left_bottom()] {
        let color = lerp_color(start, end, gradient_t(corner, from, to));
        mesh.colored_vertex(corner, color);
    }
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);
    egui::Shape::mesh(mesh)
}
