//! Static decorations painted above an animation preview.

use eframe::egui::{Color32, Painter, Pos2, Rect, Shape, Stroke, StrokeKind, Vec2, pos2, vec2};

use super::descriptor::AnimationKind;

/// Decoration for a kind. Only affects the UI, never the frame loop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Overlay {
    None,
    /// Tower outline centered in the preview
    Tower,
    /// Tilted cap in the bottom-right corner
    Cap { degrees: f32 },
    /// Blue fade rising from the bottom edge
    Tide { height: f32 },
    /// Dark veil over the whole preview
    Veil,
}

impl AnimationKind {
    pub fn overlay(&self) -> Overlay {
        match self {
            AnimationKind::Paris => Overlay::Tower,
            AnimationKind::Snow => Overlay::None,
            AnimationKind::Graduation => Overlay::Cap { degrees: 12.0 },
            AnimationKind::Ocean => Overlay::Tide { height: 48.0 },
            AnimationKind::Fireworks => Overlay::Veil,
        }
    }
}

/// Corners of `rect` rotated about its center, clockwise from top-left.
pub fn rotated_corners(rect: Rect, degrees: f32) -> [Pos2; 4] {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let c = rect.center();
    [rect.left_top(), rect.right_top(), rect.right_bottom(), rect.left_bottom()].map(|p| {
        let d = p - c;
        c + vec2(d.x * cos - d.y * sin, d.x * sin + d.y * cos)
    })
}

pub fn paint_overlay(painter: &Painter, rect: Rect, overlay: Overlay) {
    let painter = painter.with_clip_rect(rect.intersect(painter.clip_rect()));
    match overlay {
        Overlay::None => {}
        Overlay::Tower => {
            let tower = Rect::from_center_size(rect.center(), vec2(64.0, 128.0));
            let fill = Color32::from_rgb(0xE5, 0xE7, 0xEB).gamma_multiply(0.7);
            let edge = Color32::from_rgb(0x9C, 0xA3, 0xAF).gamma_multiply(0.7);
            painter.rect_filled(tower, 0.0, fill);
            // Open at the bottom: top, left, right edges only
            let stroke = Stroke::new(2.0, edge);
            painter.line_segment([tower.left_top(), tower.right_top()], stroke);
            painter.line_segment([tower.left_top(), tower.left_bottom()], stroke);
            painter.line_segment([tower.right_top(), tower.right_bottom()], stroke);
        }
        Overlay::Cap { degrees } => {
            let size = vec2(48.0, 32.0);
            let cap = Rect::from_min_size(rect.right_bottom() - size - Vec2::splat(16.0), size);
            painter.add(Shape::convex_polygon(
                rotated_corners(cap, degrees).to_vec(),
                Color32::BLACK.gamma_multiply(0.5),
                Stroke::NONE,
            ));
        }
        Overlay::Tide { height } => {
            let band = Rect::from_min_max(pos2(rect.left(), rect.bottom() - height), rect.right_bottom());
            let steps = 12;
            let slice = band.height() / steps as f32;
            for i in 0..steps {
                let strength = (i as f32 + 1.0) / steps as f32;
                let r = Rect::from_min_size(
                    pos2(band.left(), band.top() + slice * i as f32),
                    vec2(band.width(), slice + 0.5),
                );
                painter.rect_filled(r, 0.0, Color32::from_rgb(0x3B, 0x82, 0xF6).gamma_multiply(0.3 * strength));
            }
        }
        Overlay::Veil => {
            painter.rect_filled(rect, 0.0, Color32::BLACK.gamma_multiply(0.3));
        }
    }
}

/// Outline for an empty preview slot (no surface yet).
pub fn paint_placeholder(painter: &Painter, rect: Rect, color: Color32) {
    painter.rect_stroke(rect, 6.0, Stroke::new(1.0, color), StrokeKind::Inside);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_per_kind() {
        assert_eq!(AnimationKind::Paris.overlay(), Overlay::Tower);
        assert_eq!(AnimationKind::Snow.overlay(), Overlay::None);
        assert_eq!(AnimationKind::Graduation.overlay(), Overlay::Cap { degrees: 12.0 });
        assert_eq!(AnimationKind::Fireworks.overlay(), Overlay::Veil);
    }

    #[test]
    fn test_rotation_keeps_center_and_extent() {
        let rect = Rect::from_center_size(pos2(10.0, 10.0), vec2(4.0, 2.0));
        let corners = rotated_corners(rect, 90.0);
        // 90 degrees swaps width and height
        let xs: Vec<f32> = corners.iter().map(|p| p.x).collect();
        let width = xs.iter().cloned().fold(f32::MIN, f32::max) - xs.iter().cloned().fold(f32::MAX, f32::min);
        assert!((width - 2.0).abs() < 1e-4);

        let zero = rotated_corners(rect, 0.0);
        assert!((zero[0] - rect.left_top()).length() < 1e-5);
    }
}
