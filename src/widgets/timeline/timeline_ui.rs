//! Memory timeline - UI rendering
//!
//! Vertical gradient line down the middle; one row per memory with a month
//! badge on the line and a card alternating right/left of it. Each card
//! shows:
//! - Title and date header (click to expand/collapse)
//! - Animated preview (always visible)
//! - Expanded body: description, location/sentiment chips, action buttons
//!
//! Reads `TimelineState`, never mutates it. Clicks go out through
//! `dispatch` as events; the app applies them after the frame.

use eframe::egui::{
    self, Align2, Color32, CursorIcon, FontId, Mesh, Painter, Pos2, Rect, Sense, Shape, Stroke,
    StrokeKind, Ui, Vec2, pos2, vec2,
};

use super::timeline::{TimelineConfig, TimelineState};
use super::timeline_events::{EditMemoryEvent, EnhanceMemoryEvent, ToggleMemoryEvent};
use super::timeline_helpers::{
    BADGE_RADIUS, EXPAND_SECONDS, PADDING, REVEAL_RISE, badge_reveal, card_reveal, line_color,
    row_layout,
};
use crate::animation::TimelineAnimations;
use crate::core::event_bus::BoxedEvent;
use crate::core::frame_loop::FrameScheduler;
use crate::entities::{MemoryId, MemoryRecord};

const ACCENT: Color32 = Color32::from_rgb(0xA8, 0x55, 0xF7);
const CHIP_HEIGHT: f32 = 24.0;
const BUTTON_HEIGHT: f32 = 32.0;
const DESCRIPTION_GAP: f32 = 12.0;

/// Theme-dependent colors
struct Palette {
    card: Color32,
    title: Color32,
    muted: Color32,
    body: Color32,
    chip: Color32,
    chip_text: Color32,
    preview_bg: Color32,
    shadow: Color32,
}

impl Palette {
    fn new(dark: bool) -> Self {
        if dark {
            Self {
                card: Color32::from_rgb(0x1E, 0x29, 0x3B),
                title: Color32::WHITE,
                muted: Color32::from_rgb(0x94, 0xA3, 0xB8),
                body: Color32::from_rgb(0xCB, 0xD5, 0xE1),
                chip: Color32::from_rgb(0x33, 0x41, 0x55),
                chip_text: Color32::from_rgb(0xE2, 0xE8, 0xF0),
                preview_bg: Color32::from_rgb(0x33, 0x41, 0x55),
                shadow: Color32::from_black_alpha(90),
            }
        } else {
            Self {
                card: Color32::WHITE,
                title: Color32::from_rgb(0x0F, 0x17, 0x2A),
                muted: Color32::from_rgb(0x64, 0x74, 0x8B),
                body: Color32::from_rgb(0x33, 0x41, 0x55),
                chip: Color32::from_rgb(0xF1, 0xF5, 0xF9),
                chip_text: Color32::from_rgb(0x1E, 0x29, 0x3B),
                preview_bg: Color32::from_rgb(0xF1, 0xF5, 0xF9),
                shadow: Color32::from_black_alpha(28),
            }
        }
    }
}

/// Render the memory timeline into `ui`.
///
/// `reveal_elapsed` is seconds since the memories were first shown; pass a
/// large value to skip the entrance reveal.
///
/// Returns the header rect of every card drawn this frame, in list order.
#[allow(clippy::too_many_arguments)]
pub fn render_timeline(
    ui: &mut Ui,
    memories: &[MemoryRecord],
    state: &TimelineState,
    config: &TimelineConfig,
    animations: &mut TimelineAnimations,
    scheduler: &FrameScheduler,
    reveal_elapsed: f64,
    mut dispatch: impl FnMut(BoxedEvent),
) -> Vec<(MemoryId, Rect)> {
    let palette = Palette::new(ui.visuals().dark_mode);
    let avail = ui.available_rect_before_wrap();
    let column_width = avail.width().min(config.column_width);
    let column = Rect::from_center_size(
        pos2(avail.center().x, avail.top()),
        vec2(column_width, 0.0),
    );

    // Line goes under the cards; fill it in once the total height is known
    let line_idx = ui.painter().add(Shape::Noop);
    let line_top = ui.cursor().top();
    let mut headers = Vec::with_capacity(memories.len());

    for (index, memory) in memories.iter().enumerate() {
        let top = ui.cursor().top();
        let expanded = state.is_expanded(memory.id);
        let openness = ui.ctx().animate_bool_with_time(
            ui.id().with(("memory_body", memory.id)),
            expanded,
            EXPAND_SECONDS,
        );

        let card_width = super::timeline_helpers::card_width(config, column_width);
        let text_width = card_width - 2.0 * PADDING;
        let description = ui.painter().layout(
            memory.description.clone(),
            FontId::proportional(14.0),
            palette.body,
            text_width,
        );
        let description_height = description.size().y;
        let body_height = description_height + DESCRIPTION_GAP + CHIP_HEIGHT + PADDING + BUTTON_HEIGHT + PADDING;

        let column = column.translate(vec2(0.0, top - column.top()));
        let row = row_layout(config, column, top, index, body_height, openness);
        ui.allocate_exact_size(vec2(avail.width(), row.height), Sense::hover());

        let (badge_scale, card_alpha) = if config.reveal {
            (badge_reveal(reveal_elapsed, index), card_reveal(reveal_elapsed, index))
        } else {
            (1.0, 1.0)
        };

        // Date badge on the line
        if badge_scale > 0.0 {
            let radius = BADGE_RADIUS * badge_scale;
            let painter = ui.painter();
            painter.circle_filled(row.badge_center + vec2(1.0, 2.0), radius, palette.shadow);
            painter.circle_filled(row.badge_center, radius, palette.card);
            painter.circle_stroke(row.badge_center, radius, Stroke::new(2.0, ACCENT));
            painter.text(
                row.badge_center,
                Align2::CENTER_CENTER,
                memory.month_abbrev(),
                FontId::proportional(11.0 * badge_scale.max(0.01)),
                ACCENT,
            );
        }

        if card_alpha <= 0.0 {
            continue;
        }
        let shift = vec2(0.0, REVEAL_RISE * (1.0 - card_alpha));
        let mut painter = ui.painter().clone();
        painter.multiply_opacity(card_alpha);

        let card = row.card.translate(shift);
        let header = row.header.translate(shift);
        headers.push((memory.id, header));
        let preview = row.preview.translate(shift);
        let body = row.body.translate(shift);

        let header_response = ui
            .interact(header, ui.id().with(("memory_header", memory.id)), Sense::click())
            .on_hover_cursor(CursorIcon::PointingHand);
        if header_response.clicked() {
            dispatch(Box::new(ToggleMemoryEvent(memory.id)));
        }

        // Card background and ring
        let shadow = if header_response.hovered() { palette.shadow } else { palette.shadow.gamma_multiply(0.6) };
        painter.rect_filled(card.translate(vec2(0.0, 4.0)).expand(2.0), 14.0, shadow);
        painter.rect_filled(card, 12.0, palette.card);
        if expanded {
            painter.rect_stroke(card, 12.0, Stroke::new(2.0, ACCENT), StrokeKind::Outside);
        }

        paint_header(&painter, header, memory, expanded, header_response.hovered(), &palette);

        // Preview
        painter.rect_filled(preview, 6.0, palette.preview_bg);
        let slot = animations.slot(memory.id);
        slot.sync(&memory.animation_type, row.preview.size(), scheduler);
        slot.paint(&painter, preview);

        // Expanded body
        if body.height() > 0.5 {
            let mut body_painter = painter.with_clip_rect(body.intersect(painter.clip_rect()));
            body_painter.multiply_opacity(openness);

            let mut y = body.top();
            body_painter.galley(pos2(body.left() + PADDING, y), description, palette.body);
            y += description_height + DESCRIPTION_GAP;

            let mut x = body.left() + PADDING;
            x = paint_chip(&body_painter, pos2(x, y), &memory.location, ChipIcon::Pin, &palette) + 8.0;
            paint_chip(&body_painter, pos2(x, y), &memory.sentiment, ChipIcon::Heart, &palette);
            y += CHIP_HEIGHT + PADDING;

            let enhance = Rect::from_min_size(pos2(body.right() - PADDING - 132.0, y), vec2(132.0, BUTTON_HEIGHT));
            let edit = Rect::from_min_size(pos2(enhance.left() - 8.0 - 112.0, y), vec2(112.0, BUTTON_HEIGHT));

            // Buttons only react once the body is (nearly) open
            let interactive = openness > 0.9;
            if card_button(ui, &body_painter, edit, "Edit Memory", ButtonStyle::Outline, interactive, ("edit", memory.id), &palette) {
                dispatch(Box::new(EditMemoryEvent(memory.id)));
            }
            if card_button(ui, &body_painter, enhance, "Enhance with AI", ButtonStyle::Filled, interactive, ("enhance", memory.id), &palette) {
                dispatch(Box::new(EnhanceMemoryEvent(memory.id)));
            }
        }
    }

    let line_bottom = ui.cursor().top();
    if line_bottom > line_top {
        ui.painter().set(line_idx, gradient_line(column.center().x, line_top, line_bottom, 2.0));
    }
    headers
}

fn paint_header(
    painter: &Painter,
    header: Rect,
    memory: &MemoryRecord,
    expanded: bool,
    hovered: bool,
    palette: &Palette,
) {
    let left = header.left() + PADDING;
    painter.text(
        pos2(left, header.center().y - 10.0),
        Align2::LEFT_CENTER,
        &memory.title,
        FontId::proportional(18.0),
        palette.title,
    );
    painter.text(
        pos2(left, header.center().y + 12.0),
        Align2::LEFT_CENTER,
        &memory.date,
        FontId::proportional(13.0),
        palette.muted,
    );

    // Chevron button
    let button = Rect::from_center_size(pos2(header.right() - PADDING - 16.0, header.center().y), Vec2::splat(32.0));
    if hovered {
        painter.rect_filled(button, 6.0, palette.chip);
    }
    painter.add(Shape::convex_polygon(
        chevron(button.center(), 5.0, expanded).to_vec(),
        palette.muted,
        Stroke::NONE,
    ));
}

/// Small triangle: pointing up when expanded, down when collapsed.
fn chevron(center: Pos2, half: f32, up: bool) -> [Pos2; 3] {
    let dir = if up { -1.0 } else { 1.0 };
    [
        center + vec2(-half, -dir * half * 0.5),
        center + vec2(half, -dir * half * 0.5),
        center + vec2(0.0, dir * half * 0.5),
    ]
}

#[derive(Clone, Copy)]
enum ChipIcon {
    Pin,
    Heart,
}

/// Rounded label with a small icon. Returns the chip's right edge.
fn paint_chip(painter: &Painter, min: Pos2, text: &str, icon: ChipIcon, palette: &Palette) -> f32 {
    let galley = painter.layout_no_wrap(text.to_string(), FontId::proportional(13.0), palette.chip_text);
    let width = 10.0 + 12.0 + 4.0 + galley.size().x + 10.0;
    let rect = Rect::from_min_size(min, vec2(width, CHIP_HEIGHT));
    painter.rect_filled(rect, CHIP_HEIGHT / 2.0, palette.chip);

    let icon_center = pos2(rect.left() + 16.0, rect.center().y);
    match icon {
        ChipIcon::Pin => {
            painter.circle_filled(icon_center - vec2(0.0, 1.5), 3.5, palette.chip_text);
            painter.circle_filled(icon_center - vec2(0.0, 1.5), 1.3, palette.chip);
        }
        ChipIcon::Heart => {
            painter.circle_filled(icon_center + vec2(-1.8, -1.2), 2.2, palette.chip_text);
            painter.circle_filled(icon_center + vec2(1.8, -1.2), 2.2, palette.chip_text);
            painter.add(Shape::convex_polygon(
                vec![icon_center + vec2(-3.9, -0.6), icon_center + vec2(3.9, -0.6), icon_center + vec2(0.0, 3.8)],
                palette.chip_text,
                Stroke::NONE,
            ));
        }
    }

    let text_pos = pos2(rect.left() + 26.0, rect.center().y - galley.size().y / 2.0);
    painter.galley(text_pos, galley, palette.chip_text);
    rect.right()
}

#[derive(Clone, Copy, PartialEq)]
enum ButtonStyle {
    Outline,
    Filled,
}

/// Painter-drawn button so it fades and clips with the card body.
#[allow(clippy::too_many_arguments)]
fn card_button(
    ui: &Ui,
    painter: &Painter,
    rect: Rect,
    label: &str,
    style: ButtonStyle,
    interactive: bool,
    id_salt: (&str, u32),
    palette: &Palette,
) -> bool {
    let visible = rect.intersect(painter.clip_rect());
    let response = (interactive && visible.is_positive())
        .then(|| ui.interact(visible, ui.id().with(id_salt), Sense::click()));
    let hovered = response.as_ref().is_some_and(|r| r.hovered());

    let (fill, text) = match style {
        ButtonStyle::Filled => {
            let fill = if hovered { ACCENT.gamma_multiply(0.85) } else { ACCENT };
            (fill, Color32::WHITE)
        }
        ButtonStyle::Outline => {
            let fill = if hovered { palette.chip } else { Color32::TRANSPARENT };
            (fill, palette.title)
        }
    };
    painter.rect_filled(rect, 6.0, fill);
    if style == ButtonStyle::Outline {
        painter.rect_stroke(rect, 6.0, Stroke::new(1.0, palette.muted.gamma_multiply(0.6)), StrokeKind::Inside);
    }
    painter.text(rect.center(), Align2::CENTER_CENTER, label, FontId::proportional(13.0), text);

    response
        .map(|r| r.on_hover_cursor(CursorIcon::PointingHand).clicked())
        .unwrap_or(false)
}

/// Vertical strip shaded top/middle/bottom.
fn gradient_line(x: f32, top: f32, bottom: f32, width: f32) -> Shape {
    let mut mesh = Mesh::default();
    let half = width / 2.0;
    let stops = [0.0, 0.5, 1.0];
    for t in stops {
        let y = top + (bottom - top) * t;
        let color = line_color(t);
        mesh.colored_vertex(pos2(x - half, y), color);
        mesh.colored_vertex(pos2(x + half, y), color);
    }
    for i in 0..(stops.len() as u32 - 1) {
        let base = i * 2;
        mesh.add_triangle(base, base + 1, base + 3);
        mesh.add_triangle(base, base + 3, base + 2);
    }
    egui::Shape::mesh(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chevron_direction() {
        let down = chevron(Pos2::ZERO, 4.0, false);
        let up = chevron(Pos2::ZERO, 4.0, true);
        assert!(down[2].y > down[0].y);
        assert!(up[2].y < up[0].y);
    }

    #[test]
    fn test_gradient_line_mesh() {
        match gradient_line(10.0, 0.0, 100.0, 2.0) {
            Shape::Mesh(mesh) => {
                assert_eq!(mesh.vertices.len(), 6);
                assert_eq!(mesh.indices.len(), 12);
            }
            _ => panic!("expected mesh"),
        }
    }
}
