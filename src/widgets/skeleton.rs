//! Loading skeleton - placeholder timeline shown while memories load.

use eframe::egui::{Color32, Rect, Sense, Ui, pos2, vec2};

use super::timeline::timeline_helpers::BADGE_RADIUS;

const ROWS: usize = 4;
const ROW_HEIGHT: f32 = 208.0;
const ROW_GAP: f32 = 64.0;

/// Pulse brightness in [0.5, 1.0], one cycle every two seconds.
pub fn pulse(time: f64) -> f32 {
    (0.75 + 0.25 * (time * std::f64::consts::PI).cos()) as f32
}

pub fn render_loading_timeline(ui: &mut Ui, time: f64) {
    let base = if ui.visuals().dark_mode {
        Color32::from_rgb(0x33, 0x41, 0x55)
    } else {
        Color32::from_rgb(0xE2, 0xE8, 0xF0)
    };
    let color = base.gamma_multiply(pulse(time));

    let avail = ui.available_rect_before_wrap();
    let width = avail.width().min(768.0);
    let left = avail.center().x - width / 2.0;
    let (rect, _) = ui.allocate_exact_size(
        vec2(avail.width(), ROWS as f32 * (ROW_HEIGHT + ROW_GAP)),
        Sense::hover(),
    );
    let painter = ui.painter();

    painter.rect_filled(
        Rect::from_center_size(rect.center(), vec2(2.0, rect.height())),
        0.0,
        base,
    );

    for i in 1..=ROWS {
        let top = rect.top() + (i - 1) as f32 * (ROW_HEIGHT + ROW_GAP);
        painter.circle_filled(pos2(rect.center().x, top), BADGE_RADIUS * 0.75, color);

        let block_width = (width * 0.8).min(448.0);
        let block_left = if i % 2 == 0 { left } else { left + width - block_width };
        let x = block_left;
        let y = top + 32.0;
        painter.rect_filled(Rect::from_min_size(pos2(x, y), vec2(block_width * 0.25, 16.0)), 4.0, color);
        painter.rect_filled(Rect::from_min_size(pos2(x, y + 28.0), vec2(block_width, 128.0)), 4.0, color);
        painter.rect_filled(Rect::from_min_size(pos2(x, y + 168.0), vec2(block_width * 0.75, 16.0)), 4.0, color);
    }

    ui.ctx().request_repaint();
}
