//! Timeline helpers - row geometry, reveal easing, line colors.
//!
//! Pure functions so layout can be tested without an egui context.

use eframe::egui::{Color32, Pos2, Rect, pos2, vec2};

use super::timeline::{CardSide, TimelineConfig};
use crate::animation::surface::lerp_color;

pub const BADGE_RADIUS: f32 = 16.0;
/// Gap between badge center and card top
pub const CARD_TOP_OFFSET: f32 = 32.0;
pub const HEADER_HEIGHT: f32 = 64.0;
pub const PADDING: f32 = 16.0;
/// How far a card rises while fading in
pub const REVEAL_RISE: f32 = 50.0;
pub const EXPAND_SECONDS: f32 = 0.3;

const LINE_TOP: Color32 = Color32::from_rgb(0xFB, 0x71, 0x85);
const LINE_MID: Color32 = Color32::from_rgb(0xA8, 0x55, 0xF7);
const LINE_BOTTOM: Color32 = Color32::from_rgb(0x3B, 0x82, 0xF6);

pub fn ease_out_cubic(x: f32) -> f32 {
    let x = x.clamp(0.0, 1.0);
    1.0 - (1.0 - x).powi(3)
}

/// Eased 0..1 progress of a reveal that starts after `delay` seconds.
pub fn reveal_progress(elapsed: f64, delay: f64, duration: f64) -> f32 {
    if duration <= 0.0 {
        return if elapsed >= delay { 1.0 } else { 0.0 };
    }
    ease_out_cubic(((elapsed - delay) / duration) as f32)
}

/// Badge: scales in over 0.5s, staggered 0.2s per row.
pub fn badge_reveal(elapsed: f64, index: usize) -> f32 {
    reveal_progress(elapsed, index as f64 * 0.2, 0.5)
}

/// Card: fades in and rises over 0.6s, staggered 0.3s per row.
pub fn card_reveal(elapsed: f64, index: usize) -> f32 {
    reveal_progress(elapsed, index as f64 * 0.3, 0.6)
}

/// Center line color at fraction `t` from the top.
pub fn line_color(t: f32) -> Color32 {
    if t < 0.5 {
        lerp_color(LINE_TOP, LINE_MID, t * 2.0)
    } else {
        lerp_color(LINE_MID, LINE_BOTTOM, (t - 0.5) * 2.0)
    }
}

pub fn card_width(config: &TimelineConfig, column_width: f32) -> f32 {
    (column_width * config.card_fraction).min(config.card_max_width)
}

/// Resolved rectangles for one timeline row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RowLayout {
    pub badge_center: Pos2,
    pub card: Rect,
    pub header: Rect,
    pub preview: Rect,
    /// Expanded body, zero height when collapsed
    pub body: Rect,
    /// Total vertical space including the gap below
    pub height: f32,
}

/// Lay out row `index` with its top edge at `top`.
///
/// `body_height` is the fully expanded body height, `openness` 0..1 the
/// current expansion.
pub fn row_layout(
    config: &TimelineConfig,
    column: Rect,
    top: f32,
    index: usize,
    body_height: f32,
    openness: f32,
) -> RowLayout {
    let width = card_width(config, column.width());
    let left = match CardSide::for_index(index) {
        CardSide::Right => column.right() - width,
        CardSide::Left => column.left(),
    };

    let card_top = top + CARD_TOP_OFFSET;
    let header = Rect::from_min_size(pos2(left, card_top), vec2(width, HEADER_HEIGHT));
    let preview = Rect::from_min_size(
        pos2(left + PADDING, header.bottom()),
        vec2(width - 2.0 * PADDING, config.preview_height),
    );
    let body_top = preview.bottom() + PADDING;
    let body = Rect::from_min_size(pos2(left, body_top), vec2(width, body_height * openness.clamp(0.0, 1.0)));
    let card = Rect::from_min_max(header.min, pos2(left + width, body.bottom()));

    RowLayout {
        badge_center: pos2(column.center().x, top),
        card,
        header,
        preview,
        body,
        height: card.bottom() - top + config.row_gap,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column() -> Rect {
        Rect::from_min_size(pos2(100.0, 0.0), vec2(768.0, 2000.0))
    }

    #[test]
    fn test_reveal_progress() {
        assert_eq!(reveal_progress(0.0, 0.5, 1.0), 0.0);
        assert_eq!(reveal_progress(10.0, 0.5, 1.0), 1.0);
        let mid = reveal_progress(1.0, 0.5, 1.0);
        assert!(mid > 0.5 && mid < 1.0);
        assert_eq!(reveal_progress(1.0, 1.0, 0.0), 1.0);
        assert_eq!(reveal_progress(0.9, 1.0, 0.0), 0.0);
    }

    #[test]
    fn test_stagger() {
        // Row 3 card hasn't started at 0.8s, row 0 has finished
        assert_eq!(card_reveal(0.8, 3), 0.0);
        assert_eq!(card_reveal(0.8, 0), 1.0);
        assert_eq!(badge_reveal(0.5, 0), 1.0);
        assert!(badge_reveal(0.5, 1) < 1.0);
    }

    #[test]
    fn test_card_alternates_sides() {
        let config = TimelineConfig::default();
        let even = row_layout(&config, column(), 0.0, 0, 0.0, 0.0);
        let odd = row_layout(&config, column(), 0.0, 1, 0.0, 0.0);

        assert_eq!(even.card.width(), 448.0);
        assert_eq!(even.card.right(), column().right());
        assert_eq!(odd.card.left(), column().left());
        assert_eq!(even.badge_center.x, column().center().x);
    }

    #[test]
    fn test_narrow_column_uses_fraction() {
        let config = TimelineConfig::default();
        let narrow = Rect::from_min_size(pos2(0.0, 0.0), vec2(300.0, 800.0));
        let row = row_layout(&config, narrow, 0.0, 0, 0.0, 0.0);
        assert!((row.card.width() - 270.0).abs() < 1e-4);
    }

    #[test]
    fn test_expansion_grows_row() {
        let config = TimelineConfig::default();
        let closed = row_layout(&config, column(), 10.0, 2, 120.0, 0.0);
        let half = row_layout(&config, column(), 10.0, 2, 120.0, 0.5);
        let open = row_layout(&config, column(), 10.0, 2, 120.0, 1.0);

        assert_eq!(closed.body.height(), 0.0);
        assert_eq!(half.body.height(), 60.0);
        assert_eq!(open.height - closed.height, 120.0);
        assert_eq!(open.preview.height(), config.preview_height);
        assert_eq!(open.header.top(), 10.0 + CARD_TOP_OFFSET);
    }

    #[test]
    fn test_line_color_endpoints() {
        assert_eq!(line_color(0.0), LINE_TOP);
        assert_eq!(line_color(0.5), LINE_MID);
        assert_eq!(line_color(1.0), LINE_BOTTOM);
    }
}
