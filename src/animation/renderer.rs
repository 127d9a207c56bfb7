//! Procedural animation renderer.
//!
//! # Frame recipe
//!
//! 1. clear the surface
//! 2. `t = wall_seconds * speed`
//! 3. diagonal gradient between the first two palette colors at 20% alpha
//! 4. per shape `i`: base position plus a 10px jitter,
//!    `sin(t + i)` on x and `cos(t + 0.7 i)` on y
//! 5. size pulses by `0.8 + 0.2 sin(2t + i)`
//! 6. filled circle (size = radius) or square (size = side) centered on the
//!    animated position
//!
//! Time is kept in f64 until after the trig: wall-clock seconds are ~1.7e9
//! and f32 would quantize them to whole minutes.
//!
//! Surface size is read once when the renderer starts.

use eframe::egui::{Color32, Pos2, Rect, Vec2, pos2, vec2};
use log::debug;
use std::sync::{Arc, Mutex};

use super::descriptor::{AnimationDescriptor, AnimationKind, ShapeKind, ShapeSpec};
use super::surface::Surface;
use crate::core::frame_loop::{FrameHandle, FrameScheduler, wall_clock_seconds};

/// Background alpha (0x33 = 20%)
pub const BACKGROUND_ALPHA: u8 = 0x33;

/// Peak positional jitter in pixels
pub const JITTER_PX: f32 = 10.0;

/// Shape with its per-frame position and size resolved.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimatedShape {
    pub kind: ShapeKind,
    pub center: Pos2,
    pub size: f32,
    pub color: Color32,
}

impl AnimatedShape {
    /// Square occupied by a rect shape (side = size, centered)
    pub fn square(&self) -> Rect {
        Rect::from_center_size(self.center, Vec2::splat(self.size))
    }
}

/// Animation time for a descriptor.
pub fn animation_time(wall_seconds: f64, speed: f32) -> f64 {
    wall_seconds * speed as f64
}

/// Size multiplier, always within [0.6, 1.0].
pub fn pulse_factor(t: f64, index: usize) -> f32 {
    (0.8 + 0.2 * (t * 2.0 + index as f64).sin()) as f32
}

/// Jitter offset for shape `index` at time `t`.
pub fn jitter(t: f64, index: usize) -> Vec2 {
    let i = index as f64;
    vec2(
        ((t + i).sin() as f32) * JITTER_PX,
        ((t + i * 0.7).cos() as f32) * JITTER_PX,
    )
}

/// Resolve one shape at time `t` on a `size` surface. Pure.
pub fn animate_shape(shape: &ShapeSpec, index: usize, t: f64, size: Vec2) -> AnimatedShape {
    let base = pos2(shape.x / 100.0 * size.x, shape.y / 100.0 * size.y);
    let extent = shape.size / 100.0 * size.x.min(size.y);
    AnimatedShape {
        kind: shape.kind,
        center: base + jitter(t, index),
        size: extent * pulse_factor(t, index),
        color: shape.color,
    }
}

/// Paint one frame of `descriptor` onto `surface`.
pub fn draw_frame<S: Surface + ?Sized>(
    descriptor: &AnimationDescriptor,
    surface: &mut S,
    size: Vec2,
    wall_seconds: f64,
) {
    surface.clear();

    let t = animation_time(wall_seconds, descriptor.speed);

    let (start, end) = descriptor.gradient_colors();
    surface.fill_linear_gradient(
        Pos2::ZERO,
        pos2(size.x, size.y),
        with_alpha(start, BACKGROUND_ALPHA),
        with_alpha(end, BACKGROUND_ALPHA),
    );

    for (index, shape) in descriptor.shapes.iter().enumerate() {
        let animated = animate_shape(shape, index, t, size);
        match animated.kind {
            ShapeKind::Circle => surface.fill_circle(animated.center, animated.size, animated.color),
            ShapeKind::Rect => surface.fill_rect(animated.square(), animated.color),
        }
    }
}

fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

/// Running animation bound to one surface.
///
/// Owns its frame loop: dropping or stopping the renderer cancels it.
pub struct AnimationRenderer<S> {
    kind: AnimationKind,
    surface: Arc<Mutex<S>>,
    size: Vec2,
    handle: FrameHandle,
}

impl<S> std::fmt::Debug for AnimationRenderer<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationRenderer")
            .field("kind", &self.kind)
            .field("size", &self.size)
            .field("handle", &self.handle)
            .finish()
    }
}

impl<S: Surface + Send + 'static> AnimationRenderer<S> {
    /// Resolve `tag`, paint the first frame and register the frame loop.
    ///
    /// Returns `None` (and draws nothing) for a zero-area surface.
    pub fn start(tag: &str, surface: Arc<Mutex<S>>, scheduler: &FrameScheduler) -> Option<Self> {
        let size = surface.lock().unwrap_or_else(|e| e.into_inner()).size();
        if !(size.x > 0.0 && size.y > 0.0) {
            debug!("AnimationRenderer: surface {:?} has no area, not starting", size);
            return None;
        }

        let kind = AnimationKind::from_tag(tag);
        let descriptor = kind.descriptor();

        {
            let mut target = surface.lock().unwrap_or_else(|e| e.into_inner());
            draw_frame(descriptor, &mut *target, size, wall_clock_seconds());
        }

        let target = Arc::clone(&surface);
        let handle = scheduler.start_loop(move |time| {
            let mut target = target.lock().unwrap_or_else(|e| e.into_inner());
            draw_frame(descriptor, &mut *target, size, time.now);
        });
        debug!("AnimationRenderer: started '{}' as {:?} at {}x{}", tag, kind, size.x, size.y);

        Some(Self {
            kind,
            surface,
            size,
            handle,
        })
    }
}

impl<S> AnimationRenderer<S> {
    pub fn kind(&self) -> AnimationKind {
        self.kind
    }

    /// Size captured at start
    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn surface(&self) -> &Arc<Mutex<S>> {
        &self.surface
    }

    /// Frames drawn by the loop (the initial frame is not counted)
    pub fn frames_drawn(&self) -> u64 {
        self.handle.runs()
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_active()
    }

    /// Cancel the frame loop and hand back the surface.
    pub fn stop(mut self) -> Arc<Mutex<S>> {
        self.handle.cancel();
        debug!("AnimationRenderer: stopped {:?} after {} frames", self.kind, self.handle.runs());
        Arc::clone(&self.surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::surface::{Canvas, DrawCmd};

    const SIZE: Vec2 = vec2(400.0, 160.0);

    #[test]
    fn test_pulse_factor_bounds() {
        let mut t = -50.0;
        while t < 50.0 {
            for index in 0..5 {
                let p = pulse_factor(t, index);
                assert!((0.6..=1.0).contains(&p), "pulse {} out of range at t={}", p, t);
            }
            t += 0.037;
        }
        // Large wall-clock style values too
        for index in 0..3 {
            let p = pulse_factor(1_700_000_000.123, index);
            assert!((0.6..=1.0).contains(&p));
        }
    }

    #[test]
    fn test_animate_shape_at_zero() {
        let shape = AnimationKind::Paris.descriptor().shapes[0];
        let animated = animate_shape(&shape, 0, 0.0, SIZE);

        // sin(0)=0, cos(0)=1 -> jitter (0, 10)
        assert!((animated.center.x - 200.0).abs() < 1e-4);
        assert!((animated.center.y - 90.0).abs() < 1e-4);
        // 20% of 160 * 0.8
        assert!((animated.size - 25.6).abs() < 1e-4);
        assert_eq!(animated.kind, ShapeKind::Circle);
    }

    #[test]
    fn test_animate_shape_is_deterministic() {
        let shapes = AnimationKind::Fireworks.descriptor().shapes;
        for (index, shape) in shapes.iter().enumerate() {
            let a = animate_shape(shape, index, 12.345, SIZE);
            let b = animate_shape(shape, index, 12.345, SIZE);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_phase_offset_per_index() {
        let shape = AnimationKind::Snow.descriptor().shapes[0];
        let t = 1.0;
        let first = animate_shape(&shape, 0, t, SIZE);
        let second = animate_shape(&shape, 1, t, SIZE);
        let expected_dx = ((t + 1.0).sin() - t.sin()) as f32 * JITTER_PX;
        assert!(((second.center.x - first.center.x) - expected_dx).abs() < 1e-4);
    }

    #[test]
    fn test_animation_time_uses_speed() {
        assert_eq!(animation_time(10.0, 0.5), 5.0);
        assert_eq!(animation_time(10.0, 1.2), 10.0 * 1.2f32 as f64);
    }

    #[test]
    fn test_draw_frame_layout() {
        let descriptor = AnimationKind::Graduation.descriptor();
        let mut canvas = Canvas::new(SIZE);
        draw_frame(descriptor, &mut canvas, SIZE, 3.0);

        let cmds = canvas.commands();
        assert_eq!(cmds.len(), 1 + descriptor.shapes.len());
        match &cmds[0] {
            DrawCmd::Gradient { from, to, start, end } => {
                assert_eq!(*from, Pos2::ZERO);
                assert_eq!(*to, pos2(SIZE.x, SIZE.y));
                assert_eq!(start.a(), BACKGROUND_ALPHA);
                assert_eq!(end.a(), BACKGROUND_ALPHA);
            }
            other => panic!("expected gradient first, got {:?}", other),
        }
        assert!(matches!(cmds[1], DrawCmd::Rect { .. }));
        assert!(matches!(cmds[2], DrawCmd::Circle { .. }));

        // Redraw replaces rather than accumulates
        draw_frame(descriptor, &mut canvas, SIZE, 4.0);
        assert_eq!(canvas.commands().len(), 3);
    }

    #[test]
    fn test_rect_is_centered_square() {
        let shape = AnimationKind::Graduation.descriptor().shapes[0];
        let animated = animate_shape(&shape, 0, 0.0, SIZE);
        let square = animated.square();
        assert!((square.width() - square.height()).abs() < 1e-4);
        assert!((square.center() - animated.center).length() < 1e-3);
    }

    #[test]
    fn test_renderer_draws_per_tick() {
        let scheduler = FrameScheduler::new();
        let canvas = Arc::new(Mutex::new(Canvas::new(SIZE)));
        let renderer = AnimationRenderer::start("ocean", Arc::clone(&canvas), &scheduler).unwrap();

        assert_eq!(renderer.kind(), AnimationKind::Ocean);
        // Initial frame is painted synchronously
        assert_eq!(canvas.lock().unwrap().commands().len(), 3);

        scheduler.tick(100.0);
        scheduler.tick(100.016);
        assert_eq!(renderer.frames_drawn(), 2);
        assert!(renderer.is_running());
    }

    #[test]
    fn test_renderer_unknown_tag_uses_default() {
        let scheduler = FrameScheduler::new();
        let canvas = Arc::new(Mutex::new(Canvas::new(SIZE)));
        let renderer = AnimationRenderer::start("volcano", canvas, &scheduler).unwrap();
        assert_eq!(renderer.kind(), AnimationKind::Paris);
    }

    #[test]
    fn test_zero_area_surface_does_not_start() {
        let scheduler = FrameScheduler::new();
        for size in [Vec2::ZERO, vec2(100.0, 0.0), vec2(0.0, 100.0)] {
            let canvas = Arc::new(Mutex::new(Canvas::new(size)));
            assert!(AnimationRenderer::start("snow", Arc::clone(&canvas), &scheduler).is_none());
            assert!(canvas.lock().unwrap().is_empty());
        }
        assert_eq!(scheduler.active_loops(), 0);
    }

    #[test]
    fn test_teardown_stops_frames() {
        let scheduler = FrameScheduler::new();
        let canvas = Arc::new(Mutex::new(Canvas::new(SIZE)));
        let renderer = AnimationRenderer::start("paris", Arc::clone(&canvas), &scheduler).unwrap();
        scheduler.tick(1.0);

        let snapshot = canvas.lock().unwrap().commands().to_vec();
        drop(renderer);
        assert_eq!(scheduler.active_loops(), 0);

        assert_eq!(scheduler.tick(2.0), 0);
        assert_eq!(canvas.lock().unwrap().commands(), snapshot.as_slice());
    }

    #[test]
    fn test_stop_returns_surface() {
        let scheduler = FrameScheduler::new();
        let canvas = Arc::new(Mutex::new(Canvas::new(SIZE)));
        let renderer = AnimationRenderer::start("snow", Arc::clone(&canvas), &scheduler).unwrap();
        let surface = renderer.stop();
        assert!(Arc::ptr_eq(&surface, &canvas));
        assert_eq!(scheduler.tick(5.0), 0);
    }
}
