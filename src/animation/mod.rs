//! Memory animations - descriptors, renderer, surfaces
//!
//! The renderer is independent of egui's frame pass: it draws into a
//! `Surface` from the frame scheduler, and widgets replay the result.

pub mod descriptor;
pub mod overlay;
pub mod raster;
pub mod renderer;
pub mod slot;
pub mod surface;

pub use descriptor::{AnimationDescriptor, AnimationKind, ShapeKind, ShapeSpec};
pub use overlay::Overlay;
pub use raster::{RasterSurface, export_snapshots};
pub use renderer::{AnimatedShape, AnimationRenderer, animate_shape, draw_frame, pulse_factor};
pub use slot::{MemoryAnimation, TimelineAnimations};
pub use surface::{Canvas, DrawCmd, Surface};
