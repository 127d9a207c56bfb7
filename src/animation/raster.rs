//! CPU raster surface and headless PNG snapshots.
//!
//! Pixels are composited source-over in premultiplied space and stored
//! straight (unmultiplied) so the buffer can go directly to PNG.

use anyhow::{Context, Result};
use eframe::egui::{Color32, Pos2, Rect, Vec2, pos2, vec2};
use image::{Rgba, RgbaImage};
use log::info;
use std::path::{Path, PathBuf};

use super::descriptor::AnimationKind;
use super::renderer::draw_frame;
use super::surface::{Surface, gradient_t, lerp_color};
use crate::entities::MemoryRecord;

pub struct RasterSurface {
    image: RgbaImage,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn save_png(&self, path: &Path) -> Result<()> {
        self.image
            .save_with_format(path, image::ImageFormat::Png)
            .with_context(|| format!("Failed to write snapshot: {}", path.display()))
    }

    fn blend(&mut self, x: u32, y: u32, src: Color32) {
        let dst = self.image.get_pixel_mut(x, y);
        let [sr, sg, sb, sa] = src.to_array().map(|c| c as f32 / 255.0);
        let da = dst[3] as f32 / 255.0;
        let [dr, dg, db] = [dst[0], dst[1], dst[2]].map(|c| c as f32 / 255.0 * da);

        let inv = 1.0 - sa;
        let out_a = sa + da * inv;
        let premul = [sr + dr * inv, sg + dg * inv, sb + db * inv];
        let straight = |c: f32| {
            if out_a <= 0.0 {
                0
            } else {
                ((c / out_a).clamp(0.0, 1.0) * 255.0).round() as u8
            }
        };
        *dst = Rgba([
            straight(premul[0]),
            straight(premul[1]),
            straight(premul[2]),
            (out_a * 255.0).round() as u8,
        ]);
    }

    /// Pixel centers inside `rect`, clipped to the image.
    fn pixels_in(&self, rect: Rect) -> impl Iterator<Item = (u32, u32)> + use<> {
        let (w, h) = self.image.dimensions();
        let x0 = rect.min.x.floor().max(0.0) as u32;
        let y0 = rect.min.y.floor().max(0.0) as u32;
        let x1 = (rect.max.x.ceil().max(0.0) as u32).min(w);
        let y1 = (rect.max.y.ceil().max(0.0) as u32).min(h);
        (y0..y1).flat_map(move |y| (x0..x1).map(move |x| (x, y)))
    }
}

fn pixel_center(x: u32, y: u32) -> Pos2 {
    pos2(x as f32 + 0.5, y as f32 + 0.5)
}

impl Surface for RasterSurface {
    fn size(&self) -> Vec2 {
        let (w, h) = self.image.dimensions();
        vec2(w as f32, h as f32)
    }

    fn clear(&mut self) {
        for pixel in self.image.pixels_mut() {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }

    fn fill_linear_gradient(&mut self, from: Pos2, to: Pos2, start: Color32, end: Color32) {
        let (w, h) = self.image.dimensions();
        for y in 0..h {
            for x in 0..w {
                let color = lerp_color(start, end, gradient_t(pixel_center(x, y), from, to));
                self.blend(x, y, color);
            }
        }
    }

    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32) {
        if radius <= 0.0 {
            return;
        }
        let bounds = Rect::from_center_size(center, Vec2::splat(radius * 2.0));
        let r_sq = radius * radius;
        for (x, y) in self.pixels_in(bounds) {
            if (pixel_center(x, y) - center).length_sq() <= r_sq {
                self.blend(x, y, color);
            }
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color32) {
        for (x, y) in self.pixels_in(rect) {
            if rect.contains(pixel_center(x, y)) {
                self.blend(x, y, color);
            }
        }
    }
}

/// Snapshot file name for a memory: `03_graduation.png`.
pub fn snapshot_name(memory: &MemoryRecord) -> String {
    format!("{:02}_{}.png", memory.id, memory.animation_kind().tag())
}

/// Render one frame per memory at `wall_seconds` and write PNGs into `dir`.
pub fn export_snapshots(
    memories: &[MemoryRecord],
    dir: &Path,
    width: u32,
    height: u32,
    wall_seconds: f64,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create snapshot directory: {}", dir.display()))?;

    let mut written = Vec::with_capacity(memories.len());
    for memory in memories {
        let descriptor = AnimationKind::from_tag(&memory.animation_type).descriptor();
        let mut surface = RasterSurface::new(width, height);
        let size = surface.size();
        draw_frame(descriptor, &mut surface, size, wall_seconds);

        let path = dir.join(snapshot_name(memory));
        surface.save_png(&path)?;
        info!("Snapshot: {} -> {}", memory.title, path.display());
        written.push(path);
    }
    Ok(written)
}
