//! Animation descriptors - the recipe behind each memory's preview.
//!
//! A fixed table keyed by `AnimationKind`. Lookup is total: tags that don't
//! name a kind resolve to the default kind (`Paris`).

use eframe::egui::Color32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    Circle,
    Rect,
}

/// One animated shape.
///
/// `x`/`y` are percent of canvas width/height (0..=100), `size` is percent
/// of the smaller canvas dimension. For circles size is the radius, for
/// rects the side length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeSpec {
    pub kind: ShapeKind,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub color: Color32,
}

#[derive(Debug, PartialEq)]
pub struct AnimationDescriptor {
    /// Palette; the first two entries drive the background gradient
    pub colors: &'static [Color32],
    /// Multiplier applied to wall-clock seconds
    pub speed: f32,
    pub shapes: &'static [ShapeSpec],
}

impl AnimationDescriptor {
    pub fn gradient_colors(&self) -> (Color32, Color32) {
        (self.colors[0], self.colors[1])
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AnimationKind {
    #[default]
    Paris,
    Snow,
    Graduation,
    Ocean,
    Fireworks,
}

impl AnimationKind {
    pub const ALL: [AnimationKind; 5] = [
        AnimationKind::Paris,
        AnimationKind::Snow,
        AnimationKind::Graduation,
        AnimationKind::Ocean,
        AnimationKind::Fireworks,
    ];

    /// Resolve a tag. Matching is exact; anything else is the default kind.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "paris" => AnimationKind::Paris,
            "snow" => AnimationKind::Snow,
            "graduation" => AnimationKind::Graduation,
            "ocean" => AnimationKind::Ocean,
            "fireworks" => AnimationKind::Fireworks,
            _ => AnimationKind::default(),
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            AnimationKind::Paris => "paris",
            AnimationKind::Snow => "snow",
            AnimationKind::Graduation => "graduation",
            AnimationKind::Ocean => "ocean",
            AnimationKind::Fireworks => "fireworks",
        }
    }

    pub fn descriptor(&self) -> &'static AnimationDescriptor {
        match self {
            AnimationKind::Paris => &PARIS,
            AnimationKind::Snow => &SNOW,
            AnimationKind::Graduation => &GRADUATION,
            AnimationKind::Ocean => &OCEAN,
            AnimationKind::Fireworks => &FIREWORKS,
        }
    }
}

const fn circle(x: f32, y: f32, size: f32, color: Color32) -> ShapeSpec {
    ShapeSpec { kind: ShapeKind::Circle, x, y, size, color }
}

const fn rect(x: f32, y: f32, size: f32, color: Color32) -> ShapeSpec {
    ShapeSpec { kind: ShapeKind::Rect, x, y, size, color }
}

const ROSE: Color32 = Color32::from_rgb(0xFF, 0x99, 0x99);
const GOLD: Color32 = Color32::from_rgb(0xFF, 0xD7, 0x00);
const SNOW_WHITE: Color32 = Color32::from_rgb(0xFF, 0xFF, 0xFF);
const ICE: Color32 = Color32::from_rgb(0xE0, 0xF7, 0xFA);
const GREEN: Color32 = Color32::from_rgb(0x4C, 0xAF, 0x50);
const AMBER: Color32 = Color32::from_rgb(0xFF, 0xC1, 0x07);
const SKY: Color32 = Color32::from_rgb(0x03, 0xA9, 0xF4);
const CYAN: Color32 = Color32::from_rgb(0x00, 0xBC, 0xD4);
const RED: Color32 = Color32::from_rgb(0xF4, 0x43, 0x36);
const PURPLE: Color32 = Color32::from_rgb(0x9C, 0x27, 0xB0);
const YELLOW: Color32 = Color32::from_rgb(0xFF, 0xEB, 0x3B);

static PARIS: AnimationDescriptor = AnimationDescriptor {
    colors: &[ROSE, GOLD],
    speed: 1.0,
    shapes: &[circle(50.0, 50.0, 20.0, ROSE), rect(70.0, 30.0, 15.0, GOLD)],
};

static SNOW: AnimationDescriptor = AnimationDescriptor {
    colors: &[SNOW_WHITE, ICE],
    speed: 0.5,
    shapes: &[
        circle(30.0, 40.0, 5.0, SNOW_WHITE),
        circle(60.0, 20.0, 7.0, ICE),
        circle(80.0, 60.0, 4.0, SNOW_WHITE),
    ],
};

static GRADUATION: AnimationDescriptor = AnimationDescriptor {
    colors: &[GREEN, AMBER],
    speed: 0.8,
    shapes: &[rect(50.0, 50.0, 25.0, GREEN), circle(50.0, 30.0, 15.0, AMBER)],
};

static OCEAN: AnimationDescriptor = AnimationDescriptor {
    colors: &[SKY, CYAN],
    speed: 0.6,
    shapes: &[rect(0.0, 70.0, 100.0, SKY), circle(70.0, 30.0, 20.0, CYAN)],
};

static FIREWORKS: AnimationDescriptor = AnimationDescriptor {
    colors: &[RED, PURPLE, YELLOW],
    speed: 1.2,
    shapes: &[
        circle(50.0, 50.0, 10.0, RED),
        circle(30.0, 30.0, 8.0, PURPLE),
        circle(70.0, 40.0, 12.0, YELLOW),
    ],
};
