//! Numbers behind the hero cube: scene layout, canvas sizing and the
//! per-frame pose. The browser side lives in `three.rs`.

pub const BACKGROUND_COLOR: u32 = 0x0b0d12;

pub const CAMERA_FOV: f64 = 60.0;
pub const CAMERA_NEAR: f64 = 0.1;
pub const CAMERA_FAR: f64 = 100.0;
pub const CAMERA_POSITION: [f64; 3] = [2.4, 1.8, 3.2];

pub const CUBE_SIZE: f64 = 1.2;
pub const CUBE_COLOR: u32 = 0x7c5cff;
pub const CUBE_METALNESS: f64 = 0.3;
pub const CUBE_ROUGHNESS: f64 = 0.35;

pub const LIGHT_COLOR: u32 = 0xffffff;
pub const AMBIENT_INTENSITY: f64 = 0.6;
pub const DIRECTIONAL_INTENSITY: f64 = 0.9;
pub const DIRECTIONAL_POSITION: [f64; 3] = [2.0, 2.0, 3.0];

pub const MIN_CANVAS_WIDTH: f64 = 300.0;
pub const MIN_CANVAS_HEIGHT: f64 = 260.0;
pub const MAX_PIXEL_RATIO: f64 = 2.0;

const ROTATION_RATE_X: f64 = 0.5;
const ROTATION_RATE_Y: f64 = 0.8;
const BOB_RATE: f64 = 1.4;
const BOB_AMPLITUDE: f64 = 0.08;
const PARALLAX_RATE: f64 = 0.6;
const PARALLAX_AMPLITUDE_PX: f64 = 6.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    /// Size used for the drawing buffer, given the canvas' layout box.
    pub fn from_layout(width: f64, height: f64) -> Self {
        Self {
            width: width.max(MIN_CANVAS_WIDTH),
            height: height.max(MIN_CANVAS_HEIGHT),
        }
    }

    pub fn aspect(self) -> f64 {
        self.width / self.height
    }
}

pub fn pixel_ratio(device_pixel_ratio: f64) -> f64 {
    device_pixel_ratio.min(MAX_PIXEL_RATIO)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubePose {
    pub rotation_x: f64,
    pub rotation_y: f64,
    pub position_y: f64,
}

impl CubePose {
    pub fn at(elapsed_secs: f64) -> Self {
        Self {
            rotation_x: elapsed_secs * ROTATION_RATE_X,
            rotation_y: elapsed_secs * ROTATION_RATE_Y,
            position_y: (elapsed_secs * BOB_RATE).sin() * BOB_AMPLITUDE,
        }
    }
}

pub fn profile_offset_px(elapsed_secs: f64) -> f64 {
    (elapsed_secs * PARALLAX_RATE).sin() * PARALLAX_AMPLITUDE_PX
}

pub fn profile_transform(elapsed_secs: f64) -> String {
    format!("translateY({}px)", profile_offset_px(elapsed_secs))
}

/// Elapsed time measured from the first timestamp it is given.
#[derive(Clone, Copy, Debug, Default)]
pub struct ElapsedClock {
    start_ms: Option<f64>,
}

impl ElapsedClock {
    pub fn elapsed_secs(&mut self, now_ms: f64) -> f64 {
        let start = *self.start_ms.get_or_insert(now_ms);
        ((now_ms - start) / 1_000.0).max(0.0)
    }
}
