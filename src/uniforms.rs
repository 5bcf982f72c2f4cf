//! Per-instance uniform store.
//!
//! Each writer owns a disjoint set of fields: the render loop advances
//! `time`, the resize handler writes `resolution`, the lightning scheduler
//! flips `lightning_intensity` and the pointer handler owns the two mouse
//! fields. `light_color` is fixed at construction.

use crate::color::Rgb;

/// GLSL names, in upload order.
pub const TIME: &str = "time";
pub const RESOLUTION: &str = "resolution";
pub const LIGHT_COLOR: &str = "lightColor";
pub const LIGHTNING_INTENSITY: &str = "lightningIntensity";
pub const MOUSE_POSITION: &str = "mousePosition";
pub const MOUSE_LIGHTNING: &str = "mouseLightning";

pub const ALL: [&str; 6] = [
    TIME,
    RESOLUTION,
    LIGHT_COLOR,
    LIGHTNING_INTENSITY,
    MOUSE_POSITION,
    MOUSE_LIGHTNING,
];

#[derive(Debug, Clone, PartialEq)]
pub struct UniformSet {
    /// Kept in f64 so long sessions still advance; narrowed only at upload.
    time: f64,
    resolution: [f32; 2],
    light_color: Rgb,
    lightning_intensity: f32,
    mouse_position: [f32; 2],
    mouse_lightning: f32,
}

impl UniformSet {
    pub fn new(light_color: Rgb, resolution: [f32; 2]) -> Self {
        Self {
            time: 0.0,
            resolution,
            light_color,
            lightning_intensity: 0.0,
            mouse_position: [0.5, 0.5],
            mouse_lightning: 0.0,
        }
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn resolution(&self) -> [f32; 2] {
        self.resolution
    }

    pub fn light_color(&self) -> Rgb {
        self.light_color
    }

    pub fn lightning_intensity(&self) -> f32 {
        self.lightning_intensity
    }

    pub fn mouse_position(&self) -> [f32; 2] {
        self.mouse_position
    }

    pub fn mouse_lightning(&self) -> f32 {
        self.mouse_lightning
    }

    /// Advance the shader clock. Negative deltas are dropped so time never runs backwards.
    pub(crate) fn advance(&mut self, delta_secs: f64) {
        if delta_secs.is_finite() && delta_secs > 0.0 {
            self.time += delta_secs;
        }
    }

    pub(crate) fn set_resolution(&mut self, width: f32, height: f32) {
        self.resolution = [width, height];
    }

    pub(crate) fn set_striking(&mut self, striking: bool) {
        self.lightning_intensity = if striking { 1.0 } else { 0.0 };
    }

    pub(crate) fn set_mouse_position(&mut self, x: f32, y: f32) {
        self.mouse_position = [x.clamp(0.0, 1.0), y.clamp(0.0, 1.0)];
    }

    pub(crate) fn set_mouse_lightning(&mut self, value: f32) {
        self.mouse_lightning = value.clamp(0.0, 1.0);
    }
}
