//! Backdrop options and the built-in presets they refine.
//!
//! Hosts pass a loose options object; [`BackdropConfig::resolve`] layers it
//! over the chosen [`Preset`] and validates the result.

use rand::Rng;
use serde::Deserialize;

use crate::color::Rgb;
use crate::error::{BackdropError, Result};

/// Built-in variants. Each keeps its own timing and palette; they are not merged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Light-blue glow with a horizontal lightning bolt.
    #[default]
    Storm,
    /// Drifting smoke lit from the right, radial lightning and pointer smoke.
    Tempest,
    /// Smoke and glow only, on a fixed-size plane.
    Haze,
}

impl Preset {
    pub fn all() -> &'static [Preset] {
        &[Preset::Storm, Preset::Tempest, Preset::Haze]
    }

    pub fn id(&self) -> &'static str {
        match self {
            Preset::Storm => "storm",
            Preset::Tempest => "tempest",
            Preset::Haze => "haze",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id.to_lowercase().as_str() {
            "storm" => Some(Preset::Storm),
            "tempest" => Some(Preset::Tempest),
            "haze" => Some(Preset::Haze),
            _ => None,
        }
    }

    /// Fully populated configuration for this preset.
    pub fn config(&self) -> BackdropConfig {
        match self {
            Preset::Storm => BackdropConfig {
                preset: *self,
                light_color: Rgb::from_hex(0x87cefa),
                strike_interval: MsRange::new_unchecked(4000.0, 12000.0),
                strike_duration: MsRange::new_unchecked(100.0, 300.0),
                enable_lightning: true,
                enable_mouse_smoke: false,
                plane: PlaneSizing::ViewportAspect { height: 4.0 },
                max_pixel_ratio: 2.0,
            },
            Preset::Tempest => BackdropConfig {
                preset: *self,
                light_color: Rgb::from_hex(0x87cefa),
                strike_interval: MsRange::new_unchecked(3000.0, 10000.0),
                strike_duration: MsRange::new_unchecked(50.0, 250.0),
                enable_lightning: true,
                enable_mouse_smoke: true,
                plane: PlaneSizing::ViewportAspect { height: 4.0 },
                max_pixel_ratio: 2.0,
            },
            Preset::Haze => BackdropConfig {
                preset: *self,
                light_color: Rgb::from_hex(0x6680b3),
                strike_interval: MsRange::new_unchecked(3000.0, 11000.0),
                strike_duration: MsRange::new_unchecked(50.0, 250.0),
                enable_lightning: false,
                enable_mouse_smoke: false,
                plane: PlaneSizing::Fixed { width: 4.0, height: 6.0 },
                max_pixel_ratio: 1.0,
            },
        }
    }
}

/// Longest delay `setTimeout` honours; anything above fires immediately.
pub const MAX_DELAY_MS: f64 = i32::MAX as f64;

/// Closed interval of milliseconds, sampled uniformly.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(try_from = "[f64; 2]")]
pub struct MsRange {
    min: f64,
    max: f64,
}

impl MsRange {
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(BackdropError::InvalidConfig(format!(
                "range [{min}, {max}] must be finite"
            )));
        }
        if min < 0.0 {
            return Err(BackdropError::InvalidConfig(format!(
                "range [{min}, {max}] must not be negative"
            )));
        }
        if max > MAX_DELAY_MS {
            return Err(BackdropError::InvalidConfig(format!(
                "range [{min}, {max}] exceeds the {MAX_DELAY_MS}ms timer limit"
            )));
        }
        if min > max {
            return Err(BackdropError::InvalidConfig(format!(
                "range [{min}, {max}] has min above max"
            )));
        }
        Ok(Self { min, max })
    }

    const fn new_unchecked(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn contains(&self, ms: f64) -> bool {
        (self.min..=self.max).contains(&ms)
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        rng.gen_range(self.min..=self.max)
    }
}

impl TryFrom<[f64; 2]> for MsRange {
    type Error = BackdropError;

    fn try_from([min, max]: [f64; 2]) -> Result<Self> {
        MsRange::new(min, max)
    }
}

/// How the background plane is sized in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlaneSizing {
    /// `aspect * height` wide, rebuilt whenever the aspect changes.
    ViewportAspect { height: f32 },
    /// Constant extent regardless of the viewport.
    Fixed { width: f32, height: f32 },
}

impl PlaneSizing {
    /// Plane extent for a viewport aspect ratio.
    pub fn extent(&self, aspect: f32) -> (f32, f32) {
        match *self {
            PlaneSizing::ViewportAspect { height } => (aspect * height, height),
            PlaneSizing::Fixed { width, height } => (width, height),
        }
    }

    pub fn follows_aspect(&self) -> bool {
        matches!(self, PlaneSizing::ViewportAspect { .. })
    }
}

/// Options as supplied by the host page. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BackdropOptions {
    pub preset: Option<Preset>,
    pub light_color: Option<Rgb>,
    pub strike_interval_range: Option<MsRange>,
    pub strike_duration_range: Option<MsRange>,
    pub enable_mouse_smoke: Option<bool>,
    pub enable_lightning: Option<bool>,
    pub max_pixel_ratio: Option<f64>,
}

impl BackdropOptions {
    /// Parse the JSON text of an options object. Blank text means "all defaults".
    pub fn from_json(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed == "null" || trimmed == "undefined" {
            return Ok(Self::default());
        }
        serde_json::from_str(trimmed).map_err(|e| BackdropError::InvalidConfig(e.to_string()))
    }
}

/// Fully resolved settings for one backdrop instance.
#[derive(Debug, Clone, PartialEq)]
pub struct BackdropConfig {
    pub preset: Preset,
    pub light_color: Rgb,
    pub strike_interval: MsRange,
    pub strike_duration: MsRange,
    pub enable_lightning: bool,
    pub enable_mouse_smoke: bool,
    pub plane: PlaneSizing,
    pub max_pixel_ratio: f64,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Preset::default().config()
    }
}

impl BackdropConfig {
    /// Layer `options` over its preset's defaults.
    pub fn resolve(options: &BackdropOptions) -> Result<Self> {
        let mut config = options.preset.unwrap_or_default().config();
        if let Some(color) = options.light_color {
            config.light_color = color;
        }
        if let Some(range) = options.strike_interval_range {
            config.strike_interval = range;
        }
        if let Some(range) = options.strike_duration_range {
            config.strike_duration = range;
        }
        if let Some(enabled) = options.enable_mouse_smoke {
            config.enable_mouse_smoke = enabled;
        }
        if let Some(enabled) = options.enable_lightning {
            config.enable_lightning = enabled;
        }
        if let Some(ratio) = options.max_pixel_ratio {
            config.max_pixel_ratio = ratio;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.max_pixel_ratio.is_finite() && self.max_pixel_ratio > 0.0) {
            return Err(BackdropError::InvalidConfig(format!(
                "maxPixelRatio must be positive, got {}",
                self.max_pixel_ratio
            )));
        }
        if self.enable_lightning && self.strike_interval.max() <= 0.0 {
            // A zero-length idle phase would re-arm in a tight loop.
            return Err(BackdropError::InvalidConfig(
                "strikeIntervalRange must allow a positive delay".into(),
            ));
        }
        Ok(())
    }

    /// Effective device pixel ratio for a reported `devicePixelRatio`.
    pub fn pixel_ratio(&self, device_ratio: f64) -> f64 {
        if device_ratio.is_finite() && device_ratio > 0.0 {
            device_ratio.min(self.max_pixel_ratio)
        } else {
            1.0
        }
    }
}
