//! GLSL ES 3.00 sources for each preset.
//!
//! Fragment programs are assembled from a shared prelude, the simplex noise
//! chunk, optionally the smoke field, and a preset body.

mod common;
mod haze;
mod storm;
mod tempest;
mod vertex;

pub use vertex::{MODEL_VIEW_MATRIX, POSITION_ATTRIBUTE, PROJECTION_MATRIX, VERTEX_SHADER};

use crate::config::Preset;

/// Complete fragment shader source for `preset`.
pub fn fragment_source(preset: Preset) -> String {
    let parts: &[&str] = match preset {
        Preset::Storm => &[common::FRAGMENT_PRELUDE, common::SIMPLEX_NOISE, storm::STORM_BODY],
        Preset::Tempest => &[
            common::FRAGMENT_PRELUDE,
            common::SIMPLEX_NOISE,
            common::SMOKE_FIELD,
            tempest::TEMPEST_BODY,
        ],
        Preset::Haze => &[
            common::FRAGMENT_PRELUDE,
            common::SIMPLEX_NOISE,
            common::SMOKE_FIELD,
            haze::HAZE_BODY,
        ],
    };
    parts.concat()
}
