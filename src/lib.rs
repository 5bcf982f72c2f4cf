#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

//! Animated smoke and lightning backdrop rendered with WebGL2.
//!
//! The platform-neutral core ([`Backdrop`] and friends) builds and tests on
//! any target; the browser bindings live in the wasm32-only `wasm` module.

pub mod backdrop;
pub mod clock;
pub mod color;
pub mod config;
pub mod error;
pub mod host;
pub mod lightning;
pub mod noise;
pub mod pointer;
pub mod shade;
pub mod shaders;
pub mod uniforms;
pub mod viewport;

pub use backdrop::{Backdrop, FrameOutcome, Lifecycle};
pub use color::Rgb;
pub use config::{BackdropConfig, BackdropOptions, MsRange, PlaneSizing, Preset};
pub use error::{BackdropError, Result};
pub use host::{Surface, TimerHost};
pub use lightning::StrikePhase;
pub use pointer::{DecayStep, DecayTicket};
pub use uniforms::UniformSet;
pub use viewport::{Camera, Viewport};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;

    mod mount;
    mod render;

    pub use mount::{presets, start, start_by_id, BackdropHandle};

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();

        // A logger installed earlier by the page wins.
        console_log::init_with_level(log::Level::Info).ok();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::{presets, start, start_by_id, BackdropHandle};
