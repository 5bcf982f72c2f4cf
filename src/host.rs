//! Seams between the platform-neutral backdrop and whatever drives it.
//!
//! The browser build implements these over `setTimeout` and WebGL2; tests
//! implement them with manual timers and a recording surface.

use crate::error::Result;
use crate::uniforms::UniformSet;
use crate::viewport::Camera;

/// One-shot cancellable timers.
///
/// A backdrop owns exactly one timer callback; the host is expected to route
/// every expiry back into [`crate::Backdrop::on_strike_timer`].
pub trait TimerHost {
    type Handle: Copy + Eq + std::fmt::Debug;

    fn set_timeout(&mut self, delay_ms: f64) -> Result<Self::Handle>;

    fn clear_timeout(&mut self, handle: Self::Handle);
}

/// A drawable region bound to a compiled shader program.
pub trait Surface {
    /// Resize the drawing buffer to `width x height` device pixels.
    fn resize(&mut self, width: u32, height: u32);

    /// Replace the plane geometry. Implementations release the previous buffers first.
    fn rebuild_plane(&mut self, width: f32, height: f32) -> Result<()>;

    /// Upload uniforms and issue one draw call.
    fn draw(&mut self, uniforms: &UniformSet, camera: &Camera);

    /// Release every GPU object and detach from the page.
    fn release(&mut self);
}
