//! Pointer-driven smoke: each move lights the smoke at the cursor, which then
//! fades linearly to zero over [`FADE_MS`].

use crate::uniforms::UniformSet;

pub const FADE_MS: f64 = 1000.0;

/// Identifies one fade loop. Only the most recent ticket may write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecayTicket(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecayStep {
    /// Still fading; request another tick.
    Continue,
    /// Reached zero; the loop is over.
    Finished,
    /// A newer pointer move owns the fade; this loop must stop without writing.
    Superseded,
}

#[derive(Debug, Default)]
pub struct PointerSmoke {
    generation: u64,
    started_ms: Option<f64>,
}

impl PointerSmoke {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a move at normalized `(x, y)` (y up) and restart the fade.
    pub fn moved(&mut self, uniforms: &mut UniformSet, x: f32, y: f32, now_ms: f64) -> DecayTicket {
        self.generation += 1;
        self.started_ms = Some(now_ms);
        uniforms.set_mouse_position(x, y);
        uniforms.set_mouse_lightning(1.0);
        DecayTicket(self.generation)
    }

    pub fn is_current(&self, ticket: DecayTicket) -> bool {
        ticket.0 == self.generation && self.started_ms.is_some()
    }

    pub fn tick(&mut self, ticket: DecayTicket, uniforms: &mut UniformSet, now_ms: f64) -> DecayStep {
        if !self.is_current(ticket) {
            return DecayStep::Superseded;
        }
        let Some(started) = self.started_ms else {
            return DecayStep::Superseded;
        };
        let elapsed = (now_ms - started).max(0.0);
        if elapsed < FADE_MS {
            uniforms.set_mouse_lightning((1.0 - elapsed / FADE_MS) as f32);
            DecayStep::Continue
        } else {
            uniforms.set_mouse_lightning(0.0);
            self.started_ms = None;
            DecayStep::Finished
        }
    }
}

/// Map client coordinates into `[0, 1]^2` relative to a rect, flipping y so
/// the bottom edge is zero as in `gl_FragCoord`.
pub fn normalize(client_x: f64, client_y: f64, left: f64, top: f64, width: f64, height: f64) -> Option<(f32, f32)> {
    if width <= 0.0 || height <= 0.0 {
        return None;
    }
    let x = ((client_x - left) / width).clamp(0.0, 1.0);
    let y = 1.0 - ((client_y - top) / height).clamp(0.0, 1.0);
    Some((x as f32, y as f32))
}
