//! One mounted backdrop: uniforms, render clock, lightning scheduler, pointer
//! smoke and viewport, owned by the caller.
//!
//! The type is platform neutral. The browser layer feeds it animation frames,
//! timer expiries, pointer moves and resizes; tests feed it the same calls by
//! hand.

use crate::clock::FrameClock;
use crate::config::BackdropConfig;
use crate::error::Result;
use crate::host::{Surface, TimerHost};
use crate::lightning::{LightningScheduler, StrikePhase};
use crate::pointer::{DecayStep, DecayTicket, PointerSmoke};
use crate::uniforms::UniformSet;
use crate::viewport::{Camera, Viewport};

/// Lifecycle of an instance. There is no way back from `Stopped`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    Created,
    Running,
    Stopped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    Drawn,
    /// Time advanced but the viewport has no area.
    Skipped,
    Stopped,
}

pub struct Backdrop<T: TimerHost, S: Surface> {
    config: BackdropConfig,
    uniforms: UniformSet,
    clock: FrameClock,
    lightning: LightningScheduler<T::Handle>,
    pointer: PointerSmoke,
    viewport: Viewport,
    camera: Camera,
    timers: T,
    surface: S,
    lifecycle: Lifecycle,
}

impl<T: TimerHost, S: Surface> Backdrop<T, S> {
    /// Bootstrap state for a surface already created at `viewport` size.
    ///
    /// Nothing is scheduled until [`Backdrop::start`].
    pub fn new(config: BackdropConfig, viewport: Viewport, surface: S, timers: T, now_ms: f64, seed: u64) -> Self {
        let (width, height) = viewport.buffer_size();
        let uniforms = UniformSet::new(config.light_color, [width as f32, height as f32]);
        let camera = Camera::new(viewport.aspect().unwrap_or(1.0));
        let lightning = LightningScheduler::new(config.strike_interval, config.strike_duration, seed);
        Self {
            config,
            uniforms,
            clock: FrameClock::new(now_ms),
            lightning,
            pointer: PointerSmoke::new(),
            viewport,
            camera,
            timers,
            surface,
            lifecycle: Lifecycle::Created,
        }
    }

    /// Size the surface, build the plane and arm the first strike.
    pub fn start(&mut self) -> Result<()> {
        if self.lifecycle != Lifecycle::Created {
            return Ok(());
        }
        let (width, height) = self.viewport.buffer_size();
        self.surface.resize(width, height);
        let (plane_w, plane_h) = self.config.plane.extent(self.camera.aspect());
        self.surface.rebuild_plane(plane_w, plane_h)?;
        if self.config.enable_lightning {
            self.lightning.arm(&mut self.timers)?;
        }
        self.lifecycle = Lifecycle::Running;
        log::debug!(
            "backdrop started: preset={} size={}x{}",
            self.config.preset.id(),
            width,
            height
        );
        Ok(())
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_running(&self) -> bool {
        self.lifecycle == Lifecycle::Running
    }

    pub fn config(&self) -> &BackdropConfig {
        &self.config
    }

    pub fn uniforms(&self) -> &UniformSet {
        &self.uniforms
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn strike_phase(&self) -> StrikePhase {
        self.lightning.phase()
    }

    pub fn timers(&self) -> &T {
        &self.timers
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// One animation frame: advance `time` and draw.
    pub fn frame(&mut self, now_ms: f64) -> FrameOutcome {
        if !self.is_running() {
            return FrameOutcome::Stopped;
        }
        let delta = self.clock.delta(now_ms);
        self.uniforms.advance(delta);
        if self.viewport.is_degenerate() {
            return FrameOutcome::Skipped;
        }
        self.surface.draw(&self.uniforms, &self.camera);
        FrameOutcome::Drawn
    }

    /// The strike timer elapsed.
    pub fn on_strike_timer(&mut self) -> Result<()> {
        if !self.is_running() {
            return Ok(());
        }
        let phase = self.lightning.fire(&mut self.timers, &mut self.uniforms)?;
        log::trace!("lightning {:?}", phase);
        Ok(())
    }

    /// Pointer moved to normalized `(x, y)`. Returns the ticket of the new
    /// fade loop, or `None` when pointer smoke is off or the instance stopped.
    pub fn pointer_moved(&mut self, x: f32, y: f32, now_ms: f64) -> Option<DecayTicket> {
        if !self.is_running() || !self.config.enable_mouse_smoke {
            return None;
        }
        Some(self.pointer.moved(&mut self.uniforms, x, y, now_ms))
    }

    /// One tick of a fade loop.
    pub fn decay_tick(&mut self, ticket: DecayTicket, now_ms: f64) -> DecayStep {
        if !self.is_running() {
            return DecayStep::Superseded;
        }
        self.pointer.tick(ticket, &mut self.uniforms, now_ms)
    }

    /// Container changed size. Zero-area sizes only update the drawing
    /// buffer and `resolution`; camera and plane keep their last good shape.
    pub fn resize(&mut self, viewport: Viewport) -> Result<()> {
        if self.lifecycle == Lifecycle::Stopped {
            return Ok(());
        }
        self.viewport = viewport;
        let (width, height) = viewport.buffer_size();
        self.surface.resize(width, height);
        self.uniforms.set_resolution(width as f32, height as f32);

        let Some(aspect) = viewport.aspect() else {
            log::debug!("backdrop resized to zero area; drawing paused");
            return Ok(());
        };
        self.camera.set_aspect(aspect);
        if self.config.plane.follows_aspect() {
            let (plane_w, plane_h) = self.config.plane.extent(aspect);
            self.surface.rebuild_plane(plane_w, plane_h)?;
        }
        Ok(())
    }

    /// Clear timers and release the surface. Safe to call more than once.
    pub fn stop(&mut self) {
        if self.lifecycle == Lifecycle::Stopped {
            return;
        }
        self.lightning.cancel(&mut self.timers);
        self.surface.release();
        self.lifecycle = Lifecycle::Stopped;
        log::debug!("backdrop stopped at t={:.2}s", self.uniforms.time());
    }
}
