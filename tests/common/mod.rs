//! Test doubles for driving a backdrop without a browser.
//!
//! - `ManualTimers`: records every armed/cleared timer against a virtual clock
//! - `SpySurface`: records resizes, plane rebuilds, draws and release
//! - `Harness`: steps frames and fires due timers in order

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use storm_backdrop::{
    Backdrop, BackdropConfig, BackdropError, Camera, Surface, TimerHost, UniformSet, Viewport,
};

#[derive(Debug, Default)]
pub struct TimerLog {
    pub now: f64,
    next_id: u32,
    /// `(handle, due_ms)` for every live timer.
    pub pending: Vec<(u32, f64)>,
    pub cleared: Vec<u32>,
    /// Delay of every `set_timeout` in call order.
    pub delays: Vec<f64>,
    /// Largest number of simultaneously live timers seen.
    pub peak: usize,
}

impl TimerLog {
    pub fn earliest(&self) -> Option<(u32, f64)> {
        self.pending
            .iter()
            .copied()
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }
}

#[derive(Clone, Default)]
pub struct ManualTimers {
    pub log: Rc<RefCell<TimerLog>>,
}

impl TimerHost for ManualTimers {
    type Handle = u32;

    fn set_timeout(&mut self, delay_ms: f64) -> Result<u32, BackdropError> {
        let mut log = self.log.borrow_mut();
        log.next_id += 1;
        let id = log.next_id;
        let due = log.now + delay_ms;
        log.pending.push((id, due));
        log.delays.push(delay_ms);
        log.peak = log.peak.max(log.pending.len());
        Ok(id)
    }

    fn clear_timeout(&mut self, handle: u32) {
        let mut log = self.log.borrow_mut();
        log.pending.retain(|(id, _)| *id != handle);
        log.cleared.push(handle);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Draw {
    pub time: f64,
    pub intensity: f32,
    pub mouse_lightning: f32,
    pub aspect: f32,
}

#[derive(Debug, Default)]
pub struct SurfaceLog {
    pub resizes: Vec<(u32, u32)>,
    pub planes: Vec<(f32, f32)>,
    pub draws: Vec<Draw>,
    pub released: bool,
    /// Calls of any kind after release.
    pub calls_after_release: usize,
}

#[derive(Clone, Default)]
pub struct SpySurface {
    pub log: Rc<RefCell<SurfaceLog>>,
}

impl SpySurface {
    fn touch(&self) -> std::cell::RefMut<'_, SurfaceLog> {
        let mut log = self.log.borrow_mut();
        if log.released {
            log.calls_after_release += 1;
        }
        log
    }
}

impl Surface for SpySurface {
    fn resize(&mut self, width: u32, height: u32) {
        self.touch().resizes.push((width, height));
    }

    fn rebuild_plane(&mut self, width: f32, height: f32) -> Result<(), BackdropError> {
        self.touch().planes.push((width, height));
        Ok(())
    }

    fn draw(&mut self, uniforms: &UniformSet, camera: &Camera) {
        self.touch().draws.push(Draw {
            time: uniforms.time(),
            intensity: uniforms.lightning_intensity(),
            mouse_lightning: uniforms.mouse_lightning(),
            aspect: camera.aspect(),
        });
    }

    fn release(&mut self) {
        self.touch().released = true;
    }
}

pub struct Harness {
    pub backdrop: Backdrop<ManualTimers, SpySurface>,
    pub timers: Rc<RefCell<TimerLog>>,
    pub surface: Rc<RefCell<SurfaceLog>>,
    pub now: f64,
}

impl Harness {
    /// Started backdrop at virtual time zero.
    pub fn start(config: BackdropConfig, width: f64, height: f64, seed: u64) -> Self {
        let timers = ManualTimers::default();
        let surface = SpySurface::default();
        let timer_log = timers.log.clone();
        let surface_log = surface.log.clone();
        let mut backdrop =
            Backdrop::new(config, Viewport::new(width, height, 1.0), surface, timers, 0.0, seed);
        backdrop.start().unwrap();
        Self {
            backdrop,
            timers: timer_log,
            surface: surface_log,
            now: 0.0,
        }
    }

    fn set_now(&mut self, now: f64) {
        self.now = now;
        self.timers.borrow_mut().now = now;
    }

    /// Fire every timer due at or before `until`, earliest first.
    pub fn fire_due(&mut self, until: f64) {
        loop {
            let due = self.timers.borrow().earliest();
            match due {
                Some((id, at)) if at <= until => {
                    self.set_now(at);
                    self.timers.borrow_mut().pending.retain(|(h, _)| *h != id);
                    self.backdrop.on_strike_timer().unwrap();
                }
                _ => break,
            }
        }
    }

    /// Step frames every `frame_ms` until `until`, firing timers in between.
    pub fn run_until(&mut self, until: f64, frame_ms: f64) {
        while self.now + frame_ms <= until {
            let next = self.now + frame_ms;
            self.fire_due(next);
            self.set_now(next);
            self.backdrop.frame(next);
        }
    }

    pub fn draws(&self) -> Vec<Draw> {
        self.surface.borrow().draws.clone()
    }
}
