//! Lightning strike scheduling.
//!
//! ```text
//!   Idle --(interval elapsed)--> Striking   intensity = 1.0
//!   Striking --(duration elapsed)--> Idle   intensity = 0.0, re-arm
//! ```
//!
//! Only one timer is ever in flight; arming always clears the previous one.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::config::MsRange;
use crate::error::Result;
use crate::host::TimerHost;
use crate::uniforms::UniformSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrikePhase {
    Idle,
    Striking,
}

pub struct LightningScheduler<H> {
    interval: MsRange,
    duration: MsRange,
    phase: StrikePhase,
    pending: Option<H>,
    rng: SmallRng,
}

impl<H: Copy + Eq + std::fmt::Debug> LightningScheduler<H> {
    pub fn new(interval: MsRange, duration: MsRange, seed: u64) -> Self {
        Self {
            interval,
            duration,
            phase: StrikePhase::Idle,
            pending: None,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn phase(&self) -> StrikePhase {
        self.phase
    }

    pub fn pending(&self) -> Option<H> {
        self.pending
    }

    /// Schedule the exit from the current phase. Returns the sampled delay.
    pub fn arm<T>(&mut self, timers: &mut T) -> Result<f64>
    where
        T: TimerHost<Handle = H>,
    {
        self.cancel(timers);
        let delay = match self.phase {
            StrikePhase::Idle => self.interval.sample(&mut self.rng),
            StrikePhase::Striking => self.duration.sample(&mut self.rng),
        };
        self.pending = Some(timers.set_timeout(delay)?);
        log::trace!("lightning armed: {:?} for {delay:.0}ms", self.phase);
        Ok(delay)
    }

    /// Handle expiry of the pending timer: flip the phase, write the
    /// intensity, and arm the next transition.
    ///
    /// An expiry with nothing pending (already cancelled) is ignored. If the
    /// next transition cannot be armed the scheduler falls back to `Idle`
    /// with intensity 0.0, so a flash never outlives its timer.
    pub fn fire<T>(&mut self, timers: &mut T, uniforms: &mut UniformSet) -> Result<StrikePhase>
    where
        T: TimerHost<Handle = H>,
    {
        if self.pending.take().is_none() {
            return Ok(self.phase);
        }
        self.phase = match self.phase {
            StrikePhase::Idle => StrikePhase::Striking,
            StrikePhase::Striking => StrikePhase::Idle,
        };
        uniforms.set_striking(self.phase == StrikePhase::Striking);
        if let Err(err) = self.arm(timers) {
            self.phase = StrikePhase::Idle;
            uniforms.set_striking(false);
            return Err(err);
        }
        Ok(self.phase)
    }

    /// Clear the pending timer, if any.
    pub fn cancel<T>(&mut self, timers: &mut T)
    where
        T: TimerHost<Handle = H>,
    {
        if let Some(handle) = self.pending.take() {
            timers.clear_timeout(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    #[derive(Default)]
    struct Recorder {
        next: u32,
        live: Vec<(u32, f64)>,
        cleared: Vec<u32>,
        /// Refuse every `set_timeout` after this many have succeeded.
        fail_after: Option<u32>,
    }

    impl TimerHost for Recorder {
        type Handle = u32;

        fn set_timeout(&mut self, delay_ms: f64) -> Result<u32> {
            if self.fail_after.is_some_and(|limit| self.next >= limit) {
                return Err(crate::error::BackdropError::Host("setTimeout threw".into()));
            }
            self.next += 1;
            self.live.push((self.next, delay_ms));
            Ok(self.next)
        }

        fn clear_timeout(&mut self, handle: u32) {
            self.live.retain(|(h, _)| *h != handle);
            self.cleared.push(handle);
        }
    }

    fn scheduler() -> LightningScheduler<u32> {
        LightningScheduler::new(
            MsRange::new(4000.0, 12000.0).unwrap(),
            MsRange::new(100.0, 300.0).unwrap(),
            42,
        )
    }

    fn uniforms() -> UniformSet {
        UniformSet::new(Rgb::new(1.0, 1.0, 1.0), [640.0, 480.0])
    }

    #[test]
    fn test_arm_uses_interval_when_idle() {
        let mut timers = Recorder::default();
        let mut s = scheduler();
        let delay = s.arm(&mut timers).unwrap();
        assert!((4000.0..=12000.0).contains(&delay));
        assert_eq!(s.pending(), Some(1));
        assert_eq!(s.phase(), StrikePhase::Idle);
    }

    #[test]
    fn test_rearm_clears_previous_timer() {
        let mut timers = Recorder::default();
        let mut s = scheduler();
        s.arm(&mut timers).unwrap();
        s.arm(&mut timers).unwrap();
        assert_eq!(timers.cleared, vec![1]);
        assert_eq!(timers.live.len(), 1);
        assert_eq!(s.pending(), Some(2));
    }

    #[test]
    fn test_full_cycle() {
        let mut timers = Recorder::default();
        let mut u = uniforms();
        let mut s = scheduler();
        s.arm(&mut timers).unwrap();
        timers.live.clear();

        assert_eq!(s.fire(&mut timers, &mut u).unwrap(), StrikePhase::Striking);
        assert_eq!(u.lightning_intensity(), 1.0);
        let (_, strike_len) = timers.live.pop().unwrap();
        assert!((100.0..=300.0).contains(&strike_len));

        assert_eq!(s.fire(&mut timers, &mut u).unwrap(), StrikePhase::Idle);
        assert_eq!(u.lightning_intensity(), 0.0);
        let (_, idle_len) = timers.live.pop().unwrap();
        assert!((4000.0..=12000.0).contains(&idle_len));
        assert!(s.pending().is_some());
    }

    #[test]
    fn test_fire_after_cancel_is_ignored() {
        let mut timers = Recorder::default();
        let mut u = uniforms();
        let mut s = scheduler();
        s.arm(&mut timers).unwrap();
        s.cancel(&mut timers);
        assert_eq!(s.fire(&mut timers, &mut u).unwrap(), StrikePhase::Idle);
        assert_eq!(u.lightning_intensity(), 0.0);
        assert!(timers.live.is_empty());
    }

    #[test]
    fn test_same_seed_same_schedule() {
        let mut a_timers = Recorder::default();
        let mut b_timers = Recorder::default();
        let mut a = scheduler();
        let mut b = scheduler();
        assert_eq!(a.arm(&mut a_timers).unwrap(), b.arm(&mut b_timers).unwrap());
    }

    #[test]
    fn test_failed_rearm_drops_the_flash() {
        let mut timers = Recorder {
            fail_after: Some(1),
            ..Default::default()
        };
        let mut u = uniforms();
        let mut s = scheduler();
        s.arm(&mut timers).unwrap();

        assert!(s.fire(&mut timers, &mut u).is_err());
        assert_eq!(s.phase(), StrikePhase::Idle);
        assert_eq!(u.lightning_intensity(), 0.0);
        assert_eq!(s.pending(), None);

        // Nothing left to fire; the flash cannot come back on its own.
        assert_eq!(s.fire(&mut timers, &mut u).unwrap(), StrikePhase::Idle);
        assert_eq!(u.lightning_intensity(), 0.0);
    }
}
