use std::time::Duration;
use std::time::Instant;

/// Updates never advance by more than one 30 Hz frame at once, so a pause
/// (a breakpoint, a window drag) does not make the cube jump.
pub const TARGET_FRAMERATE: f32 = 30.0;
pub const MAX_TIME_STEP: f32 = 1.0 / TARGET_FRAMERATE;

pub trait Clock {
    fn now(&mut self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&mut self) -> Instant {
        Instant::now()
    }
}

pub fn clamp_time_step(elapsed: Duration) -> f32 {
    elapsed.as_secs_f32().min(MAX_TIME_STEP)
}

/// Remembers when the previous update ran.
#[derive(Debug)]
pub struct FrameTimer<C: Clock> {
    clock: C,
    previous: Instant,
}

impl<C: Clock> FrameTimer<C> {
    pub fn new(mut clock: C) -> Self {
        let previous = clock.now();
        Self { clock, previous }
    }

    /// Seconds since the last call, clamped to [`MAX_TIME_STEP`].
    pub fn tick(&mut self) -> f32 {
        let now = self.clock.now();
        let elapsed = now.saturating_duration_since(self.previous);
        self.previous = now;
        clamp_time_step(elapsed)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Hands out a scripted sequence of offsets from a fixed start.
    pub(crate) struct ScriptedClock {
        start: Instant,
        offsets: VecDeque<Duration>,
        last: Duration,
    }

    impl ScriptedClock {
        pub(crate) fn new(offsets_ms: &[u64]) -> Self {
            Self {
                start: Instant::now(),
                offsets: offsets_ms.iter().map(|ms| Duration::from_millis(*ms)).collect(),
                last: Duration::ZERO,
            }
        }
    }

    impl Clock for ScriptedClock {
        fn now(&mut self) -> Instant {
            if let Some(next) = self.offsets.pop_front() {
                self.last = next;
            }
            self.start + self.last
        }
    }

    #[test]
    fn a_one_second_gap_is_clamped_to_one_thirtieth() {
        assert_eq!(clamp_time_step(Duration::from_secs(1)), MAX_TIME_STEP);
    }

    #[test]
    fn short_gaps_pass_through() {
        let step = clamp_time_step(Duration::from_millis(10));
        assert!((step - 0.010).abs() < 1e-6);
    }

    #[test]
    fn timer_measures_between_ticks() {
        let mut timer = FrameTimer::new(ScriptedClock::new(&[0, 16, 1016, 1020]));
        assert!((timer.tick() - 0.016).abs() < 1e-6);
        assert_eq!(timer.tick(), MAX_TIME_STEP);
        assert!((timer.tick() - 0.004).abs() < 1e-6);
    }
}
