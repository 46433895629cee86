use crate::clock::Clock;
use crate::clock::FrameTimer;
use crate::error::MyResult;
use tracing::debug;
use tracing::error;

/// What one look at the platform message queue produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpEvent {
    /// A message was translated and dispatched to its window.
    Dispatched,
    /// The quit message arrived, carrying the process exit code.
    Quit(i32),
    /// Nothing was pending.
    Empty,
}

pub trait MessagePump {
    fn pump(&mut self) -> PumpEvent;
}

/// One simulation step followed by one frame.
pub trait FrameStep {
    fn update(&mut self, delta_seconds: f32) -> MyResult<()>;
    fn render(&mut self) -> MyResult<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Draining,
    Idle,
    Terminated(i32),
}

pub struct FrameLoop<P: MessagePump, C: Clock> {
    pump: P,
    timer: FrameTimer<C>,
    state: LoopState,
}

impl<P: MessagePump, C: Clock> FrameLoop<P, C> {
    pub fn new(pump: P, clock: C) -> Self {
        Self {
            pump,
            timer: FrameTimer::new(clock),
            state: LoopState::Idle,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Runs one iteration: either handles a message or, when the queue is
    /// empty, runs one update and one render.
    pub fn step<F: FrameStep>(&mut self, frame: &mut F) -> LoopState {
        if let LoopState::Terminated(_) = self.state {
            return self.state;
        }

        self.state = match self.pump.pump() {
            PumpEvent::Quit(exit_code) => {
                debug!("Quit message received with exit code {}", exit_code);
                LoopState::Terminated(exit_code)
            }
            PumpEvent::Dispatched => LoopState::Draining,
            PumpEvent::Empty => {
                let delta_seconds = self.timer.tick();
                if let Err(e) = frame.update(delta_seconds).and_then(|()| frame.render()) {
                    // Keep going; the next frame may well succeed.
                    error!("Frame error: {:?}", e);
                }
                LoopState::Idle
            }
        };
        self.state
    }

    /// Loops until the quit message and returns its exit code.
    pub fn run<F: FrameStep>(mut self, frame: &mut F) -> i32 {
        loop {
            if let LoopState::Terminated(exit_code) = self.step(frame) {
                return exit_code;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::tests::ScriptedClock;
    use crate::clock::MAX_TIME_STEP;
    use std::collections::VecDeque;

    struct ScriptedPump {
        events: VecDeque<PumpEvent>,
        pumped: usize,
    }

    impl ScriptedPump {
        fn new(events: &[PumpEvent]) -> Self {
            Self {
                events: events.iter().copied().collect(),
                pumped: 0,
            }
        }
    }

    impl MessagePump for ScriptedPump {
        fn pump(&mut self) -> PumpEvent {
            self.pumped += 1;
            self.events.pop_front().unwrap_or(PumpEvent::Quit(0))
        }
    }

    #[derive(Default)]
    struct RecordingFrame {
        deltas: Vec<f32>,
        renders: usize,
        fail_renders: bool,
    }

    impl FrameStep for RecordingFrame {
        fn update(&mut self, delta_seconds: f32) -> MyResult<()> {
            self.deltas.push(delta_seconds);
            Ok(())
        }

        fn render(&mut self) -> MyResult<()> {
            self.renders += 1;
            if self.fail_renders {
                eyre::bail!("present failed");
            }
            Ok(())
        }
    }

    use PumpEvent::*;

    #[test]
    fn messages_drain_before_frames_run() {
        let pump = ScriptedPump::new(&[Dispatched, Dispatched, Empty, Quit(0)]);
        let mut frame_loop = FrameLoop::new(pump, ScriptedClock::new(&[0, 10]));
        let mut frame = RecordingFrame::default();

        assert_eq!(frame_loop.step(&mut frame), LoopState::Draining);
        assert_eq!(frame_loop.step(&mut frame), LoopState::Draining);
        assert!(frame.deltas.is_empty());
        assert_eq!(frame_loop.step(&mut frame), LoopState::Idle);
        assert_eq!(frame.deltas.len(), 1);
        assert_eq!(frame.renders, 1);
        assert_eq!(frame_loop.step(&mut frame), LoopState::Terminated(0));
    }

    #[test]
    fn long_pauses_feed_a_clamped_delta_to_update() {
        let pump = ScriptedPump::new(&[Empty, Empty, Quit(0)]);
        let clock = ScriptedClock::new(&[0, 1000, 1020]);
        let mut frame = RecordingFrame::default();
        FrameLoop::new(pump, clock).run(&mut frame);

        assert_eq!(frame.deltas[0], MAX_TIME_STEP);
        assert!((frame.deltas[1] - 0.020).abs() < 1e-6);
    }

    #[test]
    fn run_returns_the_quit_exit_code() {
        let pump = ScriptedPump::new(&[Empty, Dispatched, Quit(3)]);
        let mut frame = RecordingFrame::default();
        assert_eq!(FrameLoop::new(pump, ScriptedClock::new(&[])).run(&mut frame), 3);
    }

    #[test]
    fn frame_errors_do_not_stop_the_loop() {
        let pump = ScriptedPump::new(&[Empty, Empty, Empty, Quit(0)]);
        let mut frame = RecordingFrame {
            fail_renders: true,
            ..Default::default()
        };
        assert_eq!(FrameLoop::new(pump, ScriptedClock::new(&[])).run(&mut frame), 0);
        assert_eq!(frame.renders, 3);
    }

    #[test]
    fn terminated_is_final() {
        let pump = ScriptedPump::new(&[Quit(1), Empty]);
        let mut frame_loop = FrameLoop::new(pump, ScriptedClock::new(&[]));
        let mut frame = RecordingFrame::default();
        assert_eq!(frame_loop.step(&mut frame), LoopState::Terminated(1));
        assert_eq!(frame_loop.step(&mut frame), LoopState::Terminated(1));
        assert_eq!(frame_loop.pump.pumped, 1);
        assert_eq!(frame_loop.state(), LoopState::Terminated(1));
        assert!(frame.deltas.is_empty());
    }
}
