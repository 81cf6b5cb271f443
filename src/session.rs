//! The per-frame poll loop: pump events, snapshot, translate, diff, render.
//!
//! The loop core is a plain state machine over injected collaborators, so it
//! runs identically under the window, in headless mode and in tests.

use colored::Colorize;
use std::time::{Duration, Instant};
use tracing::{info, trace};

use crate::actions::{Action, ActionSet};
use crate::input::{ControllerState, PollablePad};
use crate::translator::Translator;

/// Target pacing for the poll loop, iterations per second.
pub const FRAME_RATE: u32 = 30;

/// Loop lifecycle. Stopped is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Stopped,
}

/// What one poll cycle produced.
#[derive(Debug, Clone)]
pub struct FrameOutput {
    pub actions: ActionSet,
    /// Space-joined line for the display surface; rendered every frame.
    pub display_line: String,
    /// Comma-separated transition line; `Some` only when the active subset
    /// changed since the previous frame.
    pub console_line: Option<String>,
    /// `start` was active this frame - the session has stopped.
    pub stop: bool,
}

/// Frame-to-frame poll state: the translator plus the previous frame's
/// action set for transition logging.
pub struct PollSession {
    translator: Translator,
    last_actions: Option<ActionSet>,
    phase: Phase,
}

impl PollSession {
    pub fn new(translator: Translator) -> Self {
        Self {
            translator,
            last_actions: None,
            phase: Phase::Running,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// External quit request (window close).
    pub fn stop(&mut self) {
        if self.phase != Phase::Stopped {
            info!("Poll session stopped");
            self.phase = Phase::Stopped;
        }
    }

    /// Run one poll cycle against the pad's current state.
    ///
    /// The first frame always counts as a transition; after that, a console
    /// line is produced only when the active subset differs from the
    /// previous frame.
    pub fn frame(&mut self, pad: &impl ControllerState) -> FrameOutput {
        let actions = self.translator.translate(pad);

        let changed = self.last_actions != Some(actions);
        self.last_actions = Some(actions);

        let stop = actions.is_active(Action::Start);
        if stop {
            self.stop();
        }

        FrameOutput {
            actions,
            display_line: actions.display_line(),
            console_line: changed.then(|| actions.console_line()),
            stop,
        }
    }
}

/// Source of user-initiated quit requests.
pub trait EventPump {
    /// Pump pending events; report whether a quit was requested.
    fn quit_requested(&mut self) -> bool;
}

/// Surface the active-action line is rendered to each frame.
pub trait DisplaySink {
    fn present(&mut self, line: &str);
}

/// Frame pacing.
pub trait FrameClock {
    /// Block until the next frame is due.
    fn tick(&mut self);
}

/// Event pump with no quit source; headless runs end via `start`.
pub struct NeverQuit;

impl EventPump for NeverQuit {
    fn quit_requested(&mut self) -> bool {
        false
    }
}

/// Display sink for headless mode. The console transition echo is the only
/// product output there, so per-frame rendering drops to trace level.
pub struct ConsoleDisplay;

impl DisplaySink for ConsoleDisplay {
    fn present(&mut self, line: &str) {
        trace!("{line}");
    }
}

/// Sleep-based clock holding the loop near a fixed rate.
pub struct FixedRateClock {
    interval: Duration,
    next_deadline: Instant,
}

impl FixedRateClock {
    pub fn new(rate: u32) -> Self {
        let interval = Duration::from_secs(1) / rate.max(1);
        Self {
            interval,
            next_deadline: Instant::now() + interval,
        }
    }
}

impl FrameClock for FixedRateClock {
    fn tick(&mut self) {
        let now = Instant::now();
        if let Some(wait) = self.next_deadline.checked_duration_since(now) {
            std::thread::sleep(wait);
        }
        // Late frames reschedule from now rather than trying to catch up.
        self.next_deadline = self.next_deadline.max(now) + self.interval;
    }
}

/// Print a transition line to the console.
pub fn echo_transition(line: &str) {
    println!("{}", line.bold());
}

/// Drive the session to completion: pump, poll, translate, render, tick.
///
/// The terminal frame is still rendered, matching what the window shows
/// when `start` closes it. Returns the number of frames polled.
pub fn run_loop(
    session: &mut PollSession,
    pad: &mut impl PollablePad,
    events: &mut impl EventPump,
    display: &mut impl DisplaySink,
    clock: &mut impl FrameClock,
) -> u64 {
    let mut frames = 0;

    while session.is_running() {
        if events.quit_requested() {
            session.stop();
            break;
        }

        pad.poll();
        let output = session.frame(pad);
        frames += 1;

        if let Some(line) = &output.console_line {
            echo_transition(line);
        }
        display.present(&output.display_line);

        if output.stop {
            break;
        }
        clock.tick();
    }

    frames
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MappingConfig;

    /// Pad replaying a scripted sequence of pressed-button frames.
    struct ScriptedPad {
        frames: Vec<Vec<usize>>,
        cursor: usize,
        started: bool,
    }

    impl ScriptedPad {
        fn new(frames: Vec<Vec<usize>>) -> Self {
            Self {
                frames,
                cursor: 0,
                started: false,
            }
        }
    }

    impl ControllerState for ScriptedPad {
        fn button_count(&self) -> usize {
            12
        }
        fn is_button_pressed(&self, index: usize) -> bool {
            self.frames
                .get(self.cursor)
                .map_or(false, |frame| frame.contains(&index))
        }
        fn axis_count(&self) -> usize {
            2
        }
        fn axis_value(&self, _index: usize) -> f32 {
            0.0
        }
        fn hat_count(&self) -> usize {
            0
        }
        fn hat_value(&self, _index: usize) -> (i8, i8) {
            (0, 0)
        }
    }

    impl PollablePad for ScriptedPad {
        fn poll(&mut self) {
            if self.started {
                // Past the script's end the pad keeps reporting its last frame.
                self.cursor = (self.cursor + 1).min(self.frames.len().saturating_sub(1));
            } else {
                self.started = true;
            }
        }
    }

    #[derive(Default)]
    struct CollectingDisplay {
        lines: Vec<String>,
    }

    impl DisplaySink for CollectingDisplay {
        fn present(&mut self, line: &str) {
            self.lines.push(line.to_string());
        }
    }

    struct NoopClock;

    impl FrameClock for NoopClock {
        fn tick(&mut self) {}
    }

    /// Requests quit once `frames` pump calls have gone by.
    struct QuitAfter {
        frames: usize,
        pumped: usize,
    }

    impl EventPump for QuitAfter {
        fn quit_requested(&mut self) -> bool {
            self.pumped += 1;
            self.pumped > self.frames
        }
    }

    fn session() -> PollSession {
        PollSession::new(Translator::new(MappingConfig::default()))
    }

    #[test]
    fn test_stops_on_start_action() {
        // Button 9 maps to `start` in the default configuration.
        let mut pad = ScriptedPad::new(vec![vec![], vec![], vec![9]]);
        let mut session = session();
        let mut display = CollectingDisplay::default();

        let frames = run_loop(
            &mut session,
            &mut pad,
            &mut NeverQuit,
            &mut display,
            &mut NoopClock,
        );

        assert_eq!(frames, 3);
        assert!(!session.is_running());
        // The terminal frame still rendered.
        assert_eq!(display.lines.len(), 3);
        assert!(display.lines[2].contains("start"));
    }

    #[test]
    fn test_no_frames_polled_after_start() {
        let mut pad = ScriptedPad::new(vec![vec![], vec![9], vec![1]]);
        let mut session = session();
        let mut display = CollectingDisplay::default();

        let frames = run_loop(
            &mut session,
            &mut pad,
            &mut NeverQuit,
            &mut display,
            &mut NoopClock,
        );

        assert_eq!(frames, 2);
        // The frame after `start` was never reached.
        assert_eq!(pad.cursor, 1);
    }

    #[test]
    fn test_quit_event_stops_the_loop() {
        let mut pad = ScriptedPad::new(vec![vec![]; 10]);
        let mut session = session();
        let mut display = CollectingDisplay::default();
        let mut pump = QuitAfter {
            frames: 2,
            pumped: 0,
        };

        let frames = run_loop(&mut session, &mut pad, &mut pump, &mut display, &mut NoopClock);

        assert_eq!(frames, 2);
        assert!(!session.is_running());
        assert_eq!(display.lines.len(), 2);
    }

    #[test]
    fn test_console_line_only_on_transitions() {
        let mut pad = ScriptedPad::new(vec![vec![], vec![1], vec![1], vec![]]);
        let mut session = session();

        pad.poll();
        let first = session.frame(&pad);
        // The first frame always logs, even with nothing active.
        assert_eq!(first.console_line.as_deref(), Some("Actions actives : "));

        pad.poll();
        let pressed = session.frame(&pad);
        assert_eq!(
            pressed.console_line.as_deref(),
            Some("Actions actives : action_a")
        );

        pad.poll();
        let held = session.frame(&pad);
        assert!(held.console_line.is_none());

        pad.poll();
        let released = session.frame(&pad);
        assert_eq!(released.console_line.as_deref(), Some("Actions actives : "));
    }

    #[test]
    fn test_frame_reports_stop_on_start() {
        let mut pad = ScriptedPad::new(vec![vec![9]]);
        let mut session = session();

        pad.poll();
        let output = session.frame(&pad);
        assert!(output.stop);
        assert!(output.actions.is_active(Action::Start));
        assert!(!session.is_running());
    }

    #[test]
    fn test_display_line_rendered_every_frame() {
        let mut pad = ScriptedPad::new(vec![vec![1], vec![1], vec![1], vec![9]]);
        let mut session = session();
        let mut display = CollectingDisplay::default();

        run_loop(
            &mut session,
            &mut pad,
            &mut NeverQuit,
            &mut display,
            &mut NoopClock,
        );

        // Unchanged state still renders each frame.
        assert_eq!(display.lines.len(), 4);
        assert_eq!(display.lines[0], display.lines[2]);
    }
}
