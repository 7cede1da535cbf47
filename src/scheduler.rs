//! Frame scheduling
//!
//! The engine only exposes `step(dt)`. This module owns the glue that feeds it:
//! - [`FrameTimer`] turns display-refresh timestamps into deltas
//! - [`HeadsDriver`] runs step + publish and reports when to stop
//! - [`run_fixed`] is the deterministic fixed-step driver used headless

use crate::render::{RenderTarget, ViewportProvider, publish, publish_initial};
use crate::sim::{HeadsState, StepReport, step};

/// Whether the scheduler should request another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameControl {
    Continue,
    Stop,
}

/// Converts millisecond timestamps (e.g. from `requestAnimationFrame`) into
/// deltas in seconds. The first frame yields zero, which the engine skips.
#[derive(Debug, Clone, Default)]
pub struct FrameTimer {
    last_ms: Option<f64>,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delta(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt
    }

    /// Forget the last timestamp (e.g. after the page was hidden)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

/// Owns the simulation plus its output and bounds collaborators
pub struct HeadsDriver<T: RenderTarget, V: ViewportProvider> {
    pub state: HeadsState,
    pub target: T,
    pub viewport: V,
    timer: FrameTimer,
}

impl<T: RenderTarget, V: ViewportProvider> HeadsDriver<T, V> {
    /// Wrap a freshly spawned state and publish its starting pose
    pub fn new(state: HeadsState, mut target: T, viewport: V) -> Self {
        publish_initial(&state, &mut target);
        Self {
            state,
            target,
            viewport,
            timer: FrameTimer::new(),
        }
    }

    /// Real-time entry point: one call per display refresh
    pub fn on_frame(&mut self, now_ms: f64) -> FrameControl {
        let dt = self.timer.delta(now_ms);
        self.advance(dt)
    }

    /// Step by `dt` seconds and publish the result
    pub fn advance(&mut self, dt: f32) -> FrameControl {
        self.advance_report(dt);
        if self.state.is_resolved() {
            FrameControl::Stop
        } else {
            FrameControl::Continue
        }
    }

    /// Like [`Self::advance`] but hands back the step report
    pub fn advance_report(&mut self, dt: f32) -> StepReport {
        let viewport = self.viewport.viewport();
        let report = step(&mut self.state, viewport, dt);
        publish(&self.state, &report, &mut self.target);
        report
    }

    pub fn is_resolved(&self) -> bool {
        self.state.is_resolved()
    }
}

/// How a fixed-step run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames driven (including the resolving one)
    pub frames: u64,
    pub resolved: bool,
}

/// Drive `driver` with a constant `dt` until it resolves or `max_frames` pass
pub fn run_fixed<T: RenderTarget, V: ViewportProvider>(
    driver: &mut HeadsDriver<T, V>,
    dt: f32,
    max_frames: u64,
) -> RunSummary {
    let mut frames = 0;
    while frames < max_frames {
        frames += 1;
        if driver.advance(dt) == FrameControl::Stop {
            return RunSummary {
                frames,
                resolved: true,
            };
        }
    }
    RunSummary {
        frames,
        resolved: driver.is_resolved(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FIXED_DT;
    use crate::render::testing::{RecordingTarget, RenderCall};
    use crate::sim::{Head, Outcome, SimEvent, Tuning, Viewport};
    use glam::Vec2;

    const VIEW: Viewport = Viewport {
        width: 1000.0,
        height: 800.0,
    };

    fn names(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("Head {i}")).collect()
    }

    #[test]
    fn test_frame_timer() {
        let mut timer = FrameTimer::new();
        assert_eq!(timer.delta(1000.0), 0.0);
        assert!((timer.delta(1016.0) - 0.016).abs() < 1e-6);
        assert!((timer.delta(3016.0) - 2.0).abs() < 1e-6);
        timer.reset();
        assert_eq!(timer.delta(5000.0), 0.0);
    }

    #[test]
    fn test_first_animation_frame_is_skipped() {
        let state = HeadsState::new(3, Tuning::default(), &names(3), VIEW);
        let mut driver = HeadsDriver::new(state, RecordingTarget::default(), VIEW);
        let initial_calls = driver.target.calls.len();
        assert_eq!(initial_calls, 6);

        assert_eq!(driver.on_frame(16.0), FrameControl::Continue);
        assert_eq!(driver.state.frames, 0);
        assert_eq!(driver.target.calls.len(), initial_calls);

        driver.on_frame(32.0);
        assert_eq!(driver.state.frames, 1);
    }

    #[test]
    fn test_backgrounded_tab_gap_is_clamped() {
        let heads = vec![
            Head::new(1, "a", Vec2::new(100.0, 100.0), Vec2::new(80.0, 0.0), 100),
            Head::new(2, "b", Vec2::new(100.0, 500.0), Vec2::new(80.0, 0.0), 100),
        ];
        let state = HeadsState::from_heads(Tuning::default(), heads);
        let mut driver = HeadsDriver::new(state, RecordingTarget::default(), VIEW);

        driver.on_frame(0.0);
        // Ten minutes hidden
        driver.on_frame(600_000.0);
        assert!((driver.state.heads[0].pos.x - 108.0).abs() < 1e-3);
    }

    #[test]
    fn test_seeded_run_resolves_once() {
        // Barely wider than three heads, so they cannot avoid each other
        let viewport = Viewport::new(300.0, 240.0);
        let state = HeadsState::new(2024, Tuning::default(), &names(3), viewport);
        let mut driver = HeadsDriver::new(state, RecordingTarget::default(), viewport);

        let summary = run_fixed(&mut driver, FIXED_DT, 200_000);
        assert!(summary.resolved);
        assert!(summary.frames >= driver.state.frames);

        let announcements = driver
            .target
            .calls
            .iter()
            .filter(|c| matches!(c, RenderCall::Winner(..) | RenderCall::Draw))
            .count();
        assert_eq!(announcements, 1);

        // Frozen: further frames publish nothing
        let calls = driver.target.calls.len();
        assert_eq!(driver.advance(FIXED_DT), FrameControl::Stop);
        assert_eq!(driver.target.calls.len(), calls);
    }

    #[test]
    fn test_driver_reports_winner_from_start() {
        let mut dead = Head::new(1, "a", Vec2::ZERO, Vec2::X * 80.0, 100);
        dead.alive = false;
        dead.health = 0;
        let survivor = Head::new(2, "b", Vec2::new(200.0, 200.0), Vec2::X * 80.0, 100);
        let state = HeadsState::from_heads(Tuning::default(), vec![dead, survivor]);
        let mut driver = HeadsDriver::new(state, RecordingTarget::default(), VIEW);

        let report = driver.advance_report(FIXED_DT);
        assert_eq!(
            report.events,
            vec![SimEvent::Resolved(Outcome::Winner {
                id: 2,
                name: "b".into()
            })]
        );
        assert_eq!(driver.target.calls.last(), Some(&RenderCall::Winner(2, "b".into())));
        assert_eq!(driver.target.transforms_for(2), 1);
        assert!(driver.is_resolved());
    }

    #[test]
    fn test_run_fixed_respects_frame_cap() {
        let heads = vec![
            Head::new(1, "a", Vec2::new(100.0, 100.0), Vec2::new(80.0, 0.0), 100),
            Head::new(2, "b", Vec2::new(100.0, 500.0), Vec2::new(80.0, 0.0), 100),
        ];
        let state = HeadsState::from_heads(Tuning::default(), heads);
        let mut driver = HeadsDriver::new(state, RecordingTarget::default(), VIEW);

        let summary = run_fixed(&mut driver, FIXED_DT, 30);
        assert_eq!(
            summary,
            RunSummary {
                frames: 30,
                resolved: false
            }
        );
    }
}
