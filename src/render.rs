//! Presentation boundary
//!
//! The engine never touches the display. After each step the publisher turns
//! the new state and the step's events into calls on a [`RenderTarget`].

use crate::sim::{Head, HeadsState, Outcome, SimEvent, StepReport, Viewport};

/// Output sink for head visuals
pub trait RenderTarget {
    /// Position (top-left, pixels) and rotation (degrees), already rounded
    fn set_transform(&mut self, id: u32, x: f32, y: f32, rotation_deg: f32);
    /// Health bar fill in [0, 1]
    fn set_health_ratio(&mut self, id: u32, ratio: f32);
    /// Switch a head to its eliminated presentation
    fn mark_eliminated(&mut self, id: u32);
    fn announce_winner(&mut self, id: u32, name: &str);
    /// Both last survivors went down together
    fn announce_draw(&mut self) {}
}

/// Source of the current viewport bounds (queried every frame)
pub trait ViewportProvider {
    fn viewport(&self) -> Viewport;
}

impl ViewportProvider for Viewport {
    fn viewport(&self) -> Viewport {
        *self
    }
}

fn push_transform<T: RenderTarget + ?Sized>(head: &Head, target: &mut T) {
    let (x, y, rot) = (
        head.pos.x.round(),
        head.pos.y.round(),
        head.rotation.round(),
    );
    log::trace!("{} -> ({}, {}) {}deg", head.name, x, y, rot);
    target.set_transform(head.id, x, y, rot);
}

/// Push spawn transforms and full health bars
pub fn publish_initial<T: RenderTarget + ?Sized>(state: &HeadsState, target: &mut T) {
    for head in &state.heads {
        push_transform(head, target);
        target.set_health_ratio(head.id, head.health_ratio(state.tuning.max_health));
    }
}

/// Push one frame's worth of changes
pub fn publish<T: RenderTarget + ?Sized>(state: &HeadsState, report: &StepReport, target: &mut T) {
    let max_health = state.tuning.max_health;

    for event in &report.events {
        match event {
            SimEvent::Damaged { id, .. } => {
                if let Some(head) = state.head(*id) {
                    target.set_health_ratio(*id, head.health_ratio(max_health));
                }
            }
            SimEvent::Eliminated { id } => {
                target.set_health_ratio(*id, 0.0);
                // Final resting pose; eliminated heads are skipped below
                if let Some(head) = state.head(*id) {
                    push_transform(head, target);
                }
                target.mark_eliminated(*id);
            }
            SimEvent::Collision { .. } | SimEvent::Resolved(_) => {}
        }
    }

    if report.advanced {
        for head in state.heads.iter().filter(|h| h.alive) {
            push_transform(head, target);
        }
    }

    match report.resolved() {
        Some(Outcome::Winner { id, name }) => target.announce_winner(*id, name),
        Some(Outcome::Draw) => target.announce_draw(),
        None => {}
    }
}

/// Adapter that only logs lifecycle changes (headless runs)
#[derive(Debug, Default)]
pub struct LogTarget {
    pub eliminated: Vec<u32>,
    pub outcome: Option<Outcome>,
}

impl RenderTarget for LogTarget {
    fn set_transform(&mut self, _id: u32, _x: f32, _y: f32, _rotation_deg: f32) {}

    fn set_health_ratio(&mut self, id: u32, ratio: f32) {
        log::debug!("head {} health {:.0}%", id, ratio * 100.0);
    }

    fn mark_eliminated(&mut self, id: u32) {
        log::info!("head {} is out", id);
        self.eliminated.push(id);
    }

    fn announce_winner(&mut self, id: u32, name: &str) {
        log::info!("🏆 {} wins!", name);
        self.outcome = Some(Outcome::Winner {
            id,
            name: name.to_string(),
        });
    }

    fn announce_draw(&mut self) {
        log::info!("Nobody survived");
        self.outcome = Some(Outcome::Draw);
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{RecordingTarget, RenderCall};
    use super::*;
    use crate::sim::{Tuning, step};
    use glam::Vec2;

    fn state() -> HeadsState {
        let mut a = Head::new(1, "Ada", Vec2::new(10.4, 20.6), Vec2::new(80.0, 0.0), 100);
        a.rotation = 44.6;
        let b = Head::new(2, "Bo", Vec2::new(500.0, 300.0), Vec2::new(0.0, 80.0), 100);
        HeadsState::from_heads(Tuning::default(), vec![a, b])
    }

    #[test]
    fn test_publish_initial_rounds() {
        let mut target = RecordingTarget::default();
        publish_initial(&state(), &mut target);
        assert_eq!(
            target.calls[0],
            RenderCall::Transform {
                id: 1,
                x: 10.0,
                y: 21.0,
                rot: 45.0
            }
        );
        assert_eq!(target.calls[1], RenderCall::Health { id: 1, ratio: 1.0 });
        assert_eq!(target.calls.len(), 4);
    }

    #[test]
    fn test_skipped_frame_publishes_nothing() {
        let state = state();
        let mut target = RecordingTarget::default();
        publish(&state, &StepReport::default(), &mut target);
        assert!(target.calls.is_empty());
    }

    #[test]
    fn test_damage_elimination_and_winner() {
        let mut state = state();
        state.heads[0].health = -5;
        state.heads[0].alive = false;
        state.heads[1].health = 85;
        let report = StepReport {
            advanced: true,
            dt: 0.016,
            events: vec![
                SimEvent::Collision { a: 1, b: 2 },
                SimEvent::Damaged { id: 1, health: -5 },
                SimEvent::Damaged { id: 2, health: 85 },
                SimEvent::Eliminated { id: 1 },
                SimEvent::Resolved(Outcome::Winner {
                    id: 2,
                    name: "Bo".into(),
                }),
            ],
        };

        let mut target = RecordingTarget::default();
        publish(&state, &report, &mut target);
        assert_eq!(
            target.calls,
            vec![
                RenderCall::Health { id: 1, ratio: 0.0 },
                RenderCall::Health { id: 2, ratio: 0.85 },
                RenderCall::Health { id: 1, ratio: 0.0 },
                RenderCall::Transform {
                    id: 1,
                    x: 10.0,
                    y: 21.0,
                    rot: 45.0
                },
                RenderCall::Eliminated(1),
                RenderCall::Transform {
                    id: 2,
                    x: 500.0,
                    y: 300.0,
                    rot: 0.0
                },
                RenderCall::Winner(2, "Bo".into()),
            ]
        );
    }

    #[test]
    fn test_eliminated_heads_stop_publishing() {
        let mut state = state();
        state.heads.push(Head::new(3, "Cy", Vec2::new(800.0, 100.0), Vec2::new(0.0, 80.0), 100));
        state.heads[0].alive = false;
        state.heads[0].health = 0;

        let viewport = Viewport::new(1200.0, 900.0);
        let mut target = RecordingTarget::default();
        for _ in 0..10 {
            let report = step(&mut state, viewport, 1.0 / 60.0);
            publish(&state, &report, &mut target);
        }
        assert_eq!(target.transforms_for(1), 0);
        assert_eq!(target.transforms_for(2), 10);
        assert_eq!(target.transforms_for(3), 10);
    }

    #[test]
    fn test_eliminated_head_publishes_final_pose() {
        let mut state = HeadsState::from_heads(
            Tuning::default(),
            vec![
                Head::new(1, "Ada", Vec2::new(300.0, 300.0), Vec2::new(80.0, 0.0), 100),
                Head::new(2, "Bo", Vec2::new(400.0, 300.0), Vec2::new(-80.0, 0.0), 100),
                Head::new(3, "Cy", Vec2::new(900.0, 700.0), Vec2::new(0.0, -80.0), 100),
            ],
        );
        state.heads[0].health = 10;

        let viewport = Viewport::new(1200.0, 900.0);
        let mut target = RecordingTarget::default();
        for _ in 0..60 {
            let report = step(&mut state, viewport, 1.0 / 60.0);
            publish(&state, &report, &mut target);
        }

        let loser = &state.heads[0];
        assert!(!loser.alive);
        let out = target
            .calls
            .iter()
            .position(|c| *c == RenderCall::Eliminated(1))
            .unwrap();
        // The pose after the knockout frame's separation, not the one before it
        assert_eq!(
            target.calls[out - 1],
            RenderCall::Transform {
                id: 1,
                x: loser.pos.x.round(),
                y: loser.pos.y.round(),
                rot: loser.rotation.round()
            }
        );
        assert!(
            !target.calls[out..]
                .iter()
                .any(|c| matches!(c, RenderCall::Transform { id: 1, .. }))
        );
    }

    #[test]
    fn test_draw_announcement() {
        let state = state();
        let report = StepReport {
            advanced: false,
            dt: 0.0,
            events: vec![SimEvent::Resolved(Outcome::Draw)],
        };
        let mut target = RecordingTarget::default();
        publish(&state, &report, &mut target);
        assert_eq!(target.calls, vec![RenderCall::Draw]);
    }

    #[test]
    fn test_log_target_records_outcome() {
        let mut target = LogTarget::default();
        target.mark_eliminated(3);
        target.announce_winner(1, "Ada");
        assert_eq!(target.eliminated, vec![3]);
        assert_eq!(
            target.outcome,
            Some(Outcome::Winner {
                id: 1,
                name: "Ada".into()
            })
        );
    }
}
