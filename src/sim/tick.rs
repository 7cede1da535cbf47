//! Per-frame simulation step
//!
//! Advances the heads by one (variable) frame delta. Frame order:
//! integrate, pairwise collisions, edge containment.
//!
//! A glancing or rear-end hit can leave a pair closing after the impulse, so
//! it overlaps again on the next frame. Damage is dealt once per contact: the
//! pair is recorded in [`HeadsState::contacts`] until it stops overlapping.

use serde::{Deserialize, Serialize};

use super::collision::{closing_speed, contain, exchange_impulse, head_collision, pair_mut, separate};
use super::outcome::{Outcome, OutcomeTracker};
use super::state::{HeadsState, Viewport};

/// Something that happened during a step, in the order it happened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// A qualifying (closing) collision between two heads
    Collision { a: u32, b: u32 },
    /// Health after a hit
    Damaged { id: u32, health: i32 },
    Eliminated { id: u32 },
    /// Terminal transition; emitted at most once per run
    Resolved(Outcome),
}

/// What a single step did
#[derive(Debug, Clone, Default)]
pub struct StepReport {
    /// False if the frame was skipped (bad delta or already resolved)
    pub advanced: bool,
    /// The delta actually integrated
    pub dt: f32,
    pub events: Vec<SimEvent>,
}

impl StepReport {
    pub fn resolved(&self) -> Option<&Outcome> {
        self.events.iter().find_map(|e| match e {
            SimEvent::Resolved(outcome) => Some(outcome),
            _ => None,
        })
    }
}

/// Validate an untrusted frame delta.
///
/// Non-finite or non-positive deltas skip the frame; oversized ones clamp.
pub fn sanitize_dt(dt: f32, max_dt: f32) -> Option<f32> {
    if !dt.is_finite() || dt <= 0.0 {
        return None;
    }
    Some(dt.min(max_dt))
}

/// Advance the simulation by `dt` seconds inside `viewport`
pub fn step(state: &mut HeadsState, viewport: Viewport, dt: f32) -> StepReport {
    let mut report = StepReport::default();

    if state.is_resolved() {
        return report;
    }

    // Catches states that start out with a single survivor
    if let Some(outcome) = OutcomeTracker::evaluate(state) {
        report.events.push(SimEvent::Resolved(outcome));
        return report;
    }

    let Some(dt) = sanitize_dt(dt, state.tuning.max_frame_dt) else {
        log::debug!("Skipping frame with invalid delta {}", dt);
        return report;
    };

    let tuning = state.tuning;
    let size = tuning.head_size;

    // Integrate
    for head in state.heads.iter_mut().filter(|h| h.alive) {
        head.pos += head.vel * dt;
        head.spin(tuning.angular_speed * dt);
    }

    // Pairwise collisions in ascending index order
    let count = state.heads.len();
    'pairs: for i in 0..count {
        for j in (i + 1)..count {
            let (a, b) = pair_mut(&mut state.heads, i, j);
            let key = (a.id, b.id);
            if !a.alive || !b.alive {
                state.contacts.remove(&key);
                continue;
            }

            let contact = head_collision(a.pos, b.pos, size);
            if !contact.hit {
                state.contacts.remove(&key);
                continue;
            }
            separate(a, b, &contact);

            // Separating pairs were already resolved on an earlier frame
            let closing = closing_speed(a.vel, b.vel, contact.normal);
            if closing <= 0.0 {
                continue;
            }

            // Still touching from an earlier hit: push apart, no damage
            if !state.contacts.insert(key) {
                exchange_impulse(a, b, contact.normal, closing, tuning.speed);
                continue;
            }

            log::debug!("{} hit {} (closing {:.1})", a.name, b.name, closing);
            report.events.push(SimEvent::Collision { a: a.id, b: b.id });

            let a_out = a.take_damage(tuning.collision_damage);
            let b_out = b.take_damage(tuning.collision_damage);
            report.events.push(SimEvent::Damaged { id: a.id, health: a.health });
            report.events.push(SimEvent::Damaged { id: b.id, health: b.health });

            exchange_impulse(a, b, contact.normal, closing, tuning.speed);

            for (out, head) in [(a_out, &*a), (b_out, &*b)] {
                if out {
                    log::info!("{} eliminated", head.name);
                    report.events.push(SimEvent::Eliminated { id: head.id });
                }
            }

            if a_out || b_out {
                if let Some(outcome) = OutcomeTracker::evaluate(state) {
                    report.events.push(SimEvent::Resolved(outcome));
                    break 'pairs;
                }
            }
        }
    }

    // Edge containment against the current viewport
    for head in state.heads.iter_mut().filter(|h| h.alive) {
        contain(head, viewport, size);
    }

    state.frames += 1;
    report.advanced = true;
    report.dt = dt;
    report
}
