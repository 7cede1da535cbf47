//! Simulation state and core types
//!
//! All state the engine mutates lives here and is owned by [`HeadsState`].

use std::collections::BTreeSet;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::outcome::Outcome;
use crate::consts::*;
use crate::{heading, wrap_degrees};

/// Engine tuning (shared by all heads)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Bounding square side; collision radius is half of this
    pub head_size: f32,
    /// Target speed every head is renormalized to (pixels/s)
    pub speed: f32,
    /// Spin rate (degrees/s)
    pub angular_speed: f32,
    pub max_health: i32,
    pub collision_damage: i32,
    /// Frame deltas above this are clamped (seconds)
    pub max_frame_dt: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            head_size: HEAD_SIZE,
            speed: HEAD_SPEED,
            angular_speed: ANGULAR_SPEED,
            max_health: MAX_HEALTH,
            collision_damage: COLLISION_DAMAGE,
            max_frame_dt: MAX_FRAME_DT,
        }
    }
}

/// Current viewport bounds in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Largest top-left position a square of `size` can take (never negative)
    #[inline]
    pub fn max_pos(&self, size: f32) -> Vec2 {
        Vec2::new(
            (self.width - size).max(0.0),
            (self.height - size).max(0.0),
        )
    }
}

/// A single flying head
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Head {
    pub id: u32,
    pub name: String,
    /// Top-left corner of the bounding square
    pub pos: Vec2,
    pub vel: Vec2,
    /// Degrees in [0, 360)
    pub rotation: f32,
    pub health: i32,
    pub alive: bool,
}

impl Head {
    pub fn new(id: u32, name: impl Into<String>, pos: Vec2, vel: Vec2, max_health: i32) -> Self {
        Self {
            id,
            name: name.into(),
            pos,
            vel,
            rotation: 0.0,
            health: max_health,
            alive: true,
        }
    }

    /// Center of the bounding circle
    #[inline]
    pub fn center(&self, size: f32) -> Vec2 {
        self.pos + Vec2::splat(size / 2.0)
    }

    /// Health as a fill fraction, floored at zero
    pub fn health_ratio(&self, max_health: i32) -> f32 {
        if max_health <= 0 {
            return 0.0;
        }
        (self.health.max(0) as f32 / max_health as f32).clamp(0.0, 1.0)
    }

    /// Subtract damage; flips `alive` once health reaches zero.
    /// Returns true if this hit eliminated the head.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if !self.alive {
            return false;
        }
        self.health -= amount.max(0);
        if self.health <= 0 {
            self.alive = false;
            return true;
        }
        false
    }

    /// Advance rotation by `degrees`, keeping it wrapped
    pub fn spin(&mut self, degrees: f32) {
        self.rotation = wrap_degrees(self.rotation + degrees);
    }
}

/// Simulation phase
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SimPhase {
    /// Heads are moving and colliding
    #[default]
    Running,
    /// Terminal: no further advancement
    Resolved(Outcome),
}

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadsState {
    pub tuning: Tuning,
    /// Heads in stable id order; never removed
    pub heads: Vec<Head>,
    pub phase: SimPhase,
    /// Frames that actually advanced
    pub frames: u64,
    /// Pairs `(lower id, higher id)` still overlapping since the hit that
    /// damaged them; a pair is only damaged again after it separates
    #[serde(default)]
    pub contacts: BTreeSet<(u32, u32)>,
}

impl HeadsState {
    /// Build a state from pre-made heads (sorted by id for stable pair order)
    pub fn from_heads(tuning: Tuning, mut heads: Vec<Head>) -> Self {
        heads.sort_by_key(|h| h.id);
        Self {
            tuning,
            heads,
            phase: SimPhase::Running,
            frames: 0,
            contacts: BTreeSet::new(),
        }
    }

    /// Spawn one head per name with random position, heading and rotation
    pub fn spawn<R: Rng>(
        tuning: Tuning,
        names: &[String],
        viewport: Viewport,
        rng: &mut R,
    ) -> Self {
        let max = viewport.max_pos(tuning.head_size);
        let heads = names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let pos = Vec2::new(rng.random::<f32>() * max.x, rng.random::<f32>() * max.y);
                let angle = rng.random::<f32>() * std::f32::consts::TAU;
                let mut head = Head::new(
                    i as u32 + 1,
                    name.clone(),
                    pos,
                    heading(angle) * tuning.speed,
                    tuning.max_health,
                );
                head.rotation = wrap_degrees(rng.random::<f32>() * 360.0);
                head
            })
            .collect();
        Self::from_heads(tuning, heads)
    }

    /// Spawn with a seeded PCG stream
    pub fn new(seed: u64, tuning: Tuning, names: &[String], viewport: Viewport) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        Self::spawn(tuning, names, viewport, &mut rng)
    }

    pub fn alive_count(&self) -> usize {
        self.heads.iter().filter(|h| h.alive).count()
    }

    pub fn head(&self, id: u32) -> Option<&Head> {
        self.heads.iter().find(|h| h.id == id)
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.phase, SimPhase::Resolved(_))
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        match &self.phase {
            SimPhase::Resolved(outcome) => Some(outcome),
            SimPhase::Running => None,
        }
    }
}
