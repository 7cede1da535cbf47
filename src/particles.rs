//! Ambient particle parameters
//!
//! Particles are pure decoration: the page animates them with CSS, so all we
//! pick here is where each one starts and how fast it drifts.

use rand::Rng;

/// Particles spawned on page load
pub const PARTICLE_COUNT: usize = 12;

/// Inline-style parameters for one particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSpec {
    /// Horizontal start as a percentage of the container width
    pub left_percent: f32,
    /// Width and height (px)
    pub size_px: f32,
    /// CSS animation duration (s); longer reads as more ethereal
    pub duration_s: f32,
    /// CSS animation delay (s) so they don't start together
    pub delay_s: f32,
}

impl ParticleSpec {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let duration_s = rng.random_range(8.0..20.0);
        Self {
            left_percent: rng.random_range(0.0..100.0),
            size_px: rng.random_range(2.0..5.0),
            duration_s,
            delay_s: rng.random_range(0.0..duration_s),
        }
    }
}

pub fn spawn_particles<R: Rng>(count: usize, rng: &mut R) -> Vec<ParticleSpec> {
    (0..count).map(|_| ParticleSpec::random(rng)).collect()
}
