//! Flying Heads - countdown page with a bouncing-heads toy
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, elimination)
//! - `render`: Output sink traits and the frame publisher
//! - `scheduler`: Frame timing and step drivers
//! - `platform`: Browser/native platform abstraction
//! - `countdown`: Time-remaining math for the countdown text
//! - `particles`: Ambient particle parameters
//! - `settings`: Page configuration

pub mod countdown;
pub mod error;
pub mod particles;
pub mod platform;
pub mod render;
pub mod scheduler;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::Settings;

/// Simulation configuration constants
pub mod consts {
    /// Side length of a head's bounding square (pixels)
    pub const HEAD_SIZE: f32 = 80.0;
    /// Constant travel speed (pixels/s)
    pub const HEAD_SPEED: f32 = 80.0;
    /// Spin rate while alive (degrees/s)
    pub const ANGULAR_SPEED: f32 = 90.0;

    /// Starting (and maximum) health
    pub const MAX_HEALTH: i32 = 100;
    /// Health lost by both heads per qualifying collision
    pub const COLLISION_DAMAGE: i32 = 15;

    /// Largest frame delta the engine will integrate (seconds).
    /// Backgrounded tabs resume with huge gaps; anything longer is clamped.
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Fixed step used by headless runs
    pub const FIXED_DT: f32 = 1.0 / 60.0;
}

/// Wrap an angle in degrees to [0, 360)
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can return exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Unit vector for a heading in radians
#[inline]
pub fn heading(theta: f32) -> glam::Vec2 {
    glam::Vec2::new(theta.cos(), theta.sin())
}
