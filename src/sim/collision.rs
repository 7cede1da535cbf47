//! Collision detection and response for heads
//!
//! Heads collide as circles (radius = size/2) against each other and as
//! squares against the viewport edges.

use glam::Vec2;

use super::state::{Head, Viewport};

/// Result of a head-vs-head overlap check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether the bounding circles overlap
    pub hit: bool,
    /// Unit vector from the first head's center toward the second's
    pub normal: Vec2,
    /// Overlap depth (size - center distance)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check overlap between two heads' bounding circles.
///
/// Coincident centers report a miss: there is no usable normal.
pub fn head_collision(a_pos: Vec2, b_pos: Vec2, size: f32) -> CollisionResult {
    // Same size, so the center offset equals the top-left offset
    let delta = b_pos - a_pos;
    let distance = delta.length();

    if distance > 0.0 && distance < size {
        CollisionResult {
            hit: true,
            normal: delta / distance,
            penetration: size - distance,
        }
    } else {
        CollisionResult::miss()
    }
}

/// Push both heads apart by half the penetration each
pub fn separate(a: &mut Head, b: &mut Head, contact: &CollisionResult) {
    let push = contact.normal * (contact.penetration / 2.0);
    a.pos -= push;
    b.pos += push;
}

/// Relative velocity along the normal; positive means the heads approach
#[inline]
pub fn closing_speed(a_vel: Vec2, b_vel: Vec2, normal: Vec2) -> f32 {
    (a_vel - b_vel).dot(normal)
}

/// Remove the closing component (equal and opposite, unit mass) and
/// renormalize both heads back to `speed`
pub fn exchange_impulse(a: &mut Head, b: &mut Head, normal: Vec2, closing: f32, speed: f32) {
    a.vel -= normal * closing;
    b.vel += normal * closing;
    a.vel = normalize_speed(a.vel, -normal, speed);
    b.vel = normalize_speed(b.vel, normal, speed);
}

/// Rescale to `speed`. A zero vector takes `fallback` so a head never stalls.
#[inline]
pub fn normalize_speed(vel: Vec2, fallback: Vec2, speed: f32) -> Vec2 {
    vel.try_normalize().unwrap_or(fallback) * speed
}

/// Clamp a head into the viewport and point its velocity back inward.
/// Returns true if any edge was touched.
pub fn contain(head: &mut Head, viewport: Viewport, size: f32) -> bool {
    let max = viewport.max_pos(size);
    let mut bounced = false;

    if head.pos.x <= 0.0 {
        head.pos.x = 0.0;
        head.vel.x = head.vel.x.abs();
        bounced = true;
    } else if head.pos.x >= max.x {
        head.pos.x = max.x;
        head.vel.x = -head.vel.x.abs();
        bounced = true;
    }

    if head.pos.y <= 0.0 {
        head.pos.y = 0.0;
        head.vel.y = head.vel.y.abs();
        bounced = true;
    } else if head.pos.y >= max.y {
        head.pos.y = max.y;
        head.vel.y = -head.vel.y.abs();
        bounced = true;
    }

    bounced
}

/// Borrow two distinct heads mutably (`i < j`)
pub(crate) fn pair_mut(heads: &mut [Head], i: usize, j: usize) -> (&mut Head, &mut Head) {
    debug_assert!(i < j);
    let (left, right) = heads.split_at_mut(j);
    (&mut left[i], &mut right[0])
}
