//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (wall clock for the countdown, seeds)
//! - DOM output for heads, countdown and particles (`web`, wasm only)

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Wall-clock source (Unix epoch, milliseconds)
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// `SystemTime`-backed clock for native builds
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[cfg(not(target_arch = "wasm32"))]
impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs_f64() * 1000.0)
            .unwrap_or(0.0)
    }
}

/// `Date.now()`-backed clock for the browser
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsClock;

#[cfg(target_arch = "wasm32")]
impl Clock for JsClock {
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }
}

/// Seed from the clock when the page doesn't pin one
pub fn seed_from_clock<C: Clock + ?Sized>(clock: &C) -> u64 {
    clock.now_ms() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedClock(f64);

    impl Clock for FixedClock {
        fn now_ms(&self) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_seed_from_clock() {
        assert_eq!(seed_from_clock(&FixedClock(1234.9)), 1234);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_system_clock_is_after_2020() {
        assert!(SystemClock.now_ms() > 1_577_836_800_000.0);
    }
}
