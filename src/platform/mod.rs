//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame timing (animation-frame timestamps to deltas)
//! - Wall-clock seed timestamps

pub mod clock;

pub use clock::FrameClock;

/// Current wall-clock time in milliseconds, used to seed a run
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}
