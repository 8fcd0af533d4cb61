//! Animation-frame clock
//!
//! Turns absolute frame timestamps into per-frame deltas and keeps a
//! rolling FPS over the last `FPS_WINDOW` frames.

use crate::consts::MIN_TICK_MS;

/// Frames averaged for the FPS readout
pub const FPS_WINDOW: usize = 60;

#[derive(Debug, Clone)]
pub struct FrameClock {
    last_time: Option<f64>,
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    frames_seen: usize,
    fps: u32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_time: None,
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            frames_seen: 0,
            fps: 0,
        }
    }

    /// Record a frame at `time_ms` and return the delta since the previous
    /// one. The first frame reports `MIN_TICK_MS`, which MinTick counts as
    /// fast and Smidge as slow. Timestamps that run backwards give a zero
    /// delta.
    pub fn frame(&mut self, time_ms: f64) -> f64 {
        let delta = match self.last_time {
            Some(last) => (time_ms - last).max(0.0),
            None => MIN_TICK_MS,
        };
        self.last_time = Some(time_ms);

        self.frame_times[self.frame_index] = time_ms;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;
        self.frames_seen = (self.frames_seen + 1).min(FPS_WINDOW);

        // Oldest sample sits where the next write will land once the window is full
        if self.frames_seen == FPS_WINDOW {
            let oldest = self.frame_times[self.frame_index];
            let elapsed = time_ms - oldest;
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW - 1) as f64 * 1000.0 / elapsed).round() as u32;
            }
        }

        delta
    }

    /// Frames per second over the last window (0 until the window fills)
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Forget the previous timestamp, e.g. after the tab was hidden
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{BounceParams, BounceSprite, GenState, PopulationPolicy, SimConfig, World};

    #[test]
    fn test_first_frame_is_threshold() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.frame(5000.0), MIN_TICK_MS);
        assert_eq!(clock.frame(5016.0), 16.0);
    }

    #[test]
    fn test_first_frame_grows_min_tick_run() {
        let config = SimConfig::<BounceSprite>::new(PopulationPolicy::MinTick, BounceParams::unit(5.0));
        let world = World::with_rng(GenState::from_seed(1), 1000, config);
        let mut clock = FrameClock::new();
        let world = world.tick(clock.frame(0.0));
        assert_eq!(world.len(), 1010);
    }

    #[test]
    fn test_backwards_time_is_zero() {
        let mut clock = FrameClock::new();
        clock.frame(100.0);
        assert_eq!(clock.frame(90.0), 0.0);
    }

    #[test]
    fn test_fps_steady_60() {
        let mut clock = FrameClock::new();
        for i in 0..120 {
            clock.frame(i as f64 * 1000.0 / 60.0);
        }
        assert_eq!(clock.fps(), 60);
    }

    #[test]
    fn test_fps_zero_until_window_full() {
        let mut clock = FrameClock::new();
        for i in 0..FPS_WINDOW - 1 {
            clock.frame(i as f64 * 20.0);
        }
        assert_eq!(clock.fps(), 0);
        clock.frame((FPS_WINDOW - 1) as f64 * 20.0);
        assert_eq!(clock.fps(), 50);
    }

    #[test]
    fn test_reset() {
        let mut clock = FrameClock::new();
        clock.frame(10.0);
        clock.frame(20.0);
        clock.reset();
        assert_eq!(clock.frame(1000.0), MIN_TICK_MS);
    }
}
