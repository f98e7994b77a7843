//! Easing and tweens for the toolbar slide.

/// Quadratic ease-in-out (slow start and end). `t` is clamped to `[0.0, 1.0]`.
pub fn ease_in_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

/// A running ease-in-out interpolation between two values.
#[derive(Debug, Clone)]
pub struct Tween {
    start: f32,
    end: f32,
    duration_ms: u32,
    elapsed_ms: u32,
}

impl Tween {
    pub fn new(start: f32, end: f32, duration_ms: u32) -> Self {
        Self {
            start,
            end,
            duration_ms,
            elapsed_ms: 0,
        }
    }

    /// Advance by `dt_ms` and return the current interpolated value.
    pub fn tick(&mut self, dt_ms: u32) -> f32 {
        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms).min(self.duration_ms);
        self.value()
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }

    /// Current value without advancing time.
    pub fn value(&self) -> f32 {
        let t = if self.duration_ms > 0 {
            self.elapsed_ms as f32 / self.duration_ms as f32
        } else {
            1.0
        };
        self.start + (self.end - self.start) * ease_in_out_quad(t)
    }
}
