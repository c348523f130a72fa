//! Fixed-duration eased animation
//!
//! Camera moves run for a known duration so the canvas can be told how long
//! a transition lasts. Values are polled each frame:
//!
//! ```ignore
//! let mut zoom = TweenF32::new(1.0);
//! zoom.start(2.0, 1.0);   // animate to 2.0 over one second
//!
//! // Each frame:
//! zoom.tick(dt);
//! let current = zoom.get();
//! ```
//!
//! Starting a new tween while one is running restarts from the current
//! interpolated value. Nothing is queued.

use egui::Pos2;

// =============================================================================
// EASING FUNCTIONS
// =============================================================================

/// Cubic ease-in-out: slow start, fast middle, slow finish
#[inline]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

// =============================================================================
// TWEEN F32
// =============================================================================

/// Animated f32 moving from a start value to a target over a fixed duration
#[derive(Debug, Clone)]
pub struct TweenF32 {
    from: f32,
    target: f32,
    /// Seconds since the tween started
    elapsed: f32,
    /// Total seconds; 0 means settled
    duration: f32,
}

impl TweenF32 {
    pub fn new(initial: f32) -> Self {
        Self {
            from: initial,
            target: initial,
            elapsed: 0.0,
            duration: 0.0,
        }
    }

    /// Animate from the current value to `target` over `duration` seconds
    pub fn start(&mut self, target: f32, duration: f32) {
        self.from = self.get();
        self.target = target;
        self.elapsed = 0.0;
        self.duration = duration.max(0.0);
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Jump immediately to value (no animation)
    pub fn set_immediate(&mut self, value: f32) {
        self.from = value;
        self.target = value;
        self.elapsed = 0.0;
        self.duration = 0.0;
    }

    /// Advance by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        if !self.is_animating() {
            return;
        }
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        if self.elapsed >= self.duration {
            self.set_immediate(self.target);
        }
    }

    /// 0.0 at start, 1.0 when settled
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    pub fn get(&self) -> f32 {
        lerp(self.from, self.target, ease_in_out_cubic(self.progress()))
    }

    pub fn is_animating(&self) -> bool {
        self.duration > 0.0 && self.elapsed < self.duration
    }
}

// =============================================================================
// TWEEN POS2
// =============================================================================

/// Animated 2D position
#[derive(Debug, Clone)]
pub struct TweenPos2 {
    pub x: TweenF32,
    pub y: TweenF32,
}

impl TweenPos2 {
    pub fn new(pos: Pos2) -> Self {
        Self {
            x: TweenF32::new(pos.x),
            y: TweenF32::new(pos.y),
        }
    }

    pub fn start(&mut self, target: Pos2, duration: f32) {
        self.x.start(target.x, duration);
        self.y.start(target.y, duration);
    }

    pub fn target(&self) -> Pos2 {
        Pos2::new(self.x.target(), self.y.target())
    }

    pub fn set_immediate(&mut self, pos: Pos2) {
        self.x.set_immediate(pos.x);
        self.y.set_immediate(pos.y);
    }

    pub fn tick(&mut self, dt: f32) {
        self.x.tick(dt);
        self.y.tick(dt);
    }

    pub fn get(&self) -> Pos2 {
        Pos2::new(self.x.get(), self.y.get())
    }

    pub fn is_animating(&self) -> bool {
        self.x.is_animating() || self.y.is_animating()
    }
}

// =============================================================================
// TESTS
// =============================================================================
