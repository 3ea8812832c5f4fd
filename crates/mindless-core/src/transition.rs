//! Entry and exit transitions of the splash.

use std::time::Duration;

/// CSS-style cubic Bézier timing function through (0,0) and (1,1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
}

impl CubicBezier {
    /// `ease-in-out`, the default curve of a timed tween.
    pub const EASE_IN_OUT: CubicBezier = CubicBezier::new(0.42, 0.0, 0.58, 1.0);
    /// Steep in-out curve used by the exit slide.
    pub const EXPO_IN_OUT: CubicBezier = CubicBezier::new(0.76, 0.0, 0.24, 1.0);

    /// Create a curve from its two control points.
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Map linear progress `t` in `[0, 1]` to eased progress.
    pub fn ease(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 || t == 1.0 {
            return t;
        }
        let s = self.solve_x(t);
        bezier(s, self.y1, self.y2)
    }

    /// Find the curve parameter whose x equals `x`.
    fn solve_x(&self, x: f32) -> f32 {
        // Newton first; fall back to bisection on flat slopes
        let mut s = x;
        for _ in 0..8 {
            let err = bezier(s, self.x1, self.x2) - x;
            if err.abs() < 1e-6 {
                return s;
            }
            let slope = bezier_slope(s, self.x1, self.x2);
            if slope.abs() < 1e-6 {
                break;
            }
            s -= err / slope;
        }

        let (mut lo, mut hi) = (0.0f32, 1.0f32);
        s = x;
        for _ in 0..32 {
            let v = bezier(s, self.x1, self.x2);
            if (v - x).abs() < 1e-6 {
                break;
            }
            if v < x {
                lo = s;
            } else {
                hi = s;
            }
            s = (lo + hi) / 2.0;
        }
        s
    }
}

fn bezier(s: f32, p1: f32, p2: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

fn bezier_slope(s: f32, p1: f32, p2: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

/// Where the splash is in its mount/unmount lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Fading in after mount.
    Entering,
    /// Fully shown.
    Visible,
    /// Playing the exit animation.
    Exiting,
    /// Exit finished; children should be unmounted.
    Gone,
}

/// Opacity and vertical offset of the splash over time.
#[derive(Debug, Clone)]
pub struct Transition {
    mounted_at: Duration,
    exit: Option<(Duration, f32)>,
}

impl Transition {
    /// Fade-in duration after mount.
    pub const ENTER: Duration = Duration::from_millis(500);
    /// Duration of the fade/slide exit.
    pub const EXIT: Duration = Duration::from_millis(800);
    /// Vertical travel of the exit slide in pixels (negative is up).
    pub const EXIT_OFFSET_PX: f32 = -100.0;

    /// Start the entry transition at `now`.
    pub fn new(now: Duration) -> Self {
        Self {
            mounted_at: now,
            exit: None,
        }
    }

    /// Begin the exit transition. Calling it again has no effect.
    pub fn begin_exit(&mut self, now: Duration) {
        if self.exit.is_none() {
            let from = self.enter_opacity(now);
            self.exit = Some((now, from));
        }
    }

    /// Lifecycle phase at `now`.
    pub fn presence(&self, now: Duration) -> Presence {
        match self.exit {
            Some((started, _)) if now.saturating_sub(started) >= Self::EXIT => Presence::Gone,
            Some(_) => Presence::Exiting,
            None if now.saturating_sub(self.mounted_at) < Self::ENTER => Presence::Entering,
            None => Presence::Visible,
        }
    }

    /// Layer opacity at `now`, in `[0, 1]`.
    pub fn opacity(&self, now: Duration) -> f32 {
        match self.exit {
            Some((started, from)) => from * (1.0 - self.exit_progress(started, now)),
            None => self.enter_opacity(now),
        }
    }

    /// Vertical offset in pixels at `now`.
    pub fn offset_y(&self, now: Duration) -> f32 {
        match self.exit {
            Some((started, _)) => Self::EXIT_OFFSET_PX * self.exit_progress(started, now),
            None => 0.0,
        }
    }

    fn enter_opacity(&self, now: Duration) -> f32 {
        let t = progress(now.saturating_sub(self.mounted_at), Self::ENTER);
        CubicBezier::EASE_IN_OUT.ease(t)
    }

    fn exit_progress(&self, started: Duration, now: Duration) -> f32 {
        let t = progress(now.saturating_sub(started), Self::EXIT);
        CubicBezier::EXPO_IN_OUT.ease(t)
    }
}

fn progress(elapsed: Duration, total: Duration) -> f32 {
    if total.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f32() / total.as_secs_f32()).clamp(0.0, 1.0)
}
