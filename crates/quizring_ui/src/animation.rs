//! Easing curves and the fill-in animation driver.
//!
//! The driver is a three-state machine (`Uninitialized → Animating →
//! Disposed`) advanced by the host: call [`ProgressAnimation::on_tick`] once
//! per frame with the time elapsed since the animation started. Between ticks
//! it holds only its targets, duration and the last elapsed value.

use std::fmt;
use std::time::Duration;

use quizring_core::{QuizError, QuizOutcome, QuizResult};
use serde::Deserialize;

/// Easing function type.
///
/// Every curve clamps its input to `[0, 1]` and maps `1 → 1`; all but
/// [`Easing::Instant`] also map `0 → 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Linear interpolation.
    Linear,
    /// Standard ease-in-out, cubic bezier `(0.42, 0, 0.58, 1)`.
    #[default]
    EaseInOut,
    /// Polynomial cubic ease-in-out.
    CubicInOut,
    /// Exponential ease-out (fast start, long tail).
    ExponentialOut,
    /// Exponential ease-in (accelerating).
    ExponentialIn,
    /// Exponential ease-in-out.
    ExponentialInOut,
    /// Jumps straight to the end value.
    Instant,
}

impl Easing {
    /// Applies the easing function to a t value (0-1).
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        if t <= 0.0 {
            return if self == Self::Instant { 1.0 } else { 0.0 };
        }
        if t >= 1.0 {
            return 1.0;
        }

        match self {
            Self::Linear => t,
            Self::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
            Self::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
            Self::ExponentialOut => 1.0 - 2.0_f32.powf(-10.0 * t),
            Self::ExponentialIn => 2.0_f32.powf(10.0 * (t - 1.0)),
            Self::ExponentialInOut => {
                if t < 0.5 {
                    2.0_f32.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2.0_f32.powf(-20.0 * t + 10.0)) / 2.0
                }
            }
            Self::Instant => 1.0,
        }
    }
}

/// One coordinate of a cubic bezier from `(0,0)` to `(1,1)`.
fn bezier_axis(p1: f32, p2: f32, s: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * p1 * inv * inv * s + 3.0 * p2 * inv * s * s + s * s * s
}

/// Evaluates a CSS-style cubic bezier timing curve at `t`.
///
/// Fixed-iteration bisection on x keeps the result monotonic in `t`.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, t: f32) -> f32 {
    const ITERATIONS: u32 = 30;

    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    for _ in 0..ITERATIONS {
        let mid = (lo + hi) * 0.5;
        if bezier_axis(x1, x2, mid) < t {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    bezier_axis(y1, y2, (lo + hi) * 0.5)
}

/// End values of the two ring segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationTargets {
    /// Final correct fraction.
    pub correct: f64,
    /// Final wrong fraction, `1 - correct`.
    pub wrong: f64,
}

impl AnimationTargets {
    /// Targets for a correct share; the wrong share is its complement.
    ///
    /// Out-of-range or NaN input is clamped into `[0, 1]`.
    #[must_use]
    pub fn from_correct(correct: f64) -> Self {
        let correct = if correct.is_nan() { 0.0 } else { correct.clamp(0.0, 1.0) };
        Self { correct, wrong: 1.0 - correct }
    }

    /// Targets for a finished quiz, at the result's full precision.
    #[must_use]
    pub fn from_result(result: &QuizResult) -> Self {
        Self::from_correct(result.percentage_correct())
    }
}

/// One tick of output.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnimationFrame {
    /// Eased progress this frame was derived from.
    pub progress: f32,
    /// Animated correct fraction.
    pub correct_fraction: f64,
    /// Animated wrong fraction.
    pub wrong_fraction: f64,
}

impl AnimationFrame {
    /// The frame before anything has been filled in.
    pub const ZERO: Self = Self {
        progress: 0.0,
        correct_fraction: 0.0,
        wrong_fraction: 0.0,
    };

    /// The settled frame for the given targets.
    #[must_use]
    pub const fn settled(targets: AnimationTargets) -> Self {
        Self {
            progress: 1.0,
            correct_fraction: targets.correct,
            wrong_fraction: targets.wrong,
        }
    }
}

/// Lifecycle phase of a [`ProgressAnimation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationPhase {
    /// Created, not started.
    Uninitialized,
    /// Started; ticks produce frames (including after completion).
    Animating,
    /// Torn down; ticks produce nothing.
    Disposed,
}

enum Phase {
    Uninitialized,
    Animating {
        targets: AnimationTargets,
        duration: Duration,
        elapsed: Duration,
        completed: bool,
    },
    Disposed,
}

/// Callback invoked with every produced frame.
pub type FrameListener = Box<dyn FnMut(&AnimationFrame)>;

/// Forward-only tween of both ring segments from zero to their targets.
///
/// Both segments share one time base and one eased progress value, so they
/// always sum to `curve(t)` and land on their targets in the same tick.
/// A driver is bound to one set of targets: to animate towards new values,
/// construct a new driver.
pub struct ProgressAnimation {
    phase: Phase,
    easing: Easing,
    listener: Option<FrameListener>,
    last_frame: Option<AnimationFrame>,
}

impl ProgressAnimation {
    /// Creates an idle driver using the given curve.
    #[must_use]
    pub fn new(easing: Easing) -> Self {
        Self {
            phase: Phase::Uninitialized,
            easing,
            listener: None,
            last_frame: None,
        }
    }

    /// Registers the frame callback, replacing any previous one.
    ///
    /// Ignored once the driver is disposed.
    pub fn on_frame(&mut self, listener: impl FnMut(&AnimationFrame) + 'static) {
        if !matches!(self.phase, Phase::Disposed) {
            self.listener = Some(Box::new(listener));
        }
    }

    /// Begins the tween.
    ///
    /// # Errors
    ///
    /// Returns [`QuizError::PreconditionViolation`] unless the driver is still
    /// uninitialized; a driver cannot be restarted.
    pub fn start(&mut self, targets: AnimationTargets, duration: Duration) -> QuizOutcome<()> {
        match self.phase {
            Phase::Uninitialized => {
                tracing::debug!(
                    correct = targets.correct,
                    wrong = targets.wrong,
                    duration = ?duration,
                    "progress animation started"
                );
                self.phase = Phase::Animating {
                    targets,
                    duration,
                    elapsed: Duration::ZERO,
                    completed: false,
                };
                Ok(())
            }
            Phase::Animating { .. } => Err(QuizError::PreconditionViolation(
                "animation already started; create a new driver for new targets".into(),
            )),
            Phase::Disposed => Err(QuizError::PreconditionViolation(
                "animation was disposed".into(),
            )),
        }
    }

    /// Advances to `elapsed` (time since start) and returns the frame.
    ///
    /// Returns `None` before [`start`](Self::start) and after
    /// [`dispose`](Self::dispose). An `elapsed` earlier than one already seen
    /// is treated as the later one, so progress never runs backwards.
    pub fn on_tick(&mut self, elapsed: Duration) -> Option<AnimationFrame> {
        let Phase::Animating {
            targets,
            duration,
            elapsed: seen,
            completed,
        } = &mut self.phase
        else {
            return None;
        };

        *seen = (*seen).max(elapsed);
        let frame = if *seen >= *duration {
            AnimationFrame::settled(*targets)
        } else {
            #[allow(clippy::cast_possible_truncation)]
            let t = (seen.as_secs_f64() / duration.as_secs_f64()) as f32;
            let eased = self.easing.apply(t);
            AnimationFrame {
                progress: eased,
                correct_fraction: f64::from(eased) * targets.correct,
                wrong_fraction: f64::from(eased) * targets.wrong,
            }
        };

        if frame.progress >= 1.0 && !*completed {
            *completed = true;
            tracing::debug!(elapsed = ?*seen, "progress animation completed");
        }
        tracing::trace!(
            progress = frame.progress,
            correct = frame.correct_fraction,
            wrong = frame.wrong_fraction,
            "animation tick"
        );

        self.last_frame = Some(frame);
        if let Some(listener) = self.listener.as_mut() {
            listener(&frame);
        }
        Some(frame)
    }

    /// Stops the animation and drops the frame listener. Idempotent.
    pub fn dispose(&mut self) {
        if matches!(self.phase, Phase::Disposed) {
            return;
        }
        self.phase = Phase::Disposed;
        self.listener = None;
        tracing::debug!("progress animation disposed");
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> AnimationPhase {
        match self.phase {
            Phase::Uninitialized => AnimationPhase::Uninitialized,
            Phase::Animating { .. } => AnimationPhase::Animating,
            Phase::Disposed => AnimationPhase::Disposed,
        }
    }

    /// True once a tick reached the end of the duration.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        matches!(self.phase, Phase::Animating { completed: true, .. })
    }

    /// Targets bound at start, if started and not disposed.
    #[must_use]
    pub const fn targets(&self) -> Option<AnimationTargets> {
        match self.phase {
            Phase::Animating { targets, .. } => Some(targets),
            _ => None,
        }
    }

    /// Most recent frame produced by [`on_tick`](Self::on_tick).
    #[must_use]
    pub const fn last_frame(&self) -> Option<AnimationFrame> {
        self.last_frame
    }

    /// Curve in use.
    #[must_use]
    pub const fn easing(&self) -> Easing {
        self.easing
    }
}

impl Default for ProgressAnimation {
    fn default() -> Self {
        Self::new(Easing::default())
    }
}

impl fmt::Debug for ProgressAnimation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressAnimation")
            .field("phase", &self.phase())
            .field("easing", &self.easing)
            .field("targets", &self.targets())
            .field("has_listener", &self.listener.is_some())
            .field("last_frame", &self.last_frame)
            .finish()
    }
}
