//! Arc geometry of the two-segment progress ring.
//!
//! Angles are radians, `0` at 3 o'clock, increasing clockwise (screen space,
//! y down). The correct segment starts at 12 o'clock (`-π/2`) and the wrong
//! segment continues from where it ends.
//!
//! ```text
//!              -π/2
//!          ┌────●────┐
//!        correct   wrong
//!          │  ring   │
//!          └─────────┘
//! ```
//!
//! [`RingGeometry::compute`] is a pure function of its inputs: identical
//! inputs always give an identical (and `==`) result.

use std::f32::consts::{FRAC_PI_2, TAU};

use quizring_core::{QuizError, QuizOutcome};

use crate::layout::Point;
use crate::style::ChartStyle;

/// Angle of 12 o'clock.
pub const START_ANGLE: f32 = -FRAC_PI_2;

/// Opacity of the shadow drawn under a wide correct segment.
pub const SHADOW_ALPHA: f32 = 0.3;

/// Blur radius of the shadow drawn under a wide correct segment.
pub const SHADOW_BLUR_RADIUS: f32 = 4.0;

/// How stroke ends are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrokeCap {
    /// Flat end exactly at the arc boundary.
    Butt,
    /// Semicircular end; adjacent segments meet without a gap.
    #[default]
    Round,
}

/// An arc on the ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSpan {
    /// Start angle in radians.
    pub start_angle: f32,
    /// Clockwise extent in radians, always positive.
    pub sweep_angle: f32,
}

impl ArcSpan {
    /// Angle where the arc ends.
    #[must_use]
    pub fn end_angle(&self) -> f32 {
        self.start_angle + self.sweep_angle
    }

    /// Point on a circle at fraction `t` (0 = start, 1 = end) of the arc.
    #[must_use]
    pub fn point_at(&self, center: Point, radius: f32, t: f32) -> Point {
        let angle = self.start_angle + self.sweep_angle * t.clamp(0.0, 1.0);
        center.translate(radius * angle.cos(), radius * angle.sin())
    }
}

/// Segment fractions after clamping.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SegmentFractions {
    /// Correct share in `[0, 1]`.
    pub correct: f32,
    /// Wrong share in `[0, 1 - correct]`.
    pub wrong: f32,
}

impl SegmentFractions {
    /// Clamps both fractions to `[0, 1]`, then trims `wrong` so the pair never
    /// exceeds a full turn. `correct` is never reduced.
    #[must_use]
    pub fn clamped(correct: f32, wrong: f32) -> Self {
        let correct = unit(correct);
        let mut wrong = unit(wrong);
        if correct + wrong > 1.0 {
            wrong = 1.0 - correct;
        }
        Self { correct, wrong }
    }

    /// True when both inputs already satisfy the invariants `clamped` enforces.
    #[must_use]
    pub fn in_range(correct: f32, wrong: f32) -> bool {
        (0.0..=1.0).contains(&correct) && (0.0..=1.0).contains(&wrong) && correct + wrong <= 1.0
    }
}

/// Maps NaN to 0 and clamps to `[0, 1]`.
fn unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Sweep for a fraction, `None` when nothing should be drawn.
fn span(start_angle: f32, fraction: f32) -> Option<ArcSpan> {
    (fraction > 0.0).then(|| ArcSpan {
        start_angle,
        sweep_angle: TAU * fraction,
    })
}

/// Placement and stroke parameters of the ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingMetrics {
    /// Ring center, relative to the chart's top-left corner.
    pub center: Point,
    /// Radius of the stroke centerline.
    pub radius: f32,
    /// Stroke width of both segments.
    pub stroke_width: f32,
    /// Stroke width of the background ring.
    pub background_stroke_width: f32,
    /// Stroke widths above this add a shadow under the correct segment.
    pub shadow_threshold: f32,
}

impl RingMetrics {
    /// Fits the ring into a `size × size` box so that no stroke leaves it.
    #[must_use]
    pub fn for_style(style: &ChartStyle) -> Self {
        let half = style.size * 0.5;
        let widest = style.stroke_width.max(style.background_stroke_width);
        Self {
            center: Point::new(half, half),
            radius: ((style.size - widest) * 0.5).max(0.0),
            stroke_width: style.stroke_width,
            background_stroke_width: style.background_stroke_width,
            shadow_threshold: style.shadow_threshold,
        }
    }
}

/// Shadow arc drawn beneath the correct segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowArc {
    /// Same span as the correct segment.
    pub span: ArcSpan,
    /// Same stroke width as the correct segment.
    pub stroke_width: f32,
    /// Fixed opacity, [`SHADOW_ALPHA`].
    pub alpha: f32,
    /// Fixed blur radius, [`SHADOW_BLUR_RADIUS`].
    pub blur_radius: f32,
}

/// Everything needed to draw one frame of the ring, minus colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingGeometry {
    /// Fractions the arcs were derived from.
    pub fractions: SegmentFractions,
    /// Ring center.
    pub center: Point,
    /// Radius of the stroke centerline.
    pub radius: f32,
    /// Stroke width of the full background ring.
    pub background_stroke_width: f32,
    /// Stroke width of both segments.
    pub stroke_width: f32,
    /// Cap used for every stroke.
    pub cap: StrokeCap,
    /// Optional shadow under the correct segment.
    pub shadow: Option<ShadowArc>,
    /// Correct segment, `None` for a zero fraction.
    pub correct: Option<ArcSpan>,
    /// Wrong segment, `None` for a zero fraction.
    pub wrong: Option<ArcSpan>,
}

impl RingGeometry {
    /// Computes the ring for two (possibly out-of-range) fractions.
    ///
    /// Out-of-range input is clamped, see [`SegmentFractions::clamped`].
    #[must_use]
    pub fn compute(correct: f32, wrong: f32, metrics: &RingMetrics) -> Self {
        if !(0.0..=1.0).contains(&correct) || !(0.0..=1.0).contains(&wrong) {
            tracing::warn!(correct, wrong, "ring fractions out of range, clamping");
        }
        let fractions = SegmentFractions::clamped(correct, wrong);

        let correct_span = span(START_ANGLE, fractions.correct);
        let wrong_start = START_ANGLE + correct_span.map_or(0.0, |s| s.sweep_angle);
        let wrong_span = span(wrong_start, fractions.wrong);

        let shadow = correct_span
            .filter(|_| metrics.stroke_width > metrics.shadow_threshold)
            .map(|span| ShadowArc {
                span,
                stroke_width: metrics.stroke_width,
                alpha: SHADOW_ALPHA,
                blur_radius: SHADOW_BLUR_RADIUS,
            });

        Self {
            fractions,
            center: metrics.center,
            radius: metrics.radius,
            background_stroke_width: metrics.background_stroke_width,
            stroke_width: metrics.stroke_width,
            cap: StrokeCap::Round,
            shadow,
            correct: correct_span,
            wrong: wrong_span,
        }
    }

    /// Strict variant of [`compute`](Self::compute) for callers that have
    /// already normalized their input.
    ///
    /// # Errors
    ///
    /// Returns [`QuizError::PreconditionViolation`] when either fraction is
    /// outside `[0, 1]` or not finite, or when they sum past a full turn.
    pub fn try_compute(correct: f32, wrong: f32, metrics: &RingMetrics) -> QuizOutcome<Self> {
        if !SegmentFractions::in_range(correct, wrong) {
            return Err(QuizError::PreconditionViolation(format!(
                "ring fractions must lie in [0, 1] and sum to at most 1, got correct={correct} wrong={wrong}"
            )));
        }
        Ok(Self::compute(correct, wrong, metrics))
    }

    /// Combined sweep of both segments.
    #[must_use]
    pub fn total_sweep(&self) -> f32 {
        self.correct.map_or(0.0, |s| s.sweep_angle) + self.wrong.map_or(0.0, |s| s.sweep_angle)
    }
}
