//! Animated donut chart of quiz correctness.
//!
//! Each frame the chart feeds the driver's current fractions through
//! [`RingGeometry::compute`] and emits, in draw order: background ring,
//! optional shadow, correct arc, wrong arc, optional percentage label.
//!
//! The label shows `round(correct_fraction × 100)` using
//! round-half-away-from-zero and follows the animation, so it counts up with
//! the ring rather than showing the final value immediately. Fractions stay in
//! `f64` until the ring geometry is built, so exact ties such as 21/40 read
//! `53%`.

use std::time::Duration;

use quizring_core::{QuizError, QuizOutcome, QuizResult};

use crate::animation::{AnimationFrame, AnimationPhase, AnimationTargets, ProgressAnimation};
use crate::geometry::{RingGeometry, RingMetrics, SHADOW_ALPHA};
use crate::render::{RenderCommand, TextAlign};
use crate::style::ChartStyle;
use crate::widget::core::{Widget, WidgetFlags, WidgetId, WidgetState};

/// Distance from `.5` below which a scaled percentage counts as a tie.
///
/// A ratio of two `u32` counts is either exactly on a half or at least
/// `1 / (2 * u32::MAX)` away from one, far above `f64` rounding noise.
const TIE_TOLERANCE: f64 = 1e-12;

/// Integer percentage shown for a fraction, half away from zero.
///
/// Out-of-range input is clamped into `[0, 1]`; NaN reads as 0.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn percent_label(fraction: f64) -> u32 {
    let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
    let scaled = fraction * 100.0;
    let whole = scaled.floor();
    let rounded = if scaled - whole >= 0.5 - TIE_TOLERANCE { whole + 1.0 } else { whole };
    rounded.min(100.0) as u32
}

/// Every visual input of one painted frame.
///
/// Two equal snapshots produce identical render output.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSnapshot {
    /// Fractions being drawn.
    pub frame: AnimationFrame,
    /// Style being drawn with.
    pub style: ChartStyle,
    /// Visibility at paint time.
    pub visible: bool,
}

/// The animated progress ring.
#[derive(Debug)]
pub struct ProgressChart {
    state: WidgetState,
    style: ChartStyle,
    targets: AnimationTargets,
    animation: ProgressAnimation,
    frame: AnimationFrame,
    last_painted: Option<ChartSnapshot>,
}

impl ProgressChart {
    /// Creates a chart for `result`. Nothing moves until [`start`](Self::start).
    #[must_use]
    pub fn new(id: WidgetId, result: &QuizResult, style: ChartStyle) -> Self {
        Self::with_targets(id, AnimationTargets::from_result(result), style)
    }

    /// Creates a chart for explicit targets.
    #[must_use]
    pub fn with_targets(id: WidgetId, targets: AnimationTargets, style: ChartStyle) -> Self {
        let animation = ProgressAnimation::new(style.easing);
        Self {
            state: WidgetState::new(id),
            style,
            targets,
            animation,
            frame: AnimationFrame::ZERO,
            last_painted: None,
        }
    }

    /// Starts the fill-in animation. Calling it again while running is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`QuizError::PreconditionViolation`] once the chart was disposed.
    pub fn start(&mut self) -> QuizOutcome<()> {
        match self.animation.phase() {
            AnimationPhase::Uninitialized => {
                self.animation.start(self.targets, self.style.animation_duration())?;
                self.state.mark_dirty();
                Ok(())
            }
            AnimationPhase::Animating => Ok(()),
            AnimationPhase::Disposed => Err(QuizError::PreconditionViolation(
                "chart was disposed".into(),
            )),
        }
    }

    /// Tears the animation down; the chart keeps showing its last frame.
    pub fn dispose(&mut self) {
        self.animation.dispose();
        self.state.flags.insert(WidgetFlags::DISPOSED);
    }

    /// Replaces the style. The animation keeps its curve and duration.
    pub fn set_style(&mut self, style: ChartStyle) {
        if style != self.style {
            self.style = style;
            self.state.mark_dirty();
        }
    }

    /// Shows or hides the chart.
    pub fn set_visible(&mut self, visible: bool) {
        self.state.flags.set(WidgetFlags::VISIBLE, visible);
        self.refresh_dirty();
    }

    /// Current style.
    #[must_use]
    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    /// Targets the animation runs towards.
    #[must_use]
    pub const fn targets(&self) -> AnimationTargets {
        self.targets
    }

    /// Fractions currently displayed.
    #[must_use]
    pub const fn frame(&self) -> AnimationFrame {
        self.frame
    }

    /// The animation driver.
    #[must_use]
    pub const fn animation(&self) -> &ProgressAnimation {
        &self.animation
    }

    /// True once the animation has landed on its targets.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        self.animation.is_complete()
    }

    /// Ring geometry for the current frame.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn geometry(&self) -> RingGeometry {
        RingGeometry::compute(
            self.frame.correct_fraction as f32,
            self.frame.wrong_fraction as f32,
            &RingMetrics::for_style(&self.style),
        )
    }

    /// Center label for the current frame, e.g. `"75%"`.
    #[must_use]
    pub fn label(&self) -> Option<String> {
        self.style
            .show_label
            .then(|| format!("{}%", percent_label(self.frame.correct_fraction)))
    }

    /// Snapshot of every visual input right now.
    #[must_use]
    pub fn snapshot(&self) -> ChartSnapshot {
        ChartSnapshot {
            frame: self.frame,
            style: self.style.clone(),
            visible: self.state.is_visible(),
        }
    }

    /// True when painting now would differ from the last paint.
    #[must_use]
    pub fn needs_render(&self) -> bool {
        self.last_painted.as_ref() != Some(&self.snapshot())
    }

    /// Renders only if something changed since the last paint.
    ///
    /// Returns true when commands were emitted.
    pub fn paint(&mut self, commands: &mut Vec<RenderCommand>) -> bool {
        let snapshot = self.snapshot();
        if self.last_painted.as_ref() == Some(&snapshot) {
            self.state.mark_clean();
            return false;
        }
        self.render(commands);
        self.last_painted = Some(snapshot);
        self.state.mark_clean();
        true
    }

    /// Records the current state as painted by a parent that rendered the
    /// chart as part of a larger frame.
    pub fn mark_painted(&mut self) {
        self.last_painted = Some(self.snapshot());
        self.state.mark_clean();
    }

    fn refresh_dirty(&mut self) {
        let dirty = self.needs_render();
        self.state.flags.set(WidgetFlags::DIRTY, dirty);
    }
}

impl Widget for ProgressChart {
    fn state(&self) -> &WidgetState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut WidgetState {
        &mut self.state
    }

    fn tick(&mut self, elapsed: Duration) -> bool {
        if let Some(frame) = self.animation.on_tick(elapsed) {
            self.frame = frame;
        }
        self.refresh_dirty();
        self.state.is_dirty()
    }

    fn render(&self, commands: &mut Vec<RenderCommand>) {
        if !self.state.is_visible() {
            return;
        }

        let style = &self.style;
        let ring = self.geometry();

        commands.push(RenderCommand::Ring {
            center: ring.center,
            radius: ring.radius,
            stroke_width: ring.background_stroke_width,
            color: style.background_color,
        });

        if let Some(shadow) = ring.shadow {
            commands.push(RenderCommand::Arc {
                center: ring.center,
                radius: ring.radius,
                span: shadow.span,
                stroke_width: shadow.stroke_width,
                color: style.correct_color.with_alpha(SHADOW_ALPHA),
                cap: ring.cap,
                blur_radius: Some(shadow.blur_radius),
            });
        }

        for (span, color) in [
            (ring.correct, style.correct_color),
            (ring.wrong, style.wrong_color),
        ] {
            if let Some(span) = span {
                commands.push(RenderCommand::Arc {
                    center: ring.center,
                    radius: ring.radius,
                    span,
                    stroke_width: ring.stroke_width,
                    color,
                    cap: ring.cap,
                    blur_radius: None,
                });
            }
        }

        if let Some(text) = self.label() {
            commands.push(RenderCommand::Text {
                text,
                position: ring.center,
                align: TextAlign::Center,
                style: style.label,
            });
        }
    }

    fn preferred_size(&self) -> (f32, f32) {
        (self.style.size, self.style.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;
    use pretty_assertions::assert_eq;

    fn chart(correct: i64, total: i64) -> ProgressChart {
        let result = QuizResult::new(correct, total, 30, "Test").unwrap();
        ProgressChart::new(WidgetId::new(1), &result, ChartStyle::default())
    }

    fn settle(chart: &mut ProgressChart) {
        chart.start().unwrap();
        chart.tick(chart.style().animation_duration());
        assert!(chart.is_settled());
    }

    #[test]
    fn test_percent_label_rounds_half_away_from_zero() {
        assert_eq!(percent_label(0.0), 0);
        assert_eq!(percent_label(0.125), 13);
        assert_eq!(percent_label(0.375), 38);
        assert_eq!(percent_label(0.625), 63);
        assert_eq!(percent_label(1.0), 100);
        assert_eq!(percent_label(1.7), 100);
        assert_eq!(percent_label(f64::NAN), 0);
    }

    #[test]
    fn test_percent_label_keeps_decimal_ties() {
        // Neither 0.525 nor 0.145 is exact in binary; both are true halves.
        assert_eq!(percent_label(21.0 / 40.0), 53);
        assert_eq!(percent_label(53.0 / 200.0), 27);
        assert_eq!(percent_label(29.0 / 200.0), 15);
        assert_eq!(percent_label(0.524), 52);
        assert_eq!(percent_label(1.0 / 3.0), 33);
        assert_eq!(percent_label(2.0 / 3.0), 67);
    }

    #[test]
    fn test_settled_label_on_decimal_tie() {
        let mut half = chart(21, 40);
        settle(&mut half);
        assert_eq!(half.label().as_deref(), Some("53%"));

        let mut below_binary = chart(117, 200);
        settle(&mut below_binary);
        assert_eq!(below_binary.label().as_deref(), Some("59%"));
    }

    #[test]
    fn test_draw_order_and_colors() {
        let mut chart = chart(7, 10);
        settle(&mut chart);

        let mut commands = Vec::new();
        chart.render(&mut commands);

        assert_eq!(commands.len(), 4);
        assert!(matches!(commands[0], RenderCommand::Ring { color, .. } if color == Color::TRACK_GREY));
        assert!(matches!(commands[1], RenderCommand::Arc { color, blur_radius: None, .. } if color == Color::CORRECT_GREEN));
        assert!(matches!(commands[2], RenderCommand::Arc { color, .. } if color == Color::WRONG_RED));
        assert_eq!(commands[3].text(), Some("70%"));
    }

    #[test]
    fn test_wide_stroke_adds_shadow_before_correct_arc() {
        let result = QuizResult::new(1, 2, 0, "x").unwrap();
        let style = ChartStyle::default().with_stroke_widths(20.0, 20.0);
        let mut chart = ProgressChart::new(WidgetId::new(2), &result, style);
        settle(&mut chart);

        let mut commands = Vec::new();
        chart.render(&mut commands);
        assert!(matches!(
            commands[1],
            RenderCommand::Arc { blur_radius: Some(_), stroke_width, .. } if stroke_width == 20.0
        ));
        assert!(matches!(commands[2], RenderCommand::Arc { blur_radius: None, .. }));
    }

    #[test]
    fn test_unstarted_chart_draws_only_track_and_zero_label() {
        let chart = chart(3, 4);
        let mut commands = Vec::new();
        chart.render(&mut commands);

        assert_eq!(commands.len(), 2);
        assert!(matches!(commands[0], RenderCommand::Ring { .. }));
        assert_eq!(commands[1].text(), Some("0%"));
    }

    #[test]
    fn test_label_follows_animation() {
        let mut chart = chart(10, 10);
        chart.start().unwrap();
        chart.tick(Duration::from_millis(750));
        let halfway = chart.label().unwrap();
        assert_ne!(halfway, "0%");
        assert_ne!(halfway, "100%");

        chart.tick(Duration::from_secs(10));
        assert_eq!(chart.label().unwrap(), "100%");
    }

    #[test]
    fn test_identical_inputs_skip_repaint() {
        let mut chart = chart(5, 10);
        settle(&mut chart);

        let mut commands = Vec::new();
        assert!(chart.paint(&mut commands));
        let painted = commands.len();

        assert!(!chart.tick(Duration::from_secs(20)));
        assert!(!chart.paint(&mut commands));
        assert_eq!(commands.len(), painted);

        let mut style = chart.style().clone();
        style.wrong_color = Color::BLACK;
        chart.set_style(style);
        assert!(chart.needs_render());
        assert!(chart.paint(&mut commands));
    }

    #[test]
    fn test_hidden_chart_draws_nothing() {
        let mut chart = chart(5, 10);
        chart.set_visible(false);
        let mut commands = Vec::new();
        chart.render(&mut commands);
        assert!(commands.is_empty());
    }

    #[test]
    fn test_dispose_freezes_chart() {
        let mut chart = chart(5, 10);
        chart.start().unwrap();
        chart.tick(Duration::from_millis(300));
        let frozen = chart.frame();

        chart.dispose();
        chart.tick(Duration::from_secs(5));
        assert_eq!(chart.frame(), frozen);
        assert!(chart.start().is_err());
        assert!(chart.state().is_disposed());
    }
}
