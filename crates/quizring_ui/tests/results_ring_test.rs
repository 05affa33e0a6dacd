//! End-to-end tests: quiz result in, settled ring and results screen out.

use std::cell::RefCell;
use std::f32::consts::{FRAC_PI_2, TAU};
use std::rc::Rc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use quizring_core::{QuizError, QuizResult};
use quizring_ui::animation::AnimationPhase;
use quizring_ui::geometry::START_ANGLE;
use quizring_ui::{
    parse_results_config, ChartStyle, Easing, ProgressAnimation, ProgressChart, RenderCommand,
    ResultsView, ResultsViewConfig, RingGeometry, RingMetrics, Widget, WidgetId,
};

const EPS: f32 = 1e-4;
const FRAME: Duration = Duration::from_micros(16_667);

fn settled_chart(correct: i64, total: i64) -> ProgressChart {
    let result = QuizResult::new(correct, total, 60, "Math").unwrap();
    let mut chart = ProgressChart::new(WidgetId::new(7), &result, ChartStyle::default());
    chart.start().unwrap();
    chart.tick(Duration::from_secs(10));
    chart
}

fn arcs(commands: &[RenderCommand]) -> Vec<(f32, f32)> {
    commands
        .iter()
        .filter_map(|c| match c {
            RenderCommand::Arc {
                span, blur_radius: None, ..
            } => Some((span.start_angle, span.sweep_angle)),
            _ => None,
        })
        .collect()
}

#[test]
fn test_settled_labels() {
    let cases = [
        (5, 10, "50%"),
        (8, 10, "80%"),
        (0, 0, "0%"),
        (9, 12, "75%"),
        (21, 40, "53%"),
        (53, 200, "27%"),
        (59, 200, "30%"),
        (105, 200, "53%"),
    ];
    for (correct, total, label) in cases {
        let chart = settled_chart(correct, total);
        assert!(chart.is_settled(), "{correct}/{total}");
        assert_eq!(chart.label().as_deref(), Some(label), "{correct}/{total}");
    }
}

#[test]
fn test_settled_arcs_cover_the_ring() {
    let chart = settled_chart(9, 12);
    let mut commands = Vec::new();
    chart.render(&mut commands);

    let arcs = arcs(&commands);
    assert_eq!(arcs.len(), 2);
    let (correct_start, correct_sweep) = arcs[0];
    let (wrong_start, wrong_sweep) = arcs[1];
    assert!((correct_start + FRAC_PI_2).abs() < EPS);
    assert!((correct_sweep - 0.75 * TAU).abs() < EPS);
    assert!((wrong_start - (correct_start + correct_sweep)).abs() < EPS);
    assert!((correct_sweep + wrong_sweep - TAU).abs() < EPS);
}

#[test]
fn test_empty_quiz_draws_only_the_wrong_segment() {
    let chart = settled_chart(0, 0);
    let mut commands = Vec::new();
    chart.render(&mut commands);

    let arcs = arcs(&commands);
    assert_eq!(arcs.len(), 1);
    assert!((arcs[0].0 - START_ANGLE).abs() < EPS);
    assert!((arcs[0].1 - TAU).abs() < EPS);
}

#[test]
fn test_label_counts_up_monotonically() {
    let result = QuizResult::new(8, 10, 60, "Math").unwrap();
    let mut chart = ProgressChart::new(WidgetId::new(1), &result, ChartStyle::default());
    chart.start().unwrap();

    let mut labels = Vec::new();
    let mut elapsed = Duration::ZERO;
    while !chart.is_settled() {
        chart.tick(elapsed);
        let text = chart.label().unwrap();
        labels.push(text.trim_end_matches('%').parse::<u32>().unwrap());
        elapsed += FRAME;
    }

    assert_eq!(labels.first(), Some(&0));
    assert_eq!(labels.last(), Some(&80));
    assert!(labels.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_segments_move_in_lockstep() {
    let mut animation = ProgressAnimation::new(Easing::EaseInOut);
    let targets = quizring_ui::AnimationTargets::from_correct(0.7);
    animation.start(targets, Duration::from_millis(1500)).unwrap();

    for ms in (0..=1500).step_by(50) {
        let frame = animation.on_tick(Duration::from_millis(ms)).unwrap();
        let metrics = RingMetrics::for_style(&ChartStyle::default());
        #[allow(clippy::cast_possible_truncation)]
        let ring = RingGeometry::compute(
            frame.correct_fraction as f32,
            frame.wrong_fraction as f32,
            &metrics,
        );
        let expected = TAU * frame.progress;
        assert!((ring.total_sweep() - expected).abs() < EPS, "at {ms}ms");
    }
    assert_eq!(animation.phase(), AnimationPhase::Animating);
    assert!(animation.is_complete());
}

#[test]
fn test_dispose_freezes_the_view() {
    let result = QuizResult::new(3, 4, 30, "Art").unwrap();
    let mut view = ResultsView::new(WidgetId::new(1), result, ResultsViewConfig::default());
    view.start().unwrap();
    view.tick(Duration::from_millis(300));
    let frozen = view.chart().frame();

    view.dispose();
    view.tick(Duration::from_secs(5));
    assert_eq!(view.chart().frame(), frozen);
    assert!(matches!(view.start(), Err(QuizError::PreconditionViolation(_))));
}

#[test]
fn test_results_view_end_to_end() {
    let config = parse_results_config(
        r#"
        title = "Weekly Check"
        show_legend = false

        [chart]
        stroke_width = 20.0
        easing = "linear"
        animation_duration_ms = 100
        "#,
    )
    .unwrap();

    let opened = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&opened);
    let result = QuizResult::new(8, 10, 125, "Math").unwrap();
    let mut view = ResultsView::new(WidgetId::new(1), result, config)
        .on_view_answers(move || sink.borrow_mut().push("answers"));
    view.start().unwrap();

    let mut commands = Vec::new();
    view.tick(Duration::from_millis(200));
    assert!(view.paint(&mut commands));

    let texts: Vec<&str> = commands.iter().filter_map(RenderCommand::text).collect();
    for expected in ["Weekly Check", "Math", "80%", "Total Questions", "10", "Correct", "8", "Incorrect", "2", "Time", "02:05", "View Answers"] {
        assert!(texts.contains(&expected), "missing {expected:?} in {texts:?}");
    }
    // Stroke above the default threshold adds a blurred shadow.
    assert!(commands
        .iter()
        .any(|c| matches!(c, RenderCommand::Arc { blur_radius: Some(_), .. })));

    let button = view.layout().button.unwrap();
    assert!(view.handle_tap(button.center()));
    assert_eq!(*opened.borrow(), vec!["answers"]);

    commands.clear();
    view.tick(Duration::from_millis(300));
    assert!(!view.paint(&mut commands));
    assert!(commands.is_empty());
}
