//! Pre-styled results screen around the progress ring.
//!
//! Top to bottom: optional header slot, title, subject, ring, legend, stat
//! rows (`Total Questions`, `Correct`, `Incorrect`, `Time`), "View Answers"
//! button, optional footer slot.

use std::fmt;
use std::time::Duration;

use quizring_core::{QuizOutcome, QuizResult};

use crate::config::ResultsViewConfig;
use crate::layout::{CrossAlign, Point, Rect, Stack};
use crate::render::{CommandBuffer, RenderCommand, TextAlign};
use crate::style::Color;
use crate::widget::chart::ProgressChart;
use crate::widget::core::{Widget, WidgetId, WidgetState};

/// Content produced by a header or footer builder.
///
/// Commands are relative to the slot's top-left corner.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotContent {
    /// Height reserved for the slot.
    pub height: f32,
    /// What to draw inside it.
    pub commands: Vec<RenderCommand>,
}

impl SlotContent {
    /// True when the slot has no height and nothing to draw. An empty slot
    /// is laid out as if no builder were set, so it costs no spacing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.height <= 0.0 && self.commands.is_empty()
    }
}

/// Builds header or footer content from the result.
pub type ContentBuilder = Box<dyn Fn(&QuizResult) -> SlotContent>;

/// One line of the stats table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatRow {
    /// Left-hand label.
    pub label: &'static str,
    /// Right-hand value.
    pub value: String,
}

/// One legend entry.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    /// Swatch color.
    pub color: Color,
    /// Text next to the swatch.
    pub label: String,
}

/// Where each block of the view sits, relative to the view's origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResultsLayout {
    /// Header slot.
    pub header: Option<Rect>,
    /// Title line.
    pub title: Rect,
    /// Subject line.
    pub subject: Rect,
    /// Progress ring.
    pub chart: Rect,
    /// Legend line.
    pub legend: Option<Rect>,
    /// Stats table.
    pub stats: Rect,
    /// Action button.
    pub button: Option<Rect>,
    /// Footer slot.
    pub footer: Option<Rect>,
    /// Total size of the view.
    pub size: (f32, f32),
}

/// The results screen.
pub struct ResultsView {
    state: WidgetState,
    result: QuizResult,
    config: ResultsViewConfig,
    chart: ProgressChart,
    header: Option<ContentBuilder>,
    footer: Option<ContentBuilder>,
    on_view_answers: Option<Box<dyn FnMut()>>,
}

impl ResultsView {
    /// Creates a view for `result`.
    #[must_use]
    pub fn new(id: WidgetId, result: QuizResult, config: ResultsViewConfig) -> Self {
        let chart = ProgressChart::new(id.child(1), &result, config.chart.clone());
        Self {
            state: WidgetState::new(id),
            result,
            config,
            chart,
            header: None,
            footer: None,
            on_view_answers: None,
        }
    }

    /// Adds content above the title.
    #[must_use]
    pub fn with_header(mut self, builder: impl Fn(&QuizResult) -> SlotContent + 'static) -> Self {
        self.header = Some(Box::new(builder));
        self
    }

    /// Adds content below the button.
    #[must_use]
    pub fn with_footer(mut self, builder: impl Fn(&QuizResult) -> SlotContent + 'static) -> Self {
        self.footer = Some(Box::new(builder));
        self
    }

    /// Sets the "View Answers" action. Without one, no button is drawn.
    #[must_use]
    pub fn on_view_answers(mut self, action: impl FnMut() + 'static) -> Self {
        self.on_view_answers = Some(Box::new(action));
        self
    }

    /// Starts the ring animation.
    ///
    /// # Errors
    ///
    /// Fails once the view was disposed, see [`ProgressChart::start`].
    pub fn start(&mut self) -> QuizOutcome<()> {
        self.chart.start()
    }

    /// Tears the ring animation down.
    pub fn dispose(&mut self) {
        self.chart.dispose();
    }

    /// The result on display.
    #[must_use]
    pub fn result(&self) -> &QuizResult {
        &self.result
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &ResultsViewConfig {
        &self.config
    }

    /// The embedded ring.
    #[must_use]
    pub fn chart(&self) -> &ProgressChart {
        &self.chart
    }

    /// Stat rows in display order.
    #[must_use]
    pub fn stat_rows(&self) -> [StatRow; 4] {
        let result = &self.result;
        [
            StatRow {
                label: "Total Questions",
                value: result.total_questions().to_string(),
            },
            StatRow {
                label: "Correct",
                value: result.correct_answers_count().to_string(),
            },
            StatRow {
                label: "Incorrect",
                value: result.incorrect_answers_count().to_string(),
            },
            StatRow {
                label: "Time",
                value: result.formatted_duration(),
            },
        ]
    }

    /// Legend entries, colored like the ring.
    #[must_use]
    pub fn legend_entries(&self) -> [LegendEntry; 2] {
        let chart = self.chart.style();
        [
            LegendEntry {
                color: chart.correct_color,
                label: self.config.correct_label.clone(),
            },
            LegendEntry {
                color: chart.wrong_color,
                label: self.config.incorrect_label.clone(),
            },
        ]
    }

    /// Invokes the "View Answers" action.
    ///
    /// Returns false when no action was set.
    pub fn activate_view_answers(&mut self) -> bool {
        match self.on_view_answers.as_mut() {
            Some(action) => {
                tracing::debug!(subject = self.result.subject_name(), "view answers activated");
                action();
                true
            }
            None => false,
        }
    }

    /// True when the chart or the view itself changed since the last paint.
    #[must_use]
    pub fn needs_render(&self) -> bool {
        self.state.is_dirty() || self.chart.needs_render()
    }

    /// Renders only if something changed since the last paint.
    ///
    /// Returns true when commands were emitted.
    pub fn paint(&mut self, commands: &mut Vec<RenderCommand>) -> bool {
        if !self.needs_render() {
            return false;
        }
        self.render(commands);
        self.chart.mark_painted();
        self.state.mark_clean();
        true
    }

    /// Routes a tap at `point` (view coordinates) to the button.
    ///
    /// Returns true when the action ran.
    pub fn handle_tap(&mut self, point: Point) -> bool {
        let hit = self
            .layout()
            .button
            .is_some_and(|button| button.contains(point));
        hit && self.activate_view_answers()
    }

    /// Positions of every block.
    #[must_use]
    pub fn layout(&self) -> ResultsLayout {
        let header = self.build_slot(self.header.as_ref());
        let footer = self.build_slot(self.footer.as_ref());
        self.layout_for(header.as_ref(), footer.as_ref())
    }

    /// Runs a header or footer builder; an empty result counts as no slot.
    fn build_slot(&self, builder: Option<&ContentBuilder>) -> Option<SlotContent> {
        builder
            .map(|build| build(&self.result))
            .filter(|content| !content.is_empty())
    }

    fn layout_for(
        &self,
        header: Option<&SlotContent>,
        footer: Option<&SlotContent>,
    ) -> ResultsLayout {
        let config = &self.config;
        let inner_width = (config.width - config.padding * 2.0).max(0.0);
        let line = |size: f32| (inner_width, size * 1.5);

        let header_height = header.map(|content| content.height);
        let footer_height = footer.map(|content| content.height);
        let legend_height = config
            .legend_swatch
            .max(config.legend_style.font_size * 1.5);

        // Block order must match the destructuring below.
        let mut sizes = Vec::with_capacity(8);
        if let Some(height) = header_height {
            sizes.push((inner_width, height));
        }
        sizes.push(line(config.title_style.font_size));
        sizes.push(line(config.subject_style.font_size));
        sizes.push((config.chart.size, config.chart.size));
        if config.show_legend {
            sizes.push((inner_width, legend_height));
        }
        sizes.push((inner_width, config.row_height * 4.0));
        if self.on_view_answers.is_some() {
            sizes.push((inner_width, config.button_height));
        }
        if let Some(height) = footer_height {
            sizes.push((inner_width, height));
        }

        let stack = Stack::column(config.spacing).padded(config.padding);
        let height = stack.length(&sizes);
        let mut rects = stack
            .place(Rect::new(0.0, 0.0, config.width, height), &sizes)
            .into_iter();
        let mut next = || rects.next().unwrap_or(Rect::ZERO);

        let header = header_height.map(|_| next());
        let title = next();
        let subject = next();
        let chart = next();
        let legend = config.show_legend.then(&mut next);
        let stats = next();
        let button = self.on_view_answers.as_ref().map(|_| next());
        let footer = footer_height.map(|_| next());

        ResultsLayout {
            header,
            title,
            subject,
            chart,
            legend,
            stats,
            button,
            footer,
            size: (config.width, height),
        }
    }

    fn render_slot(buffer: &mut CommandBuffer, rect: Option<Rect>, content: Option<SlotContent>) {
        if let (Some(rect), Some(content)) = (rect, content) {
            buffer.push_offset(rect.origin());
            buffer.extend(content.commands);
            buffer.pop_offset();
        }
    }

    fn render_legend(&self, buffer: &mut CommandBuffer, rect: Rect) {
        let config = &self.config;
        let swatch = config.legend_swatch;
        let entries = self.legend_entries();
        // Rough monospace estimate; hosts with real text metrics can lay the
        // legend out themselves from `legend_entries`.
        let char_width = config.legend_style.font_size * 0.6;
        let sizes: Vec<(f32, f32)> = entries
            .iter()
            .map(|entry| {
                #[allow(clippy::cast_precision_loss)]
                let text = entry.label.chars().count() as f32 * char_width;
                (swatch + 6.0 + text, rect.height)
            })
            .collect();

        let row = Stack::row(24.0);
        let used = row.length(&sizes);
        let start = Rect::new(rect.x + (rect.width - used) * 0.5, rect.y, used, rect.height);
        for (entry, slot) in entries.iter().zip(row.place(start, &sizes)) {
            let (swatch_rect, text_rect) = slot.split_left(swatch);
            buffer.push(RenderCommand::Rect {
                bounds: Rect::new(
                    swatch_rect.x,
                    swatch_rect.center().y - swatch * 0.5,
                    swatch,
                    swatch,
                ),
                color: entry.color,
                corner_radius: swatch * 0.25,
            });
            buffer.push(RenderCommand::Text {
                text: entry.label.clone(),
                position: Point::new(text_rect.x + 6.0, text_rect.center().y),
                align: TextAlign::Left,
                style: config.legend_style,
            });
        }
    }

    fn render_stats(&self, buffer: &mut CommandBuffer, rect: Rect) {
        let config = &self.config;
        let rows = Stack::column(0.0)
            .cross(CrossAlign::Stretch)
            .place(rect, &[(rect.width, config.row_height); 4]);
        for (row, slot) in self.stat_rows().into_iter().zip(rows) {
            let y = slot.center().y;
            buffer.push(RenderCommand::Text {
                text: row.label.to_owned(),
                position: Point::new(slot.x, y),
                align: TextAlign::Left,
                style: config.stat_label_style,
            });
            buffer.push(RenderCommand::Text {
                text: row.value,
                position: Point::new(slot.right(), y),
                align: TextAlign::Right,
                style: config.stat_value_style,
            });
        }
    }
}

impl Widget for ResultsView {
    fn state(&self) -> &WidgetState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut WidgetState {
        &mut self.state
    }

    fn tick(&mut self, elapsed: Duration) -> bool {
        let chart_dirty = self.chart.tick(elapsed);
        chart_dirty || self.state.is_dirty()
    }

    fn render(&self, commands: &mut Vec<RenderCommand>) {
        if !self.state.is_visible() {
            return;
        }

        let config = &self.config;
        let header = self.build_slot(self.header.as_ref());
        let footer = self.build_slot(self.footer.as_ref());
        let layout = self.layout_for(header.as_ref(), footer.as_ref());
        let mut buffer = CommandBuffer::new();
        buffer.begin_frame();

        Self::render_slot(&mut buffer, layout.header, header);

        buffer.push(RenderCommand::Text {
            text: config.title.clone(),
            position: layout.title.center(),
            align: TextAlign::Center,
            style: config.title_style,
        });
        buffer.push(RenderCommand::Text {
            text: self.result.subject_name().to_owned(),
            position: layout.subject.center(),
            align: TextAlign::Center,
            style: config.subject_style,
        });

        let mut chart = Vec::new();
        self.chart.render(&mut chart);
        buffer.push_offset(layout.chart.origin());
        buffer.extend(chart);
        buffer.pop_offset();

        if let Some(rect) = layout.legend {
            self.render_legend(&mut buffer, rect);
        }
        self.render_stats(&mut buffer, layout.stats);

        if let Some(rect) = layout.button {
            buffer.push(RenderCommand::Rect {
                bounds: rect,
                color: config.button_color,
                corner_radius: rect.height * 0.25,
            });
            buffer.push(RenderCommand::Text {
                text: config.view_answers_label.clone(),
                position: rect.center(),
                align: TextAlign::Center,
                style: config.button_text_style,
            });
        }

        Self::render_slot(&mut buffer, layout.footer, footer);

        commands.extend(buffer.end_frame());
    }

    fn preferred_size(&self) -> (f32, f32) {
        self.layout().size
    }
}

impl fmt::Debug for ResultsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultsView")
            .field("state", &self.state)
            .field("result", &self.result)
            .field("chart", &self.chart)
            .field("has_header", &self.header.is_some())
            .field("has_footer", &self.footer.is_some())
            .field("has_view_answers", &self.on_view_answers.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn view(correct: i64, total: i64, seconds: i64) -> ResultsView {
        let result = QuizResult::new(correct, total, seconds, "Geography").unwrap();
        ResultsView::new(WidgetId::new(10), result, ResultsViewConfig::default())
    }

    fn texts(commands: &[RenderCommand]) -> Vec<&str> {
        commands.iter().filter_map(RenderCommand::text).collect()
    }

    #[test]
    fn test_stat_rows_in_fixed_order() {
        let rows = view(7, 10, 3725).stat_rows();
        let pairs: Vec<(&str, &str)> = rows.iter().map(|r| (r.label, r.value.as_str())).collect();
        assert_eq!(
            pairs,
            [
                ("Total Questions", "10"),
                ("Correct", "7"),
                ("Incorrect", "3"),
                ("Time", "62:05"),
            ]
        );
    }

    #[test]
    fn test_render_contains_labels_and_values() {
        let mut view = view(7, 10, 65).on_view_answers(|| {});
        view.start().unwrap();
        view.tick(Duration::from_secs(60));

        let mut commands = Vec::new();
        view.render(&mut commands);
        let texts = texts(&commands);

        for expected in [
            "Quiz Results",
            "Geography",
            "70%",
            "Correct",
            "Incorrect",
            "Total Questions",
            "01:05",
            "View Answers",
        ] {
            assert!(texts.contains(&expected), "missing {expected}: {texts:?}");
        }
    }

    #[test]
    fn test_chart_is_placed_inside_its_block() {
        let view = view(1, 2, 0);
        let layout = view.layout();
        let mut commands = Vec::new();
        view.render(&mut commands);

        let center = commands
            .iter()
            .find_map(|c| match c {
                RenderCommand::Ring { center, .. } => Some(*center),
                _ => None,
            })
            .unwrap();
        assert_eq!(center, layout.chart.center());
    }

    #[test]
    fn test_no_action_means_no_button() {
        let mut view = view(1, 2, 0);
        assert!(view.layout().button.is_none());
        assert!(!view.activate_view_answers());

        let mut commands = Vec::new();
        view.render(&mut commands);
        assert!(!texts(&commands).contains(&"View Answers"));
    }

    #[test]
    fn test_tap_on_button_runs_action() {
        let taps = Rc::new(Cell::new(0));
        let counter = Rc::clone(&taps);
        let mut view = view(1, 2, 0).on_view_answers(move || counter.set(counter.get() + 1));

        let button = view.layout().button.unwrap();
        assert!(view.handle_tap(button.center()));
        assert!(!view.handle_tap(Point::new(-1.0, -1.0)));
        assert!(view.activate_view_answers());
        assert_eq!(taps.get(), 2);
    }

    #[test]
    fn test_header_and_footer_slots() {
        let view = view(3, 4, 0)
            .with_header(|result| SlotContent {
                height: 30.0,
                commands: vec![RenderCommand::Text {
                    text: format!("Well done on {}", result.subject_name()),
                    position: Point::new(0.0, 15.0),
                    align: TextAlign::Left,
                    style: crate::style::TextStyle::default(),
                }],
            })
            .with_footer(|_| SlotContent {
                height: 20.0,
                commands: vec![RenderCommand::Rect {
                    bounds: Rect::new(0.0, 0.0, 10.0, 10.0),
                    color: Color::BLACK,
                    corner_radius: 0.0,
                }],
            });

        let layout = view.layout();
        let header = layout.header.unwrap();
        let footer = layout.footer.unwrap();
        assert!(header.bottom() <= layout.title.y);
        assert!(footer.y >= layout.stats.bottom());
        assert_eq!(layout.size.1, footer.bottom() + view.config().padding);

        let mut commands = Vec::new();
        view.render(&mut commands);
        assert_eq!(texts(&commands)[0], "Well done on Geography");
        assert!(matches!(
            commands.last(),
            Some(RenderCommand::Rect { bounds, .. }) if bounds.origin() == footer.origin()
        ));
    }

    #[test]
    fn test_slot_builders_run_once_per_render() {
        let calls = Rc::new(Cell::new(0_u32));
        let header_calls = Rc::clone(&calls);
        let footer_calls = Rc::clone(&calls);
        let view = view(3, 4, 0)
            .with_header(move |_| {
                header_calls.set(header_calls.get() + 1);
                SlotContent {
                    height: 10.0,
                    commands: Vec::new(),
                }
            })
            .with_footer(move |_| {
                footer_calls.set(footer_calls.get() + 1);
                SlotContent {
                    height: 10.0,
                    commands: Vec::new(),
                }
            });

        let mut commands = Vec::new();
        view.render(&mut commands);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_empty_slot_takes_no_space() {
        let bare = view(3, 4, 0).on_view_answers(|| {});
        let with_empty = view(3, 4, 0)
            .on_view_answers(|| {})
            .with_header(|_| SlotContent::default())
            .with_footer(|_| SlotContent::default());

        let layout = with_empty.layout();
        assert_eq!(layout.header, None);
        assert_eq!(layout.footer, None);
        assert_eq!(layout, bare.layout());

        let mut bare_commands = Vec::new();
        let mut empty_commands = Vec::new();
        bare.render(&mut bare_commands);
        with_empty.render(&mut empty_commands);
        assert_eq!(empty_commands, bare_commands);

        // A zero-height slot that still draws something keeps its place.
        let overlay = view(3, 4, 0).with_header(|_| SlotContent {
            height: 0.0,
            commands: vec![RenderCommand::Rect {
                bounds: Rect::new(0.0, 0.0, 4.0, 4.0),
                color: Color::BLACK,
                corner_radius: 0.0,
            }],
        });
        assert!(overlay.layout().header.is_some());
    }

    #[test]
    fn test_paint_skips_unchanged_frames() {
        let mut view = view(5, 10, 0);
        view.start().unwrap();

        let mut commands = Vec::new();
        assert!(view.tick(Duration::ZERO));
        assert!(view.paint(&mut commands));
        assert!(view.tick(Duration::from_millis(500)));
        assert!(view.paint(&mut commands));

        view.tick(Duration::from_secs(5));
        assert!(view.paint(&mut commands));
        assert!(!view.tick(Duration::from_secs(6)));
        let before = commands.len();
        assert!(!view.paint(&mut commands));
        assert_eq!(commands.len(), before);
    }

    #[test]
    fn test_legend_can_be_hidden() {
        let result = QuizResult::new(1, 2, 0, "x").unwrap();
        let config = ResultsViewConfig {
            show_legend: false,
            ..ResultsViewConfig::default()
        };
        let view = ResultsView::new(WidgetId::new(1), result, config);
        assert!(view.layout().legend.is_none());
    }
}
