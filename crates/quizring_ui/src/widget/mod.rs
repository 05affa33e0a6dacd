//! Widgets of the results screen.
//!
//! Widgets own their animation state and emit render commands; the host owns
//! the frame clock and the canvas.

mod chart;
mod core;
mod results;

pub use chart::{percent_label, ChartSnapshot, ProgressChart};
pub use self::core::{Widget, WidgetFlags, WidgetId, WidgetState};
pub use results::{
    ContentBuilder, LegendEntry, ResultsLayout, ResultsView, SlotContent, StatRow,
};
