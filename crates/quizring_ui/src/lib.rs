//! # Quizring UI
//!
//! Animated donut chart of quiz correctness and the results screen around it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       FRAME PIPELINE                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Host tick → ProgressAnimation → RingGeometry → Commands    │
//! │      ↓              ↓                 ↓            ↓        │
//! │  elapsed      eased fractions    arc spans    host canvas   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//! use quizring_core::QuizResult;
//! use quizring_ui::{ResultsView, ResultsViewConfig, Widget, WidgetId};
//!
//! let result = QuizResult::new(9, 12, 95, "History")?;
//! let mut view = ResultsView::new(WidgetId::new(1), result, ResultsViewConfig::default())
//!     .on_view_answers(|| println!("show answers"));
//! view.start()?;
//!
//! let mut commands = Vec::new();
//! view.tick(Duration::from_secs(2));
//! view.paint(&mut commands);
//! assert_eq!(view.chart().label().as_deref(), Some("75%"));
//! # Ok::<(), quizring_core::QuizError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod animation;
pub mod config;
pub mod geometry;
pub mod layout;
pub mod render;
pub mod style;
pub mod widget;

pub use animation::{AnimationFrame, AnimationPhase, AnimationTargets, Easing, ProgressAnimation};
pub use config::{load_results_config, parse_results_config, ResultsViewConfig};
pub use geometry::{ArcSpan, RingGeometry, RingMetrics, SegmentFractions, StrokeCap};
pub use layout::{Point, Rect};
pub use render::{CommandBuffer, RenderCommand, TextAlign};
pub use style::{ChartStyle, Color, TextStyle};
pub use widget::{
    percent_label, ProgressChart, ResultsView, SlotContent, StatRow, Widget, WidgetId,
};
