//! Toolkit-neutral render commands.
//!
//! Widgets describe what to draw; the host maps each command onto its own
//! canvas API (arc/stroke/text calls). Nothing here rasterizes.

use crate::geometry::{ArcSpan, StrokeCap};
use crate::layout::{Point, Rect};
use crate::style::{Color, TextStyle};

/// Horizontal anchoring of a text command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    /// `position` is the left edge.
    #[default]
    Left,
    /// `position` is the horizontal center.
    Center,
    /// `position` is the right edge.
    Right,
}

/// A render command for the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Full 360° stroked circle.
    Ring {
        /// Circle center.
        center: Point,
        /// Radius of the stroke centerline.
        radius: f32,
        /// Stroke width.
        stroke_width: f32,
        /// Stroke color.
        color: Color,
    },
    /// Stroked arc.
    Arc {
        /// Circle center.
        center: Point,
        /// Radius of the stroke centerline.
        radius: f32,
        /// Angles of the arc.
        span: ArcSpan,
        /// Stroke width.
        stroke_width: f32,
        /// Stroke color.
        color: Color,
        /// Stroke end style.
        cap: StrokeCap,
        /// Gaussian blur radius; `None` for a crisp stroke.
        blur_radius: Option<f32>,
    },
    /// Single line of text. `position` is the vertical center of the line.
    Text {
        /// Text content.
        text: String,
        /// Anchor point.
        position: Point,
        /// Anchoring of `position`.
        align: TextAlign,
        /// Font parameters.
        style: TextStyle,
    },
    /// Filled rectangle.
    Rect {
        /// Bounds.
        bounds: Rect,
        /// Fill color.
        color: Color,
        /// Corner radius.
        corner_radius: f32,
    },
}

impl RenderCommand {
    /// Returns the command moved by `(dx, dy)`.
    #[must_use]
    pub fn translated(mut self, dx: f32, dy: f32) -> Self {
        match &mut self {
            Self::Ring { center, .. } | Self::Arc { center, .. } => {
                *center = center.translate(dx, dy);
            }
            Self::Text { position, .. } => *position = position.translate(dx, dy),
            Self::Rect { bounds, .. } => {
                bounds.x += dx;
                bounds.y += dy;
            }
        }
        self
    }

    /// Text content, for text commands.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

/// Collects the commands of one frame, applying nested offsets.
#[derive(Debug, Default)]
pub struct CommandBuffer {
    /// Commands recorded this frame.
    commands: Vec<RenderCommand>,
    /// Accumulated offsets; the last entry is the current origin.
    offsets: Vec<(f32, f32)>,
}

impl CommandBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(64),
            offsets: Vec::with_capacity(4),
        }
    }

    /// Begins a new frame.
    pub fn begin_frame(&mut self) {
        self.commands.clear();
        self.offsets.clear();
    }

    /// Adds a render command relative to the current origin.
    pub fn push(&mut self, command: RenderCommand) {
        let (dx, dy) = self.current_offset();
        self.commands.push(command.translated(dx, dy));
    }

    /// Adds multiple render commands relative to the current origin.
    pub fn extend(&mut self, commands: impl IntoIterator<Item = RenderCommand>) {
        for command in commands {
            self.push(command);
        }
    }

    /// Moves the origin to `origin` (relative to the current origin).
    pub fn push_offset(&mut self, origin: Point) {
        let (dx, dy) = self.current_offset();
        self.offsets.push((dx + origin.x, dy + origin.y));
    }

    /// Restores the previous origin.
    pub fn pop_offset(&mut self) {
        self.offsets.pop();
    }

    /// Current origin in frame coordinates.
    #[must_use]
    pub fn current_offset(&self) -> (f32, f32) {
        self.offsets.last().copied().unwrap_or((0.0, 0.0))
    }

    /// Ends the frame and hands out the recorded commands.
    pub fn end_frame(&mut self) -> Vec<RenderCommand> {
        self.offsets.clear();
        std::mem::take(&mut self.commands)
    }

    /// Returns the recorded command count.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_frame() {
        let mut buffer = CommandBuffer::new();
        buffer.begin_frame();
        buffer.push(RenderCommand::Rect {
            bounds: Rect::new(0.0, 0.0, 100.0, 50.0),
            color: Color::WHITE,
            corner_radius: 0.0,
        });
        assert_eq!(buffer.command_count(), 1);

        let commands = buffer.end_frame();
        assert_eq!(commands.len(), 1);
        assert_eq!(buffer.command_count(), 0);
    }

    #[test]
    fn test_nested_offsets() {
        let mut buffer = CommandBuffer::new();
        buffer.push_offset(Point::new(10.0, 20.0));
        buffer.push_offset(Point::new(1.0, 2.0));
        buffer.push(RenderCommand::Ring {
            center: Point::new(5.0, 5.0),
            radius: 4.0,
            stroke_width: 1.0,
            color: Color::BLACK,
        });
        buffer.pop_offset();
        assert_eq!(buffer.current_offset(), (10.0, 20.0));
        buffer.pop_offset();
        assert_eq!(buffer.current_offset(), (0.0, 0.0));

        let commands = buffer.end_frame();
        assert!(matches!(
            commands[0],
            RenderCommand::Ring { center, .. } if center == Point::new(16.0, 27.0)
        ));
    }
}
