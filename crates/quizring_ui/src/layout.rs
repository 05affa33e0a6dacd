//! Screen-space geometry and a one-axis stacking layout.
//!
//! Coordinates are logical units with the origin at the top-left corner and
//! y growing downwards, so angles measured from the positive x axis increase
//! clockwise on screen.

/// A position on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    /// Distance from the left edge.
    pub x: f32,
    /// Distance from the top edge.
    pub y: f32,
}

impl Point {
    /// Point at `(x, y)`.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// This point moved by `(dx, dy)`.
    #[must_use]
    pub fn translate(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Axis-aligned box given by its top-left corner and size.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Rect {
    /// Empty box at the origin.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Box with top-left `(x, y)` and the given size.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// `x + width`.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// `y + height`.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Midpoint of the box.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Top-left corner.
    #[must_use]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Half-open hit test: left/top edges inside, right/bottom edges outside.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        (self.x..self.right()).contains(&point.x) && (self.y..self.bottom()).contains(&point.y)
    }

    /// The box with `inset` removed from every side; never negative in size.
    #[must_use]
    pub fn inset(&self, inset: f32) -> Self {
        Self::new(
            self.x + inset,
            self.y + inset,
            (self.width - 2.0 * inset).max(0.0),
            (self.height - 2.0 * inset).max(0.0),
        )
    }

    /// Cuts a column `width` wide off the left side. Returns `(left, rest)`.
    #[must_use]
    pub fn split_left(&self, width: f32) -> (Self, Self) {
        let width = width.clamp(0.0, self.width);
        (
            Self::new(self.x, self.y, width, self.height),
            Self::new(self.x + width, self.y, self.width - width, self.height),
        )
    }
}

/// Direction blocks are stacked in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Left to right.
    Row,
    /// Top to bottom.
    Column,
}

/// Placement of a block across the stacking direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrossAlign {
    /// Flush with the left (column) or top (row).
    Start,
    /// Centered.
    #[default]
    Center,
    /// Flush with the right (column) or bottom (row).
    End,
    /// Takes the whole cross extent, ignoring the block's own size.
    Stretch,
}

/// Places fixed-size blocks one after another along an [`Axis`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stack {
    axis: Axis,
    cross: CrossAlign,
    gap: f32,
    padding: f32,
}

impl Stack {
    /// Left-to-right stack with `gap` between blocks.
    #[must_use]
    pub const fn row(gap: f32) -> Self {
        Self {
            axis: Axis::Row,
            cross: CrossAlign::Center,
            gap,
            padding: 0.0,
        }
    }

    /// Top-to-bottom stack with `gap` between blocks.
    #[must_use]
    pub const fn column(gap: f32) -> Self {
        Self {
            axis: Axis::Column,
            cross: CrossAlign::Center,
            gap,
            padding: 0.0,
        }
    }

    /// Keeps `padding` free on every side of the bounds.
    #[must_use]
    pub const fn padded(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    /// Sets the cross-axis placement.
    #[must_use]
    pub const fn cross(mut self, cross: CrossAlign) -> Self {
        self.cross = cross;
        self
    }

    /// `(main, cross)` components of a `(width, height)` size.
    fn split(&self, (width, height): (f32, f32)) -> (f32, f32) {
        match self.axis {
            Axis::Row => (width, height),
            Axis::Column => (height, width),
        }
    }

    /// Rects for blocks of the given `(width, height)`, in order, starting at
    /// the leading edge of `bounds`.
    #[must_use]
    pub fn place(&self, bounds: Rect, sizes: &[(f32, f32)]) -> Vec<Rect> {
        let content = bounds.inset(self.padding);
        let (mut main, cross_start, cross_room) = match self.axis {
            Axis::Row => (content.x, content.y, content.height),
            Axis::Column => (content.y, content.x, content.width),
        };

        sizes
            .iter()
            .map(|&size| {
                let (along, across) = self.split(size);
                let (offset, across) = match self.cross {
                    CrossAlign::Start => (0.0, across),
                    CrossAlign::Center => ((cross_room - across) * 0.5, across),
                    CrossAlign::End => (cross_room - across, across),
                    CrossAlign::Stretch => (0.0, cross_room),
                };
                let rect = match self.axis {
                    Axis::Row => Rect::new(main, cross_start + offset, along, across),
                    Axis::Column => Rect::new(cross_start + offset, main, across, along),
                };
                main += along + self.gap;
                rect
            })
            .collect()
    }

    /// Length along the axis that [`place`](Self::place) uses, padding included.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn length(&self, sizes: &[(f32, f32)]) -> f32 {
        let blocks: f32 = sizes.iter().map(|&size| self.split(size).0).sum();
        let gaps = self.gap * sizes.len().saturating_sub(1) as f32;
        blocks + gaps + 2.0 * self.padding
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_centers_blocks() {
        let stack = Stack::column(10.0);
        let sizes = [(100.0, 20.0), (200.0, 40.0)];
        let placed = stack.place(Rect::new(0.0, 0.0, 200.0, 500.0), &sizes);

        assert_eq!(placed, vec![Rect::new(50.0, 0.0, 100.0, 20.0), Rect::new(0.0, 30.0, 200.0, 40.0)]);
        assert_eq!(stack.length(&sizes), 70.0);
        assert_eq!(stack.length(&[]), 0.0);
    }

    #[test]
    fn test_padded_row_stretches() {
        let stack = Stack::row(4.0).padded(2.0).cross(CrossAlign::Stretch);
        let placed = stack.place(Rect::new(0.0, 0.0, 100.0, 24.0), &[(10.0, 5.0), (30.0, 5.0)]);

        assert_eq!(placed[0], Rect::new(2.0, 2.0, 10.0, 20.0));
        assert_eq!(placed[1], Rect::new(16.0, 2.0, 30.0, 20.0));
        assert_eq!(stack.length(&[(10.0, 5.0), (30.0, 5.0)]), 48.0);
    }

    #[test]
    fn test_end_alignment() {
        let placed = Stack::column(0.0)
            .cross(CrossAlign::End)
            .place(Rect::new(10.0, 0.0, 100.0, 100.0), &[(30.0, 10.0)]);
        assert_eq!(placed[0], Rect::new(80.0, 0.0, 30.0, 10.0));
    }

    #[test]
    fn test_split_left_and_hit_test() {
        let (left, rest) = Rect::new(0.0, 0.0, 100.0, 10.0).split_left(30.0);
        assert_eq!(left.width, 30.0);
        assert_eq!(rest, Rect::new(30.0, 0.0, 70.0, 10.0));
        assert_eq!(rest.center(), Point::new(65.0, 5.0));
        assert!(rest.contains(Point::new(30.0, 0.0)));
        assert!(!rest.contains(Point::new(100.0, 5.0)));
        assert_eq!(Rect::new(0.0, 0.0, 4.0, 4.0).inset(3.0).width, 0.0);
    }
}
