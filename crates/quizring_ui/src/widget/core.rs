//! Widget identity, state bits and the trait every widget implements.

use std::fmt;
use std::ops::BitOr;
use std::time::Duration;

use crate::render::RenderCommand;

/// Identifies a widget within one screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(u64);

impl WidgetId {
    /// Wraps a raw id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Id of the `n`-th child of this widget.
    #[must_use]
    pub const fn child(self, n: u64) -> Self {
        Self(self.0.wrapping_add(n))
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Set of widget state bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetFlags(u8);

impl WidgetFlags {
    /// No bits.
    pub const NONE: Self = Self(0);
    /// Drawn by `render`.
    pub const VISIBLE: Self = Self(1);
    /// Output changed since the last paint.
    pub const DIRTY: Self = Self(1 << 1);
    /// Torn down; will not animate again.
    pub const DISPOSED: Self = Self(1 << 2);

    /// True when every bit of `other` is set.
    #[inline]
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Sets the bits of `other`.
    #[inline]
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// Clears the bits of `other`.
    #[inline]
    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }

    /// Inserts or removes `other` depending on `on`.
    #[inline]
    pub fn set(&mut self, other: Self, on: bool) {
        if on {
            self.insert(other);
        } else {
            self.remove(other);
        }
    }
}

impl BitOr for WidgetFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl Default for WidgetFlags {
    /// New widgets are visible and need a first paint.
    fn default() -> Self {
        Self::VISIBLE | Self::DIRTY
    }
}

/// State shared by every widget.
#[derive(Debug, Clone)]
pub struct WidgetState {
    /// Identity.
    pub id: WidgetId,
    /// State bits.
    pub flags: WidgetFlags,
}

impl WidgetState {
    /// Visible, dirty state for `id`.
    #[must_use]
    pub fn new(id: WidgetId) -> Self {
        Self {
            id,
            flags: WidgetFlags::default(),
        }
    }

    /// Whether `render` draws anything.
    #[inline]
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.flags.contains(WidgetFlags::VISIBLE)
    }

    /// Whether the output changed since the last paint.
    #[inline]
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.flags.contains(WidgetFlags::DIRTY)
    }

    /// Whether the widget was torn down.
    #[inline]
    #[must_use]
    pub const fn is_disposed(&self) -> bool {
        self.flags.contains(WidgetFlags::DISPOSED)
    }

    /// Requests a repaint.
    #[inline]
    pub fn mark_dirty(&mut self) {
        self.flags.insert(WidgetFlags::DIRTY);
    }

    /// Records that the current output was painted.
    #[inline]
    pub fn mark_clean(&mut self) {
        self.flags.remove(WidgetFlags::DIRTY);
    }
}

/// A frame-driven piece of the results screen.
pub trait Widget {
    /// Shared state.
    fn state(&self) -> &WidgetState;

    /// Shared state, mutably.
    fn state_mut(&mut self) -> &mut WidgetState;

    /// Advances animations to `elapsed` (time since the widget started).
    ///
    /// Returns true when the next [`render`](Self::render) would differ from
    /// the last painted one.
    fn tick(&mut self, elapsed: Duration) -> bool;

    /// Appends this widget's commands, relative to its own top-left corner.
    fn render(&self, commands: &mut Vec<RenderCommand>);

    /// Size the widget wants, `(width, height)`.
    fn preferred_size(&self) -> (f32, f32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags() {
        let mut flags = WidgetFlags::default();
        assert!(flags.contains(WidgetFlags::VISIBLE | WidgetFlags::DIRTY));
        assert!(!flags.contains(WidgetFlags::DISPOSED));

        flags.set(WidgetFlags::DIRTY, false);
        assert!(!flags.contains(WidgetFlags::DIRTY));
        assert!(flags.contains(WidgetFlags::NONE));
        flags.insert(WidgetFlags::DISPOSED);
        assert!(flags.contains(WidgetFlags::DISPOSED | WidgetFlags::VISIBLE));
    }

    #[test]
    fn test_child_ids() {
        let id = WidgetId::new(10);
        assert_eq!(id.child(1).get(), 11);
        assert_eq!(id.to_string(), "#10");
        assert_eq!(WidgetId::new(u64::MAX).child(1), WidgetId::new(0));
    }
}
