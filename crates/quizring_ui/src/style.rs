//! Styling for the results ring.
//!
//! Every default lives here as an explicit value. Build a [`ChartStyle`] once
//! (from [`Default`] or a TOML document, see [`crate::config`]) and pass it
//! down; geometry and animation never reach for globals.

use std::time::Duration;

use quizring_core::{QuizError, QuizOutcome};
use serde::Deserialize;

use crate::animation::Easing;

/// RGBA color.
///
/// Deserializes from `"#RRGGBB"`, `"#RRGGBBAA"`, `[r, g, b]` or `[r, g, b, a]`
/// (components in `0..=1`).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "ColorRepr")]
pub struct Color {
    /// Red component (0-1).
    pub r: f32,
    /// Green component (0-1).
    pub g: f32,
    /// Blue component (0-1).
    pub b: f32,
    /// Alpha component (0-1).
    pub a: f32,
}

impl Color {
    /// Transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    /// Solid black.
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    /// Solid white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);
    /// Correct-answer green (`#4CAF50`).
    pub const CORRECT_GREEN: Self = Self::hex(0x4CAF_50FF);
    /// Wrong-answer red (`#F44336`).
    pub const WRONG_RED: Self = Self::hex(0xF443_36FF);
    /// Light grey track behind the segments (`#E0E0E0`).
    pub const TRACK_GREY: Self = Self::hex(0xE0E0_E0FF);
    /// Dark grey for body text (`#424242`).
    pub const TEXT_DARK: Self = Self::hex(0x4242_42FF);
    /// Muted grey for secondary text (`#757575`).
    pub const TEXT_MUTED: Self = Self::hex(0x7575_75FF);
    /// Accent blue for the action button (`#2196F3`).
    pub const ACCENT_BLUE: Self = Self::hex(0x2196_F3FF);

    /// Creates a color from RGBA values (0-1).
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from RGB values (0-1) with full alpha.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Creates a color from a packed `0xRRGGBBAA` value.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn hex(hex: u32) -> Self {
        let r = ((hex >> 24) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let b = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let a = (hex & 0xFF) as f32 / 255.0;
        Self::rgba(r, g, b, a)
    }

    /// Parses `#RRGGBB` or `#RRGGBBAA` (leading `#` optional).
    #[must_use]
    pub fn parse_hex(text: &str) -> Option<Self> {
        let digits = text.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let packed = match digits.len() {
            6 => u32::from_str_radix(digits, 16).ok()? << 8 | 0xFF,
            8 => u32::from_str_radix(digits, 16).ok()?,
            _ => return None,
        };
        Some(Self::hex(packed))
    }

    /// Returns a new color with different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }

    /// Converts to array format.
    #[must_use]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Hex(String),
    Rgb([f32; 3]),
    Rgba([f32; 4]),
}

impl TryFrom<ColorRepr> for Color {
    type Error = String;

    fn try_from(repr: ColorRepr) -> Result<Self, Self::Error> {
        let color = match repr {
            ColorRepr::Hex(text) => {
                return Self::parse_hex(&text).ok_or_else(|| format!("bad hex color `{text}`"));
            }
            ColorRepr::Rgb([r, g, b]) => Self::rgb(r, g, b),
            ColorRepr::Rgba([r, g, b, a]) => Self::rgba(r, g, b, a),
        };
        if color.to_array().iter().all(|c| (0.0..=1.0).contains(c)) {
            Ok(color)
        } else {
            Err(format!("color components must be within 0..=1, got {:?}", color.to_array()))
        }
    }
}

/// Font parameters for a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    /// Text color.
    pub color: Color,
    /// Font size in logical units.
    pub font_size: f32,
    /// Bold weight.
    pub bold: bool,
}

impl TextStyle {
    /// Creates a text style.
    #[must_use]
    pub const fn new(color: Color, font_size: f32, bold: bool) -> Self {
        Self { color, font_size, bold }
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(Color::TEXT_DARK, 16.0, false)
    }
}

/// Visual parameters of the progress ring.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    /// Edge length of the square the ring is drawn in.
    pub size: f32,
    /// Stroke width of the correct and wrong segments.
    pub stroke_width: f32,
    /// Stroke width of the full background ring.
    pub background_stroke_width: f32,
    /// Color of the correct segment.
    pub correct_color: Color,
    /// Color of the wrong segment.
    pub wrong_color: Color,
    /// Color of the background ring.
    pub background_color: Color,
    /// Length of the fill-in tween in milliseconds.
    pub animation_duration_ms: u64,
    /// Curve applied to tween progress.
    pub easing: Easing,
    /// Whether the percentage label is drawn in the middle of the ring.
    pub show_label: bool,
    /// Style of the percentage label.
    pub label: TextStyle,
    /// Stroke widths above this draw a soft shadow under the correct segment.
    pub shadow_threshold: f32,
}

impl ChartStyle {
    /// Default ring size.
    pub const DEFAULT_SIZE: f32 = 200.0;
    /// Default segment stroke width.
    pub const DEFAULT_STROKE_WIDTH: f32 = 12.0;
    /// Default tween length.
    pub const DEFAULT_ANIMATION_MS: u64 = 1500;
    /// Stroke width above which the correct segment gets a shadow.
    pub const DEFAULT_SHADOW_THRESHOLD: f32 = 15.0;

    /// Tween length as a [`Duration`].
    #[must_use]
    pub const fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    /// Sets the ring size.
    #[must_use]
    pub const fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Sets both stroke widths.
    #[must_use]
    pub const fn with_stroke_widths(mut self, stroke: f32, background: f32) -> Self {
        self.stroke_width = stroke;
        self.background_stroke_width = background;
        self
    }

    /// Sets the tween length.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn with_animation_duration(mut self, duration: Duration) -> Self {
        self.animation_duration_ms = duration.as_millis() as u64;
        self
    }

    /// Checks that sizes and widths are positive and finite.
    ///
    /// # Errors
    ///
    /// Returns [`QuizError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> QuizOutcome<()> {
        check_positive("chart.size", self.size)?;
        check_positive("chart.stroke_width", self.stroke_width)?;
        check_positive("chart.background_stroke_width", self.background_stroke_width)?;
        check_positive("chart.label.font_size", self.label.font_size)?;
        if !self.shadow_threshold.is_finite() || self.shadow_threshold < 0.0 {
            return Err(QuizError::InvalidConfig(format!(
                "chart.shadow_threshold must be a non-negative number, got {}",
                self.shadow_threshold
            )));
        }
        let widest = self.stroke_width.max(self.background_stroke_width);
        if widest >= self.size {
            return Err(QuizError::InvalidConfig(format!(
                "stroke width {widest} does not fit in a ring of size {}",
                self.size
            )));
        }
        Ok(())
    }
}

/// Fails unless `value` is a finite number greater than zero.
pub(crate) fn check_positive(field: &str, value: f32) -> QuizOutcome<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(QuizError::InvalidConfig(format!(
            "{field} must be a positive number, got {value}"
        )))
    }
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            size: Self::DEFAULT_SIZE,
            stroke_width: Self::DEFAULT_STROKE_WIDTH,
            background_stroke_width: Self::DEFAULT_STROKE_WIDTH,
            correct_color: Color::CORRECT_GREEN,
            wrong_color: Color::WRONG_RED,
            background_color: Color::TRACK_GREY,
            animation_duration_ms: Self::DEFAULT_ANIMATION_MS,
            easing: Easing::EaseInOut,
            show_label: true,
            label: TextStyle::new(Color::TEXT_DARK, 32.0, true),
            shadow_threshold: Self::DEFAULT_SHADOW_THRESHOLD,
        }
    }
}
