//! Results screen configuration.
//!
//! Loaded once at startup from TOML and passed down. Every field has a
//! default, so a document only lists what it changes:
//!
//! ```toml
//! title = "Weekly Check"
//!
//! [chart]
//! stroke_width = 18.0
//! correct_color = "#2E7D32"
//! easing = "cubic_in_out"
//! ```

use std::path::Path;

use quizring_core::{QuizError, QuizOutcome};
use serde::Deserialize;

use crate::style::{check_positive, ChartStyle, Color, TextStyle};

/// Everything the results view needs besides the result itself.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ResultsViewConfig {
    /// Heading above the subject.
    pub title: String,
    /// Label of the action button.
    pub view_answers_label: String,
    /// Legend text for the correct segment.
    pub correct_label: String,
    /// Legend text for the wrong segment.
    pub incorrect_label: String,
    /// Draw the legend under the chart.
    pub show_legend: bool,
    /// View width; the height follows from the content.
    pub width: f32,
    /// Space around the content.
    pub padding: f32,
    /// Vertical space between blocks.
    pub spacing: f32,
    /// Height of one stat row.
    pub row_height: f32,
    /// Edge length of a legend color swatch.
    pub legend_swatch: f32,
    /// Height of the action button.
    pub button_height: f32,
    /// Fill of the action button.
    pub button_color: Color,
    /// Title text.
    pub title_style: TextStyle,
    /// Subject text.
    pub subject_style: TextStyle,
    /// Stat row labels.
    pub stat_label_style: TextStyle,
    /// Stat row values.
    pub stat_value_style: TextStyle,
    /// Legend text.
    pub legend_style: TextStyle,
    /// Button text.
    pub button_text_style: TextStyle,
    /// The progress ring.
    pub chart: ChartStyle,
}

impl Default for ResultsViewConfig {
    fn default() -> Self {
        Self {
            title: "Quiz Results".into(),
            view_answers_label: "View Answers".into(),
            correct_label: "Correct".into(),
            incorrect_label: "Incorrect".into(),
            show_legend: true,
            width: 360.0,
            padding: 16.0,
            spacing: 16.0,
            row_height: 28.0,
            legend_swatch: 14.0,
            button_height: 44.0,
            button_color: Color::ACCENT_BLUE,
            title_style: TextStyle::new(Color::TEXT_DARK, 24.0, true),
            subject_style: TextStyle::new(Color::TEXT_MUTED, 18.0, false),
            stat_label_style: TextStyle::new(Color::TEXT_MUTED, 16.0, false),
            stat_value_style: TextStyle::new(Color::TEXT_DARK, 16.0, true),
            legend_style: TextStyle::new(Color::TEXT_DARK, 14.0, false),
            button_text_style: TextStyle::new(Color::WHITE, 16.0, true),
            chart: ChartStyle::default(),
        }
    }
}

impl ResultsViewConfig {
    /// Checks sizes, spacings and font sizes.
    ///
    /// # Errors
    ///
    /// Returns [`QuizError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> QuizOutcome<()> {
        self.chart.validate()?;
        check_positive("width", self.width)?;
        check_positive("row_height", self.row_height)?;
        check_positive("legend_swatch", self.legend_swatch)?;
        check_positive("button_height", self.button_height)?;
        for (field, style) in [
            ("title_style", &self.title_style),
            ("subject_style", &self.subject_style),
            ("stat_label_style", &self.stat_label_style),
            ("stat_value_style", &self.stat_value_style),
            ("legend_style", &self.legend_style),
            ("button_text_style", &self.button_text_style),
        ] {
            check_positive(field, style.font_size)?;
        }
        for (field, value) in [("padding", self.padding), ("spacing", self.spacing)] {
            if !value.is_finite() || value < 0.0 {
                return Err(QuizError::InvalidConfig(format!(
                    "{field} must be a non-negative number, got {value}"
                )));
            }
        }
        if self.chart.size + self.padding * 2.0 > self.width {
            return Err(QuizError::InvalidConfig(format!(
                "chart of size {} does not fit in a view {} wide",
                self.chart.size, self.width
            )));
        }
        Ok(())
    }
}

/// Parses and validates a TOML document.
///
/// # Errors
///
/// Returns [`QuizError::InvalidConfig`] for syntax errors, unknown value
/// shapes and failed validation.
pub fn parse_results_config(text: &str) -> QuizOutcome<ResultsViewConfig> {
    let config: ResultsViewConfig =
        toml::from_str(text).map_err(|e| QuizError::InvalidConfig(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

/// Reads, parses and validates a TOML file.
///
/// # Errors
///
/// Returns [`QuizError::InvalidConfig`] when the file cannot be read or
/// [`parse_results_config`] fails.
pub fn load_results_config(path: impl AsRef<Path>) -> QuizOutcome<ResultsViewConfig> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| {
        QuizError::InvalidConfig(format!("cannot read {}: {e}", path.display()))
    })?;
    let config = parse_results_config(&text)?;
    tracing::info!(path = %path.display(), "results view configuration loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Easing;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_document_gives_defaults() {
        assert_eq!(parse_results_config("").unwrap(), ResultsViewConfig::default());
        assert!(ResultsViewConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_document_overrides_fields() {
        let config = parse_results_config(
            r##"
            title = "Weekly Check"

            [chart]
            stroke_width = 18.0
            correct_color = "#2E7D32"
            wrong_color = [1.0, 0.0, 0.0]
            easing = "cubic_in_out"
            animation_duration_ms = 800

            [chart.label]
            font_size = 28.0
            "##,
        )
        .unwrap();

        assert_eq!(config.title, "Weekly Check");
        assert_eq!(config.view_answers_label, "View Answers");
        assert_eq!(config.chart.stroke_width, 18.0);
        assert_eq!(config.chart.correct_color, Color::hex(0x2E7D_32FF));
        assert_eq!(config.chart.wrong_color, Color::rgb(1.0, 0.0, 0.0));
        assert_eq!(config.chart.easing, Easing::CubicInOut);
        assert_eq!(config.chart.animation_duration_ms, 800);
        assert_eq!(config.chart.label.font_size, 28.0);
        assert_eq!(config.chart.size, ChartStyle::DEFAULT_SIZE);
    }

    #[test]
    fn test_rejects_invalid_documents() {
        for text in [
            "[chart]\nstroke_width = -1.0",
            "[chart]\nsize = 0.0",
            "[chart]\ncorrect_color = \"#nothex\"",
            "[chart]\ncorrect_color = [2.0, 0.0, 0.0]",
            "[chart]\neasing = \"bounce\"",
            "width = 100.0",
            "padding = -4.0",
            "title = ",
        ] {
            assert!(
                matches!(parse_results_config(text), Err(QuizError::InvalidConfig(_))),
                "accepted: {text}"
            );
        }
    }

    #[test]
    fn test_missing_file() {
        let err = load_results_config("/definitely/not/here.toml").unwrap_err();
        assert!(err.to_string().contains("cannot read"));
    }
}
