//! Screen layout for the converter
//!
//! The screen is a pure function of the session snapshot and the screen
//! orientation. Layout calculation is kept apart from drawing so it can be
//! tested without any display; `render_text` is the only drawing backend.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::app::session::SessionSnapshot;
use crate::domain::base::TargetBase;

pub const TITLE: &str = "Number Converter";
pub const INPUT_LABEL: &str = "Enter a number";
pub const FORMAT_LABEL: &str = "Choose format";
pub const RESULT_LABEL: &str = "Result";

/// Orientation the screen is laid out for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    /// How the base options are arranged for this orientation
    pub fn arrangement(self) -> Arrangement {
        match self {
            Orientation::Portrait => Arrangement::Column,
            Orientation::Landscape => Arrangement::Row,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown orientation '{0}'")]
pub struct UnknownOrientation(pub String);

impl FromStr for Orientation {
    type Err = UnknownOrientation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "portrait" => Ok(Orientation::Portrait),
            "landscape" => Ok(Orientation::Landscape),
            _ => Err(UnknownOrientation(s.to_string())),
        }
    }
}

/// Direction the base options flow in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrangement {
    /// One option per line
    Column,
    /// All options on one line
    Row,
}

/// A selectable base in the format picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseOption {
    pub base: TargetBase,
    pub label: &'static str,
    pub selected: bool,
}

/// Pre-calculated screen content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenView {
    pub orientation: Orientation,
    pub arrangement: Arrangement,
    pub title: &'static str,
    pub input_label: &'static str,
    pub input_text: String,
    pub format_label: &'static str,
    /// Always one option per base, exactly one selected
    pub options: Vec<BaseOption>,
    pub result_label: &'static str,
    pub result_text: String,
    pub result_is_error: bool,
}

impl ScreenView {
    /// Builds the screen for `snapshot` laid out for `orientation`
    pub fn build(snapshot: &SessionSnapshot, orientation: Orientation) -> Self {
        let options = TargetBase::ALL
            .into_iter()
            .map(|base| BaseOption {
                base,
                label: base.label(),
                selected: base == snapshot.base,
            })
            .collect();

        Self {
            orientation,
            arrangement: orientation.arrangement(),
            title: TITLE,
            input_label: INPUT_LABEL,
            input_text: snapshot.input.to_string(),
            format_label: FORMAT_LABEL,
            options,
            result_label: RESULT_LABEL,
            result_text: snapshot.result.text(),
            result_is_error: snapshot.result.is_failure(),
        }
    }

    /// Plain-text drawing of the screen
    pub fn render_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ScreenView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} ==", self.title)?;
        writeln!(f, "{}: {}", self.input_label, self.input_text)?;
        writeln!(f, "{}:", self.format_label)?;

        let options: Vec<String> = self
            .options
            .iter()
            .map(|option| {
                let mark = if option.selected { "(*)" } else { "( )" };
                format!("{mark} {}", option.label)
            })
            .collect();

        match self.arrangement {
            Arrangement::Column => {
                for option in &options {
                    writeln!(f, "  {option}")?;
                }
            }
            Arrangement::Row => writeln!(f, "  {}", options.join("   "))?,
        }

        let marker = if self.result_is_error { "!" } else { "" };
        write!(f, "{}: {marker}{}", self.result_label, self.result_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::converter::{ConversionResult, ParseFailure};
    use crate::domain::input::NumericInput;

    fn snapshot(input: &str, base: TargetBase, result: ConversionResult) -> SessionSnapshot {
        SessionSnapshot {
            input: NumericInput::parse(input).unwrap(),
            base,
            result,
        }
    }

    #[test]
    fn orientation_parses() {
        assert_eq!("Landscape".parse::<Orientation>(), Ok(Orientation::Landscape));
        assert_eq!("portrait".parse::<Orientation>(), Ok(Orientation::Portrait));
        assert!("upside-down".parse::<Orientation>().is_err());
    }

    #[test]
    fn exactly_one_option_selected() {
        let view = ScreenView::build(
            &snapshot("255", TargetBase::Octal, ConversionResult::success("377")),
            Orientation::Portrait,
        );
        assert_eq!(view.options.len(), 4);
        assert_eq!(view.options.iter().filter(|option| option.selected).count(), 1);
        let selected: Vec<TargetBase> = view
            .options
            .iter()
            .filter(|option| option.selected)
            .map(|option| option.base)
            .collect();
        assert_eq!(selected, vec![TargetBase::Octal]);
    }

    #[test]
    fn view_reflects_snapshot() {
        let view = ScreenView::build(
            &snapshot("255", TargetBase::Hexadecimal, ConversionResult::success("ff")),
            Orientation::Landscape,
        );
        assert_eq!(view.input_text, "255");
        assert_eq!(view.result_text, "ff");
        assert!(!view.result_is_error);
        assert_eq!(view.arrangement, Arrangement::Row);
    }

    #[test]
    fn failure_is_flagged() {
        let failure = ConversionResult::Failure(ParseFailure { base: TargetBase::Binary });
        let view = ScreenView::build(&snapshot("", TargetBase::Binary, failure), Orientation::Portrait);
        assert!(view.result_is_error);
        assert_eq!(view.result_text, "Invalid binary input");
        assert!(view.render_text().ends_with("Result: !Invalid binary input"));
    }

    #[test]
    fn portrait_lists_options_one_per_line() {
        let view = ScreenView::build(&SessionSnapshot::default(), Orientation::Portrait);
        let text = view.render_text();
        assert!(text.contains("\n  (*) Decimal\n  ( ) Hexadecimal\n  ( ) Octal\n  ( ) Binary\n"));
        assert_eq!(format!("{view}"), text);
    }

    #[test]
    fn landscape_lists_options_on_one_line() {
        let view = ScreenView::build(&SessionSnapshot::default(), Orientation::Landscape);
        let text = view.render_text();
        assert!(text.contains("  (*) Decimal   ( ) Hexadecimal   ( ) Octal   ( ) Binary\n"));
    }

    #[test]
    fn layouts_differ_only_in_arrangement() {
        let state = snapshot("42", TargetBase::Binary, ConversionResult::success("101010"));
        let portrait = ScreenView::build(&state, Orientation::Portrait);
        let landscape = ScreenView::build(&state, Orientation::Landscape);

        assert_eq!(portrait.options, landscape.options);
        assert_eq!(portrait.result_text, landscape.result_text);
        assert_ne!(portrait.arrangement, landscape.arrangement);
    }
}
