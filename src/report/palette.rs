//! Colour table for terminal output

use crossterm::style::{style, Color, Stylize};

use super::rating::Tone;

/// Colours used by the reporter and the progress printer.
///
/// `None` means "print unstyled".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub frame: Option<Color>,
    pub title: Option<Color>,
    pub section: Option<Color>,
    pub highlight: Option<Color>,
    pub progress: Option<Color>,
    pub good: Option<Color>,
    pub warn: Option<Color>,
    pub bad: Option<Color>,
}

impl Palette {
    /// The ANSI colour scheme
    pub fn ansi() -> Self {
        Self {
            frame: Some(Color::DarkCyan),
            title: Some(Color::DarkYellow),
            section: Some(Color::DarkMagenta),
            highlight: Some(Color::DarkYellow),
            progress: Some(Color::DarkCyan),
            good: Some(Color::DarkGreen),
            warn: Some(Color::DarkYellow),
            bad: Some(Color::DarkRed),
        }
    }

    /// No escape codes at all
    pub fn plain() -> Self {
        Self {
            frame: None,
            title: None,
            section: None,
            highlight: None,
            progress: None,
            good: None,
            warn: None,
            bad: None,
        }
    }

    /// Colour scheme for the current terminal: plain when `NO_COLOR` is set
    pub fn detect() -> Self {
        if std::env::var_os("NO_COLOR").is_some() {
            Self::plain()
        } else {
            Self::ansi()
        }
    }

    pub fn tone(&self, tone: Tone) -> Option<Color> {
        match tone {
            Tone::Good => self.good,
            Tone::Warn => self.warn,
            Tone::Bad => self.bad,
        }
    }

    /// Colour for a single workload score
    pub fn score_color(&self, score: u64) -> Option<Color> {
        if score >= 100 {
            self.good
        } else if score >= 50 {
            self.warn
        } else {
            self.bad
        }
    }
}

/// Apply an optional colour to already formatted text
pub fn paint(text: &str, color: Option<Color>) -> String {
    match color {
        Some(color) => style(text).with(color).to_string(),
        None => text.to_string(),
    }
}
