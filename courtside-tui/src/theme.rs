//! Parrot/neon theme tokens for the Courtside TUI
//!
//! # Color Palette
//! - **Background**: Near-black / deep charcoal (base layer)
//! - **Accent**: Electric cyan (primary highlights, focus)
//! - **Positive**: Neon green (wins, above-average values)
//! - **Negative**: Hot pink (losses, errors, outliers)
//! - **Warning**: Neon orange (alerts, medians)
//! - **Neutral**: Cool purple (secondary info)
//! - **Muted**: Steel blue (disabled, secondary text)
//!
//! Views use the free style functions (`theme::accent()` and friends);
//! widgets that render straight into a `Buffer` take a [`Theme`].

use ratatui::style::{Color, Modifier, Style};

pub const BACKGROUND: Color = Color::Rgb(18, 18, 20);
pub const ACCENT: Color = Color::Rgb(0, 255, 255);
pub const POSITIVE: Color = Color::Rgb(0, 255, 128);
pub const NEGATIVE: Color = Color::Rgb(255, 20, 147);
pub const WARNING: Color = Color::Rgb(255, 140, 0);
pub const NEUTRAL: Color = Color::Rgb(147, 112, 219);
pub const MUTED: Color = Color::Rgb(100, 149, 237);
pub const TEXT_SECONDARY: Color = Color::Rgb(170, 170, 170);

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub accent: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub neutral: Color,
    pub muted: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::parrot_neon()
    }
}

impl Theme {
    pub fn parrot_neon() -> Self {
        Self {
            background: BACKGROUND,
            accent: ACCENT,
            positive: POSITIVE,
            negative: NEGATIVE,
            warning: WARNING,
            neutral: NEUTRAL,
            muted: MUTED,
            text_primary: Color::White,
            text_secondary: TEXT_SECONDARY,
        }
    }

    /// Win/loss result colour: `W` green, `L` pink, anything else secondary.
    pub fn result_color(&self, result: &str) -> Color {
        match result.trim().chars().next() {
            Some('W') | Some('w') => self.positive,
            Some('L') | Some('l') => self.negative,
            _ => self.text_secondary,
        }
    }

    /// Colour for a winning percentage in `[0, 1]`.
    pub fn win_pct_color(&self, pct: f64) -> Color {
        match pct {
            p if p >= 0.6 => self.positive,
            p if p >= 0.5 => self.accent,
            p if p >= 0.4 => self.neutral,
            _ => self.negative,
        }
    }
}

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn text() -> Style {
    Style::default().fg(TEXT_SECONDARY)
}

/// Highlighted row under the cursor.
pub fn selected() -> Style {
    accent().add_modifier(Modifier::REVERSED)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}

pub fn result_style(result: &str) -> Style {
    Style::default().fg(Theme::default().result_color(result))
}
