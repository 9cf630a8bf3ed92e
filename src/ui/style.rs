//! Theming and color definitions.
//!
//! Semantic ANSI styles for the grid, chosen per editor kind so a
//! column reads consistently, with light and dark variants.

use ratatui::style::{Color, Modifier, Style};

use crate::config::ThemeMode;

/// Theme configuration for the entire application.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Column header row
    pub header: Style,
    /// Plain text cells
    pub text: Style,
    /// Price cells
    pub price: Style,
    /// Numeric cells
    pub numeric: Style,
    /// Column separator
    pub grid_border: Style,
    /// Status bar background
    pub status_bg: Color,
    /// Status bar foreground
    pub status_fg: Color,
    /// Edit bar (shown while a cell editor is active)
    pub edit_bar: Style,
    /// Block cursor inside the inline editor
    pub cursor: Style,
}

impl Theme {
    /// Create a theme optimized for dark terminals.
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            text: Style::default(),
            price: Style::default().fg(Color::Green),
            numeric: Style::default().fg(Color::Yellow),
            grid_border: Style::default().fg(Color::Indexed(240)),
            status_bg: Color::Indexed(236),
            status_fg: Color::Indexed(252),
            edit_bar: Style::default().bg(Color::Magenta).fg(Color::White),
            cursor: Style::default().bg(Color::White).fg(Color::Black),
        }
    }

    /// Create a theme optimized for light terminals.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Indexed(31))
                .add_modifier(Modifier::BOLD),
            text: Style::default(),
            price: Style::default().fg(Color::Indexed(28)),
            numeric: Style::default().fg(Color::Indexed(136)),
            grid_border: Style::default().fg(Color::Indexed(245)),
            status_bg: Color::Indexed(252),
            status_fg: Color::Indexed(235),
            edit_bar: Style::default().bg(Color::Indexed(133)).fg(Color::White),
            cursor: Style::default().bg(Color::Black).fg(Color::White),
        }
    }

    /// Resolve a theme from the configured mode, consulting the
    /// terminal environment once for `Auto`.
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Auto => {
                if light_background_from_env(std::env::var("COLORFGBG").ok().as_deref()) {
                    Self::light()
                } else {
                    Self::dark()
                }
            }
        }
    }

    /// The style a column's cells (and its inline editor) render with.
    pub fn style_for_editor(&self, editor: &str) -> Style {
        match editor {
            "price" => self.price,
            "numeric" => self.numeric,
            _ => self.text,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

/// `COLORFGBG` is "fg;bg" (sometimes "fg;default;bg"); the standard
/// light backgrounds are ANSI 7 and 15.
fn light_background_from_env(colorfgbg: Option<&str>) -> bool {
    let Some(value) = colorfgbg else {
        return false;
    };
    let Some(bg) = value.split(';').next_back() else {
        return false;
    };
    matches!(bg.trim().parse::<u8>(), Ok(7 | 15))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_styles_are_bold() {
        assert!(Theme::dark().header.add_modifier.contains(Modifier::BOLD));
        assert!(Theme::light().header.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_style_for_editor_distinguishes_kinds() {
        let theme = Theme::dark();
        assert_ne!(theme.style_for_editor("price"), theme.style_for_editor("text"));
        assert_eq!(
            theme.style_for_editor("unknown"),
            theme.style_for_editor("text")
        );
    }

    #[test]
    fn test_light_background_detection() {
        assert!(light_background_from_env(Some("0;15")));
        assert!(light_background_from_env(Some("0;default;7")));
        assert!(!light_background_from_env(Some("15;0")));
        assert!(!light_background_from_env(None));
    }

    #[test]
    fn test_for_mode_explicit_values() {
        // Compare a field that differs between the two variants.
        assert_eq!(
            Theme::for_mode(ThemeMode::Dark).status_bg,
            Theme::dark().status_bg
        );
        assert_eq!(
            Theme::for_mode(ThemeMode::Light).status_bg,
            Theme::light().status_bg
        );
    }
}
