//! UI state - presentation enums and the colour theme

use super::table::Tone;
use ratatui::style::Color;

/// Sidebar section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Dashboard,
    Users,
    Reports,
}

impl Tab {
    pub fn all() -> [Tab; 3] {
        [Tab::Dashboard, Tab::Users, Tab::Reports]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Users => "Users",
            Tab::Reports => "Reports",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Tab::Dashboard => "▤",
            Tab::Users => "☺",
            Tab::Reports => "≡",
        }
    }

    pub fn next(self) -> Tab {
        match self {
            Tab::Dashboard => Tab::Users,
            Tab::Users => Tab::Reports,
            Tab::Reports => Tab::Dashboard,
        }
    }

    pub fn prev(self) -> Tab {
        match self {
            Tab::Dashboard => Tab::Reports,
            Tab::Users => Tab::Dashboard,
            Tab::Reports => Tab::Users,
        }
    }
}

/// Colour palette handed to every `draw` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub dark: bool,
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub highlight_bg: Color,
    pub success: Color,
    pub warning: Color,
    pub danger: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            dark: true,
            background: Color::Reset,
            text: Color::White,
            muted: Color::DarkGray,
            accent: Color::Cyan,
            border: Color::DarkGray,
            highlight_bg: Color::Blue,
            success: Color::Green,
            warning: Color::Yellow,
            danger: Color::Red,
        }
    }

    pub fn light() -> Self {
        Self {
            dark: false,
            background: Color::White,
            text: Color::Black,
            muted: Color::Gray,
            accent: Color::Blue,
            border: Color::Gray,
            highlight_bg: Color::LightBlue,
            success: Color::Green,
            warning: Color::Rgb(180, 120, 0),
            danger: Color::Red,
        }
    }

    pub fn from_dark_mode(dark: bool) -> Self {
        if dark {
            Self::dark()
        } else {
            Self::light()
        }
    }

    pub fn tone(&self, tone: Tone) -> Color {
        match tone {
            Tone::Neutral => self.text,
            Tone::Success => self.success,
            Tone::Warning => self.warning,
            Tone::Danger => self.danger,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_cycle() {
        for tab in Tab::all() {
            assert_eq!(tab.next().prev(), tab);
        }
    }

    #[test]
    fn test_theme_tones() {
        let theme = Theme::light();
        assert_eq!(theme.tone(Tone::Danger), Color::Red);
        assert_eq!(theme.tone(Tone::Neutral), Color::Black);
        assert!(Theme::from_dark_mode(true).dark);
    }
}
