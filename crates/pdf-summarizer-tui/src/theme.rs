use std::str::FromStr;

use ratatui::style::{Color, Modifier, Style};

/// The two visual presentations the window can switch between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unknown theme '{}' (expected light or dark)", other)),
        }
    }
}

/// Color theme for the TUI.
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub dim: Color,
    pub input_bg: Color,
    pub input_fg: Color,
    pub border: Color,
    pub button_bg: Color,
    pub button_fg: Color,
    pub header_fg: Color,
    pub header_bg: Color,
    pub active: Color,
    pub spinner: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl Theme {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    /// White window, black text, light grey inputs and buttons.
    pub fn light() -> Self {
        Self {
            background: Color::Rgb(0xFF, 0xFF, 0xFF),
            text: Color::Rgb(0x00, 0x00, 0x00),
            dim: Color::Rgb(0x80, 0x80, 0x80),
            input_bg: Color::Rgb(0xF5, 0xF5, 0xF5),
            input_fg: Color::Rgb(0x00, 0x00, 0x00),
            border: Color::Rgb(0xCC, 0xCC, 0xCC),
            button_bg: Color::Rgb(0xE0, 0xE0, 0xE0),
            button_fg: Color::Rgb(0x00, 0x00, 0x00),
            header_fg: Color::Rgb(0xFF, 0xFF, 0xFF),
            header_bg: Color::Rgb(0x30, 0x60, 0xA0),
            active: Color::Rgb(0x30, 0x60, 0xA0),
            spinner: Color::Rgb(0x30, 0x60, 0xA0),
            success: Color::Rgb(0x00, 0x80, 0x30),
            warning: Color::Rgb(0xB0, 0x70, 0x00),
            error: Color::Rgb(0xC0, 0x20, 0x20),
        }
    }

    /// Charcoal window, light grey text, darker inputs.
    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(0x20, 0x20, 0x20),
            text: Color::Rgb(0xE0, 0xE0, 0xE0),
            dim: Color::Rgb(0x88, 0x88, 0x88),
            input_bg: Color::Rgb(0x1E, 0x1E, 0x1E),
            input_fg: Color::Rgb(0xFF, 0xFF, 0xFF),
            border: Color::Rgb(0x55, 0x55, 0x55),
            button_bg: Color::Rgb(0x44, 0x44, 0x44),
            button_fg: Color::Rgb(0xE0, 0xE0, 0xE0),
            header_fg: Color::Rgb(0x20, 0x20, 0x20),
            header_bg: Color::Rgb(0x6C, 0xA0, 0xF0),
            active: Color::Rgb(0x6C, 0xA0, 0xF0),
            spinner: Color::Rgb(0x6C, 0xA0, 0xF0),
            success: Color::Rgb(0x50, 0xD0, 0x70),
            warning: Color::Rgb(0xF0, 0xC0, 0x40),
            error: Color::Rgb(0xFF, 0x60, 0x60),
        }
    }

    pub fn base_style(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.header_fg)
            .bg(self.header_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn input_style(&self) -> Style {
        Style::default().fg(self.input_fg).bg(self.input_bg)
    }

    /// Style for a control button; disabled buttons are dimmed and crossed out.
    pub fn button_style(&self, enabled: bool) -> Style {
        if enabled {
            Style::default()
                .fg(self.button_fg)
                .bg(self.button_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(self.dim)
                .bg(self.background)
                .add_modifier(Modifier::CROSSED_OUT)
        }
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn highlight_style(&self) -> Style {
        Style::default()
            .fg(self.header_fg)
            .bg(self.active)
            .add_modifier(Modifier::BOLD)
    }

    pub fn footer_style(&self) -> Style {
        Style::default().fg(self.dim)
    }
}
