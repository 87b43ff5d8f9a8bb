use crate::models::{AccessibilitySettings, AirQualityCondition, WeatherCondition};
use ratatui::style::{Color, Modifier, Style};

/// Colours and text weight for one render pass, derived from the session's accessibility
/// preferences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Theme {
    high_contrast: bool,
    large_font: bool,
}

impl Theme {
    // Status colors
    pub const SUCCESS: Color = Color::Green;
    pub const WARNING: Color = Color::Yellow;
    pub const ERROR: Color = Color::Red;

    // Environmental colors
    pub const TEMP_COLD: Color = Color::LightBlue;
    pub const TEMP_MILD: Color = Color::Green;
    pub const TEMP_HOT: Color = Color::Red;
    pub const RAIN: Color = Color::Cyan;

    pub fn new(settings: AccessibilitySettings) -> Self {
        Self {
            high_contrast: settings.high_contrast,
            large_font: settings.large_font,
        }
    }

    pub fn fg(&self) -> Color {
        Color::White
    }

    pub fn dim_color(&self) -> Color {
        if self.high_contrast {
            Color::Gray
        } else {
            Color::DarkGray
        }
    }

    pub fn accent(&self) -> Color {
        if self.high_contrast {
            Color::Yellow
        } else {
            Color::Green
        }
    }

    fn highlight_color(&self) -> Color {
        if self.high_contrast {
            Color::LightYellow
        } else {
            Color::Cyan
        }
    }

    /// Terminals cannot scale glyphs, so large text renders bold with blank lines between
    /// list entries.
    fn text(&self, style: Style) -> Style {
        let style = if self.high_contrast {
            style.bg(Color::Black)
        } else {
            style
        };
        if self.large_font {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }

    // Styles
    pub fn title(&self) -> Style {
        self.text(Style::default().fg(self.accent()).add_modifier(Modifier::BOLD))
    }

    pub fn header(&self) -> Style {
        self.text(Style::default().fg(self.fg()).add_modifier(Modifier::BOLD))
    }

    pub fn normal(&self) -> Style {
        self.text(Style::default().fg(self.fg()))
    }

    pub fn dim(&self) -> Style {
        self.text(Style::default().fg(self.dim_color()))
    }

    pub fn highlight(&self) -> Style {
        self.text(
            Style::default()
                .fg(self.highlight_color())
                .add_modifier(Modifier::BOLD),
        )
    }

    pub fn selected(&self) -> Style {
        if self.high_contrast {
            Style::default()
                .bg(Color::White)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .bg(Color::DarkGray)
                .fg(self.fg())
                .add_modifier(Modifier::BOLD)
        }
    }

    pub fn success(&self) -> Style {
        self.text(Style::default().fg(Self::SUCCESS))
    }

    pub fn warning(&self) -> Style {
        self.text(Style::default().fg(Self::WARNING))
    }

    pub fn error(&self) -> Style {
        self.text(Style::default().fg(Self::ERROR).add_modifier(Modifier::BOLD))
    }

    pub fn nav_key(&self) -> Style {
        Style::default()
            .fg(self.accent())
            .add_modifier(Modifier::BOLD)
    }

    pub fn nav_label(&self) -> Style {
        self.text(Style::default().fg(self.dim_color()))
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.dim_color())
    }

    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.accent())
    }

    /// Blank lines between list entries.
    pub fn spacing(&self) -> usize {
        usize::from(self.large_font)
    }

    pub fn weather_color(&self, condition: WeatherCondition) -> Color {
        match condition {
            WeatherCondition::Hot => Self::TEMP_HOT,
            WeatherCondition::Cold => Self::TEMP_COLD,
            WeatherCondition::Rainy => Self::RAIN,
            WeatherCondition::Moderate => Self::TEMP_MILD,
        }
    }

    pub fn air_quality_color(&self, condition: AirQualityCondition) -> Color {
        match condition {
            AirQualityCondition::Good => Color::Green,
            AirQualityCondition::Fair => Color::LightGreen,
            AirQualityCondition::Moderate => Color::Yellow,
            AirQualityCondition::Poor => Color::LightRed,
            AirQualityCondition::VeryPoor => Color::Red,
            AirQualityCondition::Unknown => self.dim_color(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_contrast_changes_palette() {
        let normal = Theme::default();
        let contrast = Theme::new(AccessibilitySettings {
            high_contrast: true,
            large_font: false,
        });
        assert_ne!(normal.dim_color(), contrast.dim_color());
        assert_eq!(contrast.normal().bg, Some(Color::Black));
        assert_eq!(normal.normal().bg, None);
    }

    #[test]
    fn large_font_is_bold_and_spaced() {
        let large = Theme::new(AccessibilitySettings {
            high_contrast: false,
            large_font: true,
        });
        assert!(large.normal().add_modifier.contains(Modifier::BOLD));
        assert!(!Theme::default().normal().add_modifier.contains(Modifier::BOLD));
        assert_eq!(large.spacing(), 1);
    }
}
