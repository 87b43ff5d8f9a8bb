use super::render_title;
use crate::app::SettingsField;
use crate::models::AccessibilitySettings;
use crate::ui::components::{NavBar, StatusLine};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

pub struct SettingsScreen<'a> {
    pub settings: AccessibilitySettings,
    pub focused_field: SettingsField,
    pub status_message: Option<&'a str>,
    pub status_is_error: bool,
}

impl<'a> SettingsScreen<'a> {
    pub fn new(settings: AccessibilitySettings) -> Self {
        Self {
            settings,
            focused_field: SettingsField::HighContrast,
            status_message: None,
            status_is_error: false,
        }
    }

    pub fn with_focus(mut self, field: SettingsField) -> Self {
        self.focused_field = field;
        self
    }

    pub fn with_status(mut self, status: Option<&'a str>, is_error: bool) -> Self {
        self.status_message = status;
        self.status_is_error = is_error;
        self
    }

    fn is_enabled(&self, field: SettingsField) -> bool {
        match field {
            SettingsField::HighContrast => self.settings.high_contrast,
            SettingsField::LargeFont => self.settings.large_font,
        }
    }
}

impl Widget for SettingsScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Preview the settings being edited
        let theme = Theme::new(self.settings);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Length(SettingsField::all().len() as u16 * 3 + 2),
                Constraint::Min(3), // Help
                Constraint::Length(1), // Status message
                Constraint::Length(1), // Nav
            ])
            .split(area);

        render_title("Settings", "accessibility", theme, chunks[0], buf);
        self.render_toggles(theme, chunks[1], buf);
        self.render_help(theme, chunks[2], buf);

        StatusLine::new(self.status_message, theme)
            .error(self.status_is_error)
            .render(chunks[3], buf);

        NavBar::new(theme)
            .screens()
            .item("[↑↓]", "Navigate")
            .item("[Enter]", "Toggle")
            .item("[q]", "Quit")
            .render(chunks[4], buf);
    }
}

impl SettingsScreen<'_> {
    fn render_toggles(&self, theme: Theme, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Display")
            .borders(Borders::ALL)
            .border_style(theme.border());

        let inner = block.inner(area);
        block.render(area, buf);

        let field_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(SettingsField::all().iter().map(|_| Constraint::Length(3)))
            .split(inner);

        for (field, field_area) in SettingsField::all().iter().zip(field_areas.iter()) {
            let is_focused = *field == self.focused_field;
            let enabled = self.is_enabled(*field);

            let border_style = if is_focused {
                theme.border_focused()
            } else {
                theme.border()
            };

            let value_style = if is_focused {
                theme.selected()
            } else {
                theme.normal()
            };

            let field_block = Block::default()
                .title(field.label())
                .borders(Borders::ALL)
                .border_style(border_style);

            let field_inner = field_block.inner(*field_area);
            field_block.render(*field_area, buf);

            let value = if enabled { "[x] On" } else { "[ ] Off" };
            Paragraph::new(Span::styled(value, value_style)).render(field_inner, buf);
        }
    }

    fn render_help(&self, theme: Theme, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("About")
            .borders(Borders::ALL)
            .border_style(theme.border());

        let help_text = match self.focused_field {
            SettingsField::HighContrast => {
                "Switches to a black background with bright, saturated colors."
            }
            SettingsField::LargeFont => {
                "Terminals control font size; this makes text bold and adds spacing between items."
            }
        };

        Paragraph::new(Line::from(Span::styled(help_text, theme.dim())))
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::screens::buffer_text;

    #[test]
    fn shows_toggle_state() {
        let settings = AccessibilitySettings {
            high_contrast: true,
            large_font: false,
        };
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        SettingsScreen::new(settings)
            .with_focus(SettingsField::LargeFont)
            .render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("High contrast"));
        assert!(text.contains("[x] On"));
        assert!(text.contains("[ ] Off"));
        assert!(text.contains("Terminals control font size"));
    }
}
