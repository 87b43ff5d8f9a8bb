use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Bottom key-hint bar: `[key]Label` pairs.
pub struct NavBar<'a> {
    items: Vec<(&'a str, &'a str)>,
    theme: Theme,
}

impl<'a> NavBar<'a> {
    pub fn new(theme: Theme) -> Self {
        Self {
            items: Vec::new(),
            theme,
        }
    }

    pub fn item(mut self, key: &'a str, label: &'a str) -> Self {
        self.items.push((key, label));
        self
    }

    /// Screen switch keys shared by every screen.
    pub fn screens(self) -> Self {
        self.item("[1]", "Weather")
            .item("[2]", "Air Quality")
            .item("[3]", "Advice")
            .item("[4]", "Tracker")
            .item("[s]", "Settings")
    }
}

impl Widget for NavBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::with_capacity(self.items.len() * 2);
        for (key, label) in self.items {
            spans.push(Span::styled(key, self.theme.nav_key()));
            spans.push(Span::styled(format!("{} ", label), self.theme.nav_label()));
        }
        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

/// One-line status/error message above the nav bar.
pub struct StatusLine<'a> {
    message: Option<&'a str>,
    is_error: bool,
    theme: Theme,
}

impl<'a> StatusLine<'a> {
    pub fn new(message: Option<&'a str>, theme: Theme) -> Self {
        Self {
            message,
            is_error: false,
            theme,
        }
    }

    pub fn error(mut self, is_error: bool) -> Self {
        self.is_error = is_error;
        self
    }
}

impl Widget for StatusLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if let Some(msg) = self.message {
            let style = if self.is_error {
                self.theme.warning()
            } else {
                self.theme.success()
            };
            Paragraph::new(Span::styled(msg, style)).render(area, buf);
        }
    }
}
