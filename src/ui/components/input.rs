use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct InputWidget<'a> {
    label: &'a str,
    value: &'a str,
    placeholder: &'a str,
    focused: bool,
    cursor_position: usize,
    theme: Theme,
}

impl<'a> InputWidget<'a> {
    pub fn new(label: &'a str, value: &'a str, theme: Theme) -> Self {
        Self {
            label,
            value,
            placeholder: "",
            focused: false,
            cursor_position: value.chars().count(),
            theme,
        }
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Cursor position in characters, not bytes.
    pub fn cursor(mut self, position: usize) -> Self {
        self.cursor_position = position;
        self
    }
}

impl Widget for InputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused()
        } else {
            self.theme.border()
        };

        let block = Block::default()
            .title(self.label)
            .borders(Borders::ALL)
            .border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);

        if !self.focused {
            let line = if self.value.is_empty() {
                Line::from(Span::styled(self.placeholder, self.theme.dim()))
            } else {
                Line::from(Span::styled(self.value, self.theme.normal()))
            };
            Paragraph::new(line).render(inner, buf);
            return;
        }

        // Show cursor
        let before: String = self.value.chars().take(self.cursor_position).collect();
        let mut after = self.value.chars().skip(self.cursor_position);
        let cursor_char = after.next().unwrap_or(' ');
        let rest: String = after.collect();

        let line = Line::from(vec![
            Span::styled(before, self.theme.normal()),
            Span::styled(cursor_char.to_string(), self.theme.selected()),
            Span::styled(rest, self.theme.normal()),
        ]);
        Paragraph::new(line).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn renders_value_with_multibyte_cursor() {
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        InputWidget::new("Location", "São Paulo", Theme::default())
            .focused(true)
            .cursor(1)
            .render(area, &mut buf);
        assert!(row(&buf, 1).contains("São Paulo"));
    }

    #[test]
    fn unfocused_empty_shows_placeholder() {
        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);
        InputWidget::new("Location", "", Theme::default())
            .placeholder("City or lat,lon")
            .render(area, &mut buf);
        assert!(row(&buf, 1).contains("City or lat,lon"));
    }
}
