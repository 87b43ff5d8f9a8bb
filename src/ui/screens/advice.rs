use super::{lookup_layout, render_location, render_lookup_state, render_title};
use crate::app::{LocationInput, LookupState};
use crate::models::{AdviceResult, NO_ADVICE_MESSAGE};
use crate::ui::components::{NavBar, StatusLine};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

pub struct AdviceScreen<'a> {
    pub state: &'a LookupState<AdviceResult>,
    pub location: &'a LocationInput,
    pub editing: bool,
    pub status_message: Option<&'a str>,
    pub status_is_error: bool,
    pub theme: Theme,
}

impl<'a> AdviceScreen<'a> {
    pub fn new(
        state: &'a LookupState<AdviceResult>,
        location: &'a LocationInput,
        theme: Theme,
    ) -> Self {
        Self {
            state,
            location,
            editing: false,
            status_message: None,
            status_is_error: false,
            theme,
        }
    }

    pub fn editing(mut self, editing: bool) -> Self {
        self.editing = editing;
        self
    }

    pub fn with_status(mut self, status: Option<&'a str>, is_error: bool) -> Self {
        self.status_message = status;
        self.status_is_error = is_error;
        self
    }

    fn render_result(&self, result: &AdviceResult, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let block = Block::default()
            .title(Span::styled(
                format!("Health advice for {}", result.location),
                theme.header(),
            ))
            .borders(Borders::ALL)
            .border_style(theme.border());

        let mut lines = vec![
            Line::from(vec![
                Span::styled("Weather: ", theme.dim()),
                Span::styled(
                    result.weather.to_string(),
                    Style::default().fg(theme.weather_color(result.weather)),
                ),
                Span::styled("   Air quality: ", theme.dim()),
                Span::styled(
                    result.air_quality.to_string(),
                    Style::default().fg(theme.air_quality_color(result.air_quality)),
                ),
            ]),
            Line::from(""),
        ];

        if result.is_empty() {
            lines.push(Line::from(Span::styled(NO_ADVICE_MESSAGE, theme.dim())));
        } else {
            for advice in &result.advice {
                lines.push(Line::from(vec![
                    Span::styled("• ", Style::default().fg(theme.accent())),
                    Span::styled(advice.clone(), theme.normal()),
                ]));
                for _ in 0..theme.spacing() {
                    lines.push(Line::from(""));
                }
            }
        }

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

impl Widget for AdviceScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = lookup_layout(area);
        let theme = self.theme;

        render_title("Health Advice", "guidance for current conditions", theme, chunks[0], buf);
        render_location(self.location, self.editing, theme, chunks[1], buf);

        if let Some(result) = render_lookup_state(
            self.state,
            "Health Advice",
            "Gathering conditions and advice...",
            theme,
            chunks[2],
            buf,
        ) {
            self.render_result(result, chunks[2], buf);
        }

        StatusLine::new(self.status_message, theme)
            .error(self.status_is_error)
            .render(chunks[3], buf);

        NavBar::new(theme)
            .screens()
            .item("[/]", "Location")
            .item("[Enter]", "Get advice")
            .item("[q]", "Quit")
            .render(chunks[4], buf);
    }
}
