use super::{lookup_layout, render_location, render_lookup_state, render_title};
use crate::app::{LocationInput, LookupState};
use crate::models::AirQualityLookup;
use crate::ui::components::{aqi_gauge, NavBar, StatusLine};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct AirQualityScreen<'a> {
    pub state: &'a LookupState<AirQualityLookup>,
    pub location: &'a LocationInput,
    pub editing: bool,
    pub status_message: Option<&'a str>,
    pub status_is_error: bool,
    pub theme: Theme,
}

impl<'a> AirQualityScreen<'a> {
    pub fn new(
        state: &'a LookupState<AirQualityLookup>,
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

    fn render_lookup(&self, lookup: &AirQualityLookup, area: Rect, buf: &mut Buffer) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(4)])
            .split(area);

        aqi_gauge("Air Quality Index", Some(lookup.report.aqi), self.theme).render(rows[0], buf);

        let block = Block::default()
            .title(Span::styled(
                format!("Pollutants near {} (µg/m³)", lookup.query),
                self.theme.header(),
            ))
            .borders(Borders::ALL)
            .border_style(self.theme.border());

        let components = lookup.report.components.labelled();
        let mut lines: Vec<Line> = components
            .chunks(2)
            .map(|pair| {
                let spans = pair
                    .iter()
                    .flat_map(|(label, value)| {
                        [
                            Span::styled(format!("{:<6}", label), self.theme.dim()),
                            Span::styled(format!("{:>9.2}    ", value), self.theme.normal()),
                        ]
                    })
                    .collect::<Vec<_>>();
                Line::from(spans)
            })
            .collect();

        for _ in 0..self.theme.spacing() {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            format!("Coordinates: {}", lookup.coordinate),
            self.theme.dim(),
        )));

        Paragraph::new(lines).block(block).render(rows[1], buf);
    }
}

impl Widget for AirQualityScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = lookup_layout(area);
        let theme = self.theme;

        render_title("Air Quality", "index and pollutants", theme, chunks[0], buf);
        render_location(self.location, self.editing, theme, chunks[1], buf);

        if let Some(lookup) = render_lookup_state(
            self.state,
            "Air Quality",
            "Fetching air quality...",
            theme,
            chunks[2],
            buf,
        ) {
            self.render_lookup(lookup, chunks[2], buf);
        }

        StatusLine::new(self.status_message, theme)
            .error(self.status_is_error)
            .render(chunks[3], buf);

        NavBar::new(theme)
            .screens()
            .item("[/]", "Location")
            .item("[Enter]", "Look up")
            .item("[q]", "Quit")
            .render(chunks[4], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AirQualityCondition, AirQualityReport, Coordinate, PollutantComponents};
    use crate::ui::screens::buffer_text;

    #[test]
    fn renders_index_and_pollutants() {
        let state = LookupState::Ready(AirQualityLookup {
            query: "Paris".into(),
            coordinate: Coordinate::new(48.8566, 2.3522),
            report: AirQualityReport {
                aqi: 4,
                components: PollutantComponents {
                    pm2_5: 31.7,
                    ..Default::default()
                },
            },
            condition: AirQualityCondition::Poor,
        });
        let location = LocationInput::default();
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        AirQualityScreen::new(&state, &location, Theme::default()).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("4 Poor"));
        assert!(text.contains("PM2.5"));
        assert!(text.contains("31.70"));
    }

    #[test]
    fn idle_prompts_for_location() {
        let state: LookupState<AirQualityLookup> = LookupState::Idle;
        let location = LocationInput::default();
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        AirQualityScreen::new(&state, &location, Theme::default()).render(area, &mut buf);

        assert!(buffer_text(&buf).contains("Enter a location"));
    }
}
