use super::{lookup_layout, render_location, render_lookup_state, render_title};
use crate::app::{LocationInput, LookupState};
use crate::models::WeatherLookup;
use crate::ui::components::{humidity_gauge, temperature_gauge, wind_gauge, NavBar, StatusLine};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct WeatherScreen<'a> {
    pub state: &'a LookupState<WeatherLookup>,
    pub location: &'a LocationInput,
    pub editing: bool,
    pub status_message: Option<&'a str>,
    pub status_is_error: bool,
    pub theme: Theme,
}

impl<'a> WeatherScreen<'a> {
    pub fn new(
        state: &'a LookupState<WeatherLookup>,
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
}

impl Widget for WeatherScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = lookup_layout(area);
        let theme = self.theme;

        render_title("Weather", "current conditions", theme, chunks[0], buf);
        render_location(self.location, self.editing, theme, chunks[1], buf);

        if let Some(lookup) = render_lookup_state(
            self.state,
            "Current Weather",
            "Fetching current weather...",
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

impl WeatherScreen<'_> {
    fn render_lookup(&self, lookup: &WeatherLookup, area: Rect, buf: &mut Buffer) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(4)])
            .split(area);

        let gauges = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(34),
                Constraint::Percentage(33),
                Constraint::Percentage(33),
            ])
            .split(rows[0]);

        let weather = &lookup.weather;
        temperature_gauge("Temperature", Some(weather.temperature_celsius), self.theme)
            .render(gauges[0], buf);
        humidity_gauge("Humidity", Some(weather.humidity_percent), self.theme)
            .render(gauges[1], buf);
        wind_gauge("Wind", Some(weather.wind_speed_ms), self.theme).render(gauges[2], buf);

        let place = if weather.place_name.is_empty() {
            lookup.query.as_str()
        } else {
            weather.place_name.as_str()
        };

        let block = Block::default()
            .title(Span::styled(place.to_string(), self.theme.header()))
            .borders(Borders::ALL)
            .border_style(self.theme.border());

        let condition_style =
            Style::default().fg(self.theme.weather_color(lookup.condition));
        let lines = vec![
            Line::from(vec![
                Span::styled(
                    format!("{} {}", lookup.condition.symbol(), lookup.condition),
                    condition_style,
                ),
                Span::styled(format!("  {}", weather.display_description()), self.theme.normal()),
            ]),
            Line::from(Span::styled(
                if weather.has_precipitation {
                    "Precipitation: yes"
                } else {
                    "Precipitation: none"
                },
                self.theme.normal(),
            )),
            Line::from(Span::styled(
                format!("Coordinates: {}", lookup.coordinate),
                self.theme.dim(),
            )),
        ];

        Paragraph::new(lines).block(block).render(rows[1], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinate, CurrentWeather, WeatherCondition};
    use crate::ui::screens::buffer_text;

    #[test]
    fn renders_ready_lookup() {
        let state = LookupState::Ready(WeatherLookup {
            query: "London".into(),
            coordinate: Coordinate::new(51.5073, -0.1276),
            weather: CurrentWeather {
                place_name: "London".into(),
                temperature_celsius: 28.0,
                description: "clear sky".into(),
                humidity_percent: 40.0,
                wind_speed_ms: 3.6,
                has_precipitation: false,
            },
            condition: WeatherCondition::Hot,
        });
        let location = LocationInput::default();
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        WeatherScreen::new(&state, &location, Theme::default()).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("28.0°C"));
        assert!(text.contains("Clear sky"));
        assert!(text.contains("hot"));
    }

    #[test]
    fn renders_failure_message() {
        let state: LookupState<WeatherLookup> =
            LookupState::Failed("could not find coordinates".into());
        let location = LocationInput::default();
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        WeatherScreen::new(&state, &location, Theme::default()).render(area, &mut buf);

        assert!(buffer_text(&buf).contains("could not find coordinates"));
    }
}
