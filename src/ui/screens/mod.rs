pub mod advice;
pub mod air_quality;
pub mod settings;
pub mod tracker;
pub mod weather;

pub use advice::AdviceScreen;
pub use air_quality::AirQualityScreen;
pub use settings::SettingsScreen;
pub use tracker::TrackerScreen;
pub use weather::WeatherScreen;

use crate::app::{LocationInput, LookupState};
use crate::ui::components::InputWidget;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

/// Title, location input, body, status line, nav bar.
pub(crate) fn lookup_layout(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(3), // Location input
            Constraint::Min(6),    // Content
            Constraint::Length(1), // Status message
            Constraint::Length(1), // Nav
        ])
        .split(area)
}

pub(crate) fn render_title(
    title: &str,
    subtitle: &str,
    theme: Theme,
    area: Rect,
    buf: &mut Buffer,
) {
    let line = Line::from(vec![
        Span::styled(title.to_string(), theme.title()),
        Span::styled(format!(" - {}", subtitle), theme.dim()),
    ]);
    Paragraph::new(line).render(area, buf);
}

pub(crate) fn render_location(
    location: &LocationInput,
    editing: bool,
    theme: Theme,
    area: Rect,
    buf: &mut Buffer,
) {
    InputWidget::new("Location", location.value(), theme)
        .placeholder("City name or lat,lon (press / to type)")
        .focused(editing)
        .cursor(location.cursor())
        .render(area, buf);
}

/// Draws the idle/loading/failed body and hands back the value once it is ready.
pub(crate) fn render_lookup_state<'a, T>(
    state: &'a LookupState<T>,
    title: &str,
    loading: &str,
    theme: Theme,
    area: Rect,
    buf: &mut Buffer,
) -> Option<&'a T> {
    if let Some(value) = state.ready() {
        return Some(value);
    }

    let block = Block::default()
        .title(Span::styled(title.to_string(), theme.header()))
        .borders(Borders::ALL)
        .border_style(theme.border());

    let message = if state.is_loading() {
        Span::styled(loading.to_string(), theme.highlight())
    } else if let Some(error) = state.error() {
        Span::styled(error.to_string(), theme.error())
    } else {
        Span::styled(
            "Enter a location and press Enter to look it up.",
            theme.dim(),
        )
    };

    Paragraph::new(message)
        .block(block)
        .wrap(Wrap { trim: true })
        .render(area, buf);
    None
}

#[cfg(test)]
pub(crate) fn buffer_text(buf: &Buffer) -> String {
    let area = buf.area;
    (0..area.height)
        .map(|y| {
            (0..area.width)
                .map(|x| buf[(area.x + x, area.y + y)].symbol().to_string())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
