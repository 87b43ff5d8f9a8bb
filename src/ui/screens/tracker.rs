use super::{render_lookup_state, render_title};
use crate::app::{EntryField, EntryForm, TrackerState};
use crate::logic::tracker::LOGIN_REQUIRED;
use crate::models::{severity_label, HealthLog};
use crate::ui::components::{InputWidget, NavBar, StatusLine};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::Span,
    widgets::{
        Block, Borders, Cell, Paragraph, Row, StatefulWidget, Table, TableState, Widget, Wrap,
    },
};

pub struct TrackerScreen<'a> {
    pub state: &'a TrackerState,
    pub signed_in_as: Option<&'a str>,
    pub status_message: Option<&'a str>,
    pub status_is_error: bool,
    pub theme: Theme,
}

impl<'a> TrackerScreen<'a> {
    pub fn new(state: &'a TrackerState, signed_in_as: Option<&'a str>, theme: Theme) -> Self {
        Self {
            state,
            signed_in_as,
            status_message: None,
            status_is_error: false,
            theme,
        }
    }

    pub fn with_status(mut self, status: Option<&'a str>, is_error: bool) -> Self {
        self.status_message = status;
        self.status_is_error = is_error;
        self
    }
}

impl Widget for TrackerScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let form_height = if self.state.form.is_some() {
            EntryField::all().len() as u16 * 3
        } else {
            0
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),           // Title
                Constraint::Min(5),              // Log table
                Constraint::Length(form_height), // Entry form
                Constraint::Length(1),           // Status message
                Constraint::Length(1),           // Nav
            ])
            .split(area);

        let theme = self.theme;
        let subtitle = match self.signed_in_as {
            Some(email) => format!("signed in as {}", email),
            None => "not signed in".to_string(),
        };
        render_title("Health Tracker", &subtitle, theme, chunks[0], buf);

        if self.signed_in_as.is_none() {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border());
            Paragraph::new(Span::styled(LOGIN_REQUIRED, theme.warning()))
                .block(block)
                .wrap(Wrap { trim: true })
                .render(chunks[1], buf);
        } else if let Some(logs) = render_lookup_state(
            &self.state.logs,
            "Your Health Log",
            "Loading your health log...",
            theme,
            chunks[1],
            buf,
        ) {
            self.render_table(logs, chunks[1], buf);
        }

        if let Some(ref form) = self.state.form {
            self.render_form(form, chunks[2], buf);
        }

        StatusLine::new(self.status_message, theme)
            .error(self.status_is_error)
            .render(chunks[3], buf);

        let nav = if self.state.form.is_some() {
            NavBar::new(theme)
                .item("[Tab]", "Next field")
                .item("[←→]", "Severity")
                .item("[Enter]", "Save")
                .item("[Esc]", "Cancel")
        } else {
            NavBar::new(theme)
                .screens()
                .item("[a]", "Add")
                .item("[r]", "Refresh")
                .item("[o]", "Sign out")
                .item("[q]", "Quit")
        };
        nav.render(chunks[4], buf);
    }
}

impl TrackerScreen<'_> {
    fn render_table(&self, logs: &[HealthLog], area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let block = Block::default()
            .title(Span::styled(
                format!("Your Health Log ({} entries)", logs.len()),
                theme.header(),
            ))
            .borders(Borders::ALL)
            .border_style(theme.border());

        if logs.is_empty() {
            Paragraph::new(Span::styled(
                "No entries yet. Press [a] to add one.",
                theme.dim(),
            ))
            .block(block)
            .render(area, buf);
            return;
        }

        let header = Row::new(
            ["Date", "Symptom", "Severity", "Notes"]
                .iter()
                .map(|h| Cell::from(*h).style(theme.header())),
        )
        .height(1);

        let rows: Vec<Row> = logs
            .iter()
            .map(|log| {
                Row::new(vec![
                    Cell::from(log.log_date.format("%Y-%m-%d").to_string()),
                    Cell::from(log.symptom.clone()),
                    Cell::from(format!("{} ({})", log.severity, log.severity_label())),
                    Cell::from(
                        log.notes
                            .as_deref()
                            .filter(|n| !n.is_empty())
                            .map(|n| truncate(n, 40))
                            .unwrap_or_else(|| "-".to_string()),
                    ),
                ])
                .style(theme.normal())
            })
            .collect();

        let widths = [
            Constraint::Length(12),
            Constraint::Length(20),
            Constraint::Length(14),
            Constraint::Min(20),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(theme.selected());

        let mut state = TableState::default();
        state.select(Some(self.state.selected_index));
        StatefulWidget::render(table, area, buf, &mut state);
    }

    fn render_form(&self, form: &EntryForm, area: Rect, buf: &mut Buffer) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(EntryField::all().iter().map(|_| Constraint::Length(3)))
            .split(area);

        for (field, row) in EntryField::all().iter().zip(rows.iter()) {
            let focused = form.focused_field == *field;
            let value = match field {
                EntryField::Symptom => form.symptom.clone(),
                EntryField::Severity => {
                    format!("{} ({})", form.severity, severity_label(form.severity))
                }
                EntryField::Notes => form.notes.clone(),
            };
            InputWidget::new(field.label(), &value, self.theme)
                .focused(focused)
                .render(*row, buf);
        }
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
