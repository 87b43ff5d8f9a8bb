use crate::error::Result;
use crate::logic::{user_message, PipelineError};
use crate::models::{
    AdviceResult, AirQualityLookup, HealthLog, Session, WeatherLookup, MAX_SEVERITY, MIN_SEVERITY,
};
use crate::ui::Theme;
use chrono::NaiveDate;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Weather,
    AirQuality,
    Advice,
    Tracker,
    Settings,
}

impl Screen {
    pub fn from_key(c: char) -> Option<Self> {
        match c {
            '1' => Some(Screen::Weather),
            '2' => Some(Screen::AirQuality),
            '3' => Some(Screen::Advice),
            '4' => Some(Screen::Tracker),
            's' | 'S' => Some(Screen::Settings),
            _ => None,
        }
    }

    /// Screens driven by the shared location input.
    pub fn takes_location(&self) -> bool {
        matches!(self, Screen::Weather | Screen::AirQuality | Screen::Advice)
    }
}

/// Outcome of the most recent request made from a screen.
#[derive(Debug, Clone)]
pub enum LookupState<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> Default for LookupState<T> {
    fn default() -> Self {
        LookupState::Idle
    }
}

impl<T> LookupState<T> {
    pub fn from_result<E: Display>(result: std::result::Result<T, E>) -> Self {
        match result {
            Ok(value) => LookupState::Ready(value),
            Err(e) => LookupState::Failed(e.to_string()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LookupState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            LookupState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LookupState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Single-line text input with a character (not byte) cursor.
#[derive(Debug, Clone, Default)]
pub struct LocationInput {
    value: String,
    cursor: usize,
}

impl LocationInput {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.chars().count());
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

/// A new tracker entry as typed into the form.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDraft {
    pub log_date: NaiveDate,
    pub symptom: String,
    pub severity: u8,
    pub notes: String,
}

/// Work the event loop should perform next.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Weather(String),
    AirQuality(String),
    Advice(String),
    LoadLogs,
    AddLog(EntryDraft),
    SignOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryField {
    Symptom,
    Severity,
    Notes,
}

impl EntryField {
    pub fn all() -> &'static [EntryField] {
        &[EntryField::Symptom, EntryField::Severity, EntryField::Notes]
    }

    pub fn label(&self) -> &'static str {
        match self {
            EntryField::Symptom => "Symptom",
            EntryField::Severity => "Severity (1-5)",
            EntryField::Notes => "Notes",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            EntryField::Symptom => EntryField::Severity,
            EntryField::Severity => EntryField::Notes,
            EntryField::Notes => EntryField::Symptom,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            EntryField::Symptom => EntryField::Notes,
            EntryField::Severity => EntryField::Symptom,
            EntryField::Notes => EntryField::Severity,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EntryForm {
    pub focused_field: EntryField,
    pub symptom: String,
    pub severity: u8,
    pub notes: String,
}

impl Default for EntryForm {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryForm {
    pub fn new() -> Self {
        Self {
            focused_field: EntryField::Symptom,
            symptom: String::new(),
            severity: 3,
            notes: String::new(),
        }
    }

    pub fn push_char(&mut self, c: char) {
        match self.focused_field {
            EntryField::Symptom => self.symptom.push(c),
            EntryField::Notes => self.notes.push(c),
            EntryField::Severity => {
                if let Some(level) = c.to_digit(10) {
                    self.severity = (level as u8).clamp(MIN_SEVERITY, MAX_SEVERITY);
                }
            }
        }
    }

    pub fn backspace(&mut self) {
        match self.focused_field {
            EntryField::Symptom => {
                self.symptom.pop();
            }
            EntryField::Notes => {
                self.notes.pop();
            }
            EntryField::Severity => {}
        }
    }

    pub fn adjust_severity(&mut self, delta: i8) {
        let next = self.severity as i16 + delta as i16;
        self.severity = next.clamp(MIN_SEVERITY as i16, MAX_SEVERITY as i16) as u8;
    }

    pub fn to_draft(&self, log_date: NaiveDate) -> EntryDraft {
        EntryDraft {
            log_date,
            symptom: self.symptom.trim().to_string(),
            severity: self.severity,
            notes: self.notes.trim().to_string(),
        }
    }
}

pub struct TrackerState {
    pub logs: LookupState<Vec<HealthLog>>,
    pub selected_index: usize,
    pub form: Option<EntryForm>,
}

impl Default for TrackerState {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackerState {
    pub fn new() -> Self {
        Self {
            logs: LookupState::Idle,
            selected_index: 0,
            form: None,
        }
    }

    pub fn next(&mut self) {
        let max = self.logs.ready().map(Vec::len).unwrap_or(0);
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    pub fn prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    HighContrast,
    LargeFont,
}

impl SettingsField {
    pub fn all() -> &'static [SettingsField] {
        &[SettingsField::HighContrast, SettingsField::LargeFont]
    }

    pub fn label(&self) -> &'static str {
        match self {
            SettingsField::HighContrast => "High contrast",
            SettingsField::LargeFont => "Large text",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            SettingsField::HighContrast => SettingsField::LargeFont,
            SettingsField::LargeFont => SettingsField::HighContrast,
        }
    }

    pub fn prev(&self) -> Self {
        self.next()
    }
}

pub struct SettingsState {
    pub focused_field: SettingsField,
}

impl Default for SettingsState {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsState {
    pub fn new() -> Self {
        Self {
            focused_field: SettingsField::HighContrast,
        }
    }

    pub fn next_field(&mut self) {
        self.focused_field = self.focused_field.next();
    }

    pub fn prev_field(&mut self) {
        self.focused_field = self.focused_field.prev();
    }
}

pub struct App {
    pub screen: Screen,
    pub should_quit: bool,
    pub session: Session,

    // Shared location input
    pub location: LocationInput,
    pub editing_location: bool,

    // Results
    pub weather: LookupState<WeatherLookup>,
    pub air_quality: LookupState<AirQualityLookup>,
    pub advice: LookupState<AdviceResult>,

    // Screen states
    pub tracker_state: TrackerState,
    pub settings_state: SettingsState,

    // UI state
    pub status_message: Option<String>,
    pub status_is_error: bool,
    pending: Option<Request>,
}

impl App {
    pub fn new(session: Session) -> Self {
        Self {
            screen: Screen::Weather,
            should_quit: false,
            session,
            location: LocationInput::default(),
            editing_location: false,
            weather: LookupState::Idle,
            air_quality: LookupState::Idle,
            advice: LookupState::Idle,
            tracker_state: TrackerState::new(),
            settings_state: SettingsState::new(),
            status_message: None,
            status_is_error: false,
            pending: None,
        }
    }

    pub fn theme(&self) -> Theme {
        Theme::new(self.session.accessibility)
    }

    /// True while keystrokes go into a text field instead of switching screens.
    pub fn is_editing(&self) -> bool {
        self.editing_location || self.tracker_state.form.is_some()
    }

    pub fn switch_screen(&mut self, screen: Screen) {
        self.screen = screen;
        self.editing_location = false;
        if screen == Screen::Tracker
            && self.session.is_logged_in()
            && matches!(self.tracker_state.logs, LookupState::Idle)
        {
            self.request_logs();
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, message: &str) {
        self.status_message = Some(message.to_string());
        self.status_is_error = false;
    }

    pub fn set_error(&mut self, message: &str) {
        self.status_message = Some(message.to_string());
        self.status_is_error = true;
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
        self.status_is_error = false;
    }

    pub fn take_request(&mut self) -> Option<Request> {
        self.pending.take()
    }

    pub fn begin_location_edit(&mut self) {
        if self.screen.takes_location() {
            self.editing_location = true;
        }
    }

    pub fn cancel_location_edit(&mut self) {
        self.editing_location = false;
    }

    /// Queue a lookup for the current screen with whatever is in the input.
    pub fn submit_location(&mut self) {
        self.editing_location = false;
        let query = self.location.value().trim().to_string();

        self.pending = match self.screen {
            Screen::Weather => {
                self.weather = LookupState::Loading;
                Some(Request::Weather(query))
            }
            Screen::AirQuality => {
                self.air_quality = LookupState::Loading;
                Some(Request::AirQuality(query))
            }
            Screen::Advice => {
                self.advice = LookupState::Loading;
                Some(Request::Advice(query))
            }
            Screen::Tracker | Screen::Settings => None,
        };
        self.clear_status();
    }

    pub fn finish_weather(&mut self, result: std::result::Result<WeatherLookup, PipelineError>) {
        self.weather = LookupState::from_result(result);
    }

    pub fn finish_air_quality(
        &mut self,
        result: std::result::Result<AirQualityLookup, PipelineError>,
    ) {
        self.air_quality = LookupState::from_result(result);
    }

    pub fn finish_advice(&mut self, result: std::result::Result<AdviceResult, PipelineError>) {
        self.advice = LookupState::from_result(result);
    }

    // Tracker

    pub fn request_logs(&mut self) {
        self.tracker_state.logs = LookupState::Loading;
        self.pending = Some(Request::LoadLogs);
    }

    pub fn finish_logs(&mut self, result: Result<Vec<HealthLog>>) {
        self.tracker_state.logs = match result {
            Ok(logs) => LookupState::Ready(logs),
            Err(e) => LookupState::Failed(user_message(&e, "Could not load your health log.")),
        };
        self.tracker_state.selected_index = 0;
    }

    pub fn open_entry_form(&mut self) {
        if self.session.is_logged_in() {
            self.tracker_state.form = Some(EntryForm::new());
        } else {
            self.set_error(crate::logic::tracker::LOGIN_REQUIRED);
        }
    }

    pub fn cancel_entry_form(&mut self) {
        self.tracker_state.form = None;
    }

    pub fn submit_entry_form(&mut self, today: NaiveDate) {
        if let Some(form) = self.tracker_state.form.take() {
            self.pending = Some(Request::AddLog(form.to_draft(today)));
            self.set_status("Saving entry...");
        }
    }

    pub fn finish_add(&mut self, result: Result<HealthLog>) {
        match result {
            Ok(entry) => {
                self.set_status(&format!("Logged {} on {}", entry.symptom, entry.log_date));
                self.request_logs();
            }
            Err(e) => {
                let message = user_message(&e, "There was an error adding your entry.");
                self.set_error(&message);
            }
        }
    }

    pub fn request_sign_out(&mut self) {
        if self.session.is_logged_in() {
            self.pending = Some(Request::SignOut);
        }
    }

    /// Forget everything tied to the previous user.
    pub fn signed_out(&mut self) {
        self.tracker_state = TrackerState::new();
        self.set_status("Signed out");
    }

    // Settings

    pub fn toggle_setting(&mut self) {
        let settings = &mut self.session.accessibility;
        match self.settings_state.focused_field {
            SettingsField::HighContrast => settings.high_contrast = !settings.high_contrast,
            SettingsField::LargeFont => settings.large_font = !settings.large_font,
        }
    }
}
