mod app;
mod cli;
mod config;
mod datasources;
mod error;
mod logic;
mod models;
mod store;
mod ui;

use app::{App, EntryField, EntryForm, Request, Screen};
use clap::Parser;
use cli::{Cli, Commands, TrackerCommand};
use config::Config;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use dialoguer::Password;
use error::{HealthAdviceError, Result};
use logic::{user_message, Services};
use models::Session;
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use std::io;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use ui::screens::{AdviceScreen, AirQualityScreen, SettingsScreen, TrackerScreen, WeatherScreen};

/// Read before prompting, for scripted tracker use.
const PASSWORD_ENV: &str = "HEALTHADVICE_PASSWORD";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // The TUI shares the terminal with stderr
    let default_level = match cli.verbose {
        0 if cli.command.is_none() => "error",
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let config = match cli.command {
        Some(Commands::Init) => match Config::setup_interactive() {
            Ok((config, _)) => config,
            Err(e) => {
                eprintln!("Setup failed: {}", e);
                std::process::exit(1);
            }
        },
        _ => match Config::load(cli.config.clone()) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{}", e);
                eprintln!("Run `healthadvice init` or copy config/config.yaml.example to config/config.yaml");
                std::process::exit(1);
            }
        },
    };

    let services = Services::from_config(&config)?;
    let mut session = Session::new(config.accessibility.into());

    match cli.command {
        None => run_tui(services, session, cli.email).await,
        Some(Commands::Init) | Some(Commands::Check) => {
            run_check(&services).await;
            Ok(())
        }
        Some(Commands::Weather { location }) => {
            match services.lookup.current_weather(&location).await {
                Ok(lookup) => println!("{}", ui::plain::render_weather(&lookup)),
                Err(e) => fail(&e.to_string()),
            }
            Ok(())
        }
        Some(Commands::AirQuality { location }) => {
            match services.lookup.current_air_quality(&location).await {
                Ok(lookup) => println!("{}", ui::plain::render_air_quality(&lookup)),
                Err(e) => fail(&e.to_string()),
            }
            Ok(())
        }
        Some(Commands::Advice { location }) => {
            match services.advice.get_advice(&location).await {
                Ok(result) => println!("{}", ui::plain::render_advice(&result)),
                Err(e) => fail(&e.to_string()),
            }
            Ok(())
        }
        Some(Commands::Register { email, username }) => {
            let password = Password::new()
                .with_prompt("Password")
                .with_confirmation("Confirm password", "Passwords do not match")
                .interact()
                .map_err(|e| HealthAdviceError::Config(format!("Input error: {}", e)))?;

            match services.accounts.register(&email, &password, &username).await {
                Ok(_) => println!(
                    "Registration successful! Please check your email to confirm your account before logging in."
                ),
                Err(e) => fail(&user_message(&e, "Registration failed. Please try again.")),
            }
            Ok(())
        }
        Some(Commands::Tracker { command }) => {
            run_tracker(&services, &mut session, command).await;
            Ok(())
        }
    }
}

fn fail(message: &str) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

fn read_password() -> Result<String> {
    if let Ok(password) = std::env::var(PASSWORD_ENV) {
        if !password.is_empty() {
            return Ok(password);
        }
    }
    Password::new()
        .with_prompt("Password")
        .interact()
        .map_err(|e| HealthAdviceError::Config(format!("Input error: {}", e)))
}

async fn sign_in(services: &Services, session: &mut Session, email: &str) -> Result<()> {
    let password = read_password()?;
    services.accounts.login(session, email, &password).await
}

async fn run_check(services: &Services) {
    println!("Configuration loaded.");
    println!("Testing connections...");

    let status = services.check_connections().await;
    println!("{}", ui::plain::render_status(&status));

    if status.all_connected() {
        println!("All connections OK.");
    } else if !status.any_connected() {
        std::process::exit(1);
    }
}

async fn run_tracker(services: &Services, session: &mut Session, command: TrackerCommand) {
    let email = match &command {
        TrackerCommand::List { email } | TrackerCommand::Add { email, .. } => email.clone(),
    };
    if let Err(e) = sign_in(services, session, &email).await {
        fail(&user_message(&e, "Login failed. Please try again."));
    }

    match command {
        TrackerCommand::List { .. } => match services.tracker.list(session).await {
            Ok(logs) => println!("{}", ui::plain::render_health_logs(&logs)),
            Err(e) => fail(&user_message(&e, "Could not load your health log.")),
        },
        TrackerCommand::Add {
            symptom,
            severity,
            date,
            notes,
            ..
        } => {
            let log_date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            match services
                .tracker
                .add(session, log_date, &symptom, severity, notes.as_deref())
                .await
            {
                Ok(entry) => println!(
                    "Logged {} (severity {}) on {}",
                    entry.symptom, entry.severity, entry.log_date
                ),
                Err(e) => fail(&user_message(&e, "There was an error adding your entry.")),
            }
        }
    }
}

async fn run_tui(services: Services, mut session: Session, email: Option<String>) -> Result<()> {
    // Sign in before taking over the terminal so the password prompt is usable
    let mut login_error = None;
    if let Some(ref email) = email {
        if let Err(e) = sign_in(&services, &mut session, email).await {
            login_error = Some(user_message(&e, "Login failed. Please try again."));
        }
    }

    let mut app = App::new(session);

    let status = services.check_connections().await;
    match login_error {
        Some(message) => app.set_error(&message),
        None => app.set_status(&format!(
            "OpenWeatherMap: {} | Supabase: {}",
            status.openweathermap, status.store
        )),
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the main loop
    let result = run_app(&mut terminal, &mut app, &services).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    services: &Services,
) -> Result<()> {
    loop {
        terminal.draw(|f| draw(f, app))?;

        // Run queued work after the loading state has been drawn
        if let Some(request) = app.take_request() {
            handle_request(app, services, request).await;
            continue;
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                handle_key(app, key);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn draw(f: &mut Frame, app: &App) {
    let area = f.area();
    let theme = app.theme();
    let status = app.status_message.as_deref();

    match app.screen {
        Screen::Weather => {
            let screen = WeatherScreen::new(&app.weather, &app.location, theme)
                .editing(app.editing_location)
                .with_status(status, app.status_is_error);
            f.render_widget(screen, area);
        }
        Screen::AirQuality => {
            let screen = AirQualityScreen::new(&app.air_quality, &app.location, theme)
                .editing(app.editing_location)
                .with_status(status, app.status_is_error);
            f.render_widget(screen, area);
        }
        Screen::Advice => {
            let screen = AdviceScreen::new(&app.advice, &app.location, theme)
                .editing(app.editing_location)
                .with_status(status, app.status_is_error);
            f.render_widget(screen, area);
        }
        Screen::Tracker => {
            let email = app.session.user().map(|u| u.email.as_str());
            let screen = TrackerScreen::new(&app.tracker_state, email, theme)
                .with_status(status, app.status_is_error);
            f.render_widget(screen, area);
        }
        Screen::Settings => {
            let screen = SettingsScreen::new(app.session.accessibility)
                .with_focus(app.settings_state.focused_field)
                .with_status(status, app.status_is_error);
            f.render_widget(screen, area);
        }
    }
}

async fn handle_request(app: &mut App, services: &Services, request: Request) {
    match request {
        Request::Weather(query) => {
            let result = services.lookup.current_weather(&query).await;
            app.finish_weather(result);
        }
        Request::AirQuality(query) => {
            let result = services.lookup.current_air_quality(&query).await;
            app.finish_air_quality(result);
        }
        Request::Advice(query) => {
            let result = services.advice.get_advice(&query).await;
            app.finish_advice(result);
        }
        Request::LoadLogs => {
            let result = services.tracker.list(&app.session).await;
            app.finish_logs(result);
        }
        Request::AddLog(draft) => {
            let notes = (!draft.notes.is_empty()).then_some(draft.notes.as_str());
            let result = services
                .tracker
                .add(
                    &app.session,
                    draft.log_date,
                    &draft.symptom,
                    draft.severity,
                    notes,
                )
                .await;
            app.finish_add(result);
        }
        Request::SignOut => {
            services.accounts.logout(&mut app.session);
            app.signed_out();
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    if app.is_editing() {
        handle_screen_input(app, key);
        return;
    }

    // Global key handling
    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Esc => app.clear_status(),
        KeyCode::Char(c) => match Screen::from_key(c) {
            Some(screen) => app.switch_screen(screen),
            None => handle_screen_input(app, key),
        },
        _ => handle_screen_input(app, key),
    }
}

fn handle_screen_input(app: &mut App, key: KeyEvent) {
    match app.screen {
        Screen::Weather | Screen::AirQuality | Screen::Advice => handle_location_input(app, key),
        Screen::Tracker => handle_tracker_input(app, key),
        Screen::Settings => handle_settings_input(app, key.code),
    }
}

fn handle_location_input(app: &mut App, key: KeyEvent) {
    if !app.editing_location {
        match key.code {
            KeyCode::Char('/') | KeyCode::Char('e') => app.begin_location_edit(),
            KeyCode::Enter | KeyCode::Char('r') => {
                if app.location.value().trim().is_empty() {
                    app.begin_location_edit();
                } else {
                    app.submit_location();
                }
            }
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Enter => app.submit_location(),
        KeyCode::Esc => app.cancel_location_edit(),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.location.clear()
        }
        KeyCode::Char(c) => app.location.insert(c),
        KeyCode::Backspace => app.location.backspace(),
        KeyCode::Delete => app.location.delete(),
        KeyCode::Left => app.location.move_left(),
        KeyCode::Right => app.location.move_right(),
        KeyCode::Home => app.location.home(),
        KeyCode::End => app.location.end(),
        _ => {}
    }
}

fn handle_tracker_input(app: &mut App, key: KeyEvent) {
    if app.tracker_state.form.is_some() {
        match key.code {
            KeyCode::Esc => app.cancel_entry_form(),
            KeyCode::Enter => app.submit_entry_form(chrono::Local::now().date_naive()),
            _ => {
                if let Some(form) = app.tracker_state.form.as_mut() {
                    edit_entry_form(form, key.code);
                }
            }
        }
        return;
    }

    match key.code {
        KeyCode::Up => app.tracker_state.prev(),
        KeyCode::Down => app.tracker_state.next(),
        KeyCode::Char('a') => app.open_entry_form(),
        KeyCode::Char('r') if app.session.is_logged_in() => app.request_logs(),
        KeyCode::Char('o') => app.request_sign_out(),
        _ => {}
    }
}

fn edit_entry_form(form: &mut EntryForm, code: KeyCode) {
    match code {
        KeyCode::Tab | KeyCode::Down => form.focused_field = form.focused_field.next(),
        KeyCode::BackTab | KeyCode::Up => form.focused_field = form.focused_field.prev(),
        KeyCode::Left if form.focused_field == EntryField::Severity => form.adjust_severity(-1),
        KeyCode::Right if form.focused_field == EntryField::Severity => form.adjust_severity(1),
        KeyCode::Backspace => form.backspace(),
        KeyCode::Char(c) => form.push_char(c),
        _ => {}
    }
}

fn handle_settings_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Up | KeyCode::BackTab => app.settings_state.prev_field(),
        KeyCode::Down | KeyCode::Tab => app.settings_state.next_field(),
        KeyCode::Enter | KeyCode::Char(' ') => app.toggle_setting(),
        _ => {}
    }
}
