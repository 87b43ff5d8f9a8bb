//! Plain-text output for the one-shot CLI commands.

use crate::logic::ConnectionStatus;
use crate::models::{AdviceResult, AirQualityLookup, HealthLog, WeatherLookup, NO_ADVICE_MESSAGE};

pub fn render_weather(lookup: &WeatherLookup) -> String {
    let weather = &lookup.weather;
    let place = if weather.place_name.is_empty() {
        &lookup.query
    } else {
        &weather.place_name
    };
    let precipitation = if weather.has_precipitation { "yes" } else { "none" };

    [
        format!("Current weather in {} ({})", place, lookup.coordinate),
        format!("  Temperature:   {:.1}°C", weather.temperature_celsius),
        format!("  Conditions:    {}", weather.display_description()),
        format!("  Humidity:      {:.0}%", weather.humidity_percent),
        format!("  Wind speed:    {:.1} m/s", weather.wind_speed_ms),
        format!("  Precipitation: {}", precipitation),
        format!("  Category:      {}", lookup.condition),
    ]
    .join("\n")
}

pub fn render_air_quality(lookup: &AirQualityLookup) -> String {
    let mut lines = vec![
        format!("Air quality near {} ({})", lookup.query, lookup.coordinate),
        format!("  AQI: {} ({})", lookup.report.aqi, lookup.condition),
        "  Pollutants (µg/m³):".to_string(),
    ];
    lines.extend(
        lookup
            .report
            .components
            .labelled()
            .into_iter()
            .map(|(label, value)| format!("    {:<6}{:>9.2}", label, value)),
    );
    lines.join("\n")
}

pub fn render_advice(result: &AdviceResult) -> String {
    let mut lines = vec![
        format!("Health advice for {}", result.location),
        format!("  Weather: {}  Air quality: {}", result.weather, result.air_quality),
    ];

    if result.is_empty() {
        lines.push(format!("  {}", NO_ADVICE_MESSAGE));
    } else {
        lines.extend(result.advice.iter().map(|a| format!("  - {}", a)));
    }
    lines.join("\n")
}

pub fn render_health_logs(logs: &[HealthLog]) -> String {
    if logs.is_empty() {
        return "No health log entries yet.".to_string();
    }

    let header = format!("{:<12}{:<24}{:<16}Notes", "Date", "Symptom", "Severity");
    let rows = logs.iter().map(|log| {
        let severity = format!("{} ({})", log.severity, log.severity_label());
        format!(
            "{:<12}{:<24}{:<16}{}",
            log.log_date.format("%Y-%m-%d"),
            log.symptom,
            severity,
            log.notes.as_deref().unwrap_or("-")
        )
    });

    std::iter::once(header)
        .chain(rows)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_status(status: &ConnectionStatus) -> String {
    format!(
        "  OpenWeatherMap: {}\n  Supabase:       {}",
        status.openweathermap, status.store
    )
}
