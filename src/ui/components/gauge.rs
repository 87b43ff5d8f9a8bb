use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct GaugeWidget<'a> {
    title: &'a str,
    value: Option<f64>,
    unit: &'a str,
    min: f64,
    max: f64,
    thresholds: Vec<(f64, Color)>,
    precision: usize,
    caption: Option<String>,
    theme: Theme,
}

impl<'a> GaugeWidget<'a> {
    pub fn new(title: &'a str, value: Option<f64>, unit: &'a str, theme: Theme) -> Self {
        Self {
            title,
            value,
            unit,
            min: 0.0,
            max: 100.0,
            thresholds: Vec::new(),
            precision: 1,
            caption: None,
            theme,
        }
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn thresholds(mut self, thresholds: Vec<(f64, Color)>) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Text shown after the value, e.g. a condition label.
    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    fn get_color(&self, value: f64) -> Color {
        for (threshold, color) in self.thresholds.iter().rev() {
            if value >= *threshold {
                return *color;
            }
        }
        self.theme.fg()
    }
}

impl Widget for GaugeWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 || area.width < 10 {
            return;
        }

        let block = Block::default()
            .title(self.title)
            .borders(Borders::ALL)
            .border_style(self.theme.border());

        let inner = block.inner(area);
        block.render(area, buf);

        let Some(value) = self.value else {
            Paragraph::new(Span::styled("N/A", self.theme.dim())).render(inner, buf);
            return;
        };

        let color = self.get_color(value);
        let mut spans = vec![Span::styled(
            format!("{:.prec$}{}", value, self.unit, prec = self.precision),
            self.theme.normal().fg(color),
        )];
        if let Some(ref caption) = self.caption {
            spans.push(Span::styled(format!(" {}", caption), self.theme.dim()));
        }
        Paragraph::new(Line::from(spans)).render(inner, buf);

        // Render bar if space allows
        if inner.height >= 2 {
            let bar_area = Rect {
                x: inner.x,
                y: inner.y + 1,
                width: inner.width,
                height: 1,
            };

            let ratio = ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0);
            let filled = (bar_area.width as f64 * ratio) as u16;

            for x in bar_area.x..bar_area.x + bar_area.width {
                let ch = if x < bar_area.x + filled { '█' } else { '░' };
                buf[(x, bar_area.y)]
                    .set_char(ch)
                    .set_style(Style::default().fg(color));
            }
        }
    }
}

pub fn temperature_gauge(title: &str, value: Option<f64>, theme: Theme) -> GaugeWidget<'_> {
    GaugeWidget::new(title, value, "°C", theme)
        .range(-20.0, 45.0)
        .thresholds(vec![
            (f64::MIN, Theme::TEMP_COLD),
            (10.0, Theme::TEMP_MILD),
            (25.0, Theme::TEMP_HOT),
        ])
}

pub fn humidity_gauge(title: &str, value: Option<f64>, theme: Theme) -> GaugeWidget<'_> {
    GaugeWidget::new(title, value, "%", theme)
        .range(0.0, 100.0)
        .precision(0)
        .thresholds(vec![
            (0.0, Theme::SUCCESS),
            (80.0, Theme::WARNING),
            (90.0, Theme::ERROR),
        ])
}

pub fn wind_gauge(title: &str, value: Option<f64>, theme: Theme) -> GaugeWidget<'_> {
    GaugeWidget::new(title, value, " m/s", theme)
        .range(0.0, 25.0)
        .thresholds(vec![
            (0.0, Theme::SUCCESS),
            (10.0, Theme::WARNING),
            (17.0, Theme::ERROR),
        ])
}

/// AQI 1 (good) to 5 (very poor).
pub fn aqi_gauge(title: &str, aqi: Option<i64>, theme: Theme) -> GaugeWidget<'_> {
    use crate::models::AirQualityCondition;

    let thresholds = (1..=5)
        .map(|level| {
            (
                level as f64,
                theme.air_quality_color(AirQualityCondition::from_aqi(level)),
            )
        })
        .collect();

    let caption = aqi.map(|a| AirQualityCondition::from_aqi(a).to_string());
    let gauge = GaugeWidget::new(title, aqi.map(|a| a as f64), "", theme)
        .range(0.0, 5.0)
        .precision(0)
        .thresholds(thresholds);

    match caption {
        Some(caption) => gauge.caption(caption),
        None => gauge,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_to_string(gauge: GaugeWidget<'_>) -> String {
        let area = Rect::new(0, 0, 24, 4);
        let mut buf = Buffer::empty(area);
        gauge.render(area, &mut buf);
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn shows_value_with_unit() {
        let out = render_to_string(temperature_gauge("Temp", Some(28.04), Theme::default()));
        assert!(out.contains("28.0°C"));
    }

    #[test]
    fn aqi_gauge_shows_label() {
        let out = render_to_string(aqi_gauge("AQI", Some(5), Theme::default()));
        assert!(out.contains("5 Very Poor"));
    }

    #[test]
    fn missing_value_is_na() {
        let out = render_to_string(humidity_gauge("Humidity", None, Theme::default()));
        assert!(out.contains("N/A"));
    }
}
