use crate::config::OpenWeatherMapConfig;
use crate::error::{HealthAdviceError, Result};
use crate::models::{AirQualityReport, Coordinate, CurrentWeather, PollutantComponents};
use serde::Deserialize;

/// Current weather and current air pollution for a coordinate pair.
#[derive(Clone)]
pub struct OpenWeatherMapClient {
    client: reqwest::Client,
    config: OpenWeatherMapConfig,
}

// OpenWeatherMap API response structures
#[derive(Debug, Deserialize)]
struct OwmCurrentResponse {
    #[serde(default)]
    cod: serde_json::Value,
    #[serde(default)]
    message: Option<serde_json::Value>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    main: Option<OwmMain>,
    #[serde(default)]
    weather: Vec<OwmWeather>,
    #[serde(default)]
    wind: Option<OwmWind>,
    // Present (with 1h/3h volumes) only while it is raining
    #[serde(default)]
    rain: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    #[serde(default)]
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwmWeather {
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    #[serde(default)]
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwmAirPollutionResponse {
    #[serde(default)]
    cod: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<serde_json::Value>,
    #[serde(default)]
    list: Vec<OwmAirPollutionItem>,
}

#[derive(Debug, Deserialize)]
struct OwmAirPollutionItem {
    main: OwmAqi,
    #[serde(default)]
    components: PollutantComponents,
}

#[derive(Debug, Deserialize)]
struct OwmAqi {
    aqi: i64,
}

/// The provider reports its own status in `cod`; only the integer 200 means success.
fn is_success_code(cod: &serde_json::Value) -> bool {
    cod.as_i64() == Some(200)
}

fn describe(message: Option<&serde_json::Value>) -> String {
    match message {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "no message".to_string(),
    }
}

impl OpenWeatherMapClient {
    pub fn new(client: reqwest::Client, config: OpenWeatherMapConfig) -> Self {
        Self { client, config }
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    /// Fails with a configuration error when the key is missing or a placeholder.
    pub fn ensure_configured(&self) -> Result<()> {
        self.config.require_key().map(|_| ())
    }

    fn endpoint(&self, path: &str, coordinate: &Coordinate, metric: bool) -> Result<reqwest::Url> {
        let api_key = self.config.require_key()?;
        let lat = coordinate.latitude.to_string();
        let lon = coordinate.longitude.to_string();
        let mut params = vec![("lat", lat.as_str()), ("lon", lon.as_str()), ("appid", api_key)];
        if metric {
            params.push(("units", "metric"));
        }

        reqwest::Url::parse_with_params(
            &format!("{}/data/2.5/{}", self.config.base_url.trim_end_matches('/'), path),
            &params,
        )
        .map_err(|e| HealthAdviceError::Config(format!("Invalid OpenWeatherMap URL: {}", e)))
    }

    /// Fetch current weather in metric units.
    pub async fn fetch_weather(&self, coordinate: &Coordinate) -> Result<CurrentWeather> {
        let url = self.endpoint("weather", coordinate, true)?;

        let response =
            self.client.get(url).send().await.map_err(|e| {
                HealthAdviceError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e))
            })?;

        let owm_response: OwmCurrentResponse = response.json().await.map_err(|e| {
            HealthAdviceError::DataSourceUnavailable(format!(
                "Failed to parse OpenWeatherMap response: {}",
                e
            ))
        })?;

        if !is_success_code(&owm_response.cod) {
            return Err(HealthAdviceError::DataSourceUnavailable(format!(
                "OpenWeatherMap returned cod {}: {}",
                owm_response.cod,
                describe(owm_response.message.as_ref())
            )));
        }

        self.convert_weather(owm_response)
    }

    /// Fetch the current air pollution reading (first entry of `list`).
    pub async fn fetch_air_quality(&self, coordinate: &Coordinate) -> Result<AirQualityReport> {
        let url = self.endpoint("air_pollution", coordinate, false)?;

        let response =
            self.client.get(url).send().await.map_err(|e| {
                HealthAdviceError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e))
            })?;

        let status = response.status();
        let owm_response: OwmAirPollutionResponse = response.json().await.map_err(|e| {
            HealthAdviceError::DataSourceUnavailable(format!(
                "Failed to parse air pollution response: {}",
                e
            ))
        })?;

        let provider_failed = owm_response
            .cod
            .as_ref()
            .is_some_and(|cod| !is_success_code(cod));
        if !status.is_success() || provider_failed {
            return Err(HealthAdviceError::DataSourceUnavailable(format!(
                "OpenWeatherMap air pollution returned {}: {}",
                status,
                describe(owm_response.message.as_ref())
            )));
        }

        let item = owm_response.list.into_iter().next().ok_or_else(|| {
            HealthAdviceError::DataSourceUnavailable(
                "Air pollution response contained no readings".into(),
            )
        })?;

        Ok(AirQualityReport {
            aqi: item.main.aqi,
            components: item.components,
        })
    }

    /// Test connection to OpenWeatherMap API
    pub async fn test_connection(&self) -> Result<bool> {
        let url = self.endpoint("weather", &Coordinate::new(0.0, 0.0), true)?;

        let response =
            self.client.get(url).send().await.map_err(|e| {
                HealthAdviceError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e))
            })?;

        Ok(response.status().is_success())
    }

    fn convert_weather(&self, response: OwmCurrentResponse) -> Result<CurrentWeather> {
        let main = response.main.ok_or_else(|| {
            HealthAdviceError::DataSourceUnavailable(
                "OpenWeatherMap response is missing 'main'".into(),
            )
        })?;

        let description = response
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .unwrap_or_default();

        Ok(CurrentWeather {
            place_name: response.name.unwrap_or_default(),
            temperature_celsius: main.temp,
            description,
            humidity_percent: main.humidity,
            wind_speed_ms: response.wind.map(|w| w.speed).unwrap_or(0.0),
            has_precipitation: response.rain.is_some(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HttpConfig;
    use crate::datasources::build_http_client;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(base_url: &str) -> OpenWeatherMapClient {
        OpenWeatherMapClient::new(
            build_http_client(&HttpConfig::default()).unwrap(),
            OpenWeatherMapConfig {
                api_key: Some("test_key".into()),
                base_url: base_url.to_string(),
            },
        )
    }

    fn london() -> Coordinate {
        Coordinate::new(51.5, -0.12)
    }

    #[tokio::test]
    async fn weather_is_fetched_in_metric_units() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("lat", "51.5"))
            .and(query_param("lon", "-0.12"))
            .and(query_param("units", "metric"))
            .and(query_param("appid", "test_key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "cod": 200,
                "name": "London",
                "main": {"temp": 28.0, "humidity": 40},
                "weather": [{"id": 800, "main": "Clear", "description": "clear sky"}],
                "wind": {"speed": 3.6}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let weather = client_for(&server.uri()).fetch_weather(&london()).await.unwrap();
        assert_eq!(weather.place_name, "London");
        assert_eq!(weather.temperature_celsius, 28.0);
        assert_eq!(weather.description, "clear sky");
        assert_eq!(weather.wind_speed_ms, 3.6);
        assert!(!weather.has_precipitation);
    }

    #[tokio::test]
    async fn rain_block_sets_precipitation() {
        let server = MockServer::start().await;
        Mock::given(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "cod": 200,
                "name": "Manchester",
                "main": {"temp": 14.2, "humidity": 90},
                "weather": [{"description": "light rain"}],
                "rain": {"1h": 0.4}
            })))
            .mount(&server)
            .await;

        let weather = client_for(&server.uri()).fetch_weather(&london()).await.unwrap();
        assert!(weather.has_precipitation);
        assert_eq!(weather.wind_speed_ms, 0.0);
    }

    #[tokio::test]
    async fn non_200_cod_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "cod": 401,
                "message": "Invalid API key"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server.uri()).fetch_weather(&london()).await.unwrap_err();
        assert!(err.is_transport());
        assert!(err.to_string().contains("Invalid API key"));
    }

    #[tokio::test]
    async fn string_cod_is_not_success() {
        let server = MockServer::start().await;
        Mock::given(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "cod": "200",
                "main": {"temp": 20.0}
            })))
            .mount(&server)
            .await;

        let err = client_for(&server.uri()).fetch_weather(&london()).await.unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn air_quality_reads_first_entry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/air_pollution"))
            .and(query_param("appid", "test_key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "coord": {"lon": -0.12, "lat": 51.5},
                "list": [{
                    "main": {"aqi": 2},
                    "components": {"co": 201.94, "no": 0.02, "no2": 0.77, "o3": 68.66,
                                   "so2": 0.64, "pm2_5": 0.5, "pm10": 0.54, "nh3": 0.12},
                    "dt": 1605182400
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let report = client_for(&server.uri())
            .fetch_air_quality(&london())
            .await
            .unwrap();
        assert_eq!(report.aqi, 2);
        assert_eq!(report.components.co, 201.94);
        assert_eq!(report.components.o3, 68.66);
    }

    #[tokio::test]
    async fn air_quality_without_readings_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(path("/data/2.5/air_pollution"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"list": []})))
            .mount(&server)
            .await;

        let err = client_for(&server.uri())
            .fetch_air_quality(&london())
            .await
            .unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn unconfigured_key_makes_no_call() {
        let server = MockServer::start().await;
        Mock::given(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = OpenWeatherMapClient::new(
            build_http_client(&HttpConfig::default()).unwrap(),
            OpenWeatherMapConfig {
                api_key: Some(crate::config::OPENWEATHERMAP_KEY_PLACEHOLDER.into()),
                base_url: server.uri(),
            },
        );
        assert!(client
            .fetch_weather(&london())
            .await
            .unwrap_err()
            .is_configuration());
    }
}
