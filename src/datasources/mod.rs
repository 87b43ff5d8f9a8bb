pub mod geocoding;
pub mod http;
pub mod openweathermap;

pub use geocoding::GeocodingClient;
pub use http::build_http_client;
pub use openweathermap::OpenWeatherMapClient;
