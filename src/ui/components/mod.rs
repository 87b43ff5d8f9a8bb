pub mod gauge;
pub mod input;
pub mod nav;

pub use gauge::{aqi_gauge, humidity_gauge, temperature_gauge, wind_gauge};
pub use input::InputWidget;
pub use nav::{NavBar, StatusLine};
