use serde::{Deserialize, Serialize};

/// Optional sign, optional decimal part, optional whitespace after the comma.
const COORDINATE_PATTERN: &str = r"^(-?\d+(\.\d+)?),\s*(-?\d+(\.\d+)?)$";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Parse a literal "lat,lon" pair. Anything else (place names, partial pairs) is `None`.
    pub fn parse_pair(text: &str) -> Option<Self> {
        let re = regex_lite::Regex::new(COORDINATE_PATTERN).ok()?;
        let caps = re.captures(text)?;
        let latitude = caps.get(1)?.as_str().parse().ok()?;
        let longitude = caps.get(3)?.as_str().parse().ok()?;
        Some(Self::new(latitude, longitude))
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_literal_pairs() {
        assert_eq!(
            Coordinate::parse_pair("51.5,-0.12"),
            Some(Coordinate::new(51.5, -0.12))
        );
        assert_eq!(
            Coordinate::parse_pair("-33.87, 151.21"),
            Some(Coordinate::new(-33.87, 151.21))
        );
        assert_eq!(Coordinate::parse_pair("40,-74"), Some(Coordinate::new(40.0, -74.0)));
    }

    #[test]
    fn rejects_non_pairs() {
        assert_eq!(Coordinate::parse_pair("London"), None);
        assert_eq!(Coordinate::parse_pair("51.5"), None);
        assert_eq!(Coordinate::parse_pair("51.5 ,-0.12"), None);
        assert_eq!(Coordinate::parse_pair("+51.5,-0.12"), None);
        assert_eq!(Coordinate::parse_pair("51.,0.12"), None);
        assert_eq!(Coordinate::parse_pair("51.5,-0.12 London"), None);
        assert_eq!(Coordinate::parse_pair(""), None);
    }
}
