//! Typed search parameters for a nearby-charger lookup.

use thiserror::Error;

/// Search radius in kilometres when the caller gives none.
pub const DEFAULT_RADIUS_KM: u32 = 10;

#[derive(Debug, Error, PartialEq)]
pub enum ParameterError {
    #[error("missing required parameter '{0}'")]
    Missing(&'static str),

    #[error("parameter '{name}' must be a decimal number, got '{value}'")]
    NotANumber { name: &'static str, value: String },

    #[error("parameter '{name}' is out of range: {value}")]
    OutOfRange { name: &'static str, value: f64 },

    #[error("parameter 'radius' must be a positive whole number of kilometres, got '{0}'")]
    InvalidRadius(String),
}

/// A point and search radius, validated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub radius: u32,
}

impl GeoQuery {
    pub fn new(latitude: f64, longitude: f64, radius: Option<u32>) -> Result<Self, ParameterError> {
        let latitude = check_range("latitude", latitude, 90.0)?;
        let longitude = check_range("longitude", longitude, 180.0)?;
        let radius = radius.unwrap_or(DEFAULT_RADIUS_KM);
        if radius == 0 {
            return Err(ParameterError::InvalidRadius(radius.to_string()));
        }

        Ok(Self {
            latitude,
            longitude,
            radius,
        })
    }

    /// Parses raw query-string values. An empty `radius` counts as absent,
    /// which is what a browser form sends for an untouched number field.
    pub fn parse(
        latitude: Option<&str>,
        longitude: Option<&str>,
        radius: Option<&str>,
    ) -> Result<Self, ParameterError> {
        let latitude = parse_coordinate("latitude", latitude)?;
        let longitude = parse_coordinate("longitude", longitude)?;
        let radius = match radius.map(str::trim).filter(|r| !r.is_empty()) {
            Some(raw) => Some(
                raw.parse::<u32>()
                    .map_err(|_| ParameterError::InvalidRadius(raw.to_string()))?,
            ),
            None => None,
        };

        Self::new(latitude, longitude, radius)
    }

    /// Upstream query pairs, credential excluded.
    pub fn upstream_params(&self) -> [(&'static str, String); 3] {
        [
            ("lat", format_coordinate(self.latitude)),
            ("lon", format_coordinate(self.longitude)),
            ("radius", self.radius.to_string()),
        ]
    }
}

fn parse_coordinate(name: &'static str, raw: Option<&str>) -> Result<f64, ParameterError> {
    let raw = raw
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .ok_or(ParameterError::Missing(name))?;

    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ParameterError::NotANumber {
            name,
            value: raw.to_string(),
        })
}

fn check_range(name: &'static str, value: f64, limit: f64) -> Result<f64, ParameterError> {
    if value.is_finite() && (-limit..=limit).contains(&value) {
        Ok(value)
    } else {
        Err(ParameterError::OutOfRange { name, value })
    }
}

/// Shortest round-trip form that always keeps a fractional part (`28.0`, not `28`).
fn format_coordinate(value: f64) -> String {
    format!("{value:?}")
}
