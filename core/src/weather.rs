//! Request builder and response reshaper for the current-weather provider.
//!
//! # Design
//! `WeatherClient` holds only the provider base URL and API key. It carries
//! no mutable state between calls. `build_current` produces an `HttpRequest`
//! and the `parse_*` methods consume an `HttpResponse`. The host runs the
//! round-trip in between, so everything here stays deterministic.
//!
//! The provider payload is decoded into private mirror types and reshaped
//! into the public `CurrentWeather` / `CitySummary` schema. Only the fields
//! the schema needs are decoded; everything else the provider sends is
//! ignored.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::WeatherError;
use crate::http::{HttpRequest, HttpResponse};

/// Public endpoint of the provider's v2.5 API.
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Unit system forwarded to the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
    Standard,
}

impl Units {
    pub fn as_str(self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
            Units::Standard => "standard",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Units {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            "standard" => Ok(Units::Standard),
            other => Err(format!(
                "Invalid units '{other}'. Use: metric, imperial, standard"
            )),
        }
    }
}

/// Simplified current conditions for one city.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentWeather {
    pub location: Location,
    pub current: Conditions,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub name: String,
    pub country: String,
    pub coordinates: Coordinates,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Conditions {
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u32,
    pub pressure: u32,
    pub description: String,
    pub icon: String,
    pub wind_speed: f64,
    pub wind_direction: f64,
    /// Kilometres; `None` when the provider omits visibility.
    pub visibility: Option<f64>,
    pub uv_index: f64,
}

/// Compact per-city result used by batch lookups.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CitySummary {
    pub city: String,
    pub country: String,
    pub temperature: f64,
    pub description: String,
    pub humidity: u32,
    pub wind_speed: f64,
}

/// Outcome of one city in a batch. Exactly one of `data` and `error` is set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchEntry {
    pub city: String,
    pub success: bool,
    pub data: Option<CitySummary>,
    pub error: Option<String>,
}

impl BatchEntry {
    pub fn settled(city: &str, result: Result<CitySummary, WeatherError>) -> Self {
        match result {
            Ok(data) => Self {
                city: city.to_string(),
                success: true,
                data: Some(data),
                error: None,
            },
            Err(_) => Self {
                city: city.to_string(),
                success: false,
                data: None,
                error: Some(format!("Failed to fetch weather for {city}")),
            },
        }
    }
}

/// Pair each requested city with its result, keeping request order.
/// `results` holds exactly one entry per city.
pub fn settle(
    cities: &[String],
    results: Vec<Result<CitySummary, WeatherError>>,
) -> Vec<BatchEntry> {
    debug_assert_eq!(cities.len(), results.len(), "one result per city");
    cities
        .iter()
        .zip(results)
        .map(|(city, result)| BatchEntry::settled(city, result))
        .collect()
}

#[derive(Debug, Deserialize)]
struct ProviderWeather {
    name: String,
    coord: ProviderCoord,
    sys: ProviderSys,
    main: ProviderMain,
    weather: Vec<ProviderCondition>,
    wind: ProviderWind,
    #[serde(default)]
    visibility: Option<f64>,
    #[serde(default)]
    uvi: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ProviderCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct ProviderSys {
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct ProviderMain {
    temp: f64,
    feels_like: f64,
    humidity: u32,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct ProviderCondition {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct ProviderWind {
    speed: f64,
    #[serde(default)]
    deg: f64,
}

impl ProviderWeather {
    fn primary_condition(&self) -> Result<&ProviderCondition, WeatherError> {
        self.weather.first().ok_or_else(|| {
            WeatherError::Deserialization("provider response has no weather conditions".to_string())
        })
    }
}

/// Stateless client for the provider's current-weather endpoint.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.trim().to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    pub fn build_current(&self, city: &str, units: Units) -> Result<HttpRequest, WeatherError> {
        if !self.has_api_key() {
            return Err(WeatherError::MissingApiKey);
        }
        Ok(HttpRequest::get(format!("{}/weather", self.base_url))
            .with_query("q", city)
            .with_query("appid", self.api_key.as_str())
            .with_query("units", units.as_str()))
    }

    pub fn parse_current(&self, response: HttpResponse) -> Result<CurrentWeather, WeatherError> {
        let raw = decode(response)?;
        let condition = raw.primary_condition()?;
        Ok(CurrentWeather {
            location: Location {
                name: raw.name.clone(),
                country: raw.sys.country.clone(),
                coordinates: Coordinates {
                    lat: raw.coord.lat,
                    lon: raw.coord.lon,
                },
            },
            current: Conditions {
                temperature: raw.main.temp,
                feels_like: raw.main.feels_like,
                humidity: raw.main.humidity,
                pressure: raw.main.pressure,
                description: condition.description.clone(),
                icon: condition.icon.clone(),
                wind_speed: raw.wind.speed,
                wind_direction: raw.wind.deg,
                visibility: raw.visibility.map(|metres| metres / 1000.0),
                uv_index: raw.uvi.unwrap_or(0.0),
            },
        })
    }

    pub fn parse_summary(&self, response: HttpResponse) -> Result<CitySummary, WeatherError> {
        let raw = decode(response)?;
        let condition = raw.primary_condition()?;
        Ok(CitySummary {
            city: raw.name.clone(),
            country: raw.sys.country.clone(),
            temperature: raw.main.temp,
            description: condition.description.clone(),
            humidity: raw.main.humidity,
            wind_speed: raw.wind.speed,
        })
    }
}

fn decode(response: HttpResponse) -> Result<ProviderWeather, WeatherError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| WeatherError::Deserialization(e.to_string()))
}

/// Map non-success status codes to the appropriate `WeatherError` variant.
fn check_status(response: &HttpResponse) -> Result<(), WeatherError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 401 {
        return Err(WeatherError::Unauthorized);
    }
    Err(WeatherError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;

    const LONDON: &str = r#"{
        "coord": {"lon": -0.1257, "lat": 51.5085},
        "weather": [{"id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d"}],
        "main": {"temp": 14.2, "feels_like": 13.6, "temp_min": 12.9, "temp_max": 15.3, "pressure": 1012, "humidity": 76},
        "visibility": 10000,
        "wind": {"speed": 4.6, "deg": 240},
        "sys": {"country": "GB"},
        "name": "London",
        "cod": 200
    }"#;

    fn client() -> WeatherClient {
        WeatherClient::new("http://localhost:4000/data/2.5/", "secret")
    }

    #[test]
    fn build_current_produces_correct_request() {
        let req = client().build_current("Paris", Units::Imperial).unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:4000/data/2.5/weather");
        assert_eq!(req.query_value("q"), Some("Paris"));
        assert_eq!(req.query_value("appid"), Some("secret"));
        assert_eq!(req.query_value("units"), Some("imperial"));
    }

    #[test]
    fn build_current_keeps_city_unencoded() {
        let req = client().build_current("São Paulo", Units::Metric).unwrap();
        assert_eq!(req.query_value("q"), Some("São Paulo"));
    }

    #[test]
    fn build_current_requires_api_key() {
        let client = WeatherClient::new(DEFAULT_BASE_URL, "  ");
        assert!(!client.has_api_key());
        let err = client.build_current("London", Units::Metric).unwrap_err();
        assert_eq!(err, WeatherError::MissingApiKey);
    }

    #[test]
    fn parse_current_reshapes_provider_payload() {
        let weather = client()
            .parse_current(HttpResponse::new(200, LONDON))
            .unwrap();
        assert_eq!(weather.location.name, "London");
        assert_eq!(weather.location.country, "GB");
        assert_eq!(weather.location.coordinates.lat, 51.5085);
        assert_eq!(weather.current.description, "broken clouds");
        assert_eq!(weather.current.icon, "04d");
        assert_eq!(weather.current.humidity, 76);
        assert_eq!(weather.current.wind_direction, 240.0);
        assert_eq!(weather.current.visibility, Some(10.0));
        assert_eq!(weather.current.uv_index, 0.0);
    }

    #[test]
    fn parse_current_unauthorized() {
        let err = client()
            .parse_current(HttpResponse::new(401, r#"{"cod":401}"#))
            .unwrap_err();
        assert_eq!(err, WeatherError::Unauthorized);
    }

    #[test]
    fn parse_current_other_status() {
        let err = client()
            .parse_current(HttpResponse::new(404, "city not found"))
            .unwrap_err();
        assert!(matches!(err, WeatherError::HttpError { status: 404, .. }));
    }

    #[test]
    fn parse_current_without_conditions_is_deserialization_error() {
        let body = LONDON.replace(
            r#"[{"id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d"}]"#,
            "[]",
        );
        let err = client()
            .parse_current(HttpResponse::new(200, body))
            .unwrap_err();
        assert!(matches!(err, WeatherError::Deserialization(_)));
    }

    #[test]
    fn parse_summary_picks_batch_fields() {
        let summary = client()
            .parse_summary(HttpResponse::new(200, LONDON))
            .unwrap();
        assert_eq!(summary.city, "London");
        assert_eq!(summary.temperature, 14.2);
        assert_eq!(summary.wind_speed, 4.6);
    }

    #[test]
    fn settle_keeps_order_and_reports_failures() {
        let cities = vec!["London".to_string(), "Atlantis".to_string()];
        let london = client()
            .parse_summary(HttpResponse::new(200, LONDON))
            .unwrap();
        let entries = settle(
            &cities,
            vec![
                Ok(london),
                Err(WeatherError::HttpError {
                    status: 404,
                    body: String::new(),
                }),
            ],
        );
        assert_eq!(entries.len(), 2);
        assert!(entries[0].success);
        assert!(entries[0].error.is_none());
        assert_eq!(entries[1].city, "Atlantis");
        assert!(!entries[1].success);
        assert!(entries[1].data.is_none());
        assert_eq!(
            entries[1].error.as_deref(),
            Some("Failed to fetch weather for Atlantis")
        );
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "one result per city")]
    fn settle_rejects_missing_results() {
        let cities = vec!["London".to_string(), "Paris".to_string()];
        settle(&cities, vec![Err(WeatherError::MissingApiKey)]);
    }

    #[test]
    fn failed_entry_serializes_nulls() {
        let entry = BatchEntry::settled("Nowhere", Err(WeatherError::Unauthorized));
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json["data"].is_null());
        assert_eq!(json["success"], false);
    }

    #[test]
    fn units_parse_and_default() {
        assert_eq!(Units::default(), Units::Metric);
        assert_eq!("imperial".parse::<Units>().unwrap(), Units::Imperial);
        assert!("kelvin".parse::<Units>().is_err());
    }
}
