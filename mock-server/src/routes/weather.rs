//! `/weather`: single-city lookup and batch lookup through the provider.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use records_core::{BatchEntry, CurrentWeather, Units};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;
use crate::routes::data::now;
use crate::state::AppState;

const DEFAULT_CITY: &str = "London";
const CITIES_REQUIRED: &str = "Please provide an array of city names";

#[derive(Debug, Default, Deserialize)]
pub struct WeatherParams {
    pub city: Option<String>,
    pub units: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WeatherResponse {
    #[serde(flatten)]
    pub weather: CurrentWeather,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct BatchResponse {
    #[serde(rename = "weatherData")]
    pub weather_data: Vec<BatchEntry>,
}

pub async fn current_weather(
    State(state): State<AppState>,
    params: Result<Query<WeatherParams>, QueryRejection>,
) -> Result<Json<WeatherResponse>, AppError> {
    let Query(params) = params?;
    let city = params
        .city
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_CITY);
    let units = match params.units.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
        Some(raw) => raw.parse::<Units>().map_err(AppError::InvalidArgument)?,
        None => Units::default(),
    };

    let weather = state
        .weather
        .current(city, units)
        .await
        .map_err(|e| AppError::upstream(e, "Failed to fetch weather data"))?;
    tracing::info!(city, units = %units, "weather lookup succeeded");

    Ok(Json(WeatherResponse {
        weather,
        timestamp: now(),
    }))
}

pub async fn batch_weather(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<BatchResponse>, AppError> {
    let Json(body) = body?;
    let cities = city_list(&body)?;

    let weather_data = state.weather.batch(&cities).await;
    let succeeded = weather_data.iter().filter(|e| e.success).count();
    tracing::info!(
        requested = cities.len(),
        succeeded,
        "batch weather lookup settled"
    );

    Ok(Json(BatchResponse { weather_data }))
}

/// `cities` must be a non-empty array of strings.
fn city_list(body: &Value) -> Result<Vec<String>, AppError> {
    let cities = body
        .get("cities")
        .and_then(Value::as_array)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::invalid(CITIES_REQUIRED))?;
    cities
        .iter()
        .map(|c| {
            c.as_str()
                .map(str::to_string)
                .ok_or_else(|| AppError::invalid(CITIES_REQUIRED))
        })
        .collect()
}
