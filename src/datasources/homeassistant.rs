use super::{Selector, WeatherReading, WeatherSource};
use crate::config::{HomeAssistantConfig, TemperatureUnit};
use crate::error::{GddError, Result};
use crate::models::{fahrenheit_to_celsius, ForecastEntry};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::Duration;

/// States Home Assistant reports for entities without a usable value.
const UNAVAILABLE_STATES: &[&str] = &["unavailable", "unknown"];

pub struct HomeAssistantClient {
    client: reqwest::Client,
    config: HomeAssistantConfig,
}

#[derive(Debug, Deserialize)]
struct EntityState {
    state: String,
    entity_id: String,
    #[serde(default)]
    attributes: Map<String, Value>,
}

impl HomeAssistantClient {
    pub fn new(config: HomeAssistantConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &HomeAssistantConfig {
        &self.config
    }

    async fn get_entity(&self, entity_id: &str) -> Result<Option<EntityState>> {
        let url = format!(
            "{}/api/states/{}",
            self.config.url.trim_end_matches('/'),
            entity_id
        );

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.config.token))
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| GddError::DataSourceUnavailable(format!("Home Assistant: {}", e)))?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::warn!(entity = %entity_id, "Entity not found in Home Assistant");
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(GddError::DataSourceUnavailable(format!(
                "Home Assistant returned {}",
                response.status()
            )));
        }

        let entity: EntityState = response.json().await.map_err(|e| {
            GddError::DataSourceUnavailable(format!(
                "Failed to parse Home Assistant response: {}",
                e
            ))
        })?;

        Ok(Some(entity))
    }

    pub async fn test_connection(&self) -> Result<bool> {
        let url = format!("{}/api/", self.config.url.trim_end_matches('/'));

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.config.token))
            .send()
            .await
            .map_err(|e| GddError::DataSourceUnavailable(format!("Home Assistant: {}", e)))?;

        Ok(response.status().is_success())
    }

    fn selector_entity(&self, selector: Selector) -> &str {
        match selector {
            Selector::TurfType => &self.config.turf_type_entity,
            Selector::MaintenanceLevel => &self.config.maintenance_level_entity,
        }
    }
}

impl WeatherSource for HomeAssistantClient {
    async fn read_current_temperature(&self) -> Result<Option<f64>> {
        let entity = self.get_entity(&self.config.weather_entity).await?;
        Ok(entity.and_then(|e| current_temperature(&e, self.config.temperature_unit)))
    }

    async fn read_forecast(&self) -> Result<Option<Vec<ForecastEntry>>> {
        let entity = self.get_entity(&self.config.weather_entity).await?;
        Ok(entity.and_then(|e| forecast_entries(&e, self.config.temperature_unit)))
    }

    /// Single GET, so the temperature and forecast come from the same entity state.
    async fn read_weather(&self) -> Result<WeatherReading> {
        let entity = self.get_entity(&self.config.weather_entity).await?;
        Ok(entity
            .map(|e| weather_reading(&e, self.config.temperature_unit))
            .unwrap_or_default())
    }

    async fn read_selector(&self, selector: Selector) -> Result<Option<String>> {
        let entity = self.get_entity(self.selector_entity(selector)).await?;
        Ok(entity.and_then(|e| selector_value(&e)))
    }
}

fn to_celsius(value: f64, unit: TemperatureUnit) -> f64 {
    match unit {
        TemperatureUnit::Celsius => value,
        TemperatureUnit::Fahrenheit => fahrenheit_to_celsius(value),
    }
}

fn current_temperature(entity: &EntityState, unit: TemperatureUnit) -> Option<f64> {
    let temp = match entity.attributes.get("temperature") {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.parse::<f64>().ok(),
        _ => None,
    };

    match temp {
        Some(t) if t.is_finite() => Some(to_celsius(t, unit)),
        Some(_) | None => {
            tracing::warn!(
                entity = %entity.entity_id,
                "Weather entity has no usable temperature attribute"
            );
            None
        }
    }
}

fn forecast_entries(entity: &EntityState, unit: TemperatureUnit) -> Option<Vec<ForecastEntry>> {
    let raw = entity.attributes.get("forecast")?;

    let entries: Vec<ForecastEntry> = match serde_json::from_value(raw.clone()) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(
                entity = %entity.entity_id,
                error = %e,
                "Ignoring malformed forecast attribute"
            );
            return None;
        }
    };

    Some(
        entries
            .into_iter()
            .map(|entry| ForecastEntry {
                templow: entry.templow.map(|t| to_celsius(t, unit)),
                temperature: entry.temperature.map(|t| to_celsius(t, unit)),
                ..entry
            })
            .collect(),
    )
}

fn weather_reading(entity: &EntityState, unit: TemperatureUnit) -> WeatherReading {
    WeatherReading {
        temperature: current_temperature(entity, unit),
        forecast: forecast_entries(entity, unit),
    }
}

fn selector_value(entity: &EntityState) -> Option<String> {
    let state = entity.state.trim();
    if state.is_empty() || UNAVAILABLE_STATES.contains(&state) {
        None
    } else {
        Some(state.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(json: &str) -> EntityState {
        serde_json::from_str(json).unwrap()
    }

    const WEATHER: &str = r#"{
        "entity_id": "weather.home",
        "state": "sunny",
        "attributes": {
            "temperature": 68.0,
            "forecast": [
                {"datetime": "2024-05-01T12:00:00+00:00", "templow": 50.0, "temperature": 77.0},
                {"datetime": "2024-05-02T12:00:00+00:00", "templow": 53.6}
            ]
        }
    }"#;

    #[test]
    fn temperature_in_celsius_passes_through() {
        let e = entity(WEATHER);
        assert_eq!(current_temperature(&e, TemperatureUnit::Celsius), Some(68.0));
    }

    #[test]
    fn temperature_converted_from_fahrenheit() {
        let e = entity(WEATHER);
        let t = current_temperature(&e, TemperatureUnit::Fahrenheit).unwrap();
        assert!((t - 20.0).abs() < 1e-9);
    }

    #[test]
    fn missing_temperature_attribute_is_unavailable() {
        let e = entity(r#"{"entity_id": "weather.home", "state": "unavailable"}"#);
        assert_eq!(current_temperature(&e, TemperatureUnit::Celsius), None);
    }

    #[test]
    fn string_temperature_is_parsed() {
        let e = entity(
            r#"{"entity_id": "weather.home", "state": "cloudy", "attributes": {"temperature": "12.5"}}"#,
        );
        assert_eq!(current_temperature(&e, TemperatureUnit::Celsius), Some(12.5));
    }

    #[test]
    fn forecast_entries_converted() {
        let e = entity(WEATHER);
        let entries = forecast_entries(&e, TemperatureUnit::Fahrenheit).unwrap();
        assert_eq!(entries.len(), 2);
        assert!((entries[0].templow.unwrap() - 10.0).abs() < 1e-9);
        assert!((entries[0].temperature.unwrap() - 25.0).abs() < 1e-9);
        assert!((entries[1].templow.unwrap() - 12.0).abs() < 1e-9);
        assert_eq!(entries[1].temperature, None);
    }

    #[test]
    fn malformed_forecast_is_ignored() {
        let e = entity(
            r#"{"entity_id": "weather.home", "state": "sunny", "attributes": {"forecast": "soon"}}"#,
        );
        assert_eq!(forecast_entries(&e, TemperatureUnit::Celsius), None);
    }

    #[test]
    fn weather_reading_from_one_entity_state() {
        let reading = weather_reading(&entity(WEATHER), TemperatureUnit::Fahrenheit);
        assert!((reading.temperature.unwrap() - 20.0).abs() < 1e-9);
        assert_eq!(reading.forecast.map(|f| f.len()), Some(2));

        // Forecast problems never hide the temperature
        let e = entity(
            r#"{"entity_id": "weather.home", "state": "sunny", "attributes": {"temperature": 9.5, "forecast": 3}}"#,
        );
        let reading = weather_reading(&e, TemperatureUnit::Celsius);
        assert_eq!(reading.temperature, Some(9.5));
        assert_eq!(reading.forecast, None);
    }

    #[test]
    fn selector_values() {
        let e = entity(r#"{"entity_id": "input_select.gdd_turf_type", "state": "warm_season"}"#);
        assert_eq!(selector_value(&e), Some("warm_season".to_string()));

        let e = entity(r#"{"entity_id": "input_select.gdd_turf_type", "state": "unknown"}"#);
        assert_eq!(selector_value(&e), None);
    }
}
