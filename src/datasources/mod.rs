pub mod homeassistant;

pub use homeassistant::HomeAssistantClient;

use crate::error::Result;
use crate::models::ForecastEntry;

/// User-facing selectors read alongside the weather.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    TurfType,
    MaintenanceLevel,
}

impl Selector {
    pub fn as_str(&self) -> &'static str {
        match self {
            Selector::TurfType => "turf_type",
            Selector::MaintenanceLevel => "maintenance_level",
        }
    }
}

/// One observation of the weather entity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherReading {
    pub temperature: Option<f64>,
    pub forecast: Option<Vec<ForecastEntry>>,
}

/// Where the coordinator gets its readings.
///
/// `Ok(None)` means the value is currently unavailable; `Err` means the
/// source could not be reached at all. Temperatures are in °C.
#[allow(async_fn_in_trait)]
pub trait WeatherSource {
    async fn read_current_temperature(&self) -> Result<Option<f64>>;

    async fn read_forecast(&self) -> Result<Option<Vec<ForecastEntry>>>;

    /// Temperature and forecast for one tick. Sources that serve both from a
    /// single request override this.
    async fn read_weather(&self) -> Result<WeatherReading> {
        let temperature = self.read_current_temperature().await?;
        let forecast = match self.read_forecast().await {
            Ok(forecast) => forecast,
            Err(e) => {
                tracing::warn!(error = %e, "Forecast unavailable");
                None
            }
        };
        Ok(WeatherReading {
            temperature,
            forecast,
        })
    }

    async fn read_selector(&self, selector: Selector) -> Result<Option<String>>;
}
