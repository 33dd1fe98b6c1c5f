use serde::{Deserialize, Serialize};

/// Numeric method used to turn a day's min/max temperatures into GDD.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationMethod {
    #[default]
    SimpleAverage,
    ModifiedAverage,
    SingleSine,
}

impl CalculationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalculationMethod::SimpleAverage => "Simple Average (Tmax + Tmin) / 2",
            CalculationMethod::ModifiedAverage => "Modified Average (cap at base temp)",
            CalculationMethod::SingleSine => "Single Sine Method",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            CalculationMethod::SimpleAverage => "simple_average",
            CalculationMethod::ModifiedAverage => "modified_average",
            CalculationMethod::SingleSine => "single_sine",
        }
    }
}

impl std::fmt::Display for CalculationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which inputs the resolver merged to produce the day's extremes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSourceKind {
    Forecast,
    Tracked,
    Combined,
    #[default]
    None,
}

impl DataSourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSourceKind::Forecast => "Weather Forecast",
            DataSourceKind::Tracked => "Hourly Tracking",
            DataSourceKind::Combined => "Combined Forecast + Tracked",
            DataSourceKind::None => "No Data",
        }
    }
}

impl std::fmt::Display for DataSourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Daily extremes chosen for the current calculation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedExtremes {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub source: DataSourceKind,
}

impl ResolvedExtremes {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn pair(&self) -> Option<(f64, f64)> {
        Some((self.min?, self.max?))
    }
}

/// Provenance flags for the resolved extremes.
///
/// The `using_*` flags compare the resolved minimum against each source's
/// minimum with exact float equality, so `using_combined` only holds when the
/// resolved minimum matches neither source. `resolved_from` carries the
/// resolver's own tag for callers that want an unambiguous answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DataSourceInfo {
    pub has_forecast_data: bool,
    pub has_tracked_data: bool,
    pub using_forecast: bool,
    pub using_tracked: bool,
    pub using_combined: bool,
    pub resolved_from: DataSourceKind,
}

impl DataSourceInfo {
    pub fn classify(
        forecast: Option<(f64, f64)>,
        tracked_min: Option<f64>,
        tracked_max: Option<f64>,
        resolved: &ResolvedExtremes,
    ) -> Self {
        let forecast_min = forecast.map(|(min, _)| min);
        let daily_min = resolved.min;

        let using_combined = match (forecast_min, tracked_min, daily_min) {
            (Some(f), Some(t), Some(d)) => d != f && d != t,
            _ => false,
        };

        Self {
            has_forecast_data: forecast.is_some(),
            has_tracked_data: tracked_min.is_some() && tracked_max.is_some(),
            using_forecast: forecast_min.is_some() && daily_min == forecast_min,
            using_tracked: tracked_min.is_some() && daily_min == tracked_min,
            using_combined,
            resolved_from: resolved.source,
        }
    }

    pub fn kind(&self) -> DataSourceKind {
        if self.using_combined {
            DataSourceKind::Combined
        } else if self.using_forecast {
            DataSourceKind::Forecast
        } else if self.using_tracked {
            DataSourceKind::Tracked
        } else {
            DataSourceKind::None
        }
    }
}

pub fn fahrenheit_to_celsius(f: f64) -> f64 {
    (f - 32.0) * 5.0 / 9.0
}
