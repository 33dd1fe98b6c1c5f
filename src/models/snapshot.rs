use super::{
    round1, CalculationMethod, DataSourceInfo, DevelopmentStage, GddState, MaintenanceLevel,
    Recommendation, TurfType,
};
use serde::Serialize;

/// Seasonal accumulation measured against the configured target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonalProgress {
    pub target: f64,
    /// Seasonal GDD minus target; negative until the target is reached
    pub progress: f64,
    pub percentage: f64,
    pub remaining: f64,
    pub stage: String,
    pub phase: String,
}

impl SeasonalProgress {
    pub fn new(seasonal_gdd: f64, target: f64) -> Self {
        let stage = DevelopmentStage::evaluate(seasonal_gdd, target);
        let percentage = if target > 0.0 {
            round1(seasonal_gdd / target * 100.0)
        } else {
            0.0
        };

        Self {
            target,
            progress: round1(seasonal_gdd - target),
            percentage,
            remaining: round1((target - seasonal_gdd).max(0.0)),
            stage: stage.label(),
            phase: stage.phase().to_string(),
        }
    }
}

/// Read-only view published after every update.
#[derive(Debug, Clone, Serialize)]
pub struct GddSnapshot {
    pub instance: String,
    #[serde(flatten)]
    pub state: GddState,
    pub current_temp: Option<f64>,
    pub forecast_min: Option<f64>,
    pub forecast_max: Option<f64>,
    pub daily_min: Option<f64>,
    pub daily_max: Option<f64>,
    pub estimated_daily_gdd: f64,
    pub average_weekly_gdd: Option<f64>,
    pub base_temperature: f64,
    pub method: CalculationMethod,
    pub turf_type: TurfType,
    pub maintenance_level: MaintenanceLevel,
    pub data_source: DataSourceInfo,
    pub data_source_label: String,
    pub mowing_recommendation: String,
    pub pgr_recommendation: String,
    pub growth_forecast: String,
    pub days_to_next_mow: u32,
    pub seasonal_progress: SeasonalProgress,
    pub recommendations: Vec<Recommendation>,
}
