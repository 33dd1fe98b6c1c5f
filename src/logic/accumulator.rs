use super::calculations::calculate_gdd;
use super::growth::TurfGrowthModel;
use super::resolver::resolve_extremes;
use crate::error::{GddError, Result};
use crate::models::{
    push_bounded, CalculationMethod, DataSourceInfo, GddState, ResolvedExtremes, TurfType,
    MAX_DAILY_TEMPS, MAX_WEEKLY_HISTORY,
};
use chrono::{Datelike, NaiveDate};

/// One tick's worth of external data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickInput {
    /// Latest reading (°C)
    pub temperature: f64,
    /// Today's forecast (low, high), if the provider has one
    pub forecast: Option<(f64, f64)>,
    pub today: NaiveDate,
    pub turf_type: TurfType,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickOutcome {
    pub day_rolled_over: bool,
    /// GDD credited for the completed day; `None` when no boundary fired or
    /// the boundary had no usable extremes.
    pub credited_gdd: Option<f64>,
    pub week_rolled_over: bool,
    /// Weekly total moved into history by this tick
    pub archived_week: Option<f64>,
}

/// Owns the time-keyed GDD state and advances it one tick at a time.
///
/// Rollovers are edge-triggered off the stored (date, ISO week) watermark.
/// A stalled scheduler gets one day's credit no matter how many dates it
/// skipped.
#[derive(Debug, Clone)]
pub struct GddAccumulator {
    base_temp: f64,
    method: CalculationMethod,
    growth_model: TurfGrowthModel,
    state: GddState,
    current_temp: Option<f64>,
    forecast: Option<(f64, f64)>,
    resolved: ResolvedExtremes,
}

impl GddAccumulator {
    pub fn new(base_temp: f64, method: CalculationMethod, growth_model: TurfGrowthModel) -> Self {
        Self {
            base_temp,
            method,
            growth_model,
            state: GddState::default(),
            current_temp: None,
            forecast: None,
            resolved: ResolvedExtremes::none(),
        }
    }

    /// Replace the in-memory state with a stored snapshot.
    pub fn hydrate(&mut self, state: GddState) {
        self.state = state;
        self.resolved = match (self.state.tracked_daily_min, self.state.tracked_daily_max) {
            (Some(_), Some(_)) => self.resolve(),
            _ => ResolvedExtremes::none(),
        };
        tracing::info!(seasonal_gdd = self.state.seasonal_gdd, "Loaded GDD data");
    }

    pub fn state(&self) -> &GddState {
        &self.state
    }

    pub fn base_temperature(&self) -> f64 {
        self.base_temp
    }

    pub fn method(&self) -> CalculationMethod {
        self.method
    }

    pub fn growth_model(&self) -> &TurfGrowthModel {
        &self.growth_model
    }

    pub fn current_temp(&self) -> Option<f64> {
        self.current_temp
    }

    pub fn forecast(&self) -> Option<(f64, f64)> {
        self.forecast
    }

    pub fn resolved(&self) -> &ResolvedExtremes {
        &self.resolved
    }

    pub fn tick(&mut self, input: TickInput) -> TickOutcome {
        let mut outcome = TickOutcome::default();

        // Yesterday's window, captured before this reading can widen it
        let previous = self.resolved;

        self.ingest(input.temperature);
        self.forecast = input.forecast;
        self.resolved = self.resolve();

        let today = input.today;
        let iso = today.iso_week();
        let current_week = (iso.year(), iso.week());
        let last_week = self.state.last_week_number.map(|week| {
            let year = self
                .state
                .last_calculation_date
                .map(|d| d.iso_week().year())
                .unwrap_or(current_week.0);
            (year, week)
        });

        if let Some(last_date) = self.state.last_calculation_date {
            if last_date != today {
                tracing::info!(%last_date, %today, "New day detected");
                outcome.day_rolled_over = true;
                outcome.credited_gdd =
                    self.perform_daily_calculation(&previous, input.temperature, input.turf_type);
                // Tracking restarted; resolve again for the new day
                self.resolved = self.resolve();
            }
        }

        if let Some(last_week) = last_week {
            if last_week != current_week {
                tracing::info!(
                    year = current_week.0,
                    week = current_week.1,
                    "New week detected, resetting weekly GDD"
                );
                outcome.week_rolled_over = true;
                outcome.archived_week = self.roll_week();
            }
        }

        self.state.last_calculation_date = Some(today);
        self.state.last_week_number = Some(current_week.1);

        outcome
    }

    fn ingest(&mut self, temp: f64) {
        self.current_temp = Some(temp);
        push_bounded(&mut self.state.daily_temps, temp, MAX_DAILY_TEMPS);

        if self.state.tracked_daily_min.map_or(true, |min| temp < min) {
            self.state.tracked_daily_min = Some(temp);
        }
        if self.state.tracked_daily_max.map_or(true, |max| temp > max) {
            self.state.tracked_daily_max = Some(temp);
        }
    }

    fn resolve(&self) -> ResolvedExtremes {
        resolve_extremes(
            self.forecast,
            self.state.tracked_daily_min,
            self.state.tracked_daily_max,
        )
    }

    fn perform_daily_calculation(
        &mut self,
        extremes: &ResolvedExtremes,
        current_temp: f64,
        turf_type: TurfType,
    ) -> Option<f64> {
        let Some((min_temp, max_temp)) = extremes.pair() else {
            tracing::warn!("No min/max temperature data available for daily calculation");
            return None;
        };

        let daily_gdd = calculate_gdd(self.method, min_temp, max_temp, self.base_temp);

        tracing::info!(
            min = format!("{:.1}", min_temp),
            max = format!("{:.1}", max_temp),
            base = self.base_temp,
            method = self.method.key(),
            result = format!("{:.2}", daily_gdd),
            "Daily GDD calculation"
        );

        self.state.daily_gdd = daily_gdd;
        self.state.weekly_gdd += daily_gdd;
        self.state.seasonal_gdd += daily_gdd;

        self.state.growth.days_since_mow += 1;
        self.growth_model
            .apply_daily(&mut self.state.growth, daily_gdd, turf_type);

        self.state.tracked_daily_min = Some(current_temp);
        self.state.tracked_daily_max = Some(current_temp);
        self.state.daily_temps.clear();

        Some(daily_gdd)
    }

    fn roll_week(&mut self) -> Option<f64> {
        let completed = self.state.weekly_gdd;
        self.state.weekly_gdd = 0.0;

        if completed > 0.0 {
            push_bounded(
                &mut self.state.weekly_gdd_history,
                completed,
                MAX_WEEKLY_HISTORY,
            );
            Some(completed)
        } else {
            None
        }
    }

    /// GDD for today so far, from the current resolved extremes.
    pub fn estimated_daily_gdd(&self) -> f64 {
        match self.resolved.pair() {
            Some((min, max)) => calculate_gdd(self.method, min, max, self.base_temp),
            None => 0.0,
        }
    }

    pub fn data_source_info(&self) -> DataSourceInfo {
        DataSourceInfo::classify(
            self.forecast,
            self.state.tracked_daily_min,
            self.state.tracked_daily_max,
            &self.resolved,
        )
    }

    pub fn reset_all(&mut self) {
        let growth = &mut self.state.growth;
        growth.days_since_mow = 0;
        growth.accumulated_growth = 0.0;

        self.state.daily_gdd = 0.0;
        self.state.weekly_gdd = 0.0;
        self.state.seasonal_gdd = 0.0;
        self.state.tracked_daily_min = None;
        self.state.tracked_daily_max = None;
        self.state.daily_temps.clear();
        self.state.weekly_gdd_history.clear();
        self.resolved = ResolvedExtremes::none();

        tracing::info!("All GDD values reset");
    }

    pub fn record_mowing(&mut self) {
        TurfGrowthModel::record_mowing(&mut self.state.growth);
    }

    pub fn set_seasonal_gdd(&mut self, value: f64) -> Result<()> {
        if !value.is_finite() || value < 0.0 {
            return Err(GddError::InvalidData(format!(
                "Seasonal GDD must be a non-negative number, got {}",
                value
            )));
        }
        self.state.seasonal_gdd = value;
        tracing::info!(seasonal_gdd = value, "Seasonal GDD manually set");
        Ok(())
    }

    pub fn set_base_temperature(&mut self, base_temp: f64) -> Result<()> {
        if !base_temp.is_finite() {
            return Err(GddError::InvalidData(format!(
                "Base temperature must be a number, got {}",
                base_temp
            )));
        }
        self.base_temp = base_temp;
        tracing::info!(base_temp, "Base temperature updated");
        Ok(())
    }
}
