use super::accumulator::{GddAccumulator, TickInput, TickOutcome};
use super::growth::{growth_outlook, TurfGrowthModel};
use crate::config::Config;
use crate::datasources::{Selector, WeatherSource};
use crate::db::StateStore;
use crate::error::{GddError, Result};
use crate::models::{
    todays_extremes, GddSnapshot, MaintenanceLevel, SeasonalProgress, TurfType,
};
use chrono::{Local, NaiveDate};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// How long an owner lease lasts without a refresh.
pub const LEASE_TTL: Duration = Duration::from_secs(120);

/// Interval at which a long-running owner should call [`GddCoordinator::claim`].
pub const LEASE_HEARTBEAT: Duration = Duration::from_secs(30);

static NEXT_OWNER: AtomicU64 = AtomicU64::new(0);

/// Single owner of one instance's GDD state.
///
/// Reads the weather source on each update, advances the accumulator and
/// writes the result back to the store. Every mutation goes through `&mut self`
/// and first claims the instance's owner lease in the store, so a second
/// coordinator on the same database cannot write behind the owner's back.
pub struct GddCoordinator<W, S> {
    instance: String,
    owner_id: String,
    source: W,
    store: S,
    accumulator: GddAccumulator,
    seasonal_target: f64,
    read_timeout: Duration,
    turf_type: Option<TurfType>,
    maintenance_level: MaintenanceLevel,
}

impl<W: WeatherSource, S: StateStore> GddCoordinator<W, S> {
    pub fn new(config: &Config, source: W, store: S) -> Self {
        let growth_model = TurfGrowthModel::new(config.turf.clone());
        let accumulator = GddAccumulator::new(
            config.calculation.base_temperature,
            config.calculation.method,
            growth_model,
        );

        Self {
            instance: config.instance.clone(),
            owner_id: format!(
                "{}-{}",
                std::process::id(),
                NEXT_OWNER.fetch_add(1, Ordering::Relaxed)
            ),
            source,
            store,
            accumulator,
            seasonal_target: config.turf.seasonal_target,
            read_timeout: Duration::from_secs(config.homeassistant.timeout_secs),
            turf_type: None,
            maintenance_level: MaintenanceLevel::default(),
        }
    }

    /// Restore persisted state. Read failures fall back to defaults.
    pub fn hydrate(&mut self) {
        match self.store.load_base_temperature(&self.instance) {
            Ok(Some(base_temp)) => {
                if let Err(e) = self.accumulator.set_base_temperature(base_temp) {
                    tracing::warn!(error = %e, "Ignoring stored base temperature");
                }
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "Failed to load base temperature override"),
        }

        match self.store.load_state(&self.instance) {
            Ok(Some(state)) => self.accumulator.hydrate(state),
            Ok(None) => tracing::info!(instance = %self.instance, "No stored GDD data, starting fresh"),
            Err(e) => tracing::warn!(error = %e, "Failed to load GDD data, starting fresh"),
        }

        match self.store.load_selection(&self.instance, Selector::TurfType) {
            Ok(Some(value)) => self.turf_type = TurfType::from_str(&value),
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "Failed to load turf type"),
        }
        match self.store.load_selection(&self.instance, Selector::MaintenanceLevel) {
            Ok(Some(value)) => {
                self.maintenance_level = MaintenanceLevel::from_str(&value).unwrap_or_default()
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "Failed to load maintenance level"),
        }
    }

    /// Take or refresh this coordinator's owner lease.
    pub fn claim(&self) -> Result<()> {
        if self
            .store
            .acquire_lease(&self.instance, &self.owner_id, LEASE_TTL)?
        {
            Ok(())
        } else {
            Err(GddError::InstanceLocked(format!(
                "instance '{}' is owned by another running process",
                self.instance
            )))
        }
    }

    /// Give up the owner lease so another process can take over immediately.
    pub fn release(&self) {
        if let Err(e) = self.store.release_lease(&self.instance, &self.owner_id) {
            tracing::warn!(instance = %self.instance, error = %e, "Failed to release owner lease");
        }
    }

    pub fn instance(&self) -> &str {
        &self.instance
    }

    pub fn accumulator(&self) -> &GddAccumulator {
        &self.accumulator
    }

    pub fn source(&self) -> &W {
        &self.source
    }

    /// Run one update cycle dated today in local time.
    pub async fn update(&mut self) -> Result<GddSnapshot> {
        let today = Local::now().date_naive();
        self.update_for(today).await
    }

    /// Run one update cycle for the given calendar date.
    ///
    /// An unavailable temperature returns the last snapshot unchanged. A
    /// failing or timed-out weather read, or a lease held by another owner,
    /// surfaces as `UpdateFailed`.
    pub async fn update_for(&mut self, today: NaiveDate) -> Result<GddSnapshot> {
        self.claim()
            .map_err(|e| GddError::UpdateFailed(e.to_string()))?;

        let reading = self.read(self.source.read_weather()).await.map_err(|e| {
            GddError::UpdateFailed(format!("Error updating GDD data: {}", e))
        })?;

        let temperature = match reading.temperature {
            Some(t) if t.is_finite() => t,
            Some(t) => {
                tracing::warn!(temperature = t, "Discarding non-finite temperature reading");
                return Ok(self.snapshot());
            }
            None => {
                tracing::warn!("No temperature data available");
                return Ok(self.snapshot());
            }
        };

        let forecast = reading
            .forecast
            .as_deref()
            .and_then(|entries| todays_extremes(entries, today));

        let turf_type = self.read_turf_type().await;
        let maintenance_level = self.read_maintenance_level().await;
        self.remember_selections(turf_type, maintenance_level);

        let outcome = self.accumulator.tick(TickInput {
            temperature,
            forecast,
            today,
            turf_type,
        });
        self.log_outcome(&outcome);

        self.persist();
        Ok(self.snapshot())
    }

    async fn read<T>(&self, fut: impl Future<Output = Result<T>>) -> Result<T> {
        match tokio::time::timeout(self.read_timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(GddError::DataSourceUnavailable(format!(
                "read timed out after {}s",
                self.read_timeout.as_secs()
            ))),
        }
    }

    async fn read_turf_type(&self) -> TurfType {
        let selected = match self.read(self.source.read_selector(Selector::TurfType)).await {
            Ok(Some(value)) => {
                let parsed = TurfType::from_str(&value);
                if parsed.is_none() {
                    tracing::warn!(value = %value, "Unknown turf type selection");
                }
                parsed
            }
            Ok(None) => None,
            Err(e) => {
                tracing::debug!(error = %e, "Turf type selector unavailable");
                None
            }
        };

        selected
            .unwrap_or_else(|| TurfType::from_base_temperature(self.accumulator.base_temperature()))
    }

    async fn read_maintenance_level(&self) -> MaintenanceLevel {
        match self
            .read(self.source.read_selector(Selector::MaintenanceLevel))
            .await
        {
            Ok(Some(value)) => MaintenanceLevel::from_str(&value).unwrap_or_else(|| {
                tracing::warn!(value = %value, "Unknown maintenance level selection");
                MaintenanceLevel::default()
            }),
            Ok(None) => MaintenanceLevel::default(),
            Err(e) => {
                tracing::debug!(error = %e, "Maintenance level selector unavailable");
                MaintenanceLevel::default()
            }
        }
    }

    /// Keep the resolved selectors, and store them when they change so
    /// one-shot readers see what the owner last used.
    fn remember_selections(&mut self, turf_type: TurfType, maintenance_level: MaintenanceLevel) {
        if self.turf_type == Some(turf_type) && self.maintenance_level == maintenance_level {
            return;
        }
        self.turf_type = Some(turf_type);
        self.maintenance_level = maintenance_level;

        for (selector, value) in [
            (Selector::TurfType, turf_type.as_str()),
            (Selector::MaintenanceLevel, maintenance_level.as_str()),
        ] {
            if let Err(e) = self.store.save_selection(&self.instance, selector, value) {
                tracing::error!(
                    error = %e,
                    selector = selector.as_str(),
                    "Failed to save selection"
                );
            }
        }
    }

    fn log_outcome(&self, outcome: &TickOutcome) {
        if let Some(week) = outcome.archived_week {
            tracing::info!(weekly_gdd = week, "Archived completed week");
        }
        let state = self.accumulator.state();
        tracing::debug!(
            daily = state.daily_gdd,
            weekly = state.weekly_gdd,
            seasonal = state.seasonal_gdd,
            "GDD update complete"
        );
    }

    /// Save the current state. Memory stays authoritative if the write fails.
    fn persist(&self) {
        if let Err(e) = self
            .store
            .save_state(&self.instance, self.accumulator.state())
        {
            tracing::error!(instance = %self.instance, error = %e, "Failed to save GDD data");
        }
    }

    pub fn reset_all(&mut self) -> Result<GddSnapshot> {
        self.claim()?;
        self.accumulator.reset_all();
        self.persist();
        Ok(self.snapshot())
    }

    pub fn record_mowing(&mut self) -> Result<GddSnapshot> {
        self.claim()?;
        self.accumulator.record_mowing();
        self.persist();
        Ok(self.snapshot())
    }

    pub fn set_seasonal_gdd(&mut self, value: f64) -> Result<GddSnapshot> {
        self.claim()?;
        self.accumulator.set_seasonal_gdd(value)?;
        self.persist();
        Ok(self.snapshot())
    }

    pub fn set_base_temperature(&mut self, base_temp: f64) -> Result<GddSnapshot> {
        self.claim()?;
        self.accumulator.set_base_temperature(base_temp)?;
        if let Err(e) = self
            .store
            .save_base_temperature(&self.instance, base_temp)
        {
            tracing::error!(error = %e, "Failed to save base temperature");
        }
        Ok(self.snapshot())
    }

    pub fn snapshot(&self) -> GddSnapshot {
        let acc = &self.accumulator;
        let state = acc.state();
        let model = acc.growth_model();
        let level = self.maintenance_level;
        let turf_type = self
            .turf_type
            .unwrap_or_else(|| TurfType::from_base_temperature(acc.base_temperature()));
        let data_source = acc.data_source_info();

        GddSnapshot {
            instance: self.instance.clone(),
            state: state.clone(),
            current_temp: acc.current_temp(),
            forecast_min: acc.forecast().map(|(min, _)| min),
            forecast_max: acc.forecast().map(|(_, max)| max),
            daily_min: acc.resolved().min,
            daily_max: acc.resolved().max,
            estimated_daily_gdd: acc.estimated_daily_gdd(),
            average_weekly_gdd: state.average_weekly_gdd(),
            base_temperature: acc.base_temperature(),
            method: acc.method(),
            turf_type,
            maintenance_level: level,
            data_source,
            data_source_label: data_source.kind().as_str().to_string(),
            mowing_recommendation: model.mowing_urgency(&state.growth, level).as_str().to_string(),
            pgr_recommendation: model.pgr_tier(state.weekly_gdd).as_str().to_string(),
            growth_forecast: growth_outlook(state.growth.growth_multiplier),
            days_to_next_mow: model.days_to_next_mow(&state.growth, level),
            seasonal_progress: SeasonalProgress::new(state.seasonal_gdd, self.seasonal_target),
            recommendations: model.recommendations(state, level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::models::{ForecastEntry, GddState};
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Scripted source: pops one temperature per read.
    #[derive(Default)]
    struct Scripted {
        temps: RefCell<VecDeque<Result<Option<f64>>>>,
        forecast: Option<Vec<ForecastEntry>>,
        turf_type: Option<String>,
        maintenance: Option<String>,
    }

    impl Scripted {
        fn with_temps(temps: &[f64]) -> Self {
            Self {
                temps: RefCell::new(temps.iter().map(|t| Ok(Some(*t))).collect()),
                ..Default::default()
            }
        }
    }

    impl WeatherSource for Scripted {
        async fn read_current_temperature(&self) -> Result<Option<f64>> {
            self.temps.borrow_mut().pop_front().unwrap_or(Ok(None))
        }

        async fn read_forecast(&self) -> Result<Option<Vec<ForecastEntry>>> {
            Ok(self.forecast.clone())
        }

        async fn read_selector(&self, selector: Selector) -> Result<Option<String>> {
            Ok(match selector {
                Selector::TurfType => self.turf_type.clone(),
                Selector::MaintenanceLevel => self.maintenance.clone(),
            })
        }
    }

    /// Store whose reads or writes can be made to fail.
    #[derive(Default)]
    struct FlakyStore {
        fail_load: bool,
        fail_save: bool,
    }

    impl StateStore for FlakyStore {
        fn load_state(&self, _instance: &str) -> Result<Option<GddState>> {
            if self.fail_load {
                return Err(GddError::InvalidData("corrupt row".into()));
            }
            Ok(None)
        }

        fn save_state(&self, _instance: &str, _state: &GddState) -> Result<()> {
            if self.fail_save {
                return Err(GddError::InvalidData("disk full".into()));
            }
            Ok(())
        }

        fn load_base_temperature(&self, _instance: &str) -> Result<Option<f64>> {
            if self.fail_load {
                return Err(GddError::InvalidData("corrupt row".into()));
            }
            Ok(None)
        }
    }

    /// Source whose reads stall for longer than the read timeout.
    struct Stalled {
        weather: bool,
        selectors: bool,
    }

    impl Stalled {
        async fn stall(&self, stalls: bool) {
            if stalls {
                tokio::time::sleep(Duration::from_secs(600)).await;
            }
        }
    }

    impl WeatherSource for Stalled {
        async fn read_current_temperature(&self) -> Result<Option<f64>> {
            self.stall(self.weather).await;
            Ok(Some(12.0))
        }

        async fn read_forecast(&self) -> Result<Option<Vec<ForecastEntry>>> {
            Ok(None)
        }

        async fn read_selector(&self, _selector: Selector) -> Result<Option<String>> {
            self.stall(self.selectors).await;
            Ok(Some("high_maintenance".into()))
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn config() -> Config {
        let mut config = Config::default();
        config.calculation.base_temperature = 10.0;
        config
    }

    #[tokio::test]
    async fn unavailable_temperature_returns_last_snapshot() {
        let db = Database::open_in_memory().unwrap();
        let mut coord = GddCoordinator::new(&config(), Scripted::default(), db.clone());
        let snap = coord.update_for(date(2024, 5, 1)).await.unwrap();
        assert_eq!(snap.current_temp, None);
        assert_eq!(snap.state.last_calculation_date, None);
        // Nothing was written
        assert_eq!(db.load_state("default").unwrap(), None);
    }

    #[tokio::test]
    async fn failing_source_is_update_failed() {
        let source = Scripted {
            temps: RefCell::new(VecDeque::from([Err(GddError::DataSourceUnavailable(
                "connection refused".into(),
            ))])),
            ..Default::default()
        };
        let mut coord = GddCoordinator::new(&config(), source, Database::open_in_memory().unwrap());
        let err = coord.update_for(date(2024, 5, 1)).await.unwrap_err();
        assert!(matches!(err, GddError::UpdateFailed(_)));
    }

    #[tokio::test]
    async fn non_finite_reading_is_skipped() {
        let mut coord = GddCoordinator::new(
            &config(),
            Scripted::with_temps(&[f64::NAN]),
            Database::open_in_memory().unwrap(),
        );
        let snap = coord.update_for(date(2024, 5, 1)).await.unwrap();
        assert!(snap.state.daily_temps.is_empty());
    }

    #[tokio::test]
    async fn turf_type_falls_back_to_base_temperature() {
        let mut coord = GddCoordinator::new(
            &config(),
            Scripted::with_temps(&[12.0]),
            Database::open_in_memory().unwrap(),
        );
        let snap = coord.update_for(date(2024, 5, 1)).await.unwrap();
        assert_eq!(snap.turf_type, TurfType::CoolSeason);

        let mut warm = config();
        warm.calculation.base_temperature = 14.0;
        let coord = GddCoordinator::new(&warm, Scripted::default(), Database::open_in_memory().unwrap());
        assert_eq!(coord.snapshot().turf_type, TurfType::WarmSeason);
    }

    #[tokio::test]
    async fn selectors_drive_turf_and_maintenance() {
        let source = Scripted {
            temps: RefCell::new(VecDeque::from([Ok(Some(12.0))])),
            turf_type: Some("warm_season".into()),
            maintenance: Some("high_maintenance".into()),
            ..Default::default()
        };
        let mut coord = GddCoordinator::new(&config(), source, Database::open_in_memory().unwrap());
        let snap = coord.update_for(date(2024, 5, 1)).await.unwrap();
        assert_eq!(snap.turf_type, TurfType::WarmSeason);
        assert_eq!(snap.maintenance_level, MaintenanceLevel::High);
    }

    #[tokio::test]
    async fn forecast_for_today_is_used() {
        let source = Scripted {
            temps: RefCell::new(VecDeque::from([Ok(Some(12.0))])),
            forecast: Some(vec![
                ForecastEntry::new("2024-04-30", 1.0, 2.0),
                ForecastEntry::new("2024-05-01T00:00:00Z", 6.0, 24.0),
            ]),
            ..Default::default()
        };
        let mut coord = GddCoordinator::new(&config(), source, Database::open_in_memory().unwrap());
        let snap = coord.update_for(date(2024, 5, 1)).await.unwrap();
        assert_eq!(snap.forecast_min, Some(6.0));
        assert_eq!(snap.daily_min, Some(6.0));
        assert_eq!(snap.daily_max, Some(24.0));
        // (24 + 6) / 2 - 10
        assert_eq!(snap.estimated_daily_gdd, 5.0);
        assert!(snap.data_source.has_forecast_data);
    }

    #[tokio::test]
    async fn base_temperature_override_survives_restart() {
        let db = Database::open_in_memory().unwrap();
        let mut coord = GddCoordinator::new(&config(), Scripted::default(), db.clone());
        coord.set_base_temperature(6.5).unwrap();
        assert!(coord.set_base_temperature(f64::NAN).is_err());

        let mut restarted = GddCoordinator::new(&config(), Scripted::default(), db);
        restarted.hydrate();
        assert_eq!(restarted.accumulator().base_temperature(), 6.5);
    }

    #[tokio::test]
    async fn manual_operations_persist() {
        let db = Database::open_in_memory().unwrap();
        let mut coord = GddCoordinator::new(&config(), Scripted::default(), db.clone());

        coord.set_seasonal_gdd(120.0).unwrap();
        assert_eq!(db.load_state("default").unwrap().unwrap().seasonal_gdd, 120.0);

        coord.reset_all().unwrap();
        assert_eq!(db.load_state("default").unwrap().unwrap().seasonal_gdd, 0.0);

        let snap = coord.record_mowing().unwrap();
        assert_eq!(snap.state.growth.accumulated_growth, 0.0);
        assert_eq!(snap.mowing_recommendation, "No mowing needed");
    }

    #[tokio::test]
    async fn second_owner_cannot_mutate() {
        let db = Database::open_in_memory().unwrap();
        let source = Scripted::with_temps(&[8.0, 22.0, 12.0]);
        let mut owner = GddCoordinator::new(&config(), source, db.clone());
        owner.hydrate();
        owner.update_for(date(2024, 5, 1)).await.unwrap();
        owner.update_for(date(2024, 5, 1)).await.unwrap();
        owner.update_for(date(2024, 5, 2)).await.unwrap();

        let mut other = GddCoordinator::new(&config(), Scripted::with_temps(&[12.0]), db.clone());
        other.hydrate();
        assert!(matches!(other.record_mowing(), Err(GddError::InstanceLocked(_))));
        assert!(matches!(other.set_seasonal_gdd(0.0), Err(GddError::InstanceLocked(_))));
        assert!(matches!(other.reset_all(), Err(GddError::InstanceLocked(_))));
        assert!(matches!(other.set_base_temperature(4.0), Err(GddError::InstanceLocked(_))));
        assert!(matches!(
            other.update_for(date(2024, 5, 2)).await,
            Err(GddError::UpdateFailed(_))
        ));

        // The store still holds the owner's totals
        let stored = db.load_state("default").unwrap().unwrap();
        assert_eq!(stored.seasonal_gdd, 5.0);
        assert_eq!(db.load_base_temperature("default").unwrap(), None);

        // Once the owner lets go the other coordinator can take over
        owner.release();
        let snap = other.set_seasonal_gdd(0.0).unwrap();
        assert_eq!(snap.state.seasonal_gdd, 0.0);
        assert!(matches!(owner.record_mowing(), Err(GddError::InstanceLocked(_))));
    }

    #[tokio::test]
    async fn failed_save_keeps_memory_authoritative() {
        let store = FlakyStore {
            fail_save: true,
            ..Default::default()
        };
        let source = Scripted::with_temps(&[8.0, 22.0, 12.0]);
        let mut coord = GddCoordinator::new(&config(), source, store);
        coord.update_for(date(2024, 5, 1)).await.unwrap();
        coord.update_for(date(2024, 5, 1)).await.unwrap();
        let snap = coord.update_for(date(2024, 5, 2)).await.unwrap();

        assert_eq!(snap.state.daily_gdd, 5.0);
        assert_eq!(snap.state.seasonal_gdd, 5.0);
        assert_eq!(coord.set_seasonal_gdd(40.0).unwrap().state.seasonal_gdd, 40.0);
    }

    #[tokio::test]
    async fn failed_load_starts_from_defaults() {
        let store = FlakyStore {
            fail_load: true,
            ..Default::default()
        };
        let mut coord = GddCoordinator::new(&config(), Scripted::default(), store);
        coord.hydrate();

        let snap = coord.snapshot();
        assert_eq!(snap.state, GddState::default());
        assert_eq!(snap.base_temperature, 10.0);
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_weather_read_times_out() {
        let source = Stalled {
            weather: true,
            selectors: false,
        };
        let mut coord = GddCoordinator::new(&config(), source, Database::open_in_memory().unwrap());
        let err = coord.update_for(date(2024, 5, 1)).await.unwrap_err();
        assert!(matches!(err, GddError::UpdateFailed(_)));
        assert_eq!(coord.snapshot().state.last_calculation_date, None);
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_selectors_fall_back_to_defaults() {
        let source = Stalled {
            weather: false,
            selectors: true,
        };
        let mut coord = GddCoordinator::new(&config(), source, Database::open_in_memory().unwrap());
        let snap = coord.update_for(date(2024, 5, 1)).await.unwrap();

        assert_eq!(snap.current_temp, Some(12.0));
        assert_eq!(snap.turf_type, TurfType::CoolSeason);
        assert_eq!(snap.maintenance_level, MaintenanceLevel::Medium);
    }

    #[tokio::test]
    async fn failing_forecast_read_is_absent() {
        struct NoForecast;

        impl WeatherSource for NoForecast {
            async fn read_current_temperature(&self) -> Result<Option<f64>> {
                Ok(Some(12.0))
            }

            async fn read_forecast(&self) -> Result<Option<Vec<ForecastEntry>>> {
                Err(GddError::DataSourceUnavailable("forecast service down".into()))
            }

            async fn read_selector(&self, _selector: Selector) -> Result<Option<String>> {
                Ok(None)
            }
        }

        let db = Database::open_in_memory().unwrap();
        let mut coord = GddCoordinator::new(&config(), NoForecast, db);
        let snap = coord.update_for(date(2024, 5, 1)).await.unwrap();
        assert_eq!(snap.forecast_min, None);
        assert!(!snap.data_source.has_forecast_data);
        assert_eq!(snap.daily_min, Some(12.0));
    }

    #[tokio::test]
    async fn status_reader_sees_last_selections() {
        let db = Database::open_in_memory().unwrap();
        let source = Scripted {
            temps: RefCell::new(VecDeque::from([Ok(Some(12.0))])),
            turf_type: Some("warm_season".into()),
            maintenance: Some("high_maintenance".into()),
            ..Default::default()
        };
        let mut owner = GddCoordinator::new(&config(), source, db.clone());
        owner.update_for(date(2024, 5, 1)).await.unwrap();

        // A reader that never talks to the source
        let mut reader = GddCoordinator::new(&config(), Scripted::default(), db);
        reader.hydrate();
        let snap = reader.snapshot();
        assert_eq!(snap.turf_type, TurfType::WarmSeason);
        assert_eq!(snap.maintenance_level, MaintenanceLevel::High);
    }
}
