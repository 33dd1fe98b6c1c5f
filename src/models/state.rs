use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Raw readings kept between day boundaries (48 hourly ticks).
pub const MAX_DAILY_TEMPS: usize = 48;
/// Completed weeks kept for trending.
pub const MAX_WEEKLY_HISTORY: usize = 4;

/// Turf growth since the last mowing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthState {
    pub days_since_mow: u32,
    /// mm since the last mowing
    pub accumulated_growth: f64,
    pub growth_multiplier: f64,
    /// mm added by the last daily calculation
    pub estimated_growth_today: f64,
}

impl Default for GrowthState {
    fn default() -> Self {
        Self {
            days_since_mow: 0,
            accumulated_growth: 0.0,
            growth_multiplier: 1.0,
            estimated_growth_today: 0.0,
        }
    }
}

/// Everything that survives a restart.
///
/// Missing fields in stored data fall back to their defaults, so older
/// snapshots hydrate field by field.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GddState {
    pub daily_gdd: f64,
    pub weekly_gdd: f64,
    pub seasonal_gdd: f64,
    /// Completed weekly totals, oldest first
    pub weekly_gdd_history: Vec<f64>,
    pub last_calculation_date: Option<NaiveDate>,
    /// ISO week of `last_calculation_date`
    pub last_week_number: Option<u32>,
    pub tracked_daily_min: Option<f64>,
    pub tracked_daily_max: Option<f64>,
    pub daily_temps: Vec<f64>,
    #[serde(flatten)]
    pub growth: GrowthState,
}

impl GddState {
    /// Copy bounded to the persisted schema limits.
    pub fn for_storage(&self) -> Self {
        let mut state = self.clone();
        keep_last(&mut state.daily_temps, MAX_DAILY_TEMPS);
        keep_last(&mut state.weekly_gdd_history, MAX_WEEKLY_HISTORY);
        state
    }

    pub fn average_weekly_gdd(&self) -> Option<f64> {
        if self.weekly_gdd_history.is_empty() {
            None
        } else {
            Some(
                self.weekly_gdd_history.iter().sum::<f64>()
                    / self.weekly_gdd_history.len() as f64,
            )
        }
    }
}

/// Push onto a bounded FIFO buffer, evicting the oldest entries.
pub fn push_bounded(buf: &mut Vec<f64>, value: f64, cap: usize) {
    buf.push(value);
    keep_last(buf, cap);
}

fn keep_last(buf: &mut Vec<f64>, cap: usize) {
    if buf.len() > cap {
        let excess = buf.len() - cap;
        buf.drain(..excess);
    }
}
