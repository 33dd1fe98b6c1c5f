use crate::config::TurfConfig;
use crate::models::{
    round1, DevelopmentStage, GddState, GrowthProfile, GrowthState, MaintenanceLevel,
    MowingUrgency, PgrTier, Recommendation, RecommendationCategory, Severity, TurfType,
};

/// Days reported when growth has stalled completely.
const DORMANT_DAYS_TO_MOW: u32 = 14;
/// Days reported before any daily growth has been estimated.
const DEFAULT_DAYS_TO_MOW: u32 = 7;

/// Growth-rate multiplier for one day's GDD.
///
/// - at or below dormancy: 0.1
/// - ramp from 0.3 toward 1.0 below the optimal band
/// - 1.0 inside the optimal band
/// - ramp up to 2.5 between the band and the stress threshold
/// - 0.8 above the stress threshold (heat suppression)
pub fn growth_multiplier(daily_gdd: f64, profile: &GrowthProfile) -> f64 {
    let (optimal_min, optimal_max) = profile.optimal_gdd_range;
    let dormancy = profile.dormancy_threshold;
    let stress = profile.stress_threshold;

    if daily_gdd <= dormancy {
        0.1
    } else if daily_gdd < optimal_min {
        0.3 + (daily_gdd - dormancy) * 0.7 / (optimal_min - dormancy)
    } else if daily_gdd <= optimal_max {
        1.0
    } else if daily_gdd <= stress {
        let excess_ratio = (daily_gdd - optimal_max) / (stress - optimal_max);
        1.0 + excess_ratio * 1.5
    } else {
        0.8
    }
}

/// Qualitative forecast text for a growth multiplier.
pub fn growth_outlook(multiplier: f64) -> String {
    if multiplier <= 0.3 {
        "Minimal growth expected (dormant conditions)".to_string()
    } else if multiplier <= 0.7 {
        format!("Slow growth expected ({:.1}× normal rate)", multiplier)
    } else if multiplier <= 1.3 {
        format!("Normal growth expected ({:.1}× normal rate)", multiplier)
    } else if multiplier <= 2.0 {
        format!("Fast growth expected ({:.1}× normal rate)", multiplier)
    } else {
        format!("Rapid growth expected ({:.1}× normal rate)", multiplier)
    }
}

/// Turf growth and maintenance model driven by daily GDD.
#[derive(Debug, Clone)]
pub struct TurfGrowthModel {
    config: TurfConfig,
}

impl TurfGrowthModel {
    pub fn new(config: TurfConfig) -> Self {
        Self { config }
    }

    pub fn profile(&self, turf_type: TurfType) -> &GrowthProfile {
        match turf_type {
            TurfType::CoolSeason => &self.config.cool_season,
            TurfType::WarmSeason => &self.config.warm_season,
        }
    }

    /// Credit one day of growth. Returns the day's growth in mm.
    pub fn apply_daily(&self, growth: &mut GrowthState, daily_gdd: f64, turf_type: TurfType) -> f64 {
        let profile = self.profile(turf_type);
        let multiplier = growth_multiplier(daily_gdd, profile);
        let actual_growth = daily_gdd * profile.base_growth_rate * multiplier;

        growth.accumulated_growth += actual_growth;
        growth.growth_multiplier = multiplier;
        growth.estimated_growth_today = actual_growth;

        tracing::debug!(
            turf_type = %turf_type,
            daily_gdd,
            multiplier,
            growth_mm = actual_growth,
            total_mm = growth.accumulated_growth,
            "Turf growth updated"
        );

        actual_growth
    }

    pub fn record_mowing(growth: &mut GrowthState) {
        growth.days_since_mow = 0;
        growth.accumulated_growth = 0.0;
        tracing::info!("Mowing recorded, growth tracking reset");
    }

    pub fn mowing_threshold(&self, level: MaintenanceLevel) -> f64 {
        self.config.mowing_thresholds.for_level(level)
    }

    pub fn mowing_urgency(&self, growth: &GrowthState, level: MaintenanceLevel) -> MowingUrgency {
        let threshold = self.mowing_threshold(level);
        if threshold <= 0.0 {
            return MowingUrgency::Critical;
        }
        MowingUrgency::from_ratio(growth.accumulated_growth / threshold)
    }

    pub fn pgr_tier(&self, weekly_gdd: f64) -> PgrTier {
        PgrTier::from_weekly_gdd(weekly_gdd, &self.config.pgr_thresholds)
    }

    /// Estimate days until growth reaches the mowing threshold at the last daily rate.
    pub fn days_to_next_mow(&self, growth: &GrowthState, level: MaintenanceLevel) -> u32 {
        if growth.growth_multiplier <= 0.0 {
            return DORMANT_DAYS_TO_MOW;
        }

        let remaining = (self.mowing_threshold(level) - growth.accumulated_growth).max(0.0);

        if growth.estimated_growth_today > 0.0 {
            ((remaining / growth.estimated_growth_today) as u32).max(1)
        } else {
            DEFAULT_DAYS_TO_MOW
        }
    }

    pub fn recommendations(&self, state: &GddState, level: MaintenanceLevel) -> Vec<Recommendation> {
        let growth = &state.growth;
        let urgency = self.mowing_urgency(growth, level);
        let mowing_severity = match urgency {
            MowingUrgency::NotNeeded => Severity::Info,
            MowingUrgency::Soon => Severity::Advisory,
            MowingUrgency::Recommended | MowingUrgency::Overdue => Severity::Warning,
            MowingUrgency::Critical => Severity::Critical,
        };

        let mut mowing = Recommendation::new(
            "mowing",
            RecommendationCategory::Mowing,
            mowing_severity,
            urgency.as_str(),
            format!(
                "{:.1} mm of growth since the last mow against a {:.0} mm threshold ({}).",
                growth.accumulated_growth,
                self.mowing_threshold(level),
                level
            ),
        )
        .with_data_point("Accumulated Growth", format!("{:.1} mm", growth.accumulated_growth))
        .with_data_point("Days Since Mow", growth.days_since_mow)
        .with_data_point(
            "Estimated Days To Mow",
            self.days_to_next_mow(growth, level),
        );
        if urgency >= MowingUrgency::Recommended {
            mowing = mowing.with_action("Mow and record it to reset growth tracking.");
        }
        let mut recs = vec![mowing];

        let tier = self.pgr_tier(state.weekly_gdd);
        let pgr_severity = match tier {
            PgrTier::NotNeeded => Severity::Info,
            PgrTier::Preventive => Severity::Advisory,
            PgrTier::Active => Severity::Warning,
            PgrTier::Rescue => Severity::Critical,
        };
        let mut pgr = Recommendation::new(
            "pgr",
            RecommendationCategory::GrowthRegulator,
            pgr_severity,
            tier.as_str(),
            format!("{:.1} GDD accumulated this week.", state.weekly_gdd),
        )
        .with_data_point("Weekly GDD", format!("{:.1}", state.weekly_gdd));
        if let Some(avg) = state.average_weekly_gdd() {
            pgr = pgr.with_data_point("Average Weekly GDD", round1(avg));
        }
        if tier >= PgrTier::Active {
            pgr = pgr.with_action("Apply a growth regulator before the next mowing cycle.");
        }
        recs.push(pgr);

        recs.push(
            Recommendation::new(
                "growth_forecast",
                RecommendationCategory::GrowthForecast,
                Severity::Info,
                "Growth Forecast",
                growth_outlook(growth.growth_multiplier),
            )
            .with_data_point("Growth Multiplier", format!("{:.2}×", growth.growth_multiplier)),
        );

        let target = self.config.seasonal_target;
        let stage = DevelopmentStage::evaluate(state.seasonal_gdd, target);
        recs.push(
            Recommendation::new(
                "development",
                RecommendationCategory::Development,
                Severity::Info,
                stage.label(),
                format!(
                    "{} ({:.1} of {:.0} seasonal GDD).",
                    stage.phase(),
                    state.seasonal_gdd,
                    target
                ),
            )
            .with_data_point("Seasonal GDD", round1(state.seasonal_gdd)),
        );

        recs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> TurfGrowthModel {
        TurfGrowthModel::new(TurfConfig::default())
    }

    fn profile() -> GrowthProfile {
        GrowthProfile {
            base_growth_rate: 0.5,
            optimal_gdd_range: (5.0, 12.0),
            dormancy_threshold: 1.0,
            stress_threshold: 18.0,
        }
    }

    #[test]
    fn multiplier_dormant() {
        assert_eq!(growth_multiplier(0.0, &profile()), 0.1);
        assert_eq!(growth_multiplier(1.0, &profile()), 0.1);
    }

    #[test]
    fn multiplier_ramp_up() {
        // halfway between dormancy (1) and optimal low (5): 0.3 + 2 * 0.7 / 4
        let m = growth_multiplier(3.0, &profile());
        assert!((m - 0.65).abs() < 1e-9);
        // approaching optimal from below tends to 1.0
        assert!((growth_multiplier(4.999_999, &profile()) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn multiplier_optimal_band() {
        assert_eq!(growth_multiplier(5.0, &profile()), 1.0);
        assert_eq!(growth_multiplier(8.0, &profile()), 1.0);
        assert_eq!(growth_multiplier(12.0, &profile()), 1.0);
    }

    #[test]
    fn multiplier_surge_up_to_two_and_a_half() {
        let m = growth_multiplier(15.0, &profile());
        assert!((m - 1.75).abs() < 1e-9);
        assert!((growth_multiplier(18.0, &profile()) - 2.5).abs() < 1e-9);
    }

    #[test]
    fn multiplier_heat_stress() {
        assert_eq!(growth_multiplier(18.1, &profile()), 0.8);
        assert_eq!(growth_multiplier(40.0, &profile()), 0.8);
    }

    #[test]
    fn apply_daily_accumulates() {
        let model = model();
        let mut growth = GrowthState::default();
        // cool-season default: 8 GDD is optimal → 8 * 0.5 * 1.0 = 4 mm
        let g = model.apply_daily(&mut growth, 8.0, TurfType::CoolSeason);
        assert!((g - 4.0).abs() < 1e-9);
        model.apply_daily(&mut growth, 8.0, TurfType::CoolSeason);
        assert!((growth.accumulated_growth - 8.0).abs() < 1e-9);
        assert_eq!(growth.growth_multiplier, 1.0);
        assert!((growth.estimated_growth_today - 4.0).abs() < 1e-9);
    }

    #[test]
    fn record_mowing_is_idempotent() {
        let mut growth = GrowthState {
            days_since_mow: 5,
            accumulated_growth: 22.0,
            ..Default::default()
        };
        TurfGrowthModel::record_mowing(&mut growth);
        assert_eq!(growth.accumulated_growth, 0.0);
        assert_eq!(growth.days_since_mow, 0);
        TurfGrowthModel::record_mowing(&mut growth);
        assert_eq!(growth.accumulated_growth, 0.0);
        assert_eq!(growth.days_since_mow, 0);
    }

    #[test]
    fn mowing_urgency_uses_maintenance_threshold() {
        let model = model();
        let growth = GrowthState {
            accumulated_growth: 20.0,
            ..Default::default()
        };
        // 20 / 40 = 0.5
        assert_eq!(
            model.mowing_urgency(&growth, MaintenanceLevel::Low),
            MowingUrgency::Soon
        );
        // 20 / 25 = 0.8
        assert_eq!(
            model.mowing_urgency(&growth, MaintenanceLevel::Medium),
            MowingUrgency::Recommended
        );
        // 20 / 15 ≈ 1.33
        assert_eq!(
            model.mowing_urgency(&growth, MaintenanceLevel::High),
            MowingUrgency::Overdue
        );
    }

    #[test]
    fn days_to_next_mow() {
        let model = model();
        let mut growth = GrowthState {
            accumulated_growth: 10.0,
            estimated_growth_today: 4.0,
            ..Default::default()
        };
        // (25 - 10) / 4 = 3.75 → 3
        assert_eq!(model.days_to_next_mow(&growth, MaintenanceLevel::Medium), 3);

        growth.accumulated_growth = 30.0;
        assert_eq!(model.days_to_next_mow(&growth, MaintenanceLevel::Medium), 1);

        growth.estimated_growth_today = 0.0;
        assert_eq!(model.days_to_next_mow(&growth, MaintenanceLevel::Medium), 7);

        growth.growth_multiplier = 0.0;
        assert_eq!(model.days_to_next_mow(&growth, MaintenanceLevel::Medium), 14);
    }

    #[test]
    fn outlook_text() {
        assert_eq!(
            growth_outlook(0.1),
            "Minimal growth expected (dormant conditions)"
        );
        assert_eq!(growth_outlook(0.65), "Slow growth expected (0.7× normal rate)");
        assert_eq!(growth_outlook(1.0), "Normal growth expected (1.0× normal rate)");
        assert_eq!(growth_outlook(1.75), "Fast growth expected (1.8× normal rate)");
        assert_eq!(growth_outlook(2.5), "Rapid growth expected (2.5× normal rate)");
    }

    #[test]
    fn recommendations_cover_mowing_pgr_and_forecast() {
        let model = model();
        let state = GddState {
            weekly_gdd: 90.0,
            weekly_gdd_history: vec![40.0, 60.0],
            ..Default::default()
        };
        let recs = model.recommendations(&state, MaintenanceLevel::Medium);
        assert_eq!(recs.len(), 4);
        assert_eq!(recs[0].title, "No mowing needed");
        assert_eq!(recs[1].title, "Apply active PGR");
        assert_eq!(recs[1].severity, Severity::Warning);
        assert!(recs[1].suggested_action.is_some());
        assert_eq!(recs[2].category, RecommendationCategory::GrowthForecast);
        assert_eq!(recs[3].title, "Early Development");
    }
}
