use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurfType {
    CoolSeason,
    WarmSeason,
}

impl TurfType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurfType::CoolSeason => "Cool Season",
            TurfType::WarmSeason => "Warm Season",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "cool_season" | "coolseason" | "cool season" | "cool" => Some(TurfType::CoolSeason),
            "warm_season" | "warmseason" | "warm season" | "warm" => Some(TurfType::WarmSeason),
            _ => None,
        }
    }

    /// Guess from the base temperature: cool-season grasses use lower bases.
    pub fn from_base_temperature(base_temp: f64) -> Self {
        if base_temp <= 10.0 {
            TurfType::CoolSeason
        } else {
            TurfType::WarmSeason
        }
    }
}

impl std::fmt::Display for TurfType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl MaintenanceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaintenanceLevel::Low => "Low Maintenance",
            MaintenanceLevel::Medium => "Medium Maintenance",
            MaintenanceLevel::High => "High Maintenance",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low_maintenance" | "low maintenance" | "low" => Some(MaintenanceLevel::Low),
            "medium_maintenance" | "medium maintenance" | "medium" => {
                Some(MaintenanceLevel::Medium)
            }
            "high_maintenance" | "high maintenance" | "high" => Some(MaintenanceLevel::High),
            _ => None,
        }
    }
}

impl std::fmt::Display for MaintenanceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Growth response of one turf type to daily GDD.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthProfile {
    /// mm of leaf growth per GDD at a 1.0× multiplier
    pub base_growth_rate: f64,
    /// Daily GDD band (low, high) with full-rate growth
    pub optimal_gdd_range: (f64, f64),
    pub dormancy_threshold: f64,
    pub stress_threshold: f64,
}

impl GrowthProfile {
    pub fn cool_season() -> Self {
        Self {
            base_growth_rate: 0.5,
            optimal_gdd_range: (5.0, 12.0),
            dormancy_threshold: 1.0,
            stress_threshold: 18.0,
        }
    }

    pub fn warm_season() -> Self {
        Self {
            base_growth_rate: 0.7,
            optimal_gdd_range: (8.0, 16.0),
            dormancy_threshold: 2.0,
            stress_threshold: 24.0,
        }
    }
}

/// Growth (mm) at which a mow is due, per maintenance level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MowingThresholds {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl MowingThresholds {
    pub fn for_level(&self, level: MaintenanceLevel) -> f64 {
        match level {
            MaintenanceLevel::Low => self.low,
            MaintenanceLevel::Medium => self.medium,
            MaintenanceLevel::High => self.high,
        }
    }
}

impl Default for MowingThresholds {
    fn default() -> Self {
        Self {
            low: 40.0,
            medium: 25.0,
            high: 15.0,
        }
    }
}

/// Mowing urgency derived from growth since the last cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MowingUrgency {
    NotNeeded,
    Soon,
    Recommended,
    Overdue,
    Critical,
}

impl MowingUrgency {
    /// Categorize `accumulated_growth / threshold`.
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio < 0.5 {
            MowingUrgency::NotNeeded
        } else if ratio < 0.8 {
            MowingUrgency::Soon
        } else if ratio < 1.0 {
            MowingUrgency::Recommended
        } else if ratio < 1.5 {
            MowingUrgency::Overdue
        } else {
            MowingUrgency::Critical
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MowingUrgency::NotNeeded => "No mowing needed",
            MowingUrgency::Soon => "Mowing soon",
            MowingUrgency::Recommended => "Mowing recommended",
            MowingUrgency::Overdue => "Mowing overdue",
            MowingUrgency::Critical => "Mowing critical",
        }
    }
}

impl std::fmt::Display for MowingUrgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Weekly GDD thresholds for plant growth regulator programs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PgrThresholds {
    pub preventive: f64,
    pub active: f64,
    pub rescue: f64,
}

impl Default for PgrThresholds {
    fn default() -> Self {
        Self {
            preventive: 50.0,
            active: 80.0,
            rescue: 120.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PgrTier {
    NotNeeded,
    Preventive,
    Active,
    Rescue,
}

impl PgrTier {
    pub fn from_weekly_gdd(weekly_gdd: f64, thresholds: &PgrThresholds) -> Self {
        if weekly_gdd < thresholds.preventive {
            PgrTier::NotNeeded
        } else if weekly_gdd < thresholds.active {
            PgrTier::Preventive
        } else if weekly_gdd < thresholds.rescue {
            PgrTier::Active
        } else {
            PgrTier::Rescue
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PgrTier::NotNeeded => "No PGR needed",
            PgrTier::Preventive => "Consider preventive PGR",
            PgrTier::Active => "Apply active PGR",
            PgrTier::Rescue => "Rescue PGR needed",
        }
    }
}

impl std::fmt::Display for PgrTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Stage of seasonal development relative to the seasonal GDD target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DevelopmentStage {
    EarlyDevelopment,
    ActiveGrowth,
    AdvancedGrowth,
    NearTarget { percentage: f64 },
    TargetReached,
    TargetExceeded,
}

impl DevelopmentStage {
    pub fn evaluate(seasonal_gdd: f64, target: f64) -> Self {
        if seasonal_gdd < target * 0.25 {
            DevelopmentStage::EarlyDevelopment
        } else if seasonal_gdd < target * 0.5 {
            DevelopmentStage::ActiveGrowth
        } else if seasonal_gdd < target * 0.75 {
            DevelopmentStage::AdvancedGrowth
        } else if seasonal_gdd < target {
            let percentage = if target > 0.0 {
                round1(seasonal_gdd / target * 100.0)
            } else {
                0.0
            };
            DevelopmentStage::NearTarget { percentage }
        } else if (seasonal_gdd - target).abs() < 5.0 {
            DevelopmentStage::TargetReached
        } else {
            DevelopmentStage::TargetExceeded
        }
    }

    pub fn label(&self) -> String {
        match self {
            DevelopmentStage::EarlyDevelopment => "Early Development".into(),
            DevelopmentStage::ActiveGrowth => "Active Growth".into(),
            DevelopmentStage::AdvancedGrowth => "Advanced Growth".into(),
            DevelopmentStage::NearTarget { percentage } => {
                format!("Near Target ({}%)", percentage)
            }
            DevelopmentStage::TargetReached => "Target Reached".into(),
            DevelopmentStage::TargetExceeded => "Target Exceeded".into(),
        }
    }

    pub fn phase(&self) -> &'static str {
        match self {
            DevelopmentStage::EarlyDevelopment => "Germination & Early Emergence",
            DevelopmentStage::ActiveGrowth => "Vegetative Growth",
            DevelopmentStage::AdvancedGrowth => "Reproductive Development",
            DevelopmentStage::NearTarget { .. } => "Maturation Phase",
            DevelopmentStage::TargetReached | DevelopmentStage::TargetExceeded => {
                "Harvest Ready"
            }
        }
    }
}

impl std::fmt::Display for DevelopmentStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
