use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub model: ModelConfig,
    pub catalog: Vec<RouteEntry>,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub artifact_path: String,
}

/// One catalog entry: a route key and its named physical alternatives,
/// in the order they should break ties.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteEntry {
    pub key: String,
    pub alternatives: Vec<RouteAlternative>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// A named physical path between the same two endpoints. The distance is
/// fixed by the catalog, not by request parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteAlternative {
    pub name: String,
    pub distance_km: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CongestionLevel {
    Low,
    Medium,
    High,
}

impl CongestionLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CongestionLevel::Low => "Low",
            CongestionLevel::Medium => "Medium",
            CongestionLevel::High => "High",
        }
    }

    /// Average speed implied by this congestion level, km/h.
    pub fn speed_kmh(&self) -> f64 {
        match self {
            CongestionLevel::Low => 60.0,
            CongestionLevel::Medium => 30.0,
            CongestionLevel::High => 12.0,
        }
    }

    /// Severity for emergency routing, best-first.
    pub fn severity_rank(&self) -> u8 {
        match self {
            CongestionLevel::Low => 0,
            CongestionLevel::Medium => 1,
            CongestionLevel::High => 2,
        }
    }

    /// Maps a target-vocabulary label onto a level. Labels are exactly the
    /// strings the model was trained against, so no case folding.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Low" => Some(CongestionLevel::Low),
            "Medium" => Some(CongestionLevel::Medium),
            "High" => Some(CongestionLevel::High),
            _ => None,
        }
    }
}

impl std::fmt::Display for CongestionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleClass {
    Normal,
    Emergency,
}

impl VehicleClass {
    /// "emergency" in any casing selects emergency routing; everything else
    /// is normal traffic.
    pub fn from_input(value: &str) -> Self {
        if value.eq_ignore_ascii_case("emergency") {
            VehicleClass::Emergency
        } else {
            VehicleClass::Normal
        }
    }
}

/// One evaluated path. Produced fresh per request, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub route_name: String,
    pub distance_km: f64,
    pub congestion: CongestionLevel,
    pub est_time_mins: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationOutcome {
    pub best: PredictionResult,
    pub all_ranked: Vec<PredictionResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PredictRequest {
    pub route: String,
    pub time_of_day: String,
    pub day_type: String,
    #[serde(default = "default_distance_km")]
    pub distance: f64,
    #[serde(default = "default_avg_speed_kmh")]
    pub avg_speed: f64,
    #[serde(default = "default_vehicle_type")]
    pub vehicle_type: String,
}

fn default_distance_km() -> f64 {
    15.0
}

fn default_avg_speed_kmh() -> f64 {
    25.0
}

fn default_vehicle_type() -> String {
    "Normal".to_string()
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictResponse {
    pub now: CongestionLevel,
    pub future: CongestionLevel,
    pub recommended: PredictionResult,
    pub alternatives: Vec<PredictionResult>,
}
