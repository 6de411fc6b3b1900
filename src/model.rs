// src/model.rs
//
// The congestion classifier as a capability: the engine only ever sees the
// `classify` contract, so any prediction technique can sit behind it. The
// shipped implementation is a pre-trained decision-list artifact loaded
// from YAML at startup, first matching rule wins.

use crate::error::{EngineError, EngineResult};
use crate::features::{FeatureVector, MODEL_COLUMNS};
use serde::Deserialize;
use std::fs;
use tracing::info;

/// Pure inference contract: feature vector in, class index out. The index
/// is decoded to a congestion label through the target vocabulary.
///
/// `Send + Sync` is required so recommendation requests can run in parallel
/// without the engine coordinating anything; a capability that is not
/// internally synchronized must wrap itself before being supplied.
pub trait CongestionModel: Send + Sync {
    fn classify(&self, features: &FeatureVector) -> EngineResult<usize>;
}

// ============================================================================
// ARTIFACT
// ============================================================================

/// The training artifact: vocabularies, expected column order, target label
/// ordering, and the fitted rule list.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelArtifact {
    pub vocabularies: VocabularySpec,
    pub target: Vec<String>,
    pub columns: Vec<String>,
    pub rules: Vec<RuleSpec>,
    pub default_class: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VocabularySpec {
    pub route: Vec<String>,
    pub time_of_day: Vec<String>,
    pub day_type: Vec<String>,
}

/// One fitted rule. Absent fields match anything; label fields are encoded
/// against the artifact's own vocabularies when the model is built.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleSpec {
    pub route: Option<String>,
    pub time_of_day: Option<String>,
    pub day_type: Option<String>,
    pub min_distance_km: Option<f64>,
    pub max_avg_speed_kmh: Option<f64>,
    pub class: String,
}

impl ModelArtifact {
    pub fn load(path: &str) -> EngineResult<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| EngineError::Configuration(format!("read model artifact {path}: {e}")))?;
        let artifact: ModelArtifact = serde_yaml::from_str(&contents)
            .map_err(|e| EngineError::Configuration(format!("parse model artifact {path}: {e}")))?;
        Ok(artifact)
    }
}

/// Validates the artifact's declared column order against the order the
/// feature builder produces. Checked once at startup; a mismatch means the
/// deployment is broken and no request may be served.
pub fn validate_columns(columns: &[String]) -> EngineResult<()> {
    if columns.len() != MODEL_COLUMNS.len()
        || columns.iter().zip(MODEL_COLUMNS.iter()).any(|(a, b)| a != b)
    {
        return Err(EngineError::Configuration(format!(
            "feature column order mismatch: artifact declares {:?}, engine builds {:?}",
            columns, MODEL_COLUMNS
        )));
    }
    Ok(())
}

// ============================================================================
// RULE MODEL
// ============================================================================

#[derive(Debug, Clone)]
struct CompiledRule {
    route_code: Option<usize>,
    time_code: Option<usize>,
    day_code: Option<usize>,
    min_distance_km: Option<f64>,
    max_avg_speed_kmh: Option<f64>,
    class_index: usize,
}

impl CompiledRule {
    fn matches(&self, fv: &FeatureVector) -> bool {
        self.route_code.map_or(true, |c| c == fv.route_code)
            && self.time_code.map_or(true, |c| c == fv.time_code)
            && self.day_code.map_or(true, |c| c == fv.day_code)
            && self.min_distance_km.map_or(true, |d| fv.distance_km >= d)
            && self
                .max_avg_speed_kmh
                .map_or(true, |s| fv.avg_speed_kmh <= s)
    }
}

pub struct RuleModel {
    rules: Vec<CompiledRule>,
    default_class_index: usize,
}

impl RuleModel {
    /// Compiles the artifact's label-based rules into code-based matchers.
    /// Any label outside its vocabulary makes the artifact unusable.
    pub fn from_artifact(artifact: &ModelArtifact) -> EngineResult<Self> {
        let codec = crate::codec::CategoryCodec::new(
            artifact.vocabularies.route.clone(),
            artifact.vocabularies.time_of_day.clone(),
            artifact.vocabularies.day_type.clone(),
            artifact.target.clone(),
        );

        let class_index = |label: &str| {
            codec.target().encode(label).map_err(|_| {
                EngineError::Configuration(format!(
                    "rule class '{}' is not in the target labels {:?}",
                    label, artifact.target
                ))
            })
        };

        let mut rules = Vec::with_capacity(artifact.rules.len());
        for spec in &artifact.rules {
            rules.push(CompiledRule {
                route_code: spec
                    .route
                    .as_deref()
                    .map(|l| codec.route().encode(l))
                    .transpose()
                    .map_err(|e| EngineError::Configuration(e.to_string()))?,
                time_code: spec
                    .time_of_day
                    .as_deref()
                    .map(|l| codec.time_of_day().encode(l))
                    .transpose()
                    .map_err(|e| EngineError::Configuration(e.to_string()))?,
                day_code: spec
                    .day_type
                    .as_deref()
                    .map(|l| codec.day_type().encode(l))
                    .transpose()
                    .map_err(|e| EngineError::Configuration(e.to_string()))?,
                min_distance_km: spec.min_distance_km,
                max_avg_speed_kmh: spec.max_avg_speed_kmh,
                class_index: class_index(&spec.class)?,
            });
        }

        info!(
            "Rule model compiled: {} rule(s), {} target class(es)",
            rules.len(),
            artifact.target.len()
        );

        Ok(Self {
            rules,
            default_class_index: class_index(&artifact.default_class)?,
        })
    }
}

impl CongestionModel for RuleModel {
    fn classify(&self, features: &FeatureVector) -> EngineResult<usize> {
        Ok(self
            .rules
            .iter()
            .find(|rule| rule.matches(features))
            .map(|rule| rule.class_index)
            .unwrap_or(self.default_class_index))
    }
}
