// src/recommend.rs
//
// Recommendation selector. Expands a route key into its catalog
// alternatives, runs each through feature building, classification, and
// travel-time estimation, then ranks them under the vehicle-class policy.

use crate::catalog::RouteCatalog;
use crate::codec::CategoryCodec;
use crate::error::{EngineError, EngineResult};
use crate::estimator;
use crate::features;
use crate::forecast;
use crate::model::{self, CongestionModel};
use crate::types::{
    CongestionLevel, PredictRequest, PredictResponse, PredictionResult, RecommendationOutcome,
    VehicleClass,
};
use tracing::{debug, info, warn};

pub struct RouteAdvisor {
    codec: CategoryCodec,
    catalog: RouteCatalog,
    model: Box<dyn CongestionModel>,
}

impl RouteAdvisor {
    /// Wires the immutable process-wide configuration together. Everything
    /// that can only go wrong through misdeployment is rejected here, so
    /// requests never see a configuration failure.
    pub fn new(
        codec: CategoryCodec,
        catalog: RouteCatalog,
        columns: &[String],
        model: Box<dyn CongestionModel>,
    ) -> EngineResult<Self> {
        model::validate_columns(columns)?;

        for label in codec.target().labels() {
            if CongestionLevel::from_label(label).is_none() {
                return Err(EngineError::Configuration(format!(
                    "target label '{}' does not map onto a congestion level",
                    label
                )));
            }
        }
        if codec.target().is_empty() {
            return Err(EngineError::Configuration(
                "target vocabulary is empty".to_string(),
            ));
        }

        if catalog.is_empty() {
            warn!("Route catalog is empty; every request will take the single-path fallback");
        }

        Ok(Self {
            codec,
            catalog,
            model,
        })
    }

    pub fn codec(&self) -> &CategoryCodec {
        &self.codec
    }

    /// One classification: build the sample, ask the capability, decode the
    /// class index back to a label.
    pub fn predict_congestion(
        &self,
        route: &str,
        time_of_day: &str,
        day_type: &str,
        distance_km: f64,
        avg_speed_kmh: f64,
    ) -> EngineResult<CongestionLevel> {
        let sample = features::build(
            &self.codec,
            route,
            time_of_day,
            day_type,
            distance_km,
            avg_speed_kmh,
        )?;
        let class_index = self.model.classify(&sample)?;
        let label = self.codec.target().decode(class_index)?;
        // Labels were validated against the level set at construction.
        CongestionLevel::from_label(label).ok_or_else(|| {
            EngineError::Configuration(format!("undecodable congestion label '{label}'"))
        })
    }

    /// Evaluates every alternative for the route key and ranks them.
    ///
    /// Ranking uses `sort_by`, which is stable: alternatives with equal keys
    /// keep their catalog order. That stability is a contract, not an
    /// accident — ties must resolve to the catalog's preferred path.
    pub fn recommend(
        &self,
        route_key: &str,
        time_of_day: &str,
        day_type: &str,
        avg_speed_kmh: f64,
        vehicle: VehicleClass,
    ) -> EngineResult<RecommendationOutcome> {
        let alternatives = self.catalog.alternatives_for(route_key).unwrap_or(&[]);
        if alternatives.is_empty() {
            // Legacy fallback: no usable catalog entry, so the caller's
            // speed doubles as the path distance and the outcome carries no
            // ranked list. Preserved for compatibility.
            warn!(
                "Route key '{}' not in catalog; degenerate single-path evaluation",
                route_key
            );
            let congestion = self.predict_congestion(
                route_key,
                time_of_day,
                day_type,
                avg_speed_kmh,
                avg_speed_kmh,
            )?;
            let best = PredictionResult {
                route_name: route_key.to_string(),
                distance_km: avg_speed_kmh,
                congestion,
                est_time_mins: estimator::estimate(avg_speed_kmh, congestion),
            };
            return Ok(RecommendationOutcome {
                best,
                all_ranked: Vec::new(),
            });
        }

        let mut results = Vec::with_capacity(alternatives.len());
        for alt in alternatives {
            // Features see the alternative's own distance with the caller's
            // claimed speed; the estimate uses the congestion-implied speed.
            let congestion = self.predict_congestion(
                route_key,
                time_of_day,
                day_type,
                alt.distance_km,
                avg_speed_kmh,
            )?;
            let est_time_mins = estimator::estimate(alt.distance_km, congestion);
            debug!(
                "Alternative '{}' ({:.1} km): {} / {:.1} mins",
                alt.name, alt.distance_km, congestion, est_time_mins
            );
            results.push(PredictionResult {
                route_name: alt.name.clone(),
                distance_km: alt.distance_km,
                congestion,
                est_time_mins,
            });
        }

        match vehicle {
            VehicleClass::Emergency => results.sort_by(|a, b| {
                a.congestion
                    .severity_rank()
                    .cmp(&b.congestion.severity_rank())
                    .then(a.est_time_mins.total_cmp(&b.est_time_mins))
            }),
            VehicleClass::Normal => {
                results.sort_by(|a, b| a.est_time_mins.total_cmp(&b.est_time_mins))
            }
        }

        let best = results[0].clone();
        info!(
            "Recommended '{}' for {}: {} / {:.1} mins ({} alternative(s))",
            best.route_name,
            route_key,
            best.congestion,
            best.est_time_mins,
            results.len()
        );

        Ok(RecommendationOutcome {
            best,
            all_ranked: results,
        })
    }

    /// Full request flow: congestion now, congestion one period ahead, and
    /// the ranked recommendation.
    pub fn predict(&self, request: &PredictRequest) -> EngineResult<PredictResponse> {
        let vehicle = VehicleClass::from_input(&request.vehicle_type);

        let now = self.predict_congestion(
            &request.route,
            &request.time_of_day,
            &request.day_type,
            request.distance,
            request.avg_speed,
        )?;

        let future_time = forecast::next_period(&request.time_of_day);
        let future = self.predict_congestion(
            &request.route,
            future_time,
            &request.day_type,
            request.distance,
            request.avg_speed,
        )?;

        let outcome = self.recommend(
            &request.route,
            &request.time_of_day,
            &request.day_type,
            request.avg_speed,
            vehicle,
        )?;

        Ok(PredictResponse {
            now,
            future,
            recommended: outcome.best,
            alternatives: outcome.all_ranked,
        })
    }
}
