// src/main.rs

mod catalog;
mod codec;
mod config;
mod error;
mod estimator;
mod features;
mod forecast;
mod model;
mod recommend;
mod types;

use anyhow::{Context, Result};
use catalog::RouteCatalog;
use codec::CategoryCodec;
use error::EngineError;
use model::{ModelArtifact, RuleModel};
use recommend::RouteAdvisor;
use std::io::Read;
use tracing::info;
use types::{Config, PredictRequest};

fn main() -> Result<()> {
    let config = Config::load("config.yaml")?;

    tracing_subscriber::fmt()
        .with_env_filter(config.logging.level.clone())
        .with_writer(std::io::stderr)
        .init();

    info!("🚦 Route Advisor starting");

    let artifact = ModelArtifact::load(&config.model.artifact_path)?;
    info!("✓ Model artifact loaded: {}", config.model.artifact_path);

    let codec = CategoryCodec::new(
        artifact.vocabularies.route.clone(),
        artifact.vocabularies.time_of_day.clone(),
        artifact.vocabularies.day_type.clone(),
        artifact.target.clone(),
    );
    let model = RuleModel::from_artifact(&artifact)?;
    let catalog = RouteCatalog::from_entries(&config.catalog);

    let advisor = RouteAdvisor::new(codec, catalog, &artifact.columns, Box::new(model))?;
    info!(
        "✓ Engine ready: {} route key(s) in catalog, {} trained route label(s)",
        config.catalog.len(),
        advisor.codec().route().len()
    );

    let raw = read_request()?;
    let request: PredictRequest = serde_json::from_str(&raw)
        .map_err(|e| EngineError::InvalidParameter(format!("request body: {e}")))?;
    info!(
        "Request: route='{}' time='{}' day='{}' vehicle='{}'",
        request.route, request.time_of_day, request.day_type, request.vehicle_type
    );

    let response = advisor.predict(&request)?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}

/// Request JSON comes from the file named on the command line, or stdin.
fn read_request() -> Result<String> {
    match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read request file: {}", path)),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read request from stdin")?;
            Ok(buffer)
        }
    }
}
