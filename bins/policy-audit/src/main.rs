//! Access-policy audit tool for Meridian.
//!
//! Loads the configured policy tables, evaluates a principal snapshot
//! against every known feature and operation, and prints the resulting
//! decisions as JSON. Useful for answering "what exactly can this user
//! do?" without clicking through the application.
//!
//! Usage: cargo run --bin policy-audit -- snapshot.json

use std::collections::BTreeMap;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use meridian_core::access::{AccessControl, OperationContext, Principal, PrincipalSnapshot};
use meridian_shared::AppConfig;

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "meridian=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let path = std::env::args()
        .nth(1)
        .context("usage: policy-audit <snapshot.json>")?;

    // Load configuration and build the engine
    let config = AppConfig::load().context("failed to load configuration")?;
    let engine = AccessControl::from_config(&config.access)?;
    info!(
        features = engine.policy().feature_names().count(),
        operations = engine.policy().operation_names().count(),
        "policy tables loaded"
    );

    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read snapshot file {path}"))?;
    let snapshot: PrincipalSnapshot =
        serde_json::from_str(&raw).context("snapshot is not valid principal JSON")?;
    let principal = Principal::from_snapshot(&snapshot);

    let effective: Vec<&str> = engine
        .resolve_effective_capabilities(Some(&principal))
        .iter()
        .map(|cap| cap.as_str())
        .collect();

    let mut features = BTreeMap::new();
    for name in engine.policy().feature_names() {
        features.insert(name, engine.can_access_feature(Some(&principal), name));
    }

    let mut operations = BTreeMap::new();
    let ctx = OperationContext::none();
    for name in engine.policy().operation_names() {
        operations.insert(
            name,
            engine.can_perform_operation(Some(&principal), name, &ctx),
        );
    }

    let report = serde_json::json!({
        "principal": principal,
        "effective_capabilities": effective,
        "features": features,
        "operations": operations,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
