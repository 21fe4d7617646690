use std::{fs, path::Path, sync::Arc};

use anyhow::{Context, Result};
use uuid::Uuid;

use rtm_ethics::{
    cli::args_from_env,
    config::Config,
    ethics::{EthicsFacade, EvaluationRequest},
    logging::init_tracing,
    server,
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = args_from_env()?;
    let config = Config::load(&args.config_path)
        .with_context(|| format!("failed to load config from {}", args.config_path.display()))?;
    let _logging_guard = init_tracing(&config.logging)?;

    let facade = Arc::new(EthicsFacade::from_thresholds(config.thresholds));

    match args.evaluate_path {
        Some(request_path) => evaluate_once(&facade, &request_path),
        None => server::run(config.server, facade).await,
    }
}

fn evaluate_once(facade: &EthicsFacade, request_path: &Path) -> Result<()> {
    let request_text = fs::read_to_string(request_path)
        .with_context(|| format!("failed to read {}", request_path.display()))?;
    let request: EvaluationRequest = serde_json::from_str(&request_text)
        .with_context(|| format!("failed to parse request {}", request_path.display()))?;

    let request_id = Uuid::now_v7().to_string();
    let outcome = facade
        .evaluate_request(&request_id, request)
        .with_context(|| format!("request {} was rejected", request_path.display()))?;

    let rendered = serde_json::to_string_pretty(&outcome).context("failed to render outcome")?;
    println!("{rendered}");
    Ok(())
}
