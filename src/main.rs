//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here.

use dotenv::dotenv;
use issue_relay::adapters::ai::{MockAiAdapter, OpenAiAdapter};
use issue_relay::adapters::tracker::LinearAdapter;
use issue_relay::adapters::ui::tui::TuiInputPort;
use issue_relay::ports::{AiPort, InputPort, TrackerPort};
use issue_relay::usecases::{AssignmentService, CreationService, ExtractionService};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    issue_relay::adapters::ui::init_ui();

    let cfg = issue_relay::shared::config::AppConfig::load().unwrap_or_default();

    let Some(linear_api_key) = cfg.linear_api_key() else {
        anyhow::bail!("Set LINEAR_API_KEY (env or .env). Get one from Linear > Settings > API");
    };

    // --- AI adapter (real when key is configured, mock otherwise) ---
    let ai: Arc<dyn AiPort> = if cfg.is_ai_configured() {
        info!(
            model = %cfg.ai_model_or_default(),
            url = %cfg.ai_api_url_or_default(),
            "AI extraction enabled with OpenAI adapter"
        );
        Arc::new(OpenAiAdapter::new(
            cfg.ai_api_url_or_default(),
            cfg.ai_api_key().unwrap_or_default(),
            cfg.ai_model_or_default(),
        ))
    } else {
        warn!("ISSUE_RELAY_AI_API_KEY not set, using mock AI adapter");
        Arc::new(MockAiAdapter::new())
    };

    // --- Tracker adapter ---
    let tracker: Arc<dyn TrackerPort> = Arc::new(LinearAdapter::new(
        cfg.linear_api_url_or_default(),
        linear_api_key,
    ));

    // --- Services ---
    let extraction = Arc::new(ExtractionService::new(ai));
    let assignment = Arc::new(AssignmentService::new(
        Arc::clone(&tracker),
        cfg.linear_team_id(),
    ));
    let creation = Arc::new(CreationService::new(
        Arc::clone(&tracker),
        PathBuf::from(cfg.reports_dir_or_default()),
    ));

    let input_port: Arc<dyn InputPort> =
        Arc::new(TuiInputPort::new(extraction, assignment, creation));

    // --- Run (assignment targets -> describe -> review -> create) ---
    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
