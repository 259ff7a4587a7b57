//! `dao-governance` - loads the governance dashboard and prints it as JSON.

use std::error::Error;
use std::sync::Arc;

use secrecy::ExposeSecret;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use dao_governance::adapters::{
    AnthropicAdvisor, AnthropicAdvisorConfig, CannedAdvisor, HttpLedger, HttpLedgerConfig,
    InMemoryLedger,
};
use dao_governance::application::{DashboardView, WorkflowController};
use dao_governance::config::{
    AdvisorConfig, AdvisorProvider, AppConfig, LedgerBackend, LedgerConfig, LogFormat,
    LoggingConfig, ValidationError,
};
use dao_governance::domain::foundation::Timestamp;
use dao_governance::ports::{GovernanceAdvisor, GovernanceLedger};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config.logging)?;

    let ledger = build_ledger(&config.ledger)?;
    let advisor = build_advisor(&config.advisor, Arc::clone(&ledger))?;
    let voter = config.identity.voter_identity()?;

    tracing::info!(
        ledger = ?config.ledger.backend,
        advisor = ?config.advisor.provider,
        voter = %voter,
        "starting governance dashboard"
    );

    let controller = WorkflowController::new(ledger, advisor, voter);
    if let Err(err) = controller.start().await {
        // Whatever loaded is still shown; the failure rides along in the dashboard.
        tracing::error!(error = %err, "startup load incomplete");
    }

    let view = DashboardView::render(&controller.snapshot(), &Timestamp::now());
    println!("{}", serde_json::to_string_pretty(&view)?);

    Ok(())
}

fn init_tracing(config: &LoggingConfig) -> Result<(), ValidationError> {
    let registry = tracing_subscriber::registry().with(config.env_filter()?);

    match config.format {
        LogFormat::Json => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Compact => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}

fn build_ledger(config: &LedgerConfig) -> Result<Arc<dyn GovernanceLedger>, Box<dyn Error>> {
    match config.backend {
        LedgerBackend::Memory => Ok(Arc::new(InMemoryLedger::seeded(Timestamp::now()))),
        LedgerBackend::Http => {
            // validated above
            let base_url = config
                .base_url
                .clone()
                .ok_or(ValidationError::MissingRequired("LEDGER__BASE_URL"))?;
            let ledger =
                HttpLedger::new(HttpLedgerConfig::new(base_url).with_timeout(config.timeout()))?;
            Ok(Arc::new(ledger))
        }
    }
}

fn build_advisor(
    config: &AdvisorConfig,
    ledger: Arc<dyn GovernanceLedger>,
) -> Result<Arc<dyn GovernanceAdvisor>, Box<dyn Error>> {
    match config.provider {
        AdvisorProvider::Canned => Ok(Arc::new(
            CannedAdvisor::new().with_delay(config.canned_delay()),
        )),
        AdvisorProvider::Anthropic => {
            // validated above
            let api_key = config
                .anthropic_api_key
                .as_ref()
                .ok_or(ValidationError::MissingRequired("ADVISOR__ANTHROPIC_API_KEY"))?;
            let advisor_config = AnthropicAdvisorConfig::new(api_key.expose_secret().clone())
                .with_model(config.model.clone())
                .with_base_url(config.base_url.clone())
                .with_timeout(config.timeout())
                .with_max_tokens(config.max_tokens);
            Ok(Arc::new(AnthropicAdvisor::new(advisor_config, ledger)?))
        }
    }
}
