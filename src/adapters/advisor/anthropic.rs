//! Anthropic advisor - governance insight from Anthropic's Messages API.
//!
//! Builds prompts from the ledger's current proposals and asks the model for
//! an analysis of one proposal or recommendations across all of them.
//!
//! # Configuration
//!
//! ```ignore
//! let config = AnthropicAdvisorConfig::new(api_key)
//!     .with_model("claude-sonnet-4-20250514")
//!     .with_timeout(Duration::from_secs(60));
//!
//! let advisor = AnthropicAdvisor::new(config, ledger)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::domain::foundation::ProposalId;
use crate::domain::governance::Proposal;
use crate::ports::{AdvisorError, GovernanceAdvisor, GovernanceLedger};

/// Anthropic API version header value.
const ANTHROPIC_API_VERSION: &str = "2023-06-01";

/// Retry window assumed when a 429 carries no usable `retry-after` header.
const DEFAULT_RETRY_AFTER_SECS: u32 = 60;

const SYSTEM_PROMPT: &str = "You are a governance advisor for a decentralized autonomous \
organization. Give concise, balanced decision support in Markdown. Use bold section \
headings and short bullet points. Do not invent facts that are not in the proposals.";

/// Configuration for the Anthropic advisor.
#[derive(Debug, Clone)]
pub struct AnthropicAdvisorConfig {
    api_key: Secret<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub max_tokens: u32,
}

impl AnthropicAdvisorConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "claude-sonnet-4-20250514".to_string(),
            base_url: "https://api.anthropic.com".to_string(),
            timeout: Duration::from_secs(60),
            max_tokens: 1024,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Advisor backed by an Anthropic model.
pub struct AnthropicAdvisor {
    config: AnthropicAdvisorConfig,
    client: Client,
    ledger: Arc<dyn GovernanceLedger>,
}

impl AnthropicAdvisor {
    /// Creates an advisor reading proposal context from `ledger`.
    ///
    /// # Errors
    ///
    /// `Network` if the HTTP client cannot be constructed.
    pub fn new(
        config: AnthropicAdvisorConfig,
        ledger: Arc<dyn GovernanceLedger>,
    ) -> Result<Self, AdvisorError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AdvisorError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            client,
            ledger,
        })
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.config.base_url)
    }

    async fn current_proposals(&self) -> Result<Vec<Proposal>, AdvisorError> {
        self.ledger
            .fetch_proposals()
            .await
            .map_err(|e| AdvisorError::unavailable(format!("proposal context unavailable: {}", e)))
    }

    async fn complete(&self, prompt: String) -> Result<String, AdvisorError> {
        let request = MessagesRequest {
            model: &self.config.model,
            system: SYSTEM_PROMPT,
            max_tokens: self.config.max_tokens,
            messages: vec![RequestMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(self.messages_url())
            .header("x-api-key", self.config.api_key())
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AdvisorError::Timeout {
                        timeout_secs: u32::try_from(self.config.timeout.as_secs()).unwrap_or(u32::MAX),
                    }
                } else if e.is_connect() {
                    AdvisorError::network(format!("Connection failed: {}", e))
                } else {
                    AdvisorError::network(e.to_string())
                }
            })?;

        let response = check_status(response).await?;
        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| AdvisorError::parse(format!("Failed to parse response: {}", e)))?;

        tracing::debug!(
            model = %parsed.model,
            input_tokens = parsed.usage.input_tokens,
            output_tokens = parsed.usage.output_tokens,
            "Advisor completion received"
        );
        parsed.into_text()
    }
}

#[async_trait]
impl GovernanceAdvisor for AnthropicAdvisor {
    async fn request_analysis(&self, proposal_id: ProposalId) -> Result<String, AdvisorError> {
        let proposals = self.current_proposals().await?;
        let proposal = proposals
            .iter()
            .find(|p| p.id() == proposal_id)
            .ok_or(AdvisorError::UnknownProposal(proposal_id))?;

        self.complete(analysis_prompt(proposal)).await
    }

    async fn request_recommendations(&self) -> Result<String, AdvisorError> {
        let proposals = self.current_proposals().await?;
        self.complete(recommendations_prompt(&proposals)).await
    }
}

async fn check_status(response: Response) -> Result<Response, AdvisorError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let retry_after = response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u32>().ok());
    let body = response.text().await.unwrap_or_default();
    Err(status_error(status, &body, retry_after))
}

/// Maps a non-success HTTP status to an advisor error.
fn status_error(status: StatusCode, body: &str, retry_after: Option<u32>) -> AdvisorError {
    match status.as_u16() {
        401 | 403 => AdvisorError::AuthenticationFailed,
        429 => AdvisorError::rate_limited(retry_after.unwrap_or(DEFAULT_RETRY_AFTER_SECS)),
        500..=599 => AdvisorError::unavailable(format!("Server error {}: {}", status, body)),
        _ => AdvisorError::network(format!("Unexpected status {}: {}", status, body)),
    }
}

fn describe(proposal: &Proposal) -> String {
    let tally = proposal.tally();
    let approval = proposal
        .approval()
        .map_or_else(|| "no votes yet".to_string(), |pct| format!("{} in favor", pct));
    format!(
        "Proposal {id} ({status}): {title}\nProposed by: {proposer}\nVotes: {for_} for, {against} against ({approval})\n{description}",
        id = proposal.id(),
        status = proposal.status(),
        title = proposal.title(),
        proposer = proposal.proposer(),
        for_ = tally.votes_for,
        against = tally.votes_against,
        description = proposal.description(),
    )
}

fn analysis_prompt(proposal: &Proposal) -> String {
    format!(
        "Analyze the following governance proposal. Start with the line \
         \"AI Analysis for Proposal {id}:\" and then give **Benefits:**, **Risks:** and \
         **Recommendations:** sections.\n\n{details}",
        id = proposal.id(),
        details = describe(proposal),
    )
}

fn recommendations_prompt(proposals: &[Proposal]) -> String {
    if proposals.is_empty() {
        return "There are currently no proposals. Suggest how the community could \
                increase participation, with **Priority Items:**, **Strategic Insights:** \
                and **Action Items:** sections."
            .to_string();
    }

    let listing = proposals.iter().map(describe).collect::<Vec<_>>().join("\n\n");
    format!(
        "Review all current governance proposals and give recommendations. Start with the \
         line \"Current Governance Recommendations:\" and then give **Priority Items:**, \
         **Strategic Insights:** and **Action Items:** sections.\n\n{listing}"
    )
}

// ----- Anthropic API Types -----

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    system: &'a str,
    max_tokens: u32,
    messages: Vec<RequestMessage>,
}

#[derive(Debug, Serialize)]
struct RequestMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    model: String,
    content: Vec<ContentBlock>,
    usage: Usage,
}

impl MessagesResponse {
    fn into_text(self) -> Result<String, AdvisorError> {
        let text = self
            .content
            .into_iter()
            .filter(|block| block.block_type == "text")
            .filter_map(|block| block.text)
            .collect::<Vec<_>>()
            .join("");

        if text.trim().is_empty() {
            return Err(AdvisorError::parse("response contained no text"));
        }
        Ok(text)
    }
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}
