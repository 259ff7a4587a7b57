//! HTTP governance ledger.
//!
//! JSON client for a ledger service exposing:
//!
//! | Method | Path                      | Body                       | Response                     |
//! |--------|---------------------------|----------------------------|------------------------------|
//! | GET    | `/proposals`              |                            | `[Proposal]`                 |
//! | GET    | `/stats`                  |                            | `VotingStats`                |
//! | POST   | `/proposals`              | `{title, description, proposer}` | `{id}`                 |
//! | POST   | `/proposals/{id}/votes`   | `{voter, inFavor}`         | `{accepted, reason?}`        |
//!
//! Field names are camelCase and timestamps are Unix milliseconds.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::foundation::{ProposalId, Timestamp, VoterIdentity};
use crate::domain::governance::{NewProposal, Proposal, ProposalStatus, VoteTally, VotingStats};
use crate::ports::{GovernanceLedger, LedgerError};

/// Configuration for the HTTP ledger.
#[derive(Debug, Clone)]
pub struct HttpLedgerConfig {
    /// Base URL without trailing slash (e.g. `https://ledger.example.org/api`).
    pub base_url: String,
    /// Per-request timeout enforced by the client.
    pub timeout: Duration,
}

impl HttpLedgerConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Ledger reached over HTTP.
pub struct HttpLedger {
    config: HttpLedgerConfig,
    client: Client,
}

impl HttpLedger {
    /// Creates a ledger client.
    ///
    /// # Errors
    ///
    /// `Network` if the HTTP client cannot be constructed.
    pub fn new(config: HttpLedgerConfig) -> Result<Self, LedgerError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LedgerError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    fn transport_error(&self, e: reqwest::Error) -> LedgerError {
        if e.is_timeout() {
            LedgerError::unavailable(format!(
                "request timed out after {}s",
                self.config.timeout.as_secs()
            ))
        } else if e.is_connect() {
            LedgerError::network(format!("Connection failed: {}", e))
        } else {
            LedgerError::network(e.to_string())
        }
    }

    async fn check_status(
        response: Response,
        proposal_id: Option<ProposalId>,
    ) -> Result<Response, LedgerError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(status_error(status, &body, proposal_id))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, LedgerError> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        let response = Self::check_status(response, None).await?;
        response
            .json()
            .await
            .map_err(|e| LedgerError::invalid_response(format!("Failed to parse {}: {}", path, e)))
    }
}

/// Maps a non-success HTTP status to a ledger error.
fn status_error(status: StatusCode, body: &str, proposal_id: Option<ProposalId>) -> LedgerError {
    match (status.as_u16(), proposal_id) {
        (404, Some(id)) => LedgerError::ProposalNotFound(id),
        (400 | 403 | 409 | 422, _) => LedgerError::rejected(non_empty(body, status)),
        (500..=599, _) => LedgerError::unavailable(format!("Server error {}: {}", status, body)),
        _ => LedgerError::network(format!("Unexpected status {}: {}", status, body)),
    }
}

fn non_empty(body: &str, status: StatusCode) -> String {
    if body.trim().is_empty() {
        status.to_string()
    } else {
        body.trim().to_string()
    }
}

#[async_trait]
impl GovernanceLedger for HttpLedger {
    async fn fetch_proposals(&self) -> Result<Vec<Proposal>, LedgerError> {
        let dtos: Vec<ProposalDto> = self.get_json("/proposals").await?;
        dtos.into_iter().map(ProposalDto::into_proposal).collect()
    }

    async fn fetch_stats(&self) -> Result<VotingStats, LedgerError> {
        let dto: StatsDto = self.get_json("/stats").await?;
        Ok(dto.into())
    }

    async fn submit_proposal(&self, proposal: &NewProposal) -> Result<ProposalId, LedgerError> {
        let response = self
            .client
            .post(self.url("/proposals"))
            .json(&CreateProposalRequest {
                title: &proposal.title,
                description: &proposal.description,
                proposer: &proposal.proposer,
            })
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        let response = Self::check_status(response, None).await?;

        let created: CreateProposalResponse = response
            .json()
            .await
            .map_err(|e| LedgerError::invalid_response(format!("Failed to parse created id: {}", e)))?;
        Ok(ProposalId::new(created.id))
    }

    async fn submit_vote(
        &self,
        proposal_id: ProposalId,
        voter: &VoterIdentity,
        in_favor: bool,
    ) -> Result<(), LedgerError> {
        let response = self
            .client
            .post(self.url(&format!("/proposals/{}/votes", proposal_id)))
            .json(&VoteRequest {
                voter: voter.as_str(),
                in_favor,
            })
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        let response = Self::check_status(response, Some(proposal_id)).await?;

        let ack: VoteResponse = response
            .json()
            .await
            .map_err(|e| LedgerError::invalid_response(format!("Failed to parse vote ack: {}", e)))?;
        ack.into_result()
    }
}

// ----- Wire Types -----

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProposalDto {
    id: u64,
    title: String,
    description: String,
    proposer: String,
    votes_for: u64,
    votes_against: u64,
    status: ProposalStatus,
    timestamp: i64,
}

impl ProposalDto {
    fn into_proposal(self) -> Result<Proposal, LedgerError> {
        let created_at = Timestamp::from_unix_millis(self.timestamp).ok_or_else(|| {
            LedgerError::invalid_response(format!(
                "proposal {} has out-of-range timestamp {}",
                self.id, self.timestamp
            ))
        })?;
        Proposal::new(
            ProposalId::new(self.id),
            self.title,
            self.description,
            self.proposer,
            VoteTally::new(self.votes_for, self.votes_against),
            self.status,
            created_at,
        )
        .map_err(|e| LedgerError::invalid_response(format!("proposal {}: {}", self.id, e)))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatsDto {
    total_proposals: u64,
    active_proposals: u64,
    total_votes: u64,
}

impl From<StatsDto> for VotingStats {
    fn from(dto: StatsDto) -> Self {
        VotingStats::new(dto.total_proposals, dto.active_proposals, dto.total_votes)
    }
}

#[derive(Debug, Serialize)]
struct CreateProposalRequest<'a> {
    title: &'a str,
    description: &'a str,
    proposer: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreateProposalResponse {
    id: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoteRequest<'a> {
    voter: &'a str,
    in_favor: bool,
}

#[derive(Debug, Deserialize)]
struct VoteResponse {
    accepted: bool,
    #[serde(default)]
    reason: Option<String>,
}

impl VoteResponse {
    fn into_result(self) -> Result<(), LedgerError> {
        if self.accepted {
            Ok(())
        } else {
            Err(LedgerError::rejected(
                self.reason.unwrap_or_else(|| "vote not accepted".to_string()),
            ))
        }
    }
}
