use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use thiserror::Error;

use super::parse::{decode_payload, error_message_from_text};
use super::snapshot::WalletSnapshot;

pub const DEFAULT_AGENT_URL: &str = "https://solana-wallet-tracker-agent.vercel.app";
const ANALYSIS_PATH: &str = "/api/tools/solana-address-analysis";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Solana address is required")]
    EmptyAddress,

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Agent service unavailable")]
    Unavailable(#[source] reqwest::Error),

    #[error("{message} (HTTP {status})")]
    Status { status: u16, message: String },

    #[error("{0}")]
    Upstream(String),

    #[error("malformed response from agent: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("agent response was not a JSON object")]
    UnexpectedShape,
}

/// Blocking client for the wallet analysis agent; meant to be driven from a
/// background thread.
pub struct AgentClient {
    base_url: String,
    http: Client,
}

impl AgentClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            http,
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}{ANALYSIS_PATH}", self.base_url)
    }

    pub fn analyze(&self, address: &str) -> Result<WalletSnapshot, FetchError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(FetchError::EmptyAddress);
        }

        tracing::info!(address, endpoint = %self.endpoint(), "requesting wallet analysis");

        let response = self
            .http
            .get(self.endpoint())
            .query(&[("address", address)])
            .header(ACCEPT, "application/json")
            .send()
            .map_err(|error| {
                tracing::error!(%error, "agent request failed");
                FetchError::Unavailable(error)
            })?;

        let status = response.status();
        let body = response.text().map_err(FetchError::Unavailable)?;

        if !status.is_success() {
            let message = error_message_from_text(&body);
            tracing::warn!(status = status.as_u16(), %message, "agent returned an error status");
            return Err(FetchError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let snapshot = decode_payload(&body)?;
        tracing::info!(
            address,
            valid = snapshot.is_valid,
            related = snapshot.related_accounts.len(),
            "wallet analysis received"
        );
        Ok(snapshot)
    }
}

/// Loads a snapshot (or envelope) saved from a previous agent response.
pub fn load_snapshot_file(path: &Path) -> Result<WalletSnapshot> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot file {}", path.display()))?;
    let snapshot = decode_payload(&raw)
        .with_context(|| format!("failed to decode snapshot file {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        related = snapshot.related_accounts.len(),
        "loaded wallet snapshot from disk"
    );
    Ok(snapshot)
}
