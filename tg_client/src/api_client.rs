//! HTTP API client for the tournament lobby server.

use serde::Serialize;
use thiserror::Error;
use tourneygram::{HostUser, JoinReceipt, TournamentDetail, TournamentId, TournamentSummary};

/// Errors from lobby API calls.
///
/// Nothing here is retried automatically; callers turn each failure into a
/// user-visible message and leave retrying to the user.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a usable HTTP response.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("could not decode server response: {0}")]
    Decode(#[source] reqwest::Error),
}

/// API client for communicating with the lobby server
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct JoinRequest {
    user_id: i64,
    username: String,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// List all tournaments, in server order.
    pub async fn list_tournaments(&self) -> Result<Vec<TournamentSummary>, ApiError> {
        let response = self
            .client
            .get(format!("{}/api/tournaments", self.base_url))
            .send()
            .await?;

        let response = check_status(response).await?;
        response.json().await.map_err(ApiError::Decode)
    }

    /// Fetch one tournament's detail, including its roster.
    pub async fn get_tournament(&self, id: &TournamentId) -> Result<TournamentDetail, ApiError> {
        let response = self
            .client
            .get(format!("{}/api/tournaments/{}", self.base_url, id))
            .send()
            .await?;

        let response = check_status(response).await?;
        response.json().await.map_err(ApiError::Decode)
    }

    /// Register `user` as a participant of tournament `id`.
    pub async fn join_tournament(
        &self,
        id: &TournamentId,
        user: &HostUser,
    ) -> Result<JoinReceipt, ApiError> {
        let request = JoinRequest {
            user_id: user.id,
            username: user.display_name(),
        };

        let response = self
            .client
            .post(format!("{}/api/tournaments/{}/join", self.base_url, id))
            .json(&request)
            .send()
            .await?;

        let response = check_status(response).await?;
        response.json().await.map_err(ApiError::Decode)
    }
}

/// Convert a non-success response into [`ApiError::Rejected`], pulling the
/// server-supplied message out of the body when there is one.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let raw = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<JoinReceipt>(&raw) {
        Ok(receipt) if !receipt.message.is_empty() => receipt.message,
        _ if !raw.is_empty() => raw,
        _ => format!("server returned {status}"),
    };

    log::error!("lobby request rejected ({status}): {message}");
    Err(ApiError::Rejected {
        status: status.as_u16(),
        message,
    })
}
