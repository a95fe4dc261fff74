//! Data models for the tournament lobby API.
//!
//! Everything here is a transient projection of server state: created when a
//! response is parsed, replaced wholesale on the next fetch, never mutated by
//! the client.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Tournament ID.
///
/// Kept as a string. Older lobby deployments issued numeric row ids while
/// the current backend issues short string ids, so deserialization accepts
/// both shapes; serialization always emits a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TournamentId(String);

impl TournamentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TournamentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TournamentId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Num(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Num(n) => Self(n.to_string()),
            RawId::Text(s) => Self(s),
        })
    }
}

/// Tournament status as reported by the server.
///
/// The status set is open-ended (`pending`, `ongoing`, `completed`,
/// `cancelled`, ...), so the raw string is kept and only interpreted where a
/// client decision depends on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TournamentStatus(String);

impl TournamentStatus {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the tournament is still accepting registrations. Only
    /// pending tournaments can be joined.
    pub fn is_pending(&self) -> bool {
        self.0.eq_ignore_ascii_case("pending")
    }
}

impl fmt::Display for TournamentStatus {
    /// Capitalizes the first letter only (`pending` -> `Pending`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => write!(f, "{}{}", first.to_uppercase(), chars.as_str()),
            None => Ok(()),
        }
    }
}

/// A registered participant, as snapshotted by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub user_id: i64,
    pub username: String,
}

/// One entry of the tournament list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TournamentSummary {
    pub id: TournamentId,
    pub name: String,
    pub game: Option<String>,
    pub status: TournamentStatus,
}

/// Full detail for a single tournament, including its roster.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TournamentDetail {
    pub id: TournamentId,
    pub name: String,
    pub game: Option<String>,
    pub status: TournamentStatus,
    #[serde(default)]
    pub creator_id: Option<i64>,
    #[serde(default)]
    pub players: Vec<Player>,
}

impl TournamentDetail {
    /// Whether `user_id` already appears in the roster.
    pub fn has_player(&self, user_id: i64) -> bool {
        self.players.iter().any(|p| p.user_id == user_id)
    }

    /// Whether `user_id` may join: the tournament must still be pending and
    /// the user must not already be registered.
    pub fn can_join(&self, user_id: i64) -> bool {
        self.status.is_pending() && !self.has_player(user_id)
    }
}

/// Body of a join response, successful or rejected.
///
/// Rejections carry the reason under `message`; backend validation errors
/// use `error` instead, so both keys are accepted.
#[derive(Debug, Clone, Deserialize)]
pub struct JoinReceipt {
    #[serde(default)]
    pub success: bool,
    #[serde(default, alias = "error")]
    pub message: String,
}
