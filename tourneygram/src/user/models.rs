//! The identity handed to the mini-app by its host platform at launch.

use serde::Deserialize;

/// Read-only user identity, set once at startup.
///
/// Matches the JSON shape the host platform exposes (`id`, `username`,
/// `first_name`, `last_name`); only `id` is guaranteed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HostUser {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl HostUser {
    /// The name sent with a join request: the handle when one exists,
    /// otherwise `"first last"` trimmed.
    pub fn display_name(&self) -> String {
        match self.username.as_deref() {
            Some(handle) if !handle.is_empty() => handle.to_string(),
            _ => {
                let last = self.last_name.as_deref().unwrap_or("");
                format!("{} {last}", self.first_name).trim().to_string()
            }
        }
    }
}
