// SPDX-License-Identifier: MIT

//! Live study sessions. These exist only within a shared hub; there is no
//! local-storage equivalent.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A live study session inside a hub.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveSession {
    pub active: bool,
    pub title: String,
    /// Identity of the user who started the session.
    pub host: String,
    /// RFC 3339 start timestamp.
    pub started_at: String,
    /// RFC 3339 end timestamp, set when the host ends the session.
    #[serde(default)]
    pub ended_at: Option<String>,
    #[serde(default)]
    pub video_url: String,
    /// Identity → display name for everyone who joined.
    #[serde(default)]
    pub participants: HashMap<String, String>,
}

impl LiveSession {
    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }
}
