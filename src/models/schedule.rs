// SPDX-License-Identifier: MIT

//! Schedule items, stored either locally (position-addressed) or in a shared
//! hub collection (id-addressed).

use serde::{Deserialize, Serialize};

/// One scheduled study session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItem {
    pub title: String,
    /// Calendar date, "YYYY-MM-DD".
    pub date: String,
    /// Wall-clock time, "HH:MM".
    pub time: String,
    #[serde(default)]
    pub notes: String,
    /// Validated http/https URL, or empty.
    #[serde(default)]
    pub video_url: String,
    /// RFC 3339 creation timestamp.
    #[serde(default)]
    pub created_at: String,
}

impl ScheduleItem {
    /// Sortable date-time key, "YYYY-MM-DDTHH:MM:00". Shared collections
    /// order by this ascending.
    pub fn date_time(&self) -> String {
        format!("{}T{}:00", self.date, self.time)
    }
}

/// User-entered fields for a new session, before validation.
#[derive(Debug, Clone, Default)]
pub struct SessionDraft {
    pub title: String,
    pub date: String,
    pub time: String,
    pub notes: String,
    pub video_url: String,
}

/// Address of a stored session: local array position or shared document id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionKey {
    Local(usize),
    Shared(String),
}

/// One session as delivered in a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionEntry {
    pub key: SessionKey,
    pub item: ScheduleItem,
}

/// Keep only http/https URLs; anything else becomes empty.
pub fn sanitize_video_url(raw: &str) -> String {
    let trimmed = raw.trim();
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        String::new()
    }
}
