// SPDX-License-Identifier: MIT

//! Study resource links.

use serde::{Deserialize, Serialize};

/// One study resource link, tagged with the class it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub class_name: String,
    pub title: String,
    pub url: String,
}

impl Resource {
    pub fn new(
        class_name: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            title: title.into(),
            url: url.into(),
        }
    }

    /// De-duplication key: two resources are the same link if URL and title
    /// both match.
    pub fn dedup_key(&self) -> String {
        format!("{}||{}", self.url, self.title)
    }
}
