// SPDX-License-Identifier: MIT

//! Study resource catalog: built-in defaults merged with per-identity saved
//! links.

use crate::db::{keys, LocalStore};
use crate::error::{Error, Result};
use crate::models::{Resource, UserContext};
use crate::models::schedule::sanitize_video_url;
use std::collections::HashSet;
use std::sync::Arc;

/// Built-in resource links shown to everyone.
pub fn default_catalog() -> Vec<Resource> {
    vec![
        Resource::new(
            "Calc AB",
            "AP Calc AB (College Board)",
            "https://apstudents.collegeboard.org/courses/ap-calculus-ab",
        ),
        Resource::new(
            "Calc AB",
            "Calc AB (Khan Academy)",
            "https://www.khanacademy.org/math/ap-calculus-ab",
        ),
        Resource::new(
            "Calc BC",
            "AP Calc BC (College Board)",
            "https://apstudents.collegeboard.org/courses/ap-calculus-bc",
        ),
        Resource::new(
            "Physics 1",
            "AP Physics 1 (College Board)",
            "https://apstudents.collegeboard.org/courses/ap-physics-1",
        ),
        Resource::new(
            "Chem",
            "AP Chemistry (College Board)",
            "https://apstudents.collegeboard.org/courses/ap-chemistry",
        ),
        Resource::new(
            "Bio",
            "AP Biology (Khan Academy)",
            "https://www.khanacademy.org/science/ap-biology",
        ),
        Resource::new(
            "APUSH",
            "AP U.S. History (College Board)",
            "https://apstudents.collegeboard.org/courses/ap-united-states-history",
        ),
        Resource::new(
            "Lang",
            "AP English Language (College Board)",
            "https://apstudents.collegeboard.org/courses/ap-english-language-and-composition",
        ),
        Resource::new(
            "Lit",
            "AP English Literature (College Board)",
            "https://apstudents.collegeboard.org/courses/ap-english-literature-and-composition",
        ),
        Resource::new(
            "Seminar",
            "AP Seminar (College Board)",
            "https://apstudents.collegeboard.org/courses/ap-seminar",
        ),
    ]
}

/// Merge saved links with the defaults: saved entries first, duplicates
/// (same URL and title) dropped.
pub fn merge_resources(saved: Vec<Resource>, defaults: Vec<Resource>) -> Vec<Resource> {
    let mut out = Vec::with_capacity(saved.len() + defaults.len());
    let mut seen = HashSet::new();
    for r in saved.into_iter().chain(defaults) {
        if seen.insert(r.dedup_key()) {
            out.push(r);
        }
    }
    out
}

/// Per-identity resource library.
pub struct ResourceLibrary<L: LocalStore> {
    local: Arc<L>,
}

impl<L: LocalStore> ResourceLibrary<L> {
    pub fn new(local: Arc<L>) -> Self {
        Self { local }
    }

    fn saved(&self, ctx: &UserContext) -> Vec<Resource> {
        self.local
            .get_or_default(&keys::resources(ctx.namespace()))
    }

    /// Save a new link for this identity. Only http/https URLs are accepted.
    pub fn add_resource(&self, ctx: &UserContext, resource: Resource) -> Result<()> {
        if resource.title.trim().is_empty() {
            return Err(Error::Validation("resource title is required".into()));
        }
        if sanitize_video_url(&resource.url).is_empty() {
            return Err(Error::Validation("resource URL must be http or https".into()));
        }

        let mut saved = self.saved(ctx);
        saved.push(resource);
        self.local
            .set_typed(&keys::resources(ctx.namespace()), &saved)
    }

    /// All resources visible to this identity: saved first, then defaults,
    /// de-duplicated.
    pub fn all(&self, ctx: &UserContext) -> Vec<Resource> {
        merge_resources(self.saved(ctx), default_catalog())
    }

    /// Filter by class (exact, `None` = all) and a case-insensitive text
    /// query over title and class name.
    pub fn search(&self, ctx: &UserContext, class_name: Option<&str>, query: &str) -> Vec<Resource> {
        let q = query.trim().to_lowercase();
        self.all(ctx)
            .into_iter()
            .filter(|r| {
                let class_ok = class_name.map(|c| r.class_name == c).unwrap_or(true);
                let text_ok = q.is_empty()
                    || r.title.to_lowercase().contains(&q)
                    || r.class_name.to_lowercase().contains(&q);
                class_ok && text_ok
            })
            .collect()
    }
}
