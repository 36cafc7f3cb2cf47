// SPDX-License-Identifier: MIT

//! Grade record store: per-(identity, class) weight/assignment records over
//! the local keyed store.
//!
//! All operations are synchronous and last-write-wins; only the owning
//! device mutates these records.

use crate::db::{keys, LocalStore};
use crate::error::{Error, Result};
use crate::models::{Assignment, Category, ClassRecord, UserContext, Weights};
use std::collections::HashMap;
use std::sync::Arc;

/// Map of class name → record, as stored under one identity's key.
pub type GradeData = HashMap<String, ClassRecord>;

/// Store for per-class grade records.
pub struct Gradebook<L: LocalStore> {
    local: Arc<L>,
}

impl<L: LocalStore> Gradebook<L> {
    pub fn new(local: Arc<L>) -> Self {
        Self { local }
    }

    fn data(&self, ctx: &UserContext) -> GradeData {
        self.local.get_or_default(&keys::grades(ctx.namespace()))
    }

    fn save(&self, ctx: &UserContext, data: &GradeData) -> Result<()> {
        self.local.set_typed(&keys::grades(ctx.namespace()), data)
    }

    /// Record for a class. A class that has never been written yields the
    /// default-empty record; this never fails.
    pub fn load(&self, ctx: &UserContext, class_name: &str) -> ClassRecord {
        self.data(ctx).get(class_name).cloned().unwrap_or_default()
    }

    /// Class names with a stored record, sorted.
    pub fn class_names(&self, ctx: &UserContext) -> Vec<String> {
        let mut names: Vec<String> = self.data(ctx).into_keys().collect();
        names.sort();
        names
    }

    /// Save category weights. Rejected unless both are non-negative and sum
    /// to exactly 100; the whole record is overwritten atomically.
    pub fn save_weights(
        &self,
        ctx: &UserContext,
        class_name: &str,
        summative: f64,
        formative: f64,
    ) -> Result<()> {
        if summative < 0.0 || formative < 0.0 || summative + formative != 100.0 {
            return Err(Error::InvalidWeights);
        }

        let mut data = self.data(ctx);
        let record = data.entry(class_name.to_string()).or_default();
        record.weights = Weights {
            summative,
            formative,
        };
        self.save(ctx, &data)?;
        tracing::debug!(class = class_name, summative, formative, "Weights saved");
        Ok(())
    }

    /// Append an assignment. The name must be non-empty and the score within
    /// [0, 100]; validation failure blocks the write entirely.
    pub fn add_assignment(
        &self,
        ctx: &UserContext,
        class_name: &str,
        name: &str,
        category: Category,
        score: f64,
    ) -> Result<()> {
        if name.trim().is_empty() {
            return Err(Error::Validation("assignment name is required".into()));
        }
        if !(0.0..=100.0).contains(&score) {
            return Err(Error::InvalidScore);
        }

        let mut data = self.data(ctx);
        data.entry(class_name.to_string())
            .or_default()
            .assignments
            .push(Assignment {
                name: name.trim().to_string(),
                category,
                score,
            });
        self.save(ctx, &data)
    }

    /// Remove the assignment at a zero-based insertion-order position.
    /// Out-of-bounds positions are a no-op, not an error.
    pub fn delete_assignment(
        &self,
        ctx: &UserContext,
        class_name: &str,
        position: usize,
    ) -> Result<()> {
        let mut data = self.data(ctx);
        let Some(record) = data.get_mut(class_name) else {
            return Ok(());
        };
        if position >= record.assignments.len() {
            return Ok(());
        }
        record.assignments.remove(position);
        self.save(ctx, &data)
    }

    /// Empty the assignment list; weights are untouched.
    pub fn clear_assignments(&self, ctx: &UserContext, class_name: &str) -> Result<()> {
        let mut data = self.data(ctx);
        data.entry(class_name.to_string())
            .or_default()
            .assignments
            .clear();
        self.save(ctx, &data)
    }
}
