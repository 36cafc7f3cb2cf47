// SPDX-License-Identifier: MIT

//! Per-class grade records: category weights plus an ordered assignment list.

use serde::{Deserialize, Serialize};

/// Grading category for an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Summative,
    Formative,
}

/// Category weights, intended to sum to 100.
///
/// The sum is only enforced when weights are explicitly saved; a record can
/// hold partial or zero weights in the meantime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    #[serde(default)]
    pub summative: f64,
    #[serde(default)]
    pub formative: f64,
}

/// One scored assignment. Scores are percentages in [0, 100].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub name: String,
    pub category: Category,
    pub score: f64,
}

/// Weight/assignment record for one (identity, class) pair.
///
/// A record conceptually exists for any class name once queried: absence in
/// storage is indistinguishable from this default-empty value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassRecord {
    #[serde(default)]
    pub weights: Weights,
    /// Insertion order preserved; order carries no ranking semantics.
    #[serde(default)]
    pub assignments: Vec<Assignment>,
}

impl ClassRecord {
    /// Scores for one category, in insertion order.
    pub fn scores(&self, category: Category) -> Vec<f64> {
        self.assignments
            .iter()
            .filter(|a| a.category == category)
            .map(|a| a.score)
            .collect()
    }
}
