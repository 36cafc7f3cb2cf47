// SPDX-License-Identifier: MIT

//! Weighted grade engine: pure computation over a class record.

use crate::error::{Error, Result};
use crate::models::{Category, ClassRecord};

fn mean(scores: &[f64]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    Some(scores.iter().sum::<f64>() / scores.len() as f64)
}

/// Current weighted grade, or `None` when there is not enough data.
///
/// Weights are renormalized over populated categories: a category with no
/// assignments contributes nothing and its weight is excluded from the
/// denominator, so a class with only summative scores is graded on the
/// summative average alone rather than penalized.
pub fn current_grade(record: &ClassRecord) -> Option<f64> {
    let ws = record.weights.summative;
    let wf = record.weights.formative;
    if ws + wf == 0.0 {
        return None;
    }

    let summ_avg = mean(&record.scores(Category::Summative));
    let form_avg = mean(&record.scores(Category::Formative));

    let mut total = 0.0;
    let mut used = 0.0;
    if let Some(avg) = summ_avg {
        total += avg * ws;
        used += ws;
    }
    if let Some(avg) = form_avg {
        total += avg * wf;
        used += wf;
    }

    if used == 0.0 {
        return None;
    }
    Some(total / used)
}

/// Score needed on the next summative assignment to reach `target` overall.
///
/// The formative average is held fixed; when no formative scores exist it
/// contributes 0 to the projection (unlike [`current_grade`], which excludes
/// an empty category — this asymmetry is intentional and matches the product
/// behavior). The result is unbounded: values outside [0, 100] signal the
/// target is not reachable with a single assignment, and callers display
/// them literally.
pub fn required_next_score(record: &ClassRecord, target: f64) -> Result<f64> {
    let ws = record.weights.summative;
    let wf = record.weights.formative;
    if ws + wf != 100.0 {
        return Err(Error::WeightsNotFull);
    }

    let summ_scores = record.scores(Category::Summative);
    let form_avg = mean(&record.scores(Category::Formative));
    let n = summ_scores.len();

    if form_avg.is_none() && n == 0 {
        return Err(Error::NoBaseline);
    }
    if ws == 0.0 {
        return Err(Error::ZeroSummativeWeight);
    }

    let desired_summ_avg = (100.0 * target - wf * form_avg.unwrap_or(0.0)) / ws;

    if n == 0 {
        return Ok(desired_summ_avg);
    }
    let summ_avg = mean(&summ_scores).unwrap_or(0.0);
    Ok(desired_summ_avg * (n as f64 + 1.0) - summ_avg * n as f64)
}

/// Blend two period grades (quarters or semesters) into one.
pub fn blend_periods(grade_a: f64, grade_b: f64, weight_a: f64, weight_b: f64) -> Result<f64> {
    if weight_a + weight_b != 100.0 {
        return Err(Error::InvalidWeights);
    }
    if !(0.0..=100.0).contains(&grade_a) || !(0.0..=100.0).contains(&grade_b) {
        return Err(Error::OutOfRange);
    }
    Ok((grade_a * weight_a + grade_b * weight_b) / (weight_a + weight_b))
}
