// SPDX-License-Identifier: MIT

//! Task list, completion streak, and study-minutes log over local storage.

use crate::db::{keys, LocalStore};
use crate::error::{Error, Result};
use crate::models::{StreakRecord, StudyLog, Task};
use crate::models::UserContext;
use chrono::NaiveDate;
use std::sync::Arc;

/// Task progress summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskProgress {
    pub done: usize,
    pub total: usize,
    /// Whole-number percentage; 0 when there are no tasks.
    pub percent: u32,
}

/// Local planner: tasks, streak, study log.
pub struct Planner<L: LocalStore> {
    local: Arc<L>,
}

impl<L: LocalStore> Planner<L> {
    pub fn new(local: Arc<L>) -> Self {
        Self { local }
    }

    fn today() -> NaiveDate {
        chrono::Utc::now().date_naive()
    }

    // ─── Tasks ───────────────────────────────────────────────────

    pub fn tasks(&self, ctx: &UserContext) -> Vec<Task> {
        self.local.get_or_default(&keys::tasks(ctx.namespace()))
    }

    fn save_tasks(&self, ctx: &UserContext, tasks: &Vec<Task>) -> Result<()> {
        self.local.set_typed(&keys::tasks(ctx.namespace()), tasks)
    }

    pub fn add_task(
        &self,
        ctx: &UserContext,
        text: &str,
        class_name: &str,
        due: &str,
    ) -> Result<()> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::Validation("type a task first".into()));
        }

        let mut tasks = self.tasks(ctx);
        tasks.push(Task {
            text: text.to_string(),
            class_name: class_name.to_string(),
            due: due.to_string(),
            done: false,
            done_date: String::new(),
            created: chrono::Utc::now().to_rfc3339(),
        });
        self.save_tasks(ctx, &tasks)
    }

    /// Flip a task's done state. Completing stamps the done date and bumps
    /// the streak; un-completing clears the date. Out-of-bounds positions
    /// are a no-op.
    pub fn toggle_task(&self, ctx: &UserContext, position: usize) -> Result<()> {
        let mut tasks = self.tasks(ctx);
        let Some(task) = tasks.get_mut(position) else {
            return Ok(());
        };

        let today = Self::today();
        task.done = !task.done;
        if task.done {
            task.done_date = today.format("%Y-%m-%d").to_string();
        } else {
            task.done_date.clear();
        }
        let completed = task.done;
        self.save_tasks(ctx, &tasks)?;

        if completed {
            let mut streak = self.streak(ctx);
            if streak.bump(today) {
                self.local
                    .set_typed(&keys::streak(ctx.namespace()), &streak)?;
            }
        }
        Ok(())
    }

    /// Remove a task by position; out-of-bounds is a no-op.
    pub fn delete_task(&self, ctx: &UserContext, position: usize) -> Result<()> {
        let mut tasks = self.tasks(ctx);
        if position >= tasks.len() {
            return Ok(());
        }
        tasks.remove(position);
        self.save_tasks(ctx, &tasks)
    }

    pub fn clear_tasks(&self, ctx: &UserContext) -> Result<()> {
        self.save_tasks(ctx, &Vec::new())
    }

    pub fn progress(&self, ctx: &UserContext) -> TaskProgress {
        let tasks = self.tasks(ctx);
        let done = tasks.iter().filter(|t| t.done).count();
        let total = tasks.len();
        let percent = if total == 0 {
            0
        } else {
            ((done as f64 / total as f64) * 100.0).round() as u32
        };
        TaskProgress {
            done,
            total,
            percent,
        }
    }

    // ─── Streak ──────────────────────────────────────────────────

    pub fn streak(&self, ctx: &UserContext) -> StreakRecord {
        self.local.get_or_default(&keys::streak(ctx.namespace()))
    }

    // ─── Study log ───────────────────────────────────────────────

    pub fn study_log(&self, ctx: &UserContext) -> StudyLog {
        self.local.get_or_default(&keys::study(ctx.namespace()))
    }

    /// Add minutes to today's bucket. Zero minutes is rejected.
    pub fn add_study_minutes(&self, ctx: &UserContext, minutes: u32) -> Result<()> {
        if minutes == 0 {
            return Err(Error::Validation("minutes must be positive".into()));
        }
        let mut log = self.study_log(ctx);
        log.add(&Self::today().format("%Y-%m-%d").to_string(), minutes);
        self.local.set_typed(&keys::study(ctx.namespace()), &log)
    }

    pub fn clear_study_log(&self, ctx: &UserContext) -> Result<()> {
        self.local
            .set_typed(&keys::study(ctx.namespace()), &StudyLog::default())
    }

    /// Study minutes for the last `n` days ending today, oldest first.
    pub fn study_last_days(&self, ctx: &UserContext, n: usize) -> Vec<(String, u32)> {
        self.study_log(ctx).last_days(Self::today(), n)
    }
}
