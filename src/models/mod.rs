// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod class_record;
pub mod context;
pub mod live;
pub mod planner;
pub mod resource;
pub mod schedule;

pub use class_record::{Assignment, Category, ClassRecord, Weights};
pub use context::UserContext;
pub use live::LiveSession;
pub use planner::{StreakRecord, StudyLog, Task};
pub use resource::Resource;
pub use schedule::{ScheduleItem, SessionDraft, SessionEntry, SessionKey};
