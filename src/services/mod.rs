// SPDX-License-Identifier: MIT

pub mod gradebook;
pub mod grades;
pub mod hub;
pub mod live;
pub mod planner;
pub mod resources;
pub mod schedule;
pub mod selector;
pub mod subscriptions;

pub use gradebook::{GradeData, Gradebook};
pub use hub::HubService;
pub use live::LiveService;
pub use planner::{Planner, TaskProgress};
pub use resources::ResourceLibrary;
pub use schedule::ScheduleService;
pub use selector::DataSource;
pub use subscriptions::{Feed, LiveEntry, SubscriptionManager};
