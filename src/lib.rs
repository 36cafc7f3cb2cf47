// SPDX-License-Identifier: MIT

//! Study-Hub: grade projection and shared study-session backend.
//!
//! This crate provides the data layer for a student planner: a weighted
//! grade projection engine, a namespaced grade/task store, and hub-scoped
//! shared schedules and live study sessions backed by Firestore (or an
//! in-memory double for tests and offline use).

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

pub use error::{Error, Result};
