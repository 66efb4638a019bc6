//! Placement desk
//!
//! Record keeping for a training institute's placement office: company
//! leads, scheduled interviews with their student outcomes, and the
//! trainer roster. Modules are public so integration tests can drive them.

pub mod entities;
pub mod errors;
pub mod flash;
pub mod forms;
pub mod pagination;
pub mod settings;
pub mod storage;
pub mod uploads;
pub mod web;
