#![allow(dead_code)]

pub mod app;
pub mod builders;
pub mod db;

pub use app::TestApp;
pub use builders::{CompanyBuilder, InterviewBuilder, TrainerBuilder};
pub use db::TestDb;
