pub mod common;
pub mod config;
pub mod diff;
pub mod eth;
pub mod report;
pub mod view;
