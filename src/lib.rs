pub mod config;
pub mod error;
pub mod event;
pub mod platform;
pub mod runner;
pub mod triage;
