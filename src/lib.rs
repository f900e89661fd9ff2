pub mod config;
pub mod crawler;
pub mod error;
pub mod report;
