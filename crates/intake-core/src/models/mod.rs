//! Data models for extracted documents, validation reports and configuration.

pub mod config;
pub mod document;
pub mod report;
