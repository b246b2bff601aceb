//! Core library for company profile intake.
//!
//! This crate provides:
//! - Label-based field extraction from company profile and past performance text
//! - Required-field and email-format validation
//! - NAICS to SIN recommendations from a fixed lookup table
//! - A compliance checklist with an overall pass/fail summary
//! - A request pipeline that ties the above together and writes an audit trail

pub mod audit;
pub mod checklist;
pub mod error;
pub mod extract;
pub mod models;
pub mod naics;
pub mod pipeline;
pub mod source;
pub mod validate;

pub use audit::{AuditRecord, AuditSink, FileAuditSink, MemoryAuditSink, Outcome, TracingAuditSink};
pub use checklist::build_checklist;
pub use error::{IntakeError, Result, SourceError};
pub use extract::{extract, DocumentExtractor};
pub use models::config::IntakeConfig;
pub use models::document::{CompanyProfile, DocumentKind, ExtractedDocument, FieldValue, PastPerformance};
pub use models::report::{
    Checklist, ChecklistItem, IngestRequest, IngestResponse, Issue, IssueCode, OverallItem,
};
pub use naics::{map_codes, map_codes_detailed, CodeMapping};
pub use pipeline::IntakePipeline;
pub use validate::validate;
