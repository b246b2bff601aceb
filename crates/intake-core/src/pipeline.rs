//! Request orchestration: extract, validate, map, build the checklist, audit.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::audit::{AuditRecord, AuditSink, FileAuditSink, MultiAuditSink, Outcome, TracingAuditSink};
use crate::checklist::build_checklist;
use crate::extract::extract_with_config;
use crate::models::config::{ExtractionConfig, IntakeConfig};
use crate::models::document::DocumentKind;
use crate::models::report::{IngestRequest, IngestResponse, ParsedDocuments};
use crate::naics::map_codes;
use crate::validate::validate;

/// Runs the full intake pipeline for one request at a time.
///
/// The pipeline holds no per-request state and can be shared across
/// threads behind an `Arc`.
pub struct IntakePipeline {
    extraction: ExtractionConfig,
    sink: Arc<dyn AuditSink>,
}

impl IntakePipeline {
    /// Create a pipeline with default extraction settings.
    pub fn new(sink: Arc<dyn AuditSink>) -> Self {
        Self {
            extraction: ExtractionConfig::default(),
            sink,
        }
    }

    /// Build a pipeline from configuration. Audit records always go to the
    /// tracing output, and also to the audit file when enabled.
    pub fn from_config(config: &IntakeConfig) -> Self {
        let mut sinks: Vec<Arc<dyn AuditSink>> = vec![Arc::new(TracingAuditSink)];
        if config.audit.enabled {
            sinks.push(Arc::new(FileAuditSink::new(&config.audit.log_path)));
        }

        Self::new(Arc::new(MultiAuditSink::new(sinks)))
            .with_extraction_config(config.extraction.clone())
    }

    /// Set extraction settings.
    pub fn with_extraction_config(mut self, extraction: ExtractionConfig) -> Self {
        self.extraction = extraction;
        self
    }

    /// Process one request. Never fails: gaps in the documents show up as
    /// issues and failed checklist items.
    pub fn process(&self, request: &IngestRequest) -> IngestResponse {
        let start = Instant::now();
        let request_id = Uuid::new_v4().to_string();

        info!("Processing request {}", request_id);

        let profile_doc = extract_with_config(
            &request.company_profile,
            DocumentKind::CompanyProfile,
            &self.extraction,
        );
        let performance_doc = extract_with_config(
            &request.past_performance,
            DocumentKind::PastPerformance,
            &self.extraction,
        );

        // Company profile issues come first
        let mut issues = validate(&profile_doc);
        issues.extend(validate(&performance_doc));

        let company_profile = profile_doc.into_company_profile().unwrap_or_default();
        let past_performance = performance_doc.into_past_performance().unwrap_or_default();

        let recommended_sins = map_codes(&company_profile.naics);
        let checklist = build_checklist(&company_profile, &past_performance, &issues);

        let outcome = Outcome::from_ok(checklist.overall.ok);
        info!(
            "Request {} - {} issues, outcome {}",
            request_id,
            issues.len(),
            outcome
        );

        let record = AuditRecord::new(request_id.as_str(), issues.len(), outcome);
        if let Err(e) = self.sink.record(&record) {
            warn!("Request {} - failed to write audit record: {}", request_id, e);
        }

        debug!("Request {} processed in {:?}", request_id, start.elapsed());

        IngestResponse {
            request_id,
            parsed: ParsedDocuments {
                company_profile,
                past_performance,
            },
            issues,
            recommended_sins,
            checklist,
        }
    }
}
