//! Rule-based field extraction for intake documents.
//!
//! Extraction never fails. Each field is matched independently against its
//! label pattern, and a field that cannot be found is simply left absent.

mod company;
mod performance;
pub mod patterns;

pub use company::{parse_sam_status, split_codes, split_poc, CompanyProfileExtractor};
pub use performance::PastPerformanceExtractor;

use crate::models::config::ExtractionConfig;
use crate::models::document::{DocumentKind, ExtractedDocument};

/// Trait for document field extractors.
pub trait DocumentExtractor {
    /// The structured fields this extractor produces.
    type Output;

    /// Kind of document this extractor understands.
    fn kind(&self) -> DocumentKind;

    /// Extract fields from raw text.
    fn extract(&self, text: &str) -> Self::Output;
}

/// Extract fields from `text` using default settings.
pub fn extract(text: &str, kind: DocumentKind) -> ExtractedDocument {
    extract_with_config(text, kind, &ExtractionConfig::default())
}

/// Extract fields from `text` with explicit extraction settings.
pub fn extract_with_config(
    text: &str,
    kind: DocumentKind,
    config: &ExtractionConfig,
) -> ExtractedDocument {
    match kind {
        DocumentKind::CompanyProfile => ExtractedDocument::CompanyProfile(
            CompanyProfileExtractor::new()
                .with_first_line_company_name(config.company_name_from_first_line)
                .extract(text),
        ),
        DocumentKind::PastPerformance => {
            ExtractedDocument::PastPerformance(PastPerformanceExtractor::new().extract(text))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_dispatches_on_kind() {
        let doc = extract("UEI: X", DocumentKind::CompanyProfile);
        assert_eq!(doc.kind(), DocumentKind::CompanyProfile);

        let doc = extract("Customer: GSA", DocumentKind::PastPerformance);
        assert_eq!(doc.kind(), DocumentKind::PastPerformance);

        assert_eq!(CompanyProfileExtractor::new().kind(), DocumentKind::CompanyProfile);
        assert_eq!(PastPerformanceExtractor::new().kind(), DocumentKind::PastPerformance);
    }

    #[test]
    fn test_extracted_keys_stay_in_schema() {
        let noisy = "Random: 1\nUEI: A\nCustomer: B\nFoo: bar\nNAICS: 541511";
        for kind in [DocumentKind::CompanyProfile, DocumentKind::PastPerformance] {
            let doc = extract(noisy, kind);
            assert!(doc.field_map().keys().all(|k| kind.fields().contains(k)));
        }
    }

    #[test]
    fn test_label_value_is_trimmed() {
        for value in ["X", "ABC123", "Q9-Z 77"] {
            let doc = extract(&format!("UEI:   {}   ", value), DocumentKind::CompanyProfile);
            match doc {
                ExtractedDocument::CompanyProfile(profile) => {
                    assert_eq!(profile.uei.as_deref(), Some(value))
                }
                other => panic!("unexpected document: {:?}", other),
            }
        }
    }
}
