//! Past performance extraction.

use tracing::debug;

use super::patterns::{
    labeled_value, CONTACT_LINE, CONTRACT_LINE, CUSTOMER_LINE, PERIOD_LINE, VALUE_LINE,
};
use super::DocumentExtractor;
use crate::models::document::{DocumentKind, PastPerformance};

/// Past performance field extractor.
#[derive(Debug, Default)]
pub struct PastPerformanceExtractor;

impl PastPerformanceExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentExtractor for PastPerformanceExtractor {
    type Output = PastPerformance;

    fn kind(&self) -> DocumentKind {
        DocumentKind::PastPerformance
    }

    fn extract(&self, text: &str) -> PastPerformance {
        let performance = PastPerformance {
            customer: labeled_value(&CUSTOMER_LINE, text),
            contract: labeled_value(&CONTRACT_LINE, text),
            value: labeled_value(&VALUE_LINE, text),
            period: labeled_value(&PERIOD_LINE, text),
            contact: labeled_value(&CONTACT_LINE, text),
        };

        debug!(
            "Extracted {} past performance fields from {} characters",
            performance.field_map().len(),
            text.len()
        );

        performance
    }
}
