//! Company profile extraction.

use tracing::debug;

use super::patterns::{
    labeled_value, ADDRESS_LINE, ANY_LABEL, COMPANY_LINE, DUNS_LINE, NAICS_LINE, POC_LINE,
    SAM_LINE, UEI_LINE,
};
use super::DocumentExtractor;
use crate::models::document::{CompanyProfile, DocumentKind};

/// Words that turn a SAM status line into a negative.
const NEGATIONS: &[&str] = &["not", "no", "non", "never"];

/// Company profile field extractor.
pub struct CompanyProfileExtractor {
    company_name_from_first_line: bool,
}

impl CompanyProfileExtractor {
    /// Create a new company profile extractor.
    pub fn new() -> Self {
        Self {
            company_name_from_first_line: true,
        }
    }

    /// Set whether an unlabeled first line names the company.
    pub fn with_first_line_company_name(mut self, enabled: bool) -> Self {
        self.company_name_from_first_line = enabled;
        self
    }

    fn extract_company_name(&self, text: &str) -> Option<String> {
        if let Some(name) = labeled_value(&COMPANY_LINE, text) {
            return Some(name);
        }

        if !self.company_name_from_first_line {
            return None;
        }

        // A first line that is itself a label line is not a name
        text.lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .filter(|line| !ANY_LABEL.is_match(line))
            .map(str::to_string)
    }
}

impl Default for CompanyProfileExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentExtractor for CompanyProfileExtractor {
    type Output = CompanyProfile;

    fn kind(&self) -> DocumentKind {
        DocumentKind::CompanyProfile
    }

    fn extract(&self, text: &str) -> CompanyProfile {
        let (poc_name, poc_email, poc_phone) = labeled_value(&POC_LINE, text)
            .map(|line| split_poc(&line))
            .unwrap_or_default();

        let profile = CompanyProfile {
            company_name: self.extract_company_name(text),
            uei: labeled_value(&UEI_LINE, text),
            duns: labeled_value(&DUNS_LINE, text),
            naics: labeled_value(&NAICS_LINE, text)
                .map(|line| split_codes(&line))
                .unwrap_or_default(),
            poc_name,
            poc_email,
            poc_phone,
            address: labeled_value(&ADDRESS_LINE, text),
            sam_registered: labeled_value(&SAM_LINE, text).map(|status| parse_sam_status(&status)),
        };

        debug!(
            "Extracted {} company profile fields from {} characters",
            profile.field_map().len(),
            text.len()
        );

        profile
    }
}

/// Split a NAICS value on commas, keeping source order.
pub fn split_codes(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split a `Name, email, phone` value positionally. Anything after the
/// second comma belongs to the phone.
pub fn split_poc(value: &str) -> (Option<String>, Option<String>, Option<String>) {
    let mut parts = value.splitn(3, ',').map(|part| {
        let part = part.trim();
        (!part.is_empty()).then(|| part.to_string())
    });

    (
        parts.next().flatten(),
        parts.next().flatten(),
        parts.next().flatten(),
    )
}

/// Interpret a SAM.gov status. Registered only when the status says
/// "registered" without a negation; anything else is unregistered.
pub fn parse_sam_status(status: &str) -> bool {
    let words: Vec<String> = status
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect();

    words.iter().any(|w| w == "registered")
        && !words.iter().any(|w| NEGATIONS.contains(&w.as_str()))
}
