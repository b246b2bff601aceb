//! Required-field validation.
//!
//! Each document kind has a fixed, ordered list of rules. Issues come out in
//! rule order so the same input always yields the same issue list.

use tracing::debug;

use crate::extract::patterns::EMAIL;
use crate::models::document::{is_present, CompanyProfile, ExtractedDocument, PastPerformance};
use crate::models::report::Issue;

/// Check applied to one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Check {
    /// Field must be present and non-empty.
    Required,
    /// Field must be present and look like an email address.
    Email,
}

struct Rule<T> {
    field: &'static str,
    label: &'static str,
    check: Check,
    value: fn(&T) -> FieldState,
}

enum FieldState {
    Absent,
    Present(String),
}

impl FieldState {
    fn text(value: &Option<String>) -> Self {
        match value {
            Some(v) if is_present(value) => Self::Present(v.trim().to_string()),
            _ => Self::Absent,
        }
    }
}

const COMPANY_RULES: &[Rule<CompanyProfile>] = &[
    Rule {
        field: "company_name",
        label: "Company name",
        check: Check::Required,
        value: |p| FieldState::text(&p.company_name),
    },
    Rule {
        field: "uei",
        label: "UEI",
        check: Check::Required,
        value: |p| FieldState::text(&p.uei),
    },
    Rule {
        field: "duns",
        label: "DUNS",
        check: Check::Required,
        value: |p| FieldState::text(&p.duns),
    },
    Rule {
        field: "naics",
        label: "NAICS codes",
        check: Check::Required,
        value: |p| {
            if p.naics.is_empty() {
                FieldState::Absent
            } else {
                FieldState::Present(p.naics.join(", "))
            }
        },
    },
    Rule {
        field: "poc_name",
        label: "POC name",
        check: Check::Required,
        value: |p| FieldState::text(&p.poc_name),
    },
    Rule {
        field: "poc_email",
        label: "POC email",
        check: Check::Email,
        value: |p| FieldState::text(&p.poc_email),
    },
    Rule {
        field: "poc_phone",
        label: "POC phone",
        check: Check::Required,
        value: |p| FieldState::text(&p.poc_phone),
    },
    Rule {
        field: "address",
        label: "Address",
        check: Check::Required,
        value: |p| FieldState::text(&p.address),
    },
    Rule {
        field: "sam_registered",
        label: "SAM.gov registration status",
        check: Check::Required,
        value: |p| match p.sam_registered {
            Some(registered) => FieldState::Present(registered.to_string()),
            None => FieldState::Absent,
        },
    },
];

const PAST_PERFORMANCE_RULES: &[Rule<PastPerformance>] = &[
    Rule {
        field: "customer",
        label: "Customer",
        check: Check::Required,
        value: |p| FieldState::text(&p.customer),
    },
    Rule {
        field: "contract",
        label: "Contract",
        check: Check::Required,
        value: |p| FieldState::text(&p.contract),
    },
    Rule {
        field: "value",
        label: "Contract value",
        check: Check::Required,
        value: |p| FieldState::text(&p.value),
    },
    Rule {
        field: "period",
        label: "Period of performance",
        check: Check::Required,
        value: |p| FieldState::text(&p.period),
    },
    Rule {
        field: "contact",
        label: "Customer contact",
        check: Check::Required,
        value: |p| FieldState::text(&p.contact),
    },
];

/// Validate an extracted document, returning issues in rule order.
pub fn validate(document: &ExtractedDocument) -> Vec<Issue> {
    let issues = match document {
        ExtractedDocument::CompanyProfile(profile) => validate_company_profile(profile),
        ExtractedDocument::PastPerformance(performance) => validate_past_performance(performance),
    };

    debug!("{} validation found {} issues", document.kind(), issues.len());
    issues
}

/// Validate company profile fields.
pub fn validate_company_profile(profile: &CompanyProfile) -> Vec<Issue> {
    apply_rules(COMPANY_RULES, profile)
}

/// Validate past performance fields.
pub fn validate_past_performance(performance: &PastPerformance) -> Vec<Issue> {
    apply_rules(PAST_PERFORMANCE_RULES, performance)
}

/// Check that `email` has a non-empty local part, a dotted domain and no
/// whitespace.
pub fn validate_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

fn apply_rules<T>(rules: &[Rule<T>], fields: &T) -> Vec<Issue> {
    rules
        .iter()
        .filter_map(|rule| match ((rule.value)(fields), rule.check) {
            (FieldState::Absent, _) => Some(Issue::missing(
                rule.field,
                format!("{} is missing", rule.label),
            )),
            (FieldState::Present(email), Check::Email) if !validate_email(&email) => {
                Some(Issue::invalid_format(
                    rule.field,
                    format!("{} '{}' is not a valid email address", rule.label, email),
                ))
            }
            (FieldState::Present(_), _) => None,
        })
        .collect()
}
