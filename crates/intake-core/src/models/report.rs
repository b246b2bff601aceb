//! Validation issues, the compliance checklist, and the request/response
//! envelope returned by the pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::document::{CompanyProfile, PastPerformance};

/// Kind of validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    /// Required field absent or empty.
    Missing,
    /// Field present but malformed.
    InvalidFormat,
}

impl IssueCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::InvalidFormat => "invalid_format",
        }
    }
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub field: String,
    pub code: IssueCode,
    pub message: String,
}

impl Issue {
    pub fn missing(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            code: IssueCode::Missing,
            message: message.into(),
        }
    }

    pub fn invalid_format(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            code: IssueCode::InvalidFormat,
            message: message.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.field, self.code.as_str(), self.message)
    }
}

/// Outcome of one checklist condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub ok: bool,
    /// Human-readable explanation for display; not meant to be parsed.
    pub details: String,
}

impl ChecklistItem {
    pub fn pass(details: impl Into<String>) -> Self {
        Self {
            ok: true,
            details: details.into(),
        }
    }

    pub fn fail(details: impl Into<String>) -> Self {
        Self {
            ok: false,
            details: details.into(),
        }
    }
}

/// The fixed set of required checklist conditions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredItems {
    pub has_company_info: ChecklistItem,
    pub has_valid_naics: ChecklistItem,
    pub has_poc_info: ChecklistItem,
    pub has_sam_registration: ChecklistItem,
    pub has_past_performance: ChecklistItem,
}

impl RequiredItems {
    pub const NAMES: [&'static str; 5] = [
        "has_company_info",
        "has_valid_naics",
        "has_poc_info",
        "has_sam_registration",
        "has_past_performance",
    ];

    /// Items paired with their names, in declaration order.
    pub fn items(&self) -> [(&'static str, &ChecklistItem); 5] {
        [
            (Self::NAMES[0], &self.has_company_info),
            (Self::NAMES[1], &self.has_valid_naics),
            (Self::NAMES[2], &self.has_poc_info),
            (Self::NAMES[3], &self.has_sam_registration),
            (Self::NAMES[4], &self.has_past_performance),
        ]
    }

    pub fn all_ok(&self) -> bool {
        self.items().iter().all(|(_, item)| item.ok)
    }
}

/// Summary across all required items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverallItem {
    /// AND of every required item.
    pub ok: bool,
    /// Validation issues across both documents.
    pub total_issues: usize,
}

/// Compliance checklist for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checklist {
    pub required: RequiredItems,
    pub overall: OverallItem,
}

/// Body of an ingest request. Both documents are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestRequest {
    pub company_profile: String,
    pub past_performance: String,
}

/// Extracted fields of both documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDocuments {
    pub company_profile: CompanyProfile,
    pub past_performance: PastPerformance,
}

/// Full result of processing one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestResponse {
    pub request_id: String,
    pub parsed: ParsedDocuments,
    pub issues: Vec<Issue>,
    pub recommended_sins: Vec<String>,
    pub checklist: Checklist,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_issue_code_serialization() {
        let issue = Issue::invalid_format("poc_email", "not an email");
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "field": "poc_email",
                "code": "invalid_format",
                "message": "not an email"
            })
        );
    }

    #[test]
    fn test_ingest_request_requires_both_documents() {
        let missing: Result<IngestRequest, _> =
            serde_json::from_str(r#"{"company_profile": "Acme"}"#);
        assert!(missing.is_err());

        let ok: IngestRequest =
            serde_json::from_str(r#"{"company_profile": "", "past_performance": ""}"#).unwrap();
        assert_eq!(ok.company_profile, "");
    }

    #[test]
    fn test_required_items_order() {
        let required = RequiredItems {
            has_company_info: ChecklistItem::pass("a"),
            has_valid_naics: ChecklistItem::pass("b"),
            has_poc_info: ChecklistItem::fail("c"),
            has_sam_registration: ChecklistItem::pass("d"),
            has_past_performance: ChecklistItem::pass("e"),
        };

        let names: Vec<_> = required.items().iter().map(|(name, _)| *name).collect();
        assert_eq!(names, RequiredItems::NAMES.to_vec());
        assert!(!required.all_ok());
    }
}
