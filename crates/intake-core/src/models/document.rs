//! Structured fields extracted from the two intake documents.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The kind of free-text document being processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Company profile: identifiers, NAICS codes, point of contact, SAM status.
    CompanyProfile,
    /// Past performance record for a single contract.
    PastPerformance,
}

impl DocumentKind {
    /// Canonical snake_case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CompanyProfile => "company_profile",
            Self::PastPerformance => "past_performance",
        }
    }

    /// Field names that may appear in an extraction of this kind.
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            Self::CompanyProfile => CompanyProfile::FIELDS,
            Self::PastPerformance => PastPerformance::FIELDS,
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "company_profile" | "company" | "profile" => Ok(Self::CompanyProfile),
            "past_performance" | "performance" | "pp" => Ok(Self::PastPerformance),
            other => Err(format!("unknown document kind: {}", other)),
        }
    }
}

/// A single extracted value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
    Flag(bool),
}

/// Flat mapping from field name to extracted value. Only present fields are
/// included, and every key comes from the document's fixed field list.
pub type FieldMap = BTreeMap<&'static str, FieldValue>;

/// Fields extracted from a company profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    /// Legal or trading name.
    pub company_name: Option<String>,

    /// SAM.gov Unique Entity Identifier.
    pub uei: Option<String>,

    /// Legacy DUNS number.
    pub duns: Option<String>,

    /// NAICS codes in source order.
    #[serde(default)]
    pub naics: Vec<String>,

    /// Point of contact name.
    pub poc_name: Option<String>,

    /// Point of contact email.
    pub poc_email: Option<String>,

    /// Point of contact phone.
    pub poc_phone: Option<String>,

    /// Mailing address, single line.
    pub address: Option<String>,

    /// SAM.gov registration status. `None` when the text states no status.
    pub sam_registered: Option<bool>,
}

impl CompanyProfile {
    pub const FIELDS: &'static [&'static str] = &[
        "company_name",
        "uei",
        "duns",
        "naics",
        "poc_name",
        "poc_email",
        "poc_phone",
        "address",
        "sam_registered",
    ];

    /// Flat view of the present fields.
    pub fn field_map(&self) -> FieldMap {
        let mut map = FieldMap::new();
        insert_text(&mut map, "company_name", &self.company_name);
        insert_text(&mut map, "uei", &self.uei);
        insert_text(&mut map, "duns", &self.duns);
        if !self.naics.is_empty() {
            map.insert("naics", FieldValue::List(self.naics.clone()));
        }
        insert_text(&mut map, "poc_name", &self.poc_name);
        insert_text(&mut map, "poc_email", &self.poc_email);
        insert_text(&mut map, "poc_phone", &self.poc_phone);
        insert_text(&mut map, "address", &self.address);
        if let Some(registered) = self.sam_registered {
            map.insert("sam_registered", FieldValue::Flag(registered));
        }
        map
    }

    /// True if all three point-of-contact fields are present.
    pub fn has_complete_poc(&self) -> bool {
        is_present(&self.poc_name) && is_present(&self.poc_email) && is_present(&self.poc_phone)
    }
}

/// Fields extracted from a past performance record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PastPerformance {
    /// Customer agency or organization.
    pub customer: Option<String>,

    /// Contract number or title.
    pub contract: Option<String>,

    /// Contract value, as written.
    pub value: Option<String>,

    /// Period of performance, as written.
    pub period: Option<String>,

    /// Customer reference contact.
    pub contact: Option<String>,
}

impl PastPerformance {
    pub const FIELDS: &'static [&'static str] =
        &["customer", "contract", "value", "period", "contact"];

    /// Flat view of the present fields.
    pub fn field_map(&self) -> FieldMap {
        let mut map = FieldMap::new();
        insert_text(&mut map, "customer", &self.customer);
        insert_text(&mut map, "contract", &self.contract);
        insert_text(&mut map, "value", &self.value);
        insert_text(&mut map, "period", &self.period);
        insert_text(&mut map, "contact", &self.contact);
        map
    }

    /// True if every field is present and non-empty.
    pub fn is_complete(&self) -> bool {
        [
            &self.customer,
            &self.contract,
            &self.value,
            &self.period,
            &self.contact,
        ]
        .into_iter()
        .all(is_present)
    }
}

/// Result of extracting one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "fields", rename_all = "snake_case")]
pub enum ExtractedDocument {
    CompanyProfile(CompanyProfile),
    PastPerformance(PastPerformance),
}

impl ExtractedDocument {
    pub fn kind(&self) -> DocumentKind {
        match self {
            Self::CompanyProfile(_) => DocumentKind::CompanyProfile,
            Self::PastPerformance(_) => DocumentKind::PastPerformance,
        }
    }

    pub fn field_map(&self) -> FieldMap {
        match self {
            Self::CompanyProfile(profile) => profile.field_map(),
            Self::PastPerformance(performance) => performance.field_map(),
        }
    }

    pub fn into_company_profile(self) -> Option<CompanyProfile> {
        match self {
            Self::CompanyProfile(profile) => Some(profile),
            Self::PastPerformance(_) => None,
        }
    }

    pub fn into_past_performance(self) -> Option<PastPerformance> {
        match self {
            Self::PastPerformance(performance) => Some(performance),
            Self::CompanyProfile(_) => None,
        }
    }
}

/// A text field counts as present when it holds something other than whitespace.
pub fn is_present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

fn insert_text(map: &mut FieldMap, key: &'static str, value: &Option<String>) {
    if let Some(v) = value.as_deref().filter(|v| !v.trim().is_empty()) {
        map.insert(key, FieldValue::Text(v.to_string()));
    }
}
