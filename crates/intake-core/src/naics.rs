//! NAICS to SIN (Special Item Number) recommendations.
//!
//! The lookup table is fixed for the lifetime of the process. Codes without
//! an entry simply produce no recommendation.

use std::collections::HashMap;

use lazy_static::lazy_static;
use serde::Serialize;

/// NAICS code to SIN, in table order.
pub const NAICS_SIN_TABLE: &[(&str, &str)] = &[
    ("541511", "54151S"),
    ("541512", "54151S"),
    ("541611", "541611"),
    ("518210", "518210C"),
];

lazy_static! {
    static ref NAICS_TO_SIN: HashMap<&'static str, &'static str> =
        NAICS_SIN_TABLE.iter().copied().collect();
}

/// Look up the SIN for a single NAICS code.
pub fn lookup(naics: &str) -> Option<&'static str> {
    NAICS_TO_SIN.get(naics.trim()).copied()
}

/// True if the code has a SIN mapping.
pub fn is_mapped(naics: &str) -> bool {
    lookup(naics).is_some()
}

/// Map NAICS codes to recommended SINs.
///
/// Output follows input order with duplicate SINs removed, so two NAICS
/// codes sharing a SIN yield one entry. Unmapped codes are dropped.
pub fn map_codes<S: AsRef<str>>(codes: &[S]) -> Vec<String> {
    map_codes_detailed(codes).recommended
}

/// Result of mapping a list of NAICS codes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CodeMapping {
    /// Deduplicated SINs in first-seen order.
    pub recommended: Vec<String>,
    /// Input codes with no table entry, deduplicated, in input order.
    pub unmapped: Vec<String>,
}

/// Like [`map_codes`], but also reports which codes had no mapping.
pub fn map_codes_detailed<S: AsRef<str>>(codes: &[S]) -> CodeMapping {
    let mut mapping = CodeMapping::default();

    for code in codes.iter().map(|c| c.as_ref().trim()) {
        match lookup(code) {
            Some(sin) => {
                if !mapping.recommended.iter().any(|s| s == sin) {
                    mapping.recommended.push(sin.to_string());
                }
            }
            None => {
                if !mapping.unmapped.iter().any(|c| c == code) {
                    mapping.unmapped.push(code.to_string());
                }
            }
        }
    }

    mapping
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("541511"), Some("54151S"));
        assert_eq!(lookup(" 518210 "), Some("518210C"));
        assert_eq!(lookup("999999"), None);
    }

    #[test]
    fn test_shared_sin_is_deduplicated() {
        assert_eq!(map_codes(&["541511", "541512"]), vec!["54151S"]);
    }

    #[test]
    fn test_unlisted_code_is_dropped() {
        assert!(map_codes(&["999999"]).is_empty());
        assert!(map_codes::<&str>(&[]).is_empty());
    }

    #[test]
    fn test_order_follows_input() {
        assert_eq!(
            map_codes(&["518210", "999999", "541611", "541512", "541511"]),
            vec!["518210C", "541611", "54151S"]
        );
    }

    #[test]
    fn test_mapping_is_idempotent() {
        let codes = ["541512", "541611", "541511"];
        assert_eq!(map_codes(&codes), map_codes(&codes));
    }

    #[test]
    fn test_detailed_reports_unmapped() {
        let mapping = map_codes_detailed(&["541511", "123456", "123456", "541611"]);
        assert_eq!(
            mapping,
            CodeMapping {
                recommended: vec!["54151S".to_string(), "541611".to_string()],
                unmapped: vec!["123456".to_string()],
            }
        );
    }
}
