//! Label patterns for company profile and past performance extraction.
//!
//! Every pattern is anchored to the start of a line, case-insensitive, and
//! tolerates leading indentation, a list bullet (`-`, `*`, `•`) and spaces
//! around the colon. Capture group 1 is the rest of the line.

use lazy_static::lazy_static;
use regex::Regex;

/// Label alternations. Kept separate so [`ANY_LABEL`] stays in sync.
const COMPANY: &str = r"company(?:[ \t]+name)?";
const UEI: &str = r"uei";
const DUNS: &str = r"duns(?:[ \t]+(?:number|no\.?))?";
const NAICS: &str = r"naics(?:[ \t]+codes?)?";
const POC: &str = r"poc|point[ \t]+of[ \t]+contact";
const ADDRESS: &str = r"address";
const SAM: &str = r"sam(?:\.gov)?(?:[ \t]+(?:status|registration))?";

const CUSTOMER: &str = r"customer";
const CONTRACT: &str = r"contract(?:[ \t]+(?:number|no\.?|#))?";
const VALUE: &str = r"(?:contract[ \t]+)?value";
const PERIOD: &str = r"period(?:[ \t]+of[ \t]+performance)?";
const CONTACT: &str = r"contact|reference";

fn label_line(label: &str) -> Regex {
    Regex::new(&format!(
        r"(?im)^[ \t]*(?:[-*•][ \t]*)?(?:{})[ \t]*:[ \t]*(.*)$",
        label
    ))
    .unwrap()
}

lazy_static! {
    // Company profile labels
    pub static ref COMPANY_LINE: Regex = label_line(COMPANY);
    pub static ref UEI_LINE: Regex = label_line(UEI);
    pub static ref DUNS_LINE: Regex = label_line(DUNS);
    pub static ref NAICS_LINE: Regex = label_line(NAICS);
    pub static ref POC_LINE: Regex = label_line(POC);
    pub static ref ADDRESS_LINE: Regex = label_line(ADDRESS);
    pub static ref SAM_LINE: Regex = label_line(SAM);

    // Past performance labels
    pub static ref CUSTOMER_LINE: Regex = label_line(CUSTOMER);
    pub static ref CONTRACT_LINE: Regex = label_line(CONTRACT);
    pub static ref VALUE_LINE: Regex = label_line(VALUE);
    pub static ref PERIOD_LINE: Regex = label_line(PERIOD);
    pub static ref CONTACT_LINE: Regex = label_line(CONTACT);

    /// Matches a line that starts with any recognised label.
    pub static ref ANY_LABEL: Regex = Regex::new(&format!(
        r"(?i)^[ \t]*(?:[-*•][ \t]*)?(?:{})[ \t]*:",
        [
            COMPANY, UEI, DUNS, NAICS, POC, ADDRESS, SAM, CUSTOMER, CONTRACT, VALUE, PERIOD,
            CONTACT,
        ]
        .join("|")
    ))
    .unwrap();

    // Email shape: non-empty local part, dotted domain, no whitespace
    pub static ref EMAIL: Regex = Regex::new(
        r"^[^\s@]+@[^\s@.]+(?:\.[^\s@.]+)+$"
    ).unwrap();
}

/// First non-empty value captured by a label pattern.
pub fn labeled_value(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_tolerates_spacing_and_bullets() {
        assert_eq!(labeled_value(&UEI_LINE, "UEI: ABC123"), Some("ABC123".to_string()));
        assert_eq!(labeled_value(&UEI_LINE, "  uei :   ABC123  "), Some("ABC123".to_string()));
        assert_eq!(labeled_value(&UEI_LINE, "- UEI: ABC123"), Some("ABC123".to_string()));
        assert_eq!(labeled_value(&UEI_LINE, "• UEI:ABC123\r\n"), Some("ABC123".to_string()));
    }

    #[test]
    fn test_label_must_start_line() {
        assert_eq!(labeled_value(&UEI_LINE, "Our UEI: ABC123"), None);
        assert_eq!(labeled_value(&VALUE_LINE, "Total value was high"), None);
    }

    #[test]
    fn test_empty_value_falls_through_to_next_line() {
        let text = "UEI:\nUEI: XYZ789";
        assert_eq!(labeled_value(&UEI_LINE, text), Some("XYZ789".to_string()));
        assert_eq!(labeled_value(&UEI_LINE, "UEI:   "), None);
    }

    #[test]
    fn test_contract_labels_do_not_collide() {
        let text = "Contract value: $2M\nContract: GS-35F-0001\nContact: Jo";
        assert_eq!(labeled_value(&CONTRACT_LINE, text), Some("GS-35F-0001".to_string()));
        assert_eq!(labeled_value(&VALUE_LINE, text), Some("$2M".to_string()));
        assert_eq!(labeled_value(&CONTACT_LINE, text), Some("Jo".to_string()));
    }

    #[test]
    fn test_any_label() {
        assert!(ANY_LABEL.is_match("NAICS: 541511"));
        assert!(ANY_LABEL.is_match("SAM.gov: registered"));
        assert!(ANY_LABEL.is_match("Period of Performance: 2020-2022"));
        assert!(!ANY_LABEL.is_match("Acme Federal Solutions LLC"));
    }

    #[test]
    fn test_email_shape() {
        assert!(EMAIL.is_match("jane@acme.com"));
        assert!(EMAIL.is_match("jane.doe+gsa@mail.acme.co.uk"));
        assert!(!EMAIL.is_match("not-an-email"));
        assert!(!EMAIL.is_match("@acme.com"));
        assert!(!EMAIL.is_match("jane@acme"));
        assert!(!EMAIL.is_match("jane@.com"));
        assert!(!EMAIL.is_match("jane doe@acme.com"));
    }
}
