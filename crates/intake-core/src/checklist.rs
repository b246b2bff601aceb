//! Compliance checklist evaluation.
//!
//! Required items are judged from the extracted fields alone; the issue list
//! only feeds the overall issue count.

use crate::models::document::{is_present, CompanyProfile, PastPerformance};
use crate::models::report::{Checklist, ChecklistItem, Issue, OverallItem, RequiredItems};
use crate::naics;

/// Build the checklist for one request.
pub fn build_checklist(
    profile: &CompanyProfile,
    performance: &PastPerformance,
    issues: &[Issue],
) -> Checklist {
    let required = RequiredItems {
        has_company_info: company_info(profile),
        has_valid_naics: valid_naics(profile),
        has_poc_info: poc_info(profile),
        has_sam_registration: sam_registration(profile),
        has_past_performance: past_performance(performance),
    };

    let overall = OverallItem {
        ok: required.all_ok(),
        total_issues: issues.len(),
    };

    Checklist { required, overall }
}

fn company_info(profile: &CompanyProfile) -> ChecklistItem {
    match profile.company_name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => ChecklistItem::pass(format!("Company name: {}", name)),
        _ => ChecklistItem::fail("Company name not found"),
    }
}

fn valid_naics(profile: &CompanyProfile) -> ChecklistItem {
    if profile.naics.is_empty() {
        return ChecklistItem::fail("No NAICS codes provided");
    }

    match profile.naics.iter().find(|code| !naics::is_mapped(code)) {
        Some(code) => ChecklistItem::fail(format!("NAICS code {} has no SIN mapping", code)),
        None => ChecklistItem::pass(format!(
            "All {} NAICS code(s) map to a SIN",
            profile.naics.len()
        )),
    }
}

fn poc_info(profile: &CompanyProfile) -> ChecklistItem {
    if profile.has_complete_poc() {
        return ChecklistItem::pass("POC name, email and phone present");
    }

    let missing: Vec<&str> = [
        ("name", &profile.poc_name),
        ("email", &profile.poc_email),
        ("phone", &profile.poc_phone),
    ]
    .into_iter()
    .filter(|(_, value)| !is_present(value))
    .map(|(label, _)| label)
    .collect();

    ChecklistItem::fail(format!("POC missing: {}", missing.join(", ")))
}

fn sam_registration(profile: &CompanyProfile) -> ChecklistItem {
    match profile.sam_registered {
        Some(true) => ChecklistItem::pass("SAM.gov registration confirmed"),
        Some(false) => ChecklistItem::fail("SAM.gov status is not registered"),
        None => ChecklistItem::fail("No SAM.gov status stated"),
    }
}

fn past_performance(performance: &PastPerformance) -> ChecklistItem {
    if performance.is_complete() {
        return ChecklistItem::pass("Customer, contract, value, period and contact present");
    }

    let present = performance.field_map();
    let missing: Vec<&str> = PastPerformance::FIELDS
        .iter()
        .copied()
        .filter(|field| !present.contains_key(field))
        .collect();

    ChecklistItem::fail(format!("Past performance missing: {}", missing.join(", ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn profile() -> CompanyProfile {
        CompanyProfile {
            company_name: Some("Acme".to_string()),
            uei: Some("ABC123".to_string()),
            duns: Some("123456789".to_string()),
            naics: vec!["541511".to_string(), "541512".to_string()],
            poc_name: Some("Jane".to_string()),
            poc_email: Some("jane@acme.com".to_string()),
            poc_phone: Some("555-0100".to_string()),
            address: Some("1 Main St".to_string()),
            sam_registered: Some(true),
        }
    }

    fn performance() -> PastPerformance {
        PastPerformance {
            customer: Some("GSA".to_string()),
            contract: Some("GS-1".to_string()),
            value: Some("$1M".to_string()),
            period: Some("2022-2024".to_string()),
            contact: Some("Ann Lee".to_string()),
        }
    }

    #[test]
    fn test_all_items_pass() {
        let checklist = build_checklist(&profile(), &performance(), &[]);
        assert!(checklist.required.all_ok());
        assert_eq!(checklist.overall, OverallItem { ok: true, total_issues: 0 });
    }

    #[test]
    fn test_overall_counts_issues_independently() {
        let issues = vec![Issue::missing("uei", "UEI is missing")];
        let checklist = build_checklist(&profile(), &performance(), &issues);
        assert!(checklist.overall.ok);
        assert_eq!(checklist.overall.total_issues, 1);
    }

    #[test]
    fn test_unmapped_naics_named_in_details() {
        let mut p = profile();
        p.naics = vec!["541511".to_string(), "999999".to_string(), "111111".to_string()];
        let checklist = build_checklist(&p, &performance(), &[]);

        assert!(!checklist.required.has_valid_naics.ok);
        assert!(checklist.required.has_valid_naics.details.contains("999999"));
        assert!(!checklist.overall.ok);
    }

    #[test]
    fn test_sam_registration_requires_true() {
        let mut p = profile();
        p.sam_registered = None;
        assert!(!build_checklist(&p, &performance(), &[]).required.has_sam_registration.ok);

        p.sam_registered = Some(false);
        assert!(!build_checklist(&p, &performance(), &[]).required.has_sam_registration.ok);
    }

    #[test]
    fn test_poc_details_list_missing_parts() {
        let mut p = profile();
        p.poc_email = None;
        p.poc_phone = Some(" ".to_string());
        let item = build_checklist(&p, &performance(), &[]).required.has_poc_info;
        assert_eq!(item, ChecklistItem::fail("POC missing: email, phone"));
    }

    #[test]
    fn test_past_performance_details_list_missing_fields() {
        let mut pp = performance();
        pp.value = None;
        pp.contact = None;
        let item = build_checklist(&profile(), &pp, &[]).required.has_past_performance;
        assert_eq!(item, ChecklistItem::fail("Past performance missing: value, contact"));
    }

    #[test]
    fn test_empty_inputs_fail_every_item() {
        let checklist =
            build_checklist(&CompanyProfile::default(), &PastPerformance::default(), &[]);
        assert!(checklist.required.items().iter().all(|(_, item)| !item.ok));
        assert!(!checklist.overall.ok);
    }
}
