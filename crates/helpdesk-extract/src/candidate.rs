//! Extraction candidate post-processing.
//!
//! Every candidate, AI-derived or fallback-derived, goes through
//! [`finalize_candidate`]: re-derive the K-Number, recompute `k_email`
//! against the institutional format, coerce the department, strip digits
//! from names, and fill defaults. Applying the pass twice yields the same
//! result.

use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

use helpdesk_core::{TicketFields, VALID_DEPARTMENTS};

/// Sentinel used when no K-Number could be derived.
pub const K_NUMBER_SENTINEL: &str = "00000000";

const DEFAULT_NAME: &str = "Email User";
const DEFAULT_SURNAME: &str = "Pending";
const DEFAULT_ISSUE: &str = "General Issue";

static SENDER_K_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"K(\d+)@kcl\.ac\.uk").unwrap());
static BODY_K_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"K(\d{8})").unwrap());
static K_EMAIL_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^K\d+@kcl\.ac\.uk").unwrap());
static DIGIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d").unwrap());

/// Raw field mapping as produced by an AI provider or the regex fallback.
/// Everything is optional; `finalize_candidate` fills the gaps.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCandidate {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub k_number: Option<String>,
    pub k_email: Option<String>,
    pub department: Option<String>,
    pub type_of_issue: Option<String>,
    pub additional_details: Option<String>,
}

impl From<TicketFields> for RawCandidate {
    fn from(fields: TicketFields) -> Self {
        RawCandidate {
            name: Some(fields.name),
            surname: Some(fields.surname),
            k_number: Some(fields.k_number),
            k_email: Some(fields.k_email),
            department: Some(fields.department),
            type_of_issue: Some(fields.type_of_issue),
            additional_details: Some(fields.additional_details),
        }
    }
}

/// Cross-check and normalize a candidate into a complete field set.
pub fn finalize_candidate(candidate: RawCandidate, sender_email: &str) -> TicketFields {
    let mut c = candidate;
    ensure_k_number(&mut c, sender_email);
    let k_email = resolve_k_email(&c, sender_email);
    let department = resolve_department(c.department.as_deref());
    let (name, surname) = clean_names(c.name.as_deref(), c.surname.as_deref());

    TicketFields {
        name,
        surname,
        k_number: c
            .k_number
            .unwrap_or_else(|| K_NUMBER_SENTINEL.to_string())
            .trim()
            .to_string(),
        k_email,
        department,
        type_of_issue: c
            .type_of_issue
            .unwrap_or_else(|| DEFAULT_ISSUE.to_string())
            .trim()
            .to_string(),
        additional_details: c
            .additional_details
            .unwrap_or_default()
            .trim()
            .to_string(),
    }
}

fn has_k_number(c: &RawCandidate) -> bool {
    c.k_number.as_deref().is_some_and(|k| !k.is_empty())
}

/// Re-derive the K-Number from the sender address, then the body, whenever it
/// is missing or still the sentinel.
fn ensure_k_number(c: &mut RawCandidate, sender_email: &str) {
    if !has_k_number(c) {
        if let Some(caps) = SENDER_K_RE.captures(sender_email) {
            c.k_number = Some(caps[1].to_string());
        }
    }
    if has_k_number(c) && c.k_number.as_deref() != Some(K_NUMBER_SENTINEL) {
        return;
    }
    let body = c.additional_details.as_deref().unwrap_or("");
    if let Some(caps) = BODY_K_RE.captures(body) {
        c.k_number = Some(caps[1].to_string());
    }
}

/// Keep a k_email that already has the institutional prefix; otherwise
/// recompute it from the K-Number, falling back to the sender address when
/// only the sentinel is available.
fn resolve_k_email(c: &RawCandidate, sender_email: &str) -> String {
    if let Some(email) = c.k_email.as_deref() {
        if !email.is_empty() && K_EMAIL_PREFIX_RE.is_match(email) {
            return email.to_string();
        }
    }
    match c.k_number.as_deref() {
        Some(k) if !k.is_empty() && k != K_NUMBER_SENTINEL => format!("K{}@kcl.ac.uk", k),
        _ => sender_email.to_string(),
    }
}

fn resolve_department(department: Option<&str>) -> String {
    match department {
        Some(d) if VALID_DEPARTMENTS.contains(&d) => d.to_string(),
        _ => "Informatics".to_string(),
    }
}

/// Strip digits from names and fall back to the email defaults when nothing
/// remains.
fn clean_names(name: Option<&str>, surname: Option<&str>) -> (String, String) {
    let name = DIGIT_RE
        .replace_all(name.unwrap_or(DEFAULT_NAME), "")
        .trim()
        .to_string();
    let surname = DIGIT_RE
        .replace_all(surname.unwrap_or(DEFAULT_SURNAME), "")
        .trim()
        .to_string();
    (
        if name.is_empty() {
            DEFAULT_NAME.to_string()
        } else {
            name
        },
        if surname.is_empty() {
            DEFAULT_SURNAME.to_string()
        } else {
            surname
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SENDER: &str = "K23163890@kcl.ac.uk";

    #[test]
    fn test_k_number_derived_from_sender_when_missing() {
        let fields = finalize_candidate(RawCandidate::default(), SENDER);
        assert_eq!(fields.k_number, "23163890");
        assert_eq!(fields.k_email, "K23163890@kcl.ac.uk");
    }

    #[test]
    fn test_sentinel_k_number_rederived_from_body() {
        let candidate = RawCandidate {
            k_number: Some(K_NUMBER_SENTINEL.to_string()),
            additional_details: Some("My K-Number: K11112222, thanks".to_string()),
            ..Default::default()
        };
        let fields = finalize_candidate(candidate, "someone@gmail.com");
        assert_eq!(fields.k_number, "11112222");
        assert_eq!(fields.k_email, "K11112222@kcl.ac.uk");
    }

    #[test]
    fn test_unresolvable_k_number_falls_back_to_sender_address() {
        let fields = finalize_candidate(RawCandidate::default(), "someone@gmail.com");
        assert_eq!(fields.k_number, K_NUMBER_SENTINEL);
        assert_eq!(fields.k_email, "someone@gmail.com");
    }

    #[test]
    fn test_invalid_department_coerced_to_informatics() {
        let candidate = RawCandidate {
            department: Some("Astrology".to_string()),
            ..Default::default()
        };
        let fields = finalize_candidate(candidate, SENDER);
        assert_eq!(fields.department, "Informatics");

        let candidate = RawCandidate {
            department: Some("Medicine".to_string()),
            ..Default::default()
        };
        let fields = finalize_candidate(candidate, SENDER);
        assert_eq!(fields.department, "Medicine");
    }

    #[test]
    fn test_digits_stripped_from_names_with_defaults() {
        let candidate = RawCandidate {
            name: Some("Amey123".to_string()),
            surname: Some("456".to_string()),
            ..Default::default()
        };
        let fields = finalize_candidate(candidate, SENDER);
        assert_eq!(fields.name, "Amey");
        assert_eq!(fields.surname, "Pending");
    }

    #[test]
    fn test_defaults_for_issue_and_details() {
        let fields = finalize_candidate(RawCandidate::default(), SENDER);
        assert_eq!(fields.type_of_issue, "General Issue");
        assert_eq!(fields.additional_details, "");
        assert_eq!(fields.name, "Email User");
        assert_eq!(fields.surname, "Pending");
    }

    #[test]
    fn test_finalize_is_idempotent() {
        let candidate = RawCandidate {
            name: Some("Amey9".to_string()),
            surname: Some("Tripathi".to_string()),
            k_number: None,
            k_email: Some("not-an-email".to_string()),
            department: Some("engineering".to_string()),
            type_of_issue: Some("  VPN down ".to_string()),
            additional_details: Some("K-Number: K23163890".to_string()),
        };
        let once = finalize_candidate(candidate, SENDER);
        let twice = finalize_candidate(RawCandidate::from(once.clone()), SENDER);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_existing_institutional_k_email_is_kept() {
        let candidate = RawCandidate {
            k_number: Some("11112222".to_string()),
            k_email: Some("K99990000@kcl.ac.uk".to_string()),
            ..Default::default()
        };
        let fields = finalize_candidate(candidate, SENDER);
        // Keep-check only requires the institutional prefix; exact
        // consistency with k_number is the validator's job.
        assert_eq!(fields.k_email, "K99990000@kcl.ac.uk");
    }
}
