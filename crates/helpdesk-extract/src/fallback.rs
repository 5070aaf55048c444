//! Deterministic regex fallback extraction.
//!
//! Used when no AI provider is configured or every attempt failed. Never
//! fails; the result still goes through the shared post-processing pass.

use regex::Regex;
use std::sync::LazyLock;

use crate::candidate::{RawCandidate, K_NUMBER_SENTINEL};

static SENDER_K_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"K(\d+)@kcl\.ac\.uk").unwrap());
static BODY_K_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"K(\d{8})").unwrap());
static NAME_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z][a-z]+)\s+([A-Z][a-z]+)$").unwrap());
static NAME_ANYWHERE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z][a-z]+)\s+([A-Z][a-z]+)").unwrap());
static SUBJECT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Subject:\s*(.+)").unwrap());
static DEPT_INFORMATICS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(informatics|computer science|cs)").unwrap());
static DEPT_ENGINEERING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)engineering").unwrap());
static DEPT_MEDICINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(medicine|medical)").unwrap());

/// Lines starting with these prefixes are forwarded-mail headers, not names.
const HEADER_PREFIXES: [&str; 7] = ["subject:", "from:", "to:", "sent:", "re:", "fw:", "fwd:"];

/// Derive a best-effort candidate from raw email content and the sender
/// address using regular expressions only.
pub fn fallback_extraction(email_content: &str, sender_email: &str) -> RawCandidate {
    let k_number = fallback_k_number(email_content, sender_email);
    let (name, surname) = fallback_name(email_content);
    let k_email = if k_number != K_NUMBER_SENTINEL {
        format!("K{}@kcl.ac.uk", k_number)
    } else {
        sender_email.to_string()
    };

    RawCandidate {
        name: Some(name),
        surname: Some(surname),
        k_number: Some(k_number),
        k_email: Some(k_email),
        department: Some(fallback_department(email_content)),
        type_of_issue: Some(fallback_issue(email_content)),
        additional_details: Some(email_content.to_string()),
    }
}

/// Sender address first, then the first `K` + 8 digits anywhere in the body,
/// then the sentinel.
fn fallback_k_number(email_content: &str, sender_email: &str) -> String {
    if let Some(caps) = SENDER_K_RE.captures(sender_email) {
        return caps[1].to_string();
    }
    if let Some(caps) = BODY_K_RE.captures(email_content) {
        return caps[1].to_string();
    }
    K_NUMBER_SENTINEL.to_string()
}

/// Scan lines top-down for exactly two capitalized words, skipping forwarded
/// header lines; fall back to the first such pair anywhere in the body.
fn fallback_name(email_content: &str) -> (String, String) {
    for line in email_content.lines() {
        let stripped = line.trim();
        let lowered = stripped.to_lowercase();
        if HEADER_PREFIXES.iter().any(|p| lowered.starts_with(p)) {
            continue;
        }
        if let Some(caps) = NAME_LINE_RE.captures(stripped) {
            return (caps[1].to_string(), caps[2].to_string());
        }
    }
    if let Some(caps) = NAME_ANYWHERE_RE.captures(email_content) {
        return (caps[1].to_string(), caps[2].to_string());
    }
    ("Email User".to_string(), "Pending".to_string())
}

fn fallback_department(email_content: &str) -> String {
    if DEPT_INFORMATICS_RE.is_match(email_content) {
        "Informatics".to_string()
    } else if DEPT_ENGINEERING_RE.is_match(email_content) {
        "Engineering".to_string()
    } else if DEPT_MEDICINE_RE.is_match(email_content) {
        "Medicine".to_string()
    } else {
        "Informatics".to_string()
    }
}

/// The subject line verbatim, or "General Issue" when absent or empty.
fn fallback_issue(email_content: &str) -> String {
    match SUBJECT_RE.captures(email_content) {
        Some(caps) => {
            let subject = caps[1].trim();
            if subject.is_empty() {
                "General Issue".to_string()
            } else {
                subject.to_string()
            }
        }
        None => "General Issue".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMAIL: &str = "Subject: Computer not turning on\n\
                         From: K23163890@kcl.ac.uk\n\
                         \n\
                         My name is Amey Tripathi. K-Number: K23163890. Department: Informatics.";

    #[test]
    fn test_k_number_from_sender_address() {
        let c = fallback_extraction(EMAIL, "K23163890@kcl.ac.uk");
        assert_eq!(c.k_number.as_deref(), Some("23163890"));
        assert_eq!(c.k_email.as_deref(), Some("K23163890@kcl.ac.uk"));
    }

    #[test]
    fn test_k_number_from_body_when_sender_is_external() {
        let c = fallback_extraction(EMAIL, "personal@gmail.com");
        assert_eq!(c.k_number.as_deref(), Some("23163890"));
    }

    #[test]
    fn test_sentinel_when_no_k_number_anywhere() {
        let c = fallback_extraction("Subject: hi\n\nNothing here", "personal@gmail.com");
        assert_eq!(c.k_number.as_deref(), Some("00000000"));
        assert_eq!(c.k_email.as_deref(), Some("personal@gmail.com"));
    }

    #[test]
    fn test_subject_becomes_type_of_issue() {
        let c = fallback_extraction(EMAIL, "K23163890@kcl.ac.uk");
        assert_eq!(c.type_of_issue.as_deref(), Some("Computer not turning on"));
    }

    #[test]
    fn test_missing_subject_defaults_to_general_issue() {
        let c = fallback_extraction("just a body", "x@y.z");
        assert_eq!(c.type_of_issue.as_deref(), Some("General Issue"));
    }

    #[test]
    fn test_name_line_scan_skips_header_lines() {
        let content = "From: John Smith\nTo: Helpdesk Team\n\nJane Porter\nmy laptop died";
        let (name, surname) = fallback_name(content);
        assert_eq!(name, "Jane");
        assert_eq!(surname, "Porter");
    }

    #[test]
    fn test_name_falls_back_to_first_match_anywhere() {
        let content = "my name is Amey Tripathi and my laptop died";
        let (name, surname) = fallback_name(content);
        assert_eq!(name, "Amey");
        assert_eq!(surname, "Tripathi");
    }

    #[test]
    fn test_name_defaults_when_no_capitalized_pair() {
        let (name, surname) = fallback_name("all lowercase text here");
        assert_eq!(name, "Email User");
        assert_eq!(surname, "Pending");
    }

    #[test]
    fn test_department_keywords() {
        assert_eq!(fallback_department("I study Engineering"), "Engineering");
        assert_eq!(fallback_department("medical school issue"), "Medicine");
        assert_eq!(fallback_department("no keyword at all"), "Informatics");
    }

    #[test]
    fn test_body_preserved_as_additional_details() {
        let c = fallback_extraction(EMAIL, "K23163890@kcl.ac.uk");
        assert_eq!(c.additional_details.as_deref(), Some(EMAIL));
    }
}
