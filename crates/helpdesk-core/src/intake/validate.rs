//! Ordered field validation rule chain.
//!
//! Per field the first failing rule wins; independent fields are all
//! evaluated so one round trip surfaces every problem. The duplicate
//! k_number business rule lives with the orchestrator because it needs
//! storage access.

use regex::Regex;
use std::sync::LazyLock;

use super::fields::TicketFields;
use super::report::{ErrorSet, IntakeField};

pub const VALID_DEPARTMENTS: [&str; 3] = ["Informatics", "Engineering", "Medicine"];

static DIGIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d").unwrap());
static LETTER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-zA-Z]").unwrap());

const MAX_K_NUMBER_LEN: usize = 8;

/// Validate a normalized field set, returning all field errors at once.
pub fn validate_fields(fields: &TicketFields) -> ErrorSet {
    let mut errors = ErrorSet::new();
    validate_name(&fields.name, &mut errors);
    validate_surname(&fields.surname, &mut errors);
    validate_k_number(&fields.k_number, &mut errors);
    validate_k_email(&fields.k_email, &fields.k_number, &mut errors);
    validate_department(&fields.department, &mut errors);
    validate_issue_and_details(&fields.type_of_issue, &fields.additional_details, &mut errors);
    errors
}

fn validate_name(name: &str, errors: &mut ErrorSet) {
    if name.is_empty() {
        errors.insert(IntakeField::Name, "Name is required");
    } else if DIGIT_RE.is_match(name) {
        errors.insert(IntakeField::Name, "Name cannot contain numbers");
    }
}

fn validate_surname(surname: &str, errors: &mut ErrorSet) {
    if surname.is_empty() {
        errors.insert(IntakeField::Surname, "Surname is required");
    } else if DIGIT_RE.is_match(surname) {
        errors.insert(IntakeField::Surname, "Surname cannot contain numbers");
    }
}

fn validate_k_number(k_number: &str, errors: &mut ErrorSet) {
    if k_number.is_empty() {
        errors.insert(IntakeField::KNumber, "K-Number is required");
    } else if LETTER_RE.is_match(k_number) {
        errors.insert(IntakeField::KNumber, "K-Number cannot contain letters");
    } else if k_number.len() > MAX_K_NUMBER_LEN {
        errors.insert(
            IntakeField::KNumber,
            "K-Number cannot be more than 8 digits",
        );
    }
}

fn validate_k_email(k_email: &str, k_number: &str, errors: &mut ErrorSet) {
    if k_email.is_empty() {
        errors.insert(IntakeField::KEmail, "Email is required");
        return;
    }
    // Exact match against the institutional format for the submitted k_number,
    // case-sensitive "K" prefix. Wrong prefix, number, or domain all map to
    // the same message.
    let expected = format!("K{}@kcl.ac.uk", k_number);
    if k_email != expected {
        errors.insert(
            IntakeField::KEmail,
            "Email must be in the format: KNumber@kcl.ac.uk",
        );
    }
}

fn validate_department(department: &str, errors: &mut ErrorSet) {
    if department.is_empty() {
        errors.insert(IntakeField::Department, "Department is required");
    } else if !VALID_DEPARTMENTS.contains(&department) {
        errors.insert(IntakeField::Department, "Invalid department selected");
    }
}

fn validate_issue_and_details(type_of_issue: &str, additional_details: &str, errors: &mut ErrorSet) {
    if type_of_issue.is_empty() {
        errors.insert(IntakeField::TypeOfIssue, "Type of issue is required");
    }
    if additional_details.is_empty() {
        errors.insert(
            IntakeField::AdditionalDetails,
            "Additional details are required",
        );
    }
}
