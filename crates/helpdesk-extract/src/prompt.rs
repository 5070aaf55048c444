//! Fixed extraction instruction prompt.

/// Build the instruction prompt requesting strict JSON with the seven ticket
/// fields.
pub fn build_prompt(email_content: &str) -> String {
    format!(
        r#"Extract ticket information from this email and return it as JSON.

Email content:
{email_content}

Extract the following fields:
- name: First name (no numbers, required)
- surname: Last name (no numbers, required)
- k_number: K-Number (8 digits, numbers only, extract from email address or body)
- k_email: Email address (should match K{{number}}@kcl.ac.uk format)
- department: One of ["Informatics", "Engineering", "Medicine"] (required)
- type_of_issue: Type of issue/problem (required)
- additional_details: Full description/details (required)

Rules:
1. Extract K-Number from email address if it matches K[number]@kcl.ac.uk pattern
2. If K-Number not in email, try to find it in the body text (look for "K" followed by 8 digits)
3. If name/surname not found in email, use "Email User" and "Pending"
4. Department must be one of: Informatics, Engineering, or Medicine
5. If department not found, default to "Informatics"
6. Return valid JSON only, no other text

Return JSON format:
{{
    "name": "...",
    "surname": "...",
    "k_number": "...",
    "k_email": "...",
    "department": "...",
    "type_of_issue": "...",
    "additional_details": "..."
}}"#
    )
}
