use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The seven ticket draft fields, as submitted by a caller or derived by the
/// email extractor. Transient: nothing is persisted until validation passes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TicketFields {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub k_number: String,
    #[serde(default)]
    pub k_email: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub type_of_issue: String,
    #[serde(default)]
    pub additional_details: String,
}

impl TicketFields {
    /// Field normalizer: trims leading/trailing whitespace from every field.
    /// Side-effect-free; the k_number/k_email cross-check stays with the
    /// validator.
    pub fn trimmed(&self) -> Self {
        TicketFields {
            name: self.name.trim().to_string(),
            surname: self.surname.trim().to_string(),
            k_number: self.k_number.trim().to_string(),
            k_email: self.k_email.trim().to_string(),
            department: self.department.trim().to_string(),
            type_of_issue: self.type_of_issue.trim().to_string(),
            additional_details: self.additional_details.trim().to_string(),
        }
    }
}
