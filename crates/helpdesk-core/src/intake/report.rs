use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// Keys a validation message can be reported under. `Attachments` carries the
/// single batch-level attachment policy message and `General` is reserved for
/// infrastructure failures during persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeField {
    Name,
    Surname,
    KNumber,
    KEmail,
    Department,
    TypeOfIssue,
    AdditionalDetails,
    Attachments,
    General,
}

impl IntakeField {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntakeField::Name => "name",
            IntakeField::Surname => "surname",
            IntakeField::KNumber => "k_number",
            IntakeField::KEmail => "k_email",
            IntakeField::Department => "department",
            IntakeField::TypeOfIssue => "type_of_issue",
            IntakeField::AdditionalDetails => "additional_details",
            IntakeField::Attachments => "attachments",
            IntakeField::General => "general",
        }
    }
}

impl fmt::Display for IntakeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Insertion-ordered field -> message report with at most one message per
/// field (the first failing rule wins). An empty set signals acceptance.
///
/// Serializes as a JSON object so the envelope is `{"errors": {"name": "..."}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorSet {
    entries: Vec<(IntakeField, String)>,
}

impl ErrorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for a field unless one is already present.
    pub fn insert(&mut self, field: IntakeField, message: impl Into<String>) {
        if !self.contains(field) {
            self.entries.push((field, message.into()));
        }
    }

    pub fn contains(&self, field: IntakeField) -> bool {
        self.entries.iter().any(|(f, _)| *f == field)
    }

    pub fn get(&self, field: IntakeField) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, m)| m.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (IntakeField, &str)> {
        self.entries.iter().map(|(f, m)| (*f, m.as_str()))
    }


    /// A report containing a single entry.
    pub fn single(field: IntakeField, message: impl Into<String>) -> Self {
        let mut set = Self::new();
        set.insert(field, message);
        set
    }
}

impl Serialize for ErrorSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, message) in &self.entries {
            map.serialize_entry(field.as_str(), message)?;
        }
        map.end()
    }
}
