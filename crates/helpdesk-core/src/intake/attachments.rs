//! Attachment batch policy check.
//!
//! Files are evaluated in submission order; the first file failing either the
//! size or the extension check aborts the whole batch with a single message
//! naming that file. An empty batch is valid.

use std::path::Path;

/// A candidate attachment, checked before any byte is persisted.
#[derive(Debug, Clone)]
pub struct AttachmentCandidate {
    pub filename: String,
    pub size: u64,
    pub content_type: String,
}

/// Fixed per-file policy: maximum size (inclusive) and an extension
/// whitelist (lowercase, no leading dot).
#[derive(Debug, Clone)]
pub struct AttachmentPolicy {
    pub max_size_bytes: u64,
    pub allowed_extensions: Vec<String>,
}

impl Default for AttachmentPolicy {
    fn default() -> Self {
        AttachmentPolicy {
            max_size_bytes: 10 * 1024 * 1024,
            allowed_extensions: ["jpg", "jpeg", "png", "gif", "pdf", "doc", "docx", "txt"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl AttachmentPolicy {
    pub fn new(max_size_bytes: u64, allowed_extensions: Vec<String>) -> Self {
        AttachmentPolicy {
            max_size_bytes,
            allowed_extensions,
        }
    }
}

/// Check a batch against the policy. Returns the message for the first
/// offending file, or `Ok(())` when every file passes.
pub fn check_attachments(
    policy: &AttachmentPolicy,
    files: &[AttachmentCandidate],
) -> Result<(), String> {
    for file in files {
        single_file_error(policy, file)?;
    }
    Ok(())
}

fn single_file_error(policy: &AttachmentPolicy, file: &AttachmentCandidate) -> Result<(), String> {
    if file.size > policy.max_size_bytes {
        return Err(format!(
            "{} exceeds the maximum file size of {}MB",
            file.filename,
            policy.max_size_bytes / 1024 / 1024
        ));
    }
    let extension = Path::new(&file.filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    if !policy.allowed_extensions.contains(&extension) {
        return Err(format!(
            "{} has an invalid file type. Allowed types: images, PDF, DOC, DOCX, TXT",
            file.filename
        ));
    }
    Ok(())
}
