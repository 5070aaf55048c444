//! Storage key construction for attachments.

/// Build the storage key for an attachment:
/// `attachments/ticket_<id>/<filename>`, or `attachments/temp/<filename>`
/// when the ticket has not been persisted yet.
pub fn attachment_key(ticket_id: Option<i64>, filename: &str) -> String {
    let safe_name = sanitize_filename(filename);
    match ticket_id {
        Some(id) => format!("attachments/ticket_{}/{}", id, safe_name),
        None => format!("attachments/temp/{}", safe_name),
    }
}

/// Keep only the basename and replace path-hostile characters so a
/// caller-supplied filename can never influence the directory layout.
fn sanitize_filename(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);
    base.chars()
        .map(|c| if c == '\0' || c == '/' || c == '\\' { '_' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_includes_ticket_directory() {
        assert_eq!(
            attachment_key(Some(42), "screenshot.png"),
            "attachments/ticket_42/screenshot.png"
        );
    }

    #[test]
    fn test_temp_key_before_ticket_exists() {
        assert_eq!(
            attachment_key(None, "notes.txt"),
            "attachments/temp/notes.txt"
        );
    }

    #[test]
    fn test_path_components_are_stripped_from_filename() {
        assert_eq!(
            attachment_key(Some(7), "../../etc/passwd"),
            "attachments/ticket_7/passwd"
        );
        assert_eq!(
            attachment_key(Some(7), "dir\\evil.txt"),
            "attachments/ticket_7/evil.txt"
        );
    }
}
