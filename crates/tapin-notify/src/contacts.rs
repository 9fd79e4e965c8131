// SPDX-FileCopyrightText: 2026 Tapin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Guardian contacts file.
//!
//! A TOML file mapping student identifiers to guardian contact details:
//!
//! ```toml
//! [S001]
//! email = "guardian@example.com"
//! token = "relay-token"
//! ```

use std::path::Path;

use tracing::info;

use tapin_core::{GuardianDirectory, KioskError};

/// Load the guardian directory from a TOML contacts file.
pub fn load_contacts(path: &Path) -> Result<GuardianDirectory, KioskError> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        KioskError::Config(format!("cannot read contacts file {}: {e}", path.display()))
    })?;
    let directory: GuardianDirectory = toml::from_str(&raw).map_err(|e| {
        KioskError::Config(format!("malformed contacts file {}: {e}", path.display()))
    })?;
    info!(
        contacts = directory.len(),
        path = %path.display(),
        "guardian contacts loaded"
    );
    Ok(directory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use tapin_core::StudentId;

    #[test]
    fn loads_contacts_by_student_id() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[S001]
email = "guardian@example.com"
token = "tok-1"

[S002]
email = "other@example.com"
token = "tok-2"
"#
        )
        .unwrap();

        let directory = load_contacts(file.path()).unwrap();
        assert_eq!(directory.len(), 2);
        let contact = directory.get(&StudentId("S001".into())).unwrap();
        assert_eq!(contact.email, "guardian@example.com");
        assert_eq!(contact.token, "tok-1");
        assert!(directory.get(&StudentId("S999".into())).is_none());
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = load_contacts(Path::new("/nonexistent/contacts.toml")).unwrap_err();
        assert!(matches!(err, KioskError::Config(_)));
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[S001]\nemail = 42").unwrap();
        let err = load_contacts(file.path()).unwrap_err();
        assert!(matches!(err, KioskError::Config(_)));
    }
}
