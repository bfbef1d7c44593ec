//! Contact CSV import and export
//!
//! Import validates row-by-row: a row missing `name` or `phone` is skipped
//! with a notice, everything else is carried through verbatim. Quoting and
//! escaping are handled by the reader, so fields may contain commas.

use crate::error::{CoreError, Result};
use std::io;
use std::path::Path;
use swiftdial_types::{Contact, ContactDraft};

/// Outcome of reading a contact CSV.
#[derive(Debug, Default)]
pub struct CsvImport {
    pub contacts: Vec<ContactDraft>,
    pub skipped: Vec<RowNotice>,
}

/// One per-row validation notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowNotice {
    /// 1-based data row number (header excluded).
    pub row: usize,
    pub message: String,
}

/// Read contacts from CSV. The header must contain `name` and `phone`
/// columns; the whole file is rejected otherwise.
pub fn read_contacts<R: io::Read>(reader: R) -> Result<CsvImport> {
    let mut reader = ::csv::ReaderBuilder::new()
        .trim(::csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.to_ascii_lowercase())
        .collect();
    let name_idx = column(&headers, "name")?;
    let phone_idx = column(&headers, "phone")?;
    let email_idx = headers.iter().position(|h| h == "email");

    let mut import = CsvImport::default();
    for (i, record) in reader.records().enumerate() {
        let row = i + 1;
        let record = record?;
        if record.iter().all(|f| f.is_empty()) {
            continue;
        }

        let name = record.get(name_idx).unwrap_or("");
        let phone = record.get(phone_idx).unwrap_or("");
        if name.is_empty() || phone.is_empty() {
            import.skipped.push(RowNotice {
                row,
                message: format!("row {} missing required fields (phone or name)", row),
            });
            continue;
        }

        let mut draft = ContactDraft::new(name, phone);
        if let Some(email) = email_idx.and_then(|i| record.get(i)) {
            if !email.is_empty() {
                draft.email = Some(email.to_string());
            }
        }
        for (idx, header) in headers.iter().enumerate() {
            if idx == name_idx || idx == phone_idx || Some(idx) == email_idx {
                continue;
            }
            if let Some(value) = record.get(idx) {
                if !value.is_empty() {
                    draft.extra.insert(header.clone(), value.to_string());
                }
            }
        }
        import.contacts.push(draft);
    }

    Ok(import)
}

pub fn read_contacts_path(path: &Path) -> Result<CsvImport> {
    let file = std::fs::File::open(path)?;
    read_contacts(io::BufReader::new(file))
}

/// Write contacts as CSV, one row per contact.
pub fn write_contacts<W: io::Write>(writer: W, contacts: &[Contact]) -> Result<()> {
    let mut writer = ::csv::Writer::from_writer(writer);
    writer.write_record([
        "id",
        "name",
        "phone",
        "email",
        "status",
        "last_called",
        "total_calls",
        "duration_seconds",
        "total_cost",
        "hot_lead",
    ])?;
    for contact in contacts {
        writer.write_record([
            contact.id.as_str(),
            contact.name.as_str(),
            contact.phone.as_str(),
            contact.email.as_str(),
            contact.status.as_str(),
            &contact
                .last_called
                .map(|t| t.to_rfc3339())
                .unwrap_or_default(),
            &contact.total_calls.to_string(),
            &contact
                .duration_seconds
                .map(|d| d.to_string())
                .unwrap_or_default(),
            &contact
                .total_cost
                .map(|c| format!("{:.3}", c))
                .unwrap_or_default(),
            &contact.hot_lead.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn column(headers: &[String], name: &'static str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or(CoreError::MissingColumn(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn import(text: &str) -> CsvImport {
        read_contacts(text.as_bytes()).unwrap()
    }

    #[test]
    fn imports_well_formed_rows_verbatim() {
        let result = import("phone,name,email\n555-0100,Jane,j@x.com\n");
        assert_eq!(result.contacts.len(), 1);
        assert!(result.skipped.is_empty());

        let contact = &result.contacts[0];
        assert_eq!(contact.name, "Jane");
        assert_eq!(contact.phone, "555-0100");
        assert_eq!(contact.email.as_deref(), Some("j@x.com"));
    }

    #[test]
    fn skips_rows_missing_required_fields() {
        let result = import("phone,name,email\n,,\n555-0101,Bob,\n,NoPhone,n@x.com\n");
        assert_eq!(result.contacts.len(), 1);
        assert_eq!(result.contacts[0].name, "Bob");

        // One notice per bad row, identifying the row.
        assert_eq!(result.skipped.len(), 2);
        assert_eq!(result.skipped[0].row, 1);
        assert_eq!(result.skipped[1].row, 3);
        assert!(result.skipped[1].message.contains("row 3"));
    }

    #[test]
    fn quoted_commas_survive() {
        let result = import("name,phone,company\n\"Acme, Inc.\",555-0100,\"Roofs, LLC\"\n");
        assert_eq!(result.contacts.len(), 1);
        assert_eq!(result.contacts[0].name, "Acme, Inc.");
        assert_eq!(
            result.contacts[0].extra.get("company").map(String::as_str),
            Some("Roofs, LLC")
        );
    }

    #[test]
    fn rejects_file_without_required_columns() {
        let err = read_contacts("email,company\na@x.com,Acme\n".as_bytes()).unwrap_err();
        assert!(matches!(err, CoreError::MissingColumn("name" | "phone")));
    }

    #[test]
    fn blank_lines_are_ignored_silently() {
        let result = import("name,phone\nJane,555-0100\n\nBob,555-0101\n");
        assert_eq!(result.contacts.len(), 2);
        assert!(result.skipped.is_empty());
    }

    #[test]
    fn headers_match_case_insensitively() {
        let result = import("Name,PHONE\nJane,555-0100\n");
        assert_eq!(result.contacts.len(), 1);
    }

    #[test]
    fn export_round_trip_contains_fields() {
        let contact = Contact {
            id: "c1".to_string(),
            user_id: None,
            name: "Jane, Q".to_string(),
            phone: "555-0100".to_string(),
            email: "j@x.com".to_string(),
            status: "completed".to_string(),
            last_called: None,
            total_calls: 3,
            call_summary: None,
            duration_seconds: Some(61),
            total_cost: Some(0.25),
            hot_lead: true,
        };
        let mut out = Vec::new();
        write_contacts(&mut out, &[contact]).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\"Jane, Q\""));
        assert!(text.contains("555-0100"));
        assert!(text.contains("0.250"));
    }
}
