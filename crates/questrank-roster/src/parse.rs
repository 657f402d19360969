//! Roster sheet parsing: form-response rows into participants.

use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDateTime;
use csv::StringRecord;
use questrank_core::Participant;

use crate::error::RosterError;

/// First cell of the sheet's header row.
const HEADER_TIMESTAMP: &str = "Timestamp";

/// Form timestamps as exported by the sheet, e.g. `8/29/2019 10:23:11`.
const TIMESTAMP_FORMATS: &[&str] = &["%m/%d/%Y %H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// A roster row that was skipped, with its 1-based row number and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoredRow {
    pub row_id: usize,
    pub reason: String,
}

/// The ingested roster: participants in roster order plus skipped-row
/// diagnostics.
#[derive(Debug, Default)]
pub struct Roster {
    pub participants: Vec<Participant>,
    pub ignored: Vec<IgnoredRow>,
}

/// Reads and parses a local roster CSV file.
///
/// # Errors
///
/// Returns `RosterError` if the file cannot be read or is not valid CSV.
pub fn load_roster_file(path: &Path) -> Result<Roster, RosterError> {
    let content = std::fs::read_to_string(path).map_err(|e| RosterError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_roster(&content)
}

/// Parses roster CSV text into participants.
///
/// The header row is skipped. A data row must carry a parseable form
/// timestamp in column 0 and non-empty email, name, nickname, profile link,
/// and location columns; anything else is recorded in `ignored` and logged.
///
/// Email (trimmed, lowercased) is the dedup key. On a duplicate, the
/// latest row's fields win but the entry keeps the first occurrence's
/// roster position; both rows are named in the warning.
///
/// # Errors
///
/// Returns `RosterError::Csv` if the input is not well-formed CSV.
pub fn parse_roster(csv_text: &str) -> Result<Roster, RosterError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(csv_text.as_bytes());

    let mut participants: Vec<Participant> = Vec::new();
    let mut index_by_email: HashMap<String, usize> = HashMap::new();
    let mut ignored: Vec<IgnoredRow> = Vec::new();

    for (i, record) in reader.records().enumerate() {
        let row_id = i + 1;
        let record = record?;

        if record.get(0).map(str::trim) == Some(HEADER_TIMESTAMP) {
            continue;
        }

        match participant_from_record(row_id, &record) {
            Ok(participant) => {
                if let Some(&at) = index_by_email.get(&participant.email) {
                    tracing::warn!(
                        email = %participant.email,
                        first_row = participants[at].row_id,
                        row = row_id,
                        "duplicate roster entry; keeping latest fields"
                    );
                    participants[at] = participant;
                } else {
                    index_by_email.insert(participant.email.clone(), participants.len());
                    participants.push(participant);
                }
            }
            Err(reason) => {
                tracing::warn!(row = row_id, %reason, "ignoring roster row");
                ignored.push(IgnoredRow { row_id, reason });
            }
        }
    }

    Ok(Roster {
        participants,
        ignored,
    })
}

fn participant_from_record(row_id: usize, record: &StringRecord) -> Result<Participant, String> {
    let timestamp = record.get(0).unwrap_or("").trim();
    if !is_form_timestamp(timestamp) {
        return Err(format!("no form timestamp in column 1: {timestamp:?}"));
    }

    let field = |idx: usize, name: &str| -> Result<&str, String> {
        let value = record.get(idx).unwrap_or("").trim();
        if value.is_empty() {
            Err(format!("missing {name}"))
        } else {
            Ok(value)
        }
    };

    let email = field(1, "email")?;
    let name = field(2, "name")?;
    let nick_name = field(3, "nickname")?;
    let profile_url = field(4, "profile link")?;
    let location = field(5, "location")?;

    Ok(Participant::new(
        row_id,
        email,
        name,
        nick_name,
        profile_url,
        location,
    ))
}

fn is_form_timestamp(value: &str) -> bool {
    TIMESTAMP_FORMATS
        .iter()
        .any(|format| NaiveDateTime::parse_from_str(value, format).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROSTER: &str = "\
Timestamp,Email Address,Full name,Nickname,Quest profile link,Where do you live?
8/29/2019 10:23:11,An.Tran@example.com,An Tran,an,https://example.com/profiles/1,Hanoi
8/29/2019 11:00:00,binh.le@example.com,Binh Le,binh,https://example.com/profiles/2,Da Nang
";

    #[test]
    fn parses_rows_and_skips_header() {
        let roster = parse_roster(ROSTER).unwrap();
        assert_eq!(roster.participants.len(), 2);
        assert!(roster.ignored.is_empty());

        let first = &roster.participants[0];
        assert_eq!(first.row_id, 2);
        assert_eq!(first.email, "an.tran@example.com");
        assert_eq!(first.name, "An Tran");
        assert_eq!(first.profile_url, "https://example.com/profiles/1");
        assert_eq!(first.location, "Hanoi");
    }

    #[test]
    fn duplicate_email_keeps_first_position_with_latest_fields() {
        let csv_text = "\
Timestamp,Email,Name,Nick,Link,Location
8/29/2019 10:00:00,an@example.com,Old Name,an,https://example.com/profiles/old,Hanoi
8/29/2019 11:00:00,binh@example.com,Binh Le,binh,https://example.com/profiles/2,Da Nang
8/29/2019 12:00:00,AN@example.com,New Name,an,https://example.com/profiles/new,Hanoi
";
        let roster = parse_roster(csv_text).unwrap();
        assert_eq!(roster.participants.len(), 2);

        // Position of the first occurrence, fields of the latest.
        let first = &roster.participants[0];
        assert_eq!(first.email, "an@example.com");
        assert_eq!(first.name, "New Name");
        assert_eq!(first.profile_url, "https://example.com/profiles/new");
        assert_eq!(first.row_id, 4);

        assert_eq!(roster.participants[1].email, "binh@example.com");
    }

    #[test]
    fn row_without_timestamp_is_ignored_with_reason() {
        let csv_text = "\
Timestamp,Email,Name,Nick,Link,Location
not a date,an@example.com,An Tran,an,https://example.com/profiles/1,Hanoi
8/29/2019 10:00:00,binh@example.com,Binh Le,binh,https://example.com/profiles/2,Hanoi
";
        let roster = parse_roster(csv_text).unwrap();
        assert_eq!(roster.participants.len(), 1);
        assert_eq!(roster.ignored.len(), 1);
        assert_eq!(roster.ignored[0].row_id, 2);
        assert!(roster.ignored[0].reason.contains("no form timestamp"));
    }

    #[test]
    fn row_with_missing_field_is_ignored_with_reason() {
        let csv_text = "\
Timestamp,Email,Name,Nick,Link,Location
8/29/2019 10:00:00,an@example.com,An Tran,an,https://example.com/profiles/1,
";
        let roster = parse_roster(csv_text).unwrap();
        assert!(roster.participants.is_empty());
        assert_eq!(roster.ignored.len(), 1);
        assert_eq!(roster.ignored[0].reason, "missing location");
    }

    #[test]
    fn iso_timestamps_are_accepted_too() {
        let csv_text = "\
2019-08-29 10:00:00,an@example.com,An Tran,an,https://example.com/profiles/1,Hanoi
";
        let roster = parse_roster(csv_text).unwrap();
        assert_eq!(roster.participants.len(), 1);
    }

    #[test]
    fn empty_input_yields_empty_roster() {
        let roster = parse_roster("").unwrap();
        assert!(roster.participants.is_empty());
        assert!(roster.ignored.is_empty());
    }
}
