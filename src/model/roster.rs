use std::collections::HashMap;

use csv::Reader;
use uuid::Uuid;

use crate::error::Result;

/// One parsed roster row: a freshly minted record identifier plus the row's
/// column values keyed by header name.
#[derive(Debug, Clone)]
pub struct RosterRow {
    id: String,
    values: HashMap<String, String>,
}

impl RosterRow {
    /// The generated identifier for the record this row will become.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The value under `column`, or `""` if the upload lacks that column.
    pub fn get(&self, column: &str) -> &str {
        self.values.get(column).map(String::as_str).unwrap_or("")
    }
}

/// Parse delimited roster content into rows.
///
/// The first line names the columns. Each data row is assigned a new UUID;
/// row content never influences the identifier, so re-uploading a file mints
/// entirely fresh records. A malformed file (missing header, ragged row)
/// fails the whole upload.
pub fn parse(content: &str) -> Result<Vec<RosterRow>> {
    let mut reader = Reader::from_reader(content.as_bytes());
    let headers = reader.headers()?.clone();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let values = headers
            .iter()
            .zip(record.iter())
            .map(|(column, value)| (column.to_string(), value.to_string()))
            .collect();
        rows.push(RosterRow {
            id: Uuid::new_v4().to_string(),
            values,
        });
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_count_matches_data_rows() {
        let rows = parse("name,email\nAda,ada@x.com\nLin,lin@x.com\n").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("name"), "Ada");
        assert_eq!(rows[0].get("email"), "ada@x.com");
        assert_eq!(rows[1].get("name"), "Lin");
    }

    #[test]
    fn absent_columns_default_to_empty() {
        let rows = parse("name,email\nAda,ada@x.com\n").unwrap();
        assert_eq!(rows[0].get("face_image_url"), "");
    }

    #[test]
    fn identifiers_are_unique_and_content_free() {
        // Identical rows must still receive distinct identifiers.
        let rows = parse("name\nAda\nAda\nAda\n").unwrap();
        assert_eq!(rows.len(), 3);
        let mut ids: Vec<&str> = rows.iter().map(RosterRow::id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn header_only_upload_yields_no_rows() {
        let rows = parse("name,email,face_image_url\n").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn ragged_row_is_fatal() {
        assert!(parse("name,email\nAda\n").is_err());
    }

    #[test]
    fn unrecognized_columns_are_carried() {
        let rows = parse("name,shoe_size\nAda,37\n").unwrap();
        assert_eq!(rows[0].get("shoe_size"), "37");
    }
}
