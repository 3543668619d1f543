use serde::{Deserialize, Serialize};

/// A batch ingestion event: one or more envelopes, each referencing an
/// uploaded roster file.
#[derive(Debug, Deserialize)]
pub struct BatchEvent {
    #[serde(default)]
    pub records: Vec<RosterNotice>,
}

/// One envelope of a batch event.
///
/// All fields are optional so that a malformed envelope still deserializes
/// and can be skipped on its own instead of rejecting its siblings.
#[derive(Debug, Deserialize)]
pub struct RosterNotice {
    pub bucket: Option<String>,
    pub key: Option<String>,
    pub election_id: Option<String>,
}

impl RosterNotice {
    /// The envelope's parts, if all three are present and non-empty.
    pub fn parts(&self) -> Option<(&str, &str, &str)> {
        let bucket = self.bucket.as_deref().filter(|b| !b.is_empty())?;
        let key = self.key.as_deref().filter(|k| !k.is_empty())?;
        let election_id = self.election_id.as_deref().filter(|e| !e.is_empty())?;
        Some((bucket, key, election_id))
    }
}

/// Body of a successful ingestion response.
#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub success: bool,
}

impl IngestResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

#[cfg(test)]
mod tests {
    use rocket::serde::json::serde_json::{self, json};

    use super::*;

    #[test]
    fn complete_envelopes_yield_their_parts() {
        let event: BatchEvent = serde_json::from_value(json!({
            "records": [
                { "bucket": "uploads", "key": "voters.csv", "election_id": "E1" },
            ]
        }))
        .unwrap();
        assert_eq!(
            event.records[0].parts(),
            Some(("uploads", "voters.csv", "E1"))
        );
    }

    #[test]
    fn malformed_envelopes_still_deserialize() {
        let event: BatchEvent = serde_json::from_value(json!({
            "records": [
                { "bucket": "uploads" },
                { "bucket": "uploads", "key": "", "election_id": "E1" },
                { "bucket": "uploads", "key": "voters.csv", "election_id": "E1" },
            ]
        }))
        .unwrap();
        assert_eq!(event.records.len(), 3);
        assert!(event.records[0].parts().is_none());
        assert!(event.records[1].parts().is_none());
        assert!(event.records[2].parts().is_some());
    }

    #[test]
    fn an_event_without_records_is_empty() {
        let event: BatchEvent = serde_json::from_value(json!({})).unwrap();
        assert!(event.records.is_empty());
    }
}
