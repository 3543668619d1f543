use mongodb::bson::{doc, Document};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::mongodb::Coll;

fn default_status() -> String {
    "draft".to_string()
}

/// An election record. The status and schedule strings are written by the
/// admin tooling upstream and passed through untouched; the denormalized
/// counters are owned here and only ever grow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Election {
    pub election_id: String,
    #[serde(default)]
    pub election_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub election_start_time: String,
    #[serde(default)]
    pub election_end_time: String,
    #[serde(default)]
    pub total_voters: i64,
    #[serde(default)]
    pub total_candidates: i64,
    #[serde(default)]
    pub votes_cast: i64,
}

/// The denormalized counters maintained on the election record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElectionCounter {
    TotalVoters,
    TotalCandidates,
}

impl ElectionCounter {
    pub fn field(self) -> &'static str {
        match self {
            Self::TotalVoters => "total_voters",
            Self::TotalCandidates => "total_candidates",
        }
    }
}

impl Election {
    pub async fn find_by_id(
        elections: &Coll<Election>,
        election_id: &str,
    ) -> Result<Option<Election>> {
        let filter = doc! { "election_id": election_id };
        Ok(elections.find_one(filter, None).await?)
    }

    /// Add `added` to one of the denormalized counters.
    ///
    /// A single `$inc` keeps sequential and concurrent batches additive:
    /// no batch can clobber another's contribution, and counters never
    /// move backwards.
    pub async fn add_to_counter(
        elections: &Coll<Election>,
        election_id: &str,
        counter: ElectionCounter,
        added: i64,
    ) -> Result<()> {
        elections
            .update_one(
                doc! { "election_id": election_id },
                counter_update(counter, added),
                None,
            )
            .await?;
        Ok(())
    }
}

/// The update applied per ingestion batch: an atomic increment, never an
/// overwrite, so repeated batches accumulate.
fn counter_update(counter: ElectionCounter, added: i64) -> Document {
    let mut increment = Document::new();
    increment.insert(counter.field(), added);
    doc! { "$inc": increment }
}

#[cfg(test)]
mod tests {
    use mongodb::bson::from_document;

    use super::*;

    #[test]
    fn counter_fields_match_the_stored_attributes() {
        assert_eq!(ElectionCounter::TotalVoters.field(), "total_voters");
        assert_eq!(ElectionCounter::TotalCandidates.field(), "total_candidates");
    }

    #[test]
    fn batches_increment_rather_than_overwrite() {
        let update = counter_update(ElectionCounter::TotalVoters, 2);
        assert_eq!(update, doc! { "$inc": { "total_voters": 2_i64 } });
        assert!(!update.contains_key("$set"));
    }

    #[test]
    fn sparse_documents_deserialize_with_defaults() {
        let election: Election = from_document(doc! { "election_id": "E1" }).unwrap();
        assert_eq!(election.status, "draft");
        assert_eq!(election.election_name, "");
        assert_eq!(election.total_voters, 0);
        assert_eq!(election.total_candidates, 0);
        assert_eq!(election.votes_cast, 0);
    }

    #[test]
    fn unrecognized_status_values_pass_through() {
        let election: Election =
            from_document(doc! { "election_id": "E1", "status": "suspended" }).unwrap();
        assert_eq!(election.status, "suspended");
    }
}
