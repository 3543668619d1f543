use serde::{Deserialize, Serialize};

use crate::model::roster::RosterRow;

/// A candidate record, created only by roster ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub candidate_id: String,
    pub election_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub photo_url: String,
    #[serde(default)]
    pub manifesto: String,
    #[serde(default)]
    pub vote_count: i64,
}

impl Candidate {
    /// Build a fresh candidate from a parsed roster row, with no votes yet.
    pub fn from_roster_row(election_id: &str, row: &RosterRow) -> Self {
        Self {
            candidate_id: row.id().to_string(),
            election_id: election_id.to_string(),
            name: row.get("name").to_string(),
            position: row.get("position").to_string(),
            bio: row.get("bio").to_string(),
            photo_url: row.get("photo_url").to_string(),
            manifesto: row.get("manifesto").to_string(),
            vote_count: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use mongodb::bson::{doc, from_document};

    use crate::model::roster;

    use super::*;

    #[test]
    fn fresh_candidates_start_with_no_votes() {
        let rows =
            roster::parse("name,position,bio\nKai,President,Economist\n").unwrap();
        let candidate = Candidate::from_roster_row("E1", &rows[0]);
        assert_eq!(candidate.candidate_id, rows[0].id());
        assert_eq!(candidate.election_id, "E1");
        assert_eq!(candidate.name, "Kai");
        assert_eq!(candidate.position, "President");
        assert_eq!(candidate.bio, "Economist");
        assert_eq!(candidate.photo_url, "");
        assert_eq!(candidate.manifesto, "");
        assert_eq!(candidate.vote_count, 0);
    }

    #[test]
    fn sparse_documents_deserialize_with_defaults() {
        let candidate: Candidate =
            from_document(doc! { "candidate_id": "c1", "election_id": "E1" }).unwrap();
        assert_eq!(candidate.name, "");
        assert_eq!(candidate.vote_count, 0);
    }
}
