use serde::{Deserialize, Serialize};

use crate::model::db::{Candidate, Election, VerificationStatus, Voter};

/// List view of an election. Field defaulting happens when the stored
/// document is read back, so the summary is a straight projection.
#[derive(Debug, Serialize, Deserialize)]
pub struct ElectionSummary {
    pub election_id: String,
    pub election_name: String,
    pub description: String,
    pub status: String,
    pub election_start_time: String,
    pub election_end_time: String,
    pub total_voters: i64,
    pub total_candidates: i64,
    pub votes_cast: i64,
}

impl From<Election> for ElectionSummary {
    fn from(election: Election) -> Self {
        Self {
            election_id: election.election_id,
            election_name: election.election_name,
            description: election.description,
            status: election.status,
            election_start_time: election.election_start_time,
            election_end_time: election.election_end_time,
            total_voters: election.total_voters,
            total_candidates: election.total_candidates,
            votes_cast: election.votes_cast,
        }
    }
}

/// List view of a voter. The OTP fields are deliberately not part of this
/// type, so they can never leak through the read endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct VoterSummary {
    pub voter_id: String,
    pub name: String,
    pub email: String,
    pub election_id: String,
    pub has_voted: bool,
    pub verification_status: VerificationStatus,
    pub verified: bool,
}

impl From<Voter> for VoterSummary {
    fn from(voter: Voter) -> Self {
        Self {
            verified: voter.verification_status.is_verified(),
            voter_id: voter.voter_id,
            name: voter.name,
            email: voter.email,
            election_id: voter.election_id,
            has_voted: voter.has_voted,
            verification_status: voter.verification_status,
        }
    }
}

/// List view of a candidate.
#[derive(Debug, Serialize, Deserialize)]
pub struct CandidateSummary {
    pub candidate_id: String,
    pub election_id: String,
    pub name: String,
    pub position: String,
    pub bio: String,
    pub photo_url: String,
    pub manifesto: String,
    pub vote_count: i64,
}

impl From<Candidate> for CandidateSummary {
    fn from(candidate: Candidate) -> Self {
        Self {
            candidate_id: candidate.candidate_id,
            election_id: candidate.election_id,
            name: candidate.name,
            position: candidate.position,
            bio: candidate.bio,
            photo_url: candidate.photo_url,
            manifesto: candidate.manifesto,
            vote_count: candidate.vote_count,
        }
    }
}

/// Envelope for `GET /elections`.
#[derive(Debug, Serialize)]
pub struct ElectionList {
    pub success: bool,
    pub elections: Vec<ElectionSummary>,
}

impl ElectionList {
    pub fn new(elections: Vec<ElectionSummary>) -> Self {
        Self {
            success: true,
            elections,
        }
    }
}

/// Envelope for `GET /voters`.
#[derive(Debug, Serialize)]
pub struct VoterList {
    pub success: bool,
    pub voters: Vec<VoterSummary>,
}

impl VoterList {
    pub fn new(voters: Vec<VoterSummary>) -> Self {
        Self {
            success: true,
            voters,
        }
    }
}

/// Envelope for `GET /candidates`.
#[derive(Debug, Serialize)]
pub struct CandidateList {
    pub success: bool,
    pub candidates: Vec<CandidateSummary>,
}

impl CandidateList {
    pub fn new(candidates: Vec<CandidateSummary>) -> Self {
        Self {
            success: true,
            candidates,
        }
    }
}

#[cfg(test)]
mod tests {
    use mongodb::bson::{doc, from_document};
    use rocket::serde::json::serde_json;

    use super::*;

    #[test]
    fn voter_summary_never_exposes_the_otp() {
        let voter: Voter = from_document(doc! {
            "election_id": "E1",
            "voter_id": "v1",
            "name": "Ada",
            "email": "ada@x.com",
            "otp": "042917",
            "otp_expiry": "2024-03-01T12:10:00+00:00",
        })
        .unwrap();
        let body = serde_json::to_value(VoterSummary::from(voter)).unwrap();
        let entry = body.as_object().unwrap();
        assert!(!entry.contains_key("otp"));
        assert!(!entry.contains_key("otp_expiry"));
        assert_eq!(entry["verification_status"], "pending");
        assert_eq!(entry["verified"], false);
    }

    #[test]
    fn voter_summary_derives_verified() {
        let voter: Voter = from_document(doc! {
            "election_id": "E1",
            "voter_id": "v1",
            "verification_status": "verified",
        })
        .unwrap();
        let summary = VoterSummary::from(voter);
        assert!(summary.verified);
    }

    #[test]
    fn election_summary_applies_the_read_defaults() {
        let election: Election = from_document(doc! { "election_id": "E1" }).unwrap();
        let summary = ElectionSummary::from(election);
        assert_eq!(summary.status, "draft");
        assert_eq!(summary.total_voters, 0);
        assert_eq!(summary.votes_cast, 0);
    }

    #[test]
    fn list_envelopes_report_success() {
        let body = serde_json::to_value(ElectionList::new(Vec::new())).unwrap();
        assert_eq!(body["success"], true);
        assert!(body["elections"].as_array().unwrap().is_empty());
    }
}
