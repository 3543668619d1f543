use chrono::{DateTime, Utc};
use mongodb::bson::{doc, Document};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{
    mongodb::Coll,
    otp::{Code, Otp},
    roster::RosterRow,
};

/// A voter record, keyed by (`election_id`, `voter_id`).
///
/// `voter_id` is only unique within its election, so a lookup by `voter_id`
/// alone goes through the secondary index rather than the key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voter {
    pub election_id: String,
    pub voter_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub face_image_url: String,
    #[serde(default)]
    pub has_voted: bool,
    #[serde(default)]
    pub verification_status: VerificationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub otp: Option<Code>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub otp_expiry: Option<DateTime<Utc>>,
}

/// Voter identity-verification lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    #[default]
    Pending,
    Verified,
    Rejected,
}

impl VerificationStatus {
    /// The derived `verified` flag exposed by the read endpoint.
    pub fn is_verified(self) -> bool {
        matches!(self, Self::Verified)
    }
}

impl Voter {
    /// Build a fresh voter from a parsed roster row. New voters have not
    /// voted, are pending verification and hold no OTP.
    pub fn from_roster_row(election_id: &str, row: &RosterRow) -> Self {
        Self {
            election_id: election_id.to_string(),
            voter_id: row.id().to_string(),
            name: row.get("name").to_string(),
            email: row.get("email").to_string(),
            face_image_url: row.get("face_image_url").to_string(),
            has_voted: false,
            verification_status: VerificationStatus::Pending,
            otp: None,
            otp_expiry: None,
        }
    }

    /// The currently stored OTP, if one is outstanding.
    pub fn outstanding_otp(&self) -> Option<Otp> {
        Some(Otp {
            code: self.otp?,
            expire_at: self.otp_expiry?,
        })
    }

    /// Unconditionally insert the voter. There is no duplicate detection:
    /// re-ingesting a file creates new records, because roster rows always
    /// carry freshly minted identifiers.
    pub async fn put(voters: &Coll<Voter>, voter: &Voter) -> Result<()> {
        voters.insert_one(voter, None).await?;
        Ok(())
    }

    /// Look up the zero-or-one voter matching the (`voter_id`, `email`)
    /// pair. The first match wins; a miss never reveals whether the ID was
    /// unknown or the email mismatched.
    pub async fn find_by_credentials(
        voters: &Coll<Voter>,
        voter_id: &str,
        email: &str,
    ) -> Result<Option<Voter>> {
        let filter = doc! {
            "voter_id": voter_id,
            "email": email,
        };
        Ok(voters.find_one(filter, None).await?)
    }

    /// Look up a voter by ID alone (secondary index; first match wins).
    pub async fn find_by_voter_id(voters: &Coll<Voter>, voter_id: &str) -> Result<Option<Voter>> {
        Ok(voters.find_one(doc! { "voter_id": voter_id }, None).await?)
    }

    /// Apply a partial attribute update to the voter with the given key.
    pub async fn update_fields(
        voters: &Coll<Voter>,
        election_id: &str,
        voter_id: &str,
        update: Document,
    ) -> Result<()> {
        let key = doc! {
            "election_id": election_id,
            "voter_id": voter_id,
        };
        voters.update_one(key, update, None).await?;
        Ok(())
    }

    /// Stamp a newly issued OTP onto the voter record, replacing any prior
    /// unconsumed code. Only the most recent code is ever valid.
    pub async fn store_otp(
        voters: &Coll<Voter>,
        election_id: &str,
        voter_id: &str,
        otp: &Otp,
    ) -> Result<()> {
        let update = doc! {
            "$set": {
                "otp": otp.code.to_string(),
                "otp_expiry": otp.expire_at.to_rfc3339(),
            }
        };
        Self::update_fields(voters, election_id, voter_id, update).await
    }

    /// Remove a consumed or superseded OTP (codes are single-use).
    pub async fn clear_otp(voters: &Coll<Voter>, election_id: &str, voter_id: &str) -> Result<()> {
        let update = doc! {
            "$unset": { "otp": "", "otp_expiry": "" }
        };
        Self::update_fields(voters, election_id, voter_id, update).await
    }
}

#[cfg(test)]
mod tests {
    use mongodb::bson::{from_document, to_document};

    use crate::model::roster;

    use super::*;

    #[test]
    fn fresh_voters_start_unvoted_and_pending() {
        let rows = roster::parse("name,email\nAda,ada@x.com\n").unwrap();
        let voter = Voter::from_roster_row("E1", &rows[0]);
        assert_eq!(voter.election_id, "E1");
        assert_eq!(voter.voter_id, rows[0].id());
        assert_eq!(voter.name, "Ada");
        assert_eq!(voter.email, "ada@x.com");
        assert_eq!(voter.face_image_url, "");
        assert!(!voter.has_voted);
        assert_eq!(voter.verification_status, VerificationStatus::Pending);
        assert!(voter.outstanding_otp().is_none());
    }

    #[test]
    fn unset_otp_fields_are_omitted_from_the_document() {
        let rows = roster::parse("name,email\nAda,ada@x.com\n").unwrap();
        let voter = Voter::from_roster_row("E1", &rows[0]);
        let document = to_document(&voter).unwrap();
        assert!(!document.contains_key("otp"));
        assert!(!document.contains_key("otp_expiry"));
    }

    #[test]
    fn sparse_documents_deserialize_with_defaults() {
        let document = doc! {
            "election_id": "E1",
            "voter_id": "v1",
        };
        let voter: Voter = from_document(document).unwrap();
        assert_eq!(voter.name, "");
        assert!(!voter.has_voted);
        assert_eq!(voter.verification_status, VerificationStatus::Pending);
        assert!(voter.outstanding_otp().is_none());
    }

    #[test]
    fn stored_otp_round_trips() {
        let expire_at = "2024-03-01T12:10:00Z".parse::<DateTime<Utc>>().unwrap();
        let document = doc! {
            "election_id": "E1",
            "voter_id": "v1",
            "otp": "042917",
            "otp_expiry": expire_at.to_rfc3339(),
        };
        let voter: Voter = from_document(document).unwrap();
        let otp = voter.outstanding_otp().unwrap();
        assert_eq!(otp.code.to_string(), "042917");
        assert_eq!(otp.expire_at, expire_at);
    }

    #[test]
    fn verification_status_derives_verified() {
        assert!(VerificationStatus::Verified.is_verified());
        assert!(!VerificationStatus::Pending.is_verified());
        assert!(!VerificationStatus::Rejected.is_verified());
    }
}
