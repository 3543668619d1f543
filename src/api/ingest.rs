use aws_sdk_s3::Client as S3Client;
use rocket::{serde::json::Json, Route, State};

use crate::{
    error::{Error, Result},
    mail::{Mailer, Notice},
    model::{
        api::ingest::{BatchEvent, IngestResponse},
        db::{Candidate, Election, ElectionCounter, Voter},
        mongodb::Coll,
        roster,
    },
};

pub fn routes() -> Vec<Route> {
    routes![ingest_voters, ingest_candidates]
}

/// Ingest uploaded voter rosters.
///
/// Envelopes are fully independent: a malformed envelope is skipped, and a
/// failure while processing one aborts only that envelope's remaining work.
#[post("/ingest/voters", data = "<event>", format = "json")]
async fn ingest_voters(
    event: Json<BatchEvent>,
    voters: Coll<Voter>,
    elections: Coll<Election>,
    uploads: &State<S3Client>,
    mailer: &State<Mailer>,
) -> Json<IngestResponse> {
    for notice in &event.records {
        let Some((bucket, key, election_id)) = notice.parts() else {
            warn!(
                "Missing required fields: bucket={:?}, key={:?}, election_id={:?}",
                notice.bucket, notice.key, notice.election_id
            );
            continue;
        };
        if let Err(err) =
            ingest_voter_roster(&voters, &elections, uploads, mailer, bucket, key, election_id)
                .await
        {
            warn!("Voter ingestion failed for {bucket}/{key} (election {election_id}): {err}");
        }
    }
    Json(IngestResponse::ok())
}

/// Ingest uploaded candidate rosters. Same envelope isolation as voters,
/// without the notification step.
#[post("/ingest/candidates", data = "<event>", format = "json")]
async fn ingest_candidates(
    event: Json<BatchEvent>,
    candidates: Coll<Candidate>,
    elections: Coll<Election>,
    uploads: &State<S3Client>,
) -> Json<IngestResponse> {
    for notice in &event.records {
        let Some((bucket, key, election_id)) = notice.parts() else {
            warn!(
                "Missing required fields: bucket={:?}, key={:?}, election_id={:?}",
                notice.bucket, notice.key, notice.election_id
            );
            continue;
        };
        if let Err(err) =
            ingest_candidate_roster(&candidates, &elections, uploads, bucket, key, election_id)
                .await
        {
            warn!("Candidate ingestion failed for {bucket}/{key} (election {election_id}): {err}");
        }
    }
    Json(IngestResponse::ok())
}

async fn ingest_voter_roster(
    voters: &Coll<Voter>,
    elections: &Coll<Election>,
    uploads: &S3Client,
    mailer: &Mailer,
    bucket: &str,
    key: &str,
    election_id: &str,
) -> Result<()> {
    // The election's display name feeds the registration notice.
    let election_name = Election::find_by_id(elections, election_id)
        .await?
        .map(|election| election.election_name)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "Election".to_string());

    let content = fetch_upload(uploads, bucket, key).await?;
    let rows = roster::parse(&content)?;

    let mut voters_added: i64 = 0;
    let mut emails_sent: i64 = 0;
    for row in &rows {
        let voter = Voter::from_roster_row(election_id, row);
        Voter::put(voters, &voter).await?;
        voters_added += 1;

        if !voter.email.is_empty() {
            let notice = Notice::Registration {
                voter_name: if voter.name.is_empty() {
                    "Voter".to_string()
                } else {
                    voter.name.clone()
                },
                election_name: election_name.clone(),
                voter_id: voter.voter_id.clone(),
                login_url: mailer.login_url().to_string(),
            };
            if mailer.send(&voter.email, &notice).await {
                emails_sent += 1;
            }
        }
    }

    Election::add_to_counter(
        elections,
        election_id,
        ElectionCounter::TotalVoters,
        voters_added,
    )
    .await?;
    info!("Added {voters_added} voters for election {election_id}, sent {emails_sent} emails");
    Ok(())
}

async fn ingest_candidate_roster(
    candidates: &Coll<Candidate>,
    elections: &Coll<Election>,
    uploads: &S3Client,
    bucket: &str,
    key: &str,
    election_id: &str,
) -> Result<()> {
    let content = fetch_upload(uploads, bucket, key).await?;
    let rows = roster::parse(&content)?;

    let mut candidates_added: i64 = 0;
    for row in &rows {
        let candidate = Candidate::from_roster_row(election_id, row);
        candidates.insert_one(&candidate, None).await?;
        candidates_added += 1;
    }

    Election::add_to_counter(
        elections,
        election_id,
        ElectionCounter::TotalCandidates,
        candidates_added,
    )
    .await?;
    info!("Added {candidates_added} candidates for election {election_id}");
    Ok(())
}

/// Fetch an uploaded roster from the object store and decode it as UTF-8.
async fn fetch_upload(uploads: &S3Client, bucket: &str, key: &str) -> Result<String> {
    let object = uploads
        .get_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .map_err(|err| Error::ObjectStore(format!("failed to fetch {bucket}/{key}: {err}")))?;
    let bytes = object
        .body
        .collect()
        .await
        .map_err(|err| Error::ObjectStore(format!("failed to read {bucket}/{key}: {err}")))?
        .into_bytes();
    String::from_utf8(bytes.to_vec())
        .map_err(|err| Error::ObjectStore(format!("{bucket}/{key} is not valid UTF-8: {err}")))
}
