use rocket::{futures::TryStreamExt, serde::json::Json, Route};

use crate::{
    error::Result,
    model::{
        api::election::{
            CandidateList, CandidateSummary, ElectionList, ElectionSummary, VoterList,
            VoterSummary,
        },
        db::{Candidate, Election, Voter},
        mongodb::Coll,
    },
};

pub fn routes() -> Vec<Route> {
    routes![list_elections, list_voters, list_candidates]
}

/// List every election, with the read-side field defaulting.
#[get("/elections")]
async fn list_elections(elections: Coll<Election>) -> Result<Json<ElectionList>> {
    let records: Vec<Election> = elections.find(None, None).await?.try_collect().await?;
    let summaries: Vec<ElectionSummary> = records.into_iter().map(Into::into).collect();
    Ok(Json(ElectionList::new(summaries)))
}

/// List every voter. The summary type keeps OTP fields out of the response.
#[get("/voters")]
async fn list_voters(voters: Coll<Voter>) -> Result<Json<VoterList>> {
    let records: Vec<Voter> = voters.find(None, None).await?.try_collect().await?;
    let summaries: Vec<VoterSummary> = records.into_iter().map(Into::into).collect();
    Ok(Json(VoterList::new(summaries)))
}

/// List every candidate.
#[get("/candidates")]
async fn list_candidates(candidates: Coll<Candidate>) -> Result<Json<CandidateList>> {
    let records: Vec<Candidate> = candidates.find(None, None).await?.try_collect().await?;
    let summaries: Vec<CandidateSummary> = records.into_iter().map(Into::into).collect();
    Ok(Json(CandidateList::new(summaries)))
}
