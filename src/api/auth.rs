use chrono::Utc;
use rocket::{http::CookieJar, serde::json::Json, Route, State};

use crate::{
    config::Config,
    error::{Error, Result},
    mail::{Mailer, Notice},
    model::{
        api::auth::{AuthToken, LoginRequest, LoginResponse, VerifyRequest},
        db::Voter,
        mongodb::Coll,
        otp::Otp,
    },
};

pub fn routes() -> Vec<Route> {
    routes![initiate_login, verify_login]
}

/// Start a login attempt: check the credential pair and the single-vote
/// gate, then issue and send a fresh OTP.
#[post("/auth/voter/login", data = "<request>", format = "json")]
async fn initiate_login(
    request: Json<LoginRequest>,
    voters: Coll<Voter>,
    config: &State<Config>,
    mailer: &State<Mailer>,
) -> Result<Json<LoginResponse>> {
    // One message for every validation miss, so callers cannot probe which
    // field was rejected.
    let (voter_id, email) = request
        .credentials()
        .ok_or_else(|| Error::BadRequest("Voter ID and email are required".to_string()))?;

    // A miss is identical whether the ID is unknown or the email mismatches.
    let voter = Voter::find_by_credentials(&voters, voter_id, email)
        .await?
        .ok_or_else(|| Error::Unauthorized("Invalid voter credentials".to_string()))?;

    // Authentication must not even begin once the ballot is cast.
    if voter.has_voted {
        return Err(Error::Forbidden(
            "You have already voted in this election".to_string(),
        ));
    }

    let otp = Otp::issue(Utc::now(), config.otp_ttl());
    Voter::store_otp(&voters, &voter.election_id, &voter.voter_id, &otp).await?;

    // Delivery failure invalidates neither the stored code nor the request.
    let notice = Notice::OtpChallenge {
        voter_name: display_name(&voter),
        code: otp.code.to_string(),
        validity_minutes: config.otp_ttl().num_minutes(),
    };
    mailer.send(&voter.email, &notice).await;

    Ok(Json(LoginResponse::otp_sent(&voter)))
}

/// Consume an outstanding OTP. On success the code is cleared (single-use)
/// and the session cookie is issued.
#[post("/auth/voter/verify", data = "<request>", format = "json")]
async fn verify_login(
    request: Json<VerifyRequest>,
    voters: Coll<Voter>,
    config: &State<Config>,
    cookies: &CookieJar<'_>,
) -> Result<Json<LoginResponse>> {
    let (voter_id, code) = request
        .parts()
        .ok_or_else(|| Error::BadRequest("Voter ID and code are required".to_string()))?;

    // One rejection covers unknown voter, no outstanding code, mismatch and
    // expiry alike.
    let rejected = || Error::Unauthorized("Invalid or expired code".to_string());

    let submitted = code.parse().map_err(|_| rejected())?;
    let voter = Voter::find_by_voter_id(&voters, voter_id)
        .await?
        .ok_or_else(rejected)?;
    let outstanding = voter.outstanding_otp().ok_or_else(rejected)?;
    if !outstanding.accepts(submitted, Utc::now()) {
        return Err(rejected());
    }

    // `has_voted` stays untouched here: flipping it belongs to the
    // vote-casting step.
    Voter::clear_otp(&voters, &voter.election_id, &voter.voter_id).await?;
    cookies.add(AuthToken::new(&voter).into_cookie(config));

    Ok(Json(LoginResponse::verified(&voter)))
}

fn display_name(voter: &Voter) -> String {
    if voter.name.is_empty() {
        "Voter".to_string()
    } else {
        voter.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use crate::model::roster;

    use super::*;

    #[test]
    fn unnamed_voters_are_addressed_generically() {
        let rows = roster::parse("name,email\n,ada@x.com\nAda,ada@x.com\n").unwrap();
        let anonymous = Voter::from_roster_row("E1", &rows[0]);
        let named = Voter::from_roster_row("E1", &rows[1]);
        assert_eq!(display_name(&anonymous), "Voter");
        assert_eq!(display_name(&named), "Ada");
    }
}
