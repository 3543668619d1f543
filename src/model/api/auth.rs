use chrono::{serde::ts_seconds, DateTime, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation};
use rocket::{
    http::{Cookie, SameSite},
    time::Duration,
};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::Error;
use crate::model::db::Voter;

pub const AUTH_TOKEN_COOKIE: &str = "auth_token";

/// Login initiation request body. Both fields are required; an empty string
/// counts as absent, and validation never says which one was missing.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub voter_id: Option<String>,
    pub email: Option<String>,
}

impl LoginRequest {
    /// The credential pair, if both parts are present and non-empty.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let voter_id = self.voter_id.as_deref().filter(|v| !v.is_empty())?;
        let email = self.email.as_deref().filter(|e| !e.is_empty())?;
        Some((voter_id, email))
    }
}

/// OTP verification request body.
#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub voter_id: Option<String>,
    pub code: Option<String>,
}

impl VerifyRequest {
    /// The (voter_id, code) pair, if both parts are present and non-empty.
    pub fn parts(&self) -> Option<(&str, &str)> {
        let voter_id = self.voter_id.as_deref().filter(|v| !v.is_empty())?;
        let code = self.code.as_deref().filter(|c| !c.is_empty())?;
        Some((voter_id, code))
    }
}

/// Success envelope for both login steps.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub election_id: String,
    pub voter_id: String,
}

impl LoginResponse {
    /// The 200 body for a successful OTP issuance.
    pub fn otp_sent(voter: &Voter) -> Self {
        Self {
            success: true,
            message: "OTP sent to your email".to_string(),
            election_id: voter.election_id.clone(),
            voter_id: voter.voter_id.clone(),
        }
    }

    /// The 200 body for a successful verification.
    pub fn verified(voter: &Voter) -> Self {
        Self {
            success: true,
            message: "Login successful".to_string(),
            election_id: voter.election_id.clone(),
            voter_id: voter.voter_id.clone(),
        }
    }
}

/// The session credential issued once a voter's OTP is consumed.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken {
    #[serde(rename = "sub")]
    pub voter_id: String,
    #[serde(rename = "eid")]
    pub election_id: String,
}

impl AuthToken {
    pub fn new(voter: &Voter) -> Self {
        Self {
            voter_id: voter.voter_id.clone(),
            election_id: voter.election_id.clone(),
        }
    }

    #[allow(clippy::missing_panics_doc)]
    /// Serialize this token into the session cookie.
    pub fn into_cookie(self, config: &Config) -> Cookie<'static> {
        let claims = Claims {
            token: self,
            expire_at: Utc::now() + config.auth_ttl(),
        };

        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret()),
        )
        .expect("JWT encoding is infallible with default settings");

        Cookie::build(AUTH_TOKEN_COOKIE, token)
            .max_age(Duration::seconds(config.auth_ttl().num_seconds()))
            .http_only(true)
            .same_site(SameSite::Strict)
            .finish()
    }

    /// Deserialize a token from a cookie.
    pub fn from_cookie(cookie: &Cookie<'static>, config: &Config) -> Result<Self, Error> {
        let token = jsonwebtoken::decode(
            cookie.value(),
            &DecodingKey::from_secret(config.jwt_secret()),
            &Validation::default(),
        )
        .map(|claims: TokenData<Claims>| claims.claims.token)?;
        Ok(token)
    }
}

/// Cookie claims: the token itself plus an expiry datetime.
#[derive(Serialize, Deserialize)]
struct Claims {
    #[serde(flatten)]
    token: AuthToken,
    #[serde(rename = "exp", with = "ts_seconds")]
    expire_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use rocket::serde::json::serde_json::{self, json};

    use super::*;

    #[test]
    fn empty_credentials_count_as_absent() {
        let missing: LoginRequest = serde_json::from_value(json!({})).unwrap();
        assert!(missing.credentials().is_none());

        let empty: LoginRequest =
            serde_json::from_value(json!({ "voter_id": "", "email": "ada@x.com" })).unwrap();
        assert!(empty.credentials().is_none());

        let only_id: LoginRequest =
            serde_json::from_value(json!({ "voter_id": "v1" })).unwrap();
        assert!(only_id.credentials().is_none());

        let complete: LoginRequest =
            serde_json::from_value(json!({ "voter_id": "v1", "email": "ada@x.com" })).unwrap();
        assert_eq!(complete.credentials(), Some(("v1", "ada@x.com")));
    }

    #[test]
    fn response_envelope_shape() {
        let voter = example_voter();
        let body = serde_json::to_value(LoginResponse::otp_sent(&voter)).unwrap();
        assert_eq!(
            body,
            json!({
                "success": true,
                "message": "OTP sent to your email",
                "election_id": "E1",
                "voter_id": "v1",
            })
        );
    }

    #[test]
    fn session_cookie_round_trips() {
        let config = Config::example();
        let voter = example_voter();
        let cookie = AuthToken::new(&voter).into_cookie(&config);

        assert_eq!(cookie.name(), AUTH_TOKEN_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));

        let token = AuthToken::from_cookie(&cookie, &config).unwrap();
        assert_eq!(token, AuthToken::new(&voter));
    }

    #[test]
    fn session_cookie_rejects_a_different_secret() {
        let voter = example_voter();
        let cookie = AuthToken::new(&voter).into_cookie(&Config::example());
        let tampered = Cookie::new(AUTH_TOKEN_COOKIE, format!("{}x", cookie.value()));
        assert!(AuthToken::from_cookie(&tampered, &Config::example()).is_err());
    }

    fn example_voter() -> Voter {
        let rows = crate::model::roster::parse("name,email\nAda,ada@x.com\n").unwrap();
        let mut voter = Voter::from_roster_row("E1", &rows[0]);
        voter.voter_id = "v1".to_string();
        voter
    }
}
