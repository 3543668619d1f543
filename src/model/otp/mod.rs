use chrono::{DateTime, Duration, Utc};

pub mod code;

pub use code::Code;

/// An issued one-time password: the code plus the instant it stops being
/// acceptable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Otp {
    pub code: Code,
    pub expire_at: DateTime<Utc>,
}

impl Otp {
    /// Issue a fresh random code valid for `ttl` from `issued_at`.
    ///
    /// The issuance instant is a parameter rather than a read of the system
    /// clock so the expiry arithmetic stays testable.
    pub fn issue(issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            code: Code::random(),
            expire_at: issued_at + ttl,
        }
    }

    /// Whether `submitted` is acceptable at instant `at`: the code must match
    /// and the expiry must not have passed. A single opaque predicate, so
    /// callers cannot distinguish a mismatch from an expired code.
    pub fn accepts(&self, submitted: Code, at: DateTime<Utc>) -> bool {
        self.code == submitted && at <= self.expire_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(code: &str, expire_at: DateTime<Utc>) -> Otp {
        Otp {
            code: code.parse().unwrap(),
            expire_at,
        }
    }

    #[test]
    fn expiry_is_exactly_ttl_after_issuance() {
        let issued_at = "2024-03-01T12:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let otp = Otp::issue(issued_at, Duration::minutes(10));
        assert_eq!(otp.expire_at - issued_at, Duration::minutes(10));
    }

    #[test]
    fn accepts_matching_code_within_window() {
        let issued_at = "2024-03-01T12:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let otp = fixed("042917", issued_at + Duration::minutes(10));
        let submitted = "042917".parse().unwrap();
        assert!(otp.accepts(submitted, issued_at + Duration::minutes(9)));
        // The boundary instant itself is still acceptable.
        assert!(otp.accepts(submitted, otp.expire_at));
    }

    #[test]
    fn rejects_wrong_code() {
        let now = Utc::now();
        let otp = fixed("042917", now + Duration::minutes(10));
        assert!(!otp.accepts("042918".parse().unwrap(), now));
    }

    #[test]
    fn rejects_after_expiry() {
        let issued_at = "2024-03-01T12:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let otp = fixed("042917", issued_at + Duration::minutes(10));
        let late = issued_at + Duration::minutes(10) + Duration::seconds(1);
        assert!(!otp.accepts("042917".parse().unwrap(), late));
    }

    #[test]
    fn reissue_invalidates_stale_code() {
        // Only the most recent OTP is ever stored, so verifying the earlier
        // code against the replacement must fail.
        let now = Utc::now();
        let first = fixed("111111", now + Duration::minutes(10));
        let second = fixed("222222", now + Duration::minutes(10));
        assert!(!second.accepts(first.code, now));
        assert!(second.accepts("222222".parse().unwrap(), now));
    }
}
