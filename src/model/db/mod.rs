//! The persisted record types and their storage operations.

mod candidate;
mod election;
mod voter;

pub use candidate::Candidate;
pub use election::{Election, ElectionCounter};
pub use voter::{VerificationStatus, Voter};
