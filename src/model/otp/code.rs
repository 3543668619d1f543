use std::fmt::Display;
use std::str::FromStr;

use rand::{
    distributions::{Distribution, Uniform},
    rngs::OsRng,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CODE_LENGTH: usize = 6;

/// A one-time-password code: exactly six decimal digits, leading zeros
/// allowed ("000000" is a valid code).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Code {
    digits: [u8; CODE_LENGTH],
}

impl Code {
    /// Generate a random code, each digit drawn uniformly from the OS
    /// entropy source.
    pub fn random() -> Self {
        let digit_dist = Uniform::from(0..=9);
        let mut digits = [0; CODE_LENGTH];
        for digit in &mut digits {
            *digit = digit_dist.sample(&mut OsRng);
        }
        Self { digits }
    }
}

impl Display for Code {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for digit in self.digits {
            write!(formatter, "{digit}")?;
        }
        Ok(())
    }
}

impl FromStr for Code {
    type Err = ParseError;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        let len = string.chars().count();
        if len != CODE_LENGTH {
            return Err(ParseError::InvalidLength(len));
        }
        let mut digits = [0; CODE_LENGTH];
        for (slot, c) in digits.iter_mut().zip(string.chars()) {
            *slot = match c {
                '0'..='9' => c as u8 - b'0',
                _ => return Err(ParseError::InvalidChar(c)),
            };
        }
        Ok(Self { digits })
    }
}

impl TryFrom<String> for Code {
    type Error = ParseError;

    fn try_from(string: String) -> Result<Self, Self::Error> {
        string.parse()
    }
}

impl From<Code> for String {
    fn from(code: Code) -> Self {
        code.to_string()
    }
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("code must contain exactly {CODE_LENGTH} characters, got {0}")]
    InvalidLength(usize),
    #[error("code must contain only digit characters, found '{0}'")]
    InvalidChar(char),
}
