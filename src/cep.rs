//! Postal code (CEP) validation.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static CEP_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}-[0-9]{3}$").expect("valid CEP pattern"));

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CepError {
    #[error("[error] cep argument not informed")]
    Missing,

    #[error("[error] cep {0} should be in format '12345-678'")]
    InvalidFormat(String),
}

/// A CEP known to match `NNNNN-NNN`. Providers take this type, so
/// nothing reaches the network without passing [`Cep::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cep(String);

impl Cep {
    pub fn parse(input: &str) -> Result<Self, CepError> {
        if CEP_PATTERN.is_match(input) {
            Ok(Self(input.to_string()))
        } else {
            Err(CepError::InvalidFormat(input.to_string()))
        }
    }

    /// Validate an optional CLI argument.
    pub fn from_arg(arg: Option<&str>) -> Result<Self, CepError> {
        match arg {
            Some(input) => Self::parse(input),
            None => Err(CepError::Missing),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
