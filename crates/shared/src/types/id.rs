//! Fetch tokens for correlating data loads with refresh requests.
//!
//! A fresh token is issued per refresh; a response carrying any other token
//! is stale and must be discarded instead of overwriting newer data.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies one data fetch so late responses can be told apart from the
/// most recent request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FetchToken(pub Uuid);

impl FetchToken {
    /// Creates a new random token using UUID v7 (time-ordered).
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates a token from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for FetchToken {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for FetchToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for FetchToken {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_token_uniqueness() {
        assert_ne!(FetchToken::new(), FetchToken::new());
    }

    #[test]
    fn test_token_from_uuid_round_trip() {
        let uuid = Uuid::new_v4();
        let token = FetchToken::from_uuid(uuid);
        assert_eq!(token.into_inner(), uuid);
    }

    #[test]
    fn test_token_display_parses_back() {
        let token = FetchToken::new();
        let parsed = FetchToken::from_str(&token.to_string()).unwrap();
        assert_eq!(parsed, token);
    }
}
