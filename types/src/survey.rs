//! Survey identifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque survey id, assigned by the external survey store.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SurveyId(String);

impl SurveyId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SurveyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SurveyId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SurveyId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
