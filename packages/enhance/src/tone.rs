use crate::EnhanceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Register the rewritten text should take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Formal,
    #[default]
    Friendly,
    Promotional,
}

impl Tone {
    pub const ALL: [Tone; 3] = [Tone::Formal, Tone::Friendly, Tone::Promotional];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Formal => "formal",
            Tone::Friendly => "friendly",
            Tone::Promotional => "promotional",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = EnhanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tone::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EnhanceError::UnknownTone(s.to_string()))
    }
}
