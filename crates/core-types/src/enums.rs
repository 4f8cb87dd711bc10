use serde::{Deserialize, Serialize};
use std::fmt;

/// The three windows compared by a period analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Previous,
    Current,
    Next,
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Period::Previous => "previous",
            Period::Current => "current",
            Period::Next => "next",
        };
        f.write_str(label)
    }
}
