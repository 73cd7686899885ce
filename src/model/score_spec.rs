use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// A named score plus the direction in which it prioritizes items.
///
/// `ascending = true` puts the smallest value at rank 1 (lowest energy first);
/// `ascending = false` puts the largest value first (largest error bound first).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreSpec {
    pub name: String,
    pub ascending: bool,
}

impl ScoreSpec {
    pub fn ascending(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ascending: true,
        }
    }

    pub fn descending(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ascending: false,
        }
    }

    pub fn direction_label(&self) -> &'static str {
        if self.ascending { "asc" } else { "desc" }
    }
}

impl fmt::Display for ScoreSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.direction_label())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoreSpecError {
    #[error("score spec '{0}' must look like NAME:asc or NAME:desc")]
    Malformed(String),
    #[error("unknown direction '{direction}' in score spec '{spec}' (use asc|desc)")]
    Direction { spec: String, direction: String },
}

impl FromStr for ScoreSpec {
    type Err = ScoreSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, direction) = s
            .rsplit_once(':')
            .ok_or_else(|| ScoreSpecError::Malformed(s.to_string()))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(ScoreSpecError::Malformed(s.to_string()));
        }
        let ascending = match direction.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" | "low" => true,
            "desc" | "descending" | "high" => false,
            _ => {
                return Err(ScoreSpecError::Direction {
                    spec: s.to_string(),
                    direction: direction.to_string(),
                });
            }
        };
        Ok(Self {
            name: name.to_string(),
            ascending,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/score_spec.rs"]
mod tests;
