use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Career track chosen by a user. Gates which content is shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "SDE")]
    Sde,
    #[serde(rename = "Data Analyst")]
    DataAnalyst,
    #[serde(rename = "Data Scientist")]
    DataScientist,
    #[serde(rename = "ML Engineer")]
    MlEngineer,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RoleError {
    #[error("unknown role: {0}")]
    Unknown(String),
}

impl Role {
    /// Selectable roles in display order.
    pub const ALL: [Role; 4] = [
        Role::Sde,
        Role::DataAnalyst,
        Role::DataScientist,
        Role::MlEngineer,
    ];

    /// The label used on the wire and in the UI.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Role::Sde => "SDE",
            Role::DataAnalyst => "Data Analyst",
            Role::DataScientist => "Data Scientist",
            Role::MlEngineer => "ML Engineer",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Role::Sde => "Data structures, algorithms and system fundamentals",
            Role::DataAnalyst => "SQL, spreadsheets and business analytics",
            Role::DataScientist => "Statistics, modelling and experimentation",
            Role::MlEngineer => "Model training, deployment and MLOps",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Role::ALL
            .into_iter()
            .find(|role| role.label() == trimmed)
            .ok_or_else(|| RoleError::Unknown(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_label() {
        for role in Role::ALL {
            assert_eq!(role.label().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn rejects_unknown_label() {
        let err = "Astronaut".parse::<Role>().unwrap_err();
        assert_eq!(err, RoleError::Unknown("Astronaut".into()));
    }

    #[test]
    fn label_matching_is_case_sensitive() {
        assert!("sde".parse::<Role>().is_err());
    }
}
