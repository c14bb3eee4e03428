use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the three level tiers a user progresses through.
///
/// Ordering follows rank, so `Beginner < Intermediate < Advanced`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Beginner, Level::Intermediate, Level::Advanced];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Advanced => "Advanced",
        }
    }

    /// Inclusive lower bound of the band, in points.
    #[must_use]
    pub fn floor(self) -> u32 {
        match self {
            Level::Beginner => 0,
            Level::Intermediate => 100,
            Level::Advanced => 200,
        }
    }

    /// Parse a stored label. Missing or unrecognised labels read as `Beginner`.
    #[must_use]
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(str::trim) {
            Some("Intermediate") => Level::Intermediate,
            Some("Advanced") => Level::Advanced,
            _ => Level::Beginner,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
