use serde::{Deserialize, Serialize};

use crate::model::{Role, Streak};

/// Raw per-category counts behind the readiness score.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessBreakdown {
    #[serde(default)]
    pub dsa: u32,
    #[serde(default)]
    pub analytics: u32,
    #[serde(default)]
    pub datascience: u32,
    #[serde(default)]
    pub ml: u32,
}

/// Aggregate interview-preparedness summary computed by the remote service.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReadinessSnapshot {
    pub role: Option<Role>,
    pub overall_readiness: u8,
    pub skill_score: u8,
    pub consistency_score: u8,
    pub points: u32,
    pub streak: Streak,
    pub breakdown: ReadinessBreakdown,
    pub recommendations: Vec<String>,
}
