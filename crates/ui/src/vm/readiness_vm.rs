use prep_core::progression::{ANALYTICS_TARGET, DATASCIENCE_TARGET, DSA_TARGET, ML_TARGET};
use services::ReadinessReport;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BreakdownBarVm {
    pub label: &'static str,
    pub count_label: String,
    pub fill: u8,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadinessVm {
    pub role_label: String,
    pub overall: u8,
    pub verdict: &'static str,
    pub skill: u8,
    pub consistency: u8,
    pub points: u32,
    pub streak: u32,
    pub bars: Vec<BreakdownBarVm>,
    pub recommendations: Vec<String>,
}

fn verdict(overall: u8) -> &'static str {
    match overall {
        80.. => "Interview ready",
        50..=79 => "Getting there",
        _ => "Keep building",
    }
}

#[must_use]
pub fn map_readiness(report: &ReadinessReport) -> ReadinessVm {
    let snapshot = &report.snapshot;
    let breakdown = snapshot.breakdown;
    let rows = [
        ("DSA", breakdown.dsa, DSA_TARGET),
        ("Analytics", breakdown.analytics, ANALYTICS_TARGET),
        ("Data Science", breakdown.datascience, DATASCIENCE_TARGET),
        ("Machine Learning", breakdown.ml, ML_TARGET),
    ];

    ReadinessVm {
        role_label: snapshot
            .role
            .map_or_else(|| "No role selected".to_string(), |role| role.label().to_string()),
        overall: snapshot.overall_readiness,
        verdict: verdict(snapshot.overall_readiness),
        skill: snapshot.skill_score,
        consistency: snapshot.consistency_score,
        points: snapshot.points,
        streak: snapshot.streak.current,
        bars: rows
            .into_iter()
            .zip(report.breakdown_fills)
            .map(|((label, count, target), fill)| BreakdownBarVm {
                label,
                count_label: format!("{count}/{target}"),
                fill,
            })
            .collect(),
        recommendations: snapshot.recommendations.clone(),
    }
}
