use prep_core::model::{ActivityKind, Identity, Level};
use prep_core::progression::{level_bar_fill, points_to_next_level};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelBarVm {
    pub label: &'static str,
    pub range_label: String,
    pub fill: u8,
    pub current: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivityVm {
    pub label: &'static str,
    pub count: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileVm {
    pub name: String,
    pub initials: String,
    pub email: String,
    pub role_label: String,
    pub points: u32,
    pub level_label: &'static str,
    pub next_level_label: Option<String>,
    pub level_bars: Vec<LevelBarVm>,
    pub streak_current: u32,
    pub streak_longest: u32,
    pub weekly: Vec<ActivityVm>,
    pub weekly_total: u32,
}

fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

fn range_label(level: Level) -> String {
    match level {
        Level::Advanced => format!("{}+ pts", level.floor()),
        _ => format!("{}-{} pts", level.floor(), level.floor() + 99),
    }
}

fn activity_label(kind: ActivityKind) -> &'static str {
    match kind {
        ActivityKind::Dsa => "DSA practice",
        ActivityKind::Leetcode => "LeetCode",
        ActivityKind::Github => "GitHub",
        ActivityKind::Linkedin => "LinkedIn",
    }
}

#[must_use]
pub fn map_profile(identity: &Identity) -> ProfileVm {
    let points = identity.points();
    let level = identity.level();
    let to_next = points_to_next_level(points);
    let next_level_label = (to_next > 0).then(|| format!("{to_next} pts to next level"));
    let weekly = identity.weekly_activity();
    let streak = identity.streak();

    ProfileVm {
        name: identity.name().to_string(),
        initials: initials(identity.name()),
        email: identity.email().to_string(),
        role_label: identity
            .role()
            .map_or_else(|| "No role selected".to_string(), |role| role.label().to_string()),
        points,
        level_label: level.label(),
        next_level_label,
        level_bars: Level::ALL
            .into_iter()
            .map(|band| LevelBarVm {
                label: band.label(),
                range_label: range_label(band),
                fill: level_bar_fill(points, band),
                current: band == level,
            })
            .collect(),
        streak_current: streak.current,
        streak_longest: streak.longest,
        weekly: [
            ActivityKind::Dsa,
            ActivityKind::Leetcode,
            ActivityKind::Github,
            ActivityKind::Linkedin,
        ]
        .into_iter()
        .map(|kind| ActivityVm {
            label: activity_label(kind),
            count: weekly.count(kind),
        })
        .collect(),
        weekly_total: weekly.total(),
    }
}
