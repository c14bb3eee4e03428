use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Template every resume is saved with.
pub const DEFAULT_RESUME_TEMPLATE: &str = "modern";

/// Company preselected when the builder opens.
pub const DEFAULT_RESUME_COMPANY: &str = "google";

/// Free-text sections of a resume, in the order the builder shows them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeContent {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub github: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub projects: String,
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub education: String,
}

impl ResumeContent {
    fn sections(&self) -> [(&'static str, &str); 10] {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("linkedin", &self.linkedin),
            ("github", &self.github),
            ("summary", &self.summary),
            ("experience", &self.experience),
            ("projects", &self.projects),
            ("skills", &self.skills),
            ("education", &self.education),
        ]
    }

    /// True when every section is empty or whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.sections()
            .iter()
            .all(|(_, value)| value.trim().is_empty())
    }

    /// Names of the sections that are still empty.
    #[must_use]
    pub fn missing_sections(&self) -> Vec<&'static str> {
        self.sections()
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(section, _)| *section)
            .collect()
    }
}

/// Company-specific guidance for tailoring a resume.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResumeTemplate {
    pub key: String,
    pub name: String,
    pub focus: Vec<String>,
    pub tips: Vec<String>,
}

/// A resume the user saved earlier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SavedResume {
    pub id: String,
    pub company: String,
    pub template: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// One hiring trend relevant to the user's role.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JobTrend {
    pub id: String,
    pub title: String,
    pub description: String,
    pub skills: Vec<String>,
}

/// Trends the server picked for the signed-in user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrendDigest {
    /// Role label the trends were chosen for, as the server spells it.
    pub user_role: Option<String>,
    pub trends: Vec<JobTrend>,
}

impl TrendDigest {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trends.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_content_is_blank() {
        let content = ResumeContent {
            summary: "  \n".into(),
            ..ResumeContent::default()
        };
        assert!(content.is_blank());
        assert_eq!(content.missing_sections().len(), 10);
    }

    #[test]
    fn missing_sections_skip_filled_ones() {
        let content = ResumeContent {
            name: "Asha Rao".into(),
            skills: "Rust, SQL".into(),
            ..ResumeContent::default()
        };
        assert!(!content.is_blank());
        let missing = content.missing_sections();
        assert!(!missing.contains(&"name"));
        assert!(!missing.contains(&"skills"));
        assert!(missing.contains(&"projects"));
        assert_eq!(missing.len(), 8);
    }
}
