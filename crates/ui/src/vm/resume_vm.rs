use prep_core::model::{ResumeTemplate, SavedResume, TrendDigest};

use super::time_fmt::format_date;

/// Skills shown per trend card.
const TREND_SKILLS_SHOWN: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SavedResumeVm {
    pub id: String,
    pub company: String,
    pub template: String,
    pub saved_on: String,
}

/// Saved resumes with company keys resolved to display names.
#[must_use]
pub fn map_saved_resumes(saved: &[SavedResume], templates: &[ResumeTemplate]) -> Vec<SavedResumeVm> {
    saved
        .iter()
        .map(|resume| SavedResumeVm {
            id: resume.id.clone(),
            company: templates
                .iter()
                .find(|template| template.key == resume.company)
                .map_or_else(|| resume.company.clone(), |template| template.name.clone()),
            template: if resume.template.is_empty() {
                "custom".to_string()
            } else {
                resume.template.clone()
            },
            saved_on: resume
                .created_at
                .map_or_else(|| "Unknown date".to_string(), format_date),
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrendCardVm {
    pub id: String,
    pub title: String,
    pub description: String,
    pub skills: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrendsVm {
    pub subtitle: String,
    pub cards: Vec<TrendCardVm>,
}

/// `None` when there is nothing to show.
#[must_use]
pub fn map_trends(digest: &TrendDigest) -> Option<TrendsVm> {
    if digest.is_empty() {
        return None;
    }
    let subtitle = match digest.user_role.as_deref() {
        Some(role) => format!("Trends relevant to your {role} journey"),
        None => "Trends in today's job market".to_string(),
    };
    Some(TrendsVm {
        subtitle,
        cards: digest
            .trends
            .iter()
            .map(|trend| TrendCardVm {
                id: trend.id.clone(),
                title: trend.title.clone(),
                description: trend.description.clone(),
                skills: trend.skills.iter().take(TREND_SKILLS_SHOWN).cloned().collect(),
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use prep_core::model::JobTrend;

    fn google() -> ResumeTemplate {
        ResumeTemplate {
            key: "google".into(),
            name: "Google".into(),
            focus: vec![],
            tips: vec![],
        }
    }

    #[test]
    fn saved_resumes_show_company_names_and_dates() {
        let saved = vec![
            SavedResume {
                id: "r1".into(),
                company: "google".into(),
                template: "modern".into(),
                created_at: Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0).single(),
            },
            SavedResume {
                id: "r2".into(),
                company: "flipkart".into(),
                template: String::new(),
                created_at: None,
            },
        ];
        let rows = map_saved_resumes(&saved, &[google()]);
        assert_eq!(rows[0].company, "Google");
        assert_eq!(rows[0].saved_on, "15 Jan 2025");
        assert_eq!(rows[1].company, "flipkart");
        assert_eq!(rows[1].template, "custom");
        assert_eq!(rows[1].saved_on, "Unknown date");
    }

    #[test]
    fn trends_cap_skills_and_name_the_role() {
        let digest = TrendDigest {
            user_role: Some("SDE".into()),
            trends: vec![JobTrend {
                id: "genai".into(),
                title: "GenAI".into(),
                description: String::new(),
                skills: ["a", "b", "c", "d", "e"].map(String::from).to_vec(),
            }],
        };
        let vm = map_trends(&digest).unwrap();
        assert_eq!(vm.subtitle, "Trends relevant to your SDE journey");
        assert_eq!(vm.cards[0].skills.len(), 4);
    }

    #[test]
    fn no_trends_means_no_panel() {
        assert_eq!(map_trends(&TrendDigest::default()), None);
    }
}
