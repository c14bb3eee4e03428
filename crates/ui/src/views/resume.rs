use dioxus::prelude::*;
use prep_core::model::{DEFAULT_RESUME_COMPANY, ResumeContent};
use services::{ResumeDraft, ResumeError, ResumeWorkspace};

use crate::context::AppContext;
use crate::views::{ErrorPanel, LoadingScreen, ViewError, ViewState, view_state_from_resource};
use crate::vm::{map_saved_resumes, markdown_to_html};

fn resume_error_message(err: &ResumeError) -> String {
    match err {
        ResumeError::EmptyResume => "Fill in at least one section first.".into(),
        ResumeError::NoCompany => "Pick a target company first.".into(),
        ResumeError::NoSession => "Your session has ended. Please log in again.".into(),
        ResumeError::Api(api) => api.user_message(),
        _ => "Something went wrong. Please try again.".into(),
    }
}

/// Editable resume sections, in form order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Section {
    Name,
    Email,
    Phone,
    Linkedin,
    Github,
    Summary,
    Experience,
    Projects,
    Skills,
    Education,
}

impl Section {
    const ALL: [Section; 10] = [
        Section::Name,
        Section::Email,
        Section::Phone,
        Section::Linkedin,
        Section::Github,
        Section::Summary,
        Section::Experience,
        Section::Projects,
        Section::Skills,
        Section::Education,
    ];

    fn label(self) -> &'static str {
        match self {
            Section::Name => "Full Name",
            Section::Email => "Email",
            Section::Phone => "Phone",
            Section::Linkedin => "LinkedIn",
            Section::Github => "GitHub",
            Section::Summary => "Professional Summary",
            Section::Experience => "Experience",
            Section::Projects => "Projects",
            Section::Skills => "Skills",
            Section::Education => "Education",
        }
    }

    fn placeholder(self) -> &'static str {
        match self {
            Section::Name => "John Doe",
            Section::Email => "john@email.com",
            Section::Phone => "+91 98765 43210",
            Section::Linkedin => "linkedin.com/in/johndoe",
            Section::Github => "github.com/johndoe",
            Section::Summary => "2-3 sentences about your background and goals...",
            Section::Experience => "Company, Role, Duration, Key achievements...",
            Section::Projects => "Project name, tech stack, impact...",
            Section::Skills => "Python, JavaScript, SQL, React...",
            Section::Education => "Degree, University, Year, GPA...",
        }
    }

    /// Text-area height; zero means a single-line input.
    fn rows(self) -> u8 {
        match self {
            Section::Summary => 3,
            Section::Experience | Section::Projects => 4,
            Section::Skills | Section::Education => 2,
            _ => 0,
        }
    }

    fn value(self, content: &ResumeContent) -> &str {
        match self {
            Section::Name => &content.name,
            Section::Email => &content.email,
            Section::Phone => &content.phone,
            Section::Linkedin => &content.linkedin,
            Section::Github => &content.github,
            Section::Summary => &content.summary,
            Section::Experience => &content.experience,
            Section::Projects => &content.projects,
            Section::Skills => &content.skills,
            Section::Education => &content.education,
        }
    }

    fn slot(self, content: &mut ResumeContent) -> &mut String {
        match self {
            Section::Name => &mut content.name,
            Section::Email => &mut content.email,
            Section::Phone => &mut content.phone,
            Section::Linkedin => &mut content.linkedin,
            Section::Github => &mut content.github,
            Section::Summary => &mut content.summary,
            Section::Experience => &mut content.experience,
            Section::Projects => &mut content.projects,
            Section::Skills => &mut content.skills,
            Section::Education => &mut content.education,
        }
    }
}

#[component]
pub fn ResumeView() -> Element {
    let ctx = use_context::<AppContext>();

    let mut resource = use_resource(move || {
        let resume = ctx.resume();
        async move { resume.workspace().await.map_err(ViewError::from) }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page resume-page",
            header { class: "page-header",
                h2 { "Resume Builder" }
                p { class: "page-subtitle", "Create ATS-friendly, company-specific resumes" }
            }

            match state {
                ViewState::Idle | ViewState::Loading => rsx! { LoadingScreen {} },
                ViewState::Error(error) => rsx! {
                    ErrorPanel { error, on_retry: move |()| resource.restart() }
                },
                ViewState::Ready(workspace) => rsx! { ResumeBuilder { workspace } },
            }
        }
    }
}

#[component]
fn ResumeBuilder(workspace: ResumeWorkspace) -> Element {
    let ctx = use_context::<AppContext>();

    let initial_company = if workspace.template(DEFAULT_RESUME_COMPANY).is_some() {
        DEFAULT_RESUME_COMPANY.to_string()
    } else {
        workspace
            .templates
            .first()
            .map(|template| template.key.clone())
            .unwrap_or_default()
    };
    let initial_saved = workspace.saved.clone();
    let mut company = use_signal(move || initial_company);
    let mut content = use_signal(ResumeContent::default);
    let mut saved = use_signal(move || initial_saved);
    let mut analysis = use_signal(|| None::<String>);
    let mut notice = use_signal(|| None::<String>);
    let mut error = use_signal(|| None::<String>);
    let mut analyzing = use_signal(|| false);
    let mut saving = use_signal(|| false);

    let save_ctx = ctx.clone();
    let on_analyze = move |_| {
        if analyzing() {
            return;
        }
        let resume = ctx.resume();
        let draft = ResumeDraft::new(company(), content.read().clone());
        analyzing.set(true);
        error.set(None);
        notice.set(None);
        spawn(async move {
            match resume.analyze(&draft).await {
                Ok(text) => {
                    analysis.set(Some(text));
                    notice.set(Some("Analysis complete!".into()));
                }
                Err(err) => error.set(Some(resume_error_message(&err))),
            }
            analyzing.set(false);
        });
    };

    let on_save = move |_| {
        if saving() {
            return;
        }
        let resume = save_ctx.resume();
        let draft = ResumeDraft::new(company(), content.read().clone());
        saving.set(true);
        error.set(None);
        notice.set(None);
        spawn(async move {
            match resume.save(&draft).await {
                Ok(list) => {
                    saved.set(list);
                    notice.set(Some("Resume saved!".into()));
                }
                Err(err) => error.set(Some(resume_error_message(&err))),
            }
            saving.set(false);
        });
    };

    let template = workspace.template(&company.read()).cloned();
    let saved_rows = map_saved_resumes(&saved.read(), &workspace.templates);
    let analysis_html = analysis().map(|text| markdown_to_html(&text));
    let fields: Vec<(Section, String)> = {
        let current = content.read();
        Section::ALL
            .into_iter()
            .map(|section| (section, section.value(&current).to_string()))
            .collect()
    };

    rsx! {
        div { class: "resume-layout",
            section { class: "resume-main",
                div { class: "panel",
                    h3 { "Target Company" }
                    select {
                        class: "company-select",
                        onchange: move |evt| company.set(evt.value()),
                        for choice in workspace.templates.iter() {
                            option {
                                key: "{choice.key}",
                                value: "{choice.key}",
                                selected: choice.key == company(),
                                "{choice.name}"
                            }
                        }
                    }
                    if let Some(template) = template.as_ref() {
                        p { class: "muted", "Focus areas for {template.name}:" }
                        div { class: "chip-row",
                            for focus in template.focus.iter() {
                                span { key: "{focus}", class: "chip", "{focus}" }
                            }
                        }
                    }
                }

                div { class: "panel resume-form",
                    for (section, current) in fields {
                        label { key: "{section.label()}", class: "field",
                            span { "{section.label()}" }
                            if section.rows() == 0 {
                                input {
                                    r#type: "text",
                                    placeholder: section.placeholder(),
                                    value: "{current}",
                                    oninput: move |evt| content.with_mut(|c| *section.slot(c) = evt.value()),
                                }
                            } else {
                                textarea {
                                    rows: "{section.rows()}",
                                    placeholder: section.placeholder(),
                                    value: "{current}",
                                    oninput: move |evt| content.with_mut(|c| *section.slot(c) = evt.value()),
                                }
                            }
                        }
                    }

                    if let Some(message) = error() {
                        p { class: "form-error", role: "alert", "{message}" }
                    }
                    if let Some(message) = notice() {
                        p { class: "feedback success", "{message}" }
                    }

                    div { class: "task-actions",
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            disabled: analyzing(),
                            onclick: on_analyze,
                            if analyzing() { "Analyzing..." } else { "Analyze with AI" }
                        }
                        button {
                            class: "btn",
                            r#type: "button",
                            disabled: saving(),
                            onclick: on_save,
                            if saving() { "Saving..." } else { "Save Resume" }
                        }
                    }
                }
            }

            aside { class: "resume-side",
                if let Some(template) = template.as_ref() {
                    div { class: "panel",
                        h3 { "Tips for {template.name}" }
                        ul { class: "recommendations",
                            for tip in template.tips.iter() {
                                li { key: "{tip}", "{tip}" }
                            }
                        }
                    }
                }

                if let Some(html) = analysis_html {
                    div { class: "panel analysis",
                        h3 { "AI Analysis" }
                        div { class: "markdown", dangerous_inner_html: "{html}" }
                    }
                }

                if !saved_rows.is_empty() {
                    div { class: "panel",
                        h3 { "Saved Resumes" }
                        ul { class: "saved-resumes",
                            for row in saved_rows {
                                li { key: "{row.id}",
                                    div {
                                        p { class: "saved-company", "{row.company}" }
                                        p { class: "muted", "{row.saved_on}" }
                                    }
                                    span { class: "chip", "{row.template}" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_section_reads_and_writes_its_own_field() {
        let mut content = ResumeContent::default();
        for section in Section::ALL {
            *section.slot(&mut content) = section.label().to_string();
        }
        for section in Section::ALL {
            assert_eq!(section.value(&content), section.label());
        }
        assert_eq!(content.education, "Education");
        assert!(content.missing_sections().is_empty());
    }

    #[test]
    fn empty_resume_message_asks_for_content() {
        assert_eq!(
            resume_error_message(&ResumeError::EmptyResume),
            "Fill in at least one section first."
        );
    }
}
