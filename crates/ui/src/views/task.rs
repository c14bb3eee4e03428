use dioxus::prelude::*;
use dioxus_router::Link;
use prep_core::model::{TaskDetail, TaskId, TaskKind, TrackId};
use services::{MentorService, TaskError};

use crate::context::AppContext;
use crate::routes::Route;
use crate::session::use_session;
use crate::views::{ErrorPanel, LoadingScreen, ViewError, ViewState, view_state_from_resource};
use crate::vm::{ChatLineVm, kind_label, map_chat_lines, markdown_to_html};

fn task_error_message(err: &TaskError) -> String {
    match err {
        TaskError::EmptySubmission => "Write some code or an explanation first.".into(),
        TaskError::NoSession => "Your session has ended. Please log in again.".into(),
        TaskError::Api(api) => api.user_message(),
        _ => "Something went wrong. Please try again.".into(),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Feedback {
    Success(String),
    Info(String),
    Error(String),
}

impl Feedback {
    fn class(&self) -> &'static str {
        match self {
            Feedback::Success(_) => "feedback success",
            Feedback::Info(_) => "feedback",
            Feedback::Error(_) => "feedback error",
        }
    }

    fn text(&self) -> &str {
        match self {
            Feedback::Success(text) | Feedback::Info(text) | Feedback::Error(text) => text,
        }
    }
}

#[component]
pub fn TaskView(track_id: String, task_id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let track = TrackId::new(track_id.clone());
    let task = TaskId::new(task_id);

    let mut resource = use_resource(move || {
        let progress = ctx.progress();
        let track = track.clone();
        let task = task.clone();
        async move {
            progress
                .task(&track, &task)
                .await
                .map_err(ViewError::from)
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page task-page",
            Link { class: "back-link", to: Route::TrackDetail { track_id }, "Back to track" }

            match state {
                ViewState::Idle | ViewState::Loading => rsx! { LoadingScreen {} },
                ViewState::Error(error) => rsx! {
                    ErrorPanel { error, on_retry: move |()| resource.restart() }
                },
                ViewState::Ready(detail) => rsx! {
                    TaskWorkspace { detail }
                },
            }
        }
    }
}

#[component]
fn TaskWorkspace(detail: TaskDetail) -> Element {
    let ctx = use_context::<AppContext>();
    let mut session = use_session();

    let starter = detail.starter_code.clone();
    let mut code = use_signal(move || starter);
    let mut explanation = use_signal(String::new);
    let mut output = use_signal(|| None::<String>);
    let mut feedback = use_signal(|| None::<Feedback>);
    let mut hints_shown = use_signal(|| 0_usize);
    let mut running = use_signal(|| false);
    let mut submitting = use_signal(|| false);

    let submit_ctx = ctx.clone();
    let task_id = detail.summary.id.clone();
    let run_task_id = task_id.clone();
    let on_run = move |_| {
        if running() {
            return;
        }
        let tasks = ctx.tasks();
        let task_id = run_task_id.clone();
        let source = code.read().clone();
        running.set(true);
        spawn(async move {
            let text = match tasks.run(Some(&task_id), &source).await {
                Ok(run) => run.display_text().to_string(),
                Err(err) => task_error_message(&err),
            };
            output.set(Some(text));
            running.set(false);
        });
    };

    let on_submit = move |_| {
        if submitting() {
            return;
        }
        let tasks = submit_ctx.tasks();
        let controller = submit_ctx.session();
        let task_id = task_id.clone();
        let source = code.read().clone();
        let note = explanation.read().clone();
        submitting.set(true);
        feedback.set(None);
        spawn(async move {
            let result = tasks.submit(&task_id, &source, Some(note.as_str())).await;
            submitting.set(false);
            match result {
                Ok(report) => {
                    if report.identity.is_some() {
                        session.sync(&controller);
                    }
                    let message = if report.outcome.is_first_completion() {
                        Feedback::Success(format!(
                            "{} +{} points",
                            report.outcome.message, report.outcome.points_earned
                        ))
                    } else {
                        Feedback::Info(report.outcome.message)
                    };
                    feedback.set(Some(message));
                }
                Err(err) => feedback.set(Some(Feedback::Error(task_error_message(&err)))),
            }
        });
    };

    let info = &detail.summary;
    let description_html = markdown_to_html(&detail.description);
    let is_concept = info.kind == TaskKind::Concept;
    let explanation_rows = if is_concept { "8" } else { "3" };
    let revealed: Vec<String> = detail.hints.iter().take(hints_shown()).cloned().collect();
    let more_hints = hints_shown() < detail.hints.len();
    let title = info.title.clone();

    rsx! {
        div { class: "task-layout",
            section { class: "task-main",
                header { class: "page-header",
                    h2 { "{info.title}" }
                    span { class: "chip", "{kind_label(info.kind)}" }
                    if let Some(difficulty) = info.difficulty {
                        span { class: "chip", "{difficulty.label()}" }
                    }
                    span { class: "task-points", "+{info.points} pts" }
                    if info.completed {
                        span { class: "badge", "Completed" }
                    }
                }

                div { class: "markdown", dangerous_inner_html: "{description_html}" }

                if !is_concept {
                    label { class: "field",
                        span { "Your solution" }
                        textarea {
                            class: "code-editor",
                            spellcheck: "false",
                            rows: "14",
                            value: "{code}",
                            oninput: move |evt| code.set(evt.value()),
                        }
                    }
                }
                label { class: "field",
                    span { if is_concept { "Your explanation" } else { "Explain your approach (optional)" } }
                    textarea {
                        rows: explanation_rows,
                        value: "{explanation}",
                        oninput: move |evt| explanation.set(evt.value()),
                    }
                }

                div { class: "task-actions",
                    if !is_concept {
                        button {
                            class: "btn",
                            r#type: "button",
                            disabled: running(),
                            onclick: on_run,
                            if running() { "Running..." } else { "Run" }
                        }
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        disabled: submitting(),
                        onclick: on_submit,
                        if submitting() { "Submitting..." } else { "Submit" }
                    }
                }

                if let Some(text) = output() {
                    pre { class: "console", "{text}" }
                }
                if let Some(message) = feedback() {
                    p { class: "{message.class()}", role: "status", "{message.text()}" }
                }

                if !detail.hints.is_empty() {
                    section { class: "hints",
                        h3 { "Hints" }
                        ol {
                            for hint in revealed {
                                li { "{hint}" }
                            }
                        }
                        if more_hints {
                            button {
                                class: "btn btn-ghost",
                                r#type: "button",
                                onclick: move |_| hints_shown += 1,
                                "Show a hint"
                            }
                        }
                    }
                }

                if info.completed {
                    if let Some(walkthrough) = detail.solution_explanation.as_deref() {
                        details { class: "solution",
                            summary { "Solution walkthrough" }
                            p { "{walkthrough}" }
                        }
                    }
                }
            }

            MentorPanel { title }
        }
    }
}

fn chat_line_class(line: &ChatLineVm) -> &'static str {
    if line.from_user {
        "chat-line user"
    } else {
        "chat-line mentor"
    }
}

/// Chat with the AI mentor about the open task.
#[component]
fn MentorPanel(title: String) -> Element {
    let ctx = use_context::<AppContext>();
    let mentor = ctx.mentor();
    let start_title = title.clone();
    let mut transcript = use_signal(move || mentor.start(&start_title));
    let mut input = use_signal(String::new);
    let mut waiting = use_signal(|| false);

    let on_send = move |evt: FormEvent| {
        evt.prevent_default();
        if waiting() {
            return;
        }
        let mentor = ctx.mentor();
        let text = input.read().clone();
        let Some(message) = mentor.begin_message(&mut transcript.write(), &text) else {
            return;
        };
        input.set(String::new());
        waiting.set(true);
        let context = MentorService::context_for(&title);
        spawn(async move {
            let reply = mentor.reply(&message, Some(&context)).await;
            mentor.finish_message(&mut transcript.write(), reply);
            waiting.set(false);
        });
    };

    let lines: Vec<ChatLineVm> = map_chat_lines(&transcript.read());

    rsx! {
        aside { class: "mentor",
            h3 { "Ask your mentor" }
            div { class: "chat-log",
                for (index, line) in lines.into_iter().enumerate() {
                    div {
                        key: "{index}",
                        class: "{chat_line_class(&line)}",
                        div { class: "chat-text", dangerous_inner_html: "{line.html}" }
                        span { class: "chat-time", "{line.time}" }
                    }
                }
                if waiting() {
                    div { class: "chat-line mentor typing", "Thinking..." }
                }
            }
            form { class: "chat-form", onsubmit: on_send,
                input {
                    r#type: "text",
                    placeholder: "Ask about this task",
                    value: "{input}",
                    oninput: move |evt| input.set(evt.value()),
                }
                button { class: "btn", r#type: "submit", disabled: waiting(), "Send" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_submission_prompts_for_content() {
        assert_eq!(
            task_error_message(&TaskError::EmptySubmission),
            "Write some code or an explanation first."
        );
    }

    #[test]
    fn feedback_classes() {
        assert_eq!(Feedback::Success("ok".into()).class(), "feedback success");
        assert_eq!(Feedback::Error("no".into()).text(), "no");
    }
}
