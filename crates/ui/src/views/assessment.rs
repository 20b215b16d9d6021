use dioxus::prelude::*;
use dioxus_router::use_navigator;

use services::{AssessmentFlow, Session};

use crate::context::AppContext;
use crate::routes::Route;

#[component]
pub fn AssessmentView() -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_context::<Signal<Option<Session>>>();
    let mut flow = use_signal(AssessmentFlow::builtin);
    let mut error = use_signal(|| Option::<String>::None);
    let nav = use_navigator();

    let Some(Session::User(user)) = session() else {
        return rsx! {
            div { class: "page",
                p { "Please sign in to take the assessment." }
            }
        };
    };
    let user_id = user.id();

    let flow_value = flow();
    let total = flow_value.bank().len();
    let answered = flow_value.answered();

    let submit = move |_| {
        let assessments = ctx.assessments();
        let current = flow();
        spawn(async move {
            if current.finish().is_err() {
                error.set(Some("Please answer every question first.".into()));
                return;
            }
            match assessments.complete(user_id, current.answers()).await {
                Ok(_) => {
                    nav.push(Route::Results {});
                }
                Err(_) => error.set(Some("Could not save your result.".into())),
            }
        });
    };

    rsx! {
        div { class: "page assessment-page",
            h2 { "Dosha Assessment" }
            p { class: "assessment-progress", "{answered} of {total} answered" }
            progress { max: "{total}", value: "{answered}" }

            if let Some(message) = error() {
                p { class: "form-error", "{message}" }
            }

            match flow_value.current_question() {
                Some(question) => {
                    let selected = flow_value.current_answer();
                    let prompt = question.prompt().to_string();
                    let choices: Vec<String> = question
                        .choices()
                        .iter()
                        .map(|c| c.text().to_string())
                        .collect();
                    rsx! {
                        div { class: "question-card",
                            h3 { "{prompt}" }
                            for (index, text) in choices.into_iter().enumerate() {
                                button {
                                    class: if selected == Some(index) { "choice choice--selected" } else { "choice" },
                                    r#type: "button",
                                    onclick: move |_| {
                                        let mut next = flow();
                                        if next.select(index).is_ok() {
                                            next.next();
                                        }
                                        flow.set(next);
                                    },
                                    "{text}"
                                }
                            }
                        }
                        div { class: "assessment-nav",
                            button {
                                r#type: "button",
                                disabled: flow_value.position() == 0,
                                onclick: move |_| {
                                    let mut next = flow();
                                    next.previous();
                                    flow.set(next);
                                },
                                "Back"
                            }
                        }
                    }
                }
                None => rsx! {
                    div { class: "question-card",
                        h3 { "All questions answered" }
                        p { "Submit to see your dosha profile." }
                        div { class: "assessment-nav",
                            button {
                                r#type: "button",
                                onclick: move |_| {
                                    let mut next = flow();
                                    next.previous();
                                    flow.set(next);
                                },
                                "Back"
                            }
                            button { class: "primary", r#type: "button", onclick: submit, "See my results" }
                        }
                    }
                },
            }
        }
    }
}
