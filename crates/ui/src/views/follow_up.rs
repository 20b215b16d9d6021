use dioxus::prelude::*;

use prakriti_core::model::FollowUpDraft;
use services::Session;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::format_datetime;

#[derive(Clone, Debug, PartialEq)]
struct FollowUpForm {
    symptoms: String,
    improvements: String,
    concerns: String,
    energy: u32,
    sleep: u32,
    digestion: u32,
    notes: String,
}

impl Default for FollowUpForm {
    fn default() -> Self {
        Self {
            symptoms: String::new(),
            improvements: String::new(),
            concerns: String::new(),
            energy: 5,
            sleep: 5,
            digestion: 5,
            notes: String::new(),
        }
    }
}

fn split_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect()
}

impl FollowUpForm {
    fn to_draft(&self) -> FollowUpDraft {
        FollowUpDraft {
            symptoms: split_lines(&self.symptoms),
            improvements: split_lines(&self.improvements),
            concerns: split_lines(&self.concerns),
            energy: self.energy,
            sleep: self.sleep,
            digestion: self.digestion,
            notes: self.notes.trim().to_string(),
        }
    }
}

#[component]
pub fn FollowUpView() -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_context::<Signal<Option<Session>>>();
    let mut form = use_signal(FollowUpForm::default);
    let mut status = use_signal(|| Option::<&'static str>::None);

    let Some(Session::User(user)) = session() else {
        return rsx! {
            div { class: "page",
                p { "Please sign in to record a follow-up." }
            }
        };
    };
    let user_id = user.id();

    let follow_ups = ctx.follow_ups();
    let mut history = use_resource(move || {
        let follow_ups = follow_ups.clone();
        async move {
            follow_ups
                .history(user_id)
                .await
                .map_err(|_| ViewError::Unknown)
        }
    });
    let history_state = view_state_from_resource(history);

    let submit = move |_| {
        let follow_ups = ctx.follow_ups();
        let draft = form().to_draft();
        spawn(async move {
            match follow_ups.submit(user_id, draft).await {
                Ok(_) => {
                    form.set(FollowUpForm::default());
                    status.set(Some("Follow-up recorded."));
                    history.restart();
                }
                Err(_) => status.set(Some("Could not record the follow-up.")),
            }
        });
    };

    let form_value = form();

    rsx! {
        div { class: "page follow-up-page",
            h2 { "Progress Follow-up" }

            if let Some(message) = status() {
                p { class: "form-status", "{message}" }
            }

            div { class: "follow-up-form",
                label { "Current symptoms (one per line)"
                    textarea {
                        value: "{form_value.symptoms}",
                        oninput: move |evt| {
                            let mut next = form();
                            next.symptoms = evt.value();
                            form.set(next);
                        },
                    }
                }
                label { "Improvements (one per line)"
                    textarea {
                        value: "{form_value.improvements}",
                        oninput: move |evt| {
                            let mut next = form();
                            next.improvements = evt.value();
                            form.set(next);
                        },
                    }
                }
                label { "Concerns (one per line)"
                    textarea {
                        value: "{form_value.concerns}",
                        oninput: move |evt| {
                            let mut next = form();
                            next.concerns = evt.value();
                            form.set(next);
                        },
                    }
                }
                RatingSlider {
                    label: "Energy",
                    value: form_value.energy,
                    on_change: move |value| {
                        let mut next = form();
                        next.energy = value;
                        form.set(next);
                    },
                }
                RatingSlider {
                    label: "Sleep quality",
                    value: form_value.sleep,
                    on_change: move |value| {
                        let mut next = form();
                        next.sleep = value;
                        form.set(next);
                    },
                }
                RatingSlider {
                    label: "Digestion",
                    value: form_value.digestion,
                    on_change: move |value| {
                        let mut next = form();
                        next.digestion = value;
                        form.set(next);
                    },
                }
                label { "Notes"
                    textarea {
                        value: "{form_value.notes}",
                        oninput: move |evt| {
                            let mut next = form();
                            next.notes = evt.value();
                            form.set(next);
                        },
                    }
                }
                button { class: "primary", r#type: "button", onclick: submit, "Save follow-up" }
            }

            h3 { "Previous check-ins" }
            match history_state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(entries) => rsx! {
                    if entries.is_empty() {
                        p { "No check-ins yet." }
                    } else {
                        ul { class: "follow-up-history",
                            for entry in entries {
                                li {
                                    span { class: "follow-up-date", "{format_datetime(entry.recorded_at())}" }
                                    p {
                                        "Energy: {entry.energy().value()} | Sleep: {entry.sleep().value()} | Digestion: {entry.digestion().value()}"
                                    }
                                    if !entry.notes().is_empty() {
                                        p { class: "follow-up-notes", "{entry.notes()}" }
                                    }
                                }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn RatingSlider(label: &'static str, value: u32, on_change: EventHandler<u32>) -> Element {
    rsx! {
        label { class: "rating-slider",
            "{label}: {value}"
            input {
                r#type: "range",
                min: "1",
                max: "10",
                value: "{value}",
                oninput: move |evt| {
                    if let Ok(parsed) = evt.value().parse::<u32>() {
                        on_change.call(parsed);
                    }
                },
            }
        }
    }
}
