use std::str::FromStr;

use dioxus::prelude::*;

use prakriti_core::model::{Gender, UserUpdate};
use services::Session;

use crate::context::AppContext;
use crate::vm::format_datetime;

#[derive(Clone, Debug, PartialEq, Default)]
struct ProfileForm {
    name: String,
    age: String,
    gender: String,
    occupation: String,
    location: String,
}

impl ProfileForm {
    fn to_update(&self) -> Result<UserUpdate, &'static str> {
        let age = if self.age.trim().is_empty() {
            None
        } else {
            Some(
                self.age
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| "Age must be a number between 1 and 120.")?,
            )
        };
        let gender = if self.gender.is_empty() {
            None
        } else {
            Some(Gender::from_str(&self.gender).map_err(|_| "Unknown gender option.")?)
        };
        Ok(UserUpdate {
            name: non_empty(&self.name),
            age,
            gender,
            occupation: non_empty(&self.occupation),
            location: non_empty(&self.location),
        })
    }
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[component]
pub fn ProfileView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut session = use_context::<Signal<Option<Session>>>();
    let mut form = use_signal(ProfileForm::default);
    let mut status = use_signal(|| Option::<String>::None);
    let mut loaded = use_signal(|| false);

    let Some(Session::User(user)) = session() else {
        return rsx! {
            div { class: "page",
                p { "Please sign in to edit your profile." }
            }
        };
    };
    let user_id = user.id();

    if !loaded() {
        form.set(ProfileForm {
            name: user.name().to_string(),
            age: user.age().to_string(),
            gender: user.gender().as_str().to_string(),
            occupation: user.occupation().to_string(),
            location: user.location().to_string(),
        });
        loaded.set(true);
    }

    let save = move |_| {
        let accounts = ctx.accounts();
        let update = match form().to_update() {
            Ok(update) => update,
            Err(message) => {
                status.set(Some(message.to_string()));
                return;
            }
        };
        spawn(async move {
            match accounts.update_profile(user_id, update).await {
                Ok(updated) => {
                    session.set(Some(Session::User(updated)));
                    status.set(Some("Profile saved.".into()));
                }
                Err(err) => status.set(Some(err.to_string())),
            }
        });
    };

    let form_value = form();

    rsx! {
        div { class: "page profile-page",
            h2 { "My Profile" }
            p { class: "profile-meta", "Email: {user.email()}" }
            p { class: "profile-meta", "Member since: {format_datetime(user.joined_at())}" }

            if let Some(message) = status() {
                p { class: "form-status", "{message}" }
            }

            div { class: "profile-form",
                label { "Full name"
                    input {
                        value: "{form_value.name}",
                        oninput: move |evt| {
                            let mut next = form();
                            next.name = evt.value();
                            form.set(next);
                        },
                    }
                }
                label { "Age"
                    input {
                        r#type: "number",
                        min: "1",
                        max: "120",
                        value: "{form_value.age}",
                        oninput: move |evt| {
                            let mut next = form();
                            next.age = evt.value();
                            form.set(next);
                        },
                    }
                }
                label { "Gender"
                    select {
                        value: "{form_value.gender}",
                        onchange: move |evt| {
                            let mut next = form();
                            next.gender = evt.value();
                            form.set(next);
                        },
                        option { value: "female", "Female" }
                        option { value: "male", "Male" }
                        option { value: "other", "Other" }
                    }
                }
                label { "Occupation"
                    input {
                        value: "{form_value.occupation}",
                        oninput: move |evt| {
                            let mut next = form();
                            next.occupation = evt.value();
                            form.set(next);
                        },
                    }
                }
                label { "Location"
                    input {
                        value: "{form_value.location}",
                        oninput: move |evt| {
                            let mut next = form();
                            next.location = evt.value();
                            form.set(next);
                        },
                    }
                }
                button { class: "primary", r#type: "button", onclick: save, "Save changes" }
            }
        }
    }
}
