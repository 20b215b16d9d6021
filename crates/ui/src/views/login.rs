use std::str::FromStr;
use std::sync::Arc;

use dioxus::prelude::*;
use dioxus_router::use_navigator;

use prakriti_core::model::{Gender, Registration};
use services::{AccountError, AccountService, Session};

use crate::context::AppContext;
use crate::routes::Route;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    SignIn,
    Register,
}

#[derive(Clone, Debug, PartialEq, Default)]
struct RegisterForm {
    name: String,
    email: String,
    credential: String,
    age: String,
    gender: String,
    occupation: String,
    location: String,
}

impl RegisterForm {
    fn to_registration(&self) -> Result<Registration, &'static str> {
        let age = self
            .age
            .trim()
            .parse::<u32>()
            .map_err(|_| "Age must be a number between 1 and 120.")?;
        let gender =
            Gender::from_str(&self.gender).map_err(|_| "Please choose a gender option.")?;
        Ok(Registration {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            credential: self.credential.clone(),
            age,
            gender,
            occupation: self.occupation.trim().to_string(),
            location: self.location.trim().to_string(),
        })
    }
}

fn landing_route(session: &Session) -> Route {
    match session {
        Session::User(_) => Route::Assessment {},
        Session::Admin(_) => Route::Admin {},
    }
}

fn sign_in_error_message(err: &AccountError) -> String {
    match err {
        AccountError::InvalidCredentials => "Invalid email or password.".into(),
        _ => "Sign-in failed. Please try again.".into(),
    }
}

fn register_error_message(err: &AccountError) -> String {
    match err {
        AccountError::EmailTaken => "An account with this email already exists.".into(),
        AccountError::Invalid(inner) => inner.to_string(),
        _ => "Registration failed. Please try again.".into(),
    }
}

#[component]
pub fn LoginView() -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_context::<Signal<Option<Session>>>();
    let mut mode = use_signal(|| Mode::SignIn);
    let error = use_signal(|| Option::<String>::None);

    rsx! {
        div { class: "page auth-page",
            h2 { "AyurVeda Wellness" }
            p { class: "auth-tagline", "Discover your dosha and your path to balance." }

            div { class: "auth-tabs",
                button {
                    class: if mode() == Mode::SignIn { "auth-tab auth-tab--active" } else { "auth-tab" },
                    r#type: "button",
                    onclick: move |_| mode.set(Mode::SignIn),
                    "Sign in"
                }
                button {
                    class: if mode() == Mode::Register { "auth-tab auth-tab--active" } else { "auth-tab" },
                    r#type: "button",
                    onclick: move |_| mode.set(Mode::Register),
                    "Register"
                }
            }

            if let Some(message) = error() {
                p { class: "form-error", "{message}" }
            }

            match mode() {
                Mode::SignIn => rsx! {
                    SignInForm { accounts: ctx.accounts(), session, error }
                },
                Mode::Register => rsx! {
                    RegisterFormView { accounts: ctx.accounts(), session, error }
                },
            }
        }
    }
}

#[derive(Props, Clone)]
struct AuthFormProps {
    accounts: Arc<AccountService>,
    session: Signal<Option<Session>>,
    error: Signal<Option<String>>,
}

impl PartialEq for AuthFormProps {
    fn eq(&self, other: &Self) -> bool {
        self.session == other.session && self.error == other.error
    }
}

#[component]
fn SignInForm(props: AuthFormProps) -> Element {
    let mut email = use_signal(String::new);
    let mut credential = use_signal(String::new);
    let nav = use_navigator();

    let submit = move |_| {
        let accounts = props.accounts.clone();
        let mut session = props.session;
        let mut error = props.error;
        let email = email();
        let credential = credential();
        spawn(async move {
            match accounts.authenticate(email.trim(), &credential).await {
                Ok(signed_in) => {
                    let route = landing_route(&signed_in);
                    error.set(None);
                    session.set(Some(signed_in));
                    nav.push(route);
                }
                Err(err) => error.set(Some(sign_in_error_message(&err))),
            }
        });
    };

    rsx! {
        div { class: "auth-form",
            label { "Email"
                input {
                    r#type: "email",
                    value: "{email}",
                    oninput: move |evt| email.set(evt.value()),
                }
            }
            label { "Password"
                input {
                    r#type: "password",
                    value: "{credential}",
                    oninput: move |evt| credential.set(evt.value()),
                }
            }
            button { class: "primary", r#type: "button", onclick: submit, "Sign in" }
        }
    }
}

#[component]
fn RegisterFormView(props: AuthFormProps) -> Element {
    let mut form = use_signal(RegisterForm::default);
    let nav = use_navigator();

    let submit = move |_| {
        let accounts = props.accounts.clone();
        let mut session = props.session;
        let mut error = props.error;
        let registration = match form().to_registration() {
            Ok(registration) => registration,
            Err(message) => {
                error.set(Some(message.to_string()));
                return;
            }
        };
        spawn(async move {
            match accounts.register(registration).await {
                Ok(signed_in) => {
                    let route = landing_route(&signed_in);
                    error.set(None);
                    session.set(Some(signed_in));
                    nav.push(route);
                }
                Err(err) => error.set(Some(register_error_message(&err))),
            }
        });
    };

    let form_value = form();

    rsx! {
        div { class: "auth-form",
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
            label { "Email"
                input {
                    r#type: "email",
                    value: "{form_value.email}",
                    oninput: move |evt| {
                        let mut next = form();
                        next.email = evt.value();
                        form.set(next);
                    },
                }
            }
            label { "Password"
                input {
                    r#type: "password",
                    value: "{form_value.credential}",
                    oninput: move |evt| {
                        let mut next = form();
                        next.credential = evt.value();
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
                    option { value: "", "Select..." }
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
            button { class: "primary", r#type: "button", onclick: submit, "Create account" }
        }
    }
}
