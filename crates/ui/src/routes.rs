use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, use_navigator};

use services::Session;

use crate::views::{
    AdminView, AssessmentView, DietView, FollowUpView, LoginView, ProfileView, ResultsView,
    ScheduleView,
};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", LoginView)] Login {},
        #[route("/assessment", AssessmentView)] Assessment {},
        #[route("/results", ResultsView)] Results {},
        #[route("/diet", DietView)] Diet {},
        #[route("/schedule", ScheduleView)] Schedule {},
        #[route("/follow-up", FollowUpView)] FollowUp {},
        #[route("/profile", ProfileView)] Profile {},
        #[route("/admin", AdminView)] Admin {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    let session = use_context::<Signal<Option<Session>>>();

    rsx! {
        nav { class: "sidebar",
            h1 { "AyurVeda" }
            match session() {
                None => rsx! {
                    ul {
                        li { Link { to: Route::Login {}, "Sign in" } }
                    }
                },
                Some(Session::User(user)) => rsx! {
                    p { class: "sidebar-user", "{user.name()}" }
                    ul {
                        li { Link { to: Route::Assessment {}, "Assessment" } }
                        li { Link { to: Route::Results {}, "My Results" } }
                        li { Link { to: Route::Diet {}, "Diet Plan" } }
                        li { Link { to: Route::Schedule {}, "Daily Schedule" } }
                        li { Link { to: Route::FollowUp {}, "Follow-up" } }
                        li { Link { to: Route::Profile {}, "Profile" } }
                    }
                    SignOutButton {}
                },
                Some(Session::Admin(admin)) => rsx! {
                    p { class: "sidebar-user", "{admin.name()}" }
                    ul {
                        li { Link { to: Route::Admin {}, "Dashboard" } }
                    }
                    SignOutButton {}
                },
            }
        }
    }
}

#[component]
fn SignOutButton() -> Element {
    let mut session = use_context::<Signal<Option<Session>>>();
    let nav = use_navigator();

    rsx! {
        button {
            class: "sidebar-signout",
            r#type: "button",
            onclick: move |_| {
                session.set(None);
                nav.push(Route::Login {});
            },
            "Sign out"
        }
    }
}
