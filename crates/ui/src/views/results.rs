use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use prakriti_core::catalog::Catalog;
use prakriti_core::model::DoshaResult;
use services::Session;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::map_result_bars;

#[component]
pub fn ResultsView() -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_context::<Signal<Option<Session>>>();
    let nav = use_navigator();

    let Some(Session::User(user)) = session() else {
        return rsx! {
            div { class: "page",
                p { "Please sign in to see your results." }
            }
        };
    };
    let user_id = user.id();

    let assessments = ctx.assessments();
    let mut resource = use_resource(move || {
        let assessments = assessments.clone();
        async move {
            assessments
                .stored_result(user_id)
                .await
                .map_err(|_| ViewError::Unknown)
        }
    });

    let state = view_state_from_resource(resource);

    let retake = move |_| {
        let assessments = ctx.assessments();
        spawn(async move {
            if assessments.reset(user_id).await.is_ok() {
                resource.restart();
                nav.push(Route::Assessment {});
            }
        });
    };

    rsx! {
        div { class: "page results-page",
            h2 { "Your Dosha Profile" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(None) => rsx! {
                    p { "You have not completed the assessment yet." }
                    Link { to: Route::Assessment {}, "Take the assessment" }
                },
                ViewState::Ready(Some(result)) => rsx! {
                    ResultDetail { result }
                    button { r#type: "button", onclick: retake, "Retake assessment" }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn ResultDetail(result: DoshaResult) -> Element {
    let catalog = Catalog::builtin();
    let profile = catalog.profile(result.dominant).clone();
    let bars = map_result_bars(&result);

    rsx! {
        p { class: "dominant-label", "Dominant dosha: {result.dominant.display_name()}" }

        div { class: "dosha-bars",
            for bar in bars {
                div { class: if bar.dominant { "dosha-bar dosha-bar--dominant" } else { "dosha-bar" },
                    span { class: "dosha-bar__label", "{bar.label}" }
                    progress { max: "100", value: "{bar.percent}" }
                    span { class: "dosha-bar__value", "{bar.percent}%" }
                }
            }
        }

        section { class: "profile-section",
            h3 { style: "color: {profile.color}", "{profile.name}" }
            p { "{profile.description}" }
            h4 { "Characteristics" }
            ul {
                for item in profile.characteristics {
                    li { "{item}" }
                }
            }
            h4 { "Recommendations" }
            ul {
                for item in profile.recommendations {
                    li { "{item}" }
                }
            }
        }
    }
}
