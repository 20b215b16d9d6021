use dioxus::prelude::*;
use dioxus_router::Link;

use prakriti_core::catalog::Catalog;
use services::Session;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};

#[component]
pub fn ScheduleView() -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_context::<Signal<Option<Session>>>();

    let Some(Session::User(user)) = session() else {
        return rsx! {
            div { class: "page",
                p { "Please sign in to see your daily schedule." }
            }
        };
    };
    let user_id = user.id();

    let assessments = ctx.assessments();
    let resource = use_resource(move || {
        let assessments = assessments.clone();
        async move {
            assessments
                .stored_result(user_id)
                .await
                .map_err(|_| ViewError::Unknown)
        }
    });
    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page schedule-page",
            h2 { "Daily Schedule" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(None) => rsx! {
                    p { "Complete the assessment to unlock your daily routine." }
                    Link { to: Route::Assessment {}, "Take the assessment" }
                },
                ViewState::Ready(Some(result)) => {
                    let catalog = Catalog::builtin();
                    let schedule = catalog.schedule(result.dominant).clone();
                    rsx! {
                        p { "A routine that balances {result.dominant.display_name()}." }
                        p { class: "schedule-anchor", "Wake up: {schedule.wake_up}" }
                        RoutineSection { title: "Morning", items: schedule.morning }
                        RoutineSection { title: "Afternoon", items: schedule.afternoon }
                        RoutineSection { title: "Evening", items: schedule.evening }
                        p { class: "schedule-anchor", "Bedtime: {schedule.bedtime}" }
                        RoutineSection { title: "Exercise", items: schedule.exercise }
                        RoutineSection { title: "Meditation", items: schedule.meditation }
                    }
                }
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn RoutineSection(title: &'static str, items: Vec<String>) -> Element {
    rsx! {
        section { class: "routine-section",
            h3 { "{title}" }
            ul {
                for item in items {
                    li { "{item}" }
                }
            }
        }
    }
}
