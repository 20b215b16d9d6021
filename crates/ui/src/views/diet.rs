use dioxus::prelude::*;
use dioxus_router::Link;

use prakriti_core::catalog::Catalog;
use services::Session;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};

#[component]
pub fn DietView() -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_context::<Signal<Option<Session>>>();

    let Some(Session::User(user)) = session() else {
        return rsx! {
            div { class: "page",
                p { "Please sign in to see your diet plan." }
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
        div { class: "page diet-page",
            h2 { "Diet Plan" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(None) => rsx! {
                    p { "Complete the assessment to unlock your personalized diet plan." }
                    Link { to: Route::Assessment {}, "Take the assessment" }
                },
                ViewState::Ready(Some(result)) => {
                    let catalog = Catalog::builtin();
                    let plan = catalog.diet_plan(result.dominant).clone();
                    rsx! {
                        p { "Tailored for your dominant dosha: {result.dominant.display_name()}" }
                        MealSection { title: "Breakfast", items: plan.breakfast }
                        MealSection { title: "Lunch", items: plan.lunch }
                        MealSection { title: "Dinner", items: plan.dinner }
                        MealSection { title: "Snacks", items: plan.snacks }
                        MealSection { title: "Beverages", items: plan.beverages }
                        MealSection { title: "Helpful spices", items: plan.spices }
                        MealSection { title: "Foods to avoid", items: plan.avoid }
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
fn MealSection(title: &'static str, items: Vec<String>) -> Element {
    rsx! {
        section { class: "meal-section",
            h3 { "{title}" }
            ul {
                for item in items {
                    li { "{item}" }
                }
            }
        }
    }
}
