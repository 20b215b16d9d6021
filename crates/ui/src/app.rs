use dioxus::prelude::*;
use dioxus_router::Router;

use services::Session;

use crate::routes::Route;

#[component]
pub fn App() -> Element {
    // Session state lives above the router so every view sees the same
    // signed-in user.
    use_context_provider(|| Signal::new(Option::<Session>::None));

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }

        // Stable OS/window title. Per-route titles are rendered inside the right pane.
        document::Title { "AyurVeda Wellness" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}
