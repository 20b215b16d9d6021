use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use prakriti_core::time::fixed_clock;
use services::{
    AccountService, AdminService, AppServices, AssessmentService, ExportService, FollowUpService,
    Session, SettingsService,
};
use storage::repository::Storage;

use crate::context::{UiApp, build_app_context};
use crate::views::{AdminView, DietView, LoginView, ResultsView};

#[derive(Clone)]
struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn accounts(&self) -> Arc<AccountService> {
        self.services.accounts()
    }

    fn assessments(&self) -> Arc<AssessmentService> {
        self.services.assessments()
    }

    fn follow_ups(&self) -> Arc<FollowUpService> {
        self.services.follow_ups()
    }

    fn admin(&self) -> Arc<AdminService> {
        self.services.admin()
    }

    fn settings(&self) -> Arc<SettingsService> {
        self.services.settings()
    }

    fn export(&self) -> Arc<ExportService> {
        self.services.export()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Login,
    Results,
    Diet,
    Admin,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    session: Option<Session>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    let session = props.session.clone();
    use_context_provider(|| Signal::new(session));
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Login => rsx! { LoginView {} },
        ViewKind::Results => rsx! { ResultsView {} },
        ViewKind::Diet => rsx! { DietView {} },
        ViewKind::Admin => rsx! { AdminView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
    pub services: AppServices,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub async fn setup_view_harness(view: ViewKind, session: Option<Session>) -> ViewHarness {
    let storage = Storage::in_memory();
    let services = AppServices::from_storage(storage.clone(), fixed_clock())
        .await
        .expect("build services");

    let app = Arc::new(TestApp {
        services: services.clone(),
    });

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps { app, view, session },
    );

    ViewHarness {
        dom,
        storage,
        services,
    }
}
