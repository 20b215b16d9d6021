use std::sync::Arc;

use services::{
    AccountService, AdminService, AssessmentService, ExportService, FollowUpService,
    SettingsService,
};

/// What the UI needs from the application composition root.
pub trait UiApp: Send + Sync {
    fn accounts(&self) -> Arc<AccountService>;
    fn assessments(&self) -> Arc<AssessmentService>;
    fn follow_ups(&self) -> Arc<FollowUpService>;
    fn admin(&self) -> Arc<AdminService>;
    fn settings(&self) -> Arc<SettingsService>;
    fn export(&self) -> Arc<ExportService>;
}

#[derive(Clone)]
pub struct AppContext {
    accounts: Arc<AccountService>,
    assessments: Arc<AssessmentService>,
    follow_ups: Arc<FollowUpService>,
    admin: Arc<AdminService>,
    settings: Arc<SettingsService>,
    export: Arc<ExportService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            accounts: app.accounts(),
            assessments: app.assessments(),
            follow_ups: app.follow_ups(),
            admin: app.admin(),
            settings: app.settings(),
            export: app.export(),
        }
    }

    #[must_use]
    pub fn accounts(&self) -> Arc<AccountService> {
        Arc::clone(&self.accounts)
    }

    #[must_use]
    pub fn assessments(&self) -> Arc<AssessmentService> {
        Arc::clone(&self.assessments)
    }

    #[must_use]
    pub fn follow_ups(&self) -> Arc<FollowUpService> {
        Arc::clone(&self.follow_ups)
    }

    #[must_use]
    pub fn admin(&self) -> Arc<AdminService> {
        Arc::clone(&self.admin)
    }

    #[must_use]
    pub fn settings(&self) -> Arc<SettingsService> {
        Arc::clone(&self.settings)
    }

    #[must_use]
    pub fn export(&self) -> Arc<ExportService> {
        Arc::clone(&self.export)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
