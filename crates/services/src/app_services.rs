use std::sync::Arc;

use prakriti_core::model::QuestionBank;
use storage::repository::{AdminRepository, NewAdminRecord, Storage};

use crate::Clock;
use crate::account_service::AccountService;
use crate::admin_service::AdminService;
use crate::assessment_service::AssessmentService;
use crate::error::AppServicesError;
use crate::export_service::ExportService;
use crate::follow_up_service::FollowUpService;
use crate::settings_service::SettingsService;

/// Default admin sign-in, created on first launch against an empty
/// database.
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@ayurveda.com";
pub const DEFAULT_ADMIN_NAME: &str = "System Administrator";
const DEFAULT_ADMIN_CREDENTIAL: &str = "admin123";

/// Assembles app-facing services over a shared storage backend.
#[derive(Clone)]
pub struct AppServices {
    accounts: Arc<AccountService>,
    assessments: Arc<AssessmentService>,
    follow_ups: Arc<FollowUpService>,
    admin: Arc<AdminService>,
    settings: Arc<SettingsService>,
    export: Arc<ExportService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or default
    /// admin setup fails.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::from_storage(storage, clock).await
    }

    /// Build services over a prepared storage aggregate, seeding the
    /// default admin when none exists.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if default admin setup fails.
    pub async fn from_storage(storage: Storage, clock: Clock) -> Result<Self, AppServicesError> {
        ensure_default_admin(storage.admins.as_ref()).await?;

        let accounts = Arc::new(AccountService::new(
            clock,
            Arc::clone(&storage.users),
            Arc::clone(&storage.admins),
        ));
        let assessments = Arc::new(AssessmentService::new(
            QuestionBank::builtin(),
            Arc::clone(&storage.assessments),
        ));
        let follow_ups = Arc::new(FollowUpService::new(
            clock,
            Arc::clone(&storage.follow_ups),
        ));
        let admin = Arc::new(AdminService::new(
            clock,
            Arc::clone(&storage.users),
            Arc::clone(&storage.assessments),
            Arc::clone(&storage.follow_ups),
        ));
        let settings = Arc::new(SettingsService::new(Arc::clone(&storage.settings)));
        let export = Arc::new(ExportService::new(
            clock,
            Arc::clone(&storage.users),
            Arc::clone(&storage.assessments),
            Arc::clone(&storage.follow_ups),
            Arc::clone(&storage.settings),
        ));

        Ok(Self {
            accounts,
            assessments,
            follow_ups,
            admin,
            settings,
            export,
        })
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

async fn ensure_default_admin(admins: &dyn AdminRepository) -> Result<(), AppServicesError> {
    if admins.count_admins().await? > 0 {
        return Ok(());
    }

    let credential_hash = bcrypt::hash(DEFAULT_ADMIN_CREDENTIAL, bcrypt::DEFAULT_COST)?;
    admins
        .insert_admin(NewAdminRecord {
            email: DEFAULT_ADMIN_EMAIL.into(),
            credential_hash,
            name: DEFAULT_ADMIN_NAME.into(),
        })
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use prakriti_core::time::fixed_clock;
    use storage::repository::InMemoryRepository;

    #[tokio::test]
    async fn first_launch_seeds_the_default_admin_once() {
        let repo = Arc::new(InMemoryRepository::new());
        let storage = Storage {
            users: repo.clone(),
            admins: repo.clone(),
            assessments: repo.clone(),
            follow_ups: repo.clone(),
            settings: repo.clone(),
        };

        let services = AppServices::from_storage(storage.clone(), fixed_clock())
            .await
            .expect("first build");
        assert_eq!(repo.count_admins().await.expect("count"), 1);

        // Rebuilding against the same storage must not add another.
        AppServices::from_storage(storage, fixed_clock())
            .await
            .expect("second build");
        assert_eq!(repo.count_admins().await.expect("count"), 1);

        let session = services
            .accounts()
            .authenticate(DEFAULT_ADMIN_EMAIL, "admin123")
            .await
            .expect("admin sign-in");
        assert!(session.is_admin());
    }
}
