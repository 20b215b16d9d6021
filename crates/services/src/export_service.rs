use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use prakriti_core::model::{
    DoshaResult, FollowUpDraft, Gender, SystemSettings, User, UserId,
};
use serde::{Deserialize, Serialize};
use storage::repository::{
    AssessmentRepository, FollowUpRepository, NewUserRecord, SettingsRepository, StorageError,
    UserRepository,
};

use crate::Clock;
use crate::account_service::LOCKED_CREDENTIAL_HASH;
use crate::admin_service::{AdminService, Statistics};
use crate::error::ExportError;

/// One user in a snapshot. Credentials are deliberately absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedUser {
    pub name: String,
    pub email: String,
    pub age: u32,
    pub gender: Gender,
    pub occupation: String,
    pub location: String,
    pub joined_at: DateTime<Utc>,
    pub result: Option<DoshaResult>,
    #[serde(default)]
    pub follow_ups: Vec<ExportedFollowUp>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedFollowUp {
    pub recorded_at: DateTime<Utc>,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
    #[serde(default)]
    pub concerns: Vec<String>,
    pub energy: u32,
    pub sleep: u32,
    pub digestion: u32,
    #[serde(default)]
    pub notes: String,
}

/// A full data snapshot as written to or read from a JSON file.
///
/// Statistics are informational: written on export for the reader of the
/// file, ignored on import (they are recomputed from the restored data).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSnapshot {
    pub exported_at: DateTime<Utc>,
    pub settings: SystemSettings,
    #[serde(default)]
    pub statistics: Statistics,
    pub users: Vec<ExportedUser>,
}

/// What an import actually brought in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub users: u32,
    pub results: u32,
    pub follow_ups: u32,
}

const LIST_LIMIT: u32 = 1024;

/// Writes and restores whole-database JSON snapshots.
///
/// Import replaces all user data. Imported accounts come back locked,
/// since credentials never leave the database.
#[derive(Clone)]
pub struct ExportService {
    clock: Clock,
    users: Arc<dyn UserRepository>,
    assessments: Arc<dyn AssessmentRepository>,
    follow_ups: Arc<dyn FollowUpRepository>,
    settings: Arc<dyn SettingsRepository>,
    admin: AdminService,
}

impl ExportService {
    #[must_use]
    pub fn new(
        clock: Clock,
        users: Arc<dyn UserRepository>,
        assessments: Arc<dyn AssessmentRepository>,
        follow_ups: Arc<dyn FollowUpRepository>,
        settings: Arc<dyn SettingsRepository>,
    ) -> Self {
        let admin = AdminService::new(
            clock,
            Arc::clone(&users),
            Arc::clone(&assessments),
            Arc::clone(&follow_ups),
        );
        Self {
            clock,
            users,
            assessments,
            follow_ups,
            settings,
            admin,
        }
    }

    /// Collect the current snapshot.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Storage` on repository failures.
    pub async fn snapshot(&self) -> Result<ExportSnapshot, ExportError> {
        let users = self.users.list_users(LIST_LIMIT).await?;
        let settings = self.settings.get_settings().await?.unwrap_or_default();
        let statistics = self.admin.statistics().await?;

        let mut exported = Vec::with_capacity(users.len());
        for user in users {
            let result = self.assessments.get_result(user.id()).await?;
            let follow_ups = self
                .follow_ups
                .list_for_user(user.id())
                .await?
                .into_iter()
                .map(|f| ExportedFollowUp {
                    recorded_at: f.recorded_at(),
                    symptoms: f.symptoms().to_vec(),
                    improvements: f.improvements().to_vec(),
                    concerns: f.concerns().to_vec(),
                    energy: f.energy().value(),
                    sleep: f.sleep().value(),
                    digestion: f.digestion().value(),
                    notes: f.notes().to_owned(),
                })
                .collect();
            exported.push(exported_user(&user, result, follow_ups));
        }

        Ok(ExportSnapshot {
            exported_at: self.clock.now(),
            settings,
            statistics,
            users: exported,
        })
    }

    /// Serialize the current snapshot to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Encode` if serialization fails.
    pub async fn export_json(&self) -> Result<String, ExportError> {
        let snapshot = self.snapshot().await?;
        serde_json::to_string_pretty(&snapshot).map_err(ExportError::Encode)
    }

    /// Replace all user data with the contents of a snapshot.
    ///
    /// Settings are restored too. Every user and follow-up in the snapshot
    /// is checked first; nothing is deleted until the whole payload has
    /// passed.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Decode` for malformed JSON, and a validation
    /// error for a snapshot whose contents are rejected. Either way the
    /// existing data is left untouched.
    pub async fn import_json(&self, payload: &str) -> Result<ImportReport, ExportError> {
        let snapshot: ExportSnapshot =
            serde_json::from_str(payload).map_err(ExportError::Decode)?;
        self.import(snapshot).await
    }

    async fn import(&self, snapshot: ExportSnapshot) -> Result<ImportReport, ExportError> {
        validate_snapshot(&snapshot)?;

        for existing in self.users.list_users(LIST_LIMIT).await? {
            self.users.delete_user(existing.id()).await?;
        }

        let mut report = ImportReport::default();
        for entry in snapshot.users {
            let id = self
                .users
                .insert_new_user(NewUserRecord {
                    name: entry.name,
                    email: entry.email,
                    credential_hash: LOCKED_CREDENTIAL_HASH.into(),
                    age: entry.age,
                    gender: entry.gender,
                    occupation: entry.occupation,
                    location: entry.location,
                    joined_at: entry.joined_at,
                })
                .await?;
            report.users += 1;

            if let Some(result) = entry.result {
                self.assessments.save_result(id, &result).await?;
                report.results += 1;
            }

            for follow_up in entry.follow_ups {
                let validated = draft_from(&follow_up).validate(id, follow_up.recorded_at)?;
                self.follow_ups.append_follow_up(&validated).await?;
                report.follow_ups += 1;
            }
        }

        self.settings.save_settings(&snapshot.settings).await?;
        Ok(report)
    }
}

/// Check every snapshot entry against the domain invariants before any
/// existing record is deleted.
fn validate_snapshot(snapshot: &ExportSnapshot) -> Result<(), ExportError> {
    // The id is not persisted; any placeholder satisfies the constructor.
    let placeholder = UserId::new(0);
    let mut emails = HashSet::new();
    for entry in &snapshot.users {
        User::from_persisted(
            placeholder,
            entry.name.clone(),
            entry.email.clone(),
            entry.age,
            entry.gender,
            entry.occupation.clone(),
            entry.location.clone(),
            entry.joined_at,
        )?;
        if !emails.insert(entry.email.as_str()) {
            return Err(ExportError::Storage(StorageError::Conflict));
        }
        for follow_up in &entry.follow_ups {
            draft_from(follow_up).validate(placeholder, follow_up.recorded_at)?;
        }
    }
    Ok(())
}

fn draft_from(follow_up: &ExportedFollowUp) -> FollowUpDraft {
    FollowUpDraft {
        symptoms: follow_up.symptoms.clone(),
        improvements: follow_up.improvements.clone(),
        concerns: follow_up.concerns.clone(),
        energy: follow_up.energy,
        sleep: follow_up.sleep,
        digestion: follow_up.digestion,
        notes: follow_up.notes.clone(),
    }
}

fn exported_user(
    user: &User,
    result: Option<DoshaResult>,
    follow_ups: Vec<ExportedFollowUp>,
) -> ExportedUser {
    ExportedUser {
        name: user.name().to_owned(),
        email: user.email().to_owned(),
        age: user.age(),
        gender: user.gender(),
        occupation: user.occupation().to_owned(),
        location: user.location().to_owned(),
        joined_at: user.joined_at(),
        result,
        follow_ups,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use prakriti_core::model::Dosha;
    use prakriti_core::time::{fixed_clock, fixed_now};
    use storage::repository::InMemoryRepository;

    fn service(repo: Arc<InMemoryRepository>) -> ExportService {
        ExportService::new(
            fixed_clock(),
            repo.clone(),
            repo.clone(),
            repo.clone(),
            repo,
        )
    }

    async fn seed(repo: &InMemoryRepository) {
        let id = repo
            .insert_new_user(NewUserRecord {
                name: "Asha".into(),
                email: "asha@example.com".into(),
                credential_hash: "hash".into(),
                age: 34,
                gender: Gender::Female,
                occupation: "Teacher".into(),
                location: "Pune".into(),
                joined_at: fixed_now(),
            })
            .await
            .expect("user");
        repo.save_result(
            id,
            &DoshaResult {
                vata: 40,
                pitta: 40,
                kapha: 20,
                dominant: Dosha::Vata,
            },
        )
        .await
        .expect("result");
        let follow_up = FollowUpDraft {
            energy: 5,
            sleep: 6,
            digestion: 7,
            notes: "steady".into(),
            ..FollowUpDraft::default()
        }
        .validate(id, fixed_now())
        .expect("draft");
        repo.append_follow_up(&follow_up).await.expect("follow-up");
    }

    #[tokio::test]
    async fn snapshot_strips_credentials() {
        let repo = Arc::new(InMemoryRepository::new());
        seed(&repo).await;
        let service = service(repo);

        let json = service.export_json().await.expect("export");
        assert!(!json.contains("credential"));
        assert!(!json.contains("hash"));
        assert!(json.contains("asha@example.com"));
    }

    #[tokio::test]
    async fn import_replaces_existing_data_and_locks_accounts() {
        let source = Arc::new(InMemoryRepository::new());
        seed(&source).await;
        let json = service(source).export_json().await.expect("export");

        let target = Arc::new(InMemoryRepository::new());
        let target_service = service(target.clone());
        // Pre-existing user that the import must replace.
        target
            .insert_new_user(NewUserRecord {
                name: "Old".into(),
                email: "old@example.com".into(),
                credential_hash: "hash".into(),
                age: 50,
                gender: Gender::Male,
                occupation: "Clerk".into(),
                location: "Delhi".into(),
                joined_at: fixed_now(),
            })
            .await
            .expect("old user");

        let report = target_service.import_json(&json).await.expect("import");
        assert_eq!(report.users, 1);
        assert_eq!(report.results, 1);
        assert_eq!(report.follow_ups, 1);

        let users = target.list_users(16).await.expect("list");
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].email(), "asha@example.com");

        let restored = target
            .find_by_email("asha@example.com")
            .await
            .expect("find")
            .expect("present");
        assert_eq!(restored.credential_hash, LOCKED_CREDENTIAL_HASH);
    }

    fn snapshot_with_one_user(email: &str, follow_ups: Vec<ExportedFollowUp>) -> ExportSnapshot {
        ExportSnapshot {
            exported_at: fixed_now(),
            settings: SystemSettings::default(),
            statistics: Statistics::default(),
            users: vec![ExportedUser {
                name: "New".into(),
                email: email.into(),
                age: 30,
                gender: Gender::Other,
                occupation: String::new(),
                location: String::new(),
                joined_at: fixed_now(),
                result: None,
                follow_ups,
            }],
        }
    }

    #[tokio::test]
    async fn snapshot_reports_current_statistics() {
        let repo = Arc::new(InMemoryRepository::new());
        seed(&repo).await;
        let service = service(repo);

        let snapshot = service.snapshot().await.expect("snapshot");
        assert_eq!(snapshot.statistics.total_users, 1);
        assert_eq!(snapshot.statistics.completed_assessments, 1);
        assert_eq!(snapshot.statistics.total_follow_ups, 1);
        assert_eq!(snapshot.statistics.dosha_distribution.vata, 1);

        let json = service.export_json().await.expect("export");
        assert!(json.contains("\"statistics\""));
    }

    #[tokio::test]
    async fn rejected_snapshot_leaves_prior_data_in_place() {
        let repo = Arc::new(InMemoryRepository::new());
        seed(&repo).await;
        let service = service(repo.clone());

        // A well-formed payload whose follow-up rating is out of range.
        let bad_rating = snapshot_with_one_user(
            "new@example.com",
            vec![ExportedFollowUp {
                recorded_at: fixed_now(),
                symptoms: vec![],
                improvements: vec![],
                concerns: vec![],
                energy: 99,
                sleep: 5,
                digestion: 5,
                notes: String::new(),
            }],
        );
        let payload = serde_json::to_string(&bad_rating).expect("encode");
        let err = service.import_json(&payload).await.unwrap_err();
        assert!(matches!(err, ExportError::FollowUp(_)));

        // A payload with an implausible user email.
        let bad_email = snapshot_with_one_user("not-an-email", vec![]);
        let payload = serde_json::to_string(&bad_email).expect("encode");
        let err = service.import_json(&payload).await.unwrap_err();
        assert!(matches!(err, ExportError::Invalid(_)));

        let users = repo.list_users(16).await.expect("list");
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].email(), "asha@example.com");
    }

    #[tokio::test]
    async fn duplicate_emails_in_snapshot_are_rejected_up_front() {
        let repo = Arc::new(InMemoryRepository::new());
        seed(&repo).await;
        let service = service(repo.clone());

        let mut snapshot = snapshot_with_one_user("new@example.com", vec![]);
        let duplicate = snapshot.users[0].clone();
        snapshot.users.push(duplicate);
        let payload = serde_json::to_string(&snapshot).expect("encode");

        let err = service.import_json(&payload).await.unwrap_err();
        assert!(matches!(err, ExportError::Storage(StorageError::Conflict)));
        assert_eq!(repo.list_users(16).await.expect("list")[0].email(), "asha@example.com");
    }

    #[tokio::test]
    async fn malformed_payload_leaves_data_untouched() {
        let repo = Arc::new(InMemoryRepository::new());
        seed(&repo).await;
        let service = service(repo.clone());

        let err = service.import_json("{not json").await.unwrap_err();
        assert!(matches!(err, ExportError::Decode(_)));
        assert_eq!(repo.list_users(16).await.expect("list").len(), 1);
    }
}
