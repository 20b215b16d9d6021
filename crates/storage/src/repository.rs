use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use prakriti_core::model::{
    AdminAccount, AdminId, Dosha, DoshaResult, FollowUp, FollowUpId, Gender, SystemSettings, User,
    UserId, UserUpdate,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Insert shape for a new user. The credential arrives already hashed;
/// storage never sees plaintext.
#[derive(Debug, Clone)]
pub struct NewUserRecord {
    pub name: String,
    pub email: String,
    pub credential_hash: String,
    pub age: u32,
    pub gender: Gender,
    pub occupation: String,
    pub location: String,
    pub joined_at: DateTime<Utc>,
}

/// A user together with the stored credential hash, for authentication.
#[derive(Debug, Clone)]
pub struct CredentialedUser {
    pub user: User,
    pub credential_hash: String,
}

/// Insert shape for a new admin account.
#[derive(Debug, Clone)]
pub struct NewAdminRecord {
    pub email: String,
    pub credential_hash: String,
    pub name: String,
}

/// An admin together with the stored credential hash.
#[derive(Debug, Clone)]
pub struct CredentialedAdmin {
    pub admin: AdminAccount,
    pub credential_hash: String,
}

/// Per-dosha counts of stored dominant results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoshaCounts {
    pub vata: u32,
    pub pitta: u32,
    pub kapha: u32,
}

impl DoshaCounts {
    pub fn bump(&mut self, dosha: Dosha) {
        match dosha {
            Dosha::Vata => self.vata += 1,
            Dosha::Pitta => self.pitta += 1,
            Dosha::Kapha => self.kapha += 1,
        }
    }
}

/// Repository contract for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user and return its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` when the email is already taken,
    /// or other storage errors.
    async fn insert_new_user(&self, record: NewUserRecord) -> Result<UserId, StorageError>;

    /// Fetch a user by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures; `Ok(None)` when missing.
    async fn get_user(&self, id: UserId) -> Result<Option<User>, StorageError>;

    /// Fetch a user plus credential hash by email, for login.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn find_by_email(&self, email: &str) -> Result<Option<CredentialedUser>, StorageError>;

    /// Apply a partial update and return the updated user.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the user does not exist, or
    /// `StorageError::Serialization` if the update fails validation.
    async fn update_user(&self, id: UserId, update: &UserUpdate) -> Result<User, StorageError>;

    /// List users in id order up to `limit`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn list_users(&self, limit: u32) -> Result<Vec<User>, StorageError>;

    /// Remove a user together with their assessment result and follow-ups.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the user does not exist.
    async fn delete_user(&self, id: UserId) -> Result<(), StorageError>;
}

/// Repository contract for administrative accounts.
#[async_trait]
pub trait AdminRepository: Send + Sync {
    /// Insert a new admin and return its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` when the email is already taken.
    async fn insert_admin(&self, record: NewAdminRecord) -> Result<AdminId, StorageError>;

    /// Fetch an admin plus credential hash by email, for login.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn find_admin_by_email(
        &self,
        email: &str,
    ) -> Result<Option<CredentialedAdmin>, StorageError>;

    /// Number of admin accounts in the store.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn count_admins(&self) -> Result<u64, StorageError>;
}

/// Repository contract for per-user assessment results.
///
/// One result record per user: saving replaces any previous result.
#[async_trait]
pub trait AssessmentRepository: Send + Sync {
    /// Persist the result for a user, replacing any earlier one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn save_result(&self, user_id: UserId, result: &DoshaResult)
        -> Result<(), StorageError>;

    /// Fetch the stored result for a user.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures; `Ok(None)` when missing.
    async fn get_result(&self, user_id: UserId) -> Result<Option<DoshaResult>, StorageError>;

    /// Remove the stored result for a user. Removing a missing result is
    /// not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn delete_result(&self, user_id: UserId) -> Result<(), StorageError>;

    /// Number of stored results.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn count_results(&self) -> Result<u64, StorageError>;

    /// Counts of stored results grouped by dominant dosha.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn dominant_counts(&self) -> Result<DoshaCounts, StorageError>;
}

/// Repository contract for follow-up records.
#[async_trait]
pub trait FollowUpRepository: Send + Sync {
    /// Append a follow-up (its id field is ignored) and return the
    /// assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn append_follow_up(&self, follow_up: &FollowUp) -> Result<FollowUpId, StorageError>;

    /// Follow-ups for one user, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<FollowUp>, StorageError>;

    /// All follow-ups, newest first, up to `limit`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn list_all(&self, limit: u32) -> Result<Vec<FollowUp>, StorageError>;

    /// Remove one follow-up.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if it does not exist.
    async fn delete_follow_up(&self, id: FollowUpId) -> Result<(), StorageError>;

    /// Number of follow-ups submitted by one user.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn count_for_user(&self, user_id: UserId) -> Result<u64, StorageError>;
}

/// Repository contract for site-wide settings (single record).
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Fetch persisted settings, if any were ever saved.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn get_settings(&self) -> Result<Option<SystemSettings>, StorageError>;

    /// Persist settings, replacing the previous record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn save_settings(&self, settings: &SystemSettings) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    users: Arc<Mutex<HashMap<UserId, CredentialedUser>>>,
    admins: Arc<Mutex<HashMap<AdminId, CredentialedAdmin>>>,
    results: Arc<Mutex<HashMap<UserId, DoshaResult>>>,
    follow_ups: Arc<Mutex<HashMap<FollowUpId, FollowUp>>>,
    settings: Arc<Mutex<Option<SystemSettings>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_err<E: std::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn insert_new_user(&self, record: NewUserRecord) -> Result<UserId, StorageError> {
        let mut guard = self.users.lock().map_err(lock_err)?;
        if guard
            .values()
            .any(|stored| stored.user.email() == record.email)
        {
            return Err(StorageError::Conflict);
        }
        let next = guard.keys().map(|id| id.value()).max().unwrap_or(0) + 1;
        let id = UserId::new(next);
        let user = User::from_persisted(
            id,
            record.name,
            record.email,
            record.age,
            record.gender,
            record.occupation,
            record.location,
            record.joined_at,
        )
        .map_err(|e| StorageError::Serialization(e.to_string()))?;
        guard.insert(
            id,
            CredentialedUser {
                user,
                credential_hash: record.credential_hash,
            },
        );
        Ok(id)
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, StorageError> {
        let guard = self.users.lock().map_err(lock_err)?;
        Ok(guard.get(&id).map(|stored| stored.user.clone()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<CredentialedUser>, StorageError> {
        let guard = self.users.lock().map_err(lock_err)?;
        Ok(guard
            .values()
            .find(|stored| stored.user.email() == email)
            .cloned())
    }

    async fn update_user(&self, id: UserId, update: &UserUpdate) -> Result<User, StorageError> {
        let mut guard = self.users.lock().map_err(lock_err)?;
        let stored = guard.get_mut(&id).ok_or(StorageError::NotFound)?;
        let mut user = stored.user.clone();
        user.apply_update(update)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        stored.user = user.clone();
        Ok(user)
    }

    async fn list_users(&self, limit: u32) -> Result<Vec<User>, StorageError> {
        let guard = self.users.lock().map_err(lock_err)?;
        let mut users: Vec<User> = guard.values().map(|stored| stored.user.clone()).collect();
        users.sort_by_key(User::id);
        users.truncate(limit as usize);
        Ok(users)
    }

    async fn delete_user(&self, id: UserId) -> Result<(), StorageError> {
        let mut guard = self.users.lock().map_err(lock_err)?;
        if guard.remove(&id).is_none() {
            return Err(StorageError::NotFound);
        }
        drop(guard);

        // Cascade: drop the result and any follow-ups owned by the user.
        self.results.lock().map_err(lock_err)?.remove(&id);
        self.follow_ups
            .lock()
            .map_err(lock_err)?
            .retain(|_, f| f.user_id() != id);
        Ok(())
    }
}

#[async_trait]
impl AdminRepository for InMemoryRepository {
    async fn insert_admin(&self, record: NewAdminRecord) -> Result<AdminId, StorageError> {
        let mut guard = self.admins.lock().map_err(lock_err)?;
        if guard
            .values()
            .any(|stored| stored.admin.email() == record.email)
        {
            return Err(StorageError::Conflict);
        }
        let next = guard.keys().map(|id| id.value()).max().unwrap_or(0) + 1;
        let id = AdminId::new(next);
        guard.insert(
            id,
            CredentialedAdmin {
                admin: AdminAccount::new(id, record.email, record.name),
                credential_hash: record.credential_hash,
            },
        );
        Ok(id)
    }

    async fn find_admin_by_email(
        &self,
        email: &str,
    ) -> Result<Option<CredentialedAdmin>, StorageError> {
        let guard = self.admins.lock().map_err(lock_err)?;
        Ok(guard
            .values()
            .find(|stored| stored.admin.email() == email)
            .cloned())
    }

    async fn count_admins(&self) -> Result<u64, StorageError> {
        let guard = self.admins.lock().map_err(lock_err)?;
        Ok(guard.len() as u64)
    }
}

#[async_trait]
impl AssessmentRepository for InMemoryRepository {
    async fn save_result(
        &self,
        user_id: UserId,
        result: &DoshaResult,
    ) -> Result<(), StorageError> {
        let mut guard = self.results.lock().map_err(lock_err)?;
        guard.insert(user_id, *result);
        Ok(())
    }

    async fn get_result(&self, user_id: UserId) -> Result<Option<DoshaResult>, StorageError> {
        let guard = self.results.lock().map_err(lock_err)?;
        Ok(guard.get(&user_id).copied())
    }

    async fn delete_result(&self, user_id: UserId) -> Result<(), StorageError> {
        let mut guard = self.results.lock().map_err(lock_err)?;
        guard.remove(&user_id);
        Ok(())
    }

    async fn count_results(&self) -> Result<u64, StorageError> {
        let guard = self.results.lock().map_err(lock_err)?;
        Ok(guard.len() as u64)
    }

    async fn dominant_counts(&self) -> Result<DoshaCounts, StorageError> {
        let guard = self.results.lock().map_err(lock_err)?;
        let mut counts = DoshaCounts::default();
        for result in guard.values() {
            counts.bump(result.dominant);
        }
        Ok(counts)
    }
}

#[async_trait]
impl FollowUpRepository for InMemoryRepository {
    async fn append_follow_up(&self, follow_up: &FollowUp) -> Result<FollowUpId, StorageError> {
        let mut guard = self.follow_ups.lock().map_err(lock_err)?;
        let next = guard.keys().map(|id| id.value()).max().unwrap_or(0) + 1;
        let id = FollowUpId::new(next);
        guard.insert(
            id,
            FollowUp::from_persisted(
                id,
                follow_up.user_id(),
                follow_up.recorded_at(),
                follow_up.symptoms().to_vec(),
                follow_up.improvements().to_vec(),
                follow_up.concerns().to_vec(),
                follow_up.energy(),
                follow_up.sleep(),
                follow_up.digestion(),
                follow_up.notes().to_string(),
            ),
        );
        Ok(id)
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<FollowUp>, StorageError> {
        let guard = self.follow_ups.lock().map_err(lock_err)?;
        let mut list: Vec<FollowUp> = guard
            .values()
            .filter(|f| f.user_id() == user_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| b.recorded_at().cmp(&a.recorded_at()));
        Ok(list)
    }

    async fn list_all(&self, limit: u32) -> Result<Vec<FollowUp>, StorageError> {
        let guard = self.follow_ups.lock().map_err(lock_err)?;
        let mut list: Vec<FollowUp> = guard.values().cloned().collect();
        list.sort_by(|a, b| b.recorded_at().cmp(&a.recorded_at()));
        list.truncate(limit as usize);
        Ok(list)
    }

    async fn delete_follow_up(&self, id: FollowUpId) -> Result<(), StorageError> {
        let mut guard = self.follow_ups.lock().map_err(lock_err)?;
        guard.remove(&id).map(|_| ()).ok_or(StorageError::NotFound)
    }

    async fn count_for_user(&self, user_id: UserId) -> Result<u64, StorageError> {
        let guard = self.follow_ups.lock().map_err(lock_err)?;
        Ok(guard.values().filter(|f| f.user_id() == user_id).count() as u64)
    }
}

#[async_trait]
impl SettingsRepository for InMemoryRepository {
    async fn get_settings(&self) -> Result<Option<SystemSettings>, StorageError> {
        let guard = self.settings.lock().map_err(lock_err)?;
        Ok(guard.clone())
    }

    async fn save_settings(&self, settings: &SystemSettings) -> Result<(), StorageError> {
        let mut guard = self.settings.lock().map_err(lock_err)?;
        *guard = Some(settings.clone());
        Ok(())
    }
}

/// Aggregates the repositories behind trait objects for easy backend
/// swapping.
#[derive(Clone)]
pub struct Storage {
    pub users: Arc<dyn UserRepository>,
    pub admins: Arc<dyn AdminRepository>,
    pub assessments: Arc<dyn AssessmentRepository>,
    pub follow_ups: Arc<dyn FollowUpRepository>,
    pub settings: Arc<dyn SettingsRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        Self {
            users: Arc::new(repo.clone()),
            admins: Arc::new(repo.clone()),
            assessments: Arc::new(repo.clone()),
            follow_ups: Arc::new(repo.clone()),
            settings: Arc::new(repo),
        }
    }
}
