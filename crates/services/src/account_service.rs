use std::sync::Arc;

use prakriti_core::model::{Registration, User, UserId, UserUpdate};
use storage::repository::{
    AdminRepository, NewUserRecord, StorageError, UserRepository,
};

use crate::Clock;
use crate::error::AccountError;
use crate::session::Session;

/// Registration, sign-in, and profile management for user accounts.
///
/// Credentials are hashed with bcrypt before they reach storage; plaintext
/// never leaves this service.
#[derive(Clone)]
pub struct AccountService {
    clock: Clock,
    users: Arc<dyn UserRepository>,
    admins: Arc<dyn AdminRepository>,
}

impl AccountService {
    #[must_use]
    pub fn new(clock: Clock, users: Arc<dyn UserRepository>, admins: Arc<dyn AdminRepository>) -> Self {
        Self { clock, users, admins }
    }

    /// Register a new account and sign it in.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::Invalid` if the registration fails validation,
    /// `AccountError::EmailTaken` if the email is already registered, and
    /// `AccountError::Storage` on persistence failures.
    pub async fn register(&self, registration: Registration) -> Result<Session, AccountError> {
        registration.validate()?;

        let credential_hash = bcrypt::hash(&registration.credential, bcrypt::DEFAULT_COST)?;
        let record = NewUserRecord {
            name: registration.name,
            email: registration.email,
            credential_hash,
            age: registration.age,
            gender: registration.gender,
            occupation: registration.occupation,
            location: registration.location,
            joined_at: self.clock.now(),
        };

        let id = match self.users.insert_new_user(record).await {
            Ok(id) => id,
            Err(StorageError::Conflict) => return Err(AccountError::EmailTaken),
            Err(err) => return Err(err.into()),
        };

        let user = self
            .users
            .get_user(id)
            .await?
            .ok_or(AccountError::NotFound)?;
        Ok(Session::User(user))
    }

    /// Authenticate an email/credential pair.
    ///
    /// Admin accounts are checked first, so an admin email always yields an
    /// admin session. A wrong credential and an unknown email are
    /// indistinguishable from the outside.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::InvalidCredentials` when the pair does not
    /// match any account.
    pub async fn authenticate(&self, email: &str, credential: &str) -> Result<Session, AccountError> {
        if let Some(found) = self.admins.find_admin_by_email(email).await? {
            if credential_matches(credential, &found.credential_hash) {
                return Ok(Session::Admin(found.admin));
            }
            return Err(AccountError::InvalidCredentials);
        }

        let Some(found) = self.users.find_by_email(email).await? else {
            return Err(AccountError::InvalidCredentials);
        };
        if !credential_matches(credential, &found.credential_hash) {
            return Err(AccountError::InvalidCredentials);
        }
        Ok(Session::User(found.user))
    }

    /// Fetch a user by id.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::NotFound` if no such user exists.
    pub async fn get_user(&self, id: UserId) -> Result<User, AccountError> {
        self.users
            .get_user(id)
            .await?
            .ok_or(AccountError::NotFound)
    }

    /// Apply a partial profile update and return the refreshed user.
    ///
    /// An empty update is a no-op that still returns the current user.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::Invalid` if a changed field fails validation,
    /// `AccountError::NotFound` if the user does not exist.
    pub async fn update_profile(
        &self,
        id: UserId,
        update: UserUpdate,
    ) -> Result<User, AccountError> {
        if update.is_empty() {
            return self.get_user(id).await;
        }

        // Validate against the current state before touching storage.
        let mut current = self.get_user(id).await?;
        current.apply_update(&update)?;

        match self.users.update_user(id, &update).await {
            Ok(user) => Ok(user),
            Err(StorageError::NotFound) => Err(AccountError::NotFound),
            Err(err) => Err(err.into()),
        }
    }
}

/// A stored hash that can never match. Imported accounts carry this until
/// their credential is reset.
pub const LOCKED_CREDENTIAL_HASH: &str = "!";

/// Malformed hashes (such as the locked sentinel) count as a mismatch
/// rather than an error.
fn credential_matches(credential: &str, hash: &str) -> bool {
    bcrypt::verify(credential, hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    use prakriti_core::model::Gender;
    use prakriti_core::time::fixed_clock;
    use storage::repository::InMemoryRepository;

    fn service() -> AccountService {
        let repo = Arc::new(InMemoryRepository::new());
        AccountService::new(fixed_clock(), repo.clone(), repo)
    }

    fn registration(email: &str) -> Registration {
        Registration {
            name: "Asha".into(),
            email: email.into(),
            credential: "secret123".into(),
            age: 34,
            gender: Gender::Female,
            occupation: "Teacher".into(),
            location: "Pune".into(),
        }
    }

    #[tokio::test]
    async fn register_then_authenticate_roundtrip() {
        let service = service();
        let session = service
            .register(registration("asha@example.com"))
            .await
            .expect("register");
        let user = session.user().expect("user session").clone();
        assert_eq!(user.email(), "asha@example.com");

        let again = service
            .authenticate("asha@example.com", "secret123")
            .await
            .expect("authenticate");
        assert_eq!(again.user().map(User::id), Some(user.id()));
    }

    #[tokio::test]
    async fn wrong_credential_is_rejected() {
        let service = service();
        service
            .register(registration("asha@example.com"))
            .await
            .expect("register");

        let err = service
            .authenticate("asha@example.com", "wrong")
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::InvalidCredentials));

        let err = service
            .authenticate("nobody@example.com", "secret123")
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::InvalidCredentials));
    }

    #[tokio::test]
    async fn duplicate_email_is_reported_as_taken() {
        let service = service();
        service
            .register(registration("asha@example.com"))
            .await
            .expect("first");
        let err = service
            .register(registration("asha@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::EmailTaken));
    }

    #[tokio::test]
    async fn update_profile_rejects_invalid_fields_without_mutating() {
        let service = service();
        let session = service
            .register(registration("asha@example.com"))
            .await
            .expect("register");
        let id = session.user().expect("user").id();

        let err = service
            .update_profile(
                id,
                UserUpdate {
                    age: Some(500),
                    ..UserUpdate::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::Invalid(_)));

        let unchanged = service.get_user(id).await.expect("user");
        assert_eq!(unchanged.age(), 34);
    }
}
