use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::UserId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum UserError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("email address looks invalid: {0}")]
    InvalidEmail(String),

    #[error("age {0} is out of range (1-120)")]
    AgeOutOfRange(u32),

    #[error("credential must not be empty")]
    EmptyCredential,

    #[error("unknown gender: {0}")]
    InvalidGender(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = UserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            other => Err(UserError::InvalidGender(other.to_string())),
        }
    }
}

/// A registered account. Created at registration, mutated only through
/// `UserUpdate`, removed only by administrative action.
///
/// The credential is deliberately absent: it lives hashed in storage and
/// never travels with the entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    age: u32,
    gender: Gender,
    occupation: String,
    location: String,
    joined_at: DateTime<Utc>,
}

impl User {
    /// Rehydrate a user from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns `UserError` if any field fails validation.
    #[allow(clippy::too_many_arguments)]
    pub fn from_persisted(
        id: UserId,
        name: String,
        email: String,
        age: u32,
        gender: Gender,
        occupation: String,
        location: String,
        joined_at: DateTime<Utc>,
    ) -> Result<Self, UserError> {
        validate_name(&name)?;
        validate_email(&email)?;
        validate_age(age)?;
        Ok(Self {
            id,
            name,
            email,
            age,
            gender,
            occupation,
            location,
            joined_at,
        })
    }

    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn age(&self) -> u32 {
        self.age
    }

    #[must_use]
    pub fn gender(&self) -> Gender {
        self.gender
    }

    #[must_use]
    pub fn occupation(&self) -> &str {
        &self.occupation
    }

    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    #[must_use]
    pub fn joined_at(&self) -> DateTime<Utc> {
        self.joined_at
    }

    /// Apply a partial update, validating the changed fields.
    ///
    /// # Errors
    ///
    /// Returns `UserError` if a changed field fails validation. The user is
    /// left unchanged on error.
    pub fn apply_update(&mut self, update: &UserUpdate) -> Result<(), UserError> {
        if let Some(name) = &update.name {
            validate_name(name)?;
        }
        if let Some(age) = update.age {
            validate_age(age)?;
        }

        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(age) = update.age {
            self.age = age;
        }
        if let Some(gender) = update.gender {
            self.gender = gender;
        }
        if let Some(occupation) = &update.occupation {
            self.occupation = occupation.clone();
        }
        if let Some(location) = &update.location {
            self.location = location.clone();
        }
        Ok(())
    }
}

/// Partial update with named optional fields.
///
/// Email is intentionally not updatable: it is the account key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub occupation: Option<String>,
    pub location: Option<String>,
}

impl UserUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.age.is_none()
            && self.gender.is_none()
            && self.occupation.is_none()
            && self.location.is_none()
    }
}

/// Everything a new registration provides, credential included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub credential: String,
    pub age: u32,
    pub gender: Gender,
    pub occupation: String,
    pub location: String,
}

impl Registration {
    /// Check the registration before it touches storage.
    ///
    /// # Errors
    ///
    /// Returns `UserError` on an empty name or credential, an implausible
    /// email, or an out-of-range age.
    pub fn validate(&self) -> Result<(), UserError> {
        validate_name(&self.name)?;
        validate_email(&self.email)?;
        validate_age(self.age)?;
        if self.credential.is_empty() {
            return Err(UserError::EmptyCredential);
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<(), UserError> {
    if name.trim().is_empty() {
        return Err(UserError::EmptyName);
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), UserError> {
    let looks_ok = email.contains('@') && !email.starts_with('@') && !email.ends_with('@');
    if !looks_ok {
        return Err(UserError::InvalidEmail(email.to_string()));
    }
    Ok(())
}

fn validate_age(age: u32) -> Result<(), UserError> {
    if !(1..=120).contains(&age) {
        return Err(UserError::AgeOutOfRange(age));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn sample_user() -> User {
        User::from_persisted(
            UserId::new(1),
            "Asha".into(),
            "asha@example.com".into(),
            34,
            Gender::Female,
            "Teacher".into(),
            "Pune".into(),
            fixed_now(),
        )
        .unwrap()
    }

    #[test]
    fn rejects_bad_email() {
        let err = User::from_persisted(
            UserId::new(1),
            "Asha".into(),
            "not-an-email".into(),
            34,
            Gender::Female,
            String::new(),
            String::new(),
            fixed_now(),
        )
        .unwrap_err();
        assert!(matches!(err, UserError::InvalidEmail(_)));
    }

    #[test]
    fn update_applies_only_named_fields() {
        let mut user = sample_user();
        let update = UserUpdate {
            occupation: Some("Therapist".into()),
            ..UserUpdate::default()
        };
        user.apply_update(&update).unwrap();

        assert_eq!(user.occupation(), "Therapist");
        assert_eq!(user.name(), "Asha");
        assert_eq!(user.age(), 34);
    }

    #[test]
    fn invalid_update_leaves_user_unchanged() {
        let mut user = sample_user();
        let update = UserUpdate {
            name: Some("New Name".into()),
            age: Some(300),
            ..UserUpdate::default()
        };

        assert!(user.apply_update(&update).is_err());
        assert_eq!(user.name(), "Asha");
        assert_eq!(user.age(), 34);
    }

    #[test]
    fn registration_requires_credential() {
        let reg = Registration {
            name: "Asha".into(),
            email: "asha@example.com".into(),
            credential: String::new(),
            age: 34,
            gender: Gender::Female,
            occupation: String::new(),
            location: String::new(),
        };
        assert_eq!(reg.validate(), Err(UserError::EmptyCredential));
    }
}
